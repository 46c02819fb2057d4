use std::error::Error;
use std::sync::Arc;

use rosterview::controller::{ControllerOptions, RosterController, RosterSession};
use rosterview::filter::SearchFields;
use rosterview::loader::{parse_roster, RosterSource, StaticSource};
use rosterview::output::{OutputFormat, PageRenderer, RenderOptions};
use rosterview::toggles::{DisplayToggleSet, ToggleName};

const ROSTER: &str = r#"[
  {"name": {"first": "Ann", "last": "Lee", "preferred": "Annie"}, "prefix": "alee12",
   "mascot": "Curious Koala", "funFact": "Has two cats",
   "links": {"charlotte": "https://webpages.charlotte.edu/alee12", "github": "https://github.com/alee"}},
  {"name": {"first": "Bob", "last": "Ray"}, "prefix": "bray3", "mascot": "Sleepy Otter"},
  {"name": {"first": "Carol", "last": "Diaz"}, "prefix": "cdiaz",
   "quote": {"text": "Make it work, then make it fast.", "author": "Kent Beck"}}
]"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let source: Arc<dyn RosterSource> = Arc::new(StaticSource::new(parse_roster(ROSTER.as_bytes())?));

    let mut controller = RosterController::new(ControllerOptions {
        default_toggles: DisplayToggleSet::CURATED,
        search_fields: SearchFields::all(),
    });
    controller.subscribe(PageRenderer::new(
        std::io::stdout(),
        OutputFormat::Text,
        RenderOptions {
            dedupe_home_link: true,
            ..RenderOptions::plain()
        },
    ));

    let session = RosterSession::new(controller);
    session.spawn_load(source).await?;

    let mut controller = session.lock().await;
    controller.set_query("otter");
    controller.reset_filters();
    controller.next();
    controller.toggle(ToggleName::Image);
    controller.go_to(2);
    drop(controller);

    session.teardown().await;
    Ok(())
}
