use crate::controller::{RosterController, RosterSession};
use crate::loader::{LoadError, LoadStatus, StaticSource};
use crate::profile::ProfileRecord;
use crate::toggles::ToggleName;

fn controller_with(first_names: &[&str]) -> RosterController {
    let mut controller = RosterController::default();
    let ticket = controller.begin_load().unwrap();
    let records = first_names
        .iter()
        .map(|n| ProfileRecord::named(n, ""))
        .collect();
    assert!(controller.finish_load(ticket, Ok(records)));
    controller
}

fn visible_names(controller: &RosterController) -> Vec<String> {
    controller
        .state()
        .visible_records()
        .map(|r| r.display_name())
        .collect()
}

#[test]
fn next_n_times_returns_to_start() {
    let mut controller = controller_with(&["Ann", "Bob", "Carol", "Dee", "Eve"]);
    for start in 0..5 {
        controller.go_to(start);
        for _ in 0..5 {
            controller.next();
        }
        assert_eq!(controller.state().cursor(), Some(start as usize));
        for _ in 0..5 {
            controller.prev();
        }
        assert_eq!(controller.state().cursor(), Some(start as usize));
    }
}

#[test]
fn empty_query_is_identity() {
    let controller = controller_with(&["Zed", "Ann", "Moe"]);
    assert_eq!(visible_names(&controller), vec!["Zed", "Ann", "Moe"]);
}

#[test]
fn substring_filter_is_case_insensitive_and_stable() {
    let mut controller = controller_with(&["Ann", "Bob", "Anna"]);
    controller.set_query("an");
    assert_eq!(visible_names(&controller), vec!["Ann", "Anna"]);
    controller.set_query("xyz");
    assert!(visible_names(&controller).is_empty());
}

#[test]
fn filtering_down_reclamps_cursor() {
    let mut controller = controller_with(&["Ann", "Bob", "Carol"]);
    controller.go_to(2);
    controller.set_query("carol");
    assert_eq!(controller.state().cursor(), Some(0));
    controller.set_query("nobody");
    assert_eq!(controller.state().cursor(), None);
    controller.next();
    controller.prev();
    assert_eq!(controller.state().cursor(), None);
}

#[test]
fn go_to_outside_bounds_keeps_cursor() {
    let mut controller = controller_with(&["Ann", "Bob", "Carol"]);
    controller.go_to(1);
    assert!(!controller.go_to(-1));
    assert!(!controller.go_to(3));
    assert_eq!(controller.state().cursor(), Some(1));
}

#[test]
fn toggling_mascot_is_isolated() {
    let mut controller = controller_with(&["Ann", "Bob", "Carol"]);
    controller.set_query("o");
    controller.next();
    let before_toggles = *controller.state().toggles();
    let before_visible = visible_names(&controller);

    controller.toggle(ToggleName::Mascot);

    for (name, value) in controller.state().toggles().iter() {
        if name != ToggleName::Mascot {
            assert_eq!(value, before_toggles.get(name));
        }
    }
    assert_ne!(
        controller.state().toggles().get(ToggleName::Mascot),
        before_toggles.get(ToggleName::Mascot)
    );
    assert_eq!(visible_names(&controller), before_visible);
    assert_eq!(controller.state().cursor(), Some(1));
}

#[tokio::test]
async fn end_to_end_slideshow() {
    let source = StaticSource::new(vec![
        ProfileRecord::named("Ann", ""),
        ProfileRecord::named("Bob", ""),
        ProfileRecord::named("Carol", ""),
    ]);
    let session = RosterSession::new(RosterController::default());
    assert_eq!(
        session.lock().await.state().load_status(),
        &LoadStatus::Idle
    );
    assert!(session.load(&source).await);

    let mut controller = session.lock().await;
    assert_eq!(controller.state().load_status(), &LoadStatus::Ready);
    assert_eq!(controller.counts(), (3, 3));
    assert_eq!(controller.state().cursor(), Some(0));

    controller.set_query("o");
    assert_eq!(visible_names(&controller), vec!["Bob", "Carol"]);
    assert_eq!(controller.current().map(|r| r.display_name()).as_deref(), Some("Bob"));

    controller.next();
    assert_eq!(controller.current().map(|r| r.display_name()).as_deref(), Some("Carol"));

    controller.next();
    assert_eq!(controller.state().cursor(), Some(0));
    assert_eq!(controller.current().map(|r| r.display_name()).as_deref(), Some("Bob"));
}

#[test]
fn failed_load_surfaces_reason_and_stays_inert() {
    let mut controller = RosterController::default();
    let ticket = controller.begin_load().unwrap();
    controller.finish_load(
        ticket,
        Err(LoadError::Transport {
            message: "connection refused".to_string(),
        }),
    );
    assert_eq!(
        controller.state().load_status(),
        &LoadStatus::Failed("connection refused".to_string())
    );
    controller.next();
    assert_eq!(controller.state().cursor(), None);
    assert_eq!(controller.counts(), (0, 0));
}
