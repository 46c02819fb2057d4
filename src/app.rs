use std::io::Write;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{ControllerOptions, RosterController, RosterSession};
use crate::filter::SearchFields;
use crate::loader::{self, HttpLoader, HttpLoaderOptions, LoadStatus};
use crate::output::{self, text, OutputFormat, PageRenderer, RenderOptions};
use crate::toggles::{DisplayToggleSet, ToggleName};

#[derive(Debug)]
struct RunConfig {
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: String,
    search_fields: SearchFields,
    default_toggles: DisplayToggleSet,
    render: RenderOptions,
    format: OutputFormat,
    query: Option<String>,
    index: Option<isize>,
    interactive: bool,
    list: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let endpoint = args
        .url
        .or_else(|| cfg.endpoint.clone())
        .unwrap_or_else(|| loader::DEFAULT_ENDPOINT.to_string());
    reqwest::Url::parse(&endpoint).map_err(|e| format!("invalid endpoint '{endpoint}': {e}"))?;

    let timeout = args.timeout.or(cfg.timeout).map(Duration::from_secs);
    let user_agent = cfg
        .user_agent
        .clone()
        .unwrap_or_else(|| loader::DEFAULT_USER_AGENT.to_string());

    let search_fields = if args.search_field.is_empty() {
        match cfg.search_fields.as_ref() {
            Some(names) => SearchFields::parse_list(names).map_err(|e| e.to_string())?,
            None => SearchFields::default(),
        }
    } else {
        SearchFields::parse_list(&args.search_field).map_err(|e| e.to_string())?
    };

    let base = if args.all_sections {
        DisplayToggleSet::ALL_VISIBLE
    } else {
        DisplayToggleSet::CURATED
    };
    let mut default_toggles = cfg.toggle_defaults(base)?;
    for raw in &args.show {
        let name = raw.parse::<ToggleName>().map_err(|e| e.to_string())?;
        default_toggles.set(name, true);
    }
    for raw in &args.hide {
        let name = raw.parse::<ToggleName>().map_err(|e| e.to_string())?;
        default_toggles.set(name, false);
    }

    let format_raw = args
        .format
        .or_else(|| cfg.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::parse(&format_raw)
        .ok_or_else(|| format!("invalid format '{format_raw}', expected text or json"))?;

    let render = RenderOptions {
        email_domain: args
            .email_domain
            .or_else(|| cfg.email_domain.clone())
            .unwrap_or_else(|| text::DEFAULT_EMAIL_DOMAIN.to_string()),
        home_link_label: Some(
            cfg.home_link_label
                .clone()
                .unwrap_or_else(|| text::DEFAULT_HOME_LINK.to_string()),
        )
        .filter(|label| !label.trim().is_empty()),
        dedupe_home_link: args.dedupe_home_link || cfg.dedupe_home_link.unwrap_or(false),
        color: !no_color,
        show_quick_nav: !args.no_quick_nav && cfg.quick_nav.unwrap_or(true),
    };

    Ok(RunConfig {
        endpoint,
        timeout,
        user_agent,
        search_fields,
        default_toggles,
        render,
        format,
        query: args.query,
        index: args.index,
        interactive: args.interactive,
        list: args.list,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    GoTo(isize),
    Query(String),
    Toggle(String),
    Reset,
    List,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Command::Query(query.to_string()));
        }
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        match head {
            "" | "n" | "next" => Ok(Command::Next),
            "p" | "prev" => Ok(Command::Prev),
            "g" | "goto" => rest
                .parse::<isize>()
                .map(Command::GoTo)
                .map_err(|_| format!("expected an index after '{head}'")),
            "t" | "toggle" if !rest.is_empty() => Ok(Command::Toggle(rest.to_string())),
            "t" | "toggle" => Err(format!("expected a section name after '{head}'")),
            "r" | "reset" => Ok(Command::Reset),
            "l" | "list" => Ok(Command::List),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{other}' (h for help)")),
        }
    }
}

const INTERACTIVE_HELP: &str = "\
commands:
  n | <enter>   next student
  p             previous student
  g N           go to visible student N (0-based)
  /TEXT         search (a bare / clears the search)
  t SECTION     toggle a display section
  r             clear search and restore default sections
  l             quick navigation list
  q             quit";

fn warn_line(message: &str) {
    eprintln!("{} {}", "[WRN]".bold().yellow(), message);
}

fn print_bytes(bytes: &[u8]) -> Result<(), String> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(bytes)
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("failed to write output: {e}"))
}

fn loading_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Loading student introductions...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn run_interactive<R>(session: &RosterSession, run: &RunConfig, input: R) -> Result<(), String>
where
    R: AsyncBufRead + Unpin,
{
    {
        let mut controller = session.lock().await;
        controller.subscribe(PageRenderer::new(
            std::io::stdout(),
            run.format,
            run.render.clone(),
        ));
    }
    println!("{}", "h for help, q to quit".dimmed());

    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read command from stdin: {e}")),
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                warn_line(&e);
                continue;
            }
        };
        let mut controller = session.lock().await;
        match command {
            Command::Next => controller.next(),
            Command::Prev => controller.prev(),
            Command::GoTo(i) => {
                if !controller.go_to(i) {
                    log::debug!("ignoring go to {i}");
                }
            }
            Command::Query(q) => controller.set_query(&q),
            Command::Toggle(name) => {
                if let Err(e) = controller.toggle_named(&name) {
                    warn_line(&e.to_string());
                }
            }
            Command::Reset => controller.reset_filters(),
            Command::List => {
                let nav = controller.quick_nav();
                let bytes = match run.format {
                    OutputFormat::Text => text::render_quick_nav(&nav, &run.render).into_bytes(),
                    OutputFormat::Json => output::render_nav_json(&nav),
                };
                print_bytes(&bytes)?;
            }
            Command::Help => println!("{INTERACTIVE_HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if !run.render.color {
        colored::control::set_override(false);
    }
    log::debug!("roster endpoint: {}", run.endpoint);

    let loader = HttpLoader::new(HttpLoaderOptions {
        endpoint: run.endpoint.clone(),
        timeout: run.timeout,
        user_agent: run.user_agent.clone(),
    })
    .map_err(|e| e.to_string())?;

    let session = RosterSession::new(RosterController::new(ControllerOptions {
        default_toggles: run.default_toggles,
        search_fields: run.search_fields.clone(),
    }));

    let spinner = loading_spinner(run.format == OutputFormat::Text);
    session.load(&loader).await;
    spinner.finish_and_clear();

    let result = {
        let mut controller = session.lock().await;
        if let Some(query) = run.query.as_deref() {
            controller.set_query(query);
        }
        if let Some(index) = run.index {
            if !controller.go_to(index) {
                log::debug!("index {index} is outside the visible set, ignoring");
            }
        }

        let snapshot = controller.snapshot();
        let bytes = if run.list && snapshot.load_status.is_ready() {
            let nav = snapshot.quick_nav();
            match run.format {
                OutputFormat::Text => text::render_quick_nav(&nav, &run.render).into_bytes(),
                OutputFormat::Json => output::render_nav_json(&nav),
            }
        } else {
            match run.format {
                OutputFormat::Text => text::render_page(&snapshot, &run.render).into_bytes(),
                OutputFormat::Json => output::render_json(&snapshot),
            }
        };
        print_bytes(&bytes)?;

        match snapshot.load_status {
            LoadStatus::Failed(reason) => Err(format!("failed to load roster: {reason}")),
            _ => Ok(()),
        }
    };

    let result = match result {
        Ok(()) if run.interactive => {
            run_interactive(&session, &run, BufReader::new(tokio::io::stdin())).await
        }
        other => other,
    };

    session.teardown().await;
    result
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.use_stderr() {
                return Err(e.to_string());
            }
            print!("{e}");
            return Ok(());
        }
    };

    init_logging(args.verbose);

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(path) => config::expand_tilde(path),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory for config".to_string())?,
        };
        if config::ensure_default_config_file(&path)? {
            println!("wrote default config to {}", path.display());
        } else {
            warn_line(&format!("config already exists at {}", path.display()));
        }
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    log::trace!("run config: {run:?}");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
