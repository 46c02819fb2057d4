use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rosterview",
    version,
    about = "student roster slideshow",
    long_about = "rosterview fetches a class roster once, then lets you search it and page through one student introduction at a time.\n\nExamples:\n  rosterview\n  rosterview -q ann --show image\n  rosterview --interactive\n  rosterview --list --format json\n\nTip: Use --config to persist the endpoint and default display sections."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'l',
        long = "list",
        help_heading = "Output",
        help = "Print only the quick navigation list."
    )]
    pub list: bool,

    #[arg(
        long = "no-quick-nav",
        help_heading = "Output",
        help = "Do not print the quick navigation list under the card."
    )]
    pub no_quick_nav: bool,

    #[arg(
        short = 'u',
        long = "url",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Source",
        help = "Roster endpoint returning a JSON array of profiles."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Source",
        help = "Path to config file (defaults to ~/.rosterview/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Source",
        help = "Write the default config file (if none exists) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "Source",
        help = "Give up on the roster request after this many seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'q',
        long = "query",
        value_name = "TEXT",
        help_heading = "Navigation",
        help = "Case-insensitive search over the configured fields."
    )]
    pub query: Option<String>,

    #[arg(
        short = 'i',
        long = "index",
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Navigation",
        help = "Show the Nth visible student (0-based; out of range is ignored)."
    )]
    pub index: Option<isize>,

    #[arg(
        long = "interactive",
        help_heading = "Navigation",
        help = "Read navigation commands from stdin (n, p, g N, /TEXT, t NAME, r, l, q)."
    )]
    pub interactive: bool,

    #[arg(
        short = 's',
        long = "search-field",
        value_name = "FIELD",
        action = ArgAction::Append,
        help_heading = "Search",
        help = "Field matched by --query: name, preferred, contact, mascot (repeatable)."
    )]
    pub search_field: Vec<String>,

    #[arg(
        long = "show",
        value_name = "SECTION",
        action = ArgAction::Append,
        help_heading = "Display",
        help = "Turn a display section on (repeatable)."
    )]
    pub show: Vec<String>,

    #[arg(
        long = "hide",
        value_name = "SECTION",
        action = ArgAction::Append,
        help_heading = "Display",
        help = "Turn a display section off (repeatable)."
    )]
    pub hide: Vec<String>,

    #[arg(
        long = "all-sections",
        help_heading = "Display",
        help = "Start with every display section on, including the image."
    )]
    pub all_sections: bool,

    #[arg(
        long = "email-domain",
        value_name = "DOMAIN",
        help_heading = "Display",
        help = "Domain appended to the contact key to form the email address."
    )]
    pub email_domain: Option<String>,

    #[arg(
        long = "dedupe-home-link",
        help_heading = "Display",
        help = "Hide the home link from the links section when contact shows it."
    )]
    pub dedupe_home_link: bool,
}
