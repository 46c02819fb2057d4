use crate::cli::args::CliArgs;
use crate::filter::SearchFields;
use crate::output::OutputFormat;
use crate::toggles::ToggleName;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --format '{raw}', expected text or json"));
        }
    }
    for raw in args.show.iter().chain(args.hide.iter()) {
        raw.parse::<ToggleName>().map_err(|e| e.to_string())?;
    }
    if let Some(name) = args.show.iter().find(|s| args.hide.contains(*s)) {
        return Err(format!("section '{name}' passed to both --show and --hide"));
    }
    SearchFields::parse_list(&args.search_field).map_err(|e| e.to_string())?;
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive number of seconds".to_string());
        }
    }
    if args.interactive && args.list {
        return Err("use either --interactive or --list, not both".to_string());
    }
    if let Some(url) = args.url.as_deref() {
        reqwest::Url::parse(url).map_err(|e| format!("invalid --url '{url}': {e}"))?;
    }
    Ok(())
}
