use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::toggles::{DisplayToggleSet, ToggleName};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub endpoint: Option<String>,
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    pub search_fields: Option<Vec<String>>,
    pub default_toggles: Option<BTreeMap<String, bool>>,
    pub email_domain: Option<String>,
    pub home_link_label: Option<String>,
    pub dedupe_home_link: Option<bool>,
    pub quick_nav: Option<bool>,
    pub format: Option<String>,
    pub no_color: Option<bool>,
}

impl ConfigFile {
    /// Applies `default_toggles` over `base`. Keys outside the fixed toggle
    /// set are an error.
    pub fn toggle_defaults(&self, base: DisplayToggleSet) -> Result<DisplayToggleSet, String> {
        let mut toggles = base;
        if let Some(overrides) = self.default_toggles.as_ref() {
            for (name, value) in overrides {
                let name = name
                    .parse::<ToggleName>()
                    .map_err(|e| format!("invalid default_toggles entry: {e}"))?;
                toggles.set(name, *value);
            }
        }
        Ok(toggles)
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".rosterview").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, String> {
    serde_yaml::from_str::<ConfigFile>(contents).map_err(|e| e.to_string())
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub fn default_config_yaml() -> String {
    r#"# rosterview config
#
# Location (default):
#   ~/.rosterview/config.yml

# Roster source
endpoint: https://dvonb.xyz/api/2025-fall/itis-3135/students?full=1
# timeout: 15
# user_agent: rosterview

# Search matches any of: name, preferred, contact, mascot
search_fields:
  - name
  - preferred

# Display sections shown on start and restored by reset.
# Keys: name, mascot, image, personalStatement, backgrounds, classes,
#       extraInfo, quote, links
default_toggles:
  image: false

# Contact section
email_domain: charlotte.edu
home_link_label: charlotte
dedupe_home_link: false

# Output
quick_nav: true
format: text
no_color: false
"#
    .to_string()
}

/// Writes the default config to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn ensure_default_config_file(path: &PathBuf) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(true)
}
