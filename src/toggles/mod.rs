use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Display sections a renderer may show or hide. The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleName {
    Name,
    Mascot,
    Image,
    PersonalStatement,
    Backgrounds,
    Classes,
    ExtraInfo,
    Quote,
    Links,
}

impl ToggleName {
    pub const ALL: [ToggleName; 9] = [
        ToggleName::Name,
        ToggleName::Mascot,
        ToggleName::Image,
        ToggleName::PersonalStatement,
        ToggleName::Backgrounds,
        ToggleName::Classes,
        ToggleName::ExtraInfo,
        ToggleName::Quote,
        ToggleName::Links,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToggleName::Name => "name",
            ToggleName::Mascot => "mascot",
            ToggleName::Image => "image",
            ToggleName::PersonalStatement => "personalStatement",
            ToggleName::Backgrounds => "backgrounds",
            ToggleName::Classes => "classes",
            ToggleName::ExtraInfo => "extraInfo",
            ToggleName::Quote => "quote",
            ToggleName::Links => "links",
        }
    }

    /// Human label, e.g. `"PersonalStatement"` for checkbox captions.
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ToggleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid toggle name '{name}', expected one of: name, mascot, image, personalStatement, backgrounds, classes, extraInfo, quote, links")]
pub struct InvalidToggleName {
    pub name: String,
}

impl FromStr for ToggleName {
    type Err = InvalidToggleName;

    /// Accepts the camelCase key as well as kebab/snake spellings from the CLI.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        ToggleName::ALL
            .into_iter()
            .find(|t| t.as_str().to_lowercase() == folded)
            .ok_or_else(|| InvalidToggleName {
                name: value.to_string(),
            })
    }
}

/// One boolean per [`ToggleName`]; every key is always present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayToggleSet {
    values: [bool; 9],
}

impl DisplayToggleSet {
    /// Every section on except the picture, matching the roster page's
    /// "Clear All Filters" configuration.
    pub const CURATED: DisplayToggleSet = DisplayToggleSet {
        values: [true, true, false, true, true, true, true, true, true],
    };

    pub const ALL_VISIBLE: DisplayToggleSet = DisplayToggleSet { values: [true; 9] };

    pub fn get(&self, name: ToggleName) -> bool {
        self.values[name.index()]
    }

    pub fn set(&mut self, name: ToggleName, value: bool) {
        self.values[name.index()] = value;
    }

    /// Flips one key and returns its new value.
    pub fn flip(&mut self, name: ToggleName) -> bool {
        let slot = &mut self.values[name.index()];
        *slot = !*slot;
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToggleName, bool)> + '_ {
        ToggleName::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

impl Default for DisplayToggleSet {
    fn default() -> Self {
        Self::CURATED
    }
}

impl Serialize for DisplayToggleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}

/// Current toggles plus the defaults `reset` restores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleSetManager {
    current: DisplayToggleSet,
    defaults: DisplayToggleSet,
}

impl ToggleSetManager {
    pub fn new(defaults: DisplayToggleSet) -> Self {
        Self {
            current: defaults,
            defaults,
        }
    }

    pub fn current(&self) -> &DisplayToggleSet {
        &self.current
    }

    pub fn defaults(&self) -> &DisplayToggleSet {
        &self.defaults
    }

    pub fn toggle(&mut self, name: ToggleName) -> bool {
        self.current.flip(name)
    }

    pub fn toggle_named(&mut self, name: &str) -> Result<bool, InvalidToggleName> {
        let name = name.parse::<ToggleName>()?;
        Ok(self.toggle(name))
    }

    pub fn reset(&mut self) {
        self.current = self.defaults;
    }
}

impl Default for ToggleSetManager {
    fn default() -> Self {
        Self::new(DisplayToggleSet::CURATED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mascot", ToggleName::Mascot)]
    #[case("personalStatement", ToggleName::PersonalStatement)]
    #[case("personal-statement", ToggleName::PersonalStatement)]
    #[case("extra_info", ToggleName::ExtraInfo)]
    #[case(" Links ", ToggleName::Links)]
    fn parses_toggle_spellings(#[case] raw: &str, #[case] expected: ToggleName) {
        assert_eq!(raw.parse::<ToggleName>().unwrap(), expected);
    }

    #[test]
    fn unknown_toggle_is_rejected() {
        let mut manager = ToggleSetManager::default();
        let before = *manager.current();
        let err = manager.toggle_named("avatar").unwrap_err();
        assert_eq!(err.name, "avatar");
        assert_eq!(*manager.current(), before);
    }

    #[test]
    fn flipping_one_key_leaves_others_alone() {
        let mut manager = ToggleSetManager::default();
        let before = *manager.current();
        assert!(!manager.toggle(ToggleName::Mascot));
        for (name, value) in manager.current().iter() {
            if name == ToggleName::Mascot {
                assert!(!value);
            } else {
                assert_eq!(value, before.get(name));
            }
        }
    }

    #[test]
    fn reset_restores_constructor_defaults() {
        let mut manager = ToggleSetManager::new(DisplayToggleSet::ALL_VISIBLE);
        manager.toggle(ToggleName::Image);
        manager.toggle(ToggleName::Quote);
        manager.reset();
        assert_eq!(*manager.current(), DisplayToggleSet::ALL_VISIBLE);
    }

    #[test]
    fn curated_defaults_hide_only_the_image() {
        let hidden: Vec<_> = DisplayToggleSet::CURATED
            .iter()
            .filter(|(_, on)| !on)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(hidden, vec![ToggleName::Image]);
        assert_eq!(ToggleName::PersonalStatement.label(), "PersonalStatement");
    }
}
