use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::profile::ProfileRecord;

/// Record fields the search box can match against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    /// `"first last"`.
    DisplayName,
    PreferredName,
    ContactKey,
    Mascot,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::DisplayName,
        SearchField::PreferredName,
        SearchField::ContactKey,
        SearchField::Mascot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::DisplayName => "name",
            SearchField::PreferredName => "preferred",
            SearchField::ContactKey => "contact",
            SearchField::Mascot => "mascot",
        }
    }

    fn text(self, record: &ProfileRecord) -> Option<String> {
        match self {
            SearchField::DisplayName => Some(record.display_name()),
            SearchField::PreferredName => record.identity.preferred.clone(),
            SearchField::ContactKey => record.contact_key.clone(),
            SearchField::Mascot => record.mascot.clone(),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown search field '{name}', expected one of: name, preferred, contact, mascot")]
pub struct UnknownSearchField {
    pub name: String,
}

impl FromStr for SearchField {
    type Err = UnknownSearchField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "name" | "display" | "display-name" | "displayname" => Ok(SearchField::DisplayName),
            "preferred" | "preferred-name" | "preferredname" => Ok(SearchField::PreferredName),
            "contact" | "prefix" | "contact-key" | "contactkey" => Ok(SearchField::ContactKey),
            "mascot" => Ok(SearchField::Mascot),
            _ => Err(UnknownSearchField {
                name: value.to_string(),
            }),
        }
    }
}

/// The fields a query is matched against. Order is irrelevant to the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchFields(Vec<SearchField>);

impl SearchFields {
    /// Display name and preferred name, as the roster page's search box does.
    pub fn names_only() -> Self {
        Self(vec![SearchField::DisplayName, SearchField::PreferredName])
    }

    pub fn all() -> Self {
        Self(SearchField::ALL.to_vec())
    }

    pub fn new(fields: impl IntoIterator<Item = SearchField>) -> Self {
        let mut out: Vec<SearchField> = Vec::new();
        for field in fields {
            if !out.contains(&field) {
                out.push(field);
            }
        }
        Self(out)
    }

    pub fn parse_list(names: &[String]) -> Result<Self, UnknownSearchField> {
        let fields = names
            .iter()
            .flat_map(|n| n.split(','))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::parse::<SearchField>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields))
    }

    pub fn as_slice(&self) -> &[SearchField] {
        &self.0
    }

    /// True iff any configured field contains `needle`, which must already be
    /// lower-cased. Absent fields never match.
    pub fn matches(&self, record: &ProfileRecord, needle: &str) -> bool {
        self.0.iter().any(|field| {
            field
                .text(record)
                .map(|text| text.to_lowercase().contains(needle))
                .unwrap_or(false)
        })
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::names_only()
    }
}

/// Normalized form of a search query: trimmed and lower-cased, `None` when
/// blank.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Positions (into `records`) of the records that survive `query`, in their
/// original order.
pub fn compute_visible(records: &[ProfileRecord], query: &str, fields: &SearchFields) -> Vec<usize> {
    match normalize_query(query) {
        None => (0..records.len()).collect(),
        Some(needle) => records
            .iter()
            .enumerate()
            .filter(|(_, record)| fields.matches(record, &needle))
            .map(|(i, _)| i)
            .collect(),
    }
}
