//! Student profile records as served by the roster endpoint.
//!
//! The remote payload is a JSON array of loosely-shaped objects. Every section
//! other than the name is optional, and older cohorts omit fields freely, so
//! the schema here is deliberately lenient: absent keys, `null` values and
//! unknown keys all deserialize without error.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub preferred: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Backgrounds {
    #[serde(default, deserialize_with = "non_blank")]
    pub academic: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub professional: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub personal: Option<String>,
}

/// Free-text sections of a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub personal_statement: Option<String>,
    pub background_academic: Option<String>,
    pub background_professional: Option<String>,
    pub background_personal: Option<String>,
    pub fun_fact: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub author: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    #[serde(default, deserialize_with = "string_or_number")]
    pub dept: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub num: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub reason: String,
}

/// Primary computer the student reported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Platform {
    #[serde(default, deserialize_with = "non_blank")]
    pub device: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub os: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Media {
    #[serde(default)]
    has_image: Option<bool>,
    #[serde(default, deserialize_with = "non_blank")]
    src: Option<String>,
}

/// Wire shape of one roster entry. Converted into [`ProfileRecord`] so the
/// narrative fields end up grouped regardless of where the API nests them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    #[serde(default)]
    name: Identity,
    #[serde(default, alias = "contactKey", deserialize_with = "non_blank")]
    prefix: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    mascot: Option<String>,
    #[serde(default, alias = "imageRef", deserialize_with = "non_blank")]
    image: Option<String>,
    #[serde(default)]
    media: Option<Media>,
    #[serde(default, deserialize_with = "non_blank")]
    personal_statement: Option<String>,
    #[serde(default)]
    backgrounds: Option<Backgrounds>,
    #[serde(default, deserialize_with = "non_blank")]
    fun_fact: Option<String>,
    #[serde(default)]
    quote: Option<Quote>,
    #[serde(default, deserialize_with = "null_as_default")]
    courses: Vec<Course>,
    #[serde(default, deserialize_with = "string_links")]
    links: IndexMap<String, String>,
    #[serde(default)]
    platform: Option<Platform>,
}

/// One student's introduction. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub identity: Identity,
    pub contact_key: Option<String>,
    pub mascot: Option<String>,
    pub image_ref: Option<String>,
    pub narrative: Narrative,
    pub quote: Option<Quote>,
    pub courses: Vec<Course>,
    pub links: IndexMap<String, String>,
    pub platform: Option<Platform>,
}

impl<'de> Deserialize<'de> for ProfileRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawProfile::deserialize(deserializer).map(ProfileRecord::from)
    }
}

impl From<RawProfile> for ProfileRecord {
    fn from(raw: RawProfile) -> Self {
        let backgrounds = raw.backgrounds.unwrap_or_default();
        let image_ref = raw.image.or_else(|| {
            raw.media
                .filter(|m| m.has_image.unwrap_or(true))
                .and_then(|m| m.src)
        });
        let quote = raw.quote.filter(|q| !q.text.trim().is_empty());
        let platform = raw
            .platform
            .filter(|p| p.device.is_some() || p.os.is_some());
        Self {
            identity: raw.name,
            contact_key: raw.prefix,
            mascot: raw.mascot,
            image_ref,
            narrative: Narrative {
                personal_statement: raw.personal_statement,
                background_academic: backgrounds.academic,
                background_professional: backgrounds.professional,
                background_personal: backgrounds.personal,
                fun_fact: raw.fun_fact,
            },
            quote,
            courses: raw.courses,
            links: raw.links,
            platform,
        }
    }
}

impl ProfileRecord {
    /// Shorthand used by tests and demos.
    pub fn named(first: &str, last: &str) -> Self {
        Self {
            identity: Identity {
                first: first.to_string(),
                last: last.to_string(),
                preferred: None,
            },
            ..Self::default()
        }
    }

    /// `"first last"`, trimmed so a missing last name leaves no trailing space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.identity.first, self.identity.last)
            .trim()
            .to_string()
    }

    pub fn preferred_name(&self) -> Option<&str> {
        self.identity.preferred.as_deref()
    }

    pub fn contact_email(&self, domain: &str) -> Option<String> {
        self.contact_key
            .as_deref()
            .map(|prefix| format!("{prefix}@{domain}"))
    }

    /// Stable key for list entries: the contact key when present, otherwise
    /// the record's position in the visible set.
    pub fn nav_key(&self, position: usize) -> String {
        match self.contact_key.as_deref() {
            Some(key) => key.to_string(),
            None => position.to_string(),
        }
    }

    pub fn link(&self, label: &str) -> Option<&str> {
        self.links.get(label).map(String::as_str)
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Course numbers arrive as either `"3135"` or `3135` depending on the cohort.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

// Keeps only string-valued links, in their original order.
fn string_links<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(label, url)| match url {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some((label, s)),
            _ => None,
        })
        .collect())
}
