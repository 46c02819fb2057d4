//! Plain-text rendering of the roster page: one profile card, the slideshow
//! position, the results counter and the quick navigation list.

use colored::Colorize;
use itertools::Itertools;

use crate::controller::{NavEntry, RosterSnapshot};
use crate::loader::LoadStatus;
use crate::profile::ProfileRecord;
use crate::toggles::{DisplayToggleSet, ToggleName};

pub const DEFAULT_EMAIL_DOMAIN: &str = "charlotte.edu";
pub const DEFAULT_HOME_LINK: &str = "charlotte";

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub email_domain: String,
    /// Link label shown as "Website" in the always-visible contact section.
    pub home_link_label: Option<String>,
    /// Omit the home link from the links section since contact already has it.
    pub dedupe_home_link: bool,
    pub color: bool,
    pub show_quick_nav: bool,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            home_link_label: Some(DEFAULT_HOME_LINK.to_string()),
            dedupe_home_link: false,
            color: true,
            show_quick_nav: true,
        }
    }
}

fn heading(text: &str, options: &RenderOptions) -> String {
    if options.color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn dim(text: &str, options: &RenderOptions) -> String {
    if options.color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_section(out: &mut String, title: &str, body: &str, options: &RenderOptions) {
    out.push('\n');
    out.push_str(&heading(title, options));
    out.push('\n');
    out.push_str("  ");
    out.push_str(body);
    out.push('\n');
}

/// One profile, honouring every display toggle.
pub fn render_card(
    record: &ProfileRecord,
    toggles: &DisplayToggleSet,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();

    if toggles.get(ToggleName::Name) {
        let mut name = record.display_name();
        if let Some(preferred) = record.preferred_name() {
            name.push_str(&format!(" \"{preferred}\""));
        }
        out.push_str(&heading(&name, options));
        out.push('\n');
    }
    if toggles.get(ToggleName::Mascot) {
        if let Some(mascot) = record.mascot.as_deref() {
            out.push_str(&format!("Mascot: {mascot}\n"));
        }
    }
    if toggles.get(ToggleName::Image) {
        if let Some(image) = record.image_ref.as_deref() {
            out.push_str(&format!("Image: {image}\n"));
        }
    }

    let home_link = options
        .home_link_label
        .as_deref()
        .and_then(|label| record.link(label).map(|url| (label, url)));

    out.push('\n');
    out.push_str(&heading("Contact Information", options));
    out.push('\n');
    if let Some(email) = record.contact_email(&options.email_domain) {
        out.push_str(&format!("  Email: {email}\n"));
    }
    if let Some((_, url)) = home_link {
        out.push_str(&format!("  Website: {url}\n"));
    }

    if toggles.get(ToggleName::Backgrounds) {
        let narrative = &record.narrative;
        for (title, value) in [
            ("Academic Background", &narrative.background_academic),
            ("Professional Background", &narrative.background_professional),
            ("Personal Background", &narrative.background_personal),
        ] {
            push_section(
                &mut out,
                title,
                value.as_deref().unwrap_or("Not specified"),
                options,
            );
        }
    }

    if toggles.get(ToggleName::ExtraInfo) {
        if let Some(platform) = record.platform.as_ref() {
            let body = match (platform.device.as_deref(), platform.os.as_deref()) {
                (Some(device), Some(os)) => format!("{device} ({os})"),
                (Some(device), None) => device.to_string(),
                (None, Some(os)) => os.to_string(),
                (None, None) => String::new(),
            };
            push_section(&mut out, "Primary Computer", &body, options);
        }
        if let Some(fun_fact) = record.narrative.fun_fact.as_deref() {
            push_section(&mut out, "Fun Fact", fun_fact, options);
        }
    }

    if toggles.get(ToggleName::PersonalStatement) {
        if let Some(statement) = record.narrative.personal_statement.as_deref() {
            push_section(&mut out, "Personal Statement", statement, options);
        }
    }

    if toggles.get(ToggleName::Quote) {
        if let Some(quote) = record.quote.as_ref() {
            let mut body = format!("\"{}\"", quote.text);
            if let Some(author) = quote.author.as_deref() {
                body.push_str(&format!("\n  - {author}"));
            }
            push_section(&mut out, "Favorite Quote", &body, options);
        }
    }

    if toggles.get(ToggleName::Classes) && !record.courses.is_empty() {
        out.push('\n');
        out.push_str(&heading("Current Courses", options));
        out.push('\n');
        for course in &record.courses {
            out.push_str(&format!("  {} {}: {}", course.dept, course.num, course.name));
            if !course.reason.is_empty() {
                out.push_str(&format!(" - {}", dim(&course.reason, options)));
            }
            out.push('\n');
        }
    }

    if toggles.get(ToggleName::Links) {
        let skip = if options.dedupe_home_link {
            home_link.map(|(label, _)| label)
        } else {
            None
        };
        let links = record
            .links
            .iter()
            .filter(|(label, _)| Some(label.as_str()) != skip)
            .map(|(label, url)| format!("  {}: {url}", capitalize(label)))
            .join("\n");
        if !links.is_empty() {
            out.push('\n');
            out.push_str(&heading("Links", options));
            out.push('\n');
            out.push_str(&links);
            out.push('\n');
        }
    }

    out
}

pub fn render_position(cursor: Option<usize>, len: usize) -> String {
    match cursor {
        Some(i) => format!("Student {} of {}", i + 1, len),
        None => format!("Student 0 of {len}"),
    }
}

pub fn render_counter(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} students")
}

pub fn render_quick_nav(entries: &[NavEntry], options: &RenderOptions) -> String {
    let mut out = heading(
        &format!("Quick Navigation ({} students)", entries.len()),
        options,
    );
    out.push('\n');
    for entry in entries {
        let marker = if entry.active { '>' } else { ' ' };
        out.push_str(&format!("{marker} {:>3}. {}\n", entry.position, entry.label));
    }
    out
}

/// Display toggles as `name:on mascot:on image:off ...`.
pub fn render_toggles(toggles: &DisplayToggleSet) -> String {
    toggles
        .iter()
        .map(|(name, on)| format!("{name}:{}", if on { "on" } else { "off" }))
        .join(" ")
}

/// The whole page for one snapshot.
pub fn render_page(snapshot: &RosterSnapshot<'_>, options: &RenderOptions) -> String {
    match snapshot.load_status {
        LoadStatus::Idle | LoadStatus::Loading => {
            return "Loading student introductions...\n".to_string();
        }
        LoadStatus::Failed(reason) => {
            return format!(
                "{}\n{reason}\nPlease try refreshing the page.\n",
                heading("Error Loading Data", options)
            );
        }
        LoadStatus::Ready => {}
    }

    if snapshot.total_records == 0 {
        return format!(
            "{}\nThe API returned an empty response.\n",
            heading("No student data available", options)
        );
    }

    let mut out = String::new();
    out.push_str(&render_counter(
        snapshot.visible_records.len(),
        snapshot.total_records,
    ));
    if !snapshot.query.trim().is_empty() {
        out.push_str(&format!(" matching \"{}\"", snapshot.query.trim()));
    }
    out.push('\n');
    out.push_str(&dim(&render_toggles(snapshot.toggles), options));
    out.push_str("\n\n");

    match snapshot.current() {
        Some(record) => {
            out.push_str(&render_card(record, snapshot.toggles, options));
            out.push('\n');
            out.push_str(&render_position(
                snapshot.cursor,
                snapshot.visible_records.len(),
            ));
            out.push('\n');
        }
        None => {
            out.push_str(&heading("No students found", options));
            out.push_str("\nTry adjusting your search or filters\n");
        }
    }

    if options.show_quick_nav {
        out.push('\n');
        out.push_str(&render_quick_nav(&snapshot.quick_nav(), options));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Course, Platform, Quote};

    fn sample() -> ProfileRecord {
        let mut record = ProfileRecord::named("Ann", "Lee");
        record.identity.preferred = Some("Annie".to_string());
        record.contact_key = Some("alee12".to_string());
        record.mascot = Some("Curious Koala".to_string());
        record.image_ref = Some("/images/alee.jpg".to_string());
        record.narrative.background_academic = Some("CS major".to_string());
        record.narrative.fun_fact = Some("Has two cats".to_string());
        record.quote = Some(Quote {
            text: "Stay hungry.".to_string(),
            author: Some("Steve Jobs".to_string()),
        });
        record.courses.push(Course {
            dept: "ITIS".to_string(),
            num: "3135".to_string(),
            name: "Web Apps".to_string(),
            reason: "Required".to_string(),
        });
        record.platform = Some(Platform {
            device: Some("Laptop".to_string()),
            os: Some("Linux".to_string()),
        });
        record.links.insert(
            "charlotte".to_string(),
            "https://webpages.charlotte.edu/alee12".to_string(),
        );
        record
            .links
            .insert("github".to_string(), "https://github.com/alee".to_string());
        record
    }

    #[test]
    fn card_follows_curated_toggles() {
        let card = render_card(&sample(), &DisplayToggleSet::CURATED, &RenderOptions::plain());
        assert!(card.starts_with("Ann Lee \"Annie\"\n"));
        assert!(card.contains("Mascot: Curious Koala"));
        assert!(!card.contains("Image:"));
        assert!(card.contains("Email: alee12@charlotte.edu"));
        assert!(card.contains("Website: https://webpages.charlotte.edu/alee12"));
        assert!(card.contains("Professional Background\n  Not specified"));
        assert!(card.contains("Laptop (Linux)"));
        assert!(card.contains("\"Stay hungry.\"\n  - Steve Jobs"));
        assert!(card.contains("ITIS 3135: Web Apps - Required"));
        assert!(card.contains("  Charlotte: https://webpages.charlotte.edu/alee12"));
        assert!(card.contains("  Github: https://github.com/alee"));
    }

    #[test]
    fn hidden_sections_are_omitted() {
        let mut toggles = DisplayToggleSet::ALL_VISIBLE;
        toggles.set(ToggleName::Name, false);
        toggles.set(ToggleName::Backgrounds, false);
        toggles.set(ToggleName::Links, false);
        let card = render_card(&sample(), &toggles, &RenderOptions::plain());
        assert!(!card.contains("Ann Lee"));
        assert!(card.contains("Image: /images/alee.jpg"));
        assert!(!card.contains("Academic Background"));
        assert!(!card.contains("Github"));
        assert!(card.contains("Contact Information"));
    }

    #[test]
    fn home_link_can_be_deduplicated() {
        let options = RenderOptions {
            dedupe_home_link: true,
            ..RenderOptions::plain()
        };
        let card = render_card(&sample(), &DisplayToggleSet::CURATED, &options);
        assert!(card.contains("Website: https://webpages.charlotte.edu/alee12"));
        assert!(!card.contains("  Charlotte:"));
        assert!(card.contains("  Github:"));
    }

    #[test]
    fn position_and_counter() {
        assert_eq!(render_position(Some(0), 3), "Student 1 of 3");
        assert_eq!(render_counter(2, 5), "Showing 2 of 5 students");
        assert!(render_toggles(&DisplayToggleSet::CURATED).contains("image:off"));
    }
}
