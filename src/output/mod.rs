pub mod text;

use std::io::Write;

use crate::controller::{NavEntry, RosterObserver, RosterSnapshot};

pub use text::RenderOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn render_json(snapshot: &RosterSnapshot<'_>) -> Vec<u8> {
    serde_json::to_vec_pretty(snapshot).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_nav_json(entries: &[NavEntry]) -> Vec<u8> {
    serde_json::to_vec_pretty(entries).unwrap_or_else(|_| b"[]\n".to_vec())
}

/// Renders the page to a writer on every controller change.
pub struct PageRenderer<W> {
    out: W,
    format: OutputFormat,
    options: RenderOptions,
}

impl<W: Write + Send> PageRenderer<W> {
    pub fn new(out: W, format: OutputFormat, options: RenderOptions) -> Self {
        Self {
            out,
            format,
            options,
        }
    }

    pub fn render(&mut self, snapshot: &RosterSnapshot<'_>) -> std::io::Result<()> {
        let bytes = match self.format {
            OutputFormat::Text => text::render_page(snapshot, &self.options).into_bytes(),
            OutputFormat::Json => render_json(snapshot),
        };
        self.out.write_all(&bytes)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> RosterObserver for PageRenderer<W> {
    fn on_change(&mut self, snapshot: &RosterSnapshot<'_>) {
        if let Err(e) = self.render(snapshot) {
            log::warn!("failed to render roster page: {e}");
        }
    }
}
