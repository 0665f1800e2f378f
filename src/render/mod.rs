//! Page rendering.
//!
//! Command output is turned into markup once per cycle by [`markup`]. The
//! HTTP front end then renders either the full page or just the output
//! fragment with the embedded templates.

pub mod ansi;
pub mod markup;

use std::time::Duration;

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

use crate::config::WatchConfig;
use crate::core::result::ExecutionResult;

/// Name of the full page template.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Name of the output fragment template.
pub const CONTENT_TEMPLATE: &str = "content.html";

const INDEX_SOURCE: &str = include_str!("../../templates/index.html");
const CONTENT_SOURCE: &str = include_str!("../../templates/content.html");

const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Errors raised while loading or rendering templates.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to parse or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Data handed to the templates.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub cmd: String,
    pub interval: String,
    pub interval_ms: u64,
    pub output: &'a str,
    pub error: Option<&'a str>,
    pub updated_at: Option<String>,
    pub no_title: bool,
}

impl<'a> PageView<'a> {
    /// Build the view for a config and a result snapshot.
    pub fn new(config: &'a WatchConfig, result: &'a ExecutionResult) -> Self {
        Self {
            title: config.command().program(),
            cmd: config.command().to_string(),
            interval: format_interval(config.interval()),
            interval_ms: config.interval().as_millis() as u64,
            output: &result.output,
            error: result.failure.as_deref(),
            updated_at: result
                .completed_at
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            no_title: config.no_title(),
        }
    }
}

/// Renders the page and fragment templates.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Load the built-in templates.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_templates(INDEX_SOURCE, CONTENT_SOURCE)
    }

    /// Load custom template sources.
    pub fn with_templates(index: &'static str, content: &'static str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, index)?;
        env.add_template(CONTENT_TEMPLATE, content)?;
        Ok(Self { env })
    }

    /// Render the full page into `out`.
    ///
    /// On error `out` keeps whatever was written before the failure.
    pub fn render_page(&self, view: &PageView<'_>, out: &mut Vec<u8>) -> Result<(), RenderError> {
        self.render(INDEX_TEMPLATE, view, out)
    }

    /// Render the output fragment into `out`.
    pub fn render_content(
        &self,
        view: &PageView<'_>,
        out: &mut Vec<u8>,
    ) -> Result<(), RenderError> {
        self.render(CONTENT_TEMPLATE, view, out)
    }

    fn render(&self, name: &str, view: &PageView<'_>, out: &mut Vec<u8>) -> Result<(), RenderError> {
        let template = self.env.get_template(name)?;
        template.render_to_write(view, out)?;
        Ok(())
    }
}

/// Format an interval the way it is shown in the header: `100ms`, `2s`,
/// `1.5s`, `1m30s`, `1h0m0s`.
pub fn format_interval(interval: Duration) -> String {
    if interval < Duration::from_secs(1) {
        return format!("{}ms", interval.as_millis());
    }

    let total_secs = interval.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = interval.subsec_millis();

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    if millis == 0 {
        out.push_str(&format!("{}s", seconds));
    } else {
        let frac = format!("{:03}", millis);
        out.push_str(&format!("{}.{}s", seconds, frac.trim_end_matches('0')));
    }
    out
}
