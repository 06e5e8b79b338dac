//! Tracing configuration for debugging code fixes.
//!
//! Output format is chosen with `TSZ_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! # Why did the fix not apply at this position?
//! TSZ_LOG=tsz_lsp=debug TSZ_LOG_FORMAT=tree cargo test convert_typedef
//!
//! # Everything, including parser and checker traces
//! TSZ_LOG=trace TSZ_LOG_FORMAT=json cargo test
//! ```
//!
//! Nothing is installed unless `TSZ_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `TSZ_LOG_FORMAT` value. Unknown values select `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var("TSZ_LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// `TSZ_LOG` wins over `RUST_LOG`; `None` when neither is set.
fn build_filter() -> Option<EnvFilter> {
    if let Ok(directives) = std::env::var("TSZ_LOG") {
        return Some(EnvFilter::builder().parse_lossy(directives));
    }
    std::env::var("RUST_LOG")
        .is_ok()
        .then(EnvFilter::from_default_env)
}

/// Install the global subscriber, writing to stderr.
///
/// Safe to call more than once: only the first call installs anything,
/// so every test can call it.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    if installed.is_ok() {
        tracing::debug!("tracing initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn test_init_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
