//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! toolbelt activation and option handling.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=toolbelt=debug,message=debug` - scoped filtering
//! - `RUST_LOG=doge_composer::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/doge-composer/logs/composer.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{InstanceId, ToolbeltRegistry};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/doge-composer/logs/composer.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of registry state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub cached: usize,
    /// `(toolbelt id, instance)` of the active toolbelts
    pub active: Vec<(String, InstanceId)>,
}

impl RegistrySnapshot {
    pub fn from_registry(registry: &ToolbeltRegistry) -> Self {
        let mut active: Vec<(String, InstanceId)> = registry
            .iter()
            .filter(|t| t.is_active())
            .map(|t| (t.id(), t.instance))
            .collect();
        active.sort();
        Self {
            cached: registry.len(),
            active,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &RegistrySnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.cached != other.cached {
            changes.push(format!("cached: {} → {}", self.cached, other.cached));
        }
        if self.active != other.active {
            changes.push(format!(
                "active: [{}] → [{}]",
                describe(&self.active),
                describe(&other.active)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe(active: &[(String, InstanceId)]) -> String {
    active
        .iter()
        .map(|(id, instance)| format!("{}@{}", id, instance.0))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_activation() {
        let before = RegistrySnapshot {
            cached: 0,
            active: Vec::new(),
        };
        let after = RegistrySnapshot {
            cached: 1,
            active: vec![("1_DIV".to_string(), InstanceId(1))],
        };
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("cached: 0 → 1; active: [] → [1_DIV@1]")
        );
        assert_eq!(after.diff(&after), None);
    }
}
