//! Doge Composer - direct-manipulation content composer
//!
//! This crate provides the core types and logic for composing pages from
//! element blocks: editable regions are discovered in rendered content, each
//! gets a floating toolbelt of edit options, and option handlers write the
//! region's presentation and the composer's working data. The engine follows
//! the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dom;
pub mod messages;
pub mod model;
pub mod notifications;
pub mod options;
pub mod render;
pub mod runtime;
pub mod scanner;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ComposerConfig;
pub use messages::Msg;
pub use model::{ComposerModel, Composition, Element};
pub use runtime::Composer;
