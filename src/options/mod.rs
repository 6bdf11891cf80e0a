//! Toolbelt options: catalog, resolution, handlers and rich controls

pub mod catalog;
pub mod controls;
pub mod handlers;
pub mod resolver;

pub use catalog::{describe, describe_str, OptionDescriptor, OptionKey, OptionKind, OptionRef};
pub use handlers::{HandlerContext, HandlerOutcome, Property};
pub use resolver::{resolve_options, OptionView};
