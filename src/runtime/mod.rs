//! Runtime module - event dispatch and command execution
//!
//! - `composer` - the [`Composer`] runtime owning the model and notification bus
//! - `dispatch` - click event to message mapping (capture, then bubbling)

pub mod composer;
pub mod dispatch;

pub use composer::Composer;
