//! `ratatui-suite` offers two interactive pieces for ratatui apps:
//!
//! - [`check_tree::CheckTreePicker`]: a searchable, expandable tree of checkboxes with optional
//!   cascade between parents and their leaves.
//! - [`notification`]: toast notices stacked per screen corner, with timed expiry.
//!
//! The state engines live in `ratatui-suite-core` and are re-exported here.
pub use ratatui_suite_core::input;
pub use ratatui_suite_core::keymap;
pub use ratatui_suite_core::render;
pub use ratatui_suite_core::text;
pub use ratatui_suite_core::theme;
pub use ratatui_suite_core::tree;
pub use ratatui_suite_core::viewport;
pub use ratatui_suite_core::wrapping;

#[cfg(feature = "crossterm")]
pub use ratatui_suite_core::crossterm_input;

pub mod check_tree;
pub mod help;
pub mod notification;
