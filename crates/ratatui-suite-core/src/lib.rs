//! `ratatui-suite-core` provides the framework-agnostic pieces behind `ratatui-suite` widgets.
//!
//! The centerpiece is [`tree`]: the check-state engine that turns hierarchical data plus a list
//! of checked values into per-node visibility and tri-state check status, with optional cascade
//! semantics. It has no rendering dependency beyond [`text::Label`].
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: everything runs synchronously on the caller's thread.
//! - Checked values are app-owned: the engine reads them and proposes new ones, it never keeps
//!   its own copy.
//!
//! Most users should depend on the facade crate `ratatui-suite`.
pub mod theme;

pub mod text;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod viewport;
pub mod wrapping;

pub mod input;
pub mod keymap;
pub mod tree;
