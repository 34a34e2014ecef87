//! selectkit - compound selection components for ratatui
//!
//! A `SelectionContainer` owns the active choice; `SelectableItem`s rendered
//! anywhere beneath it read that choice through a scope, draw themselves
//! active or inactive, and ask the container to change it when clicked.
//!
//! ```ignore
//! use selectkit::{SelectionContainer, StyleSheet};
//!
//! let select = SelectionContainer::builder()
//!     .class("fg-blue")
//!     .on_choice_change(|id| tracing::info!(choice = %id, "picked"))
//!     .option("1", "Hello")
//!     .option("2", "World")
//!     .option("3", "Blue")
//!     .build()?;
//!
//! // render loop
//! select.draw(area, frame.buffer_mut(), &StyleSheet::default())?;
//! // input loop
//! select.handle_mouse(mouse_event)?;
//! ```
//!
//! Modules:
//! - `select`: container, items, scope and shared state
//! - `style`: class lists resolved against a style sheet
//! - `config`: config file + env loading
//! - `logging`: tracing layer that captures logs for display in a TUI

pub mod config;
pub mod logging;
pub mod select;
pub mod style;

pub use select::{
    dispatch_click, render_nodes, use_selection, ChoiceCallback, ChoiceId, Component, Group,
    Handled, Node, RenderContext, Scope, SelectError, SelectableItem, SelectionContainer,
    SelectionContainerBuilder, SelectionContext, SelectionSnapshot,
};
pub use style::{ClassList, StyleSheet};
