//! Selection container - owns the active choice for the items beneath it
//!
//! The container is the single writer of its selection. It publishes a
//! fresh `SelectionContext` into the scope of its children on every render
//! and every pointer dispatch, and forwards each update request to the
//! owner's `on_choice_change` callback.

use super::component::{Component, Handled, RenderContext};
use super::error::SelectError;
use super::item::SelectableItem;
use super::node::{dispatch_click, render_nodes, stack_height, Node};
use super::scope::Scope;
use super::state::{ChoiceCallback, ChoiceId, SelectionContext, SelectionSnapshot, SelectionStore};
use crate::style::{ClassList, StyleSheet, SELECT_CLASS};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, BorderType, Widget},
};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Compound selection component
///
/// # Example
///
/// ```ignore
/// let select = SelectionContainer::builder()
///     .class("fg-blue")
///     .on_choice_change(|id| tracing::info!("picked {id}"))
///     .option("1", "Hello")
///     .option("2", "World")
///     .build()?;
///
/// select.draw(area, frame.buffer_mut(), &sheet)?;
/// select.handle_mouse(mouse_event)?;
/// ```
pub struct SelectionContainer {
    store: Rc<SelectionStore>,
    classes: ClassList,
    children: Vec<Node>,
}

impl SelectionContainer {
    pub fn builder() -> SelectionContainerBuilder {
        SelectionContainerBuilder::default()
    }

    /// Current active choice, `None` until the first update
    pub fn active_choice(&self) -> Option<ChoiceId> {
        self.store.snapshot().active().cloned()
    }

    pub fn snapshot(&self) -> Rc<SelectionSnapshot> {
        self.store.snapshot()
    }

    /// Shared state as descendants see it right now
    pub fn context(&self) -> SelectionContext {
        self.store.context()
    }

    /// Make `id` the active choice and notify the owner
    pub fn update_active_choice(&self, id: impl Into<ChoiceId>) {
        self.store.update(id.into());
    }

    /// Run `f` with the scope this container gives its children
    pub fn with_scope<R>(&self, f: impl FnOnce(&Scope<'_>) -> R) -> R {
        let selection = self.store.context();
        let scope = Scope::root().provide(&selection);
        f(&scope)
    }

    /// Items owned by this container, in tree order
    ///
    /// Items of nested containers are not included.
    pub fn items(&self) -> Vec<&SelectableItem> {
        let mut items = Vec::new();
        for node in &self.children {
            node.visit_items(&mut |item| items.push(item));
        }
        items
    }

    pub fn choice_ids(&self) -> Vec<ChoiceId> {
        self.items().into_iter().map(|item| item.id().clone()).collect()
    }

    /// Owned item with identifier `id`
    pub fn item(&self, id: &str) -> Option<&SelectableItem> {
        self.items().into_iter().find(|item| item.id() == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Whether an update happened since the last render
    pub fn needs_redraw(&self) -> bool {
        self.store.needs_redraw()
    }

    /// Read and clear the redraw flag, for owners that draw on demand
    pub fn take_redraw(&self) -> bool {
        self.store.take_redraw()
    }

    /// Render as the top of a tree
    pub fn draw(
        &self,
        area: Rect,
        buf: &mut Buffer,
        sheet: &StyleSheet,
    ) -> Result<(), SelectError> {
        self.render(area, buf, &RenderContext::new(sheet))
    }

    /// Route a terminal mouse event; a left press is the activation gesture
    pub fn handle_mouse(&self, event: MouseEvent) -> Result<Handled, SelectError> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(Position::new(event.column, event.row), &Scope::root())
            }
            _ => Ok(Handled::No),
        }
    }
}

impl Component for SelectionContainer {
    fn height(&self) -> u16 {
        stack_height(&self.children).saturating_add(2)
    }

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &RenderContext<'_>,
    ) -> Result<(), SelectError> {
        let selection = self.store.context();
        let style = ctx.sheet.compose(SELECT_CLASS, &self.classes, None);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        render_nodes(&self.children, inner, buf, &ctx.provide(&selection))?;
        self.store.take_redraw();
        Ok(())
    }

    fn handle_click(&self, position: Position, scope: &Scope<'_>) -> Result<Handled, SelectError> {
        let selection = self.store.context();
        dispatch_click(&self.children, position, &scope.provide(&selection))
    }

    fn clear_layout(&self) {
        for child in &self.children {
            child.clear_layout();
        }
    }
}

impl Drop for SelectionContainer {
    fn drop(&mut self) {
        tracing::trace!(
            revision = self.store.snapshot().revision(),
            "Selection container dropped"
        );
    }
}

impl fmt::Debug for SelectionContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionContainer")
            .field("snapshot", &self.store.snapshot())
            .field("classes", &self.classes)
            .field("children", &self.children)
            .finish()
    }
}

/// Configuration for a `SelectionContainer`
#[derive(Default)]
pub struct SelectionContainerBuilder {
    classes: ClassList,
    on_change: Option<ChoiceCallback>,
    children: Vec<Node>,
}

impl SelectionContainerBuilder {
    /// Caller styling, resolved after the `select` base class
    pub fn class(mut self, classes: impl Into<ClassList>) -> Self {
        self.classes = classes.into();
        self
    }

    /// Called with the requested identifier after every update
    ///
    /// Not called when the container is built or rendered.
    pub fn on_choice_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ChoiceId) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Shorthand for a direct `SelectableItem` child
    pub fn option(self, id: impl Into<ChoiceId>, content: impl Into<Line<'static>>) -> Self {
        self.child(SelectableItem::new(id, content))
    }

    /// Mount the container with its selection unset
    ///
    /// Fails with `DuplicateChoice` if two owned items share an identifier.
    /// An empty container is allowed.
    pub fn build(self) -> Result<SelectionContainer, SelectError> {
        let mut seen = HashSet::new();
        let mut duplicate = None;
        for node in &self.children {
            node.visit_items(&mut |item| {
                if duplicate.is_none() && !seen.insert(item.id().clone()) {
                    duplicate = Some(item.id().clone());
                }
            });
        }
        if let Some(id) = duplicate {
            return Err(SelectError::DuplicateChoice(id));
        }

        tracing::debug!(choices = seen.len(), "Selection container mounted");

        Ok(SelectionContainer {
            store: SelectionStore::new(self.on_change),
            classes: self.classes,
            children: self.children,
        })
    }
}
