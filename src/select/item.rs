//! Selectable item - one choice inside a selection container

use super::component::{area_contains, Component, Handled, RenderContext};
use super::error::SelectError;
use super::scope::{use_selection, Scope};
use super::state::ChoiceId;
use crate::style::{ClassList, OPTION_ACTIVE_CLASS, OPTION_CLASS, OPTION_INACTIVE_CLASS};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
};
use std::cell::Cell;

const ACTIVE_MARKER: &str = "●";
const INACTIVE_MARKER: &str = "○";

/// A single choice
///
/// Activity is never stored here: every render and every query compares
/// `id` with the snapshot found through the scope.
#[derive(Debug, Clone)]
pub struct SelectableItem {
    id: ChoiceId,
    content: Line<'static>,
    classes: ClassList,
    /// Where the last render put this item, for hit testing
    area: Cell<Option<Rect>>,
}

impl SelectableItem {
    pub fn new(id: impl Into<ChoiceId>, content: impl Into<Line<'static>>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            classes: ClassList::default(),
            area: Cell::new(None),
        }
    }

    /// Caller styling, resolved after the `option` base class
    pub fn class(mut self, classes: impl Into<ClassList>) -> Self {
        self.classes = classes.into();
        self
    }

    pub fn id(&self) -> &ChoiceId {
        &self.id
    }

    pub fn content(&self) -> &Line<'static> {
        &self.content
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Area of the last successful render
    pub fn last_area(&self) -> Option<Rect> {
        self.area.get()
    }

    /// Whether this item is the active choice of its container
    pub fn is_active(&self, scope: &Scope<'_>) -> Result<bool, SelectError> {
        Ok(use_selection(scope)?.is_active(&self.id))
    }

    /// Activation gesture: ask the enclosing container to select this item
    pub fn activate(&self, scope: &Scope<'_>) -> Result<(), SelectError> {
        let selection = use_selection(scope)?;
        tracing::debug!(choice = self.id.as_str(), "Item activated");
        selection.update(&self.id);
        Ok(())
    }

    fn style(&self, ctx: &RenderContext<'_>, active: bool) -> Style {
        let modifier = if active {
            OPTION_ACTIVE_CLASS
        } else {
            OPTION_INACTIVE_CLASS
        };
        ctx.sheet.compose(OPTION_CLASS, &self.classes, Some(modifier))
    }
}

impl Component for SelectableItem {
    fn height(&self) -> u16 {
        1
    }

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &RenderContext<'_>,
    ) -> Result<(), SelectError> {
        self.area.set(None);
        let active = self.is_active(&ctx.scope)?;

        let row = Rect {
            height: area.height.min(1),
            ..area
        };
        if row.is_empty() {
            return Ok(());
        }

        let marker = if active { ACTIVE_MARKER } else { INACTIVE_MARKER };
        let mut spans = Vec::with_capacity(self.content.spans.len() + 1);
        spans.push(Span::raw(format!("{marker} ")));
        spans.extend(self.content.spans.iter().cloned());

        buf.set_style(row, self.style(ctx, active));
        buf.set_line(row.x, row.y, &Line::from(spans), row.width);
        self.area.set(Some(row));
        Ok(())
    }

    fn handle_click(&self, position: Position, scope: &Scope<'_>) -> Result<Handled, SelectError> {
        match self.area.get() {
            Some(area) if area_contains(area, position) => {
                self.activate(scope)?;
                Ok(Handled::Yes)
            }
            _ => Ok(Handled::No),
        }
    }

    fn clear_layout(&self) {
        self.area.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::state::SelectionStore;
    use crate::style::StyleSheet;
    use ratatui::style::{Color, Modifier};

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_render_inactive_then_active() {
        let sheet = StyleSheet::default();
        let store = SelectionStore::new(None);
        let item = SelectableItem::new("2", "World");
        let area = Rect::new(0, 0, 12, 1);

        let ctx = store.context();
        let render_ctx = RenderContext::new(&sheet).provide(&ctx);
        let mut buf = Buffer::empty(area);
        item.render(area, &mut buf, &render_ctx).unwrap();
        assert_eq!(row_text(&buf, 0), "○ World");
        assert_ne!(buf[(0, 0)].bg, Color::DarkGray);

        store.update("2".into());
        let ctx = store.context();
        let render_ctx = RenderContext::new(&sheet).provide(&ctx);
        let mut buf = Buffer::empty(area);
        item.render(area, &mut buf, &render_ctx).unwrap();
        assert_eq!(row_text(&buf, 0), "● World");
        assert_eq!(buf[(2, 0)].bg, Color::DarkGray);
        assert!(buf[(2, 0)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_caller_class_applies() {
        let sheet = StyleSheet::default();
        let store = SelectionStore::new(None);
        let item = SelectableItem::new("1", "Hello").class("underlined fg-yellow");
        let area = Rect::new(0, 0, 10, 1);

        let ctx = store.context();
        let render_ctx = RenderContext::new(&sheet).provide(&ctx);
        let mut buf = Buffer::empty(area);
        item.render(area, &mut buf, &render_ctx).unwrap();

        // Caller fg shows while inactive; the state class only dims
        assert_eq!(buf[(2, 0)].fg, Color::Yellow);
        assert!(buf[(2, 0)].modifier.contains(Modifier::UNDERLINED));
        assert!(buf[(2, 0)].modifier.contains(Modifier::DIM));

        store.update("1".into());
        let ctx = store.context();
        let render_ctx = RenderContext::new(&sheet).provide(&ctx);
        let mut buf = Buffer::empty(area);
        item.render(area, &mut buf, &render_ctx).unwrap();

        assert_eq!(buf[(2, 0)].fg, Color::Yellow);
        assert_eq!(buf[(2, 0)].bg, Color::DarkGray);
        assert!(!buf[(2, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_render_outside_container_fails() {
        let sheet = StyleSheet::default();
        let item = SelectableItem::new("1", "Hello");
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        let err = item
            .render(area, &mut buf, &RenderContext::new(&sheet))
            .unwrap_err();
        assert_eq!(err, SelectError::MissingContainerScope);
        assert_eq!(item.last_area(), None);
    }

    #[test]
    fn test_activate_outside_container_fails() {
        let item = SelectableItem::new("1", "Hello");
        assert_eq!(
            item.activate(&Scope::root()),
            Err(SelectError::MissingContainerScope)
        );
        assert_eq!(
            item.is_active(&Scope::root()),
            Err(SelectError::MissingContainerScope)
        );
    }

    #[test]
    fn test_click_hits_rendered_area_only() {
        let sheet = StyleSheet::default();
        let store = SelectionStore::new(None);
        let item = SelectableItem::new("3", "Blue");
        let area = Rect::new(1, 4, 8, 1);

        // Never rendered: nothing to hit
        let ctx = store.context();
        let scope = Scope::root().provide(&ctx);
        assert_eq!(item.handle_click(Position::new(2, 4), &scope), Ok(Handled::No));

        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 6));
        let render_ctx = RenderContext::new(&sheet).provide(&ctx);
        item.render(area, &mut buf, &render_ctx).unwrap();

        assert_eq!(item.handle_click(Position::new(0, 4), &scope), Ok(Handled::No));
        assert_eq!(item.handle_click(Position::new(2, 4), &scope), Ok(Handled::Yes));
        assert!(store.snapshot().is_active(&"3".into()));

        item.clear_layout();
        assert_eq!(item.handle_click(Position::new(2, 4), &scope), Ok(Handled::No));
    }
}
