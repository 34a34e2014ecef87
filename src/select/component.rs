//! Component trait shared by every node of a selection tree
//!
//! Rendering and pointer dispatch walk the tree the same way: each node gets
//! the `Scope` of its nearest container, so an item resolves the same
//! selection whether it is being drawn or clicked.

use super::error::SelectError;
use super::scope::Scope;
use super::state::SelectionContext;
use crate::style::StyleSheet;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

/// Result of dispatching a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by a component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Immutable context passed to components during rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Selection scope at this point of the tree
    pub scope: Scope<'a>,
    /// Resolves class lists to styles
    pub sheet: &'a StyleSheet,
}

impl<'a> RenderContext<'a> {
    /// Context for the top of a tree (no enclosing container)
    pub fn new(sheet: &'a StyleSheet) -> Self {
        Self {
            scope: Scope::root(),
            sheet,
        }
    }

    /// Context for the descendants of a container
    pub fn provide<'b>(&self, selection: &'b SelectionContext) -> RenderContext<'b>
    where
        'a: 'b,
    {
        RenderContext {
            scope: self.scope.provide(selection),
            sheet: self.sheet,
        }
    }
}

/// A node that can be laid out, drawn and clicked
pub trait Component {
    /// Rows this component needs
    fn height(&self) -> u16;

    /// Draw into `area`
    ///
    /// Fails with `MissingContainerScope` when a selectable item is reached
    /// without an enclosing container.
    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>)
        -> Result<(), SelectError>;

    /// Route a pointer activation at `position`
    fn handle_click(&self, position: Position, scope: &Scope<'_>) -> Result<Handled, SelectError>;

    /// Forget the areas recorded by the last render (node was clipped)
    fn clear_layout(&self) {}
}

/// Whether `position` lies inside `area`
pub(crate) fn area_contains(area: Rect, position: Position) -> bool {
    position.x >= area.x
        && position.x < area.x.saturating_add(area.width)
        && position.y >= area.y
        && position.y < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_was_handled() {
        assert!(Handled::Yes.was_handled());
        assert!(!Handled::No.was_handled());
    }

    #[test]
    fn test_area_contains() {
        let area = Rect::new(2, 3, 4, 1);
        assert!(area_contains(area, Position::new(2, 3)));
        assert!(area_contains(area, Position::new(5, 3)));
        assert!(!area_contains(area, Position::new(6, 3)));
        assert!(!area_contains(area, Position::new(2, 4)));
        assert!(!area_contains(Rect::new(0, 0, 0, 0), Position::new(0, 0)));
    }
}
