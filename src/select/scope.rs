//! Scope chain threaded through render and event dispatch
//!
//! A `SelectionContainer` provides its `SelectionContext` to everything it
//! renders by deriving a child `Scope`. Items read it back with
//! [`use_selection`], which is the only place a missing container is
//! detected.

use super::error::SelectError;
use super::state::SelectionContext;

/// The selection visible at one point of the tree
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'a> {
    selection: Option<&'a SelectionContext>,
}

impl<'a> Scope<'a> {
    /// Scope outside of any container
    pub fn root() -> Self {
        Self::default()
    }

    /// Derive the scope for a container's descendants
    ///
    /// The new selection shadows any outer one.
    pub fn provide<'b>(&self, selection: &'b SelectionContext) -> Scope<'b> {
        Scope {
            selection: Some(selection),
        }
    }

    /// Nearest enclosing selection, or `MissingContainerScope`
    pub fn selection(&self) -> Result<&'a SelectionContext, SelectError> {
        self.selection.ok_or(SelectError::MissingContainerScope)
    }
}

/// Read the shared selection state for the current point of the tree
pub fn use_selection<'a>(scope: &Scope<'a>) -> Result<&'a SelectionContext, SelectError> {
    scope.selection()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::state::SelectionStore;

    #[test]
    fn test_root_scope_has_no_selection() {
        let scope = Scope::root();
        assert_eq!(
            use_selection(&scope).unwrap_err(),
            SelectError::MissingContainerScope
        );
    }

    #[test]
    fn test_provided_scope_returns_selection() {
        let store = SelectionStore::new(None);
        store.update("7".into());
        let ctx = store.context();

        let scope = Scope::root().provide(&ctx);
        let found = use_selection(&scope).expect("selection in scope");
        assert!(found.is_active(&"7".into()));
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let outer = SelectionStore::new(None);
        let inner = SelectionStore::new(None);
        outer.update("outer".into());
        inner.update("inner".into());
        let outer_ctx = outer.context();
        let inner_ctx = inner.context();

        let outer_scope = Scope::root().provide(&outer_ctx);
        let inner_scope = outer_scope.provide(&inner_ctx);

        let found = inner_scope.selection().expect("selection in scope");
        assert_eq!(found.active().map(|id| id.as_str()), Some("inner"));
        // The outer scope is unchanged
        let found = outer_scope.selection().expect("selection in scope");
        assert_eq!(found.active().map(|id| id.as_str()), Some("outer"));
    }
}
