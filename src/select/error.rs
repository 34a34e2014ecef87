//! Errors raised by the selection component

use super::state::ChoiceId;
use thiserror::Error;

/// Errors from building or rendering a selection tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// A `SelectableItem` was rendered or activated with no enclosing
    /// `SelectionContainer` in its scope chain.
    #[error("selectable item used outside the scope of a selection container")]
    MissingContainerScope,

    /// Two items owned by the same container share an identifier.
    #[error("duplicate choice identifier '{0}' in one selection container")]
    DuplicateChoice(ChoiceId),
}
