//! Compound selection component
//!
//! A `SelectionContainer` owns one active choice. `SelectableItem`s placed
//! anywhere beneath it find that choice through the `Scope` handed down
//! while the tree is rendered or clicked:
//!
//! ```text
//! SelectionContainer ── provides ──► Scope ──► SelectionContext
//!    │                                          │ snapshot (Rc, immutable)
//!    ├─ SelectableItem  ── use_selection ───────┤ update(id) ─► store
//!    └─ Group                                   │
//!         └─ SelectableItem ── use_selection ───┘
//! ```
//!
//! Activity is derived on every render (`id == snapshot.active`), never
//! stored per item, so at most one item of a container is active.

mod component;
mod container;
mod error;
mod item;
mod node;
mod scope;
mod state;

pub use component::{Component, Handled, RenderContext};
pub use container::{SelectionContainer, SelectionContainerBuilder};
pub use error::SelectError;
pub use item::SelectableItem;
pub use node::{dispatch_click, render_nodes, Group, Node};
pub use scope::{use_selection, Scope};
pub use state::{ChoiceCallback, ChoiceId, SelectionContext, SelectionSnapshot};
