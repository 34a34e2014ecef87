//! Selection state shared between a container and its items
//!
//! A container owns exactly one `SelectionStore`. Every transition replaces
//! the store's `SelectionSnapshot` with a new `Rc` instead of mutating it, so
//! anything holding an older snapshot can detect the change by revision.
//!
//! Items never touch the store directly. They receive a `SelectionContext`
//! (snapshot + weak updater) through their scope and request changes with
//! `SelectionContext::update`, which is the only write path.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Opaque identifier of one selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChoiceId(String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChoiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ChoiceId> for ChoiceId {
    fn from(id: &ChoiceId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for ChoiceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ChoiceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Owner callback fired after every update request
pub type ChoiceCallback = Box<dyn FnMut(&ChoiceId)>;

/// Immutable view of a container's selection at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// `None` until the first update (the Unset state)
    active: Option<ChoiceId>,
    /// Bumped on every transition, never on a no-op update
    revision: u64,
}

impl SelectionSnapshot {
    pub fn active(&self) -> Option<&ChoiceId> {
        self.active.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `id` is the active choice
    pub fn is_active(&self, id: &ChoiceId) -> bool {
        self.active.as_ref() == Some(id)
    }
}

/// Single-writer state cell owned by one `SelectionContainer`
pub(crate) struct SelectionStore {
    current: RefCell<Rc<SelectionSnapshot>>,
    on_change: RefCell<Option<ChoiceCallback>>,
    /// Ids waiting for the callback, in request order
    pending: RefCell<VecDeque<ChoiceId>>,
    has_callback: bool,
    redraw: Cell<bool>,
}

impl SelectionStore {
    pub(crate) fn new(on_change: Option<ChoiceCallback>) -> Rc<Self> {
        Rc::new(Self {
            current: RefCell::new(Rc::new(SelectionSnapshot::default())),
            has_callback: on_change.is_some(),
            on_change: RefCell::new(on_change),
            pending: RefCell::new(VecDeque::new()),
            // First frame always draws
            redraw: Cell::new(true),
        })
    }

    pub(crate) fn snapshot(&self) -> Rc<SelectionSnapshot> {
        Rc::clone(&self.current.borrow())
    }

    /// Build the context handed to descendants for this render pass
    pub(crate) fn context(self: &Rc<Self>) -> SelectionContext {
        SelectionContext {
            snapshot: self.snapshot(),
            store: Rc::downgrade(self),
        }
    }

    /// Apply an update request
    ///
    /// Publishes a new snapshot when the choice actually changes, then fires
    /// the owner callback. The callback runs once per call, even when the
    /// choice was already active.
    pub(crate) fn update(&self, id: ChoiceId) {
        let changed = {
            let mut current = self.current.borrow_mut();
            if current.is_active(&id) {
                false
            } else {
                let next = SelectionSnapshot {
                    active: Some(id.clone()),
                    revision: current.revision + 1,
                };
                tracing::debug!(
                    from = ?current.active.as_ref().map(ChoiceId::as_str),
                    to = id.as_str(),
                    revision = next.revision,
                    "Active choice changed"
                );
                *current = Rc::new(next);
                true
            }
        };

        if changed {
            self.redraw.set(true);
        } else {
            tracing::trace!(choice = id.as_str(), "Choice already active");
        }

        self.notify(id);
    }

    fn notify(&self, id: ChoiceId) {
        if !self.has_callback {
            return;
        }
        self.pending.borrow_mut().push_back(id);

        // The callback is moved out while it runs. An update issued from
        // inside it only queues its id; the outer call delivers it next.
        let Some(mut callback) = self.on_change.borrow_mut().take() else {
            tracing::trace!("Choice update queued behind running on_choice_change");
            return;
        };
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(id) = next else {
                break;
            };
            callback(&id);
        }
        *self.on_change.borrow_mut() = Some(callback);
    }

    pub(crate) fn needs_redraw(&self) -> bool {
        self.redraw.get()
    }

    pub(crate) fn take_redraw(&self) -> bool {
        self.redraw.replace(false)
    }
}

/// Shared selection state visible to every descendant of a container
///
/// Holds the snapshot current at the start of the render pass plus a weak
/// handle to the container's store. Cloning is cheap.
#[derive(Clone)]
pub struct SelectionContext {
    snapshot: Rc<SelectionSnapshot>,
    store: Weak<SelectionStore>,
}

impl SelectionContext {
    pub fn active(&self) -> Option<&ChoiceId> {
        self.snapshot.active()
    }

    pub fn is_active(&self, id: &ChoiceId) -> bool {
        self.snapshot.is_active(id)
    }

    pub fn revision(&self) -> u64 {
        self.snapshot.revision()
    }

    pub fn snapshot(&self) -> &SelectionSnapshot {
        &self.snapshot
    }

    /// Ask the owning container to make `id` the active choice
    ///
    /// This snapshot is not modified; the change becomes visible through the
    /// context built for the next render. If the container has been dropped
    /// the request is discarded.
    pub fn update(&self, id: impl Into<ChoiceId>) {
        let id = id.into();
        match self.store.upgrade() {
            Some(store) => store.update(id),
            None => tracing::warn!(
                choice = id.as_str(),
                "Choice update after the selection container was dropped"
            ),
        }
    }

    /// Whether the owning container is still alive
    pub fn is_attached(&self) -> bool {
        self.store.strong_count() > 0
    }
}

impl fmt::Debug for SelectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionContext")
            .field("snapshot", &self.snapshot)
            .field("attached", &self.is_attached())
            .finish()
    }
}
