//! Scoped coordination cells shared between a primitive root and its role elements.
//!
//! A cell is created by exactly one root and handed down explicitly (or through a framework
//! context), never stored globally, so sibling instances of the same primitive cannot observe
//! each other.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::PrimitiveError;

/// Per-instance shared state handle.
pub struct CoordinationCell<S> {
    root: &'static str,
    state: Rc<RefCell<S>>,
}

impl<S> Clone for CoordinationCell<S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            state: Rc::clone(&self.state),
        }
    }
}

impl<S> fmt::Debug for CoordinationCell<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinationCell")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<S> CoordinationCell<S> {
    /// Creates the cell owned by `root`.
    pub fn new(root: &'static str, state: S) -> Self {
        Self {
            root,
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Name of the owning root primitive.
    pub fn root(&self) -> &'static str {
        self.root
    }

    /// Reads the shared state.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside [`CoordinationCell::update`].
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutates the shared state.
    ///
    /// Change callbacks invoked by the state machine run while the cell is borrowed and must not
    /// re-enter the same cell.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    /// Returns `true` when both handles point at the same instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// Resolves the coordination cell visible to `role`.
///
/// # Errors
///
/// Returns [`PrimitiveError::OutsideRoot`] when no owning `root` is in scope.
pub fn require_scope<T>(
    scope: Option<T>,
    role: &'static str,
    root: &'static str,
) -> Result<T, PrimitiveError> {
    scope.ok_or(PrimitiveError::OutsideRoot { role, root })
}

/// Resolves the coordination cell visible to `role`, failing fast on wiring mistakes.
///
/// # Panics
///
/// Panics with a message naming the expected ancestor when `role` is used outside `root`.
pub fn expect_scope<T>(scope: Option<T>, role: &'static str, root: &'static str) -> T {
    match require_scope(scope, role, root) {
        Ok(scope) => scope,
        Err(err) => panic!("{err}"),
    }
}
