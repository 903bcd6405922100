//! Open/closed lifecycle shared by Dialog, HoverCard, and Tooltip.

use serde::{Deserialize, Serialize};

use crate::attrs::DataState;
use crate::controllable::{ControlProps, Controllable};
use crate::error::PrimitiveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Rendered disclosure state.
pub enum DisclosureState {
    /// Content is not mounted.
    Closed,
    /// Content is mounted.
    Open,
}

impl DisclosureState {
    /// Maps an open flag.
    pub const fn from_open(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }

    /// Returns `true` for [`DisclosureState::Open`].
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// `data-state` value for this state.
    pub const fn data_state(self) -> DataState {
        DataState::disclosure(self.is_open())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Interaction that requested a transition.
pub enum TransitionSource {
    /// Click, pointer-enter, or pointer-leave.
    Pointer,
    /// Focus or blur.
    Focus,
    /// Key press.
    Keyboard,
    /// Delay timer expiry.
    Timer,
    /// Direct call from application code.
    Programmatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of one requested transition.
pub struct Transition {
    /// Rendered state before the request.
    pub from: DisclosureState,
    /// Candidate state handed to the change callback.
    pub requested: DisclosureState,
    /// Rendered state after the request (unchanged when controlled).
    pub to: DisclosureState,
    /// Interaction that asked for it.
    pub source: TransitionSource,
}

impl Transition {
    /// Returns `true` when the rendered state changed.
    pub fn applied(&self) -> bool {
        self.from != self.to
    }
}

/// Open flag reconciled between caller and instance.
#[derive(Debug)]
pub struct Disclosure {
    open: Controllable<bool>,
}

impl Disclosure {
    /// Creates the lifecycle for `primitive`; closed unless a value or default says otherwise.
    pub fn new(primitive: &'static str, props: ControlProps<bool>) -> Self {
        Self {
            open: Controllable::new(primitive, props, false),
        }
    }

    /// Returns `true` while content should exist in the tree.
    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    /// Rendered state.
    pub fn state(&self) -> DisclosureState {
        DisclosureState::from_open(self.is_open())
    }

    /// Returns `true` when the caller owns the open flag.
    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    /// Requests `open` from `source`.
    ///
    /// Requests matching the rendered state are dropped without notifying the caller; every
    /// other request notifies first and applies only when uncontrolled.
    pub fn request(&mut self, open: bool, source: TransitionSource) -> Option<Transition> {
        let from = self.state();
        if from.is_open() == open {
            return None;
        }
        self.open.set(open);
        Some(Transition {
            from,
            requested: DisclosureState::from_open(open),
            to: self.state(),
            source,
        })
    }

    /// Follows a new external value.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] for uncontrolled instances.
    pub fn sync(&mut self, open: bool) -> Result<bool, PrimitiveError> {
        self.open.sync(open)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn redundant_requests_do_not_notify() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut disclosure = Disclosure::new(
            "HoverCard",
            ControlProps::default().on_change(move |_| counter.set(counter.get() + 1)),
        );

        assert!(disclosure.request(false, TransitionSource::Pointer).is_none());
        let transition = disclosure
            .request(true, TransitionSource::Focus)
            .expect("transition");

        assert_eq!(calls.get(), 1);
        assert_eq!(transition.to, DisclosureState::Open);
        assert!(transition.applied());
    }

    #[test]
    fn controlled_request_reports_unapplied_transition() {
        let mut disclosure = Disclosure::new("Dialog", ControlProps::controlled(false));
        let transition = disclosure
            .request(true, TransitionSource::Pointer)
            .expect("transition");

        assert_eq!(transition.requested, DisclosureState::Open);
        assert_eq!(transition.to, DisclosureState::Closed);
        assert!(!transition.applied());
    }
}
