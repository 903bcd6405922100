//! Hover/focus preview state machine. Transitions are immediate; there are no timers.

use crate::attrs::{bool_token, AttrMap};
use crate::config::PrimitiveDefaults;
use crate::controllable::ControlProps;
use crate::disclosure::{Disclosure, DisclosureState, Transition, TransitionSource};
use crate::error::PrimitiveError;
use crate::ids::IdPair;

/// Root name used in wiring errors.
pub const HOVER_CARD_ROOT: &str = "HoverCard";

/// One mounted hover card.
#[derive(Debug)]
pub struct HoverCardMachine {
    disclosure: Disclosure,
    ids: IdPair,
}

impl HoverCardMachine {
    /// Creates a hidden (unless configured otherwise) hover card.
    pub fn new(props: ControlProps<bool>, defaults: &PrimitiveDefaults) -> Self {
        Self {
            disclosure: Disclosure::new(HOVER_CARD_ROOT, props),
            ids: IdPair::generate(&defaults.id_prefix, "hover-card"),
        }
    }

    /// Returns `true` while the content is mounted.
    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    /// Rendered state.
    pub fn state(&self) -> DisclosureState {
        self.disclosure.state()
    }

    /// Generated trigger/content ids.
    pub fn ids(&self) -> &IdPair {
        &self.ids
    }

    /// Pointer entered the trigger.
    pub fn pointer_enter_trigger(&mut self) -> Option<Transition> {
        self.disclosure.request(true, TransitionSource::Pointer)
    }

    /// Pointer left the trigger. Travelling into the content keeps the card open; leaving the
    /// content then closes it through [`HoverCardMachine::pointer_leave_content`].
    pub fn pointer_leave_trigger(&mut self, into_content: bool) -> Option<Transition> {
        if into_content && self.is_open() {
            return None;
        }
        self.disclosure.request(false, TransitionSource::Pointer)
    }

    /// Trigger received focus.
    pub fn focus_trigger(&mut self) -> Option<Transition> {
        self.disclosure.request(true, TransitionSource::Focus)
    }

    /// Trigger lost focus.
    pub fn blur_trigger(&mut self) -> Option<Transition> {
        self.disclosure.request(false, TransitionSource::Focus)
    }

    /// Pointer left the content area.
    pub fn pointer_leave_content(&mut self) -> Option<Transition> {
        self.disclosure.request(false, TransitionSource::Pointer)
    }

    /// Opens or closes from application code.
    pub fn set_open(&mut self, open: bool) -> Option<Transition> {
        self.disclosure.request(open, TransitionSource::Programmatic)
    }

    /// Follows a new external open value.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] when the hover card was created uncontrolled.
    pub fn sync(&mut self, open: bool) -> Result<bool, PrimitiveError> {
        self.disclosure.sync(open)
    }

    /// Attributes for the trigger element.
    pub fn trigger_attrs(&self) -> AttrMap {
        let open = self.is_open();
        AttrMap::new()
            .with("id", self.ids.trigger.as_str())
            .with("aria-expanded", bool_token(open))
            .with_opt("aria-controls", open.then_some(self.ids.content.as_str()))
            .with_state(self.state().data_state())
    }

    /// Attributes for the content element, or `None` while hidden.
    pub fn content_attrs(&self) -> Option<AttrMap> {
        self.is_open().then(|| {
            AttrMap::new()
                .with("id", self.ids.content.as_str())
                .with("aria-labelledby", self.ids.trigger.as_str())
                .with_state(self.state().data_state())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> HoverCardMachine {
        HoverCardMachine::new(ControlProps::default(), &PrimitiveDefaults::default())
    }

    #[test]
    fn pointer_enter_and_leave_toggle_immediately() {
        let mut card = card();
        assert!(card.content_attrs().is_none());

        card.pointer_enter_trigger();
        assert!(card.is_open());
        assert!(card.content_attrs().is_some());

        card.pointer_leave_trigger(false);
        assert!(!card.is_open());
        assert!(card.content_attrs().is_none());
    }

    #[test]
    fn pointer_can_travel_from_trigger_to_content() {
        let mut card = card();
        card.pointer_enter_trigger();

        assert!(card.pointer_leave_trigger(true).is_none());
        assert!(card.is_open());

        card.pointer_leave_content();
        assert!(!card.is_open());
    }

    #[test]
    fn leaving_content_closes() {
        let mut card = card();
        card.focus_trigger();
        let transition = card.pointer_leave_content().expect("close");
        assert_eq!(transition.source, TransitionSource::Pointer);
        assert!(!card.is_open());
    }

    #[test]
    fn blur_closes_focus_opened_card() {
        let mut card = card();
        card.focus_trigger();
        assert_eq!(card.trigger_attrs().get("data-state"), Some("open"));
        card.blur_trigger();
        assert_eq!(card.trigger_attrs().get("data-state"), Some("closed"));
    }
}
