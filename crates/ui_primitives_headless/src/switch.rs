//! Boolean toggle built on the reconciler alone.

use crate::attrs::{bool_token, AttrMap, DataState};
use crate::controllable::{ControlProps, Controllable};
use crate::error::PrimitiveError;

/// Primitive name used in reconciler errors.
pub const SWITCH_ROOT: &str = "Switch";

/// One mounted switch.
#[derive(Debug)]
pub struct SwitchMachine {
    checked: Controllable<bool>,
    disabled: bool,
}

impl SwitchMachine {
    /// Creates a switch, off unless configured otherwise.
    pub fn new(props: ControlProps<bool>, disabled: bool) -> Self {
        Self {
            checked: Controllable::new(SWITCH_ROOT, props, false),
            disabled,
        }
    }

    /// Rendered on/off value.
    pub fn is_checked(&self) -> bool {
        *self.checked.get()
    }

    /// Returns `true` while toggling is blocked.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables the switch.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Requests the opposite value. Disabled switches short-circuit before the reconciler runs.
    ///
    /// Returns the candidate handed to the change callback.
    pub fn toggle(&mut self) -> Option<bool> {
        if self.disabled {
            return None;
        }
        let candidate = !self.is_checked();
        self.checked.set(candidate);
        Some(candidate)
    }

    /// Space and Enter toggle. Returns the candidate when the key was consumed.
    pub fn key_down(&mut self, key: &str) -> Option<bool> {
        match key {
            " " | "Enter" => self.toggle(),
            _ => None,
        }
    }

    /// Follows a new external value.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] when the switch was created uncontrolled.
    pub fn sync(&mut self, checked: bool) -> Result<bool, PrimitiveError> {
        self.checked.sync(checked)
    }

    /// Attributes for the switch element.
    pub fn attrs(&self) -> AttrMap {
        let checked = self.is_checked();
        AttrMap::new()
            .with("role", "switch")
            .with("aria-checked", bool_token(checked))
            .with_flag("data-disabled", self.disabled)
            .with_state(if checked {
                DataState::Checked
            } else {
                DataState::Unchecked
            })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggling_twice_restores_and_notifies_each_time() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut switch = SwitchMachine::new(
            ControlProps::uncontrolled(false).on_change(move |value: &bool| sink.borrow_mut().push(*value)),
            false,
        );

        assert_eq!(switch.toggle(), Some(true));
        assert_eq!(switch.toggle(), Some(false));
        assert!(!switch.is_checked());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn disabled_switch_never_reaches_the_reconciler() {
        let seen = Rc::new(RefCell::new(Vec::<bool>::new()));
        let sink = seen.clone();
        let mut switch = SwitchMachine::new(
            ControlProps::default().on_change(move |value: &bool| sink.borrow_mut().push(*value)),
            true,
        );

        assert_eq!(switch.toggle(), None);
        assert_eq!(switch.key_down(" "), None);
        assert!(seen.borrow().is_empty());
        assert_eq!(switch.attrs().get("data-disabled"), Some(""));
    }

    #[test]
    fn controlled_switch_renders_external_value() {
        let mut switch = SwitchMachine::new(ControlProps::controlled(true), false);
        assert_eq!(switch.key_down("Enter"), Some(false));
        assert!(switch.is_checked());
        assert_eq!(switch.attrs().get("data-state"), Some("checked"));

        switch.sync(false).expect("controlled");
        assert_eq!(switch.attrs().get("aria-checked"), Some("false"));
    }
}
