//! Single-selection panel group with roving focus.
//!
//! Triggers and panels register independently under the caller-chosen `value`. Triggers carry a
//! host focus handle `H` (a DOM node ref in the browser) that arrow-key navigation hands back to
//! the host. Panels never unmount when inactive; they render `hidden`/`inert` instead.

use serde::{Deserialize, Serialize};

use crate::attrs::{bool_token, AttrMap, DataState};
use crate::config::PrimitiveDefaults;
use crate::controllable::{ControlProps, Controllable};
use crate::error::PrimitiveError;
use crate::ids::generate_id;
use crate::registry::Registry;

/// Root name used in wiring errors.
pub const TABS_ROOT: &str = "Tabs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Axis of the trigger list, which decides the arrow keys used for roving focus.
pub enum Orientation {
    /// ArrowLeft/ArrowRight.
    #[default]
    Horizontal,
    /// ArrowUp/ArrowDown.
    Vertical,
}

impl Orientation {
    /// `aria-orientation` value.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone)]
struct TabTrigger<H> {
    id: String,
    handle: H,
    disabled: bool,
}

/// One mounted tab group.
#[derive(Debug)]
pub struct TabsMachine<H> {
    active: Controllable<Option<String>>,
    auto_selected: bool,
    orientation: Orientation,
    id_prefix: String,
    triggers: Registry<TabTrigger<H>>,
    panels: Registry<String>,
}

impl<H: Clone> TabsMachine<H> {
    /// Creates an empty tab group.
    ///
    /// Without a value or default, the first enabled trigger to register becomes active once.
    pub fn new(
        props: ControlProps<String>,
        orientation: Orientation,
        defaults: &PrimitiveDefaults,
    ) -> Self {
        let props = props.map(Some, |value: &Option<String>| value.clone());
        let active = Controllable::new(TABS_ROOT, props, None);
        let auto_selected = active.get().is_some();
        Self {
            active,
            auto_selected,
            orientation,
            id_prefix: defaults.id_prefix.clone(),
            triggers: Registry::new(),
            panels: Registry::new(),
        }
    }

    /// Active value, if any trigger has been selected yet.
    pub fn active(&self) -> Option<&str> {
        self.active.get().as_deref()
    }

    /// Returns `true` when `value` is the active value.
    pub fn is_active(&self, value: &str) -> bool {
        self.active() == Some(value)
    }

    /// Roving-focus axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Registered trigger values in registration order.
    pub fn trigger_values(&self) -> Vec<&str> {
        self.triggers.iter().map(|(value, _)| value).collect()
    }

    /// Registers a trigger and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::DuplicateValue`] when another trigger already uses `value`.
    pub fn register_trigger(
        &mut self,
        value: &str,
        handle: H,
        disabled: bool,
    ) -> Result<String, PrimitiveError> {
        let id = generate_id(&self.id_prefix, "tabs-trigger");
        self.triggers.register(
            value,
            TabTrigger {
                id: id.clone(),
                handle,
                disabled,
            },
        )?;
        if !disabled && (!self.auto_selected || self.active().is_none()) {
            self.auto_selected = true;
            self.active.set(Some(value.to_string()));
        }
        Ok(id)
    }

    /// Removes a trigger. When the active trigger leaves an uncontrolled group, the first
    /// remaining enabled trigger becomes active, or nothing when every remaining trigger is
    /// disabled.
    pub fn deregister_trigger(&mut self, value: &str) {
        if self.triggers.deregister(value).is_none() {
            return;
        }
        if self.active.is_controlled() || !self.is_active(value) {
            return;
        }
        let fallback = self.first_enabled();
        self.active.set(fallback);
    }

    /// Settles an uncontrolled group once its triggers have mounted: an active value that no
    /// registered trigger uses falls back to the first enabled trigger.
    ///
    /// Returns `true` when the active value changed.
    pub fn settle_active(&mut self) -> bool {
        if self.active.is_controlled() {
            return false;
        }
        if self.active().is_some_and(|active| self.triggers.contains(active)) {
            return false;
        }
        let Some(fallback) = self.first_enabled() else {
            return false;
        };
        self.auto_selected = true;
        self.active.set(Some(fallback))
    }

    /// Updates the disabled flag of a registered trigger.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::UnknownValue`] when no trigger uses `value`.
    pub fn set_trigger_disabled(
        &mut self,
        value: &str,
        disabled: bool,
    ) -> Result<(), PrimitiveError> {
        let trigger = self
            .triggers
            .get_mut(value)
            .ok_or_else(|| PrimitiveError::UnknownValue {
                value: value.to_string(),
            })?;
        trigger.disabled = disabled;
        Ok(())
    }

    /// Registers a panel and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::DuplicateValue`] when another panel already uses `value`.
    pub fn register_panel(&mut self, value: &str) -> Result<String, PrimitiveError> {
        let id = generate_id(&self.id_prefix, "tabs-panel");
        self.panels.register(value, id.clone())?;
        Ok(id)
    }

    /// Removes a panel.
    pub fn deregister_panel(&mut self, value: &str) {
        self.panels.deregister(value);
    }

    /// Selects `value`. Selecting the active value is a no-op.
    ///
    /// Returns `true` when the caller was notified of a new candidate.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::UnknownValue`] for unregistered values and
    /// [`PrimitiveError::DisabledValue`] for disabled triggers.
    pub fn select(&mut self, value: &str) -> Result<bool, PrimitiveError> {
        let Some(trigger) = self.triggers.get(value) else {
            return Err(PrimitiveError::UnknownValue {
                value: value.to_string(),
            });
        };
        if trigger.disabled {
            return Err(PrimitiveError::DisabledValue {
                value: value.to_string(),
            });
        }
        if self.is_active(value) {
            return Ok(false);
        }
        self.auto_selected = true;
        self.active.set(Some(value.to_string()));
        Ok(true)
    }

    /// Follows a new external active value.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] when the group was created uncontrolled.
    pub fn sync(&mut self, value: String) -> Result<bool, PrimitiveError> {
        self.active.sync(Some(value))
    }

    /// Roving-focus key handler for the trigger registered under `from`.
    ///
    /// Moves focus only, never selection. Returns the handle to focus, or `None` when the key is
    /// not a navigation key for this orientation.
    pub fn trigger_key_down(&self, from: &str, key: &str) -> Option<H> {
        let (previous, next) = match self.orientation {
            Orientation::Horizontal => ("ArrowLeft", "ArrowRight"),
            Orientation::Vertical => ("ArrowUp", "ArrowDown"),
        };
        let enabled = |trigger: &TabTrigger<H>| !trigger.disabled;
        let target = match key {
            k if k == next => self.triggers.step_from(from, 1, enabled),
            k if k == previous => self.triggers.step_from(from, -1, enabled),
            "Home" => self.triggers.first_where(enabled),
            "End" => self
                .triggers
                .iter()
                .filter(|(_, trigger)| !trigger.disabled)
                .last(),
            _ => None,
        };
        target.map(|(_, trigger)| trigger.handle.clone())
    }

    /// Attributes for the trigger list.
    pub fn list_attrs(&self) -> AttrMap {
        AttrMap::new()
            .with("role", "tablist")
            .with("aria-orientation", self.orientation.token())
    }

    /// Attributes for the trigger registered under `value`.
    pub fn trigger_attrs(&self, value: &str) -> Option<AttrMap> {
        let trigger = self.triggers.get(value)?;
        let active = self.is_active(value);
        Some(
            AttrMap::new()
                .with("id", trigger.id.as_str())
                .with("role", "tab")
                .with("aria-selected", bool_token(active))
                .with_opt("aria-controls", self.panels.get(value).map(String::as_str))
                .with("tabindex", if self.is_tab_stop(value) { "0" } else { "-1" })
                .with_flag("disabled", trigger.disabled)
                .with_state(DataState::selection(active)),
        )
    }

    /// Attributes for the panel registered under `value`. Inactive panels stay mounted.
    pub fn panel_attrs(&self, value: &str) -> Option<AttrMap> {
        let id = self.panels.get(value)?;
        let active = self.is_active(value);
        Some(
            AttrMap::new()
                .with("id", id.as_str())
                .with("role", "tabpanel")
                .with_opt(
                    "aria-labelledby",
                    self.triggers.get(value).map(|trigger| trigger.id.as_str()),
                )
                .with("tabindex", "0")
                .with_flag("hidden", !active)
                .with_flag("inert", !active)
                .with_state(DataState::selection(active)),
        )
    }

    fn first_enabled(&self) -> Option<String> {
        self.triggers
            .first_where(|trigger| !trigger.disabled)
            .map(|(value, _)| value.to_string())
    }

    fn is_tab_stop(&self, value: &str) -> bool {
        match self.active() {
            Some(active) if self.triggers.contains(active) => active == value,
            _ => self
                .triggers
                .first_where(|trigger| !trigger.disabled)
                .map(|(first, _)| first == value)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    fn tabs(props: ControlProps<String>) -> TabsMachine<&'static str> {
        TabsMachine::new(props, Orientation::Horizontal, &PrimitiveDefaults::default())
    }

    fn mount(tabs: &mut TabsMachine<&'static str>, values: &[&'static str]) {
        for &value in values {
            tabs.register_trigger(value, value, false).expect("trigger");
            tabs.register_panel(value).expect("panel");
        }
    }

    #[test]
    fn first_trigger_becomes_active_exactly_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tabs = tabs(
            ControlProps::default().on_change(move |value: &String| sink.borrow_mut().push(value.clone())),
        );

        mount(&mut tabs, &["a", "b", "c"]);

        assert_eq!(tabs.active(), Some("a"));
        assert_eq!(*seen.borrow(), vec!["a".to_string()]);
    }

    #[test]
    fn default_value_suppresses_auto_selection() {
        let mut tabs = tabs(ControlProps::uncontrolled("b".to_string()));
        mount(&mut tabs, &["a", "b"]);
        assert_eq!(tabs.active(), Some("b"));
    }

    #[test]
    fn disabled_first_trigger_is_not_auto_selected() {
        let mut tabs = tabs(ControlProps::default());
        tabs.register_trigger("a", "a", true).expect("trigger");
        assert_eq!(tabs.active(), None);
        tabs.register_trigger("b", "b", false).expect("trigger");
        assert_eq!(tabs.active(), Some("b"));
        assert_eq!(
            tabs.select("a"),
            Err(PrimitiveError::DisabledValue { value: "a".into() })
        );
    }

    #[test]
    fn selecting_unknown_value_is_rejected() {
        let mut tabs = tabs(ControlProps::default());
        mount(&mut tabs, &["a"]);
        assert_eq!(
            tabs.select("z"),
            Err(PrimitiveError::UnknownValue { value: "z".into() })
        );
        assert_eq!(tabs.select("a"), Ok(false));
    }

    #[test]
    fn arrows_wrap_and_move_focus_not_selection() {
        let mut tabs = tabs(ControlProps::default());
        mount(&mut tabs, &["a", "b", "c"]);

        assert_eq!(tabs.trigger_key_down("a", "ArrowRight"), Some("b"));
        assert_eq!(tabs.trigger_key_down("c", "ArrowRight"), Some("a"));
        assert_eq!(tabs.trigger_key_down("a", "ArrowLeft"), Some("c"));
        assert_eq!(tabs.trigger_key_down("b", "End"), Some("c"));
        assert_eq!(tabs.trigger_key_down("c", "Home"), Some("a"));
        assert_eq!(tabs.trigger_key_down("a", "ArrowDown"), None);
        assert_eq!(tabs.active(), Some("a"));
    }

    #[test]
    fn vertical_orientation_uses_up_and_down() {
        let mut tabs = TabsMachine::new(
            ControlProps::default(),
            Orientation::Vertical,
            &PrimitiveDefaults::default(),
        );
        mount(&mut tabs, &["a", "b"]);
        assert_eq!(tabs.trigger_key_down("a", "ArrowDown"), Some("b"));
        assert_eq!(tabs.trigger_key_down("a", "ArrowRight"), None);
        assert_eq!(tabs.list_attrs().get("aria-orientation"), Some("vertical"));
    }

    #[test]
    fn roving_skips_disabled_triggers() {
        let mut tabs = tabs(ControlProps::default());
        mount(&mut tabs, &["a", "b", "c"]);
        tabs.set_trigger_disabled("b", true).expect("disable");

        assert_eq!(tabs.trigger_key_down("a", "ArrowRight"), Some("c"));
        assert_eq!(tabs.trigger_values(), vec!["a", "b", "c"]);
    }

    #[test]
    fn trigger_and_panel_reference_each_other() {
        let mut tabs = tabs(ControlProps::default());
        mount(&mut tabs, &["a", "b"]);

        let trigger = tabs.trigger_attrs("b").expect("trigger");
        let panel = tabs.panel_attrs("b").expect("panel");
        assert_eq!(trigger.get("aria-controls"), panel.get("id"));
        assert_eq!(panel.get("aria-labelledby"), trigger.get("id"));
        assert_eq!(trigger.get("aria-selected"), Some("false"));
        assert_eq!(trigger.get("tabindex"), Some("-1"));
        assert!(panel.contains("hidden"));
        assert!(panel.contains("inert"));
        assert_eq!(panel.get("data-state"), Some("inactive"));
    }

    #[test]
    fn removing_active_trigger_falls_back_to_first_remaining() {
        let mut tabs = tabs(ControlProps::default());
        mount(&mut tabs, &["a", "b", "c"]);
        tabs.select("b").expect("select");

        tabs.deregister_trigger("b");

        assert_eq!(tabs.active(), Some("a"));
    }

    #[test]
    fn removing_active_trigger_with_only_disabled_left_clears_selection() {
        let mut tabs = tabs(ControlProps::default());
        tabs.register_trigger("a", "a", false).expect("trigger");
        tabs.register_trigger("b", "b", true).expect("trigger");
        assert_eq!(tabs.active(), Some("a"));

        tabs.deregister_trigger("a");

        assert_eq!(tabs.active(), None);
        assert_eq!(tabs.trigger_values(), vec!["b"]);

        tabs.register_trigger("c", "c", false).expect("trigger");
        assert_eq!(tabs.active(), Some("c"));
    }

    #[test]
    fn unmatched_default_settles_on_first_enabled_trigger() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tabs = tabs(
            ControlProps::uncontrolled("z".to_string())
                .on_change(move |value: &String| sink.borrow_mut().push(value.clone())),
        );
        mount(&mut tabs, &["a", "b"]);
        assert_eq!(tabs.active(), Some("z"));

        assert!(tabs.settle_active());

        assert_eq!(tabs.active(), Some("a"));
        assert_eq!(*seen.borrow(), vec!["a".to_string()]);
        assert!(!tabs.panel_attrs("a").expect("panel").contains("hidden"));
        assert!(tabs.panel_attrs("b").expect("panel").contains("hidden"));
    }

    #[test]
    fn default_registered_after_other_triggers_survives_settling() {
        let mut tabs = tabs(ControlProps::uncontrolled("b".to_string()));
        mount(&mut tabs, &["a", "b"]);

        assert!(!tabs.settle_active());
        assert_eq!(tabs.active(), Some("b"));
    }

    #[test]
    fn settling_leaves_controlled_groups_alone() {
        let mut tabs = tabs(ControlProps::controlled("z".to_string()));
        mount(&mut tabs, &["a"]);

        assert!(!tabs.settle_active());
        assert_eq!(tabs.active(), Some("z"));
    }

    #[test]
    fn controlled_group_only_follows_sync() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tabs = tabs(
            ControlProps::controlled("a".to_string())
                .on_change(move |value: &String| sink.borrow_mut().push(value.clone())),
        );
        mount(&mut tabs, &["a", "b"]);

        assert_eq!(tabs.select("b"), Ok(true));
        assert_eq!(tabs.active(), Some("a"));
        assert_eq!(*seen.borrow(), vec!["b".to_string()]);

        assert_eq!(tabs.sync("b".to_string()), Ok(true));
        assert_eq!(tabs.active(), Some("b"));
    }
}
