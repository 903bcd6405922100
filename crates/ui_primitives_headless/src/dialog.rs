//! Modal dialog state machine.

use crate::attrs::{bool_token, AttrMap};
use crate::config::PrimitiveDefaults;
use crate::controllable::ControlProps;
use crate::disclosure::{Disclosure, DisclosureState, Transition, TransitionSource};
use crate::error::PrimitiveError;
use crate::ids::{generate_id, IdPair};

/// Root name used in wiring errors.
pub const DIALOG_ROOT: &str = "Dialog";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why an open dialog is closing.
pub enum DialogCloseReason {
    /// Escape pressed inside the content subtree.
    EscapeKey,
    /// Click on the overlay behind the content.
    OverlayClick,
    /// Explicit close control inside the content.
    CloseControl,
    /// Application code closed it.
    Programmatic,
}

impl DialogCloseReason {
    fn source(self) -> TransitionSource {
        match self {
            Self::EscapeKey => TransitionSource::Keyboard,
            Self::OverlayClick | Self::CloseControl => TransitionSource::Pointer,
            Self::Programmatic => TransitionSource::Programmatic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LabelSlot {
    fallback_id: String,
    announced: Option<String>,
}

impl LabelSlot {
    fn new(fallback_id: String) -> Self {
        Self {
            fallback_id,
            announced: None,
        }
    }

    fn id(&self) -> &str {
        self.announced.as_deref().unwrap_or(&self.fallback_id)
    }
}

/// One mounted dialog instance.
///
/// Content exists only while open. Every close path goes through [`DialogMachine::close`]. The
/// content is always labelled and described: when no caller title/description registers, the
/// host renders visually hidden fallbacks under [`DialogMachine::fallback_title_id`] and
/// [`DialogMachine::fallback_description_id`].
#[derive(Debug)]
pub struct DialogMachine {
    disclosure: Disclosure,
    ids: IdPair,
    title: LabelSlot,
    description: LabelSlot,
}

impl DialogMachine {
    /// Creates a dialog with generated ids.
    pub fn new(props: ControlProps<bool>, defaults: &PrimitiveDefaults) -> Self {
        let prefix = defaults.id_prefix.as_str();
        Self {
            disclosure: Disclosure::new(DIALOG_ROOT, props),
            ids: IdPair::generate(prefix, "dialog"),
            title: LabelSlot::new(generate_id(prefix, "dialog-title")),
            description: LabelSlot::new(generate_id(prefix, "dialog-description")),
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

    /// Trigger activation opens the dialog.
    pub fn activate_trigger(&mut self) -> Option<Transition> {
        self.disclosure.request(true, TransitionSource::Pointer)
    }

    /// Opens or closes from application code.
    pub fn set_open(&mut self, open: bool) -> Option<Transition> {
        if open {
            self.disclosure.request(true, TransitionSource::Programmatic)
        } else {
            self.close(DialogCloseReason::Programmatic)
        }
    }

    /// Single close path shared by Escape, overlay click, and close controls.
    pub fn close(&mut self, reason: DialogCloseReason) -> Option<Transition> {
        self.disclosure.request(false, reason.source())
    }

    /// Overlay click handler.
    pub fn overlay_click(&mut self) -> Option<Transition> {
        self.close(DialogCloseReason::OverlayClick)
    }

    /// Key handler attached to the content subtree only.
    ///
    /// Returns the transition when the key was consumed, so the host can stop propagation to
    /// outer dialogs.
    pub fn content_key_down(&mut self, key: &str) -> Option<Transition> {
        if key != "Escape" || !self.is_open() {
            return None;
        }
        self.close(DialogCloseReason::EscapeKey)
    }

    /// Follows a new external open value.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] when the dialog was created uncontrolled.
    pub fn sync(&mut self, open: bool) -> Result<bool, PrimitiveError> {
        self.disclosure.sync(open)
    }

    /// Lets a caller title announce its id; returns the id it must render.
    pub fn register_title(&mut self, id: Option<String>) -> String {
        let id = id.unwrap_or_else(|| format!("{}-caller", self.title.fallback_id));
        self.title.announced = Some(id.clone());
        id
    }

    /// Called when the caller title unmounts.
    pub fn unregister_title(&mut self) {
        self.title.announced = None;
    }

    /// Lets a caller description announce its id; returns the id it must render.
    pub fn register_description(&mut self, id: Option<String>) -> String {
        let id = id.unwrap_or_else(|| format!("{}-caller", self.description.fallback_id));
        self.description.announced = Some(id.clone());
        id
    }

    /// Called when the caller description unmounts.
    pub fn unregister_description(&mut self) {
        self.description.announced = None;
    }

    /// Id for the synthesized title, or `None` when the caller supplied one.
    pub fn fallback_title_id(&self) -> Option<&str> {
        match self.title.announced {
            Some(_) => None,
            None => Some(self.title.fallback_id.as_str()),
        }
    }

    /// Id for the synthesized description, or `None` when the caller supplied one.
    pub fn fallback_description_id(&self) -> Option<&str> {
        match self.description.announced {
            Some(_) => None,
            None => Some(self.description.fallback_id.as_str()),
        }
    }

    /// Attributes for the trigger element.
    pub fn trigger_attrs(&self) -> AttrMap {
        let open = self.is_open();
        AttrMap::new()
            .with("id", self.ids.trigger.as_str())
            .with("aria-haspopup", "dialog")
            .with("aria-expanded", bool_token(open))
            .with_opt("aria-controls", open.then_some(self.ids.content.as_str()))
            .with_state(self.state().data_state())
    }

    /// Attributes for the overlay, or `None` while closed.
    pub fn overlay_attrs(&self) -> Option<AttrMap> {
        self.is_open()
            .then(|| AttrMap::new().with_state(self.state().data_state()))
    }

    /// Attributes for the content element, or `None` while closed.
    pub fn content_attrs(&self) -> Option<AttrMap> {
        if !self.is_open() {
            return None;
        }
        Some(
            AttrMap::new()
                .with("id", self.ids.content.as_str())
                .with("role", "dialog")
                .with("aria-modal", "true")
                .with("aria-labelledby", self.title.id())
                .with("aria-describedby", self.description.id())
                .with("tabindex", "-1")
                .with_state(self.state().data_state()),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn open_dialog() -> DialogMachine {
        DialogMachine::new(ControlProps::uncontrolled(true), &PrimitiveDefaults::default())
    }

    #[test]
    fn content_is_absent_while_closed() {
        let dialog = DialogMachine::new(ControlProps::default(), &PrimitiveDefaults::default());
        assert!(dialog.content_attrs().is_none());
        assert!(dialog.overlay_attrs().is_none());
        assert_eq!(dialog.trigger_attrs().get("aria-expanded"), Some("false"));
    }

    #[test]
    fn escape_only_closes_an_open_dialog() {
        let mut dialog = open_dialog();

        assert!(dialog.content_key_down("Enter").is_none());
        let transition = dialog.content_key_down("Escape").expect("close");
        assert_eq!(transition.source, TransitionSource::Keyboard);
        assert!(!dialog.is_open());
        assert!(dialog.content_key_down("Escape").is_none());
    }

    #[test]
    fn content_is_labelled_by_fallbacks_until_caller_registers() {
        let mut dialog = open_dialog();
        let fallback_title = dialog.fallback_title_id().expect("fallback").to_string();
        let attrs = dialog.content_attrs().expect("open");
        assert_eq!(attrs.get("aria-labelledby"), Some(fallback_title.as_str()));
        assert_eq!(attrs.get("role"), Some("dialog"));
        assert_eq!(attrs.get("aria-modal"), Some("true"));

        let title_id = dialog.register_title(Some("settings-title".into()));
        assert_eq!(title_id, "settings-title");
        assert!(dialog.fallback_title_id().is_none());
        assert_eq!(
            dialog.content_attrs().expect("open").get("aria-labelledby"),
            Some("settings-title")
        );

        dialog.unregister_title();
        assert_eq!(dialog.fallback_title_id(), Some(fallback_title.as_str()));
    }

    #[test]
    fn caller_description_without_id_gets_generated_one() {
        let mut dialog = open_dialog();
        let id = dialog.register_description(None);
        assert!(id.ends_with("-caller"));
        assert_eq!(
            dialog.content_attrs().expect("open").get("aria-describedby"),
            Some(id.as_str())
        );
    }

    #[test]
    fn trigger_references_content_only_while_open() {
        let mut dialog = DialogMachine::new(ControlProps::default(), &PrimitiveDefaults::default());
        assert!(!dialog.trigger_attrs().contains("aria-controls"));

        dialog.activate_trigger();
        let content_id = dialog.ids().content.clone();
        assert_eq!(
            dialog.trigger_attrs().get("aria-controls"),
            Some(content_id.as_str())
        );
    }
}
