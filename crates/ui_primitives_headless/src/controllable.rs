//! Controlled/uncontrolled value reconciliation.

use std::fmt;
use std::rc::Rc;

use crate::error::PrimitiveError;

/// External change notifier supplied by the caller.
pub type ChangeCallback<T> = Rc<dyn Fn(&T)>;

/// Root configuration surface shared by every stateful primitive.
pub struct ControlProps<T> {
    /// Externally owned value. Supplying it makes the instance controlled for its whole lifetime.
    pub value: Option<T>,
    /// Initial internal value for uncontrolled instances.
    pub default_value: Option<T>,
    /// Invoked with every candidate value before the instance applies it.
    ///
    /// Requests for the value already rendered are not transitions and never reach the
    /// callback: opening an open disclosure or selecting the active tab is silent.
    pub on_value_change: Option<ChangeCallback<T>>,
}

impl<T> Default for ControlProps<T> {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            on_value_change: None,
        }
    }
}

impl<T: Clone> Clone for ControlProps<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            default_value: self.default_value.clone(),
            on_value_change: self.on_value_change.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ControlProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("on_value_change", &self.on_value_change.is_some())
            .finish()
    }
}

impl<T> ControlProps<T> {
    /// Props for an instance whose value is owned by the caller.
    pub fn controlled(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Props for a self-contained instance starting at `default_value`.
    pub fn uncontrolled(default_value: T) -> Self {
        Self {
            default_value: Some(default_value),
            ..Self::default()
        }
    }

    /// Attaches the change notifier.
    pub fn on_change(mut self, callback: impl Fn(&T) + 'static) -> Self {
        self.on_value_change = Some(Rc::new(callback));
        self
    }

    /// Maps the value type, wrapping the notifier so it receives the original type.
    pub(crate) fn map<U>(
        self,
        into: impl Fn(T) -> U,
        notify: impl Fn(&U) -> Option<T> + 'static,
    ) -> ControlProps<U>
    where
        T: 'static,
    {
        let callback = self.on_value_change.map(|callback| {
            Rc::new(move |value: &U| {
                if let Some(value) = notify(value) {
                    callback(&value);
                }
            }) as ChangeCallback<U>
        });
        ControlProps {
            value: self.value.map(&into),
            default_value: self.default_value.map(&into),
            on_value_change: callback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Ownership mode of a primitive's visible state, fixed at creation.
pub enum ControlMode {
    /// The caller owns the value; the primitive only requests changes.
    Controlled,
    /// The primitive owns and persists the value.
    Uncontrolled,
}

/// Reconciles caller-owned and internally owned state for one primitive instance.
///
/// The mode is locked when the instance is created. Writes always notify the caller with the
/// candidate value and only touch internal storage when uncontrolled; reads return the external
/// value when controlled.
pub struct Controllable<T> {
    primitive: &'static str,
    mode: ControlMode,
    value: T,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllable")
            .field("primitive", &self.primitive)
            .field("mode", &self.mode)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: Clone + PartialEq> Controllable<T> {
    /// Creates a reconciler for `primitive`, falling back to `fallback` when neither a value nor
    /// a default was supplied.
    pub fn new(primitive: &'static str, props: ControlProps<T>, fallback: T) -> Self {
        let ControlProps {
            value,
            default_value,
            on_value_change,
        } = props;
        let (mode, value) = match value {
            Some(value) => (ControlMode::Controlled, value),
            None => (
                ControlMode::Uncontrolled,
                default_value.unwrap_or(fallback),
            ),
        };
        Self {
            primitive,
            mode,
            value,
            on_change: on_value_change,
        }
    }

    /// Returns the locked ownership mode.
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Returns `true` when the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        self.mode == ControlMode::Controlled
    }

    /// Returns the rendered value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Requests `candidate` as the next value.
    ///
    /// The change callback fires first and unconditionally. Returns `true` when internal storage
    /// was updated, which only happens in uncontrolled mode.
    pub fn set(&mut self, candidate: T) -> bool {
        if let Some(on_change) = self.on_change.as_ref() {
            on_change(&candidate);
        }
        match self.mode {
            ControlMode::Controlled => false,
            ControlMode::Uncontrolled => {
                self.value = candidate;
                true
            }
        }
    }

    /// Applies a new external value to a controlled instance.
    ///
    /// The rendered value always follows the caller in controlled mode. Returns whether the
    /// rendered value changed.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] when the instance was created uncontrolled; the
    /// value is ignored.
    pub fn sync(&mut self, external: T) -> Result<bool, PrimitiveError> {
        if self.mode == ControlMode::Uncontrolled {
            return Err(PrimitiveError::ModeSwitch {
                primitive: self.primitive,
            });
        }
        if self.value == external {
            return Ok(false);
        }
        self.value = external;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn uncontrolled_write_applies_and_notifies() {
        let (seen, callback) = recorder::<bool>();
        let mut open = Controllable::new(
            "Dialog",
            ControlProps::uncontrolled(false).on_change(callback),
            false,
        );

        assert!(open.set(true));
        assert!(*open.get());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn controlled_write_notifies_without_applying() {
        let (seen, callback) = recorder::<bool>();
        let mut open = Controllable::new(
            "Dialog",
            ControlProps::controlled(false).on_change(callback),
            false,
        );

        assert!(!open.set(true));
        assert!(!*open.get());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn controlled_sync_follows_external_value() {
        let mut open = Controllable::new("Dialog", ControlProps::controlled(false), false);

        assert_eq!(open.sync(true), Ok(true));
        assert_eq!(open.sync(true), Ok(false));
        assert!(*open.get());
    }

    #[test]
    fn uncontrolled_instance_rejects_external_values() {
        let mut open = Controllable::new("Tooltip", ControlProps::uncontrolled(true), false);

        assert_eq!(
            open.sync(false),
            Err(PrimitiveError::ModeSwitch {
                primitive: "Tooltip"
            })
        );
        assert!(*open.get());
        assert_eq!(open.mode(), ControlMode::Uncontrolled);
    }

    #[test]
    fn fallback_applies_without_value_or_default() {
        let open = Controllable::new("HoverCard", ControlProps::<bool>::default(), false);
        assert!(!*open.get());
        assert!(!open.is_controlled());
    }
}
