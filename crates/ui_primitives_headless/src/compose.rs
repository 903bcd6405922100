//! Merging caller-supplied event handlers with primitive-internal handlers.

use std::cell::Cell;
use std::rc::Rc;

/// Events that can be vetoed by an earlier handler.
pub trait DefaultPrevented {
    /// Returns `true` when a handler marked the event as cancelled.
    fn default_prevented(&self) -> bool;
}

/// Combines a caller handler with the primitive's own handler for the same interaction.
///
/// The caller handler always runs first. The internal handler only runs when the caller did not
/// cancel the event, which lets consumers veto default behavior without the primitive knowing
/// their concerns. A missing caller handler is a no-op.
pub fn compose_event_handlers<E, F, G>(external: Option<F>, internal: G) -> impl Fn(&E)
where
    E: DefaultPrevented + ?Sized,
    F: Fn(&E),
    G: Fn(&E),
{
    move |event: &E| {
        if let Some(external) = external.as_ref() {
            external(event);
        }
        if !event.default_prevented() {
            internal(event);
        }
    }
}

/// DOM-free event used by non-browser hosts and tests.
///
/// Clones share cancellation state, like clones of a DOM event handle.
#[derive(Debug, Default, Clone)]
pub struct SyntheticEvent {
    key: Option<String>,
    prevented: Rc<Cell<bool>>,
}

impl SyntheticEvent {
    /// Creates an event without key information (pointer, focus, click).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a keyboard event for `key` (DOM `KeyboardEvent.key` spelling).
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            prevented: Rc::default(),
        }
    }

    /// Returns the pressed key, if this is a keyboard event.
    pub fn key_name(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Marks the event as cancelled.
    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

impl DefaultPrevented for SyntheticEvent {
    fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

#[cfg(feature = "web")]
mod web {
    use super::DefaultPrevented;

    macro_rules! impl_default_prevented {
        ($($event:ty),* $(,)?) => {
            $(
                impl DefaultPrevented for $event {
                    fn default_prevented(&self) -> bool {
                        web_sys::Event::default_prevented(self)
                    }
                }
            )*
        };
    }

    impl_default_prevented!(
        web_sys::Event,
        web_sys::MouseEvent,
        web_sys::KeyboardEvent,
        web_sys::FocusEvent,
        web_sys::PointerEvent,
    );
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn caller_handler_runs_before_internal_handler() {
        let calls = RefCell::new(Vec::new());
        let handler = compose_event_handlers(
            Some(|_: &SyntheticEvent| calls.borrow_mut().push("caller")),
            |_: &SyntheticEvent| calls.borrow_mut().push("internal"),
        );

        handler(&SyntheticEvent::new());

        assert_eq!(*calls.borrow(), vec!["caller", "internal"]);
    }

    #[test]
    fn cancelled_event_skips_internal_handler() {
        let internal_ran = Cell::new(false);
        let handler = compose_event_handlers(
            Some(|ev: &SyntheticEvent| ev.prevent_default()),
            |_: &SyntheticEvent| internal_ran.set(true),
        );

        handler(&SyntheticEvent::new());

        assert!(!internal_ran.get());
    }

    #[test]
    fn clones_share_cancellation() {
        let event = SyntheticEvent::key("Escape");
        event.clone().prevent_default();
        assert!(event.default_prevented());
    }

    #[test]
    fn missing_caller_handler_still_runs_internal() {
        let internal_ran = Cell::new(false);
        let handler = compose_event_handlers(
            None::<fn(&SyntheticEvent)>,
            |_: &SyntheticEvent| internal_ran.set(true),
        );

        handler(&SyntheticEvent::key("Escape"));

        assert!(internal_ran.get());
    }
}
