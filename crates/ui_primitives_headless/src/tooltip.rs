//! Delayed hint state machine.
//!
//! The machine never owns a real timer. Transitions return [`TooltipEffect`] values that the host
//! turns into scheduled or cleared timeouts, and the host reports expiry through
//! [`TooltipMachine::timer_elapsed`]. Closing has no delay.

use std::time::Duration;

use crate::attrs::AttrMap;
use crate::config::PrimitiveDefaults;
use crate::controllable::ControlProps;
use crate::disclosure::{Disclosure, DisclosureState, TransitionSource};
use crate::error::PrimitiveError;
use crate::ids::IdPair;

/// Root name used in wiring errors.
pub const TOOLTIP_ROOT: &str = "Tooltip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifies one scheduled open-delay timer.
pub struct TimerToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Timer work the host must perform after a transition.
pub enum TooltipEffect {
    /// Schedule a timer and call [`TooltipMachine::timer_elapsed`] with `token` after `delay`.
    StartTimer {
        /// Token to report on expiry.
        token: TimerToken,
        /// Open delay.
        delay: Duration,
    },
    /// Clear the timer scheduled for `token`.
    CancelTimer {
        /// Token of the timer to clear.
        token: TimerToken,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Observable tooltip phase.
pub enum TooltipPhase {
    /// Nothing pending, content unmounted.
    Hidden,
    /// Open delay running.
    PendingOpen,
    /// Content mounted.
    Shown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Open delay shared by every tooltip under one provider.
pub struct TooltipProviderConfig {
    /// Default open delay for descendant tooltips.
    pub delay: Duration,
}

impl Default for TooltipProviderConfig {
    fn default() -> Self {
        Self::from_defaults(&PrimitiveDefaults::default())
    }
}

impl TooltipProviderConfig {
    /// Provider config seeded from host defaults.
    pub fn from_defaults(defaults: &PrimitiveDefaults) -> Self {
        Self {
            delay: defaults.tooltip_delay(),
        }
    }

    /// Effective delay for a tooltip that may override the provider.
    pub fn resolve(provider: Option<&Self>, own_delay: Option<Duration>) -> Duration {
        own_delay
            .or_else(|| provider.map(|provider| provider.delay))
            .unwrap_or_else(|| Self::default().delay)
    }
}

/// One mounted tooltip.
#[derive(Debug)]
pub struct TooltipMachine {
    disclosure: Disclosure,
    ids: IdPair,
    delay: Duration,
    pending: Option<TimerToken>,
    next_token: u64,
    hovered: bool,
    focused: bool,
}

impl TooltipMachine {
    /// Creates a hidden tooltip using `delay` as its open delay.
    pub fn new(props: ControlProps<bool>, delay: Duration, defaults: &PrimitiveDefaults) -> Self {
        Self {
            disclosure: Disclosure::new(TOOLTIP_ROOT, props),
            ids: IdPair::generate(&defaults.id_prefix, "tooltip"),
            delay,
            pending: None,
            next_token: 1,
            hovered: false,
            focused: false,
        }
    }

    /// Configured open delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generated trigger/content ids.
    pub fn ids(&self) -> &IdPair {
        &self.ids
    }

    /// Returns `true` while the content is mounted.
    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    /// Rendered disclosure state.
    pub fn state(&self) -> DisclosureState {
        self.disclosure.state()
    }

    /// Current phase, including a running open delay.
    pub fn phase(&self) -> TooltipPhase {
        if self.is_open() {
            TooltipPhase::Shown
        } else if self.pending.is_some() {
            TooltipPhase::PendingOpen
        } else {
            TooltipPhase::Hidden
        }
    }

    /// Token of the running open-delay timer.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Pointer entered the trigger.
    pub fn pointer_enter(&mut self) -> Vec<TooltipEffect> {
        self.hovered = true;
        self.begin_open(TransitionSource::Pointer)
    }

    /// Trigger received focus.
    pub fn focus(&mut self) -> Vec<TooltipEffect> {
        self.focused = true;
        self.begin_open(TransitionSource::Focus)
    }

    /// Pointer left the trigger. Hides immediately.
    pub fn pointer_leave(&mut self) -> Vec<TooltipEffect> {
        self.hovered = false;
        self.hide(TransitionSource::Pointer)
    }

    /// Trigger lost focus. Hides immediately.
    pub fn blur(&mut self) -> Vec<TooltipEffect> {
        self.focused = false;
        self.hide(TransitionSource::Focus)
    }

    /// Key pressed while the tooltip is mounted. Escape hides a shown tooltip.
    ///
    /// Returns `true` when the key was consumed.
    pub fn key_down(&mut self, key: &str) -> bool {
        if key != "Escape" || !self.is_open() {
            return false;
        }
        self.disclosure
            .request(false, TransitionSource::Keyboard)
            .is_some()
    }

    /// Reports expiry of the timer started for `token`.
    ///
    /// Stale tokens (cancelled or superseded timers) are ignored. Returns `true` when an open was
    /// requested.
    pub fn timer_elapsed(&mut self, token: TimerToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        if !(self.hovered || self.focused) {
            return false;
        }
        self.disclosure
            .request(true, TransitionSource::Timer)
            .is_some()
    }

    /// Opens or closes from application code, bypassing the delay.
    pub fn set_open(&mut self, open: bool) -> Vec<TooltipEffect> {
        let effects = self.cancel_pending().into_iter().collect();
        self.disclosure.request(open, TransitionSource::Programmatic);
        effects
    }

    /// Follows a new external open value.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::ModeSwitch`] when the tooltip was created uncontrolled.
    pub fn sync(&mut self, open: bool) -> Result<bool, PrimitiveError> {
        self.disclosure.sync(open)
    }

    /// Tears the instance down, returning the cancellation for any pending timer.
    pub fn unmount(&mut self) -> Vec<TooltipEffect> {
        self.hovered = false;
        self.focused = false;
        self.cancel_pending().into_iter().collect()
    }

    /// Attributes for the trigger element; `aria-describedby` is wired only while shown.
    pub fn trigger_attrs(&self) -> AttrMap {
        let open = self.is_open();
        AttrMap::new()
            .with("id", self.ids.trigger.as_str())
            .with_opt("aria-describedby", open.then_some(self.ids.content.as_str()))
            .with_state(self.state().data_state())
    }

    /// Attributes for the content element, or `None` while hidden.
    pub fn content_attrs(&self) -> Option<AttrMap> {
        self.is_open().then(|| {
            AttrMap::new()
                .with("id", self.ids.content.as_str())
                .with("role", "tooltip")
                .with_state(self.state().data_state())
        })
    }

    fn begin_open(&mut self, source: TransitionSource) -> Vec<TooltipEffect> {
        let mut effects: Vec<TooltipEffect> = self.cancel_pending().into_iter().collect();
        if self.is_open() {
            return effects;
        }
        if self.delay.is_zero() {
            self.disclosure.request(true, source);
            return effects;
        }
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        effects.push(TooltipEffect::StartTimer {
            token,
            delay: self.delay,
        });
        effects
    }

    fn hide(&mut self, source: TransitionSource) -> Vec<TooltipEffect> {
        let effects = self.cancel_pending().into_iter().collect();
        self.disclosure.request(false, source);
        effects
    }

    fn cancel_pending(&mut self) -> Option<TooltipEffect> {
        self.pending
            .take()
            .map(|token| TooltipEffect::CancelTimer { token })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn tooltip() -> TooltipMachine {
        TooltipMachine::new(ControlProps::default(), DELAY, &PrimitiveDefaults::default())
    }

    fn started(effects: &[TooltipEffect]) -> TimerToken {
        effects
            .iter()
            .find_map(|effect| match effect {
                TooltipEffect::StartTimer { token, .. } => Some(*token),
                TooltipEffect::CancelTimer { .. } => None,
            })
            .expect("timer started")
    }

    #[test]
    fn hover_starts_delay_and_expiry_shows() {
        let mut tooltip = tooltip();
        let effects = tooltip.pointer_enter();
        let token = started(&effects);
        assert_eq!(
            effects,
            vec![TooltipEffect::StartTimer {
                token,
                delay: DELAY
            }]
        );
        assert_eq!(tooltip.phase(), TooltipPhase::PendingOpen);
        assert!(tooltip.content_attrs().is_none());

        assert!(tooltip.timer_elapsed(token));
        assert_eq!(tooltip.phase(), TooltipPhase::Shown);
    }

    #[test]
    fn reentering_cancels_before_restarting() {
        let mut tooltip = tooltip();
        let first = started(&tooltip.pointer_enter());
        let effects = tooltip.focus();
        let second = started(&effects);

        assert_eq!(effects[0], TooltipEffect::CancelTimer { token: first });
        assert_ne!(first, second);
        assert!(!tooltip.timer_elapsed(first));
        assert!(tooltip.timer_elapsed(second));
    }

    #[test]
    fn leave_before_expiry_cancels_timer() {
        let mut tooltip = tooltip();
        let token = started(&tooltip.pointer_enter());

        assert_eq!(
            tooltip.pointer_leave(),
            vec![TooltipEffect::CancelTimer { token }]
        );
        assert!(!tooltip.timer_elapsed(token));
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    }

    #[test]
    fn escape_hides_only_when_shown() {
        let mut tooltip = tooltip();
        assert!(!tooltip.key_down("Escape"));

        let token = started(&tooltip.focus());
        tooltip.timer_elapsed(token);
        assert!(tooltip.key_down("Escape"));
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    }

    #[test]
    fn describedby_is_wired_only_while_shown() {
        let mut tooltip = tooltip();
        assert!(!tooltip.trigger_attrs().contains("aria-describedby"));

        let token = started(&tooltip.pointer_enter());
        tooltip.timer_elapsed(token);
        let content_id = tooltip.ids().content.clone();
        assert_eq!(
            tooltip.trigger_attrs().get("aria-describedby"),
            Some(content_id.as_str())
        );
        assert_eq!(
            tooltip.content_attrs().expect("shown").get("role"),
            Some("tooltip")
        );
    }

    #[test]
    fn zero_delay_opens_without_timer() {
        let mut tooltip =
            TooltipMachine::new(ControlProps::default(), Duration::ZERO, &PrimitiveDefaults::default());
        assert!(tooltip.pointer_enter().is_empty());
        assert!(tooltip.is_open());
    }

    #[test]
    fn unmount_cancels_pending_timer() {
        let mut tooltip = tooltip();
        let token = started(&tooltip.pointer_enter());
        assert_eq!(tooltip.unmount(), vec![TooltipEffect::CancelTimer { token }]);
        assert!(tooltip.unmount().is_empty());
    }

    #[test]
    fn own_delay_overrides_provider() {
        let provider = TooltipProviderConfig {
            delay: Duration::from_millis(100),
        };
        assert_eq!(
            TooltipProviderConfig::resolve(Some(&provider), None),
            Duration::from_millis(100)
        );
        assert_eq!(
            TooltipProviderConfig::resolve(Some(&provider), Some(DELAY)),
            DELAY
        );
        assert_eq!(
            TooltipProviderConfig::resolve(None, None),
            Duration::from_millis(700)
        );
    }
}
