//! Headless disclosure and selection primitives for the shared UI library.
//!
//! The crate owns the framework-free half of `Dialog`, `HoverCard`, `Tooltip`, `Tabs`, and
//! `Switch`: open/closed and active-value state machines, the controlled/uncontrolled value
//! reconciler, scoped coordination cells, role registries, generated accessibility ids, and the
//! attribute bags role elements render. Reactive hosts (see `system_ui`) drive these machines
//! from DOM events and timers; tests drive them directly.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod attrs;
pub mod compose;
pub mod config;
pub mod controllable;
pub mod dialog;
pub mod disclosure;
pub mod error;
pub mod hover_card;
pub mod ids;
pub mod registry;
pub mod scope;
pub mod switch;
pub mod tabs;
pub mod tooltip;

pub use attrs::{AttrMap, DataState};
pub use compose::{compose_event_handlers, DefaultPrevented, SyntheticEvent};
pub use config::PrimitiveDefaults;
pub use controllable::{ChangeCallback, ControlMode, ControlProps, Controllable};
pub use dialog::{DialogCloseReason, DialogMachine, DIALOG_ROOT};
pub use disclosure::{Disclosure, DisclosureState, Transition, TransitionSource};
pub use error::PrimitiveError;
pub use hover_card::{HoverCardMachine, HOVER_CARD_ROOT};
pub use ids::{generate_id, IdPair};
pub use registry::Registry;
pub use scope::{expect_scope, require_scope, CoordinationCell};
pub use switch::{SwitchMachine, SWITCH_ROOT};
pub use tabs::{Orientation, TabsMachine, TABS_ROOT};
pub use tooltip::{
    TimerToken, TooltipEffect, TooltipMachine, TooltipPhase, TooltipProviderConfig, TOOLTIP_ROOT,
};
