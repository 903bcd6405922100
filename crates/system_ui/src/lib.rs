//! Leptos disclosure and selection primitives for shell and built-in system applications.
//!
//! `Dialog`, `HoverCard`, `Tooltip`, `Tabs`, and `Switch` are compound components: a root owns
//! one headless machine from `ui_primitives_headless` and provides it to role components through
//! context. Every root accepts a controlled value or an uncontrolled default plus a change
//! callback, and every role element carries the stable `data-ui-*` and `data-state` DOM
//! contract consumed by the shell CSS layers. Callers that render their own trigger elements use
//! the `use_*_trigger` hooks instead of the default trigger components.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod primitives;

pub use primitives::{
    use_dialog_trigger, use_hover_card_trigger, use_tabs_trigger, use_tooltip_trigger, Dialog,
    DialogClose, DialogContent, DialogDescription, DialogTitle, DialogTrigger,
    DialogTriggerBindings, HoverCard, HoverCardContent, HoverCardTrigger, HoverCardTriggerBindings,
    PrimitiveDefaultsProvider, Switch, Tabs, TabsContent, TabsList, TabsTrigger,
    TabsTriggerBindings, Tooltip, TooltipContent, TooltipProvider, TooltipTrigger,
    TooltipTriggerBindings,
};
pub use ui_primitives_headless::{AttrMap, Orientation, PrimitiveDefaults, PrimitiveError};

/// Convenience imports for application crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        use_dialog_trigger, use_hover_card_trigger, use_tabs_trigger, use_tooltip_trigger,
        AttrMap, Dialog, DialogClose, DialogContent, DialogDescription, DialogTitle,
        DialogTrigger, HoverCard, HoverCardContent, HoverCardTrigger, Orientation,
        PrimitiveDefaults, PrimitiveDefaultsProvider, Switch, Tabs, TabsContent, TabsList,
        TabsTrigger, Tooltip, TooltipContent, TooltipProvider, TooltipTrigger,
    };
}
