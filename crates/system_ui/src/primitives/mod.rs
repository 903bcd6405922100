//! Leptos hosts for the headless disclosure and selection machines.
//!
//! Each root component owns one machine inside a [`PrimitiveScope`] and provides it through
//! context; role components read reactive attribute bags from the scope and dispatch DOM events
//! back into it.

use std::rc::Rc;

use leptos::*;
use ui_primitives_headless::{
    compose_event_handlers, AttrMap, ChangeCallback, ControlProps, CoordinationCell,
    DefaultPrevented, PrimitiveDefaults, PrimitiveError,
};

mod dialog;
mod hover_card;
mod switch;
mod tabs;
mod tooltip;

pub use dialog::{
    use_dialog_trigger, Dialog, DialogClose, DialogContent, DialogDescription, DialogTitle,
    DialogTrigger, DialogTriggerBindings,
};
pub use hover_card::{
    use_hover_card_trigger, HoverCard, HoverCardContent, HoverCardTrigger,
    HoverCardTriggerBindings,
};
pub use switch::Switch;
pub use tabs::{use_tabs_trigger, Tabs, TabsContent, TabsList, TabsTrigger, TabsTriggerBindings};
pub use tooltip::{
    use_tooltip_trigger, Tooltip, TooltipContent, TooltipProvider, TooltipTrigger,
    TooltipTriggerBindings,
};

/// Inline style that keeps synthesized labels available to assistive technology only.
pub(crate) const VISUALLY_HIDDEN: &str = "position:absolute;border:0;width:1px;height:1px;\
padding:0;margin:-1px;overflow:hidden;clip:rect(0,0,0,0);white-space:nowrap;";

#[component]
/// Provides host [`PrimitiveDefaults`] to every primitive rendered below it.
pub fn PrimitiveDefaultsProvider(defaults: PrimitiveDefaults, children: Children) -> impl IntoView {
    provide_context(defaults);
    children().into_view()
}

pub(crate) fn use_primitive_defaults() -> PrimitiveDefaults {
    use_context::<PrimitiveDefaults>().unwrap_or_default()
}

/// Reactive home of one primitive instance's machine.
///
/// Reads through [`PrimitiveScope::read`] subscribe to every later dispatch.
pub(crate) struct PrimitiveScope<M: 'static> {
    cell: StoredValue<CoordinationCell<M>>,
    changed: Trigger,
}

impl<M: 'static> Clone for PrimitiveScope<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: 'static> Copy for PrimitiveScope<M> {}

impl<M: 'static> PrimitiveScope<M> {
    pub(crate) fn new(root: &'static str, machine: M) -> Self {
        Self {
            cell: store_value(CoordinationCell::new(root, machine)),
            changed: create_trigger(),
        }
    }

    pub(crate) fn read<R>(self, f: impl FnOnce(&M) -> R) -> R {
        self.changed.track();
        self.read_untracked(f)
    }

    pub(crate) fn read_untracked<R>(self, f: impl FnOnce(&M) -> R) -> R {
        self.cell.with_value(|cell| cell.with(f))
    }

    /// Mutates the machine. Change callbacks fired inside `f` are batched so caller signal
    /// writes settle after the machine borrow is released.
    pub(crate) fn dispatch<R>(self, f: impl FnOnce(&mut M) -> R) -> R {
        let cell = self.cell.get_value();
        let out = batch(|| cell.update(f));
        self.changed.notify();
        out
    }

    /// Like [`PrimitiveScope::dispatch`], but a no-op once the owning root has been disposed.
    pub(crate) fn try_dispatch<R>(self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        let cell = self.cell.try_get_value()?;
        let out = batch(|| cell.update(f));
        self.changed.try_notify();
        Some(out)
    }
}

/// Builds reconciler props from component props.
pub(crate) fn control_props<T: Clone + 'static>(
    value: Option<MaybeSignal<T>>,
    default_value: Option<T>,
    on_change: Option<Callback<T>>,
) -> ControlProps<T> {
    ControlProps {
        value: value.map(|value| value.get_untracked()),
        default_value,
        on_value_change: on_change.map(|callback| {
            Rc::new(move |value: &T| callback.call(value.clone())) as ChangeCallback<T>
        }),
    }
}

/// Pushes later values of a controlled prop into the machine.
pub(crate) fn sync_controlled<M: 'static, T: Clone + 'static>(
    scope: PrimitiveScope<M>,
    value: Option<MaybeSignal<T>>,
    primitive: &'static str,
    sync: fn(&mut M, T) -> Result<bool, PrimitiveError>,
) {
    let Some(value) = value else {
        return;
    };
    create_effect(move |_| {
        let next = value.get();
        if let Err(err) = scope.dispatch(|machine| sync(machine, next)) {
            logging::warn!("{primitive} sync failed: {err}");
        }
    });
}

/// Runs the caller's handler, then the primitive's own unless the caller prevented default.
pub(crate) fn run_composed<E: DefaultPrevented + Clone + 'static>(
    external: Option<Callback<E>>,
    event: &E,
    internal: impl Fn(&E),
) {
    let external = external.map(|callback| move |event: &E| callback.call(event.clone()));
    compose_event_handlers(external, internal)(event)
}

/// Reactive reader for one attribute of a role element's attribute bag.
pub(crate) fn attr_reader(
    attrs: Signal<AttrMap>,
    name: &'static str,
) -> impl Fn() -> Option<String> + Copy + 'static {
    move || attrs.with(|attrs| attrs.get(name).map(str::to_owned))
}

/// Reactive boolean attribute driven by a flag in the attribute bag.
pub(crate) fn flag_reader(
    attrs: Signal<AttrMap>,
    name: &'static str,
) -> impl Fn() -> bool + Copy + 'static {
    move || attrs.with(|attrs| attrs.contains(name))
}

/// Focuses a role element, ignoring browser focus errors.
pub(crate) fn focus_html_element(element: &web_sys::HtmlElement) {
    // Focus only fails for detached or non-focusable nodes; the element keeps its prior focus.
    let _ = element.focus();
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}
