use std::rc::Rc;
use std::time::Duration;

use leptos::ev::{FocusEvent, PointerEvent};
use leptos::*;
use ui_primitives_headless::{
    expect_scope, AttrMap, TimerToken, TooltipEffect, TooltipMachine, TooltipProviderConfig,
    TOOLTIP_ROOT,
};

use super::{
    attr_reader, control_props, merge_layout_class, run_composed, sync_controlled,
    use_primitive_defaults, PrimitiveScope,
};

type ClearTimer = Rc<dyn Fn()>;

#[derive(Clone, Copy)]
struct TooltipContext {
    scope: PrimitiveScope<TooltipMachine>,
    timers: StoredValue<Vec<(TimerToken, ClearTimer)>>,
}

impl TooltipContext {
    fn dispatch(self, f: impl FnOnce(&mut TooltipMachine) -> Vec<TooltipEffect>) {
        let effects = self.scope.dispatch(f);
        self.apply(effects);
    }

    fn apply(self, effects: Vec<TooltipEffect>) {
        for effect in effects {
            match effect {
                TooltipEffect::StartTimer { token, delay } => self.start_timer(token, delay),
                TooltipEffect::CancelTimer { token } => self.clear_timer(token),
            }
        }
    }

    fn start_timer(self, token: TimerToken, delay: Duration) {
        let fire = move || {
            self.timers
                .try_update_value(|timers| timers.retain(|(scheduled, _)| *scheduled != token));
            self.scope.try_dispatch(|tooltip| tooltip.timer_elapsed(token));
        };
        match set_timeout_with_handle(fire, delay) {
            Ok(handle) => self.timers.update_value(|timers| {
                timers.push((token, Rc::new(move || handle.clear()) as ClearTimer));
            }),
            Err(err) => logging::warn!("tooltip open delay failed to schedule: {err:?}"),
        }
    }

    fn clear_timer(self, token: TimerToken) {
        self.timers.try_update_value(|timers| {
            timers.retain(|(scheduled, clear)| {
                if *scheduled == token {
                    clear();
                    false
                } else {
                    true
                }
            })
        });
    }
}

fn use_tooltip_context(role: &'static str) -> TooltipContext {
    expect_scope(use_context::<TooltipContext>(), role, TOOLTIP_ROOT)
}

#[component]
/// Shares one open delay with every [`Tooltip`] below it.
///
/// Without `delay`, the host [`PrimitiveDefaults`](ui_primitives_headless::PrimitiveDefaults)
/// delay applies.
pub fn TooltipProvider(
    #[prop(optional)] delay: Option<Duration>,
    children: Children,
) -> impl IntoView {
    let defaults = use_primitive_defaults();
    provide_context(TooltipProviderConfig {
        delay: delay.unwrap_or_else(|| defaults.tooltip_delay()),
    });

    children().into_view()
}

#[component]
/// Hint root. Opens after the open delay while its trigger is hovered or focused and hides
/// immediately on leave, blur, or Escape.
///
/// `delay` overrides the enclosing [`TooltipProvider`].
pub fn Tooltip(
    #[prop(optional, into)] open: Option<MaybeSignal<bool>>,
    #[prop(optional)] default_open: bool,
    #[prop(optional)] on_open_change: Option<Callback<bool>>,
    #[prop(optional)] delay: Option<Duration>,
    children: Children,
) -> impl IntoView {
    let defaults = use_primitive_defaults();
    let provider = use_context::<TooltipProviderConfig>()
        .unwrap_or_else(|| TooltipProviderConfig::from_defaults(&defaults));
    let machine = TooltipMachine::new(
        control_props(open, Some(default_open), on_open_change),
        TooltipProviderConfig::resolve(Some(&provider), delay),
        &defaults,
    );
    let scope = PrimitiveScope::new(TOOLTIP_ROOT, machine);
    let context = TooltipContext {
        scope,
        timers: store_value(Vec::new()),
    };
    sync_controlled(scope, open, TOOLTIP_ROOT, TooltipMachine::sync);
    provide_context(context);

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        if !scope.read_untracked(|tooltip| tooltip.is_open()) {
            return;
        }
        if scope.dispatch(|tooltip| tooltip.key_down("Escape")) {
            ev.prevent_default();
        }
    });
    on_cleanup(move || escape_listener.remove());
    on_cleanup(move || {
        if let Some(effects) = scope.try_dispatch(|tooltip| tooltip.unmount()) {
            context.apply(effects);
        }
    });

    children().into_view()
}

#[derive(Clone, Copy)]
/// Trigger wiring for callers that render their own trigger element.
pub struct TooltipTriggerBindings {
    /// `id`, `aria-describedby` while shown, and `data-state`.
    pub attrs: Signal<AttrMap>,
    /// Starts the open delay.
    pub on_pointer_enter: Callback<PointerEvent>,
    /// Cancels the delay and hides.
    pub on_pointer_leave: Callback<PointerEvent>,
    /// Starts the open delay.
    pub on_focus: Callback<FocusEvent>,
    /// Cancels the delay and hides.
    pub on_blur: Callback<FocusEvent>,
}

/// Binds a caller-rendered element as the tooltip trigger.
///
/// # Panics
///
/// Panics when called outside a [`Tooltip`] root.
pub fn use_tooltip_trigger() -> TooltipTriggerBindings {
    let context = use_tooltip_context("TooltipTrigger");
    let scope = context.scope;
    TooltipTriggerBindings {
        attrs: Signal::derive(move || scope.read(|tooltip| tooltip.trigger_attrs())),
        on_pointer_enter: Callback::new(move |_: PointerEvent| {
            context.dispatch(|tooltip| tooltip.pointer_enter());
        }),
        on_pointer_leave: Callback::new(move |_: PointerEvent| {
            context.dispatch(|tooltip| tooltip.pointer_leave());
        }),
        on_focus: Callback::new(move |_: FocusEvent| {
            context.dispatch(|tooltip| tooltip.focus());
        }),
        on_blur: Callback::new(move |_: FocusEvent| {
            context.dispatch(|tooltip| tooltip.blur());
        }),
    }
}

#[component]
/// Default trigger wrapper. Caller handlers run first and may cancel the tooltip's own
/// handling with `prevent_default`.
pub fn TooltipTrigger(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_pointer_enter: Option<Callback<PointerEvent>>,
    #[prop(optional)] on_pointer_leave: Option<Callback<PointerEvent>>,
    #[prop(optional)] on_focus: Option<Callback<FocusEvent>>,
    #[prop(optional)] on_blur: Option<Callback<FocusEvent>>,
    children: Children,
) -> impl IntoView {
    let bindings = use_tooltip_trigger();
    let attrs = bindings.attrs;

    view! {
        <span
            class=merge_layout_class("ui-tooltip-trigger", layout_class)
            id=attr_reader(attrs, "id")
            aria-describedby=attr_reader(attrs, "aria-describedby")
            data-state=attr_reader(attrs, "data-state")
            data-ui-primitive="true"
            data-ui-kind="tooltip-trigger"
            on:pointerenter=move |ev| {
                run_composed(on_pointer_enter, &ev, |ev| bindings.on_pointer_enter.call(ev.clone()))
            }
            on:pointerleave=move |ev| {
                run_composed(on_pointer_leave, &ev, |ev| bindings.on_pointer_leave.call(ev.clone()))
            }
            on:focusin=move |ev| run_composed(on_focus, &ev, |ev| bindings.on_focus.call(ev.clone()))
            on:focusout=move |ev| run_composed(on_blur, &ev, |ev| bindings.on_blur.call(ev.clone()))
        >
            {children()}
        </span>
    }
}

#[component]
/// Hint body, mounted only while shown.
pub fn TooltipContent(
    #[prop(optional)] layout_class: Option<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    let TooltipContext { scope, .. } = use_tooltip_context("TooltipContent");
    let attrs =
        Signal::derive(move || scope.read(|tooltip| tooltip.content_attrs().unwrap_or_default()));

    view! {
        <Show when=move || scope.read(|tooltip| tooltip.is_open()) fallback=|| ()>
            <div
                class=merge_layout_class("ui-tooltip-content", layout_class)
                id=attr_reader(attrs, "id")
                role=attr_reader(attrs, "role")
                data-state=attr_reader(attrs, "data-state")
                data-ui-primitive="true"
                data-ui-kind="tooltip-content"
            >
                {children()}
            </div>
        </Show>
    }
}
