use leptos::ev::{FocusEvent, PointerEvent};
use leptos::*;
use wasm_bindgen::JsCast;
use ui_primitives_headless::{expect_scope, AttrMap, HoverCardMachine, HOVER_CARD_ROOT};

use super::{
    attr_reader, control_props, merge_layout_class, run_composed, sync_controlled,
    use_primitive_defaults, PrimitiveScope,
};

#[derive(Clone, Copy)]
struct HoverCardContext {
    scope: PrimitiveScope<HoverCardMachine>,
    content_ref: NodeRef<html::Div>,
}

/// Returns `true` when the pointer is leaving for an element inside the mounted content.
fn entering_content(content_ref: NodeRef<html::Div>, ev: &PointerEvent) -> bool {
    let Some(content) = content_ref.get_untracked() else {
        return false;
    };
    ev.related_target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|target| content.contains(Some(&target)))
}

fn use_hover_card_context(role: &'static str) -> HoverCardContext {
    expect_scope(use_context::<HoverCardContext>(), role, HOVER_CARD_ROOT)
}

#[component]
/// Preview card root. Opens while its trigger is hovered or focused.
pub fn HoverCard(
    #[prop(optional, into)] open: Option<MaybeSignal<bool>>,
    #[prop(optional)] default_open: bool,
    #[prop(optional)] on_open_change: Option<Callback<bool>>,
    children: Children,
) -> impl IntoView {
    let defaults = use_primitive_defaults();
    let machine = HoverCardMachine::new(
        control_props(open, Some(default_open), on_open_change),
        &defaults,
    );
    let scope = PrimitiveScope::new(HOVER_CARD_ROOT, machine);
    sync_controlled(scope, open, HOVER_CARD_ROOT, HoverCardMachine::sync);
    provide_context(HoverCardContext {
        scope,
        content_ref: create_node_ref::<html::Div>(),
    });

    children().into_view()
}

#[derive(Clone, Copy)]
/// Trigger wiring for callers that render their own trigger element.
pub struct HoverCardTriggerBindings {
    /// `id`, `aria-expanded`, `aria-controls`, and `data-state`.
    pub attrs: Signal<AttrMap>,
    /// Opens the card.
    pub on_pointer_enter: Callback<PointerEvent>,
    /// Closes the card unless the pointer is moving into the content.
    pub on_pointer_leave: Callback<PointerEvent>,
    /// Opens the card.
    pub on_focus: Callback<FocusEvent>,
    /// Closes the card.
    pub on_blur: Callback<FocusEvent>,
}

/// Binds a caller-rendered element as the hover card trigger.
///
/// # Panics
///
/// Panics when called outside a [`HoverCard`] root.
pub fn use_hover_card_trigger() -> HoverCardTriggerBindings {
    let HoverCardContext { scope, content_ref } = use_hover_card_context("HoverCardTrigger");
    HoverCardTriggerBindings {
        attrs: Signal::derive(move || scope.read(|card| card.trigger_attrs())),
        on_pointer_enter: Callback::new(move |_: PointerEvent| {
            scope.dispatch(|card| card.pointer_enter_trigger());
        }),
        on_pointer_leave: Callback::new(move |ev: PointerEvent| {
            let into_content = entering_content(content_ref, &ev);
            scope.dispatch(|card| card.pointer_leave_trigger(into_content));
        }),
        on_focus: Callback::new(move |_: FocusEvent| {
            scope.dispatch(|card| card.focus_trigger());
        }),
        on_blur: Callback::new(move |_: FocusEvent| {
            scope.dispatch(|card| card.blur_trigger());
        }),
    }
}

#[component]
/// Default focusable trigger wrapper.
pub fn HoverCardTrigger(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_pointer_enter: Option<Callback<PointerEvent>>,
    #[prop(optional)] on_pointer_leave: Option<Callback<PointerEvent>>,
    children: Children,
) -> impl IntoView {
    let bindings = use_hover_card_trigger();
    let attrs = bindings.attrs;

    view! {
        <span
            class=merge_layout_class("ui-hover-card-trigger", layout_class)
            tabindex="0"
            id=attr_reader(attrs, "id")
            aria-expanded=attr_reader(attrs, "aria-expanded")
            aria-controls=attr_reader(attrs, "aria-controls")
            data-state=attr_reader(attrs, "data-state")
            data-ui-primitive="true"
            data-ui-kind="hover-card-trigger"
            on:pointerenter=move |ev| {
                run_composed(on_pointer_enter, &ev, |ev| bindings.on_pointer_enter.call(ev.clone()))
            }
            on:pointerleave=move |ev| {
                run_composed(on_pointer_leave, &ev, |ev| bindings.on_pointer_leave.call(ev.clone()))
            }
            on:focusin=move |ev| bindings.on_focus.call(ev)
            on:focusout=move |ev| bindings.on_blur.call(ev)
        >
            {children()}
        </span>
    }
}

#[component]
/// Card body, mounted only while open. Leaving it with the pointer closes the card.
pub fn HoverCardContent(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_pointer_leave: Option<Callback<PointerEvent>>,
    children: ChildrenFn,
) -> impl IntoView {
    let HoverCardContext { scope, content_ref } = use_hover_card_context("HoverCardContent");
    let attrs = Signal::derive(move || scope.read(|card| card.content_attrs().unwrap_or_default()));

    view! {
        <Show when=move || scope.read(|card| card.is_open()) fallback=|| ()>
            <div
                node_ref=content_ref
                class=merge_layout_class("ui-hover-card-content", layout_class)
                id=attr_reader(attrs, "id")
                aria-labelledby=attr_reader(attrs, "aria-labelledby")
                data-state=attr_reader(attrs, "data-state")
                data-ui-primitive="true"
                data-ui-kind="hover-card-content"
                on:pointerleave=move |ev| {
                    run_composed(on_pointer_leave, &ev, |_| {
                        scope.dispatch(|card| card.pointer_leave_content());
                    })
                }
            >
                {children()}
            </div>
        </Show>
    }
}
