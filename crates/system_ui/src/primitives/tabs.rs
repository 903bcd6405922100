use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use ui_primitives_headless::{expect_scope, AttrMap, Orientation, TabsMachine, TABS_ROOT};

use super::{
    attr_reader, control_props, flag_reader, focus_html_element, merge_layout_class,
    run_composed, sync_controlled, use_primitive_defaults, PrimitiveScope,
};

type TabHandle = NodeRef<html::Button>;

#[derive(Clone, Copy)]
struct TabsContext {
    scope: PrimitiveScope<TabsMachine<TabHandle>>,
}

fn use_tabs_context(role: &'static str) -> TabsContext {
    expect_scope(use_context::<TabsContext>(), role, TABS_ROOT)
}

#[component]
/// Tab group root. Exactly one registered trigger/panel pair is active at a time.
///
/// Without `value` or `default_value` the first enabled trigger becomes active. An uncontrolled
/// `default_value` that no trigger uses falls back the same way once the children have mounted.
pub fn Tabs(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] value: Option<MaybeSignal<String>>,
    #[prop(optional, into)] default_value: Option<String>,
    #[prop(optional)] on_value_change: Option<Callback<String>>,
    #[prop(optional)] orientation: Orientation,
    children: Children,
) -> impl IntoView {
    let defaults = use_primitive_defaults();
    let machine = TabsMachine::new(
        control_props(value.clone(), default_value, on_value_change),
        orientation,
        &defaults,
    );
    let scope = PrimitiveScope::new(TABS_ROOT, machine);
    sync_controlled(scope, value, TABS_ROOT, TabsMachine::sync);
    provide_context(TabsContext { scope });
    let children = children();
    scope.dispatch(|tabs| tabs.settle_active());

    view! {
        <div
            class=merge_layout_class("ui-tabs", layout_class)
            data-orientation=orientation.token()
            data-ui-primitive="true"
            data-ui-kind="tabs"
        >
            {children}
        </div>
    }
}

#[component]
/// Container for the triggers.
pub fn TabsList(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    let TabsContext { scope } = use_tabs_context("TabsList");
    let attrs = Signal::derive(move || scope.read(|tabs| tabs.list_attrs()));

    view! {
        <div
            class=merge_layout_class("ui-tabs-list", layout_class)
            role=attr_reader(attrs, "role")
            aria-orientation=attr_reader(attrs, "aria-orientation")
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="tabs-list"
        >
            {children()}
        </div>
    }
}

#[derive(Clone, Copy)]
/// Trigger wiring for callers that render their own `<button>`.
pub struct TabsTriggerBindings {
    /// `id`, `role`, `aria-selected`, `aria-controls`, `tabindex`, `disabled`, and `data-state`.
    pub attrs: Signal<AttrMap>,
    /// Must be attached to the trigger button; arrow keys move focus through it.
    pub node_ref: NodeRef<html::Button>,
    /// Selects this trigger's value.
    pub on_click: Callback<MouseEvent>,
    /// Roving focus across the group.
    pub on_key_down: Callback<KeyboardEvent>,
}

/// Registers a trigger for `value` and binds it to a caller-rendered button.
///
/// The trigger leaves the group when the calling component is disposed.
///
/// # Panics
///
/// Panics when called outside a [`Tabs`] root.
pub fn use_tabs_trigger(value: String, disabled: MaybeSignal<bool>) -> TabsTriggerBindings {
    let TabsContext { scope } = use_tabs_context("TabsTrigger");
    let node_ref = create_node_ref::<html::Button>();

    if let Err(err) =
        scope.dispatch(|tabs| tabs.register_trigger(&value, node_ref, disabled.get_untracked()))
    {
        logging::warn!("tabs register_trigger failed: {err}");
    }
    let registered = value.clone();
    on_cleanup(move || {
        scope.try_dispatch(|tabs| tabs.deregister_trigger(&registered));
    });

    let value = store_value(value);
    create_effect(move |previous: Option<bool>| {
        let disabled = disabled.get();
        if previous.is_some_and(|previous| previous != disabled) {
            let value = value.get_value();
            if let Err(err) = scope.dispatch(|tabs| tabs.set_trigger_disabled(&value, disabled)) {
                logging::warn!("tabs set_trigger_disabled failed: {err}");
            }
        }
        disabled
    });

    TabsTriggerBindings {
        attrs: Signal::derive(move || {
            value.with_value(|value| scope.read(|tabs| tabs.trigger_attrs(value).unwrap_or_default()))
        }),
        node_ref,
        on_click: Callback::new(move |_: MouseEvent| {
            let value = value.get_value();
            if let Err(err) = scope.dispatch(|tabs| tabs.select(&value)) {
                logging::warn!("tabs select failed: {err}");
            }
        }),
        on_key_down: Callback::new(move |ev: KeyboardEvent| {
            let target = value
                .with_value(|value| scope.read_untracked(|tabs| tabs.trigger_key_down(value, &ev.key())));
            if let Some(target) = target {
                ev.prevent_default();
                if let Some(button) = target.get_untracked() {
                    focus_html_element(&button);
                }
            }
        }),
    }
}

#[component]
/// Default trigger button. `on_click` runs first and may cancel selection with
/// `prevent_default`.
pub fn TabsTrigger(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] value: String,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let bindings = use_tabs_trigger(value, disabled);
    let attrs = bindings.attrs;

    view! {
        <button
            type="button"
            node_ref=bindings.node_ref
            class=merge_layout_class("ui-tabs-trigger", layout_class)
            id=attr_reader(attrs, "id")
            role=attr_reader(attrs, "role")
            aria-selected=attr_reader(attrs, "aria-selected")
            aria-controls=attr_reader(attrs, "aria-controls")
            tabindex=attr_reader(attrs, "tabindex")
            disabled=flag_reader(attrs, "disabled")
            data-state=attr_reader(attrs, "data-state")
            data-ui-primitive="true"
            data-ui-kind="tabs-trigger"
            on:click=move |ev| run_composed(on_click, &ev, |ev| bindings.on_click.call(ev.clone()))
            on:keydown=move |ev| bindings.on_key_down.call(ev)
        >
            {children()}
        </button>
    }
}

#[component]
/// Panel for `value`. Stays mounted while inactive, hidden and inert.
pub fn TabsContent(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] value: String,
    children: Children,
) -> impl IntoView {
    let TabsContext { scope } = use_tabs_context("TabsContent");
    if let Err(err) = scope.dispatch(|tabs| tabs.register_panel(&value)) {
        logging::warn!("tabs register_panel failed: {err}");
    }
    let registered = value.clone();
    on_cleanup(move || {
        scope.try_dispatch(|tabs| tabs.deregister_panel(&registered));
    });

    let value = store_value(value);
    let attrs = Signal::derive(move || {
        value.with_value(|value| scope.read(|tabs| tabs.panel_attrs(value).unwrap_or_default()))
    });

    view! {
        <div
            class=merge_layout_class("ui-tabs-content", layout_class)
            id=attr_reader(attrs, "id")
            role=attr_reader(attrs, "role")
            aria-labelledby=attr_reader(attrs, "aria-labelledby")
            tabindex=attr_reader(attrs, "tabindex")
            hidden=flag_reader(attrs, "hidden")
            inert=flag_reader(attrs, "inert")
            data-state=attr_reader(attrs, "data-state")
            data-ui-primitive="true"
            data-ui-kind="tabs-content"
        >
            {children()}
        </div>
    }
}
