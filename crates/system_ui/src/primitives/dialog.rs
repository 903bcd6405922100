use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use ui_primitives_headless::{expect_scope, AttrMap, DialogCloseReason, DialogMachine, DIALOG_ROOT};

use super::{
    attr_reader, control_props, focus_html_element, merge_layout_class, run_composed,
    sync_controlled, use_primitive_defaults, PrimitiveScope, VISUALLY_HIDDEN,
};

#[derive(Clone, Copy)]
struct DialogContext {
    scope: PrimitiveScope<DialogMachine>,
}

fn use_dialog_context(role: &'static str) -> DialogContext {
    expect_scope(use_context::<DialogContext>(), role, DIALOG_ROOT)
}

#[component]
/// Modal dialog root. Owns the open state shared by the `Dialog*` role components below it.
///
/// Pass `open` to control the dialog; otherwise it starts at `default_open` and manages itself.
/// `on_open_change` receives every requested transition in both modes.
pub fn Dialog(
    #[prop(optional, into)] open: Option<MaybeSignal<bool>>,
    #[prop(optional)] default_open: bool,
    #[prop(optional)] on_open_change: Option<Callback<bool>>,
    children: Children,
) -> impl IntoView {
    let defaults = use_primitive_defaults();
    let machine = DialogMachine::new(
        control_props(open, Some(default_open), on_open_change),
        &defaults,
    );
    let scope = PrimitiveScope::new(DIALOG_ROOT, machine);
    sync_controlled(scope, open, DIALOG_ROOT, DialogMachine::sync);
    provide_context(DialogContext { scope });

    children().into_view()
}

#[derive(Clone, Copy)]
/// Trigger wiring for callers that render their own trigger element.
pub struct DialogTriggerBindings {
    /// `id`, `aria-haspopup`, `aria-expanded`, `aria-controls`, and `data-state`.
    pub attrs: Signal<AttrMap>,
    /// Opens the dialog.
    pub on_click: Callback<MouseEvent>,
}

/// Binds a caller-rendered element as the dialog trigger.
///
/// # Panics
///
/// Panics when called outside a [`Dialog`] root.
pub fn use_dialog_trigger() -> DialogTriggerBindings {
    let DialogContext { scope } = use_dialog_context("DialogTrigger");
    DialogTriggerBindings {
        attrs: Signal::derive(move || scope.read(|dialog| dialog.trigger_attrs())),
        on_click: Callback::new(move |_: MouseEvent| {
            scope.dispatch(|dialog| dialog.activate_trigger());
        }),
    }
}

#[component]
/// Default button trigger. `on_click` runs first and may cancel opening with `prevent_default`.
pub fn DialogTrigger(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let bindings = use_dialog_trigger();
    let attrs = bindings.attrs;

    view! {
        <button
            type="button"
            class=merge_layout_class("ui-dialog-trigger", layout_class)
            id=attr_reader(attrs, "id")
            aria-haspopup=attr_reader(attrs, "aria-haspopup")
            aria-expanded=attr_reader(attrs, "aria-expanded")
            aria-controls=attr_reader(attrs, "aria-controls")
            data-state=attr_reader(attrs, "data-state")
            data-ui-primitive="true"
            data-ui-kind="dialog-trigger"
            on:click=move |ev| run_composed(on_click, &ev, |ev| bindings.on_click.call(ev.clone()))
        >
            {children()}
        </button>
    }
}

#[component]
/// Overlay and content, mounted only while open.
///
/// Escape inside the content and clicks on the overlay close the dialog; the matching caller
/// handlers run first and can veto with `prevent_default`. When no [`DialogTitle`] or
/// [`DialogDescription`] is rendered, visually hidden fallbacks keep the content labelled.
pub fn DialogContent(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = "Dialog")] fallback_title: &'static str,
    #[prop(default = "Dialog content")] fallback_description: &'static str,
    #[prop(optional)] on_escape_key_down: Option<Callback<KeyboardEvent>>,
    #[prop(optional)] on_overlay_click: Option<Callback<MouseEvent>>,
    children: ChildrenFn,
) -> impl IntoView {
    let DialogContext { scope } = use_dialog_context("DialogContent");
    let content_ref = create_node_ref::<html::Div>();
    let overlay = Signal::derive(move || {
        scope.read(|dialog| dialog.overlay_attrs().unwrap_or_default())
    });
    let attrs = Signal::derive(move || {
        scope.read(|dialog| dialog.content_attrs().unwrap_or_default())
    });
    let fallback_title_id =
        Signal::derive(move || scope.read(|dialog| dialog.fallback_title_id().map(str::to_owned)));
    let fallback_description_id = Signal::derive(move || {
        scope.read(|dialog| dialog.fallback_description_id().map(str::to_owned))
    });

    create_effect(move |_| {
        if let Some(content) = content_ref.get() {
            focus_html_element(&content);
        }
    });

    let handle_key_down = move |ev: KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        run_composed(on_escape_key_down, &ev, |ev| {
            if scope
                .dispatch(|dialog| dialog.content_key_down("Escape"))
                .is_some()
            {
                ev.prevent_default();
                ev.stop_propagation();
            }
        });
    };

    view! {
        <Show when=move || scope.read(|dialog| dialog.is_open()) fallback=|| ()>
            <div
                class="ui-dialog-overlay"
                data-state=attr_reader(overlay, "data-state")
                data-ui-primitive="true"
                data-ui-kind="dialog-overlay"
                on:click=move |ev| {
                    run_composed(on_overlay_click, &ev, |_| {
                        scope.dispatch(|dialog| dialog.overlay_click());
                    })
                }
            ></div>
            <div
                node_ref=content_ref
                class=merge_layout_class("ui-dialog-content", layout_class)
                id=attr_reader(attrs, "id")
                role=attr_reader(attrs, "role")
                aria-modal=attr_reader(attrs, "aria-modal")
                aria-labelledby=attr_reader(attrs, "aria-labelledby")
                aria-describedby=attr_reader(attrs, "aria-describedby")
                tabindex=attr_reader(attrs, "tabindex")
                data-state=attr_reader(attrs, "data-state")
                data-ui-primitive="true"
                data-ui-kind="dialog-content"
                on:keydown=handle_key_down
            >
                {move || {
                    fallback_title_id
                        .get()
                        .map(|id| view! { <h2 id=id style=VISUALLY_HIDDEN>{fallback_title}</h2> })
                }}
                {move || {
                    fallback_description_id
                        .get()
                        .map(|id| view! { <p id=id style=VISUALLY_HIDDEN>{fallback_description}</p> })
                }}
                {children()}
            </div>
        </Show>
    }
}

#[component]
/// Accessible title. Its id becomes the content's `aria-labelledby`.
pub fn DialogTitle(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    children: Children,
) -> impl IntoView {
    let DialogContext { scope } = use_dialog_context("DialogTitle");
    let id = scope.dispatch(|dialog| dialog.register_title(id));
    on_cleanup(move || {
        scope.try_dispatch(|dialog| dialog.unregister_title());
    });

    view! {
        <h2
            id=id
            class=merge_layout_class("ui-dialog-title", layout_class)
            data-ui-primitive="true"
            data-ui-kind="dialog-title"
        >
            {children()}
        </h2>
    }
}

#[component]
/// Accessible description. Its id becomes the content's `aria-describedby`.
pub fn DialogDescription(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    children: Children,
) -> impl IntoView {
    let DialogContext { scope } = use_dialog_context("DialogDescription");
    let id = scope.dispatch(|dialog| dialog.register_description(id));
    on_cleanup(move || {
        scope.try_dispatch(|dialog| dialog.unregister_description());
    });

    view! {
        <p
            id=id
            class=merge_layout_class("ui-dialog-description", layout_class)
            data-ui-primitive="true"
            data-ui-kind="dialog-description"
        >
            {children()}
        </p>
    }
}

#[component]
/// Button that closes the enclosing dialog.
pub fn DialogClose(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let DialogContext { scope } = use_dialog_context("DialogClose");

    view! {
        <button
            type="button"
            class=merge_layout_class("ui-dialog-close", layout_class)
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="dialog-close"
            on:click=move |ev| {
                run_composed(on_click, &ev, |_| {
                    scope.dispatch(|dialog| dialog.close(DialogCloseReason::CloseControl));
                })
            }
        >
            {children()}
        </button>
    }
}
