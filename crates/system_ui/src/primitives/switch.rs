use leptos::*;
use ui_primitives_headless::{SwitchMachine, SWITCH_ROOT};

use super::{
    attr_reader, bool_token, control_props, flag_reader, merge_layout_class, sync_controlled,
    PrimitiveScope,
};

#[component]
/// Shared on/off switch.
///
/// Pass `checked` to control it; otherwise it starts at `default_checked`. Disabled switches
/// ignore clicks and keys without calling `on_checked_change`.
pub fn Switch(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: MaybeSignal<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] checked: Option<MaybeSignal<bool>>,
    #[prop(optional)] default_checked: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_checked_change: Option<Callback<bool>>,
) -> impl IntoView {
    let machine = SwitchMachine::new(
        control_props(checked, Some(default_checked), on_checked_change),
        disabled.get_untracked(),
    );
    let scope = PrimitiveScope::new(SWITCH_ROOT, machine);
    sync_controlled(scope, checked, SWITCH_ROOT, SwitchMachine::sync);
    create_effect(move |_| {
        let disabled = disabled.get();
        scope.dispatch(|switch| switch.set_disabled(disabled));
    });
    let attrs = Signal::derive(move || scope.read(|switch| switch.attrs()));

    view! {
        <button
            type="button"
            class=merge_layout_class("ui-switch", layout_class)
            role=attr_reader(attrs, "role")
            aria-label=move || aria_label.get()
            aria-checked=attr_reader(attrs, "aria-checked")
            disabled=move || disabled.get()
            data-state=attr_reader(attrs, "data-state")
            data-disabled=attr_reader(attrs, "data-disabled")
            data-ui-primitive="true"
            data-ui-kind="switch"
            data-ui-slot=ui_slot
            data-ui-selected=move || bool_token(scope.read(|switch| switch.is_checked()))
            data-ui-disabled=move || bool_token(flag_reader(attrs, "data-disabled")())
            on:click=move |_| {
                scope.dispatch(|switch| switch.toggle());
            }
            on:keydown=move |ev| {
                let key = ev.key();
                if matches!(key.as_str(), " " | "Enter") {
                    ev.prevent_default();
                    scope.dispatch(|switch| switch.key_down(&key));
                }
            }
        >
            <span data-ui-slot="track">
                <span data-ui-slot="thumb"></span>
            </span>
        </button>
    }
}
