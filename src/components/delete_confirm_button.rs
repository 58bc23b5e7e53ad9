//! Delete Confirm Button Component
//!
//! Inline two-step delete: the first click arms it, the second confirms.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows `label` initially. When clicked, shows "¿Eliminar?" with ✓/✗ buttons.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "×".to_string())] label: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (armed, set_armed) = signal(false);

    view! {
        <Show
            when=move || armed.get()
            fallback=move || {
                view! {
                    <button
                        type="button"
                        class=button_class.clone()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_armed.set(true);
                        }
                    >
                        {label.clone()}
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"¿Eliminar?"</span>
                <button
                    type="button"
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
