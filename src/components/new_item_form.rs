//! New Item Form Component
//!
//! Adds an item to the selected list, with status and priority selectors.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ChoiceSelector, PRIORITY_CHOICES, STATUS_CHOICES};
use crate::context::use_app_context;
use crate::models::{ItemStatus, NewItem, Priority};

#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());
    let (assignee, set_assignee) = signal(String::new());
    let status = RwSignal::new(ItemStatus::default());
    let priority = RwSignal::new(Priority::default());
    let (inline_error, set_inline_error) = signal::<Option<String>>(None);

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let item = NewItem {
            texto: new_text.get(),
            integrante: assignee.get(),
            estado: status.get(),
            prioridad: priority.get(),
        };
        let controller = ctx.controller();
        spawn_local(async move {
            match controller.add_item(&item).await {
                Ok(()) => {
                    set_inline_error.set(None);
                    set_new_text.set(String::new());
                    set_assignee.set(String::new());
                    status.set(ItemStatus::default());
                    priority.set(Priority::default());
                }
                Err(err) if err.is_inline() => set_inline_error.set(Some(err.to_string())),
                Err(err) => ctx.report(&err),
            }
        });
    };

    view! {
        <form class="new-item-form" on:submit=add_item>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="Nuevo ítem..."
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    class="assignee-input"
                    placeholder="Integrante"
                    prop:value=move || assignee.get()
                    on:input=move |ev| set_assignee.set(event_target_value(&ev))
                />
                <button type="submit">"Agregar"</button>
            </div>

            <div class="choice-row">
                <ChoiceSelector choices=STATUS_CHOICES current=status />
                <ChoiceSelector choices=PRIORITY_CHOICES current=priority />
            </div>

            {move || inline_error.get().map(|msg| view! { <p class="inline-error">{msg}</p> })}
        </form>
    }
}
