//! Item Row Component
//!
//! One checklist entry in the detail panel.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::projection::ItemRowView;

#[component]
pub fn ItemRow(row: ItemRowView) -> impl IntoView {
    let ctx = use_app_context();
    let (editing_assignee, set_editing_assignee) = signal(false);

    let ItemRowView {
        id,
        texto,
        completado,
        assignee,
        avatar,
        status,
        priority,
    } = row;

    let toggle_id = id.clone();
    let status_id = id.clone();
    let priority_id = id.clone();
    let assignee_id = id.clone();
    let delete_id = id;
    let current_assignee = assignee.clone().unwrap_or_default();

    view! {
        <li class=if completado { "item-row completed" } else { "item-row" }>
            <input
                type="checkbox"
                checked=completado
                on:change=move |ev| ctx.toggle_item(toggle_id.clone(), event_target_checked(&ev))
            />

            <span class="item-text">{texto}</span>

            <Show
                when=move || editing_assignee.get()
                fallback={
                    let avatar = avatar.clone();
                    let assignee = assignee.clone();
                    move || {
                        view! {
                            <button
                                type="button"
                                class="avatar"
                                title=assignee.clone().unwrap_or_else(|| "Asignar".to_string())
                                on:click=move |_| set_editing_assignee.set(true)
                            >
                                {avatar.clone().unwrap_or_else(|| "+".to_string())}
                            </button>
                        }
                    }
                }
            >
                <input
                    type="text"
                    class="assignee-input"
                    placeholder="Integrante"
                    value=current_assignee.clone()
                    on:change={
                        let assignee_id = assignee_id.clone();
                        move |ev| {
                            set_editing_assignee.set(false);
                            ctx.set_assignee(assignee_id.clone(), event_target_value(&ev));
                        }
                    }
                    on:blur=move |_| set_editing_assignee.set(false)
                />
            </Show>

            <button
                type="button"
                class=format!("chip {}", status.class)
                on:click=move |_| ctx.cycle_status(status_id.clone())
            >
                {status.label}
            </button>
            <button
                type="button"
                class=format!("chip {}", priority.class)
                on:click=move |_| ctx.cycle_priority(priority_id.clone())
            >
                {priority.label}
            </button>

            <DeleteConfirmButton
                button_class="delete-btn"
                on_confirm=move |_| ctx.remove_item(delete_id.clone())
            />
        </li>
    }
}
