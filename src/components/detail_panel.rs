//! Detail Panel Component
//!
//! Header, new-item form and item rows for the selected list.

use leptos::prelude::*;

use crate::components::{DeleteConfirmButton, ItemRow, NewItemForm};
use crate::context::use_app_context;
use crate::projection::{DetailPanel as Panel, DetailView};

#[component]
pub fn DetailPanel() -> impl IntoView {
    let ctx = use_app_context();
    let panel = Memo::new(move |_| match ctx.detail() {
        DetailView::Loaded(panel) => Some(panel),
        DetailView::Empty => None,
    });

    view! {
        <section class="detail-panel">
            <Show
                when=move || panel.with(Option::is_some)
                fallback=|| view! { <div class="detail-empty">"Selecciona una lista para ver sus ítems."</div> }
            >
                {move || panel.get().map(|p| view! { <DetailHeader panel=p /> })}
                <NewItemForm />
                {move || panel.get().map(|p| view! { <ItemList panel=p /> })}
            </Show>
        </section>
    }
}

#[component]
fn DetailHeader(panel: Panel) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <header class="detail-header">
            <div class="detail-heading">
                <h2>{panel.titulo}</h2>
                <span class="detail-category">{panel.category_label}</span>
            </div>
            <p class="detail-meta">
                <span class="detail-date">{panel.date_line}</span>
                " "
                <span class="detail-description">{panel.description_line}</span>
            </p>
            <div class="detail-actions">
                <button type="button" class="edit-list-btn" on:click=move |_| ctx.open_edit_form()>"Editar"</button>
                <DeleteConfirmButton
                    button_class="delete-list-btn"
                    label="Eliminar"
                    on_confirm=move |_| ctx.delete_list()
                />
            </div>
        </header>
    }
}

#[component]
fn ItemList(panel: Panel) -> impl IntoView {
    view! {
        <p class="item-count">{panel.count_line}</p>
        {match panel.empty_message {
            Some(message) => view! { <p class="items-empty">{message}</p> }.into_any(),
            None => view! {
                <ul class="item-list">
                    {panel.items.into_iter().map(|row| view! { <ItemRow row=row /> }).collect_view()}
                </ul>
            }.into_any(),
        }}
    }
}
