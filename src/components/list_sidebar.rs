//! List Sidebar Component
//!
//! Filtered lists with the current selection highlighted.

use leptos::prelude::*;

use crate::components::{CategorySelect, SearchBox};
use crate::context::use_app_context;
use crate::projection::NO_LISTS;

#[component]
pub fn ListSidebar() -> impl IntoView {
    let ctx = use_app_context();
    let rows = Memo::new(move |_| ctx.sidebar());

    view! {
        <aside class="list-sidebar">
            <div class="sidebar-header">
                <h3>"Listas"</h3>
                <button class="add-list-btn" on:click=move |_| ctx.open_create_form()>"+"</button>
            </div>

            <SearchBox />
            <CategorySelect />

            <Show
                when=move || !rows.with(|r| r.is_empty())
                fallback=|| view! { <p class="sidebar-empty">{NO_LISTS}</p> }
            >
                <ul class="list-entries">
                    <For
                        each=move || rows.get()
                        key=|row| row.clone()
                        children=move |row| {
                            let id = row.id.clone();
                            view! {
                                <li
                                    class=if row.active { "list-entry active" } else { "list-entry" }
                                    on:click=move |_| ctx.select_list(id.clone())
                                >
                                    <span class="list-title">{row.titulo}</span>
                                    <span class="list-meta">
                                        {row.category_label}
                                        {row.date_suffix}
                                    </span>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </aside>
    }
}
