use leptos::prelude::*;

use crate::context::use_app_context;

/// Debounced search input; every instance mirrors the same text.
#[component]
pub fn SearchBox() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder="Buscar..."
                prop:value=move || ctx.search.get()
                on:input=move |ev| ctx.search_input(event_target_value(&ev))
            />
            <Show when=move || !ctx.search.with(String::is_empty)>
                <button type="button" class="clear-search-btn" on:click=move |_| ctx.clear_search()>"×"</button>
            </Show>
        </div>
    }
}
