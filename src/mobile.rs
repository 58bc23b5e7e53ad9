//! Mobile Bar
//!
//! On narrow screens the sidebar becomes a drawer. The drawer renders the
//! same `ListSidebar`, so both surfaces share one projection and one set of
//! handlers; selecting a list closes it.

use leptos::prelude::*;

use crate::components::SearchBox;
use crate::context::use_app_context;

#[component]
pub fn MobileBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="mobile-bar">
            <button
                type="button"
                class=move || if ctx.drawer_open.get() { "mobile-nav-item active" } else { "mobile-nav-item" }
                on:click=move |_| ctx.drawer_open.update(|open| *open = !*open)
            >
                <div class="mobile-nav-icon">"☰"</div>
                <div class="mobile-nav-label">"Listas"</div>
            </button>
            <SearchBox />
            <button type="button" class="mobile-nav-item" on:click=move |_| ctx.open_create_form()>
                <div class="mobile-nav-icon">"+"</div>
                <div class="mobile-nav-label">"Nueva"</div>
            </button>
        </nav>
        <Show when=move || ctx.drawer_open.get()>
            <div class="drawer-backdrop" on:click=move |_| ctx.drawer_open.set(false)></div>
        </Show>
    }
}
