//! Listly App
//!
//! Desktop layout: sidebar, home grid and detail panel in three columns.
//! The mobile drawer renders the same components.

use leptos::prelude::*;

use crate::components::{DetailPanel, HomeGrid, ListForm, ListSidebar, ToastHost};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::mobile::MobileBar;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    provide_context(ctx);

    // Initial load
    Effect::new(move |_| {
        log::info!("[app] loading lists");
        ctx.refresh();
    });

    view! {
        <div class=move || if ctx.drawer_open.get() { "app-layout drawer-open" } else { "app-layout" }>
            <MobileBar />

            <div class="sidebar-slot">
                <ListSidebar />
            </div>

            <main class="main-content">
                <HomeGrid />
            </main>

            <div class="detail-slot">
                <DetailPanel />
            </div>

            <ListForm />
            <ToastHost />
        </div>
    }
}
