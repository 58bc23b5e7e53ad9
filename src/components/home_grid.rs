//! Home Grid Component
//!
//! Lists grouped by category. Each card fills in its own completion
//! aggregate the first time it is shown.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::projection::{CardView, CategoryGroup};

#[component]
pub fn HomeGrid() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <section class="home-grid">
            {move || {
                ctx.home_grid()
                    .into_iter()
                    .map(|group| view! { <CategorySection group=group /> })
                    .collect_view()
            }}
        </section>
    }
}

#[component]
fn CategorySection(group: CategoryGroup) -> impl IntoView {
    view! {
        <div class="category-group">
            <h2 class="category-title">{group.label}</h2>
            <div class="card-row">
                {group.cards.into_iter().map(|card| view! { <ListCard card=card /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ListCard(card: CardView) -> impl IntoView {
    let ctx = use_app_context();

    if card.aggregate.is_none() {
        ctx.resolve_card(card.id.clone());
    }

    let id = card.id.clone();
    let progress = card.aggregate.map(|agg| {
        view! {
            <div class="card-progress">
                <div class="progress-bar">
                    <div class="progress-fill" style=format!("width: {}%", agg.percent())></div>
                </div>
                <span class="progress-label">{agg.label()}</span>
            </div>
        }
    });

    view! {
        <div
            class=if card.active { "list-card active" } else { "list-card" }
            on:click=move |_| ctx.select_list(id.clone())
        >
            <h3 class="card-title">
                {card.titulo}
                <span class="card-date">{card.date_suffix}</span>
            </h3>
            {progress}
            <ul class="card-preview">
                {card.preview.into_iter().map(|item| view! {
                    <li class=if item.completado { "preview-item completed" } else { "preview-item" }>
                        <span class="preview-text">{item.texto}</span>
                        <span class=format!("chip small {}", item.status.class)>{item.status.label}</span>
                    </li>
                }).collect_view()}
            </ul>
        </div>
    }
}
