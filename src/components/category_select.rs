use leptos::prelude::*;

use crate::context::use_app_context;

/// Category filter built from the currently loaded lists.
#[component]
pub fn CategorySelect() -> impl IntoView {
    let ctx = use_app_context();
    let options = Memo::new(move |_| ctx.category_options());

    view! {
        <select
            class="category-select"
            prop:value=move || options.with(|o| o.selected.clone())
            on:change=move |ev| ctx.choose_category(event_target_value(&ev))
        >
            {move || {
                let current = options.with(|o| o.selected.clone());
                options
                    .get()
                    .options
                    .into_iter()
                    .map(|opt| {
                        let selected = opt.value == current;
                        view! { <option value=opt.value selected=selected>{opt.label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}
