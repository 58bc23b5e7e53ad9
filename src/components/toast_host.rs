use leptos::prelude::*;

use crate::context::{use_app_context, NoticeKind};

/// Stack of transient notices; each one removes itself after `toast_ms`.
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-host">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let class = match notice.kind {
                        NoticeKind::Success => "toast success",
                        NoticeKind::Danger => "toast danger",
                    };
                    view! { <div class=class>{notice.text}</div> }
                }
            />
        </div>
    }
}
