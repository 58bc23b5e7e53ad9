//! List Form Component
//!
//! Create and edit share one form; `ctx.form` decides which is open.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, ListFormState, NoticeKind};
use crate::models::ListFields;

#[component]
pub fn ListForm() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        {move || ctx.form.get().map(|state| view! { <ListFormDialog state=state /> })}
    }
}

#[component]
fn ListFormDialog(state: ListFormState) -> impl IntoView {
    let ctx = use_app_context();

    let (editing, initial) = match state {
        ListFormState::Create => (false, ListFields::default()),
        ListFormState::Edit(fields) => (true, fields),
    };
    let titulo = RwSignal::new(initial.titulo);
    let categoria = RwSignal::new(initial.categoria);
    let fecha = RwSignal::new(initial.fecha_objetivo);
    let descripcion = RwSignal::new(initial.descripcion);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        let fields = ListFields {
            titulo: titulo.get(),
            categoria: categoria.get(),
            fecha_objetivo: fecha.get(),
            descripcion: descripcion.get(),
        };
        let controller = ctx.controller();
        set_saving.set(true);
        spawn_local(async move {
            let result = if editing {
                controller.update_list(&fields).await.map(|_| "Cambios guardados")
            } else {
                controller.create_list(&fields).await.map(|_| "Lista creada")
            };
            set_saving.set(false);
            match result {
                Ok(message) => {
                    ctx.form.set(None);
                    ctx.notify(message, NoticeKind::Success);
                }
                Err(err) => {
                    log::warn!("[ui] list form: {}", err);
                    set_error.set(Some(err.to_string()));
                }
            }
        });
    };

    let text_field = move |label: &'static str, value: RwSignal<String>, input_type: &'static str| {
        view! {
            <label class="form-field">
                <span>{label}</span>
                <input
                    type=input_type
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| ctx.form.set(None)>
            <form
                class="list-form"
                on:click=|ev| ev.stop_propagation()
                on:submit=submit
            >
                <h2>{if editing { "Editar lista" } else { "Nueva lista" }}</h2>
                {text_field("Título", titulo, "text")}
                {text_field("Categoría", categoria, "text")}
                {text_field("Fecha objetivo", fecha, "date")}
                <label class="form-field">
                    <span>"Descripción"</span>
                    <textarea
                        prop:value=move || descripcion.get()
                        on:input=move |ev| descripcion.set(event_target_value(&ev))
                    ></textarea>
                </label>
                {move || error.get().map(|msg| view! { <p class="inline-error">{msg}</p> })}
                <div class="form-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.form.set(None)>"Cancelar"</button>
                    <button type="submit" disabled=move || saving.get()>
                        {if editing { "Guardar" } else { "Crear" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
