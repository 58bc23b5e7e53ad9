//! In-memory backend used by the controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Notify;

use crate::commands::{ApiResponse, Gateway, GatewayError, GatewayResult, ListQuery};
use crate::models::{Item, ItemPatch, ListDetail, ListPayload, ListSummary, NewItemPayload};

#[derive(Default)]
pub struct FakeBackend {
    lists: RefCell<Vec<ListDetail>>,
    next_id: Cell<u32>,
    /// Answer the next mutating call with this status instead of applying it
    fail_next: Cell<Option<u16>>,
    /// Fail the next call at the transport level
    offline_next: Cell<bool>,
    /// Answer the next list query with this status; other calls are unaffected
    fail_next_query: Cell<Option<u16>>,
    /// Answer the next list query with this body verbatim
    raw_next_query: RefCell<Option<String>>,
    /// Park the next list query (after snapshotting its result) until notified
    hold_next_query: RefCell<Option<Rc<Notify>>>,
    /// Same, for the next single-list fetch
    hold_next_detail: RefCell<Option<Rc<Notify>>>,
    calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, titulo: &str, categoria: Option<&str>, items: &[(&str, bool)]) -> String {
        let id = self.fresh_id("l");
        let items = items
            .iter()
            .map(|(texto, completado)| Item {
                id: self.fresh_id("i"),
                texto: texto.to_string(),
                completado: *completado,
                integrante: None,
                estado: Some("Idea".into()),
                prioridad: Some(2),
            })
            .collect();
        self.lists.borrow_mut().push(ListDetail {
            summary: summary(&id, titulo, categoria),
            items,
        });
        id
    }

    pub fn set_item_status(&self, list_id: &str, item_id: &str, estado: &str) {
        let _ = self.item_mut(list_id, item_id, |item| item.estado = Some(estado.into()));
    }

    pub fn remove_behind_the_scenes(&self, list_id: &str) {
        self.lists.borrow_mut().retain(|l| l.summary.id != list_id);
    }

    pub fn fail_next(&self, status: u16) {
        self.fail_next.set(Some(status));
    }

    pub fn fail_next_query(&self, status: u16) {
        self.fail_next_query.set(Some(status));
    }

    pub fn reply_next_query(&self, body: &str) {
        *self.raw_next_query.borrow_mut() = Some(body.to_string());
    }

    pub fn go_offline_once(&self) {
        self.offline_next.set(true);
    }

    pub fn hold_next_query(&self) -> Rc<Notify> {
        let notify = Rc::new(Notify::new());
        *self.hold_next_query.borrow_mut() = Some(Rc::clone(&notify));
        notify
    }

    pub fn hold_next_detail(&self) -> Rc<Notify> {
        let notify = Rc::new(Notify::new());
        *self.hold_next_detail.borrow_mut() = Some(Rc::clone(&notify));
        notify
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn stored(&self, list_id: &str) -> Option<ListDetail> {
        self.lists
            .borrow()
            .iter()
            .find(|l| l.summary.id == list_id)
            .cloned()
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        format!("{}{}", prefix, next)
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn item_mut(&self, list_id: &str, item_id: &str, f: impl FnOnce(&mut Item)) -> Option<()> {
        let mut lists = self.lists.borrow_mut();
        let list = lists.iter_mut().find(|l| l.summary.id == list_id)?;
        let item = list.items.iter_mut().find(|i| i.id == item_id)?;
        f(item);
        Some(())
    }

    /// Transport failure or injected status, checked before applying a call.
    fn injected(&self) -> Option<GatewayResult> {
        if self.offline_next.replace(false) {
            return Some(Err(GatewayError::new("connection refused")));
        }
        self.fail_next.take().map(|status| {
            Ok(ApiResponse::from_parts(
                status,
                r#"{"error":"service_error","message":"injected failure"}"#,
            ))
        })
    }
}

fn summary(id: &str, titulo: &str, categoria: Option<&str>) -> ListSummary {
    ListSummary {
        id: id.to_string(),
        titulo: titulo.to_string(),
        categoria: categoria.map(str::to_string),
        fecha_objetivo: None,
        descripcion: None,
        creada_en: None,
        actualizada_en: None,
    }
}

fn json<T: Serialize>(status: u16, body: &T) -> GatewayResult {
    let text = serde_json::to_string(body).map_err(|e| GatewayError::new(e.to_string()))?;
    Ok(ApiResponse::from_parts(status, &text))
}

fn not_found() -> GatewayResult {
    Ok(ApiResponse::from_parts(
        404,
        r#"{"error":"not_found","message":"Lista no encontrada"}"#,
    ))
}

fn no_content() -> GatewayResult {
    Ok(ApiResponse::from_parts(204, ""))
}

#[async_trait(?Send)]
impl Gateway for FakeBackend {
    async fn list_lists(&self, query: &ListQuery) -> GatewayResult {
        self.record(format!(
            "GET /api/lists categoria={:?} q={:?}",
            query.categoria, query.q
        ));
        if let Some(injected) = self.injected() {
            return injected;
        }
        if let Some(status) = self.fail_next_query.take() {
            return Ok(ApiResponse::from_parts(
                status,
                r#"{"error":"service_error","message":"injected failure"}"#,
            ));
        }
        if let Some(body) = self.raw_next_query.borrow_mut().take() {
            return Ok(ApiResponse::from_parts(200, &body));
        }
        let needle = query.q.as_deref().map(str::to_lowercase);
        let snapshot: Vec<ListSummary> = self
            .lists
            .borrow()
            .iter()
            .map(|l| l.summary.clone())
            .filter(|s| match &query.categoria {
                Some(c) => s.categoria.as_deref() == Some(c.as_str()),
                None => true,
            })
            .filter(|s| match &needle {
                Some(n) => s.titulo.to_lowercase().contains(n),
                None => true,
            })
            .collect();

        let hold = self.hold_next_query.borrow_mut().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        json(200, &snapshot)
    }

    async fn create_list(&self, payload: &ListPayload) -> GatewayResult {
        self.record("POST /api/lists".into());
        if let Some(injected) = self.injected() {
            return injected;
        }
        let id = self.fresh_id("l");
        let mut created = summary(&id, &payload.titulo, payload.categoria.as_deref());
        created.fecha_objetivo = payload.fecha_objetivo.clone();
        created.descripcion = payload.descripcion.clone();
        self.lists.borrow_mut().push(ListDetail {
            summary: created.clone(),
            items: Vec::new(),
        });
        json(201, &created)
    }

    async fn get_list(&self, list_id: &str) -> GatewayResult {
        self.record(format!("GET /api/lists/{}", list_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        let snapshot = self.stored(list_id);
        let hold = self.hold_next_detail.borrow_mut().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        match snapshot {
            Some(detail) => json(200, &detail),
            None => not_found(),
        }
    }

    async fn update_list(&self, list_id: &str, payload: &ListPayload) -> GatewayResult {
        self.record(format!("PUT /api/lists/{}", list_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        let mut lists = self.lists.borrow_mut();
        let Some(list) = lists.iter_mut().find(|l| l.summary.id == list_id) else {
            return not_found();
        };
        list.summary.titulo = payload.titulo.clone();
        list.summary.categoria = payload.categoria.clone();
        list.summary.fecha_objetivo = payload.fecha_objetivo.clone();
        list.summary.descripcion = payload.descripcion.clone();
        json(200, &*list)
    }

    async fn delete_list(&self, list_id: &str) -> GatewayResult {
        self.record(format!("DELETE /api/lists/{}", list_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        self.remove_behind_the_scenes(list_id);
        no_content()
    }

    async fn list_items(&self, list_id: &str) -> GatewayResult {
        self.record(format!("GET /api/lists/{}/items", list_id));
        match self.stored(list_id) {
            Some(detail) => json(200, &detail.items),
            None => not_found(),
        }
    }

    async fn add_item(&self, list_id: &str, payload: &NewItemPayload) -> GatewayResult {
        self.record(format!("POST /api/lists/{}/items", list_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        let item = Item {
            id: self.fresh_id("i"),
            texto: payload.texto.clone(),
            completado: false,
            integrante: payload.integrante.clone(),
            estado: Some(payload.estado.clone()),
            prioridad: Some(payload.prioridad),
        };
        let mut lists = self.lists.borrow_mut();
        let Some(list) = lists.iter_mut().find(|l| l.summary.id == list_id) else {
            return not_found();
        };
        list.items.push(item.clone());
        json(201, &item)
    }

    async fn set_item_completion(&self, list_id: &str, item_id: &str, completado: bool) -> GatewayResult {
        self.record(format!("PATCH /api/lists/{}/items/{}", list_id, item_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        match self.item_mut(list_id, item_id, |item| item.completado = completado) {
            Some(()) => json(200, &serde_json::json!({ "id": item_id, "completado": completado })),
            None => not_found(),
        }
    }

    async fn patch_item(&self, list_id: &str, item_id: &str, patch: &ItemPatch) -> GatewayResult {
        self.record(format!("PATCH /api/lists/{}/items/{}/props", list_id, item_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        let applied = self.item_mut(list_id, item_id, |item| {
            if let Some(integrante) = &patch.integrante {
                item.integrante = Some(integrante.clone());
            }
            if let Some(estado) = &patch.estado {
                item.estado = Some(estado.clone());
            }
            if let Some(prioridad) = patch.prioridad {
                item.prioridad = Some(prioridad);
            }
        });
        match applied {
            Some(()) => json(200, &serde_json::json!({ "id": item_id })),
            None => not_found(),
        }
    }

    async fn delete_item(&self, list_id: &str, item_id: &str) -> GatewayResult {
        self.record(format!("DELETE /api/lists/{}/items/{}", list_id, item_id));
        if let Some(injected) = self.injected() {
            return injected;
        }
        let mut lists = self.lists.borrow_mut();
        let Some(list) = lists.iter_mut().find(|l| l.summary.id == list_id) else {
            return not_found();
        };
        list.items.retain(|i| i.id != item_id);
        no_content()
    }
}
