//! Frontend Models
//!
//! Data structures matching the backend's JSON bodies, form inputs and the
//! per-item status/priority cycles.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Field};

/// Trim a free-text field; blank input becomes `None`.
pub fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// List as returned by `GET /api/lists` (no items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: String,
    pub titulo: String,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub fecha_objetivo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creada_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actualizada_en: Option<String>,
}

impl ListSummary {
    /// Category with blank values folded into `None`
    pub fn category(&self) -> Option<&str> {
        self.categoria
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn target_date(&self) -> Option<&str> {
        self.fecha_objetivo
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.descripcion
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// List as returned by `GET /api/lists/{id}` (with items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDetail {
    #[serde(flatten)]
    pub summary: ListSummary,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ListDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completado).count()
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// Checklist entry owned by a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub texto: String,
    #[serde(default)]
    pub completado: bool,
    #[serde(default)]
    pub integrante: Option<String>,
    /// Raw status as stored server-side; may be a legacy spelling
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub prioridad: Option<i64>,
}

impl Item {
    pub fn status(&self) -> ItemStatus {
        ItemStatus::from_loose(self.estado.as_deref().unwrap_or_default())
    }

    pub fn priority(&self) -> Priority {
        Priority::from_raw(self.prioridad)
    }

    pub fn assignee(&self) -> Option<&str> {
        self.integrante
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

// ========================
// Status / Priority cycles
// ========================

/// Procurement status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStatus {
    #[default]
    Idea,
    PorComprar,
    Comprado,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Idea => "Idea",
            ItemStatus::PorComprar => "Por comprar",
            ItemStatus::Comprado => "Comprado",
        }
    }

    /// Tolerates historical spellings: "COMPRADO", "por comprar", "pendiente por ver"...
    pub fn from_loose(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("comprado") {
            ItemStatus::Comprado
        } else if lower.contains("por") {
            ItemStatus::PorComprar
        } else {
            ItemStatus::Idea
        }
    }

    pub fn next(self) -> Self {
        match self {
            ItemStatus::Idea => ItemStatus::PorComprar,
            ItemStatus::PorComprar => ItemStatus::Comprado,
            ItemStatus::Comprado => ItemStatus::Idea,
        }
    }
}

/// Item priority, wire values 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Baja,
    #[default]
    Media,
    Alta,
}

impl Priority {
    /// Out-of-domain or missing values read as `Media`.
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(1) => Priority::Baja,
            Some(3) => Priority::Alta,
            _ => Priority::Media,
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Priority::Baja => 1,
            Priority::Media => 2,
            Priority::Alta => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Baja => "Baja",
            Priority::Media => "Media",
            Priority::Alta => "Alta",
        }
    }

    /// 1 -> 2 -> 3 -> 1
    pub fn next(self) -> Self {
        match self {
            Priority::Alta => Priority::Baja,
            Priority::Baja => Priority::Media,
            Priority::Media => Priority::Alta,
        }
    }
}

// ========================
// Form inputs
// ========================

/// Raw list form contents, as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFields {
    pub titulo: String,
    pub categoria: String,
    pub fecha_objetivo: String,
    pub descripcion: String,
}

impl ListFields {
    /// Normalize into a request body, rejecting a blank title.
    pub fn to_payload(&self) -> Result<ListPayload, ClientError> {
        let titulo = normalize_text(&self.titulo).ok_or(ClientError::Validation {
            field: Field::Title,
            message: "El título es obligatorio.",
        })?;
        Ok(ListPayload {
            titulo,
            categoria: normalize_text(&self.categoria),
            fecha_objetivo: normalize_text(&self.fecha_objetivo),
            descripcion: normalize_text(&self.descripcion),
        })
    }
}

impl From<&ListSummary> for ListFields {
    fn from(list: &ListSummary) -> Self {
        Self {
            titulo: list.titulo.clone(),
            categoria: list.categoria.clone().unwrap_or_default(),
            fecha_objetivo: list.fecha_objetivo.clone().unwrap_or_default(),
            descripcion: list.descripcion.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/lists` and `PUT /api/lists/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPayload {
    pub titulo: String,
    pub categoria: Option<String>,
    pub fecha_objetivo: Option<String>,
    pub descripcion: Option<String>,
}

/// New item form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    pub texto: String,
    pub integrante: String,
    pub estado: ItemStatus,
    pub prioridad: Priority,
}

impl NewItem {
    pub fn to_payload(&self) -> Result<NewItemPayload, ClientError> {
        let texto = normalize_text(&self.texto).ok_or(ClientError::Validation {
            field: Field::ItemText,
            message: "Escribe algo para agregar.",
        })?;
        Ok(NewItemPayload {
            texto,
            integrante: normalize_text(&self.integrante),
            estado: self.estado.as_str().to_string(),
            prioridad: self.prioridad.value(),
        })
    }
}

/// Body of `POST /api/lists/{id}/items`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItemPayload {
    pub texto: String,
    pub integrante: Option<String>,
    pub estado: String,
    pub prioridad: i64,
}

/// Body of `PATCH /api/lists/{id}/items/{itemId}/props`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrante: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridad: Option<i64>,
}

impl ItemPatch {
    pub fn status(status: ItemStatus) -> Self {
        Self {
            estado: Some(status.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            prioridad: Some(priority.value()),
            ..Default::default()
        }
    }

    /// Blank assignee strings are dropped from the patch.
    pub fn normalized(mut self) -> Self {
        self.integrante = self.integrante.as_deref().and_then(normalize_text);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   \t\n"), None);
        assert_eq!(normalize_text("  Cocina "), Some("Cocina".to_string()));
        assert_eq!(normalize_text("a b"), Some("a b".to_string()));
    }

    #[test]
    fn test_status_normalization() {
        assert_eq!(ItemStatus::from_loose("POR COMPRAR"), ItemStatus::PorComprar);
        assert_eq!(ItemStatus::from_loose("comprado"), ItemStatus::Comprado);
        assert_eq!(ItemStatus::from_loose("Ya Comprado"), ItemStatus::Comprado);
        assert_eq!(ItemStatus::from_loose(""), ItemStatus::Idea);
        assert_eq!(ItemStatus::from_loose("whatever"), ItemStatus::Idea);
    }

    #[test]
    fn test_status_is_a_three_cycle() {
        for raw in ["Idea", "POR COMPRAR", "comprado", "", "??"] {
            let start = ItemStatus::from_loose(raw);
            assert_eq!(start.next().next().next(), start, "raw = {raw:?}");
        }
        assert_eq!(ItemStatus::from_loose("POR COMPRAR").next(), ItemStatus::Comprado);
        assert_eq!(ItemStatus::Comprado.next(), ItemStatus::Idea);
    }

    #[test]
    fn test_priority_cycle() {
        assert_eq!(Priority::from_raw(Some(1)).next().value(), 2);
        assert_eq!(Priority::from_raw(Some(2)).next().value(), 3);
        assert_eq!(Priority::from_raw(Some(3)).next().value(), 1);
        // Out of domain defaults to Media before cycling
        assert_eq!(Priority::from_raw(Some(7)).next().value(), 3);
        assert_eq!(Priority::from_raw(Some(0)).next().value(), 3);
        assert_eq!(Priority::from_raw(None).next().value(), 3);
    }

    #[test]
    fn test_list_fields_validation() {
        let blank = ListFields {
            titulo: "   ".into(),
            ..Default::default()
        };
        assert!(matches!(
            blank.to_payload(),
            Err(ClientError::Validation { field: Field::Title, .. })
        ));

        let fields = ListFields {
            titulo: " Cocina ".into(),
            categoria: "  ".into(),
            fecha_objetivo: "2026-11-01".into(),
            descripcion: String::new(),
        };
        let payload = fields.to_payload().unwrap();
        assert_eq!(payload.titulo, "Cocina");
        assert_eq!(payload.categoria, None);
        assert_eq!(payload.fecha_objetivo.as_deref(), Some("2026-11-01"));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["fechaObjetivo"], "2026-11-01");
        assert!(json["categoria"].is_null());
    }

    #[test]
    fn test_item_patch_skips_absent_fields() {
        let json = serde_json::to_value(ItemPatch::priority(Priority::Alta)).unwrap();
        assert_eq!(json, serde_json::json!({ "prioridad": 3 }));

        let patch = ItemPatch {
            integrante: Some("  ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(serde_json::to_value(patch).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_detail_deserializes_with_items() {
        let detail: ListDetail = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "titulo": "Super",
            "categoria": "Supermercado",
            "fechaObjetivo": null,
            "items": [
                { "id": "i1", "texto": "Leche", "completado": true, "estado": "comprado", "prioridad": 1 },
                { "id": "i2", "texto": "Pan" }
            ]
        }))
        .unwrap();
        assert_eq!(detail.id(), "abc");
        assert_eq!(detail.completed_count(), 1);
        assert_eq!(detail.items[0].status(), ItemStatus::Comprado);
        assert_eq!(detail.items[1].status(), ItemStatus::Idea);
        assert_eq!(detail.items[1].priority(), Priority::Media);
    }
}
