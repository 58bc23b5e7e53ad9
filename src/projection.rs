//! Render Projections
//!
//! Pure functions from [`AppState`] to the view-models the components draw.
//! Desktop and mobile surfaces consume the same output.

use std::collections::HashMap;

use crate::models::{Item, ItemStatus, ListDetail, ListSummary, Priority};
use crate::store::AppState;

pub const GENERAL: &str = "General";
pub const ALL_CATEGORIES_LABEL: &str = "Todas las categorías";
pub const NO_LISTS: &str = "No hay listas todavía.";
pub const NO_ITEMS: &str = "No hay ítems. Agrega el primero arriba.";

/// Home grid group order: first keyword contained in the category wins.
/// Unmatched categories follow, sorted lexically.
pub const KNOWN_CATEGORY_KEYWORDS: &[&str] = &[
    "super", "cocina", "hogar", "limpieza", "baño", "farmacia", "regalo", "viaje", "general",
];

const CARD_PREVIEW_ITEMS: usize = 2;

fn category_label(list: &ListSummary) -> String {
    list.category().unwrap_or(GENERAL).to_string()
}

// ========================
// Sidebar
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SidebarRow {
    pub id: String,
    pub titulo: String,
    pub category_label: String,
    /// `" · <date>"` when the list has a target date
    pub date_suffix: Option<String>,
    pub active: bool,
}

pub fn sidebar(state: &AppState) -> Vec<SidebarRow> {
    let selected = state.selected_id();
    state
        .model
        .lists()
        .iter()
        .map(|list| SidebarRow {
            id: list.id.clone(),
            titulo: list.titulo.clone(),
            category_label: category_label(list),
            date_suffix: list.target_date().map(|d| format!(" · {}", d)),
            active: selected == Some(list.id.as_str()),
        })
        .collect()
}

// ========================
// Category filter
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOption {
    /// Empty for the synthetic "all" entry
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOptions {
    pub options: Vec<CategoryOption>,
    pub selected: String,
}

pub fn category_options(state: &AppState) -> CategoryOptions {
    let categories = state.model.categories();
    let current = &state.view.category;
    let selected = if categories.iter().any(|c| c == current) {
        current.clone()
    } else {
        String::new()
    };

    let mut options = Vec::with_capacity(categories.len() + 1);
    options.push(CategoryOption {
        value: String::new(),
        label: ALL_CATEGORIES_LABEL.to_string(),
    });
    options.extend(categories.into_iter().map(|c| CategoryOption {
        value: c.clone(),
        label: c,
    }));
    CategoryOptions { options, selected }
}

// ========================
// Chips
// ========================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chip {
    pub label: &'static str,
    pub class: &'static str,
}

pub fn status_chip(status: ItemStatus) -> Chip {
    let class = match status {
        ItemStatus::Idea => "chip chip-idea",
        ItemStatus::PorComprar => "chip chip-pending",
        ItemStatus::Comprado => "chip chip-done",
    };
    Chip {
        label: status.as_str(),
        class,
    }
}

pub fn priority_chip(priority: Priority) -> Chip {
    let class = match priority {
        Priority::Baja => "chip chip-low",
        Priority::Media => "chip chip-medium",
        Priority::Alta => "chip chip-high",
    };
    Chip {
        label: priority.label(),
        class,
    }
}

// ========================
// Home grid
// ========================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardAggregate {
    pub done: usize,
    pub total: usize,
}

impl CardAggregate {
    pub fn from_detail(detail: &ListDetail) -> Self {
        Self {
            done: detail.completed_count(),
            total: detail.items.len(),
        }
    }

    /// Rounded completion percentage; an empty list is 0%.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.done as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.done, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewItem {
    pub texto: String,
    pub completado: bool,
    pub status: Chip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub titulo: String,
    pub date_suffix: Option<String>,
    /// `None` until the detail cache has this list
    pub aggregate: Option<CardAggregate>,
    pub preview: Vec<PreviewItem>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub label: String,
    pub cards: Vec<CardView>,
}

/// Position of a category in the group order
pub fn category_rank(category: &str) -> usize {
    let lower = category.to_lowercase();
    KNOWN_CATEGORY_KEYWORDS
        .iter()
        .position(|keyword| lower.contains(keyword))
        .unwrap_or(KNOWN_CATEGORY_KEYWORDS.len())
}

fn card(state: &AppState, list: &ListSummary) -> CardView {
    let cached = state.model.cached_detail(&list.id);
    CardView {
        id: list.id.clone(),
        titulo: list.titulo.clone(),
        date_suffix: list.target_date().map(|d| format!(" · {}", d)),
        aggregate: cached.map(CardAggregate::from_detail),
        preview: cached
            .map(|detail| {
                detail
                    .items
                    .iter()
                    .take(CARD_PREVIEW_ITEMS)
                    .map(preview_item)
                    .collect()
            })
            .unwrap_or_default(),
        active: state.selected_id() == Some(list.id.as_str()),
    }
}

fn preview_item(item: &Item) -> PreviewItem {
    PreviewItem {
        texto: item.texto.clone(),
        completado: item.completado,
        status: status_chip(item.status()),
    }
}

pub fn home_grid(state: &AppState) -> Vec<CategoryGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<CardView>> = HashMap::new();
    for list in state.model.lists() {
        let label = category_label(list);
        if !groups.contains_key(&label) {
            order.push(label.clone());
        }
        groups.entry(label).or_default().push(card(state, list));
    }

    order.sort_by(|a, b| category_rank(a).cmp(&category_rank(b)).then_with(|| a.cmp(b)));
    order
        .into_iter()
        .map(|label| {
            let cards = groups.remove(&label).unwrap_or_default();
            CategoryGroup { label, cards }
        })
        .collect()
}

// ========================
// Detail panel
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRowView {
    pub id: String,
    pub texto: String,
    pub completado: bool,
    pub assignee: Option<String>,
    /// Uppercased first letter of the assignee
    pub avatar: Option<String>,
    pub status: Chip,
    pub priority: Chip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub id: String,
    pub titulo: String,
    pub category_label: String,
    /// `"Objetivo: <date>"` or empty
    pub date_line: String,
    /// `"· <description>"` or empty
    pub description_line: String,
    pub items: Vec<ItemRowView>,
    pub count_line: String,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Empty,
    Loaded(DetailPanel),
}

fn item_row(item: &Item) -> ItemRowView {
    let assignee = item.assignee().map(str::to_string);
    let avatar: Option<String> = assignee
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|c| c.to_uppercase().collect());
    ItemRowView {
        id: item.id.clone(),
        texto: item.texto.clone(),
        completado: item.completado,
        assignee,
        avatar,
        status: status_chip(item.status()),
        priority: priority_chip(item.priority()),
    }
}

pub fn detail(state: &AppState) -> DetailView {
    let Some(detail) = state.view.detail.as_ref() else {
        return DetailView::Empty;
    };
    let list = &detail.summary;
    let items: Vec<ItemRowView> = detail.items.iter().map(item_row).collect();
    DetailView::Loaded(DetailPanel {
        id: list.id.clone(),
        titulo: list.titulo.clone(),
        category_label: category_label(list),
        date_line: list
            .target_date()
            .map(|d| format!("Objetivo: {}", d))
            .unwrap_or_default(),
        description_line: list
            .description()
            .map(|d| format!("· {}", d))
            .unwrap_or_default(),
        count_line: format!(
            "{} total · {} completados",
            items.len(),
            detail.completed_count()
        ),
        empty_message: items.is_empty().then_some(NO_ITEMS),
        items,
    })
}
