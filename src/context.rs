//! Application Context
//!
//! Shared handles provided via Leptos Context API. Components read
//! projections through it and turn DOM events into controller calls.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::HttpGateway;
use crate::config::ClientConfig;
use crate::controller::{ListController, ViewEvent};
use crate::debounce::Debouncer;
use crate::error::ClientError;
use crate::models::{ItemPatch, ListFields};
use crate::projection::{self, CategoryGroup, CategoryOptions, DetailView, SidebarRow};
use crate::store::AppState;

pub type Controller = ListController<HttpGateway>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Danger,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub kind: NoticeKind,
}

/// Which list form is open
#[derive(Debug, Clone, PartialEq)]
pub enum ListFormState {
    Create,
    Edit(ListFields),
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    controller: StoredValue<Controller, LocalStorage>,
    debouncer: StoredValue<Debouncer, LocalStorage>,
    config: StoredValue<ClientConfig>,
    next_notice: StoredValue<u64>,
    /// Bumped on ViewEvent::ListsChanged
    lists_version: ReadSignal<u32>,
    selection_version: ReadSignal<u32>,
    detail_version: ReadSignal<u32>,
    cards_version: ReadSignal<u32>,
    /// Search text mirrored into every search box
    pub search: RwSignal<String>,
    pub notices: RwSignal<Vec<Notice>>,
    pub form: RwSignal<Option<ListFormState>>,
    /// Mobile lists drawer
    pub drawer_open: RwSignal<bool>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let (lists_version, set_lists_version) = signal(0u32);
        let (selection_version, set_selection_version) = signal(0u32);
        let (detail_version, set_detail_version) = signal(0u32);
        let (cards_version, set_cards_version) = signal(0u32);
        let search = RwSignal::new(String::new());
        let debouncer = Debouncer::new();
        let (follow_up_error, set_follow_up_error) = signal::<Option<ClientError>>(None);

        let pending_search = debouncer.clone();
        let sink = move |event: ViewEvent| match event {
            ViewEvent::ListsChanged => set_lists_version.update(|v| *v += 1),
            ViewEvent::SelectionChanged => set_selection_version.update(|v| *v += 1),
            ViewEvent::DetailChanged => set_detail_version.update(|v| *v += 1),
            ViewEvent::CardResolved(_) => set_cards_version.update(|v| *v += 1),
            ViewEvent::FiltersReset => {
                pending_search.cancel();
                search.set(String::new());
            }
            ViewEvent::FollowUpFailed(err) => set_follow_up_error.set(Some(err)),
        };
        let controller = ListController::new(HttpGateway::new(config.api_base.clone()), sink);

        let ctx = Self {
            controller: StoredValue::new_local(controller),
            debouncer: StoredValue::new_local(debouncer),
            config: StoredValue::new(config),
            next_notice: StoredValue::new(0),
            lists_version,
            selection_version,
            detail_version,
            cards_version,
            search,
            notices: RwSignal::new(Vec::new()),
            form: RwSignal::new(None),
            drawer_open: RwSignal::new(false),
        };

        // Reload failures after a successful mutation surface as notices.
        Effect::new(move |_| {
            if let Some(err) = follow_up_error.get() {
                ctx.report(&err);
            }
        });
        ctx
    }

    pub fn controller(&self) -> Controller {
        self.controller.get_value()
    }

    fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.controller.with_value(|c| c.with_state(f))
    }

    // ========================
    // Projections (reactive)
    // ========================

    pub fn sidebar(&self) -> Vec<SidebarRow> {
        self.lists_version.track();
        self.selection_version.track();
        self.with_state(projection::sidebar)
    }

    pub fn category_options(&self) -> CategoryOptions {
        self.lists_version.track();
        self.with_state(projection::category_options)
    }

    pub fn home_grid(&self) -> Vec<CategoryGroup> {
        self.lists_version.track();
        self.selection_version.track();
        self.cards_version.track();
        self.with_state(projection::home_grid)
    }

    pub fn detail(&self) -> DetailView {
        self.detail_version.track();
        self.with_state(projection::detail)
    }

    pub fn has_selection(&self) -> bool {
        self.selection_version.track();
        self.detail_version.track();
        self.with_state(|s| s.selected_id().is_some())
    }

    // ========================
    // Notices
    // ========================

    pub fn notify(&self, text: impl Into<String>, kind: NoticeKind) {
        self.next_notice.update_value(|n| *n += 1);
        let id = self.next_notice.get_value();
        self.notices.update(|list| {
            list.push(Notice {
                id,
                text: text.into(),
                kind,
            })
        });
        let notices = self.notices;
        let ttl = self.config.with_value(|c| c.toast_ms);
        spawn_local(async move {
            TimeoutFuture::new(ttl).await;
            notices.update(|list| list.retain(|n| n.id != id));
        });
    }

    pub fn report(&self, err: &ClientError) {
        log::warn!("[ui] {}", err);
        self.notify(err.to_string(), NoticeKind::Danger);
    }

    /// Run a controller operation in the background; failures become notices.
    pub fn spawn<F, Fut>(&self, op: F, success: Option<&'static str>)
    where
        F: FnOnce(Controller) -> Fut + 'static,
        Fut: Future<Output = Result<(), ClientError>> + 'static,
    {
        let ctx = *self;
        let fut = op(self.controller());
        spawn_local(async move {
            match fut.await {
                Ok(()) => {
                    if let Some(text) = success {
                        ctx.notify(text, NoticeKind::Success);
                    }
                }
                Err(err) => ctx.report(&err),
            }
        });
    }

    // ========================
    // Event bindings
    // ========================

    pub fn refresh(&self) {
        self.spawn(|c| async move { c.refresh().await }, None);
    }

    pub fn select_list(&self, list_id: String) {
        self.drawer_open.set(false);
        self.spawn(move |c| async move { c.select(&list_id).await }, None);
    }

    /// Keystroke in any search box; refresh fires after the quiet window.
    pub fn search_input(&self, text: String) {
        self.search.set(text.clone());
        self.controller().set_search(text);
        let debouncer = self.debouncer.get_value();
        let ticket = debouncer.ticket();
        let wait = self.config.with_value(|c| c.search_debounce_ms);
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(wait).await;
            if debouncer.is_latest(ticket) {
                ctx.refresh();
            }
        });
    }

    pub fn clear_search(&self) {
        self.search.set(String::new());
        self.debouncer.with_value(Debouncer::cancel);
        self.spawn(|c| async move { c.clear_search().await }, None);
    }

    pub fn choose_category(&self, category: String) {
        self.controller().set_category(category);
        self.refresh();
    }

    pub fn delete_list(&self) {
        self.form.set(None);
        self.spawn(|c| async move { c.delete_list().await }, Some("Lista eliminada"));
    }

    pub fn open_create_form(&self) {
        self.form.set(Some(ListFormState::Create));
    }

    /// Prefill the edit form from a fresh copy of the selected list.
    pub fn open_edit_form(&self) {
        let form = self.form;
        self.spawn(
            move |c| async move {
                let fields = c.load_list_fields().await?;
                form.set(Some(ListFormState::Edit(fields)));
                Ok(())
            },
            None,
        );
    }

    pub fn toggle_item(&self, item_id: String, checked: bool) {
        self.spawn(
            move |c| async move { c.toggle_item_completion(&item_id, checked).await },
            None,
        );
    }

    pub fn cycle_status(&self, item_id: String) {
        self.spawn(move |c| async move { c.cycle_item_status(&item_id).await }, None);
    }

    pub fn cycle_priority(&self, item_id: String) {
        self.spawn(move |c| async move { c.cycle_item_priority(&item_id).await }, None);
    }

    pub fn set_assignee(&self, item_id: String, name: String) {
        let patch = ItemPatch {
            integrante: Some(name),
            ..Default::default()
        };
        self.spawn(
            move |c| async move { c.patch_item_properties(&item_id, patch.normalized()).await },
            None,
        );
    }

    pub fn remove_item(&self, item_id: String) {
        self.spawn(move |c| async move { c.remove_item(&item_id).await }, None);
    }

    /// Home-grid card needs its aggregate.
    pub fn resolve_card(&self, list_id: String) {
        let controller = self.controller();
        spawn_local(async move {
            if let Err(err) = controller.resolve_card(&list_id).await {
                log::warn!("[ui] card {}: {}", list_id, err);
            }
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
