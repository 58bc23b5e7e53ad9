//! View State Controller
//!
//! Owns the application state, mediates every mutation through the
//! [`Gateway`] and tells the UI which regions changed. The server response
//! is always the source of truth: nothing is applied locally before a
//! confirmed round-trip.

#[cfg(test)]
mod fake_backend;

use std::cell::{Ref, RefCell};
use std::future::Future;
use std::rc::Rc;

use serde_json::Value;

use crate::commands::{ApiResponse, Gateway, GatewayError, ListQuery};
use crate::error::{Action, ClientError};
use crate::models::{Item, ItemPatch, ListDetail, ListFields, ListSummary, NewItem};
use crate::store::AppState;

/// Which part of the UI needs to be re-projected
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Sidebar, category options and home grid
    ListsChanged,
    /// Sidebar highlight only
    SelectionChanged,
    DetailChanged,
    /// A home-grid card's aggregate landed in the detail cache
    CardResolved(String),
    /// Search and category were cleared by the controller
    FiltersReset,
    /// A mutation went through but the reload after it did not
    FollowUpFailed(ClientError),
}

/// Receiver of change notifications; implemented by the rendering layer.
pub trait ViewSink {
    fn notify(&self, event: ViewEvent);
}

impl<F: Fn(ViewEvent)> ViewSink for F {
    fn notify(&self, event: ViewEvent) {
        self(event)
    }
}

/// Cheap to clone; clones share state, gateway and sink.
pub struct ListController<G> {
    gateway: Rc<G>,
    state: Rc<RefCell<AppState>>,
    sink: Rc<dyn ViewSink>,
}

impl<G> Clone for ListController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
            state: Rc::clone(&self.state),
            sink: Rc::clone(&self.sink),
        }
    }
}

impl<G: Gateway> ListController<G> {
    pub fn new(gateway: G, sink: impl ViewSink + 'static) -> Self {
        Self {
            gateway: Rc::new(gateway),
            state: Rc::new(RefCell::new(AppState::new())),
            sink: Rc::new(sink),
        }
    }

    /// Read-only view for projections.
    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.state.borrow().view.selected_list_id.clone()
    }

    fn require_selection(&self) -> Result<String, ClientError> {
        self.selected_id().ok_or(ClientError::NoSelection)
    }

    fn emit(&self, event: ViewEvent) {
        self.sink.notify(event);
    }

    fn is_loaded(&self, list_id: &str) -> bool {
        self.state.borrow().model.contains(list_id)
    }

    /// Reload step after a confirmed mutation. Its failure is reported
    /// through the sink and never turns the mutation into an error.
    async fn follow_up(&self, step: impl Future<Output = Result<(), ClientError>>) -> bool {
        match step.await {
            Ok(()) => true,
            Err(err) => {
                log::warn!("[controller] follow-up failed: {}", err);
                self.emit(ViewEvent::FollowUpFailed(err));
                false
            }
        }
    }

    // ========================
    // Filters
    // ========================

    pub fn set_search(&self, text: impl Into<String>) {
        self.state.borrow_mut().view.search = text.into();
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.state.borrow_mut().view.category = category.into();
    }

    pub async fn clear_search(&self) -> Result<(), ClientError> {
        self.set_search(String::new());
        self.refresh().await
    }

    // ========================
    // Lists
    // ========================

    /// Reload the list collection with the current filters.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let (generation, query) = {
            let mut state = self.state.borrow_mut();
            let generation = state.begin_refresh();
            let query = ListQuery::from_filters(&state.view.category, &state.view.search);
            (generation, query)
        };

        let result = self.gateway.list_lists(&query).await;
        if !self.state.borrow().is_current_refresh(generation) {
            log::debug!("[controller] discarding stale list response #{}", generation);
            return Ok(());
        }

        let response = result
            .map_err(|e| e.into_client_error(Action::LoadLists))?
            .require_ok(Action::LoadLists)?;
        let lists = decode_rows(response.data);
        log::info!("[controller] loaded {} lists", lists.len());

        let selection_cleared = self.state.borrow_mut().apply_lists(lists);
        if selection_cleared {
            log::debug!("[controller] selected list no longer loaded, clearing selection");
            self.emit(ViewEvent::DetailChanged);
        }
        self.emit(ViewEvent::ListsChanged);
        Ok(())
    }

    /// Select a list and load its full detail.
    ///
    /// The sidebar highlight moves before the request. A failed load empties
    /// the detail panel but keeps the selection. Ids outside the loaded
    /// collection are refused; if such an id is the current selection, the
    /// selection is cleared.
    pub async fn select(&self, list_id: &str) -> Result<(), ClientError> {
        let generation = {
            let mut state = self.state.borrow_mut();
            if !state.model.contains(list_id) {
                log::warn!("[controller] {} is not among the loaded lists", list_id);
                let was_selected = state.selected_id() == Some(list_id);
                if was_selected {
                    state.clear_selection();
                }
                drop(state);
                if was_selected {
                    self.emit(ViewEvent::SelectionChanged);
                    self.emit(ViewEvent::DetailChanged);
                }
                return Ok(());
            }
            state.view.selected_list_id = Some(list_id.to_string());
            state.begin_detail()
        };
        self.emit(ViewEvent::SelectionChanged);

        let result = self.fetch_detail(list_id).await;
        if !self.state.borrow().is_current_detail(generation) {
            log::debug!("[controller] discarding stale detail for {}", list_id);
            return Ok(());
        }

        match result {
            Ok(detail) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.view.detail = Some(detail.clone());
                    state.model.upsert_detail(detail);
                }
                self.emit(ViewEvent::DetailChanged);
                self.emit(ViewEvent::CardResolved(list_id.to_string()));
                Ok(())
            }
            Err(err) => {
                log::warn!("[controller] {}", err);
                self.state.borrow_mut().view.detail = None;
                self.emit(ViewEvent::DetailChanged);
                Err(err)
            }
        }
    }

    async fn fetch_detail(&self, list_id: &str) -> Result<ListDetail, ClientError> {
        self.gateway
            .get_list(list_id)
            .await
            .map_err(|e| e.into_client_error(Action::LoadList))?
            .decode(Action::LoadList)
    }

    /// Create a list, reload, and select it. Returns the new id.
    ///
    /// When the active filters hide the new list, they are cleared first so
    /// the selection never points outside the loaded collection.
    pub async fn create_list(&self, fields: &ListFields) -> Result<Option<String>, ClientError> {
        let payload = fields.to_payload()?;
        let created: ListSummary = self
            .gateway
            .create_list(&payload)
            .await
            .map_err(|e| e.into_client_error(Action::CreateList))?
            .decode(Action::CreateList)?;
        log::info!("[controller] created list {}", created.id);

        let refreshed = self.follow_up(self.refresh()).await;
        if created.id.is_empty() {
            return Ok(None);
        }
        if refreshed && !self.is_loaded(&created.id) && self.reset_filters() {
            log::info!("[controller] filters hide {}, clearing them", created.id);
            self.emit(ViewEvent::FiltersReset);
            self.follow_up(self.refresh()).await;
        }
        if self.is_loaded(&created.id) {
            self.follow_up(self.select(&created.id)).await;
        }
        Ok(Some(created.id))
    }

    /// Clear search and category; `false` if neither was set.
    fn reset_filters(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let had_filters = !state.view.search.trim().is_empty() || !state.view.category.trim().is_empty();
        state.view.search.clear();
        state.view.category.clear();
        had_filters
    }

    /// Fresh copy of the selected list's fields, for the edit form.
    pub async fn load_list_fields(&self) -> Result<ListFields, ClientError> {
        let list_id = self.require_selection()?;
        let detail = self.fetch_detail(&list_id).await?;
        Ok(ListFields::from(&detail.summary))
    }

    /// Full-replace update of the selected list.
    pub async fn update_list(&self, fields: &ListFields) -> Result<(), ClientError> {
        let list_id = self.require_selection()?;
        let payload = fields.to_payload()?;
        let updated: ListDetail = self
            .gateway
            .update_list(&list_id, &payload)
            .await
            .map_err(|e| e.into_client_error(Action::UpdateList))?
            .decode(Action::UpdateList)?;

        {
            let mut state = self.state.borrow_mut();
            if state.selected_id() == Some(list_id.as_str()) {
                state.begin_detail();
                state.view.detail = Some(updated.clone());
            }
            state.model.upsert_detail(updated);
        }
        self.emit(ViewEvent::DetailChanged);
        self.emit(ViewEvent::CardResolved(list_id));
        // Drops the selection if the new values fall outside the filters.
        self.follow_up(self.refresh()).await;
        Ok(())
    }

    /// Delete the selected list. Confirmation happens before this is called.
    pub async fn delete_list(&self) -> Result<(), ClientError> {
        let list_id = self.require_selection()?;
        self.gateway
            .delete_list(&list_id)
            .await
            .map_err(|e| e.into_client_error(Action::DeleteList))?
            .require_ok(Action::DeleteList)?;
        log::info!("[controller] deleted list {}", list_id);

        {
            let mut state = self.state.borrow_mut();
            state.clear_selection();
            state.model.evict_detail(&list_id);
        }
        self.emit(ViewEvent::SelectionChanged);
        self.emit(ViewEvent::DetailChanged);
        self.follow_up(self.refresh()).await;
        Ok(())
    }

    // ========================
    // Items
    // ========================

    pub async fn add_item(&self, item: &NewItem) -> Result<(), ClientError> {
        let list_id = self.require_selection()?;
        let payload = item.to_payload()?;
        self.gateway
            .add_item(&list_id, &payload)
            .await
            .map_err(|e| e.into_client_error(Action::AddItem))?
            .require_ok(Action::AddItem)?;
        self.follow_up(self.select(&list_id)).await;
        Ok(())
    }

    /// Set completion, then resync from the server whatever the outcome.
    pub async fn toggle_item_completion(&self, item_id: &str, checked: bool) -> Result<(), ClientError> {
        let list_id = self.require_selection()?;
        let result = self
            .gateway
            .set_item_completion(&list_id, item_id, checked)
            .await;
        self.resync_after(&list_id, Action::UpdateItem, result).await
    }

    /// Patch status / priority / assignee, then resync whatever the outcome.
    pub async fn patch_item_properties(&self, item_id: &str, patch: ItemPatch) -> Result<(), ClientError> {
        let list_id = self.require_selection()?;
        let patch = patch.normalized();
        let result = self.gateway.patch_item(&list_id, item_id, &patch).await;
        self.resync_after(&list_id, Action::UpdateItem, result).await
    }

    /// Advance the displayed item's status one step.
    pub async fn cycle_item_status(&self, item_id: &str) -> Result<(), ClientError> {
        let next = self.with_displayed_item(item_id, |item| item.status().next());
        match next {
            Some(status) => self.patch_item_properties(item_id, ItemPatch::status(status)).await,
            None => Ok(()),
        }
    }

    /// Advance the displayed item's priority one step.
    pub async fn cycle_item_priority(&self, item_id: &str) -> Result<(), ClientError> {
        let next = self.with_displayed_item(item_id, |item| item.priority().next());
        match next {
            Some(priority) => {
                self.patch_item_properties(item_id, ItemPatch::priority(priority))
                    .await
            }
            None => Ok(()),
        }
    }

    fn with_displayed_item<R>(&self, item_id: &str, f: impl FnOnce(&Item) -> R) -> Option<R> {
        let state = self.state.borrow();
        let item = state.view.detail.as_ref()?.item(item_id);
        if item.is_none() {
            log::warn!("[controller] item {} is not displayed", item_id);
        }
        item.map(f)
    }

    /// Delete an item; resync only on success.
    pub async fn remove_item(&self, item_id: &str) -> Result<(), ClientError> {
        let list_id = self.require_selection()?;
        self.gateway
            .delete_item(&list_id, item_id)
            .await
            .map_err(|e| e.into_client_error(Action::DeleteItem))?
            .require_ok(Action::DeleteItem)?;
        self.follow_up(self.select(&list_id)).await;
        Ok(())
    }

    async fn resync_after(
        &self,
        list_id: &str,
        action: Action,
        result: Result<ApiResponse, GatewayError>,
    ) -> Result<(), ClientError> {
        let outcome = result
            .map_err(|e| e.into_client_error(action))
            .and_then(|resp| resp.require_ok(action).map(|_| ()));
        if let Err(err) = &outcome {
            log::warn!("[controller] {}, resyncing {}", err, list_id);
        }
        let resync = self.select(list_id).await;
        // The mutation's own failure matters more than a failed resync.
        outcome.and(resync)
    }

    // ========================
    // Home grid cards
    // ========================

    /// Make sure a card's aggregate is in the detail cache.
    ///
    /// Fetches at most once per list; cached entries are reused until that
    /// list is fetched again.
    pub async fn resolve_card(&self, list_id: &str) -> Result<(), ClientError> {
        if !self.state.borrow_mut().claim_card(list_id) {
            return Ok(());
        }
        let result = self.fetch_detail(list_id).await;
        let mut state = self.state.borrow_mut();
        state.release_card(list_id);
        let detail = result?;
        if state.model.cached_detail(list_id).is_none() {
            state.model.upsert_detail(detail);
        }
        drop(state);
        self.emit(ViewEvent::CardResolved(list_id.to_string()));
        Ok(())
    }
}

/// Rows of a list query. A body that is not an array reads as "no lists";
/// rows that do not decode are skipped.
fn decode_rows(data: Option<Value>) -> Vec<ListSummary> {
    let Some(Value::Array(rows)) = data else {
        return Vec::new();
    };
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<ListSummary>(row) {
            Ok(list) => Some(list),
            Err(err) => {
                log::warn!("[controller] skipping malformed list row: {}", err);
                None
            }
        })
        .collect()
}
