//! UI Components
//!
//! Leptos components shared by the desktop layout and the mobile drawer.

mod category_select;
mod choice_selector;
mod delete_confirm_button;
mod detail_panel;
mod home_grid;
mod item_row;
mod list_form;
mod list_sidebar;
mod new_item_form;
mod search_box;
mod toast_host;

pub use category_select::CategorySelect;
pub use choice_selector::{ChoiceSelector, PRIORITY_CHOICES, STATUS_CHOICES};
pub use delete_confirm_button::DeleteConfirmButton;
pub use detail_panel::DetailPanel;
pub use home_grid::HomeGrid;
pub use item_row::ItemRow;
pub use list_form::ListForm;
pub use list_sidebar::ListSidebar;
pub use new_item_form::NewItemForm;
pub use search_box::SearchBox;
pub use toast_host::ToastHost;
