//! Choice Selector Component
//!
//! Row of toggle buttons for the new-item status and priority.

use leptos::prelude::*;

use crate::models::{ItemStatus, Priority};

pub const STATUS_CHOICES: &[ItemStatus] = &[ItemStatus::Idea, ItemStatus::PorComprar, ItemStatus::Comprado];

pub const PRIORITY_CHOICES: &[Priority] = &[Priority::Baja, Priority::Media, Priority::Alta];

/// A value that can be picked from a button row
pub trait Choice: Copy + PartialEq + Send + Sync + 'static {
    fn caption(&self) -> &'static str;
}

impl Choice for ItemStatus {
    fn caption(&self) -> &'static str {
        self.as_str()
    }
}

impl Choice for Priority {
    fn caption(&self) -> &'static str {
        self.label()
    }
}

/// Buttons for one value out of `choices`
#[component]
pub fn ChoiceSelector<T: Choice>(choices: &'static [T], current: RwSignal<T>) -> impl IntoView {
    view! {
        <div class="choice-selector">
            {choices.iter().copied().map(|choice| {
                view! {
                    <button
                        type="button"
                        class=move || if current.get() == choice { "choice-btn small active" } else { "choice-btn small" }
                        on:click=move |_| current.set(choice)
                    >
                        {choice.caption()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
