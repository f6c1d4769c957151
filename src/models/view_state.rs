//! Serializable state of the metadata list view and the pure transitions over it.
//!
//! The controller owns one [`ViewState`] and only ever changes it through the
//! functions in this module, which keeps pagination and form toggles testable
//! without a gateway.

use crate::models::metadata::MetadataRecord;
use serde::{Deserialize, Serialize};

/// Records shown per page.
pub const PAGE_SIZE: usize = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Full set fetched by the last successful load.
    pub records: Vec<MetadataRecord>,

    /// `true` while the active set is shown, `false` for the inactive set.
    pub showing_active_set: bool,

    /// Current page, 1-based.
    pub page: usize,

    pub page_size: usize,

    pub create_form_open: bool,
    pub create_draft_url: String,
    pub edit_form_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            showing_active_set: true,
            page: 1,
            page_size: PAGE_SIZE,
            create_form_open: false,
            create_draft_url: String::new(),
            edit_form_open: false,
        }
    }
}

impl ViewState {
    /// `ceil(records / page_size)`; zero when nothing is loaded.
    pub fn total_pages(&self) -> usize {
        self.records.len().div_ceil(self.page_size.max(1))
    }

    /// Records on the current page.
    pub fn visible_slice(&self) -> &[MetadataRecord] {
        let size = self.page_size.max(1);
        let start = self
            .page
            .saturating_sub(1)
            .saturating_mul(size)
            .min(self.records.len());
        let end = start.saturating_add(size).min(self.records.len());
        &self.records[start..end]
    }

    pub fn find(&self, id: i64) -> Option<&MetadataRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Label of the set currently shown.
    pub fn set_label(&self) -> &'static str {
        if self.showing_active_set {
            "active"
        } else {
            "inactive"
        }
    }
}

/// Replace the record set after a successful load and go back to page 1.
pub fn apply_loaded(state: ViewState, records: Vec<MetadataRecord>) -> ViewState {
    ViewState {
        records,
        page: 1,
        ..state
    }
}

/// Move to `page`, clamped to the pages that exist.
pub fn change_page(state: ViewState, page: usize) -> ViewState {
    let last = state.total_pages().max(1);
    ViewState {
        page: page.clamp(1, last),
        ..state
    }
}

pub fn next_page(state: ViewState) -> ViewState {
    let page = state.page.saturating_add(1);
    change_page(state, page)
}

pub fn previous_page(state: ViewState) -> ViewState {
    let page = state.page.saturating_sub(1);
    change_page(state, page)
}

/// Flip between the active and inactive sets. The caller reloads afterwards.
pub fn toggle_set(state: ViewState) -> ViewState {
    ViewState {
        showing_active_set: !state.showing_active_set,
        page: 1,
        ..state
    }
}

pub fn open_create_form(state: ViewState) -> ViewState {
    ViewState {
        create_form_open: true,
        ..state
    }
}

pub fn set_create_draft(state: ViewState, url: impl Into<String>) -> ViewState {
    ViewState {
        create_draft_url: url.into(),
        ..state
    }
}

/// Clear the draft after the backend accepted it.
pub fn finish_create(state: ViewState) -> ViewState {
    ViewState {
        create_form_open: false,
        create_draft_url: String::new(),
        ..state
    }
}

pub fn set_edit_form_open(state: ViewState, open: bool) -> ViewState {
    ViewState {
        edit_form_open: open,
        ..state
    }
}
