//! MetadataListController: view-model of the metadata list.
//!
//! Holds the fetched set, the pagination window, the create draft and the edit
//! buffer. Every state-changing action goes through the gateway and is followed
//! by a full reload; nothing is patched locally.
//!
//! Status changes and updates are two-step: the request operation returns a
//! [`ConfirmationRequest`] and only [`MetadataListController::resolve_confirmation`]
//! with `accepted = true` reaches the network.

use crate::{
    models::{
        edit::EditBuffer,
        metadata::{CreateMetadataRequest, MetadataRecord, MetadataUpdate},
        notice::{ConfirmationRequest, ConfirmationToken, Notice, Outcome},
        view_state::{self, ViewState},
    },
    services::metadata_gateway::{GatewayResult, MetadataApi},
};
use std::collections::HashMap;
use tracing::{error, info, warn};

pub const MSG_CREATE_EMPTY: &str = "No metadata URL was provided";
pub const MSG_CREATE_OK: &str = "Metadata added successfully";
pub const MSG_CREATE_FAILED: &str = "There was a problem adding the metadata";
pub const MSG_ACTIVATE_OK: &str = "Metadata activated successfully";
pub const MSG_DEACTIVATE_OK: &str = "Metadata deactivated successfully";
pub const MSG_UNCHANGED: &str = "No changes were made";
pub const MSG_PARSE_FAILED: &str = "There was a problem parsing the data";
pub const MSG_UPDATE_OK: &str = "Metadata updated successfully";
pub const MSG_UPDATE_FAILED: &str = "There was a problem updating the metadata";
pub const MSG_NOT_EDITING: &str = "No metadata is being edited";
pub const MSG_STALE_CONFIRMATION: &str = "That confirmation is no longer pending";

const CONFIRM_TITLE: &str = "Are you sure?";
const CANCEL_LABEL: &str = "Cancel";

/// Action parked behind a confirmation.
#[derive(Clone, Debug)]
enum PendingAction {
    Activate(i64),
    Deactivate(i64),
    Update(MetadataUpdate),
}

impl PendingAction {
    fn prompt(&self) -> (&'static str, &'static str) {
        match self {
            Self::Activate(_) => ("You are about to activate this metadata.", "Yes, activate"),
            Self::Deactivate(_) => (
                "You are about to deactivate this metadata.",
                "Yes, deactivate",
            ),
            Self::Update(_) => ("You are about to update this metadata.", "Yes, update"),
        }
    }
}

/// Every confirmation token should be resolved. Status-change tokens left open
/// are dropped by the next successful load; update tokens live until the edit
/// buffer they were built from is replaced or cancelled.
pub struct MetadataListController<G> {
    gateway: G,
    state: ViewState,
    edit: Option<EditBuffer>,
    pending: HashMap<ConfirmationToken, PendingAction>,
}

impl<G: MetadataApi> MetadataListController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: ViewState::default(),
            edit: None,
            pending: HashMap::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn visible(&self) -> &[MetadataRecord] {
        self.state.visible_slice()
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    fn update_state(&mut self, transition: impl FnOnce(ViewState) -> ViewState) {
        self.state = transition(std::mem::take(&mut self.state));
    }

    // ==================== Load cycle ====================

    /// Fetch the current set and return how many records arrived.
    ///
    /// A successful load drops any unresolved status-change confirmation. On
    /// failure the previous state stays as it was; the error is logged and
    /// handed back, but no notice is produced.
    pub async fn load(&mut self) -> GatewayResult<usize> {
        let set = self.state.set_label();
        let result = if self.state.showing_active_set {
            self.gateway.list_active().await
        } else {
            self.gateway.list_inactive().await
        };

        match result {
            Ok(records) => {
                let count = records.len();
                info!("loaded {} {} metadata records", count, set);
                self.update_state(|state| view_state::apply_loaded(state, records));
                self.drop_pending_status_changes();
                Ok(count)
            }
            Err(err) => {
                error!("loading {} metadata failed: {}", set, err);
                Err(err)
            }
        }
    }

    // ==================== Pagination ====================

    pub fn change_page(&mut self, page: usize) {
        self.update_state(|state| view_state::change_page(state, page));
    }

    pub fn next_page(&mut self) {
        self.update_state(view_state::next_page);
    }

    pub fn previous_page(&mut self) {
        self.update_state(view_state::previous_page);
    }

    pub async fn toggle_active_inactive(&mut self) -> GatewayResult<usize> {
        self.update_state(view_state::toggle_set);
        self.load().await
    }

    /// Reload after a successful mutation. A failed reload was already logged.
    async fn reload(&mut self) {
        let _ = self.load().await;
    }

    // ==================== Create ====================

    pub fn open_create_form(&mut self) {
        self.update_state(view_state::open_create_form);
    }

    pub fn set_create_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.update_state(|state| view_state::set_create_draft(state, url));
    }

    /// Send the draft URL to the analyzer. The draft survives a failure.
    pub async fn submit_create(&mut self) -> Outcome {
        let url = self.state.create_draft_url.trim().to_string();
        if url.is_empty() {
            return Outcome::notice(Notice::warning(MSG_CREATE_EMPTY));
        }

        let request = CreateMetadataRequest::for_url(url);
        match self.gateway.create(&request).await {
            Ok(_) => {
                info!("submitted {} for analysis", request.url);
                self.update_state(view_state::finish_create);
                self.reload().await;
                Outcome::notice(Notice::success(MSG_CREATE_OK))
            }
            Err(err) => {
                error!("adding metadata {} failed: {}", request.url, err);
                Outcome::notice(Notice::error(MSG_CREATE_FAILED))
            }
        }
    }

    // ==================== Status changes ====================

    pub fn request_activate(&mut self, id: i64) -> Outcome {
        Outcome::NeedsConfirmation(self.request_confirmation(PendingAction::Activate(id)))
    }

    pub fn request_deactivate(&mut self, id: i64) -> Outcome {
        Outcome::NeedsConfirmation(self.request_confirmation(PendingAction::Deactivate(id)))
    }

    async fn activate(&mut self, id: i64) -> Outcome {
        match self.gateway.activate(id).await {
            Ok(record) => {
                let status = record.map(|r| r.active).unwrap_or_default();
                info!("metadata {} activated (status {:?})", id, status);
                self.reload().await;
                Outcome::notice(Notice::success(MSG_ACTIVATE_OK))
            }
            Err(err) => {
                error!("activating metadata {} failed: {}", id, err);
                Outcome::silent()
            }
        }
    }

    async fn deactivate(&mut self, id: i64) -> Outcome {
        match self.gateway.deactivate(id).await {
            Ok(record) => {
                let status = record.map(|r| r.active).unwrap_or_default();
                info!("metadata {} deactivated (status {:?})", id, status);
                self.reload().await;
                Outcome::notice(Notice::success(MSG_DEACTIVATE_OK))
            }
            Err(err) => {
                error!("deactivating metadata {} failed: {}", id, err);
                Outcome::silent()
            }
        }
    }

    // ==================== Edit ====================

    /// Open the edit form for a record of the loaded set.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        let Some(record) = self.state.find(id) else {
            warn!("metadata {} is not in the loaded set", id);
            return false;
        };
        self.edit = Some(EditBuffer::begin(record));
        self.drop_pending_updates();
        self.update_state(|state| view_state::set_edit_form_open(state, true));
        true
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut()
    }

    /// Validate the edit buffer and ask for confirmation. Never touches the network.
    pub fn submit_edit(&mut self) -> Outcome {
        let Some(buffer) = self.edit.as_ref() else {
            return Outcome::notice(Notice::warning(MSG_NOT_EDITING));
        };
        if !buffer.has_changes() {
            return Outcome::notice(Notice::info(MSG_UNCHANGED));
        }

        let id = buffer.form.id;
        match buffer.to_update() {
            Ok(update) => {
                Outcome::NeedsConfirmation(self.request_confirmation(PendingAction::Update(update)))
            }
            Err(err) => {
                error!("metadata {} not submitted: {}", id, err);
                Outcome::notice(Notice::error(MSG_PARSE_FAILED))
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.drop_pending_updates();
        self.update_state(|state| view_state::set_edit_form_open(state, false));
    }

    async fn update(&mut self, update: MetadataUpdate) -> Outcome {
        match self.gateway.update(&update).await {
            Ok(_) => {
                info!("metadata {} updated", update.id);
                self.edit = None;
                self.update_state(|state| view_state::set_edit_form_open(state, false));
                self.reload().await;
                Outcome::notice(Notice::success(MSG_UPDATE_OK))
            }
            Err(err) => {
                error!("updating metadata {} failed: {}", update.id, err);
                Outcome::notice(Notice::error(MSG_UPDATE_FAILED))
            }
        }
    }

    fn drop_pending_status_changes(&mut self) {
        self.pending
            .retain(|_, action| matches!(action, PendingAction::Update(_)));
    }

    fn drop_pending_updates(&mut self) {
        self.pending
            .retain(|_, action| !matches!(action, PendingAction::Update(_)));
    }

    // ==================== Confirmations ====================

    fn request_confirmation(&mut self, action: PendingAction) -> ConfirmationRequest {
        let token = ConfirmationToken::new();
        let (text, confirm_label) = action.prompt();
        self.pending.insert(token, action);
        ConfirmationRequest {
            token,
            title: CONFIRM_TITLE.to_string(),
            text: text.to_string(),
            confirm_label: confirm_label.to_string(),
            cancel_label: CANCEL_LABEL.to_string(),
        }
    }

    /// Answer a confirmation. Each token can be resolved once.
    pub async fn resolve_confirmation(
        &mut self,
        token: ConfirmationToken,
        accepted: bool,
    ) -> Outcome {
        let Some(action) = self.pending.remove(&token) else {
            warn!("confirmation {} is not pending", token);
            return Outcome::notice(Notice::warning(MSG_STALE_CONFIRMATION));
        };
        if !accepted {
            return Outcome::silent();
        }

        match action {
            PendingAction::Activate(id) => self.activate(id).await,
            PendingAction::Deactivate(id) => self.deactivate(id).await,
            PendingAction::Update(update) => self.update(update).await,
        }
    }
}
