//! In-memory gateway that records every call, for controller tests.

#![allow(dead_code)]

use metadata_console::{
    models::metadata::{
        CreateMetadataRequest, MetadataRecord, MetadataUpdate, STATUS_ACTIVE, STATUS_INACTIVE,
    },
    services::metadata_gateway::{GatewayError, GatewayResult, MetadataApi},
};
use std::{collections::HashSet, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListActive,
    ListInactive,
    Create(CreateMetadataRequest),
    Update(MetadataUpdate),
    Activate(i64),
    Deactivate(i64),
}

#[derive(Default)]
pub struct RecordingGateway {
    active: Mutex<Vec<MetadataRecord>>,
    inactive: Mutex<Vec<MetadataRecord>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl RecordingGateway {
    pub fn with_sets(active: Vec<MetadataRecord>, inactive: Vec<MetadataRecord>) -> Self {
        Self {
            active: Mutex::new(active),
            inactive: Mutex::new(inactive),
            ..Default::default()
        }
    }

    /// Make `operation` fail until [`RecordingGateway::recover`] is called.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn push_active(&self, record: MetadataRecord) {
        self.active.lock().unwrap().push(record);
    }

    fn record(&self, call: Call, operation: &'static str) -> GatewayResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(GatewayError { operation });
        }
        Ok(())
    }

    fn move_record(&self, id: i64, to_active: bool) -> MetadataRecord {
        let (from, to, status) = if to_active {
            (&self.inactive, &self.active, STATUS_ACTIVE)
        } else {
            (&self.active, &self.inactive, STATUS_INACTIVE)
        };
        let mut from = from.lock().unwrap();
        let mut record = match from.iter().position(|r| r.id == id) {
            Some(index) => from.remove(index),
            None => MetadataRecord {
                id,
                ..Default::default()
            },
        };
        record.active = status.to_string();
        to.lock().unwrap().push(record.clone());
        record
    }
}

impl MetadataApi for RecordingGateway {
    async fn list_active(&self) -> GatewayResult<Vec<MetadataRecord>> {
        self.record(Call::ListActive, "list_active")?;
        Ok(self.active.lock().unwrap().clone())
    }

    async fn list_inactive(&self) -> GatewayResult<Vec<MetadataRecord>> {
        self.record(Call::ListInactive, "list_inactive")?;
        Ok(self.inactive.lock().unwrap().clone())
    }

    async fn create(&self, request: &CreateMetadataRequest) -> GatewayResult<()> {
        self.record(Call::Create(request.clone()), "create")?;
        Ok(())
    }

    async fn update(&self, update: &MetadataUpdate) -> GatewayResult<MetadataRecord> {
        self.record(Call::Update(update.clone()), "update")?;
        let mut active = self.active.lock().unwrap();
        let record = MetadataRecord {
            id: update.id,
            title: update.title.clone(),
            publication_date: update.publication_date.clone(),
            image_url: update.image_url.clone(),
            feeds: serde_json::to_string(&update.feeds).unwrap(),
            authors: serde_json::to_string(&update.authors).unwrap(),
            active: update.active.clone(),
        };
        if let Some(slot) = active.iter_mut().find(|r| r.id == update.id) {
            *slot = record.clone();
        }
        Ok(record)
    }

    async fn activate(&self, id: i64) -> GatewayResult<Option<MetadataRecord>> {
        self.record(Call::Activate(id), "activate")?;
        Ok(Some(self.move_record(id, true)))
    }

    async fn deactivate(&self, id: i64) -> GatewayResult<Option<MetadataRecord>> {
        self.record(Call::Deactivate(id), "deactivate")?;
        Ok(Some(self.move_record(id, false)))
    }
}

pub fn record(id: i64, status: &str) -> MetadataRecord {
    MetadataRecord {
        id,
        title: format!("Article {}", id),
        publication_date: "2024-05-01T10:30:00".to_string(),
        image_url: format!("http://img/{}.png", id),
        feeds: r#"[{"link":"http://feeds.example.com/rss"}]"#.to_string(),
        authors: r#"[{"name":"Ann"},{"name":"Bo"}]"#.to_string(),
        active: status.to_string(),
    }
}

pub fn records(ids: std::ops::RangeInclusive<i64>, status: &str) -> Vec<MetadataRecord> {
    ids.map(|id| record(id, status)).collect()
}
