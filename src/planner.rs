//! Turns a push delivery into published workshop operations and resolves
//! the touched plan files.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{PlannerError, Result};
use crate::event::{EventDocument, build_event_document};
use crate::folder::FolderFileInfo;
use crate::webhook::{PushPayload, WorkshopOperation};
use crate::workshop::WorkshopsRoot;

/// Date format of the folders holding plan files
pub const DATE_FOLDER_FORMAT: &str = "%Y-%m-%d";

/// Append-only collector receiving every derived operation
pub trait OperationSink: Send + Sync {
    fn add(&self, operation: WorkshopOperation);
}

/// Reads the plan file behind a folder/file at a given git reference
#[async_trait]
pub trait WorkshopFileReader: Send + Sync {
    async fn fetch_workshop_data(
        &self,
        folder_info: &FolderFileInfo,
        reference: &str,
    ) -> Result<WorkshopsRoot>;
}

/// A plan file whose content still has to be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub folder_info: FolderFileInfo,
    pub reference: String,
}

#[derive(Debug)]
pub struct LookupResult {
    pub folder_info: FolderFileInfo,
    pub reference: String,
    pub outcome: Result<WorkshopsRoot>,
}

impl LookupResult {
    /// Event document for the date folder of a resolved plan file.
    /// Returns `None` when the lookup failed.
    pub fn event_document(&self) -> Option<Result<EventDocument>> {
        let root = self.outcome.as_ref().ok()?;
        Some(event_for_plan(&self.folder_info, root))
    }
}

/// Builds the event of a plan file, applying the pending-workshops fallback
/// when the plan has no workshops yet.
pub fn event_for_plan(folder_info: &FolderFileInfo, root: &WorkshopsRoot) -> Result<EventDocument> {
    let date = NaiveDate::parse_from_str(&folder_info.date_folder, DATE_FOLDER_FORMAT)
        .map_err(|_| PlannerError::InvalidDateFolder(folder_info.date_folder.clone()))?;

    let mut document = build_event_document(date, root.to_records()?);
    document.mark_workshops_pending();
    Ok(document)
}

pub struct PlanEvent {
    reader: Arc<dyn WorkshopFileReader>,
    fallback_ref: String,
}

impl PlanEvent {
    /// `fallback_ref` is used for commits that carry no id.
    pub fn new(reader: Arc<dyn WorkshopFileReader>, fallback_ref: impl Into<String>) -> Self {
        Self {
            reader,
            fallback_ref: fallback_ref.into(),
        }
    }

    /// Decodes `body` and hands every operation to `sink` as soon as it is
    /// derived. Decoding completes before the first publication, so a
    /// malformed body publishes nothing.
    pub fn publish(&self, body: &[u8], sink: &dyn OperationSink) -> Result<Vec<PendingLookup>> {
        let payload = PushPayload::from_slice(body)?;

        let mut pending = Vec::new();
        for (commit, operation) in payload.operations() {
            let reference = commit
                .id
                .clone()
                .unwrap_or_else(|| self.fallback_ref.clone());

            debug!(
                "Publishing {} operation for '{}' at {}",
                operation.operation, operation.folder_info.full_folder, reference
            );
            let folder_info = operation.folder_info.clone();
            sink.add(operation);

            pending.push(PendingLookup {
                folder_info,
                reference,
            });
        }

        info!(
            "Published {} operation(s) from {} commit(s)",
            pending.len(),
            payload.commits.len()
        );
        Ok(pending)
    }

    /// Runs all lookups concurrently. Results come back in the order of
    /// `pending`; a failed lookup is logged and does not affect the others.
    pub async fn resolve(&self, pending: Vec<PendingLookup>) -> Vec<LookupResult> {
        let lookups = pending.into_iter().map(|lookup| async move {
            let outcome = self
                .reader
                .fetch_workshop_data(&lookup.folder_info, &lookup.reference)
                .await;

            if let Err(e) = &outcome {
                error!(
                    "Lookup of '{}' at {} failed: {}",
                    lookup.folder_info.full_folder, lookup.reference, e
                );
            }

            LookupResult {
                folder_info: lookup.folder_info,
                reference: lookup.reference,
                outcome,
            }
        });

        join_all(lookups).await
    }

    /// Publishes the operations of one delivery, then resolves their plan files.
    pub async fn receive_from_github(
        &self,
        body: &[u8],
        sink: &dyn OperationSink,
    ) -> Result<Vec<LookupResult>> {
        let pending = self.publish(body, sink)?;
        Ok(self.resolve(pending).await)
    }
}
