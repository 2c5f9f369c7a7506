//! Channel-backed operation collector

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::warn;

use crate::planner::OperationSink;
use crate::webhook::WorkshopOperation;

/// Forwards operations to a consumer task in publication order
#[derive(Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<WorkshopOperation>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<WorkshopOperation>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl OperationSink for ChannelSink {
    fn add(&self, operation: WorkshopOperation) {
        if let Err(e) = self.tx.send(operation) {
            warn!(
                "Operation consumer is gone, dropping {} of '{}'",
                e.0.operation, e.0.folder_info.full_folder
            );
        }
    }
}
