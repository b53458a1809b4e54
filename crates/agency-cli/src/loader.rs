//! Glue between the HTTP client and the controller.

use std::sync::Arc;

use agency_client::{AgencyClient, FetchError};
use agency_core::AgencyRecord;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::{Controller, LoadOutcome, LoadTicket};

pub type LoadResult = (LoadTicket, Result<Vec<AgencyRecord>, FetchError>);

/// Fetches on a background task and sends the tagged result to `tx`.
///
/// If the receiver is gone by the time the fetch finishes, the result is
/// dropped.
pub fn spawn_load(
    client: Arc<AgencyClient>,
    ticket: LoadTicket,
    tx: mpsc::Sender<LoadResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.fetch_agencies().await;
        if tx.send((ticket, result)).await.is_err() {
            tracing::debug!(?ticket, "receiver closed before agency load finished");
        }
    })
}

/// Runs one load to completion against `controller`.
pub async fn load_once(controller: &mut Controller, client: &AgencyClient) -> LoadOutcome {
    let ticket = controller.begin_load();
    let result = client.fetch_agencies().await;
    controller.apply_load(ticket, result)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
