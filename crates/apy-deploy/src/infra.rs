//! The artifacts server publishes the address books of shared deployments so
//! that scripts run elsewhere can layer them under their local book.
use std::time::Duration;

use apy_addresses::AddressBook;
use eyre::{eyre, Result};
use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::debug;

const RETRIES: usize = 5;
const RETRY_TIME: Duration = Duration::from_millis(500);

/// Fetches the address book at `artifacts_url`. A missing or unavailable book
/// is retried since the server may still be publishing it.
pub async fn query_address_book(artifacts_url: &str) -> Result<AddressBook> {
    let mut last_status = None;
    for attempt in 1..=RETRIES {
        let response = reqwest::get(artifacts_url).await?;
        let status = response.status();
        if status.is_success() {
            let book = response.json::<AddressBook>().await?;
            debug!(attempt, networks = book.networks().count(), "fetched address book");
            return Ok(book.normalized());
        }
        if !retryable(status) {
            return Err(eyre!("{} returned {}", artifacts_url, status));
        }
        debug!(attempt, %status, "address book not published yet");
        last_status = Some(status);
        sleep(RETRY_TIME).await;
    }
    Err(eyre!(
        "couldn't get the address book from {} after {} retries (last status {:?})",
        artifacts_url,
        RETRIES,
        last_status
    ))
}

fn retryable(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}
