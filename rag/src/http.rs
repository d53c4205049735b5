use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::from_str;

use crate::error::{RagError, Result};

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// One authorized POST. Non-2xx statuses become `RagError::Service` with the
/// body preserved for diagnostics.
pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    bearer: &str,
    body: &B,
) -> Result<T> {
    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .bearer_auth(bearer)
        .json(body)
        .send()
        .await?;
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(RagError::Service {
            status: status.as_u16(),
            body: text,
        });
    }
    from_str::<T>(&text).map_err(|e| RagError::Decode(format!("POST {} decode failed: {} | {}", url, e, text)))
}
