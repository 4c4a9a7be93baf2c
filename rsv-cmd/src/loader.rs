//! Parallel loading of raw source text.
//!
//! Each source is fetched on its own task; results are gathered back in
//! configured order before parsing, so the store never depends on which
//! fetch finished first. A source that fails to load is logged and kept
//! as an empty dataset.

use anyhow::{bail, Context};
use log::{info, warn};
use reqwest::Client;
use rsv_records::parser::parse_yearly_csv;
use rsv_records::source::{SourceConfig, SourceLocation};
use rsv_records::store::SourceStore;
use tokio::task::JoinSet;

/// Timeout for fetching a single remote source.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Fetch the raw text of one source.
pub async fn fetch_raw(client: &Client, location: &SourceLocation) -> anyhow::Result<String> {
    match location {
        SourceLocation::Embedded(text) => Ok(text.to_string()),
        SourceLocation::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        SourceLocation::Url(url) => {
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("failed to fetch {}", url))?;
            if !response.status().is_success() {
                bail!("bad response for {}: {}", url, response.status());
            }
            response
                .text()
                .await
                .with_context(|| format!("failed to read body of {}", url))
        }
    }
}

/// Fetch all sources concurrently, then parse them into a store.
pub async fn load_sources(configs: &[SourceConfig]) -> anyhow::Result<SourceStore> {
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;

    let mut tasks = JoinSet::new();
    for (index, config) in configs.iter().cloned().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let raw = fetch_raw(&client, &config.location).await;
            (index, raw)
        });
    }

    let mut raw_texts: Vec<Option<anyhow::Result<String>>> = configs.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, raw) = joined?;
        raw_texts[index] = Some(raw);
    }

    let mut store = SourceStore::new(configs.iter().map(|c| c.source_id.clone()));
    for (config, raw) in configs.iter().zip(raw_texts) {
        match raw {
            Some(Ok(text)) => {
                let records = parse_yearly_csv(&text);
                info!(
                    "[RSV] loader: {} yearly records for {}",
                    records.len(),
                    config.source_id
                );
                store.insert(&config.source_id, records);
            }
            Some(Err(e)) => warn!("[RSV] loader: skipping {}: {:#}", config.source_id, e),
            None => warn!("[RSV] loader: no result for {}", config.source_id),
        }
    }
    Ok(store)
}
