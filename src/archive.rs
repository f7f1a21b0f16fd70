use crate::models::ContentPayload;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Optional JSON archive of assembled payloads, keyed by property id with
/// last-write-wins semantics.
///
/// The file is read, modified and rewritten without locking; concurrent
/// requests for the same id can race. Accepted — this is a debugging aid,
/// not a datastore, and archive failures never affect the pipeline.
#[derive(Clone)]
pub struct ResultArchive {
    path: PathBuf,
}

impl ResultArchive {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Records one payload under its property id. Errors are logged and
    /// swallowed.
    pub async fn record(&self, payload: &ContentPayload) {
        let Some(ref propid) = payload.propid else {
            tracing::debug!("Archive skipped: payload has no property id");
            return;
        };
        if let Err(e) = self.write_entry(propid, payload).await {
            tracing::warn!("Failed to archive result for propid {}: {}", propid, e);
        }
    }

    async fn write_entry(&self, propid: &str, payload: &ContentPayload) -> anyhow::Result<()> {
        let mut entries: Map<String, Value> = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Map::new(),
        };
        entries.insert(propid.to_string(), serde_json::to_value(payload)?);
        let serialized = serde_json::to_string_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, serialized).await?;
        tracing::debug!("Archived result for propid {}", propid);
        Ok(())
    }
}
