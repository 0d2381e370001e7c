//! Sync orchestration
//!
//! Drives a full resync: streams pages from the client, maps each raw item to
//! a normalized object, and groups results per kind. Kinds sync in parent
//! order (projects, services, components, deployments).

use crate::blueprint::BlueprintRegistry;
use crate::client::CargClient;
use crate::error::Result;
use crate::mapping::{NormalizedObject, ObjectMapper};
use crate::types::ResourceKind;
use futures::TryStreamExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, warn};

/// Counters for one resync run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStats {
    pub objects_synced: usize,
    pub pages_fetched: usize,
    pub kinds_synced: usize,
    pub duration_ms: u64,
}

/// The connector: client, mapper, and blueprint registry wired together
pub struct Connector {
    client: CargClient,
    mapper: Box<dyn ObjectMapper + Send + Sync>,
    registry: BlueprintRegistry,
    stats: SyncStats,
}

impl Connector {
    /// Assemble a connector from its parts
    pub fn new(
        client: CargClient,
        mapper: Box<dyn ObjectMapper + Send + Sync>,
        registry: BlueprintRegistry,
    ) -> Self {
        Self {
            client,
            mapper,
            registry,
            stats: SyncStats::default(),
        }
    }

    /// The blueprint registry objects are validated against
    pub fn registry(&self) -> &BlueprintRegistry {
        &self.registry
    }

    /// Counters accumulated by resync calls
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Startup checks: config sanity, remote health, webhook registration
    pub async fn start(&self) -> Result<()> {
        let config = self.client.config();
        config.validate()?;

        if config.is_mock_mode() {
            warn!("CARG_API_URL or CARG_API_TOKEN not set, running against fixture data");
        } else if self.client.health_check().await {
            info!("CARG API is healthy");
        } else {
            warn!("CARG API health check failed, continuing anyway");
        }

        if config.enable_webhooks && !config.is_mock_mode() {
            match &config.app_host {
                Some(host) => self.client.ensure_webhook(host).await?,
                None => warn!("webhooks enabled but no app_host configured, skipping"),
            }
        }
        Ok(())
    }

    /// Fetch and map every item of one resource kind
    pub async fn resync(&mut self, kind: ResourceKind) -> Result<Vec<NormalizedObject>> {
        info!(kind = %kind, "resync started");
        let started = Instant::now();
        let mut objects = Vec::new();
        let mut dropped = 0usize;

        let mut pages = self.client.fetch_all(kind);
        while let Some(page) = pages.try_next().await? {
            self.stats.pages_fetched += 1;
            for raw in &page.items {
                match self.mapper.transform(kind, raw) {
                    Some(object) => objects.push(object),
                    None => dropped += 1,
                }
            }
            info!(
                kind = %kind,
                offset = page.offset,
                batch = page.len(),
                total = objects.len(),
                "processed page"
            );
        }
        drop(pages);

        if dropped > 0 {
            warn!(kind = %kind, dropped, "items could not be mapped");
        }
        info!(
            kind = %kind,
            objects = objects.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "resync finished"
        );
        self.stats.objects_synced += objects.len();
        Ok(objects)
    }

    /// Resync every kind, or just one when a filter is given
    ///
    /// Kinds with no items still get an (empty) entry in the result.
    pub async fn resync_all(
        &mut self,
        filter: Option<ResourceKind>,
    ) -> Result<BTreeMap<ResourceKind, Vec<NormalizedObject>>> {
        let started = Instant::now();
        let kinds: Vec<ResourceKind> = match filter {
            Some(kind) => vec![kind],
            None => ResourceKind::all().to_vec(),
        };

        let mut result = BTreeMap::new();
        for kind in kinds {
            let objects = self.resync(kind).await?;
            result.insert(kind, objects);
            self.stats.kinds_synced += 1;
        }
        self.stats.duration_ms = started.elapsed().as_millis() as u64;

        info!(
            kinds = result.len(),
            objects = self.stats.objects_synced,
            pages = self.stats.pages_fetched,
            duration_ms = self.stats.duration_ms,
            "sync complete"
        );
        Ok(result)
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("client", &self.client)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
