//! # Case Registry Service
//!
//! The orchestrating service behind [`CaseRegistryApi`]. Owns the two
//! read-modify-write loops that make a listable collection out of a
//! contract that only offers `get`/`set`:
//!
//! - **Record then index.** A new record is written under `record:<key>`
//!   before its key is appended to the index. A crash between the two
//!   leaves an orphan record that listings never see; the reverse order
//!   could leave an index entry pointing at nothing, which every reader
//!   would trip over.
//! - **Index writers are serialized.** Appending to the index is a
//!   read-modify-write of one shared key; two concurrent submitters doing
//!   it naively would each read the same prior index and the second write
//!   would erase the first key. All in-process writers queue on one async
//!   mutex, and the loop re-reads the index immediately before writing so
//!   a writer outside this process is detected and retried against
//!   (bounded; the budget converts to `IndexConflict`).
//! - **Transitions re-check at the write.** Settling a case re-reads the
//!   record after the analyzer ran and aborts if it is no longer pending,
//!   so two racing reviewers cannot both "win".

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::adapters::SystemTimeSource;
use crate::domain::{
    record_key, CaseCategory, CaseIndex, CaseKey, CaseListing, CaseRecord, CaseStatus, OwnerId,
    RegistryConfig, RegistryError, RegistryStats, INDEX_KEY,
};
use crate::ports::{
    CaseDecision, CaseRegistryApi, EncryptionGateway, KeyValueStore, OutcomeAnalyzer, TimeSource,
};

/// The case registry service.
///
/// Generic over its driven ports; construct it with the production adapters
/// or with test doubles. Cheap to share behind an [`Arc`]: all methods
/// take `&self`.
pub struct CaseRegistryService<S, E, A> {
    config: RegistryConfig,
    store: Arc<S>,
    gateway: Arc<E>,
    analyzer: Arc<A>,
    time: Arc<dyn TimeSource>,
    /// Serializes index mutation within this process.
    index_lock: Mutex<()>,
    stats: RwLock<RegistryStats>,
}

impl<S, E, A> CaseRegistryService<S, E, A>
where
    S: KeyValueStore,
    E: EncryptionGateway,
    A: OutcomeAnalyzer,
{
    /// Create a service on the system clock.
    pub fn new(store: S, gateway: E, analyzer: A, config: RegistryConfig) -> Self {
        Self::with_time_source(store, gateway, analyzer, config, Arc::new(SystemTimeSource))
    }

    /// Create a service with an explicit time source.
    pub fn with_time_source(
        store: S,
        gateway: E,
        analyzer: A,
        config: RegistryConfig,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            analyzer: Arc::new(analyzer),
            time,
            index_lock: Mutex::new(()),
            stats: RwLock::new(RegistryStats::default()),
        }
    }

    fn generate_key(&self) -> CaseKey {
        let millis = self.time.now_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        CaseKey::from(format!("{}-{}", millis, &suffix[..8]))
    }

    /// Generate a key that is free in the store.
    ///
    /// The keyspace makes collisions negligible already; the re-check turns
    /// "negligible" into "checked" for the cost of one read.
    async fn reserve_key(&self) -> Result<CaseKey, RegistryError> {
        for attempt in 1..=self.config.max_key_attempts {
            let key = self.generate_key();
            let existing = self.read(&record_key(&key)).await?;
            if existing.is_empty() {
                return Ok(key);
            }
            warn!(%key, attempt, "record key collision, regenerating");
        }
        Err(RegistryError::KeyCollision {
            attempts: self.config.max_key_attempts,
        })
    }

    /// Append `key` to the index, defending the no-lost-update property.
    ///
    /// The mutex serializes writers in this process; the re-read before the
    /// write detects anyone else. Idempotent: a key already present is a
    /// successful no-op.
    async fn append_to_index(&self, key: &CaseKey) -> Result<(), RegistryError> {
        let _guard = self.index_lock.lock().await;

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let before = self.read(INDEX_KEY).await?;
            let mut index = CaseIndex::decode(&before)?;
            if !index.append(key.clone()) {
                debug!(%key, "key already indexed");
                return Ok(());
            }

            // Last look before committing: if the stored index moved since
            // we read it, our append was computed from a stale base.
            let current = self.read(INDEX_KEY).await?;
            if current != before {
                if attempts >= self.config.max_index_write_attempts {
                    self.stats.write().await.index_conflicts += 1;
                    warn!(%key, attempts, "index conflict budget exhausted");
                    return Err(RegistryError::IndexConflict { attempts });
                }
                self.stats.write().await.index_retries += 1;
                debug!(%key, attempts, "index changed underneath us, retrying");
                continue;
            }

            let encoded = index.encode()?;
            self.write(INDEX_KEY, encoded).await?;
            return Ok(());
        }
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, RegistryError> {
        self.store
            .get(key)
            .await
            .map_err(|source| RegistryError::StoreReadFailed {
                key: key.to_string(),
                source,
            })
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), RegistryError> {
        self.store
            .set(key, value)
            .await
            .map_err(|source| RegistryError::StoreWriteFailed {
                key: key.to_string(),
                source,
            })
    }
}

#[async_trait]
impl<S, E, A> CaseRegistryApi for CaseRegistryService<S, E, A>
where
    S: KeyValueStore,
    E: EncryptionGateway,
    A: OutcomeAnalyzer,
{
    #[instrument(skip(self))]
    async fn list_cases(&self) -> Result<CaseListing, RegistryError> {
        let index_bytes = self.read(INDEX_KEY).await?;
        let index = CaseIndex::decode(&index_bytes)?;

        let mut records = Vec::with_capacity(index.len());
        let mut skipped = 0usize;
        for key in index.keys() {
            let storage_key = record_key(key);
            let bytes = match self.read(&storage_key).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(%key, %err, "skipping unreadable record");
                    skipped += 1;
                    continue;
                }
            };
            if bytes.is_empty() {
                warn!(%key, "index entry has no record, skipping");
                skipped += 1;
                continue;
            }
            match CaseRecord::from_bytes(&bytes) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(%key, %err, "skipping undecodable record");
                    skipped += 1;
                }
            }
        }

        // Newest first. The sort is stable, so records sharing a timestamp
        // keep their index order.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if skipped > 0 {
            self.stats.write().await.records_skipped += skipped as u64;
        }
        debug!(total = records.len(), skipped, "listed cases");
        Ok(CaseListing { records, skipped })
    }

    #[instrument(skip(self, plaintext), fields(category = %category, owner = %owner))]
    async fn submit_case(
        &self,
        category: CaseCategory,
        plaintext: &[u8],
        owner: OwnerId,
    ) -> Result<CaseRecord, RegistryError> {
        if plaintext.is_empty() {
            return Err(RegistryError::InvalidSubmission {
                reason: "case payload is empty",
            });
        }

        // Nothing is written until encryption has succeeded.
        let payload = self.gateway.encrypt(plaintext).await?;

        let key = self.reserve_key().await?;
        let record = CaseRecord {
            key: key.clone(),
            owner,
            category,
            created_at: self.time.now_millis() / 1000,
            payload,
            status: CaseStatus::Pending,
        };

        // Record first, index second: see the module docs.
        self.write(&record_key(&key), record.to_bytes()?).await?;
        self.append_to_index(&key).await?;

        self.stats.write().await.cases_submitted += 1;
        info!(%key, "case submitted");
        Ok(record)
    }

    #[instrument(skip(self), fields(key = %key, actor = %actor))]
    async fn transition(
        &self,
        key: &CaseKey,
        decision: CaseDecision,
        actor: &OwnerId,
    ) -> Result<CaseRecord, RegistryError> {
        let storage_key = record_key(key);
        let bytes = self.read(&storage_key).await?;
        if bytes.is_empty() {
            return Err(RegistryError::NotFound { key: key.clone() });
        }
        let record = CaseRecord::from_bytes(&bytes)?;

        if record.owner != *actor {
            return Err(RegistryError::NotAuthorized {
                key: key.clone(),
                actor: actor.clone(),
            });
        }
        if !record.status.is_pending() {
            return Err(RegistryError::InvalidTransition {
                key: key.clone(),
                from: record.status.name(),
            });
        }

        let status = match decision {
            CaseDecision::Analyze => CaseStatus::Analyzed {
                outcome: self.analyzer.analyze(&record.payload).await?,
            },
            CaseDecision::Reject => CaseStatus::Rejected,
        };

        // The analyzer call suspended us for a while; re-read and make sure
        // nobody settled the case in the meantime before overwriting it.
        let current = self.read(&storage_key).await?;
        if current.is_empty() {
            return Err(RegistryError::NotFound { key: key.clone() });
        }
        let mut updated = CaseRecord::from_bytes(&current)?;
        if !updated.status.is_pending() {
            return Err(RegistryError::InvalidTransition {
                key: key.clone(),
                from: updated.status.name(),
            });
        }
        updated.status = status;

        self.write(&storage_key, updated.to_bytes()?).await?;

        {
            let mut stats = self.stats.write().await;
            match decision {
                CaseDecision::Analyze => stats.cases_analyzed += 1,
                CaseDecision::Reject => stats.cases_rejected += 1,
            }
        }
        info!(%key, status = updated.status.name(), "case settled");
        Ok(updated)
    }

    async fn stats(&self) -> RegistryStats {
        self.stats.read().await.clone()
    }
}
