//! In-process live store.
//!
//! Holds both collections behind a `watch` channel. Every subscriber shares
//! the channel and projects the latest snapshot through its own query, so a
//! committed batch becomes visible to all of them at once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use photo_core::{
    Collection, DomainError, LiveQuery, Op, Query, QueryData, Record, RecordId, StoreResult,
    SyncStore,
};
use tokio::sync::watch;

use crate::error::StoreError;

/// Live store shared by every client bound to one app id
pub struct MemoryStore {
    app_id: String,
    /// Latest committed snapshot
    tx: watch::Sender<Arc<QueryData>>,
    /// Reason to fail the next batch with (test hook)
    pending_rejection: Mutex<Option<String>>,
    /// Number of batches that changed data
    version: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(Arc::new(QueryData::default()));
        Self {
            app_id: app_id.into(),
            tx,
            pending_rejection: Mutex::new(None),
            version: AtomicU64::new(0),
        }
    }

    /// Create an empty store wrapped in Arc
    #[must_use]
    pub fn new_shared(app_id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(app_id))
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Number of committed batches that changed data
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Full current contents
    pub fn snapshot(&self) -> QueryData {
        QueryData::clone(&self.tx.borrow())
    }

    /// Number of records currently held in `collection`
    pub fn len(&self, collection: Collection) -> usize {
        let data = self.tx.borrow();
        match collection {
            Collection::Reactions => data.reactions.len(),
            Collection::Comments => data.comments.len(),
        }
    }

    /// Make the next `transact` call fail with `reason` without applying anything
    pub fn reject_next(&self, reason: impl Into<String>) {
        *self.pending_rejection.lock() = Some(reason.into());
    }

    /// Reject malformed batches before touching any data
    fn validate(ops: &[Op]) -> Result<(), StoreError> {
        for op in ops {
            if op.record_id().is_empty() {
                return Err(StoreError::InvalidOp(format!(
                    "empty record id in {} batch",
                    op.collection()
                )));
            }
        }
        Ok(())
    }

    /// Apply one operation; returns whether anything changed
    fn apply(data: &mut QueryData, op: Op) -> bool {
        match op {
            Op::Create(Record::Reaction(reaction)) => {
                upsert(&mut data.reactions, reaction, |r| &r.id)
            }
            Op::Create(Record::Comment(comment)) => upsert(&mut data.comments, comment, |c| &c.id),
            Op::Delete {
                collection: Collection::Reactions,
                id,
            } => remove(&mut data.reactions, &id, |r| &r.id),
            Op::Delete {
                collection: Collection::Comments,
                id,
            } => remove(&mut data.comments, &id, |c| &c.id),
        }
    }
}

/// Insert `record`, replacing any record with the same id in place
fn upsert<T: PartialEq>(records: &mut Vec<T>, record: T, id_of: impl Fn(&T) -> &RecordId) -> bool {
    match records.iter().position(|r| id_of(r) == id_of(&record)) {
        Some(index) if records[index] == record => false,
        Some(index) => {
            records[index] = record;
            true
        }
        None => {
            records.push(record);
            true
        }
    }
}

/// Remove the record with `id`; a missing id is a no-op
fn remove<T>(records: &mut Vec<T>, id: &RecordId, id_of: impl Fn(&T) -> &RecordId) -> bool {
    match records.iter().position(|r| id_of(r) == id) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

#[async_trait]
impl SyncStore for MemoryStore {
    fn subscribe(&self, query: Query) -> LiveQuery {
        LiveQuery::new(query, self.tx.subscribe())
    }

    async fn transact(&self, ops: Vec<Op>) -> StoreResult<()> {
        let rejection = self.pending_rejection.lock().take();
        if let Some(reason) = rejection {
            tracing::debug!(app_id = %self.app_id, reason = %reason, "Rejecting batch");
            return Err(DomainError::MutationRejected(reason));
        }

        Self::validate(&ops)?;

        let op_count = ops.len();
        let changed = self.tx.send_if_modified(|current| {
            let data = Arc::make_mut(current);
            let mut changed = false;
            for op in ops {
                changed |= Self::apply(data, op);
            }
            changed
        });

        if changed {
            let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
            tracing::debug!(
                app_id = %self.app_id,
                ops = op_count,
                version = version,
                "Applied batch"
            );
        } else {
            tracing::trace!(app_id = %self.app_id, ops = op_count, "Batch changed nothing");
        }

        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("app_id", &self.app_id)
            .field("version", &self.version())
            .finish()
    }
}
