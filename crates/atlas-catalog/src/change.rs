//! Translation of store change batches into catalog change batches.

use async_trait::async_trait;
use atlas_store::{TableCommit, TableEvents, Variant};
use atlas_types::CatalogId;

use crate::entity::CatalogEntry;
use crate::error::CatalogResult;
use crate::resource::Resource;

/// One catalog-level change record.
///
/// `value` always carries a fully projected resource: the new view for a
/// `Set`, the last known view for a `Delete`. Consumers that only need a
/// tombstone can ignore the payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceChange {
    /// Whether the resource was written or removed.
    pub variant: Variant,
    /// Canonical identifier of the changed node.
    pub id: CatalogId,
    /// The projected resource.
    pub value: Resource,
}

/// The ordered catalog changes produced by one committed transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeBatch {
    /// Sequence number of the originating commit.
    pub commit: u64,
    /// Changes in the exact order the transaction staged them.
    pub changes: Vec<ResourceChange>,
}

#[async_trait]
trait ChangeSource: Send {
    async fn recv(&mut self) -> CatalogResult<Option<ChangeBatch>>;
    fn try_recv(&mut self) -> CatalogResult<Option<ChangeBatch>>;
}

/// A live subscription to one kind's catalog changes.
///
/// Each received [`ChangeBatch`] is the translation of exactly one
/// committed transaction: all of a commit's records arrive together,
/// strictly before any record of a later commit, in unchanged order —
/// no reordering, no coalescing, no deduplication. Dropping the stream
/// (or calling [`unsubscribe`]) stops future delivery only;
/// already-delivered batches are never retracted.
///
/// [`unsubscribe`]: ChangeStream::unsubscribe
pub struct ChangeStream {
    inner: Box<dyn ChangeSource>,
}

impl ChangeStream {
    /// Build a stream that translates one table's commits as they arrive.
    pub(crate) fn for_table<E: CatalogEntry>(events: TableEvents<E>) -> Self {
        Self {
            inner: Box::new(TableSource { events }),
        }
    }

    /// Wait for the next commit batch.
    ///
    /// Returns `Ok(None)` once the store is gone and the stream is
    /// drained. A subscriber that fell behind observes the store's lag
    /// error rather than a silent gap.
    pub async fn recv(&mut self) -> CatalogResult<Option<ChangeBatch>> {
        self.inner.recv().await
    }

    /// Drain the next pending commit batch without waiting.
    pub fn try_recv(&mut self) -> CatalogResult<Option<ChangeBatch>> {
        self.inner.try_recv()
    }

    /// Stop receiving. Dropping the stream has the same effect.
    pub fn unsubscribe(self) {}
}

struct TableSource<E: CatalogEntry> {
    events: TableEvents<E>,
}

#[async_trait]
impl<E: CatalogEntry> ChangeSource for TableSource<E> {
    async fn recv(&mut self) -> CatalogResult<Option<ChangeBatch>> {
        match self.events.recv().await? {
            Some(commit) => Ok(Some(translate(commit)?)),
            None => Ok(None),
        }
    }

    fn try_recv(&mut self) -> CatalogResult<Option<ChangeBatch>> {
        match self.events.try_recv()? {
            Some(commit) => Ok(Some(translate(commit)?)),
            None => Ok(None),
        }
    }
}

/// Map one typed store commit to catalog records, preserving order.
fn translate<E: CatalogEntry>(commit: TableCommit<E>) -> CatalogResult<ChangeBatch> {
    let changes = commit
        .changes
        .into_iter()
        .map(|change| {
            Ok(ResourceChange {
                variant: change.variant,
                id: E::catalog_id(&change.key),
                value: Resource::project(&change.value)?,
            })
        })
        .collect::<CatalogResult<Vec<_>>>()?;
    Ok(ChangeBatch {
        commit: commit.seq,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{probe, probe_table, Probe};
    use atlas_store::Transaction;

    #[tokio::test]
    async fn one_commit_translates_to_one_ordered_batch() {
        let (store, table) = probe_table();
        table.put(None, &probe(2, "B")).unwrap();

        let mut stream = ChangeStream::for_table(table.subscribe());

        let tx = Transaction::new(store.clone());
        table.put(Some(&tx), &probe(1, "A")).unwrap();
        table.delete(Some(&tx), &2).unwrap();
        table.put(Some(&tx), &probe(3, "C")).unwrap();
        tx.commit().unwrap();

        let batch = stream.recv().await.unwrap().unwrap();
        let shape: Vec<_> = batch
            .changes
            .iter()
            .map(|c| (c.variant, c.id.to_string()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (Variant::Set, "probe:1".to_string()),
                (Variant::Delete, "probe:2".to_string()),
                (Variant::Set, "probe:3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn delete_records_carry_the_projected_last_value() {
        let (_store, table) = probe_table();
        table.put(None, &probe(5, "Probe-5")).unwrap();

        let mut stream = ChangeStream::for_table(table.subscribe());
        table.delete(None, &5).unwrap();

        let batch = stream.recv().await.unwrap().unwrap();
        let change = &batch.changes[0];
        assert_eq!(change.variant, Variant::Delete);
        assert_eq!(change.value, Resource::project(&probe(5, "Probe-5")).unwrap());
    }

    #[tokio::test]
    async fn later_commits_arrive_as_later_batches() {
        let (_store, table) = probe_table();
        let mut stream = ChangeStream::for_table(table.subscribe());

        table.put(None, &probe(1, "A")).unwrap();
        table.put(None, &probe(2, "B")).unwrap();

        let first = stream.recv().await.unwrap().unwrap();
        let second = stream.recv().await.unwrap().unwrap();
        assert!(first.commit < second.commit);
        assert_eq!(first.changes[0].id, Probe::catalog_id(&1));
        assert_eq!(second.changes[0].id, Probe::catalog_id(&2));
    }

    #[tokio::test]
    async fn unsubscribing_stops_future_delivery_only() {
        let (_store, table) = probe_table();

        let mut kept = ChangeStream::for_table(table.subscribe());
        let dropped = ChangeStream::for_table(table.subscribe());

        table.put(None, &probe(1, "A")).unwrap();
        dropped.unsubscribe();
        table.put(None, &probe(2, "B")).unwrap();

        // The surviving subscriber still sees every batch in order.
        assert_eq!(kept.recv().await.unwrap().unwrap().changes[0].id, Probe::catalog_id(&1));
        assert_eq!(kept.recv().await.unwrap().unwrap().changes[0].id, Probe::catalog_id(&2));
    }
}
