//! Create-or-update write path
//!
//! A record with id 0 is inserted and receives the next id. A record with a
//! non-zero id is offered to `insert` first; when the store refuses it the
//! record overwrites the row with that id instead. The two statements are not
//! atomic, so concurrent upserts on the same explicit id race at the store.

use super::error::{StoreError, StoreErrorKind};
use super::traits::{Store, StoreResult};
use crate::resource::Resource;

/// Insert `record`, or overwrite the row it names
///
/// On success `record` holds the stored state, including the assigned id.
/// Every expected failure stems from the caller's data; see
/// [`StoreError::is_client_error`].
pub async fn upsert<R, S>(store: &S, record: &mut R) -> StoreResult<()>
where
    R: Resource,
    S: Store<R>,
{
    record
        .validate()
        .map_err(|message| StoreError::validation_failed(R::KIND, message))?;

    let stored = match store.insert(record).await {
        Ok(stored) => stored,
        Err(err) if record.is_new() => return Err(err),
        Err(err) => {
            tracing::debug!(
                kind = R::KIND,
                id = record.id(),
                reason = %err,
                "Insert refused, updating instead"
            );
            match store.update(record).await {
                Ok(updated) => updated,
                // Report why the insert failed when it was not about the id
                Err(update_err)
                    if update_err.kind == StoreErrorKind::NotFound && !refused_for_id(&err) =>
                {
                    return Err(err)
                }
                Err(update_err) => return Err(update_err),
            }
        }
    };

    tracing::debug!(kind = R::KIND, id = stored.id(), "Upserted");
    *record = stored;
    Ok(())
}

fn refused_for_id(err: &StoreError) -> bool {
    matches!(
        err.kind,
        StoreErrorKind::AlreadyExists | StoreErrorKind::IdAssigned
    )
}
