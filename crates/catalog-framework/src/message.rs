//! # Store Messages
//!
//! The request enum exchanged between a [`StoreClient`](crate::StoreClient) and a
//! [`StoreActor`](crate::StoreActor).

use crate::entity::StoredEntity;
use crate::error::StoreError;
use crate::filter::Filter;
use std::collections::BTreeSet;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to a store actor.
///
/// # The Repository Pattern
/// Beyond plain CRUD, the variants cover the lookups a referential-integrity layer needs
/// without loading more than it has to:
///
/// - **Create / Get / Update / Delete**: the usual single-record lifecycle.
/// - **GetMany**: one round trip for a whole set of ids. Ids without a record are simply absent
///   from the answer; deciding what that means is the caller's business.
/// - **Exists**: a yes/no probe that never clones the record.
/// - **List / FindWhere**: reads over the whole store.
/// - **DeleteWhere**: bulk removal by predicate, returning how many records went away.
///   Running it twice is harmless: the second pass matches nothing and returns `0`.
#[derive(Debug)]
pub enum StoreRequest<T: StoredEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: BTreeSet<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    Exists {
        id: T::Id,
        respond_to: Response<bool>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    FindWhere {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    DeleteWhere {
        filter: Filter<T>,
        respond_to: Response<usize>,
    },
}

impl<T: StoredEntity> StoreRequest<T> {
    /// Short operation name, used by logs and by the mock's call journal.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Get { .. } => "get",
            Self::GetMany { .. } => "get_many",
            Self::Exists { .. } => "exists",
            Self::List { .. } => "list",
            Self::FindWhere { .. } => "find_where",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::DeleteWhere { .. } => "delete_where",
        }
    }
}
