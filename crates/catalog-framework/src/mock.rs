//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`StoreClient<T>`], but the requests it sends are answered
//! from a queue of expectations instead of a running `StoreActor`. Because the client is
//! real, it plugs into anything written against [`EntityStore<T>`](crate::EntityStore).
//!
//! ## When to use Mocks vs Real Stores
//!
//! | Feature | MockStore | StoreActor |
//! |---------|-----------|------------|
//! | **State** | None (scripted answers) | Real records |
//! | **Call inspection** | Full journal via [`MockStore::calls`] | Logs only |
//! | **Error injection** | `return_err`, `never_respond` | Hard |
//! | **Use Case** | Proving *which* calls a component makes | End-to-end flows |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut books = MockStore::<Book>::new();
//! books.expect_exists(BookId(7)).return_ok(false);
//!
//! let validator = BookExistenceValidator::new(books.store());
//! assert!(validator.ensure_exists(BookId(7)).await.is_err());
//!
//! books.verify();
//! assert_eq!(books.calls(), vec!["exists"]); // no full fetch happened
//! ```
//!
//! ## Failure scenarios
//!
//! - `return_err(StoreError::Closed)` simulates an unreachable backend.
//! - `never_respond()` keeps the request pending forever; combine with
//!   [`StoreClient::with_timeout`] to exercise timeout handling.
//! - `return_ok_after(delay, value)` answers late, e.g. to cancel a caller mid-flight.
//!
//! A request that does not match the next expectation is recorded as unexpected and its
//! response channel is dropped, so the caller sees [`StoreError::Dropped`]. [`MockStore::verify`]
//! panics on unexpected requests as well as on leftover expectations.

use crate::client::StoreClient;
use crate::entity::StoredEntity;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use std::any::Any;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// How a scripted request gets answered.
enum Reply<R> {
    Now(Result<R, StoreError>),
    After(Duration, Result<R, StoreError>),
    Never,
}

impl<R: Send + 'static> Reply<R> {
    fn deliver(self, respond_to: Response<R>, parked: &mut Vec<Box<dyn Any + Send>>) {
        match self {
            Reply::Now(result) => {
                let _ = respond_to.send(result);
            }
            Reply::After(delay, result) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = respond_to.send(result);
                });
            }
            // Holding the sender keeps the caller waiting instead of seeing `Dropped`.
            Reply::Never => parked.push(Box::new(respond_to)),
        }
    }
}

/// An expected request together with its scripted answer.
enum Expectation<T: StoredEntity> {
    Create(Reply<T::Id>),
    Get(T::Id, Reply<Option<T>>),
    GetMany(Reply<Vec<T>>),
    Exists(T::Id, Reply<bool>),
    List(Reply<Vec<T>>),
    FindWhere(Reply<Vec<T>>),
    Update(T::Id, Reply<T>),
    Delete(T::Id, Reply<()>),
    DeleteWhere(Reply<usize>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;
type Journal = Arc<Mutex<Vec<&'static str>>>;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scripted store with expectation tracking and a call journal.
pub struct MockStore<T: StoredEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    calls: Journal,
    unexpected: Journal,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoredEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoredEntity> MockStore<T> {
    /// Creates a new mock store with no expectations.
    ///
    /// Must be called inside a Tokio runtime: the answering loop runs on its own task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let calls: Journal = Arc::new(Mutex::new(Vec::new()));
        let unexpected: Journal = Arc::new(Mutex::new(Vec::new()));

        let (queue, journal, misses) = (expectations.clone(), calls.clone(), unexpected.clone());
        let handle = tokio::spawn(async move {
            let mut parked: Vec<Box<dyn Any + Send>> = Vec::new();
            while let Some(request) = receiver.recv().await {
                let kind = request.kind();
                lock(&journal).push(kind);
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create(reply))) => {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::Get { id, respond_to }, Some(Expectation::Get(expected, reply)))
                        if id == expected =>
                    {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::GetMany { respond_to, .. }, Some(Expectation::GetMany(reply))) => {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::Exists { id, respond_to }, Some(Expectation::Exists(expected, reply)))
                        if id == expected =>
                    {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List(reply))) => {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::FindWhere { respond_to, .. }, Some(Expectation::FindWhere(reply))) => {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::Update { id, respond_to, .. }, Some(Expectation::Update(expected, reply)))
                        if id == expected =>
                    {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::Delete { id, respond_to }, Some(Expectation::Delete(expected, reply)))
                        if id == expected =>
                    {
                        reply.deliver(respond_to, &mut parked)
                    }
                    (StoreRequest::DeleteWhere { respond_to, .. }, Some(Expectation::DeleteWhere(reply))) => {
                        reply.deliver(respond_to, &mut parked)
                    }
                    _ => {
                        tracing::warn!(kind, "Unexpected request or expectation mismatch");
                        lock(&misses).push(kind);
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            calls,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock, for use wherever a store is expected.
    pub fn store(&self) -> StoreClient<T> {
        self.client.clone()
    }

    fn expect<R>(&mut self, wrap: impl FnOnce(Reply<R>) -> Expectation<T> + Send + 'static) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.expect(Expectation::Create)
    }

    /// Expects a `get` request for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.expect(move |reply| Expectation::Get(id, reply))
    }

    /// Expects a bulk `get_all` request.
    pub fn expect_get_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.expect(Expectation::GetMany)
    }

    /// Expects an `exists_by_id` probe for `id`.
    pub fn expect_exists(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        self.expect(move |reply| Expectation::Exists(id, reply))
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.expect(Expectation::List)
    }

    /// Expects a `find_where` request.
    pub fn expect_find_where(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.expect(Expectation::FindWhere)
    }

    /// Expects an `update` request for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.expect(move |reply| Expectation::Update(id, reply))
    }

    /// Expects a `delete` request for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.expect(move |reply| Expectation::Delete(id, reply))
    }

    /// Expects a `delete_where` request.
    pub fn expect_delete_where(&mut self) -> ExpectationBuilder<T, usize> {
        self.expect(Expectation::DeleteWhere)
    }

    /// Operation names of every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let unexpected = lock(&self.unexpected);
        if !unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", *unexpected);
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder that finishes an expectation by choosing its answer.
pub struct ExpectationBuilder<T: StoredEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Reply<R>) -> Expectation<T> + Send>,
}

impl<T: StoredEntity, R> ExpectationBuilder<T, R> {
    fn push(self, reply: Reply<R>) {
        let expectation = (self.wrap)(reply);
        lock(&self.expectations).push_back(expectation);
    }

    /// Answers with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Reply::Now(Ok(value)));
    }

    /// Answers with an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Reply::Now(Err(error)));
    }

    /// Answers with a successful result once `delay` has elapsed.
    pub fn return_ok_after(self, delay: Duration, value: R) {
        self.push(Reply::After(delay, Ok(value)));
    }

    /// Accepts the request but never answers it.
    pub fn never_respond(self) {
        self.push(Reply::Never);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the raw receiver behind it.
///
/// Use this when a test needs to hold a request, inspect it, and answer it by hand.
pub fn create_mock_store<T: StoredEntity>(buffer_size: usize) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}
