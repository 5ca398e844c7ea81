//! # Mock Store
//!
//! Utilities for testing code that talks to a store, without spawning a
//! [`CollectionActor`](super::CollectionActor) or touching the network.
//!
//! Use [`MockStore`] to script the answers of a store up front, or
//! [`create_mock_store`] to receive each request yourself and decide when and
//! how to answer it.

use crate::model::InventoryItem;
use crate::store::message::{Response, StoreRequest};
use crate::store::{CollectionClient, StoreError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give it.
enum Expectation {
    Get {
        key: String,
        response: Result<Option<u32>, StoreError>,
    },
    Set {
        key: String,
        quantity: u32,
        response: Result<(), StoreError>,
    },
    Delete {
        key: String,
        response: Result<(), StoreError>,
    },
    List {
        response: Result<Vec<InventoryItem>, StoreError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A scripted store with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered. A
/// request that does not match the next expectation is recorded and its caller
/// receives [`StoreError::ActorDropped`]; [`MockStore::verify`] reports it.
///
/// # Example
/// ```
/// use inventory_tracker::store::mock::MockStore;
/// use inventory_tracker::store::InventoryStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut mock = MockStore::new();
/// mock.expect_get("apple").return_ok(Some(1));
/// mock.expect_set("apple", 2).return_ok();
///
/// let store = mock.store();
/// assert_eq!(store.get("apple").await.unwrap(), Some(1));
/// store.set("apple", 2).await.unwrap();
/// mock.verify(); // Ensures all expectations were met
/// # }
/// ```
pub struct MockStore {
    client: CollectionClient,
    expectations: Expectations,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockStore {
    /// Creates a new mock store with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let mismatches_clone = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&expectations_clone).pop_front();
                if let Err(mismatch) = answer(request, expectation) {
                    lock(&mismatches_clone).push(mismatch);
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns a store handle for use in tests.
    pub fn store(&self) -> CollectionClient {
        self.client.clone()
    }

    /// Expects a `get` of `key`.
    pub fn expect_get(&mut self, key: impl Into<String>) -> GetExpectationBuilder {
        GetExpectationBuilder {
            key: key.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `set` of `key` to `quantity`.
    pub fn expect_set(&mut self, key: impl Into<String>, quantity: u32) -> WriteExpectationBuilder {
        WriteExpectationBuilder {
            key: key.into(),
            quantity: Some(quantity),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` of `key`.
    pub fn expect_delete(&mut self, key: impl Into<String>) -> WriteExpectationBuilder {
        WriteExpectationBuilder {
            key: key.into(),
            quantity: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list_all`.
    pub fn expect_list(&mut self) -> ListExpectationBuilder {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no request was unexpected.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Unexpected store requests: {}", mismatches.join("; "));
        }
        let exps = lock(&self.expectations);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Answers `request` from `expectation`, or describes why they do not match.
///
/// On a mismatch the responder is dropped, so the caller sees `ActorDropped`.
fn answer(request: StoreRequest, expectation: Option<Expectation>) -> Result<(), String> {
    match (request, expectation) {
        (
            StoreRequest::Get { key, respond_to },
            Some(Expectation::Get {
                key: expected,
                response,
            }),
        ) => reply(respond_to, response, &key, &expected, "get"),
        (
            StoreRequest::Set {
                key,
                quantity,
                respond_to,
            },
            Some(Expectation::Set {
                key: expected,
                quantity: expected_quantity,
                response,
            }),
        ) => {
            if quantity != expected_quantity {
                return Err(format!(
                    "set {key:?}: expected quantity {expected_quantity}, got {quantity}"
                ));
            }
            reply(respond_to, response, &key, &expected, "set")
        }
        (
            StoreRequest::Delete { key, respond_to },
            Some(Expectation::Delete {
                key: expected,
                response,
            }),
        ) => reply(respond_to, response, &key, &expected, "delete"),
        (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
            Ok(())
        }
        (request, Some(_)) => Err(format!(
            "request {request:?} does not match the next expectation"
        )),
        (request, None) => Err(format!("request {request:?} arrived with no expectation left")),
    }
}

fn reply<T>(
    respond_to: Response<T>,
    response: Result<T, StoreError>,
    key: &str,
    expected: &str,
    operation: &str,
) -> Result<(), String> {
    if key != expected {
        return Err(format!("{operation}: expected key {expected:?}, got {key:?}"));
    }
    let _ = respond_to.send(response);
    Ok(())
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder {
    key: String,
    expectations: Expectations,
}

impl GetExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, quantity: Option<u32>) {
        lock(&self.expectations).push_back(Expectation::Get {
            key: self.key,
            response: Ok(quantity),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back(Expectation::Get {
            key: self.key,
            response: Err(error),
        });
    }
}

/// Builder for `set` and `delete` expectations.
pub struct WriteExpectationBuilder {
    key: String,
    quantity: Option<u32>,
    expectations: Expectations,
}

impl WriteExpectationBuilder {
    /// Sets the expectation to succeed.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), StoreError>) {
        let expectation = match self.quantity {
            Some(quantity) => Expectation::Set {
                key: self.key,
                quantity,
                response,
            },
            None => Expectation::Delete {
                key: self.key,
                response,
            },
        };
        lock(&self.expectations).push_back(expectation);
    }
}

/// Builder for `list_all` expectations.
pub struct ListExpectationBuilder {
    expectations: Expectations,
}

impl ListExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, items: Vec<InventoryItem>) {
        lock(&self.expectations).push_back(Expectation::List { response: Ok(items) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back(Expectation::List {
            response: Err(error),
        });
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a store handle and the receiver its requests arrive on.
///
/// Tests that need to control interleaving (e.g. answer two reads before either
/// write) take requests off the receiver with the `expect_*_request` helpers
/// and answer them through the returned responder.
pub fn create_mock_store(buffer_size: usize) -> (CollectionClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next request is a `get`.
pub async fn expect_get_request(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Response<Option<u32>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is a `set`.
pub async fn expect_set_request(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, u32, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Set {
            key,
            quantity,
            respond_to,
        }) => Some((key, quantity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is a `list_all`.
pub async fn expect_list_request(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<Response<Vec<InventoryItem>>> {
    match receiver.recv().await {
        Some(StoreRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}
