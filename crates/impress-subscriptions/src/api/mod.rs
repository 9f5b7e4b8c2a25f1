//! Subscription collection endpoints
//!
//! `POST {base}/api/subscriptions/zotero` creates, `DELETE
//! {base}/api/subscriptions/zotero/{id}` removes. [`SubscriptionApi`] is the
//! seam the controller is generic over; [`HttpSubscriptionApi`] is the
//! reqwest-backed implementation.

pub mod native;

pub use native::HttpSubscriptionApi;

use serde_json::Value;

use crate::error::ApiError;
use crate::record::SubscriptionId;

/// Path of the collection below the base URL
pub const COLLECTION_PATH: [&str; 3] = ["api", "subscriptions", "zotero"];

/// Remote subscription collection
///
/// Futures are awaited on the surface's thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait SubscriptionApi {
    /// Create a subscription. Any HTTP response is `Ok`; only a failure to
    /// get one is an error.
    async fn create(&self, query: &str, alias: &str) -> Result<CreateOutcome, ApiError>;

    /// Delete a subscription, returning the HTTP status
    async fn delete(&self, id: &SubscriptionId) -> Result<u16, ApiError>;
}

/// Server answer to a create request
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// 2xx; the parsed body, `{}` when absent or malformed
    Created { body: Value },
    /// Non-2xx with the server's `detail` string, if it sent one
    Rejected { status: u16, detail: Option<String> },
}

impl CreateOutcome {
    /// Classify a response. Never fails: a body that is not JSON is read as
    /// an empty object.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = parse_body(body);
        if is_success(status) {
            CreateOutcome::Created { body }
        } else {
            let detail = body
                .get("detail")
                .and_then(Value::as_str)
                .filter(|d| !d.is_empty())
                .map(str::to_string);
            CreateOutcome::Rejected { status, detail }
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created { .. })
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_body(body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(Default::default()),
    }
}
