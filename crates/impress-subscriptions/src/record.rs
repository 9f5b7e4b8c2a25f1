//! Subscription records as served by the backend
//!
//! The backend stores smart subscriptions in its Zotero table, so the query
//! text travels in the `zotero_id` field and the create payload carries a
//! placeholder in `api_key`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned subscription identifier
///
/// Opaque to the client. The backend may send it as a JSON string or an
/// integer; both deserialize to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriptionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for SubscriptionId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for SubscriptionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = SubscriptionId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer id")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SubscriptionId(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SubscriptionId(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SubscriptionId(v.to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SubscriptionId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A saved query with an optional label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    #[serde(default)]
    pub id: Option<SubscriptionId>,
    /// Query text
    #[serde(default)]
    pub zotero_id: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

impl SubscriptionRecord {
    pub fn new(id: impl Into<SubscriptionId>, query: &str, alias: &str) -> Self {
        Self {
            id: Some(id.into()),
            zotero_id: Some(query.to_string()),
            alias: Some(alias.to_string()),
        }
    }

    /// Query text, empty when absent
    pub fn query(&self) -> &str {
        self.zotero_id.as_deref().unwrap_or_default()
    }

    /// Alias, `None` when absent or empty
    pub fn label(&self) -> Option<&str> {
        self.alias.as_deref().filter(|a| !a.is_empty())
    }
}

/// Body of `POST /api/subscriptions/zotero`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSubscriptionRequest {
    pub zotero_id: String,
    pub api_key: String,
    pub alias: String,
}
