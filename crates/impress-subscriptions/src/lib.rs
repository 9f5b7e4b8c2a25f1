//! impress-subscriptions: smart subscription list for impress apps.
//!
//! A smart subscription is a saved search query with a label. This crate
//! provides:
//! - A controller that binds page elements, renders the list, and runs
//!   add/delete against the backend
//! - The surface traits the controller renders through, plus an in-memory
//!   implementation
//! - A reqwest client for the `/api/subscriptions/zotero` collection
//! - Configuration loading and the user-visible message catalog

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod escape;
pub mod record;
pub mod render;
pub mod surface;

pub use api::{is_success, CreateOutcome, HttpSubscriptionApi, SubscriptionApi};
pub use config::{ApiConfig, MessageCatalog, SubscriptionsConfig};
pub use controller::{validate_new_subscription, AddOutcome, AttachContext, SubscriptionListController};
pub use error::{ApiError, ConfigError, Result, SubscriptionError, ValidationError};
pub use escape::{escape_html, escape_optional};
pub use record::{CreateSubscriptionRequest, SubscriptionId, SubscriptionRecord};
pub use render::{render_list, render_row, RenderedList, RenderedRow};
pub use surface::{
    Clickable, DeleteControl, Element, ElementId, KeyPress, ListContainer, MessageArea, TextInput,
};
