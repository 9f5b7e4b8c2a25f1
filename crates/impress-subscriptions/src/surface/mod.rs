//! Rendering surface capabilities
//!
//! The controller never touches a concrete widget toolkit. It sees the page
//! through these traits: a list container that accepts markup, text inputs,
//! clickable controls, and a message line. Listeners are async handlers run
//! on the same thread as the surface, so every handle is `Rc`-shared.

pub mod headless;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::LocalBoxFuture;

use crate::render::RenderedRow;

pub use headless::{HeadlessButton, HeadlessDeleteControl, HeadlessInput, HeadlessList, HeadlessMessage};

/// Click listener
pub type ClickHandler = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Key-down listener
///
/// Runs synchronously up to the returned future, so it can call
/// [`KeyPress::prevent_default`] before any await point.
pub type KeyHandler = Rc<dyn Fn(&KeyPress) -> LocalBoxFuture<'static, ()>>;

/// Request to re-fetch and re-render the whole subscription list
pub type ReloadFn = Rc<dyn Fn()>;

/// Identity of one element instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a fresh process-unique id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Anything with a stable identity on the surface
pub trait Element {
    fn element_id(&self) -> ElementId;
}

/// Single-line text field
pub trait TextInput: Element {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn add_key_down_listener(&self, handler: KeyHandler);
}

/// Button-like control
pub trait Clickable: Element {
    fn add_click_listener(&self, handler: ClickHandler);
}

/// Per-row delete button
pub trait DeleteControl: Clickable {
    /// Subscription id carried by the control, if any
    fn data_id(&self) -> Option<String>;
}

/// Status line under the form
pub trait MessageArea {
    fn show(&self, text: &str, color: &str);
}

/// Container the list is rendered into
pub trait ListContainer {
    /// Replace all content; an empty string clears it
    fn set_markup(&self, markup: &str);
    /// Append one rendered row
    fn append_row(&self, row: &RenderedRow);
    /// Delete controls currently in the container, in row order
    fn delete_controls(&self) -> Vec<Rc<dyn DeleteControl>>;
}

/// A key-down event
#[derive(Debug)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
    /// Input-method composition in progress
    pub composing: bool,
    default_prevented: Cell<bool>,
}

impl KeyPress {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            shift: false,
            composing: false,
            default_prevented: Cell::new(false),
        }
    }

    pub fn enter() -> Self {
        Self::new("Enter")
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn composing(mut self) -> Self {
        self.composing = true;
        self
    }

    /// Plain Enter: not shifted and not part of an IME composition
    pub fn is_submit(&self) -> bool {
        self.key == "Enter" && !self.shift && !self.composing
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
