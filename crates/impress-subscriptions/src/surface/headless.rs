//! In-memory surface
//!
//! Keeps markup and input values in memory and runs listeners when asked.
//! Backs the CLI and tests, and works for server-side rendering.

use std::cell::RefCell;
use std::rc::Rc;

use super::{
    ClickHandler, Clickable, DeleteControl, Element, ElementId, KeyHandler, KeyPress,
    ListContainer, MessageArea, TextInput,
};
use crate::render::RenderedRow;

/// Text field holding its value in memory
pub struct HeadlessInput {
    id: ElementId,
    value: RefCell<String>,
    key_listeners: RefCell<Vec<KeyHandler>>,
}

impl HeadlessInput {
    pub fn new() -> Rc<Self> {
        Self::with_value("")
    }

    pub fn with_value(value: &str) -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            value: RefCell::new(value.to_string()),
            key_listeners: RefCell::new(Vec::new()),
        })
    }

    /// Deliver a key-down event to every listener in registration order
    pub async fn key_down(&self, press: &KeyPress) {
        let listeners = self.key_listeners.borrow().clone();
        for listener in listeners {
            listener(press).await;
        }
    }

    pub fn listener_count(&self) -> usize {
        self.key_listeners.borrow().len()
    }
}

impl Element for HeadlessInput {
    fn element_id(&self) -> ElementId {
        self.id
    }
}

impl TextInput for HeadlessInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    fn add_key_down_listener(&self, handler: KeyHandler) {
        self.key_listeners.borrow_mut().push(handler);
    }
}

/// Plain button
pub struct HeadlessButton {
    id: ElementId,
    listeners: RefCell<Vec<ClickHandler>>,
}

impl HeadlessButton {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Run every click listener in registration order
    pub async fn click(&self) {
        run_click_listeners(&self.listeners).await;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Element for HeadlessButton {
    fn element_id(&self) -> ElementId {
        self.id
    }
}

impl Clickable for HeadlessButton {
    fn add_click_listener(&self, handler: ClickHandler) {
        self.listeners.borrow_mut().push(handler);
    }
}

/// Delete button created for each appended row
pub struct HeadlessDeleteControl {
    id: ElementId,
    data_id: Option<String>,
    listeners: RefCell<Vec<ClickHandler>>,
}

impl HeadlessDeleteControl {
    pub fn new(data_id: Option<String>) -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            data_id,
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub async fn click(&self) {
        run_click_listeners(&self.listeners).await;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Element for HeadlessDeleteControl {
    fn element_id(&self) -> ElementId {
        self.id
    }
}

impl Clickable for HeadlessDeleteControl {
    fn add_click_listener(&self, handler: ClickHandler) {
        self.listeners.borrow_mut().push(handler);
    }
}

impl DeleteControl for HeadlessDeleteControl {
    fn data_id(&self) -> Option<String> {
        self.data_id.clone()
    }
}

async fn run_click_listeners(listeners: &RefCell<Vec<ClickHandler>>) {
    // Clone first: a listener may register more listeners or re-render
    let snapshot = listeners.borrow().clone();
    for listener in snapshot {
        listener().await;
    }
}

/// Status line remembering the last message and color
#[derive(Default)]
pub struct HeadlessMessage {
    text: RefCell<String>,
    color: RefCell<Option<String>>,
}

impl HeadlessMessage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn color(&self) -> Option<String> {
        self.color.borrow().clone()
    }
}

impl MessageArea for HeadlessMessage {
    fn show(&self, text: &str, color: &str) {
        *self.text.borrow_mut() = text.to_string();
        *self.color.borrow_mut() = Some(color.to_string());
    }
}

/// List container accumulating markup
pub struct HeadlessList {
    id: ElementId,
    markup: RefCell<String>,
    controls: RefCell<Vec<Rc<HeadlessDeleteControl>>>,
}

impl HeadlessList {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            markup: RefCell::new(String::new()),
            controls: RefCell::new(Vec::new()),
        })
    }

    /// Current content
    pub fn markup(&self) -> String {
        self.markup.borrow().clone()
    }

    /// Delete controls with their concrete type, for driving clicks
    pub fn controls(&self) -> Vec<Rc<HeadlessDeleteControl>> {
        self.controls.borrow().clone()
    }

    pub fn row_count(&self) -> usize {
        self.controls.borrow().len()
    }
}

impl Element for HeadlessList {
    fn element_id(&self) -> ElementId {
        self.id
    }
}

impl ListContainer for HeadlessList {
    fn set_markup(&self, markup: &str) {
        *self.markup.borrow_mut() = markup.to_string();
        self.controls.borrow_mut().clear();
    }

    fn append_row(&self, row: &RenderedRow) {
        self.markup.borrow_mut().push_str(&row.markup);
        self.controls
            .borrow_mut()
            .push(HeadlessDeleteControl::new(row.delete_id.clone()));
    }

    fn delete_controls(&self) -> Vec<Rc<dyn DeleteControl>> {
        self.controls
            .borrow()
            .iter()
            .map(|c| c.clone() as Rc<dyn DeleteControl>)
            .collect()
    }
}
