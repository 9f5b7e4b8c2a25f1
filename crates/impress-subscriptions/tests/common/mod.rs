//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod backend;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use impress_subscriptions::surface::{
    HeadlessButton, HeadlessInput, HeadlessList, HeadlessMessage,
};
use impress_subscriptions::{
    ApiError, AttachContext, CreateOutcome, MessageCatalog, SubscriptionApi, SubscriptionId,
    SubscriptionListController,
};

/// What the fake backend answers to a create
#[derive(Debug, Clone)]
pub enum CreateReply {
    Created,
    Rejected { status: u16, detail: Option<String> },
    Unreachable,
}

/// What the fake backend answers to a delete
#[derive(Debug, Clone, Copy)]
pub enum DeleteReply {
    Status(u16),
    Unreachable,
}

/// Records every call and answers from a script
pub struct RecordingApi {
    pub creates: RefCell<Vec<(String, String)>>,
    pub deletes: RefCell<Vec<SubscriptionId>>,
    create_reply: RefCell<CreateReply>,
    delete_reply: Cell<DeleteReply>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            creates: RefCell::new(Vec::new()),
            deletes: RefCell::new(Vec::new()),
            create_reply: RefCell::new(CreateReply::Created),
            delete_reply: Cell::new(DeleteReply::Status(200)),
        }
    }

    pub fn answer_create(&self, reply: CreateReply) {
        *self.create_reply.borrow_mut() = reply;
    }

    pub fn answer_delete(&self, reply: DeleteReply) {
        self.delete_reply.set(reply);
    }

    pub fn call_count(&self) -> usize {
        self.creates.borrow().len() + self.deletes.borrow().len()
    }
}

fn unreachable_error() -> ApiError {
    ApiError::Transport {
        message: "connection refused".to_string(),
    }
}

impl SubscriptionApi for RecordingApi {
    async fn create(&self, query: &str, alias: &str) -> Result<CreateOutcome, ApiError> {
        self.creates
            .borrow_mut()
            .push((query.to_string(), alias.to_string()));
        tokio::task::yield_now().await;
        match self.create_reply.borrow().clone() {
            CreateReply::Created => Ok(CreateOutcome::Created {
                body: serde_json::json!({}),
            }),
            CreateReply::Rejected { status, detail } => {
                Ok(CreateOutcome::Rejected { status, detail })
            }
            CreateReply::Unreachable => Err(unreachable_error()),
        }
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<u16, ApiError> {
        self.deletes.borrow_mut().push(id.clone());
        tokio::task::yield_now().await;
        match self.delete_reply.get() {
            DeleteReply::Status(status) => Ok(status),
            DeleteReply::Unreachable => Err(unreachable_error()),
        }
    }
}

/// A page with every element bound to one controller
pub struct Page<A> {
    pub list: Rc<HeadlessList>,
    pub query: Rc<HeadlessInput>,
    pub alias: Rc<HeadlessInput>,
    pub add_button: Rc<HeadlessButton>,
    pub message: Rc<HeadlessMessage>,
    pub reloads: Rc<Cell<usize>>,
    pub controller: SubscriptionListController<A>,
}

impl<A: SubscriptionApi + 'static> Page<A> {
    pub fn new(api: A) -> Self {
        Self::with_messages(api, MessageCatalog::default())
    }

    pub fn with_messages(api: A, messages: MessageCatalog) -> Self {
        let page = Self {
            list: HeadlessList::new(),
            query: HeadlessInput::new(),
            alias: HeadlessInput::new(),
            add_button: HeadlessButton::new(),
            message: HeadlessMessage::new(),
            reloads: Rc::new(Cell::new(0)),
            controller: SubscriptionListController::new(api, messages),
        };
        page.controller.attach(page.context());
        page
    }

    /// Context naming this page's elements
    pub fn context(&self) -> AttachContext {
        let reloads = self.reloads.clone();
        AttachContext::new()
            .with_list(self.list.clone())
            .with_query_input(self.query.clone())
            .with_alias_input(self.alias.clone())
            .with_add_button(self.add_button.clone())
            .with_message(self.message.clone())
            .with_reload(move || reloads.set(reloads.get() + 1))
    }

    pub fn fill(&self, query: &str, alias: &str) {
        use impress_subscriptions::TextInput;
        self.query.set_value(query);
        self.alias.set_value(alias);
    }
}

/// Counts ERROR-level events
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Route this thread's tracing events to a fresh counter until the guard drops
pub fn capture_errors() -> (ErrorCounter, DefaultGuard) {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (counter, guard)
}
