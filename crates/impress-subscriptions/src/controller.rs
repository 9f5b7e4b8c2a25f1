//! Subscription list controller
//!
//! Binds page elements, renders snapshots into the list container, and runs
//! the add/delete mutations. The controller keeps no copy of the list: after
//! a successful mutation it calls the reload callback and waits for the next
//! `render`.
//!
//! Everything runs on the surface's thread. The controller is a cheap `Rc`
//! handle; listeners hold a `Weak` to it so elements never keep it alive.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::api::{is_success, CreateOutcome, SubscriptionApi};
use crate::config::MessageCatalog;
use crate::error::{ApiError, ValidationError};
use crate::record::{SubscriptionId, SubscriptionRecord};
use crate::render::{render_list, RenderedList};
use crate::surface::{
    ClickHandler, Clickable, DeleteControl, ElementId, KeyHandler, KeyPress,
    ListContainer, MessageArea, ReloadFn, TextInput,
};

/// Element handles supplied by the page. Every field is optional; a missing
/// handle disables the feature that needs it.
#[derive(Clone, Default)]
pub struct AttachContext {
    pub list: Option<Rc<dyn ListContainer>>,
    pub query_input: Option<Rc<dyn TextInput>>,
    pub alias_input: Option<Rc<dyn TextInput>>,
    pub add_button: Option<Rc<dyn Clickable>>,
    pub message: Option<Rc<dyn MessageArea>>,
    pub reload: Option<ReloadFn>,
}

impl AttachContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, list: Rc<dyn ListContainer>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn with_query_input(mut self, input: Rc<dyn TextInput>) -> Self {
        self.query_input = Some(input);
        self
    }

    pub fn with_alias_input(mut self, input: Rc<dyn TextInput>) -> Self {
        self.alias_input = Some(input);
        self
    }

    pub fn with_add_button(mut self, button: Rc<dyn Clickable>) -> Self {
        self.add_button = Some(button);
        self
    }

    pub fn with_message(mut self, message: Rc<dyn MessageArea>) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_reload(mut self, reload: impl Fn() + 'static) -> Self {
        self.reload = Some(Rc::new(reload));
        self
    }
}

/// Terminal state of one add attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Query or alias input not bound; nothing happened
    Skipped,
    /// Rejected locally before any request
    Invalid(ValidationError),
    /// Server accepted; inputs cleared and reload requested
    Created,
    /// Server answered with a non-success status
    Rejected { status: u16, message: String },
    /// No response obtained
    Failed,
}

struct Inner<A> {
    api: A,
    messages: MessageCatalog,
    bindings: RefCell<AttachContext>,
    /// Form elements (add button, alias input) that already have listeners
    bound_form: RefCell<HashSet<ElementId>>,
    /// Delete controls that already have listeners
    bound_rows: RefCell<HashSet<ElementId>>,
}

pub struct SubscriptionListController<A> {
    inner: Rc<Inner<A>>,
}

impl<A> Clone for SubscriptionListController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: SubscriptionApi + 'static> SubscriptionListController<A> {
    pub fn new(api: A, messages: MessageCatalog) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                messages,
                bindings: RefCell::new(AttachContext::default()),
                bound_form: RefCell::new(HashSet::new()),
                bound_rows: RefCell::new(HashSet::new()),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.inner.messages
    }

    // ===== Binder =====

    /// Store the page's element handles, replacing any previous ones, and
    /// register listeners on elements not seen before.
    pub fn attach(&self, context: AttachContext) {
        let add_button = context.add_button.clone();
        let alias_input = context.alias_input.clone();
        *self.inner.bindings.borrow_mut() = context;

        if let Some(button) = add_button {
            if self.mark_form_bound(button.element_id()) {
                button.add_click_listener(self.submit_click_handler());
            }
        }

        if let Some(input) = alias_input {
            if self.mark_form_bound(input.element_id()) {
                input.add_key_down_listener(self.submit_key_handler());
            }
        }
    }

    fn mark_form_bound(&self, id: ElementId) -> bool {
        self.inner.bound_form.borrow_mut().insert(id)
    }

    fn weak(&self) -> Weak<Inner<A>> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner<A>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn submit_click_handler(&self) -> ClickHandler {
        let weak = self.weak();
        Rc::new(move || -> LocalBoxFuture<'static, ()> {
            let controller = Self::upgrade(&weak);
            async move {
                if let Some(controller) = controller {
                    controller.add_subscription().await;
                }
            }
            .boxed_local()
        })
    }

    fn submit_key_handler(&self) -> KeyHandler {
        let weak = self.weak();
        Rc::new(move |press: &KeyPress| -> LocalBoxFuture<'static, ()> {
            if !press.is_submit() {
                return async {}.boxed_local();
            }
            press.prevent_default();
            let controller = Self::upgrade(&weak);
            async move {
                if let Some(controller) = controller {
                    controller.add_subscription().await;
                }
            }
            .boxed_local()
        })
    }

    // ===== Renderer =====

    /// Replace the list content with a snapshot. `None` or an empty slice
    /// shows the placeholder.
    pub fn render(&self, items: Option<&[SubscriptionRecord]>) {
        let Some(list) = self.inner.bindings.borrow().list.clone() else {
            return;
        };

        match render_list(items, &self.inner.messages) {
            RenderedList::Empty { markup } => list.set_markup(&markup),
            RenderedList::Rows(rows) => {
                list.set_markup("");
                for row in &rows {
                    list.append_row(row);
                }
            }
        }

        self.bind_delete_controls(list.as_ref());
    }

    fn bind_delete_controls(&self, list: &dyn ListContainer) {
        let controls = list.delete_controls();
        let current: HashSet<ElementId> = controls.iter().map(|c| c.element_id()).collect();

        // Forget controls that are no longer on the surface
        self.inner
            .bound_rows
            .borrow_mut()
            .retain(|id| current.contains(id));

        for control in controls {
            if self.inner.bound_rows.borrow_mut().insert(control.element_id()) {
                control.add_click_listener(self.delete_click_handler(&control));
            }
        }
    }

    fn delete_click_handler(&self, control: &Rc<dyn DeleteControl>) -> ClickHandler {
        let weak = self.weak();
        let control = Rc::downgrade(control);
        Rc::new(move || -> LocalBoxFuture<'static, ()> {
            let controller = Self::upgrade(&weak);
            let data_id = control.upgrade().and_then(|c| c.data_id());
            async move {
                if let Some(controller) = controller {
                    controller.handle_delete_click(data_id).await;
                }
            }
            .boxed_local()
        })
    }

    /// Delete-control click: delete, then reload on any HTTP answer. A
    /// transport failure is only logged.
    async fn handle_delete_click(&self, data_id: Option<String>) {
        let Some(id) = data_id.filter(|id| !id.is_empty()) else {
            return;
        };
        let id = SubscriptionId::new(id);

        match self.delete_subscription(&id).await {
            Ok(status) => {
                if !is_success(status) {
                    tracing::warn!(%id, status, "Delete subscription answered with error status");
                }
                self.reload();
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "Failed to delete subscription");
            }
        }
    }

    // ===== Mutator =====

    /// Validate the form and create a subscription.
    ///
    /// Validation failures and server rejections are shown in the message
    /// area and leave the inputs untouched. On success both inputs are
    /// cleared and the reload callback runs.
    pub async fn add_subscription(&self) -> AddOutcome {
        let (query_input, alias_input) = {
            let bindings = self.inner.bindings.borrow();
            match (bindings.query_input.clone(), bindings.alias_input.clone()) {
                (Some(query), Some(alias)) => (query, alias),
                _ => return AddOutcome::Skipped,
            }
        };

        let query = query_input.value().trim().to_string();
        let alias = alias_input.value().trim().to_string();

        if let Err(reason) = validate_new_subscription(&query, &alias) {
            let messages = &self.inner.messages;
            let text = match reason {
                ValidationError::EmptyQuery => &messages.query_required,
                ValidationError::EmptyAlias => &messages.alias_required,
            };
            self.show_error(text);
            return AddOutcome::Invalid(reason);
        }

        match self.inner.api.create(&query, &alias).await {
            Ok(CreateOutcome::Created { .. }) => {
                tracing::info!(alias = %alias, "Smart subscription added");
                self.show_success(&self.inner.messages.add_succeeded);
                query_input.set_value("");
                alias_input.set_value("");
                self.reload();
                AddOutcome::Created
            }
            Ok(CreateOutcome::Rejected { status, detail }) => {
                let message = detail.unwrap_or_else(|| self.inner.messages.add_failed.clone());
                tracing::debug!(status, "Create subscription rejected");
                self.show_error(&message);
                AddOutcome::Rejected { status, message }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add subscription");
                self.show_error(&self.inner.messages.add_retry_later);
                AddOutcome::Failed
            }
        }
    }

    /// Issue the delete request; callers decide what the result means
    pub async fn delete_subscription(&self, id: &SubscriptionId) -> Result<u16, ApiError> {
        self.inner.api.delete(id).await
    }

    fn reload(&self) {
        let reload = self.inner.bindings.borrow().reload.clone();
        if let Some(reload) = reload {
            reload();
        }
    }

    fn show_error(&self, text: &str) {
        self.show(text, &self.inner.messages.error_color);
    }

    fn show_success(&self, text: &str) {
        self.show(text, &self.inner.messages.success_color);
    }

    fn show(&self, text: &str, color: &str) {
        let message = self.inner.bindings.borrow().message.clone();
        if let Some(message) = message {
            message.show(text, color);
        }
    }
}

/// Check trimmed form values; the first failing check wins
pub fn validate_new_subscription(query: &str, alias: &str) -> Result<(), ValidationError> {
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if alias.is_empty() {
        return Err(ValidationError::EmptyAlias);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{HeadlessButton, HeadlessInput, HeadlessList, HeadlessMessage};
    use std::cell::Cell;

    /// Answers every call with a fixed outcome and counts calls
    #[derive(Default)]
    struct StubApi {
        creates: Cell<usize>,
        deletes: Cell<usize>,
    }

    impl SubscriptionApi for StubApi {
        async fn create(&self, _query: &str, _alias: &str) -> Result<CreateOutcome, ApiError> {
            self.creates.set(self.creates.get() + 1);
            Ok(CreateOutcome::Created {
                body: serde_json::json!({}),
            })
        }

        async fn delete(&self, _id: &SubscriptionId) -> Result<u16, ApiError> {
            self.deletes.set(self.deletes.get() + 1);
            Ok(200)
        }
    }

    #[test]
    fn validation_order() {
        assert_eq!(
            validate_new_subscription("", ""),
            Err(ValidationError::EmptyQuery)
        );
        assert_eq!(
            validate_new_subscription("q", ""),
            Err(ValidationError::EmptyAlias)
        );
        assert_eq!(validate_new_subscription("q", "a"), Ok(()));
    }

    #[tokio::test]
    async fn add_without_inputs_is_skipped() {
        let controller = SubscriptionListController::new(StubApi::default(), MessageCatalog::default());
        let message = HeadlessMessage::new();
        controller.attach(AttachContext::new().with_message(message.clone()));

        assert_eq!(controller.add_subscription().await, AddOutcome::Skipped);
        assert_eq!(controller.api().creates.get(), 0);
        assert_eq!(message.text(), "");
    }

    #[test]
    fn render_without_list_is_inert() {
        let controller = SubscriptionListController::new(StubApi::default(), MessageCatalog::default());
        controller.attach(AttachContext::new());
        let records = vec![SubscriptionRecord::new("1", "q", "a")];
        controller.render(Some(records.as_slice()));
    }

    #[test]
    fn reattach_binds_new_elements_only() {
        let controller = SubscriptionListController::new(StubApi::default(), MessageCatalog::default());
        let first = HeadlessButton::new();
        let second = HeadlessButton::new();
        let alias = HeadlessInput::new();

        controller.attach(
            AttachContext::new()
                .with_add_button(first.clone())
                .with_alias_input(alias.clone()),
        );
        controller.attach(
            AttachContext::new()
                .with_add_button(second.clone())
                .with_alias_input(alias.clone()),
        );
        controller.attach(AttachContext::new().with_add_button(first.clone()));

        assert_eq!(first.listener_count(), 1);
        assert_eq!(second.listener_count(), 1);
        assert_eq!(alias.listener_count(), 1);
    }

    #[test]
    fn rerender_binds_fresh_controls_once() {
        let controller = SubscriptionListController::new(StubApi::default(), MessageCatalog::default());
        let list = HeadlessList::new();
        controller.attach(AttachContext::new().with_list(list.clone()));

        let records = vec![
            SubscriptionRecord::new("1", "a", "x"),
            SubscriptionRecord::new("2", "b", "y"),
        ];
        controller.render(Some(records.as_slice()));
        let first_pass = list.controls();
        controller.render(Some(records.as_slice()));
        let second_pass = list.controls();

        assert_eq!(second_pass.len(), 2);
        for control in first_pass.iter().chain(second_pass.iter()) {
            assert_eq!(control.listener_count(), 1);
        }
        assert_eq!(controller.inner.bound_rows.borrow().len(), 2);

        controller.render(None);
        assert!(controller.inner.bound_rows.borrow().is_empty());
    }

    #[tokio::test]
    async fn dropped_controller_makes_listeners_inert() {
        let button = HeadlessButton::new();
        let query = HeadlessInput::with_value("q");
        let alias = HeadlessInput::with_value("a");
        {
            let controller =
                SubscriptionListController::new(StubApi::default(), MessageCatalog::default());
            controller.attach(
                AttachContext::new()
                    .with_add_button(button.clone())
                    .with_query_input(query.clone())
                    .with_alias_input(alias.clone()),
            );
        }
        button.click().await;
        assert_eq!(query.value(), "q");
    }
}
