//! A [`GraphQLClient`] whose responses are decided by the test.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use github_client::{GraphQLClient, Variables};
use serde_json::Value;

type Reply = Result<Value, String>;

/// One call to [`MockClient::request`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub query: String,
    pub variables: Variables,
}

enum Mode {
    Always(Reply),
    Deferred,
}

/// Records every request and answers it according to its mode:
///
/// - [`MockClient::resolving`] and [`MockClient::rejecting`] answer every
///   request immediately with the same reply.
/// - [`MockClient::deferred`] leaves every request pending until the test
///   calls [`MockClient::resolve`] or [`MockClient::reject`] with its index.
///
/// Errors are plain strings.
pub struct MockClient {
    mode: Mode,
    requests: RefCell<Vec<RecordedRequest>>,
    pending: RefCell<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl MockClient {
    pub fn resolving(data: Value) -> Rc<Self> {
        Self::with_mode(Mode::Always(Ok(data)))
    }

    pub fn rejecting(error: impl Into<String>) -> Rc<Self> {
        Self::with_mode(Mode::Always(Err(error.into())))
    }

    pub fn deferred() -> Rc<Self> {
        Self::with_mode(Mode::Deferred)
    }

    fn with_mode(mode: Mode) -> Rc<Self> {
        Rc::new(Self {
            mode,
            requests: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Complete the `index`th request (zero based) successfully.
    pub fn resolve(&self, index: usize, data: Value) {
        self.reply(index, Ok(data));
    }

    /// Fail the `index`th request (zero based).
    pub fn reject(&self, index: usize, error: impl Into<String>) {
        self.reply(index, Err(error.into()));
    }

    fn reply(&self, index: usize, reply: Reply) {
        let sender = self
            .pending
            .borrow_mut()
            .get_mut(index)
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("no pending request #{index}"));
        // The receiver is gone only if the request future was dropped.
        let _ = sender.send(reply);
    }
}

impl GraphQLClient for MockClient {
    type Error = String;

    fn request(
        &self,
        query: &str,
        variables: &Variables,
    ) -> LocalBoxFuture<'static, Reply> {
        self.requests.borrow_mut().push(RecordedRequest {
            query: query.to_string(),
            variables: variables.clone(),
        });

        match &self.mode {
            Mode::Always(reply) => future::ready(reply.clone()).boxed_local(),
            Mode::Deferred => {
                let (sender, receiver) = oneshot::channel();
                self.pending.borrow_mut().push(Some(sender));
                async move {
                    receiver
                        .await
                        .unwrap_or_else(|_| Err("request abandoned".to_string()))
                }
                .boxed_local()
            }
        }
    }
}
