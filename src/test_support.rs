//! Hand-written doubles shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::connectivity::ConnectivityState;
use crate::error::ClientError;
use crate::presentation::{Presenter, Severity};
use crate::session::Message;
use crate::transport::{HttpBackend, HttpRequest, HttpResponse, KnowledgeBaseStats, Method};

type Reply = Result<HttpResponse, ClientError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// Backend answering from per-endpoint scripts. An endpoint with an empty
/// script answers with a transport error.
#[derive(Default)]
pub(crate) struct MockBackend {
    scripts: RefCell<Vec<(String, VecDeque<Scripted>)>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, path: &str, scripted: Scripted) {
        let mut scripts = self.scripts.borrow_mut();
        if let Some((_, queue)) = scripts.iter_mut().find(|(p, _)| p == path) {
            queue.push_back(scripted);
        } else {
            scripts.push((path.to_owned(), VecDeque::from([scripted])));
        }
    }

    pub(crate) fn respond(&self, path: &str, status: u16, body: &str) -> &Self {
        self.push(path, Scripted::Ready(Ok(HttpResponse { status, body: body.to_owned() })));
        self
    }

    pub(crate) fn ok_json(&self, path: &str, body: &serde_json::Value) -> &Self {
        self.respond(path, 200, &body.to_string())
    }

    pub(crate) fn fail(&self, path: &str, cause: &str) -> &Self {
        self.push(path, Scripted::Ready(Err(ClientError::Transport(cause.to_owned()))));
        self
    }

    /// Script a response that is released by sending on the returned channel.
    pub(crate) fn gate(&self, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Scripted::Gated(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url.ends_with(&format!("/{path}")))
            .count()
    }

    fn next_for(&self, url: &str) -> Option<Scripted> {
        let mut scripts = self.scripts.borrow_mut();
        scripts
            .iter_mut()
            .filter(|(path, _)| url.ends_with(&format!("/{path}")))
            .max_by_key(|(path, _)| path.len())
            .and_then(|(_, queue)| queue.pop_front())
    }
}

#[async_trait(?Send)]
impl HttpBackend for MockBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        match self.next_for(&url) {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx.await.map_err(ClientError::transport)?,
            None => Err(ClientError::Transport(format!("no scripted response for {url}"))),
        }
    }
}

/// Everything a presenter was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Message(Message),
    Connectivity(ConnectivityState),
    Typing(bool),
    Unread(u32),
    Notify(String, Severity),
    Reset(String),
    KnowledgeBase(KnowledgeBaseStats),
    Uploading(bool),
    Panel(bool),
}

#[derive(Default)]
pub(crate) struct RecordingPresenter {
    calls: RefCell<Vec<Call>>,
}

impl RecordingPresenter {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn notifications(&self) -> Vec<(String, Severity)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Notify(text, severity) => Some((text.clone(), *severity)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn rendered(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Message(m) => Some(m.text.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn render_message(&self, message: &Message) {
        self.record(Call::Message(message.clone()));
    }
    fn set_connectivity(&self, state: ConnectivityState) {
        self.record(Call::Connectivity(state));
    }
    fn set_typing(&self, typing: bool) {
        self.record(Call::Typing(typing));
    }
    fn set_unread_badge(&self, count: u32) {
        self.record(Call::Unread(count));
    }
    fn notify(&self, text: &str, severity: Severity) {
        self.record(Call::Notify(text.to_owned(), severity));
    }
    fn reset_transcript(&self, welcome_text: &str) {
        self.record(Call::Reset(welcome_text.to_owned()));
    }
    fn show_knowledge_base(&self, stats: &KnowledgeBaseStats) {
        self.record(Call::KnowledgeBase(*stats));
    }
    fn set_uploading(&self, uploading: bool) {
        self.record(Call::Uploading(uploading));
    }
    fn set_panel_open(&self, open: bool) {
        self.record(Call::Panel(open));
    }
}
