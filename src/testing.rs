/// In-memory hosts and clients for unit tests
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::badge::BadgeState;
use crate::error::ExtensionError;
use crate::host::{BadgeSink, CountsClient, HostEvents, PreviewClient, PreviewTarget, TabHost};
use crate::sync::decode_counts;
use crate::tab_data::{CreateTabProperties, DiscussionCounts, TabInfo, TabUrlChanged};

/// Give the other branches of a `join!` one turn
pub fn yield_now() -> impl Future<Output = ()> {
    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    YieldNow(false)
}

/// Serves canned bodies by page URL; unknown URLs get an empty body
#[derive(Default)]
pub struct FakeCountsClient {
    replies: HashMap<String, Result<String, String>>,
    gated: RefCell<HashMap<String, oneshot::Receiver<String>>>,
    requests: RefCell<Vec<String>>,
}

impl FakeCountsClient {
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.replies.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_error(mut self, url: &str, error: ExtensionError) -> Self {
        self.replies.insert(url.to_string(), Err(error.to_string()));
        self
    }

    /// Hold the reply for `url` until the test sends its body
    pub fn with_gate(self, url: &str, body: oneshot::Receiver<String>) -> Self {
        self.gated.borrow_mut().insert(url.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl CountsClient for FakeCountsClient {
    async fn discussion_counts(
        &self,
        url: &str,
    ) -> Result<Option<DiscussionCounts>, ExtensionError> {
        self.requests.borrow_mut().push(url.to_string());
        yield_now().await;

        let gate = self.gated.borrow_mut().remove(url);
        if let Some(gate) = gate {
            let body = gate
                .await
                .map_err(|_| ExtensionError::Transport("request dropped".to_string()))?;
            return decode_counts(&body);
        }

        match self.replies.get(url) {
            Some(Ok(body)) => decode_counts(body),
            Some(Err(message)) => Err(ExtensionError::Transport(message.clone())),
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct FakeBadgeSink {
    applied: RefCell<Vec<(i32, BadgeState)>>,
    fail: bool,
}

impl FakeBadgeSink {
    pub fn failing() -> Self {
        FakeBadgeSink {
            applied: RefCell::default(),
            fail: true,
        }
    }

    pub fn applied(&self) -> Vec<(i32, BadgeState)> {
        self.applied.borrow().clone()
    }
}

impl BadgeSink for FakeBadgeSink {
    async fn apply_badge(&self, tab_id: i32, badge: &BadgeState) -> Result<(), ExtensionError> {
        if self.fail {
            return Err(ExtensionError::Host("No tab with id".to_string()));
        }
        self.applied.borrow_mut().push((tab_id, badge.clone()));
        Ok(())
    }
}

pub struct FakeTabHost {
    tabs: Result<Vec<TabInfo>, String>,
    created: RefCell<Vec<CreateTabProperties>>,
    attempts: Cell<usize>,
    fail_at: Option<usize>,
}

impl FakeTabHost {
    pub fn with_tabs(tabs: Vec<TabInfo>) -> Self {
        FakeTabHost {
            tabs: Ok(tabs),
            created: RefCell::default(),
            attempts: Cell::new(0),
            fail_at: None,
        }
    }

    pub fn failing_query(error: ExtensionError) -> Self {
        FakeTabHost {
            tabs: Err(error.to_string()),
            ..FakeTabHost::with_tabs(Vec::new())
        }
    }

    /// Reject the n-th `create_tab` call
    pub fn failing_create_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn created(&self) -> Vec<CreateTabProperties> {
        self.created.borrow().clone()
    }
}

impl TabHost for FakeTabHost {
    async fn active_tabs(&self) -> Result<Vec<TabInfo>, ExtensionError> {
        self.tabs.clone().map_err(ExtensionError::Host)
    }

    async fn create_tab(&self, properties: &CreateTabProperties) -> Result<(), ExtensionError> {
        let attempt = self.attempts.get();
        self.attempts.set(attempt + 1);

        if self.fail_at == Some(attempt) {
            return Err(ExtensionError::Host("Tabs cannot be edited right now".to_string()));
        }
        self.created.borrow_mut().push(properties.clone());
        Ok(())
    }
}

enum PreviewReplies {
    Ready(VecDeque<Result<String, ExtensionError>>),
    Pending(VecDeque<oneshot::Receiver<Result<String, ExtensionError>>>),
}

/// Answers preview requests in order, either immediately or when the test resolves them
pub struct FakePreviewClient {
    replies: RefCell<PreviewReplies>,
    bodies: RefCell<Vec<String>>,
}

impl FakePreviewClient {
    pub fn ready(replies: Vec<Result<String, ExtensionError>>) -> Self {
        FakePreviewClient {
            replies: RefCell::new(PreviewReplies::Ready(replies.into())),
            bodies: RefCell::default(),
        }
    }

    pub fn pending(receivers: Vec<oneshot::Receiver<Result<String, ExtensionError>>>) -> Self {
        FakePreviewClient {
            replies: RefCell::new(PreviewReplies::Pending(receivers.into())),
            bodies: RefCell::default(),
        }
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.borrow().clone()
    }
}

impl PreviewClient for FakePreviewClient {
    async fn render_preview(&self, body: &str) -> Result<String, ExtensionError> {
        self.bodies.borrow_mut().push(body.to_string());

        let receiver = match &mut *self.replies.borrow_mut() {
            PreviewReplies::Ready(replies) => {
                return replies.pop_front().unwrap_or_else(|| {
                    Err(ExtensionError::Transport("no reply queued".to_string()))
                });
            }
            PreviewReplies::Pending(receivers) => receivers.pop_front(),
        };

        match receiver {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ExtensionError::Transport("request dropped".to_string()))),
            None => Err(ExtensionError::Transport("no reply queued".to_string())),
        }
    }
}

/// Keeps every value the preview container was set to
#[derive(Default)]
pub struct RecordingTarget {
    history: RefCell<Vec<String>>,
}

impl RecordingTarget {
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    pub fn current(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl PreviewTarget for RecordingTarget {
    fn replace_contents(&self, html: &str) {
        self.history.borrow_mut().push(html.to_string());
    }
}

/// Stores the registered handlers so tests can fire events by hand
#[derive(Default)]
pub struct FakeEvents {
    url_changed: RefCell<Vec<Box<dyn Fn(TabUrlChanged)>>>,
    action: RefCell<Vec<Box<dyn Fn()>>>,
}

impl FakeEvents {
    pub fn change_url(&self, tab_id: i32, url: Option<&str>) {
        for handler in self.url_changed.borrow().iter() {
            handler(TabUrlChanged {
                tab_id,
                url: url.map(str::to_string),
            });
        }
    }

    pub fn click_action(&self) {
        for handler in self.action.borrow().iter() {
            handler();
        }
    }
}

impl HostEvents for FakeEvents {
    fn on_tab_url_changed(&self, handler: Box<dyn Fn(TabUrlChanged)>) {
        self.url_changed.borrow_mut().push(handler);
    }

    fn on_action_invoked(&self, handler: Box<dyn Fn()>) {
        self.action.borrow_mut().push(handler);
    }
}
