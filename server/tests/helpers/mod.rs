//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router,
//! backed by in-memory Slack and TimeBomb fakes that record every call.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{request, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use liner_common::{DeletionNotice, ItemRef, PostResult};
use liner_server::api::{create_router, AppState};
use liner_server::queue::{NoticePublisher, QueueError};
use liner_server::relay::Dispatcher;
use liner_server::slack::{ChatApi, OutboundMessage, SlackError};
use tower::ServiceExt;

/// Channel ID the fake Slack assigns to every post.
pub const PLATFORM_CHANNEL: &str = "C024BE91L";

/// Timestamp the fake Slack assigns to every post.
pub const PLATFORM_TS: &str = "1401383885.000061";

/// A recorded Slack call.
#[derive(Debug, Clone, PartialEq)]
pub enum SlackCall {
    Post {
        channel: String,
        message: OutboundMessage,
    },
    AddReaction {
        name: String,
        item: ItemRef,
    },
    RemoveReaction {
        name: String,
        item: ItemRef,
    },
}

/// In-memory stand-in for the Slack Web API.
#[derive(Default)]
pub struct FakeSlack {
    pub calls: Mutex<Vec<SlackCall>>,
    /// When set, every call fails with this Slack error code.
    pub fail_with: Option<&'static str>,
}

impl FakeSlack {
    pub fn calls(&self) -> Vec<SlackCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, call: SlackCall) -> Result<(), SlackError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(error) => Err(SlackError::Api {
                method,
                error: error.into(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChatApi for FakeSlack {
    async fn post_message(
        &self,
        channel: &str,
        message: &OutboundMessage,
    ) -> Result<PostResult, SlackError> {
        self.record(
            "chat.postMessage",
            SlackCall::Post {
                channel: channel.into(),
                message: message.clone(),
            },
        )?;
        Ok(PostResult {
            channel: PLATFORM_CHANNEL.into(),
            ts: PLATFORM_TS.into(),
        })
    }

    async fn add_reaction(&self, name: &str, item: &ItemRef) -> Result<(), SlackError> {
        self.record(
            "reactions.add",
            SlackCall::AddReaction {
                name: name.into(),
                item: item.clone(),
            },
        )
    }

    async fn remove_reaction(&self, name: &str, item: &ItemRef) -> Result<(), SlackError> {
        self.record(
            "reactions.remove",
            SlackCall::RemoveReaction {
                name: name.into(),
                item: item.clone(),
            },
        )
    }
}

/// In-memory stand-in for the TimeBomb channel.
#[derive(Default)]
pub struct FakeNotices {
    pub published: Mutex<Vec<DeletionNotice>>,
}

impl FakeNotices {
    pub fn published(&self) -> Vec<DeletionNotice> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoticePublisher for FakeNotices {
    async fn publish(&self, notice: &DeletionNotice) -> Result<(), QueueError> {
        self.published.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// The full router wired to fakes.
pub struct TestApp {
    pub router: Router,
    pub slack: Arc<FakeSlack>,
    pub notices: Arc<FakeNotices>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_slack(FakeSlack::default())
    }

    /// A test app whose Slack calls all fail with `error`.
    pub fn failing(error: &'static str) -> Self {
        Self::with_slack(FakeSlack {
            fail_with: Some(error),
            ..FakeSlack::default()
        })
    }

    fn with_slack(slack: FakeSlack) -> Self {
        let slack = Arc::new(slack);
        let notices = Arc::new(FakeNotices::default());
        let dispatcher = Arc::new(Dispatcher::new(slack.clone(), notices.clone()));
        let router = create_router(AppState::new(dispatcher));
        Self {
            router,
            slack,
            notices,
        }
    }

    /// Start building a request.
    pub fn request(method: Method, uri: &str) -> request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// `POST /message` with a raw body.
    pub fn post_message(body: impl Into<Body>) -> Request<Body> {
        Self::request(Method::POST, "/message")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    /// Send one request through the router.
    pub async fn oneshot(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }
}

/// Read a response body as a string.
pub async fn body_to_string(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_to_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_to_string(resp).await).unwrap()
}
