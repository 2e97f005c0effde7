use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::domain::ports::{QrRenderer, StatusDisplay, TokenVerifier};
use crate::domain::status::{StatusPanel, StatusView};
use crate::domain::verification::{Token, UserInfo, VerifyResponse};

// Reply the scripted verifier gives to every call.
#[derive(Clone)]
pub(crate) enum Reply {
    Respond(VerifyResponse),
    Fail,
}

pub(crate) fn valid_reply(name: &str, email: &str, already_redeemed: bool) -> Reply {
    Reply::Respond(VerifyResponse {
        valid: true,
        already_redeemed,
        redeemed: true,
        user: Some(UserInfo::new(name, email)),
    })
}

pub(crate) fn invalid_reply() -> Reply {
    Reply::Respond(VerifyResponse::default())
}

// Verifier double that records every token and can hold requests in flight.
#[derive(Clone)]
pub(crate) struct ScriptedVerifier {
    reply: Arc<Mutex<Reply>>,
    calls: Arc<Mutex<Vec<Token>>>,
    release: Option<Arc<Semaphore>>,
}

impl ScriptedVerifier {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply: Arc::new(Mutex::new(reply)),
            calls: Arc::new(Mutex::new(Vec::new())),
            release: None,
        }
    }

    // Requests block until `release_one` is called.
    pub(crate) fn held(mut self) -> Self {
        self.release = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub(crate) fn release_one(&self) {
        if let Some(release) = &self.release {
            release.add_permits(1);
        }
    }

    pub(crate) fn set_reply(&self, reply: Reply) {
        *self.reply.lock().expect("reply mutex poisoned") = reply;
    }

    pub(crate) fn calls(&self) -> Vec<Token> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl TokenVerifier for ScriptedVerifier {
    async fn verify(
        &self,
        token: &Token,
    ) -> Result<VerifyResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(token.clone());

        if let Some(release) = &self.release {
            release
                .acquire()
                .await
                .expect("release semaphore closed")
                .forget();
        }

        let reply = self.reply.lock().expect("reply mutex poisoned").clone();
        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail => Err(Box::new(std::io::Error::other("connection refused"))),
        }
    }
}

// Display double that keeps the panel state and every rendered view.
#[derive(Clone, Default)]
pub(crate) struct RecordingDisplay {
    panel: Arc<Mutex<StatusPanel>>,
    views: Arc<Mutex<Vec<StatusView>>>,
}

impl RecordingDisplay {
    pub(crate) fn panel(&self) -> StatusPanel {
        self.panel.lock().expect("panel mutex poisoned").clone()
    }

    pub(crate) fn views(&self) -> Vec<StatusView> {
        self.views.lock().expect("views mutex poisoned").clone()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn render(&self, view: &StatusView) {
        self.panel
            .lock()
            .expect("panel mutex poisoned")
            .apply(view);
        self.views
            .lock()
            .expect("views mutex poisoned")
            .push(view.clone());
    }
}

// Display double whose render always panics.
pub(crate) struct PanickingDisplay;

impl StatusDisplay for PanickingDisplay {
    fn render(&self, _view: &StatusView) {
        panic!("display unavailable");
    }
}

// Renderer double producing a predictable document per token.
pub(crate) struct EchoRenderer;

impl QrRenderer for EchoRenderer {
    fn render(&self, token: &Token) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        if token.as_str().is_empty() {
            return Err("nothing to encode".into());
        }
        Ok(format!("<svg data-token=\"{token}\"/>"))
    }
}
