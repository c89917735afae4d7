//! HTTP client for the page-rendering service.
//!
//! The service drives a headless browser and exposes one browser context per
//! session. All bodies are JSON unless noted.
//!
//! | Method | Path                          | Body                                   | Response                |
//! |--------|-------------------------------|----------------------------------------|-------------------------|
//! | POST   | `/sessions`                   | `{}`                                   | `{"id": "..."}`         |
//! | POST   | `/sessions/{id}/goto`         | `{"url"}`                              | empty                   |
//! | POST   | `/sessions/{id}/click`        | `{"role", "name", "required"}`         | `{"clicked": bool}`     |
//! | POST   | `/sessions/{id}/visible`      | `{"text"}`                             | `{"visible": bool}`     |
//! | POST   | `/sessions/{id}/hide`         | element                                | `{"hidden": n}`         |
//! | POST   | `/sessions/{id}/text`         | element                                | `{"texts": [...]}`      |
//! | POST   | `/sessions/{id}/screenshot`   | element                                | `image/png` bytes       |
//! | DELETE | `/sessions/{id}`              |                                        | empty                   |
//!
//! An element is `{"selector", "exact_text"?, "first"}`: a CSS or XPath
//! selector, optionally narrowed to nodes whose full text equals `exact_text`.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::CaptureError;

/// Selects page elements inside a session.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Element {
    pub selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_text: Option<String>,
    /// Only act on the first match.
    pub first: bool,
}

impl Element {
    pub fn css(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            exact_text: None,
            first: false,
        }
    }

    pub fn with_exact_text(mut self, text: &str) -> Self {
        self.exact_text = Some(text.to_string());
        self
    }

    pub fn first(mut self) -> Self {
        self.first = true;
        self
    }
}

#[derive(Deserialize)]
struct SessionCreated {
    id: String,
}

#[derive(Deserialize)]
struct Clicked {
    clicked: bool,
}

#[derive(Deserialize)]
struct Visible {
    visible: bool,
}

#[derive(Deserialize)]
struct Hidden {
    hidden: u32,
}

#[derive(Deserialize)]
struct Texts {
    texts: Vec<String>,
}

/// Client for the rendering service.
#[derive(Clone)]
pub struct RenderClient {
    client: reqwest::Client,
    base_url: String,
}

impl RenderClient {
    /// Create a client for the service at `base_url`, e.g. `http://localhost:9222`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Like [`new`](Self::new) but every request gives up after `timeout`.
    pub fn with_request_timeout(base_url: String, timeout: Duration) -> Result<Self, CaptureError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Open a new browser context.
    ///
    /// The session is released by [`RenderSession::close`]; if the handle is
    /// dropped first (error, timeout, cancellation) release is sent in the background.
    pub async fn open_session(&self) -> Result<RenderSession, CaptureError> {
        let url = format!("{}/sessions", self.base_url);
        let resp = self.client.post(&url).json(&json!({})).send().await?;
        let created: SessionCreated = check(resp).await?.json().await?;
        debug!(session = %created.id, "render session opened");
        Ok(RenderSession {
            client: self.client.clone(),
            session_url: format!("{}/sessions/{}", self.base_url, created.id),
            id: created.id,
            closed: false,
        })
    }
}

/// One browser context on the rendering service.
pub struct RenderSession {
    client: reqwest::Client,
    session_url: String,
    id: String,
    closed: bool,
}

impl RenderSession {
    pub async fn goto(&self, url: &Url) -> Result<(), CaptureError> {
        self.post("goto", &json!({ "url": url.as_str() })).await?;
        Ok(())
    }

    /// Click the element with the given accessible role and name.
    ///
    /// With `required = false` a missing element is not an error and the
    /// result is `false`.
    pub async fn click(
        &self,
        role: &str,
        name: &str,
        required: bool,
    ) -> Result<bool, CaptureError> {
        let body = json!({ "role": role, "name": name, "required": required });
        let result: Clicked = self.post("click", &body).await?.json().await?;
        Ok(result.clicked)
    }

    /// Whether any visible node contains `text`.
    pub async fn is_visible(&self, text: &str) -> Result<bool, CaptureError> {
        let result: Visible = self.post("visible", &json!({ "text": text })).await?.json().await?;
        Ok(result.visible)
    }

    /// Hide matching elements (`display: none`). Returns how many were hidden.
    pub async fn hide(&self, element: &Element) -> Result<u32, CaptureError> {
        let result: Hidden = self.post("hide", element).await?.json().await?;
        Ok(result.hidden)
    }

    /// Text content of every matching element.
    pub async fn texts(&self, element: &Element) -> Result<Vec<String>, CaptureError> {
        let result: Texts = self.post("text", element).await?.json().await?;
        Ok(result.texts)
    }

    /// PNG screenshot clipped to the matching element.
    pub async fn screenshot(&self, element: &Element) -> Result<Vec<u8>, CaptureError> {
        let bytes = self.post("screenshot", element).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Release the browser context. Failures are logged, not returned.
    pub async fn close(mut self) {
        self.closed = true;
        let result = match self.client.delete(&self.session_url).send().await {
            Ok(resp) => check(resp).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(()) => debug!(session = %self.id, "render session closed"),
            Err(e) => warn!(session = %self.id, error = %e, "failed to close render session"),
        }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<reqwest::Response, CaptureError> {
        let url = format!("{}/{action}", self.session_url);
        debug!(session = %self.id, action, "render command");
        let resp = self.client.post(&url).json(body).send().await?;
        check(resp).await
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(session = %self.id, "render session dropped outside a runtime, not released");
            return;
        };
        let request = self.client.delete(&self.session_url);
        let id = std::mem::take(&mut self.id);
        handle.spawn(async move {
            match request.send().await {
                Ok(_) => debug!(session = %id, "render session released after drop"),
                Err(e) => warn!(session = %id, error = %e, "failed to release render session"),
            }
        });
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, CaptureError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CaptureError::Server {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}
