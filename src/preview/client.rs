use crate::app::response::ErrorBody;
use crate::core::gateway::SiteGateway;
use crate::domain::model::GenerationResult;
use crate::domain::ports::GenerationBackend;
use crate::preview::document::assemble_document;
use crate::preview::frame::SandboxedFrame;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const STATUS_EMPTY_PROMPT: &str = "Please enter a prompt first.";
pub const STATUS_GENERATING: &str = "Generating...";
pub const STATUS_DONE: &str = "Done";
pub const STATUS_FAILED: &str = "Generation failed. Check console / server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Idle,
    Requesting,
    Rendered,
    Failed,
}

/// Raw fields mirrored for inspection, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    pub html: String,
    pub css: String,
    pub js: String,
    pub notes: String,
}

impl From<&GenerationResult> for Panels {
    fn from(site: &GenerationResult) -> Self {
        Self {
            html: site.html.clone(),
            css: site.css.clone(),
            js: site.js.clone(),
            notes: site.notes.clone(),
        }
    }
}

/// How the preview client reaches a gateway.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;
}

/// Calls a running gateway over HTTP.
pub struct HttpGatewayApi {
    client: Client,
    base_url: String,
}

impl HttpGatewayApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GatewayApi for HttpGatewayApi {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Server error".to_string());
            return Err(GatewayError::GatewayRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// In-process gateway, used by the CLI.
#[async_trait]
impl<B: GenerationBackend> GatewayApi for SiteGateway<B> {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.generate_site(Some(prompt)).await
    }
}

pub struct PreviewClient<A: GatewayApi> {
    api: A,
    state: ClientState,
    status: String,
    panels: Panels,
    frame: SandboxedFrame,
    last_error: Option<GatewayError>,
}

impl<A: GatewayApi> PreviewClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::Idle,
            status: String::new(),
            panels: Panels::default(),
            frame: SandboxedFrame::new(),
            last_error: None,
        }
    }

    /// Runs one generate action. Failures only change the status line; the
    /// panels and the frame keep what they showed before.
    pub async fn trigger(&mut self, prompt: &str) -> ClientState {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.state = ClientState::Idle;
            self.status = STATUS_EMPTY_PROMPT.to_string();
            return self.state;
        }

        self.state = ClientState::Requesting;
        self.status = STATUS_GENERATING.to_string();

        match self.api.generate(prompt).await {
            Ok(site) => {
                self.panels = Panels::from(&site);
                self.frame.load(assemble_document(&site));
                self.state = ClientState::Rendered;
                self.status = STATUS_DONE.to_string();
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!("Preview generation failed: {}", e);
                self.state = ClientState::Failed;
                self.status = STATUS_FAILED.to_string();
                self.last_error = Some(e);
            }
        }

        self.state
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn frame(&self) -> &SandboxedFrame {
        &self.frame
    }

    /// Hands over the error behind the latest `Failed` state, if any.
    pub fn take_last_error(&mut self) -> Option<GatewayError> {
        self.last_error.take()
    }
}
