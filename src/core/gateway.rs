use crate::core::prompt::build_instruction;
use crate::core::{GenerationBackend, GenerationRequest, GenerationResult, ResponseSchema, Result};
use crate::utils::error::GatewayError;
use crate::utils::validation::validate_prompt;
use serde_json::Value;
use std::time::Duration;

/// Per-gateway knobs, fixed at startup.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub model: String,
    pub timeout: Duration,
    pub strict_schema: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            timeout: Duration::from_secs(60),
            strict_schema: false,
        }
    }
}

/// Turns a prompt into a [`GenerationResult`] with one call to the backend.
pub struct SiteGateway<B: GenerationBackend> {
    backend: B,
    settings: GatewaySettings,
    schema: ResponseSchema,
}

impl<B: GenerationBackend> SiteGateway<B> {
    pub fn new(backend: B, settings: GatewaySettings) -> Self {
        Self {
            backend,
            settings,
            schema: ResponseSchema::site(),
        }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    pub async fn generate_site(&self, prompt: Option<&str>) -> Result<GenerationResult> {
        let prompt = validate_prompt(prompt).inspect_err(|_| {
            tracing::warn!("Rejected generation request with an empty prompt");
        })?;

        let request = GenerationRequest {
            model: self.settings.model.clone(),
            instruction: build_instruction(prompt),
            schema: self.schema.clone(),
        };

        tracing::info!(
            "Requesting site from {} ({} prompt chars)",
            request.model,
            prompt.chars().count()
        );

        let text = match tokio::time::timeout(self.settings.timeout, self.backend.generate(&request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(GatewayError::Timeout {
                    after: self.settings.timeout,
                })
            }
        };

        tracing::debug!("Model returned {} bytes", text.len());

        let site = parse_model_output(&text, &self.schema, self.settings.strict_schema)
            .inspect_err(|e| tracing::error!("Failed to parse model JSON: {}", e))?;

        tracing::info!(
            "Generated site: html={}B css={}B js={}B",
            site.html.len(),
            site.css.len(),
            site.js.len()
        );
        Ok(site)
    }
}

/// Parse-or-fail for the model's raw text. Anything that is not a JSON
/// object is an upstream contract violation; nothing is repaired.
pub fn parse_model_output(
    text: &str,
    schema: &ResponseSchema,
    strict: bool,
) -> Result<GenerationResult> {
    let value: Value = serde_json::from_str(text).map_err(|e| GatewayError::MalformedOutput {
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(fields) => GenerationResult::from_fields(&fields, schema, strict),
        other => Err(GatewayError::MalformedOutput {
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
