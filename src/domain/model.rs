use crate::domain::schema::{ResponseSchema, FIELD_CSS, FIELD_HTML, FIELD_JS, FIELD_NOTES};
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The four fragments of a generated single-page site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default)]
    pub notes: String,
}

impl GenerationResult {
    /// Builds a result from the model's JSON object.
    ///
    /// Absent, null or non-string fields become `""`. With `strict` set, a
    /// required field that is absent is a contract violation instead.
    pub fn from_fields(fields: &Map<String, Value>, schema: &ResponseSchema, strict: bool) -> Result<Self> {
        if strict {
            let missing: Vec<&str> = schema
                .required
                .iter()
                .map(String::as_str)
                .filter(|name| !matches!(fields.get(*name), Some(Value::String(_))))
                .collect();
            if !missing.is_empty() {
                return Err(GatewayError::MalformedOutput {
                    reason: format!("missing required fields: {}", missing.join(", ")),
                });
            }
        }

        let text = |name: &str| -> String {
            match fields.get(name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => {
                    tracing::warn!("Ignoring non-string '{}' field from model: {}", name, other);
                    String::new()
                }
            }
        };

        Ok(Self {
            html: text(FIELD_HTML),
            css: text(FIELD_CSS),
            js: text(FIELD_JS),
            notes: text(FIELD_NOTES),
        })
    }
}

/// Everything the model collaborator needs for one call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub instruction: String,
    pub schema: ResponseSchema,
}
