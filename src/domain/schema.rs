use serde::Serialize;
use serde_json::{json, Map, Value};

pub const FIELD_HTML: &str = "html";
pub const FIELD_CSS: &str = "css";
pub const FIELD_JS: &str = "js";
pub const FIELD_NOTES: &str = "notes";

/// Declared shape of the model's output: an object of string properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseSchema {
    pub properties: Vec<String>,
    pub required: Vec<String>,
    pub property_ordering: Vec<String>,
}

impl ResponseSchema {
    /// `html`, `css`, `js` required; `notes` optional; declared in that order.
    pub fn site() -> Self {
        let all: Vec<String> = [FIELD_HTML, FIELD_CSS, FIELD_JS, FIELD_NOTES]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            properties: all.clone(),
            required: all[..3].to_vec(),
            property_ordering: all,
        }
    }

    /// Renders the schema in the generateContent `responseSchema` dialect.
    pub fn to_gemini_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|name| (name.clone(), json!({ "type": "STRING" })))
            .collect();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": self.required,
            "propertyOrdering": self.property_ordering,
        })
    }
}
