use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing 'prompt' in request body.")]
    InvalidPrompt,

    #[error("Upstream request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Model returned no candidates{}", block_suffix(.reason))]
    EmptyCandidates { reason: Option<String> },

    #[error("Model request timed out after {after:?}")]
    Timeout { after: std::time::Duration },

    #[error("Model did not return valid JSON: {reason}")]
    MalformedOutput { reason: String },

    #[error("Gateway responded {status}: {message}")]
    GatewayRejected { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn block_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" (blocked: {})", r))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    UpstreamContract,
    UpstreamAvailability,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GatewayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::InvalidPrompt => ErrorCategory::Input,
            GatewayError::MalformedOutput { .. } => ErrorCategory::UpstreamContract,
            GatewayError::UpstreamTransport(_)
            | GatewayError::UpstreamStatus { .. }
            | GatewayError::EmptyCandidates { .. }
            | GatewayError::Timeout { .. }
            | GatewayError::GatewayRejected { .. } => ErrorCategory::UpstreamAvailability,
            GatewayError::ConfigError { .. }
            | GatewayError::MissingConfigError { .. }
            | GatewayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GatewayError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::UpstreamAvailability => ErrorSeverity::Medium,
            ErrorCategory::UpstreamContract | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP status the handler boundary reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Input => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GatewayError::InvalidPrompt => {
                "Send a JSON body with a non-empty \"prompt\" string".to_string()
            }
            GatewayError::UpstreamTransport(_) => {
                "Check network connectivity and the configured model endpoint".to_string()
            }
            GatewayError::UpstreamStatus { status, .. } => match *status {
                401 | 403 => "Check that model.api_key is valid".to_string(),
                404 => "Check that model.model names an available model".to_string(),
                429 => "The model API quota is exhausted; try again later".to_string(),
                _ => "The model API rejected the request; try again later".to_string(),
            },
            GatewayError::EmptyCandidates { .. } => {
                "Rephrase the prompt; the model produced no output for it".to_string()
            }
            GatewayError::Timeout { .. } => {
                "Raise model.timeout_seconds or try a shorter prompt".to_string()
            }
            GatewayError::MalformedOutput { .. } => {
                "Try again; the model ignored the response schema".to_string()
            }
            GatewayError::GatewayRejected { status, .. } => match *status {
                400 => "Enter a prompt before generating".to_string(),
                413 => "Shorten the prompt; the request body is over the size limit".to_string(),
                s if s < 500 => "Check the gateway URL and request format".to_string(),
                _ => "Check the server logs".to_string(),
            },
            GatewayError::IoError(_) => "Check file paths and permissions".to_string(),
            GatewayError::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            GatewayError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or environment", field)
            }
            GatewayError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::UpstreamContract => {
                "The model returned output that is not valid JSON".to_string()
            }
            ErrorCategory::UpstreamAvailability => {
                format!("The model API is unavailable: {}", self)
            }
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
