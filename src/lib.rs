pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod preview;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Cli, Command};

pub use adapters::GeminiClient;
pub use app::build_router;
pub use config::GatewayConfig;
pub use core::gateway::{GatewaySettings, SiteGateway};
pub use domain::model::{GenerationRequest, GenerationResult};
pub use domain::ports::GenerationBackend;
pub use preview::PreviewClient;
pub use utils::error::{GatewayError, Result};
