pub mod gateway;
pub mod prompt;

pub use crate::domain::model::{GenerationRequest, GenerationResult};
pub use crate::domain::ports::GenerationBackend;
pub use crate::domain::schema::ResponseSchema;
pub use crate::utils::error::Result;
