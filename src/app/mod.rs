// Application layer: the HTTP surface around the gateway.

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{build_router, serve, AppState};
