//! Preview client: turns a [`GenerationResult`](crate::domain::model::GenerationResult)
//! into one document and renders it in a sandboxed frame.
//!
//! Generated script only ever runs inside an `<iframe sandbox="allow-scripts">`
//! loaded through `srcdoc`. Without `allow-same-origin` the frame gets an
//! opaque origin, so nothing it runs can reach the hosting page.

pub mod client;
pub mod document;
pub mod frame;
pub mod host;

pub use client::{ClientState, GatewayApi, HttpGatewayApi, Panels, PreviewClient};
pub use document::assemble_document;
pub use frame::SandboxedFrame;
