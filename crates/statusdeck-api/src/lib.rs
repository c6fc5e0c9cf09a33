// statusdeck-api: Async Rust client for the server status checker REST API

pub mod client;
pub mod error;
pub mod models;
mod servers;
mod statuses;
pub mod transport;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use models::{
    ServerBody, ServerRef, ServerResponse, StatusCheckBody, StatusCreateBody, StatusResponse,
    StatusUpdateBody,
};
pub use transport::TransportConfig;
