//! HTTP client for Gradio-served inference spaces.
//!
//! Implements the `Space` trait over the two-step call API exposed under
//! `/gradio_api/call/{name}`. Split into connection setup (`client`),
//! query dispatch (`api`), and configuration (`config`).

pub mod config;

mod api;
mod client;

pub use client::SpaceClient;
pub use config::SpaceConfig;
