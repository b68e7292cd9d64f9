//! Google Gemini backend.
//!
//! Implements `GenerationClient` against the Generative Language API
//! `generateContent` endpoint for both chat and image models.

mod api;
mod client;
mod config;


pub use client::GeminiClient;
pub use config::GeminiConfig;
