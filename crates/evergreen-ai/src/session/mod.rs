//! Single-flight sessions for the AI-backed views.
//!
//! A session owns one feature's state, admits at most one request at a
//! time, and absorbs every backend failure into state the host can render.
//! `ChatSession` appends to a transcript; `VisualizationSession` replaces a
//! single result slot. Both run on the same [`FlightSession`] machinery.

mod chat;
mod flight;
mod types;
mod visualize;


pub use chat::{ChatSession, Message, Transcript, EMPTY_REPLY_FALLBACK, ERROR_FALLBACK};
pub use flight::{FlightPolicy, FlightSession};
pub use types::{IgnoreReason, SubmitOutcome};
pub use visualize::{
    Canvas, VisualizationSession, NO_DESIGN_NOTICE, VISUALIZATION_FAILED_ALERT,
};
