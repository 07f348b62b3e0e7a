//! Daily broadcast generator - composes a themed morning message and pushes it
//! to every subscriber of a chat channel.
//!
//! One invocation gathers date, weather and solar-term context, asks a
//! generative model for the day's content, optionally finds a matching photo
//! and renders a calendar card, then broadcasts the assembled messages.

pub mod ai;
pub mod app;
pub mod broadcast;
pub mod config;
pub mod content;
pub mod context;
pub mod delivery;
pub mod error;
pub mod fortunes;
pub mod hosting;
pub mod media;
pub mod models;
pub mod prompts;
pub mod render;
pub mod retry;

pub use error::{Error, Result};
