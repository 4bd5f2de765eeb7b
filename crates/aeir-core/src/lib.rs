//! Core types shared across the AEIR flyover crates.

mod chat;
mod settings;
mod viewport;

pub use chat::{ChatMessage, LoadingState, Role};
pub use settings::{ChatConfig, Config, FlightConfig};
pub use viewport::Viewport;
