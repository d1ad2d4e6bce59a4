// Moments Core
// Rust/WASM engine for the photo gallery, message boards and story timeline

#![warn(clippy::all)]

// Модули
pub mod api;
pub mod config;
pub mod state;
pub mod storage;
pub mod utils;

// Re-exports для удобства
pub use api::{GalleryService, UploadOutcome};
pub use config::Config;
pub use state::timeline::Timeline;
pub use utils::error::{MomentsError, Result};

// WASM-specific bindings
#[cfg(target_arch = "wasm32")]
pub mod wasm;
