// Высокоуровневый API страниц

pub mod gallery;

pub use gallery::{GalleryService, UploadOutcome};
