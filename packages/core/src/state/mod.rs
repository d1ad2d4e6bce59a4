// Состояние страниц

pub mod controls;
pub mod gallery;
pub mod timeline;
