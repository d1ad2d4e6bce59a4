// WASM: DOM-страницы и точки входа для JS

pub mod bindings;
pub mod dom;
pub mod file;
pub mod gallery_page;
pub mod timeline_page;
