// Логирование

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(message: &str) {
    tracing::info!("{}", message);
}

#[cfg(target_arch = "wasm32")]
pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(message: &str) {
    tracing::error!("{}", message);
}
