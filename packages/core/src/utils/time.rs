// Время

/// Текущее время в миллисекундах с начала эпохи (как `Date.now()`)
pub fn current_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
