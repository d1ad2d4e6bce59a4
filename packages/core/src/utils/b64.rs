// Base64 утилиты

use base64::{engine::general_purpose, Engine};

pub fn encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}
