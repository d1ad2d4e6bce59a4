//! `data:` URL helpers.
//!
//! Uploaded files are kept as base64 data URLs so a stored record can be
//! assigned straight to an `<img src>` without any blob bookkeeping.

use crate::utils::b64;

/// Used when the browser reports no MIME type for the selected file.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Encode raw file bytes as a base64 data URL.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() { FALLBACK_MIME } else { mime.trim() };
    format!("data:{};base64,{}", mime, b64::encode(bytes))
}
