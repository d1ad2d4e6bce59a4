// Чтение выбранного файла в data URL

use crate::utils::data_url;
use crate::utils::error::{js_error, Result};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

/// Первый файл из `<input type="file">`
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

pub async fn read_as_data_url(file: &File) -> Result<String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error(&format!("Failed to read {}", file.name()), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    tracing::debug!(name = %file.name(), size = bytes.len(), "file read");
    Ok(data_url::encode(&file.type_(), &bytes))
}
