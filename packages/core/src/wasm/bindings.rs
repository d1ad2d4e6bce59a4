// WASM bindings
//
// Каждая HTML-страница подключает модуль и вызывает свою точку входа
// после загрузки DOM (например из `<script type="module">`).

use crate::config::Config;
use crate::utils::logging;
use crate::wasm::gallery_page::GalleryPage;
use crate::wasm::timeline_page::TimelinePage;
use wasm_bindgen::prelude::*;

fn init() {
    console_error_panic_hook::set_once();
}

/// Переопределить конфигурацию (JSON) до запуска страницы
#[wasm_bindgen]
pub fn init_config(json: String) -> Result<(), JsValue> {
    let config = Config::from_json(&json)?;
    Config::init_with(config).map_err(JsValue::from_str)
}

/// Фотогалерея (`upload-form` → `#gallery`)
#[wasm_bindgen]
pub async fn start_photo_gallery() -> Result<(), JsValue> {
    init();
    GalleryPage::start(Config::global().photo_gallery.clone()).await?;
    logging::log("Photo gallery ready");
    Ok(())
}

/// Галерея сообщений с двумя досками
#[wasm_bindgen]
pub async fn start_message_gallery() -> Result<(), JsValue> {
    init();
    GalleryPage::start(Config::global().message_gallery.clone()).await?;
    logging::log("Message gallery ready");
    Ok(())
}

/// Лента историй с комментариями
#[wasm_bindgen]
pub fn start_timeline() -> Result<(), JsValue> {
    init();
    TimelinePage::start(Config::global().timeline.clone())?;
    logging::log("Timeline ready");
    Ok(())
}
