pub mod b64;
pub mod data_url;
pub mod error;
pub mod logging;
pub mod time;
pub mod validation;
