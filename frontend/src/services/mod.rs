pub mod api;
pub mod bridges;
pub mod chart_canvas;
pub mod date_utils;
pub mod logging;

pub use api::ApiClient;
pub use logging::Logger;
