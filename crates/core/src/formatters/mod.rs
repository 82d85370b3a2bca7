pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, render_json};
pub use text::{TextConfig, TextFormatter, render_text};
