mod backend;
mod session;
mod widget;

pub use backend::GeminiBackend;
pub use widget::ChatWidget;
