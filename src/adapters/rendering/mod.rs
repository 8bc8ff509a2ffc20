//! Rendering adapters.

mod html_table_renderer;

pub use html_table_renderer::HtmlTableRenderer;
