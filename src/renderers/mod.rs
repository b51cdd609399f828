pub mod ascii_renderer;
pub mod font;
pub mod png_renderer;

pub use ascii_renderer::AsciiRenderer;
pub use png_renderer::PngRenderer;
