pub mod clipboard;
pub mod image;
pub mod time;

pub use clipboard::InMemoryClipboard;
pub use image::PngImageNormalizer;
pub use time::SystemClock;
