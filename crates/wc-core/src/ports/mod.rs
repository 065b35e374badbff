//! Port interfaces for the application layer
//!
//! Ports define the contract between the sync use cases and the
//! infrastructure/platform implementations (OS clipboard, HTTP relay client,
//! image codec, wall clock).

mod clipboard;
mod clock;
mod image;
mod transport;

pub use clipboard::{ClipboardWatch, LocalClipboardPort};
pub use clock::ClockPort;
pub use image::ImageNormalizerPort;
pub use transport::SyncTransportPort;
