//! # wc-platform
//!
//! Access to the operating system clipboard through `clipboard-rs`.

pub mod clipboard;

pub use clipboard::SystemClipboard;
