//! Wire encodings of the shared snapshot.

mod wire;

pub use wire::{MimeWire, PlatformWire, WireFormat, WireSnapshot};
