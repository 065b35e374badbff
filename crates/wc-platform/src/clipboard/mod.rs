mod system;
mod watcher;

pub use system::SystemClipboard;
