mod kind;
mod origin;
pub mod payload;
mod snapshot;

pub use kind::ClipKind;
pub use origin::OriginPlatform;
pub use snapshot::ClipSnapshot;
