pub mod sync_inbound;
pub mod sync_outbound;

pub use sync_inbound::{InboundOutcome, SyncInboundClipboardUseCase};
pub use sync_outbound::{OutboundOutcome, SyncOutboundClipboardUseCase};
