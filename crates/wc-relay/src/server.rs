use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use wc_core::ports::ClockPort;
use wc_core::RelayConfig;

use crate::routes::{router, RelayState};
use crate::store::RelayStore;

/// Bound relay, ready to serve.
pub struct RelayServer {
    listener: TcpListener,
    app: Router,
}

impl RelayServer {
    pub async fn bind(config: &RelayConfig, clock: Arc<dyn ClockPort>) -> io::Result<Self> {
        let listener = TcpListener::bind(&config.listen).await?;
        let store = Arc::new(RelayStore::new(config.reject_stale));
        let app = router(RelayState::new(store, clock), config.max_body_bytes);

        Ok(Self { listener, app })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn run<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %self.local_addr()?, "Clipboard relay listening");
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Clipboard relay stopped");
        Ok(())
    }
}
