//! Agent transport and sync engine against a real relay on a loopback port.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wc_core::ports::SyncTransportPort;
use wc_core::{
    AgentConfig, ClipKind, ClipSnapshot, OriginPlatform, RelayConfig, TransportError, WireFormat,
};
use wc_infra::{InMemoryClipboard, SystemClock};
use wc_network::HttpSyncTransport;
use wc_relay::RelayServer;
use wclip_lib::bootstrap::build_engine;

struct TestRelay {
    url: String,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl TestRelay {
    async fn start() -> Self {
        let config = RelayConfig {
            listen: "127.0.0.1:0".to_string(),
            ..Default::default()
        };
        let server = RelayServer::bind(&config, Arc::new(SystemClock))
            .await
            .unwrap();
        let url = format!("http://{}", server.local_addr().unwrap());
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(server.run(async move {
            let _ = stopped.await;
        }));

        Self {
            url,
            stop: Some(stop),
            task,
        }
    }

    fn transport(&self) -> HttpSyncTransport {
        HttpSyncTransport::new(
            &self.url,
            WireFormat::Mime,
            Duration::from_secs(2),
            Arc::new(SystemClock),
        )
        .unwrap()
    }

    async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.await.unwrap().unwrap();
    }
}

fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 20) as u8, (y * 40) as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Jpeg).unwrap();
    out.into_inner()
}

#[tokio::test]
async fn pushed_snapshot_is_served_back() {
    let relay = TestRelay::start().await;
    let transport = relay.transport();

    transport
        .push(&ClipSnapshot::text("hello", 100))
        .await
        .unwrap();

    assert_eq!(
        transport.pull().await.unwrap(),
        ClipSnapshot::text("hello", 100)
    );
    relay.stop().await;
}

#[tokio::test]
async fn whitespace_push_is_refused_and_relay_keeps_its_value() {
    let relay = TestRelay::start().await;
    let transport = relay.transport();
    transport.push(&ClipSnapshot::text("kept", 10)).await.unwrap();

    let result = transport.push(&ClipSnapshot::text("   \n", 11)).await;

    assert!(matches!(result, Err(TransportError::Status(400))));
    assert_eq!(transport.pull().await.unwrap(), ClipSnapshot::text("kept", 10));
    relay.stop().await;
}

#[tokio::test]
async fn remote_jpeg_lands_as_png_of_the_same_size() {
    let relay = TestRelay::start().await;
    let jpeg = sample_jpeg(12, 7);
    relay
        .transport()
        .push(&ClipSnapshot::new(ClipKind::Image, STANDARD.encode(&jpeg), 500))
        .await
        .unwrap();

    let clipboard = Arc::new(InMemoryClipboard::new());
    let config = AgentConfig {
        relay_url: relay.url.clone(),
        poll_interval_ms: 20,
        ..Default::default()
    };
    let handle = build_engine(&config, clipboard.clone())
        .unwrap()
        .start(CancellationToken::new())
        .unwrap();

    let mut written = None;
    for _ in 0..100 {
        written = clipboard.current(ClipKind::Image);
        if written.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    handle.shutdown().await;

    let png = written.expect("image should have been applied");
    assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (12, 7));
    relay.stop().await;
}

#[tokio::test]
async fn local_copy_reaches_the_relay() {
    let relay = TestRelay::start().await;
    let clipboard = Arc::new(InMemoryClipboard::new());
    let config = AgentConfig {
        relay_url: format!("{}/clip", relay.url),
        poll_interval_ms: 20,
        ..Default::default()
    };
    let handle = build_engine(&config, clipboard.clone())
        .unwrap()
        .start(CancellationToken::new())
        .unwrap();

    clipboard.user_copy(ClipKind::Text, "  from this device \n");

    let transport = relay.transport();
    let mut seen = ClipSnapshot::default();
    for _ in 0..100 {
        seen = transport.pull().await.unwrap();
        if !seen.is_blank() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    handle.shutdown().await;

    assert_eq!(seen.content, "from this device");
    assert!(seen.timestamp > 0);
    // Our own push must not come back as a local write.
    assert!(clipboard.writes().is_empty());
    relay.stop().await;
}

#[tokio::test]
async fn phone_push_after_rapid_local_copies_is_applied() {
    let relay = TestRelay::start().await;
    let clipboard = Arc::new(InMemoryClipboard::new());
    let config = AgentConfig {
        relay_url: relay.url.clone(),
        poll_interval_ms: 20,
        ..Default::default()
    };
    let handle = build_engine(&config, clipboard.clone())
        .unwrap()
        .start(CancellationToken::new())
        .unwrap();

    // Back-to-back copies push the agent's timestamps ahead of wall time.
    let mime = relay.transport();
    for i in 0..4 {
        let content = format!("local {i}");
        clipboard.user_copy(ClipKind::Text, content.as_str());
        for _ in 0..100 {
            if mime.pull().await.unwrap().content == content {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
    let before = mime.pull().await.unwrap();
    assert_eq!(before.content, "local 3");

    let phone = HttpSyncTransport::new(
        &relay.url,
        WireFormat::Platform(OriginPlatform::Android),
        Duration::from_secs(2),
        Arc::new(SystemClock),
    )
    .unwrap();
    phone
        .push(&ClipSnapshot::text("from phone", 0))
        .await
        .unwrap();
    assert!(mime.pull().await.unwrap().timestamp > before.timestamp);

    let mut applied = None;
    for _ in 0..100 {
        applied = clipboard.current(ClipKind::Text);
        if applied.as_deref() == Some(b"from phone".as_slice()) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    handle.shutdown().await;

    assert_eq!(applied, Some(b"from phone".to_vec()));
    relay.stop().await;
}
