use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Form, Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;
use wc_core::ports::ClockPort;
use wc_core::protocol::MimeWire;
use wc_core::{ClipKind, ClipSnapshot, WireSnapshot};

use crate::error::RelayError;
use crate::store::RelayStore;

#[derive(Clone)]
pub struct RelayState {
    store: Arc<RelayStore>,
    clock: Arc<dyn ClockPort>,
}

impl RelayState {
    pub fn new(store: Arc<RelayStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }
}

/// `/clip` plus a 403 for everything else.
///
/// There is no authentication and no rate limiting: any peer that can reach
/// the listener can read the shared clipboard and overwrite it. Bind the relay
/// only on networks where every reachable host is trusted.
pub fn router(state: RelayState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/clip", get(get_clip).post(post_clip))
        .fallback(forbidden)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_clip(State(state): State<RelayState>) -> Json<MimeWire> {
    Json(MimeWire::from(state.store.get()))
}

async fn post_clip(
    State(state): State<RelayState>,
    request: Request,
) -> Result<&'static str, RelayError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    let now = state.clock.now_secs();

    let snapshot = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|rejection| RelayError::Body {
                status: rejection.status(),
                reason: rejection.body_text(),
            })?;
        read_multipart(multipart).await?
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<FormFields>::from_request(request, &state)
            .await
            .map_err(|rejection| RelayError::Body {
                status: rejection.status(),
                reason: rejection.body_text(),
            })?;
        fields.into_snapshot(None)?
    } else {
        let body = Bytes::from_request(request, &state)
            .await
            .map_err(|rejection| RelayError::Body {
                status: rejection.status(),
                reason: rejection.body_text(),
            })?;
        // Platform bodies carry no timestamp; the store stamps them.
        WireSnapshot::from_json(&body)?.into_snapshot(0)
    };

    let (kind, bytes) = (snapshot.mime, snapshot.content.len());
    let timestamp = state.store.put_stamped(snapshot, now)?;
    info!(kind = %kind, timestamp, bytes, "Stored clipboard snapshot");
    Ok("ok")
}

async fn forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}

/// Text fields of a form post. The timestamp stays a string so a bad value
/// is reported like any other malformed field.
#[derive(Debug, Default, Deserialize)]
struct FormFields {
    content: Option<String>,
    mime: Option<String>,
    timestamp: Option<String>,
}

impl FormFields {
    /// An uploaded file replaces the text content and, absent an explicit
    /// mime, marks the snapshot as an image.
    fn into_snapshot(self, file: Option<Bytes>) -> Result<ClipSnapshot, RelayError> {
        let mime = match self.mime.as_deref().map(str::trim) {
            Some(mime) if !mime.is_empty() => mime.parse::<ClipKind>()?,
            _ if file.is_some() => ClipKind::Image,
            _ => ClipKind::Text,
        };

        let timestamp = match self.timestamp.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<i64>().map_err(|e| RelayError::Form {
                field: "timestamp",
                reason: e.to_string(),
            })?,
            _ => 0,
        };

        let content = match file {
            Some(bytes) => STANDARD.encode(&bytes),
            None => self.content.unwrap_or_default(),
        };

        Ok(ClipSnapshot::new(mime, content, timestamp))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ClipSnapshot, RelayError> {
    let mut fields = FormFields::default();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "content" => fields.content = Some(field.text().await?),
            "mime" => fields.mime = Some(field.text().await?),
            "timestamp" => fields.timestamp = Some(field.text().await?),
            "file" => file = Some(field.bytes().await?),
            _ => {}
        }
    }

    fields.into_snapshot(file)
}
