//! # Connection Server
//!
//! Accept loop plus the per-connection read/dispatch/write loop.
//!
//! Lines are framed as raw bytes. A connection is closed on EOF, on an
//! over-long line, or on an I/O error. A line that is not a valid request,
//! including one that is not UTF-8, gets a `MALFORMED_REQUEST` response and
//! the connection stays open.

use std::future::Future;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Framed};
use zkrpc_core::ZkError;

use crate::protocol::{RpcRequest, RpcResponse};
use crate::service::ZkService;

/// Longest accepted request line, in bytes.
pub const MAX_LINE_BYTES: usize = 1 << 20;

/// Request and response terminator.
const LINE_DELIMITER: &[u8] = b"\n";

/// Back-off after a failed accept.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accept connections until `shutdown` resolves. Each connection is served
/// on its own task; in-flight connections are not awaited.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    service: ZkService,
    shutdown: F,
) -> Result<(), ZkError>
where
    F: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("JSON-RPC listener shutting down");
                return Ok(());
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let service = service.clone();
                    tokio::spawn(async move {
                        tracing::debug!(%peer, "connection opened");
                        match serve_connection(stream, service).await {
                            Ok(()) => tracing::debug!(%peer, "connection closed"),
                            Err(e) => tracing::warn!(%peer, error = %e, "connection dropped"),
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

/// Serve requests on one stream until EOF. Requests are answered in order.
pub async fn serve_connection<S>(stream: S, service: ZkService) -> Result<(), ZkError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let codec = AnyDelimiterCodec::new_with_max_length(
        LINE_DELIMITER.to_vec(),
        LINE_DELIMITER.to_vec(),
        MAX_LINE_BYTES,
    );
    let mut framed = Framed::new(stream, codec);

    while let Some(line) = framed.next().await {
        let line = line.map_err(codec_error)?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match decode_request(&line) {
            Ok(request) => service.handle(request).await,
            Err((id, err)) => RpcResponse::failure(id, &err),
        };

        let encoded =
            serde_json::to_string(&response).map_err(|e| ZkError::Transport(e.into()))?;
        framed.send(encoded).await.map_err(codec_error)?;
    }
    Ok(())
}

/// Parse one line. On failure, return whatever id could be recovered so the
/// client can still correlate the error.
fn decode_request(line: &[u8]) -> Result<RpcRequest, (Value, ZkError)> {
    let value: Value = serde_json::from_slice(line).map_err(|e| {
        (
            Value::Null,
            ZkError::MalformedRequest(format!("invalid JSON: {e}")),
        )
    })?;
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    serde_json::from_value(value)
        .map_err(|e| (id, ZkError::MalformedRequest(format!("invalid request: {e}"))))
}

fn codec_error(err: AnyDelimiterCodecError) -> ZkError {
    match err {
        AnyDelimiterCodecError::MaxChunkLengthExceeded => ZkError::Transport(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("request line exceeds {MAX_LINE_BYTES} bytes"),
        )),
        AnyDelimiterCodecError::Io(e) => ZkError::Transport(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_recovers_id_from_bad_request() {
        let (id, err) = decode_request(br#"{"id": 5, "params": {}}"#).unwrap_err();
        assert_eq!(id, json!(5));
        assert_eq!(err.code(), "MALFORMED_REQUEST");
    }

    #[test]
    fn decode_reports_null_id_for_garbage() {
        let (id, err) = decode_request(b"{not json").unwrap_err();
        assert_eq!(id, Value::Null);
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn decode_defaults_missing_params_and_id() {
        let request = decode_request(br#"{"method": "ZK.Free"}"#).unwrap();
        assert_eq!(request.method, "ZK.Free");
        assert_eq!(request.params, Value::Null);
        assert_eq!(request.id, Value::Null);
    }

    #[test]
    fn decode_treats_invalid_utf8_as_malformed() {
        let (id, err) = decode_request(b"{\"id\": 1, \"method\": \"ZK.Verify\xff\"}").unwrap_err();
        assert_eq!(id, Value::Null);
        assert_eq!(err.code(), "MALFORMED_REQUEST");
    }

    #[test]
    fn over_long_line_is_a_transport_failure() {
        let err = codec_error(AnyDelimiterCodecError::MaxChunkLengthExceeded);
        assert_eq!(err.code(), "TRANSPORT_FAILURE");
    }
}
