//! JSON-lines transport for the host protocol.
//!
//! One request per input line, exactly one response per request line. Blank
//! lines are ignored. Decoding failures and timed-out requests are answered
//! with an `error` response and the loop keeps going; only transport failures
//! and an unreachable panel end it.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::host::messages::{HostRequest, HostResponse};
use crate::host::panel::PanelHandle;

/// Serves requests from `reader` until EOF, writing responses to `writer`.
///
/// Returns the number of requests answered.
pub async fn serve<R, W>(
    panel: &PanelHandle,
    mut reader: R,
    mut writer: W,
) -> Result<u64, AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut answered = 0u64;

    info!("Serving host protocol");
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let request = match decode_line(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => HostRequest::from_json(line),
            Err(e) => Err(e),
        };

        let response = match request {
            Ok(request) => {
                debug!(?request, "Request received");
                match panel.dispatch(request).await {
                    Ok(response) => response,
                    Err(e @ AppError::Timeout(_)) => {
                        warn!("Request timed out: {}", e);
                        HostResponse::error(e)
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => {
                warn!("Undecodable request: {}", e);
                HostResponse::error(e)
            }
        };

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }
    info!(answered, "Input closed");

    Ok(answered)
}

/// Strips the line ending and checks the bytes are UTF-8.
fn decode_line(raw: &[u8]) -> Result<&str, AppError> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw)
        .map_err(|e| AppError::Validation(format!("Request is not valid UTF-8: {}", e)))
}
