//! Content-Length framed JSON messages over a byte stream.
//!
//! The wire format is the LSP base protocol: a `Content-Length: <n>` header,
//! a blank line, then exactly `n` bytes of JSON. The header name is matched
//! case-sensitively.

use std::io::BufRead;

use anyhow::{Context, Result, bail};
use serde::Serialize;

const HEADER_PREFIX: &str = "Content-Length: ";

/// Frame a serializable message for the wire.
pub fn encode_message<T: Serialize>(message: &T) -> Result<String> {
    let body = serde_json::to_string(message).context("failed to serialize message")?;
    Ok(format!("{HEADER_PREFIX}{}\r\n\r\n{body}", body.len()))
}

#[derive(serde::Deserialize)]
struct BaseMessage {
    #[serde(default, alias = "Method")]
    method: String,
}

/// Split a framed message into its method name and raw JSON body. Bodies
/// without a method (responses) decode with an empty method name.
pub fn decode_message(data: &[u8]) -> Result<(String, Vec<u8>)> {
    let separator = data
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .context("message has no header separator")?;
    let header = std::str::from_utf8(&data[..separator]).context("header is not UTF-8")?;
    let rest = &data[separator + 4..];

    let length: usize = header
        .strip_prefix(HEADER_PREFIX)
        .with_context(|| format!("missing Content-Length header: {header:?}"))?
        .trim()
        .parse()
        .with_context(|| format!("invalid Content-Length value in {header:?}"))?;
    if rest.len() < length {
        bail!("truncated message: header says {length} bytes, got {}", rest.len());
    }

    let body = rest[..length].to_vec();
    let base: BaseMessage =
        serde_json::from_slice(&body).context("message body is not a JSON-RPC message")?;
    Ok((base.method, body))
}

/// Read one framed message body from `reader`. `Ok(None)` on clean EOF.
pub fn read_message(reader: &mut impl BufRead) -> Result<Option<Vec<u8>>> {
    let mut content_length: Option<usize> = None;

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).context("failed to read header")?;
        if bytes_read == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            // Blank line terminates the header block.
            if content_length.is_some() {
                break;
            }
            continue;
        }

        if let Some(value) = line.strip_prefix(HEADER_PREFIX) {
            content_length = Some(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid Content-Length value: {value:?}"))?,
            );
        }
        // Other headers (e.g. Content-Type) are ignored.
    }

    let length = content_length.context("header block had no Content-Length")?;
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).context("failed to read message body")?;
    Ok(Some(body))
}
