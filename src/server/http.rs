//! Minimal HTTP/1.1 framing.
//!
//! One request per connection: the request line, headers and a
//! `Content-Length` body are read, one JSON response is written, and the
//! connection is closed. Chunked bodies are not supported.

use crate::error::{ServerError, ServerResult};
use serde_json::{json, Value};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on request line plus headers.
const MAX_HEAD_BYTES: u64 = 8 * 1024;

/// A parsed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Request target without the query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// A JSON response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }

    /// Response for a request that failed before routing, if one can be sent.
    pub fn from_server_error(err: &ServerError) -> Option<Self> {
        let status = err.status_code()?;
        Some(Self::error(status, reason_phrase(status)))
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad request",
        404 => "Not found",
        405 => "Method not allowed",
        413 => "Payload too large",
        500 => "Internal server error",
        _ => "Unknown",
    }
}

async fn read_head_line<R>(reader: &mut R, line: &mut String) -> ServerResult<usize>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    reader.read_line(line).await.map_err(|err| match err.kind() {
        io::ErrorKind::InvalidData => {
            ServerError::MalformedRequest("request head is not UTF-8".to_string())
        }
        _ => ServerError::Io(err),
    })
}

fn parse_request_line(line: &str) -> ServerResult<(String, String)> {
    let mut parts = line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ServerError::MalformedRequest(format!(
            "invalid request line: {}",
            line.trim_end()
        )));
    };

    if !version.starts_with("HTTP/1.") {
        return Err(ServerError::MalformedRequest(format!(
            "unsupported protocol version: {}",
            version
        )));
    }

    let path = target.split('?').next().unwrap_or(target);
    Ok((method.to_string(), path.to_string()))
}

/// Read one request from `reader`.
///
/// # Errors
///
/// - `MalformedRequest` for an unparseable head, a bad `Content-Length` or
///   a chunked body
/// - `BodyTooLarge` when the declared length exceeds `max_body_bytes`; the
///   body has not been consumed at that point
/// - `Io` when the connection fails or ends early
pub async fn read_request<R>(reader: &mut R, max_body_bytes: usize) -> ServerResult<Request>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = (&mut *reader).take(MAX_HEAD_BYTES);
    let mut line = String::new();

    if read_head_line(&mut head, &mut line).await? == 0 {
        return Err(ServerError::MalformedRequest("empty request".to_string()));
    }
    let (method, path) = parse_request_line(&line)?;

    let mut headers = Vec::new();
    loop {
        if read_head_line(&mut head, &mut line).await? == 0 {
            return Err(ServerError::MalformedRequest(
                "header block not terminated".to_string(),
            ));
        }
        let header = line.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }
        let (name, value) = header.split_once(':').ok_or_else(|| {
            ServerError::MalformedRequest(format!("invalid header line: {}", header))
        })?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    if find_header(&headers, "transfer-encoding").is_some() {
        return Err(ServerError::MalformedRequest(
            "transfer-encoding is not supported".to_string(),
        ));
    }

    let content_length = match find_header(&headers, "content-length") {
        Some(value) => value.parse::<usize>().map_err(|_| {
            ServerError::MalformedRequest(format!("invalid content-length: {}", value))
        })?,
        None => 0,
    };

    if content_length > max_body_bytes {
        return Err(ServerError::BodyTooLarge {
            size: content_length,
            limit: max_body_bytes,
        });
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;

    Ok(Request {
        method,
        path,
        headers,
        body,
    })
}

/// Write `response` as a complete HTTP/1.1 message.
pub async fn write_response<W>(writer: &mut W, response: &ApiResponse) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = response.body.to_string();
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        body.len()
    );

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(body.as_bytes()).await?;
    writer.flush().await
}
