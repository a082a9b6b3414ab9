//! HTTP response handlers.

use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::config::SiteConfig;
use crate::utils::mime;

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    // Range header (video/audio seeking)
    if let Some(range) = get_range_header(&request) {
        let file_size = fs::metadata(path)?.len();
        match parse_range(&range, file_size) {
            ByteRange::Span(start, end) => {
                return respond_range(request, path, content_type, file_size, start, end);
            }
            ByteRange::Unsatisfiable => {
                return respond_unsatisfiable_range(request, file_size);
            }
            // A Range header we can't parse is ignored (RFC 7233 §3.1)
            ByteRange::Malformed => {}
        }
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Serve one byte span of a file with 206 Partial Content.
fn respond_range(
    request: Request,
    path: &Path,
    content_type: &'static str,
    file_size: u64,
    start: u64,
    end: u64,
) -> Result<()> {
    use std::io::{Read, Seek, SeekFrom};

    let length = end - start + 1;

    // Stream the requested range instead of buffering it
    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(start))?;
    let reader = file.take(length);

    let content_range = format!("bytes {}-{}/{}", start, end, file_size);
    let response = Response::new(
        StatusCode(206),
        vec![
            make_header("Content-Type", content_type),
            Header::from_bytes("Content-Range", content_range.as_bytes())
                .map_err(|()| anyhow::anyhow!("invalid Content-Range header"))?,
            make_header("Accept-Ranges", "bytes"),
        ],
        reader,
        Some(length as usize),
        None,
    );

    request.respond(response)?;
    Ok(())
}

/// How a `Range` header value maps onto a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteRange {
    /// Satisfiable inclusive byte span, served as 206.
    Span(u64, u64),
    /// Syntactically valid but outside the file, answered with 416.
    Unsatisfiable,
    /// Not a parseable `bytes=` range; the header is ignored and the
    /// whole file served as 200 (RFC 7233 §3.1).
    Malformed,
}

/// Parse a `Range` header value ("bytes=start-end") against a file size.
fn parse_range(header: &str, file_size: u64) -> ByteRange {
    let Some(range) = header.trim().strip_prefix("bytes=") else {
        return ByteRange::Malformed;
    };

    let parts: Vec<&str> = range.trim().split('-').collect();

    let parsed = match parts.as_slice() {
        // "0-499" - specific range
        [s, e] if !s.is_empty() && !e.is_empty() => {
            match (s.trim().parse::<u64>(), e.trim().parse::<u64>()) {
                (Ok(start), Ok(end)) => Some((start, end.min(file_size.saturating_sub(1)))),
                _ => None,
            }
        }
        // "0-" - from start to end
        [s, ""] if !s.is_empty() => match s.trim().parse::<u64>() {
            Ok(start) => Some((start, file_size.saturating_sub(1))),
            Err(_) => None,
        },
        // "-500" - last 500 bytes
        ["", e] if !e.is_empty() => match e.trim().parse::<u64>() {
            Ok(0) => return ByteRange::Unsatisfiable,
            Ok(suffix) => Some((
                file_size.saturating_sub(suffix),
                file_size.saturating_sub(1),
            )),
            Err(_) => None,
        },
        _ => None,
    };

    match parsed {
        Some((start, end)) => {
            if file_size == 0 || start >= file_size || start > end {
                ByteRange::Unsatisfiable
            } else {
                ByteRange::Span(start, end)
            }
        }
        None => ByteRange::Malformed,
    }
}

/// Respond 416 with the current resource size.
fn respond_unsatisfiable_range(request: Request, file_size: u64) -> Result<()> {
    let content_range = format!("bytes */{file_size}");
    let response = Response::empty(StatusCode(416)).with_header(
        Header::from_bytes("Content-Range", content_range.as_bytes())
            .map_err(|()| anyhow::anyhow!("invalid Content-Range header"))?,
    );
    request.respond(response)?;
    Ok(())
}

/// Extract Range header from request.
fn get_range_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("range"))
        .map(|h| h.value.to_string())
}

/// Respond with 404 page (custom or default).
pub fn respond_not_found(request: Request, config: &SiteConfig) -> Result<()> {
    use crate::utils::mime::types::{HTML, PLAIN};

    let custom_404 = config.build.output.join("404.html");
    let has_custom = custom_404.is_file();

    if is_head_request(&request) {
        let mime = if has_custom { HTML } else { PLAIN };
        return send_head(request, 404, mime);
    }

    if has_custom
        && let Ok(body) = fs::read(&custom_404)
    {
        return send_body(request, 404, HTML, body);
    }

    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).expect("static header is valid")
}
