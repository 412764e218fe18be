//! `multipart/form-data` wire encoding
//!
//! Serializes an ordered sequence of [`MultipartPart`]s into a single body:
//! each part is a boundary delimiter line, its headers, a blank line, the raw
//! payload, then CRLF; the body ends with a closing `--boundary--` delimiter.
//!
//! The boundary is chosen by the request builder, fresh per request, so it
//! cannot occur verbatim inside any part. Parts are assumed well-formed; the
//! builder validates the `Content-Disposition` precondition before encoding.

use rand::{distributions::Alphanumeric, Rng};

use crate::request::MultipartPart;

/// Boundary token length; long enough that collision with payload content is
/// not a practical concern.
const BOUNDARY_LEN: usize = 32;

/// Generate a random alphanumeric boundary token
pub fn random_boundary() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect()
}

/// Encode parts into a multipart body with the given boundary
pub fn encode(parts: &[MultipartPart], boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        for (name, value) in &part.headers {
            body.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.body);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
