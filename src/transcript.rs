use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::ParseError;
use crate::request::RequestDescriptor;

// Represents where in the transcript the latest parsed line sits
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ParseState {
    Headers,
    Body,
}

/// Parses a plain-text HTTP request transcript (as exported from an
/// intercepting proxy like Burp) into a [`RequestDescriptor`].
///
/// The first line containing `" HTTP/"` is the request line; anything
/// before it is ignored. The header block ends at the first blank line and
/// everything after is body. Body lines are concatenated with their line
/// terminators stripped — multi-line bodies come out flattened. That is the
/// captured tool's documented behavior and tests pin it; do not reinsert
/// newlines.
///
/// When a `Host` header is present the final URL is always synthesized as
/// `https://{Host}{path}`, discarding any scheme or host in the request-line
/// token. Without a `Host` header the raw token is used verbatim and a
/// relative token fails later, at request construction.
pub fn parse_transcript(path: &Path) -> Result<RequestDescriptor, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut state = ParseState::Headers;
    let mut seen_request_line = false;
    let mut method = String::new();
    let mut path_token = String::new();
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line?;
        match state {
            ParseState::Headers if !seen_request_line => {
                if line.contains(" HTTP/") {
                    let mut parts = line.split(' ');
                    method = parts.next().unwrap_or_default().to_string();
                    path_token = parts.next().unwrap_or_default().to_string();
                    seen_request_line = true;
                }
                // stray content before the request line is tolerated
            }
            ParseState::Headers => {
                if line.is_empty() {
                    state = ParseState::Body;
                } else if let Some((key, value)) = line.split_once(": ") {
                    match headers.iter_mut().find(|(k, _)| k == key) {
                        // last occurrence wins, position of the first is kept
                        Some(entry) => entry.1 = value.to_string(),
                        None => headers.push((key.to_string(), value.to_string())),
                    }
                }
                // header lines without ": " are silently skipped
            }
            ParseState::Body => body.extend_from_slice(line.as_bytes()),
        }
    }

    let url = match headers.iter().find(|(k, _)| k == "Host") {
        Some((_, host)) => format!("https://{}{}", host, strip_origin(&path_token)),
        None => path_token,
    };

    Ok(RequestDescriptor {
        method,
        url,
        headers,
        body,
    })
}

// The request-line token may be absolute ("http://other.test/x"); only its
// path survives Host synthesis. A relative token is kept whole — a "://"
// after the path starts (say, a URL inside a query string) is part of the
// path, not a scheme.
fn strip_origin(token: &str) -> &str {
    match token.find("://") {
        Some(idx) if !token[..idx].contains(['/', '?']) => {
            let rest = &token[idx + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "",
            }
        }
        _ => token,
    }
}
