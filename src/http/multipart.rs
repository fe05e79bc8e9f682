//! Multipart form decoding.
//!
//! Minimal `multipart/form-data` parser for the console's upload and
//! dependency-install endpoints: attribute parts become string fields, file
//! parts keep their declared file name and raw bytes. Part bodies are held
//! fully in memory, which bounds safe upload size to available memory.

use std::collections::HashMap;

use crate::error::ConsoleError;

/// An uploaded file with its declared file name.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Decoded multipart form: text attributes plus uploaded files.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    /// Attribute lookup with an empty-string default.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }
}

/// Extract the boundary token from a `multipart/form-data` Content-Type value.
pub fn boundary(content_type: &str) -> Option<&str> {
    let (kind, params) = content_type.split_once(';')?;
    if !kind.trim().eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    params.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("boundary") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Decode a multipart body delimited by `boundary`.
///
/// Parts carrying a `filename` in their Content-Disposition are collected as
/// files; all other parts are decoded (lossily) as attribute strings.
pub fn parse(boundary: &str, body: &[u8]) -> Result<MultipartForm, ConsoleError> {
    let delimiter = format!("--{boundary}");
    let mut form = MultipartForm::default();

    let start = find(body, delimiter.as_bytes())
        .ok_or_else(|| bad("missing opening boundary"))?;
    let mut rest = &body[start + delimiter.len()..];

    loop {
        if rest.starts_with(b"--") {
            break; // closing delimiter
        }
        rest = rest
            .strip_prefix(b"\r\n")
            .ok_or_else(|| bad("malformed boundary line"))?;

        let header_end = find(rest, b"\r\n\r\n").ok_or_else(|| bad("missing part headers"))?;
        let headers = std::str::from_utf8(&rest[..header_end])
            .map_err(|_| bad("part headers are not valid UTF-8"))?;
        let (name, file_name) = parse_disposition(headers)?;

        let data_start = header_end + 4;
        let data_len = find(&rest[data_start..], delimiter.as_bytes())
            .ok_or_else(|| bad("unterminated part"))?;
        // Part data is separated from the next delimiter by a CRLF.
        let data = rest[data_start..data_start + data_len]
            .strip_suffix(b"\r\n")
            .ok_or_else(|| bad("malformed part body"))?;

        match file_name {
            Some(file_name) => form.files.push(FilePart {
                file_name,
                data: data.to_vec(),
            }),
            None => {
                let value = String::from_utf8_lossy(data).into_owned();
                form.fields.insert(name, value);
            }
        }

        rest = &rest[data_start + data_len + delimiter.len()..];
    }
    Ok(form)
}

/// Pull the field name and optional file name out of a part's headers.
fn parse_disposition(headers: &str) -> Result<(String, Option<String>), ConsoleError> {
    for line in headers.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("content-disposition") {
            continue;
        }
        let mut name = None;
        let mut file_name = None;
        for param in value.split(';') {
            let Some((k, v)) = param.split_once('=') else {
                continue;
            };
            let v = v.trim().trim_matches('"').to_string();
            match k.trim() {
                "name" => name = Some(v),
                "filename" => file_name = Some(v),
                _ => {}
            }
        }
        let name = name.ok_or_else(|| bad("part is missing a field name"))?;
        return Ok((name, file_name));
    }
    Err(bad("part is missing Content-Disposition"))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn bad(detail: &str) -> ConsoleError {
    ConsoleError::BadRequest(format!("Invalid multipart body: {detail}"))
}
