//! Tail reads over large log files.
//!
//! Returns the last N newline-delimited lines of a file without reading the
//! whole file: fixed-size blocks are read backward from the end and scanned
//! in memory. The result is everything after the Nth newline counted from
//! the end, so the scan cost is bounded by the size of the tail, not the
//! size of the file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::ConsoleError;

const BLOCK_SIZE: u64 = 8192;

/// Read the last `lines` lines of the file at `path`.
///
/// An empty file yields an empty string, a request for more lines than the
/// file contains yields the full content, and a zero line count reads the
/// whole file. Bytes that are not valid UTF-8 are replaced during decoding;
/// binary files are not rejected.
pub fn read_last_lines(path: &Path, lines: usize) -> Result<String, ConsoleError> {
    let mut file =
        File::open(path).map_err(|e| ConsoleError::internal("Failed to open log file", &e))?;
    let len = file
        .metadata()
        .map_err(|e| ConsoleError::internal("Failed to stat log file", &e))?
        .len();
    if len == 0 {
        return Ok(String::new());
    }

    let start = find_tail_start(&mut file, len, lines)?;
    file.seek(SeekFrom::Start(start))
        .map_err(|e| ConsoleError::internal("Failed to seek log file", &e))?;
    let mut buf = Vec::with_capacity(usize::try_from(len - start).unwrap_or(0));
    file.read_to_end(&mut buf)
        .map_err(|e| ConsoleError::internal("Failed to read log file", &e))?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Scan backward block by block and return the offset just past the Nth
/// newline from the end, or 0 when the file holds fewer than N newlines.
fn find_tail_start(file: &mut File, len: u64, lines: usize) -> Result<u64, ConsoleError> {
    if lines == 0 {
        return Ok(0);
    }

    let mut buf = vec![0_u8; usize::try_from(BLOCK_SIZE).unwrap_or(8192)];
    let mut seen = 0_usize;
    let mut block_end = len;
    while block_end > 0 {
        let block_start = block_end.saturating_sub(BLOCK_SIZE);
        let block_len = usize::try_from(block_end - block_start).unwrap_or(buf.len());
        file.seek(SeekFrom::Start(block_start))
            .map_err(|e| ConsoleError::internal("Failed to seek log file", &e))?;
        file.read_exact(&mut buf[..block_len])
            .map_err(|e| ConsoleError::internal("Failed to read log file", &e))?;
        for i in (0..block_len).rev() {
            if buf[i] == b'\n' {
                seen += 1;
                if seen == lines {
                    return Ok(block_start + i as u64 + 1);
                }
            }
        }
        block_end = block_start;
    }
    Ok(0)
}
