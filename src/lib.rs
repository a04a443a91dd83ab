pub mod leaderboard;
pub mod solutions;

use std::path::Path;

use anyhow::{Context, Result};

pub use solutions::{Solver, ALL_SOLUTIONS};

/// Directory used when neither `--inputs` nor `AOC_INPUTS` is given.
pub const DEFAULT_INPUT_DIR: &str = "inputs";

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_u32_from_bytes(bytes: &[u8]) -> usize {
    let mut ret = 0;
    for b in bytes {
        ret = ret * 10 + (b - b'0') as usize;
    }
    ret
}

/// Splits on `\n` and drops a trailing `\r` as well as empty lines.
pub fn byte_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    let mut start = 0;
    memchr::memchr_iter(b'\n', bytes)
        .chain(std::iter::once(bytes.len()))
        .map(move |end| {
            let line = &bytes[start..end];
            start = end + 1;
            line.strip_suffix(b"\r").unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
}

pub fn load_input(dir: impl AsRef<Path>, name: &str) -> Result<String> {
    let path = dir.as_ref().join(name);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn day_input(dir: impl AsRef<Path>, n: usize) -> Result<String> {
    load_input(dir, &format!("{}.txt", n))
}

pub fn default_input(n: usize) -> Result<String> {
    day_input(DEFAULT_INPUT_DIR, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_lines() {
        let lines: Vec<_> = byte_lines(b"199\r\n200\n\n208").collect();
        assert_eq!(lines, vec![&b"199"[..], b"200", b"208"]);
        assert_eq!(byte_lines(b"").count(), 0);
        assert_eq!(parse_u32_from_bytes(b"263"), 263);
    }
}
