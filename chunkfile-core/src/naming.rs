use std::path::{Path, PathBuf};

/// Separator literal between the original path and the sequence number.
pub const CHUNK_SUFFIX: &str = ".chunk.";

/// Decimal digits needed to number `total_chunks` chunks. Minimum 1.
pub fn digit_width(total_chunks: u64) -> usize {
    if total_chunks == 0 {
        return 1;
    }
    (total_chunks.ilog10() + 1) as usize
}

/// Builds `base + ".chunk." + seq`, zero-padding the sequence number to
/// `width` so lexicographic order matches numeric order within one split.
pub fn chunk_file_name(base: &Path, seq: u64, width: usize) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("{CHUNK_SUFFIX}{seq:0width$}"));
    PathBuf::from(name)
}

/// Reads the sequence number back out of a chunk file name.
///
/// Takes the substring after the *last* `".chunk."` occurrence, strips a
/// trailing dot-delimited extension if one is present, and parses it as a
/// non-negative integer. Anything unparseable yields 0, so ambiguous names
/// sort ahead of real chunks rather than failing the merge. The
/// double-extension stripping is kept as-is for compatibility with chunk
/// sets already on disk.
pub fn parse_chunk_seq(name: &str) -> u64 {
    let Some(idx) = name.rfind(CHUNK_SUFFIX) else {
        return 0;
    };
    let mut num = &name[idx + CHUNK_SUFFIX.len()..];
    if let Some(dot) = num.rfind('.') {
        num = &num[..dot];
    }
    num.parse::<u64>().unwrap_or(0)
}
