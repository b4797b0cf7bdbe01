use crate::error::{ChunkError, Result};
use std::str::FromStr;

pub const B: u64 = 1;
pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * 1024;
pub const GB: u64 = 1024 * 1024 * 1024;

/// Size unit accepted on the command line (case-insensitive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeUnit {
    B,
    Kb,
    Mb,
    Gb,
}

impl SizeUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            SizeUnit::B => B,
            SizeUnit::Kb => KB,
            SizeUnit::Mb => MB,
            SizeUnit::Gb => GB,
        }
    }
}

impl FromStr for SizeUnit {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "B" => Ok(SizeUnit::B),
            "KB" => Ok(SizeUnit::Kb),
            "MB" => Ok(SizeUnit::Mb),
            "GB" => Ok(SizeUnit::Gb),
            _ => Err(ChunkError::Invalid(format!(
                "unsupported unit: {s}, supported units are: B, KB, MB, GB"
            ))),
        }
    }
}

/// Final chunk size in bytes for a `--size`/`--unit` pair.
pub fn chunk_size_bytes(size: u64, unit: SizeUnit) -> Result<u64> {
    let bytes = size
        .checked_mul(unit.multiplier())
        .ok_or_else(|| ChunkError::Invalid(format!("chunk size overflows: {size} {unit:?}")))?;
    if bytes == 0 {
        return Err(ChunkError::Invalid("chunk size must be positive".into()));
    }
    Ok(bytes)
}

/// Renders a byte count with the largest unit that keeps it readable.
pub fn format_size(size: u64) -> String {
    if size < KB {
        format!("{size} B")
    } else if size < MB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else {
        format!("{:.2} GB", size as f64 / GB as f64)
    }
}
