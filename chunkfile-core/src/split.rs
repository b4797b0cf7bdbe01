use crate::error::{ChunkError, Result, fs_context};
use crate::naming::{chunk_file_name, digit_width};
use crate::util::size::format_size;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Copy buffer shared by both pipelines.
pub(crate) const COPY_BUF_LEN: usize = 1 << 20; // 1 MiB

/// Parameters for one split run. The caller supplies an absolute source
/// path and a positive chunk size in bytes.
#[derive(Clone, Debug)]
pub struct SplitJob {
    pub source: PathBuf,
    pub chunk_size: u64,
}

/// Splits the source into `ceil(total_size / chunk_size)` chunk files next
/// to it, numbered 1-based and zero-padded so names sort in chunk order.
///
/// The source stays open across the whole run; each chunk file is created,
/// filled with a bounded copy loop, and closed within its own iteration.
/// Any open/create/read/write failure aborts the split; chunks already
/// written are left on disk.
pub fn split(job: &SplitJob) -> Result<()> {
    if job.chunk_size == 0 {
        return Err(ChunkError::Invalid("chunk size must be positive".into()));
    }

    let mut src = File::open(&job.source).map_err(fs_context("open", &job.source))?;
    let total_size = src
        .metadata()
        .map_err(fs_context("stat", &job.source))?
        .len();

    let total_chunks = total_size.div_ceil(job.chunk_size);
    let width = digit_width(total_chunks);

    println!("File size: {}", format_size(total_size));
    println!("Chunk size: {}", format_size(job.chunk_size));
    println!("Total chunks: {total_chunks}");

    let mut buf = vec![0u8; COPY_BUF_LEN];

    for seq in 1..=total_chunks {
        let chunk_path = chunk_file_name(&job.source, seq, width);
        let mut chunk = File::create(&chunk_path).map_err(fs_context("create", &chunk_path))?;

        // Last chunk carries whatever the earlier chunks left over.
        let mut left = if seq == total_chunks {
            total_size - (total_chunks - 1) * job.chunk_size
        } else {
            job.chunk_size
        };

        let mut written = 0u64;
        while left > 0 {
            let want = buf.len().min(left as usize);
            let n = src
                .read(&mut buf[..want])
                .map_err(fs_context("read", &job.source))?;
            if n == 0 {
                break;
            }
            chunk
                .write_all(&buf[..n])
                .map_err(fs_context("write", &chunk_path))?;
            left -= n as u64;
            written += n as u64;
        }

        println!(
            "Created chunk file: {} ({})",
            chunk_path.display(),
            format_size(written)
        );
    }

    println!("File splitting completed");
    Ok(())
}
