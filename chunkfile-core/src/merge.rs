use crate::error::{ChunkError, Result, fs_context};
use crate::naming::{CHUNK_SUFFIX, parse_chunk_seq};
use crate::split::COPY_BUF_LEN;
use crate::util::size::format_size;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parameters for one merge run. The caller supplies an absolute prefix
/// path; `clear` deletes the chunk files once the merge has succeeded.
#[derive(Clone, Debug)]
pub struct MergeJob {
    pub prefix: PathBuf,
    pub clear: bool,
}

/// Concatenates every chunk file sharing the prefix back into one file.
///
/// Discovery is non-recursive: regular files in the prefix's directory
/// whose name starts with the prefix's base name and contains ".chunk.".
/// Chunks are concatenated in ascending parsed-sequence order; names that
/// fail to parse map to 0 and come first, in listing order. The output
/// file stays open for the whole run; each chunk handle is scoped to its
/// own iteration. A failed merge leaves the partial output on disk.
pub fn merge(job: &MergeJob) -> Result<()> {
    let dir = match job.prefix.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base = job
        .prefix
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ChunkError::Invalid("chunk file prefix has no file name".into()))?;

    let mut chunk_paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ChunkError::Fs {
            op: "read directory",
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(base.as_str()) && name.contains(CHUNK_SUFFIX) {
            chunk_paths.push(entry.into_path());
        }
    }

    if chunk_paths.is_empty() {
        return Err(ChunkError::NoChunks);
    }

    // Stable sort: ties (all-unparseable names map to 0) keep listing order.
    chunk_paths.sort_by_key(|p| {
        p.file_name()
            .map(|n| parse_chunk_seq(&n.to_string_lossy()))
            .unwrap_or(0)
    });

    let out_path = output_path(&job.prefix);
    // Disjoint by construction: discovered names always contain the
    // separator and the derived output never does. Hard stop against
    // truncating a chunk that is still queued for reading, should the
    // derivation ever land on one.
    if chunk_paths.iter().any(|c| *c == out_path) {
        return Err(ChunkError::Invalid(format!(
            "output path {} collides with a chunk file",
            out_path.display()
        )));
    }

    let mut out = File::create(&out_path).map_err(fs_context("create", &out_path))?;

    let mut buf = vec![0u8; COPY_BUF_LEN];
    let mut total_size = 0u64;
    let total = chunk_paths.len();

    for (i, chunk_path) in chunk_paths.iter().enumerate() {
        println!(
            "Processing chunk file {}/{}: {}",
            i + 1,
            total,
            chunk_path.display()
        );

        let mut chunk = File::open(chunk_path).map_err(fs_context("open", chunk_path))?;
        total_size += chunk
            .metadata()
            .map_err(fs_context("stat", chunk_path))?
            .len();

        loop {
            let n = chunk.read(&mut buf).map_err(fs_context("read", chunk_path))?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])
                .map_err(fs_context("write", &out_path))?;
        }
    }

    println!(
        "Created merged file: {} ({})",
        out_path.display(),
        format_size(total_size)
    );

    if job.clear {
        println!("Starting cleanup of chunk files...");
        for chunk_path in &chunk_paths {
            // Non-fatal: a failed deletion never undoes a finished merge.
            match fs::remove_file(chunk_path) {
                Ok(()) => println!("Deleted chunk file: {}", chunk_path.display()),
                Err(e) => println!(
                    "Warning: failed to delete chunk file {}: {e}",
                    chunk_path.display()
                ),
            }
        }
        println!("Chunk file cleanup completed");
    }

    Ok(())
}

/// Output file for a prefix: everything before the first ".chunk."
/// occurrence, or the prefix itself when it carries no separator.
pub(crate) fn output_path(prefix: &Path) -> PathBuf {
    let s = prefix.to_string_lossy();
    match s.find(CHUNK_SUFFIX) {
        Some(idx) => PathBuf::from(&s[..idx]),
        None => prefix.to_path_buf(),
    }
}
