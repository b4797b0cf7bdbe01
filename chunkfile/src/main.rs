use chunkfile_core::error::{ChunkError, Result};
use chunkfile_core::util::size::{SizeUnit, chunk_size_bytes};
use chunkfile_core::{MergeJob, SplitJob, merge, split};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "A tool for splitting and merging large files",
    long_about = "chunkfile is a command-line tool for splitting large files into smaller \
chunks and merging them back together. It's mainly used for handling large files that \
need to be transferred over network or stored in limited space."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file into smaller chunks
    #[command(long_about = "Split a large file into multiple smaller chunks.\n\
You can specify the size and unit for each chunk, default is 400MB.\n\
Supported units are: B, KB, MB, GB (case-insensitive).")]
    Split {
        /// Path to the file to split
        #[arg(short, long, default_value = "")]
        path: String,

        /// Size of each chunk
        #[arg(short, long, default_value_t = 400)]
        size: u64,

        /// Size unit (B, KB, MB, GB)
        #[arg(short, long, default_value = "MB")]
        unit: String,
    },

    /// Merge previously split chunks
    #[command(long_about = "Merge previously split file chunks back into a complete file.\n\
You can choose to delete the chunk files after successful merge.")]
    Merge {
        /// Prefix of chunk files
        #[arg(short, long, default_value = "")]
        path: String,

        /// Delete chunk files after successful merge
        #[arg(short, long, default_value_t = false)]
        clear: bool,
    },
}

fn absolutize(path: &str) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| ChunkError::Fs {
        op: "resolve",
        path: PathBuf::from(path),
        source,
    })
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Split { path, size, unit } => {
            if path.is_empty() {
                return Err(ChunkError::Invalid(
                    "please specify the file path to split".into(),
                ));
            }
            let unit: SizeUnit = unit.parse()?;
            let chunk_size = chunk_size_bytes(size, unit)?;
            let source = absolutize(&path)?;
            split(&SplitJob { source, chunk_size })
        }

        Commands::Merge { path, clear } => {
            if path.is_empty() {
                return Err(ChunkError::Invalid(
                    "please specify the chunk file prefix".into(),
                ));
            }
            let prefix = absolutize(&path)?;
            merge(&MergeJob { prefix, clear })
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        println!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_flag_defaults() {
        let cli = Cli::try_parse_from(["chunkfile", "split", "--path", "f.bin"]).unwrap();
        match cli.command {
            Commands::Split { path, size, unit } => {
                assert_eq!(path, "f.bin");
                assert_eq!(size, 400);
                assert_eq!(unit, "MB");
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn merge_clear_defaults_to_false() {
        let cli = Cli::try_parse_from(["chunkfile", "merge", "-p", "f.bin"]).unwrap();
        match cli.command {
            Commands::Merge { path, clear } => {
                assert_eq!(path, "f.bin");
                assert!(!clear);
            }
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn short_flags_match_long_ones() {
        let cli =
            Cli::try_parse_from(["chunkfile", "split", "-p", "f.bin", "-s", "10", "-u", "kb"])
                .unwrap();
        match cli.command {
            Commands::Split { path, size, unit } => {
                assert_eq!(path, "f.bin");
                assert_eq!(size, 10);
                assert_eq!(unit, "kb");
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn empty_split_path_is_rejected() {
        let cli = Cli::try_parse_from(["chunkfile", "split"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("file path to split"));
    }

    #[test]
    fn empty_merge_path_is_rejected() {
        let cli = Cli::try_parse_from(["chunkfile", "merge"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("chunk file prefix"));
    }

    #[test]
    fn bad_unit_is_rejected_before_touching_the_file() {
        let cli =
            Cli::try_parse_from(["chunkfile", "split", "-p", "f.bin", "-u", "TB"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("unsupported unit: TB"));
    }

    #[test]
    fn absolutize_failure_names_the_operation_and_path() {
        // std::path::absolute rejects the empty path on every platform.
        let err = absolutize("").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to resolve"), "{msg}");
    }

    #[test]
    fn split_and_merge_end_to_end() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("data.bin");
        let data: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
        std::fs::write(&src, &data)?;

        let cli = Cli::try_parse_from([
            "chunkfile",
            "split",
            "-p",
            src.to_str().unwrap(),
            "-s",
            "4",
            "-u",
            "KB",
        ])
        .unwrap();
        run(cli)?;
        std::fs::remove_file(&src)?;

        let cli =
            Cli::try_parse_from(["chunkfile", "merge", "-p", src.to_str().unwrap(), "--clear"])
                .unwrap();
        run(cli)?;

        assert_eq!(std::fs::read(&src)?, data);
        Ok(())
    }
}
