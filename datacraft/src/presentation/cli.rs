use clap::{Parser, Subcommand};
use datacraft_core::config::DEFAULT_START_ID;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Store files inside Minecraft map items",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a file into map_<id>.dat files of a world save
    Encode {
        file: PathBuf,
        /// world save folder (the one holding level.dat)
        world: PathBuf,
        /// first map id to use
        #[arg(default_value_t = DEFAULT_START_ID)]
        start_id: u32,
        /// refuse inputs larger than this many bytes
        #[arg(long)]
        max_size: Option<u64>,
        /// fail instead of overwriting existing maps
        #[arg(long)]
        check_collisions: bool,
        /// reject chunks and maps of the wrong size instead of truncating
        #[arg(long)]
        strict: bool,
        /// zero the metadata timestamp
        #[arg(long)]
        deterministic: bool,
        /// transform chunks on one thread
        #[arg(long)]
        sequential: bool,
        /// encode in memory only; nothing is written to the world
        #[arg(long)]
        dry_run: bool,
    },

    /// Rebuild a file from a run of maps
    Decode {
        world: PathBuf,
        start_id: u32,
        num_maps: u64,
        output: PathBuf,
        /// reject maps whose color array is not exactly one chunk
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        sequential: bool,
    },

    /// List the encoded runs recorded in a world
    List { world: PathBuf },

    /// Decode a run in memory and check it against its metadata
    Verify {
        world: PathBuf,
        start_id: u32,
        #[arg(long)]
        strict: bool,
    },
}
