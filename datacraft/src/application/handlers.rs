use std::fs;
use std::path::PathBuf;

use datacraft_core::codec::chunk_count;
use datacraft_core::config::Config;
use datacraft_core::container::meta;
use datacraft_core::error::{DataCraftError, Result};
use datacraft_core::pack::writer::end_id;
use datacraft_core::policy::{Policy, Validation};
use datacraft_core::repo::{OpenParams, WorldRepo};
use datacraft_core::repo_factory::{Backend, open_repo};
use datacraft_core::{decode_to_file, encode_file, verify};

use crate::presentation::console::{ConsoleProgress, kib};

fn repo_from_args(world: PathBuf, create: bool, dry_run: bool) -> Result<Box<dyn WorldRepo>> {
    if dry_run && !world.is_dir() {
        return Err(DataCraftError::MissingDestination(world));
    }
    let backend = if dry_run { Backend::Mem } else { Backend::Fs };
    let params = OpenParams {
        world_path: world,
        data_version: Config::default().data_version,
        create,
    };
    open_repo(backend, params)
}

fn config_from_args(strict: bool, sequential: bool) -> Config {
    Config {
        parallel: !sequential,
        policy: Policy {
            validation: if strict {
                Validation::Strict
            } else {
                Validation::Lenient
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_encode(
    file: PathBuf,
    world: PathBuf,
    start_id: u32,
    max_size: Option<u64>,
    check_collisions: bool,
    strict: bool,
    deterministic: bool,
    sequential: bool,
    dry_run: bool,
) -> Result<()> {
    let mut cfg = config_from_args(strict, sequential);
    cfg.deterministic = deterministic;
    cfg.policy.max_input_size = max_size;
    cfg.policy.check_collisions = check_collisions;

    if !file.is_file() {
        return Err(DataCraftError::MissingInput(file));
    }
    let repo = repo_from_args(world.clone(), true, dry_run)?;

    let size = fs::metadata(&file)?.len();
    let maps = chunk_count(size, cfg.chunk_size);
    println!();
    println!("Reading: {}", file.display());
    println!("Size: {size} bytes ({})", kib(size));
    println!("Maps: {maps}");
    println!("Range: {start_id} to {}", end_id(start_id, maps));
    println!();
    let m = encode_file(&file, &*repo, start_id, &cfg, &ConsoleProgress)?;

    println!();
    println!("SUCCESS! {} maps created", m.chunk_count);
    if m.chunk_count > 0 {
        println!();
        println!("Minecraft commands:");
        println!("   /give @p filled_map{{map:{}}}", m.start_id);
        if m.chunk_count > 1 {
            println!("   /give @p filled_map{{map:{}}}", m.start_id + 1);
            println!("   ... (up to {})", m.end_id);
        }
    }
    if dry_run {
        println!();
        println!("Dry run: nothing was written");
    } else {
        let meta_path = world.join("data").join(meta::file_name(m.start_id));
        println!();
        println!("Metadata: {}", meta_path.display());
    }
    Ok(())
}

pub fn handle_decode(
    world: PathBuf,
    start_id: u32,
    num_maps: u64,
    output: PathBuf,
    strict: bool,
    sequential: bool,
) -> Result<()> {
    let cfg = config_from_args(strict, sequential);
    let repo = repo_from_args(world, false, false)?;

    println!();
    println!("Decoding {num_maps} maps from ID {start_id}");
    println!();
    let decoded = decode_to_file(&*repo, start_id, num_maps, &output, &cfg, &ConsoleProgress)?;

    if let Some(m) = &decoded.metadata {
        println!();
        println!("Original size: {} bytes", m.original_size);
    }
    let len = decoded.bytes.len() as u64;
    println!();
    println!("Decoded: {}", output.display());
    println!("Size: {len} bytes ({})", kib(len));
    Ok(())
}

pub fn handle_list(world: PathBuf) -> Result<()> {
    let repo = repo_from_args(world, false, false)?;
    let runs = repo.list_meta()?;
    if runs.is_empty() {
        println!("no runs found");
        return Ok(());
    }
    for m in runs {
        println!(
            "{:>10}..{:<10} {:>5} maps {:>12} bytes  {}",
            m.start_id, m.end_id, m.chunk_count, m.original_size, m.filename
        );
    }
    Ok(())
}

pub fn handle_verify(world: PathBuf, start_id: u32, strict: bool) -> Result<()> {
    let cfg = config_from_args(strict, false);
    let repo = repo_from_args(world, false, false)?;
    let m = verify(&*repo, start_id, &cfg)?;
    eprintln!(
        "verify: OK ({} bytes in {} maps, {}..{})",
        m.original_size, m.chunk_count, m.start_id, m.end_id
    );
    Ok(())
}
