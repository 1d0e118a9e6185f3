use crate::codec::{ChunkCodec, chunk_count};
use crate::config::Config;
use crate::domain::{MapRecord, RunMetadata};
use crate::error::{DataCraftError, Result};
use crate::progress::Progress;
use crate::repo::WorldRepo;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Everything one encode run produces, before it is persisted.
#[derive(Clone, Debug)]
pub struct EncodedRun {
    pub records: Vec<MapRecord>,
    pub metadata: RunMetadata,
}

/// Ids `start_id .. start_id + count` must all fit in a u32.
pub fn check_id_range(start_id: u32, count: u64) -> Result<()> {
    if count > 0 && start_id as u64 + (count - 1) > u32::MAX as u64 {
        return Err(DataCraftError::IdRangeOverflow { start_id, count });
    }
    Ok(())
}

/// Last id of a run; wraps to `start_id - 1` for an empty run.
pub fn end_id(start_id: u32, count: u64) -> u32 {
    start_id.wrapping_add(count as u32).wrapping_sub(1)
}

/// Split `input` into map records numbered from `start_id`.
///
/// Pure: nothing is persisted. Chunks are transformed on the rayon pool when
/// `cfg.parallel` is set; records always come back in id order.
pub fn encode(input: &[u8], filename: &str, start_id: u32, cfg: &Config) -> Result<EncodedRun> {
    if cfg.chunk_size == 0 {
        return Err(DataCraftError::Format("chunk size must be non-zero".into()));
    }
    let codec = ChunkCodec::new(cfg.chunk_size, cfg.policy.validation);
    let total = input.len() as u64;
    let count = chunk_count(total, cfg.chunk_size);
    check_id_range(start_id, count)?;

    let encode_one = |(i, chunk): (usize, &[u8])| -> Result<MapRecord> {
        let id = start_id + i as u32;
        let colors = codec.encode(chunk)?;
        debug!(id, len = chunk.len(), "encoded chunk");
        Ok(MapRecord::new(id, colors))
    };
    let records = if cfg.parallel {
        input
            .par_chunks(cfg.chunk_size)
            .enumerate()
            .map(encode_one)
            .collect::<Result<Vec<_>>>()?
    } else {
        input
            .chunks(cfg.chunk_size)
            .enumerate()
            .map(encode_one)
            .collect::<Result<Vec<_>>>()?
    };

    let created = if cfg.deterministic {
        0
    } else {
        OffsetDateTime::now_utc().unix_timestamp()
    };
    let metadata = RunMetadata {
        filename: filename.to_string(),
        original_size: total,
        chunk_count: count,
        start_id,
        end_id: end_id(start_id, count),
        blake3: Some(*blake3::hash(input).as_bytes()),
        created,
    };
    Ok(EncodedRun { records, metadata })
}

/// Encode `input` into `repo`, starting at map id `start_id`.
///
/// Records are written first, then the id counter, then the metadata, so a
/// metadata file implies every map of the run was written.
pub fn encode_file<R: WorldRepo + ?Sized>(
    input: &Path,
    repo: &R,
    start_id: u32,
    cfg: &Config,
    progress: &dyn Progress,
) -> Result<RunMetadata> {
    if !input.is_file() {
        return Err(DataCraftError::MissingInput(input.to_path_buf()));
    }
    let size = fs::metadata(input)?.len();
    if let Some(limit) = cfg.policy.max_input_size {
        if size > limit {
            return Err(DataCraftError::OversizeInput { size, limit });
        }
    }
    if cfg.policy.check_collisions && cfg.chunk_size > 0 {
        let count = chunk_count(size, cfg.chunk_size);
        check_id_range(start_id, count)?;
        for i in 0..count {
            let id = start_id + i as u32;
            if repo.exists(id)? {
                return Err(DataCraftError::IdCollision { id });
            }
        }
    }

    let data = fs::read(input)?;
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let run = encode(&data, &filename, start_id, cfg)?;
    let meta = run.metadata;
    let total = meta.chunk_count;

    progress.begin(start_id, total);
    for (i, rec) in run.records.iter().enumerate() {
        repo.save(rec)?;
        progress.chunk(rec.id, i as u64 + 1, total);
    }
    if total > 0 {
        repo.bump_counter(meta.end_id)?;
    }
    repo.save_meta(&meta)?;

    info!(
        file = %filename,
        bytes = meta.original_size,
        maps = total,
        start_id,
        end_id = meta.end_id,
        "encoded file"
    );
    Ok(meta)
}
