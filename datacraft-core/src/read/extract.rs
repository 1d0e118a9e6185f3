use crate::codec::ChunkCodec;
use crate::config::Config;
use crate::domain::{MapRecord, RunMetadata};
use crate::error::{DataCraftError, Result, Warning};
use crate::pack::writer::check_id_range;
use crate::progress::{LogProgress, Progress};
use crate::repo::{MetaStore, RecordStore, WorldRepo};
use crate::util::hash_forward::HashingForward;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Result of a successful decode.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub bytes: Vec<u8>,
    pub metadata: Option<RunMetadata>,
    /// Padding was stripped down to `OriginalSize`.
    pub trimmed: bool,
    pub warnings: Vec<Warning>,
}

fn raise(progress: &dyn Progress, warnings: &mut Vec<Warning>, w: Warning) {
    debug!("{w}");
    progress.warn(&w);
    warnings.push(w);
}

/// Rebuild the bytes stored in `num_chunks` maps starting at `start_id`.
///
/// A missing map fails the whole run and nothing is returned. Missing or
/// unreadable metadata only means the padding cannot be stripped.
pub fn decode<M, S>(
    start_id: u32,
    num_chunks: u64,
    metas: &M,
    records: &S,
    cfg: &Config,
    progress: &dyn Progress,
) -> Result<Decoded>
where
    M: MetaStore + ?Sized,
    S: RecordStore + ?Sized,
{
    let mut decoded = assemble(start_id, num_chunks, metas, records, cfg, progress)?;
    let digest = blake3::hash(&decoded.bytes);
    check_digest(&mut decoded, &digest, progress);
    Ok(decoded)
}

fn assemble<M, S>(
    start_id: u32,
    num_chunks: u64,
    metas: &M,
    records: &S,
    cfg: &Config,
    progress: &dyn Progress,
) -> Result<Decoded>
where
    M: MetaStore + ?Sized,
    S: RecordStore + ?Sized,
{
    check_id_range(start_id, num_chunks)?;
    let mut warnings = Vec::new();

    let metadata = match metas.load_meta(start_id) {
        Ok(m) => m,
        Err(DataCraftError::Format(msg)) => {
            debug!(start_id, "unreadable metadata: {msg}");
            None
        }
        Err(e) => return Err(e),
    };
    if metadata.is_none() {
        raise(progress, &mut warnings, Warning::MissingMetadata { start_id });
    }

    progress.begin(start_id, num_chunks);
    let mut loaded: Vec<MapRecord> = Vec::with_capacity(num_chunks.min(1 << 16) as usize);
    for i in 0..num_chunks {
        let id = start_id + i as u32;
        let rec = records
            .load(id)?
            .ok_or(DataCraftError::MissingRecord { id })?;
        loaded.push(rec);
        progress.chunk(id, i + 1, num_chunks);
    }

    let codec = ChunkCodec::new(cfg.chunk_size, cfg.policy.validation);
    let chunks: Vec<Vec<u8>> = if cfg.parallel {
        loaded
            .par_iter()
            .map(|r| codec.decode(r.id, &r.colors))
            .collect::<Result<_>>()?
    } else {
        loaded
            .iter()
            .map(|r| codec.decode(r.id, &r.colors))
            .collect::<Result<_>>()?
    };
    drop(loaded);
    let mut bytes = chunks.concat();

    let mut trimmed = false;
    if let Some(m) = &metadata {
        if m.original_size < bytes.len() as u64 {
            progress.trimmed(bytes.len() as u64, m.original_size);
            bytes.truncate(m.original_size as usize);
            trimmed = true;
        }
    }

    let window = cfg.zero_check_window.min(bytes.len());
    if bytes[..window].iter().all(|&b| b == 0) {
        raise(progress, &mut warnings, Warning::SuspiciousOutput { window });
    }

    info!(
        start_id,
        maps = num_chunks,
        bytes = bytes.len(),
        trimmed,
        "decoded run"
    );
    Ok(Decoded {
        bytes,
        metadata,
        trimmed,
        warnings,
    })
}

/// Compare `actual` with the stored digest once the output is back to its
/// original size.
fn check_digest(decoded: &mut Decoded, actual: &blake3::Hash, progress: &dyn Progress) {
    let Some(m) = &decoded.metadata else {
        return;
    };
    let Some(expected) = &m.blake3 else {
        return;
    };
    if decoded.bytes.len() as u64 != m.original_size || actual.as_bytes() == expected {
        return;
    }
    let w = Warning::ChecksumMismatch {
        expected: hex::encode(expected),
        actual: actual.to_hex().to_string(),
    };
    raise(progress, &mut decoded.warnings, w);
}

/// Decode a run and write it to `output`. The file is only created once every
/// map has been read; the checksum is taken over the bytes as written.
pub fn decode_to_file<R: WorldRepo + ?Sized>(
    repo: &R,
    start_id: u32,
    num_chunks: u64,
    output: &Path,
    cfg: &Config,
    progress: &dyn Progress,
) -> Result<Decoded> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(DataCraftError::MissingDestination(parent.to_path_buf()));
        }
    }
    let mut decoded = assemble(start_id, num_chunks, repo, repo, cfg, progress)?;

    let mut w = HashingForward::new(BufWriter::new(File::create(output)?));
    w.write_all(&decoded.bytes)?;
    w.flush()?;
    debug!(path = %output.display(), bytes = w.counted, "wrote output");
    let digest = w.digest();
    check_digest(&mut decoded, &digest, progress);
    Ok(decoded)
}

/// Decode a run using its own metadata and check the result against it.
pub fn verify<R: WorldRepo + ?Sized>(repo: &R, start_id: u32, cfg: &Config) -> Result<RunMetadata> {
    let meta = repo
        .load_meta(start_id)?
        .ok_or(DataCraftError::MissingMetadata { start_id })?;
    let decoded = assemble(start_id, meta.chunk_count, repo, repo, cfg, &LogProgress)?;
    if decoded.bytes.len() as u64 != meta.original_size {
        return Err(DataCraftError::Format(format!(
            "decoded {} bytes, metadata says {}",
            decoded.bytes.len(),
            meta.original_size
        )));
    }
    if let Some(expected) = &meta.blake3 {
        let actual = blake3::hash(&decoded.bytes);
        if actual.as_bytes() != expected {
            return Err(DataCraftError::ChecksumMismatch {
                expected: hex::encode(expected),
                actual: actual.to_hex().to_string(),
            });
        }
    }
    Ok(meta)
}
