//! `mapstore_meta_<start_id>.txt`: one `Key: value` pair per line.

use crate::domain::RunMetadata;
use crate::error::{DataCraftError, Result};
use crate::pack::writer::end_id as last_id;
use crate::util::hex::parse_hex_array;
use std::io::Write;

pub fn file_name(start_id: u32) -> String {
    format!("mapstore_meta_{start_id}.txt")
}

/// Recover the start id from a metadata file name.
pub fn start_id_from_name(name: &str) -> Option<u32> {
    name.strip_prefix("mapstore_meta_")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}

/// Line breaks in the file name are written as spaces so they cannot start a
/// new key.
pub fn write_to(mut w: impl Write, m: &RunMetadata) -> Result<()> {
    writeln!(w, "Filename: {}", m.filename.replace(['\r', '\n'], " "))?;
    writeln!(w, "OriginalSize: {}", m.original_size)?;
    writeln!(w, "Maps: {}", m.chunk_count)?;
    writeln!(w, "StartID: {}", m.start_id)?;
    writeln!(w, "EndID: {}", m.end_id)?;
    if let Some(h) = &m.blake3 {
        writeln!(w, "Blake3: {}", hex::encode(h))?;
    }
    writeln!(w, "Created: {}", m.created)?;
    Ok(())
}

/// Only `OriginalSize` is required. `start_id` fills in a missing `StartID`.
pub fn parse(text: &str, start_id: u32) -> Result<RunMetadata> {
    let mut m = RunMetadata {
        start_id,
        ..Default::default()
    };
    let mut original_size = None;
    let mut end_id = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Filename" => m.filename = value.to_string(),
            "OriginalSize" => original_size = Some(number(key, value)?),
            "Maps" => m.chunk_count = number(key, value)?,
            "StartID" => m.start_id = number(key, value)?,
            "EndID" => end_id = Some(number(key, value)?),
            "Blake3" => m.blake3 = Some(parse_hex_array::<32>(value)?),
            "Created" => m.created = number(key, value)?,
            _ => {}
        }
    }

    m.original_size = original_size
        .ok_or_else(|| DataCraftError::Format("metadata has no OriginalSize".into()))?;
    m.end_id = end_id.unwrap_or_else(|| last_id(m.start_id, m.chunk_count));
    Ok(m)
}

fn number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| DataCraftError::Format(format!("metadata {}: {e}", key.trim())))
}
