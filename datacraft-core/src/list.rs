use crate::container::meta;
use crate::domain::RunMetadata;
use crate::error::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Collect every `mapstore_meta_*.txt` in `data_dir`, ordered by start id.
/// Files that fail to parse are skipped with a warning.
pub fn scan_meta_dir(data_dir: &Path) -> Result<Vec<RunMetadata>> {
    let mut runs = Vec::new();
    for e in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let e = e.map_err(std::io::Error::other)?;
        if !e.file_type().is_file() {
            continue;
        }
        let name = e.file_name().to_string_lossy();
        let Some(start_id) = meta::start_id_from_name(&name) else {
            continue;
        };
        let text = std::fs::read_to_string(e.path())?;
        match meta::parse(&text, start_id) {
            Ok(m) => runs.push(m),
            Err(err) => tracing::warn!(path = %e.path().display(), error = %err, "skipping metadata"),
        }
    }
    runs.sort_by_key(|m| m.start_id);
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_sorted_runs_and_skips_junk() {
        let tmp = tempdir().unwrap();
        let d = tmp.path();
        std::fs::write(d.join("mapstore_meta_20.txt"), "OriginalSize: 5\nMaps: 1\n").unwrap();
        std::fs::write(d.join("mapstore_meta_10.txt"), "OriginalSize: 7\nMaps: 1\n").unwrap();
        std::fs::write(d.join("mapstore_meta_30.txt"), "garbage\n").unwrap();
        std::fs::write(d.join("map_10.dat"), b"not nbt").unwrap();
        std::fs::create_dir(d.join("mapstore_meta_40.txt")).unwrap();

        let runs = scan_meta_dir(d).unwrap();
        let ids: Vec<u32> = runs.iter().map(|m| m.start_id).collect();
        assert_eq!(ids, vec![10, 20]);
        assert_eq!(runs[0].original_size, 7);
        assert_eq!(runs[1].end_id, 20);
    }
}
