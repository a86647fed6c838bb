// File: src/persistence.rs
use crate::core::types::Resolution;
use crate::error::PersistenceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The on-disk form of the origin cache: the mapping plus the day it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub last_active: Option<NaiveDate>,
    pub entries: BTreeMap<String, Resolution>,
}

/// Writes the snapshot next to its destination and renames it into place, so a
/// crash mid-write never leaves a truncated cache behind.
pub fn save_to_disk(snapshot: &CacheSnapshot, path: &Path) -> Result<(), PersistenceError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<CacheSnapshot, PersistenceError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: CacheSnapshot = bincode::deserialize_from(reader)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Compound, CompoundPart, OriginLabel};

    fn sample() -> CacheSnapshot {
        let mut entries = BTreeMap::new();
        entries.insert("walk".to_string(), Resolution::simple(OriginLabel::OldEnglish));
        entries.insert(
            "sunlight".to_string(),
            Resolution::Compound(Compound {
                parts: [
                    CompoundPart { text: "sun".into(), origin: OriginLabel::OldEnglish },
                    CompoundPart { text: "light".into(), origin: OriginLabel::OldEnglish },
                ],
                original_word: "sunlight".into(),
            }),
        );
        CacheSnapshot {
            last_active: NaiveDate::from_ymd_opt(2024, 3, 1),
            entries,
        }
    }

    #[test]
    fn snapshot_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.bin");
        save_to_disk(&sample(), &path).unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_disk(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.bin");
        fs::write(&path, b"\xff\xff\xff\xff not bincode").unwrap();
        assert!(load_from_disk(&path).is_err());
    }
}
