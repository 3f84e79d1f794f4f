use crate::error::ServiceError;
use crate::player::traits::ServiceResult;
use crate::player::wire::CatalogSnapshot;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a cached snapshot. A missing or empty cache is `None`, not an error.
pub fn read(path: &Path) -> ServiceResult<Option<CatalogSnapshot>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ServiceError::CatalogCache {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let snapshot: CatalogSnapshot = serde_json::from_str(&content)?;
    Ok(Some(snapshot).filter(|s| !s.is_empty()))
}

pub fn write(path: &Path, snapshot: &CatalogSnapshot) -> ServiceResult<()> {
    let cache_error = |source| ServiceError::CatalogCache {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(cache_error)?;
    }
    let content = serde_json::to_string(snapshot)?;
    fs::write(path, content).map_err(cache_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::wire::{WireAlbum, WireArtist, WireSong};

    #[test]
    fn missing_cache_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(&dir.path().join("catalog.json")).unwrap().is_none());
    }

    #[test]
    fn written_snapshot_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");
        let snapshot = CatalogSnapshot {
            artists: vec![WireArtist {
                name: "Portishead".into(),
                albums: vec![WireAlbum {
                    name: "Dummy".into(),
                    year: Some(1994),
                    songs: vec![WireSong::new("p/d/01.flac".into(), "Mysterons".into(), 306)],
                }],
            }],
        };

        write(&path, &snapshot).unwrap();
        assert_eq!(read(&path).unwrap(), Some(snapshot));
    }

    #[test]
    fn empty_and_corrupt_caches() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{ "artists": [] }"#).unwrap();
        assert!(read(&empty).unwrap().is_none());

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(read(&corrupt), Err(ServiceError::CatalogDecode(_))));
    }
}
