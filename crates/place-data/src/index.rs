//! PlaceIndex loading and validation.
//!
//! Snapshots are JSON documents saved from the places API. A directory of
//! snapshots is parsed in parallel with Rayon and merged in file-name order,
//! so the resulting index is deterministic regardless of thread scheduling.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

impl PlaceIndex {
    /// Load a single snapshot file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading place snapshot from {:?}", path);
        let index: PlaceIndex = parser::parse_places_file(path)?.into_iter().collect();
        index.validate()?;
        info!("Loaded {} places", index.len());
        Ok(index)
    }

    /// Load every `*.json` snapshot in a directory.
    ///
    /// Steps:
    /// 1. List the snapshot files and sort them by name
    /// 2. Parse all files in parallel
    /// 3. Merge in name order (later files replace earlier records by id)
    /// 4. Validate
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(DataLoadError::FileNotFound {
                path: dir.display().to_string(),
            });
        }
        info!("Loading place snapshots from {:?}", dir);

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        // `collect` into Result keeps input order and surfaces the first error
        let parsed: Vec<Vec<Place>> = files
            .par_iter()
            .map(|path| parser::parse_places_file(path))
            .collect::<Result<_>>()?;

        let mut index = PlaceIndex::new();
        for place in parsed.into_iter().flatten() {
            index.insert_place(place);
        }
        index.validate()?;

        info!(
            "Loaded {} places from {} snapshot files",
            index.len(),
            files.len()
        );
        Ok(index)
    }

    /// Load from a file or a directory, whichever `path` is.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_from_dir(path)
        } else {
            Self::load_from_file(path)
        }
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every place has a non-empty id
    /// - `avg_price`, when present, is non-negative
    ///
    /// Ratings outside 0-5 are deliberately not checked; they are data.
    pub fn validate(&self) -> Result<()> {
        for (position, place) in self.places.iter().enumerate() {
            if place.id.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "place at position {} ({:?}) has no id",
                    position, place.name
                )));
            }
            if let Some(price) = place.avg_price {
                if price < 0.0 {
                    return Err(DataLoadError::InvalidValue {
                        field: format!("avg_price of {}", place.id),
                        value: price.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_snapshot(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().unwrap();
        let path = write_snapshot(
            &dir,
            "places.json",
            r#"{"success": true, "data": [{"id": "1", "name": "Louvre", "category": "Museum"}]}"#,
        );

        let index = PlaceIndex::load_from_file(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get_place("1").unwrap().name, "Louvre");
    }

    #[test]
    fn test_load_dir_merges_in_name_order() {
        let dir = TempDir::new().unwrap();
        write_snapshot(&dir, "b.json", r#"[{"id": "1", "name": "Newer"}, {"id": "3"}]"#);
        write_snapshot(&dir, "a.json", r#"[{"id": "1", "name": "Older"}, {"id": "2"}]"#);
        write_snapshot(&dir, "notes.txt", "not a snapshot");

        let index = PlaceIndex::load_from_dir(dir.path()).unwrap();
        let ids: Vec<&str> = index.places().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(index.get_place("1").unwrap().name, "Newer");
    }

    #[test]
    fn test_missing_file() {
        let err = PlaceIndex::load_from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let index: PlaceIndex = vec![Place::new("", "Nameless", "Cafe")].into_iter().collect();
        assert!(matches!(index.validate(), Err(DataLoadError::ValidationError(_))));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut place = Place::new("x", "Odd", "Cafe");
        place.avg_price = Some(-3.0);
        let index: PlaceIndex = vec![place].into_iter().collect();
        assert!(matches!(index.validate(), Err(DataLoadError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_allows_out_of_range_rating() {
        let mut place = Place::new("x", "Overrated", "Cafe");
        place.rating = 7.5;
        let index: PlaceIndex = vec![place].into_iter().collect();
        assert!(index.validate().is_ok());
    }
}
