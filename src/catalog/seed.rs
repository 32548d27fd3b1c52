//! Initial catalog contents, used only to fill an empty store.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::item::{ItemFields, NewItem};

/// Built-in album list.
const BUILTIN_SEED: &str = include_str!("../../data/albums.json");

/// Seed files are a few kilobytes; anything far larger is a mistake.
const MAX_SEED_SIZE: u64 = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Seed file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Entry {index} has volume '{volume}': volumes cannot contain '/'")]
    InvalidVolume { index: usize, volume: String },
}

/// Parse a JSON array of item field mappings.
///
/// A volume is a single `albums/<volume>` path segment, so volumes containing
/// `/` are rejected.
pub fn parse(json: &str) -> Result<Vec<ItemFields>, SeedError> {
    let fields: Vec<ItemFields> = serde_json::from_str(json)?;
    for (index, entry) in fields.iter().enumerate() {
        if let Some(volume) = entry.volume.as_deref().filter(|v| v.contains('/')) {
            return Err(SeedError::InvalidVolume {
                index,
                volume: volume.to_string(),
            });
        }
    }
    Ok(fields)
}

/// The built-in album list.
pub fn builtin() -> Result<Vec<ItemFields>, SeedError> {
    parse(BUILTIN_SEED)
}

/// Load a seed list from a JSON file.
pub fn load_file(path: &Path) -> Result<Vec<ItemFields>, SeedError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_SEED_SIZE {
        return Err(SeedError::TooLarge {
            size,
            max: MAX_SEED_SIZE,
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Apply defaults to every entry.
pub fn prepare(fields: &[ItemFields]) -> Vec<NewItem> {
    fields.iter().cloned().map(NewItem::create).collect()
}

/// Volumes that occur more than once, in first-occurrence order.
///
/// Only the first item with a given volume is reachable by `albums/<volume>`.
pub fn duplicate_volumes(items: &[NewItem]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for item in items {
        let count = counts.entry(item.volume.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(item.volume.clone());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_builtin_parses() {
        let fields = builtin().unwrap();
        assert_eq!(fields.len(), 34);
        assert_eq!(fields[0].volume.as_deref(), Some("1"));
        assert_eq!(fields[0].title.as_deref(), Some("Asterix the Gaul"));
    }

    #[test]
    fn test_builtin_has_unique_volumes() {
        let items = prepare(&builtin().unwrap());
        assert!(duplicate_volumes(&items).is_empty());
    }

    #[test]
    fn test_prepare_applies_defaults() {
        let fields = parse(r#"[{"volume": 1}, {}]"#).unwrap();
        let items = prepare(&fields);
        assert_eq!(items[0].title, "No title");
        assert_eq!(items[1].volume, "Unknown");
    }

    #[test]
    fn test_duplicate_volumes_reported_once() {
        let fields = parse(r#"[{"volume": 1}, {"volume": "1"}, {"volume": 2}, {"volume": 1}]"#)
            .unwrap();
        assert_eq!(duplicate_volumes(&prepare(&fields)), vec!["1".to_string()]);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(parse(r#"{"volume": 1}"#), Err(SeedError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_volume_with_slash() {
        let result = parse(r#"[{"volume": 12}, {"volume": "12/b"}]"#);
        match result {
            Err(SeedError::InvalidVolume { index, volume }) => {
                assert_eq!(index, 1);
                assert_eq!(volume, "12/b");
            }
            other => panic!("expected InvalidVolume, got {:?}", other),
        }
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("albumshelf-seed-{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, r#"[{{"volume": 9, "title": "Asterix and the Normans"}}]"#).unwrap();
        }
        let fields = load_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].volume.as_deref(), Some("9"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_file(Path::new("/nonexistent/albumshelf/seed.json"));
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
