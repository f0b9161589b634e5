use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::document::Document;
use crate::error::{CollectionError, Result};

/// Write the collection as a JSON array, one object per document with all six
/// fields (absent values as `null`). Overwrites the destination in place.
pub fn save_collection_as_json(collection: &[Document], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| CollectionError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection).map_err(|source| {
        if source.is_io() {
            CollectionError::Write {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            CollectionError::Json {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    writer.flush().map_err(write_err)?;

    info!(path = ?path, documents = collection.len(), "saved collection");
    Ok(())
}

/// Load a collection saved by [`save_collection_as_json`]. A missing file is
/// not an error: it means nothing was saved yet, so the result is empty.
pub fn load_collection_from_json(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = ?path, "no collection found, starting with an empty one");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CollectionError::Open {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let collection: Vec<Document> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CollectionError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = ?path, documents = collection.len(), "loaded collection");
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_collection;
    use tempfile::tempdir;

    fn sample() -> Vec<Document> {
        vec![
            Document::from_body(0, Some("The Fox".into()), "Once upon a time. "),
            Document {
                document_id: 1,
                title: None,
                raw_text: Some("Slow and steady".into()),
                terms: Some(vec!["Slow".into(), "and".into(), "steady".into()]),
                filtered_terms: Some(vec!["slow".into(), "steady".into()]),
                stemmed_terms: Some(vec!["slow".into(), "steadi".into()]),
            },
            Document::default(),
        ]
    }

    #[test]
    fn round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("collection.json");
        let docs = sample();
        save_collection_as_json(&docs, &path).unwrap();
        let loaded = load_collection_from_json(&path).unwrap();
        assert_eq!(loaded, docs);
    }

    #[test]
    fn reload_then_resave_is_stable() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        save_collection_as_json(&sample(), &first).unwrap();
        save_collection_as_json(&load_collection_from_json(&first).unwrap(), &second).unwrap();
        let a: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        let b: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn saved_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("collection.json");
        save_collection_as_json(&sample(), &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);

        let first = items[0].as_object().unwrap();
        let mut keys: Vec<_> = first.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["document_id", "filtered_terms", "raw_text", "stemmed_terms", "terms", "title"]
        );
        assert_eq!(first["document_id"], 0);
        assert_eq!(first["title"], "The Fox");
        assert_eq!(first["raw_text"], "Once upon a time.");
        assert!(first["filtered_terms"].is_null());
        assert!(items[2]["title"].is_null());
        assert!(items[2]["terms"].is_null());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let docs = load_collection_from_json(dir.path().join("nope.json")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_keys_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"[{"document_id": 7, "title": "Only a title"}, {}]"#).unwrap();
        let docs = load_collection_from_json(&path).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].document_id, 7);
        assert_eq!(docs[0].title.as_deref(), Some("Only a title"));
        assert!(docs[0].raw_text.is_none());
        assert!(docs[0].terms.is_none());
        assert_eq!(docs[1], Document::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"document_id\": 0,").unwrap();
        let err = load_collection_from_json(&path).unwrap_err();
        assert!(matches!(err, CollectionError::Json { .. }));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("object.json");
        std::fs::write(&path, r#"{"document_id": 0}"#).unwrap();
        assert!(matches!(
            load_collection_from_json(&path),
            Err(CollectionError::Json { .. })
        ));
        std::fs::write(&path, r#"[{"document_id": "zero"}]"#).unwrap();
        assert!(matches!(
            load_collection_from_json(&path),
            Err(CollectionError::Json { .. })
        ));
    }

    #[test]
    fn unwritable_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("collection.json");
        let err = save_collection_as_json(&sample(), &path).unwrap_err();
        assert!(matches!(err, CollectionError::Write { .. }));
    }

    #[test]
    fn extracted_fixture_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aesop.json");
        let docs = extract_collection("tests/fixtures/aesop_sample.txt").unwrap();
        save_collection_as_json(&docs, &path).unwrap();
        assert_eq!(load_collection_from_json(&path).unwrap(), docs);
    }
}
