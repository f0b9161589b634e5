pub mod segmenter;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::document::Document;
use crate::error::{CollectionError, Result};
use segmenter::Segmenter;

/// Front matter of the anthology (licence, contents listing) that precedes
/// the first title. Fixed by the one supported source layout.
pub const PREAMBLE_LINES: usize = 307;

/// Two-stage pipeline: skip preamble → segment remaining lines into documents.
pub fn extract_collection(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CollectionError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let docs = extract_from_reader(BufReader::new(file)).map_err(|source| {
        CollectionError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = ?path, documents = docs.len(), "extracted collection");
    Ok(docs)
}

/// Segment any buffered source. A source shorter than the preamble yields an
/// empty collection.
///
/// `\n`, `\r\n` and a bare `\r` all end a line, both while counting the
/// preamble and inside the body. Read and decoding errors in the preamble are
/// returned like any other.
pub fn extract_from_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<Document>> {
    let mut segmenter = Segmenter::new();
    let mut skipped = 0;
    for line in reader.lines() {
        let line = line?;
        for piece in line.split('\r') {
            if skipped < PREAMBLE_LINES {
                skipped += 1;
                continue;
            }
            segmenter.feed(piece);
        }
    }
    Ok(segmenter.finish())
}

/// Extract several sources independently. Results keep the input order.
#[cfg(feature = "rayon")]
pub fn extract_collections(paths: &[PathBuf]) -> Vec<(PathBuf, Result<Vec<Document>>)> {
    paths
        .par_iter()
        .map(|p| (p.clone(), extract_collection(p)))
        .collect()
}

#[cfg(not(feature = "rayon"))]
pub fn extract_collections(paths: &[PathBuf]) -> Vec<(PathBuf, Result<Vec<Document>>)> {
    paths
        .iter()
        .map(|p| (p.clone(), extract_collection(p)))
        .collect()
}
