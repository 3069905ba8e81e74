use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::MapTemplate;
use crate::document::Document;
use crate::element::ElementType;
use crate::util::time;

pub const MAP_FILE_VERSION: u32 = 1;

/// Errors that can occur while saving or loading maps
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to encode map: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Map file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// On-disk map: the element sequence plus the frame it was drawn in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<MapTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub elements: Vec<ElementType>,
}

impl MapFile {
    pub fn new(document: &Document) -> Self {
        Self {
            version: MAP_FILE_VERSION,
            template: None,
            title: None,
            elements: document.elements().to_vec(),
        }
    }

    pub fn with_frame(mut self, template: MapTemplate, title: impl Into<String>) -> Self {
        self.template = Some(template);
        self.title = Some(title.into());
        self
    }

    pub fn into_document(self) -> Document {
        Document::from_elements(self.elements)
    }
}

/// Encode the element sequence of a document
pub fn serialize(document: &Document) -> PersistenceResult<Vec<u8>> {
    encode_map(&MapFile::new(document))
}

/// Decode bytes written by [`serialize`] or [`encode_map`]
pub fn deserialize(bytes: &[u8]) -> PersistenceResult<Document> {
    Ok(decode_map(bytes)?.into_document())
}

pub fn encode_map(file: &MapFile) -> PersistenceResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(file)?)
}

/// Decode a map file. A bare JSON array of elements is accepted as well.
pub fn decode_map(bytes: &[u8]) -> PersistenceResult<MapFile> {
    let file = match serde_json::from_slice::<MapFile>(bytes) {
        Ok(file) => file,
        Err(err) => match serde_json::from_slice::<Vec<ElementType>>(bytes) {
            Ok(elements) => MapFile {
                version: MAP_FILE_VERSION,
                template: None,
                title: None,
                elements,
            },
            Err(_) => return Err(err.into()),
        },
    };

    if file.version > MAP_FILE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: file.version,
            supported: MAP_FILE_VERSION,
        });
    }
    Ok(file)
}

/// Write a map file, creating the parent directory if needed
pub fn save_map(path: impl AsRef<Path>, file: &MapFile) -> PersistenceResult<()> {
    let path = path.as_ref();
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    fs::write(path, encode_map(file)?).map_err(io_err)?;
    log::info!("Saved {} element(s) to {}", file.elements.len(), path.display());
    Ok(())
}

pub fn load_map(path: impl AsRef<Path>) -> PersistenceResult<MapFile> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = decode_map(&bytes)?;
    log::info!("Loaded {} element(s) from {}", file.elements.len(), path.display());
    Ok(file)
}

/// Timestamped file name such as `map_1700000000.json`
pub fn default_file_name(extension: &str) -> String {
    format!("map_{}.{}", time::timestamp_secs(), extension)
}
