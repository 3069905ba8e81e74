use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::document::Document;
use crate::renderer::{MapFrame, RasterSurface, RenderSurface};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paint a document onto a fresh bitmap
pub fn rasterize(document: &Document, frame: MapFrame) -> RgbaImage {
    let mut surface = RasterSurface::new(frame);
    surface.render(document.elements());
    surface.into_image()
}

/// PNG-encode a bitmap
pub fn to_image_bytes(bitmap: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    bitmap.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render and write a PNG, creating the parent directory if needed
pub fn export_png(document: &Document, frame: MapFrame, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = to_image_bytes(&rasterize(document, frame))?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    std::fs::write(path, bytes).map_err(io_err)?;
    log::info!("Exported map image to {}", path.display());
    Ok(())
}
