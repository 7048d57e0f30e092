//! N-up page layout
//!
//! This module orchestrates the pipeline:
//! 1. Check source pages for 90/270 degree rotation
//! 2. Normalize pages upright in parallel when needed
//! 3. Tile the pages onto output pages in the chosen direction

mod assemble;
mod compose;
mod io;
mod normalize;

pub use assemble::{extract_pages, merge_in_order, write_page_tree};
pub use compose::compose;
pub use io::{load_pdf, load_pdf_bytes, save_pdf, save_to_bytes};
pub use normalize::{needs_normalization, normalize_document, normalize_page};

use crate::options::NupOptions;
use crate::types::*;
use lopdf::Document;

/// Main N-up function
pub async fn transform(document: Document, options: &NupOptions) -> Result<Document> {
    options.validate()?;

    let options = options.clone();

    tokio::task::spawn_blocking(move || transform_sync(&document, &options)).await?
}

/// Blocking version of [`transform`]
pub fn transform_sync(document: &Document, options: &NupOptions) -> Result<Document> {
    options.validate()?;

    let total_pages = document.get_pages().len();
    if total_pages == 0 {
        return Err(NupError::EmptyDocument);
    }

    let normalize = match options.normalize {
        NormalizeMode::Always => true,
        NormalizeMode::Auto => needs_normalization(document)?,
    };

    log::info!(
        "Transforming {} pages into {}x{} {:?} (normalize: {})",
        total_pages,
        options.grid.rows,
        options.grid.columns,
        options.grid.direction,
        normalize
    );

    if normalize {
        let normalized = normalize_document(document, options.box_type, options.threads)?;
        // Normalized pages carry the selected box as both MediaBox and CropBox
        compose(&normalized, &options.grid, BoxType::CropBox)
    } else {
        compose(document, &options.grid, options.box_type)
    }
}
