use crate::options::NupOptions;
use crate::render::read_page_rotation;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for the transformation
pub fn calculate_statistics(document: &Document, options: &NupOptions) -> Result<NupStatistics> {
    options.validate()?;

    let pages = document.get_pages();
    let source_pages = pages.len();
    if source_pages == 0 {
        return Err(NupError::EmptyDocument);
    }

    let cells_per_page = options.grid.cells();
    let output_pages = source_pages.div_ceil(cells_per_page);
    let blank_cells = output_pages * cells_per_page - source_pages;

    let mut rotated_pages = 0;
    for &page_id in pages.values() {
        if read_page_rotation(document, page_id)?.is_quarter_turn() {
            rotated_pages += 1;
        }
    }

    let needs_normalization = match options.normalize {
        NormalizeMode::Always => true,
        NormalizeMode::Auto => rotated_pages > 0,
    };

    Ok(NupStatistics {
        source_pages,
        cells_per_page,
        output_pages,
        blank_cells,
        rotated_pages,
        needs_normalization,
    })
}
