//! Tiling composer
//!
//! Splits the source pages into chunks of `rows × columns` and draws each
//! chunk onto one output page, cell by cell in the direction's fill order.

use super::assemble::write_page_tree;
use crate::constants::OUTPUT_PDF_VERSION;
use crate::layout::{Rect, cell_rect, effective_size, fill_order_iter, output_page_box};
use crate::render::{PageBuilder, read_page_geometry};
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::collections::HashMap;

/// Tile the pages of `source` onto new output pages.
///
/// Each output page is sized from the first page of its chunk. A page that
/// cannot be drawn leaves its cell blank; the output page is still closed.
pub fn compose(source: &Document, grid: &GridSpec, box_type: BoxType) -> Result<Document> {
    grid.validate()?;

    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(NupError::EmptyDocument);
    }

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::new();
    let mut cache: HashMap<ObjectId, ObjectId> = HashMap::new();

    for (chunk_index, chunk) in page_ids.chunks(grid.cells()).enumerate() {
        let first_page = chunk_index * grid.cells();
        let cell_box = chunk_cell_box(source, chunk[0], first_page, box_type)?;

        let mut page = PageBuilder::begin(output_page_box(&cell_box, grid.rows, grid.columns));

        // A short last chunk leaves the remaining cells blank
        let order = fill_order_iter(grid.rows, grid.columns, grid.direction, chunk.len());
        for (offset, (cell, &page_id)) in order.zip(chunk).enumerate() {
            let page_index = first_page + offset;
            let dest = cell_rect(&cell_box, grid.rows, grid.columns, cell.row, cell.column);

            let placed = read_page_geometry(source, page_id, box_type).and_then(|geometry| {
                page.place_page(&mut output, source, page_id, &geometry, &dest, &mut cache)
            });

            match placed {
                Ok(()) => log::debug!(
                    "Placed page {} at row {}, column {} of output page {}",
                    page_index,
                    cell.row,
                    cell.column,
                    chunk_index
                ),
                Err(e) => log::warn!(
                    "Leaving cell ({}, {}) of output page {} blank, page {} failed: {}",
                    cell.row,
                    cell.column,
                    chunk_index,
                    page_index,
                    e
                ),
            }
        }

        page_refs.push(page.finish(&mut output, pages_tree_id));
    }

    write_page_tree(&mut output, pages_tree_id, &page_refs);
    output.prune_objects();

    log::info!(
        "Composed {} source pages onto {} output pages ({}x{}, {:?})",
        page_ids.len(),
        page_refs.len(),
        grid.rows,
        grid.columns,
        grid.direction
    );
    Ok(output)
}

/// Cell size for a chunk: the upright box of its first page, at the origin
fn chunk_cell_box(
    source: &Document,
    page_id: ObjectId,
    page_index: usize,
    box_type: BoxType,
) -> Result<Rect> {
    let geometry = read_page_geometry(source, page_id, box_type).map_err(|e| {
        NupError::PageLoad {
            page: page_index,
            reason: e.to_string(),
        }
    })?;

    let size = effective_size(geometry.bounds.size(), geometry.rotation);
    if size.is_degenerate() {
        return Err(NupError::DegenerateGeometry {
            width: size.width,
            height: size.height,
        });
    }
    Ok(Rect::from_size(size))
}
