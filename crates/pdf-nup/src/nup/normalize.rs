//! Page normalization
//!
//! Bakes each page's `/Rotate` into its content so the composer only sees
//! upright, axis-aligned boxes. Pages are normalized in parallel; every task
//! owns its own output document and writes exactly one slot of the result
//! array, so reassembly is in page order whatever order tasks finish in.

use super::assemble::{merge_in_order, write_page_tree};
use crate::constants::OUTPUT_PDF_VERSION;
use crate::layout::{Rect, effective_size};
use crate::render::{PageBuilder, read_page_geometry, read_page_rotation};
use crate::types::*;
use lopdf::{Document, ObjectId};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Whether any page is rotated by 90 or 270 degrees
pub fn needs_normalization(document: &Document) -> Result<bool> {
    for page_id in document.get_pages().into_values() {
        if read_page_rotation(document, page_id)?.is_quarter_turn() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Re-render one page upright into a new single-page document.
///
/// The new page has no rotation and its MediaBox and CropBox are the
/// selected source box rotated, anchored at the origin.
pub fn normalize_page(source: &Document, page_index: usize, box_type: BoxType) -> Result<Document> {
    let page_id = source
        .get_pages()
        .into_values()
        .nth(page_index)
        .ok_or_else(|| NupError::PageLoad {
            page: page_index,
            reason: "page index out of range".to_string(),
        })?;

    render_upright(source, page_id, box_type).map_err(|e| NupError::PageLoad {
        page: page_index,
        reason: e.to_string(),
    })
}

/// Normalize every page of `source` on a pool of `threads` workers
/// (0 = one per CPU) and merge the results in page order.
///
/// All pages are attempted. If any fails, the error lists every failed
/// page index and no document is returned.
pub fn normalize_document(source: &Document, box_type: BoxType, threads: usize) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(NupError::EmptyDocument);
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let failures = AtomicUsize::new(0);
    let mut slots: Vec<Option<Result<Document>>> = (0..page_ids.len()).map(|_| None).collect();

    log::info!(
        "Normalizing {} pages on {} threads",
        page_ids.len(),
        pool.current_num_threads()
    );

    pool.install(|| {
        slots
            .par_iter_mut()
            .zip(page_ids.par_iter())
            .enumerate()
            .for_each(|(index, (slot, &page_id))| {
                let result = render_upright(source, page_id, box_type).map_err(|e| {
                    failures.fetch_add(1, Ordering::Relaxed);
                    log::warn!("Failed to normalize page {}: {}", index, e);
                    NupError::PageLoad {
                        page: index,
                        reason: e.to_string(),
                    }
                });
                *slot = Some(result);
            });
    });

    if failures.load(Ordering::Relaxed) > 0 {
        let failed: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !matches!(slot, Some(Ok(_))))
            .map(|(index, _)| index)
            .collect();
        return Err(NupError::Normalization { failed });
    }

    let pieces = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| match slot {
            Some(result) => result,
            None => Err(NupError::Assembly(format!(
                "page {} was never normalized",
                index
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    merge_in_order(pieces)
}

/// Draw a page upright onto a fresh page of its own document
fn render_upright(source: &Document, page_id: ObjectId, box_type: BoxType) -> Result<Document> {
    let geometry = read_page_geometry(source, page_id, box_type)?;
    let upright = Rect::from_size(effective_size(geometry.bounds.size(), geometry.rotation));

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_id = output.new_object_id();
    let mut cache = HashMap::new();

    let mut page = PageBuilder::begin(upright);
    page.place_page(&mut output, source, page_id, &geometry, &upright, &mut cache)?;
    let new_page_id = page.finish(&mut output, pages_id);

    write_page_tree(&mut output, pages_id, &[new_page_id]);

    log::debug!(
        "Normalized page {:?}: rotation {} -> 0, {}x{}",
        page_id,
        geometry.rotation.degrees(),
        upright.width,
        upright.height
    );
    Ok(output)
}
