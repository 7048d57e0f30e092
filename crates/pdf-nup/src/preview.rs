use crate::nup::{extract_pages, transform};
use crate::options::NupOptions;
use crate::types::*;
use lopdf::Document;

/// Generate a preview of the transformation.
/// Only the source pages needed for the first `max_output_pages` output
/// pages are processed.
pub async fn generate_preview(
    document: &Document,
    options: &NupOptions,
    max_output_pages: usize,
) -> Result<Document> {
    options.validate()?;

    if max_output_pages == 0 {
        return Err(NupError::Config(
            "Preview needs at least one output page".to_string(),
        ));
    }

    let source_pages_needed = max_output_pages
        .checked_mul(options.grid.cells())
        .ok_or_else(|| {
            NupError::Config(format!(
                "Preview of {} output pages is too large",
                max_output_pages
            ))
        })?;
    let preview_doc = extract_pages(document, source_pages_needed)?;

    transform(preview_doc, options).await
}
