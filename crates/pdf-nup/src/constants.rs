//! Shared constants for N-up layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the pipeline.

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Output Documents
// =============================================================================

/// PDF version written for every document the pipeline creates
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Prefix for the Form XObject resource names placed on output pages
pub const XOBJECT_NAME_PREFIX: &str = "P";

/// Page attributes a page may inherit from its ancestors in the page tree
pub const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];
