//! Geometry engine
//!
//! Pure functions computing rotation-corrected sizes, output page sizes,
//! per-cell rectangles and the transforms that place a source page box into
//! a destination rectangle.

use crate::types::{NupError, Result, Rotation};

use super::{Rect, Size, Transform};

// =============================================================================
// Sizes
// =============================================================================

/// Visual size of a box once the page rotation is applied.
pub fn effective_size(size: Size, rotation: Rotation) -> Size {
    if rotation.is_quarter_turn() {
        Size::new(size.height, size.width)
    } else {
        size
    }
}

/// Size of an output page holding `rows × columns` cells of `box_size`.
pub fn output_page_size(box_size: Size, rows: usize, columns: usize) -> Size {
    Size::new(box_size.width * columns as f32, box_size.height * rows as f32)
}

/// Bounds of an output page whose cells have the size of `page_box`,
/// anchored at `page_box`'s origin.
pub fn output_page_box(page_box: &Rect, rows: usize, columns: usize) -> Rect {
    let size = output_page_size(page_box.size(), rows, columns);
    Rect::new(page_box.x, page_box.y, size.width, size.height)
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Destination rectangle of the cell at 1-indexed (`row`, `column`).
///
/// Row 1 is the top row, so y decreases as the row index increases.
///
/// # Panics
/// If `row` is not in `1..=rows` or `column` is not in `1..=columns`.
pub fn cell_rect(page_box: &Rect, rows: usize, columns: usize, row: usize, column: usize) -> Rect {
    assert!(
        (1..=rows).contains(&row) && (1..=columns).contains(&column),
        "cell ({row}, {column}) outside a {rows}x{columns} grid"
    );

    Rect::new(
        page_box.x + page_box.width * (column - 1) as f32,
        page_box.y + page_box.height * (rows - row) as f32,
        page_box.width,
        page_box.height,
    )
}

// =============================================================================
// Transforms
// =============================================================================

/// Uniform scale that fits `source` inside `dest`, centered.
pub fn fit_transform(source: &Rect, dest: &Rect) -> Result<Transform> {
    ensure_drawable(source)?;

    let scale = (dest.width / source.width).min(dest.height / source.height);
    let offset_x = (dest.width - source.width * scale) / 2.0;
    let offset_y = (dest.height - source.height * scale) / 2.0;

    Ok(Transform::new(
        scale,
        0.0,
        0.0,
        scale,
        dest.x + offset_x - source.x * scale,
        dest.y + offset_y - source.y * scale,
    ))
}

/// Map `source` through `rotation` onto an upright box anchored at the origin.
pub fn rotation_transform(source: &Rect, rotation: Rotation) -> Transform {
    let Rect {
        x,
        y,
        width,
        height,
    } = *source;

    match rotation {
        Rotation::None => Transform::translate(-x, -y),
        Rotation::Clockwise90 => Transform::new(0.0, -1.0, 1.0, 0.0, -y, x + width),
        Rotation::Clockwise180 => Transform::new(-1.0, 0.0, 0.0, -1.0, x + width, y + height),
        Rotation::Clockwise270 => Transform::new(0.0, 1.0, -1.0, 0.0, y + height, -x),
    }
}

/// Transform drawing a page box with the given rotation upright and
/// fitted into `dest`.
pub fn drawing_transform(source: &Rect, rotation: Rotation, dest: &Rect) -> Result<Transform> {
    ensure_drawable(source)?;

    let upright = Rect::from_size(effective_size(source.size(), rotation));
    let fit = fit_transform(&upright, dest)?;
    Ok(rotation_transform(source, rotation).then(&fit))
}

fn ensure_drawable(rect: &Rect) -> Result<()> {
    if rect.size().is_degenerate() {
        return Err(NupError::DegenerateGeometry {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
