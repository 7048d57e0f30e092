//! Page box and rotation lookup
//!
//! Boxes and `/Rotate` may live on the page itself or on any ancestor
//! `/Pages` node, so every lookup walks the `/Parent` chain.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::Rect;
use crate::types::{BoxType, Result, Rotation};
use lopdf::{Document, Object, ObjectId};

/// Deepest page tree we follow before giving up on a `/Parent` chain
const MAX_TREE_DEPTH: usize = 64;

/// Visible area and intrinsic rotation of a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// The selected page box
    pub bounds: Rect,
    /// Clockwise `/Rotate` of the page
    pub rotation: Rotation,
}

/// Read the box of the given type and the rotation of a page.
pub fn read_page_geometry(
    doc: &Document,
    page_id: ObjectId,
    box_type: BoxType,
) -> Result<PageGeometry> {
    Ok(PageGeometry {
        bounds: read_page_box(doc, page_id, box_type)?,
        rotation: read_page_rotation(doc, page_id)?,
    })
}

/// Read a page box, applying the PDF defaults for missing boxes.
///
/// CropBox falls back to MediaBox, the other boxes to CropBox. Every box
/// is clipped to the MediaBox.
pub fn read_page_box(doc: &Document, page_id: ObjectId, box_type: BoxType) -> Result<Rect> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?
        .and_then(parse_rect)
        .unwrap_or_else(default_media_box);

    if box_type == BoxType::MediaBox {
        return Ok(media_box);
    }

    let crop_box = inherited_attribute(doc, page_id, b"CropBox")?
        .and_then(parse_rect)
        .unwrap_or(media_box);

    let selected = match box_type {
        BoxType::MediaBox | BoxType::CropBox => crop_box,
        BoxType::BleedBox | BoxType::TrimBox | BoxType::ArtBox => {
            let page = doc.get_dictionary(page_id)?;
            page.get(box_type.key())
                .ok()
                .map(|obj| resolve(doc, obj))
                .and_then(parse_rect)
                .unwrap_or(crop_box)
        }
    };

    Ok(selected.intersect(&media_box).unwrap_or_else(|| {
        log::warn!(
            "{} of page {:?} lies outside its MediaBox, using MediaBox",
            String::from_utf8_lossy(box_type.key()),
            page_id
        );
        media_box
    }))
}

/// Read the clockwise `/Rotate` of a page.
pub fn read_page_rotation(doc: &Document, page_id: ObjectId) -> Result<Rotation> {
    let degrees = match inherited_attribute(doc, page_id, b"Rotate")? {
        Some(Object::Integer(i)) => *i,
        Some(Object::Real(r)) => r.round() as i64,
        _ => 0,
    };

    if degrees % 90 != 0 {
        log::warn!(
            "Page {:?} has /Rotate {} which is not a multiple of 90, ignoring it",
            page_id,
            degrees
        );
    }

    Ok(Rotation::from_degrees(degrees))
}

/// Look up a page attribute, following the `/Parent` chain for inherited
/// values. References are resolved one level.
pub fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(resolve(doc, value)));
        }

        let parent = match node.get(b"Parent").and_then(|p| p.as_reference()) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        node = match doc.get_dictionary(parent) {
            Ok(dict) => dict,
            Err(_) => return Ok(None),
        };
    }

    Ok(None)
}

/// Follow a single reference, leaving direct objects as they are
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Serialize a rectangle as a PDF box array
pub(crate) fn rect_to_object(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x),
        Object::Real(rect.y),
        Object::Real(rect.right()),
        Object::Real(rect.top()),
    ])
}

fn parse_rect(obj: &Object) -> Option<Rect> {
    let values = obj.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    Some(Rect::from_corners(
        extract_number(&values[0])?,
        extract_number(&values[1])?,
        extract_number(&values[2])?,
        extract_number(&values[3])?,
    ))
}

fn default_media_box() -> Rect {
    Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
