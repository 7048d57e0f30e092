//! Output page construction
//!
//! A [`PageBuilder`] is one drawing transaction: it is opened with
//! [`PageBuilder::begin`], receives source pages through
//! [`PageBuilder::place_page`] and is closed by [`PageBuilder::finish`],
//! which cannot fail. A placement that fails leaves the builder untouched.

use crate::constants::XOBJECT_NAME_PREFIX;
use crate::layout::{Rect, drawing_transform};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::boxes::{PageGeometry, rect_to_object};
use super::xobject::create_page_xobject;

/// An output page being drawn
#[derive(Debug)]
pub struct PageBuilder {
    media_box: Rect,
    content_ops: Vec<String>,
    xobjects: Dictionary,
}

impl PageBuilder {
    /// Open a new output page with the given bounds.
    pub fn begin(media_box: Rect) -> Self {
        Self {
            media_box,
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }

    /// Number of source pages drawn so far
    pub fn placed(&self) -> usize {
        self.content_ops.len()
    }

    /// Draw a source page upright and fitted into `dest`, clipped to `dest`.
    ///
    /// # Arguments
    /// * `output` - The document the page will be added to
    /// * `source` - The document holding the source page
    /// * `page_id` - The object ID of the source page
    /// * `geometry` - Box and rotation of the source page
    /// * `dest` - Destination rectangle on this page
    /// * `cache` - Copy cache shared by every page of `output`
    pub fn place_page(
        &mut self,
        output: &mut Document,
        source: &Document,
        page_id: ObjectId,
        geometry: &PageGeometry,
        dest: &Rect,
        cache: &mut HashMap<ObjectId, ObjectId>,
    ) -> Result<()> {
        let transform = drawing_transform(&geometry.bounds, geometry.rotation, dest)?;
        let xobject_id = create_page_xobject(output, source, page_id, &geometry.bounds, cache)?;

        let xobject_name = format!("{}{}", XOBJECT_NAME_PREFIX, self.placed());
        self.xobjects
            .set(xobject_name.as_bytes(), Object::Reference(xobject_id));
        self.content_ops.push(format!(
            "q {} {} {} {} re W n {} /{} Do Q\n",
            dest.x,
            dest.y,
            dest.width,
            dest.height,
            transform.to_cm(),
            xobject_name
        ));

        Ok(())
    }

    /// Close the page: write its content stream and page dictionary into
    /// `output` under `parent_pages_id`.
    pub fn finish(self, output: &mut Document, parent_pages_id: ObjectId) -> ObjectId {
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(self.xobjects));

        let content = self.content_ops.join("");
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(parent_pages_id));
        page_dict.set("MediaBox", rect_to_object(&self.media_box));
        page_dict.set("CropBox", rect_to_object(&self.media_box));
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        output.add_object(page_dict)
    }
}
