//! PDF rendering modules for N-up
//!
//! This module handles all PDF-specific operations:
//! - Reading page boxes and rotation, including inherited attributes
//! - Creating XObjects from source pages
//! - Building output pages
//! - Deep copying PDF objects

mod boxes;
mod page;
mod xobject;

pub use boxes::{
    PageGeometry, inherited_attribute, read_page_box, read_page_geometry, read_page_rotation,
};
pub(crate) use boxes::{rect_to_object, resolve};
pub use page::PageBuilder;
pub use xobject::{copy_object_deep, create_page_xobject};
