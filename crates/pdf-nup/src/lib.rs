pub mod layout;
pub mod nup;
pub mod render;

mod constants;
mod options;
mod preview;
mod stats;
mod types;

pub use nup::{load_pdf, load_pdf_bytes, save_pdf, save_to_bytes, transform, transform_sync};
pub use options::*;
pub use preview::generate_preview;
pub use stats::calculate_statistics;
pub use types::*;
