use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid grid: {rows} rows x {columns} columns")]
    InvalidGridSpec { rows: usize, columns: usize },
    #[error("Failed to load page {page}: {reason}")]
    PageLoad { page: usize, reason: String },
    #[error("Normalization failed for pages {failed:?}")]
    Normalization { failed: Vec<usize> },
    #[error("Degenerate page box {width} x {height}")]
    DegenerateGeometry { width: f32, height: f32 },
    #[error("Document has no pages")]
    EmptyDocument,
    #[error("Assembly failed: {0}")]
    Assembly(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Order in which the cells of a grid are filled with source pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Rows top to bottom, each row left to right
    #[default]
    HorizontalL2R,
    /// Rows top to bottom, each row right to left
    HorizontalR2L,
    /// Columns left to right, each column top to bottom
    VerticalL2R,
    /// Columns right to left, each column top to bottom
    VerticalR2L,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::HorizontalL2R,
        Direction::HorizontalR2L,
        Direction::VerticalL2R,
        Direction::VerticalR2L,
    ];
}

/// Grid that source pages are tiled into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub rows: usize,
    pub columns: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 2,
            direction: Direction::HorizontalL2R,
        }
    }
}

impl GridSpec {
    pub fn new(rows: usize, columns: usize, direction: Direction) -> Self {
        Self {
            rows,
            columns,
            direction,
        }
    }

    /// Number of source pages placed on one output page
    pub fn cells(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Both dimensions must be at least 1 and `rows * columns` must fit a `usize`
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 || self.rows.checked_mul(self.columns).is_none() {
            return Err(NupError::InvalidGridSpec {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

/// Intrinsic page rotation, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Interpret a `/Rotate` value. Anything that is not a multiple of 90
    /// maps to `None`.
    pub fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) {
            90 => Rotation::Clockwise90,
            180 => Rotation::Clockwise180,
            270 => Rotation::Clockwise270,
            _ => Rotation::None,
        }
    }

    /// True when the rotation swaps width and height
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}

/// Page box used as the visible area of a source page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoxType {
    MediaBox,
    #[default]
    CropBox,
    BleedBox,
    TrimBox,
    ArtBox,
}

impl BoxType {
    pub fn key(self) -> &'static [u8] {
        match self {
            BoxType::MediaBox => b"MediaBox",
            BoxType::CropBox => b"CropBox",
            BoxType::BleedBox => b"BleedBox",
            BoxType::TrimBox => b"TrimBox",
            BoxType::ArtBox => b"ArtBox",
        }
    }
}

/// When source pages are re-rendered upright before tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NormalizeMode {
    /// Only when some page is rotated by 90 or 270 degrees
    #[default]
    Auto,
    /// Every page, regardless of rotation
    Always,
}

/// Statistics about an N-up transformation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NupStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Source pages placed on each output page
    pub cells_per_page: usize,
    /// Output page count
    pub output_pages: usize,
    /// Cells left empty on the last output page
    pub blank_cells: usize,
    /// Source pages rotated by 90 or 270 degrees
    pub rotated_pages: usize,
    /// Whether the pipeline will normalize pages before tiling
    pub needs_normalization: bool,
}
