//! Cell fill order
//!
//! Each [`Direction`] is a total order over the cells of a `rows × columns`
//! grid. The table below is the only place the four orders are defined:
//!
//! | Direction     | Outer loop        | Inner loop        |
//! |---------------|-------------------|-------------------|
//! | HorizontalL2R | row 1→rows        | column 1→columns  |
//! | HorizontalR2L | row 1→rows        | column columns→1  |
//! | VerticalL2R   | column 1→columns  | row 1→rows        |
//! | VerticalR2L   | column columns→1  | row 1→rows        |

use crate::types::Direction;

use super::GridCell;

/// Which axis the outer loop walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Major {
    Row,
    Column,
}

/// Traversal policy for one direction
#[derive(Debug, Clone, Copy)]
struct Traversal {
    major: Major,
    columns_reversed: bool,
}

impl Direction {
    fn traversal(self) -> Traversal {
        match self {
            Direction::HorizontalL2R => Traversal {
                major: Major::Row,
                columns_reversed: false,
            },
            Direction::HorizontalR2L => Traversal {
                major: Major::Row,
                columns_reversed: true,
            },
            Direction::VerticalL2R => Traversal {
                major: Major::Column,
                columns_reversed: false,
            },
            Direction::VerticalR2L => Traversal {
                major: Major::Column,
                columns_reversed: true,
            },
        }
    }
}

/// Cell receiving the `index`-th page of a chunk (0-based).
///
/// # Panics
/// If `index` is not below `rows * columns`.
pub fn cell_at(rows: usize, columns: usize, direction: Direction, index: usize) -> GridCell {
    assert!(
        rows.checked_mul(columns).is_some_and(|cells| index < cells),
        "index {index} outside a {rows}x{columns} grid"
    );

    let Traversal {
        major,
        columns_reversed,
    } = direction.traversal();

    let (row, step) = match major {
        Major::Row => (index / columns + 1, index % columns),
        Major::Column => (index % rows + 1, index / rows),
    };
    let column = if columns_reversed {
        columns - step
    } else {
        step + 1
    };

    GridCell::new(row, column)
}

/// The first `count` cells of the fill order, computed lazily.
pub fn fill_order_iter(
    rows: usize,
    columns: usize,
    direction: Direction,
    count: usize,
) -> impl Iterator<Item = GridCell> {
    (0..count).map(move |index| cell_at(rows, columns, direction, index))
}

/// Grid cells in the order source pages fill them.
///
/// Index `i` of the result is the cell receiving the `i`-th page of a chunk.
pub fn fill_order(rows: usize, columns: usize, direction: Direction) -> Vec<GridCell> {
    fill_order_iter(rows, columns, direction, rows * columns).collect()
}
