//! Ordering key space for tasks inside a column.
//!
//! A position is a plain `f64`. A larger value appears earlier (higher) in the
//! column. Ordinary moves never renumber other tasks: a moved task gets a value
//! strictly between its new neighbours, below the lowest task, or the
//! [`EMPTY_COLUMN_POSITION`] sentinel. When a gap can no longer be split the
//! column is compacted (see [`crate::compact_column_positions`]).

use std::cmp::Ordering;

pub type Position = f64;

/// Position given to a task placed into a column with no tasks.
pub const EMPTY_COLUMN_POSITION: Position = 10000.0;

/// Step used when inserting above the topmost task.
pub const TOP_INCREMENT: Position = 100.0;

/// Spacing between neighbours after a column is compacted.
pub const COMPACT_SPACING: Position = 1000.0;

/// True when a task at `a` is shown before a task at `b`.
pub fn precedes(a: Position, b: Position) -> bool {
    a > b
}

/// Column order for positions: earlier (larger) first.
pub fn compare(a: Position, b: Position) -> Ordering {
    b.total_cmp(&a)
}

/// How far below `lowest` a task appended to the bottom lands.
pub fn bottom_decrement(lowest: Position) -> Position {
    if lowest < 1.0 {
        0.1
    } else if lowest < 10.0 {
        1.0
    } else if lowest < 100.0 {
        10.0
    } else {
        100.0
    }
}

/// Midpoint of two distinct positions, or `None` if no representable value
/// lies strictly between them.
pub fn midpoint(a: Position, b: Position) -> Option<Position> {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    let mid = low + (high - low) / 2.0;
    (mid.is_finite() && low < mid && mid < high).then_some(mid)
}
