//! Pointer X to day column.

/// Horizontal extent of the day grid in screen coordinates. Only the
/// horizontal axis matters for date mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRect {
    pub left: f32,
    pub width: f32,
}

impl GridRect {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// Column under `pointer_x`, clamped to `0..day_count`.
///
/// Returns `None` when there is no usable geometry (not laid out yet, or a
/// degenerate rectangle); callers keep their previous state in that case.
pub fn day_at(grid: Option<GridRect>, pointer_x: f32, day_count: usize) -> Option<usize> {
    let grid = grid?;
    let degenerate = !grid.width.is_finite() || grid.width <= 0.0;
    if day_count == 0 || degenerate || !pointer_x.is_finite() {
        return None;
    }
    let day_width = grid.width / day_count as f32;
    let raw = ((pointer_x - grid.left) / day_width).floor();
    let max = (day_count - 1) as f32;
    Some(raw.clamp(0.0, max) as usize)
}
