//! Output grid topology: cell indexing, boundary band and neighbour lookup
//!
//! Cells are linearized as `x + y * width`. A non-periodic grid treats every
//! cell whose N×N window would cross the right or bottom edge as part of the
//! boundary band: those cells are never observed and never receive
//! propagated bans.

use crate::spatial::adjacency::Direction;

/// Dimensions and wrapping rules of the output wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputGrid {
    width: usize,
    height: usize,
    pattern_size: usize,
    periodic: bool,
}

impl OutputGrid {
    /// Create a grid for patterns of side `pattern_size`
    pub const fn new(width: usize, height: usize, pattern_size: usize, periodic: bool) -> Self {
        Self {
            width,
            height,
            pattern_size,
            periodic,
        }
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Pattern side length N
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Whether the grid wraps at its edges
    pub const fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the grid has no cells
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of `(x, y)`
    pub const fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// `(x, y)` of a linear index
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        if self.width == 0 {
            (0, 0)
        } else {
            (cell % self.width, cell / self.width)
        }
    }

    /// Whether `(x, y)` lies outside the grid or in the non-periodic
    /// boundary band
    ///
    /// Always false for periodic grids, where every coordinate wraps.
    pub const fn on_boundary(&self, x: isize, y: isize) -> bool {
        let n = self.pattern_size as isize;
        !self.periodic
            && (x < 0 || y < 0 || x + n > self.width as isize || y + n > self.height as isize)
    }

    /// Whether a cell lies in the boundary band
    pub const fn is_boundary_cell(&self, cell: usize) -> bool {
        let (x, y) = self.coordinates(cell);
        self.on_boundary(x as isize, y as isize)
    }

    /// Wrap `(x, y)` onto the grid
    pub const fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        (
            x.rem_euclid(self.width as isize) as usize,
            y.rem_euclid(self.height as isize) as usize,
        )
    }

    /// Neighbouring cell in `direction`
    ///
    /// Returns `None` when the neighbour falls outside a non-periodic grid or
    /// inside its boundary band.
    pub const fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coordinates(cell);
        let (dx, dy) = direction.offset();
        let (nx, ny) = (x as isize + dx, y as isize + dy);

        if self.on_boundary(nx, ny) || self.is_empty() {
            return None;
        }

        let (wx, wy) = self.wrap(nx, ny);
        Some(self.index(wx, wy))
    }
}
