//! Static 4-connected grid.
//!
//! # Data layout
//!
//! Passability is a flat row-major `Vec<bool>`.  Cell `(x, y)` lives at
//! index `y * width + x`; [`Grid::index`] is the one place that formula is
//! written down.  The occupancy caches and distance tables used by the
//! planner are laid out with the same indexing, so every per-cell lookup on
//! the hot path is a single bounds-checked `Vec` access.
//!
//! # Neighbourhood
//!
//! Moves are orthogonal only.  [`Grid::neighbors`] yields passable cells in
//! a fixed order (west, east, north, south) so that, together with a seeded
//! shuffle, candidate ordering is reproducible.

use pibt_core::Coord;

use crate::GridError;

/// Passability bitmap of a rectangular grid.
///
/// Construct with [`Grid::open`], [`Grid::from_rows`], or by loading a
/// MovingAI map via [`crate::load_map`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width:  u32,
    height: u32,
    /// `true` if agents may occupy the cell.  Indexed by [`Grid::index`].
    free:   Vec<bool>,
}

impl Grid {
    /// Fully open grid: every cell passable.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            free: vec![true; width as usize * height as usize],
        }
    }

    /// Build a grid from text rows, one string per row (north first).
    ///
    /// `.` is passable; every other character is an obstacle.  All rows must
    /// have the same length.
    ///
    /// ```
    /// use pibt_core::Coord;
    /// use pibt_grid::Grid;
    ///
    /// let grid = Grid::from_rows(&["..@", "..."]).unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert!(!grid.is_free(Coord::new(2, 0)));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut free = Vec::with_capacity(width * rows.len());

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let got = line.chars().count();
            if got != width {
                return Err(GridError::RaggedRows { row, expected: width, got });
            }
            free.extend(line.chars().map(|ch| ch == '.'));
        }

        Ok(Self {
            width:  width as u32,
            height: rows.len() as u32,
            free,
        })
    }

    /// Mark `cell` as an obstacle.  Out-of-range cells are ignored.
    pub fn block(&mut self, cell: Coord) {
        if let Some(i) = self.index(cell) {
            self.free[i] = false;
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells, passable or not.
    pub fn cell_count(&self) -> usize {
        self.free.len()
    }

    /// Number of passable cells.
    pub fn passable_count(&self) -> usize {
        self.free.iter().filter(|&&f| f).count()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    /// `true` if `cell` lies inside the grid bounds.
    #[inline]
    pub fn contains(&self, cell: Coord) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of `cell`, or `None` if it is out of range.
    #[inline]
    pub fn index(&self, cell: Coord) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as u32, (index / w) as u32)
    }

    /// `true` if `cell` is inside the grid and passable.
    #[inline]
    pub fn is_free(&self, cell: Coord) -> bool {
        self.index(cell).is_some_and(|i| self.free[i])
    }

    /// Iterator over all passable cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.free
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| self.coord(i))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Passable orthogonal neighbours of `cell` (west, east, north, south).
    ///
    /// A blocked or out-of-range `cell` has no neighbours.  No heap
    /// allocation.
    #[inline]
    pub fn neighbors(&self, cell: Coord) -> impl Iterator<Item = Coord> + '_ {
        let Coord { x, y } = cell;
        let origin_free = self.is_free(cell);
        // `origin_free` implies `x < width` and `y < height`, so `+ 1` cannot
        // overflow.
        [
            (origin_free && x > 0).then(|| Coord::new(x - 1, y)),
            (origin_free && x + 1 < self.width).then(|| Coord::new(x + 1, y)),
            (origin_free && y > 0).then(|| Coord::new(x, y - 1)),
            (origin_free && y + 1 < self.height).then(|| Coord::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |&n| self.is_free(n))
    }

    /// Number of passable neighbours of `cell`.
    #[inline]
    pub fn degree(&self, cell: Coord) -> usize {
        self.neighbors(cell).count()
    }
}
