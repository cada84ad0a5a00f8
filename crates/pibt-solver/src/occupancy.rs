//! Per-timestep occupancy caches.
//!
//! A step driver allocates two of these at the start of every timestep:
//!
//! - **now**: who stands on each cell in the configuration being advanced;
//! - **next**: who has claimed each cell for the configuration being built.
//!
//! Both are dense grid-shaped tables indexed like [`Grid::index`], and both
//! must be empty again when the step hands back its result.

use pibt_core::{AgentId, Coord};
use pibt_grid::Grid;

/// Grid-shaped map from cell to at most one agent.
#[derive(Clone, Debug)]
pub struct OccupancyCache {
    width:  u32,
    height: u32,
    cells:  Vec<Option<AgentId>>,
}

impl OccupancyCache {
    /// An empty cache covering every cell of `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            width:  grid.width(),
            height: grid.height(),
            cells:  vec![None; grid.cell_count()],
        }
    }

    #[inline]
    fn slot(&self, cell: Coord) -> Option<usize> {
        (cell.x < self.width && cell.y < self.height)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Agent recorded at `cell`, if any.  Out-of-range cells are never
    /// occupied.
    #[inline]
    pub fn get(&self, cell: Coord) -> Option<AgentId> {
        self.slot(cell).and_then(|i| self.cells[i])
    }

    /// Record `agent` at `cell`, replacing any previous entry.
    #[inline]
    pub fn claim(&mut self, cell: Coord, agent: AgentId) {
        if let Some(i) = self.slot(cell) {
            self.cells[i] = Some(agent);
        }
    }

    /// Clear `cell`.
    #[inline]
    pub fn release(&mut self, cell: Coord) {
        if let Some(i) = self.slot(cell) {
            self.cells[i] = None;
        }
    }

    /// `true` if no cell holds an agent.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// All occupied cells, row-major.
    pub fn entries(&self) -> Vec<(Coord, AgentId)> {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.map(|a| (Coord::new((i % w) as u32, (i / w) as u32), a)))
            .collect()
    }
}
