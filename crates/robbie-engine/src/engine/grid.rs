use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Cell, Direction, Observation};

/// Shape and rubbish density of the grids an agent plays on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Side length of the square playable interior (walls excluded).
    pub size: usize,
    /// Probability that an interior cell starts with rubbish, in `[0, 1]`.
    pub rubbish_probability: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 10,
            rubbish_probability: 0.25,
        }
    }
}

/// A square room surrounded by a one-cell wall ring, plus the agent's position.
///
/// # Layout
///
/// For an `N×N` interior the cells are stored row-major in an `(N+2)×(N+2)`
/// array. Row `0` and row `N+1`, column `0` and column `N+1` are walls. The
/// agent always stands on an interior coordinate `1..=N`, so every neighbour
/// lookup from a legal position stays inside the array.
///
/// `y` grows upwards: [`Direction::Up`] moves from `y` to `y + 1`.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use robbie_engine::{Direction, Grid, GridConfig};
///
/// let config = GridConfig { size: 3, rubbish_probability: 1.0 };
/// let mut grid = Grid::new(&config, &mut Pcg32::seed_from_u64(0));
/// assert_eq!(grid.remaining_rubbish(), 9);
///
/// assert!(grid.attempt_pick_up());
/// assert!(!grid.attempt_pick_up());
/// assert_eq!(grid.remaining_rubbish(), 8);
/// # let _ = grid.attempt_move(Direction::Up);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    side: usize,
    x: usize,
    y: usize,
}

impl Grid {
    /// Builds a fresh grid with a random layout and a random starting position.
    ///
    /// Each interior cell independently holds rubbish with probability
    /// `config.rubbish_probability`.
    ///
    /// # Panics
    ///
    /// Panics if `config.size` is zero or the probability is outside `[0, 1]`;
    /// both are rejected by configuration validation before a grid is built.
    pub fn new<R>(config: &GridConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(config.size > 0, "grid interior must not be empty");
        let size = config.size;
        let side = size + 2;
        let x = rng.random_range(1..=size);
        let y = rng.random_range(1..=size);

        let mut cells = vec![Cell::Wall; side * side];
        for cy in 1..=size {
            for cx in 1..=size {
                cells[cx + cy * side] = if rng.random_bool(config.rubbish_probability) {
                    Cell::Rubbish
                } else {
                    Cell::Empty
                };
            }
        }

        Self { cells, side, x, y }
    }

    /// Side length of the playable interior.
    #[must_use]
    pub fn size(&self) -> usize {
        self.side - 2
    }

    /// The agent's current `(x, y)` position, always within `1..=size`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Returns the cell at `(x, y)`, including the wall ring.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the `(size+2)×(size+2)` array.
    #[must_use]
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.side && y < self.side);
        self.cells[x + y * self.side]
    }

    fn current_mut(&mut self) -> &mut Cell {
        &mut self.cells[self.x + self.y * self.side]
    }

    fn is_interior(&self, x: usize, y: usize) -> bool {
        (1..self.side - 1).contains(&x) && (1..self.side - 1).contains(&y)
    }

    /// Senses the current cell and its four neighbours.
    #[must_use]
    pub fn observe(&self) -> Observation {
        let (x, y) = (self.x, self.y);
        Observation {
            current: self.cell_at(x, y),
            above: self.cell_at(x, y + 1),
            right: self.cell_at(x + 1, y),
            below: self.cell_at(x, y - 1),
            left: self.cell_at(x - 1, y),
        }
    }

    /// Steps one cell in `direction`.
    ///
    /// Returns `false` and leaves the position unchanged when the destination
    /// is part of the wall ring.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.offset();
        let nx = self.x.wrapping_add_signed(dx);
        let ny = self.y.wrapping_add_signed(dy);
        if !self.is_interior(nx, ny) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Steps in a uniformly chosen cardinal direction and reports that step's result.
    pub fn attempt_random_move<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let direction: Direction = rng.random();
        self.attempt_move(direction)
    }

    /// Picks up rubbish at the current position.
    ///
    /// Returns `true` and clears the cell only if it held rubbish; otherwise
    /// the cell is left as it was.
    pub fn attempt_pick_up(&mut self) -> bool {
        let cell = self.current_mut();
        if cell.is_rubbish() {
            *cell = Cell::Empty;
            true
        } else {
            false
        }
    }

    /// Counts the cells still holding rubbish.
    #[must_use]
    pub fn remaining_rubbish(&self) -> usize {
        self.cells.iter().filter(|c| c.is_rubbish()).count()
    }
}
