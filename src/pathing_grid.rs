use crate::cell::Cell;
use crate::error::{ParseGridError, PathError};
use crate::{C, MAX_DIMENSION, N_SMALLVEC_SIZE};

use core::fmt;
use fxhash::FxHashSet;
use log::{debug, info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

/// [PathingGrid] holds the bounds and the blocked cells of a 4-connected grid. It can also
/// maintain the connected components of the free cells in a [UnionFind] structure, which
/// lets solvers reject unreachable goals without flood-filling the grid.
///
/// Components start out dirty and are only consulted after
/// [generate_components](Self::generate_components) or [update](Self::update).
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    obstacles: FxHashSet<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0)
    }
}

impl PathingGrid {
    pub fn new(rows: usize, cols: usize) -> PathingGrid {
        PathingGrid {
            rows,
            cols,
            obstacles: FxHashSet::default(),
            components: UnionFind::new(0),
            components_dirty: true,
        }
    }

    /// Builds a grid from an obstacle set. Obstacles outside the bounds can never be
    /// reached and are dropped.
    pub fn with_obstacles<I>(rows: usize, cols: usize, obstacles: I) -> PathingGrid
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = PathingGrid::new(rows, cols);
        for cell in obstacles {
            if grid.in_bounds(&cell) {
                grid.obstacles.insert(cell);
            } else {
                debug!("Ignoring obstacle {} outside the {}x{} grid", cell, rows, cols);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn obstacles(&self) -> &FxHashSet<Cell> {
        &self.obstacles
    }
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }
    pub fn is_blocked(&self, cell: &Cell) -> bool {
        self.obstacles.contains(cell)
    }
    pub fn can_move_to(&self, cell: &Cell) -> bool {
        self.in_bounds(cell) && !self.is_blocked(cell)
    }

    /// Row-major index of an in-bounds cell.
    pub fn get_ix(&self, cell: &Cell) -> usize {
        cell.row as usize * self.cols + cell.col as usize
    }

    /// In-bounds 4-neighbours of `cell` in right, down, left, up order. Obstacles are
    /// not filtered.
    pub fn neighbours(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        cell.neumann_neighborhood()
            .into_iter()
            .filter(|n| self.in_bounds(n))
            .collect()
    }

    /// Neighbours that can be stepped on, paired with the unit step cost.
    pub fn neighborhood_points_and_cost(
        &self,
        cell: &Cell,
    ) -> SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]> {
        self.neighbours(cell)
            .into_iter()
            .filter(|n| !self.is_blocked(n))
            .map(|n| (n, C))
            .collect()
    }

    /// Ensures the grid is non-empty and small enough for `i32` cell arithmetic.
    pub fn check_dimensions(&self) -> Result<(), PathError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PathError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(PathError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_DIMENSION,
            });
        }
        Ok(())
    }

    /// Ensures a search endpoint is usable: the grid passes
    /// [check_dimensions](Self::check_dimensions) and the cell is in bounds and free.
    pub fn check_endpoint(&self, cell: &Cell) -> Result<(), PathError> {
        self.check_dimensions()?;
        if !self.in_bounds(cell) {
            debug!("Rejecting {} outside the {}x{} grid", cell, self.rows, self.cols);
            return Err(PathError::OutOfBounds {
                cell: *cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.is_blocked(cell) {
            debug!("Rejecting blocked endpoint {}", cell);
            return Err(PathError::Blocked { cell: *cell });
        }
        Ok(())
    }

    /// Blocks or frees a cell. Freeing joins the cell to the components of its free
    /// neighbours, blocking flags the components as dirty since it may split one apart.
    pub fn set(&mut self, cell: Cell, blocked: bool) -> Result<(), PathError> {
        if !self.in_bounds(&cell) {
            return Err(PathError::OutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if blocked {
            if self.obstacles.insert(cell) {
                self.components_dirty = true;
            }
        } else if self.obstacles.remove(&cell) && !self.components_dirty {
            let ix = self.get_ix(&cell);
            for n in self.neighbours(&cell) {
                if !self.is_blocked(&n) {
                    let n_ix = self.get_ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Frees every cell.
    pub fn clear(&mut self) {
        if !self.obstacles.is_empty() {
            self.obstacles.clear();
            self.components_dirty = true;
        }
    }

    /// Retrieves the component id a given [Cell] belongs to. [None] while the components
    /// are dirty or when the cell lies outside the grid.
    pub fn get_component(&self, cell: &Cell) -> Option<usize> {
        if self.components_dirty || !self.in_bounds(cell) {
            return None;
        }
        Some(self.components.find(self.get_ix(cell)))
    }

    /// Checks if start and goal are on the same component. While the components are
    /// dirty this conservatively answers true.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        if !self.in_bounds(start) || !self.in_bounds(goal) {
            return false;
        }
        if self.components_dirty {
            return true;
        }
        self.components
            .equiv(self.get_ix(start), self.get_ix(goal))
    }

    /// Checks if start and goal are known to be on different components.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the
    /// same components.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components of the {}x{} grid",
            self.rows, self.cols
        );
        let size = match self.check_dimensions() {
            Ok(()) => self.rows.checked_mul(self.cols),
            Err(_) => None,
        };
        let Some(size) = size else {
            warn!(
                "Cannot index the {}x{} grid, leaving components dirty",
                self.rows, self.cols
            );
            return;
        };
        self.components = UnionFind::new(size);
        self.components_dirty = false;
        // Both sides are at most MAX_DIMENSION, so the casts are lossless.
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let cell = Cell::new(row, col);
                if self.is_blocked(&cell) {
                    continue;
                }
                let parent_ix = self.get_ix(&cell);
                // Right and down are enough to visit every edge once.
                for n in [Cell::new(row, col + 1), Cell::new(row + 1, col)] {
                    if self.can_move_to(&n) {
                        let ix = self.get_ix(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Draws the grid with `path` overlaid: `S` for its first cell, `G` for its last and
    /// `*` in between.
    pub fn render_path(&self, path: &[Cell]) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let cell = Cell::new(row, col);
                let ch = if path.first() == Some(&cell) {
                    'S'
                } else if path.last() == Some(&cell) {
                    'G'
                } else if path.contains(&cell) {
                    '*'
                } else if self.is_blocked(&cell) {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows as i32 {
            let line = (0..self.cols as i32)
                .map(|col| {
                    if self.is_blocked(&Cell::new(row, col)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Reads a character map where `#` is blocked and `.` is free, one line per row. Leading
/// and trailing blank lines and surrounding whitespace are ignored.
impl FromStr for PathingGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut obstacles = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => obstacles.push(Cell::new(row as i32, col as i32)),
                    '.' => {}
                    _ => return Err(ParseGridError::InvalidChar { ch, row, col }),
                }
            }
        }
        Ok(PathingGrid::with_obstacles(lines.len(), cols, obstacles))
    }
}
