//! # grid_astar
//!
//! Shortest paths on a uniform-cost, 4-connected grid with blocked cells, computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) and the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic.
//!
//! The quickest way in is [find_path], which takes the obstacles as a set and validates
//! its inputs. Callers that keep a grid around between searches can hold a
//! [PathingGrid](pathing_grid::PathingGrid) and query it through a
//! [GridSolver](solver::GridSolver); the grid can pre-compute
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so that unreachable goals are rejected without flood-filling.
//!
//! ```
//! use grid_astar::{find_path, Cell};
//! use std::collections::HashSet;
//!
//! let wall: HashSet<Cell> = (0..9).map(|col| Cell::new(5, col)).collect();
//! let path = find_path(Cell::new(0, 0), Cell::new(9, 0), &wall, (10, 10))
//!     .unwrap()
//!     .unwrap();
//! assert!(path.contains(&Cell::new(5, 9)));
//! ```
pub mod astar;
pub mod cell;
pub mod config;
pub mod error;
pub mod pathing_grid;
pub mod solver;

pub use crate::cell::{Cell, Direction};
pub use crate::config::SearchConfig;
pub use crate::error::{ParseGridError, PathError};
pub use crate::pathing_grid::PathingGrid;

use crate::solver::{astar::AstarSolver, GridSolver};
use std::collections::HashSet;
use std::hash::BuildHasher;

/// Cost of a single step.
pub const C: i32 = 1;
/// Largest supported number of rows or columns. Keeps every Manhattan distance between
/// two in-bounds cells, and every neighbour step, within `i32`.
pub const MAX_DIMENSION: usize = (i32::MAX / 2) as usize;
/// Inline capacity for successor lists, one slot per cardinal direction.
pub const N_SMALLVEC_SIZE: usize = 4;

/// The A* estimate: Manhattan distance between two cells.
pub fn heuristic(a: &Cell, b: &Cell) -> i32 {
    a.manhattan_distance(b)
}

/// Finds a shortest path from `start` to `goal` on a `bounds.0` x `bounds.1` grid, moving
/// in the four cardinal directions and never entering a cell in `obstacles`.
///
/// Returns the path inclusive of both endpoints, or `Ok(None)` when the goal cannot be
/// reached. Endpoints outside the grid or on an obstacle are rejected with a
/// [PathError]. Obstacles outside the grid are ignored.
pub fn find_path<S: BuildHasher>(
    start: Cell,
    goal: Cell,
    obstacles: &HashSet<Cell, S>,
    bounds: (usize, usize),
) -> Result<Option<Vec<Cell>>, PathError> {
    find_path_with(start, goal, obstacles, bounds, &SearchConfig::default())
}

/// [find_path] with an explicit [SearchConfig], e.g. to bound the number of expansions.
pub fn find_path_with<S: BuildHasher>(
    start: Cell,
    goal: Cell,
    obstacles: &HashSet<Cell, S>,
    bounds: (usize, usize),
    config: &SearchConfig,
) -> Result<Option<Vec<Cell>>, PathError> {
    let (rows, cols) = bounds;
    let grid = PathingGrid::with_obstacles(rows, cols, obstacles.iter().copied());
    AstarSolver::new().get_path_single_goal_with(&grid, start, goal, config)
}
