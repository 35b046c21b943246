use crate::astar::{astar, SearchOutcome};
use crate::cell::Cell;
use crate::config::SearchConfig;
use crate::error::PathError;
use crate::pathing_grid::PathingGrid;
use crate::C;
use itertools::Itertools;
use log::{info, warn};

pub mod astar;
pub mod dijkstra;

/// Converts the integer cost to an approximate floating point equivalent where a single
/// step has cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Cell, i32)>;

    fn heuristic(&self, grid: &PathingGrid, p1: &Cell, p2: &Cell) -> i32;

    /// Cost of walking between two cells on an empty grid.
    fn cost(&self, _grid: &PathingGrid, p1: &Cell, p2: &Cell) -> i32 {
        p1.manhattan_distance(p2) * C
    }

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors;

    /// Sums the step costs along a path.
    fn get_path_cost(&self, path: &[Cell], grid: &PathingGrid) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.cost(grid, a, b))
            .sum()
    }
    fn get_path_cost_float(&self, path: &[Cell], grid: &PathingGrid) -> f64 {
        convert_cost_to_unit_cost_float(self.get_path_cost(path, grid))
    }

    /// Validates the endpoints and runs the search, reporting the raw outcome.
    fn search(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goal: Cell,
        config: &SearchConfig,
    ) -> Result<SearchOutcome<Cell, i32>, PathError> {
        grid.check_endpoint(&start)?;
        grid.check_endpoint(&goal)?;
        if start == goal {
            return Ok(SearchOutcome::Found {
                path: vec![start],
                cost: 0,
            });
        }
        // Check if start and goal are on the same connected component.
        let precheck = config.check_components && !grid.components_dirty();
        if precheck && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(SearchOutcome::Exhausted);
        }
        let outcome = astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(grid, point, &goal),
            |point| *point == goal,
            config.max_expansions,
        );
        match &outcome {
            SearchOutcome::Found { path, cost } => {
                info!(
                    "Found path from {} to {} with {} cells, cost {}",
                    start,
                    goal,
                    path.len(),
                    cost
                )
            }
            SearchOutcome::Exhausted if precheck => {
                warn!("Reachable goal could not be pathed to, are the components correct?")
            }
            SearchOutcome::Exhausted => info!("No path from {} to {}", start, goal),
            SearchOutcome::Aborted { expansions } => {
                info!("Search from {} to {} aborted after {} expansions", start, goal, expansions)
            }
        }
        Ok(outcome)
    }

    /// Computes a path from start to goal, inclusive of both. Returns `Ok(None)` if the goal
    /// cannot be reached.
    fn get_path_single_goal(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goal: Cell,
    ) -> Result<Option<Vec<Cell>>, PathError> {
        self.get_path_single_goal_with(grid, start, goal, &SearchConfig::default())
    }

    fn get_path_single_goal_with(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goal: Cell,
        config: &SearchConfig,
    ) -> Result<Option<Vec<Cell>>, PathError> {
        match self.search(grid, start, goal, config)? {
            SearchOutcome::Found { path, .. } => Ok(Some(path)),
            SearchOutcome::Exhausted => Ok(None),
            SearchOutcome::Aborted { expansions } => Err(PathError::Aborted { expansions }),
        }
    }

    /// Computes a path from the start to the closest of the given goals and returns the
    /// selected goal in addition to the found path. Blocked or out-of-bounds goals are
    /// skipped. Otherwise behaves like [get_path_single_goal](Self::get_path_single_goal).
    fn get_path_multiple_goals(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goals: &[Cell],
    ) -> Result<Option<(Cell, Vec<Cell>)>, PathError> {
        grid.check_endpoint(&start)?;
        let goals: Vec<Cell> = goals
            .iter()
            .copied()
            .filter(|g| grid.can_move_to(g) && grid.reachable(&start, g))
            .collect();
        if goals.is_empty() {
            return Ok(None);
        }
        let outcome = astar(
            &start,
            |node| self.successors(grid, node),
            |point| {
                goals
                    .iter()
                    .map(|g| self.heuristic(grid, point, g))
                    .min()
                    .unwrap_or(0)
            },
            |point| goals.contains(point),
            None,
        );
        Ok(outcome
            .into_path()
            .and_then(|path| path.last().copied().map(|goal| (goal, path))))
    }
}

#[cfg(test)]
mod tests {
    use super::astar::AstarSolver;
    use super::*;

    #[test]
    fn path_cost_counts_steps() {
        let grid = PathingGrid::new(3, 3);
        let solver = AstarSolver::new();
        let path = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)];
        assert_eq!(solver.get_path_cost(&path, &grid), 2);
        assert_eq!(solver.get_path_cost_float(&path, &grid), 2.0);
        assert_eq!(solver.get_path_cost(&path[..1], &grid), 0);
    }

    #[test]
    fn component_precheck_skips_search() {
        let mut grid: PathingGrid = "..#..\n..#..".parse().unwrap();
        grid.generate_components();
        let solver = AstarSolver::new();
        let outcome = solver
            .search(
                &grid,
                Cell::new(0, 0),
                Cell::new(1, 4),
                &SearchConfig::new().with_max_expansions(0),
            )
            .unwrap();
        // With a zero budget only the precheck can produce a non-aborted answer.
        assert_eq!(outcome, SearchOutcome::Exhausted);
    }
}
