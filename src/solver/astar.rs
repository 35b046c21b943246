use smallvec::SmallVec;

use crate::{cell::Cell, pathing_grid::PathingGrid, solver::GridSolver, N_SMALLVEC_SIZE};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the Manhattan estimate. Values above 1.0 trade optimality for fewer
    /// expansions.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    /// Just the cost times a heuristic factor. The product is taken in [f64], which holds
    /// every [i32] exactly, so a factor of 1.0 never overestimates.
    fn heuristic(&self, grid: &PathingGrid, p1: &Cell, p2: &Cell) -> i32 {
        let cost = self.cost(grid, p1, p2);
        if self.heuristic_factor == 1.0 {
            return cost;
        }
        (cost as f64 * self.heuristic_factor as f64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SearchConfig, error::PathError};

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = PathingGrid::new(1, 1);
        let solver = AstarSolver::new();
        let start = Cell::new(0, 0);
        let path = solver
            .get_path_single_goal(&grid, start, start)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![start]);
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        // |S..|
        // |.#.|
        // |..G|
        let mut grid: PathingGrid = "...\n.#.\n...".parse().unwrap();
        grid.generate_components();
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Cell::new(1, 1)));
    }

    /// Equal-length routes around the block are resolved the same way every time:
    /// ties prefer the cell closer to the goal, then the smaller cell.
    #[test]
    fn tie_breaking_is_stable() {
        let mut grid: PathingGrid = "...\n.#.\n...".parse().unwrap();
        grid.generate_components();
        let solver = AstarSolver::new();
        let first = solver
            .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap();
        for _ in 0..5 {
            let again = solver
                .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(2, 2))
                .unwrap();
            assert_eq!(first, again);
        }
        assert_eq!(
            first.unwrap(),
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_multiple_goals() {
        let mut grid = PathingGrid::new(5, 5);
        grid.set(Cell::new(1, 1), true).unwrap();
        grid.generate_components();
        let solver = AstarSolver::new();
        let goals = [Cell::new(4, 4), Cell::new(3, 3)];
        let (selected_goal, path) = solver
            .get_path_multiple_goals(&grid, Cell::new(0, 0), &goals)
            .unwrap()
            .unwrap();
        assert_eq!(selected_goal, Cell::new(3, 3));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn multiple_goals_without_reachable_goal() {
        let mut grid: PathingGrid = "..#.\n..#.".parse().unwrap();
        grid.generate_components();
        let solver = AstarSolver::new();
        let goals = [Cell::new(0, 3), Cell::new(0, 2), Cell::new(9, 9)];
        assert_eq!(
            solver.get_path_multiple_goals(&grid, Cell::new(0, 0), &goals),
            Ok(None)
        );
        assert_eq!(
            solver.get_path_multiple_goals(&grid, Cell::new(0, 0), &[]),
            Ok(None)
        );
    }

    #[test]
    fn test_complex() {
        let mut grid: PathingGrid = "\
            ..........
            .#...#....
            ..........
            ..........
            ..........
            .#........
            ..........
            ..........
            ........#.
            .........."
            .parse()
            .unwrap();
        grid.generate_components();
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(7, 7))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 15);
    }

    #[test]
    fn expansion_limit_aborts() {
        let grid = PathingGrid::new(20, 20);
        let solver = AstarSolver::new();
        let config = SearchConfig::new().with_max_expansions(5);
        assert_eq!(
            solver.get_path_single_goal_with(&grid, Cell::new(0, 0), Cell::new(19, 19), &config),
            Err(PathError::Aborted { expansions: 5 })
        );
        // The same budget is plenty for a neighbouring goal.
        assert!(solver
            .get_path_single_goal_with(&grid, Cell::new(0, 0), Cell::new(0, 1), &config)
            .unwrap()
            .is_some());
    }

    /// Distances beyond the precision of [f32] are estimated exactly.
    #[test]
    fn heuristic_exact_for_large_distances() {
        let grid = PathingGrid::new(1, 1);
        let solver = AstarSolver::new();
        let far = Cell::new(16_777_219, 0);
        assert_eq!(solver.heuristic(&grid, &Cell::new(0, 0), &far), 16_777_219);
        let doubled = AstarSolver {
            heuristic_factor: 2.0,
        };
        assert_eq!(
            doubled.heuristic(&grid, &Cell::new(0, 0), &far),
            33_554_438
        );
    }

    /// Inflating the heuristic still yields a valid, though not necessarily optimal, path.
    #[test]
    fn heuristic_factor() {
        let grid: PathingGrid = "....\n.##.\n....".parse().unwrap();
        let solver = AstarSolver {
            heuristic_factor: 2.0,
        };
        let path = solver
            .get_path_single_goal(&grid, Cell::new(1, 0), Cell::new(1, 3))
            .unwrap()
            .unwrap();
        assert_eq!(path.first(), Some(&Cell::new(1, 0)));
        assert_eq!(path.last(), Some(&Cell::new(1, 3)));
        assert!(path.len() >= 6);
    }
}
