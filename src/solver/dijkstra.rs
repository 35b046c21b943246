use smallvec::SmallVec;

use crate::{cell::Cell, pathing_grid::PathingGrid, solver::GridSolver, N_SMALLVEC_SIZE};

/// A* with a zero heuristic. Expands more nodes than [AstarSolver](super::astar::AstarSolver)
/// but makes a convenient reference for path lengths.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, _: &PathingGrid, _: &Cell, _: &Cell) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::astar::AstarSolver;

    #[test]
    fn agrees_with_astar_on_a_maze() {
        let grid: PathingGrid = "\
            .#....
            .#.##.
            .#..#.
            .##.#.
            ....#."
            .parse()
            .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(0, 5);
        let dijkstra = DijkstraSolver
            .get_path_single_goal(&grid, start, goal)
            .unwrap()
            .unwrap();
        let astar = AstarSolver::new()
            .get_path_single_goal(&grid, start, goal)
            .unwrap()
            .unwrap();
        assert_eq!(dijkstra.len(), astar.len());
        assert_eq!(dijkstra.len(), 16);
    }
}
