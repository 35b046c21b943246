use grid_astar::pathing_grid::PathingGrid;
use grid_astar::solver::{astar::AstarSolver, GridSolver};
use grid_astar::Cell;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid = PathingGrid::new(3, 3);
    pathing_grid
        .set(Cell::new(1, 1), true)
        .expect("cell is inside the grid");
    pathing_grid.generate_components();
    println!("{}", pathing_grid);
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 2);
    let solver = AstarSolver::new();
    match solver.get_path_single_goal(&pathing_grid, start, end) {
        Ok(Some(path)) => {
            println!("Path:");
            for p in &path {
                println!("{}", p);
            }
            print!("{}", pathing_grid.render_path(&path));
        }
        Ok(None) => println!("No path from {} to {}", start, end),
        Err(e) => println!("Invalid query: {}", e),
    }
}
