use grid_astar::{find_path, Cell, PathingGrid};
use std::collections::HashSet;

// A 10x10 grid split by a wall along row 5. First the wall is left with a single gap in
// column 5, then the gap is closed and the goal becomes unreachable.

fn show(obstacles: &HashSet<Cell>, start: Cell, goal: Cell) {
    let grid = PathingGrid::with_obstacles(10, 10, obstacles.iter().copied());
    match find_path(start, goal, obstacles, (10, 10)) {
        Ok(Some(path)) => {
            println!("Path found! Length: {} cells", path.len());
            print!("{}", grid.render_path(&path));
        }
        Ok(None) => {
            println!("No path found!");
            print!("{}", grid);
        }
        Err(e) => println!("Invalid query: {}", e),
    }
    println!();
}

fn main() {
    let start = Cell::new(0, 0);
    let goal = Cell::new(9, 9);
    let mut obstacles: HashSet<Cell> = (0..10)
        .filter(|&col| col != 5)
        .map(|col| Cell::new(5, col))
        .collect();
    show(&obstacles, start, goal);
    obstacles.insert(Cell::new(5, 5));
    show(&obstacles, start, goal);
}
