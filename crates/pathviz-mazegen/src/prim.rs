//! Randomized Prim's algorithm over a half-resolution grid of rooms.
//!
//! Rooms sit at odd `(row, col)` coordinates. Walls between rooms are
//! carved two cells at a time, so every room ends up reachable from the
//! seed room and the even-even lattice points always stay blocked.

use pathviz_core::{Cell, Coord, Maze};
use rand::Rng;

const ROOM_STEPS: [Coord; 4] = [
    Coord::new(-2, 0),
    Coord::new(2, 0),
    Coord::new(0, -2),
    Coord::new(0, 2),
];

/// Carve a spanning tree of rooms into `maze`, which should start solid.
pub(crate) fn carve<R: Rng>(maze: &mut Maze, rng: &mut R) {
    let (rows, cols) = (maze.rows(), maze.cols());
    if rows < 2 || cols < 2 {
        return;
    }

    // make it odd
    let seed = Coord::new(
        rng.random_range(0..rows / 2) * 2 + 1,
        rng.random_range(0..cols / 2) * 2 + 1,
    );
    maze.set(seed, Cell::Passable);

    // (room, room it would be joined from)
    let mut walls: Vec<(Coord, Coord)> = Vec::new();
    push_frontier(maze, seed, &mut walls);

    while !walls.is_empty() {
        let idx = rng.random_range(0..walls.len());
        let (room, from) = walls.swap_remove(idx);
        if maze.at(room) != Some(Cell::Blocked) {
            continue;
        }
        maze.set(room, Cell::Passable);
        maze.set(
            Coord::new((room.row + from.row) / 2, (room.col + from.col) / 2),
            Cell::Passable,
        );
        push_frontier(maze, room, &mut walls);
    }
}

fn push_frontier(maze: &Maze, room: Coord, walls: &mut Vec<(Coord, Coord)>) {
    for step in ROOM_STEPS {
        let n = room + step;
        if n.row > 0 && n.row < maze.rows() && n.col > 0 && n.col < maze.cols()
            && maze.at(n) == Some(Cell::Blocked)
        {
            walls.push((n, room));
        }
    }
}

/// Carve a random monotone (down/right only) route from the entrance to
/// the exit.
pub(crate) fn carve_route<R: Rng>(maze: &mut Maze, rng: &mut R) {
    let goal = maze.exit();
    let mut c = maze.entrance();
    maze.set(c, Cell::Passable);
    while c != goal {
        let can_down = c.row < goal.row;
        let can_right = c.col < goal.col;
        c = if can_down && (!can_right || rng.random_bool(0.5)) {
            c.shift(1, 0)
        } else {
            c.shift(0, 1)
        };
        maze.set(c, Cell::Passable);
    }
}
