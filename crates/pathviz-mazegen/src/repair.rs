//! Connectivity repair: break up uniform 2x3 and 3x2 blocks.
//!
//! Wide empty rooms make a search look like a flood fill and solid wall
//! blobs look like rendering glitches. Each pass scans every 2x3 and 3x2
//! sub-block and, when one is uniformly passable or uniformly blocked,
//! flips one randomly chosen cell inside it. The entrance and exit are
//! never flipped.

use pathviz_core::{Coord, Maze, Range};
use rand::Rng;

/// Sub-block shapes checked by the repair pass, as (rows, cols).
pub const BLOCK_SHAPES: [(i32, i32); 2] = [(2, 3), (3, 2)];

/// Every uniform block, in scan order.
pub fn degenerate_blocks(maze: &Maze) -> Vec<Range> {
    let bounds = maze.bounds();
    BLOCK_SHAPES
        .iter()
        .flat_map(|&(rows, cols)| bounds.windows(rows, cols))
        .filter(|&b| maze.uniform(b).is_some())
        .collect()
}

/// Run repair passes until no uniform block remains or `budget` flips have
/// been spent. Returns whether the maze ended up clean.
pub(crate) fn repair<R: Rng>(maze: &mut Maze, rng: &mut R, budget: usize) -> bool {
    let fixed = [maze.entrance(), maze.exit()];
    let bounds = maze.bounds();
    let mut flips = 0usize;

    loop {
        let mut flipped_this_pass = false;
        for &(rows, cols) in BLOCK_SHAPES.iter() {
            for block in bounds.windows(rows, cols) {
                // an earlier flip in this pass may already have fixed it
                let Some(cell) = maze.uniform(block) else {
                    continue;
                };
                if flips >= budget {
                    return false;
                }
                let choices: Vec<Coord> = block.iter().filter(|c| !fixed.contains(c)).collect();
                if choices.is_empty() {
                    return false;
                }
                let target = choices[rng.random_range(0..choices.len())];
                maze.set(target, cell.flipped());
                flips += 1;
                flipped_this_pass = true;
            }
        }
        if !flipped_this_pass {
            return true;
        }
    }
}
