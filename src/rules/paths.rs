//! Breadth-first search over the wall-constrained cell graph.
//!
//! Pawns are ignored: only walls and board edges cut edges. All scratch
//! storage is fixed-size and lives on the stack of a single query.

use crate::core::{Direction, GameState, Position, Side, WallGrid, MAX_BOARD_SIZE};

/// Cells on the largest supported board.
pub const MAX_CELLS: usize = MAX_BOARD_SIZE as usize * MAX_BOARD_SIZE as usize;

const UNSEEN: u8 = u8::MAX;

/// Neighbours of `cell` reachable in one step without crossing a wall.
pub fn open_neighbours(
    grid: &WallGrid,
    board_size: u8,
    cell: Position,
) -> impl Iterator<Item = Position> + '_ {
    Direction::ALL.into_iter().filter_map(move |dir| {
        if grid.blocks(cell, dir) {
            None
        } else {
            cell.step(dir, board_size)
        }
    })
}

/// Result of a BFS run that stopped at the first goal-row cell.
struct Search {
    /// Predecessor index of each visited cell, `UNSEEN` otherwise.
    parent: [u8; MAX_CELLS],
    /// Distance from the start of each visited cell.
    depth: [u8; MAX_CELLS],
    /// First goal cell dequeued, if any was reachable.
    goal: Option<Position>,
}

fn search(grid: &WallGrid, board_size: u8, from: Position, goal_row: u8) -> Search {
    let mut result = Search {
        parent: [UNSEEN; MAX_CELLS],
        depth: [0; MAX_CELLS],
        goal: None,
    };
    let mut queue = [0u8; MAX_CELLS];
    let (mut head, mut tail) = (0usize, 0usize);

    let start = from.index(board_size);
    result.parent[start] = start as u8;
    queue[tail] = start as u8;
    tail += 1;

    while head < tail {
        let index = queue[head] as usize;
        head += 1;
        let cell = Position::from_index(index, board_size);
        if cell.row == goal_row {
            result.goal = Some(cell);
            break;
        }
        for next in open_neighbours(grid, board_size, cell) {
            let next_index = next.index(board_size);
            if result.parent[next_index] == UNSEEN {
                result.parent[next_index] = index as u8;
                result.depth[next_index] = result.depth[index] + 1;
                queue[tail] = next_index as u8;
                tail += 1;
            }
        }
    }
    result
}

/// Check whether any path leads from `from` to `goal_row`.
#[must_use]
pub fn can_reach(grid: &WallGrid, board_size: u8, from: Position, goal_row: u8) -> bool {
    search(grid, board_size, from, goal_row).goal.is_some()
}

/// Length of the shortest path from `from` to `goal_row`.
#[must_use]
pub fn distance(grid: &WallGrid, board_size: u8, from: Position, goal_row: u8) -> Option<u32> {
    let result = search(grid, board_size, from, goal_row);
    result
        .goal
        .map(|goal| result.depth[goal.index(board_size)] as u32)
}

/// Cells of one shortest path, starting after `from` and ending on the goal row.
///
/// Empty when `from` already is on the goal row; `None` when no path exists.
#[must_use]
pub fn shortest_path(
    grid: &WallGrid,
    board_size: u8,
    from: Position,
    goal_row: u8,
) -> Option<Vec<Position>> {
    let result = search(grid, board_size, from, goal_row);
    let goal = result.goal?;

    let start = from.index(board_size);
    let mut path = Vec::with_capacity(result.depth[goal.index(board_size)] as usize);
    let mut index = goal.index(board_size);
    while index != start {
        path.push(Position::from_index(index, board_size));
        index = result.parent[index] as usize;
    }
    path.reverse();
    Some(path)
}

/// Shortest distance for a side's pawn to its goal row in `state`.
#[must_use]
pub fn side_distance(state: &GameState, side: Side) -> Option<u32> {
    let size = state.board_size();
    distance(state.grid(), size, state.pawn(side), side.goal_row(size))
}

/// Check that both pawns can still reach their goal rows on `grid`.
#[must_use]
pub fn both_sides_connected(state: &GameState, grid: &WallGrid) -> bool {
    let size = state.board_size();
    Side::ALL
        .into_iter()
        .all(|side| can_reach(grid, size, state.pawn(side), side.goal_row(size)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WallSlot;

    #[test]
    fn test_open_board_distance() {
        let grid = WallGrid::new();
        assert_eq!(distance(&grid, 9, Position::new(0, 4), 8), Some(8));
        assert_eq!(distance(&grid, 9, Position::new(8, 4), 0), Some(8));
        assert_eq!(distance(&grid, 9, Position::new(8, 4), 8), Some(0));
    }

    #[test]
    fn test_wall_forces_detour() {
        let mut grid = WallGrid::new();
        grid.insert(WallSlot::horizontal(0, 3));
        grid.insert(WallSlot::horizontal(0, 5));

        // Columns 3..=6 are capped below row 0; shortest detour goes via column 2 or 7.
        assert_eq!(distance(&grid, 9, Position::new(0, 4), 8), Some(10));
    }

    #[test]
    fn test_sealed_cell_is_unreachable() {
        let mut grid = WallGrid::new();
        grid.insert(WallSlot::vertical(0, 0));
        grid.insert(WallSlot::horizontal(1, 0));

        // (0,0),(1,0) are boxed in by the board edge and two walls.
        assert!(!can_reach(&grid, 9, Position::new(0, 0), 8));
        assert_eq!(distance(&grid, 9, Position::new(0, 0), 8), None);
        assert!(can_reach(&grid, 9, Position::new(0, 2), 8));
    }

    #[test]
    fn test_shortest_path_cells() {
        let grid = WallGrid::new();
        let path = shortest_path(&grid, 5, Position::new(1, 2), 4).unwrap();
        assert_eq!(
            path,
            vec![Position::new(2, 2), Position::new(3, 2), Position::new(4, 2)]
        );
        assert!(shortest_path(&grid, 5, Position::new(4, 2), 4).unwrap().is_empty());
    }

    #[test]
    fn test_open_neighbours_respect_walls_and_edges() {
        let mut grid = WallGrid::new();
        grid.insert(WallSlot::vertical(0, 0));

        let neighbours: Vec<_> = open_neighbours(&grid, 9, Position::new(0, 0)).collect();
        assert_eq!(neighbours, vec![Position::new(1, 0)]);
    }
}
