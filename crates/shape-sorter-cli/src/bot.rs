use shape_sorter_engine::{ANCHOR_LIMIT, BOARD_SIZE, Board, Shape};

/// Greedy placement strategy used by headless play.
///
/// Candidates are ranked by the number of lines the drop clears (more is
/// better), then by the number of isolated empty cells left behind (fewer is
/// better). Ties keep the first anchor in row-major scan order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyBot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Evaluation {
    cleared_lines: usize,
    isolated_cells: usize,
}

impl Evaluation {
    fn is_better_than(self, other: Self) -> bool {
        (self.cleared_lines, other.isolated_cells) > (other.cleared_lines, self.isolated_cells)
    }
}

impl GreedyBot {
    /// Returns the anchor to drop `shape` at, or `None` if it fits nowhere.
    pub fn choose_anchor(self, board: &Board, shape: &Shape) -> Option<(i32, i32)> {
        let mut best: Option<((i32, i32), Evaluation)> = None;
        for y in 0..ANCHOR_LIMIT {
            for x in 0..ANCHOR_LIMIT {
                let Some(eval) = evaluate(board, shape, x, y) else {
                    continue;
                };
                if best.is_none_or(|(_, best_eval)| eval.is_better_than(best_eval)) {
                    best = Some(((x, y), eval));
                }
            }
        }
        best.map(|(anchor, _)| anchor)
    }
}

fn evaluate(board: &Board, shape: &Shape, x: i32, y: i32) -> Option<Evaluation> {
    let mut board = board.clone();
    board.commit(shape, x, y).ok()?;
    let lines = board.find_full_lines();
    board.clear(&lines);
    Some(Evaluation {
        cleared_lines: lines.len(),
        isolated_cells: isolated_empty_cells(&board),
    })
}

/// Counts empty cells whose orthogonal neighbors are all filled or off the board.
fn isolated_empty_cells(board: &Board) -> usize {
    let is_empty = |x: usize, y: usize| board.get(x, y).is_some_and(|cell| !cell.is_filled());
    (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
        .filter(|&(x, y)| is_empty(x, y))
        .filter(|&(x, y)| {
            let left = x.checked_sub(1).is_some_and(|x| is_empty(x, y));
            let up = y.checked_sub(1).is_some_and(|y| is_empty(x, y));
            let right = is_empty(x + 1, y);
            let down = is_empty(x, y + 1);
            !(left || up || right || down)
        })
        .count()
}
