use super::board::Board;
use super::types::{Mark, WIN_LINES, WinningLine};

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    WIN_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let mark = cells[a];
        if mark != Mark::Empty && cells[b] == mark && cells[c] == mark {
            Some(WinningLine::new(mark, line))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_win_with_line(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark::{Empty as E, O, X};

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_win_with_line(&Board::new()), None);
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_fewer_than_five_marks_never_win() {
        let board = Board::from_cells([X, X, E, O, O, E, E, E, E]);
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_every_line_wins_for_both_marks() {
        for line in WIN_LINES {
            for (mark, filler) in [(X, O), (O, X)] {
                let mut cells = [E; 9];
                for &i in &line {
                    cells[i] = mark;
                }
                // One filler mark off the line cannot complete anything.
                if let Some(free) = (0..9).find(|i| !line.contains(i)) {
                    cells[free] = filler;
                }
                let board = Board::from_cells(cells);
                assert_eq!(
                    check_win_with_line(&board),
                    Some(WinningLine::new(mark, line)),
                    "line {:?} for {:?}",
                    line,
                    mark
                );
            }
        }
    }

    #[test]
    fn test_first_line_in_priority_order_is_reported() {
        // Top row and left column both complete; rows come first.
        let board = Board::from_cells([X, X, X, X, O, O, X, O, O]);
        assert_eq!(check_win_with_line(&board).map(|l| l.cells), Some([0, 1, 2]));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::from_cells([X, O, X, O, X, O, O, X, O]);
        assert_eq!(check_win(&board), None);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_line_is_not_draw() {
        let board = Board::from_cells([X, X, X, O, O, X, X, O, O]);
        assert_eq!(check_win(&board), Some(X));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let board = Board::from_cells([O, X, E, X, O, E, X, E, O]);
        let first = check_win_with_line(&board);
        assert_eq!(first, check_win_with_line(&board));
        assert_eq!(first.map(|l| l.cells), Some([0, 4, 8]));
    }
}
