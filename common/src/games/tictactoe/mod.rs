mod board;
mod game_state;
mod opponent;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use game_state::{GameSnapshot, TicTacToeEngine};
pub use opponent::{LowestEmptyOpponent, OpponentPolicy, RandomOpponent};
pub use session::TicTacToeSession;
pub use settings::{DEFAULT_COMPUTER_DELAY_MS, MAX_COMPUTER_DELAY_MS, TicTacToeSessionSettings};
pub use types::{
    BOARD_SIZE, CELL_COUNT, GameMode, GameStatus, Mark, MoveRecord, Score, TurnTicket, WIN_LINES,
    WinningLine,
};
pub use win_detector::{check_win, check_win_with_line, is_draw};
