use super::board::Board;
use super::opponent::{OpponentPolicy, RandomOpponent};
use super::types::{GameMode, GameStatus, Mark, MoveRecord, Score, TurnTicket, WinningLine};
use super::win_detector::check_win_with_line;

/// Everything a renderer needs after an engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub mode: Option<GameMode>,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub score: Score,
    /// Set only while the status is `Won`.
    pub winning_line: Option<WinningLine>,
    pub last_move: Option<usize>,
}

impl GameSnapshot {
    pub fn is_started(&self) -> bool {
        self.mode.is_some()
    }
}

pub struct TicTacToeEngine<P = RandomOpponent> {
    board: Board,
    mode: Option<GameMode>,
    current_mark: Mark,
    status: GameStatus,
    score: Score,
    winning_line: Option<WinningLine>,
    history: Vec<MoveRecord>,
    game_id: u64,
    opponent: P,
}

impl<P: OpponentPolicy> TicTacToeEngine<P> {
    pub fn new(opponent: P) -> Self {
        Self {
            board: Board::new(),
            mode: None,
            current_mark: Mark::X,
            status: GameStatus::NotStarted,
            score: Score::default(),
            winning_line: None,
            history: Vec::new(),
            game_id: 0,
            opponent,
        }
    }

    pub fn start(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.reset_board();
    }

    pub fn restart(&mut self) -> Result<(), String> {
        if self.mode.is_none() {
            return Err("No game has been started".to_string());
        }
        self.reset_board();
        Ok(())
    }

    pub fn apply_human_move(&mut self, index: usize) -> Result<(), String> {
        let mode = self.ensure_in_progress()?;

        if mode == GameMode::SinglePlayer && self.current_mark != Mark::X {
            return Err("Not your turn".to_string());
        }

        if !self.board.is_valid_move(index) {
            return Err(format!("Cell {} is not available", index));
        }

        self.place_and_resolve(index)
    }

    pub fn apply_computer_move(&mut self) -> Result<usize, String> {
        let mode = self.ensure_in_progress()?;

        if mode != GameMode::SinglePlayer {
            return Err("Computer only plays in single-player mode".to_string());
        }

        if self.current_mark != Mark::O {
            return Err("Not the computer's turn".to_string());
        }

        let index = self
            .opponent
            .choose_move(&self.board)
            .ok_or_else(|| "No legal move for the computer".to_string())?;

        if !self.board.is_valid_move(index) {
            return Err(format!("Computer chose unavailable cell {}", index));
        }

        self.place_and_resolve(index)?;
        Ok(index)
    }

    /// Returns the ticket for the computer's turn when one is due.
    pub fn pending_computer_turn(&self) -> Option<TurnTicket> {
        let due = self.mode == Some(GameMode::SinglePlayer)
            && self.status == GameStatus::InProgress
            && self.current_mark == Mark::O;
        due.then(|| self.current_ticket())
    }

    pub fn apply_computer_move_for(&mut self, ticket: TurnTicket) -> Result<usize, String> {
        if ticket != self.current_ticket() {
            return Err(format!(
                "Stale computer turn (scheduled for game {} move {}, now game {} move {})",
                ticket.game_id,
                ticket.move_number,
                self.game_id,
                self.history.len()
            ));
        }
        self.apply_computer_move()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            mode: self.mode,
            current_mark: self.current_mark,
            status: self.status,
            score: self.score,
            winning_line: self.winning_line,
            last_move: self.history.last().map(|record| record.index),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn is_started(&self) -> bool {
        self.mode.is_some()
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn opponent(&self) -> &P {
        &self.opponent
    }

    fn current_ticket(&self) -> TurnTicket {
        TurnTicket {
            game_id: self.game_id,
            move_number: self.history.len(),
        }
    }

    fn ensure_in_progress(&self) -> Result<GameMode, String> {
        let Some(mode) = self.mode else {
            return Err("No game has been started".to_string());
        };
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }
        Ok(mode)
    }

    fn reset_board(&mut self) {
        self.board = Board::new();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.history.clear();
        self.game_id += 1;
    }

    fn place_and_resolve(&mut self, index: usize) -> Result<(), String> {
        let mark = self.current_mark;
        self.board.place(index, mark)?;
        self.history.push(MoveRecord { index, mark });
        self.resolve();
        Ok(())
    }

    // Win is checked before the full board so a last-cell win never counts as a draw.
    fn resolve(&mut self) {
        if let Some(line) = check_win_with_line(&self.board) {
            self.status = GameStatus::Won(line.mark);
            self.winning_line = Some(line);
            self.score.record_win(line.mark);
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Drawn;
            self.score.record_draw();
            return;
        }

        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }
}

impl Default for TicTacToeEngine<RandomOpponent> {
    fn default() -> Self {
        Self::new(RandomOpponent::from_random())
    }
}
