use crate::games::SessionRng;
use super::board::Board;

/// Picks the computer's cell in single-player games.
pub trait OpponentPolicy {
    fn choose_move(&mut self, board: &Board) -> Option<usize>;
}

/// Uniform choice among the empty cells.
pub struct RandomOpponent {
    rng: SessionRng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SessionRng::new(seed),
        }
    }

    pub fn from_random() -> Self {
        Self {
            rng: SessionRng::from_random(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl OpponentPolicy for RandomOpponent {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        let available_moves = board.available_moves();
        self.rng.choose(&available_moves)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LowestEmptyOpponent;

impl OpponentPolicy for LowestEmptyOpponent {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        board.available_moves().first().copied()
    }
}

impl<P: OpponentPolicy + ?Sized> OpponentPolicy for Box<P> {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        (**self).choose_move(board)
    }
}
