use tictactoe_common::games::tictactoe::{
    BOARD_SIZE, GameMode, GameSnapshot, GameStatus, Mark,
};

pub fn status_text(snapshot: &GameSnapshot) -> String {
    let Some(mode) = snapshot.mode else {
        return "Choose a mode & start the game.".to_string();
    };

    match (snapshot.status, mode) {
        (GameStatus::NotStarted, _) => "Choose a mode & start the game.".to_string(),
        (GameStatus::Drawn, _) => "It's a draw!".to_string(),
        (GameStatus::Won(mark), GameMode::TwoPlayer) => format!("Player {} wins! 🎉", mark),
        (GameStatus::Won(Mark::X), GameMode::SinglePlayer) => "You win!".to_string(),
        (GameStatus::Won(_), GameMode::SinglePlayer) => "Computer wins!".to_string(),
        (GameStatus::InProgress, GameMode::TwoPlayer) => format!("{}'s turn", snapshot.current_mark),
        (GameStatus::InProgress, GameMode::SinglePlayer) => {
            if snapshot.current_mark == Mark::X {
                "Your move: X (You)".to_string()
            } else {
                "Computer is thinking...".to_string()
            }
        }
    }
}

pub fn score_text(snapshot: &GameSnapshot) -> String {
    format!(
        "Score  X: {}  O: {}  Draws: {}",
        snapshot.score.x, snapshot.score.o, snapshot.score.draws
    )
}

/// Which inputs the player may use for the given snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub two_player_enabled: bool,
    pub single_player_enabled: bool,
    pub restart_enabled: bool,
    pub cells_enabled: [bool; BOARD_SIZE * BOARD_SIZE],
}

impl Controls {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        let started = snapshot.is_started();
        let accepting_input = started
            && snapshot.status == GameStatus::InProgress
            && (snapshot.mode == Some(GameMode::TwoPlayer) || snapshot.current_mark == Mark::X);

        let mut cells_enabled = [false; BOARD_SIZE * BOARD_SIZE];
        for (enabled, &cell) in cells_enabled.iter_mut().zip(snapshot.board.cells()) {
            *enabled = accepting_input && cell == Mark::Empty;
        }

        Self {
            two_player_enabled: !(started && snapshot.mode == Some(GameMode::TwoPlayer)),
            single_player_enabled: !(started && snapshot.mode == Some(GameMode::SinglePlayer)),
            restart_enabled: started,
            cells_enabled,
        }
    }

    pub fn is_mode_enabled(&self, mode: GameMode) -> bool {
        match mode {
            GameMode::TwoPlayer => self.two_player_enabled,
            GameMode::SinglePlayer => self.single_player_enabled,
        }
    }

    pub fn is_cell_enabled(&self, index: usize) -> bool {
        self.cells_enabled.get(index).copied().unwrap_or(false)
    }
}

fn cell_text(snapshot: &GameSnapshot, index: usize, mark: Mark) -> String {
    let highlighted = snapshot
        .winning_line
        .is_some_and(|line| line.contains(index));
    match mark {
        Mark::Empty => format!(" {} ", index),
        _ if highlighted => format!("[{}]", mark),
        _ => format!(" {} ", mark),
    }
}

pub fn render(snapshot: &GameSnapshot) -> String {
    let rows: Vec<String> = snapshot
        .board
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, &mark)| cell_text(snapshot, row * BOARD_SIZE + col, mark))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    format!(
        "{}\n\n{}\n\n{}",
        rows.join("\n---+---+---\n"),
        status_text(snapshot),
        score_text(snapshot)
    )
}
