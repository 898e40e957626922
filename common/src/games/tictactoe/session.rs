use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::games::GameBroadcaster;
use crate::log;
use super::game_state::{GameSnapshot, TicTacToeEngine};
use super::opponent::OpponentPolicy;
use super::types::{GameMode, TurnTicket};

/// Shared handle over one engine. Every accepted operation broadcasts a fresh
/// snapshot, and a due computer turn is played on a delayed tokio task.
pub struct TicTacToeSession<P, B> {
    engine: Arc<Mutex<TicTacToeEngine<P>>>,
    pending_computer_turn: Arc<Mutex<Option<JoinHandle<()>>>>,
    computer_delay: Duration,
    broadcaster: B,
}

impl<P, B: Clone> Clone for TicTacToeSession<P, B> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            pending_computer_turn: self.pending_computer_turn.clone(),
            computer_delay: self.computer_delay,
            broadcaster: self.broadcaster.clone(),
        }
    }
}

impl<P, B> TicTacToeSession<P, B>
where
    P: OpponentPolicy + Send + 'static,
    B: GameBroadcaster,
{
    pub fn new(engine: TicTacToeEngine<P>, computer_delay: Duration, broadcaster: B) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            pending_computer_turn: Arc::new(Mutex::new(None)),
            computer_delay,
            broadcaster,
        }
    }

    pub fn computer_delay(&self) -> Duration {
        self.computer_delay
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.engine.lock().await.snapshot()
    }

    pub async fn start(&self, mode: GameMode) {
        self.cancel_pending_computer_turn().await;

        let (snapshot, ticket) = {
            let mut engine = self.engine.lock().await;
            engine.start(mode);
            (engine.snapshot(), engine.pending_computer_turn())
        };

        log!("Started {} game", mode);
        self.publish(snapshot, ticket).await;
    }

    pub async fn restart(&self) -> Result<(), String> {
        self.cancel_pending_computer_turn().await;

        let (snapshot, ticket) = {
            let mut engine = self.engine.lock().await;
            if let Err(e) = engine.restart() {
                log!("Restart rejected: {}", e);
                return Err(e);
            }
            (engine.snapshot(), engine.pending_computer_turn())
        };

        log!("Restarted game");
        self.publish(snapshot, ticket).await;
        Ok(())
    }

    pub async fn apply_human_move(&self, index: usize) -> Result<(), String> {
        let (snapshot, ticket) = {
            let mut engine = self.engine.lock().await;
            let mark = engine.current_mark();
            if let Err(e) = engine.apply_human_move(index) {
                log!("Player {} failed to place mark at {}: {}", mark, index, e);
                return Err(e);
            }
            (engine.snapshot(), engine.pending_computer_turn())
        };

        self.publish(snapshot, ticket).await;
        Ok(())
    }

    /// Drops any scheduled computer turn; used on shutdown as well as start/restart.
    pub async fn cancel_pending_computer_turn(&self) {
        if let Some(handle) = self.pending_computer_turn.lock().await.take() {
            handle.abort();
        }
    }

    async fn publish(&self, snapshot: GameSnapshot, ticket: Option<TurnTicket>) {
        self.broadcaster.broadcast_state(snapshot).await;

        if let Some(ticket) = ticket {
            self.schedule_computer_turn(ticket).await;
        }
    }

    async fn schedule_computer_turn(&self, ticket: TurnTicket) {
        let session = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(session.computer_delay).await;
            session.play_computer_turn(ticket).await;
        });
        *self.pending_computer_turn.lock().await = Some(handle);
    }

    async fn play_computer_turn(&self, ticket: TurnTicket) {
        let snapshot = {
            let mut engine = self.engine.lock().await;
            match engine.apply_computer_move_for(ticket) {
                Ok(index) => {
                    log!("Computer placed O at {}", index);
                    engine.snapshot()
                }
                Err(e) => {
                    log!("Skipping computer turn: {}", e);
                    return;
                }
            }
        };

        self.broadcaster.broadcast_state(snapshot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, GameStatus, LowestEmptyOpponent, Mark, Score};

    const DELAY: Duration = Duration::from_millis(600);

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        snapshots: Arc<std::sync::Mutex<Vec<GameSnapshot>>>,
    }

    impl RecordingBroadcaster {
        fn count(&self) -> usize {
            self.snapshots.lock().unwrap().len()
        }

        fn last(&self) -> Option<GameSnapshot> {
            self.snapshots.lock().unwrap().last().cloned()
        }
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: GameSnapshot) {
            self.snapshots.lock().unwrap().push(snapshot);
        }
    }

    fn session() -> (
        TicTacToeSession<LowestEmptyOpponent, RecordingBroadcaster>,
        RecordingBroadcaster,
    ) {
        let broadcaster = RecordingBroadcaster::default();
        let session = TicTacToeSession::new(
            TicTacToeEngine::new(LowestEmptyOpponent),
            DELAY,
            broadcaster.clone(),
        );
        (session, broadcaster)
    }

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_moves_after_delay() {
        let (session, broadcaster) = session();
        session.start(GameMode::SinglePlayer).await;
        session.apply_human_move(4).await.unwrap();
        assert_eq!(session.snapshot().await.current_mark, Mark::O);

        wait(300).await;
        assert_eq!(session.snapshot().await.board.get(0), Some(Mark::Empty));

        wait(400).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.get(0), Some(Mark::O));
        assert_eq!(snapshot.current_mark, Mark::X);
        assert_eq!(snapshot.last_move, Some(0));
        assert_eq!(broadcaster.count(), 3);
        assert_eq!(broadcaster.last(), Some(snapshot));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_pending_computer_turn() {
        let (session, broadcaster) = session();
        session.start(GameMode::SinglePlayer).await;
        session.apply_human_move(4).await.unwrap();
        session.restart().await.unwrap();

        wait(2000).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board, Board::new());
        assert_eq!(snapshot.current_mark, Mark::X);
        assert_eq!(snapshot.status, GameStatus::InProgress);
        assert_eq!(broadcaster.count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_game_cancels_pending_computer_turn() {
        let (session, _) = session();
        session.start(GameMode::SinglePlayer).await;
        session.apply_human_move(4).await.unwrap();
        session.start(GameMode::TwoPlayer).await;

        wait(2000).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board, Board::new());
        assert_eq!(snapshot.mode, Some(GameMode::TwoPlayer));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_turn_never_lands_on_new_board() {
        let (session, _) = session();
        session.start(GameMode::SinglePlayer).await;
        session.apply_human_move(4).await.unwrap();
        wait(300).await;
        session.restart().await.unwrap();
        session.apply_human_move(8).await.unwrap();

        // Old turn would have fired at 600ms; the new one fires at 900ms.
        wait(400).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.count(Mark::O), 0);

        wait(300).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.count(Mark::O), 1);
        assert_eq!(snapshot.board.get(0), Some(Mark::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_player_never_schedules_computer() {
        let (session, broadcaster) = session();
        session.start(GameMode::TwoPlayer).await;
        session.apply_human_move(4).await.unwrap();

        wait(2000).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.count(Mark::O), 0);
        assert_eq!(snapshot.current_mark, Mark::O);
        assert_eq!(broadcaster.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_operations_do_not_broadcast() {
        let (session, broadcaster) = session();
        assert!(session.restart().await.is_err());
        assert!(session.apply_human_move(0).await.is_err());
        assert_eq!(broadcaster.count(), 0);

        session.start(GameMode::SinglePlayer).await;
        session.apply_human_move(4).await.unwrap();
        assert!(session.apply_human_move(5).await.is_err());
        assert_eq!(broadcaster.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_single_player_game() {
        let (session, _) = session();
        session.start(GameMode::SinglePlayer).await;
        for index in [4, 5, 8] {
            session.apply_human_move(index).await.unwrap();
            wait(700).await;
        }

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.status, GameStatus::Won(Mark::O));
        assert_eq!(snapshot.score, Score { x: 0, o: 1, draws: 0 });
        assert_eq!(snapshot.winning_line.map(|l| l.cells), Some([0, 1, 2]));
        assert!(session.apply_human_move(3).await.is_err());
    }
}
