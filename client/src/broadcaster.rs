use std::io::Write;

use tictactoe_common::games::GameBroadcaster;
use tictactoe_common::games::tictactoe::GameSnapshot;

use crate::ui;

#[derive(Clone, Default)]
pub struct ConsoleBroadcaster;

impl GameBroadcaster for ConsoleBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "\n{}\n", ui::render(&snapshot));
        let _ = stdout.flush();
    }
}
