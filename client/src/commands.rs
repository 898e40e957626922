use tictactoe_common::games::tictactoe::{CELL_COUNT, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Start(GameMode),
    Restart,
    PlaceMark(usize),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "Commands:
  start two | start single   begin a new game in that mode
  restart                    replay the current mode, keeping the score
  0-8                        place your mark (cells are numbered row by row)
  help                       show this message
  quit                       leave";

pub fn parse_command(input: &str) -> Result<ClientCommand, String> {
    let mut words = input.split_whitespace();
    let Some(first) = words.next() else {
        return Err("Empty command".to_string());
    };

    let command = match first.to_ascii_lowercase().as_str() {
        "start" | "new" => {
            let mode = words
                .next()
                .ok_or_else(|| "Missing mode: use 'start two' or 'start single'".to_string())?;
            ClientCommand::Start(mode.parse()?)
        }
        "restart" | "r" => ClientCommand::Restart,
        "help" | "h" | "?" => ClientCommand::Help,
        "quit" | "exit" | "q" => ClientCommand::Quit,
        cell => {
            let index: usize = cell
                .parse()
                .map_err(|_| format!("Unknown command: {}", input.trim()))?;
            if index >= CELL_COUNT {
                return Err(format!("Cell must be between 0 and {}", CELL_COUNT - 1));
            }
            ClientCommand::PlaceMark(index)
        }
    };

    if let Some(extra) = words.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }

    Ok(command)
}
