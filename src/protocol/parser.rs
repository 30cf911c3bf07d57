//! Command parser for the evaluation protocol.
//!
//! Parses incoming lines into structured `Command` variants that the main
//! loop dispatches on.

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Handshake; engine replies with its identity and `hellook`.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Forget the current position.
    NewGame,

    /// Set the position from text notation.
    Position { text: String },

    /// Evaluate the current position.
    Eval,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "eval" => Some(Command::Eval),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),

        other => {
            eprintln!("info string unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("info string malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            if name_parts.is_empty() {
                eprintln!("info string malformed setoption: empty name");
                return None;
            }
            let value_parts = &tokens[vi + 1..];
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <rows> <side> <last>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("info string malformed position: expected 'position <rows> <side> <last>'");
        return None;
    }
    Some(Command::Position {
        text: tokens[1..].join(" "),
    })
}
