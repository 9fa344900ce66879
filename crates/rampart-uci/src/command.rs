//! UCI command parsing.
//!
//! Parsing stops at the lexical level: the `position` command carries its
//! FEN and move tokens verbatim so the engine can apply the protocol's
//! error policy (keep the old position on a bad FEN, skip individual bad
//! moves) with the board in hand.

use rampart_engine::DEFAULT_DEPTH;

use crate::error::UciError;

/// One parsed line of GUI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `uci` handshake.
    Uci,
    /// `isready` ping.
    IsReady,
    /// `ucinewgame`: reset to the starting position.
    UciNewGame,
    /// `position startpos | fen <...> [moves ...]`.
    Position {
        /// The six FEN fields joined, or `None` for `startpos`.
        fen: Option<String>,
        /// Raw move tokens following the `moves` keyword.
        moves: Vec<String>,
    },
    /// `go` in any supported form, reduced to a fixed search depth.
    Go {
        /// Plies to search.
        depth: u8,
    },
    /// `stop`: accepted and ignored, the search is synchronous.
    Stop,
    /// `quit`: leave the command loop.
    Quit,
    /// Anything unrecognized, kept for logging and silently dropped.
    Unknown(String),
}

/// Parse one line of input.
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.split_first() {
        None => Ok(Command::Unknown(String::new())),
        Some((&"uci", _)) => Ok(Command::Uci),
        Some((&"isready", _)) => Ok(Command::IsReady),
        Some((&"ucinewgame", _)) => Ok(Command::UciNewGame),
        Some((&"stop", _)) => Ok(Command::Stop),
        Some((&"quit", _)) => Ok(Command::Quit),
        Some((&"position", rest)) => parse_position(rest),
        Some((&"go", rest)) => parse_go(rest),
        Some((other, _)) => Ok(Command::Unknown((*other).to_string())),
    }
}

fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let (fen, rest) = match tokens.split_first() {
        Some((&"startpos", rest)) => (None, rest),
        Some((&"fen", rest)) if rest.len() >= 6 => {
            (Some(rest[..6].join(" ")), &rest[6..])
        }
        _ => return Err(UciError::MalformedPosition),
    };

    let moves = match rest.split_first() {
        Some((&"moves", moves)) => moves.iter().map(|s| (*s).to_string()).collect(),
        _ => Vec::new(),
    };

    Ok(Command::Position { fen, moves })
}

/// `go depth N` is authoritative; every time-control form (`movetime`,
/// `wtime`/`btime`, bare `go`) falls back to the fixed default depth.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut depth = DEFAULT_DEPTH;
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == "depth" {
            let value = tokens.get(i + 1).copied().unwrap_or("");
            depth = value.parse().map_err(|_| UciError::InvalidDepth {
                value: value.to_string(),
            })?;
            i += 2;
        } else {
            i += 1;
        }
    }
    Ok(Command::Go { depth })
}
