//! The synchronous UCI command loop.
//!
//! One thread, one loop: read a line, act on it, write the response. The
//! search runs to completion inside `go`, so `stop` has nothing to do and
//! command order is trivially preserved.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use rampart_core::{generate_legal_moves, Board, Color, Move};
use rampart_engine::search;

use crate::command::{parse_command, Command};
use crate::error::UciError;

const ENGINE_NAME: &str = "Rampart";
const ENGINE_AUTHOR: &str = "the rampart authors";

/// The engine state carried between protocol commands.
pub struct UciEngine {
    board: Board,
}

impl UciEngine {
    /// A fresh engine sitting on the starting position.
    pub fn new() -> UciEngine {
        UciEngine {
            board: Board::starting_position(),
        }
    }

    /// The current position, mostly for inspection in tests.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Serve stdin until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), UciError> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            debug!(line = %line.trim(), "received");
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command),
                Err(error) => warn!(%error, "ignoring malformed command"),
            }
        }
        info!("rampart shutting down");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Uci => {
                respond(&format!(
                    "id name {ENGINE_NAME}\nid author {ENGINE_AUTHOR}\nuciok"
                ));
            }
            Command::IsReady => respond("readyok"),
            Command::UciNewGame => self.board = Board::starting_position(),
            Command::Position { fen, moves } => self.handle_position(fen.as_deref(), &moves),
            Command::Go { depth } => self.handle_go(depth),
            // The search is synchronous, so there is never anything to stop.
            Command::Stop => {}
            Command::Quit => {}
            Command::Unknown(token) => {
                if !token.is_empty() {
                    debug!(%token, "ignoring unknown command");
                }
            }
        }
    }

    /// Set up a position. A bad FEN abandons the whole command and keeps
    /// the previous position; a bad or illegal move token is skipped and
    /// the remaining moves still apply.
    fn handle_position(&mut self, fen: Option<&str>, moves: &[String]) {
        let mut board = match fen {
            None => Board::starting_position(),
            Some(fen) => match fen.parse::<Board>() {
                Ok(board) => board,
                Err(error) => {
                    warn!(%error, fen, "rejecting position, keeping the previous one");
                    return;
                }
            },
        };

        for token in moves {
            let Some((from, to, promotion)) = Move::parse_uci(token) else {
                warn!(%token, "skipping unparseable move");
                continue;
            };
            match generate_legal_moves(&board).find(from, to, promotion) {
                Some(mv) => board.make_move(mv),
                None => warn!(%token, "skipping illegal move"),
            }
        }

        self.board = board;
    }

    fn handle_go(&mut self, depth: u8) {
        let result = search(&mut self.board, depth);
        // UCI scores are from the mover's point of view; the search reports
        // White-relative.
        let cp = match self.board.side_to_move() {
            Color::White => result.score,
            Color::Black => -result.score,
        };
        respond(&format!(
            "info depth {} score cp {} nodes {}",
            depth.max(1),
            cp,
            result.nodes
        ));
        match result.best_move {
            Some(mv) => respond(&format!("bestmove {mv}")),
            None => respond("bestmove 0000"),
        }
    }
}

impl Default for UciEngine {
    fn default() -> UciEngine {
        UciEngine::new()
    }
}

/// Write one response line and flush: GUIs read the pipe line by line and
/// stdout is block-buffered when it is not a terminal.
fn respond(line: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{line}");
    let _ = stdout.flush();
}
