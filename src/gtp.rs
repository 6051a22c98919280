//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 needed to play games
//! under a controller or GUI such as GoGui, Sabaki or a tournament manager.
//!
//! ## Supported Commands
//!
//! - `quit`, `name`, `version`, `protocol_version`, `list_commands`
//! - `boardsize <size>`, `clear_board`, `komi <value>`
//! - `play <color> <vertex>`, `genmove <color>`, `undo`
//! - `time_settings <main> <byo_time> <byo_stones>`, `time_left <color> <time> <stones>`
//! - `showboard` (board dump on the diagnostic stream)
//!
//! Responses are `= <payload>` or `? <message>` followed by a blank line. A
//! numeric command id, when given, is echoed right after the marker.
//!
//! ## Example
//!
//! ```ignore
//! use dlgo_rust::evaluator::UniformEvaluator;
//! use dlgo_rust::gtp::GtpEngine;
//! use dlgo_rust::mcts::SearchConfig;
//!
//! let mut engine = GtpEngine::new(Box::new(UniformEvaluator::new()), SearchConfig::default());
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Board, Color};
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, INVALID_MOVE, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use crate::evaluator::Evaluator;
use crate::mcts::{Search, SearchConfig, SearchError};
use crate::time_control::TimeControl;

/// The list of known GTP commands.
pub const KNOWN_COMMANDS: &[&str] = &[
    "quit",
    "name",
    "version",
    "protocol_version",
    "list_commands",
    "play",
    "genmove",
    "undo",
    "clear_board",
    "boardsize",
    "komi",
    "time_settings",
    "time_left",
    "showboard",
];

/// Errors that end the GTP loop.
#[derive(Debug, Error)]
pub enum GtpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Reply to a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(String),
    Failure(String),
}

impl Response {
    fn ok() -> Self {
        Response::Success(String::new())
    }

    fn fail(message: &str) -> Self {
        Response::Failure(message.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Render the response with its framing.
    pub fn format(&self, id: Option<u32>) -> String {
        let (prefix, message) = match self {
            Response::Success(m) => ('=', m),
            Response::Failure(m) => ('?', m),
        };
        let id_str = id.map(|i| i.to_string()).unwrap_or_default();
        format!("{prefix}{id_str} {message}\n\n")
    }
}

/// GTP engine state.
pub struct GtpEngine {
    /// Current game position
    board: Board,
    /// Positions after every accepted move, starting with the empty board
    history: Vec<Board>,
    evaluator: Box<dyn Evaluator>,
    time_control: TimeControl,
    config: SearchConfig,
}

impl GtpEngine {
    /// Create an engine on an empty default-size board.
    pub fn new(evaluator: Box<dyn Evaluator>, config: SearchConfig) -> Self {
        let board = Board::new(DEFAULT_BOARD_SIZE, DEFAULT_KOMI);
        Self {
            history: vec![board.clone()],
            board,
            evaluator,
            time_control: TimeControl::new(),
            config,
        }
    }

    /// Builder pattern: start from an empty board of the given size and komi.
    pub fn with_board(mut self, board_size: usize, komi: f32) -> Self {
        self.board = Board::new(board_size, komi);
        self.history = vec![self.board.clone()];
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of recorded positions, including the initial one.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Run the GTP command loop on stdin, stdout and stderr.
    pub fn run(&mut self) -> Result<(), GtpError> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        self.run_with(stdin.lock(), &mut stdout, &mut stderr)
    }

    /// Run the GTP command loop until `quit` or end of input.
    ///
    /// Responses go to `output`; `showboard` dumps go to `diag`.
    pub fn run_with<R: BufRead, W: Write, D: Write>(
        &mut self,
        mut input: R,
        output: &mut W,
        diag: &mut D,
    ) -> Result<(), GtpError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            // Undecodable bytes become U+FFFD and fail as ordinary bad input.
            let line = String::from_utf8_lossy(&buf);

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            // Parse command and arguments
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                // A bare id still gets an answer.
                if id.is_some() {
                    warn!(?id, "command id without a command");
                    output.write_all(Response::fail("unknown command").format(id).as_bytes())?;
                    output.flush()?;
                }
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "gtp command");

            let response = match self.execute(&command, args, diag) {
                Ok(response) => response,
                Err(GtpError::Search(err)) => {
                    output.write_all(Response::Failure(err.to_string()).format(id).as_bytes())?;
                    output.flush()?;
                    return Err(err.into());
                }
                Err(err) => return Err(err),
            };
            if let Response::Failure(message) = &response {
                warn!(%command, ?args, %message, "command failed");
            }

            output.write_all(response.format(id).as_bytes())?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let mut chars = trimmed.char_indices();

        // Check if line starts with a digit
        if let Some((_, c)) = chars.next() {
            if c.is_ascii_digit() {
                // Find end of number
                let end = chars
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(i, _)| i)
                    .unwrap_or(trimmed.len());

                if let Ok(id) = trimmed[..end].parse::<u32>() {
                    return (Some(id), trimmed[end..].trim());
                }
            }
        }

        (None, trimmed)
    }

    /// Execute a GTP command.
    ///
    /// Rejected input yields a failure response; only I/O and search errors
    /// are returned as `Err`.
    pub fn execute<D: Write>(
        &mut self,
        command: &str,
        args: &[&str],
        diag: &mut D,
    ) -> Result<Response, GtpError> {
        let response = match command {
            "quit" => Response::ok(),

            "name" => Response::Success(env!("CARGO_PKG_NAME").to_string()),

            "version" => Response::Success(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Response::Success("2".to_string()),

            "list_commands" => Response::Success(KNOWN_COMMANDS.join("\n")),

            "clear_board" => {
                self.board.reset(self.board.board_size(), self.board.komi);
                self.history = vec![self.board.clone()];
                Response::ok()
            }

            "play" if args.len() >= 2 => self.play(args[0], args[1]),

            "genmove" if !args.is_empty() => self.genmove(args[0])?,

            "undo" => {
                if self.history.len() > 1 {
                    self.history.pop();
                    if let Some(previous) = self.history.last() {
                        self.board = previous.clone();
                    }
                }
                Response::ok()
            }

            "boardsize" if !args.is_empty() => match args[0].parse::<usize>() {
                Ok(size) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) => {
                    self.board.reset(size, self.board.komi);
                    self.history = vec![self.board.clone()];
                    Response::ok()
                }
                Ok(_) => Response::fail("unacceptable size"),
                Err(_) => Response::fail("boardsize is not an integer"),
            },

            "komi" if !args.is_empty() => match args[0].parse::<f32>() {
                Ok(komi) if komi.is_finite() => {
                    self.board.komi = komi;
                    for past in &mut self.history {
                        past.komi = komi;
                    }
                    Response::ok()
                }
                _ => Response::fail("komi is not a number"),
            },

            "time_settings" if args.len() >= 3 => {
                match (
                    args[0].parse::<u64>(),
                    args[1].parse::<u64>(),
                    args[2].parse::<u32>(),
                ) {
                    (Ok(main_time), Ok(byo_time), Ok(byo_stones)) => {
                        self.time_control.time_settings(main_time, byo_time, byo_stones);
                        Response::ok()
                    }
                    _ => Response::fail("time settings must be integers"),
                }
            }

            "time_left" if args.len() >= 3 => {
                match (
                    Color::parse(args[0]),
                    args[1].parse::<u64>(),
                    args[2].parse::<u32>(),
                ) {
                    (Some(color), Ok(time), Ok(stones)) => {
                        self.time_control.time_left(color, time, stones);
                        Response::ok()
                    }
                    (None, _, _) => Response::fail("invalid color"),
                    _ => Response::fail("time left must be integers"),
                }
            }

            "showboard" => {
                write!(diag, "{}", self.board)?;
                diag.flush()?;
                Response::ok()
            }

            c if KNOWN_COMMANDS.contains(&c) => Response::fail("wrong number of arguments"),

            _ => Response::fail("unknown command"),
        };
        Ok(response)
    }

    /// Play `vertex_text` for `color_text`. Nothing changes unless the move is legal.
    fn play(&mut self, color_text: &str, vertex_text: &str) -> Response {
        let Some(color) = Color::parse(color_text) else {
            return Response::fail("invalid color");
        };
        let vertex = self.board.text_to_vertex(vertex_text);
        if vertex == INVALID_MOVE {
            return Response::fail("invalid vertex");
        }

        let mut next = self.board.clone();
        next.to_move = color;
        if !next.play(vertex) {
            return Response::fail("illegal move");
        }
        self.board = next;
        self.history.push(self.board.clone());
        Response::ok()
    }

    /// Search for `color`, play the chosen move and report it.
    fn genmove(&mut self, color_text: &str) -> Result<Response, SearchError> {
        let Some(color) = Color::parse(color_text) else {
            return Ok(Response::fail("invalid color"));
        };
        self.board.to_move = color;

        let result = Search::new(
            &self.board,
            self.evaluator.as_ref(),
            &mut self.time_control,
            &self.config,
        )
        .think()?;

        if self.board.play(result.best_move) {
            self.history.push(self.board.clone());
        }
        Ok(Response::Success(self.board.vertex_to_text(result.best_move)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::UniformEvaluator;

    fn engine() -> GtpEngine {
        GtpEngine::new(
            Box::new(UniformEvaluator::new()),
            SearchConfig::default().with_playouts(8),
        )
    }

    fn exec(engine: &mut GtpEngine, command: &str, args: &[&str]) -> Response {
        engine.execute(command, args, &mut io::sink()).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_alone() {
        let (id, cmd) = GtpEngine::parse_id("7");
        assert_eq!(id, Some(7));
        assert_eq!(cmd, "");
    }

    #[test]
    fn test_response_format() {
        assert_eq!(Response::ok().format(None), "= \n\n");
        assert_eq!(Response::Success("D4".into()).format(Some(7)), "=7 D4\n\n");
        assert_eq!(Response::fail("illegal move").format(None), "? illegal move\n\n");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        assert_eq!(
            exec(&mut engine, "name", &[]),
            Response::Success("dlgo-rust".into())
        );
    }

    #[test]
    fn test_protocol_version() {
        let mut engine = engine();
        assert_eq!(
            exec(&mut engine, "protocol_version", &[]),
            Response::Success("2".into())
        );
    }

    #[test]
    fn test_list_commands() {
        let mut engine = engine();
        let Response::Success(list) = exec(&mut engine, "list_commands", &[]) else {
            panic!("list_commands should succeed");
        };
        assert_eq!(list.lines().count(), KNOWN_COMMANDS.len());
        assert!(list.lines().any(|l| l == "time_left"));
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        assert!(exec(&mut engine, "boardsize", &["13"]).is_success());
        assert_eq!(engine.board().board_size(), 13);
        assert!(!exec(&mut engine, "boardsize", &["26"]).is_success());
        assert!(!exec(&mut engine, "boardsize", &["nine"]).is_success());
        assert_eq!(engine.board().board_size(), 13);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();
        assert!(exec(&mut engine, "play", &["black", "D4"]).is_success());
        assert_eq!(engine.board().move_num(), 1);
        assert_eq!(engine.history_len(), 2);

        assert!(exec(&mut engine, "clear_board", &[]).is_success());
        assert_eq!(engine.board().move_num(), 0);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_rejected_play_leaves_state() {
        let mut engine = engine();
        exec(&mut engine, "play", &["b", "D4"]);
        let before = engine.board().clone();

        assert!(!exec(&mut engine, "play", &["w", "D4"]).is_success());
        assert!(!exec(&mut engine, "play", &["red", "E5"]).is_success());
        assert!(!exec(&mut engine, "play", &["w", "Z99"]).is_success());
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.history_len(), 2);
    }

    #[test]
    fn test_undo() {
        let mut engine = engine();
        exec(&mut engine, "play", &["b", "D4"]);
        exec(&mut engine, "play", &["w", "E5"]);
        assert!(exec(&mut engine, "undo", &[]).is_success());
        assert_eq!(engine.board().move_num(), 1);
        assert_eq!(engine.board().to_move, Color::White);

        exec(&mut engine, "undo", &[]);
        assert!(exec(&mut engine, "undo", &[]).is_success());
        assert_eq!(engine.board().move_num(), 0);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_komi() {
        let mut engine = engine();
        assert!(exec(&mut engine, "komi", &["6.5"]).is_success());
        assert_eq!(engine.board().komi, 6.5);
        assert!(!exec(&mut engine, "komi", &["lots"]).is_success());
    }

    #[test]
    fn test_arity_and_unknown() {
        let mut engine = engine();
        assert_eq!(
            exec(&mut engine, "play", &["black"]),
            Response::fail("wrong number of arguments")
        );
        assert_eq!(
            exec(&mut engine, "time_left", &["black", "10"]),
            Response::fail("wrong number of arguments")
        );
        assert_eq!(
            exec(&mut engine, "known_command", &["name"]),
            Response::fail("unknown command")
        );
    }

    #[test]
    fn test_showboard_writes_diagnostics() {
        let mut engine = engine();
        exec(&mut engine, "play", &["b", "C3"]);
        let mut diag = Vec::new();
        let response = engine.execute("showboard", &[], &mut diag).unwrap();
        assert!(response.is_success());
        let dump = String::from_utf8(diag).unwrap();
        assert!(dump.contains('X'));
        assert!(dump.contains("to move: white"));
    }
}
