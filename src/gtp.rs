//! Go Text Protocol (GTP) front end.
//!
//! GTP is the text protocol graphical Go clients (Sabaki, GoGui, ...) use
//! to talk to engines. This module drives a [`GameSession`] from GTP
//! version 2 commands and answers `genmove` with a [`RandomPolicy`].
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start over on a new board size
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Accepted; scoring does not use komi
//! - `play <color> <vertex>` - Play a move or `pass`
//! - `genmove <color>` - Generate and play a move
//! - `final_score` - Score of the current position, e.g. `B+3`
//! - `showboard` - Text diagram of the board
//! - `captures <color>` - Stones captured by that color
//!
//! Diagnostics go to stderr when verbose, since stdout carries the protocol.

use std::io::{self, BufRead, Write};

use crate::board::{Color, Point};
use crate::constants::{MAX_SIZE, MIN_SIZE};
use crate::policy::{Action, Policy, RandomPolicy};
use crate::session::{GameSession, MoveOutcome, PassOutcome};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// A GTP vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertex {
    Pass,
    Point(Point),
}

/// Parse a GTP vertex such as `D4` or `pass` on a board of `size`.
///
/// Columns are letters from `A` skipping `I`; row 1 is the bottom row, which
/// is `y = size - 1` on the grid.
pub fn parse_vertex(s: &str, size: usize) -> Option<Vertex> {
    if s.eq_ignore_ascii_case("pass") {
        return Some(Vertex::Pass);
    }

    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut x = (col_char as u8 - b'A') as usize;
    if col_char > 'I' {
        x -= 1;
    }

    let row_text = chars.as_str();
    if row_text.is_empty() || !row_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = row_text.parse().ok()?;
    if x >= size || row == 0 || row > size {
        return None;
    }
    Some(Vertex::Point((x, size - row)))
}

/// Format a grid point as a GTP vertex.
pub fn format_vertex((x, y): Point, size: usize) -> String {
    let mut c = b'A' + x as u8;
    if c >= b'I' {
        c += 1;
    }
    format!("{}{}", c as char, size - y)
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// GTP engine state.
pub struct GtpEngine {
    session: GameSession,
    policy: RandomPolicy,
    /// Log decisions to stderr
    verbose: bool,
}

impl GtpEngine {
    /// A new engine on an empty board. A `seed` makes `genmove` reproducible.
    pub fn new(session: GameSession, seed: Option<u64>, verbose: bool) -> Self {
        let policy = seed.map_or_else(RandomPolicy::new, RandomPolicy::with_seed);
        Self {
            session,
            policy,
            verbose,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
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
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("{message}");
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        let size = self.session.position().size();

        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(new_size) => match GameSession::new(new_size) {
                        Ok(session) => {
                            self.session = session;
                            (true, String::new())
                        }
                        Err(_) => (
                            false,
                            format!("unacceptable size, must be {MIN_SIZE}..={MAX_SIZE}"),
                        ),
                    },
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.session.restart();
                (true, String::new())
            }

            "komi" => match args.first().map(|a| a.parse::<f32>()) {
                Some(Ok(_)) => (true, String::new()),
                Some(Err(_)) => (false, "invalid komi".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = parse_color(color) else {
                    return (false, "invalid color".to_string());
                };
                let Some(vertex) = parse_vertex(vertex, size) else {
                    return (false, "invalid vertex".to_string());
                };
                if self.session.is_over() {
                    return (false, "game is over".to_string());
                }
                if color != self.session.current_player() {
                    return (false, "wrong color to move".to_string());
                }

                match vertex {
                    Vertex::Pass => {
                        self.pass();
                        (true, String::new())
                    }
                    Vertex::Point((x, y)) => match self.session.request_move(x, y) {
                        MoveOutcome::Placed(_) => (true, String::new()),
                        MoveOutcome::Rejected(err) => {
                            self.log(&format!("rejected {}: {err}", format_vertex((x, y), size)));
                            (false, err.to_string())
                        }
                        MoveOutcome::GameOver => (false, "game is over".to_string()),
                    },
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| parse_color(c)) else {
                    return (false, "missing or invalid color".to_string());
                };
                if self.session.is_over() {
                    return (true, "pass".to_string());
                }
                if color != self.session.current_player() {
                    return (false, "wrong color to move".to_string());
                }

                // If the opponent passed past the opening, pass too
                if self.session.consecutive_passes() == 1
                    && self.session.position().history_len() > 2
                {
                    self.pass();
                    return (true, "pass".to_string());
                }

                match self.policy.choose(self.session.position()) {
                    Action::Play { x, y } => match self.session.request_move(x, y) {
                        MoveOutcome::Placed(placement) => {
                            let vertex = format_vertex(placement.point, size);
                            self.log(&format!(
                                "genmove {color}: {vertex} captures {}",
                                placement.captured.len()
                            ));
                            (true, vertex)
                        }
                        _ => {
                            self.pass();
                            (true, "pass".to_string())
                        }
                    },
                    Action::Pass => {
                        self.pass();
                        (true, "pass".to_string())
                    }
                }
            }

            "final_score" => (true, self.session.position().calculate_score().to_string()),

            "showboard" => (true, format!("\n{}", self.session.position())),

            "captures" => match args.first().and_then(|c| parse_color(c)) {
                Some(color) => (
                    true,
                    self.session.position().captures_by(color).to_string(),
                ),
                None => (false, "missing or invalid color".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn pass(&mut self) {
        if let PassOutcome::Ended(result) = self.session.request_pass() {
            self.log(&format!(
                "game over: {} (black {} white {})",
                result.score, result.score.black, result.score.white
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        GtpEngine::new(GameSession::new(9).unwrap(), Some(3), false)
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
    fn test_vertex_roundtrip_skips_i() {
        assert_eq!(parse_vertex("A1", 9), Some(Vertex::Point((0, 8))));
        assert_eq!(parse_vertex("J9", 9), Some(Vertex::Point((8, 0))));
        assert_eq!(parse_vertex("h5", 9), Some(Vertex::Point((7, 4))));
        assert_eq!(parse_vertex("PASS", 9), Some(Vertex::Pass));
        assert_eq!(parse_vertex("I5", 9), None);
        assert_eq!(parse_vertex("K1", 9), None);
        assert_eq!(parse_vertex("A10", 9), None);
        assert_eq!(parse_vertex("A0", 9), None);
        assert_eq!(parse_vertex("A+5", 9), None);
        assert_eq!(parse_vertex("A 5", 9), None);
        assert_eq!(parse_vertex("A", 9), None);
        assert_eq!(format_vertex((8, 0), 9), "J9");
        assert_eq!(format_vertex((0, 8), 9), "A1");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["play"]), (true, "true".into()));
        assert_eq!(engine.execute("known_command", &["undo"]), (true, "false".into()));
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        let (success, _) = engine.execute("boardsize", &["19"]);
        assert!(success);
        assert_eq!(engine.session().position().size(), 19);

        let (success, _) = engine.execute("boardsize", &["1"]);
        assert!(success);

        let (success, _) = engine.execute("boardsize", &["0"]);
        assert!(!success);
    }

    #[test]
    fn test_play_wrong_color_and_occupied() {
        let mut engine = engine();
        assert!(engine.execute("play", &["b", "D4"]).0);
        assert_eq!(
            engine.execute("play", &["b", "E4"]),
            (false, "wrong color to move".into())
        );
        let (success, message) = engine.execute("play", &["w", "D4"]);
        assert!(!success);
        assert!(message.contains("not empty"));

        assert_eq!(
            engine.execute("play", &["w", "E+4"]),
            (false, "invalid vertex".into())
        );
    }

    #[test]
    fn test_genmove_plays_for_side_to_move() {
        let mut engine = engine();
        let (success, vertex) = engine.execute("genmove", &["black"]);
        assert!(success);
        assert!(matches!(parse_vertex(&vertex, 9), Some(Vertex::Point(_))));
        assert_eq!(engine.session().current_player(), Color::White);
    }

    #[test]
    fn test_play_passes_end_game() {
        let mut engine = engine();
        engine.execute("play", &["b", "E5"]);
        engine.execute("play", &["w", "pass"]);
        engine.execute("play", &["b", "pass"]);
        assert!(engine.session().is_over());
        assert_eq!(engine.execute("final_score", &[]), (true, "B+80".into()));

        engine.execute("clear_board", &[]);
        assert!(!engine.session().is_over());
    }

    #[test]
    fn test_run_writes_responses() {
        let mut engine = engine();
        let input = b"1 name\n# comment\nplay b C3\n2 bogus\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 go-board\n\n= \n\n?2 unknown command: bogus\n\n= \n\n"
        );
    }
}
