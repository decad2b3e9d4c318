//! Transcript files: one decimal move code per line, White first.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec;
use crate::core::{EngineError, Move, Result};

/// Prefix and timestamp layout of saved-match file names.
pub const SAVED_NAME_FORMAT: &str = "game_%Y-%m-%d_%H-%M-%S";

/// The moves of a match as move codes, in turn order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    codes: Vec<u8>,
}

impl Transcript {
    /// Empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript of `moves` in turn order.
    #[must_use]
    pub fn from_moves(moves: &[Move]) -> Self {
        Self {
            codes: codec::encode_all(moves),
        }
    }

    /// Append a move.
    pub fn push(&mut self, mv: Move) {
        self.codes.push(codec::encode(mv));
    }

    /// Move codes in turn order.
    #[must_use]
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Decoded moves. Codes were checked when the transcript was parsed.
    #[must_use]
    pub fn moves(&self) -> Vec<Move> {
        self.codes.iter().copied().map(codec::decode).collect()
    }

    /// Number of recorded moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check if no move is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Parse transcript text for a `board_size` board.
    ///
    /// Blank lines are skipped. Line numbers in errors are one-based.
    pub fn parse(text: &str, board_size: u8) -> Result<Self> {
        let mut codes = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let code: u8 = line.parse().map_err(|_| EngineError::Transcript {
                line: index + 1,
                message: format!("{:?} is not a move code in 0..=255", line),
            })?;
            codec::decode_checked(code, board_size).map_err(|e| EngineError::Transcript {
                line: index + 1,
                message: e.to_string(),
            })?;
            codes.push(code);
        }
        Ok(Self { codes })
    }

    /// Render as transcript text, one code per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.codes.len() * 4);
        for code in &self.codes {
            // Writing to a String cannot fail.
            let _ = writeln!(text, "{}", code);
        }
        text
    }

    /// Read and parse a transcript file for a `board_size` board.
    pub fn load(path: impl AsRef<Path>, board_size: u8) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        Self::parse(&text, board_size)
    }

    /// Write the transcript to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text()).map_err(|e| EngineError::io(path, e))
    }

    /// Save under a timestamped name in `dir`, creating it if needed.
    ///
    /// Never replaces an existing file: when the name is taken, `_1`, `_2`,
    /// and so on are appended until a free one is found.
    pub fn save_in_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| EngineError::io(dir, e))?;
        let base = saved_name(&Local::now());
        let text = self.to_text();

        let mut attempt = 0u32;
        loop {
            let name = match attempt {
                0 => base.clone(),
                n => format!("{}_{}", base, n),
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(text.as_bytes())
                        .map_err(|e| EngineError::io(path.clone(), e))?;
                    info!(path = %path.display(), plies = self.len(), "saved match");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(EngineError::io(path, e)),
            }
        }
    }
}

/// File name a match saved at `at` is stored under.
#[must_use]
pub fn saved_name(at: &DateTime<Local>) -> String {
    at.format(SAVED_NAME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::core::WallSlot;

    fn sample() -> Transcript {
        Transcript::from_moves(&[
            Move::pawn(1, 0),
            Move::pawn(-1, 0),
            Move::WallPlacement(WallSlot::horizontal(3, 4)),
        ])
    }

    #[test]
    fn test_text_format() {
        assert_eq!(sample().to_text(), "24\n16\n220\n");
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = Transcript::parse(&sample().to_text(), 9).unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.moves()[2], Move::WallPlacement(WallSlot::horizontal(3, 4)));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let parsed = Transcript::parse("24\n\n 16 \n", 9).unwrap();
        assert_eq!(parsed.codes(), &[24, 16]);
    }

    #[test]
    fn test_parse_reports_line() {
        let err = Transcript::parse("24\n16\nabc\n", 9).unwrap_err();
        assert!(matches!(err, EngineError::Transcript { line: 3, .. }));

        let err = Transcript::parse("24\n300\n", 9).unwrap_err();
        assert!(matches!(err, EngineError::Transcript { line: 2, .. }));

        // Pawn code with no displacement.
        let err = Transcript::parse("0\n", 9).unwrap_err();
        assert!(matches!(err, EngineError::Transcript { line: 1, .. }));
    }

    #[test]
    fn test_saved_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(saved_name(&at), "game_2024-03-09_07-05-01");
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("quoridor-transcript-{}", std::process::id()));
        let path = sample().save_in_dir(&dir).unwrap();

        assert!(path.file_name().unwrap().to_string_lossy().starts_with("game_"));
        assert_eq!(Transcript::load(&path, 9).unwrap(), sample());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_back_to_back_saves_keep_both() {
        let dir = std::env::temp_dir().join(format!("quoridor-transcript-twice-{}", std::process::id()));
        let first = Transcript::from_moves(&[Move::pawn(1, 0)]);
        let second = Transcript::from_moves(&[Move::pawn(0, 1), Move::pawn(-1, 0)]);

        let first_path = first.save_in_dir(&dir).unwrap();
        let second_path = second.save_in_dir(&dir).unwrap();

        assert_ne!(first_path, second_path);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);
        assert_eq!(Transcript::load(&first_path, 9).unwrap(), first);
        assert_eq!(Transcript::load(&second_path, 9).unwrap(), second);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_taken_name_gets_suffix() {
        let dir = std::env::temp_dir().join(format!("quoridor-transcript-suffix-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // Occupy the next few seconds' names so the save has to step around them.
        let now = Local::now();
        for offset in 0..3 {
            let at = now + chrono::Duration::seconds(offset);
            std::fs::write(dir.join(saved_name(&at)), "24\n").unwrap();
        }

        let path = sample().save_in_dir(&dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert!(name.ends_with("_1"), "{}", name);
        assert_eq!(Transcript::load(&path, 9).unwrap(), sample());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
