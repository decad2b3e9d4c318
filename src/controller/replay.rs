//! Step-by-step playback of a saved transcript.

use tracing::debug;

use crate::core::{GameConfig, GameState, Move, MoveRecord, Result, Side};
use crate::rules::{Quoridor, RulesEngine};

use super::transcript::Transcript;

/// Spectator view of a recorded match.
///
/// Each [`Replay::step`] applies the next recorded move. Playback ends when
/// a pawn reaches its goal row or the transcript runs out; moves recorded
/// after a win are never applied.
#[derive(Clone, Debug)]
pub struct Replay {
    rules: Quoridor,
    state: GameState,
    moves: Vec<Move>,
    cursor: usize,
}

impl Replay {
    /// Replay `transcript` from the opening position of `config`.
    pub fn new(config: GameConfig, transcript: &Transcript) -> Result<Self> {
        let rules = Quoridor::new(config)?;
        let state = rules.initial_state()?;
        Ok(Self {
            rules,
            state,
            moves: transcript.moves(),
            cursor: 0,
        })
    }

    /// Apply the next recorded move.
    ///
    /// `Ok(None)` once playback is finished. An illegal recorded move is an
    /// error and leaves the replay where it was.
    pub fn step(&mut self) -> Result<Option<MoveRecord>> {
        if self.is_finished() {
            return Ok(None);
        }
        let mv = self.moves[self.cursor];
        let side = self.state.to_move();
        self.rules.try_apply(&mut self.state, side, mv)?;

        let record = MoveRecord::new(mv, side, self.cursor as u32);
        self.cursor += 1;
        debug!(%mv, %side, ply = self.cursor, "replayed move");
        Ok(Some(record))
    }

    /// Play every remaining move, returning how many were applied.
    pub fn run_to_end(&mut self) -> Result<usize> {
        let mut applied = 0;
        while self.step()?.is_some() {
            applied += 1;
        }
        Ok(applied)
    }

    /// Check if a winner is known or every move has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal() || self.cursor >= self.moves.len()
    }

    /// Position after the moves applied so far.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Winner of the position so far, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// Moves applied so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Recorded moves not yet applied.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineError;

    #[test]
    fn test_step_by_step() {
        let transcript = Transcript::from_moves(&[Move::pawn(1, 0), Move::pawn(-1, 0)]);
        let mut replay = Replay::new(GameConfig::default(), &transcript).unwrap();

        let first = replay.step().unwrap().unwrap();
        assert_eq!(first.side, Side::White);
        assert_eq!(replay.position(), 1);
        assert_eq!(replay.remaining(), 1);

        let second = replay.step().unwrap().unwrap();
        assert_eq!(second.side, Side::Black);
        assert!(replay.step().unwrap().is_none());
        assert!(replay.is_finished());
    }

    #[test]
    fn test_stops_at_winner() {
        let config = GameConfig::default().with_board_size(3);
        let moves = [
            Move::pawn(0, 1),
            Move::pawn(-1, 0),
            Move::pawn(1, 0),
            Move::pawn(-1, 0),
            // Recorded after the win; never applied.
            Move::pawn(1, 0),
        ];
        let mut replay = Replay::new(config, &Transcript::from_moves(&moves)).unwrap();

        assert_eq!(replay.run_to_end().unwrap(), 4);
        assert_eq!(replay.winner(), Some(Side::Black));
        assert_eq!(replay.remaining(), 1);
    }

    #[test]
    fn test_illegal_recorded_move() {
        let transcript = Transcript::from_moves(&[Move::pawn(-1, 0)]);
        let mut replay = Replay::new(GameConfig::default(), &transcript).unwrap();

        assert!(matches!(replay.step(), Err(EngineError::IllegalMove { .. })));
        assert_eq!(replay.position(), 0);
    }
}
