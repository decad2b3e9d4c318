//! The authoritative match: one state, one writer, strict alternation.

use tracing::{debug, info, instrument};

use crate::codec;
use crate::core::{GameConfig, GameState, Move, MoveRecord, Orientation, Result, Side};
use crate::rules::{Quoridor, RulesEngine};
use crate::search::{self, SearchConfig};

use super::players::Player;
use super::transcript::Transcript;

/// A match in progress.
///
/// Every move goes through [`Match::submit`], which validates it against the
/// legal move list before touching the state. A rejected move leaves the
/// match unchanged.
#[derive(Clone, Debug)]
pub struct Match {
    rules: Quoridor,
    initial: GameState,
    state: GameState,
    history: Vec<MoveRecord>,
}

impl Match {
    /// Start a match from the opening position of `config`.
    pub fn new(config: GameConfig) -> Result<Self> {
        let rules = Quoridor::new(config)?;
        let initial = rules.initial_state()?;
        info!(board_size = initial.board_size(), walls = initial.walls_per_player(), "new match");
        Ok(Self {
            rules,
            state: initial.clone(),
            initial,
            history: Vec::new(),
        })
    }

    /// Rebuild a match by replaying a transcript.
    pub fn from_transcript(config: GameConfig, transcript: &Transcript) -> Result<Self> {
        let mut game = Self::new(config)?;
        for mv in transcript.moves() {
            game.submit(mv)?;
        }
        Ok(game)
    }

    /// Back to the starting position with an empty history.
    pub fn reset(&mut self) {
        self.state = self.initial.clone();
        self.history.clear();
    }

    /// Current position.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Rules this match is played under.
    #[must_use]
    pub fn rules(&self) -> &Quoridor {
        &self.rules
    }

    /// Committed moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Side whose turn it is.
    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.state.to_move()
    }

    /// Winner, once a pawn reaches its goal row.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// Check if the match has a winner.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Legal moves for the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.rules.legal_moves(&self.state, self.side_to_move())
    }

    /// Validate and commit a move for the side to move.
    #[instrument(skip(self), fields(side = %self.side_to_move(), ply = self.history.len()))]
    pub fn submit(&mut self, mv: Move) -> Result<()> {
        let side = self.side_to_move();
        self.rules.try_apply(&mut self.state, side, mv)?;

        let record = MoveRecord::new(mv, side, self.history.len() as u32);
        self.history.push(record);
        debug!(%mv, code = codec::encode(mv), "move committed");

        if let Some(winner) = self.state.winner() {
            info!(%winner, plies = self.history.len(), "match over");
        }
        Ok(())
    }

    /// Decode a move code for this board and submit it.
    pub fn submit_code(&mut self, code: u8) -> Result<Move> {
        let mv = codec::decode_checked(code, self.state.board_size())?;
        self.submit(mv)?;
        Ok(mv)
    }

    /// Submit a pawn move by displacement.
    pub fn move_pawn(&mut self, d_row: i8, d_col: i8) -> Result<()> {
        self.submit(Move::pawn(d_row, d_col))
    }

    /// Submit a wall placement at anchor `(row, col)`.
    pub fn place_wall(&mut self, orientation: Orientation, row: u8, col: u8) -> Result<()> {
        self.submit(Move::wall(orientation, row, col))
    }

    /// Let `player` pick a move for the side to move, then commit it.
    pub fn play_turn(&mut self, player: &mut dyn Player) -> Result<Move> {
        let mv = player.choose_move(&self.state, self.side_to_move())?;
        self.submit(mv)?;
        Ok(mv)
    }

    /// Search for the side to move and commit the result.
    pub fn play_engine_move(&mut self, config: &SearchConfig) -> Result<Move> {
        let mv = search::best_move(&self.state, self.side_to_move(), config)?;
        self.submit(mv)?;
        Ok(mv)
    }

    /// Take back the last move by replaying the rest of the history.
    ///
    /// Returns the removed record, or `None` on an empty history.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let last = self.history.pop()?;
        let mut state = self.initial.clone();
        for record in &self.history {
            self.rules.apply_move(&mut state, record.side, record.mv);
        }
        self.state = state;
        debug!(mv = %last.mv, side = %last.side, "move taken back");
        Some(last)
    }

    /// The history as a transcript.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        let moves: Vec<Move> = self.history.iter().map(|r| r.mv).collect();
        Transcript::from_moves(&moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, WallSlot};

    #[test]
    fn test_alternation() {
        let mut game = Match::new(GameConfig::default()).unwrap();
        assert_eq!(game.side_to_move(), Side::White);

        game.move_pawn(1, 0).unwrap();
        assert_eq!(game.side_to_move(), Side::Black);
        game.place_wall(Orientation::Vertical, 4, 4).unwrap();
        assert_eq!(game.side_to_move(), Side::White);

        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[1], MoveRecord::new(Move::wall(Orientation::Vertical, 4, 4), Side::Black, 1));
        assert_eq!(game.state().walls_remaining(Side::Black), 9);
    }

    #[test]
    fn test_rejected_move_leaves_match_unchanged() {
        let mut game = Match::new(GameConfig::default()).unwrap();
        game.move_pawn(1, 0).unwrap();
        let before = game.state().clone();

        // Black moving south would leave the board.
        let err = game.move_pawn(1, 0).unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { side: Side::Black, .. }));
        assert_eq!(game.state(), &before);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_submit_code() {
        let mut game = Match::new(GameConfig::default()).unwrap();
        assert_eq!(game.submit_code(24).unwrap(), Move::pawn(1, 0));
        assert!(matches!(game.submit_code(0), Err(EngineError::MalformedCode { .. })));
    }

    #[test]
    fn test_undo_replays_history() {
        let mut game = Match::new(GameConfig::default()).unwrap();
        game.move_pawn(1, 0).unwrap();
        let after_one = game.state().clone();
        game.place_wall(Orientation::Horizontal, 2, 3).unwrap();

        let undone = game.undo().unwrap();
        assert_eq!(undone.mv, Move::WallPlacement(WallSlot::horizontal(2, 3)));
        assert_eq!(game.state(), &after_one);

        game.undo().unwrap();
        assert!(game.undo().is_none());
        assert_eq!(game.state(), &GameState::new(&GameConfig::default()).unwrap());
    }

    #[test]
    fn test_transcript_round_trip() {
        let mut game = Match::new(GameConfig::default()).unwrap();
        game.move_pawn(1, 0).unwrap();
        game.move_pawn(-1, 0).unwrap();
        game.place_wall(Orientation::Horizontal, 5, 5).unwrap();

        let transcript = game.transcript();
        assert_eq!(transcript.codes(), &[24, 16, 128 | 64 | (5 << 3) | 5]);

        let replayed = Match::from_transcript(GameConfig::default(), &transcript).unwrap();
        assert_eq!(replayed.state(), game.state());
    }

    #[test]
    fn test_game_ends_and_rejects_moves() {
        let config = GameConfig::default().with_board_size(3);
        let mut game = Match::new(config).unwrap();
        // 3x3 board: White (0,1) and Black (2,1).
        game.move_pawn(0, 1).unwrap();
        game.move_pawn(-1, 0).unwrap();
        game.move_pawn(1, 0).unwrap();
        game.move_pawn(-1, 0).unwrap();

        assert_eq!(game.winner(), Some(Side::Black));
        assert!(game.is_over());
        assert!(game.legal_moves().is_empty());
        assert!(matches!(
            game.move_pawn(1, 0),
            Err(EngineError::TerminalState { winner: Side::Black })
        ));
    }
}
