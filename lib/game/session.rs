use crate::chess::{Color, Move, Outcome, Piece, Position, Promotion, Role, San, Square};
use crate::game::{Clock, Selection, TimeControl};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io, mem};
use tracing::{info, warn};

/// The top-level state of a [`Session`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    MainMenu,
    Playing,
    GameOver(Outcome),
}

/// An interactive chess match.
///
/// Owns the [`Position`], the [`Clock`], and the [`Selection`], and advances
/// them in response to input events from the rendering layer. Clicks that do
/// not amount to a legal move reset the selection and leave the position
/// untouched.
#[derive(Debug, Clone)]
pub struct Session {
    time_control: TimeControl,
    phase: Phase,
    position: Position,
    clock: Clock,
    selection: Selection,
    history: Vec<San>,
}

impl Session {
    /// Initializes a [`Session`] in the main menu.
    pub fn new(tc: TimeControl) -> Self {
        Session {
            time_control: tc,
            phase: Phase::MainMenu,
            position: Position::default(),
            clock: Clock::new(tc),
            selection: Selection::Idle,
            history: Vec::new(),
        }
    }

    /// The current [`Phase`].
    #[inline(always)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current [`Position`].
    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The current [`Selection`].
    #[inline(always)]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The [`Outcome`] of the game, if it is over.
    #[inline(always)]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(o) => Some(o),
            _ => None,
        }
    }

    /// The [`Piece`] on a [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.position.board().piece_on(sq)
    }

    /// The time left on a side's clock.
    #[inline(always)]
    pub fn clock(&self, side: Color) -> Duration {
        self.clock.remaining(side)
    }

    /// The moves played so far, in standard algebraic notation.
    #[inline(always)]
    pub fn history(&self) -> &[San] {
        &self.history
    }

    /// The legal destinations of the piece on a [`Square`], for highlighting.
    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        let mut squares: Vec<_> = self
            .position
            .moves()
            .iter()
            .filter(|mc| mc.whence() == sq)
            .map(|mc| mc.whither())
            .collect();

        squares.sort_unstable();
        squares.dedup();
        squares
    }

    /// Starts a fresh game from the standard starting position.
    pub fn start_game(&mut self) {
        self.start_from(Position::default());
    }

    /// Starts a fresh game from an arbitrary [`Position`].
    pub fn start_from(&mut self, pos: Position) {
        info!(position = %pos, "game started");

        self.position = pos;
        self.clock = Clock::new(self.time_control);
        self.selection = Selection::Idle;
        self.history.clear();

        self.phase = match self.position.outcome() {
            Some(o) => Phase::GameOver(o),
            None => Phase::Playing,
        };
    }

    /// Restarts the game from the standard starting position.
    pub fn restart_game(&mut self) {
        self.start_game();
    }

    /// Abandons the game and returns to the main menu.
    pub fn main_menu(&mut self) {
        self.selection = Selection::Idle;
        self.phase = Phase::MainMenu;
    }

    /// Ends the game in a draw by mutual agreement.
    pub fn agree_draw(&mut self) {
        if self.phase == Phase::Playing {
            self.conclude(Outcome::DrawByAgreement);
        }
    }

    /// Charges elapsed wall time to the clock of the side to move.
    ///
    /// If the clock runs out, the game is forfeit on time immediately,
    /// regardless of the position on the board.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.phase != Phase::Playing {
            return;
        }

        let side = self.position.turn();
        if self.clock.tick(side, elapsed) {
            self.conclude(Outcome::LossOnTime(side));
        }
    }

    /// Processes a click on a board square.
    pub fn square_clicked(&mut self, sq: Square) {
        if self.phase != Phase::Playing {
            return;
        }

        match mem::take(&mut self.selection) {
            Selection::Idle => self.select(sq),

            // any board click cancels a pending promotion
            Selection::AwaitingPromotion { .. } => {}

            Selection::Selected { whence, moves } => {
                if sq == whence {
                    // toggle deselect
                } else if moves.iter().any(|mc| mc.whither() == sq && mc.is_promotion()) {
                    self.selection = Selection::AwaitingPromotion {
                        whence,
                        whither: sq,
                    };
                } else if moves.iter().any(|mc| mc.whither() == sq) {
                    self.commit(Move(whence, sq, Promotion::None));
                } else {
                    self.select(sq);
                }
            }
        }
    }

    /// Processes a click on the promotion menu.
    pub fn promotion_clicked(&mut self, role: Role) {
        if self.phase != Phase::Playing {
            return;
        }

        let Selection::AwaitingPromotion { whence, whither } = self.selection else {
            return;
        };

        let promotion = match role {
            Role::Knight => Promotion::Knight,
            Role::Bishop => Promotion::Bishop,
            Role::Rook => Promotion::Rook,
            Role::Queen => Promotion::Queen,
            _ => return,
        };

        self.selection = Selection::Idle;
        self.commit(Move(whence, whither, promotion));
    }

    /// Saves the current position to a timestamped file under `dir`.
    pub fn export_fen(&self, dir: &Path) -> io::Result<PathBuf> {
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = dir.join(format!("{stamp}.fen"));
        fs::write(&path, format!("{}\n", self.position))?;
        info!(path = %path.display(), "position exported");
        Ok(path)
    }

    fn select(&mut self, sq: Square) {
        if self.position.board().color_on(sq) == Some(self.position.turn()) {
            let moves = self
                .position
                .moves()
                .iter()
                .copied()
                .filter(|mc| mc.whence() == sq)
                .collect();

            self.selection = Selection::Selected { whence: sq, moves };
        }
    }

    fn commit(&mut self, m: Move) {
        let snapshot = self.position.clone();

        match self.position.play(m) {
            Err(e) => warn!("rejected input, {e}"),

            Ok(mc) => {
                let san = San::new(&snapshot, mc);
                info!(r#move = %san, position = %self.position, "move committed");

                self.history.push(san);
                self.clock.reward(!self.position.turn());

                if let Some(o) = self.position.outcome() {
                    self.conclude(o);
                }
            }
        }
    }

    fn conclude(&mut self, outcome: Outcome) {
        info!("game over, {outcome}");
        self.selection = Selection::Idle;
        self.phase = Phase::GameOver(outcome);
    }
}

impl Default for Session {
    #[inline(always)]
    fn default() -> Self {
        Session::new(TimeControl::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn playing() -> Session {
        let mut session = Session::default();
        session.start_game();
        session
    }

    fn playing_from(fen: &str) -> Session {
        let mut session = Session::default();
        session.start_from(fen.parse().unwrap());
        session
    }

    #[test]
    fn session_starts_in_the_main_menu() {
        let session = Session::default();
        assert_eq!(session.phase(), Phase::MainMenu);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn starting_a_game_resets_the_board_and_clocks() {
        let session = playing();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.position(), &Position::default());
        assert_eq!(session.clock(Color::White), Duration::from_secs(300));
        assert_eq!(session.clock(Color::Black), Duration::from_secs(300));
        assert!(session.history().is_empty());
    }

    #[test]
    fn clicking_an_own_piece_selects_it() {
        let mut session = playing();
        session.square_clicked(Square::E2);

        assert_eq!(session.selection().selected(), Some(Square::E2));
        assert_eq!(
            session.selection().destinations(),
            vec![Square::E3, Square::E4]
        );
    }

    #[test]
    fn clicking_an_empty_or_enemy_square_while_idle_is_a_no_op() {
        let mut session = playing();

        session.square_clicked(Square::E4);
        assert_eq!(session.selection(), &Selection::Idle);

        session.square_clicked(Square::E7);
        assert_eq!(session.selection(), &Selection::Idle);
    }

    #[test]
    fn clicking_the_selected_square_deselects_it() {
        let mut session = playing();
        session.square_clicked(Square::E2);
        session.square_clicked(Square::E2);

        assert_eq!(session.selection(), &Selection::Idle);
        assert_eq!(session.position(), &Position::default());
    }

    #[test]
    fn clicking_another_own_piece_reselects_it() {
        let mut session = playing();
        session.square_clicked(Square::E2);
        session.square_clicked(Square::G1);

        assert_eq!(session.selection().selected(), Some(Square::G1));
        assert_eq!(
            session.selection().destinations(),
            vec![Square::F3, Square::H3]
        );
    }

    #[test]
    fn clicking_a_legal_destination_commits_the_move() {
        let mut session = playing();
        session.square_clicked(Square::E2);
        session.square_clicked(Square::E4);

        assert_eq!(session.selection(), &Selection::Idle);
        assert_eq!(session.piece_on(Square::E2), None);
        assert_eq!(
            session.piece_on(Square::E4),
            Some(Piece(Color::White, Role::Pawn))
        );

        assert_eq!(session.position().turn(), Color::Black);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].as_str(), "e4");
    }

    #[test]
    fn clicking_an_illegal_destination_rejects_the_move_silently() {
        let mut session = playing();
        session.square_clicked(Square::E2);
        session.square_clicked(Square::E5);

        assert_eq!(session.selection(), &Selection::Idle);
        assert_eq!(session.position(), &Position::default());
        assert!(session.history().is_empty());
    }

    #[test]
    fn promotion_requires_an_explicit_choice() {
        let mut session = playing_from("k7/4P3/8/8/8/8/8/4K3 w - - 0 1");
        session.square_clicked(Square::E7);
        session.square_clicked(Square::E8);

        assert!(session.selection().is_awaiting_promotion());
        assert_eq!(session.piece_on(Square::E8), None);

        session.promotion_clicked(Role::Queen);

        assert_eq!(session.selection(), &Selection::Idle);
        assert_eq!(
            session.piece_on(Square::E8),
            Some(Piece(Color::White, Role::Queen))
        );

        assert_eq!(session.history()[0].as_str(), "e8=Q+");
    }

    #[test]
    fn clicking_the_board_cancels_a_pending_promotion() {
        let mut session = playing_from("k7/4P3/8/8/8/8/8/4K3 w - - 0 1");
        session.square_clicked(Square::E7);
        session.square_clicked(Square::E8);
        session.square_clicked(Square::D4);

        assert_eq!(session.selection(), &Selection::Idle);
        assert_eq!(session.piece_on(Square::E8), None);
        assert_eq!(
            session.piece_on(Square::E7),
            Some(Piece(Color::White, Role::Pawn))
        );
    }

    #[test]
    fn promotion_clicks_are_ignored_unless_a_promotion_is_pending() {
        let mut session = playing();
        session.promotion_clicked(Role::Queen);
        assert_eq!(session.position(), &Position::default());

        session.square_clicked(Square::E2);
        session.promotion_clicked(Role::Queen);
        assert_eq!(session.selection().selected(), Some(Square::E2));
    }

    #[test]
    fn checkmate_moves_the_session_to_game_over() {
        let mut session = playing();

        for (whence, whither) in [
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ] {
            session.square_clicked(whence);
            session.square_clicked(whither);
        }

        assert_eq!(
            session.phase(),
            Phase::GameOver(Outcome::Checkmate(Color::Black))
        );

        let history: Vec<_> = session.history().iter().map(San::as_str).collect();
        assert_eq!(history, ["f3", "e5", "g4", "Qh4#"]);

        // further input is ignored
        session.square_clicked(Square::E2);
        assert_eq!(session.selection(), &Selection::Idle);
    }

    #[test]
    fn clock_ticks_charge_the_side_to_move() {
        let mut session = playing();
        session.tick(Duration::from_secs(100));

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.clock(Color::White), Duration::from_secs(200));
        assert_eq!(session.clock(Color::Black), Duration::from_secs(300));
    }

    #[test]
    fn flag_fall_forfeits_the_game_on_time() {
        let mut session = playing();
        session.tick(Duration::from_secs(301));

        assert_eq!(
            session.phase(),
            Phase::GameOver(Outcome::LossOnTime(Color::White))
        );

        assert_eq!(session.outcome().and_then(|o| o.winner()), Some(Color::Black));

        // the board did not decide this game
        assert_eq!(session.position().outcome(), None);
    }

    #[test]
    fn committed_moves_credit_the_increment() {
        let tc: TimeControl = "(initial:\"1m\",increment:\"5s\")".parse().unwrap();
        let mut session = Session::new(tc);
        session.start_game();

        session.square_clicked(Square::E2);
        session.square_clicked(Square::E4);

        assert_eq!(session.clock(Color::White), Duration::from_secs(65));
        assert_eq!(session.clock(Color::Black), Duration::from_secs(60));
    }

    #[test]
    fn players_may_agree_to_a_draw() {
        let mut session = playing();
        session.agree_draw();

        assert_eq!(session.phase(), Phase::GameOver(Outcome::DrawByAgreement));

        // but not twice
        session.agree_draw();
        assert_eq!(session.phase(), Phase::GameOver(Outcome::DrawByAgreement));
    }

    #[test]
    fn restarting_returns_to_a_fresh_game() {
        let mut session = playing();
        session.square_clicked(Square::E2);
        session.square_clicked(Square::E4);
        session.agree_draw();

        session.restart_game();

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.position(), &Position::default());
        assert!(session.history().is_empty());
    }

    #[test]
    fn starting_from_a_decided_position_ends_immediately() {
        let session = playing_from("k7/8/8/8/8/8/8/K7 w - - 0 1");

        assert_eq!(
            session.phase(),
            Phase::GameOver(Outcome::DrawByInsufficientMaterial)
        );
    }

    #[test]
    fn the_position_can_be_exported_to_a_file() {
        let dir = std::env::temp_dir().join(format!("clickmate-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut session = playing();
        session.square_clicked(Square::E2);
        session.square_clicked(Square::E4);

        let path = session.export_fen(&dir).unwrap();
        let fen = fs::read_to_string(path).unwrap();
        assert_eq!(fen.trim().parse::<Position>().as_ref(), Ok(session.position()));

        fs::remove_dir_all(dir).unwrap();
    }
}
