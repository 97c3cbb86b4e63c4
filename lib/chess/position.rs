use crate::chess::{movegen, Board, Color, Move, MoveContext, MoveList, Outcome};
use crate::chess::{ParseFenError, Piece, Promotion, Rank, Role};
use derive_more::{Debug, Display, Error};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The current position on the chess board.
///
/// Wraps a [`Board`] along with the history of repetition keys since the last
/// capture or pawn move.
#[derive(Debug, Default, Clone)]
#[debug("Position({self})")]
pub struct Position {
    board: Board,
    history: Vec<u64>,
}

impl Position {
    /// The underlying [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.board.turn
    }

    /// The number of halfmoves since the last capture or pawn move.
    #[inline(always)]
    pub fn halfmoves(&self) -> u32 {
        self.board.halfmoves
    }

    /// The current fullmove number.
    #[inline(always)]
    pub fn fullmoves(&self) -> u32 {
        self.board.fullmoves
    }

    /// Whether the side to move is in check.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        movegen::in_check(&self.board)
    }

    /// The legal moves in this position.
    #[inline(always)]
    pub fn moves(&self) -> MoveList {
        movegen::legal(&self.board)
    }

    /// How many times the current position has occurred since the last capture
    /// or pawn move, counting itself.
    pub fn repetitions(&self) -> usize {
        let key = self.board.repetition_key();
        self.history.iter().filter(|&&k| k == key).count() + 1
    }

    /// Whether neither player retains mating material.
    ///
    /// True for the bare kings, a lone minor piece, and any number of bishops
    /// confined to squares of one color.
    pub fn is_material_insufficient(&self) -> bool {
        let mut knights = 0;
        let mut dark = 0;
        let mut light = 0;

        for (p, sq) in self.board.iter() {
            match p.role() {
                Role::King => {}
                Role::Knight => knights += 1,
                Role::Bishop if sq.is_dark() => dark += 1,
                Role::Bishop => light += 1,
                _ => return false,
            }
        }

        match (knights, dark + light) {
            (0, _) => dark == 0 || light == 0,
            (1, 0) => true,
            _ => false,
        }
    }

    /// The [`Outcome`] of the game, if it has ended on the board.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.moves().is_empty() {
            Some(if self.is_check() {
                Outcome::Checkmate(!self.turn())
            } else {
                Outcome::Stalemate
            })
        } else if self.is_material_insufficient() {
            Some(Outcome::DrawByInsufficientMaterial)
        } else if self.halfmoves() >= 150 {
            Some(Outcome::DrawBy75MoveRule)
        } else if self.repetitions() >= 5 {
            Some(Outcome::DrawByFivefoldRepetition)
        } else {
            None
        }
    }

    /// Plays a [`Move`] if legal in this position.
    pub fn play(&mut self, m: Move) -> Result<MoveContext, PlayMoveError> {
        let moves = self.moves();
        let Some(mc) = moves.iter().copied().find(|mc| **mc == m) else {
            let undecided = m.promotion() == Promotion::None
                && moves.iter().any(|mc| {
                    mc.whence() == m.whence() && mc.whither() == m.whither() && mc.is_promotion()
                });

            return Err(if undecided {
                PlayMoveError::AmbiguousPromotion(m)
            } else {
                PlayMoveError::IllegalMove(m)
            });
        };

        if mc.is_capture() || mc.role() == Role::Pawn {
            self.history.clear();
        } else {
            self.history.push(self.board.repetition_key());
        }

        self.board.apply_unchecked(mc);

        Ok(mc)
    }
}

impl PartialEq for Position {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for Position {}

impl Hash for Position {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// The reason why a [`Move`] failed to play.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum PlayMoveError {
    #[display("move `{_0}` is illegal in this position")]
    IllegalMove(#[error(not(source))] Move),
    #[display("move `{_0}` requires a promotion specifier")]
    AmbiguousPromotion(#[error(not(source))] Move),
}

/// The reason why the position is invalid.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParsePositionError {
    #[display("{_0}")]
    InvalidFen(ParseFenError),
    #[display("missing {_0} king")]
    MissingKing(#[error(not(source))] Color),
    #[display("too many {_0} kings")]
    TooManyKings(#[error(not(source))] Color),
    #[display("pawn on the back rank")]
    PawnOnBackRank,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let board: Board = s.parse().map_err(ParsePositionError::InvalidFen)?;

        for c in Color::iter() {
            let kings = board.iter().filter(|&(p, _)| p == Piece(c, Role::King));

            match kings.count() {
                0 => return Err(ParsePositionError::MissingKing(c)),
                1 => {}
                _ => return Err(ParsePositionError::TooManyKings(c)),
            }
        }

        for (p, sq) in board.iter() {
            if p.role() == Role::Pawn && matches!(sq.rank(), Rank::First | Rank::Eighth) {
                return Err(ParsePositionError::PawnOnBackRank);
            }
        }

        Ok(Position {
            board,
            history: Vec::new(),
        })
    }
}
