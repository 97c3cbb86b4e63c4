use crate::chess::{Promotion, Role, Square};
use derive_more::{Deref, Display, Error};
use std::str::FromStr;

/// A chess move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("{_0}{_1}{_2}")]
pub struct Move(pub Square, pub Square, pub Promotion);

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The [`Promotion`] specifier.
    #[inline(always)]
    pub fn promotion(&self) -> Promotion {
        self.2
    }
}

/// The reason why the string is not a valid move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse move")]
pub struct ParseMoveError;

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || s.len() < 4 {
            return Err(ParseMoveError);
        }

        Ok(Move(
            s[..2].parse().map_err(|_| ParseMoveError)?,
            s[2..4].parse().map_err(|_| ParseMoveError)?,
            s[4..].parse().map_err(|_| ParseMoveError)?,
        ))
    }
}

/// The context of a chess move.
///
/// In addition to the [`Move`] itself, records the [`Role`] of the piece moved and
/// the role and [`Square`] of the piece captured, if any. The captured square differs
/// from the destination exactly for en passant captures.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deref)]
pub struct MoveContext(#[deref] pub Move, pub Role, pub Option<(Role, Square)>);

impl MoveContext {
    /// The [`Role`] of the piece moved.
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.1
    }

    /// The [`Role`] and [`Square`] of the piece captured.
    #[inline(always)]
    pub fn capture(&self) -> Option<(Role, Square)> {
        self.2
    }

    /// Whether this is a capture move.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.capture().is_some()
    }

    /// Whether this is an en passant capture move.
    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.capture().is_some_and(|(_, sq)| self.whither() != sq)
    }

    /// Whether this is a promotion move.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion() != Promotion::None
    }

    /// Whether this is a castling move.
    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        self.role() == Role::King && (self.whence().file() - self.whither().file()).abs() > 1
    }

    /// Whether this move is neither a capture nor a promotion.
    #[inline(always)]
    pub fn is_quiet(&self) -> bool {
        !(self.is_capture() || self.is_promotion())
    }
}
