use crate::chess::{Color, Square};
use bitflags::bitflags;
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;

bitflags! {
    /// The castling rights in a chess [`Position`][`crate::chess::Position`].
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Castles: u8 {
        const WHITE_SHORT = 1 << 0;
        const WHITE_LONG = 1 << 1;
        const BLACK_SHORT = 1 << 2;
        const BLACK_LONG = 1 << 3;
    }
}

impl Castles {
    /// Whether the given side has kingside castling rights.
    #[inline(always)]
    pub fn has_short(&self, side: Color) -> bool {
        self.contains(match side {
            Color::White => Castles::WHITE_SHORT,
            Color::Black => Castles::BLACK_SHORT,
        })
    }

    /// Whether the given side has queenside castling rights.
    #[inline(always)]
    pub fn has_long(&self, side: Color) -> bool {
        self.contains(match side {
            Color::White => Castles::WHITE_LONG,
            Color::Black => Castles::BLACK_LONG,
        })
    }

    /// Revokes the rights associated with a king or rook home square.
    ///
    /// Moving away from or capturing into `sq` invalidates these rights for good.
    #[inline(always)]
    pub fn discard(&mut self, sq: Square) {
        *self &= !match sq {
            Square::E1 => Castles::WHITE_SHORT | Castles::WHITE_LONG,
            Square::H1 => Castles::WHITE_SHORT,
            Square::A1 => Castles::WHITE_LONG,
            Square::E8 => Castles::BLACK_SHORT | Castles::BLACK_LONG,
            Square::H8 => Castles::BLACK_SHORT,
            Square::A8 => Castles::BLACK_LONG,
            _ => Castles::empty(),
        };
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, c) in [
            (Castles::WHITE_SHORT, 'K'),
            (Castles::WHITE_LONG, 'Q'),
            (Castles::BLACK_SHORT, 'k'),
            (Castles::BLACK_LONG, 'q'),
        ] {
            if self.contains(flag) {
                f.write_char(c)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castles = Castles::empty();

        for c in s.chars() {
            let flag = match c {
                'K' => Castles::WHITE_SHORT,
                'Q' => Castles::WHITE_LONG,
                'k' => Castles::BLACK_SHORT,
                'q' => Castles::BLACK_LONG,
                _ => return Err(ParseCastlesError),
            };

            if castles.contains(flag) {
                return Err(ParseCastlesError);
            }

            castles |= flag;
        }

        Ok(castles)
    }
}
