use crate::chess::{movegen, MoveContext, Position, Role};
use arrayvec::ArrayString;
use derive_more::Display;

/// A chess move in [standard algebraic notation].
///
/// The longest possible string is 7 bytes, e.g. `exd8=Q#` or `Qa1xd4#`.
///
/// [standard algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Standard_Algebraic_Notation_.28SAN.29
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display("{_0}")]
pub struct San(ArrayString<7>);

impl San {
    /// Encodes a [`MoveContext`] in the [`Position`] it was generated for.
    ///
    /// The move must come from the position's legal move set.
    pub fn new(pos: &Position, mc: MoveContext) -> Self {
        let mut san = ArrayString::new();

        if mc.is_castling() {
            if mc.whither().file() > mc.whence().file() {
                san.push_str("O-O");
            } else {
                san.push_str("O-O-O");
            }
        } else {
            match mc.role() {
                Role::Pawn => {
                    if mc.is_capture() {
                        san.push(mc.whence().file().char());
                    }
                }

                role => {
                    san.push(role.letter());

                    let rivals: Vec<_> = pos
                        .moves()
                        .iter()
                        .filter(|other| {
                            other.role() == role
                                && other.whither() == mc.whither()
                                && other.whence() != mc.whence()
                        })
                        .map(|other| other.whence())
                        .collect();

                    if !rivals.is_empty() {
                        let file = mc.whence().file();
                        let rank = mc.whence().rank();

                        if rivals.iter().all(|sq| sq.file() != file) {
                            san.push(file.char());
                        } else if rivals.iter().all(|sq| sq.rank() != rank) {
                            san.push(rank.char());
                        } else {
                            san.push(file.char());
                            san.push(rank.char());
                        }
                    }
                }
            }

            if mc.is_capture() {
                san.push('x');
            }

            san.push(mc.whither().file().char());
            san.push(mc.whither().rank().char());

            if let Some(role) = Option::<Role>::from(mc.promotion()) {
                san.push('=');
                san.push(role.letter());
            }
        }

        let mut board = *pos.board();
        board.apply_unchecked(mc);

        if movegen::in_check(&board) {
            san.push(if movegen::legal(&board).is_empty() {
                '#'
            } else {
                '+'
            });
        }

        San(san)
    }

    /// This notation as a string slice.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
