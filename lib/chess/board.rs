use crate::chess::{Castles, Color, File, MoveContext, Piece, Rank, Role, Square};
use derive_more::{Debug, Display, Error};
use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};
use std::{ops::Index, str::FromStr};

/// The chess board.
///
/// Holds the piece placement along with the side to move, castling rights,
/// en passant target, halfmove clock, and fullmove number.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[debug("Board({self})")]
pub struct Board {
    placement: [Option<Piece>; 64],
    pub turn: Color,
    pub castles: Castles,
    pub en_passant: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Default for Board {
    fn default() -> Self {
        const BACK_RANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut placement = [None; 64];
        for (f, role) in File::iter().zip(BACK_RANK) {
            placement[Square::new(f, Rank::First).index() as usize] =
                Some(Piece(Color::White, role));
            placement[Square::new(f, Rank::Second).index() as usize] =
                Some(Piece(Color::White, Role::Pawn));
            placement[Square::new(f, Rank::Seventh).index() as usize] =
                Some(Piece(Color::Black, Role::Pawn));
            placement[Square::new(f, Rank::Eighth).index() as usize] =
                Some(Piece(Color::Black, role));
        }

        Board {
            placement,
            turn: Color::White,
            castles: Castles::all(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Board {
    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.placement[sq.index() as usize]
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_on(sq).map(|p| p.color())
    }

    /// The [`Role`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn role_on(&self, sq: Square) -> Option<Role> {
        self.piece_on(sq).map(|p| p.role())
    }

    /// [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece(side, Role::King);
        Square::iter().find(|&sq| self[sq] == Some(king))
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self.piece_on(sq)?, sq)))
    }

    /// A key identifying this position for repetition comparison.
    ///
    /// Covers the placement, side to move, castling rights, and en passant
    /// target; the move counters are excluded.
    pub fn repetition_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.placement.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        self.castles.hash(&mut hasher);
        self.en_passant.hash(&mut hasher);
        hasher.finish()
    }

    #[inline(always)]
    fn set(&mut self, sq: Square, p: Option<Piece>) {
        self.placement[sq.index() as usize] = p;
    }

    /// Applies a [`MoveContext`] without validating legality.
    ///
    /// The move must come from the legal set for the current position; the
    /// [`Position`][`crate::chess::Position`] type upholds this contract.
    pub fn apply_unchecked(&mut self, mc: MoveContext) {
        let m = *mc;
        let us = self.turn;
        let zeroing = mc.is_capture() || mc.role() == Role::Pawn;

        if let Some((_, victim)) = mc.capture() {
            self.set(victim, None);
        }

        self.set(m.whence(), None);
        let role = Option::<Role>::from(m.promotion()).unwrap_or(mc.role());
        self.set(m.whither(), Some(Piece(us, role)));

        if mc.is_castling() {
            let rank = m.whence().rank();
            let (rook_from, rook_to) = if m.whither().file() > m.whence().file() {
                (Square::new(File::H, rank), Square::new(File::F, rank))
            } else {
                (Square::new(File::A, rank), Square::new(File::D, rank))
            };

            self.set(rook_from, None);
            self.set(rook_to, Some(Piece(us, Role::Rook)));
        }

        self.castles.discard(m.whence());
        self.castles.discard(m.whither());

        self.en_passant = if mc.role() == Role::Pawn && (m.whither().rank() - m.whence().rank()).abs() == 2 {
            m.whence().offset(0, if us == Color::White { 1 } else { -1 })
        } else {
            None
        };

        self.halfmoves = if zeroing { 0 } else { self.halfmoves + 1 };

        if us == Color::Black {
            self.fullmoves += 1;
        }

        self.turn = !us;
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.placement[sq.index() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in Rank::iter().rev() {
            let mut skip = 0;

            for sq in File::iter().map(|f| Square::new(f, r)) {
                match self[sq] {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{skip}")?;
                            skip = 0;
                        }

                        write!(f, "{p}")?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{skip}")?;
            }

            f.write_char(if r == Rank::First { ' ' } else { '/' })?;
        }

        match self.turn {
            Color::White => f.write_str("w ")?,
            Color::Black => f.write_str("b ")?,
        }

        if self.castles.is_empty() {
            f.write_str("- ")?;
        } else {
            write!(f, "{} ", self.castles)?;
        }

        match self.en_passant {
            None => f.write_str("- ")?,
            Some(ep) => write!(f, "{} ", ep)?,
        }

        write!(f, "{} {}", self.halfmoves, self.fullmoves)?;

        Ok(())
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display("failed to parse piece placement")]
    InvalidPlacement,
    #[display("failed to parse side to move")]
    InvalidSideToMove,
    #[display("failed to parse castling rights")]
    InvalidCastlingRights,
    #[display("failed to parse en passant square")]
    InvalidEnPassantSquare,
    #[display("failed to parse halfmove clock")]
    InvalidHalfmoveClock,
    #[display("failed to parse fullmove number")]
    InvalidFullmoveNumber,
    #[display("unspecified syntax error")]
    InvalidSyntax,
}

impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split(' ').collect();
        let [placement, turn, castles, en_passant, halfmoves, fullmoves] = &fields[..] else {
            return Err(ParseFenError::InvalidSyntax);
        };

        let ranks: Vec<_> = placement.split('/').rev().collect();
        let ranks @ [_1, _2, _3, _4, _5, _6, _7, _8] = &ranks[..] else {
            return Err(ParseFenError::InvalidPlacement);
        };

        let mut board = [None; 64];
        for (rank, segment) in ranks.iter().enumerate() {
            let mut file = 0;

            for c in segment.chars() {
                let mut buffer = [0; 4];

                if file >= 8 {
                    return Err(ParseFenError::InvalidPlacement);
                } else if let Some(skip) = c.to_digit(10) {
                    if skip == 0 {
                        return Err(ParseFenError::InvalidPlacement);
                    }

                    file += skip;
                } else if let Ok(p) = Piece::from_str(c.encode_utf8(&mut buffer)) {
                    let sq = Square::new(File::new(file as _), Rank::new(rank as _));
                    board[sq.index() as usize] = Some(p);
                    file += 1;
                } else {
                    return Err(ParseFenError::InvalidPlacement);
                }
            }

            if file != 8 {
                return Err(ParseFenError::InvalidPlacement);
            }
        }

        let turn = match &turn[..] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidSideToMove),
        };

        let castles = match &castles[..] {
            "-" => Castles::empty(),
            "" => return Err(ParseFenError::InvalidCastlingRights),
            _ => match castles.parse() {
                Err(_) => return Err(ParseFenError::InvalidCastlingRights),
                Ok(castles) => castles,
            },
        };

        let en_passant = match &en_passant[..] {
            "-" => None,
            ep => match ep.parse() {
                Err(_) => return Err(ParseFenError::InvalidEnPassantSquare),
                Ok(sq) => Some(sq),
            },
        };

        let Ok(halfmoves) = halfmoves.parse() else {
            return Err(ParseFenError::InvalidHalfmoveClock);
        };

        let Ok(fullmoves) = fullmoves.parse() else {
            return Err(ParseFenError::InvalidFullmoveNumber);
        };

        Ok(Board {
            placement: board,
            turn,
            castles,
            en_passant,
            halfmoves,
            fullmoves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Position;
    use proptest::prelude::*;
    use std::fmt::Debug;
    use test_strategy::proptest;

    impl Arbitrary for Board {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            any::<Position>().prop_map(|pos| *pos.board()).boxed()
        }
    }

    #[test]
    fn default_board_is_the_standard_starting_position() {
        assert_eq!(
            Board::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(b: Board) {
        for (p, sq) in b.iter() {
            assert_eq!(b[sq], Some(p));
        }
    }

    #[proptest]
    fn king_returns_square_occupied_by_a_king(b: Board, c: Color) {
        if let Some(sq) = b.king(c) {
            assert_eq!(b[sq], Some(Piece(c, Role::King)));
        }
    }

    #[proptest]
    fn piece_on_returns_piece_on_the_given_square(b: Board, sq: Square) {
        assert_eq!(
            b.piece_on(sq),
            Option::zip(b.color_on(sq), b.role_on(sq)).map(|(c, r)| Piece(c, r))
        );
    }

    #[proptest]
    fn board_can_be_indexed_by_square(b: Board, sq: Square) {
        assert_eq!(b[sq], b.piece_on(sq));
    }

    #[proptest]
    fn repetition_key_ignores_move_counters(b: Board, h: u32, n: u32) {
        let mut other = b;
        other.halfmoves = h;
        other.fullmoves = n;
        assert_eq!(other.repetition_key(), b.repetition_key());
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[proptest]
    fn parsing_board_fails_if_fields_missing(
        b: Board,
        #[strategy(0usize..6)] n: usize,
    ) {
        let s = b.to_string();
        let truncated = s.split(' ').take(n).collect::<Vec<_>>().join(" ");
        assert_eq!(truncated.parse::<Board>(), Err(ParseFenError::InvalidSyntax));
    }

    #[proptest]
    fn parsing_board_fails_for_invalid_fen(
        b: Board,
        #[strategy(..=#b.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        let s = b.to_string();
        assert_eq!([&s[..n], &r, &s[n..]].concat().parse().ok(), None::<Board>);
    }
}
