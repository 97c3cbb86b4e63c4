use crate::chess::{Board, Color, File, Move, MoveContext, Piece, Promotion, Rank, Role, Square};
use arrayvec::ArrayVec;

/// The moves playable in a position.
///
/// No chess position has more than 256 legal moves.
pub type MoveList = ArrayVec<MoveContext, 256>;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ROOK_RAYS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Whether a [`Square`] is attacked by any piece of the given [`Color`].
///
/// The en passant target does not count as attacked by the double-pushed pawn.
pub fn attacked(board: &Board, sq: Square, by: Color) -> bool {
    let dr = match by {
        Color::White => -1,
        Color::Black => 1,
    };

    for df in [-1, 1] {
        if let Some(s) = sq.offset(df, dr) {
            if board[s] == Some(Piece(by, Role::Pawn)) {
                return true;
            }
        }
    }

    for (role, steps) in [(Role::Knight, KNIGHT_STEPS), (Role::King, KING_STEPS)] {
        for (df, dr) in steps {
            if let Some(s) = sq.offset(df, dr) {
                if board[s] == Some(Piece(by, role)) {
                    return true;
                }
            }
        }
    }

    for (rays, diagonal) in [(BISHOP_RAYS, true), (ROOK_RAYS, false)] {
        for (df, dr) in rays {
            let mut s = sq;
            while let Some(next) = s.offset(df, dr) {
                s = next;

                match board[s] {
                    None => continue,
                    Some(p) => {
                        if p.color() == by
                            && (p.role() == Role::Queen
                                || p.role() == if diagonal { Role::Bishop } else { Role::Rook })
                        {
                            return true;
                        }

                        break;
                    }
                }
            }
        }
    }

    false
}

/// Whether the side to move is in check.
pub fn in_check(board: &Board) -> bool {
    match board.king(board.turn) {
        None => false,
        Some(sq) => attacked(board, sq, !board.turn),
    }
}

fn push_pawn_moves(board: &Board, whence: Square, whither: Square, moves: &mut MoveList) {
    let capture = board.role_on(whither).map(|r| (r, whither));
    let last = match board.turn {
        Color::White => Rank::Eighth,
        Color::Black => Rank::First,
    };

    if whither.rank() == last {
        for p in Promotion::ALL {
            moves.push(MoveContext(Move(whence, whither, p), Role::Pawn, capture));
        }
    } else {
        moves.push(MoveContext(
            Move(whence, whither, Promotion::None),
            Role::Pawn,
            capture,
        ));
    }
}

fn pawn_moves(board: &Board, whence: Square, moves: &mut MoveList) {
    let us = board.turn;
    let (dr, home) = match us {
        Color::White => (1, Rank::Second),
        Color::Black => (-1, Rank::Seventh),
    };

    if let Some(step) = whence.offset(0, dr) {
        if board[step].is_none() {
            push_pawn_moves(board, whence, step, moves);

            if whence.rank() == home {
                if let Some(double) = step.offset(0, dr) {
                    if board[double].is_none() {
                        push_pawn_moves(board, whence, double, moves);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = whence.offset(df, dr) else {
            continue;
        };

        if board.color_on(target) == Some(!us) {
            push_pawn_moves(board, whence, target, moves);
        } else if board.en_passant == Some(target) {
            let Some(victim) = target.offset(0, -dr) else {
                continue;
            };

            moves.push(MoveContext(
                Move(whence, target, Promotion::None),
                Role::Pawn,
                Some((Role::Pawn, victim)),
            ));
        }
    }
}

fn step_moves(
    board: &Board,
    whence: Square,
    role: Role,
    steps: [(i8, i8); 8],
    moves: &mut MoveList,
) {
    for (df, dr) in steps {
        let Some(whither) = whence.offset(df, dr) else {
            continue;
        };

        if board.color_on(whither) != Some(board.turn) {
            let capture = board.role_on(whither).map(|r| (r, whither));
            moves.push(MoveContext(
                Move(whence, whither, Promotion::None),
                role,
                capture,
            ));
        }
    }
}

fn ray_moves(
    board: &Board,
    whence: Square,
    role: Role,
    rays: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in rays {
        let mut whither = whence;
        while let Some(next) = whither.offset(df, dr) {
            whither = next;

            match board.color_on(whither) {
                Some(c) if c == board.turn => break,
                Some(_) => {
                    let capture = board.role_on(whither).map(|r| (r, whither));
                    moves.push(MoveContext(
                        Move(whence, whither, Promotion::None),
                        role,
                        capture,
                    ));

                    break;
                }
                None => moves.push(MoveContext(
                    Move(whence, whither, Promotion::None),
                    role,
                    None,
                )),
            }
        }
    }
}

fn castle_moves(board: &Board, moves: &mut MoveList) {
    let us = board.turn;
    let rank = match us {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    };

    let king = Square::new(File::E, rank);
    if board[king] != Some(Piece(us, Role::King)) || attacked(board, king, !us) {
        return;
    }

    if board.castles.has_short(us)
        && board[Square::new(File::H, rank)] == Some(Piece(us, Role::Rook))
        && [File::F, File::G]
            .into_iter()
            .all(|f| board[Square::new(f, rank)].is_none())
        && [File::F, File::G]
            .into_iter()
            .all(|f| !attacked(board, Square::new(f, rank), !us))
    {
        moves.push(MoveContext(
            Move(king, Square::new(File::G, rank), Promotion::None),
            Role::King,
            None,
        ));
    }

    if board.castles.has_long(us)
        && board[Square::new(File::A, rank)] == Some(Piece(us, Role::Rook))
        && [File::B, File::C, File::D]
            .into_iter()
            .all(|f| board[Square::new(f, rank)].is_none())
        && [File::D, File::C]
            .into_iter()
            .all(|f| !attacked(board, Square::new(f, rank), !us))
    {
        moves.push(MoveContext(
            Move(king, Square::new(File::C, rank), Promotion::None),
            Role::King,
            None,
        ));
    }
}

/// Generates all pseudo-legal moves in a position.
///
/// Pseudo-legal moves obey piece movement rules but may leave the moving
/// side's king exposed to capture.
pub fn pseudo_legal(board: &Board) -> MoveList {
    let mut moves = MoveList::new();

    for (p, whence) in board.iter() {
        if p.color() != board.turn {
            continue;
        }

        match p.role() {
            Role::Pawn => pawn_moves(board, whence, &mut moves),
            Role::Knight => step_moves(board, whence, Role::Knight, KNIGHT_STEPS, &mut moves),
            Role::Bishop => ray_moves(board, whence, Role::Bishop, &BISHOP_RAYS, &mut moves),
            Role::Rook => ray_moves(board, whence, Role::Rook, &ROOK_RAYS, &mut moves),
            Role::Queen => {
                ray_moves(board, whence, Role::Queen, &BISHOP_RAYS, &mut moves);
                ray_moves(board, whence, Role::Queen, &ROOK_RAYS, &mut moves);
            }
            Role::King => step_moves(board, whence, Role::King, KING_STEPS, &mut moves),
        }
    }

    castle_moves(board, &mut moves);

    moves
}

fn leaves_king_exposed(board: &Board, mc: MoveContext) -> bool {
    let us = board.turn;
    let mut scratch = *board;
    scratch.apply_unchecked(mc);

    match scratch.king(us) {
        None => false,
        Some(sq) => attacked(&scratch, sq, !us),
    }
}

/// Generates all legal moves in a position.
pub fn legal(board: &Board) -> MoveList {
    pseudo_legal(board)
        .into_iter()
        .filter(|&mc| !leaves_king_exposed(board, mc))
        .collect()
}
