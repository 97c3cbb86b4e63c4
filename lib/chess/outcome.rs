use crate::chess::Color;
use derive_more::Display;

/// The possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display("checkmate by the {_0} player")]
    Checkmate(Color),
    #[display("{_0} lost on time")]
    LossOnTime(Color),
    #[display("stalemate")]
    Stalemate,
    #[display("draw by insufficient material")]
    DrawByInsufficientMaterial,
    #[display("draw by the 75-move rule")]
    DrawBy75MoveRule,
    #[display("draw by fivefold repetition")]
    DrawByFivefoldRepetition,
    #[display("draw by agreement")]
    DrawByAgreement,
}

impl Outcome {
    /// Whether the outcome is a draw.
    #[inline(always)]
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether the outcome is a win for one of the players.
    #[inline(always)]
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Checkmate(_) | Outcome::LossOnTime(_))
    }

    /// The winning side, if the outcome is decisive.
    #[inline(always)]
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            Outcome::LossOnTime(c) => Some(!c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn outcome_is_either_a_draw_or_decisive(o: Outcome) {
        assert_ne!(o.is_draw(), o.is_decisive());
    }

    #[proptest]
    fn decisive_outcomes_have_a_winner(o: Outcome) {
        assert_eq!(o.winner().is_some(), o.is_decisive());
    }

    #[proptest]
    fn checkmate_wins_for_the_mating_side(c: Color) {
        assert_eq!(Outcome::Checkmate(c).winner(), Some(c));
    }

    #[proptest]
    fn flag_fall_wins_for_the_opponent(c: Color) {
        assert_eq!(Outcome::LossOnTime(c).winner(), Some(!c));
    }
}
