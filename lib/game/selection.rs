use crate::chess::{MoveContext, Square};

/// The state of the interactive move selector.
///
/// Turns a pair of square clicks, plus a promotion choice when required, into
/// a committed move. Anything else resets the selector to [`Selection::Idle`]
/// without touching the position.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub enum Selection {
    /// No piece is selected.
    #[default]
    Idle,

    /// A piece is selected and its legal moves are cached.
    Selected {
        whence: Square,
        moves: Vec<MoveContext>,
    },

    /// A promotion move is pending the choice of a role.
    AwaitingPromotion { whence: Square, whither: Square },
}

impl Selection {
    /// The square of the selected piece, if any.
    #[inline(always)]
    pub fn selected(&self) -> Option<Square> {
        match *self {
            Selection::Idle => None,
            Selection::Selected { whence, .. } => Some(whence),
            Selection::AwaitingPromotion { whence, .. } => Some(whence),
        }
    }

    /// The legal destinations of the selected piece, for highlighting.
    pub fn destinations(&self) -> Vec<Square> {
        match self {
            Selection::Selected { moves, .. } => {
                let mut squares: Vec<_> = moves.iter().map(|mc| mc.whither()).collect();
                squares.sort_unstable();
                squares.dedup();
                squares
            }

            _ => Vec::new(),
        }
    }

    /// Whether a promotion choice is pending.
    #[inline(always)]
    pub fn is_awaiting_promotion(&self) -> bool {
        matches!(self, Selection::AwaitingPromotion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Position;
    use proptest::sample::Selector;
    use test_strategy::proptest;

    #[test]
    fn idle_selection_has_no_destinations() {
        assert_eq!(Selection::Idle.selected(), None);
        assert_eq!(Selection::Idle.destinations(), Vec::new());
    }

    #[proptest]
    fn destinations_are_sorted_and_unique(
        #[filter(!#pos.moves().is_empty())] pos: Position,
        selector: Selector,
    ) {
        let whence = selector.select(pos.moves()).whence();
        let moves: Vec<_> = pos
            .moves()
            .iter()
            .copied()
            .filter(|mc| mc.whence() == whence)
            .collect();

        let selection = Selection::Selected { whence, moves };
        let destinations = selection.destinations();

        assert!(destinations.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(selection.selected(), Some(whence));
    }
}
