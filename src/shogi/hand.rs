//! Pieces in hand.

use crate::core::Color;

use super::piece::{PieceType, HAND_TYPES, NUM_HAND_TYPES};

/// Captured pieces held by each side, always stored unpromoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hand {
    counts: [[u8; NUM_HAND_TYPES]; 2],
}

fn slot(pt: PieceType) -> Option<usize> {
    HAND_TYPES.iter().position(|&h| h == pt)
}

impl Hand {
    /// Returns the number of pieces of type `pt` held by `c`.
    pub fn get(&self, c: Color, pt: PieceType) -> u8 {
        slot(pt).map_or(0, |i| self.counts[c.index()][i])
    }

    /// Sets the count. Types that cannot be held are ignored.
    pub fn set(&mut self, c: Color, pt: PieceType, n: u8) {
        if let Some(i) = slot(pt) {
            self.counts[c.index()][i] = n;
        }
    }

    /// Adds a captured piece, demoting it first.
    pub fn increment(&mut self, c: Color, pt: PieceType) {
        let pt = pt.unpromote().unwrap_or(pt);
        if let Some(i) = slot(pt) {
            self.counts[c.index()][i] = self.counts[c.index()][i].saturating_add(1);
        }
    }

    pub fn decrement(&mut self, c: Color, pt: PieceType) {
        if let Some(i) = slot(pt) {
            self.counts[c.index()][i] = self.counts[c.index()][i].saturating_sub(1);
        }
    }

    /// Returns the held types of `c` with their counts, in SFEN order.
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        HAND_TYPES
            .iter()
            .zip(self.counts[c.index()].iter())
            .filter(|(_, n)| **n > 0)
            .map(|(&pt, &n)| (pt, n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().flatten().all(|&n| n == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_pieces_are_demoted() {
        let mut hand = Hand::default();
        hand.increment(Color::White, PieceType::Dragon);
        hand.increment(Color::White, PieceType::Pawn);
        hand.increment(Color::White, PieceType::ProPawn);

        assert_eq!(1, hand.get(Color::White, PieceType::Rook));
        assert_eq!(2, hand.get(Color::White, PieceType::Pawn));
        assert_eq!(0, hand.get(Color::Black, PieceType::Pawn));
        assert_eq!(
            vec![(PieceType::Rook, 1), (PieceType::Pawn, 2)],
            hand.pieces(Color::White).collect::<Vec<_>>()
        );
    }

    #[test]
    fn kings_are_never_held() {
        let mut hand = Hand::default();
        hand.increment(Color::Black, PieceType::King);
        hand.set(Color::Black, PieceType::King, 3);
        assert!(hand.is_empty());
    }

    #[test]
    fn decrement_saturates() {
        let mut hand = Hand::default();
        hand.set(Color::Black, PieceType::Gold, 1);
        hand.decrement(Color::Black, PieceType::Gold);
        hand.decrement(Color::Black, PieceType::Gold);
        assert_eq!(0, hand.get(Color::Black, PieceType::Gold));
    }
}
