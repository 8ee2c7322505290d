//! Card types for the Firedeck deck: 4 suits x 5 ranks, 20 cards total.

use serde::{Deserialize, Serialize};

/// Number of distinct ranks in the deck.
pub const RANK_COUNT: u8 = 5;

/// Number of suits in the deck.
pub const SUIT_COUNT: u8 = 4;

/// Total deck size. Exactly one card exists per (suit, rank) pair.
pub const DECK_SIZE: u8 = RANK_COUNT * SUIT_COUNT;

/// Card rank values (0=Ten, ..., 4=Ace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Ten = 0,
    Jack = 1,
    Queen = 2,
    King = 3,
    Ace = 4,
}

impl Rank {
    /// Convert from u8 to Rank. Panics if value > 4.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Rank::Ten,
            1 => Rank::Jack,
            2 => Rank::Queen,
            3 => Rank::King,
            4 => Rank::Ace,
            _ => panic!("invalid card rank: {}", value),
        }
    }

    /// Short face symbol (10, J, Q, K, A).
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Spelled-out rank name.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Ten => "ten",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card suit values (0=Spades, 1=Hearts, 2=Diamonds, 3=Clubs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    /// Convert from u8 to Suit. Panics if value > 3.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            3 => Suit::Clubs,
            _ => panic!("invalid card suit: {}", value),
        }
    }

    /// Suit glyph (♠, ♥, ♦, ♣).
    pub fn glyph(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// Spelled-out suit name.
    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }
}

/// A playing card represented as a compact u8 value in `0..DECK_SIZE`.
///
/// The u8 is the card's unique identity: the deck holds each id exactly once,
/// which is what the engine's conservation invariant is checked against.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card(pub u8);

impl Card {
    /// Create a new card from suit and rank.
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card((suit as u8) * RANK_COUNT + (rank as u8))
    }

    /// Unique id of this card within the 20-card deck.
    pub fn id(self) -> u8 {
        self.0
    }

    /// Get the rank of this card.
    pub fn rank(self) -> Rank {
        Rank::from_u8(self.0 % RANK_COUNT)
    }

    /// Get the suit of this card.
    pub fn suit(self) -> Suit {
        Suit::from_u8(self.0 / RANK_COUNT)
    }

    /// Check if this is a red suit (hearts or diamonds).
    pub fn is_red(self) -> bool {
        matches!(self.suit(), Suit::Hearts | Suit::Diamonds)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit().glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_ids_cover_every_suit_rank_pair_once() {
        let mut seen = std::collections::HashSet::new();
        for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
            for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace] {
                let card = Card::new(suit, rank);
                assert!(card.id() < DECK_SIZE);
                assert_eq!(card.suit(), suit);
                assert_eq!(card.rank(), rank);
                assert!(seen.insert(card.id()), "duplicate id {}", card.id());
            }
        }
        assert_eq!(seen.len(), DECK_SIZE as usize);
    }

    #[test]
    fn display_shows_symbol_and_glyph() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Queen).to_string(), "Q♥");
        assert_eq!(Card::new(Suit::Spades, Rank::Ten).to_string(), "10♠");
    }

    #[test]
    fn red_and_black_suits() {
        assert!(Card::new(Suit::Diamonds, Rank::Ace).is_red());
        assert!(!Card::new(Suit::Clubs, Rank::Ace).is_red());
    }
}
