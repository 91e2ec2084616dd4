use crate::error::ParseError;

use std::{fmt, str::FromStr};

pub const MAX_RANK: u8 = 13;
pub const TOTAL_SUITS: usize = 4;
pub const DECK_SIZE: usize = TOTAL_SUITS * MAX_RANK as usize;

const RANKS: [char; MAX_RANK as usize] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];
const SUITS: [char; TOTAL_SUITS] = ['H', 'D', 'C', 'S'];

/// Every card of the deck, indexed by `suit * 13 + rank - 1`.
pub const DECK: [Card; DECK_SIZE] = {
    let mut deck = [Card(0); DECK_SIZE];
    let mut id = 0;
    while id < DECK_SIZE {
        deck[id] = Card(id as u8);
        id += 1;
    }
    deck
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; TOTAL_SUITS] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn symbol(self) -> char {
        SUITS[self.index()]
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        let idx = SUITS
            .iter()
            .position(|&s| s == symbol.to_ascii_uppercase())?;
        Some(Suit::ALL[idx])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// A playing card. Each of the 52 cards has exactly one value, so equality,
/// ordering and hashing are plain integer operations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// Looks the card up in [`DECK`]. Returns `None` for a rank outside `1..=13`.
    pub fn new(rank: u8, suit: Suit) -> Option<Self> {
        if !(1..=MAX_RANK).contains(&rank) {
            return None;
        }
        Some(DECK[suit.index() * MAX_RANK as usize + rank as usize - 1])
    }

    pub fn id(self) -> usize {
        self.0 as usize
    }

    pub fn rank(self) -> u8 {
        self.0 % MAX_RANK + 1
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 / MAX_RANK) as usize]
    }

    pub fn color(self) -> Color {
        self.suit().color()
    }

    /// Whether this card may be stacked on `other` in the tableau: one rank
    /// lower and the opposite color.
    pub fn stacks_on(self, other: Card) -> bool {
        self.rank() + 1 == other.rank() && self.color() != other.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANKS[self.rank() as usize - 1],
            self.suit().symbol()
        )
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::TokenLength(s.to_string()));
        };
        let rank = RANKS
            .iter()
            .position(|&r| r == rank.to_ascii_uppercase())
            .ok_or_else(|| ParseError::UnknownRank {
                rank,
                token: s.to_string(),
            })?;
        let suit = Suit::from_symbol(suit).ok_or_else(|| ParseError::UnknownSuit {
            suit,
            token: s.to_string(),
        })?;
        Ok(DECK[suit.index() * MAX_RANK as usize + rank])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        for card in DECK {
            let text = card.to_string();
            assert_eq!(text.len(), 2);
            assert_eq!(text.parse::<Card>().unwrap(), card);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let card: Card = "tD".parse().unwrap();
        assert_eq!(card.rank(), 10);
        assert_eq!(card.suit(), Suit::Diamonds);
        assert_eq!("qs".parse::<Card>().unwrap(), Card::new(12, Suit::Spades).unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "10H".parse::<Card>(),
            Err(ParseError::TokenLength("10H".into()))
        );
        assert_eq!("".parse::<Card>(), Err(ParseError::TokenLength("".into())));
        assert!(matches!(
            "1H".parse::<Card>(),
            Err(ParseError::UnknownRank { rank: '1', .. })
        ));
        assert!(matches!(
            "KX".parse::<Card>(),
            Err(ParseError::UnknownSuit { suit: 'X', .. })
        ));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Card::new(0, Suit::Hearts), None);
        assert_eq!(Card::new(14, Suit::Hearts), None);
        let king = Card::new(13, Suit::Spades).unwrap();
        assert_eq!(king.rank(), 13);
        assert_eq!(king.suit(), Suit::Spades);
        assert_eq!(king.color(), Color::Black);
        assert_eq!(king.id(), DECK_SIZE - 1);
        for (id, card) in DECK.iter().enumerate() {
            assert_eq!(Card::new(card.rank(), card.suit()), Some(*card));
            assert_eq!(card.id(), id);
        }
    }

    #[test]
    fn test_stacks_on() {
        let card = |s: &str| s.parse::<Card>().unwrap();
        assert!(card("9C").stacks_on(card("TD")));
        assert!(card("9H").stacks_on(card("TS")));
        assert!(!card("9S").stacks_on(card("TC")));
        assert!(!card("8C").stacks_on(card("TD")));
        assert!(!card("TD").stacks_on(card("9C")));
        assert!(!card("KH").stacks_on(card("AS")));
    }
}
