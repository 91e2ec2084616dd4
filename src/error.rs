use crate::card::Card;

/// Errors raised while reading a card, a deal, or building a state from one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("card '{0}' must be exactly two characters")]
    TokenLength(String),

    #[error("unknown rank '{rank}' in card '{token}'")]
    UnknownRank { rank: char, token: String },

    #[error("unknown suit '{suit}' in card '{token}'")]
    UnknownSuit { suit: char, token: String },

    #[error("the deal has {0} piles; at most 8 are allowed")]
    TooManyPiles(usize),

    #[error("the deal holds {0} free cell cards; at most 4 are allowed")]
    TooManyFreeCells(usize),

    #[error("foundation rank {0} is above king")]
    FoundationRank(u8),

    #[error("card {0} appears more than once")]
    DuplicateCard(Card),

    #[error("the deal is missing {0} card(s)")]
    MissingCards(usize),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

/// A move that the current layout does not allow. Generated moves are always
/// legal, so seeing this means a caller asked for something that is not there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move {card}: {reason}")]
pub struct InvalidMove {
    pub card: Card,
    pub reason: &'static str,
}

impl InvalidMove {
    pub(crate) fn new(card: Card, reason: &'static str) -> Self {
        Self { card, reason }
    }
}
