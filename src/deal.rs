use crate::{
    card::{Card, DECK_SIZE, Suit, TOTAL_SUITS},
    error::ParseError,
    pile::{MAX_PILES, Pile, Tableau},
    state::{FreeCellState, FreeCells},
};

use std::fmt;

const FOUNDATIONS_PREFIX: &str = "Foundations:";
const FREE_CELLS_PREFIX: &str = "FreeCells:";

impl FreeCellState {
    /// Parses a deal: one pile per line, cards listed bottom to top and
    /// separated by commas or whitespace. `Foundations:` and `FreeCells:` lines
    /// are optional, `#` starts a comment line.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut foundations = [0; TOTAL_SUITS];
        let mut free_cells = Vec::new();
        let mut piles = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let at_line = move |source: ParseError| ParseError::Line {
                line: idx + 1,
                source: Box::new(source),
            };
            if let Some(rest) = line.strip_prefix(FOUNDATIONS_PREFIX) {
                for card in parse_cards(rest).map_err(at_line)? {
                    let slot = &mut foundations[card.suit().index()];
                    if *slot != 0 {
                        return Err(at_line(ParseError::DuplicateCard(card)));
                    }
                    *slot = card.rank();
                }
            } else if let Some(rest) = line.strip_prefix(FREE_CELLS_PREFIX) {
                free_cells.extend(parse_cards(rest).map_err(at_line)?);
            } else {
                piles.extend(Pile::new(parse_cards(line).map_err(at_line)?));
            }
        }

        FreeCellState::new(foundations, free_cells, Tableau::new(piles)?)
    }

    /// Deals game number `seed` of the classic numbered FreeCell deals.
    pub fn from_seed(seed: u32) -> Self {
        let mut current_seed = seed;
        let mut rnd = || {
            current_seed = current_seed.wrapping_mul(214013).wrapping_add(2531011) & 0x7fff_ffff;
            current_seed >> 16
        };

        // 0 = AC, 1 = AD, 2 = AH, 3 = AS, 4 = 2C, ...
        let mut deck: [u8; DECK_SIZE] = std::array::from_fn(|i| (DECK_SIZE - 1 - i) as u8);
        for i in 0..DECK_SIZE - 1 {
            let j = DECK_SIZE - 1 - (rnd() as usize % (DECK_SIZE - i));
            deck.swap(i, j);
        }

        const SUIT_ORDER: [Suit; TOTAL_SUITS] =
            [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
        let piles = (0..MAX_PILES).filter_map(|pile| {
            Pile::new(
                deck.iter()
                    .skip(pile)
                    .step_by(MAX_PILES)
                    .filter_map(|&value| Card::new(value / 4 + 1, SUIT_ORDER[(value % 4) as usize])),
            )
        });

        FreeCellState {
            foundations: [0; TOTAL_SUITS],
            free_cells: FreeCells::new(),
            tableau: Tableau::dealt(piles),
        }
    }
}

fn parse_cards(s: &str) -> Result<Vec<Card>, ParseError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

fn join_cards(cards: impl IntoIterator<Item = Card>) -> String {
    cards
        .into_iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints the state in the format [`FreeCellState::parse`] reads.
impl fmt::Display for FreeCellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();

        let foundations: Vec<Card> = Suit::ALL
            .into_iter()
            .filter_map(|suit| Card::new(self.foundation(suit), suit))
            .collect();
        if !foundations.is_empty() {
            lines.push(format!("{FOUNDATIONS_PREFIX} {}", join_cards(foundations)));
        }
        if !self.free_cells().is_empty() {
            lines.push(format!(
                "{FREE_CELLS_PREFIX} {}",
                join_cards(self.free_cells().iter().copied())
            ));
        }
        for pile in self.tableau().piles() {
            lines.push(join_cards(pile.cards().iter().copied()));
        }

        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_board() {
        const BOARD_STR: &str = "Foundations: JH, KD, KC, KS\nFreeCells: KH\nQH";
        let state = FreeCellState::parse(BOARD_STR).unwrap();
        assert_eq!(state.foundations(), [11, 13, 13, 13]);
        assert_eq!(state.free_cells(), &[card("KH")]);
        assert_eq!(state.tableau().len(), 1);
        assert_eq!(BOARD_STR, state.to_string());
    }

    #[test]
    fn test_parse_separators_and_comments() {
        const BOARD_STR: &str = r#"
# a deal with three piles left
Foundations: tH kd,KC KS

jh qh
KH
"#;
        let state = FreeCellState::parse(BOARD_STR).unwrap();
        assert_eq!(state.foundations(), [10, 13, 13, 13]);
        let piles: Vec<&[Card]> = state.tableau().piles().iter().map(Pile::cards).collect();
        assert_eq!(piles, vec![&[card("JH"), card("QH")][..], &[card("KH")][..]]);
    }

    #[test]
    fn test_seed_round_trip() {
        for seed in [1, 164, 617, 11982] {
            let state = FreeCellState::from_seed(seed);
            assert_eq!(state.validate(), Ok(()));
            assert_eq!(FreeCellState::parse(&state.to_string()).unwrap(), state);
        }
    }

    #[test]
    fn test_new_from_seed() {
        let state = FreeCellState::from_seed(1);
        let mut bottoms: Vec<Card> = state
            .tableau()
            .piles()
            .iter()
            .map(|pile| pile.cards()[0])
            .collect();
        bottoms.sort();
        let mut expected: Vec<Card> = ["JD", "2D", "9H", "JC", "5D", "7H", "7C", "5H"]
            .map(card)
            .to_vec();
        expected.sort();
        assert_eq!(bottoms, expected);

        let mut lengths: Vec<usize> = state.tableau().piles().iter().map(Pile::len).collect();
        lengths.sort();
        assert_eq!(lengths, vec![6, 6, 6, 6, 7, 7, 7, 7]);
        assert_ne!(FreeCellState::from_seed(2), state);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            FreeCellState::parse("AH, 2H\nXX"),
            Err(ParseError::Line {
                line: 2,
                source: Box::new(ParseError::UnknownRank {
                    rank: 'X',
                    token: "XX".into()
                })
            })
        );
        assert_eq!(
            FreeCellState::parse("Foundations: KH, KD, KC, KS, QS"),
            Err(ParseError::Line {
                line: 1,
                source: Box::new(ParseError::DuplicateCard(card("QS")))
            })
        );
        assert_eq!(
            FreeCellState::parse("Foundations: KH, KD, KC, QS\nKS\nKS"),
            Err(ParseError::DuplicateCard(card("KS")))
        );
        assert_eq!(
            FreeCellState::parse("Foundations: KH, KD, KC, TS\nKS"),
            Err(ParseError::MissingCards(2))
        );
        assert_eq!(
            FreeCellState::parse("Foundations: 4H, KD, KC, KS\n5H\n6H\n7H\n8H\n9H\nTH\nJH\nQH\nKH"),
            Err(ParseError::TooManyPiles(9))
        );
        assert!(matches!(
            FreeCellState::parse("FreeCells: 10H"),
            Err(ParseError::Line { line: 1, .. })
        ));
    }
}
