use crate::card::Card;

use std::fmt;

/// Where a card lands in the tableau.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// On top of the pile whose top card is the given card.
    Card(Card),
    NewPile,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    TableauToFoundation(Card),
    FoundationToTableau(Card, Target),
    TableauToTableau(Card, Target),
    TableauToFreeCell(Card),
    FreeCellToTableau(Card, Target),
    FreeCellToFoundation(Card),
}

impl Move {
    pub fn card(&self) -> Card {
        match *self {
            Move::TableauToFoundation(card)
            | Move::FoundationToTableau(card, _)
            | Move::TableauToTableau(card, _)
            | Move::TableauToFreeCell(card)
            | Move::FreeCellToTableau(card, _)
            | Move::FreeCellToFoundation(card) => card,
        }
    }

    pub fn is_to_foundation(&self) -> bool {
        matches!(
            self,
            Move::TableauToFoundation(_) | Move::FreeCellToFoundation(_)
        )
    }

    pub fn is_from_foundation(&self) -> bool {
        matches!(self, Move::FoundationToTableau(..))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::TableauToFoundation(card) | Move::FreeCellToFoundation(card) => {
                write!(f, "Move {card} to its foundation.")
            }
            Move::FoundationToTableau(card, Target::Card(target)) => write!(
                f,
                "Take {card} from its foundation and put it on top of {target}."
            ),
            Move::FoundationToTableau(card, Target::NewPile) => {
                write!(f, "Take {card} from its foundation and put it in a new pile.")
            }
            Move::TableauToTableau(card, Target::Card(target))
            | Move::FreeCellToTableau(card, Target::Card(target)) => {
                write!(f, "Put {card} on top of {target}.")
            }
            Move::TableauToTableau(card, Target::NewPile)
            | Move::FreeCellToTableau(card, Target::NewPile) => {
                write!(f, "Put {card} in a new pile.")
            }
            Move::TableauToFreeCell(card) => write!(f, "Put {card} in a free cell."),
        }
    }
}

pub fn format_moves(moves: &[Move]) -> String {
    let width = moves.len().to_string().len();
    let mut output = String::new();
    for (i, mov) in moves.iter().enumerate() {
        output.push_str(&format!("{:>width$}. {mov}\n", i + 1));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            Move::TableauToFoundation(card("3H")).to_string(),
            "Move 3H to its foundation."
        );
        assert_eq!(
            Move::FreeCellToTableau(card("9C"), Target::Card(card("TD"))).to_string(),
            "Put 9C on top of TD."
        );
        assert_eq!(
            Move::TableauToTableau(card("9C"), Target::NewPile).to_string(),
            "Put 9C in a new pile."
        );
        assert_eq!(
            Move::TableauToFreeCell(card("5S")).to_string(),
            "Put 5S in a free cell."
        );
        assert_eq!(
            Move::FoundationToTableau(card("4H"), Target::Card(card("5S"))).to_string(),
            "Take 4H from its foundation and put it on top of 5S."
        );
    }

    #[test]
    fn test_format_moves() {
        let moves: Vec<Move> = (1..=10)
            .map(|rank| Move::FreeCellToFoundation(Card::new(rank, crate::card::Suit::Clubs).unwrap()))
            .collect();
        let output = format_moves(&moves);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], " 1. Move AC to its foundation.");
        assert_eq!(lines[9], "10. Move TC to its foundation.");
        assert_eq!(format_moves(&[]), "");
    }
}
