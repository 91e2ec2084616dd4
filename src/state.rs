use crate::{
    action::{Move, Target},
    card::{Card, DECK_SIZE, MAX_RANK, Suit, TOTAL_SUITS},
    error::{InvalidMove, ParseError},
    pile::Tableau,
};

use smallvec::SmallVec;

pub const FREE_CELLS: usize = 4;
pub const STEP_COST: u32 = 1;

pub type Successor = (FreeCellState, Move, u32);
pub(crate) type FreeCells = SmallVec<[Card; FREE_CELLS]>;

/// A complete FreeCell layout: foundations, free cells and tableau.
///
/// Free cells are kept sorted and the tableau keeps its piles sorted, so the
/// derived `Eq` and `Hash` ignore which cell or pile slot a card sits in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FreeCellState {
    pub(crate) foundations: [u8; TOTAL_SUITS],
    pub(crate) free_cells: FreeCells,
    pub(crate) tableau: Tableau,
}

impl FreeCellState {
    /// Builds a state and checks that it holds every card of the deck exactly once.
    pub fn new(
        foundations: [u8; TOTAL_SUITS],
        free_cells: impl IntoIterator<Item = Card>,
        tableau: Tableau,
    ) -> Result<Self, ParseError> {
        if let Some(&rank) = foundations.iter().find(|&&rank| rank > MAX_RANK) {
            return Err(ParseError::FoundationRank(rank));
        }
        let mut free_cells: FreeCells = free_cells.into_iter().collect();
        if free_cells.len() > FREE_CELLS {
            return Err(ParseError::TooManyFreeCells(free_cells.len()));
        }
        free_cells.sort_unstable();
        let state = FreeCellState {
            foundations,
            free_cells,
            tableau,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        let mut seen = [false; DECK_SIZE];
        let mut count = 0;
        let foundation_cards = Suit::ALL.into_iter().flat_map(|suit| {
            (1..=self.foundation(suit)).filter_map(move |rank| Card::new(rank, suit))
        });
        for card in foundation_cards
            .chain(self.free_cells.iter().copied())
            .chain(self.tableau.cards())
        {
            if seen[card.id()] {
                return Err(ParseError::DuplicateCard(card));
            }
            seen[card.id()] = true;
            count += 1;
        }
        if count != DECK_SIZE {
            return Err(ParseError::MissingCards(DECK_SIZE - count));
        }
        Ok(())
    }

    pub fn foundations(&self) -> [u8; TOTAL_SUITS] {
        self.foundations
    }

    pub fn foundation(&self, suit: Suit) -> u8 {
        self.foundations[suit.index()]
    }

    pub fn free_cells(&self) -> &[Card] {
        &self.free_cells
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn is_goal(&self) -> bool {
        self.foundations.iter().all(|&rank| rank == MAX_RANK)
    }

    /// The number of cards not yet on a foundation. Each of them needs at
    /// least one more move, so this never overestimates.
    pub fn heuristic(&self) -> u32 {
        DECK_SIZE as u32 - self.foundations.iter().map(|&rank| rank as u32).sum::<u32>()
    }

    /// Every state one move away, grouped by kind of move in a fixed order.
    pub fn next_states(&self) -> Vec<Successor> {
        let mut successors = Vec::new();
        self.tableau_to_foundations(&mut successors);
        self.foundations_to_tableau(&mut successors);
        self.tableau_moves(&mut successors);
        self.tableau_to_free(&mut successors);
        self.free_to_tableau(&mut successors);
        self.free_to_foundations(&mut successors);
        successors
    }

    /// A foundation move that can never hurt: the card is an ace or a two, or
    /// both opposite-color foundations already hold the rank below it.
    pub fn safe_foundation_move(&self) -> Option<Successor> {
        let is_safe = |card: Card| {
            card.rank() <= 2
                || Suit::ALL
                    .into_iter()
                    .filter(|suit| suit.color() != card.color())
                    .all(|suit| self.foundation(suit) + 1 >= card.rank())
        };
        for (idx, pile) in self.tableau.piles().iter().enumerate() {
            let card = pile.top();
            if self.accepts(card) && is_safe(card) {
                let mut next = self.with_tableau(self.tableau.without_top(idx).0);
                next.foundations[card.suit().index()] += 1;
                return Some((next, Move::TableauToFoundation(card), STEP_COST));
            }
        }
        for (idx, &card) in self.free_cells.iter().enumerate() {
            if self.accepts(card) && is_safe(card) {
                let mut next = self.with_free_cells(self.free_cells_without(idx));
                next.foundations[card.suit().index()] += 1;
                return Some((next, Move::FreeCellToFoundation(card), STEP_COST));
            }
        }
        None
    }

    /// Applies one move, checking that it is legal here.
    pub fn apply(&self, mov: &Move) -> Result<FreeCellState, InvalidMove> {
        let card = mov.card();
        let suit = card.suit().index();
        let next = match *mov {
            Move::TableauToFoundation(card) => {
                self.check_accepts(card)?;
                let mut next = self.with_tableau(self.tableau.remove(card)?);
                next.foundations[suit] += 1;
                next
            }
            Move::FoundationToTableau(card, target) => {
                if self.foundations[suit] != card.rank() {
                    return Err(InvalidMove::new(card, "it is not on top of its foundation"));
                }
                let mut next = self.with_tableau(self.tableau.place_on(card, target)?);
                next.foundations[suit] -= 1;
                next
            }
            Move::TableauToTableau(card, target) => {
                let (tableau, exposed) = self.tableau.lift(card)?;
                match target {
                    Target::NewPile if exposed.is_none() => {
                        return Err(InvalidMove::new(card, "it is already alone in its pile"));
                    }
                    Target::Card(top) if exposed == Some(top) => {
                        return Err(InvalidMove::new(card, "it is already on top of the target"));
                    }
                    _ => {}
                }
                self.with_tableau(tableau.place_on(card, target)?)
            }
            Move::TableauToFreeCell(card) => {
                if self.free_cells.len() >= FREE_CELLS {
                    return Err(InvalidMove::new(card, "the free cells are full"));
                }
                let mut next = self.with_tableau(self.tableau.remove(card)?);
                next.insert_free_cell(card);
                next
            }
            Move::FreeCellToTableau(card, target) => {
                let idx = self.free_cell_position(card)?;
                let mut next = self.with_tableau(self.tableau.place_on(card, target)?);
                next.free_cells = self.free_cells_without(idx);
                next
            }
            Move::FreeCellToFoundation(card) => {
                self.check_accepts(card)?;
                let idx = self.free_cell_position(card)?;
                let mut next = self.with_free_cells(self.free_cells_without(idx));
                next.foundations[suit] += 1;
                next
            }
        };
        Ok(next)
    }

    fn tableau_to_foundations(&self, successors: &mut Vec<Successor>) {
        for (idx, pile) in self.tableau.piles().iter().enumerate() {
            let card = pile.top();
            if self.accepts(card) {
                let mut next = self.with_tableau(self.tableau.without_top(idx).0);
                next.foundations[card.suit().index()] += 1;
                successors.push((next, Move::TableauToFoundation(card), STEP_COST));
            }
        }
    }

    fn foundations_to_tableau(&self, successors: &mut Vec<Successor>) {
        for suit in Suit::ALL {
            let Some(card) = Card::new(self.foundation(suit), suit) else {
                continue;
            };
            for (tableau, target) in self.tableau.place(card) {
                let mut next = self.with_tableau(tableau);
                next.foundations[suit.index()] -= 1;
                successors.push((next, Move::FoundationToTableau(card, target), STEP_COST));
            }
        }
    }

    fn tableau_moves(&self, successors: &mut Vec<Successor>) {
        for (tableau, mov) in self.tableau.internal_moves() {
            successors.push((self.with_tableau(tableau), mov, STEP_COST));
        }
    }

    fn tableau_to_free(&self, successors: &mut Vec<Successor>) {
        if self.free_cells.len() >= FREE_CELLS {
            return;
        }
        for (idx, pile) in self.tableau.piles().iter().enumerate() {
            let card = pile.top();
            let mut next = self.with_tableau(self.tableau.without_top(idx).0);
            next.insert_free_cell(card);
            successors.push((next, Move::TableauToFreeCell(card), STEP_COST));
        }
    }

    fn free_to_tableau(&self, successors: &mut Vec<Successor>) {
        for (idx, &card) in self.free_cells.iter().enumerate() {
            let free_cells = self.free_cells_without(idx);
            for (tableau, target) in self.tableau.place(card) {
                let next = FreeCellState {
                    foundations: self.foundations,
                    free_cells: free_cells.clone(),
                    tableau,
                };
                successors.push((next, Move::FreeCellToTableau(card, target), STEP_COST));
            }
        }
    }

    fn free_to_foundations(&self, successors: &mut Vec<Successor>) {
        for (idx, &card) in self.free_cells.iter().enumerate() {
            if self.accepts(card) {
                let mut next = self.with_free_cells(self.free_cells_without(idx));
                next.foundations[card.suit().index()] += 1;
                successors.push((next, Move::FreeCellToFoundation(card), STEP_COST));
            }
        }
    }

    #[inline]
    fn accepts(&self, card: Card) -> bool {
        self.foundation(card.suit()) + 1 == card.rank()
    }

    fn check_accepts(&self, card: Card) -> Result<(), InvalidMove> {
        if self.accepts(card) {
            Ok(())
        } else {
            Err(InvalidMove::new(card, "its foundation is not ready for it"))
        }
    }

    fn free_cell_position(&self, card: Card) -> Result<usize, InvalidMove> {
        self.free_cells
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| InvalidMove::new(card, "it is not in a free cell"))
    }

    fn free_cells_without(&self, idx: usize) -> FreeCells {
        let mut free_cells = self.free_cells.clone();
        free_cells.remove(idx);
        free_cells
    }

    fn insert_free_cell(&mut self, card: Card) {
        let idx = self.free_cells.partition_point(|&c| c < card);
        self.free_cells.insert(idx, card);
    }

    fn with_tableau(&self, tableau: Tableau) -> Self {
        FreeCellState {
            foundations: self.foundations,
            free_cells: self.free_cells.clone(),
            tableau,
        }
    }

    fn with_free_cells(&self, free_cells: FreeCells) -> Self {
        FreeCellState {
            foundations: self.foundations,
            free_cells,
            tableau: self.tableau.clone(),
        }
    }
}
