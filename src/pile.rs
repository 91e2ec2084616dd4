use crate::{
    action::{Move, Target},
    card::Card,
    error::{InvalidMove, ParseError},
};

use smallvec::SmallVec;

pub const MAX_PILES: usize = 8;
const PILE_SIZE: usize = 19;

pub type Placements = SmallVec<[(Tableau, Target); MAX_PILES + 1]>;

/// A non-empty stack of cards, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pile {
    cards: SmallVec<[Card; PILE_SIZE]>,
}

impl Pile {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Option<Self> {
        let cards: SmallVec<_> = cards.into_iter().collect();
        if cards.is_empty() {
            None
        } else {
            Some(Pile { cards })
        }
    }

    pub fn single(card: Card) -> Self {
        let mut cards = SmallVec::new();
        cards.push(card);
        Pile { cards }
    }

    #[inline]
    pub fn top(&self) -> Card {
        self.cards[self.cards.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}

/// The playing area. Piles are kept sorted so that two tableaus holding the
/// same piles compare and hash equal whatever order they were built in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tableau {
    piles: SmallVec<[Pile; MAX_PILES]>,
}

impl Tableau {
    pub fn new(piles: impl IntoIterator<Item = Pile>) -> Result<Self, ParseError> {
        let piles: SmallVec<[Pile; MAX_PILES]> = piles.into_iter().collect();
        if piles.len() > MAX_PILES {
            return Err(ParseError::TooManyPiles(piles.len()));
        }
        let mut tableau = Tableau { piles };
        tableau.normalize();
        Ok(tableau)
    }

    /// Builds a tableau from at most [`MAX_PILES`] freshly dealt piles.
    pub(crate) fn dealt(piles: impl IntoIterator<Item = Pile>) -> Self {
        let mut tableau = Tableau {
            piles: piles.into_iter().take(MAX_PILES).collect(),
        };
        tableau.normalize();
        tableau
    }

    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    pub fn len(&self) -> usize {
        self.piles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.piles.len() >= MAX_PILES
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.piles.iter().flat_map(|pile| pile.cards().iter().copied())
    }

    pub fn top_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.piles.iter().map(Pile::top)
    }

    /// Returns the tableau without `card`, dropping its pile if it empties.
    pub fn remove(&self, card: Card) -> Result<Tableau, InvalidMove> {
        Ok(self.lift(card)?.0)
    }

    /// Like [`Tableau::remove`], also returning the card left exposed.
    pub(crate) fn lift(&self, card: Card) -> Result<(Tableau, Option<Card>), InvalidMove> {
        let idx = self
            .position(card)
            .ok_or_else(|| InvalidMove::new(card, "it is not on top of a pile"))?;
        Ok(self.without_top(idx))
    }

    /// Every legal placement of `card`: on each top card it stacks on, and in
    /// a new pile while there is room for one.
    pub fn place(&self, card: Card) -> Placements {
        let mut placements = Placements::new();
        for (idx, pile) in self.piles.iter().enumerate() {
            let top = pile.top();
            if card.stacks_on(top) {
                let mut tableau = self.clone();
                tableau.piles[idx].push(card);
                tableau.normalize();
                placements.push((tableau, Target::Card(top)));
            }
        }
        if !self.is_full() {
            let mut tableau = self.clone();
            tableau.piles.push(Pile::single(card));
            tableau.normalize();
            placements.push((tableau, Target::NewPile));
        }
        placements
    }

    /// Places `card` at one specific target, checking that the placement is legal.
    pub fn place_on(&self, card: Card, target: Target) -> Result<Tableau, InvalidMove> {
        let mut tableau = self.clone();
        match target {
            Target::Card(top) => {
                let idx = self
                    .position(top)
                    .ok_or_else(|| InvalidMove::new(card, "the target is not on top of a pile"))?;
                if !card.stacks_on(top) {
                    return Err(InvalidMove::new(card, "it does not stack on the target"));
                }
                tableau.piles[idx].push(card);
            }
            Target::NewPile => {
                if self.is_full() {
                    return Err(InvalidMove::new(card, "there is no room for a new pile"));
                }
                tableau.piles.push(Pile::single(card));
            }
        }
        tableau.normalize();
        Ok(tableau)
    }

    /// Every relocation of a top card onto another pile or into a new pile.
    /// Moving a lone card into a new pile, or back onto the card it was lifted
    /// from, changes nothing and is left out.
    pub fn internal_moves(&self) -> Vec<(Tableau, Move)> {
        let mut moves = Vec::new();
        for (idx, pile) in self.piles.iter().enumerate() {
            let card = pile.top();
            let (rest, exposed) = self.without_top(idx);
            for (tableau, target) in rest.place(card) {
                let no_op = match target {
                    Target::NewPile => exposed.is_none(),
                    Target::Card(top) => exposed == Some(top),
                };
                if !no_op {
                    moves.push((tableau, Move::TableauToTableau(card, target)));
                }
            }
        }
        moves
    }

    /// Removes the top card of pile `idx`, returning the new tableau and the
    /// card left exposed (`None` when the pile was a singleton and is dropped).
    pub(crate) fn without_top(&self, idx: usize) -> (Tableau, Option<Card>) {
        let mut tableau = self.clone();
        let pile = &mut tableau.piles[idx];
        pile.cards.pop();
        let exposed = pile.cards.last().copied();
        if exposed.is_none() {
            tableau.piles.remove(idx);
        }
        tableau.normalize();
        (tableau, exposed)
    }

    fn position(&self, top: Card) -> Option<usize> {
        self.piles.iter().position(|pile| pile.top() == top)
    }

    fn normalize(&mut self) {
        self.piles.sort_unstable();
    }
}
