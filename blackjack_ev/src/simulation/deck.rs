use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Error, Result};

/// A shoe of `number_of_decks` standard decks, holding card ranks in `[1, 13]`.
///
/// Drawing never fails: an empty deck is refilled and reshuffled before the next draw.
#[derive(Debug, Clone)]
pub struct Deck<R> {
    number_of_decks: u8,
    cards: Vec<u8>,
    counts: [u16; 13],
    current_index: usize,
    cards_dealt: u64,
    rng: R,
}

impl<R: Rng> Deck<R> {
    /// Creates a full deck shuffled with the given random source. A deck count of zero is a
    /// configuration error.
    pub fn new(number_of_decks: u8, rng: R) -> Result<Deck<R>> {
        if number_of_decks == 0 {
            return Err(Error::Config(String::from(
                "number_of_decks must be a positive integer",
            )));
        }
        let mut cards = Vec::with_capacity(number_of_decks as usize * 52);
        for _ in 0..number_of_decks {
            for _ in 0..4 {
                for rank in 1..=13 {
                    cards.push(rank);
                }
            }
        }
        let mut deck = Deck {
            number_of_decks,
            cards,
            counts: [0; 13],
            current_index: 0,
            cards_dealt: 0,
            rng,
        };
        deck.shuffle();
        Ok(deck)
    }

    /// Returns all dealt cards into the deck and shuffles.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.current_index = 0;
        self.counts = [self.number_of_decks as u16 * 4; 13];
    }

    /// Returns all dealt cards into the deck and shuffles, making sure the given ranks come
    /// out first and in order.
    pub fn shuffle_with_firsts(&mut self, firsts: &[u8]) -> Result<()> {
        let mut counts = [self.number_of_decks as u16 * 4; 13];
        for &rank in firsts {
            if rank == 0 || rank > 13 || counts[(rank - 1) as usize] == 0 {
                return Err(Error::UnavailableCard(rank));
            }
            counts[(rank - 1) as usize] -= 1;
        }

        let mut idx = 0;
        for &rank in firsts {
            self.cards[idx] = rank;
            idx += 1;
        }
        for rank in 1..=13u8 {
            for _ in 0..counts[(rank - 1) as usize] {
                self.cards[idx] = rank;
                idx += 1;
            }
        }

        self.cards[firsts.len()..].shuffle(&mut self.rng);
        self.current_index = 0;
        self.counts = [self.number_of_decks as u16 * 4; 13];
        Ok(())
    }

    /// Deals the next card, reshuffling first if the deck is empty.
    pub fn draw(&mut self) -> u8 {
        if self.current_index == self.cards.len() {
            log::trace!(
                "Deck of {} exhausted after {} cards, reshuffling",
                self.number_of_decks,
                self.cards.len()
            );
            self.shuffle();
        }
        let card = self.cards[self.current_index];
        self.current_index += 1;
        self.counts[(card - 1) as usize] -= 1;
        self.cards_dealt += 1;
        card
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.current_index
    }

    /// Number of cards of the given rank still in the deck.
    pub fn remaining_of(&self, rank: u8) -> u16 {
        self.counts[(rank - 1) as usize]
    }

    /// Total number of cards dealt since creation, across reshuffles.
    pub fn cards_dealt(&self) -> u64 {
        self.cards_dealt
    }

    pub fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }
}
