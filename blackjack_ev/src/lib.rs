pub mod aggregation;
pub mod card;
mod error;
pub mod selector;
pub mod simulation;

use std::time::Duration;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;

pub use aggregation::ActionSummary;
pub use error::{Error, Result};
pub use selector::{evaluate, evaluate_notation, legal_actions, Evaluation};
pub use simulation::hand::{hand_value, Hand};

/// Table settings and knobs of the Monte Carlo run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub number_of_decks: u8,
    pub trials_per_action: u64,
    /// 0 means one thread per available core.
    pub number_of_threads: usize,
    /// Master seed. A random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    /// Wall-clock bound of a whole evaluation.
    pub time_limit: Option<Duration>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            number_of_decks: 6,
            trials_per_action: 100_000,
            number_of_threads: 0,
            seed: None,
            time_limit: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.number_of_decks == 0 {
            return Err(Error::Config(String::from(
                "number_of_decks must be a positive integer",
            )));
        }
        if self.trials_per_action == 0 {
            return Err(Error::Config(String::from(
                "trials_per_action must be a positive integer",
            )));
        }
        Ok(())
    }

    /// Resolves the configured thread count, falling back to the available parallelism.
    pub fn resolved_number_of_threads(&self) -> usize {
        if self.number_of_threads == 0 {
            match std::thread::available_parallelism() {
                Ok(n) => n.get(),
                Err(_) => 1,
            }
        } else {
            self.number_of_threads
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Stand,
    Hit,
    Split,
    Double,
}

impl Action {
    /// Whether the action may be taken on the given starting hand. Splitting needs a pair,
    /// doubling needs a total of exactly 10 or 11.
    pub fn is_legal(&self, hand: &Hand) -> bool {
        match self {
            Action::Stand | Action::Hit => true,
            Action::Split => hand.is_pair(),
            Action::Double => matches!(hand.value(), 10 | 11),
        }
    }
}

/// The player's starting hand and the dealer's up card.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialSituation {
    hand: Hand,
    dealer_up_card: u8,
}

impl InitialSituation {
    pub fn new(hand: Hand, dealer_up_card: u8) -> Result<Self> {
        if dealer_up_card == 0 || dealer_up_card > 13 {
            return Err(Error::InvalidHand(format!(
                "dealer up card {} must be in [1, 13]",
                dealer_up_card
            )));
        }
        if hand.len() < 2 {
            return Err(Error::InvalidHand(format!(
                "starting hand {} needs at least 2 cards",
                hand
            )));
        }
        if let Some(rank) = hand.cards().iter().find(|rank| **rank == 0 || **rank > 13) {
            return Err(Error::InvalidHand(format!(
                "card rank {} must be in [1, 13]",
                rank
            )));
        }
        if hand.is_bust() {
            return Err(Error::InvalidHand(format!(
                "starting hand {} is already bust",
                hand
            )));
        }
        Ok(Self {
            hand,
            dealer_up_card,
        })
    }

    /// Builds the situation from card notation such as `["A", "8"]` and `"6"`.
    pub fn from_notation<S: AsRef<str>>(hand: &[S], dealer_up_card: &str) -> Result<Self> {
        let cards = card::parse_cards(hand)?;
        let dealer_up_card = card::parse_card(dealer_up_card)?;
        Self::new(Hand::from_cards(&cards), dealer_up_card)
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn dealer_up_card(&self) -> u8 {
        self.dealer_up_card
    }
}

impl std::fmt::Display for InitialSituation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) vs dealer {}",
            self.hand,
            self.hand.value(),
            card::notation(self.dealer_up_card)
        )
    }
}
