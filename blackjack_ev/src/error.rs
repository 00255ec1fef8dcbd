use thiserror::Error;

use crate::Action;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid card notation: {0:?}")]
    InvalidCard(String),
    #[error("Invalid hand: {0}")]
    InvalidHand(String),
    #[error("{action} is not allowed on hand {hand}")]
    IllegalAction { action: Action, hand: String },
    #[error("No card of rank {0} left to stack on top of the deck")]
    UnavailableCard(u8),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
