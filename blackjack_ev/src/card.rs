//! Card ranks and their text notation.
//!
//! A rank is an integer in `[1, 13]`: 1 is an Ace, 11 to 13 are J, Q and K. Notation typed by
//! a user is mapped onto blackjack values, so `10`, `J`, `Q` and `K` all become 10.

use crate::{Error, Result};

static FACE_VALUE_TO_BLACKJACK_VALUE: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// Returns the blackjack value of a rank, with faces counted as 10 and the Ace as 1.
///
/// Panics if the rank is not in `[1, 13]`.
pub fn blackjack_value(rank: u8) -> u8 {
    FACE_VALUE_TO_BLACKJACK_VALUE[(rank - 1) as usize]
}

/// Parses one card token, ignoring case and surrounding whitespace.
pub fn parse_card(token: &str) -> Result<u8> {
    let rank = match token.trim().to_ascii_uppercase().as_str() {
        "A" => 1,
        "2" => 2,
        "3" => 3,
        "4" => 4,
        "5" => 5,
        "6" => 6,
        "7" => 7,
        "8" => 8,
        "9" => 9,
        "10" | "T" | "J" | "Q" | "K" => 10,
        _ => return Err(Error::InvalidCard(String::from(token))),
    };
    Ok(rank)
}

/// Parses a sequence of tokens, failing on the first unrecognized one.
pub fn parse_cards<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<u8>> {
    tokens.iter().map(|token| parse_card(token.as_ref())).collect()
}

pub fn notation(rank: u8) -> char {
    match rank {
        1 => 'A',
        2 => '2',
        3 => '3',
        4 => '4',
        5 => '5',
        6 => '6',
        7 => '7',
        8 => '8',
        9 => '9',
        10 => 'T',
        11 => 'J',
        12 => 'Q',
        13 => 'K',
        _ => '?',
    }
}
