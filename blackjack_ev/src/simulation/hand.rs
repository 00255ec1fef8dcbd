use crate::card::{blackjack_value, notation};

/// Computes the best total of the given ranks: the highest total not exceeding 21 if there is
/// one, otherwise the smallest bust total.
///
/// Every Ace first counts as 11 and is demoted to 1 while the total exceeds 21.
pub fn hand_value(cards: &[u8]) -> u16 {
    let mut value: u16 = 0;
    let mut aces = 0;
    for &rank in cards {
        if rank == 1 {
            aces += 1;
            value += 11;
        } else {
            value += blackjack_value(rank) as u16;
        }
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }
    value
}

/// Cards dealt to one party during a single round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    cards: Vec<u8>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(4),
        }
    }

    /// Ranks are not checked here. Scoring a hand holding a rank outside `[1, 13]` panics, so
    /// untrusted input should go through `InitialSituation::new`.
    pub fn from_cards(cards: &[u8]) -> Hand {
        Hand {
            cards: cards.to_vec(),
        }
    }

    /// `card` must be a rank in `[1, 13]`.
    pub fn receive_card(&mut self, card: u8) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[u8] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u16 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Two cards totalling 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Two cards of the same blackjack value, so a ten and a king make a pair.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && blackjack_value(self.cards[0]) == blackjack_value(self.cards[1])
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, &card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", notation(card))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ace_and_ten_is_21() {
        assert_eq!(hand_value(&[1, 10]), 21);
        assert_eq!(hand_value(&[13, 1]), 21);
    }

    #[test]
    fn only_needed_aces_are_demoted() {
        assert_eq!(hand_value(&[1, 1, 9]), 21);
        assert_eq!(hand_value(&[1, 1]), 12);
        assert_eq!(hand_value(&[1, 1, 1, 1]), 14);
        assert_eq!(hand_value(&[1, 6, 10]), 17);
        assert_eq!(hand_value(&[1, 1, 10, 10]), 22);
    }

    #[test]
    fn bust_reports_minimum_total() {
        assert_eq!(hand_value(&[10, 10, 5]), 25);
        assert_eq!(hand_value(&[12, 11, 2]), 22);
    }

    #[test]
    fn value_is_order_independent() {
        let cards = [1, 5, 1, 7, 3];
        let mut reversed = cards;
        reversed.reverse();
        assert_eq!(hand_value(&cards), hand_value(&reversed));
        assert_eq!(hand_value(&cards), 17);
    }

    #[test]
    fn naturals_and_pairs() {
        assert!(Hand::from_cards(&[1, 13]).is_natural());
        assert!(!Hand::from_cards(&[7, 7, 7]).is_natural());
        assert!(Hand::from_cards(&[10, 12]).is_pair());
        assert!(Hand::from_cards(&[8, 8]).is_pair());
        assert!(!Hand::from_cards(&[8, 9]).is_pair());
        assert!(!Hand::from_cards(&[8, 8, 8]).is_pair());
    }

    #[test]
    fn receiving_cards_appends() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        hand.receive_card(10);
        hand.receive_card(6);
        assert!(!hand.is_bust());
        hand.receive_card(13);
        assert_eq!(hand.cards(), &[10, 6, 13]);
        assert!(hand.is_bust());
        assert_eq!(hand.to_string(), "T 6 K");
    }

    #[test]
    #[should_panic]
    fn scoring_an_unchecked_rank_panics() {
        Hand::from_cards(&[0, 6]).value();
    }
}
