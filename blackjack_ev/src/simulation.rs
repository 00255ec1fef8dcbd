pub mod deck;
pub mod hand;
pub mod outcome;

use rand::Rng;

use crate::Action;

use self::{deck::Deck, hand::Hand, outcome::resolve};

/// Plays one trial of the given action and returns the net bet units won.
///
/// The action must be legal for the hand; callers check this before running trials.
pub fn simulate_trial<R: Rng>(
    action: Action,
    player_hand: &Hand,
    dealer_up_card: u8,
    deck: &mut Deck<R>,
) -> f64 {
    debug_assert!(action.is_legal(player_hand), "{} is illegal", action);
    match action {
        Action::Stand => stand(player_hand, dealer_up_card, deck),
        Action::Hit => hit(player_hand, dealer_up_card, deck),
        Action::Split => split(player_hand, dealer_up_card, deck),
        Action::Double => double(player_hand, dealer_up_card, deck),
    }
}

/// Only standing on the original cards can earn the 3:2 natural payout.
pub fn stand<R: Rng>(player_hand: &Hand, dealer_up_card: u8, deck: &mut Deck<R>) -> f64 {
    resolve(player_hand, dealer_up_card, true, deck)
}

/// Takes exactly one card, then stands.
pub fn hit<R: Rng>(player_hand: &Hand, dealer_up_card: u8, deck: &mut Deck<R>) -> f64 {
    let mut hand = player_hand.clone();
    hand.receive_card(deck.draw());
    if hand.is_bust() {
        return -1.0;
    }
    resolve(&hand, dealer_up_card, false, deck)
}

/// Splits a pair into two hands of one original card and one fresh card each. Both stand and
/// are settled against separate dealer hands. Returns the mean of the two results.
pub fn split<R: Rng>(player_hand: &Hand, dealer_up_card: u8, deck: &mut Deck<R>) -> f64 {
    let cards = player_hand.cards();
    let mut first_hand = Hand::new();
    first_hand.receive_card(cards[0]);
    first_hand.receive_card(deck.draw());
    let mut second_hand = Hand::new();
    second_hand.receive_card(cards[1]);
    second_hand.receive_card(deck.draw());

    let first = resolve(&first_hand, dealer_up_card, false, deck);
    let second = resolve(&second_hand, dealer_up_card, false, deck);
    (first + second) / 2.0
}

/// Doubles the bet and takes exactly one card.
pub fn double<R: Rng>(player_hand: &Hand, dealer_up_card: u8, deck: &mut Deck<R>) -> f64 {
    let mut hand = player_hand.clone();
    hand.receive_card(deck.draw());
    if hand.is_bust() {
        return -2.0;
    }
    2.0 * resolve(&hand, dealer_up_card, false, deck)
}
