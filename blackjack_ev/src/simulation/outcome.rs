use rand::Rng;

use super::deck::Deck;
use super::hand::Hand;

/// The dealer stands on any total of at least 17, soft 17 included.
pub const DEALER_STAND_VALUE: u16 = 17;
pub const BLACKJACK_PAYOUT: f64 = 1.5;

/// Plays the dealer's hand from the up card: a hole card, then one card at a time while the
/// total is below 17.
pub fn play_dealer<R: Rng>(dealer_up_card: u8, deck: &mut Deck<R>) -> Hand {
    let mut dealer_hand = Hand::new();
    dealer_hand.receive_card(dealer_up_card);
    dealer_hand.receive_card(deck.draw());
    while dealer_hand.value() < DEALER_STAND_VALUE {
        dealer_hand.receive_card(deck.draw());
    }
    dealer_hand
}

/// Net bet units won by the player once both hands are complete.
///
/// With `blackjack_bonus`, a player natural pays 3:2 unless the dealer holds a natural too.
pub fn settle(player_hand: &Hand, dealer_hand: &Hand, blackjack_bonus: bool) -> f64 {
    if blackjack_bonus && player_hand.is_natural() {
        if dealer_hand.is_natural() {
            return 0.0;
        }
        return BLACKJACK_PAYOUT;
    }

    let player_value = player_hand.value();
    let dealer_value = dealer_hand.value();
    if dealer_value > 21 || player_value > dealer_value {
        1.0
    } else if player_value < dealer_value {
        -1.0
    } else {
        0.0
    }
}

/// Plays the dealer out against a finished player hand and settles the round.
pub fn resolve<R: Rng>(
    player_hand: &Hand,
    dealer_up_card: u8,
    blackjack_bonus: bool,
    deck: &mut Deck<R>,
) -> f64 {
    let dealer_hand = play_dealer(dealer_up_card, deck);
    settle(player_hand, &dealer_hand, blackjack_bonus)
}
