use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::aggregation::{self, ActionSummary};
use crate::{Action, Hand, InitialSituation, Result, SimulationConfig};

/// Summaries of every legal action, keyed in the order stand, hit, split, double.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Master seed that reproduces this evaluation with the same thread and trial counts.
    pub seed: u64,
    pub results: BTreeMap<Action, ActionSummary>,
}

/// Stand and hit are always allowed. Split needs a pair, double a total of 10 or 11.
pub fn legal_actions(hand: &Hand) -> Vec<Action> {
    Action::iter().filter(|action| action.is_legal(hand)).collect()
}

pub fn evaluate(situation: &InitialSituation, config: &SimulationConfig) -> Result<Evaluation> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let actions = legal_actions(situation.hand());
    log::info!(
        "Evaluating {} with {:?} ({} trials each, {} decks, seed {})",
        situation,
        actions,
        config.trials_per_action,
        config.number_of_decks,
        seed
    );

    let deadline = config.time_limit.map(|limit| Instant::now() + limit);
    let mut seeds = StdRng::seed_from_u64(seed);
    let mut results = BTreeMap::new();
    for action in actions {
        let summary = aggregation::run(situation, action, config, seeds.gen(), deadline)?;
        log::debug!(
            "{}: EV {:.4}, win {:.4}, lose {:.4}, push {:.4} over {} trials",
            action,
            summary.ev,
            summary.win,
            summary.lose,
            summary.push,
            summary.trials
        );
        results.insert(action, summary);
    }

    Ok(Evaluation { seed, results })
}

/// Parses card notation and evaluates the resulting situation.
pub fn evaluate_notation<S: AsRef<str>>(
    hand: &[S],
    dealer_up_card: &str,
    config: &SimulationConfig,
) -> Result<Evaluation> {
    let situation = InitialSituation::from_notation(hand, dealer_up_card)?;
    evaluate(&situation, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card::parse_cards, Error};

    fn config(trials_per_action: u64) -> SimulationConfig {
        SimulationConfig {
            trials_per_action,
            number_of_threads: 2,
            seed: Some(2024),
            ..Default::default()
        }
    }

    fn hand(tokens: &[&str]) -> Hand {
        Hand::from_cards(&parse_cards(tokens).unwrap())
    }

    #[test]
    fn stand_and_hit_are_always_legal() {
        assert_eq!(
            legal_actions(&hand(&["A", "8"])),
            vec![Action::Stand, Action::Hit]
        );
        assert_eq!(
            legal_actions(&hand(&["2", "3", "4", "5"])),
            vec![Action::Stand, Action::Hit]
        );
    }

    #[test]
    fn split_needs_a_pair_after_mapping() {
        assert_eq!(
            legal_actions(&hand(&["10", "K"])),
            vec![Action::Stand, Action::Hit, Action::Split]
        );
        assert_eq!(
            legal_actions(&hand(&["A", "A"])),
            vec![Action::Stand, Action::Hit, Action::Split]
        );
        assert!(!legal_actions(&hand(&["9", "8"])).contains(&Action::Split));
    }

    #[test]
    fn double_needs_ten_or_eleven() {
        assert_eq!(
            legal_actions(&hand(&["5", "5"])),
            vec![Action::Stand, Action::Hit, Action::Split, Action::Double]
        );
        assert_eq!(
            legal_actions(&hand(&["4", "7"])),
            vec![Action::Stand, Action::Hit, Action::Double]
        );
        assert!(!legal_actions(&hand(&["3", "6"])).contains(&Action::Double));
        assert!(!legal_actions(&hand(&["6", "6"])).contains(&Action::Double));
    }

    #[test]
    fn evaluates_every_legal_action() {
        let evaluation = evaluate_notation(&["5", "5"], "6", &config(2_000)).unwrap();
        assert_eq!(evaluation.seed, 2024);
        let actions: Vec<Action> = evaluation.results.keys().copied().collect();
        assert_eq!(
            actions,
            vec![Action::Stand, Action::Hit, Action::Split, Action::Double]
        );
        for summary in evaluation.results.values() {
            assert_eq!(summary.trials, 2_000);
            assert!((summary.win + summary.lose + summary.push - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn soft_19_against_6_stands_well() {
        let evaluation = evaluate_notation(&["A", "8"], "6", &config(40_000)).unwrap();
        let stand = evaluation.results[&Action::Stand];
        // The dealer busts or ends on 17 or 18 about 70% of the time, so EV is near +0.5.
        assert!(stand.ev > 0.35 && stand.ev < 0.65, "EV {}", stand.ev);
        assert!(stand.win > stand.lose);
        assert!((stand.win + stand.lose + stand.push - 1.0).abs() < 1e-9);
    }

    #[test]
    fn doubling_eleven_beats_hitting_it_in_bet_units() {
        let evaluation = evaluate_notation(&["6", "5"], "6", &config(40_000)).unwrap();
        let hit = evaluation.results[&Action::Hit];
        let double = evaluation.results[&Action::Double];
        assert!(hit.ev > 0.0);
        assert!(double.ev > hit.ev);
    }

    #[test]
    fn fixed_seed_reproduces_evaluation() {
        let a = evaluate_notation(&["8", "8"], "10", &config(3_000)).unwrap();
        let b = evaluate_notation(&["8", "8"], "10", &config(3_000)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_input_runs_nothing() {
        assert_eq!(
            evaluate_notation(&["A", "8"], "X", &config(1_000)),
            Err(Error::InvalidCard(String::from("X")))
        );
        assert!(matches!(
            evaluate_notation(&["A", "8"], "6", &config(0)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn serializes_to_the_output_record() {
        let evaluation = evaluate_notation(&["10", "7"], "9", &config(500)).unwrap();
        let json = serde_json::to_value(&evaluation).unwrap();
        let stand = &json["results"]["stand"];
        assert!(stand["EV"].is_number());
        assert!(stand["win"].is_number());
        assert!(json["results"].get("split").is_none());
    }
}
