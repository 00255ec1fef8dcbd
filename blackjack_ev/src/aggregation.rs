use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::simulation::{deck::Deck, simulate_trial};
use crate::{Action, Error, InitialSituation, Result, SimulationConfig};

/// Workers look at the clock once per this many trials.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// EV and outcome frequencies of one action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSummary {
    #[serde(rename = "EV")]
    pub ev: f64,
    pub win: f64,
    pub lose: f64,
    pub push: f64,
    /// Trials actually run, fewer than configured only when the time limit was hit.
    pub trials: u64,
}

/// Running sums of one worker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    trials: u64,
    total: f64,
    win: u64,
    lose: u64,
    push: u64,
}

impl Tally {
    fn record(&mut self, result: f64) {
        self.trials += 1;
        self.total += result;
        if result > 0.0 {
            self.win += 1;
        } else if result < 0.0 {
            self.lose += 1;
        } else {
            self.push += 1;
        }
    }

    fn merge(&mut self, other: &Tally) {
        self.trials += other.trials;
        self.total += other.total;
        self.win += other.win;
        self.lose += other.lose;
        self.push += other.push;
    }

    fn summary(&self) -> ActionSummary {
        let n = self.trials as f64;
        ActionSummary {
            ev: self.total / n,
            win: self.win as f64 / n,
            lose: self.lose as f64 / n,
            push: self.push as f64 / n,
            trials: self.trials,
        }
    }
}

/// Runs `config.trials_per_action` independent trials of `action`, each on a freshly shuffled
/// deck.
///
/// Trials are spread over worker threads. Worker `i` draws from a `StdRng` seeded with
/// `seed + i`, so a fixed seed and thread count reproduce the result exactly. Workers stop
/// early once `deadline` has passed.
pub fn run(
    situation: &InitialSituation,
    action: Action,
    config: &SimulationConfig,
    seed: u64,
    deadline: Option<Instant>,
) -> Result<ActionSummary> {
    config.validate()?;
    let hand = situation.hand();
    if !action.is_legal(hand) {
        return Err(Error::IllegalAction {
            action,
            hand: hand.to_string(),
        });
    }

    let trials = config.trials_per_action;
    let number_of_threads = (config.resolved_number_of_threads() as u64).clamp(1, trials);
    let per_thread = trials / number_of_threads;
    let extra = trials % number_of_threads;

    let tally = std::thread::scope(|scope| -> Result<Tally> {
        let workers: Vec<_> = (0..number_of_threads)
            .map(|worker| {
                let quota = per_thread + u64::from(worker < extra);
                let rng = StdRng::seed_from_u64(seed.wrapping_add(worker));
                scope.spawn(move || {
                    run_worker(situation, action, config.number_of_decks, quota, rng, deadline)
                })
            })
            .collect();

        let mut tally = Tally::default();
        for worker in workers {
            match worker.join() {
                Ok(partial) => tally.merge(&partial?),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(tally)
    })?;

    if tally.trials < trials {
        log::warn!(
            "Time limit reached: {} ran {} of {} trials",
            action,
            tally.trials,
            trials
        );
    }
    Ok(tally.summary())
}

fn run_worker(
    situation: &InitialSituation,
    action: Action,
    number_of_decks: u8,
    quota: u64,
    rng: StdRng,
    deadline: Option<Instant>,
) -> Result<Tally> {
    let mut deck = Deck::new(number_of_decks, rng)?;
    let mut tally = Tally::default();
    for i in 0..quota {
        if i > 0 && i % DEADLINE_CHECK_INTERVAL == 0 {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    break;
                }
            }
        }
        deck.shuffle();
        let result = simulate_trial(
            action,
            situation.hand(),
            situation.dealer_up_card(),
            &mut deck,
        );
        tally.record(result);
    }
    Ok(tally)
}
