//! The ordering search: sample column permutations, score candidate trees
//! built from sampled events, keep the cheapest prefix.
//!
//! A producer streams permutations into a rendezvous channel; a small fixed
//! pool of workers pulls from it. Shared state is the seen-prefix set and the
//! best-so-far tuple, behind one mutex. Critical sections hold no I/O and no
//! tree construction. Which prefixes get tried depends on scheduling, so two
//! runs may pick different winners of equal cost; the final rebuild is
//! deterministic given the winning order.

use std::collections::HashSet;
use std::thread;

use crossbeam_channel::bounded;
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strata_core::{ColumnRanges, ConstraintSet, Error, Event, GenConfig, Level, Result};

use crate::cost::{access_cost, size_cost, CostKind};
use crate::permute;

/// The winning prefix ordering and its cost.
///
/// `level` is the candidate tree the winner was scored on. It was built from
/// a sample of the events; callers wanting the real tree rebuild it from the
/// full batch (see [`generate`](crate::generate::generate)).
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub order: Vec<String>,
    pub cost: u64,
    pub level: Option<Level>,
}

struct Shared {
    seen_prefixes: HashSet<Vec<String>>,
    best_cost: u64,
    best_level: Option<Level>,
    best_order: Vec<String>,
}

/// Search prefix orderings of `columns` and return the cheapest one found.
pub fn search_orderings(
    events: &[Event],
    constraint_sets: &[ConstraintSet],
    columns: &[String],
    ranges: &ColumnRanges,
    kind: CostKind,
    config: &GenConfig,
) -> Result<SearchOutcome> {
    let permutation_count: f64 = (1..=columns.len()).map(|i| i as f64).product();
    // Ratios above 1 mean "always keep".
    let keep_probability = config.ordering_sample_target / permutation_count;
    let sample_probability = config.event_sample_target / events.len().max(1) as f64;
    let events_scale = events.len() as f64 / config.event_sample_target;

    let shared = Mutex::new(Shared {
        seen_prefixes: HashSet::new(),
        best_cost: u64::MAX,
        best_level: None,
        best_order: Vec::new(),
    });

    let (tx, rx) = bounded::<Vec<String>>(0);

    thread::scope(|scope| -> Result<()> {
        let producer = {
            let columns = columns.to_vec();
            scope.spawn(move || {
                permute::emit_permutations(columns, &mut |p| tx.send(p).is_ok());
            })
        };

        let mut workers = Vec::new();
        for worker in 0..config.workers.max(1) {
            let rx = rx.clone();
            let shared = &shared;
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
                None => StdRng::from_entropy(),
            };
            workers.push(scope.spawn(move || -> Result<()> {
                'permutations: while let Ok(permutation) = rx.recv() {
                    if rng.gen::<f64>() > keep_probability {
                        continue;
                    }
                    for len in 1..=permutation.len() {
                        let prefix = &permutation[..len];

                        if !shared.lock().seen_prefixes.insert(prefix.to_vec()) {
                            continue;
                        }

                        if kind == CostKind::Access
                            && !constraint_sets.iter().any(|cs| cs.constrains(&prefix[0]))
                        {
                            // No query constrains the first column: the cost
                            // would be trivially zero and uninformative.
                            continue;
                        }

                        let mut level = Level::default();
                        for event in events {
                            if rng.gen::<f64>() > sample_probability {
                                continue;
                            }
                            level.push(event.clone(), prefix, ranges)?;
                        }
                        level.trim();

                        let cost = match kind {
                            CostKind::Access => constraint_sets
                                .iter()
                                .map(|cs| access_cost(&level, cs, events_scale))
                                .sum(),
                            CostKind::Size => size_cost(&level)?,
                        };
                        debug!("search: cost {} for column order {:?}", cost, prefix);

                        let mut best = shared.lock();
                        if cost < best.best_cost {
                            best.best_cost = cost;
                            best.best_level = Some(level);
                            best.best_order = prefix.to_vec();
                        } else {
                            // Extending a non-improving prefix rarely helps.
                            continue 'permutations;
                        }
                    }
                }
                Ok(())
            }));
        }
        drop(rx);

        let mut first_error = None;
        for handle in workers {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => first_error = first_error.or(Some(e)),
                Err(_) => {
                    first_error =
                        first_error.or(Some(Error::Invariant("search worker panicked".into())))
                }
            }
        }
        if producer.join().is_err() {
            first_error =
                first_error.or(Some(Error::Invariant("permutation producer panicked".into())));
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    })?;

    let shared = shared.into_inner();
    Ok(SearchOutcome {
        order: shared.best_order,
        cost: shared.best_cost,
        level: shared.best_level,
    })
}
