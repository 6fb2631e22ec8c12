// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel subsets iteration.
use std::thread;

use super::{Hand, nck};

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
fn nth_ksubset(mut n: usize, k: usize) -> [usize; 7] {
    assert!(k <= 7);

    let mut out = [0; 7];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c = c.saturating_sub(1);
        out[k] = c;

        n = n.saturating_sub(nck(c, k + 1));
    }

    out
}

/// Calls the given closure for count k-subsets starting from the nth ksubset.
fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    // Algorithm L from TAOCP 4a
    let mut c = vec![0usize; k + 3];

    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut counter = 1;
    loop {
        f(&c[1..=k]);

        counter += 1;
        if counter > count {
            break;
        }

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}

impl Hand {
    /// Parallel for each choice, calls the `f` closure for each k-cards
    /// subset of this hand.
    ///
    /// The closure takes an usize that is the task identifier (0..num_tasks)
    /// so that tasks can accumulate into their own state, and the subset.
    /// Each subset is visited exactly once by exactly one task.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn par_for_each_choice<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, Hand) + Send + Sync,
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        let cards = self.cards();
        if k > cards.len() {
            return;
        }

        let n = cards.len();
        let num_hands = nck(n, k);
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id * hands_per_task;
                if start >= num_hands {
                    break;
                }

                let (f, cards) = (&f, &cards);
                s.spawn(move || {
                    for_each_ksubset(n, k, start, hands_per_task, |p| {
                        let hand = p.iter().fold(Hand::new(), |h, &pos| h.with(cards[pos]));
                        f(task_id, hand);
                    });
                });
            }
        });
    }
}
