// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example score_all
// ...
// Total hands      12994800
// ```

use std::time::Instant;

use cribbage_eval::distribution::hand_score_counts;

fn main() {
    // Score all 13M hands with their cut.
    let now = Instant::now();
    let counts = hand_score_counts();

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for (score, count) in counts.iter().enumerate() {
        println!("{score:2} {count:>10}");
    }
}
