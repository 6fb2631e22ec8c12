// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --features=parallel --example par_analyze
// ```

use std::time::Instant;

use cribbage_eval::*;

fn main() {
    const NUM_TASKS: usize = 4;

    let hand = Hand::from_iter([
        Card::new(Rank::Five, Suit::Hearts),
        Card::new(Rank::Five, Suit::Clubs),
        Card::new(Rank::Five, Suit::Spades),
        Card::new(Rank::Jack, Suit::Diamonds),
        Card::new(Rank::Five, Suit::Diamonds),
        Card::new(Rank::Four, Suit::Clubs),
    ]);

    for tasks in [1, NUM_TASKS] {
        let analyzer = Analyzer::new(AnalyzerConfig {
            draw: Draw::PairThenCut,
            tasks,
        });

        let now = Instant::now();
        let analysis = analyzer.analyze(hand);
        let elapsed = now.elapsed().as_secs_f64();

        let total = analysis.discards.iter().map(|d| d.hands).sum::<u64>();
        println!("Tasks:           {tasks}");
        println!("Total hands      {total}");
        println!("Elapsed:         {:.3}s", elapsed);
        println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);
    }
}
