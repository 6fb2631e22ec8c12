// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cribbage discard analyzer CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use std::io::{self, Write};

use cribbage_cards::{Deck, Hand};
use cribbage_eval::{Analyzer, AnalyzerConfig, Draw, distribution};

mod report;
use report::{ReportOptions, SortBy};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Logging verbosity, -v for debug and -vv for trace.
    #[clap(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze the discards of one or more six cards hands.
    Analyze {
        /// Hands to analyze, for example "5H 5C 5S JD 5D 4C" or 5h5c5sjd5d4c.
        #[clap(required = true)]
        hands: Vec<String>,
        #[command(flatten)]
        opts: AnalyzeArgs,
    },
    /// Deal random six cards hands and analyze their discards.
    Random {
        /// Number of hands to deal.
        #[clap(long, short, default_value_t = 1)]
        count: usize,
        /// Seed for repeatable deals.
        #[clap(long, short)]
        seed: Option<u64>,
        #[command(flatten)]
        opts: AnalyzeArgs,
    },
    /// Print the score distribution of every four cards hand with a cut.
    Distribution {
        /// Number of threads.
        #[clap(long, short, default_value_t = 1)]
        tasks: usize,
    },
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// How the opponent discards and the cut are drawn.
    #[clap(long, short, value_enum, default_value_t = DrawArg::PairThenCut)]
    draw: DrawArg,
    /// Number of threads used for each discard.
    #[clap(long, short, default_value_t = 1)]
    tasks: usize,
    /// Print the score tallies of each discard.
    #[clap(long)]
    show_tallies: bool,
    /// Rank the discards by their mean score.
    #[clap(long, value_enum, default_value_t = SortBy::None)]
    sort: SortBy,
    /// Print the analysis as JSON.
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DrawArg {
    /// Every opponent pair then every cut, 45540 outcomes.
    PairThenCut,
    /// Every three cards, one fixed card of each is the cut, 15180 outcomes.
    Triples,
}

impl From<DrawArg> for Draw {
    fn from(arg: DrawArg) -> Self {
        match arg {
            DrawArg::PairThenCut => Draw::PairThenCut,
            DrawArg::Triples => Draw::Triples,
        }
    }
}

impl AnalyzeArgs {
    fn analyzer(&self) -> Analyzer {
        Analyzer::new(AnalyzerConfig {
            draw: self.draw.into(),
            tasks: self.tasks,
        })
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            show_tallies: self.show_tallies,
            sort: self.sort,
            json: self.json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let mut out = io::stdout().lock();

    match cli.command {
        Command::Analyze { hands, opts } => {
            // Parse all hands before starting any analysis.
            let hands = hands
                .iter()
                .map(|text| parse_hand(text))
                .collect::<Result<Vec<_>>>()?;

            analyze_hands(&mut out, &hands, &opts)?;
        }
        Command::Random { count, seed, opts } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let mut hands = Vec::with_capacity(count);
            for _ in 0..count {
                let mut deck = Deck::new_and_shuffled(&mut rng);
                match deck.deal_hand(6) {
                    Some(hand) => hands.push(hand),
                    None => bail!("Not enough cards to deal a hand"),
                }
            }

            analyze_hands(&mut out, &hands, &opts)?;
        }
        Command::Distribution { tasks } => {
            let counts = if tasks > 1 {
                distribution::par_hand_score_counts(tasks)
            } else {
                distribution::hand_score_counts()
            };

            report::write_distribution(&mut out, &counts)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Parses a cribbage hand, it must have six cards.
fn parse_hand(text: &str) -> Result<Hand> {
    let hand = text.parse::<Hand>()?;
    if hand.size() != 6 {
        bail!(
            "Hand '{text}' has {} cards, a cribbage hand must have 6 cards",
            hand.size()
        );
    }

    Ok(hand)
}

fn analyze_hands<W: Write>(w: &mut W, hands: &[Hand], opts: &AnalyzeArgs) -> Result<()> {
    let analyzer = opts.analyzer();
    let report_opts = opts.report_options();

    for &hand in hands {
        let analysis = analyzer.analyze(hand);
        report::write_analysis(w, &analysis, &report_opts)?;
    }

    info!("Analyzed {} hands", hands.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cli() {
        let cli = Cli::try_parse_from([
            "cribbage",
            "-vv",
            "analyze",
            "--draw",
            "triples",
            "--tasks",
            "4",
            "--sort",
            "mine",
            "5H 5C 5S JD 5D 4C",
            "ah2s3c5djhkd",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Analyze { hands, opts } = cli.command else {
            panic!("Expected analyze command");
        };

        assert_eq!(hands.len(), 2);
        assert!(matches!(opts.draw, DrawArg::Triples));
        assert_eq!(opts.tasks, 4);
        assert_eq!(opts.sort, SortBy::Mine);
        assert!(!opts.show_tallies);
        assert!(!opts.json);
    }

    #[test]
    fn parse_cli_defaults() {
        let cli = Cli::try_parse_from(["cribbage", "random", "--seed", "7"]).unwrap();
        let Command::Random { count, seed, opts } = cli.command else {
            panic!("Expected random command");
        };

        assert_eq!(count, 1);
        assert_eq!(seed, Some(7));
        assert_eq!(opts.analyzer().config().draw, Draw::PairThenCut);
        assert_eq!(opts.analyzer().config().tasks, 1);

        assert!(Cli::try_parse_from(["cribbage", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["cribbage", "analyze", "--draw", "all", "AS"]).is_err());
    }

    #[test]
    fn parse_hand_size() {
        assert_eq!(parse_hand("5H 5C 5S JD 5D 4C").unwrap().size(), 6);
        assert_eq!(parse_hand("5h-5c-5s-jd-5d-4c").unwrap().size(), 6);

        let err = parse_hand("5H 5C 5S JD 5D").unwrap_err();
        assert!(err.to_string().contains("has 5 cards"));

        let err = parse_hand("5H 5C 5S JD 5D 4C 3C").unwrap_err();
        assert!(err.to_string().contains("has 7 cards"));

        let err = parse_hand("5H 5C 5S JD 5D 4").unwrap_err();
        assert!(err.to_string().contains("malformed hand"));

        let err = parse_hand("5H 5C 5S JD 5D 5D").unwrap_err();
        assert!(err.to_string().contains("duplicate card"));
    }

    #[test]
    fn random_hands_are_repeatable() {
        let deal = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut deck = Deck::new_and_shuffled(&mut rng);
            deck.deal_hand(6).unwrap()
        };

        assert_eq!(deal(42), deal(42));
        assert_eq!(deal(42).size(), 6);
    }
}
