// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Analysis and distribution reports.
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use cribbage_eval::{
    Analysis, DiscardAnalysis, Draw, Hand, Tally,
    distribution::NUM_HAND_SCORES,
    tally::{MAX_SCORE, MIN_SCORE},
};

/// How discards are ranked in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    /// Enumeration order.
    #[default]
    None,
    /// Highest mean first when the crib is mine.
    Mine,
    /// Highest mean first when the crib is the opponent's.
    Theirs,
}

/// Report options.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Print the mine and theirs tallies under each discard.
    pub show_tallies: bool,
    /// Discards ranking.
    pub sort: SortBy,
    /// Print JSON instead of text.
    pub json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    hand: Hand,
    draw: Draw,
    discards: Vec<&'a DiscardAnalysis>,
}

/// Writes the analysis of a hand.
pub fn write_analysis<W: Write>(
    w: &mut W,
    analysis: &Analysis,
    opts: &ReportOptions,
) -> Result<()> {
    let discards = sorted_discards(analysis, opts.sort);

    if opts.json {
        let report = JsonReport {
            hand: analysis.hand,
            draw: analysis.draw,
            discards,
        };

        serde_json::to_writer(&mut *w, &report)?;
        writeln!(w)?;
        return Ok(());
    }

    writeln!(w, "[ {} ]", analysis.hand)?;
    for d in discards {
        writeln!(w, "{} [{}] [{}]", d.discard, d.mine, d.theirs)?;
        if opts.show_tallies {
            write_tallies(w, d)?;
        }
    }
    writeln!(w)?;

    Ok(())
}

fn sorted_discards(analysis: &Analysis, sort: SortBy) -> Vec<&DiscardAnalysis> {
    let mut discards = analysis.discards.iter().collect::<Vec<_>>();
    match sort {
        SortBy::None => {}
        SortBy::Mine => discards.sort_by(|a, b| b.mine.mean.total_cmp(&a.mine.mean)),
        SortBy::Theirs => discards.sort_by(|a, b| b.theirs.mean.total_cmp(&a.theirs.mean)),
    }

    discards
}

const LABEL_WIDTH: usize = 8;
const COUNT_WIDTH: usize = 6;

fn write_tallies<W: Write>(w: &mut W, d: &DiscardAnalysis) -> Result<()> {
    write!(w, "{:>LABEL_WIDTH$}", "")?;
    for score in MIN_SCORE..=MAX_SCORE {
        write!(w, "{score:>COUNT_WIDTH$}")?;
    }
    writeln!(w)?;

    write_tally(w, "mine", &d.mine_tally)?;
    write_tally(w, "theirs", &d.theirs_tally)?;

    Ok(())
}

fn write_tally<W: Write>(w: &mut W, label: &str, tally: &Tally) -> Result<()> {
    write!(w, "{label:>LABEL_WIDTH$}")?;
    for score in MIN_SCORE..=MAX_SCORE {
        match tally.count(score) {
            0 => write!(w, "{:>COUNT_WIDTH$}", "")?,
            count => write!(w, "{count:>COUNT_WIDTH$}")?,
        }
    }
    writeln!(w)?;

    Ok(())
}

/// Writes the hand scores distribution with a percentage bar chart.
pub fn write_distribution<W: Write>(
    w: &mut W,
    counts: &[u64; NUM_HAND_SCORES],
) -> Result<()> {
    let num_hands = counts.iter().sum::<u64>();
    if num_hands == 0 {
        writeln!(w, "   {num_hands:8}")?;
        return Ok(());
    }

    for (score, &count) in counts.iter().enumerate() {
        let perc = count as f64 * 100.0 / num_hands as f64;
        let bar = "|".repeat((4.0 * perc).round() as usize);
        writeln!(w, "{score:2} {count:8} {perc:6.2}% {bar}")?;
    }
    writeln!(w, "   {num_hands:8} 100.00%")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cribbage_eval::{Analyzer, AnalyzerConfig};

    fn analysis() -> Analysis {
        let hand = "5H 5C 5S JD 5D 4C".parse::<Hand>().unwrap();
        Analyzer::new(AnalyzerConfig {
            draw: Draw::Triples,
            tasks: 1,
        })
        .analyze(hand)
    }

    fn report(analysis: &Analysis, opts: &ReportOptions) -> String {
        let mut out = Vec::new();
        write_analysis(&mut out, analysis, opts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_report() {
        let analysis = analysis();
        let text = report(&analysis, &ReportOptions::default());
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "[ 5S 5D JD 4C 5C 5H ]");
        assert!(lines[16].is_empty());

        for (line, d) in lines[1..16].iter().zip(&analysis.discards) {
            let expected = format!("{} [{}] [{}]", d.discard, d.mine, d.theirs);
            assert_eq!(*line, expected);
        }

        // The first discard is the two lowest cards.
        assert!(lines[1].starts_with("5S 5D ["));
    }

    #[test]
    fn sorted_report() {
        let analysis = analysis();

        let mine = sorted_discards(&analysis, SortBy::Mine);
        assert_eq!(mine.len(), 15);
        assert!(mine.windows(2).all(|w| w[0].mine.mean >= w[1].mine.mean));

        let theirs = sorted_discards(&analysis, SortBy::Theirs);
        assert!(theirs.windows(2).all(|w| w[0].theirs.mean >= w[1].theirs.mean));

        // Keeping the four fives wins whoever owns the crib.
        let best = "5S 5D 5C 5H".parse::<Hand>().unwrap();
        assert_eq!(mine[0].keep, best);
        assert_eq!(theirs[0].keep, best);
    }

    #[test]
    fn tallies_report() {
        let analysis = analysis();
        let opts = ReportOptions {
            show_tallies: true,
            ..Default::default()
        };

        let text = report(&analysis, &opts);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1 + 15 * 4 + 1);

        let width = LABEL_WIDTH + COUNT_WIDTH * (MAX_SCORE - MIN_SCORE + 1) as usize;
        assert_eq!(lines[2].len(), width);
        assert!(lines[2].trim_start().starts_with("-29"));
        assert!(lines[2].ends_with("53"));
        assert!(lines[3].trim_start().starts_with("mine"));
        assert!(lines[4].trim_start().starts_with("theirs"));
    }

    #[test]
    fn json_report() {
        let analysis = analysis();
        let opts = ReportOptions {
            json: true,
            sort: SortBy::Mine,
            ..Default::default()
        };

        let text = report(&analysis, &opts);
        let json = serde_json::from_str::<serde_json::Value>(&text).unwrap();

        assert_eq!(json["hand"], "5S 5D JD 4C 5C 5H");
        assert_eq!(json["draw"], "Triples");

        let discards = json["discards"].as_array().unwrap();
        assert_eq!(discards.len(), 15);
        assert_eq!(discards[0]["keep"], "5S 5D 5C 5H");
        assert_eq!(discards[0]["hands"], 15180);
    }

    #[test]
    fn distribution_report() {
        let mut counts = [0; NUM_HAND_SCORES];
        counts[0] = 3;
        counts[2] = 1;

        let mut out = Vec::new();
        write_distribution(&mut out, &counts).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), NUM_HAND_SCORES + 1);
        assert_eq!(lines[0], format!(" 0        3  75.00% {}", "|".repeat(300)));
        assert_eq!(lines[1], " 1        0   0.00% ");
        assert_eq!(lines[2], format!(" 2        1  25.00% {}", "|".repeat(100)));
        assert_eq!(lines[NUM_HAND_SCORES], "          4 100.00%");
    }
}
