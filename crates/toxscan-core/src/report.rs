//! Report data derived from an [`Analysis`].
//!
//! These types carry numbers only. Rendering to a terminal, text file or
//! CSV happens in the CLI.

use schemars::JsonSchema;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::dictionary::{Severity, ToxicTerm};
use crate::metrics;

/// Width of a percentage bar in characters.
pub const BAR_WIDTH: usize = 10;

/// Hits for one severity level.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeverityLevel {
    /// The level.
    pub severity: Severity,
    /// What the level covers.
    pub category: &'static str,
    /// Total occurrences of terms at this level.
    pub occurrences: usize,
    /// Distinct terms at this level that occurred.
    pub unique_terms: usize,
    /// Share of all occurrences, in percent; absent when nothing was found.
    pub percent: Option<f64>,
}

/// Occurrences and distinct terms per severity.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeverityBreakdown {
    /// Severe first, mild last.
    pub levels: Vec<SeverityLevel>,
    /// Sum of occurrences across levels.
    pub total_occurrences: usize,
    /// Sum of distinct terms across levels.
    pub total_unique: usize,
}

impl SeverityBreakdown {
    /// Tally single-word hits by severity. Terms with a zero count are
    /// ignored.
    pub fn from_terms(hits: &[ToxicTerm]) -> Self {
        let mut levels: Vec<SeverityLevel> = Severity::ALL
            .iter()
            .rev()
            .map(|&severity| {
                let matching = hits.iter().filter(|t| t.severity == severity && t.count > 0);
                SeverityLevel {
                    severity,
                    category: severity.category(),
                    occurrences: matching.clone().map(|t| t.count).sum(),
                    unique_terms: matching.count(),
                    percent: None,
                }
            })
            .collect();

        let total_occurrences = levels.iter().map(|l| l.occurrences).sum();
        let total_unique = levels.iter().map(|l| l.unique_terms).sum();
        if total_occurrences > 0 {
            for level in &mut levels {
                level.percent = Some(metrics::percentage(level.occurrences, total_occurrences));
            }
        }

        Self {
            levels,
            total_occurrences,
            total_unique,
        }
    }

    /// Stats for one level.
    pub fn level(&self, severity: Severity) -> Option<&SeverityLevel> {
        self.levels.iter().find(|l| l.severity == severity)
    }
}

/// A `#`/`-` bar of [`BAR_WIDTH`] characters filled in proportion to
/// `percent` (0-100).
pub fn percent_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).floor() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(BAR_WIDTH - filled));
    bar
}

/// The `n` hits with the highest counts. Ties keep their input order.
pub fn top_toxic_terms(hits: &[ToxicTerm], n: usize) -> Vec<ToxicTerm> {
    let mut ranked: Vec<ToxicTerm> = hits.iter().filter(|t| t.count > 0).cloned().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// One bar of the toxic term chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ChartBar {
    /// The term.
    pub label: String,
    /// Occurrences.
    pub count: usize,
}

/// Bars for toxic words and phrases, each ordered by count descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ToxicChart {
    /// Single-word bars.
    pub words: Vec<ChartBar>,
    /// Phrase bars.
    pub phrases: Vec<ChartBar>,
}

impl ToxicChart {
    /// Build the chart from an analysis's hits.
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            words: bars(&analysis.toxic_words),
            phrases: bars(&analysis.toxic_phrases),
        }
    }

    /// True when nothing toxic was found.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.phrases.is_empty()
    }
}

fn bars(hits: &[ToxicTerm]) -> Vec<ChartBar> {
    top_toxic_terms(hits, usize::MAX)
        .into_iter()
        .map(|t| ChartBar {
            label: t.term,
            count: t.count,
        })
        .collect()
}
