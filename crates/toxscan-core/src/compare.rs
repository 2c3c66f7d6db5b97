//! Side-by-side comparison of two analyses.

use schemars::JsonSchema;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::error::CompareError;

/// One of the two comparison slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum Slot {
    /// First source.
    A,
    /// Second source.
    B,
}

/// Holds up to two results for comparison.
///
/// A slot only changes when a new result is stored in it; callers store
/// after a successful analysis, so failures leave the previous result.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSlots {
    a: AnalysisResult,
    b: AnalysisResult,
}

impl ComparisonSlots {
    /// Replace the result in `slot`.
    pub fn store(&mut self, slot: Slot, result: AnalysisResult) {
        match slot {
            Slot::A => self.a = result,
            Slot::B => self.b = result,
        }
    }

    /// The result in `slot`; not loaded until something is stored.
    pub const fn get(&self, slot: Slot) -> &AnalysisResult {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    /// Compare A against B.
    pub fn compare(&self) -> Result<ComparisonReport, CompareError> {
        compare(&self.a, &self.b)
    }
}

/// Metrics included in a comparison, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Words after filtering.
    TotalWords,
    /// Unique words.
    UniqueWords,
    /// Toxic share of words, in percent.
    ToxicRatio,
    /// Unique over total words.
    LexicalDiversity,
    /// Mean word length.
    AverageWordLength,
    /// Words per sentence.
    AverageSentenceLength,
    /// Toxic hits.
    ToxicOccurrences,
}

impl Metric {
    /// Human-readable heading.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalWords => "Total Words",
            Self::UniqueWords => "Unique Words",
            Self::ToxicRatio => "Toxic Content Ratio",
            Self::LexicalDiversity => "Lexical Diversity Index",
            Self::AverageWordLength => "Average Word Length",
            Self::AverageSentenceLength => "Average Sentence Length",
            Self::ToxicOccurrences => "Toxic Word Occurrences",
        }
    }

    /// True for integer counts, which also get a percentage difference.
    pub const fn is_count(self) -> bool {
        matches!(self, Self::TotalWords | Self::UniqueWords | Self::ToxicOccurrences)
    }
}

/// Which side has the larger value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    /// A is larger.
    A,
    /// B is larger.
    B,
    /// Both are equal.
    Equal,
}

/// One metric of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct MetricDelta {
    /// The metric.
    pub metric: Metric,
    /// Value for A.
    pub a: f64,
    /// Value for B.
    pub b: f64,
    /// `a - b`.
    pub difference: f64,
    /// `|a - b|` as a percentage of B, for counts. Zero when B is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_of_b: Option<f64>,
    /// The larger side.
    pub leader: Leader,
}

impl MetricDelta {
    fn new(metric: Metric, a: f64, b: f64) -> Self {
        let difference = a - b;
        let leader = if difference > 0.0 {
            Leader::A
        } else if difference < 0.0 {
            Leader::B
        } else {
            Leader::Equal
        };
        let percent_of_b = metric
            .is_count()
            .then(|| if b > 0.0 { difference.abs() / b * 100.0 } else { 0.0 });
        Self {
            metric,
            a,
            b,
            difference,
            percent_of_b,
            leader,
        }
    }
}

/// Comparison of two loaded results.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ComparisonReport {
    /// Source A.
    pub a: AnalysisResult,
    /// Source B.
    pub b: AnalysisResult,
    /// Per-metric deltas.
    pub metrics: Vec<MetricDelta>,
}

impl ComparisonReport {
    /// The delta for one metric.
    pub fn metric(&self, metric: Metric) -> Option<&MetricDelta> {
        self.metrics.iter().find(|d| d.metric == metric)
    }
}

/// Compare two results. Both must be loaded.
pub fn compare(a: &AnalysisResult, b: &AnalysisResult) -> Result<ComparisonReport, CompareError> {
    if !a.loaded || !b.loaded {
        return Err(CompareError::NotLoaded {
            a_loaded: a.loaded,
            b_loaded: b.loaded,
        });
    }

    let metrics = vec![
        MetricDelta::new(Metric::TotalWords, a.total_words as f64, b.total_words as f64),
        MetricDelta::new(Metric::UniqueWords, a.unique_words as f64, b.unique_words as f64),
        MetricDelta::new(Metric::ToxicRatio, a.toxic_ratio, b.toxic_ratio),
        MetricDelta::new(Metric::LexicalDiversity, a.lexical_diversity, b.lexical_diversity),
        MetricDelta::new(
            Metric::AverageWordLength,
            a.average_word_length,
            b.average_word_length,
        ),
        MetricDelta::new(
            Metric::AverageSentenceLength,
            a.average_sentence_length,
            b.average_sentence_length,
        ),
        MetricDelta::new(
            Metric::ToxicOccurrences,
            a.toxic_occurrences as f64,
            b.toxic_occurrences as f64,
        ),
    ];

    Ok(ComparisonReport {
        a: a.clone(),
        b: b.clone(),
        metrics,
    })
}
