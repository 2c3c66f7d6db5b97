//! Comparison sorts over word lists and frequency tables.
//!
//! Three algorithms share one comparator-driven interface:
//!
//! - **bubble**: adjacent swaps, stable, quadratic.
//! - **quick**: Lomuto partition around the last element. Iterative, and
//!   the smaller side is always handled first so the range stack stays
//!   logarithmic even on sorted input. Not stable.
//! - **merge**: top-down with one auxiliary buffer. Stable.
//!
//! The public entry points sort private copies and leave their input alone.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisOutcome};

/// Available sorting algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortAlgorithm {
    /// Bubble sort.
    Bubble,
    /// Quicksort.
    #[default]
    Quick,
    /// Merge sort.
    Merge,
}

impl SortAlgorithm {
    /// Every algorithm, in benchmark order.
    pub const ALL: [Self; 3] = [Self::Bubble, Self::Quick, Self::Merge];

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Quick => "quick",
            Self::Merge => "merge",
        }
    }
}

impl std::fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency {
    /// The word.
    pub word: String,
    /// Occurrence count.
    pub frequency: usize,
}

/// Sort `items` in place with `algorithm`.
///
/// Only merge sort allocates; its buffer is reserved fallibly.
pub fn sort_by<T, F>(algorithm: SortAlgorithm, items: &mut [T], compare: F) -> AnalysisOutcome<()>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort_by(items, compare),
        SortAlgorithm::Quick => quick_sort_by(items, compare),
        SortAlgorithm::Merge => merge_sort_by(items, compare)?,
    }
    Ok(())
}

/// Bubble sort with early exit when a pass makes no swap.
pub fn bubble_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if compare(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Iterative quicksort with Lomuto partitioning.
pub fn quick_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Half-open ranges still to sort.
    let mut stack = vec![(0, items.len())];
    while let Some((mut lo, mut hi)) = stack.pop() {
        while hi - lo > 1 {
            let p = partition(items, lo, hi, &mut compare);
            if p - lo < hi - (p + 1) {
                stack.push((p + 1, hi));
                hi = p;
            } else {
                stack.push((lo, p));
                lo = p + 1;
            }
        }
    }
}

/// Partition `items[lo..hi]` around `items[hi - 1]`; returns the pivot's
/// final index.
fn partition<T, F>(items: &mut [T], lo: usize, hi: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let pivot = hi - 1;
    let mut store = lo;
    for j in lo..pivot {
        if compare(&items[j], &items[pivot]) == Ordering::Less {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, pivot);
    store
}

/// Stable top-down merge sort.
pub fn merge_sort_by<T, F>(items: &mut [T], mut compare: F) -> AnalysisOutcome<()>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return Ok(());
    }
    let mut aux = Vec::new();
    aux.try_reserve_exact(items.len())
        .map_err(|_| AnalysisError::Allocation {
            what: "merge buffer",
            requested: items.len(),
        })?;
    aux.extend_from_slice(items);
    merge_range(items, &mut aux, &mut compare);
    Ok(())
}

fn merge_range<T, F>(items: &mut [T], aux: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = items.split_at_mut(mid);
        let (aux_left, aux_right) = aux.split_at_mut(mid);
        merge_range(left, aux_left, compare);
        merge_range(right, aux_right, compare);
    }

    aux.clone_from_slice(items);
    let (mut i, mut j) = (0, mid);
    for slot in items.iter_mut() {
        let take_left = j >= len || (i < mid && compare(&aux[i], &aux[j]) != Ordering::Greater);
        if take_left {
            slot.clone_from(&aux[i]);
            i += 1;
        } else {
            slot.clone_from(&aux[j]);
            j += 1;
        }
    }
}

fn private_copy<T: Clone>(items: &[T], what: &'static str) -> AnalysisOutcome<Vec<T>> {
    let mut copy = Vec::new();
    copy.try_reserve_exact(items.len())
        .map_err(|_| AnalysisError::Allocation {
            what,
            requested: items.len(),
        })?;
    copy.extend_from_slice(items);
    Ok(copy)
}

/// Sorted copy of `words`, ascending by bytes.
pub fn sort_words(algorithm: SortAlgorithm, words: &[String]) -> AnalysisOutcome<Vec<String>> {
    let mut sorted = private_copy(words, "word sort buffer")?;
    sort_by(algorithm, &mut sorted, |a, b| a.as_bytes().cmp(b.as_bytes()))?;
    Ok(sorted)
}

/// Sorted copy of `entries`, highest frequency first.
///
/// Ties keep their input order with bubble and merge sort; quicksort
/// makes no such promise.
pub fn sort_by_frequency(
    algorithm: SortAlgorithm,
    entries: &[WordFrequency],
) -> AnalysisOutcome<Vec<WordFrequency>> {
    let mut sorted = private_copy(entries, "frequency sort buffer")?;
    sort_by(algorithm, &mut sorted, |a, b| b.frequency.cmp(&a.frequency))?;
    Ok(sorted)
}

/// Timing of one algorithm in a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct SortRun {
    /// Algorithm measured.
    pub algorithm: SortAlgorithm,
    /// Wall time in seconds.
    pub seconds: f64,
}

impl SortRun {
    fn new(algorithm: SortAlgorithm, elapsed: Duration) -> Self {
        Self {
            algorithm,
            seconds: elapsed.as_secs_f64(),
        }
    }
}

/// Result of running every algorithm over the same words.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SortBenchmark {
    /// Number of words sorted.
    pub items: usize,
    /// One run per algorithm, in [`SortAlgorithm::ALL`] order.
    pub runs: Vec<SortRun>,
    /// The algorithm with the smallest time.
    pub fastest: SortAlgorithm,
    /// Whether all algorithms produced the same output.
    pub identical: bool,
}

/// Sort separate copies of `words` with each algorithm and time them.
#[tracing::instrument(skip_all, fields(words = words.len()))]
pub fn benchmark_words(words: &[String]) -> AnalysisOutcome<SortBenchmark> {
    let mut runs = Vec::with_capacity(SortAlgorithm::ALL.len());
    let mut outputs = Vec::with_capacity(SortAlgorithm::ALL.len());

    for algorithm in SortAlgorithm::ALL {
        let start = Instant::now();
        let sorted = sort_words(algorithm, words)?;
        let run = SortRun::new(algorithm, start.elapsed());
        tracing::debug!(algorithm = %algorithm, seconds = run.seconds, "sort finished");
        runs.push(run);
        outputs.push(sorted);
    }

    let identical = outputs.windows(2).all(|pair| pair[0] == pair[1]);
    let fastest = runs
        .iter()
        .min_by(|a, b| a.seconds.total_cmp(&b.seconds))
        .map_or(SortAlgorithm::default(), |r| r.algorithm);
    Ok(SortBenchmark {
        items: words.len(),
        runs,
        fastest,
        identical,
    })
}
