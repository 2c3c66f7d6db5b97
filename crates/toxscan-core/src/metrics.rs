//! Linguistic metrics. Every function returns `0.0` on a zero denominator.

/// Mean token length in bytes.
pub fn average_word_length<S: AsRef<str>>(tokens: &[S]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let chars: usize = tokens.iter().map(|t| t.as_ref().len()).sum();
    chars as f64 / tokens.len() as f64
}

/// Words per sentence.
pub fn average_sentence_length(words: usize, sentences: usize) -> f64 {
    ratio(words, sentences)
}

/// Unique words over total words.
pub fn lexical_diversity(unique: usize, words: usize) -> f64 {
    ratio(unique, words)
}

/// Toxic and non-toxic shares of all words, as percentages.
///
/// Both are `0.0` for an empty corpus; otherwise they sum to 100.
pub fn toxicity_ratios(toxic: usize, words: usize) -> (f64, f64) {
    if words == 0 {
        return (0.0, 0.0);
    }
    let toxic_ratio = ratio(toxic, words) * 100.0;
    (toxic_ratio, 100.0 - toxic_ratio)
}

/// `part` as a percentage of `whole`.
pub fn percentage(part: usize, whole: usize) -> f64 {
    ratio(part, whole) * 100.0
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
