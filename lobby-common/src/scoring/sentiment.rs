//! Keyword-based sentiment analysis for campaign comments
//!
//! Matches whole words from hardcoded positive/negative lists against a
//! lowercased token stream. Score is (positive - negative) / total matches,
//! in [-1, 1].

use serde::{Deserialize, Serialize};

/// Score at or above which a comment is labeled positive; negated for negative
const LABEL_THRESHOLD: f64 = 0.25;

const POSITIVE_WORDS: &[&str] = &[
    "love", "loved", "great", "amazing", "awesome", "excellent", "fantastic",
    "good", "best", "want", "need", "excited", "yes", "please", "perfect",
    "wonderful", "brilliant", "support", "hope", "finally",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate", "hated", "bad", "terrible", "awful", "horrible", "worst",
    "disappointed", "disappointing", "no", "never", "useless", "broken",
    "waste", "scam", "overpriced", "ugly", "boring", "pointless", "wrong",
];

/// Sentiment classification of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Result of sentiment analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentResult {
    /// (positive_hits - negative_hits) / total_hits, 0.0 when no hits
    pub score: f64,
    pub label: SentimentLabel,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

/// Analyze the sentiment of a piece of text
///
/// Tokens are split on non-alphabetic characters and matched whole-word,
/// case-insensitively.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    let mut positive_hits = 0usize;
    let mut negative_hits = 0usize;

    for token in text
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
    {
        let lower = token.to_lowercase();
        if POSITIVE_WORDS.contains(&lower.as_str()) {
            positive_hits += 1;
        } else if NEGATIVE_WORDS.contains(&lower.as_str()) {
            negative_hits += 1;
        }
    }

    let total = positive_hits + negative_hits;
    let score = if total == 0 {
        0.0
    } else {
        (positive_hits as f64 - negative_hits as f64) / total as f64
    };

    let label = if score >= LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if score <= -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentResult {
        score,
        label,
        positive_hits,
        negative_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_neutral() {
        let result = analyze_sentiment("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_no_keywords_is_neutral() {
        let result = analyze_sentiment("the quick brown fox jumps over the lazy dog");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_positive_text() {
        let result = analyze_sentiment("I love this, it would be amazing. Please make it!");
        assert_eq!(result.positive_hits, 3);
        assert_eq!(result.negative_hits, 0);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_negative_text() {
        let result = analyze_sentiment("Terrible idea, the worst. Total waste.");
        assert_eq!(result.negative_hits, 3);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_mixed_text_near_zero_is_neutral() {
        let result = analyze_sentiment("good idea but terrible execution");
        assert_eq!(result.positive_hits, 1);
        assert_eq!(result.negative_hits, 1);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_label_threshold_boundary() {
        // 5 positive, 3 negative: score = 2/8 = 0.25 -> positive (inclusive)
        let result =
            analyze_sentiment("love great amazing good best bad awful terrible");
        assert_eq!(result.positive_hits, 5);
        assert_eq!(result.negative_hits, 3);
        assert!((result.score - 0.25).abs() < 1e-9);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let result = analyze_sentiment("LOVE it! AMAZING!!!");
        assert_eq!(result.positive_hits, 2);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_whole_word_only() {
        // "goodness" and "wanton" must not match "good"/"want"
        let result = analyze_sentiment("goodness wanton");
        assert_eq!(result.positive_hits, 0);
        assert_eq!(result.negative_hits, 0);
    }

    #[test]
    fn test_punctuation_stripped() {
        let result = analyze_sentiment("love, love... love!");
        assert_eq!(result.positive_hits, 3);
    }
}
