use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::reviews::{MAX_RATING, MAX_TEXT_LEN, MIN_RATING};

/// Aggregates over every review of a hero, independent of pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    /// Arithmetic mean rounded to 2 decimals; 0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: u64,
    /// Keys "1".."5", always all present.
    pub rating_distribution: BTreeMap<String, u64>,
}

impl ReviewStats {
    /// Builds stats from `(rating, count)` rows. Ratings outside 1..=5 are
    /// ignored; the store never holds them.
    #[must_use]
    pub fn from_counts(rows: &[(i32, i64)]) -> Self {
        let mut rating_distribution: BTreeMap<String, u64> = (MIN_RATING..=MAX_RATING)
            .map(|star| (star.to_string(), 0))
            .collect();

        let mut total: u64 = 0;
        let mut sum: u64 = 0;

        for &(rating, count) in rows {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                continue;
            }
            let count = u64::try_from(count).unwrap_or(0);
            *rating_distribution.entry(rating.to_string()).or_insert(0) += count;
            total += count;
            sum += u64::from(rating.unsigned_abs()) * count;
        }

        Self {
            average_rating: round2(sum, total),
            total_reviews: total,
            rating_distribution,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn round2(sum: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mean = sum as f64 / total as f64;
    (mean * 100.0).round() / 100.0
}

pub fn validate_rating(rating: i32) -> Result<i32, String> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        ))
    }
}

/// Trims the text and rejects empty or oversized reviews.
pub fn normalize_review_text(text: &str) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Review text cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(format!(
            "Review text must be {MAX_TEXT_LEN} characters or less"
        ));
    }
    Ok(trimmed.to_string())
}
