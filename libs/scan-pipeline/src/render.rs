//! Presentation buckets derived from a suitability score. Pure derivation;
//! the received result is never mutated.

/// Tier boundaries: 80 and above is excellent, 50 and above moderate,
/// anything below is a poor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Moderate,
    Poor,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Excellent
        } else if score >= 50.0 {
            ScoreTier::Moderate
        } else {
            ScoreTier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "EXCELLENT",
            ScoreTier::Moderate => "MODERATE",
            ScoreTier::Poor => "POOR MATCH",
        }
    }
}

/// Score as displayed, rounded to the nearest integer.
pub fn rounded_score(score: f64) -> i64 {
    score.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_scores_land_in_their_tiers() {
        assert_eq!(ScoreTier::from_score(85.0), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(55.0), ScoreTier::Moderate);
        assert_eq!(ScoreTier::from_score(20.0), ScoreTier::Poor);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(ScoreTier::from_score(80.0), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(79.9), ScoreTier::Moderate);
        assert_eq!(ScoreTier::from_score(50.0), ScoreTier::Moderate);
        assert_eq!(ScoreTier::from_score(49.9), ScoreTier::Poor);
        assert_eq!(ScoreTier::from_score(0.0), ScoreTier::Poor);
        assert_eq!(ScoreTier::from_score(100.0), ScoreTier::Excellent);
    }

    #[test]
    fn labels_match_display_copy() {
        assert_eq!(ScoreTier::Excellent.label(), "EXCELLENT");
        assert_eq!(ScoreTier::Moderate.label(), "MODERATE");
        assert_eq!(ScoreTier::Poor.label(), "POOR MATCH");
    }

    #[test]
    fn displayed_score_is_rounded() {
        assert_eq!(rounded_score(84.6), 85);
        assert_eq!(rounded_score(84.4), 84);
    }
}
