use serde::Serialize;

/// One labelled slice of a headcount distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBucket {
    pub label: String,
    pub count: u32,
    pub percentage: u32,
}

/// Rounded integer percentage with the divide-by-zero guard used across all
/// dashboard metrics: an empty denominator yields 0, never NaN or infinity.
pub fn percent_of(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// Source of role/experience/seniority/skill/bench-aging distributions.
///
/// The backend does not yet expose these aggregates, so the default
/// implementation fabricates them from fixed proportions. Swap in a real
/// implementation once the corresponding endpoints exist; nothing outside
/// this trait treats the ratios as a business rule.
pub trait BreakdownProvider: Send + Sync {
    fn role_distribution(&self, total: u32) -> Vec<CountBucket>;
    fn experience_distribution(&self, total: u32) -> Vec<CountBucket>;
    fn seniority_distribution(&self, total: u32) -> Vec<CountBucket>;
    fn skill_distribution(&self, total: u32) -> Vec<CountBucket>;
    fn bench_aging(&self, bench_total: u32) -> Vec<CountBucket>;
}

/// Placeholder distributions from documented fixed proportions.
pub struct StaticRatioBreakdowns;

const ROLE_RATIOS: &[(&str, f64)] = &[
    ("Senior Engineer", 0.3),
    ("Software Engineer", 0.4),
    ("Junior Engineer", 0.2),
    ("Others", 0.1),
];

const EXPERIENCE_RATIOS: &[(&str, f64)] = &[
    ("0-2 years", 0.25),
    ("2-5 years", 0.35),
    ("5-8 years", 0.25),
    ("8+ years", 0.15),
];

const SENIORITY_RATIOS: &[(&str, f64)] = &[
    ("Junior", 0.3),
    ("Mid-Level", 0.4),
    ("Senior", 0.2),
    ("Lead", 0.1),
];

const SKILL_RATIOS: &[(&str, f64)] = &[
    ("Software Development", 0.5),
    ("Data Science", 0.3),
    ("Project Management", 0.2),
];

const BENCH_AGING_RATIOS: &[(&str, f64)] = &[
    ("0-30 days", 0.6),
    ("31-60 days", 0.3),
    ("61+ days", 0.1),
];

fn proportional_buckets(total: u32, ratios: &[(&str, f64)]) -> Vec<CountBucket> {
    ratios
        .iter()
        .map(|(label, ratio)| {
            let count = (total as f64 * ratio).floor() as u32;
            CountBucket {
                label: (*label).to_string(),
                count,
                percentage: percent_of(count, total),
            }
        })
        .collect()
}

impl BreakdownProvider for StaticRatioBreakdowns {
    fn role_distribution(&self, total: u32) -> Vec<CountBucket> {
        proportional_buckets(total, ROLE_RATIOS)
    }

    fn experience_distribution(&self, total: u32) -> Vec<CountBucket> {
        proportional_buckets(total, EXPERIENCE_RATIOS)
    }

    fn seniority_distribution(&self, total: u32) -> Vec<CountBucket> {
        proportional_buckets(total, SENIORITY_RATIOS)
    }

    fn skill_distribution(&self, total: u32) -> Vec<CountBucket> {
        proportional_buckets(total, SKILL_RATIOS)
    }

    fn bench_aging(&self, bench_total: u32) -> Vec<CountBucket> {
        proportional_buckets(bench_total, BENCH_AGING_RATIOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(7, 10, 70)]
    #[case(1, 5, 20)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(0, 10, 0)]
    #[case(5, 0, 0)]
    #[case(0, 0, 0)]
    fn test_percent_of(#[case] part: u32, #[case] whole: u32, #[case] expected: u32) {
        assert_eq!(percent_of(part, whole), expected);
    }

    #[test]
    fn test_role_distribution_for_ten_heads() {
        let buckets = StaticRatioBreakdowns.role_distribution(10);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "Senior Engineer");
        assert_eq!(buckets[0].count, 3);
        assert_eq!(buckets[0].percentage, 30);
        assert_eq!(buckets[1].count, 4);
    }

    #[test]
    fn test_zero_headcount_yields_zeroes() {
        for buckets in [
            StaticRatioBreakdowns.role_distribution(0),
            StaticRatioBreakdowns.experience_distribution(0),
            StaticRatioBreakdowns.seniority_distribution(0),
            StaticRatioBreakdowns.skill_distribution(0),
            StaticRatioBreakdowns.bench_aging(0),
        ] {
            assert!(!buckets.is_empty());
            assert!(buckets.iter().all(|b| b.count == 0 && b.percentage == 0));
        }
    }
}
