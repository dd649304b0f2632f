//! Ranking Aggregator — orders score records and derives read-only summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::screening::attributes::{AttributeBundle, ExperienceCategory};

/// Width of each score-distribution bucket, in percentage points.
const BUCKET_WIDTH: f64 = 10.0;
const BUCKET_COUNT: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One candidate's result. Created once per run and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub candidate_id: String,
    /// Submission position; the tie-break for equal scores.
    pub ordinal: usize,
    /// 0.0 – 100.0, two decimals
    pub score: f64,
    #[serde(flatten)]
    pub attributes: AttributeBundle,
}

/// Score records sorted descending by score, ties in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResultSet(Vec<ScoreRecord>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub candidate_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// In ranked order.
    pub scores: Vec<ScorePoint>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub buckets: Vec<ScoreBucket>,
}

/// Aggregates handed to the reporting layer alongside the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub per_skill_totals: BTreeMap<String, u64>,
    pub score_distribution: ScoreDistribution,
    pub experience_category_counts: BTreeMap<ExperienceCategory, usize>,
    /// Candidate ids of the top `shortlist_size` records.
    pub shortlist: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

impl RankedResultSet {
    /// Sorts descending by score. `sort_by` is stable, and records are first
    /// put in submission order so equal scores keep it.
    pub fn rank(records: Vec<ScoreRecord>) -> Self {
        let mut records = records;
        records.sort_by_key(|r| r.ordinal);
        records.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self(records)
    }

    #[allow(dead_code)]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The best `n` records.
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.0[..n.min(self.0.len())]
    }

    /// Candidate count per experience category; both categories always present.
    pub fn experience_category_counts(&self) -> BTreeMap<ExperienceCategory, usize> {
        let mut counts = BTreeMap::from([
            (ExperienceCategory::Experienced, 0),
            (ExperienceCategory::NotExperienced, 0),
        ]);
        for record in &self.0 {
            *counts.entry(record.attributes.experience_category).or_insert(0) += 1;
        }
        counts
    }

    /// Occurrences of each skill summed over every candidate.
    pub fn per_skill_totals(&self) -> BTreeMap<String, u64> {
        self.0
            .iter()
            .flat_map(|record| record.attributes.skills.iter())
            .fold(BTreeMap::new(), |mut totals, (skill, &count)| {
                *totals.entry(skill.clone()).or_insert(0) += u64::from(count);
                totals
            })
    }

    pub fn score_distribution(&self) -> ScoreDistribution {
        let scores: Vec<ScorePoint> = self
            .0
            .iter()
            .map(|r| ScorePoint {
                candidate_id: r.candidate_id.clone(),
                score: r.score,
            })
            .collect();

        let values: Vec<f64> = self.0.iter().map(|r| r.score).collect();
        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);
        let mean = if values.is_empty() {
            None
        } else {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            Some((mean * 100.0).round() / 100.0)
        };

        ScoreDistribution {
            scores,
            min,
            max,
            mean,
            buckets: bucketize(&values),
        }
    }

    pub fn summary(&self, shortlist_size: usize) -> Summary {
        Summary {
            per_skill_totals: self.per_skill_totals(),
            score_distribution: self.score_distribution(),
            experience_category_counts: self.experience_category_counts(),
            shortlist: self
                .top(shortlist_size)
                .iter()
                .map(|r| r.candidate_id.clone())
                .collect(),
        }
    }
}

/// Ten buckets of width 10: [0,10), [10,20), … [90,100]. 100.0 lands in the last.
fn bucketize(values: &[f64]) -> Vec<ScoreBucket> {
    let mut counts = [0usize; BUCKET_COUNT];
    for &value in values {
        let index = ((value / BUCKET_WIDTH).floor() as usize).min(BUCKET_COUNT - 1);
        counts[index] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ScoreBucket {
            lower: i as f64 * BUCKET_WIDTH,
            upper: (i + 1) as f64 * BUCKET_WIDTH,
            count,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, ordinal: usize, score: f64) -> ScoreRecord {
        record_with(id, ordinal, score, &[("python", 1)], ExperienceCategory::Experienced)
    }

    fn record_with(
        id: &str,
        ordinal: usize,
        score: f64,
        skills: &[(&str, u32)],
        experience: ExperienceCategory,
    ) -> ScoreRecord {
        ScoreRecord {
            candidate_id: id.to_string(),
            ordinal,
            score,
            attributes: AttributeBundle {
                skills: skills.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
                numeric: BTreeMap::new(),
                academic_value: None,
                experience_category: experience,
            },
        }
    }

    fn ids(set: &RankedResultSet) -> Vec<&str> {
        set.records().iter().map(|r| r.candidate_id.as_str()).collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranked = RankedResultSet::rank(vec![
            record("a", 0, 12.5),
            record("b", 1, 99.0),
            record("c", 2, 50.0),
        ]);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_ties_keep_submission_order() {
        let ranked = RankedResultSet::rank(vec![
            record("second", 1, 40.0),
            record("top", 2, 90.0),
            record("first", 0, 40.0),
        ]);
        assert_eq!(ids(&ranked), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_rank_empty() {
        let ranked = RankedResultSet::rank(vec![]);
        assert!(ranked.is_empty());
        assert!(ranked.top(2).is_empty());
        let dist = ranked.score_distribution();
        assert_eq!(dist.min, None);
        assert_eq!(dist.mean, None);
        assert_eq!(dist.buckets.len(), 10);
    }

    #[test]
    fn test_top_is_bounded_by_len() {
        let ranked = RankedResultSet::rank(vec![record("a", 0, 1.0)]);
        assert_eq!(ranked.top(2).len(), 1);
        assert_eq!(ranked.top(0).len(), 0);
    }

    #[test]
    fn test_experience_counts_include_both_categories() {
        let ranked = RankedResultSet::rank(vec![
            record_with("a", 0, 10.0, &[], ExperienceCategory::Experienced),
            record_with("b", 1, 20.0, &[], ExperienceCategory::Experienced),
        ]);
        let counts = ranked.experience_category_counts();
        assert_eq!(counts[&ExperienceCategory::Experienced], 2);
        assert_eq!(counts[&ExperienceCategory::NotExperienced], 0);
    }

    #[test]
    fn test_skill_totals_sum_across_batch() {
        let ranked = RankedResultSet::rank(vec![
            record_with("a", 0, 10.0, &[("python", 2), ("sql", 0)], ExperienceCategory::Experienced),
            record_with("b", 1, 20.0, &[("python", 3), ("sql", 1)], ExperienceCategory::NotExperienced),
        ]);
        let totals = ranked.per_skill_totals();
        assert_eq!(totals["python"], 5);
        assert_eq!(totals["sql"], 1);
    }

    #[test]
    fn test_score_distribution() {
        let ranked = RankedResultSet::rank(vec![
            record("a", 0, 0.0),
            record("b", 1, 81.65),
            record("c", 2, 100.0),
        ]);
        let dist = ranked.score_distribution();
        assert_eq!(dist.min, Some(0.0));
        assert_eq!(dist.max, Some(100.0));
        assert_eq!(dist.mean, Some(60.55));
        assert_eq!(dist.scores[0].candidate_id, "c");
        assert_eq!(dist.buckets[0].count, 1);
        assert_eq!(dist.buckets[8].count, 1);
        assert_eq!(dist.buckets[9].count, 1);
        assert_eq!(dist.buckets.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_summary_does_not_mutate_ranking() {
        let ranked = RankedResultSet::rank(vec![record("a", 0, 5.0), record("b", 1, 6.0)]);
        let before = ranked.clone();
        let summary = ranked.summary(1);
        assert_eq!(summary.shortlist, vec!["b"]);
        assert_eq!(ranked, before);
    }

    #[test]
    fn test_record_serializes_flat() {
        let json = serde_json::to_value(record("a", 0, 42.0)).unwrap();
        assert_eq!(json["candidate_id"], "a");
        assert_eq!(json["skills"]["python"], 1);
        assert!(json["academic_value"].is_null());
        assert_eq!(json["experience_category"], "Experienced");
    }
}
