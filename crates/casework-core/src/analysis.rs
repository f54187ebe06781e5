//! Suspect probability assessment from linked evidence.
//!
//! Each link shifts the odds of involvement by a likelihood ratio derived
//! from its signed weight: `1 + w` for supporting evidence and `1 / (1 - w)`
//! for conflicting evidence. Links with zero weight are ignored.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::models::{EvidenceLink, MatchStatus, Suspect};

pub const ASSESSMENT_METHOD: &str = "Bayesian evidence analysis";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityAssessment {
    pub suspect_id: String,
    pub suspect_name: String,
    pub hypothesis: String,
    /// Posterior probability rounded to three decimals
    pub probability_score: f64,
    /// "lower-upper" with two decimals, e.g. "0.65-0.95"
    pub confidence_interval: String,
    pub assessment_method: String,
    pub factors_considered: String,
    pub supporting_evidence_ids: Vec<String>,
    pub conflicting_evidence_ids: Vec<String>,
    pub evidence_count: usize,
    pub supporting_count: usize,
    pub conflicting_count: usize,
}

/// Posterior probability after applying every link to `prior`
pub fn bayesian_probability(links: &[EvidenceLink], prior: f64) -> f64 {
    links.iter().fold(prior, |p, link| {
        let weight = link.weight();
        if weight == 0.0 {
            return p;
        }
        let ratio = if weight > 0.0 {
            1.0 + weight
        } else {
            1.0 / (1.0 - weight)
        };
        (p * ratio) / (p * ratio + (1.0 - p))
    })
}

/// Bounds around `probability`, narrower the more evidence there is
pub fn confidence_interval(probability: f64, evidence_count: usize) -> (f64, f64) {
    let margin = match evidence_count {
        0..=1 => 0.3,
        2..=3 => 0.2,
        4..=6 => 0.15,
        7..=10 => 0.1,
        _ => 0.05,
    };
    ((probability - margin).max(0.0), (probability + margin).min(1.0))
}

/// Sentence summary of what drove the assessment
pub fn key_factors(links: &[EvidenceLink]) -> String {
    let mut factors = Vec::new();

    if !links.is_empty() {
        let noun = if links.len() == 1 { "piece" } else { "pieces" };
        factors.push(format!("Analysis based on {} {} of evidence", links.len(), noun));
    }

    let count = |status: MatchStatus| links.iter().filter(|l| l.match_status == status).count();
    let matches = count(MatchStatus::Match);
    let partial = count(MatchStatus::PartialMatch);
    let conflicting = count(MatchStatus::NoMatch);

    if matches > 0 {
        factors.push(format!("{} direct match{}", matches, plural(matches, "es")));
    }
    if partial > 0 {
        factors.push(format!("{} partial match{}", partial, plural(partial, "es")));
    }
    if conflicting > 0 {
        factors.push(format!("{} conflicting item{}", conflicting, plural(conflicting, "s")));
    }

    if let Some((kind, n)) = predominant_type(links) {
        if n >= 3 && n * 2 >= links.len() {
            factors.push(format!("Predominantly {} evidence ({} items)", kind, n));
        }
    }

    if factors.is_empty() {
        "Insufficient evidence for detailed factor analysis.".to_string()
    } else {
        format!("{}.", factors.join(". "))
    }
}

fn plural(n: usize, suffix: &'static str) -> &'static str {
    if n == 1 {
        ""
    } else {
        suffix
    }
}

/// Most frequent evidence type; ties go to the type seen first
fn predominant_type(links: &[EvidenceLink]) -> Option<(&str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for kind in links.iter().filter_map(|l| l.evidence_type.as_deref()) {
        let n = counts.entry(kind).or_insert(0);
        if *n == 0 {
            order.push(kind);
        }
        *n += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for kind in order {
        let n = counts[kind];
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((kind, n));
        }
    }
    best
}

pub fn hypothesis(name: &str, probability: f64) -> String {
    if probability >= 0.9 {
        format!("Evidence strongly indicates {} was involved in the crime", name)
    } else if probability >= 0.75 {
        format!("Evidence substantially supports {}'s involvement in the crime", name)
    } else if probability >= 0.6 {
        format!("Evidence suggests {} may have been involved in the crime", name)
    } else if probability >= 0.4 {
        format!("Evidence is inconclusive regarding {}'s involvement", name)
    } else if probability >= 0.25 {
        format!("Evidence provides limited support for {}'s non-involvement", name)
    } else if probability >= 0.1 {
        format!("Evidence substantially indicates {} was not involved", name)
    } else {
        format!("Evidence strongly suggests {} was not involved in the crime", name)
    }
}

/// Assessment of one suspect; `None` when nothing links them to evidence
pub fn assess_suspect(suspect: &Suspect, prior: f64) -> Option<ProbabilityAssessment> {
    let links = &suspect.evidence_links;
    if links.is_empty() {
        return None;
    }

    let probability = bayesian_probability(links, prior);
    let (lower, upper) = confidence_interval(probability, links.len());
    let ids = |keep: fn(&MatchStatus) -> bool| -> Vec<String> {
        links
            .iter()
            .filter(|l| keep(&l.match_status))
            .map(|l| l.evidence_id.clone())
            .collect()
    };
    let supporting = ids(MatchStatus::is_supporting);
    let conflicting = ids(MatchStatus::is_conflicting);

    Some(ProbabilityAssessment {
        suspect_id: suspect.id.clone(),
        suspect_name: suspect.name.clone(),
        hypothesis: hypothesis(&suspect.name, probability),
        probability_score: (probability * 1000.0).round() / 1000.0,
        confidence_interval: format!("{:.2}-{:.2}", lower, upper),
        assessment_method: ASSESSMENT_METHOD.to_string(),
        factors_considered: key_factors(links),
        supporting_count: supporting.len(),
        conflicting_count: conflicting.len(),
        supporting_evidence_ids: supporting,
        conflicting_evidence_ids: conflicting,
        evidence_count: links.len(),
    })
}

/// Assess every suspect with evidence, most probable first.
///
/// Fails with `ValidationFailed` unless `prior` lies in `[0, 1]`.
pub fn suspect_probabilities(
    suspects: &[Suspect],
    prior: f64,
) -> CoreResult<Vec<ProbabilityAssessment>> {
    if !(0.0..=1.0).contains(&prior) {
        return Err(CoreError::ValidationFailed(format!(
            "prior probability must be between 0 and 1, got {}",
            prior
        )));
    }

    let mut assessments: Vec<_> = suspects
        .iter()
        .filter_map(|suspect| assess_suspect(suspect, prior))
        .collect();
    assessments.sort_by(|a, b| b.probability_score.total_cmp(&a.probability_score));

    tracing::debug!(
        suspects = suspects.len(),
        assessed = assessments.len(),
        prior,
        "calculated suspect probabilities"
    );
    Ok(assessments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvidenceReliability;
    use crate::seed;

    fn link(id: &str, kind: &str, status: MatchStatus, reliability: EvidenceReliability) -> EvidenceLink {
        EvidenceLink {
            evidence_id: id.to_string(),
            evidence_type: Some(kind.to_string()),
            match_status: status,
            reliability,
            confidence_pct: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_single_match_raises_odds() {
        let links = [link("ev-1", "physical", MatchStatus::Match, EvidenceReliability::High)];
        assert!(close(bayesian_probability(&links, 0.5), 0.9 / 1.4));
    }

    #[test]
    fn test_conflicting_evidence_lowers_odds() {
        let links = [
            link("ev-1", "physical", MatchStatus::Match, EvidenceReliability::High),
            link("ev-2", "digital", MatchStatus::NoMatch, EvidenceReliability::High),
        ];
        // odds 1.8 * 0.625
        assert!(close(bayesian_probability(&links, 0.5), 1.125 / 2.125));
        assert!(close(bayesian_probability(&links[1..], 0.5), 0.3125 / 0.8125));
    }

    #[test]
    fn test_zero_weight_and_extreme_priors_are_fixed_points() {
        let links = [link("ev-1", "trace", MatchStatus::Inconclusive, EvidenceReliability::High)];
        assert_eq!(bayesian_probability(&links, 0.37), 0.37);

        let strong = [link("ev-1", "trace", MatchStatus::Match, EvidenceReliability::High)];
        assert_eq!(bayesian_probability(&strong, 0.0), 0.0);
        assert_eq!(bayesian_probability(&strong, 1.0), 1.0);
    }

    #[test]
    fn test_interval_narrows_and_clamps() {
        assert_eq!(confidence_interval(0.5, 1), (0.2, 0.8));
        let (lower, upper) = confidence_interval(0.95, 5);
        assert!(close(lower, 0.8));
        assert_eq!(upper, 1.0);
        assert_eq!(confidence_interval(0.02, 12).0, 0.0);
    }

    #[test]
    fn test_hypothesis_thresholds() {
        assert!(hypothesis("Ann", 0.9).starts_with("Evidence strongly indicates Ann"));
        assert!(hypothesis("Ann", 0.6).starts_with("Evidence suggests Ann"));
        assert!(hypothesis("Ann", 0.5).starts_with("Evidence is inconclusive"));
        assert!(hypothesis("Ann", 0.09).starts_with("Evidence strongly suggests Ann was not"));
    }

    #[test]
    fn test_key_factors() {
        let links = [
            link("ev-1", "physical", MatchStatus::Match, EvidenceReliability::High),
            link("ev-2", "physical", MatchStatus::Match, EvidenceReliability::High),
            link("ev-3", "physical", MatchStatus::NoMatch, EvidenceReliability::Low),
            link("ev-4", "digital", MatchStatus::PartialMatch, EvidenceReliability::Low),
        ];
        assert_eq!(
            key_factors(&links),
            "Analysis based on 4 pieces of evidence. 2 direct matches. 1 partial match. \
             1 conflicting item. Predominantly physical evidence (3 items)."
        );
        assert_eq!(
            key_factors(&[]),
            "Insufficient evidence for detailed factor analysis."
        );
    }

    #[test]
    fn test_seed_case_ranking() {
        let suspects: Vec<_> = seed::suspects()
            .unwrap()
            .into_iter()
            .filter(|s| s.case_id == "case-003")
            .collect();
        let result = suspect_probabilities(&suspects, 0.5).unwrap();

        assert_eq!(result.len(), 2);
        let top = &result[0];
        assert_eq!(top.suspect_id, "suspect-005");
        assert!(close(top.probability_score, 0.88));
        assert_eq!(top.confidence_interval, "0.73-1.00");
        assert_eq!(top.supporting_count, 4);
        assert_eq!(top.conflicting_count, 0);
        assert!(top.hypothesis.contains("substantially supports Michael Thompson's"));
        assert!(top.factors_considered.ends_with("Predominantly physical evidence (3 items)."));

        let witness = &result[1];
        assert_eq!(witness.suspect_id, "suspect-006");
        assert_eq!(witness.probability_score, 0.5);
        assert_eq!(witness.conflicting_evidence_ids, vec!["ev-2025-052".to_string()]);
        assert_eq!(witness.confidence_interval, "0.20-0.80");
    }

    #[test]
    fn test_unlinked_suspects_skipped_and_prior_checked() {
        let suspects: Vec<_> = seed::suspects()
            .unwrap()
            .into_iter()
            .filter(|s| s.case_id == "case-001")
            .collect();
        let result = suspect_probabilities(&suspects, 0.5).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].suspect_id, "suspect-001");
        assert!(close(result[0].probability_score, 0.617));

        assert!(matches!(
            suspect_probabilities(&suspects, 1.5),
            Err(CoreError::ValidationFailed(_))
        ));
        assert!(suspect_probabilities(&suspects, f64::NAN).is_err());
    }
}
