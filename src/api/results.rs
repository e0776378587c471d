//! Analysis results and reporting structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::DocOracleError;
use crate::model::equivalence::EquivalenceMatch;

/// What one member's analysis produced.
///
/// `matches` holds every sentence already analyzed, even when a collaborator
/// failure (`error`) stopped the member part-way.
#[derive(Debug)]
pub struct MemberOutcome {
    pub matches: Vec<EquivalenceMatch>,
    pub error: Option<DocOracleError>,
}

impl MemberOutcome {
    /// Outcome of a member whose sentences were all analyzed
    pub fn completed(matches: Vec<EquivalenceMatch>) -> Self {
        Self {
            matches,
            error: None,
        }
    }

    /// Outcome of a member stopped by `error` after `matches`
    pub fn failed(matches: Vec<EquivalenceMatch>, error: DocOracleError) -> Self {
        Self {
            matches,
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-member entry of an analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberReport {
    /// `Type#name(T1, T2)`
    pub signature: String,

    /// One record per retained sentence, in sentence order
    pub matches: Vec<EquivalenceMatch>,

    /// Collaborator failure that stopped this member, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MemberReport {
    /// Report entry for `signature` built from its outcome
    pub fn from_outcome(signature: String, outcome: MemberOutcome) -> Self {
        Self {
            signature,
            matches: outcome.matches,
            error: outcome.error.map(|e| e.to_string()),
        }
    }

    /// Oracles that survived validation
    pub fn oracles(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().filter_map(EquivalenceMatch::oracle)
    }
}

/// Counts over a whole report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Documented members analyzed
    pub members: usize,

    /// Members stopped by a collaborator failure
    pub failed_members: usize,

    /// Sentences retained after segmentation
    pub sentences: usize,

    /// Sentences declaring an equivalence
    pub detected: usize,

    /// Sentences that produced an oracle
    pub resolved: usize,
}

impl AnalysisSummary {
    /// Tally the counts over `members`
    pub fn from_members(members: &[MemberReport]) -> Self {
        members.iter().fold(Self::default(), |mut summary, member| {
            summary.members += 1;
            summary.failed_members += usize::from(member.error.is_some());
            summary.sentences += member.matches.len();
            summary.detected += member.matches.iter().filter(|m| m.is_detected()).count();
            summary.resolved += member.matches.iter().filter(|m| m.is_resolved()).count();
            summary
        })
    }

    /// Share of detected equivalences that produced an oracle
    pub fn resolution_rate(&self) -> f64 {
        if self.detected == 0 {
            0.0
        } else {
            self.resolved as f64 / self.detected as f64
        }
    }
}

/// Result of analyzing a whole catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub members: Vec<MemberReport>,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    /// Build a report and its summary, stamped with the current time
    pub fn new(members: Vec<MemberReport>) -> Self {
        let summary = AnalysisSummary::from_members(&members);
        Self {
            analysis_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            members,
            summary,
        }
    }

    /// Look up a member entry by its exact signature
    pub fn member(&self, signature: &str) -> Option<&MemberReport> {
        self.members.iter().find(|m| m.signature == signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::equivalence::MethodReference;

    fn resolved(sentence: &str) -> EquivalenceMatch {
        EquivalenceMatch::detected(sentence, MethodReference::new("isEmpty", vec![]), false, false)
            .resolved(vec!["RESULT==isEmpty()".into()], "RESULT==isEmpty()".into())
    }

    #[test]
    fn summary_counts_sentences_and_failures() {
        let members = vec![
            MemberReport::from_outcome(
                "List#isEmptyList()".into(),
                MemberOutcome::completed(vec![resolved("Same as isEmpty()"), EquivalenceMatch::none("Fast")]),
            ),
            MemberReport::from_outcome(
                "List#peek()".into(),
                MemberOutcome::failed(Vec::new(), DocOracleError::catalog("unknown type")),
            ),
        ];
        let report = AnalysisReport::new(members);

        assert_eq!(
            report.summary,
            AnalysisSummary {
                members: 2,
                failed_members: 1,
                sentences: 2,
                detected: 1,
                resolved: 1,
            }
        );
        assert!((report.summary.resolution_rate() - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            report.member("List#isEmptyList()").unwrap().oracles().collect::<Vec<_>>(),
            vec!["RESULT==isEmpty()"]
        );
        assert!(report.member("List#peek()").unwrap().error.is_some());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = AnalysisReport::new(Vec::new());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["members"], 0);
        assert!(json["analysis_id"].is_string());
    }
}
