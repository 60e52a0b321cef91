//! Submissions and their analytics rollup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{FormId, Timestamp};

/// A single end-user response to a published form.
///
/// `data` maps field names to submitted values; its shape is deliberately
/// unconstrained and never cross-checked against the form's declared
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub form_id: FormId,
    pub data: Value,
    pub submitted_at: Timestamp,
}

/// One point on a form's submission timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub id: i64,
    pub timestamp: Timestamp,
}

/// Submission analytics for one form: total count plus the timeline in
/// ascending timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAnalytics {
    pub total: u64,
    pub timeline: Vec<TimelinePoint>,
}

impl SubmissionAnalytics {
    /// Build the rollup from an ascending-ordered submission list.
    pub fn from_submissions(total: u64, submissions: &[Submission]) -> Self {
        SubmissionAnalytics {
            total,
            timeline: submissions
                .iter()
                .map(|s| TimelinePoint {
                    id: s.id,
                    timestamp: s.submitted_at,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
