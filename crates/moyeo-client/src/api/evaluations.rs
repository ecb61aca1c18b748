//! Post-meeting evaluation endpoints.

use anyhow::Result;

use moyeo_types::evaluation::{EvaluationEntry, EvaluationTarget, SubmitEvaluationsRequest};

use super::Api;

impl Api {
    /// Members of the meeting the caller can still rate.
    pub async fn evaluation_targets(&self, meeting_id: i64) -> Result<Vec<EvaluationTarget>> {
        self.expect_data(self.get(&format!("/evaluations/{meeting_id}/targets")))
            .await
    }

    pub async fn submit_evaluations(
        &self,
        meeting_id: i64,
        evaluations: Vec<EvaluationEntry>,
    ) -> Result<()> {
        self.expect_ok(
            self.post(&format!("/evaluations/{meeting_id}"))
                .json(&SubmitEvaluationsRequest { evaluations }),
        )
        .await
    }
}
