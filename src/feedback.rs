use std::sync::Arc;

use crate::error::FeedbackError;
use crate::models::FeedbackRequest;
use crate::routing::RoutingClient;

/// Forwards quality scores to the routing service's learning loop.
///
/// Scores and feedback types are passed through unvalidated.
pub struct FeedbackRecorder {
    routing: Arc<dyn RoutingClient>
}

impl FeedbackRecorder {

    pub fn new(routing: Arc<dyn RoutingClient>) -> Self {

        FeedbackRecorder { routing }

    }

    /// Failures are logged here and handed back for the feedback endpoint to report.
    pub async fn submit(&self, feedback: &FeedbackRequest) -> Result<(), FeedbackError> {

        match self.routing.feedback(feedback).await {
            Ok(()) => {
                tracing::info!(
                    session_id = %feedback.session_id,
                    score = feedback.score,
                    feedback_type = %feedback.feedback_type,
                    "feedback submitted"
                );
                Ok(())
            }
            Err(source) => {
                tracing::error!(
                    session_id = %feedback.session_id,
                    error = %source,
                    "error submitting feedback"
                );
                Err(FeedbackError { session_id: feedback.session_id.clone(), source })
            }
        }

    }

}
