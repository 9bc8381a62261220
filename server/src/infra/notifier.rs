use crate::domain::repository::ResetNotifier;
use crate::error::TrackerServiceError;

/// Stand-in for the email delivery channel: writes the reset token to the
/// log stream, where a delivery sidecar (or an operator) picks it up. Real
/// SMTP delivery lives outside this service.
#[derive(Clone)]
pub struct TracingResetNotifier;

impl ResetNotifier for TracingResetNotifier {
    async fn notify(&self, email: &str, token: &str) -> Result<(), TrackerServiceError> {
        tracing::info!(email, token, "password reset token issued");
        Ok(())
    }
}
