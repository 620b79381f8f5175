use tracing::{info, warn};

use crate::profile::{HealthProfile, UserProfileFlags};
use crate::scoring::{ScanRequest, ScanResult, ScoreService};

/// Top-level interaction state. `reset` is the only way back to
/// `AwaitingInput` from a terminal state.
#[derive(Debug, Default, PartialEq)]
pub enum ScanState {
    #[default]
    AwaitingInput,
    Submitting,
    Succeeded(ScanResult),
    Failed(String),
}

impl ScanState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, ScanState::Submitting)
    }
}

/// Owns the scan transaction: combines the active profile (or defaults) with
/// a barcode, tracks the request lifecycle, and exposes the outcome as data.
pub struct ScanOrchestrator<S: ScoreService> {
    service: S,
    profile: Option<HealthProfile>,
    state: ScanState,
}

impl<S: ScoreService> ScanOrchestrator<S> {
    pub fn new(service: S) -> Self {
        ScanOrchestrator {
            service,
            profile: None,
            state: ScanState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn profile(&self) -> Option<&HealthProfile> {
        self.profile.as_ref()
    }

    /// Install the wizard's completed profile. Read-only from here on; it is
    /// reused across every subsequent scan.
    pub fn set_profile(&mut self, profile: HealthProfile) {
        self.profile = Some(profile);
    }

    /// Discard the profile so the next scan falls back to defaults, as when
    /// the user re-enters the wizard.
    pub fn clear_profile(&mut self) {
        self.profile = None;
    }

    /// Guarded entry into `Submitting`. Empty or whitespace-only barcodes and
    /// calls while a request is in flight are rejected as silent no-ops; on
    /// acceptance the request is built and the state advances.
    pub fn begin_submit(&mut self, barcode: &str) -> Option<ScanRequest> {
        if self.state.is_submitting() {
            warn!("submit rejected: a request is already in flight");
            return None;
        }
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return None;
        }
        info!("submitting barcode {barcode}");
        self.state = ScanState::Submitting;
        Some(ScanRequest {
            barcode: barcode.to_string(),
            user_profile: UserProfileFlags::project(self.profile.as_ref()),
        })
    }

    /// Full transaction: guard, remote call, terminal transition. At most
    /// one request is outstanding at a time.
    pub async fn submit(&mut self, barcode: &str) -> &ScanState {
        let Some(request) = self.begin_submit(barcode) else {
            return &self.state;
        };
        match self.service.score(&request).await {
            Ok(result) => {
                info!(
                    "scan succeeded for {} with score {:.1}",
                    request.barcode, result.suitability_score
                );
                self.state = ScanState::Succeeded(result);
            }
            Err(err) => {
                warn!("scan failed for {}: {err}", request.barcode);
                self.state = ScanState::Failed(err.user_message());
            }
        }
        &self.state
    }

    /// Clear any result or error and return to `AwaitingInput`. The profile
    /// is untouched.
    pub fn reset(&mut self) {
        self.state = ScanState::AwaitingInput;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ScanError;
    use crate::profile::Condition;
    use crate::scoring::GENERIC_FAILURE_MESSAGE;
    use std::cell::RefCell;

    /// Scripted stand-in for the remote service; records every request.
    struct ScriptedService {
        responses: RefCell<Vec<Result<ScanResult, ScanError>>>,
        requests: RefCell<Vec<ScanRequest>>,
    }

    impl ScriptedService {
        fn new(responses: Vec<Result<ScanResult, ScanError>>) -> Self {
            ScriptedService {
                responses: RefCell::new(responses),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn succeeding_with(score: f64) -> Self {
            ScriptedService::new(vec![Ok(sample_result(score))])
        }
    }

    impl ScoreService for ScriptedService {
        async fn score(&self, request: &ScanRequest) -> Result<ScanResult, ScanError> {
            self.requests.borrow_mut().push(request.clone());
            self.responses.borrow_mut().remove(0)
        }
    }

    fn sample_result(score: f64) -> ScanResult {
        serde_json::from_value(serde_json::json!({
            "name": "Sample Product",
            "suitability_score": score,
            "reasons": ["Fits your goals"],
            "warnings": []
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn successful_submit_reaches_succeeded() {
        let mut orchestrator = ScanOrchestrator::new(ScriptedService::succeeding_with(85.0));
        let state = orchestrator.submit("3017624010701").await;
        match state {
            ScanState::Succeeded(result) => assert_eq!(result.suitability_score, 85.0),
            other => panic!("expected Succeeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_and_whitespace_barcodes_are_silently_rejected() {
        let mut orchestrator = ScanOrchestrator::new(ScriptedService::new(vec![]));
        assert_eq!(orchestrator.submit("").await, &ScanState::AwaitingInput);
        assert_eq!(orchestrator.submit("   ").await, &ScanState::AwaitingInput);
        assert!(orchestrator.service.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_rejected() {
        let mut orchestrator = ScanOrchestrator::new(ScriptedService::succeeding_with(60.0));

        let first = orchestrator.begin_submit("3017624010701");
        assert!(first.is_some());
        // the first request is still outstanding
        assert!(orchestrator.begin_submit("5449000000996").is_none());
        assert!(orchestrator.state().is_submitting());
    }

    #[tokio::test]
    async fn defaults_are_projected_when_no_profile_completed() {
        let service = ScriptedService::succeeding_with(70.0);
        let mut orchestrator = ScanOrchestrator::new(service);
        orchestrator.submit("3017624010701").await;

        let requests = orchestrator.service.requests.borrow();
        let profile = &requests[0].user_profile;
        assert_eq!(profile.age, 30);
        assert!(!profile.has_diabetes && !profile.goal_low_carb);
    }

    #[tokio::test]
    async fn service_detail_becomes_the_failure_message() {
        let mut orchestrator = ScanOrchestrator::new(ScriptedService::new(vec![Err(
            ScanError::Service {
                status: 404,
                message: "Product not found".to_string(),
            },
        )]));
        let state = orchestrator.submit("0000000000000").await;
        assert_eq!(state, &ScanState::Failed("Product not found".to_string()));
    }

    #[tokio::test]
    async fn resubmission_after_failure_is_explicit() {
        let mut orchestrator = ScanOrchestrator::new(ScriptedService::new(vec![
            Err(ScanError::Service {
                status: 500,
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            }),
            Ok(sample_result(55.0)),
        ]));

        orchestrator.submit("3017624010701").await;
        assert!(matches!(orchestrator.state(), ScanState::Failed(_)));

        // no automatic retry happened
        assert_eq!(orchestrator.service.requests.borrow().len(), 1);

        orchestrator.reset();
        orchestrator.submit("3017624010701").await;
        assert!(matches!(orchestrator.state(), ScanState::Succeeded(_)));
    }

    #[tokio::test]
    async fn reset_clears_outcome_but_keeps_profile() {
        let mut profile = HealthProfile::default();
        profile.age = 45;
        profile.conditions.insert(Condition::Diabetes);

        let mut orchestrator = ScanOrchestrator::new(ScriptedService::succeeding_with(90.0));
        orchestrator.set_profile(profile.clone());
        orchestrator.submit("3017624010701").await;
        assert!(matches!(orchestrator.state(), ScanState::Succeeded(_)));

        orchestrator.reset();
        assert_eq!(orchestrator.state(), &ScanState::AwaitingInput);
        assert_eq!(orchestrator.profile(), Some(&profile));
    }

    #[tokio::test]
    async fn completed_profile_flows_into_the_request() {
        let mut profile = HealthProfile::default();
        profile.age = 45;
        profile.conditions.insert(Condition::Diabetes);
        profile.goals.high_protein = true;

        let mut orchestrator = ScanOrchestrator::new(ScriptedService::succeeding_with(75.0));
        orchestrator.set_profile(profile);
        orchestrator.submit("3017624010701").await;

        let requests = orchestrator.service.requests.borrow();
        let flags = &requests[0].user_profile;
        assert!(flags.has_diabetes);
        assert!(flags.goal_high_protein);
        assert_eq!(flags.age, 45);
        assert!(!flags.has_hypertension && !flags.peanut_allergy && !flags.goal_low_carb);
    }
}
