//! Guarded verification: a bounded retry loop around a non-throwing probe,
//! with a side-effecting recovery action between attempts.
//!
//! The loop is an explicit state machine (`Attempting -> Satisfied` or
//! `Attempting -> Exhausted`) rather than an ad hoc while, so its termination
//! and recovery-count behavior are directly testable without a browser.

use crate::{HarnessError, Result};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyState {
    Attempting,
    Satisfied,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub state: VerifyState,
    /// Number of recovery actions performed before the loop terminated.
    pub recoveries: u32,
}

impl VerifyOutcome {
    pub fn satisfied(&self) -> bool {
        self.state == VerifyState::Satisfied
    }

    /// Collapses the outcome into the single failure the caller sees:
    /// exhaustion becomes one `VerificationFailed` with a readable message.
    pub fn into_result(self, condition: &str) -> Result<()> {
        match self.state {
            VerifyState::Satisfied => Ok(()),
            _ => Err(HarnessError::VerificationFailed {
                condition: condition.to_string(),
                attempts: self.recoveries,
            }),
        }
    }
}

/// Evaluates `condition` until it holds or `max_attempts` recovery actions
/// have been spent. Each miss short of the bound triggers `recovery` (page
/// refresh plus re-stabilization in practice) before the next probe; a miss
/// at the bound terminates as `Exhausted`. An error from the recovery action
/// aborts the loop as [`HarnessError::RecoveryFailed`].
///
/// Fully sequential: every recovery completes before the condition is probed
/// again, and `max_attempts` is finite, so the loop always terminates.
pub async fn verify_with_recovery<C, CF, R, RF>(
    condition_name: &str,
    max_attempts: u32,
    mut condition: C,
    mut recovery: R,
) -> Result<VerifyOutcome>
where
    C: FnMut() -> CF,
    CF: Future<Output = bool>,
    R: FnMut() -> RF,
    RF: Future<Output = Result<()>>,
{
    let mut state = VerifyState::Attempting;
    let mut recoveries: u32 = 0;

    while state == VerifyState::Attempting {
        if condition().await {
            state = VerifyState::Satisfied;
            break;
        }

        if recoveries == max_attempts {
            state = VerifyState::Exhausted;
            break;
        }

        tracing::warn!(
            "'{}' not satisfied, running recovery and retrying ({}/{})",
            condition_name,
            recoveries + 1,
            max_attempts
        );

        recovery()
            .await
            .map_err(|e| HarnessError::RecoveryFailed(e.to_string()))?;
        recoveries += 1;
    }

    tracing::info!(
        "Verification '{}' finished: {:?} after {} recoveries",
        condition_name,
        state,
        recoveries
    );

    Ok(VerifyOutcome { state, recoveries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counter() -> Arc<AtomicU32> {
        Arc::new(AtomicU32::new(0))
    }

    #[tokio::test]
    async fn test_satisfied_first_probe_runs_no_recovery() {
        let recoveries = counter();
        let recoveries_inner = recoveries.clone();

        let outcome = verify_with_recovery(
            "banner visible",
            20,
            || async { true },
            move || {
                let r = recoveries_inner.clone();
                async move {
                    r.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        )
        .await
        .unwrap();

        assert!(outcome.satisfied());
        assert_eq!(outcome.recoveries, 0);
        assert_eq!(recoveries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_satisfied_on_attempt_k_runs_k_minus_one_recoveries() {
        let probes = counter();
        let probes_inner = probes.clone();
        let recoveries = counter();
        let recoveries_inner = recoveries.clone();

        // True on the 4th probe.
        let outcome = verify_with_recovery(
            "text visible after scroll up",
            20,
            move || {
                let p = probes_inner.clone();
                async move { p.fetch_add(1, Ordering::SeqCst) + 1 == 4 }
            },
            move || {
                let r = recoveries_inner.clone();
                async move {
                    r.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        )
        .await
        .unwrap();

        assert!(outcome.satisfied());
        assert_eq!(outcome.recoveries, 3);
        assert_eq!(recoveries.load(Ordering::SeqCst), 3);
        assert_eq!(probes.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_never_satisfied_runs_exactly_max_recoveries() {
        let recoveries = counter();
        let recoveries_inner = recoveries.clone();

        let outcome = verify_with_recovery(
            "banner visible",
            20,
            || async { false },
            move || {
                let r = recoveries_inner.clone();
                async move {
                    r.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.state, VerifyState::Exhausted);
        assert_eq!(outcome.recoveries, 20);
        assert_eq!(recoveries.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn test_exhausted_surfaces_as_verification_failure() {
        let outcome = verify_with_recovery("banner visible", 2, || async { false }, || async {
            Ok(())
        })
        .await
        .unwrap();

        match outcome.into_result("banner visible") {
            Err(HarnessError::VerificationFailed {
                condition,
                attempts,
            }) => {
                assert_eq!(condition, "banner visible");
                assert_eq!(attempts, 2);
            }
            other => panic!("Expected VerificationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recovery_error_aborts_loop() {
        let recoveries = counter();
        let recoveries_inner = recoveries.clone();

        let result = verify_with_recovery(
            "banner visible",
            20,
            || async { false },
            move || {
                let r = recoveries_inner.clone();
                async move {
                    r.fetch_add(1, Ordering::SeqCst);
                    Err(HarnessError::NavigationTimeout(30))
                }
            },
        )
        .await;

        match result {
            Err(HarnessError::RecoveryFailed(msg)) => {
                assert!(msg.contains("Navigation timeout"));
            }
            other => panic!("Expected RecoveryFailed, got {:?}", other.map(|_| ())),
        }
        // Aborted on the first recovery failure rather than retrying through it.
        assert_eq!(recoveries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_probes_once_then_exhausts() {
        let probes = counter();
        let probes_inner = probes.clone();

        let outcome = verify_with_recovery(
            "banner visible",
            0,
            move || {
                let p = probes_inner.clone();
                async move {
                    p.fetch_add(1, Ordering::SeqCst);
                    false
                }
            },
            || async { Ok(()) },
        )
        .await
        .unwrap();

        assert_eq!(outcome.state, VerifyState::Exhausted);
        assert_eq!(outcome.recoveries, 0);
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }
}
