//! The check → register → persist → report workflow.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use autoreg_core::{ReconciliationStatus, Role, RolePayload};
use autoreg_store::{ProfileStore, load_profile, mark_registered};
use autoreg_sync::{CheckReply, RegistrationBackend};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{Failure, ReconcileError};

type StatusCallback = Box<dyn Fn(ReconciliationStatus) + Send + Sync>;

/// What to do when the existence check itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckFailurePolicy {
    /// Treat a failed check like "not found" and go on to register.
    #[default]
    AssumeAbsent,
    /// End the run in `Error` without registering.
    Abort,
}

/// Terminal result of one reconciliation run.
#[derive(Debug)]
pub struct Outcome {
    pub role: Role,
    /// Always one of `Exists`, `Registered`, or `Error`.
    pub status: ReconciliationStatus,
    /// Human-readable summary of how the run ended.
    pub message: String,
    pub failure: Option<Failure>,
    pub completed_at: DateTime<Utc>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

enum Settled {
    Exists,
    Registered,
}

/// Ensures the cached profile is registered with one role's backend.
///
/// A reconciler runs at most once: the first call to [`run`](Self::run)
/// performs at most one check and one register call, and any further call,
/// concurrent or later, returns [`ReconcileError::AlreadyStarted`] without
/// touching the network, the store, or the status.
pub struct Reconciler {
    role: Role,
    store: Arc<dyn ProfileStore>,
    backend: Arc<dyn RegistrationBackend>,
    policy: CheckFailurePolicy,
    on_status_change: Option<StatusCallback>,
    started: AtomicBool,
    mounted: AtomicBool,
    status: watch::Sender<ReconciliationStatus>,
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("role", &self.role)
            .field("policy", &self.policy)
            .field("status", &self.status())
            .field("started", &self.started.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    pub fn new(
        role: Role,
        store: Arc<dyn ProfileStore>,
        backend: Arc<dyn RegistrationBackend>,
    ) -> Self {
        let (status, _) = watch::channel(ReconciliationStatus::Checking);
        Self {
            role,
            store,
            backend,
            policy: CheckFailurePolicy::default(),
            on_status_change: None,
            started: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
            status,
        }
    }

    pub fn check_failure_policy(mut self, policy: CheckFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Call `callback` synchronously on every status transition, in order.
    pub fn on_status_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(ReconciliationStatus) + Send + Sync + 'static,
    {
        self.on_status_change = Some(Box::new(callback));
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> ReconciliationStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReconciliationStatus> {
        self.status.subscribe()
    }

    /// Mark the owning view as gone. A registration that completes afterwards
    /// is not recorded locally.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Run the reconciliation on the current tokio runtime.
    pub fn mount(self: Arc<Self>) -> JoinHandle<Result<Outcome, ReconcileError>> {
        tokio::spawn(async move { self.run().await })
    }

    /// Run the reconciliation to a terminal status.
    ///
    /// Every failure is folded into the returned [`Outcome`]; the only error
    /// is a repeated invocation.
    pub async fn run(&self) -> Result<Outcome, ReconcileError> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!(role = %self.role, "reconciliation already started; ignoring");
            return Err(ReconcileError::AlreadyStarted { role: self.role });
        }

        let (status, message, failure) = match self.reconcile().await {
            Ok(Settled::Exists) => (
                ReconciliationStatus::Exists,
                "User already registered".to_string(),
                None,
            ),
            Ok(Settled::Registered) => (
                ReconciliationStatus::Registered,
                "User registered successfully".to_string(),
                None,
            ),
            Err(failure) => {
                error!(role = %self.role, %failure, "reconciliation failed");
                (ReconciliationStatus::Error, failure.to_string(), Some(failure))
            }
        };
        self.transition(status);

        info!(role = %self.role, %status, "reconciliation finished");
        Ok(Outcome {
            role: self.role,
            status,
            message,
            failure,
            completed_at: Utc::now(),
        })
    }

    async fn reconcile(&self) -> Result<Settled, Failure> {
        self.notify(ReconciliationStatus::Checking);

        let profile = load_profile(self.store.as_ref())
            .map_err(Failure::ProfileUnreadable)?
            .ok_or(Failure::MissingProfile)?;
        let payload = RolePayload::from_profile(&profile, self.role);
        debug!(role = %self.role, ?payload, "derived payload");
        if payload.national_id.is_empty() {
            return Err(Failure::MissingNationalId);
        }

        match self.backend.check(self.role, &payload.national_id).await {
            Ok(CheckReply { exists: true }) => return Ok(Settled::Exists),
            Ok(CheckReply { exists: false }) => {
                info!(role = %self.role, "no existing registration");
            }
            Err(err) => match self.policy {
                CheckFailurePolicy::AssumeAbsent => {
                    warn!(role = %self.role, %err, "existence check failed; assuming not registered");
                }
                CheckFailurePolicy::Abort => return Err(Failure::CheckFailed(err)),
            },
        }

        self.transition(ReconciliationStatus::Registering);
        let reply = self
            .backend
            .register(&payload)
            .await
            .map_err(Failure::RegisterFailed)?;
        if !reply.success {
            return Err(Failure::RegisterRejected {
                message: reply
                    .message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            });
        }

        if !self.is_mounted() {
            return Err(Failure::Unmounted);
        }
        mark_registered(self.store.as_ref(), self.role).map_err(Failure::FlagNotPersisted)?;
        Ok(Settled::Registered)
    }

    fn transition(&self, next: ReconciliationStatus) {
        let prev = self.status.send_replace(next);
        debug_assert!(
            prev.can_transition_to(next),
            "invalid status transition {prev} -> {next}"
        );
        debug!(role = %self.role, from = %prev, to = %next, "status transition");
        self.notify(next);
    }

    fn notify(&self, status: ReconciliationStatus) {
        if let Some(callback) = &self.on_status_change {
            callback(status);
        }
    }
}
