//! Ordered step pipeline with guards and rollback-on-first-failure.
//!
//! The step list is fixed per pipeline, built once by a constructor
//! function and validated at registration time. Execution is strictly
//! sequential: guards are evaluated before each step, the first action
//! failure invokes that step's compensation (if any) and terminates the
//! run. There is no retry, parallelism, or partial-success semantics.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::log_status;

pub type StepAction<C> = Box<dyn FnMut(&mut C) -> Result<()>>;
pub type StepGuard<C> = Box<dyn Fn(&C) -> bool>;
pub type StepHook<C> = Box<dyn Fn(&C)>;
pub type StepCompensation<C> = Box<dyn FnMut(&mut C) -> Result<()>>;

/// One unit of pipeline work: an action bound to the shared context,
/// a position, and optional guard / compensation / display hooks.
pub struct Step<C> {
    pub order: u32,
    pub label: String,
    action: StepAction<C>,
    guard: Option<StepGuard<C>>,
    compensation: Option<StepCompensation<C>>,
    before_hook: Option<StepHook<C>>,
    after_hook: Option<StepHook<C>>,
}

impl<C> Step<C> {
    pub fn new(
        order: u32,
        label: impl Into<String>,
        action: impl FnMut(&mut C) -> Result<()> + 'static,
    ) -> Self {
        Self {
            order,
            label: label.into(),
            action: Box::new(action),
            guard: None,
            compensation: None,
            before_hook: None,
            after_hook: None,
        }
    }

    /// Skip this step entirely (action and hooks) when the predicate is false.
    pub fn with_guard(mut self, guard: impl Fn(&C) -> bool + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Undo action invoked once if this step's action fails.
    pub fn with_compensation(
        mut self,
        compensation: impl FnMut(&mut C) -> Result<()> + 'static,
    ) -> Self {
        self.compensation = Some(Box::new(compensation));
        self
    }

    pub fn with_before_hook(mut self, hook: impl Fn(&C) + 'static) -> Self {
        self.before_hook = Some(Box::new(hook));
        self
    }

    pub fn with_after_hook(mut self, hook: impl Fn(&C) + 'static) -> Self {
        self.after_hook = Some(Box::new(hook));
        self
    }
}

/// Immutable, ordered step list. Construction is the only place steps
/// can be declared; duplicate order values are rejected here so the
/// runner can assume a total order.
pub struct StepRegistry<C> {
    steps: Vec<Step<C>>,
}

impl<C> StepRegistry<C> {
    pub fn new(mut steps: Vec<Step<C>>) -> Result<Self> {
        steps.sort_by_key(|s| s.order);
        for pair in steps.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(Error::pipeline_duplicate_order(
                    pair[1].order,
                    pair[1].label.clone(),
                ));
            }
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Pending,
    Running,
    Aborted,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub order: u32,
    pub label: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub compensated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_steps: usize,
    pub succeeded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub state: PipelineState,
    pub steps: Vec<StepResult>,
    pub summary: RunSummary,
}

/// Executes a registry's steps against an exclusively-owned context.
///
/// States: `Pending` before `run`, `Running` while a step executes,
/// then `Aborted` (first failure, after compensation) or `Completed`.
/// Both end states are terminal; a runner is good for one run.
pub struct PipelineRunner<C> {
    steps: Vec<Step<C>>,
    state: PipelineState,
}

impl<C> PipelineRunner<C> {
    pub fn new(registry: StepRegistry<C>) -> Self {
        Self {
            steps: registry.steps,
            state: PipelineState::Pending,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run all steps in ascending order. The first action failure
    /// invokes the failing step's compensation (if declared) exactly
    /// once and aborts; no later step executes regardless of its guard.
    pub fn run(&mut self, ctx: &mut C) -> Result<RunReport> {
        self.state = PipelineState::Running;
        let mut results: Vec<StepResult> = Vec::with_capacity(self.steps.len());

        for step in &mut self.steps {
            if let Some(guard) = &step.guard {
                if !guard(ctx) {
                    results.push(StepResult {
                        order: step.order,
                        label: step.label.clone(),
                        status: StepStatus::Skipped,
                        error: None,
                        compensated: false,
                    });
                    continue;
                }
            }

            if let Some(hook) = &step.before_hook {
                hook(ctx);
            }
            log_status!("step", "{}", step.label);

            match (step.action)(ctx) {
                Ok(()) => {
                    if let Some(hook) = &step.after_hook {
                        hook(ctx);
                    }
                    results.push(StepResult {
                        order: step.order,
                        label: step.label.clone(),
                        status: StepStatus::Succeeded,
                        error: None,
                        compensated: false,
                    });
                }
                Err(err) => {
                    log_status!("step", "Failed: {}", err.message);
                    let mut compensated = false;
                    let mut rollback_error: Option<Error> = None;

                    if let Some(compensation) = &mut step.compensation {
                        log_status!("step", "Reverting");
                        match compensation(ctx) {
                            Ok(()) => compensated = true,
                            Err(e) => rollback_error = Some(e),
                        }
                    }

                    self.state = PipelineState::Aborted;

                    let mut failure =
                        Error::step_failed(&step.label, step.order, err, compensated);
                    if let Some(rollback) = rollback_error {
                        failure = failure.with_hint(format!(
                            "Rollback also failed ({}); manual cleanup may be required",
                            rollback.message
                        ));
                    }
                    return Err(failure);
                }
            }
        }

        self.state = PipelineState::Completed;
        let summary = build_summary(&results);
        Ok(RunReport {
            state: self.state,
            steps: results,
            summary,
        })
    }
}

fn build_summary(results: &[StepResult]) -> RunSummary {
    RunSummary {
        total_steps: results.len(),
        succeeded: results
            .iter()
            .filter(|r| matches!(r.status, StepStatus::Succeeded))
            .count(),
        skipped: results
            .iter()
            .filter(|r| matches!(r.status, StepStatus::Skipped))
            .count(),
    }
}
