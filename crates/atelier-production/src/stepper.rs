//! Production workflow state machine.
//!
//! Drives a fiche's [`ProductionSteps`] record through the ordered
//! workflow `validated -> preparation -> production -> completed`.
//! Forward transitions are gated behind an explicit [`Confirmation`]
//! naming the step, so a step is never set silently; reverts are direct.
//! The stepper only computes legal transitions; the caller persists the
//! updated record.

use tracing::debug;

use atelier_core::error::StepError;
use atelier_core::fiche::steps::{ProductionSteps, Step};

/// What happens to later steps when an earlier one is reverted.
///
/// The observed product behavior keeps later flags untouched even though
/// that can violate the precedence invariant; cascading is available but
/// off by default (open question for the product owner, see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevertPolicy {
    /// Leave later steps as they are (observed behavior).
    #[default]
    Keep,
    /// Also unset every step after the reverted one.
    Cascade,
}

/// Proof that the user confirmed a specific forward transition.
///
/// Only [`Stepper::request`] creates one; holding it is the precondition
/// for [`Stepper::confirm`]. Dropping it cancels the transition.
#[derive(Debug)]
pub struct Confirmation {
    step: Step,
}

impl Confirmation {
    /// The step this confirmation is for.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Prompt text naming the step, shown on the confirm/cancel dialog.
    pub fn prompt(&self) -> String {
        format!("Mark step '{}' as done?", self.step)
    }
}

/// State machine over a production step record.
#[derive(Debug, Clone)]
pub struct Stepper {
    steps: ProductionSteps,
    policy: RevertPolicy,
}

impl Stepper {
    pub fn new(steps: ProductionSteps, policy: RevertPolicy) -> Self {
        Self { steps, policy }
    }

    /// The current record; persisted by the caller after transitions.
    pub fn steps(&self) -> ProductionSteps {
        self.steps
    }

    pub fn into_steps(self) -> ProductionSteps {
        self.steps
    }

    /// First unset step in order, `None` when the workflow is complete.
    pub fn current_step(&self) -> Option<Step> {
        self.steps.current()
    }

    pub fn is_complete(&self) -> bool {
        self.steps.is_complete()
    }

    /// Whether the control for `step` should be enabled at all: the
    /// current step, or an already-set step (for reverting). Locked steps
    /// are never toggleable here.
    pub fn can_toggle(&self, step: Step) -> bool {
        if step.is_locked() {
            return false;
        }
        if self.steps.get(step) {
            return true;
        }
        self.steps.current() == Some(step)
            && step.predecessors().iter().all(|s| self.steps.get(*s))
    }

    /// Requests the forward transition for `step`, checking every guard.
    /// The returned confirmation must be passed to [`Self::confirm`] to
    /// commit; this two-step shape is what keeps silent advances out.
    pub fn request(&self, step: Step) -> Result<Confirmation, StepError> {
        if step.is_locked() {
            return Err(StepError::Locked { step });
        }
        if self.steps.get(step) {
            return Err(StepError::NoChange { step, value: true });
        }
        if let Some(missing) = step.predecessors().iter().find(|s| !self.steps.get(**s)) {
            return Err(StepError::PrecedenceViolated {
                step,
                missing: *missing,
            });
        }
        Ok(Confirmation { step })
    }

    /// Commits a confirmed forward transition.
    pub fn confirm(&mut self, confirmation: Confirmation) {
        debug!(step = %confirmation.step, "production step confirmed");
        self.steps.set(confirmation.step, true);
    }

    /// Reverts a set step directly, no confirmation required. Later steps
    /// are kept or cascaded per the configured [`RevertPolicy`]; with
    /// `Keep` the record may end up inconsistent with the precedence
    /// invariant (documented gap).
    pub fn revert(&mut self, step: Step) -> Result<(), StepError> {
        if step.is_locked() {
            return Err(StepError::Locked { step });
        }
        if !self.steps.get(step) {
            return Err(StepError::NoChange { step, value: false });
        }
        self.steps.set(step, false);
        if self.policy == RevertPolicy::Cascade {
            for later in step.successors() {
                self.steps.set(*later, false);
            }
        }
        debug!(step = %step, policy = ?self.policy, "production step reverted");
        Ok(())
    }

    /// Whether the client-notification action is available.
    pub fn notification_available(&self) -> bool {
        self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validated() -> ProductionSteps {
        ProductionSteps {
            validated: true,
            ..Default::default()
        }
    }

    #[test]
    fn forward_needs_request_then_confirm() {
        let mut stepper = Stepper::new(validated(), RevertPolicy::Keep);
        assert_eq!(stepper.current_step(), Some(Step::Preparation));

        let confirmation = stepper.request(Step::Preparation).unwrap();
        assert_eq!(confirmation.step(), Step::Preparation);
        assert!(confirmation.prompt().contains("preparation"));
        stepper.confirm(confirmation);

        assert_eq!(stepper.current_step(), Some(Step::Production));
    }

    #[test]
    fn dropping_a_confirmation_cancels_the_transition() {
        let stepper = Stepper::new(validated(), RevertPolicy::Keep);
        let confirmation = stepper.request(Step::Preparation).unwrap();
        drop(confirmation);
        assert!(!stepper.steps().preparation);
    }

    #[test]
    fn precedence_guard_across_all_permutations() {
        // Programmatically try every step against every record shape; a
        // request may only succeed when all predecessors are set.
        for mask in 0u8..16 {
            let steps = ProductionSteps {
                validated: mask & 1 != 0,
                preparation: mask & 2 != 0,
                production: mask & 4 != 0,
                completed: mask & 8 != 0,
            };
            let stepper = Stepper::new(steps, RevertPolicy::Keep);
            for step in Step::ORDER {
                let allowed = stepper.request(step).is_ok();
                let expected = !step.is_locked()
                    && !steps.get(step)
                    && step.predecessors().iter().all(|s| steps.get(*s));
                assert_eq!(allowed, expected, "step {step} on mask {mask:04b}");
            }
        }
    }

    #[test]
    fn completed_before_production_is_refused() {
        let steps = ProductionSteps {
            validated: true,
            preparation: true,
            production: false,
            completed: false,
        };
        let stepper = Stepper::new(steps, RevertPolicy::Keep);
        let err = stepper.request(Step::Completed).unwrap_err();
        assert_eq!(
            err,
            StepError::PrecedenceViolated {
                step: Step::Completed,
                missing: Step::Production,
            }
        );
        // The record is unchanged.
        assert_eq!(stepper.steps(), steps);
    }

    #[test]
    fn validated_is_locked_both_ways() {
        let stepper = Stepper::new(validated(), RevertPolicy::Keep);
        assert!(matches!(
            stepper.request(Step::Validated),
            Err(StepError::Locked { .. })
        ));
        let mut stepper = stepper;
        assert!(matches!(
            stepper.revert(Step::Validated),
            Err(StepError::Locked { .. })
        ));
        assert!(!stepper.can_toggle(Step::Validated));
    }

    #[test]
    fn revert_keeps_later_steps_by_default() {
        let steps = ProductionSteps {
            validated: true,
            preparation: true,
            production: true,
            completed: false,
        };
        let mut stepper = Stepper::new(steps, RevertPolicy::Keep);
        stepper.revert(Step::Preparation).unwrap();

        let after = stepper.steps();
        assert!(!after.preparation);
        // Non-cascading: production stays set even though now inconsistent.
        assert!(after.production);
    }

    #[test]
    fn revert_cascades_when_configured() {
        let steps = ProductionSteps {
            validated: true,
            preparation: true,
            production: true,
            completed: true,
        };
        let mut stepper = Stepper::new(steps, RevertPolicy::Cascade);
        stepper.revert(Step::Preparation).unwrap();

        let after = stepper.steps();
        assert!(!after.preparation);
        assert!(!after.production);
        assert!(!after.completed);
        assert!(after.validated);
    }

    #[test]
    fn revert_never_panics_for_any_record() {
        for mask in 0u8..16 {
            let steps = ProductionSteps {
                validated: mask & 1 != 0,
                preparation: mask & 2 != 0,
                production: mask & 4 != 0,
                completed: mask & 8 != 0,
            };
            for step in Step::ORDER {
                let mut stepper = Stepper::new(steps, RevertPolicy::Keep);
                let _ = stepper.revert(step);
            }
        }
    }

    #[test]
    fn can_toggle_matches_control_enablement() {
        let steps = ProductionSteps {
            validated: true,
            preparation: true,
            production: false,
            completed: false,
        };
        let stepper = Stepper::new(steps, RevertPolicy::Keep);
        assert!(stepper.can_toggle(Step::Preparation)); // set -> revertable
        assert!(stepper.can_toggle(Step::Production)); // current step
        assert!(!stepper.can_toggle(Step::Completed)); // prior step unset
        assert!(!stepper.can_toggle(Step::Validated)); // locked
    }

    #[test]
    fn notification_gated_on_completion() {
        let mut stepper = Stepper::new(validated(), RevertPolicy::Keep);
        assert!(!stepper.notification_available());
        for step in [Step::Preparation, Step::Production, Step::Completed] {
            let confirmation = stepper.request(step).unwrap();
            stepper.confirm(confirmation);
        }
        assert!(stepper.notification_available());
    }
}
