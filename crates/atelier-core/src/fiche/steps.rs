//! Production step record.
//!
//! Pure data: the ordered boolean record persisted with the fiche. The
//! transition guards live in `atelier-production`; this module only
//! declares the steps, their order, and the record shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One production step, in declared workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Set once by order validation; never user-toggled.
    Validated,
    Preparation,
    Production,
    Completed,
}

impl Step {
    /// All steps in workflow order.
    pub const ORDER: [Step; 4] = [
        Step::Validated,
        Step::Preparation,
        Step::Production,
        Step::Completed,
    ];

    /// Steps before this one, in order.
    pub fn predecessors(self) -> &'static [Step] {
        match self {
            Step::Validated => &[],
            Step::Preparation => &[Step::Validated],
            Step::Production => &[Step::Validated, Step::Preparation],
            Step::Completed => &[Step::Validated, Step::Preparation, Step::Production],
        }
    }

    /// Steps after this one, in order.
    pub fn successors(self) -> &'static [Step] {
        match self {
            Step::Validated => &[Step::Preparation, Step::Production, Step::Completed],
            Step::Preparation => &[Step::Production, Step::Completed],
            Step::Production => &[Step::Completed],
            Step::Completed => &[],
        }
    }

    /// Locked steps are driven by the record lifecycle, not the stepper.
    pub fn is_locked(self) -> bool {
        matches!(self, Step::Validated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::Validated => "validated",
            Step::Preparation => "preparation",
            Step::Production => "production",
            Step::Completed => "completed",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean record of the workflow, one flag per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductionSteps {
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub preparation: bool,
    #[serde(default)]
    pub production: bool,
    #[serde(default)]
    pub completed: bool,
}

impl ProductionSteps {
    pub fn get(&self, step: Step) -> bool {
        match step {
            Step::Validated => self.validated,
            Step::Preparation => self.preparation,
            Step::Production => self.production,
            Step::Completed => self.completed,
        }
    }

    pub fn set(&mut self, step: Step, value: bool) {
        match step {
            Step::Validated => self.validated = value,
            Step::Preparation => self.preparation = value,
            Step::Production => self.production = value,
            Step::Completed => self.completed = value,
        }
    }

    /// First unset step in workflow order, `None` when all are set.
    pub fn current(&self) -> Option<Step> {
        Step::ORDER.into_iter().find(|s| !self.get(*s))
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_first_unset_in_order() {
        let mut steps = ProductionSteps::default();
        assert_eq!(steps.current(), Some(Step::Validated));

        steps.validated = true;
        assert_eq!(steps.current(), Some(Step::Preparation));

        steps.preparation = true;
        steps.production = true;
        assert_eq!(steps.current(), Some(Step::Completed));

        steps.completed = true;
        assert_eq!(steps.current(), None);
        assert!(steps.is_complete());
    }

    #[test]
    fn current_ignores_later_flags_set_out_of_order() {
        // An inconsistent record (revert gap) still reports the first hole.
        let steps = ProductionSteps {
            validated: true,
            preparation: false,
            production: true,
            completed: false,
        };
        assert_eq!(steps.current(), Some(Step::Preparation));
    }

    #[test]
    fn predecessors_follow_declared_order() {
        assert_eq!(Step::Validated.predecessors(), &[]);
        assert_eq!(
            Step::Completed.predecessors(),
            &[Step::Validated, Step::Preparation, Step::Production]
        );
        assert_eq!(Step::Preparation.successors(), &[Step::Production, Step::Completed]);
    }
}
