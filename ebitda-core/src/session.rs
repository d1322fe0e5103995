//! Per-user session state.
//!
//! A [`SessionState`] owns everything a front end needs between two
//! interactions: the current inputs, the active lesson step, the layout and
//! explore flags, and the frozen baseline used by the comparison table.
//!
//! Current results are never stored. [`SessionState::current_results`]
//! recomputes them from the inputs on every call, so they cannot drift.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ebitda_core::{Emphasis, SessionState};
//!
//! let mut session = SessionState::new();
//! session.load_scenario("Energy spike").unwrap();
//! assert_eq!(session.current_results().ebitda, dec!(14000));
//!
//! // The baseline moved with the scenario, so nothing is highlighted yet.
//! let rows = session.comparison();
//! assert!(rows.iter().all(|row| row.current_emphasis() == Emphasis::Neutral));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::{ComparisonRow, OverflowError, compare, compute, try_compute};
use crate::models::{InputField, Inputs, Results};
use crate::scenario::{Scenario, UnknownScenarioError};
use crate::steps::{Step, StepError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    UnknownScenario(#[from] UnknownScenarioError),

    #[error("'{}' is locked during {}; turn on explore mode to edit it", .field.label(), .step.title())]
    FieldLocked { field: InputField, step: Step },

    #[error(transparent)]
    InvalidStep(#[from] StepError),

    #[error("'{}' cannot be {value}: {source}", .field.label())]
    OutOfRange {
        field: InputField,
        value: Decimal,
        #[source]
        source: OverflowError,
    },

    #[error("'{}' is already at {value}, the edge of the decimal range", .field.label())]
    NudgeOutOfRange { field: InputField, value: Decimal },
}

/// Direction for [`SessionState::nudge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    step: Step,
    /// Scenario most recently loaded; drives the hint text.
    scenario: Scenario,
    mobile: bool,
    explore: bool,
    inputs: Inputs,
    /// Results frozen at the last start, scenario load, or reset.
    baseline: Results,
}

impl SessionState {
    /// Creates a session at step 1 with default inputs, mobile layout, and
    /// the default results as baseline.
    pub fn new() -> Self {
        let inputs = Inputs::defaults();
        Self {
            step: Step::FIRST,
            scenario: Scenario::default(),
            mobile: true,
            explore: false,
            inputs,
            baseline: compute(&inputs),
        }
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn baseline(&self) -> &Results {
        &self.baseline
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn is_explore(&self) -> bool {
        self.explore
    }

    /// Results for the inputs as they stand right now.
    pub fn current_results(&self) -> Results {
        compute(&self.inputs)
    }

    /// Current results lined up against the baseline.
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        compare(&self.current_results(), &self.baseline)
    }

    /// Whether `field` is read-only under the current step and mode.
    pub fn is_locked(
        &self,
        field: InputField,
    ) -> bool {
        !self.explore && !self.step.unlocks(field)
    }

    fn ensure_unlocked(
        &self,
        field: InputField,
    ) -> Result<(), SessionError> {
        if self.is_locked(field) {
            warn!(field = %field, step = self.step.number(), "edit rejected; field is locked");
            return Err(SessionError::FieldLocked {
                field,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Replaces one input value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::FieldLocked`] when the active step does not
    /// unlock `field` and explore mode is off, and
    /// [`SessionError::OutOfRange`] when the new value would push a result
    /// outside the `Decimal` range. Either way the inputs are left as they were.
    pub fn set_input(
        &mut self,
        field: InputField,
        value: Decimal,
    ) -> Result<(), SessionError> {
        self.ensure_unlocked(field)?;

        let candidate = self.inputs.with(field, value);
        if let Err(source) = try_compute(&candidate) {
            warn!(
                field = %field,
                value = %value,
                metric = source.metric.label(),
                "edit rejected; result out of range"
            );
            return Err(SessionError::OutOfRange {
                field,
                value,
                source,
            });
        }

        debug!(field = %field, value = %value, "input updated");
        self.inputs = candidate;
        Ok(())
    }

    /// Moves `field` by one increment, subject to the same checks as
    /// [`set_input`](Self::set_input). Returns the new value.
    ///
    /// # Errors
    ///
    /// Besides the [`set_input`](Self::set_input) errors, returns
    /// [`SessionError::NudgeOutOfRange`] when the field itself is already at
    /// the edge of the `Decimal` range.
    pub fn nudge(
        &mut self,
        field: InputField,
        direction: Nudge,
    ) -> Result<Decimal, SessionError> {
        self.ensure_unlocked(field)?;

        let current = self.inputs.get(field);
        let value = match direction {
            Nudge::Up => current.checked_add(field.increment()),
            Nudge::Down => current.checked_sub(field.increment()),
        }
        .ok_or(SessionError::NudgeOutOfRange {
            field,
            value: current,
        })?;
        self.set_input(field, value)?;
        Ok(value)
    }

    /// Loads a named preset and freezes its results as the new baseline.
    ///
    /// Returns the inputs and baseline now in effect.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownScenario`] when `name` is not in the
    /// catalog; the session is not modified.
    pub fn load_scenario(
        &mut self,
        name: &str,
    ) -> Result<(Inputs, Results), SessionError> {
        let scenario: Scenario = name.parse()?;
        Ok(self.load(scenario))
    }

    /// Loads a preset from the catalog. See [`load_scenario`](Self::load_scenario).
    pub fn load(
        &mut self,
        scenario: Scenario,
    ) -> (Inputs, Results) {
        info!(scenario = scenario.label(), "loading scenario");
        self.scenario = scenario;
        self.replace_inputs(scenario.inputs())
    }

    /// Restores the default inputs and freezes their results as the baseline.
    pub fn reset(&mut self) -> (Inputs, Results) {
        info!("resetting inputs to defaults");
        self.replace_inputs(Inputs::defaults())
    }

    fn replace_inputs(
        &mut self,
        inputs: Inputs,
    ) -> (Inputs, Results) {
        self.inputs = inputs;
        self.baseline = compute(&inputs);
        (self.inputs, self.baseline)
    }

    pub fn set_step(
        &mut self,
        step: Step,
    ) {
        debug!(from = self.step.number(), to = step.number(), "step changed");
        self.step = step;
    }

    /// Selects a step by its 1-based number.
    pub fn go_to_step(
        &mut self,
        number: i64,
    ) -> Result<Step, SessionError> {
        let step = Step::from_number(number)?;
        self.set_step(step);
        Ok(step)
    }

    /// Advances one step; stays put on the last step.
    pub fn next_step(&mut self) -> Step {
        if let Some(next) = self.step.next() {
            self.set_step(next);
        }
        self.step
    }

    /// Goes back one step; stays put on the first step.
    pub fn prev_step(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.set_step(prev);
        }
        self.step
    }

    pub fn set_explore(
        &mut self,
        explore: bool,
    ) {
        debug!(explore, "explore mode changed");
        self.explore = explore;
    }

    pub fn set_mobile(
        &mut self,
        mobile: bool,
    ) {
        debug!(mobile, "layout changed");
        self.mobile = mobile;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
