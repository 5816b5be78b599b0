//! Linear step sequences shared by the purchase flows.
//!
//! A flow is an ordered list of steps. Each step declares the fields it collects
//! together with their validation rules, and moving forward is only possible once
//! all of them pass. The flow also provides a pricing function over its form,
//! evaluated on demand from the collected values.

use std::fmt::Debug;

use crate::validation::{advise_all, check_all, Field, Values, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor<S: 'static> {
    pub id: S,
    pub title: &'static str,
    pub fields: &'static [Field],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance<S> {
    Moved(S),
    Blocked(Vec<Violation>),
    /// Already at the last step, nothing changed.
    AtEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat<S> {
    Moved(S),
    /// Retreat requested from the first step: leave the flow.
    Exit,
}

#[derive(Debug, Clone)]
pub struct StepSequence<S: 'static> {
    steps: &'static [StepDescriptor<S>],
    index: usize,
}

impl<S: Copy> StepSequence<S> {
    /// `steps` must not be empty.
    pub fn new(steps: &'static [StepDescriptor<S>]) -> Self {
        debug_assert!(!steps.is_empty());
        Self { steps, index: 0 }
    }

    pub fn steps(&self) -> &'static [StepDescriptor<S>] {
        self.steps
    }

    pub fn current(&self) -> &'static StepDescriptor<S> {
        &self.steps[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    pub fn violations<V: Values + ?Sized>(&self, values: &V) -> Vec<Violation> {
        check_all(self.current().fields, values)
    }

    pub fn advance<V: Values + ?Sized>(&mut self, values: &V) -> Advance<S> {
        if self.is_last() {
            return Advance::AtEnd;
        }
        let violations = self.violations(values);
        if !violations.is_empty() {
            return Advance::Blocked(violations);
        }
        self.index += 1;
        Advance::Moved(self.current().id)
    }

    pub fn retreat(&mut self) -> Retreat<S> {
        if self.is_first() {
            return Retreat::Exit;
        }
        self.index -= 1;
        Retreat::Moved(self.current().id)
    }
}

/// A purchase flow: its steps, its form and how it is priced.
pub trait Flow {
    type Step: Copy + PartialEq + Debug + 'static;
    type Form: Values + Default;
    type Quote;

    fn steps() -> &'static [StepDescriptor<Self::Step>];

    /// Price derived from the values collected so far, `None` until the
    /// selections it depends on are made.
    fn quote(form: &Self::Form) -> Option<Self::Quote>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfirmError {
    #[error("confirmation is only possible at the last step")]
    NotAtLastStep,
    #[error("last step is incomplete")]
    Invalid(Vec<Violation>),
    #[error("price cannot be computed from the collected values")]
    NoQuote,
}

pub struct Wizard<F: Flow> {
    pub form: F::Form,
    sequence: StepSequence<F::Step>,
}

impl<F: Flow> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flow> Wizard<F> {
    pub fn new() -> Self {
        Self {
            form: F::Form::default(),
            sequence: StepSequence::new(F::steps()),
        }
    }

    pub fn step(&self) -> F::Step {
        self.sequence.current().id
    }

    pub fn descriptor(&self) -> &'static StepDescriptor<F::Step> {
        self.sequence.current()
    }

    /// 1-based position and total number of steps.
    pub fn position(&self) -> (usize, usize) {
        (self.sequence.index() + 1, self.sequence.steps().len())
    }

    pub fn is_last(&self) -> bool {
        self.sequence.is_last()
    }

    pub fn violations(&self) -> Vec<Violation> {
        self.sequence.violations(&self.form)
    }

    /// Format advice on the fields of the current step.
    pub fn hints(&self) -> Vec<Violation> {
        advise_all(self.sequence.current().fields, &self.form)
    }

    pub fn can_advance(&self) -> bool {
        !self.sequence.is_last() && self.violations().is_empty()
    }

    pub fn advance(&mut self) -> Advance<F::Step> {
        self.sequence.advance(&self.form)
    }

    pub fn retreat(&mut self) -> Retreat<F::Step> {
        self.sequence.retreat()
    }

    pub fn quote(&self) -> Option<F::Quote> {
        F::quote(&self.form)
    }

    pub fn can_confirm(&self) -> bool {
        self.sequence.is_last() && self.violations().is_empty() && self.quote().is_some()
    }

    /// Validates the last step and returns the final price. Nothing is charged.
    pub fn confirm(&self) -> Result<F::Quote, ConfirmError> {
        if !self.sequence.is_last() {
            return Err(ConfirmError::NotAtLastStep);
        }
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(ConfirmError::Invalid(violations));
        }
        self.quote().ok_or(ConfirmError::NoQuote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        First,
        Second,
        Last,
    }

    #[derive(Default)]
    struct Form {
        name: String,
        count: String,
        accepted: bool,
    }

    impl Values for Form {
        fn value(&self, field: &str) -> Option<&str> {
            match field {
                "name" => Some(self.name.as_str()),
                "count" => Some(self.count.as_str()),
                "accepted" => self.accepted.then_some("oui"),
                _ => None,
            }
        }
    }

    struct Demo;

    impl Flow for Demo {
        type Step = Step;
        type Form = Form;
        type Quote = u64;

        fn steps() -> &'static [StepDescriptor<Step>] {
            const STEPS: &[StepDescriptor<Step>] = &[
                StepDescriptor {
                    id: Step::First,
                    title: "First",
                    fields: &[Field::required("name", "Nom")],
                },
                StepDescriptor {
                    id: Step::Second,
                    title: "Second",
                    fields: &[Field::new(
                        "count",
                        "Nombre",
                        &[Rule::Required, Rule::Integer { min: 1, max: 9 }],
                    )],
                },
                StepDescriptor {
                    id: Step::Last,
                    title: "Last",
                    fields: &[Field::required("accepted", "Conditions")],
                },
            ];
            STEPS
        }

        fn quote(form: &Form) -> Option<u64> {
            form.count.parse::<u64>().ok().map(|c| c * 100)
        }
    }

    #[test]
    fn advance_is_guarded_by_step_rules() {
        let mut wizard = Wizard::<Demo>::new();
        assert_eq!(wizard.position(), (1, 3));
        assert!(!wizard.can_advance());
        match wizard.advance() {
            Advance::Blocked(violations) => assert_eq!(violations[0].field, "name"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(wizard.step(), Step::First);

        wizard.form.name = "Jean".to_string();
        assert!(wizard.can_advance());
        assert_eq!(wizard.advance(), Advance::Moved(Step::Second));

        wizard.form.count = "12".to_string();
        assert!(matches!(wizard.advance(), Advance::Blocked(_)));
        wizard.form.count = "3".to_string();
        assert_eq!(wizard.quote(), Some(300));
        assert_eq!(wizard.advance(), Advance::Moved(Step::Last));

        // The last step never moves forward, even when it is complete.
        wizard.form.accepted = true;
        assert!(!wizard.can_advance());
        assert_eq!(wizard.advance(), Advance::AtEnd);
        assert_eq!(wizard.step(), Step::Last);
    }

    #[test]
    fn retreat_exits_from_first_step() {
        let mut wizard = Wizard::<Demo>::new();
        assert_eq!(wizard.retreat(), Retreat::Exit);
        wizard.form.name = "Jean".to_string();
        wizard.advance();
        assert_eq!(wizard.retreat(), Retreat::Moved(Step::First));
        assert_eq!(wizard.retreat(), Retreat::Exit);
        assert_eq!(wizard.step(), Step::First);
    }

    #[test]
    fn confirm_only_at_last_step() {
        let mut wizard = Wizard::<Demo>::new();
        assert_eq!(wizard.confirm(), Err(ConfirmError::NotAtLastStep));
        wizard.form.name = "Jean".to_string();
        wizard.form.count = "2".to_string();
        wizard.advance();
        wizard.advance();
        assert!(!wizard.can_confirm());
        assert!(matches!(wizard.confirm(), Err(ConfirmError::Invalid(_))));
        wizard.form.accepted = true;
        assert!(wizard.can_confirm());
        assert_eq!(wizard.confirm(), Ok(200));
    }
}
