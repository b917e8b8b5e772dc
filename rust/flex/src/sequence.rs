// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Constraint-bounded sequence generation.
//!
//! A [`SequenceBuilder`] grows candidate lists one body element at a time:
//! candidate `i` is `prepended ++ body_stream[..i] ++ appended`, where the body
//! stream is the body itself or, with repetition, the body cycled forever.
//! Growth stops at the first candidate that breaks a constraint (or one
//! candidate later with overflow); the longest accepted candidate that also
//! satisfies every condition wins.

use tracing::{trace, warn};

use crate::constraint::{all_hold, Constraint};
use crate::error::{Error, Result};

/// Default cap on growth iterations.
pub const MAX_LOOP_COUNT: usize = 10_000;

/// What a sequence may ask of the distribution pass that owns it.
pub trait SequenceContext<T> {
    /// Length available along the main axis.
    fn target_length(&self) -> f64;

    /// Occupied main-axis length of `elements`, minimum spacing included.
    fn main_dimension_with_min_spacing(&self, elements: &[T]) -> Result<f64>;
}

/// Why growth stopped before the iteration cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A finite body ran out of elements.
    BodyExhausted,
    /// A candidate broke a constraint.
    ConstraintViolated,
    /// The one overflowing candidate was accepted.
    Overflowed,
}

/// How a generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Stopped(StopReason),
    /// The iteration cap was hit; the result is the last valid sequence and
    /// may be incomplete or empty.
    CapReached,
    /// No candidate satisfied every constraint and condition.
    NoValidSequence,
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub elements: Vec<T>,
    pub termination: Termination,
    /// Body elements used by `elements` (head and tail excluded).
    pub consumed: usize,
}

impl<T> Generated<T> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_cap_reached(&self) -> bool {
        self.termination == Termination::CapReached
    }
}

/// Generates the longest element list satisfying a rule set.
#[derive(Debug, Clone)]
pub struct SequenceBuilder<T> {
    pub body: Vec<T>,
    pub prepended: Vec<T>,
    pub appended: Vec<T>,
    pub constraints: Vec<Constraint>,
    pub conditions: Vec<Constraint>,
    pub overflow: bool,
    pub repetition: bool,
    pub max_iterations: usize,
}

impl<T> Default for SequenceBuilder<T> {
    fn default() -> Self {
        Self {
            body: Vec::new(),
            prepended: Vec::new(),
            appended: Vec::new(),
            constraints: Vec::new(),
            conditions: Vec::new(),
            overflow: false,
            repetition: false,
            max_iterations: MAX_LOOP_COUNT,
        }
    }
}

impl<T: Clone> SequenceBuilder<T> {
    /// Finite sequence over `body`.
    pub fn new(body: Vec<T>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Sequence cycling through `body`.
    pub fn repeating(body: Vec<T>) -> Self {
        Self {
            body,
            repetition: true,
            ..Self::default()
        }
    }

    pub fn with_prepended(mut self, head: Vec<T>) -> Self {
        self.prepended = head;
        self
    }

    pub fn with_appended(mut self, tail: Vec<T>) -> Self {
        self.appended = tail;
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_condition(mut self, condition: Constraint) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_overflow(mut self, overflow: bool) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_repetition(mut self, repetition: bool) -> Self {
        self.repetition = repetition;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Generates from the start of the body.
    pub fn generate(&self, context: Option<&dyn SequenceContext<T>>) -> Result<Generated<T>> {
        self.generate_from(0, context)
    }

    /// Generates with the body stream starting at body index `start`.
    pub fn generate_from(
        &self,
        start: usize,
        context: Option<&dyn SequenceContext<T>>,
    ) -> Result<Generated<T>> {
        self.generate_with(start, &[], context)
    }

    /// Generates with `extra` constraints evaluated after the builder's own.
    pub(crate) fn generate_with(
        &self,
        start: usize,
        extra: &[Constraint],
        context: Option<&dyn SequenceContext<T>>,
    ) -> Result<Generated<T>> {
        if self.repetition && self.body.is_empty() {
            return Err(Error::EmptyRepeatingBody);
        }

        let available = if self.repetition {
            None
        } else {
            Some(self.body.len().saturating_sub(start))
        };

        let mut best: Option<(Vec<T>, usize)> = None;
        let mut count = 0;

        for iteration in 0..self.max_iterations {
            if let Some(limit) = available {
                if count > limit {
                    return Ok(finish(best, StopReason::BodyExhausted));
                }
            }

            let candidate = self.candidate(start, count);
            let passes = all_hold(&self.constraints, &candidate, context)?
                && all_hold(extra, &candidate, context)?;
            trace!(iteration, count, len = candidate.len(), passes, "sequence candidate");

            if passes || self.overflow {
                if all_hold(&self.conditions, &candidate, context)? {
                    best = Some((candidate, count));
                }
            }
            if !passes {
                let reason = if self.overflow {
                    StopReason::Overflowed
                } else {
                    StopReason::ConstraintViolated
                };
                return Ok(finish(best, reason));
            }
            count += 1;
        }

        warn!(
            max_iterations = self.max_iterations,
            "sequence growth hit the iteration cap"
        );
        let (elements, consumed) = best.unwrap_or_default();
        Ok(Generated {
            elements,
            termination: Termination::CapReached,
            consumed,
        })
    }

    /// Candidate with `count` body elements starting at body index `start`.
    fn candidate(&self, start: usize, count: usize) -> Vec<T> {
        let mut out =
            Vec::with_capacity(self.prepended.len() + count + self.appended.len());
        out.extend(self.prepended.iter().cloned());
        if self.repetition {
            let n = self.body.len();
            out.extend((0..count).map(|i| self.body[(start + i) % n].clone()));
        } else {
            out.extend(self.body.iter().skip(start).take(count).cloned());
        }
        out.extend(self.appended.iter().cloned());
        out
    }
}

fn finish<T>(best: Option<(Vec<T>, usize)>, reason: StopReason) -> Generated<T> {
    match best {
        Some((elements, consumed)) => Generated {
            elements,
            termination: Termination::Stopped(reason),
            consumed,
        },
        None => Generated {
            elements: Vec::new(),
            termination: Termination::NoValidSequence,
            consumed: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Parity;

    struct Lengths {
        target: f64,
    }

    impl SequenceContext<f64> for Lengths {
        fn target_length(&self) -> f64 {
            self.target
        }

        fn main_dimension_with_min_spacing(&self, elements: &[f64]) -> Result<f64> {
            Ok(elements.iter().sum())
        }
    }

    #[test]
    fn finite_body_is_exhausted() {
        let seq = SequenceBuilder::new(vec![1, 2, 3]);
        let out = seq.generate(None).unwrap();
        assert_eq!(out.elements, vec![1, 2, 3]);
        assert_eq!(out.termination, Termination::Stopped(StopReason::BodyExhausted));
        assert_eq!(out.consumed, 3);
    }

    #[test]
    fn repetition_cycles_until_constraint() {
        let seq = SequenceBuilder::repeating(vec!['a', 'b']).with_constraint(Constraint::MaxCount(5));
        let out = seq.generate(None).unwrap();
        assert_eq!(out.elements, vec!['a', 'b', 'a', 'b', 'a']);
        assert_eq!(out.termination, Termination::Stopped(StopReason::ConstraintViolated));
    }

    #[test]
    fn head_and_tail_count_towards_constraints() {
        let seq = SequenceBuilder::repeating(vec![0])
            .with_prepended(vec![7])
            .with_appended(vec![9])
            .with_constraint(Constraint::MaxCount(4));
        let out = seq.generate(None).unwrap();
        assert_eq!(out.elements, vec![7, 0, 0, 9]);
        assert_eq!(out.consumed, 2);
    }

    #[test]
    fn overflow_accepts_one_more() {
        let ctx = Lengths { target: 2.0 };
        let seq = SequenceBuilder::repeating(vec![0.75]).with_constraint(Constraint::FitsTarget);
        let strict = seq.generate(Some(&ctx)).unwrap();
        assert_eq!(strict.len(), 2);

        let loose = seq.clone().with_overflow(true).generate(Some(&ctx)).unwrap();
        assert_eq!(loose.len(), 3);
        assert_eq!(loose.termination, Termination::Stopped(StopReason::Overflowed));
    }

    #[test]
    fn conditions_filter_without_stopping() {
        let seq = SequenceBuilder::repeating(vec![1])
            .with_constraint(Constraint::MaxCount(5))
            .with_condition(Constraint::Parity(Parity::Even));
        let out = seq.generate(None).unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn no_valid_sequence_is_distinct() {
        let seq = SequenceBuilder::new(vec![1, 2])
            .with_prepended(vec![0, 0, 0])
            .with_constraint(Constraint::MaxCount(2));
        let out = seq.generate(None).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.termination, Termination::NoValidSequence);
    }

    #[test]
    fn cap_terminates_unbounded_growth() {
        let seq = SequenceBuilder::repeating(vec![1u8]).with_max_iterations(50);
        let out = seq.generate(None).unwrap();
        assert!(out.is_cap_reached());
        assert_eq!(out.len(), 49);
    }

    #[test]
    fn empty_repeating_body_is_rejected() {
        let seq: SequenceBuilder<u8> = SequenceBuilder::repeating(Vec::new());
        assert!(matches!(seq.generate(None), Err(Error::EmptyRepeatingBody)));
    }

    #[test]
    fn empty_finite_body_yields_head_and_tail() {
        let seq = SequenceBuilder::new(Vec::new()).with_prepended(vec![1]).with_appended(vec![2]);
        let out = seq.generate(None).unwrap();
        assert_eq!(out.elements, vec![1, 2]);
        assert_eq!(out.consumed, 0);
    }

    #[test]
    fn generate_from_offsets_the_body() {
        let seq = SequenceBuilder::new(vec![1, 2, 3, 4]).with_constraint(Constraint::MaxCount(2));
        let out = seq.generate_from(2, None).unwrap();
        assert_eq!(out.elements, vec![3, 4]);
        let rest = seq.generate_from(4, None).unwrap();
        assert!(rest.is_empty());
        assert_eq!(rest.termination, Termination::Stopped(StopReason::BodyExhausted));
    }

    #[test]
    fn missing_context_surfaces() {
        let seq = SequenceBuilder::new(vec![1.0]).with_constraint(Constraint::FitsTarget);
        assert!(matches!(seq.generate(None), Err(Error::MissingContext("FitsTarget"))));
    }
}
