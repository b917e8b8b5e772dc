// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rules evaluated against candidate sequences.
//!
//! The same [`Constraint`] type serves both as a *constraint* (a failure stops
//! sequence growth) and as a *condition* (a failure only skips the candidate).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sequence::SequenceContext;

/// Length comparisons accept this much overshoot to absorb rounding.
pub const LENGTH_TOLERANCE: f64 = 1e-9;

/// Parity of a candidate's element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

/// A predicate over a candidate sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// At most `n` elements.
    MaxCount(usize),
    /// At least `n` elements.
    MinCount(usize),
    /// Occupied main-axis length (with minimum spacing) at most this value.
    MaxLength(f64),
    /// Occupied main-axis length (with minimum spacing) fits the context's
    /// target length.
    FitsTarget,
    /// Element count has the given parity.
    Parity(Parity),
    And(Vec<Constraint>),
    Or(Vec<Constraint>),
    Not(Box<Constraint>),
}

impl Constraint {
    pub fn and(self, other: Constraint) -> Constraint {
        match self {
            Constraint::And(mut all) => {
                all.push(other);
                Constraint::And(all)
            }
            first => Constraint::And(vec![first, other]),
        }
    }

    pub fn or(self, other: Constraint) -> Constraint {
        match self {
            Constraint::Or(mut any) => {
                any.push(other);
                Constraint::Or(any)
            }
            first => Constraint::Or(vec![first, other]),
        }
    }

    pub fn negate(self) -> Constraint {
        Constraint::Not(Box::new(self))
    }

    /// Variant name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::MaxCount(_) => "MaxCount",
            Constraint::MinCount(_) => "MinCount",
            Constraint::MaxLength(_) => "MaxLength",
            Constraint::FitsTarget => "FitsTarget",
            Constraint::Parity(_) => "Parity",
            Constraint::And(_) => "And",
            Constraint::Or(_) => "Or",
            Constraint::Not(_) => "Not",
        }
    }

    /// `true` if evaluating this rule measures candidates through a context.
    pub fn needs_context(&self) -> bool {
        match self {
            Constraint::MaxLength(_) | Constraint::FitsTarget => true,
            Constraint::And(rules) | Constraint::Or(rules) => {
                rules.iter().any(Constraint::needs_context)
            }
            Constraint::Not(rule) => rule.needs_context(),
            _ => false,
        }
    }

    /// Evaluates the rule on `candidate`.
    ///
    /// Measuring rules fail with [`Error::MissingContext`] when `context` is
    /// `None`. `And`/`Or` short-circuit.
    pub fn evaluate<T>(
        &self,
        candidate: &[T],
        context: Option<&dyn SequenceContext<T>>,
    ) -> Result<bool> {
        let count = candidate.len();
        let passes = match self {
            Constraint::MaxCount(n) => count <= *n,
            Constraint::MinCount(n) => count >= *n,
            Constraint::Parity(Parity::Even) => count % 2 == 0,
            Constraint::Parity(Parity::Odd) => count % 2 == 1,
            Constraint::MaxLength(max) => {
                let ctx = context.ok_or(Error::MissingContext(self.name()))?;
                ctx.main_dimension_with_min_spacing(candidate)? <= max + LENGTH_TOLERANCE
            }
            Constraint::FitsTarget => {
                let ctx = context.ok_or(Error::MissingContext(self.name()))?;
                ctx.main_dimension_with_min_spacing(candidate)?
                    <= ctx.target_length() + LENGTH_TOLERANCE
            }
            Constraint::And(rules) => {
                for rule in rules {
                    if !rule.evaluate(candidate, context)? {
                        return Ok(false);
                    }
                }
                true
            }
            Constraint::Or(rules) => {
                for rule in rules {
                    if rule.evaluate(candidate, context)? {
                        return Ok(true);
                    }
                }
                false
            }
            Constraint::Not(rule) => !rule.evaluate(candidate, context)?,
        };
        Ok(passes)
    }
}

/// `true` if every rule holds.
pub(crate) fn all_hold<T>(
    rules: &[Constraint],
    candidate: &[T],
    context: Option<&dyn SequenceContext<T>>,
) -> Result<bool> {
    for rule in rules {
        if !rule.evaluate(candidate, context)? {
            return Ok(false);
        }
    }
    Ok(true)
}
