//! Specification evaluator
//!
//! A specification is turned into a [`Plan`] and the plan is folded over a
//! [`Queryable`] handle. Stages always run in the same order, whatever the
//! specification contains:
//!
//! 1. criteria
//! 2. distinct, on the projected value
//! 3. order, on the entity
//! 4. paging, over the filtered and ordered rows
//! 5. projection, only for rows that survived paging
//!
//! Count plans keep stages 1 and 2 only, so a count always agrees with the
//! rows a list call could return.

use std::fmt;

use tracing::trace;

use crate::clause::Direction;
use crate::error::Result;
use crate::specification::Specification;
use crate::traits::Queryable;

/// One reshaping step of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Criteria,
    Distinct,
    Order {
        key: &'static str,
        direction: Direction,
    },
    Paging {
        skip: usize,
        take: usize,
    },
}

/// How a plan materializes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Map surviving rows through the projector
    Project,
    /// Report the number of surviving rows
    Count,
}

/// Ordered stages plus a terminal step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    stages: Vec<Stage>,
    terminal: Terminal,
}

impl Plan {
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in &self.stages {
            match stage {
                Stage::Criteria => f.write_str("criteria -> ")?,
                Stage::Distinct => f.write_str("distinct -> ")?,
                Stage::Order { key, direction } => write!(f, "order({key} {direction}) -> ")?,
                Stage::Paging { skip, take } => write!(f, "page(skip {skip}, take {take}) -> ")?,
            }
        }
        match self.terminal {
            Terminal::Project => f.write_str("project"),
            Terminal::Count => f.write_str("count"),
        }
    }
}

/// Build the list plan for a specification.
pub fn plan<T, R>(spec: &Specification<T, R>) -> Plan {
    let mut stages = Vec::with_capacity(4);
    if spec.criteria().is_some() {
        stages.push(Stage::Criteria);
    }
    if spec.is_distinct() {
        stages.push(Stage::Distinct);
    }
    if let Some(order) = spec.order() {
        stages.push(Stage::Order {
            key: order.key(),
            direction: order.direction(),
        });
    }
    if spec.is_paging_enabled() {
        stages.push(Stage::Paging {
            skip: spec.skip(),
            take: spec.take(),
        });
    }
    Plan {
        stages,
        terminal: Terminal::Project,
    }
}

/// Build the count plan for a specification: criteria and distinct only.
pub fn count_plan<T, R>(spec: &Specification<T, R>) -> Plan {
    let stages = plan(spec)
        .stages
        .into_iter()
        .filter(|stage| matches!(stage, Stage::Criteria | Stage::Distinct))
        .collect();
    Plan {
        stages,
        terminal: Terminal::Count,
    }
}

fn apply<T, R, Q>(query: Q, stage: &Stage, spec: &Specification<T, R>) -> Q
where
    Q: Queryable<T>,
{
    match stage {
        Stage::Criteria => match spec.criteria() {
            Some(criteria) => query.filter(criteria),
            None => query,
        },
        Stage::Distinct => match spec.distinct_key() {
            Some(key) => query.distinct_by(|entity| key.apply(entity)),
            None => query,
        },
        Stage::Order { .. } => match spec.order() {
            Some(order) => query.order_by(order),
            None => query,
        },
        Stage::Paging { skip, take } => query.window(*skip, *take),
    }
}

/// Evaluate a specification against a base collection handle.
///
/// Faults raised by the handle's terminal step are returned unchanged.
pub fn evaluate<T, R, Q>(source: Q, spec: &Specification<T, R>) -> Result<Vec<R>>
where
    Q: Queryable<T>,
{
    let plan = plan(spec);
    trace!(plan = %plan, "evaluating specification");
    plan.stages
        .iter()
        .fold(source, |query, stage| apply(query, stage, spec))
        .project(spec.projector())
}

/// Count the rows a specification matches, ignoring order, paging and
/// projection.
pub fn evaluate_count<T, R, Q>(source: Q, spec: &Specification<T, R>) -> Result<u64>
where
    Q: Queryable<T>,
{
    let plan = count_plan(spec);
    trace!(plan = %plan, "evaluating count");
    plan.stages
        .iter()
        .fold(source, |query, stage| apply(query, stage, spec))
        .count()
}
