/// Input filter list reconciliation
///
/// The host keeps an ordered, externally mutable list of input filters. The
/// layout engine guarantees that the list carries exactly one maximum-length
/// filter matching the configured code length, without disturbing any other
/// filter and without churning allocations when nothing needs to change.

use std::fmt;
use std::sync::Arc;

/// A validation rule opaque to the layout engine
///
/// Rules are carried through reconciliation untouched, identity included.
pub trait InputRule: fmt::Debug {
    /// Whether the candidate input as a whole is acceptable
    fn accept(&self, candidate: &str) -> bool;
}

/// One element of the host's ordered filter list
#[derive(Debug, Clone)]
pub enum InputFilter {
    /// Caps accepted input at a maximum character count
    MaxLength(usize),
    /// Any other validation rule; identity is the shared allocation
    Rule(Arc<dyn InputRule>),
}

impl InputFilter {
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            InputFilter::MaxLength(max) => candidate.chars().count() <= *max,
            InputFilter::Rule(rule) => rule.accept(candidate),
        }
    }

    fn is_max_length(&self, target: usize) -> bool {
        matches!(self, InputFilter::MaxLength(max) if *max == target)
    }
}

/// Whether every filter in the list accepts the candidate input
pub fn accepts_all(filters: &[InputFilter], candidate: &str) -> bool {
    filters.iter().all(|f| f.accepts(candidate))
}

/// Whether the list already carries exactly one `MaxLength` filter and its
/// maximum equals the target length
///
/// This is the termination predicate for reconciliation: a satisfied list is
/// returned untouched, so reassigning the result can never loop.
pub fn is_satisfied(existing: &[InputFilter], target_length: usize) -> bool {
    let mut lengths = existing
        .iter()
        .filter(|f| matches!(f, InputFilter::MaxLength(_)));

    match (lengths.next(), lengths.next()) {
        (Some(only), None) => only.is_max_length(target_length),
        _ => false,
    }
}

/// Reconcile the filter list against the target maximum length
///
/// Returns `None` when the list is already satisfied: no allocation, and the
/// caller must not reassign the list (reassignment is the signal that invokes
/// this logic again, so the no-op case is what breaks the feedback loop).
///
/// Otherwise returns the new list: the first `MaxLength` equal to the target
/// keeps its original position, every other `MaxLength` is dropped, non-length
/// filters keep their identity and relative order, and a fresh
/// `MaxLength(target_length)` is appended if none matched.
///
/// Idempotent: the output always satisfies `is_satisfied`, so applying
/// `reconcile` to its own result returns `None`.
pub fn reconcile(existing: &[InputFilter], target_length: usize) -> Option<Vec<InputFilter>> {
    if is_satisfied(existing, target_length) {
        return None;
    }

    let mut new: Vec<InputFilter> = Vec::with_capacity(existing.len() + 1);
    let mut found = false;

    for filter in existing {
        match filter {
            InputFilter::MaxLength(_) => {
                if !found && filter.is_max_length(target_length) {
                    new.push(filter.clone());
                    found = true;
                }
            }
            InputFilter::Rule(_) => new.push(filter.clone()),
        }
    }

    if !found {
        new.push(InputFilter::MaxLength(target_length));
    }

    Some(new)
}
