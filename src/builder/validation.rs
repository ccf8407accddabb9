//! Strict validation of transition specs.
//!
//! Collects every violation in one pass with stillwater's `Validation`
//! instead of stopping at the first bad spec.

use crate::builder::error::SpecViolation;
use crate::graph::TransitionSpec;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<SpecViolation>>;

fn check_index(spec: usize, index: usize, states: usize, source: bool) -> Check {
    if index < states {
        Validation::success(())
    } else if source {
        Validation::fail(SpecViolation::SourceOutOfRange {
            spec,
            index,
            states,
        })
    } else {
        Validation::fail(SpecViolation::TargetOutOfRange {
            spec,
            index,
            states,
        })
    }
}

/// Validate `specs` against a state list of length `states`.
///
/// Reports out-of-range indices on either end and repeated
/// `(source, target)` pairs.
pub fn validate_transitions(states: usize, specs: &[TransitionSpec]) -> Check {
    let mut checks: Vec<Check> = Vec::new();
    let mut seen: Vec<(usize, usize)> = Vec::new();

    for (spec, transition) in specs.iter().enumerate() {
        checks.push(check_index(spec, transition.source, states, true));
        checks.push(check_index(spec, transition.target, states, false));

        if transition.source >= states || transition.target >= states {
            continue;
        }
        let pair = (transition.source, transition.target);
        if seen.contains(&pair) {
            checks.push(Validation::fail(SpecViolation::DuplicatePair {
                spec,
                from: pair.0,
                to: pair.1,
            }));
        } else {
            seen.push(pair);
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
