//! Ordered record of activations.

use crate::catalog::TriggerId;
use crate::graph::{StateId, TransitionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One move of the active marker.
///
/// `from` is `None` for the initial entry. `trigger` and `via` are set only
/// when the move was caused by a fired trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub from: Option<StateId>,
    pub to: StateId,
    pub trigger: Option<TriggerId>,
    pub via: Option<TransitionId>,
    pub timestamp: DateTime<Utc>,
}

/// Activations in the order they happened.
///
/// With a limit set, only the most recent `limit` activations are kept.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivationHistory {
    activations: Vec<Activation>,
    #[serde(default)]
    limit: Option<usize>,
}

impl ActivationHistory {
    pub fn new() -> Self {
        Self {
            activations: Vec::new(),
            limit: None,
        }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            activations: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append `activation`, dropping the oldest entries beyond the limit.
    pub fn record(&mut self, activation: Activation) {
        self.activations.push(activation);
        if let Some(limit) = self.limit {
            let excess = self.activations.len().saturating_sub(limit);
            if excess > 0 {
                self.activations.drain(..excess);
            }
        }
    }

    /// Remove every entry, keeping the limit.
    pub fn clear(&mut self) {
        self.activations.clear();
    }

    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    pub fn last(&self) -> Option<&Activation> {
        self.activations.last()
    }

    /// States visited, in order.
    ///
    /// Each activation contributes its `to`. Its `from` is inserted first
    /// whenever it differs from the previous `to`, so a gap in the records
    /// never reads as a move that did not happen.
    pub fn path(&self) -> Vec<&StateId> {
        let mut path: Vec<&StateId> = Vec::new();
        for activation in &self.activations {
            if let Some(from) = activation.from.as_ref() {
                if path.last() != Some(&from) {
                    path.push(from);
                }
            }
            path.push(&activation.to);
        }
        path
    }

    /// Time between the first and last activation.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.activations.first()?, self.activations.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activation(from: Option<&str>, to: &str, timestamp: DateTime<Utc>) -> Activation {
        Activation {
            from: from.map(StateId::from),
            to: to.into(),
            trigger: None,
            via: None,
            timestamp,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = ActivationHistory::new();
        assert!(history.activations().is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn path_starts_at_initial_entry() {
        let now = Utc::now();
        let mut history = ActivationHistory::new();
        history.record(activation(None, "0", now));
        history.record(activation(Some("0"), "1", now));

        let path: Vec<_> = history.path().into_iter().map(|s| s.as_str()).collect();
        assert_eq!(path, vec!["0", "1"]);
    }

    #[test]
    fn path_includes_origin_when_first_record_has_one() {
        let now = Utc::now();
        let mut history = ActivationHistory::new();
        history.record(activation(Some("2"), "3", now));

        let path: Vec<_> = history.path().into_iter().map(|s| s.as_str()).collect();
        assert_eq!(path, vec!["2", "3"]);
    }

    #[test]
    fn path_does_not_bridge_unrecorded_moves() {
        let now = Utc::now();
        let mut history = ActivationHistory::new();
        history.record(activation(None, "0", now));
        history.record(activation(Some("0"), "1", now));
        history.record(activation(Some("0"), "2", now));

        let path: Vec<_> = history.path().into_iter().map(|s| s.as_str()).collect();
        assert_eq!(path, vec!["0", "1", "0", "2"]);
    }

    #[test]
    fn limit_keeps_most_recent_entries() {
        let now = Utc::now();
        let mut history = ActivationHistory::with_limit(Some(3));
        history.record(activation(None, "0", now));
        for i in 1..10 {
            let (from, to) = ((i - 1).to_string(), i.to_string());
            history.record(activation(Some(from.as_str()), &to, now));
        }

        assert_eq!(history.activations().len(), 3);
        assert_eq!(history.activations()[0].to.as_str(), "7");
        assert_eq!(history.last().unwrap().to.as_str(), "9");

        history.clear();
        assert!(history.activations().is_empty());
        assert_eq!(history.limit(), Some(3));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = ActivationHistory::with_limit(Some(0));
        history.record(activation(None, "0", Utc::now()));
        assert!(history.activations().is_empty());
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut history = ActivationHistory::new();
        history.record(activation(None, "0", start));
        history.record(activation(Some("0"), "1", start + chrono::Duration::milliseconds(250)));

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_activation_has_zero_duration() {
        let mut history = ActivationHistory::new();
        history.record(activation(None, "0", Utc::now()));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn history_serializes() {
        let mut history = ActivationHistory::new();
        history.record(activation(None, "0", Utc::now()));

        let json = serde_json::to_string(&history).unwrap();
        let back: ActivationHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.activations(), history.activations());
    }
}
