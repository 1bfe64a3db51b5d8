#![forbid(unsafe_code)]

//! One-shot submission guard.

use std::fmt;

/// Submission lifecycle. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubmitState {
    #[default]
    Open,
    Submitted,
}

/// Why a submit attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// The gate already let one submission through.
    AlreadySubmitted,
    /// Fewer entries than the widget requires.
    EmptySelection { required: usize, actual: usize },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySubmitted => write!(f, "response already submitted"),
            Self::EmptySelection { required, actual } => {
                write!(f, "selection has {actual} entries, at least {required} required")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// Lets exactly one non-empty selection through.
///
/// A refused `EmptySelection` attempt leaves the gate open so the user can
/// fix the selection and try again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitGate {
    state: SubmitState,
}

impl SubmitGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SubmitState::Open,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SubmitState {
        self.state
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self.state, SubmitState::Submitted)
    }

    /// Whether a selection of `entries` would pass, without closing the gate.
    pub const fn check(&self, entries: usize, minimum: usize) -> Result<(), SubmitError> {
        if self.is_submitted() {
            return Err(SubmitError::AlreadySubmitted);
        }
        if entries < minimum {
            return Err(SubmitError::EmptySelection {
                required: minimum,
                actual: entries,
            });
        }
        Ok(())
    }

    /// Close the gate and hand `selection` back if it holds at least
    /// `minimum` entries.
    pub fn try_submit<T>(&mut self, selection: Vec<T>, minimum: usize) -> Result<Vec<T>, SubmitError> {
        if let Err(error) = self.check(selection.len(), minimum) {
            if error == SubmitError::AlreadySubmitted {
                tracing::debug!(message = "submit.duplicate_ignored");
            }
            return Err(error);
        }
        self.state = SubmitState::Submitted;
        tracing::info!(message = "submit.accepted", entries = selection.len());
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_submit_passes_second_refused() {
        let mut gate = SubmitGate::new();
        assert_eq!(gate.try_submit(vec!["a"], 0), Ok(vec!["a"]));
        assert!(gate.is_submitted());
        assert_eq!(gate.try_submit(vec!["a"], 0), Err(SubmitError::AlreadySubmitted));
    }

    #[test]
    fn empty_selection_keeps_gate_open() {
        let mut gate = SubmitGate::new();
        assert_eq!(
            gate.try_submit(Vec::<&str>::new(), 1),
            Err(SubmitError::EmptySelection {
                required: 1,
                actual: 0
            })
        );
        assert_eq!(gate.state(), SubmitState::Open);
        assert_eq!(gate.try_submit(vec!["x"], 1), Ok(vec!["x"]));
    }

    #[test]
    fn check_leaves_gate_open() {
        let mut gate = SubmitGate::new();
        assert_eq!(
            gate.check(0, 1),
            Err(SubmitError::EmptySelection {
                required: 1,
                actual: 0
            })
        );
        assert_eq!(gate.check(2, 1), Ok(()));
        assert_eq!(gate.state(), SubmitState::Open);
        assert_eq!(gate.try_submit(vec![1, 2], 1), Ok(vec![1, 2]));
        assert_eq!(gate.check(2, 1), Err(SubmitError::AlreadySubmitted));
    }

    #[test]
    fn zero_minimum_accepts_empty() {
        let mut gate = SubmitGate::default();
        assert_eq!(gate.try_submit(Vec::<u8>::new(), 0), Ok(vec![]));
    }

    #[test]
    fn display() {
        let err = SubmitError::EmptySelection {
            required: 1,
            actual: 0,
        };
        assert_eq!(err.to_string(), "selection has 0 entries, at least 1 required");
    }
}
