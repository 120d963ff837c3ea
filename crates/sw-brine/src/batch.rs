//! Per-point batch evaluation with status flags.

use crate::error::{BrineError, BrineResult};
use rayon::prelude::*;
use std::fmt;

/// Outcome of one point of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointStatus {
    Ok,
    OutOfRange,
    AboveCritical,
    /// The local solve hit its iteration cap; the value slot, when present,
    /// holds the last iterate.
    Convergence,
    InvalidPhase,
}

impl PointStatus {
    pub fn is_ok(self) -> bool {
        self == PointStatus::Ok
    }
}

impl fmt::Display for PointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PointStatus::Ok => "ok",
            PointStatus::OutOfRange => "out of range",
            PointStatus::AboveCritical => "above critical",
            PointStatus::Convergence => "not converged",
            PointStatus::InvalidPhase => "invalid phase",
        };
        f.write_str(s)
    }
}

/// How batches are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalMode {
    /// rayon data-parallel iterator
    #[default]
    Parallel,
    /// plain loop on the calling thread
    Serial,
}

/// A value (or last iterate) together with its status.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOutcome<T> {
    pub value: Option<T>,
    pub status: PointStatus,
}

impl<T> PointOutcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            status: PointStatus::Ok,
        }
    }

    /// A failed point that still carries a best estimate.
    pub fn flagged(value: Option<T>, status: PointStatus) -> Self {
        Self { value, status }
    }
}

/// Values of a batch call with a parallel status array.
///
/// `values[i]` is `None` when point `i` produced nothing usable; a
/// `Convergence` point may still carry its last iterate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchResult<T> {
    pub values: Vec<Option<T>>,
    pub status: Vec<PointStatus>,
}

impl<T> BatchResult<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<(Option<&T>, PointStatus)> {
        Some((self.values.get(i)?.as_ref(), *self.status.get(i)?))
    }

    /// True if every point converged.
    pub fn all_ok(&self) -> bool {
        self.status.iter().all(|s| s.is_ok())
    }

    pub fn count(&self, status: PointStatus) -> usize {
        self.status.iter().filter(|s| **s == status).count()
    }

    /// Indices and values of the `Ok` points.
    pub fn ok_values(&self) -> impl Iterator<Item = (usize, &T)> {
        self.values
            .iter()
            .zip(&self.status)
            .enumerate()
            .filter_map(|(i, (v, s))| if s.is_ok() { v.as_ref().map(|v| (i, v)) } else { None })
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> BatchResult<U> {
        BatchResult {
            values: self.values.into_iter().map(|v| v.map(&mut f)).collect(),
            status: self.status,
        }
    }
}

impl<T> FromIterator<PointOutcome<T>> for BatchResult<T> {
    fn from_iter<I: IntoIterator<Item = PointOutcome<T>>>(iter: I) -> Self {
        let (values, status) = iter.into_iter().map(|o| (o.value, o.status)).unzip();
        Self { values, status }
    }
}

impl<T> From<BrineResult<T>> for PointOutcome<T> {
    fn from(result: BrineResult<T>) -> Self {
        match result {
            Ok(v) => PointOutcome::ok(v),
            Err(e) => PointOutcome::flagged(None, e.status()),
        }
    }
}

/// Evaluate `f` on every input, preserving order.
///
/// Point errors are recorded as statuses; the first fatal error aborts the
/// call.
pub(crate) fn evaluate<I, T, F>(inputs: &[I], mode: EvalMode, f: F) -> BrineResult<BatchResult<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<PointOutcome<T>, BrineError> + Sync + Send,
{
    let outcomes: Vec<Result<PointOutcome<T>, BrineError>> = match mode {
        EvalMode::Parallel => inputs.par_iter().map(&f).collect(),
        EvalMode::Serial => inputs.iter().map(&f).collect(),
    };
    outcomes
        .into_iter()
        .map(|r| match r {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => Ok(PointOutcome::flagged(None, e.status())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt_or_flag(x: &f64) -> Result<PointOutcome<f64>, BrineError> {
        if *x < 0.0 {
            return Err(BrineError::out_of_range("x", *x, 0.0, f64::INFINITY));
        }
        Ok(PointOutcome::ok(x.sqrt()))
    }

    #[test]
    fn statuses_follow_inputs() {
        let inputs = [4.0, -1.0, 9.0];
        let batch = evaluate(&inputs, EvalMode::Serial, sqrt_or_flag).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.status[1], PointStatus::OutOfRange);
        assert_eq!(batch.values[1], None);
        assert_eq!(batch.get(2), Some((Some(&3.0), PointStatus::Ok)));
        assert_eq!(batch.count(PointStatus::Ok), 2);
        assert!(!batch.all_ok());
        let ok: Vec<_> = batch.ok_values().map(|(i, _)| i).collect();
        assert_eq!(ok, vec![0, 2]);
    }

    #[test]
    fn parallel_matches_serial() {
        let inputs: Vec<f64> = (0..500).map(|i| i as f64 - 50.0).collect();
        let serial = evaluate(&inputs, EvalMode::Serial, sqrt_or_flag).unwrap();
        let parallel = evaluate(&inputs, EvalMode::Parallel, sqrt_or_flag).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn fatal_error_aborts() {
        let inputs = [1.0, 2.0];
        let err = evaluate(&inputs, EvalMode::Parallel, |x: &f64| {
            if *x > 1.5 {
                Err(BrineError::InvalidSettings { what: "bad".into() })
            } else {
                Ok(PointOutcome::ok(*x))
            }
        })
        .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn outcome_from_result_keeps_status() {
        let o: PointOutcome<f64> = Err(BrineError::AboveCritical {
            t_k: 700.0,
            tc_k: 647.0,
        })
        .into();
        assert_eq!(o.status, PointStatus::AboveCritical);
        let batch: BatchResult<f64> = vec![o, PointOutcome::ok(1.0)].into_iter().collect();
        let doubled = batch.map(|v| 2.0 * v);
        assert_eq!(doubled.values, vec![None, Some(2.0)]);
    }
}
