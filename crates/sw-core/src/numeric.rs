use crate::CoreError;

/// Check that two parallel input arrays have the same length.
pub fn ensure_same_len(what: &'static str, expected: usize, found: usize) -> Result<(), CoreError> {
    if expected == found {
        Ok(())
    } else {
        Err(CoreError::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}

/// `n` evenly spaced values from `start` to `end`, both ends exact.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// True if the slice is strictly increasing or strictly decreasing.
pub fn is_strictly_monotonic(values: &[f64]) -> bool {
    if values.len() < 2 {
        return true;
    }
    let increasing = values.windows(2).all(|w| w[1] > w[0]);
    let decreasing = values.windows(2).all(|w| w[1] < w[0]);
    increasing || decreasing
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linspace_is_monotonic(start in -1e3_f64..1e3, span in 1e-3_f64..1e3, n in 2_usize..200) {
            let v = linspace(start, start + span, n);
            prop_assert_eq!(v.len(), n);
            prop_assert!(is_strictly_monotonic(&v));
        }
    }
}
