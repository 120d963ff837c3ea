//! Phase-boundary surfaces: row-major grids of (T, P, X) with node status.

use crate::batch::PointStatus;
use crate::composition::CompositionUnit;
use crate::curve::BoundaryPoint;
use crate::error::BrineResult;

/// A boundary swept over two parameters.
///
/// Node `(row, col)` is stored at `row * cols + col`. Nodes whose status is
/// not `Ok` carry NaN coordinates and must be skipped by consumers; every
/// `Ok` node has a composition in [0, 1].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseBoundarySurface {
    rows: usize,
    cols: usize,
    unit: CompositionUnit,
    nodes: Vec<BoundaryPoint>,
    status: Vec<PointStatus>,
}

impl PhaseBoundarySurface {
    pub fn new(
        rows: usize,
        cols: usize,
        unit: CompositionUnit,
        nodes: Vec<BoundaryPoint>,
        status: Vec<PointStatus>,
    ) -> BrineResult<Self> {
        sw_core::ensure_same_len("surface nodes", rows * cols, nodes.len())?;
        sw_core::ensure_same_len("surface status", rows * cols, status.len())?;
        for (node, s) in nodes.iter().zip(&status) {
            if s.is_ok() {
                node.check()?;
            }
        }
        Ok(Self {
            rows,
            cols,
            unit,
            nodes,
            status,
        })
    }

    /// Assemble a surface from per-node outcomes; failed nodes become NaN.
    pub(crate) fn from_outcomes(
        rows: usize,
        cols: usize,
        unit: CompositionUnit,
        outcomes: impl IntoIterator<Item = (Option<BoundaryPoint>, PointStatus)>,
    ) -> BrineResult<Self> {
        let nan = BoundaryPoint::new(f64::NAN, f64::NAN, f64::NAN);
        let (nodes, status): (Vec<_>, Vec<_>) = outcomes
            .into_iter()
            .map(|(node, s)| match node {
                Some(n) if s.is_ok() => (n, s),
                _ if s.is_ok() => (nan, PointStatus::Convergence),
                _ => (nan, s),
            })
            .unzip();
        Self::new(rows, cols, unit, nodes, status)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn unit(&self) -> CompositionUnit {
        self.unit
    }

    pub fn nodes(&self) -> &[BoundaryPoint] {
        &self.nodes
    }

    pub fn status(&self) -> &[PointStatus] {
        &self.status
    }

    pub fn get(&self, row: usize, col: usize) -> Option<(&BoundaryPoint, PointStatus)> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let i = row * self.cols + col;
        Some((&self.nodes[i], self.status[i]))
    }

    pub fn row(&self, row: usize) -> Option<&[BoundaryPoint]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.nodes[row * self.cols..(row + 1) * self.cols])
    }

    pub fn converged(&self) -> usize {
        self.status.iter().filter(|s| s.is_ok()).count()
    }

    pub fn to_unit(&self, unit: CompositionUnit) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            unit,
            nodes: self
                .nodes
                .iter()
                .map(|n| n.convert(self.unit, unit))
                .collect(),
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> PhaseBoundarySurface {
        let outcomes = (0..6).map(|i| {
            let node = BoundaryPoint::new(600.0 + i as f64, 1e7, 0.1);
            if i == 4 {
                (None, PointStatus::OutOfRange)
            } else {
                (Some(node), PointStatus::Ok)
            }
        });
        PhaseBoundarySurface::from_outcomes(2, 3, CompositionUnit::Mole, outcomes).unwrap()
    }

    #[test]
    fn row_major_indexing() {
        let s = grid();
        assert_eq!(s.get(1, 0).map(|(n, _)| n.t_k), Some(603.0));
        assert_eq!(s.get(1, 1).map(|(_, st)| st), Some(PointStatus::OutOfRange));
        assert!(s.get(1, 1).map(|(n, _)| n.x.is_nan()).unwrap_or(false));
        assert_eq!(s.row(0).map(|r| r.len()), Some(3));
        assert!(s.get(2, 0).is_none());
        assert_eq!(s.converged(), 5);
    }

    #[test]
    fn shape_is_checked() {
        let nodes = vec![BoundaryPoint::new(600.0, 1e7, 0.1); 5];
        let status = vec![PointStatus::Ok; 5];
        let err = PhaseBoundarySurface::new(2, 3, CompositionUnit::Mass, nodes, status).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn converged_nodes_stay_in_unit_interval() {
        let nodes = vec![BoundaryPoint::new(600.0, 1e7, 1.2)];
        let unit = CompositionUnit::Mole;
        let ok = vec![PointStatus::Ok];
        assert!(PhaseBoundarySurface::new(1, 1, unit, nodes.clone(), ok).is_err());
        let flagged = vec![PointStatus::Convergence];
        assert!(PhaseBoundarySurface::new(1, 1, unit, nodes, flagged).is_ok());
    }

    #[test]
    fn unit_conversion_keeps_status() {
        let mass = grid().to_unit(CompositionUnit::Mass);
        assert!(mass.get(0, 0).map(|(n, _)| n.x > 0.1).unwrap_or(false));
        assert_eq!(mass.status(), grid().status());
    }
}
