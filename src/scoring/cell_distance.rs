use crate::core::cell::Cell;
use crate::core::matrix::DistanceMatrix;
use crate::distance::backend::{Backend, DefaultBackend};
use crate::distance::batched::EditDistanceEngine;
use crate::utils::validation::ValidationError;

/// Produces the X-vs-A and X-vs-B distance matrices of a cell.
#[derive(Debug, Clone)]
pub struct CellDistanceComputer<B: Backend = DefaultBackend> {
    engine: EditDistanceEngine<B>,
}

impl Default for CellDistanceComputer<DefaultBackend> {
    fn default() -> Self {
        Self::new(EditDistanceEngine::default())
    }
}

impl<B: Backend> CellDistanceComputer<B> {
    pub fn new(engine: EditDistanceEngine<B>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &EditDistanceEngine<B> {
        &self.engine
    }

    /// Returns `(dxa, dxb)`.
    ///
    /// X-vs-A uses the cell's symmetry flag. X-vs-B is always computed in
    /// full, even when it happens to be square.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a symmetric cell's A and X collections differ
    /// or the cost model does not allow symmetric comparison.
    pub fn compute(&self, cell: &Cell) -> Result<(DistanceMatrix, DistanceMatrix), ValidationError> {
        let dxa = self
            .engine
            .batched_edit_distance(&cell.x, &cell.a, cell.is_symmetric)?;
        let dxb = self.engine.batched_edit_distance(&cell.x, &cell.b, false)?;
        Ok((dxa, dxb))
    }
}
