//! Sparse assembly and factorization for the global stiffness matrix
//!
//! Stiffness matrices of frame models are overwhelmingly sparse. Assembly
//! accumulates triplets and compresses them to CSC once; the compressed
//! matrix is handed to a direct sparse factorization that is reused for
//! every load case.

use faer::prelude::*;
use faer::sparse::linalg::solvers::{Cholesky, Qr, SymbolicCholesky, SymbolicQr};
use faer::sparse::linalg::CholeskyError as SparseCholeskyError;
use faer::sparse::{SparseColMat, SymbolicSparseColMat};
use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Structured factorization failure kinds
///
/// The solve driver switches on these instead of matching error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorError {
    /// Cholesky hit a non-positive pivot: the matrix is not SPD
    NotPositiveDefinite,
    /// Symbolic analysis or numeric factorization failed structurally
    Structural,
}

/// Sparse matrix builder using triplet (COO) accumulation
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    /// Create a new builder for a `size` x `size` symmetric matrix
    pub fn new(size: usize) -> Self {
        // Pre-allocate for typical frame connectivity:
        // 3 DOFs per node, a handful of incident members each
        let estimated_nnz = size * 30;
        Self {
            size,
            entries: Vec::with_capacity(estimated_nnz),
        }
    }

    /// Add a value to the matrix (duplicates accumulate on compression)
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if value.abs() > 1e-15 {
            self.entries.push((row, col, value));
        }
    }

    /// Number of stored triplets
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Compress to CSC, summing duplicate entries
    pub fn to_csc(&self) -> SparseColMat<usize, f64> {
        let mut coo = CooMatrix::new(self.size, self.size);
        for &(row, col, value) in &self.entries {
            coo.push(row, col, value);
        }

        let csc = CscMatrix::from(&coo);
        let (offsets, indices, values) = csc.csc_data();

        // SAFETY: the arrays come straight out of a valid CscMatrix, whose
        // column offsets are monotone and row indices sorted per column.
        unsafe {
            SparseColMat::new(
                SymbolicSparseColMat::new_unchecked(
                    self.size,
                    self.size,
                    offsets.to_vec(),
                    None,
                    indices.to_vec(),
                ),
                values.to_vec(),
            )
        }
    }
}

enum Factorization {
    Cholesky(Cholesky<usize, f64>),
    Qr(Qr<usize, f64>),
}

/// Direct solver for the assembled symmetric system
///
/// Factors once and solves repeatedly; the factorization workspace lives
/// as long as the solver value.
pub struct SymmetricSolver {
    size: usize,
    factor: Factorization,
}

impl SymmetricSolver {
    /// Sparse LL^T factorization with a fill-reducing ordering
    ///
    /// Fails with [`FactorError::NotPositiveDefinite`] when a pivot is
    /// non-positive, which is how mechanisms and under-restrained models
    /// surface.
    pub fn cholesky(matrix: &SparseColMat<usize, f64>) -> Result<Self, FactorError> {
        let matrix_ref = matrix.as_ref();
        let symbolic = SymbolicCholesky::try_new(matrix_ref.symbolic(), faer::Side::Lower)
            .map_err(|_| FactorError::Structural)?;

        match Cholesky::try_new_with_symbolic(symbolic, matrix_ref, faer::Side::Lower) {
            Ok(llt) => Ok(Self {
                size: matrix.nrows(),
                factor: Factorization::Cholesky(llt),
            }),
            Err(SparseCholeskyError::NotPositiveDefinite) => Err(FactorError::NotPositiveDefinite),
            Err(_) => Err(FactorError::Structural),
        }
    }

    /// Sparse QR factorization in natural ordering
    ///
    /// Used as the fallback when Cholesky diagnoses a non-SPD matrix; the
    /// solution is then a least-squares one and callers must screen it for
    /// non-finite entries.
    pub fn qr(matrix: &SparseColMat<usize, f64>) -> Result<Self, FactorError> {
        let matrix_ref = matrix.as_ref();
        let symbolic =
            SymbolicQr::try_new(matrix_ref.symbolic()).map_err(|_| FactorError::Structural)?;

        let qr = Qr::try_new_with_symbolic(symbolic, matrix_ref)
            .map_err(|_| FactorError::Structural)?;

        Ok(Self {
            size: matrix.nrows(),
            factor: Factorization::Qr(qr),
        })
    }

    /// Whether the SPD factorization succeeded (false means QR fallback)
    pub fn is_positive_definite(&self) -> bool {
        matches!(self.factor, Factorization::Cholesky(_))
    }

    /// Solve the factored system for a single right-hand side
    pub fn solve(&self, b: &DVector<f64>) -> DVector<f64> {
        let mut x = faer::Mat::from_fn(self.size, 1, |i, _| b[i]);

        match &self.factor {
            Factorization::Cholesky(llt) => llt.solve_in_place(x.as_mut()),
            Factorization::Qr(qr) => qr.solve_in_place(x.as_mut()),
        }

        DVector::from_iterator(self.size, (0..self.size).map(|i| x[(i, 0)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spd_3x3() -> SparseColMat<usize, f64> {
        let mut builder = SparseMatrixBuilder::new(3);
        builder.add(0, 0, 4.0);
        builder.add(0, 1, 2.0);
        builder.add(1, 0, 2.0);
        builder.add(1, 1, 5.0);
        builder.add(1, 2, 2.0);
        builder.add(2, 1, 2.0);
        builder.add(2, 2, 3.0);
        builder.to_csc()
    }

    #[test]
    fn test_builder_accumulates_duplicates() {
        let mut builder = SparseMatrixBuilder::new(2);
        builder.add(0, 0, 1.5);
        builder.add(0, 0, 2.5);
        builder.add(1, 1, 1.0);

        let csc = builder.to_csc();
        let solver = SymmetricSolver::cholesky(&csc).unwrap();
        let x = solver.solve(&DVector::from_vec(vec![8.0, 3.0]));

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cholesky_spd() {
        let matrix = spd_3x3();
        let solver = SymmetricSolver::cholesky(&matrix).unwrap();
        assert!(solver.is_positive_definite());

        let b = DVector::from_vec(vec![2.0, 8.0, 5.0]);
        let x = solver.solve(&b);

        assert_relative_eq!(x[0], -0.1875, epsilon = 1e-10);
        assert_relative_eq!(x[1], 1.375, epsilon = 1e-10);
        assert_relative_eq!(x[2], 0.75, epsilon = 1e-10);
    }

    #[test]
    fn test_cholesky_rejects_indefinite() {
        let mut builder = SparseMatrixBuilder::new(2);
        builder.add(0, 0, 1.0);
        builder.add(0, 1, 2.0);
        builder.add(1, 0, 2.0);
        builder.add(1, 1, 1.0); // eigenvalues 3 and -1

        let matrix = builder.to_csc();
        assert_eq!(
            SymmetricSolver::cholesky(&matrix).err(),
            Some(FactorError::NotPositiveDefinite)
        );
    }

    #[test]
    fn test_qr_solves_indefinite() {
        let mut builder = SparseMatrixBuilder::new(2);
        builder.add(0, 0, 1.0);
        builder.add(0, 1, 2.0);
        builder.add(1, 0, 2.0);
        builder.add(1, 1, 1.0);

        let matrix = builder.to_csc();
        let solver = SymmetricSolver::qr(&matrix).unwrap();
        assert!(!solver.is_positive_definite());

        // [1 2; 2 1] x = [5; 4]  =>  x = [1; 2]
        let x = solver.solve(&DVector::from_vec(vec![5.0, 4.0]));
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_factorization_reuse_across_rhs() {
        let matrix = spd_3x3();
        let solver = SymmetricSolver::cholesky(&matrix).unwrap();

        let x1 = solver.solve(&DVector::from_vec(vec![2.0, 8.0, 5.0]));
        let x2 = solver.solve(&DVector::from_vec(vec![4.0, 16.0, 10.0]));

        for i in 0..3 {
            assert_relative_eq!(x2[i], 2.0 * x1[i], epsilon = 1e-10);
        }
    }
}
