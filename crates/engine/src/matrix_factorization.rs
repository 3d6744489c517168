//! Truncated Singular Value Decomposition
//!
//! Decomposes the dense user-item rating matrix into rank-k latent factors
//! with nalgebra's SVD, keeping the k largest singular triplets. User factors
//! carry the singular values (`U·Σ`), item factors are the rows of `Vᵀ`.

use crate::error::{RecommendError, Result};
use nalgebra::{DMatrix, SVD};
use ndarray::{Array1, Array2};

/// Truncated SVD configuration parameters
#[derive(Debug, Clone)]
pub struct SvdConfig {
    /// Number of latent factors to keep
    pub rank: usize,
    /// Iteration cap handed to the SVD solver
    pub max_iterations: usize,
    /// Solver convergence and zero-singular-value threshold
    pub tolerance: f64,
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self {
            rank: 20,
            max_iterations: 10_000,
            tolerance: 1e-10,
        }
    }
}

/// Output of a truncated SVD fit
#[derive(Debug, Clone)]
pub struct LatentFactors {
    /// User latent factors `U·Σ`: [num_users x k]
    pub user_factors: Array2<f64>,
    /// Item latent factors `Vᵀ`: [k x num_items]
    pub item_factors: Array2<f64>,
    /// Singular values in descending order
    pub singular_values: Vec<f64>,
}

impl LatentFactors {
    fn empty(num_users: usize, num_items: usize) -> Self {
        Self {
            user_factors: Array2::zeros((num_users, 0)),
            item_factors: Array2::zeros((0, num_items)),
            singular_values: Vec::new(),
        }
    }

    /// Number of latent dimensions actually kept
    pub fn rank(&self) -> usize {
        self.item_factors.nrows()
    }

    /// Dense predicted-score matrix `(U·Σ)·Vᵀ`
    pub fn reconstruct(&self) -> Array2<f64> {
        self.user_factors.dot(&self.item_factors)
    }

    /// Predicted score for a single (row, column) cell
    pub fn predict(&self, user_idx: usize, item_idx: usize) -> f64 {
        self.user_factors
            .row(user_idx)
            .dot(&self.item_factors.column(item_idx))
    }

    /// Predicted scores for one user row
    pub fn predict_row(&self, user_idx: usize) -> Array1<f64> {
        self.user_factors.row(user_idx).dot(&self.item_factors)
    }
}

/// Deterministic truncated SVD
pub struct TruncatedSvd {
    config: SvdConfig,
}

impl TruncatedSvd {
    pub fn new(config: SvdConfig) -> Self {
        Self { config }
    }

    /// Fit the decomposition.
    ///
    /// The rank is clamped to `min(num_users, num_items)`. Components whose
    /// singular value is numerically zero are dropped, so the returned rank
    /// can be lower than requested for rank-deficient input.
    pub fn fit(&self, matrix: &Array2<f64>) -> Result<LatentFactors> {
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(RecommendError::Decomposition(
                "rating matrix contains non-finite values".to_string(),
            ));
        }

        let (num_users, num_items) = matrix.dim();
        let k = self.config.rank.min(num_users).min(num_items);
        if k < self.config.rank {
            tracing::debug!(
                requested = self.config.rank,
                effective = k,
                "Clamped SVD rank to matrix dimensions"
            );
        }
        if k == 0 {
            return Ok(LatentFactors::empty(num_users, num_items));
        }

        let dense = DMatrix::from_fn(num_users, num_items, |i, j| matrix[[i, j]]);
        let svd = SVD::try_new(
            dense,
            true,
            true,
            self.config.tolerance,
            self.config.max_iterations,
        )
        .ok_or_else(|| {
            RecommendError::Decomposition(format!(
                "SVD did not converge within {} iterations",
                self.config.max_iterations
            ))
        })?;
        let u = svd
            .u
            .ok_or_else(|| RecommendError::Decomposition("SVD failed to compute U".to_string()))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| RecommendError::Decomposition("SVD failed to compute V^T".to_string()))?;

        // nalgebra does not guarantee descending singular values
        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

        let largest = order.first().map(|&c| svd.singular_values[c]).unwrap_or(0.0);
        let threshold = self.config.tolerance * (largest * largest).max(1.0);
        let kept: Vec<usize> = order
            .into_iter()
            .take(k)
            .take_while(|&c| {
                let sigma = svd.singular_values[c];
                sigma * sigma > threshold
            })
            .collect();
        if kept.len() < k {
            tracing::debug!(
                component = kept.len(),
                "Remaining singular values are zero"
            );
        }

        let rank = kept.len();
        let singular_values: Vec<f64> = kept.iter().map(|&c| svd.singular_values[c]).collect();
        let user_factors = Array2::from_shape_fn((num_users, rank), |(i, c)| {
            u[(i, kept[c])] * singular_values[c]
        });
        let item_factors = Array2::from_shape_fn((rank, num_items), |(c, j)| v_t[(kept[c], j)]);

        tracing::debug!(
            users = num_users,
            items = num_items,
            rank,
            "Fitted truncated SVD"
        );

        Ok(LatentFactors {
            user_factors,
            item_factors,
            singular_values,
        })
    }
}

impl Default for TruncatedSvd {
    fn default() -> Self {
        Self::new(SvdConfig::default())
    }
}
