//! Algorithm parameters carried by a problem instance.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable parameters of the construction heuristics.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::Parameters;
///
/// let params = Parameters::default()
///     .with_num_clusters_threshold(4)
///     .with_alphas(0.7, 0.3)
///     .with_neighbourhood_size(5);
/// assert_eq!(params.num_clusters_threshold, 4);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Largest cluster count tried by the multi-start driver.
    pub num_clusters_threshold: usize,
    /// Weight of the detour distance in the insertion cost.
    pub alpha1: f64,
    /// Weight of the service-start push-forward in the insertion cost.
    pub alpha2: f64,
    /// Number of candidate insertion positions examined per route (p).
    pub neighbourhood_size: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            num_clusters_threshold: 3,
            alpha1: 0.5,
            alpha2: 0.5,
            neighbourhood_size: 10,
        }
    }
}

impl Parameters {
    /// Sets the cluster-count threshold.
    pub fn with_num_clusters_threshold(mut self, n: usize) -> Self {
        self.num_clusters_threshold = n;
        self
    }

    /// Sets both insertion-cost weights.
    pub fn with_alphas(mut self, alpha1: f64, alpha2: f64) -> Self {
        self.alpha1 = alpha1;
        self.alpha2 = alpha2;
        self
    }

    /// Sets the neighbourhood size p.
    pub fn with_neighbourhood_size(mut self, p: usize) -> Self {
        self.neighbourhood_size = p;
        self
    }

    /// Checks the parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.num_clusters_threshold == 0 {
            return Err(Error::invalid_instance(
                "cluster-count threshold must be at least 1",
            ));
        }
        if self.neighbourhood_size == 0 {
            return Err(Error::invalid_instance(
                "neighbourhood size must be at least 1",
            ));
        }
        for (name, alpha) in [("alpha1", self.alpha1), ("alpha2", self.alpha2)] {
            if !alpha.is_finite() || alpha < 0.0 {
                return Err(Error::invalid_instance(format!(
                    "{name} must be finite and non-negative, got {alpha}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let params = Parameters::default().with_num_clusters_threshold(0);
        assert!(matches!(params.validate(), Err(Error::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_zero_neighbourhood() {
        let params = Parameters::default().with_neighbourhood_size(0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_alpha() {
        assert!(Parameters::default().with_alphas(-0.1, 1.0).validate().is_err());
        assert!(Parameters::default().with_alphas(1.0, f64::NAN).validate().is_err());
    }
}
