use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};

use super::{Predictor, Regressor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Kernel {
    #[default]
    Linear,
    /// Gaussian, width set from the feature variance.
    Rbf,
    /// Cubic polynomial, no constant term, inputs scaled so the kernel's
    /// gamma is `1 / (n_features * var(X))`.
    Poly,
}

/// Epsilon-insensitive support vector regression.
#[derive(Debug, Clone, Copy)]
pub struct SupportVector {
    pub kernel: Kernel,
    pub c: f64,
    pub epsilon: f64,
}

impl Default for SupportVector {
    fn default() -> Self {
        Self {
            kernel: Kernel::Linear,
            c: 1.0,
            epsilon: 0.1,
        }
    }
}

pub struct FittedSvr {
    model: Svm<f64, f64>,
    /// Applied to inputs before the kernel sees them.
    scale: f64,
}

impl Regressor for SupportVector {
    type Fitted = FittedSvr;

    fn name(&self) -> &'static str {
        "svr"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<FittedSvr> {
        if self.c <= 0.0 || self.epsilon < 0.0 {
            bail!("C must be positive and epsilon non-negative (C={}, epsilon={})", self.c, self.epsilon);
        }
        let params = Svm::<f64, f64>::params().c_svr(self.c, Some(self.epsilon));
        let (params, scale) = match self.kernel {
            Kernel::Linear => (params.linear_kernel(), 1.0),
            Kernel::Rbf => (params.gaussian_kernel(rbf_width(x)), 1.0),
            // (gamma * <x, y>)^3 == (<s*x, s*y>)^3 with s = sqrt(gamma)
            Kernel::Poly => (params.polynomial_kernel(0.0, 3.0), rbf_width(x).recip().sqrt()),
        };
        let ds = Dataset::new(x * scale, y.clone());
        let model = params
            .fit(&ds)
            .map_err(|e| anyhow!("svr fit failed: {}", e))?;
        Ok(FittedSvr { model, scale })
    }
}

impl Predictor for FittedSvr {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let x = x * self.scale;
        Ok(linfa::traits::Predict::predict(&self.model, &x))
    }
}

/// `n_features * var(X)` over all entries, the reciprocal of the usual
/// "scale" gamma.
fn rbf_width(x: &Array2<f64>) -> f64 {
    let var = x.var(0.0);
    let width = x.ncols() as f64 * var;
    if width.is_finite() && width > 0.0 {
        width
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::linear_frame;
    use crate::model::{evaluate, train};
    use ndarray::array;

    #[test]
    fn linear_kernel_tracks_a_line() -> Result<()> {
        let x = Array2::from_shape_fn((11, 1), |(i, _)| i as f64);
        let y = Array1::from_shape_fn(11, |i| 2.0 * i as f64);
        let fitted = SupportVector::default().fit(&x, &y)?;
        let pred = fitted.predict(&array![[2.5], [7.5]])?;
        assert!((pred[0] - 5.0).abs() < 1.0, "pred {}", pred[0]);
        assert!((pred[1] - 15.0).abs() < 1.0, "pred {}", pred[1]);
        Ok(())
    }

    #[test]
    fn every_kernel_trains_on_season_features() -> Result<()> {
        let df = linear_frame(30);
        for kernel in [Kernel::Linear, Kernel::Rbf, Kernel::Poly] {
            let model = SupportVector {
                kernel,
                ..SupportVector::default()
            };
            let fitted = train(&model, &df)?;
            let metrics = evaluate(&fitted, &df)?;
            assert!(metrics.rmse.is_finite(), "{:?}", kernel);
        }
        Ok(())
    }

    #[test]
    fn rejects_non_positive_c() {
        let model = SupportVector {
            c: 0.0,
            ..SupportVector::default()
        };
        let x = array![[0.0], [1.0]];
        assert!(model.fit(&x, &array![0.0, 1.0]).is_err());
    }

    #[test]
    fn poly_inputs_are_scaled_by_root_gamma() -> Result<()> {
        let x = array![[0.0], [4.0], [0.0], [4.0]];
        let y = array![0.0, 1.0, 0.0, 1.0];
        let poly = SupportVector {
            kernel: Kernel::Poly,
            ..SupportVector::default()
        };
        // var(X) = 4, one feature, so gamma = 1/4
        assert_eq!(poly.fit(&x, &y)?.scale, 0.5);
        assert_eq!(SupportVector::default().fit(&x, &y)?.scale, 1.0);

        let pred = poly.fit(&x, &y)?.predict(&array![[4.0]])?;
        assert!(pred[0].is_finite());
        Ok(())
    }

    #[test]
    fn rbf_width_falls_back_on_constant_features() {
        assert_eq!(rbf_width(&array![[1.0, 1.0], [1.0, 1.0]]), 1.0);
        assert_eq!(rbf_width(&array![[0.0], [2.0]]), 1.0);
    }
}
