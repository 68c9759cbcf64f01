use anyhow::{anyhow, Result};
use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2};

use super::{Predictor, Regressor};

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Regressor for Linear {
    type Fitted = FittedLinearRegression<f64>;

    fn name(&self) -> &'static str {
        "linear"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Self::Fitted> {
        let ds = Dataset::new(x.clone(), y.clone());
        LinearRegression::new()
            .fit(&ds)
            .map_err(|e| anyhow!("linear regression fit failed: {}", e))
    }
}

impl Predictor for FittedLinearRegression<f64> {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        Ok(linfa::traits::Predict::predict(self, x))
    }
}
