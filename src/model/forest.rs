//! Bagged CART regression trees.
//!
//! Each tree is grown on a bootstrap sample with every feature considered at
//! every split; leaves predict the mean of their samples and the forest
//! predicts the mean over trees.

use anyhow::{bail, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use super::{Predictor, Regressor};

#[derive(Debug, Clone, Copy)]
pub struct RandomForest {
    pub n_estimators: usize,
    /// `None` grows each tree until its leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for RandomForest {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(v) => return *v,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FittedForest {
    trees: Vec<Node>,
    n_features: usize,
}

impl FittedForest {
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForest {
    type Fitted = FittedForest;

    fn name(&self) -> &'static str {
        "random_forest"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<FittedForest> {
        let n = x.nrows();
        if n == 0 || n != y.len() {
            bail!("cannot fit forest on {} rows with {} targets", n, y.len());
        }
        if self.n_estimators == 0 {
            bail!("n_estimators must be at least 1");
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let grower = Grower {
            x,
            y,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
        };
        let trees = (0..self.n_estimators)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grower.grow(sample, 0)
            })
            .collect::<Vec<_>>();
        debug!(trees = trees.len(), rows = n, "forest grown");
        Ok(FittedForest {
            trees,
            n_features: x.ncols(),
        })
    }
}

impl Predictor for FittedForest {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features {
            bail!("expected {} features, got {}", self.n_features, x.ncols());
        }
        let n_trees = self.trees.len() as f64;
        Ok(x
            .rows()
            .into_iter()
            .map(|row| self.trees.iter().map(|t| t.predict(row)).sum::<f64>() / n_trees)
            .collect())
    }
}

struct Grower<'a> {
    x: &'a Array2<f64>,
    y: &'a Array1<f64>,
    max_depth: Option<usize>,
    min_samples_split: usize,
}

impl Grower<'_> {
    fn grow(&self, samples: Vec<usize>, depth: usize) -> Node {
        let mean = samples.iter().map(|&i| self.y[i]).sum::<f64>() / samples.len() as f64;
        let at_depth = self.max_depth.map_or(false, |d| depth >= d);
        if at_depth || samples.len() < self.min_samples_split {
            return Node::Leaf(mean);
        }

        let Some((feature, threshold)) = self.best_split(&samples) else {
            return Node::Leaf(mean);
        };
        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.x[(i, feature)] <= threshold);
        Node::Split {
            feature,
            threshold,
            left: Box::new(self.grow(left, depth + 1)),
            right: Box::new(self.grow(right, depth + 1)),
        }
    }

    /// Split minimising the summed squared error of both sides; `None` when
    /// no split improves on the parent.
    fn best_split(&self, samples: &[usize]) -> Option<(usize, f64)> {
        let n = samples.len() as f64;
        let total: f64 = samples.iter().map(|&i| self.y[i]).sum();
        let total_sq: f64 = samples.iter().map(|&i| self.y[i].powi(2)).sum();
        let parent_sse = total_sq - total * total / n;

        let mut best: Option<(usize, f64)> = None;
        let mut best_sse = parent_sse - 1e-12;

        for feature in 0..self.x.ncols() {
            let mut pairs: Vec<(f64, f64)> = samples
                .iter()
                .map(|&i| (self.x[(i, feature)], self.y[i]))
                .collect();
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (mut left_sum, mut left_sq) = (0.0, 0.0);
            for k in 0..pairs.len() - 1 {
                let (value, target) = pairs[k];
                left_sum += target;
                left_sq += target * target;
                let next = pairs[k + 1].0;
                if value == next {
                    continue;
                }
                let nl = (k + 1) as f64;
                let nr = n - nl;
                let right_sum = total - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / nl) + (right_sq - right_sum * right_sum / nr);
                if sse < best_sse {
                    best_sse = sse;
                    best = Some((feature, (value + next) / 2.0));
                }
            }
        }
        best
    }
}
