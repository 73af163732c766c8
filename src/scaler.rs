use crate::error::{SetPieceError, SpResult};
use crate::features::FeatureMatrix;
use serde::{Deserialize, Serialize};

/// Relative spread below which a column is treated as constant. Constant columns
/// store a scale of 0: they transform to exactly 0 and invert to their mean.
const ZERO_VARIANCE_EPS: f64 = 1e-12;

/// Column-wise standardization to zero mean, unit variance.
pub struct StandardScaler;

/// Fitted per-column parameters. A fresh value per run; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledMatrix {
    pub rows: Vec<Vec<f64>>,
}

impl ScaledMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }
}

impl StandardScaler {
    pub fn fit(matrix: &FeatureMatrix) -> SpResult<FittedScaler> {
        Self::fit_rows(&matrix.rows)
    }

    pub fn fit_rows(rows: &[Vec<f64>]) -> SpResult<FittedScaler> {
        let Some(first) = rows.first() else {
            return Err(SetPieceError::Validation(
                "cannot fit a scaler on an empty matrix".to_string(),
            ));
        };
        let width = first.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SetPieceError::Validation(format!(
                "row {} has {} columns, expected {}",
                idx,
                row.len(),
                width
            )));
        }

        let n = rows.len() as f64;
        let mut means = vec![0.0; width];
        for row in rows {
            for (m, &v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        // Population variance (ddof = 0).
        let mut vars = vec![0.0; width];
        for row in rows {
            for ((var, &v), &m) in vars.iter_mut().zip(row).zip(&means) {
                *var += (v - m) * (v - m);
            }
        }

        let scales = vars
            .iter()
            .zip(&means)
            .map(|(&var, &m)| {
                let std = (var / n).sqrt();
                if !std.is_finite() || std <= ZERO_VARIANCE_EPS * m.abs().max(1.0) {
                    0.0
                } else {
                    std
                }
            })
            .collect();

        Ok(FittedScaler { means, scales })
    }

    /// Fits on `matrix` and returns both the fit and the scaled rows.
    pub fn fit_transform(matrix: &FeatureMatrix) -> SpResult<(FittedScaler, ScaledMatrix)> {
        let fitted = Self::fit(matrix)?;
        let scaled = fitted.transform(&matrix.rows)?;
        Ok((fitted, scaled))
    }
}

impl FittedScaler {
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Standard deviation per column; 0.0 where the column was constant.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }

    fn check_width(&self, len: usize) -> SpResult<()> {
        if len != self.width() {
            return Err(SetPieceError::Validation(format!(
                "point has {} dimensions, scaler was fitted on {}",
                len,
                self.width()
            )));
        }
        Ok(())
    }

    pub fn transform_point(&self, point: &[f64]) -> SpResult<Vec<f64>> {
        self.check_width(point.len())?;
        Ok(point
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(&x, (&m, &s))| if s == 0.0 { 0.0 } else { (x - m) / s })
            .collect())
    }

    pub fn inverse_transform_point(&self, point: &[f64]) -> SpResult<Vec<f64>> {
        self.check_width(point.len())?;
        Ok(point
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(&z, (&m, &s))| z * s + m)
            .collect())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> SpResult<ScaledMatrix> {
        let rows = rows
            .iter()
            .map(|r| self.transform_point(r))
            .collect::<SpResult<Vec<_>>>()?;
        Ok(ScaledMatrix { rows })
    }
}
