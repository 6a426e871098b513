//! First-degree least-squares fit over a series indexed `0..n`.

/// `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit a line through `(i, ys[i])`.
///
/// Returns `None` for an empty series. A single point yields a flat line
/// through it.
#[must_use]
pub fn fit_line(ys: &[f64]) -> Option<LinearFit> {
    let n = ys.len();
    if n == 0 {
        return None;
    }
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
        });
    }

    let mean_x = (n - 1) as f64 / 2.0;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: slope.mul_add(-mean_x, mean_y),
    })
}
