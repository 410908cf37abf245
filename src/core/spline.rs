//! core/spline.rs — Natural cubic spline on a strictly increasing grid.
//!
//! C2-continuous piecewise cubic through the knots with zero second
//! derivative at both end knots (natural boundary). Points outside the
//! knot range are evaluated by extending the outermost cubic segment.

/// Fitted natural cubic spline.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    xs: Vec<f32>,
    ys: Vec<f32>,
    /// Second derivatives at the knots; natural ends pin the first and
    /// last to zero.
    m: Vec<f32>,
}

impl CubicSpline {
    /// Fit a spline through `(xs[i], ys[i])`.
    ///
    /// Needs at least 3 strictly increasing knots; violating that is a
    /// caller programming error.
    pub fn fit(xs: &[f32], ys: &[f32]) -> Self {
        assert_eq!(xs.len(), ys.len(), "knot vectors must have equal length");
        let n = xs.len();
        assert!(n >= 3, "spline needs at least 3 knots, got {n}");
        assert!(
            xs.windows(2).all(|w| w[1] > w[0]),
            "knots must be strictly increasing"
        );

        let h: Vec<f32> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let mut m = vec![0.0f32; n];

        // Thomas algorithm over the interior knots.
        let interior = n - 2;
        let mut cp = vec![0.0f32; interior];
        let mut dp = vec![0.0f32; interior];
        for k in 0..interior {
            let i = k + 1;
            let a = h[i - 1];
            let b = 2.0 * (h[i - 1] + h[i]);
            let c = h[i];
            let d = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
            if k == 0 {
                cp[k] = c / b;
                dp[k] = d / b;
            } else {
                let denom = b - a * cp[k - 1];
                cp[k] = c / denom;
                dp[k] = (d - a * dp[k - 1]) / denom;
            }
        }
        for k in (0..interior).rev() {
            m[k + 1] = dp[k] - cp[k] * m[k + 2];
        }

        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m,
        }
    }

    /// Evaluate the spline at `x`. Outside the knot range the first/last
    /// segment polynomial is extended.
    pub fn eval(&self, x: f32) -> f32 {
        let n = self.xs.len();
        let i = self
            .xs
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(n - 2);

        let h = self.xs[i + 1] - self.xs[i];
        let dx0 = x - self.xs[i];
        let dx1 = self.xs[i + 1] - x;
        let (m0, m1) = (self.m[i], self.m[i + 1]);

        (m0 * dx1.powi(3) + m1 * dx0.powi(3)) / (6.0 * h)
            + (self.ys[i] / h - m0 * h / 6.0) * dx1
            + (self.ys[i + 1] / h - m1 * h / 6.0) * dx0
    }
}
