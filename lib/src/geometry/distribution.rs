use num::{Float, Zero};

// based on pbrtv3 distribution class

fn to_float<T: Float>(value: usize) -> T {
    T::from(value).unwrap_or_else(T::infinity)
}

/// A 1-dimensional distribution of values.
pub struct Distribution1D<T: Float + Zero> {
    cdf: Vec<T>,
}

impl<T: Float + Zero> Distribution1D<T> {
    /// Creates a new distribution with the current values.
    pub fn new(values: impl Iterator<Item = T>) -> Self {
        let values = values.collect::<Vec<_>>();
        let n = values.len();
        let n_as_t = to_float::<T>(n);
        let mut cdf = Vec::with_capacity(n + 1);
        cdf.push(T::zero());
        for i in 1..(n + 1) {
            cdf.push(cdf[i - 1] + values[i - 1] / n_as_t);
        }
        let integral = cdf[n];
        if integral.is_zero() {
            for (i, item) in cdf.iter_mut().enumerate().skip(1) {
                *item = to_float::<T>(i) / n_as_t;
            }
        } else {
            for item in cdf.iter_mut().skip(1) {
                *item = *item / integral;
            }
        }
        Self { cdf }
    }

    /// Returns the Cumulative Distribution Function for the current distribution.
    pub fn cdf(&self) -> &[T] {
        &self.cdf
    }

    /// Picks a value index with probability proportional to its value.
    ///
    /// `u` must be in `[0, 1)`. Returns `None` for an empty distribution.
    pub fn sample_discrete(&self, u: T) -> Option<usize> {
        let count = self.cdf.len() - 1;
        if count == 0 {
            return None;
        }
        // first cdf entry strictly greater than u, minus the leading zero
        let upper = self.cdf.partition_point(|c| *c <= u);
        Some(upper.saturating_sub(1).min(count - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::Distribution1D;
    use float_cmp::assert_approx_eq;

    #[test]
    fn cdf_normalized() {
        let dist = Distribution1D::new([1.0_f32, 3.0, 0.0, 4.0].into_iter());
        let cdf = dist.cdf();
        assert_eq!(cdf.len(), 5);
        assert_approx_eq!(f32, cdf[1], 0.125);
        assert_approx_eq!(f32, cdf[2] - cdf[1], 0.375);
        assert_approx_eq!(f32, cdf[3], cdf[2]);
        assert_approx_eq!(f32, *cdf.last().unwrap(), 1.0);
    }

    #[test]
    fn discrete_sampling() {
        let dist = Distribution1D::new([1.0_f32, 3.0, 0.0, 4.0].into_iter());
        assert_eq!(dist.sample_discrete(0.0), Some(0));
        assert_eq!(dist.sample_discrete(0.1), Some(0));
        assert_eq!(dist.sample_discrete(0.2), Some(1));
        assert_eq!(dist.sample_discrete(0.49), Some(1));
        assert_eq!(dist.sample_discrete(0.51), Some(3));
        assert_eq!(dist.sample_discrete(0.999), Some(3));
    }

    #[test]
    fn zero_weights() {
        let dist = Distribution1D::new([0.0_f32, 0.0].into_iter());
        assert_eq!(dist.sample_discrete(0.75), Some(1));
        let empty = Distribution1D::new(std::iter::empty::<f32>());
        assert_eq!(empty.sample_discrete(0.5), None);
    }
}
