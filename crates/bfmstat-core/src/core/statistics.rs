use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum StatisticsError {
    #[error("No samples have been accumulated; moments are undefined")]
    EmptySample,
}

/// Running first and second moment of a scalar sample stream.
///
/// Moments of an empty stream are reported as [`StatisticsError::EmptySample`]
/// rather than as the `NaN` a division by zero would produce.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatisticMoment {
    count: u64,
    sum: f64,
    sum_squares: f64,
}

impl StatisticMoment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_value(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_squares += value * value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// First moment `<x>`.
    pub fn mean(&self) -> Result<f64, StatisticsError> {
        self.normalized(self.sum)
    }

    /// Second moment `<x²>`. This is the mean of squares, not the variance.
    pub fn mean_square(&self) -> Result<f64, StatisticsError> {
        self.normalized(self.sum_squares)
    }

    fn normalized(&self, total: f64) -> Result<f64, StatisticsError> {
        if self.count == 0 {
            return Err(StatisticsError::EmptySample);
        }
        Ok(total / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn moments_of_small_sample_are_exact() {
        let mut stats = StatisticMoment::new();
        stats.add_value(2.0);
        stats.add_value(4.0);
        stats.add_value(6.0);

        assert_eq!(stats.count(), 3);
        assert!(f64_approx_equal(stats.mean().unwrap(), 4.0));
        assert!(f64_approx_equal(stats.mean_square().unwrap(), 56.0 / 3.0));
    }

    #[test]
    fn empty_accumulator_reports_empty_sample() {
        let stats = StatisticMoment::new();
        assert!(stats.is_empty());
        assert_eq!(stats.mean(), Err(StatisticsError::EmptySample));
        assert_eq!(stats.mean_square(), Err(StatisticsError::EmptySample));
    }

    #[test]
    fn reset_clears_all_accumulated_state() {
        let mut stats = StatisticMoment::new();
        stats.add_value(10.0);
        stats.reset();
        assert_eq!(stats, StatisticMoment::default());
        assert_eq!(stats.mean(), Err(StatisticsError::EmptySample));
    }
}
