pub struct RmsError;

impl RmsError {
    /// Scalar RMS: sqrt(mean((expected - predicted)²))
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        let mean_sq = predicted.iter().zip(expected.iter())
            .map(|(p, t)| (t - p).powi(2))
            .sum::<f64>() / n;
        mean_sq.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_is_zero() {
        assert_eq!(RmsError::loss(&[0.0, 1.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn rms_of_known_vector() {
        // errors 1 and 3 -> sqrt((1 + 9) / 2)
        assert_relative_eq!(RmsError::loss(&[0.0, 0.0], &[1.0, 3.0]), 5.0_f64.sqrt());
    }
}
