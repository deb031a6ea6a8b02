use crate::models::{AgeRange, Record};
use crate::processors::field_resolver::resolve_age;
use crate::utils::constants::{DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};

/// Computes the age domain used by the age filter and the color scale
pub struct AgeRangeCalculator {
    default_range: AgeRange,
}

impl AgeRangeCalculator {
    pub fn new() -> Self {
        Self {
            default_range: AgeRange::new(DEFAULT_MIN_AGE, DEFAULT_MAX_AGE),
        }
    }

    pub fn with_default_range(default_range: AgeRange) -> Self {
        Self { default_range }
    }

    /// Min/max over strictly positive ages; the default range when there are none
    pub fn compute_range(&self, records: &[Record]) -> AgeRange {
        let bounds = records
            .iter()
            .map(resolve_age)
            .filter(|age| *age > 0.0)
            .fold(None, |acc: Option<(f64, f64)>, age| match acc {
                None => Some((age, age)),
                Some((min, max)) => Some((min.min(age), max.max(age))),
            });

        match bounds {
            Some((min, max)) => AgeRange::new(min, max),
            None => self.default_range,
        }
    }
}

impl Default for AgeRangeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Age range with the built-in 0-100000 fallback
pub fn compute_range(records: &[Record]) -> AgeRange {
    AgeRangeCalculator::new().compute_range(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::AGE_COLUMNS;

    fn aged(age: &str) -> Record {
        Record::from_pairs([(AGE_COLUMNS[0], age)])
    }

    #[test]
    fn test_zero_and_negative_ages_excluded() {
        let records = vec![aged("0"), aged("3000"), aged("7000"), aged("-1")];
        let range = compute_range(&records);

        assert_eq!(range, AgeRange::new(3000.0, 7000.0));
    }

    #[test]
    fn test_default_range_without_positive_ages() {
        let records = vec![aged("0"), aged(""), aged("unknown")];
        assert_eq!(compute_range(&records), AgeRange::new(0.0, 100_000.0));
        assert_eq!(compute_range(&[]), AgeRange::new(0.0, 100_000.0));
    }

    #[test]
    fn test_custom_default_range() {
        let calculator = AgeRangeCalculator::with_default_range(AgeRange::new(0.0, 50_000.0));
        assert_eq!(calculator.compute_range(&[]).max, 50_000.0);
    }

    #[test]
    fn test_single_positive_age() {
        let range = compute_range(&[aged("4200")]);
        assert_eq!(range, AgeRange::new(4200.0, 4200.0));
    }
}
