/// A closed range `[min, max]` of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns a copy with `max` lowered to `max` if that is tighter.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, self.max.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_inverted_contains_nothing() {
        let interval = Interval::new(1.0, 0.0);
        assert!(!interval.contains(0.5));
        assert!(!Interval::new(f32::NAN, 1.0).contains(0.5));
    }

    #[test]
    fn test_interval_with_max() {
        let interval = Interval::new(0.0, f32::INFINITY).with_max(3.0);
        assert_eq!(interval.max, 3.0);

        let interval = Interval::new(0.0, 2.0).with_max(3.0);
        assert_eq!(interval.max, 2.0);
    }
}
