use serde::Serialize;

/// Scrollbar handle: a value clamped to `[0, max]`
///
/// `set_value` and `set_max` report whether the value moved, which is the
/// change notification the skin reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollBar {
    value: f64,
    max: f64,
}

impl ScrollBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Set the value, clamped to `[0, max]`. Non-finite values are ignored.
    pub fn set_value(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let clamped = value.clamp(0.0, self.max);
        let changed = (clamped - self.value).abs() > f64::EPSILON;
        self.value = clamped;
        changed
    }

    /// Set the maximum (never negative) and re-clamp the current value
    pub fn set_max(&mut self, max: f64) -> bool {
        self.max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        let value = self.value;
        self.set_value(value)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_clamped() {
        let mut bar = ScrollBar::new();
        assert!(!bar.set_value(50.0));
        assert_eq!(bar.value(), 0.0);

        bar.set_max(100.0);
        assert!(bar.set_value(50.0));
        assert!(!bar.set_value(50.0));
        assert!(bar.set_value(500.0));
        assert_eq!(bar.value(), 100.0);
        assert!(bar.set_value(-3.0));
        assert_eq!(bar.value(), 0.0);
        assert!(!bar.set_value(f64::NAN));
    }

    #[test]
    fn test_shrinking_max_moves_value() {
        let mut bar = ScrollBar::new();
        bar.set_max(100.0);
        bar.set_value(80.0);
        assert!(bar.set_max(40.0));
        assert_eq!(bar.value(), 40.0);
        assert!(bar.set_max(-10.0));
        assert_eq!(bar.max(), 0.0);
        assert_eq!(bar.value(), 0.0);
    }
}
