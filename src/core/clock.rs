use chrono::Datelike;

/// Source of the current calendar year for pricing
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Reads the year from the system clock (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Utc::now().year()
    }
}

/// Always reports the same year
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(2024).current_year(), 2024);
    }

    #[test]
    fn test_system_clock_is_recent() {
        assert!(SystemClock.current_year() >= 2024);
    }
}
