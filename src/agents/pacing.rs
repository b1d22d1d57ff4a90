//! Delay policy between provider records

use std::time::Duration;

/// Default pause after each processed record
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// How long the search agent waits after each record it processes.
///
/// The wait is awaited in line and is not cancellable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// No delay
    None,
    /// Fixed delay after every record
    Fixed(Duration),
}

impl Pacing {
    /// Build from a millisecond count; zero disables pacing
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Self::None
        } else {
            Self::Fixed(Duration::from_millis(ms))
        }
    }

    pub async fn wait(&self) {
        if let Self::Fixed(d) = self {
            tokio::time::sleep(*d).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::Fixed(DEFAULT_PACING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_from_millis() {
        assert_eq!(Pacing::from_millis(0), Pacing::None);
        assert_eq!(Pacing::from_millis(500), Pacing::default());
        assert_eq!(Pacing::from_millis(20), Pacing::Fixed(Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_fixed_wait_sleeps() {
        let start = Instant::now();
        Pacing::Fixed(Duration::from_millis(20)).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
