use std::time::Duration;

/// Artificial delays standing in for the network round trips of the mocked backend.
///
/// Each operation has its own default delay. A fixed override replaces all of them,
/// which is how the configuration file and the tests tune the mocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency(Option<Duration>);

impl Latency {
    pub fn fixed(delay: Duration) -> Self {
        Self(Some(delay))
    }

    pub fn none() -> Self {
        Self(Some(Duration::ZERO))
    }

    pub fn of(&self, default: Duration) -> Duration {
        self.0.unwrap_or(default)
    }

    pub async fn wait(&self, default: Duration) {
        let delay = self.of(default);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_defaults() {
        let default = Duration::from_millis(1000);
        assert_eq!(Latency::default().of(default), default);
        assert_eq!(Latency::none().of(default), Duration::ZERO);
        assert_eq!(
            Latency::fixed(Duration::from_millis(5)).of(default),
            Duration::from_millis(5)
        );
    }
}
