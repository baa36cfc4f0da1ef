//! Stand-in for the backend calls a real storefront would make.

use std::time::Duration;

/// Wait `latency`, then report success.
///
/// Checkout, profile and seller submissions go through here so the demo
/// behaves like a network round trip. There is no failure path.
pub async fn simulate_round_trip(action: &'static str, latency: Duration) {
    tracing::debug!(action, latency_ms = latency.as_millis(), "Simulating backend call");
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn test_waits_for_latency() {
        let started = Instant::now();
        simulate_round_trip("test", Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_zero_latency_returns_immediately() {
        let started = Instant::now();
        simulate_round_trip("test", Duration::ZERO).await;
        assert!(started.elapsed() < Duration::from_millis(20));
    }
}
