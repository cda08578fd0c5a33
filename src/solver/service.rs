use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::RoutingConfig;
use crate::domain::solution::{OptimizationResult, RouteResponse};
use crate::domain::types::CoordinateTable;
use crate::error::{Result, RoutingError};

use super::optimize::solve_route_optimization;

/// Runs optimizations on tokio's blocking pool, one request per task, under
/// a per-request deadline. Shares only read-only lookup data.
#[derive(Debug, Clone)]
pub struct RoutingService {
    table: Arc<CoordinateTable>,
    config: Arc<RoutingConfig>,
    deadline: Duration,
}

impl RoutingService {
    pub fn new(table: CoordinateTable, config: RoutingConfig, deadline: Duration) -> Self {
        Self {
            table: Arc::new(table),
            config: Arc::new(config),
            deadline,
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn table(&self) -> &CoordinateTable {
        &self.table
    }

    /// Solves one request or fails with [`RoutingError::Timeout`]. No partial
    /// result is produced when the deadline passes.
    pub async fn solve_with_deadline(&self, stop_codes: Vec<String>) -> Result<OptimizationResult> {
        let table = Arc::clone(&self.table);
        let config = Arc::clone(&self.config);
        run_with_deadline(self.deadline, move || {
            solve_route_optimization(&stop_codes, &table, &config)
        })
        .await
    }

    /// Solves independent requests concurrently; responses keep request order.
    pub async fn solve_batch(&self, requests: Vec<Vec<String>>) -> Vec<RouteResponse> {
        debug!("Solving batch of {} requests", requests.len());
        join_all(
            requests
                .into_iter()
                .map(|codes| async move { RouteResponse::from(self.solve_with_deadline(codes).await) }),
        )
        .await
    }
}

async fn run_with_deadline<T, F>(deadline: Duration, job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(job);

    // A timed-out blocking task runs to completion; its result is dropped.
    match tokio::time::timeout(deadline, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(RoutingError::TaskFailed(join_error.to_string())),
        Err(_) => {
            warn!("Optimization exceeded deadline of {:?}", deadline);
            Err(RoutingError::Timeout(deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Stop;

    fn service(deadline: Duration) -> RoutingService {
        let table: CoordinateTable = vec![
            Stop::new("A05", -65.20, -26.85),
            Stop::new("A10", -65.21, -26.84),
            Stop::new("B05", -65.05, -26.95),
            Stop::new("B10", -65.04, -26.96),
        ]
        .into_iter()
        .collect();
        RoutingService::new(table, RoutingConfig::default(), deadline)
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn solves_within_deadline() {
        let service = service(Duration::from_secs(30));
        let result = service
            .solve_with_deadline(codes(&["A05", "B05", "A10"]))
            .await
            .unwrap();
        assert_eq!(
            result.route_a.visit_order.len() + result.route_b.visit_order.len(),
            3
        );
    }

    #[tokio::test]
    async fn slow_job_times_out_without_result() {
        let outcome = run_with_deadline(Duration::from_millis(10), || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(42)
        })
        .await;
        assert!(matches!(outcome, Err(RoutingError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn panicking_job_is_reported_as_task_failure() {
        let outcome: Result<()> =
            run_with_deadline(Duration::from_secs(5), || panic!("solver blew up")).await;
        assert!(matches!(outcome, Err(RoutingError::TaskFailed(_))));
    }

    #[tokio::test]
    async fn batch_preserves_request_order() {
        let service = service(Duration::from_secs(30));
        let responses = service
            .solve_batch(vec![
                codes(&["A05", "B05", "A10"]),
                codes(&["A05"]),
                codes(&["A05", "B05", "B10", "A10"]),
            ])
            .await;

        assert_eq!(responses.len(), 3);
        assert!(!responses[0].is_error());
        assert!(responses[1].is_error());
        assert!(!responses[2].is_error());
    }
}
