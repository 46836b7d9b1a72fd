//! Worker Module Tests
//!
//! - **Compute**: local arithmetic over dispatched operands, including the
//!   defensive division-by-zero check.
//! - **Integration**: a real orchestrator served over a loopback listener
//!   with a live worker pool driving expressions to completion.

#[cfg(test)]
mod tests {
    use crate::compiler::ids::MonotonicIdGenerator;
    use crate::compiler::types::Op;
    use crate::config::Config;
    use crate::scheduler::handlers::api_router;
    use crate::scheduler::orchestrator::Scheduler;
    use crate::scheduler::protocol::{CalculateRequest, CalculateResponse, ExpressionResponse};
    use crate::scheduler::types::ExpressionStatus;
    use crate::storage::memory::MemoryStore;
    use crate::worker::agent::{WorkerPool, compute};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;

    // ============================================================
    // TEST 1: Local computation
    // ============================================================

    #[test]
    fn test_compute_all_operators() {
        let cases = [
            (5.0, 3.0, Op::Add, 8.0),
            (5.0, 3.0, Op::Sub, 2.0),
            (5.0, 3.0, Op::Mul, 15.0),
            (6.0, 3.0, Op::Div, 2.0),
        ];

        for (a, b, op, expected) in cases {
            assert_eq!(compute(a, b, op).unwrap(), expected);
        }
    }

    #[test]
    fn test_compute_division_by_zero_fails() {
        let err = compute(6.0, 0.0, Op::Div).unwrap_err();
        assert!(err.to_string().contains("division by zero"));
    }

    // ============================================================
    // TEST 2: End-to-end over a loopback orchestrator
    // ============================================================

    async fn spawn_orchestrator() -> SocketAddr {
        let store = Arc::new(MemoryStore::new());
        let ids = Arc::new(MonotonicIdGenerator::new());
        let config = Config {
            time_addition: Duration::from_millis(1),
            time_subtraction: Duration::from_millis(1),
            time_multiplication: Duration::from_millis(1),
            time_division: Duration::from_millis(1),
            ..Config::default()
        };
        let scheduler = Scheduler::new(store, ids, config);
        let app = api_router(scheduler);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        addr
    }

    async fn submit(client: &reqwest::Client, addr: SocketAddr, expression: &str) -> String {
        let response = client
            .post(format!("http://{}/api/v1/calculate", addr))
            .header("username", "alice")
            .json(&CalculateRequest {
                expression: expression.to_string(),
            })
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: CalculateResponse = response.json().await.unwrap();
        body.id
    }

    async fn wait_for_terminal(
        client: &reqwest::Client,
        addr: SocketAddr,
        expr_id: &str,
    ) -> ExpressionResponse {
        for _ in 0..200 {
            let response = client
                .get(format!("http://{}/api/v1/expressions/{}", addr, expr_id))
                .header("username", "alice")
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);

            let body: ExpressionResponse = response.json().await.unwrap();
            if body.expression.status != ExpressionStatus::Processing {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("expression {} never reached a terminal state", expr_id);
    }

    #[tokio::test]
    async fn test_pool_drives_expression_to_completion() {
        let addr = spawn_orchestrator().await;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        WorkerPool::new(format!("http://{}", addr), 2).start(shutdown_rx);

        let client = reqwest::Client::new();
        let expr_id = submit(&client, addr, "2+3*4").await;

        let body = wait_for_terminal(&client, addr, &expr_id).await;
        assert_eq!(body.expression.status, ExpressionStatus::Done);
        assert_eq!(body.expression.result, Some(14.0));

        let _ = shutdown_tx.send(true);
    }

    #[tokio::test]
    async fn test_pool_surfaces_division_by_zero() {
        let addr = spawn_orchestrator().await;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        WorkerPool::new(format!("http://{}", addr), 2).start(shutdown_rx);

        let client = reqwest::Client::new();
        let expr_id = submit(&client, addr, "6/0").await;

        // A worker pull trips the dispatch-time check and errors the
        // expression; it is never reported done.
        let body = wait_for_terminal(&client, addr, &expr_id).await;
        assert_eq!(body.expression.status, ExpressionStatus::Error);
        assert_eq!(body.expression.result, None);

        let _ = shutdown_tx.send(true);
    }
}
