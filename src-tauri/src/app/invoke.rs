use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error};

/// Output of a timed call together with its wall time in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeResult<T> {
    pub output: T,
    pub time: f64,
}

/// Await `call`, timing it. Failures are logged with the function name and
/// returned unchanged.
pub async fn invoke_timed<T, E, F>(func_name: &str, call: F) -> Result<InvokeResult<T>, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let start = Instant::now();
    match call.await {
        Ok(output) => {
            let time = start.elapsed().as_secs_f64() * 1000.0;
            debug!(function = func_name, time_ms = time, "invoke completed");
            Ok(InvokeResult { output, time })
        }
        Err(e) => {
            error!(function = func_name, error = %e, "invoke failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::DomainError;

    #[tokio::test]
    async fn test_invoke_returns_output_and_time() {
        let result = invoke_timed("slow_sum", async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, DomainError>(2 + 3)
        })
        .await
        .unwrap();

        assert_eq!(result.output, 5);
        assert!(result.time >= 20.0);
    }

    #[tokio::test]
    async fn test_invoke_passes_error_through() {
        let err = invoke_timed("broken", async {
            Err::<(), _>(DomainError::SettingsNotLoaded("user_settings.json".to_string()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::SettingsNotLoaded(name) if name == "user_settings.json"));
    }

    #[test]
    fn test_invoke_result_shape() {
        let value = serde_json::to_value(InvokeResult { output: "ok", time: 1.5 }).unwrap();
        assert_eq!(value, serde_json::json!({ "output": "ok", "time": 1.5 }));
    }
}
