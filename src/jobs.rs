//! Queued background jobs
//!
//! A Redis list is the queue; jobs arrive as `{"function": ..., "args": ...}`
//! and dispatch against a registry of named handlers. The only registered
//! job, `process_transcript`, is a deliberate no-op stub.

use std::collections::HashMap;

use futures::future::BoxFuture;
use redis::AsyncCommands;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Seconds a blocking pop waits before the loop re-checks for shutdown
const POP_TIMEOUT_SECS: f64 = 5.0;

/// Context handed to every job handler
#[derive(Debug, Clone, Default)]
pub struct JobContext {
    /// Name of the queue the job was popped from
    pub queue: String,
}

type Handler = Box<dyn Fn(JobContext, Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// A queued job as it appears on the wire
#[derive(Debug, Deserialize)]
pub struct Job {
    pub function: String,
    #[serde(default)]
    pub args: Value,
}

/// Job runner: a registry of named handlers plus a blocking-pop loop over a
/// Redis list
pub struct Worker {
    queue: String,
    handlers: HashMap<&'static str, Handler>,
}

impl Worker {
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under a job function name
    pub fn register<F>(mut self, name: &'static str, handler: F) -> Self
    where
        F: Fn(JobContext, Value) -> BoxFuture<'static, Result<Value>> + Send + Sync + 'static,
    {
        self.handlers.insert(name, Box::new(handler));
        self
    }

    /// Run one job; unknown function names are logged and skipped
    pub async fn dispatch(&self, job: Job) -> Result<Option<Value>> {
        let Some(handler) = self.handlers.get(job.function.as_str()) else {
            warn!("no handler registered for job '{}'", job.function);
            return Ok(None);
        };
        let ctx = JobContext {
            queue: self.queue.clone(),
        };
        let output = handler(ctx, job.args).await?;
        Ok(Some(output))
    }

    /// Pop and dispatch jobs until the process is stopped
    pub async fn run(&self, client: redis::Client) -> Result<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        info!("worker listening on queue '{}'", self.queue);

        loop {
            let popped: Option<(String, String)> =
                conn.blpop(&self.queue, POP_TIMEOUT_SECS).await?;
            let Some((_, raw)) = popped else { continue };

            match serde_json::from_str::<Job>(&raw) {
                Ok(job) => {
                    debug!("dispatching job '{}'", job.function);
                    if let Err(e) = self.dispatch(job).await {
                        warn!("job failed: {e}");
                    }
                }
                Err(e) => warn!("discarding malformed job payload: {e}"),
            }
        }
    }
}

/// Placeholder for the transcript structured-extraction job.
///
/// Deliberately returns nothing until the output contract is defined; keep
/// it a stub.
pub async fn process_transcript(_ctx: JobContext, info: Value) -> Result<Value> {
    debug!("process_transcript invoked with {info}");
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn worker() -> Worker {
        Worker::new("test:jobs").register("process_transcript", |ctx, info| {
            Box::pin(process_transcript(ctx, info))
        })
    }

    #[tokio::test]
    async fn registered_job_dispatches_to_stub() {
        let job = Job {
            function: "process_transcript".to_string(),
            args: json!({"transcript": "hello"}),
        };

        let output = worker().dispatch(job).await.unwrap();
        assert_eq!(output, Some(Value::Null));
    }

    #[tokio::test]
    async fn unknown_job_is_skipped() {
        let job = Job {
            function: "does_not_exist".to_string(),
            args: Value::Null,
        };

        let output = worker().dispatch(job).await.unwrap();
        assert_eq!(output, None);
    }

    #[test]
    fn job_wire_format_defaults_args() {
        let job: Job = serde_json::from_str(r#"{"function": "process_transcript"}"#).unwrap();
        assert_eq!(job.function, "process_transcript");
        assert_eq!(job.args, Value::Null);
    }
}
