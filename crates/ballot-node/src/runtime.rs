//! Request loop and shutdown summary.

use anyhow::{Context, Result};
use ballot_intake::adapters::api_handler::messages;
use ballot_intake::{
    ApiGatewayHandler, AuditLog, ElectionState, QueryRequest, QueryResponse, ResultsApi,
    ResultsReader, SubmitVoteRequest, VoteIntake,
};
use ballot_telemetry::log_event;
use serde_json::{json, Map, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;

use crate::config::NodeConfig;

/// Origin recorded when a submit line carries no `source`.
pub const DEFAULT_SOURCE_ADDRESS: &str = "stdin";

const COMPONENT: &str = "node";

type Gateway<A> = ApiGatewayHandler<VoteIntake<A>, ResultsReader<A>>;

/// The running node: one election state, one gateway.
pub struct NodeRuntime<A: AuditLog + 'static> {
    state: Arc<ElectionState<A>>,
    gateway: Arc<Gateway<A>>,
    max_in_flight: usize,
}

impl<A: AuditLog + 'static> NodeRuntime<A> {
    /// Build the runtime over `audit_log`, replaying it first if configured.
    pub fn new(audit_log: A, config: &NodeConfig) -> Result<Self> {
        let state = Arc::new(ElectionState::new(audit_log));

        if config.recover_on_start {
            let report = state.recover().context("failed to replay audit log")?;
            log_event!(
                info,
                COMPONENT,
                "state recovered",
                replayed = report.replayed,
                skipped = report.skipped
            );
        }

        let gateway = ApiGatewayHandler::new(
            VoteIntake::new(Arc::clone(&state), config.intake.clone()),
            ResultsReader::new(Arc::clone(&state)),
        );

        Ok(Self {
            state,
            gateway: Arc::new(gateway),
            max_in_flight: config.max_in_flight.max(1),
        })
    }

    pub fn state(&self) -> &Arc<ElectionState<A>> {
        &self.state
    }

    /// Serve requests from `reader` until EOF. Returns the number handled.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.serve_until(reader, writer, std::future::pending()).await
    }

    /// Serve until EOF or until `shutdown` resolves.
    ///
    /// After shutdown no further input is read, but every request already
    /// dispatched still gets its response written.
    pub async fn serve_until<R, W, S>(&self, reader: R, mut writer: W, shutdown: S) -> Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut lines = reader.lines();
        let mut pending = JoinSet::new();
        let mut handled = 0u64;
        let mut closed = false;

        loop {
            let accepting = !closed && pending.len() < self.max_in_flight;

            tokio::select! {
                () = &mut shutdown, if !closed => {
                    log_event!(info, COMPONENT, "draining", in_flight = pending.len());
                    closed = true;
                }
                line = lines.next_line(), if accepting => {
                    match line.context("failed to read request")? {
                        Some(line) if line.trim().is_empty() => {}
                        Some(line) => {
                            let gateway = Arc::clone(&self.gateway);
                            pending.spawn_blocking(move || dispatch(&gateway, &line));
                        }
                        None => closed = true,
                    }
                }
                Some(done) = pending.join_next(), if !pending.is_empty() => {
                    let response = done.context("request task failed")?;
                    writer.write_all(response.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                    writer.flush().await?;
                    handled += 1;
                }
                else => break,
            }
        }

        Ok(handled)
    }

    /// Log the final tally.
    pub fn shutdown(&self) {
        let snapshot = self.gateway.results().results();
        let breakdown = serde_json::to_string(&snapshot.breakdown).unwrap_or_default();
        log_event!(
            info,
            COMPONENT,
            "node stopped",
            total_votes = snapshot.total_votes,
            breakdown = %breakdown
        );
    }
}

/// Handle one request line and render the response line.
fn dispatch<A: AuditLog>(gateway: &Gateway<A>, line: &str) -> String {
    let mut request: Map<String, Value> = match serde_json::from_str(line) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return render(None, failure("Malformed request", "expected a JSON object")),
        Err(e) => return render(None, failure("Malformed request", &e.to_string())),
    };

    let id = request.remove("id");
    let op = request
        .remove("op")
        .and_then(|v| v.as_str().map(str::to_owned));

    let body = match op.as_deref() {
        Some("submit") => {
            let source = request
                .remove("source")
                .and_then(|v| v.as_str().map(str::to_owned))
                .unwrap_or_else(|| DEFAULT_SOURCE_ADDRESS.to_string());
            match serde_json::from_value::<SubmitVoteRequest>(Value::Object(request)) {
                Ok(submit) => to_value(gateway.handle_submit(submit, &source)),
                Err(e) => failure("Malformed request", &e.to_string()),
            }
        }
        Some("query") => match serde_json::from_value::<QueryRequest>(Value::Object(request)) {
            Ok(query) => to_value(gateway.handle_query(&query)),
            Err(e) => failure("Malformed request", &e.to_string()),
        },
        _ => to_value(QueryResponse::failure(messages::INVALID_ACTION)),
    };

    render(id, body)
}

fn failure(message: &str, error: &str) -> Value {
    json!({ "success": false, "message": message, "error": error })
}

fn to_value<T: serde::Serialize>(response: T) -> Value {
    serde_json::to_value(response)
        .unwrap_or_else(|e| failure(messages::PROCESSING_ERROR, &e.to_string()))
}

fn render(id: Option<Value>, mut body: Value) -> String {
    if let (Some(id), Value::Object(map)) = (id, &mut body) {
        map.insert("id".to_string(), id);
    }
    body.to_string()
}
