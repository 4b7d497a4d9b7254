//! # Ballot Node
//!
//! Entry point. See the library docs for the line protocol.

use anyhow::{Context, Result};
use ballot_intake::{AuditDirLock, FileAuditLog};
use ballot_node::{NodeConfig, NodeRuntime};
use ballot_telemetry::{init_logging, log_event, TelemetryConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("failed to initialize logging")?;

    let config = NodeConfig::from_env();

    let _lock = AuditDirLock::acquire(&config.audit.dir).context("failed to lock audit directory")?;
    let audit_log = FileAuditLog::open(config.audit.clone()).context("failed to open audit log")?;
    let runtime = NodeRuntime::new(audit_log, &config)?;

    log_event!(
        info,
        "node",
        "ready",
        audit_dir = %config.audit.dir.display(),
        max_field_len = config.intake.max_field_len
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log_event!(info, "node", "interrupt received"),
            Err(e) => {
                log_event!(warn, "node", "ctrl-c handler unavailable", error = %e);
                std::future::pending::<()>().await;
            }
        }
    };

    let handled = runtime
        .serve_until(stdin, stdout, interrupt)
        .await
        .context("request loop failed")?;
    log_event!(info, "node", "request loop finished", requests = handled);

    runtime.shutdown();
    Ok(())
}
