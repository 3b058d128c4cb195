//! Minimal embedding example for observer-core
//!
//! This example demonstrates using observer-core as a library in a custom
//! async application. A synchronous observer prints to stdout. A queued
//! auditor is handled on a tokio task, and a second queue is read as a
//! `Stream`.

use async_trait::async_trait;
use observer_core::observer::{into_stream, spawn_dispatcher};
use observer_core::{
    AsyncObserver, ConcreteObserver, ConcreteSubject, ObserverConfig, QueuedObserver, Result,
    StateChange, Subject, SubjectExt,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing::info;

/// Async consumer that takes its time with each change
struct SlowAuditor;

#[async_trait]
impl AsyncObserver for SlowAuditor {
    async fn on_change(&self, change: StateChange) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        info!(
            state = change.state,
            sequence = change.sequence,
            observed_at = %change.observed_at,
            "Audited state change"
        );
    }

    fn name(&self) -> &str {
        "slow-auditor"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = ObserverConfig::default();
    config.validate()?;

    let subject = ConcreteSubject::shared();
    let printer = ConcreteObserver::new(&subject);
    let (auditor, rx) = QueuedObserver::attach_to(&subject, "auditor", config.queue.capacity)?;

    let dispatcher = spawn_dispatcher(rx, Arc::new(SlowAuditor));

    // Sized to hold every demo change so the tally sees all of them
    let (tally, tally_rx) =
        QueuedObserver::attach_to(&subject, "tally", config.demo.states.len().max(1))?;

    // set_state returns as soon as the printer has run; the auditor catches up later
    for &state in &config.demo.states {
        subject.set_state(state);
    }
    info!(
        printer_state = printer.observer_state(),
        "All state changes published"
    );

    let dropped = auditor.dropped();
    subject.detach_observer(&auditor);
    drop(auditor);

    let handled = dispatcher.await.unwrap_or_default();
    info!(handled, dropped, "Auditor drained its queue");

    subject.detach_observer(&tally);
    drop(tally);

    let seen = into_stream(tally_rx)
        .map(|change| change.state)
        .collect::<Vec<i64>>()
        .await;
    info!(
        changes = seen.len(),
        total = seen.iter().sum::<i64>(),
        "Tally stream finished"
    );

    Ok(())
}
