//! `watch`: run the poll loops and print every snapshot replacement.
//!
//! Snapshots and notifications both reach this task by message passing:
//! snapshot streams for the three resources, an mpsc channel for
//! notifications. Ctrl-C (or `--count`) stops the monitor.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tokio::sync::mpsc;

use overseer_core::{Monitor, MonitorConfig, Notification, NotificationSink};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output::{self, ConsoleSink};

use super::{filament, jobs, printers};

pub async fn handle(
    mut config: MonitorConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(overlap) = args.overlap {
        config.overlap = overlap;
    }
    if let Some(n) = args.escalate_after {
        config.failure_escalation = Some(n).filter(|n| *n > 0);
    }

    let console = ConsoleSink::new(output::should_color(&global.color), global.quiet);
    let (tx, mut notifications) = mpsc::unbounded_channel::<Notification>();
    let monitor = Monitor::new(config, Arc::new(tx))?;

    let mut printer_stream = monitor.printers();
    let mut job_stream = monitor.print_jobs();
    let mut filament_stream = monitor.filament_changes();

    monitor.start().await?;
    if !global.quiet {
        eprintln!(
            "Watching {} every {} ms (Ctrl-C to stop)",
            monitor.config().endpoint,
            monitor.config().poll_interval.as_millis()
        );
    }

    let mut printer_refreshes: u64 = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(n) = notifications.recv() => console.notify(n),
            Some(snap) = printer_stream.changed() => {
                print_section(
                    "Printers",
                    snap.updated_at,
                    &printers::render(&snap.records, global),
                    global,
                );
                printer_refreshes += 1;
                if args.count.is_some_and(|max| printer_refreshes >= max) {
                    break;
                }
            }
            Some(snap) = job_stream.changed() => {
                print_section(
                    "Print jobs",
                    snap.updated_at,
                    &jobs::render(&snap.records, global),
                    global,
                );
            }
            Some(snap) = filament_stream.changed() => {
                print_section(
                    "Filament changes",
                    snap.updated_at,
                    &filament::render(&snap.records, global),
                    global,
                );
            }
        }
    }

    monitor.shutdown().await;
    // Drain notifications from commands or polls that finished meanwhile.
    while let Ok(n) = notifications.try_recv() {
        console.notify(n);
    }
    Ok(())
}

fn print_section(title: &str, updated_at: Option<DateTime<Utc>>, body: &str, global: &GlobalOpts) {
    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let stamp = updated_at.map_or_else(
            || "never".to_owned(),
            |t| t.with_timezone(&Local).format("%H:%M:%S").to_string(),
        );
        println!("── {title} · updated {stamp} ──");
    }
    output::print_output(body, global.quiet);
}
