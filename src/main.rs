// Radar tracker - Main Entry Point
// Copyright (C) 2024
// Licensed under AGPL v3
//
// Polls an aircraft feed, keeps the live tracking model and writes per-aircraft snapshots.

use std::time::{Duration, Instant};
use clap::Parser;
use tokio::{signal, time};
use tracing::{debug, error, info, warn};

use radar_track::config::Config;
use radar_track::feed;
use radar_track::output::{CsvOutput, JsonSnapshotOutput, OutputHandler};
use radar_track::tracker::Tracker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    info!("Starting radar tracker");
    info!("Reference position {:.4}, {:.4}", config.base_lat, config.base_lon);

    let mut tracker = Tracker::new(config.tracker_config());

    // Outputs
    let mut outputs: Vec<Box<dyn OutputHandler>> = Vec::new();
    if let Some(dir) = &config.cache_dir {
        match JsonSnapshotOutput::new(dir) {
            Ok(out) => {
                info!("Writing aircraft snapshots to {}", dir);
                outputs.push(Box::new(out));
            }
            Err(e) => error!("Failed to create snapshot directory {}: {}", dir, e),
        }
    }
    if let Some(filename) = &config.write_csv {
        match CsvOutput::new(filename) {
            Ok(out) => {
                info!("Writing CSV results to {}", filename);
                outputs.push(Box::new(out));
            }
            Err(e) => error!("Failed to open CSV output file {}: {}", filename, e),
        }
    }

    let poll_interval = Duration::from_secs_f64(config.poll_interval);
    let status_interval = (config.status_interval > 0)
        .then(|| Duration::from_secs(config.status_interval as u64));
    let mut last_status = Instant::now();

    let mut ticker = time::interval(poll_interval);
    ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

    info!("Polling {} every {:.1}s", config.feed, poll_interval.as_secs_f64());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                poll_once(&config.feed, &mut tracker, &mut outputs).await;

                if let Some(interval) = status_interval {
                    if last_status.elapsed() >= interval {
                        log_status(&tracker);
                        last_status = Instant::now();
                    }
                }
            }
            res = signal::ctrl_c() => {
                match res {
                    Ok(()) => info!("Received shutdown signal (Ctrl+C)"),
                    Err(err) => {
                        error!("Unable to listen for shutdown signal: {}", err);
                        return Err(err.into());
                    }
                }
                break;
            }
        }
    }

    info!("Shutting down...");
    for out in outputs.iter_mut() {
        out.flush();
    }
    log_status(&tracker);

    Ok(())
}

/// One update cycle: drain the feed into the tracker, publish updates, evict
async fn poll_once(path: &str, tracker: &mut Tracker, outputs: &mut [Box<dyn OutputHandler>]) {
    let now = radar_track::now_secs();

    match feed::read_feed(path).await {
        Ok(feed) => {
            if feed.skipped > 0 {
                debug!("Skipped {} unreadable feed entries", feed.skipped);
            }
            let mut touched = tracker.upsert_all(&feed.messages, now);
            touched.sort();
            touched.dedup();
            for hex in &touched {
                if let Some(ac) = tracker.get(hex) {
                    for out in outputs.iter_mut() {
                        out.handle_update(ac);
                    }
                }
            }
        }
        Err(e) => warn!("Failed to read feed {}: {}", path, e),
    }

    let evicted = tracker.evict_expired(now);
    if !evicted.is_empty() {
        info!("Evicted {} aircraft", evicted.len());
        for hex in &evicted {
            for out in outputs.iter_mut() {
                out.handle_eviction(hex);
            }
        }
    }

    for out in outputs.iter_mut() {
        out.flush();
    }
}

fn log_status(tracker: &Tracker) {
    let now = radar_track::now_secs();
    let stats = tracker.stats();
    info!(
        "Status: {} aircraft ({} stale), {} created, {} evicted, {} rejected messages",
        tracker.num_aircraft(),
        tracker.num_stale(now),
        stats.created,
        stats.evicted,
        stats.rejected,
    );
}

/// Initialize logging subsystem
fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    if verbose {
        subscriber
            .with_max_level(tracing::Level::DEBUG)
            .init();
        info!("Verbose logging enabled (DEBUG level)");
    } else {
        subscriber
            .with_max_level(tracing::Level::INFO)
            .init();
    }
}
