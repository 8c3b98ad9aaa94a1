//! Long-running mode: keeps the display answer current and refreshes the
//! export in the background.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use tokio::task::spawn_blocking;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::Engine;
use crate::clock::Clock;
use crate::render::Render;

const REDRAW_EVERY: Duration = Duration::from_secs(60);

type SharedEngine = Arc<Mutex<Engine>>;

/// The engine does blocking I/O, so every call runs on tokio's blocking pool
/// behind a mutex. The runtime is built here rather than in `main` so the
/// engine is created and dropped outside of it.
pub fn run(engine: Engine, refresh_every: Duration, clock: Clock) -> Result<()> {
    let engine = Arc::new(Mutex::new(engine));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(watch(Arc::clone(&engine), refresh_every, clock))
}

async fn watch(engine: SharedEngine, refresh_every: Duration, clock: Clock) -> Result<()> {
    with_engine(&engine, |engine| {
        if let Err(e) = engine.ensure_loaded() {
            warn!(error = %e, "no timetable yet, waiting for the next refresh");
        }
    })
    .await?;

    let refresher = tokio::spawn(refresh_loop(Arc::clone(&engine), refresh_every));

    let mut redraw = interval(REDRAW_EVERY);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_shown = String::new();

    loop {
        tokio::select! {
            _ = redraw.tick() => {
                let now = clock.now();
                let result = with_engine(&engine, move |engine| {
                    engine.get_schedule_for_display(now)
                })
                .await?;

                let rendered = result.render();
                if rendered != last_shown {
                    println!("{}\n", rendered);
                    last_shown = rendered;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping");
                break;
            }
        }
    }

    refresher.abort();
    Ok(())
}

async fn refresh_loop(engine: SharedEngine, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; startup already loaded.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let result = with_engine(&engine, |engine| engine.refresh()).await;

        match result {
            Ok(Ok(outcome)) => info!(?outcome, "timetable refreshed"),
            Ok(Err(e)) => warn!(error = %e, "timetable refresh failed, keeping cached data"),
            Err(e) => warn!(error = %e, "refresh worker failed"),
        }
    }
}

async fn with_engine<T, F>(engine: &SharedEngine, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Engine) -> T + Send + 'static,
{
    let engine = Arc::clone(engine);
    spawn_blocking(move || {
        let mut guard = engine
            .lock()
            .map_err(|_| anyhow!("timetable engine lock poisoned"))?;
        Ok(f(&mut guard))
    })
    .await?
}
