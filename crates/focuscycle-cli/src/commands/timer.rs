use std::io::{self, Write};

use tokio::sync::watch;

use focuscycle_core::session::ticker;
use focuscycle_core::storage::{Database, SnapshotStore};
use focuscycle_core::{
    Config, Countdown, Event, NewCycle, SessionController, TickOutcome, TickerExit,
};

fn load_controller(config: &Config) -> Result<SessionController, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let snapshots = SnapshotStore::new(db);
    Ok(SessionController::load(snapshots, config.duration_bounds()))
}

pub fn start(task: &str, minutes: u32) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut controller = load_controller(&config)?;
    let event = controller.start_cycle(NewCycle {
        task: task.to_string(),
        minutes_amount: minutes,
    })?;
    if let Event::CycleStarted {
        task,
        minutes_amount,
        ..
    } = event
    {
        println!("Started '{task}' for {minutes_amount} min");
    }
    Ok(())
}

pub fn stop() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut controller = load_controller(&config)?;
    match controller.interrupt_cycle() {
        Some(Event::CycleInterrupted { task, .. }) => println!("Interrupted '{task}'"),
        _ => println!("No active cycle"),
    }
    Ok(())
}

pub fn status(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut controller = load_controller(&config)?;

    // Tick once so a cycle that ran out while no process was watching
    // gets stamped finished before we report.
    let now = chrono::Utc::now();
    let outcome = controller.tick(now);
    let snapshot = controller.snapshot_event(&config.display.idle_title, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        if let TickOutcome::Finished { event, .. } = &outcome {
            println!("{}", serde_json::to_string_pretty(event)?);
        }
        return Ok(());
    }

    match outcome {
        TickOutcome::Idle => println!("No active cycle"),
        TickOutcome::Running(countdown) => {
            let task = controller
                .active_cycle()
                .map(|c| c.task.as_str())
                .unwrap_or_default();
            println!("{} remaining on '{task}'", countdown.clock());
        }
        TickOutcome::Finished { event, .. } => {
            if let Event::CycleFinished { task, .. } = event {
                println!("Cycle finished: '{task}'");
            }
        }
    }
    Ok(())
}

/// Live countdown in the terminal, one redraw per tick.
///
/// Ctrl-C detaches without touching the cycle; the countdown keeps
/// running on wall-clock time and any invocation can pick it up again.
pub fn watch() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut controller = load_controller(&config)?;
    if !controller.has_active_cycle() {
        println!("No active cycle");
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let exit = runtime.block_on(async {
        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });

        ticker::run(&mut controller, stop_rx, |c, outcome| {
            if let TickOutcome::Running(countdown) = outcome {
                let task = c
                    .active_cycle()
                    .map(|cycle| cycle.task.clone())
                    .unwrap_or_default();
                render_countdown(countdown, &task);
            }
        })
        .await
    });

    println!();
    match exit {
        TickerExit::Finished => {
            set_terminal_title(&config.display.idle_title);
            if let Some(cycle) = controller.state().referenced_cycle() {
                println!("Cycle finished: '{}'", cycle.task);
            }
        }
        TickerExit::Idle => {
            set_terminal_title(&config.display.idle_title);
            println!("No active cycle");
        }
        TickerExit::Canceled => println!("Detached; the cycle keeps running"),
    }
    Ok(())
}

fn render_countdown(countdown: &Countdown, task: &str) {
    set_terminal_title(&countdown.clock());
    print!("\r{} remaining on '{task}'", countdown.clock());
    let _ = io::stdout().flush();
}

/// Best-effort OSC 0 escape; terminals without title support ignore it.
fn set_terminal_title(title: &str) {
    print!("\x1b]0;{title}\x07");
    let _ = io::stdout().flush();
}
