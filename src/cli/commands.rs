//! Interactive transport session.
//!
//! Drives a [`TransportController`] over the simulated engine from stdin:
//! play/pause, skip, repeat and the position/pitch/speed sliders as line
//! commands. Ticks from the poller are drained before each prompt so the
//! readout tracks the simulated clock.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use log::info;

use crate::cli::Cli;
use crate::engine::transport::SKIP_STEP_SECS;
use crate::engine::{AudioEngine, SimEngine, TransportController};
use crate::error::Result;
use crate::poll::Ticker;
use crate::track::Track;

/// Run the interactive session until `q` or end of input.
pub fn run(cli: &Cli) -> Result<()> {
    let track = Track::new(cli.track.clone())?;
    info!("Now playing: {}", track.title());

    let engine = SimEngine::new(cli.duration);
    let mut controller = TransportController::new(engine, track);
    controller.set_volume(cli.volume);

    let (mut ticker, ticks) = Ticker::spawn(Duration::from_millis(cli.interval_ms))?;

    println!("Transport: space=play/pause  [=back 10s  ]=forward 10s  r=repeat");
    println!("           seek <s>  pitch <ratio>  speed <ratio>  j=json  q=quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        drain_ticks(&ticks, &mut controller);
        print_status(&controller);

        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        if !dispatch(line.trim(), &mut controller)? {
            break;
        }
    }

    ticker.cancel();
    controller.release();
    Ok(())
}

fn drain_ticks<E: AudioEngine>(
    ticks: &Receiver<()>,
    controller: &mut TransportController<E>,
) {
    // Blocking on stdin can leave several ticks queued; one catch-up tick
    // against the engine clock is equivalent.
    let mut pending = false;
    while ticks.try_recv().is_ok() {
        pending = true;
    }
    if pending {
        controller.tick();
    }
}

fn print_status<E: AudioEngine>(controller: &TransportController<E>) {
    print!(
        "[{} | {} | pitch {} | speed {} | repeat {}] > ",
        controller.state(),
        controller.time_display(),
        controller.pitch_display(),
        controller.rate_display(),
        if controller.repeat_enabled() { "on" } else { "off" },
    );
}

fn dispatch<E: AudioEngine>(
    input: &str,
    controller: &mut TransportController<E>,
) -> Result<bool> {
    // An explicit tick before acting keeps skip math close to the engine
    // clock even right after a long stdin wait.
    controller.tick();

    match input {
        "" | " " | "p" => controller.toggle_play(),
        "[" => controller.skip(-SKIP_STEP_SECS),
        "]" => controller.skip(SKIP_STEP_SECS),
        "r" => controller.toggle_repeat(),
        "j" => match serde_json::to_string_pretty(&controller.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("snapshot failed: {}", err),
        },
        "q" => return Ok(false),
        other => dispatch_valued(other, controller),
    }
    Ok(true)
}

fn dispatch_valued<E: AudioEngine>(
    input: &str,
    controller: &mut TransportController<E>,
) {
    let mut parts = input.split_whitespace();
    let (Some(cmd), Some(arg)) = (parts.next(), parts.next()) else {
        println!("unrecognized command: {:?}", input);
        return;
    };
    let Ok(value) = arg.parse::<f64>() else {
        println!("not a number: {:?}", arg);
        return;
    };

    match cmd {
        "seek" => controller.seek(value),
        "pitch" => controller.set_pitch(value),
        "speed" => controller.set_rate(value),
        _ => println!("unrecognized command: {:?}", cmd),
    }
}
