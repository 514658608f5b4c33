//! Marquee command - scroll the storefront slogans

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;

use super::get_context;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub fn run(speed: Option<f64>, width: usize, duration: f64) -> Result<()> {
    let ctx = get_context()?;
    let mut marquee = ctx.marquee();
    if let Some(speed) = speed {
        marquee = marquee.with_speed(speed);
    }

    // Piped output gets one still frame
    if atty::isnt(atty::Stream::Stdout) {
        println!("{}", marquee.frame(0, width));
        return Ok(());
    }

    let duration = run_time(duration);
    let started = Instant::now();
    let mut stdout = std::io::stdout();

    loop {
        let elapsed = started.elapsed();
        let frame = marquee.frame_at(elapsed, width).to_uppercase();
        print!("\r{}", frame.red().bold().italic());
        stdout.flush()?;

        if elapsed >= duration {
            break;
        }
        thread::sleep(FRAME_INTERVAL);
    }

    println!();
    Ok(())
}

/// Animation length; negative or NaN runs one frame, overflow runs forever
fn run_time(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
