/*
 *  main.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::{Duration, Instant};

use env_logger::Env;
use log::info;

use tokio::signal::unix::{SignalKind, signal};

use croaster_display::config;
use croaster_display::display::{DisplayController, PanelDriver, Ssd1306Panel};
use croaster_display::net::LocalIpSource;
use croaster_display::roast::{RoastSnapshot, SharedRoast};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
///
/// Once a signal is caught the function logs the event and returns,
/// allowing for graceful shutdown.
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Publishes a synthetic roast profile so the display can be exercised on a
/// bench with no probe subsystem attached.
async fn demo_feed(roast: SharedRoast) {
    let started = Instant::now();
    loop {
        let t = started.elapsed().as_secs_f64();

        // first-order approach toward a drop temperature; the rate-of-rise
        // figures are the matching derivatives in degrees per minute
        let bt = 25.0 + 180.0 * (1.0 - (-t / 300.0).exp());
        let et = 25.0 + 210.0 * (1.0 - (-t / 240.0).exp());
        let ror_bt = 36.0 * (-t / 300.0).exp();
        let ror_et = 52.5 * (-t / 240.0).exp();

        roast.publish(RoastSnapshot {
            bt,
            et,
            ror_bt,
            ror_et,
            unit: "C".to_string(),
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

/// Steady-state loop: tick the scheduler at sub-second cadence and service
/// the host-triggered control surface.
///
/// SIGUSR1 rotates the screen; SIGUSR2 toggles the activity indicator.
async fn run_loop<P: PanelDriver>(controller: &mut DisplayController<P>) -> anyhow::Result<()> {
    let mut rotate = signal(SignalKind::user_defined1())?;
    let mut blink = signal(SignalKind::user_defined2())?;
    let mut indicator_lit = false;

    // must stay well under the 1s refresh cadence
    let tick_poll_duration = Duration::from_millis(100);

    loop {
        tokio::select! {
            _ = tokio::time::sleep(tick_poll_duration) => {
                controller.tick(Instant::now());
            }
            _ = rotate.recv() => {
                info!("SIGUSR1 received, rotating screen");
                controller.rotate_screen();
            }
            _ = blink.recv() => {
                indicator_lit = !indicator_lit;
                controller.set_indicator(indicator_lit);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load()?;

    let default_level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    info!("croaster display controller");
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let roast = SharedRoast::new();
    let mut controller = DisplayController::new(
        Ssd1306Panel::new(),
        Box::new(roast.clone()),
        Box::new(LocalIpSource),
        cfg.address(),
    );

    // Discovery and the splash are the two blocking phases; both finish
    // before the scheduler is ever ticked.
    controller.begin(cfg.show_splash())?;

    if cfg.rotate_deg() == 180 {
        controller.rotate_screen();
    }

    if !controller.is_present() {
        info!("running without a panel; display operations are no-ops");
    }

    if cfg.demo() {
        info!("demo feed enabled");
        tokio::spawn(demo_feed(roast.clone()));
    }

    tokio::select! {
        _ = signal_handler() => {}
        res = run_loop(&mut controller) => {
            res?;
        }
    }

    info!("Main application exiting.");
    Ok(())
}
