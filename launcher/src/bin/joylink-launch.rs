//! Start the joystick receiver in the background and exit.

use anyhow::Context;
use joylink_launcher::{run, LauncherConfig, ProcessHost, SystemHost};
use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut host = SystemHost;
    let config = match LauncherConfig::from_env().context("reading launcher configuration") {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            host.report(&format!("Error: {e:#}"));
            host.pause();
            std::process::exit(1);
        }
    };

    std::process::exit(run(&mut host, &config));
}
