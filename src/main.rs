use color_eyre::eyre::{Result, WrapErr};
use database::{LeagueGenerator, LeagueSnapshot};
use economy::{Offseason, OffseasonConfig};
use env_logger::Env;
use log::{debug, info};
use std::env;
use std::fs;
use std::time::Instant;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn load_config() -> Result<OffseasonConfig> {
    match env::var("OFFSEASON_CONFIG") {
        Ok(path) => {
            let json = fs::read_to_string(&path).wrap_err_with(|| format!("reading config {}", path))?;
            let config = OffseasonConfig::from_json(&json).wrap_err_with(|| format!("parsing config {}", path))?;
            Ok(config.with_env_overrides())
        }
        Err(_) => Ok(OffseasonConfig::from_env()),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    info!(
        "offseason {}: {} teams, seed {}, cap {}",
        config.year,
        config.teams,
        config.seed,
        config.baseline_cap(config.year)
    );

    let started = Instant::now();
    let league = LeagueGenerator::generate(&config).wrap_err("generating league")?;
    info!("league generated: {} ms", started.elapsed().as_millis());

    let started = Instant::now();
    let offseason = Offseason::new(config, league.teams, league.players, league.caps);
    let (offseason, report) = offseason.run();
    info!("offseason simulated: {} ms", started.elapsed().as_millis());

    if log::log_enabled!(log::Level::Debug) {
        let snapshot = LeagueSnapshot::capture(&offseason).to_json()?;
        debug!("final league state: {}", snapshot);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
