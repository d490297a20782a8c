use crate::cfg::Config;
use anyhow::Result;
use roomjwt::kubectl::KubectlSecretProvider;
use roomjwt::SystemClock;
use std::env;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, Level};

//--------------------------------------------------------------------------------------------------

mod app;
mod args;
mod cfg;
mod report;

//--------------------------------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    // Load config
    let cfg = Config::load()?;

    // Initialize tracing, on stderr so the report can be piped
    let level = if cfg.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    debug!(
        "Reading signing secret {} via {}",
        cfg.secret, cfg.kubectl.program
    );
    let provider = KubectlSecretProvider::new(cfg.kubectl.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = app::execute(env::args().skip(1), &cfg, provider, SystemClock, &mut out);
    if let Err(err) = &result {
        error!("{}", err);
        report::write_failure(&mut out, err)?;
    }

    Ok(ExitCode::from(app::exit_status(&result)))
}

//--------------------------------------------------------------------------------------------------
