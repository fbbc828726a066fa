//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `fakedomain` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use std::process;
use structopt::StructOpt;

use fakedomain::initialization::{init_logger_with, init_resolver};
use fakedomain::{parse_commands, Opt, ServiceWhois, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let opt = Opt::from_args();

    init_logger_with(opt.log_level.into(), opt.log_format).context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("fakedomain error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(opt: Opt) -> Result<()> {
    // Reject a malformed chain before the store is touched
    let commands = parse_commands(&opt.commands)?;

    let dns = init_resolver(opt.dns_timeout()).context("Failed to initialize DNS resolver")?;
    let whois = ServiceWhois::new(opt.whois_timeout());

    let mut session = Session::open(opt.db.clone(), dns, whois)?.with_out(opt.out.clone());

    session.run(&commands).await
}
