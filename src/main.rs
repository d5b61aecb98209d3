use anyhow::Context;
use futures::future::{BoxFuture, FutureExt};
use multi_assert::{
    cli::{ColorOpt, OnlyOpt, Opts},
    multi_assert_parallel_with, AssertionError, Config, Failure, MultiAssert,
    MultiAssertAsync,
};
use std::{fmt::Debug, time::Duration};
use structopt::StructOpt;
use tokio::{runtime, time};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn expect_eq<T: PartialEq + Debug>(actual: T, expected: T) -> Result<(), Failure> {
    if actual == expected {
        Ok(())
    } else {
        Err(Failure::new(format!(
            "expected {:?} to equal {:?}",
            actual, expected
        )))
    }
}

/// Stand-in for a slow service call.
async fn fetch_status() -> &'static str {
    time::sleep(Duration::from_millis(300)).await;
    "bluegreen"
}

fn sync_scenario(config: &Config) -> Result<(), AssertionError> {
    MultiAssert::new()
        .with_config(config.clone())
        .check(|| expect_eq(1, 2))
        .check(|| expect_eq(3, 3))
        .check(|| expect_eq(3, 4))
        .run()
}

async fn async_scenario(config: &Config) -> Result<(), AssertionError> {
    MultiAssertAsync::new()
        .with_config(config.clone())
        .check(|| async { expect_eq(fetch_status().await, "yellowblue") })
        .check(|| async { expect_eq(3, 4) })
        .check(|| async { expect_eq(fetch_status().await, "bluegreen") })
        .check(|| async { expect_eq(fetch_status().await, "yellowred") })
        .run()
        .await
}

type SendCheck = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), Failure>> + Send>;

async fn parallel_scenario(config: &Config) -> Result<(), AssertionError> {
    let mut checks: Vec<SendCheck> = Vec::with_capacity(3);
    checks.push(Box::new(|| {
        async { expect_eq(fetch_status().await, "yellowblue") }.boxed()
    }));
    checks.push(Box::new(|| async { expect_eq(3, 4) }.boxed()));
    checks.push(Box::new(|| {
        async { expect_eq(fetch_status().await, "bluegreen") }.boxed()
    }));
    multi_assert_parallel_with(checks, config.clone()).await
}

/// Print the outcome of one scenario and return whether it failed.
fn report(name: &str, res: Result<(), AssertionError>) -> bool {
    use colored::*;
    match res {
        Ok(()) => {
            println!("{} {}", "✓".green(), name.bold());
            false
        }
        Err(err) => {
            println!("{} {}{}", "✗".red(), name.bold(), err);
            true
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let opts = Opts::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(opts.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = match &opts.config {
        Some(path) => Config::from_path(path)?,
        None => Config::from_env(),
    };
    match opts.color {
        ColorOpt::Auto => {}
        ColorOpt::Always => colored::control::set_override(true),
        ColorOpt::Never => {
            colored::control::set_override(false);
            config.color = false;
        }
    }
    info!(?config, "loaded report configuration");

    let wants = |kind: OnlyOpt| opts.only.map_or(true, |only| only == kind);
    let mut failed = false;

    if wants(OnlyOpt::Sync) {
        failed |= report("sequential checks", sync_scenario(&config));
    }

    if wants(OnlyOpt::Async) || wants(OnlyOpt::Parallel) {
        let runtime = runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(opts.jobs.unwrap_or_else(num_cpus::get))
            .build()
            .context("failed to start the async runtime")?;

        if wants(OnlyOpt::Async) {
            let res = runtime.block_on(async_scenario(&config));
            failed |= report("concurrent checks", res);
        }
        if wants(OnlyOpt::Parallel) {
            let res = runtime.block_on(parallel_scenario(&config));
            failed |= report("parallel checks", res);
        }
    }

    // 1 when any scenario reported failures, however many.
    Ok(i32::from(failed))
}

fn main() {
    std::process::exit(match run() {
        Err(err) => {
            eprintln!("error: {:#}", err);
            2
        }
        Ok(code) => code,
    })
}
