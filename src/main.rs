use anyhow::{Context, Result};
use clap::Parser;
use counter_race::{
    cli::{Cli, OutputFormat, Schedule, SimulationConfig},
    simulator::{
        InteractiveRunner, Job, Outcome, RandomScheduler, ReadsFirstScheduler,
        RoundRobinScheduler, Scheduler, SerialScheduler, SimulationRunner,
    },
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = cli.log_level();
    let interactive = cli.interactive;

    // Log lines would tear through the terminal view
    if !interactive {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();
    }

    let config = cli.into_config().context("invalid command line")?;

    let outcome = if config.interactive {
        run_interactive(&config)?
    } else {
        config.run_headless().context("simulation failed")?
    };

    match config.format {
        OutputFormat::Text => println!("{outcome}"),
        OutputFormat::Json => println!("{}", outcome.to_json()?),
    }
    Ok(())
}

fn run_interactive(config: &SimulationConfig) -> Result<Outcome> {
    let jobs = Job::batch(config.tasks);
    match config.schedule {
        Schedule::Serial => step_through(SerialScheduler::with_jobs(jobs), config),
        Schedule::ReadsFirst => step_through(ReadsFirstScheduler::with_jobs(jobs), config),
        Schedule::RoundRobin { quantum } => {
            step_through(RoundRobinScheduler::with_jobs(jobs, quantum), config)
        }
        Schedule::Random { seed } => step_through(RandomScheduler::with_jobs(jobs, seed), config),
        Schedule::Async => anyhow::bail!("the async schedule cannot be stepped interactively"),
    }
}

fn step_through<S: Scheduler>(scheduler: S, config: &SimulationConfig) -> Result<Outcome> {
    execute!(io::stdout(), Clear(ClearType::All))?;

    let runner = SimulationRunner::new(scheduler, config.initial);
    let mut interactive = InteractiveRunner::new(runner, config.tick_rate)
        .context("failed to set up the terminal")?;

    while interactive.run()? {}

    let outcome = interactive.into_outcome();
    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(outcome)
}
