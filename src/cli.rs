use crate::{
    error::SimError,
    simulator::{
        run_async, simulate, Job, Outcome, RandomScheduler, ReadsFirstScheduler,
        RoundRobinScheduler, SerialScheduler, DEFAULT_QUANTUM, DEFAULT_TASKS,
    },
};
use clap::{ArgAction, Parser, ValueEnum};
use std::time::Duration;
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleKind {
    /// Each task finishes before the next one starts
    Serial,
    /// Every task reads before any task writes
    ReadsFirst,
    /// Tasks take turns, `--quantum` steps at a time
    RoundRobin,
    /// A seeded random task runs each step
    Random,
    /// Tasks yield to a single-threaded tokio runtime between read and write
    Async,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "counter-race")]
#[command(about = "Increment a shared counter from concurrent tasks and watch updates get lost", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of increment tasks to run
    #[arg(short = 'n', long, default_value_t = DEFAULT_TASKS)]
    pub tasks: usize,

    /// Starting value of the shared counter
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub initial: i64,

    /// How task steps are interleaved
    #[arg(short, long, value_enum, default_value = "reads-first")]
    pub schedule: ScheduleKind,

    /// Steps each task gets per turn (round-robin only)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub quantum: Option<u32>,

    /// Seed for the random schedule; drawn fresh when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Step through the simulation in a terminal view
    #[arg(short, long)]
    pub interactive: bool,

    /// Milliseconds between steps in the terminal view
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Serial,
    ReadsFirst,
    RoundRobin { quantum: u32 },
    Random { seed: u64 },
    Async,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub tasks: usize,
    pub initial: i64,
    pub schedule: Schedule,
    pub format: OutputFormat,
    pub interactive: bool,
    pub tick_rate: Duration,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Checks flag combinations and resolves per-schedule settings.
    pub fn into_config(self) -> Result<SimulationConfig, SimError> {
        if self.quantum.is_some() && self.schedule != ScheduleKind::RoundRobin {
            return Err(SimError::Config(
                "--quantum only applies to the round-robin schedule".to_owned(),
            ));
        }
        if self.seed.is_some() && self.schedule != ScheduleKind::Random {
            return Err(SimError::Config(
                "--seed only applies to the random schedule".to_owned(),
            ));
        }
        if self.interactive && self.schedule == ScheduleKind::Async {
            return Err(SimError::Config(
                "the async schedule runs on tokio and cannot be stepped interactively".to_owned(),
            ));
        }
        if self.interactive && self.format == OutputFormat::Json {
            return Err(SimError::Config(
                "--interactive cannot be combined with --format json".to_owned(),
            ));
        }

        let schedule = match self.schedule {
            ScheduleKind::Serial => Schedule::Serial,
            ScheduleKind::ReadsFirst => Schedule::ReadsFirst,
            ScheduleKind::RoundRobin => Schedule::RoundRobin {
                quantum: self.quantum.unwrap_or(DEFAULT_QUANTUM),
            },
            ScheduleKind::Random => {
                let seed = self.seed.unwrap_or_else(|| fastrand::u64(..));
                info!(seed, "random schedule seed");
                Schedule::Random { seed }
            }
            ScheduleKind::Async => Schedule::Async,
        };

        Ok(SimulationConfig {
            tasks: self.tasks,
            initial: self.initial,
            schedule,
            format: self.format,
            interactive: self.interactive,
            tick_rate: Duration::from_millis(self.tick_ms),
        })
    }
}

impl SimulationConfig {
    /// Runs the configured simulation to completion without a terminal view.
    pub fn run_headless(&self) -> Result<Outcome, SimError> {
        let jobs = Job::batch(self.tasks);
        let outcome = match self.schedule {
            Schedule::Serial => simulate(SerialScheduler::with_jobs(jobs), self.initial),
            Schedule::ReadsFirst => simulate(ReadsFirstScheduler::with_jobs(jobs), self.initial),
            Schedule::RoundRobin { quantum } => {
                simulate(RoundRobinScheduler::with_jobs(jobs, quantum), self.initial)
            }
            Schedule::Random { seed } => {
                simulate(RandomScheduler::with_jobs(jobs, seed), self.initial)
            }
            Schedule::Async => run_async(self.tasks, self.initial)?,
        };
        Ok(outcome)
    }
}
