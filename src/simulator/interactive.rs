use super::{display::DisplayTerminal, Outcome, Scheduler, SimulationRunner};
use crate::error::SimError;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    None,
}

impl RunnerEvent {
    pub fn from_key(key: KeyEvent) -> Self {
        if !key.modifiers.is_empty() {
            return RunnerEvent::None;
        }
        match key.code {
            KeyCode::Char('q') => RunnerEvent::Quit,
            KeyCode::Char('p') => RunnerEvent::Pause,
            KeyCode::Char('r') => RunnerEvent::Resume,
            KeyCode::Char('s') => RunnerEvent::Step,
            _ => RunnerEvent::None,
        }
    }
}

/// Steps a simulation once per tick while drawing it to the terminal.
pub struct InteractiveRunner<S> {
    terminal: DisplayTerminal,
    runner: SimulationRunner<S>,
    paused: bool,
}

impl<S: Scheduler> InteractiveRunner<S> {
    pub fn new(runner: SimulationRunner<S>, tick_rate: Duration) -> Result<Self, SimError> {
        let terminal = DisplayTerminal::new(tick_rate)?;

        Ok(Self {
            terminal,
            runner,
            paused: false,
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, SimError> {
        if !self.paused {
            self.runner.step();
        }
        self.terminal.draw(&self.runner, self.paused)?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => {
                self.runner.step();
            }
            _ => {}
        }
        Ok(true)
    }

    pub fn into_outcome(self) -> Outcome {
        self.runner.outcome()
    }
}
