use super::{interactive::RunnerEvent, Scheduler, SimulationRunner};
use crossterm::event::{self, Event, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    // Dropping the sender makes the receiving side quit.
                    Err(_) => return,
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw<S>(&mut self, runner: &SimulationRunner<S>, paused: bool) -> Result<(), io::Error>
    where
        S: Scheduler,
    {
        self.terminal.draw(|f| render(f, runner, paused))?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) => RunnerEvent::from_key(key),
            Ok(DisplayEvent::Tick) => RunnerEvent::None,
            Err(_) => RunnerEvent::Quit,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

fn or_dash(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

pub fn render<B, S>(f: &mut Frame<B>, runner: &SimulationRunner<S>, paused: bool)
where
    B: Backend,
    S: Scheduler,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let last_step = runner
        .last_step()
        .map_or_else(|| "none".to_owned(), ToString::to_string);
    let header = Paragraph::new(format!(
        "Shared counter: {} | Last step: {}",
        runner.counter().read(),
        last_step
    ))
    .style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::LightBlue),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Shared Counter")
            .border_type(BorderType::Rounded),
    );

    f.render_widget(header, chunks[0]);

    let current = runner.scheduler().current_job().map(|job| job.id());
    let items = runner.scheduler().jobs().iter().map(|job| {
        let state = job.state();
        let style = if Some(job.id()) == current && !job.is_finished() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(job.id().to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(job.name().to_owned()),
            Cell::from(state.to_string()),
            Cell::from(or_dash(state.observed())),
            Cell::from(or_dash(state.result())),
            Cell::from(job.steps().to_string()),
        ])
        .style(style)
    });

    let title = runner.scheduler().label();
    let table = Table::new(items)
        .header(
            Row::new(vec!["ID", "Name", "State", "Observed", "Result", "Steps"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .widths(&[
            Constraint::Length(4),
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(5),
        ])
        .block(Block::default().title(title).borders(Borders::ALL))
        .style(Style::default().fg(Color::LightGreen))
        .column_spacing(1);

    f.render_widget(table, chunks[1]);

    let status = if runner.is_finished() {
        let outcome = runner.outcome();
        format!(
            "Finished | final {} | expected {} | lost updates {} | q: quit",
            outcome.final_value,
            outcome.expected(),
            outcome.lost_updates()
        )
    } else if paused {
        format!("Step {} | paused (s: step, r: resume, q: quit)", runner.steps())
    } else {
        format!("Step {} | running (p: pause, q: quit)", runner.steps())
    };
    let footer = Paragraph::new(status).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );

    f.render_widget(footer, chunks[2]);
}
