use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};
use lap_core::{Clock, Command, Stopwatch};
use ratatui::DefaultTerminal;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::keymap::{action_for, command_for, Action};
use crate::pump::Pump;
use crate::ui::{max_scroll, StopwatchView, Theme};

/// Rows taken by everything on screen except the lap list.
const CHROME_ROWS: u16 = 8;

#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Pump { generation: u64 },
    /// The terminal input source failed; no further input will arrive.
    InputClosed(io::Error),
}

pub struct TimerApp {
    stopwatch: Stopwatch,
    clock: Arc<dyn Clock>,
    pump: Pump,
    theme: Theme,
    lap_scroll_offset: usize,
    lap_viewport: usize,
    quit: bool,
}

impl TimerApp {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>, events: Sender<AppEvent>) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            clock,
            pump: Pump::spawn(events, Duration::from_millis(config.tick_ms)),
            theme: Theme::from_config(&config.theme),
            lap_scroll_offset: 0,
            lap_viewport: 0,
            quit: false,
        }
    }

    pub fn run(mut self, terminal: &mut DefaultTerminal, events: Receiver<AppEvent>) -> AppResult<()> {
        self.draw(terminal)?;
        self.process(&events, |app| app.draw(terminal))?;
        self.pump.shutdown();
        log::info!("stopwatch closed at {} ms", self.stopwatch.elapsed_ms());
        Ok(())
    }

    /// Handles events until quit, calling `redraw` whenever the screen changed.
    fn process<F>(&mut self, events: &Receiver<AppEvent>, mut redraw: F) -> AppResult<()>
    where
        F: FnMut(&mut Self) -> AppResult<()>,
    {
        while !self.quit {
            let event = match events.recv().map_err(|_| AppError::ChannelClosed)? {
                AppEvent::InputClosed(e) => {
                    if self.stopwatch.is_running() {
                        self.apply(Command::Stop);
                    }
                    return Err(AppError::Io(e));
                }
                event => event,
            };
            if self.handle_event(event) {
                redraw(self)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> AppResult<()> {
        let height = terminal.size()?.height;
        self.lap_viewport = usize::from(height.saturating_sub(CHROME_ROWS));
        self.clamp_scroll();
        let view = StopwatchView::new(&self.stopwatch, self.lap_scroll_offset, &self.theme);
        terminal.draw(|frame| frame.render_widget(&view, frame.area()))?;
        Ok(())
    }

    /// Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Pump { generation } => self.handle_pump(generation),
            AppEvent::Input(Event::Key(key)) => match action_for(&key) {
                Some(action) => self.handle_action(action),
                None => false,
            },
            AppEvent::Input(Event::Resize(_, _)) => true,
            AppEvent::Input(_) | AppEvent::InputClosed(_) => false,
        }
    }

    fn handle_pump(&mut self, generation: u64) -> bool {
        if !self.pump.accepts(generation) {
            log::trace!("dropping stale tick from generation {}", generation);
            return false;
        }
        self.stopwatch.tick(self.clock.now_ms());
        true
    }

    fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                if self.stopwatch.is_running() {
                    self.apply(Command::Stop);
                }
                self.quit = true;
                false
            }
            Action::ScrollUp => {
                if self.lap_scroll_offset == 0 {
                    return false;
                }
                self.lap_scroll_offset -= 1;
                true
            }
            Action::ScrollDown => {
                let before = self.lap_scroll_offset;
                self.lap_scroll_offset += 1;
                self.clamp_scroll();
                before != self.lap_scroll_offset
            }
            Action::LeftButton | Action::RightButton => {
                match command_for(action, &self.stopwatch.controls()) {
                    Some(command) => self.apply(command),
                    None => log::debug!("{:?} is disabled", action),
                }
                true
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let now = self.clock.now_ms();
        if let Err(e) = self.stopwatch.apply(command, now) {
            log::debug!("ignoring {:?}: {}", command, e);
            return;
        }
        log::info!(
            "{} at {} ms, elapsed {} ms, {} laps",
            command.label(),
            now,
            self.stopwatch.elapsed_ms(),
            self.stopwatch.lap_count()
        );
        match command {
            Command::Start | Command::Resume => self.pump.start(),
            Command::Stop => self.pump.stop(),
            Command::Reset => self.lap_scroll_offset = 0,
            Command::Lap => {}
        }
        debug_assert_eq!(self.pump.is_running(), self.stopwatch.is_running());
    }

    fn clamp_scroll(&mut self) {
        let limit = max_scroll(self.stopwatch.lap_count(), self.lap_viewport);
        self.lap_scroll_offset = self.lap_scroll_offset.min(limit);
    }
}

/// Forwards terminal events to the main loop until it goes away.
pub fn spawn_input_thread(events: Sender<AppEvent>) {
    spawn_reader(events, event::read);
}

fn spawn_reader<R>(events: Sender<AppEvent>, mut read: R)
where
    R: FnMut() -> io::Result<Event> + Send + 'static,
{
    thread::spawn(move || loop {
        match read() {
            Ok(ev) => {
                if events.send(AppEvent::Input(ev)).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("terminal input error: {}", e);
                // The pump keeps the channel open, so the loop must be told
                events.send(AppEvent::InputClosed(e)).ok();
                break;
            }
        }
    });
}
