//! Optical application framework

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::input::{InputSimulator, OpticalEvent, OrientationReading};
use crate::renderer::{terminal::TerminalBackend, RenderBackend};
use crate::spatial::Transform;

/// Optical application trait
pub trait OpticalApp {
    /// Application state type
    type State;

    /// Initialize application state
    fn init(&mut self) -> Self::State;

    /// Handle an optical event, return true to continue, false to quit
    fn handle_event(&mut self, event: OpticalEvent, state: &mut Self::State) -> bool;

    /// Camera transform to render the next frame with
    fn camera(&self, state: &Self::State) -> Transform;

    /// Orientation the keyboard simulator continues from on the next key
    /// press; `None` leaves the simulator's own state in place
    fn orientation(&self, _state: &Self::State) -> Option<OrientationReading> {
        None
    }

    /// Render the application
    fn render(&self, state: &Self::State, backend: &mut dyn RenderBackend);

    /// Called each tick before rendering
    fn on_tick(&mut self, _state: &mut Self::State) {}

    /// Called once after the loop exits, before the terminal is restored
    fn on_exit(&mut self, _state: &mut Self::State) {}
}

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, including on early returns.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Ctrl+Q quits every app before the input simulator sees the key
fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Application runner for optical apps
pub struct OpticalAppRunner<A: OpticalApp> {
    app: A,
    backend: TerminalBackend,
    input_simulator: InputSimulator,
    tick_rate: Duration,
    running: bool,
}

impl<A: OpticalApp> OpticalAppRunner<A> {
    /// Create a new app runner
    pub fn new(app: A, fov_degrees: f32) -> io::Result<Self> {
        let backend = TerminalBackend::new(fov_degrees).map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self {
            app,
            backend,
            input_simulator: InputSimulator::new(),
            tick_rate: Duration::from_millis(100),
            running: true,
        })
    }

    /// Set tick rate
    pub fn with_tick_rate(mut self, rate: Duration) -> Self {
        self.tick_rate = rate;
        self
    }

    /// Replace the keyboard orientation simulator
    pub fn with_input_simulator(mut self, simulator: InputSimulator) -> Self {
        self.input_simulator = simulator;
        self
    }

    /// Run the application until it asks to quit
    pub fn run(&mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;

        let mut state = self.app.init();
        let result = self.event_loop(&mut state);
        self.app.on_exit(&mut state);
        result
    }

    fn event_loop(&mut self, state: &mut A::State) -> io::Result<()> {
        let mut last_tick = Instant::now();

        while self.running {
            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_default();

            if event::poll(timeout)? {
                match event::read()? {
                    CrosstermEvent::Key(key) => {
                        if is_quit_key(&key) {
                            self.running = false;
                            continue;
                        }

                        if let Some(reading) = self.app.orientation(state) {
                            self.input_simulator.sync(&reading);
                        }
                        for event in self.input_simulator.process_key(key) {
                            if !self.app.handle_event(event, state) {
                                self.running = false;
                                break;
                            }
                        }
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let event = OpticalEvent::Resize {
                            width: width as u32,
                            height: height as u32,
                        };
                        self.running = self.app.handle_event(event, state);
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.app.on_tick(state);

                self.backend.set_camera(self.app.camera(state));
                self.backend
                    .begin_frame()
                    .map_err(|e| io::Error::other(e.to_string()))?;
                self.app.render(state, &mut self.backend);
                self.backend
                    .end_frame()
                    .map_err(|e| io::Error::other(e.to_string()))?;

                if !self.app.handle_event(OpticalEvent::Tick, state) {
                    self.running = false;
                }

                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}
