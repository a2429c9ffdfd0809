mod logging;

use std::io::stdout;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use mechwatch_config::Config;
use mechwatch_core::{ColorTheme, TimeFormat};
use mechwatch_movement::{
    AnimatorState, CancelHandle, CanvasSurface, FrameLoop, LocalTime, Mode, TiltTracker,
    build_train, register_dial,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};
use tracing::info;

/// Width of the crown strip that drives the tilt.
const CROWN_WIDTH: u16 = 5;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config.log_level)?;
    let app = App::new(config)?;

    let terminal = ratatui::init();
    let result = run(app, terminal);
    ratatui::restore();
    result
}

fn run(app: App, terminal: DefaultTerminal) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    execute!(stdout(), DisableMouseCapture)?;
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Loaded configuration.
    config: Config,
    /// Current color theme.
    color_theme: ColorTheme,
    /// Current readout time format (12h or 24h).
    time_format: TimeFormat,
    /// Retained scene the movement draws onto.
    surface: CanvasSurface,
    /// Gear train and pause state.
    animator: AnimatorState,
    /// Per-frame driver.
    frame_loop: FrameLoop<LocalTime>,
    /// Stops the frame loop on quit.
    cancel: CancelHandle,
    /// Crown drag tracking.
    tilt: TiltTracker,
}

impl App {
    /// Build the watch face. Fails when the train or the hands are misconfigured.
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let mut surface = CanvasSurface::new();
        register_dial(&mut surface);
        let train = build_train(&mut surface)?;
        let mut animator = AnimatorState::new(train, &surface)?;
        if config.start_paused {
            animator.set_mode(Mode::Paused);
        }

        let frame_loop = FrameLoop::new(LocalTime);
        let cancel = frame_loop.cancel_handle();

        Ok(Self {
            color_theme: config.color_theme,
            time_format: config.time_format,
            config,
            surface,
            animator,
            frame_loop,
            cancel,
            tilt: TiltTracker::new(),
        })
    }

    /// Run the application's main loop until the frame loop is cancelled.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let interval = Duration::from_millis(self.config.frame_interval_ms());
        info!(interval_ms = self.config.frame_interval_ms(), "Starting watch face");

        while self
            .frame_loop
            .step(&mut self.animator, &mut self.surface)
            .is_continue()
        {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(interval)?;
        }
        info!(frames = self.frame_loop.frames(), "Stopped watch face");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let color = self.color_theme.color();
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Watch face
            Constraint::Length(1), // Readout
            Constraint::Length(1), // Help text
        ])
        .split(area);
        let face = Layout::horizontal([Constraint::Fill(1), Constraint::Length(CROWN_WIDTH)])
            .split(chunks[0]);

        self.surface
            .render(frame, face[0], self.color_theme, self.tilt.tilt());

        // Crown strip; vertical drags here tilt the face
        self.tilt.set_region(face[1]);
        let crown_style = if self.tilt.is_dragging() {
            Style::new().fg(color)
        } else {
            Style::new().dark_gray()
        };
        let ridges: Vec<Line> = (0..face[1].height.saturating_sub(2))
            .map(|_| Line::from("≡"))
            .collect();
        let crown = Paragraph::new(ridges)
            .alignment(Alignment::Center)
            .style(crown_style)
            .block(Block::bordered().style(crown_style));
        frame.render_widget(crown, face[1]);

        if self.config.show_readout {
            let tilt = self.tilt.tilt();
            let readout = format!(
                "{}   {}   tilt {:+.1}° {:+.1}°",
                Local::now().format(self.time_format.pattern()),
                self.animator.mode().label(),
                tilt.rotate_x,
                tilt.rotate_y,
            );
            let readout = Paragraph::new(readout)
                .style(Style::new().fg(color))
                .alignment(Alignment::Center);
            frame.render_widget(readout, chunks[1]);
        }

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            " pause  ".dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "t".bold().fg(color),
            " 12/24h  ".dark_gray(),
            "r".bold().fg(color),
            " rebuild  ".dark_gray(),
            "0".bold().fg(color),
            " level".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[2]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the gears keep moving.
    fn handle_crossterm_events(&mut self, interval: Duration) -> color_eyre::Result<()> {
        if event::poll(interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ') | KeyCode::Char('p')) => {
                self.animator.toggle();
            }
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('t')) => self.toggle_time_format(),
            (_, KeyCode::Char('r')) => self.animator.rebuild(&mut self.surface)?,
            (_, KeyCode::Char('0')) => self.tilt.reset(),
            _ => {}
        }
        Ok(())
    }

    /// Feeds left-button drags to the tilt tracker.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.tilt.press(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.tilt.drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.tilt.release(),
            _ => {}
        }
    }

    /// Toggle between 12-hour and 24-hour readout.
    fn toggle_time_format(&mut self) {
        self.time_format = self.time_format.toggle();
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Stop the frame loop; the main loop exits before the next frame.
    fn quit(&mut self) {
        self.cancel.cancel();
    }
}
