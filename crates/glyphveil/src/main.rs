use std::{
    io,
    time::{Duration, Instant},
};

use chrono::{Datelike, Local};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use glyphveil_background::{Backdrop, BackdropSettings, Canvas, Dissolve, Rgba, glyph_set};
use glyphveil_config::Config;
use glyphveil_core::{Size, Tab};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{DefaultTerminal, Frame, layout::Position};

use crate::content::Content;
use crate::state::{Action, ViewState, update};
use crate::view::{HitAreas, Scene};

mod content;
mod logging;
mod state;
mod view;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    if let Some(path) = logging::init(config.log_file.as_deref())? {
        tracing::info!(path = %path.display(), "logging started");
    }

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(%err, "failed to release mouse capture");
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Page state handed to the views.
    view: ViewState,
    /// Page copy for the configured brand.
    content: Content,
    /// Animated background component.
    backdrop: Backdrop,
    /// Surface the background paints on.
    canvas: Canvas,
    /// Tile dissolve over the hero card.
    dissolve: Dissolve,
    /// Regions from the last render, for pointer hit-testing.
    hit: HitAreas,
    /// Whether the pointer was over the hero card at the last mouse event.
    pointer_in_card: bool,
    /// Logical units per terminal cell.
    cell_size: u32,
    /// Target time between background frames.
    frame_interval: Duration,
    /// Application start, the zero point for animation time.
    started: Instant,
    /// When the background last ran a frame.
    last_frame: Instant,
    /// Randomness for the dissolve grid.
    rng: StdRng,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let settings = BackdropSettings {
            cell_size: config.cell_size,
            glyphs: glyph_set(&config.glyphs),
            fade_alpha: config.fade_alpha,
            glyph_change_chance: config.glyph_change_chance,
            speed: config.speed,
            theme: config.theme,
            seed: None,
        };
        let now = Instant::now();
        Self {
            running: false,
            view: ViewState::new(config.theme, config.speed),
            content: Content::for_brand(config.brand),
            backdrop: Backdrop::new(settings),
            canvas: Canvas::new(config.cell_size, Rgba::opaque(config.theme.background_rgb())),
            dissolve: Dissolve::new(),
            hit: HitAreas::default(),
            pointer_in_card: false,
            cell_size: config.cell_size,
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            started: now,
            last_frame: now,
            rng: StdRng::from_entropy(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        let size = terminal.size()?;
        let viewport = Size::from_cells(size.width, size.height, self.cell_size);
        if !self.backdrop.mount(Some(&mut self.canvas), viewport) {
            tracing::warn!("background animation unavailable");
        }

        while self.running {
            if self.last_frame.elapsed() >= self.frame_interval {
                self.backdrop.frame(&mut self.canvas);
                self.last_frame = Instant::now();
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }

        self.backdrop.unmount();
        Ok(())
    }

    /// Milliseconds since start.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let scene = Scene {
            state: &self.view,
            content: &self.content,
            canvas: &self.canvas,
            dissolve: &self.dissolve,
            now_ms: self.now_ms(),
            year: Local::now().year(),
        };
        self.hit = view::render(frame, &scene);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next background frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .frame_interval
            .saturating_sub(self.last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C'))
            | (_, KeyCode::Char('q')) => self.quit(),
            (_, KeyCode::Esc) if self.view.modal.is_some() => self.dispatch(Action::CloseModal),
            (_, KeyCode::Esc) => self.quit(),
            (_, KeyCode::Char(c @ '1'..='3')) => {
                if let Some(tab) = c.to_digit(10).and_then(Tab::from_number) {
                    self.dispatch(Action::SelectTab(tab));
                }
            }
            (_, KeyCode::Tab | KeyCode::BackTab) => self.dispatch(Action::NextSection),
            (_, KeyCode::Left) => self.dispatch(Action::MoveGallery(-1, 0)),
            (_, KeyCode::Right) => self.dispatch(Action::MoveGallery(1, 0)),
            (_, KeyCode::Up) => self.dispatch(Action::MoveGallery(0, -1)),
            (_, KeyCode::Down) => self.dispatch(Action::MoveGallery(0, 1)),
            (_, KeyCode::Enter) => self.dispatch(Action::OpenModal),
            (_, KeyCode::Char('d')) => self.dispatch(Action::ToggleTheme),
            (_, KeyCode::Char('s')) => self.dispatch(Action::CycleSpeed),
            _ => {}
        }
    }

    /// Plays the dissolve when the pointer leaves the hero card.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);
        let inside = self.hit.card.is_some_and(|card| card.contains(pos));
        if self.pointer_in_card && !inside {
            let now = self.now_ms();
            self.dissolve.trigger(now, &mut self.rng);
        }
        self.pointer_in_card = inside;
    }

    /// Forwards the new viewport to the background.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        let viewport = Size::from_cells(cols, rows, self.cell_size);
        self.backdrop.handle_resize(&mut self.canvas, viewport);
    }

    /// Applies an action and syncs the background with the new state.
    fn dispatch(&mut self, action: Action) {
        let previous = self.view;
        self.view = update(previous, action);

        if self.view.theme != previous.theme {
            self.backdrop.set_theme(self.view.theme);
            self.canvas
                .set_base(Rgba::opaque(self.view.theme.background_rgb()));
        }
        if self.view.speed != previous.speed {
            tracing::debug!(speed = self.view.speed.name(), "animation speed changed");
            self.backdrop.set_speed(self.view.speed);
        }
        if self.view.section != previous.section {
            self.pointer_in_card = false;
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
