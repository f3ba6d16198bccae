use color_eyre::Result;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};
use std::path::PathBuf;

use crate::clock::sampler::LocalClock;
use crate::clock::scheduler::MonotonicClock;
use crate::clock::settings::{GeneralProperties, PropertyPush, PropertyValue, UserProperties};
use crate::clock::{ClockEngine, FrameOutcome};
use crate::config::ClockConfig;
use crate::event::{AppEvent, Event, EventHandler, EventOptions};
use crate::util::io::properties::{PropertiesFile, PropertyWatcher};
use crate::widgets::clock_face::BlockGrid;
use crate::{log_info, log_warn};

/// FPS cap step for the `+` and `-` keys.
pub const FPS_STEP: f64 = 5.0;

/// Application.
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Clock core drawing onto the block grid.
    pub engine: ClockEngine<BlockGrid, LocalClock>,
    /// Monotonic time source handed to frame callbacks.
    pub monotonic: MonotonicClock,
    /// Properties file re-read on demand.
    pub properties_path: Option<PathBuf>,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`] reading terminal input.
    pub fn new(config: ClockConfig) -> Result<Self> {
        let options = EventOptions::from_config(&config);
        Self::with_options(config, options)
    }

    /// Build the app and run the onload sequence: theme, initial
    /// properties, then arm the frame loop.
    pub fn with_options(config: ClockConfig, options: EventOptions) -> Result<Self> {
        config.validate()?;

        let monotonic = MonotonicClock::new();
        let mut engine = ClockEngine::new(
            config.settings.clone(),
            BlockGrid::new(),
            LocalClock,
            monotonic.now_secs(),
        );
        engine.apply_theme();

        // the watcher remembers this read, so the event task only pushes later edits
        let mut watcher = config.properties_path.clone().map(PropertyWatcher::new);
        if let Some(pushes) = watcher.as_mut().and_then(PropertyWatcher::poll) {
            for push in &pushes {
                push.deliver(&mut engine);
            }
        }

        engine.start();
        log_info!("Clock started at {} Hz refresh", config.refresh_rate);

        Ok(Self {
            running: true,
            engine,
            monotonic,
            properties_path: config.properties_path.clone(),
            events: EventHandler::new(options, watcher),
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Refresh => needs_redraw = self.deliver_frame(),
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_events(key_event)?;
                    }
                    crossterm::event::Event::Resize(_, _) => needs_redraw = true,
                    _ => {}
                },
                Event::Properties(pushes) => {
                    self.apply_pushes(&pushes);
                    needs_redraw = true;
                }
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Deliver one frame if the loop asked for it. Returns true when the
    /// surface changed and the terminal should repaint.
    pub fn deliver_frame(&mut self) -> bool {
        if !self.engine.wants_frame() {
            return false;
        }
        let before = self.engine.surface().writes();
        match self.engine.on_frame(self.monotonic.now_secs()) {
            FrameOutcome::Paused => true,
            _ => self.engine.surface().writes() != before,
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => self.events.send(AppEvent::TogglePause),
            KeyCode::Char('t') => self.events.send(AppEvent::ToggleTheme),
            KeyCode::Char('+') | KeyCode::Char('=') => self.events.send(AppEvent::AdjustFps(FPS_STEP)),
            KeyCode::Char('-') => self.events.send(AppEvent::AdjustFps(-FPS_STEP)),
            KeyCode::Char('r') => self.events.send(AppEvent::ReloadProperties),
            _ => {}
        }
        Ok(())
    }

    /// Translate an app event into property pushes.
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        let settings = self.engine.settings().clone();
        let push = match app_event {
            AppEvent::Quit => return self.quit(),
            AppEvent::ReloadProperties => return self.reload_properties(),
            AppEvent::TogglePause => PropertyPush::Pause(!settings.is_paused),
            AppEvent::ToggleTheme => PropertyPush::User(UserProperties {
                islighttheme: Some(PropertyValue::new(!settings.is_light_theme)),
                schemecolor: None,
            }),
            AppEvent::AdjustFps(step) => PropertyPush::General(GeneralProperties {
                fps: Some((settings.fps_cap + step).max(0.0)),
            }),
        };
        push.deliver(&mut self.engine);
    }

    pub fn apply_pushes(&mut self, pushes: &[PropertyPush]) {
        for push in pushes {
            push.deliver(&mut self.engine);
        }
    }

    /// Re-read the properties file, if one is configured and present.
    pub fn reload_properties(&mut self) {
        let Some(path) = self.properties_path.clone() else {
            return;
        };
        if !path.exists() {
            return;
        }
        match PropertiesFile::read(&path) {
            Ok(file) => self.apply_pushes(&file.into_pushes()),
            Err(e) => log_warn!("Failed to read properties {}: {}", path.display(), e),
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
