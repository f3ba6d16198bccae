use color_eyre::eyre::OptionExt;
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::clock::settings::PropertyPush;
use crate::config::ClockConfig;
use crate::util::io::properties::PropertyWatcher;

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// Display refresh; the host's chance to deliver a frame.
    Refresh,
    /// Crossterm events.
    Crossterm(CrosstermEvent),
    /// The watched properties file changed.
    Properties(Vec<PropertyPush>),
    /// Application events.
    App(AppEvent),
}

/// Application events.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Quit,
    TogglePause,
    ToggleTheme,
    /// Change the FPS cap by this many frames per second.
    AdjustFps(f64),
    ReloadProperties,
}

/// What the event task listens to.
#[derive(Debug, Clone)]
pub struct EventOptions {
    pub refresh_interval: Duration,
    pub poll_interval: Duration,
    /// Read keyboard/resize events from the terminal.
    pub terminal_input: bool,
}

impl EventOptions {
    pub fn from_config(config: &ClockConfig) -> Self {
        Self {
            refresh_interval: config.refresh_interval(),
            poll_interval: config.poll_interval(),
            terminal_input: true,
        }
    }
}

/// Terminal event handler.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns a task to produce events.
    ///
    /// `watcher` keeps whatever file state it already saw, so a file the
    /// caller applied at startup is not pushed again.
    pub fn new(options: EventOptions, watcher: Option<PropertyWatcher>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone(), options, watcher);
        tokio::spawn(async { actor.run().await });
        Self { sender, receiver }
    }

    /// Receives an event from the sender.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    /// Queue an app event to be sent to the event receiver.
    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }
}

/// A task that emits refresh events, terminal input and property pushes.
struct EventTask {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    options: EventOptions,
    watcher: Option<PropertyWatcher>,
}

impl EventTask {
    /// Constructs a new instance of [`EventTask`].
    fn new(
        sender: mpsc::UnboundedSender<Event>,
        options: EventOptions,
        watcher: Option<PropertyWatcher>,
    ) -> Self {
        Self { sender, options, watcher }
    }

    /// Runs the event loop until the receiving side goes away.
    async fn run(mut self) -> color_eyre::Result<()> {
        let mut reader = self
            .options
            .terminal_input
            .then(crossterm::event::EventStream::new);
        let mut watcher = self.watcher.take();

        let mut refresh = tokio::time::interval(self.options.refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll = tokio::time::interval(self.options.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let refresh_delay = refresh.tick();
            let crossterm_event = next_terminal_event(&mut reader).fuse();
            tokio::select! {
              _ = self.sender.closed() => {
                break;
              }
              _ = refresh_delay => {
                self.send(Event::Refresh);
              }
              _ = poll.tick(), if watcher.is_some() => {
                if let Some(pushes) = watcher.as_mut().and_then(PropertyWatcher::poll) {
                    self.send(Event::Properties(pushes));
                }
              }
              Some(Ok(evt)) = crossterm_event => {
                self.send(Event::Crossterm(evt));
              }
            };
        }
        Ok(())
    }

    /// Sends an event to the receiver.
    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}

async fn next_terminal_event(
    reader: &mut Option<crossterm::event::EventStream>,
) -> Option<std::io::Result<CrosstermEvent>> {
    match reader {
        Some(reader) => reader.next().await,
        None => futures::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::settings::GeneralProperties;

    fn options() -> EventOptions {
        EventOptions {
            refresh_interval: Duration::from_millis(5),
            poll_interval: Duration::from_millis(5),
            terminal_input: false,
        }
    }

    async fn next_matching(
        events: &mut EventHandler,
        mut pred: impl FnMut(&Event) -> bool,
    ) -> Event {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let event = events.next().await.unwrap();
                if pred(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("timed out waiting for event")
    }

    #[tokio::test]
    async fn test_refresh_events_are_emitted() {
        let mut events = EventHandler::new(options(), None);
        next_matching(&mut events, |e| matches!(e, Event::Refresh)).await;
        next_matching(&mut events, |e| matches!(e, Event::Refresh)).await;
    }

    #[tokio::test]
    async fn test_app_events_pass_through() {
        let mut events = EventHandler::new(options(), None);
        events.send(AppEvent::ToggleTheme);
        let event = next_matching(&mut events, |e| matches!(e, Event::App(_))).await;
        assert!(matches!(event, Event::App(AppEvent::ToggleTheme)));
    }

    #[tokio::test]
    async fn test_properties_file_is_pushed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        std::fs::write(&path, r#"{"general": {"fps": 12}}"#).unwrap();

        let mut events = EventHandler::new(options(), Some(PropertyWatcher::new(path)));
        let event = next_matching(&mut events, |e| matches!(e, Event::Properties(_))).await;
        match event {
            Event::Properties(pushes) => assert_eq!(
                pushes,
                vec![PropertyPush::General(GeneralProperties { fps: Some(12.0) })]
            ),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_already_seen_file_is_not_pushed_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        std::fs::write(&path, r#"{"general": {"fps": 12}}"#).unwrap();

        let mut watcher = PropertyWatcher::new(&path);
        assert!(watcher.poll().is_some());

        let mut events = EventHandler::new(options(), Some(watcher));
        let mut refreshes = 0;
        while refreshes < 20 {
            match next_matching(&mut events, |_| true).await {
                Event::Refresh => refreshes += 1,
                Event::Properties(pushes) => panic!("file pushed twice: {:?}", pushes),
                _ => {}
            }
        }
    }
}
