pub mod controller;
pub mod state;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::time::Duration;
use tokio::{sync::mpsc, time};
use tracing::{debug, info};

use crate::{
    app::{
        controller::{execute, PanelController, Request, Response},
        state::{AppState, InputMode, Notification, Tab},
    },
    events::{map_key_to_action, UserAction},
};

const TICK_MS: u64 = 80;

pub struct App {
    pub state: AppState,
    controller: PanelController,
    responses_tx: mpsc::UnboundedSender<Response>,
    responses_rx: Option<mpsc::UnboundedReceiver<Response>>,
}

impl App {
    pub fn new(controller: PanelController) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        App {
            state: AppState::default(),
            controller,
            responses_tx: tx,
            responses_rx: Some(rx),
        }
    }

    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
        emotion: Option<String>,
    ) -> Result<()> {
        let Some(mut responses) = self.responses_rx.take() else {
            anyhow::bail!("app is already running");
        };

        // ── Open the panel ───────────────────────────────────────────────────
        match emotion {
            Some(emotion) => {
                self.controller.set_emotion(emotion);
            }
            None => {
                self.state.input_mode = InputMode::Emotion;
                self.state
                    .set_notification(Notification::info("How are you feeling? Type an emotion"));
            }
        }
        let request = self.controller.set_visible(true);
        self.dispatch(request);
        info!("Panel opened");

        // ── Main event loop ───────────────────────────────────────────────────
        let mut tick_interval = time::interval(Duration::from_millis(TICK_MS));
        let mut event_stream = EventStream::new();

        loop {
            terminal.draw(|f| crate::ui::render(f, &self.state, self.controller.state()))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.state.tick = self.state.tick.wrapping_add(1);
                    self.state.tick_notification();
                }
                Some(response) = responses.recv() => {
                    self.on_response(response);
                }
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if let Some(action) = map_key_to_action(key, self.state.input_mode) {
                                self.handle_action(action);
                            }
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => self.state.should_quit = true,
                        _ => {}
                    }
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        self.controller.close();
        info!("Panel closed");
        Ok(())
    }

    /// Runs the request on a background task; the response comes back
    /// through the channel polled by the event loop.
    fn dispatch(&self, request: Option<Request>) {
        let Some(request) = request else { return };
        debug!("Dispatching {request:?}");

        let service = self.controller.service();
        let tx = self.responses_tx.clone();
        tokio::spawn(async move {
            let response = execute(service.as_ref(), request).await;
            // receiver is gone once the panel closed
            let _ = tx.send(response);
        });
    }

    fn on_response(&mut self, response: Response) {
        let notice = match &response {
            Response::Recommendations(Ok(recs)) => Some(format!(
                "{} tracks for your {} mood",
                recs.tracks.len(),
                self.controller.state().emotion
            )),
            Response::Search(Ok(tracks)) => Some(format!("Found {} tracks", tracks.len())),
            _ => None,
        };

        self.controller.complete(response);

        let panel = self.controller.state();
        let (tracks, playlists, results) = (
            panel.recommendations.tracks.len(),
            panel.recommendations.playlists.len(),
            panel.search_results.len(),
        );
        self.state.clamp_selection(Tab::Recommendations, tracks);
        self.state.clamp_selection(Tab::Playlists, playlists);
        self.state.clamp_selection(Tab::Search, results);

        if let Some(msg) = notice {
            self.state.set_notification(Notification::info(msg));
        }
    }

    // ── Action handler ────────────────────────────────────────────────────────
    fn handle_action(&mut self, action: UserAction) {
        match action {
            UserAction::Close => {
                self.state.should_quit = true;
            }
            UserAction::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
            }
            UserAction::NavigateUp => self.move_selection(false),
            UserAction::NavigateDown => self.move_selection(true),
            UserAction::NextTab => {
                let tab = self.controller.state().active_tab.next();
                self.switch_tab(tab);
            }
            UserAction::PrevTab => {
                let tab = self.controller.state().active_tab.prev();
                self.switch_tab(tab);
            }
            UserAction::SwitchTab(n) => {
                if let Some(tab) = Tab::from_number(n) {
                    self.switch_tab(tab);
                }
            }
            UserAction::Select => self.handle_select(),
            UserAction::OpenExternal => self.handle_open_external(),
            UserAction::Refresh => {
                let request = self.controller.begin_recommendations();
                self.dispatch(request);
            }
            UserAction::OpenSearch => {
                self.switch_tab(Tab::Search);
                self.state.input_mode = InputMode::Search;
            }
            UserAction::EditEmotion => {
                self.state.emotion_draft = self.controller.state().emotion.clone();
                self.state.input_mode = InputMode::Emotion;
            }
            UserAction::Input(c) => match self.state.input_mode {
                InputMode::Search => self.controller.push_query_char(c),
                InputMode::Emotion => self.state.emotion_draft.push(c),
                InputMode::Normal => {}
            },
            UserAction::Backspace => match self.state.input_mode {
                InputMode::Search => self.controller.pop_query_char(),
                InputMode::Emotion => {
                    self.state.emotion_draft.pop();
                }
                InputMode::Normal => {}
            },
            UserAction::Submit => {
                let mode = std::mem::take(&mut self.state.input_mode);
                let request = match mode {
                    InputMode::Search => self.controller.begin_search(),
                    InputMode::Emotion => {
                        let draft = std::mem::take(&mut self.state.emotion_draft);
                        let emotion = draft.trim();
                        if emotion.is_empty() {
                            None
                        } else {
                            self.controller.set_emotion(emotion)
                        }
                    }
                    InputMode::Normal => None,
                };
                self.dispatch(request);
            }
            UserAction::Cancel => {
                self.state.input_mode = InputMode::Normal;
                self.state.emotion_draft.clear();
            }
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.state.show_help = false;
        self.controller.select_tab(tab);
    }

    fn move_selection(&mut self, down: bool) {
        let panel = self.controller.state();
        let tab = panel.active_tab;
        let len = match tab {
            Tab::Recommendations => panel.recommendations.tracks.len(),
            Tab::Playlists => panel.recommendations.playlists.len(),
            Tab::Search => panel.search_results.len(),
        };
        self.state.move_selection(tab, len, down);
    }

    // ── Select / open handlers ────────────────────────────────────────────────
    fn handle_select(&mut self) {
        let panel = self.controller.state();
        let tab = panel.active_tab;
        let idx = self.state.selected(tab);

        let notice = match tab {
            Tab::Recommendations | Tab::Search => {
                let list = if tab == Tab::Search {
                    &panel.search_results
                } else {
                    &panel.recommendations.tracks
                };
                list.get(idx).map(|track| {
                    self.controller.play(track);
                    if track.has_preview() {
                        format!("▶ Preview: {}", track.title)
                    } else {
                        format!("Opening {} in JioSaavn", track.title)
                    }
                })
            }
            Tab::Playlists => panel.recommendations.playlists.get(idx).map(|playlist| {
                self.controller.open_externally(&playlist.external_url);
                format!("Opening {} in JioSaavn", playlist.name)
            }),
        };

        if let Some(msg) = notice {
            self.state.set_notification(Notification::info(msg));
        }
    }

    fn handle_open_external(&mut self) {
        let panel = self.controller.state();
        let idx = self.state.selected(panel.active_tab);
        let url = match panel.active_tab {
            Tab::Recommendations => panel
                .recommendations
                .tracks
                .get(idx)
                .map(|t| t.external_url.clone()),
            Tab::Playlists => panel
                .recommendations
                .playlists
                .get(idx)
                .map(|p| p.external_url.clone()),
            Tab::Search => panel.search_results.get(idx).map(|t| t.external_url.clone()),
        };

        match url {
            Some(url) if !url.is_empty() => {
                self.controller.open_externally(&url);
                self.state.set_notification(Notification::info("Opened in JioSaavn ↗"));
            }
            Some(_) => self
                .state
                .set_notification(Notification::error("No JioSaavn link for this item")),
            None => {}
        }
    }
}
