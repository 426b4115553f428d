#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use tokio_test::block_on;

    use crate::{
        app::{
            controller::{
                execute, format_duration, PanelController, Request, NOT_CONFIGURED_MSG,
                RECOMMENDATIONS_FAILED_MSG, SEARCH_FAILED_MSG,
            },
            state::{AppState, InputMode, Notification, PanelState, Tab},
        },
        config::{normalize_emotion, Config, ConfigError},
        events::{map_key_to_action, UserAction},
        platform::Platform,
        saavn::{MusicService, Playlist, RawRecommendations, RawTrack, ServiceError, Track},
        ui::truncate,
    };

    // ── Fakes ────────────────────────────────────────────────────────────────

    struct FakeService {
        configured: bool,
        fail_recommendations: AtomicBool,
        fail_search: AtomicBool,
        recommendation_calls: AtomicUsize,
        search_calls: AtomicUsize,
        last_emotion: Mutex<Option<String>>,
        raw_tracks: Vec<RawTrack>,
        playlists: Vec<Playlist>,
        results: Vec<Track>,
    }

    impl FakeService {
        fn new(configured: bool) -> Self {
            FakeService {
                configured,
                fail_recommendations: AtomicBool::new(false),
                fail_search: AtomicBool::new(false),
                recommendation_calls: AtomicUsize::new(0),
                search_calls: AtomicUsize::new(0),
                last_emotion: Mutex::new(None),
                raw_tracks: vec![raw("r1", "Happy Song"), raw("r2", "Sunny Day")],
                playlists: vec![Playlist {
                    id: "p1".into(),
                    name: "Happy Vibes".into(),
                    tracks: vec![track("p1t1", None)],
                    external_url: "https://www.jiosaavn.com/featured/happy".into(),
                    ..Default::default()
                }],
                results: vec![track("s1", Some("https://preview/s1")), track("s2", None), track("s3", None)],
            }
        }

        fn recommendation_calls(&self) -> usize {
            self.recommendation_calls.load(Ordering::SeqCst)
        }

        fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MusicService for FakeService {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn get_emotion_based_recommendations(
            &self,
            emotion: &str,
        ) -> Result<RawRecommendations, ServiceError> {
            self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_emotion.lock().unwrap() = Some(emotion.to_string());
            if self.fail_recommendations.load(Ordering::SeqCst) {
                return Err(ServiceError::Status(503));
            }
            Ok(RawRecommendations {
                tracks: self.raw_tracks.clone(),
                playlists: self.playlists.clone(),
            })
        }

        async fn search_tracks_by_query(&self, _query: &str) -> Result<Vec<Track>, ServiceError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_search.load(Ordering::SeqCst) {
                return Err(ServiceError::Api("boom".into()));
            }
            Ok(self.results.clone())
        }

        fn convert_to_track(&self, raw: RawTrack, emotion: &str) -> Track {
            raw.into_track(Some(emotion))
        }
    }

    #[derive(Default)]
    struct FakePlatform {
        previews: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
        stops: AtomicUsize,
    }

    impl Platform for FakePlatform {
        fn play_preview(&self, url: &str) {
            self.previews.lock().unwrap().push(url.to_string());
        }

        fn open_external(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_string());
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn raw(id: &str, name: &str) -> RawTrack {
        RawTrack {
            id: id.into(),
            name: Some(name.into()),
            duration: 200,
            ..Default::default()
        }
    }

    fn track(id: &str, preview: Option<&str>) -> Track {
        Track {
            id: id.into(),
            title: format!("Track {id}"),
            duration: 180,
            preview_url: preview.map(str::to_string),
            external_url: format!("https://www.jiosaavn.com/song/{id}"),
            ..Default::default()
        }
    }

    fn setup(configured: bool) -> (PanelController, Arc<FakeService>, Arc<FakePlatform>) {
        let service = Arc::new(FakeService::new(configured));
        let platform = Arc::new(FakePlatform::default());
        let controller = PanelController::new(service.clone(), platform.clone());
        (controller, service, platform)
    }

    /// Visible panel with an emotion, recommendations already loaded.
    fn loaded(emotion: &str) -> (PanelController, Arc<FakeService>, Arc<FakePlatform>) {
        let (mut c, service, platform) = setup(true);
        c.set_emotion(emotion);
        if let Some(req) = c.set_visible(true) {
            let resp = block_on(execute(service.as_ref(), req));
            c.complete(resp);
        }
        (c, service, platform)
    }

    // ── format_duration ──────────────────────────────────────────────────────

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn test_format_duration_pads_seconds() {
        assert_eq!(format_duration(65), "1:05");
    }

    #[test]
    fn test_format_duration_has_no_hours() {
        assert_eq!(format_duration(3661), "61:01");
    }

    // ── Recommendations ──────────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let (c, _, _) = setup(true);
        let s = c.state();
        assert_eq!(s.active_tab, Tab::Recommendations);
        assert!(!s.is_loading && !s.is_searching);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_not_configured_sets_error_without_fetch() {
        let (mut c, service, _) = setup(false);
        c.set_emotion("happy");
        let request = c.set_visible(true);
        assert!(request.is_none());
        block_on(c.load_recommendations());

        assert_eq!(c.state().error.as_deref(), Some(NOT_CONFIGURED_MSG));
        assert!(!c.state().is_loading);
        assert_eq!(service.recommendation_calls(), 0);
    }

    #[test]
    fn test_load_maps_tracks_with_emotion() {
        let (c, service, _) = loaded("happy");
        let recs = &c.state().recommendations;
        assert_eq!(service.recommendation_calls(), 1);
        assert_eq!(recs.tracks.len(), 2);
        assert_eq!(recs.tracks[0].id, "r1");
        assert!(recs.tracks.iter().all(|t| t.emotion.as_deref() == Some("happy")));
        assert_eq!(recs.playlists.len(), 1);
        assert!(!c.state().is_loading);
    }

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let (mut c, service, _) = loaded("happy");
        service.fail_recommendations.store(true, Ordering::SeqCst);
        block_on(c.load_recommendations());
        assert!(c.state().error.is_some());

        let request = c.begin_recommendations();
        assert_eq!(request, Some(Request::Recommendations { emotion: "happy".into() }));
        assert!(c.state().is_loading);
        assert!(c.state().error.is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_results() {
        let (mut c, service, _) = loaded("happy");
        let before = c.state().recommendations.clone();

        service.fail_recommendations.store(true, Ordering::SeqCst);
        block_on(c.load_recommendations());

        assert_eq!(c.state().recommendations, before);
        assert_eq!(c.state().error.as_deref(), Some(RECOMMENDATIONS_FAILED_MSG));
        assert!(!c.state().is_loading);
    }

    #[test]
    fn test_emotion_change_while_visible_loads_once() {
        let (mut c, service, _) = loaded("happy");
        service.fail_recommendations.store(true, Ordering::SeqCst);
        block_on(c.load_recommendations());
        assert!(c.state().error.is_some());
        service.fail_recommendations.store(false, Ordering::SeqCst);
        let calls_before = service.recommendation_calls();

        let request = c.set_emotion("sad").expect("emotion change should reload");
        assert!(c.state().error.is_none());
        let resp = block_on(execute(service.as_ref(), request));
        c.complete(resp);

        assert_eq!(service.recommendation_calls(), calls_before + 1);
        assert_eq!(service.last_emotion.lock().unwrap().as_deref(), Some("sad"));
        assert!(c.state().recommendations.tracks.iter().all(|t| t.emotion.as_deref() == Some("sad")));
    }

    #[test]
    fn test_same_emotion_does_not_reload() {
        let (mut c, service, _) = loaded("happy");
        assert!(c.set_emotion("happy").is_none());
        assert_eq!(service.recommendation_calls(), 1);
    }

    #[test]
    fn test_emotion_change_while_hidden_does_not_load() {
        let (mut c, service, _) = setup(true);
        assert!(c.set_emotion("calm").is_none());
        assert_eq!(service.recommendation_calls(), 0);

        assert!(c.set_visible(true).is_some());
    }

    #[test]
    fn test_blank_emotion_is_noop() {
        let (mut c, service, _) = setup(true);
        c.set_emotion("   ");
        assert!(c.set_visible(true).is_none());
        assert!(c.state().error.is_none());
        assert_eq!(service.recommendation_calls(), 0);
    }

    #[test]
    fn test_stale_response_overwrites_newer() {
        let (mut c, service, _) = setup(true);
        c.set_emotion("happy");
        let first = c.set_visible(true).unwrap();
        let second = c.set_emotion("sad").unwrap();

        let newer = block_on(execute(service.as_ref(), second));
        let older = block_on(execute(service.as_ref(), first));
        c.complete(newer);
        c.complete(older);

        let tags: Vec<_> = c.state().recommendations.tracks.iter().map(|t| t.emotion.clone()).collect();
        assert!(tags.iter().all(|t| t.as_deref() == Some("happy")));
    }

    // ── Search ───────────────────────────────────────────────────────────────

    #[test]
    fn test_search_switches_tab_and_replaces_results() {
        let (mut c, service, _) = loaded("happy");
        c.select_tab(Tab::Playlists);
        c.set_search_query("arijit");
        block_on(c.search());

        assert_eq!(c.state().active_tab, Tab::Search);
        let ids: Vec<_> = c.state().search_results.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
        assert_eq!(service.search_calls(), 1);
        assert!(!c.state().is_searching);
    }

    #[test]
    fn test_blank_query_never_searches() {
        let (mut c, service, _) = setup(true);
        for q in ["", "   ", "\t\n"] {
            c.set_search_query(q);
            assert!(c.begin_search().is_none());
            block_on(c.search());
        }
        assert_eq!(service.search_calls(), 0);
        assert!(!c.state().is_searching);
        assert_eq!(c.state().active_tab, Tab::Recommendations);
    }

    #[test]
    fn test_failed_search_keeps_results_and_tab() {
        let (mut c, service, _) = loaded("happy");
        c.set_search_query("lofi");
        block_on(c.search());
        c.select_tab(Tab::Recommendations);

        service.fail_search.store(true, Ordering::SeqCst);
        block_on(c.search());

        assert_eq!(c.state().search_results.len(), 3);
        assert_eq!(c.state().error.as_deref(), Some(SEARCH_FAILED_MSG));
        assert_eq!(c.state().active_tab, Tab::Recommendations);
        assert!(!c.state().is_searching);
    }

    #[test]
    fn test_search_query_editing() {
        let (mut c, _, _) = setup(true);
        for ch in "lofi".chars() {
            c.push_query_char(ch);
        }
        c.pop_query_char();
        assert_eq!(c.state().search_query, "lof");
    }

    // ── Tabs ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_tab_switch_keeps_results() {
        let (mut c, _, _) = loaded("happy");
        let before = c.state().recommendations.clone();
        c.select_tab(Tab::Playlists);
        c.select_tab(Tab::Search);
        assert_eq!(c.state().recommendations, before);
        assert_eq!(c.state().active_tab, Tab::Search);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Recommendations.next(), Tab::Playlists);
        assert_eq!(Tab::Search.next(), Tab::Recommendations);
        assert_eq!(Tab::Recommendations.prev(), Tab::Search);
        assert_eq!(Tab::from_number(3), Some(Tab::Search));
        assert_eq!(Tab::from_number(4), None);
    }

    // ── Play / open ──────────────────────────────────────────────────────────

    #[test]
    fn test_play_uses_preview_when_present() {
        let (c, _, platform) = setup(true);
        c.play(&track("a", Some("https://preview/a")));
        assert_eq!(*platform.previews.lock().unwrap(), vec!["https://preview/a".to_string()]);
        assert!(platform.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_play_without_preview_opens_catalog_link() {
        let (c, _, platform) = setup(true);
        c.play(&track("b", None));
        assert!(platform.previews.lock().unwrap().is_empty());
        assert_eq!(
            *platform.opened.lock().unwrap(),
            vec!["https://www.jiosaavn.com/song/b".to_string()]
        );
    }

    #[test]
    fn test_play_with_blank_preview_opens_catalog_link() {
        let (c, _, platform) = setup(true);
        let t = track("c", Some(""));
        assert!(!t.has_preview());
        c.play(&t);
        assert!(platform.previews.lock().unwrap().is_empty());
        assert_eq!(platform.opened.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_close_hides_panel_and_stops_preview() {
        let (mut c, _, platform) = loaded("happy");
        c.play(&track("a", Some("https://preview/a")));
        c.close();
        assert!(!c.state().is_visible);
        assert_eq!(platform.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_open_externally() {
        let (c, _, platform) = setup(true);
        c.open_externally("https://www.jiosaavn.com/featured/x");
        assert_eq!(platform.opened.lock().unwrap().len(), 1);
    }

    // ── View state ───────────────────────────────────────────────────────────

    #[test]
    fn test_selection_bounds() {
        let mut state = AppState::default();
        state.move_selection(Tab::Search, 2, false);
        assert_eq!(state.selected(Tab::Search), 0);
        state.move_selection(Tab::Search, 2, true);
        state.move_selection(Tab::Search, 2, true);
        assert_eq!(state.selected(Tab::Search), 1);
        state.clamp_selection(Tab::Search, 0);
        assert_eq!(state.selected(Tab::Search), 0);
        assert_eq!(state.selected(Tab::Playlists), 0);
    }

    #[test]
    fn test_notification_tick_decrements() {
        let mut state = AppState::default();
        state.set_notification(Notification::info("hello"));
        // remaining_ticks=30: takes 30 ticks to reach 0, then 1 more tick to clear
        for _ in 0..31 {
            state.tick_notification();
        }
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_notification_error_flag() {
        let n = Notification::error("oops");
        assert!(n.is_error);
        assert_eq!(n.message, "oops");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    // ── Key mapping ──────────────────────────────────────────────────────────

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_in_normal_mode() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('q')), InputMode::Normal), Some(UserAction::Close));
        assert_eq!(map_key_to_action(key(KeyCode::Char('2')), InputMode::Normal), Some(UserAction::SwitchTab(2)));
        assert_eq!(map_key_to_action(key(KeyCode::Char('/')), InputMode::Normal), Some(UserAction::OpenSearch));
        assert_eq!(map_key_to_action(key(KeyCode::Char('r')), InputMode::Normal), Some(UserAction::Refresh));
    }

    #[test]
    fn test_keys_in_input_mode_are_text() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('q')), InputMode::Search), Some(UserAction::Input('q')));
        assert_eq!(map_key_to_action(key(KeyCode::Enter), InputMode::Emotion), Some(UserAction::Submit));
        assert_eq!(map_key_to_action(key(KeyCode::Esc), InputMode::Search), Some(UserAction::Cancel));
    }

    #[test]
    fn test_ctrl_c_always_closes() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_to_action(ev, InputMode::Search), Some(UserAction::Close));
    }

    // ── Config ───────────────────────────────────────────────────────────────

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, "https://saavn.dev");
        assert_eq!(config.result_limit, 20);
        assert!(config.emotion.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MOODTUNES_API_URL", "http://localhost:3000/"),
            ("MOODTUNES_EMOTION", " calm "),
            ("MOODTUNES_RESULT_LIMIT", "50"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.emotion.as_deref(), Some("calm"));
        assert_eq!(config.result_limit, 50);
    }

    #[test]
    fn test_blank_emotion_label_is_dropped() {
        assert_eq!(normalize_emotion("".into()), None);
        assert_eq!(normalize_emotion("   ".into()), None);
        assert_eq!(normalize_emotion(" happy ".into()).as_deref(), Some("happy"));
    }

    #[test]
    fn test_config_rejects_bad_numbers() {
        let err = Config::from_lookup(lookup_from(&[("MOODTUNES_RESULT_LIMIT", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { .. }));
        let err = Config::from_lookup(lookup_from(&[("MOODTUNES_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    fn draw(app: &AppState, panel: &PanelState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| crate::ui::render(f, app, panel)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_error_and_empty_state() {
        let panel = PanelState {
            emotion: "happy".into(),
            error: Some(RECOMMENDATIONS_FAILED_MSG.into()),
            ..Default::default()
        };
        let screen = draw(&AppState::default(), &panel);
        assert!(screen.contains("Unable to load JioSaavn"));
        assert!(screen.contains("Powered by JioSaavn"));
    }

    #[test]
    fn test_render_lists_recommended_tracks() {
        let (c, _, _) = loaded("happy");
        let screen = draw(&AppState::default(), c.state());
        assert!(screen.contains("Happy Song"));
        assert!(screen.contains("3:20"));
    }

    #[test]
    fn test_render_loading() {
        let panel = PanelState {
            emotion: "sad".into(),
            is_loading: true,
            ..Default::default()
        };
        let screen = draw(&AppState::default(), &panel);
        assert!(screen.contains("Loading music recommendations"));
    }

    #[test]
    fn test_render_loading_on_search_tab() {
        let panel = PanelState {
            emotion: "sad".into(),
            is_loading: true,
            active_tab: Tab::Search,
            ..Default::default()
        };
        let screen = draw(&AppState::default(), &panel);
        assert!(screen.contains("Loading music recommendations"));
        assert!(screen.contains("Search songs"));
    }

    fn many_tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                id: format!("t{i}"),
                title: format!("Song{i:02}x"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_track_table_scrolls_to_cursor() {
        let tracks = many_tracks(20);
        let mut panel = PanelState {
            emotion: "happy".into(),
            ..Default::default()
        };
        panel.recommendations.tracks = tracks;
        let mut app = AppState::default();
        for _ in 0..19 {
            app.move_selection(Tab::Recommendations, 20, true);
        }
        assert_eq!(app.selected(Tab::Recommendations), 19);

        let screen = draw(&app, &panel);
        assert!(screen.contains("Song19x"));
        assert!(!screen.contains("Song00x"));
    }

    #[test]
    fn test_playlist_list_scrolls_to_cursor() {
        let mut panel = PanelState {
            emotion: "calm".into(),
            active_tab: Tab::Playlists,
            ..Default::default()
        };
        panel.recommendations.playlists = (0..15)
            .map(|i| Playlist {
                id: format!("p{i}"),
                name: format!("Mix{i:02}"),
                ..Default::default()
            })
            .collect();
        let mut app = AppState::default();
        app.selected[Tab::Playlists.index()] = 14;

        let screen = draw(&app, &panel);
        assert!(screen.contains("▶ Mix14"));
        assert!(!screen.contains("Mix00"));
    }
}
