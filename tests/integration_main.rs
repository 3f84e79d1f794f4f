use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use mpd_mirror::app::config::Timings;
use mpd_mirror::app::dispatcher::Dispatcher;
use mpd_mirror::app::events::{apply_event, AppEvent};
use mpd_mirror::app::keys::KeyConfig;
use mpd_mirror::app::poller::PollSnapshot;
use mpd_mirror::app::state::feedback::Control;
use mpd_mirror::app::state::seek::SeekPhase;
use mpd_mirror::app::{App, Panel};
use mpd_mirror::error::ServiceError;
use mpd_mirror::player::wire::{WireAlbum, WireArtist, WireSong};
use mpd_mirror::player::{
    CatalogSnapshot, CurrentSong, ModeFlags, PlaybackMode, PlaybackService, Position, QueueEntry,
    ServiceResult, TransportState,
};
use mpd_mirror::ui::theme::Theme;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Records every facade call and answers from canned state.
#[derive(Default)]
struct RecordingService {
    calls: Mutex<Vec<String>>,
    queue: Mutex<Vec<QueueEntry>>,
    queue_version: Mutex<u32>,
    cached: Mutex<Option<CatalogSnapshot>>,
    rebuilt: Mutex<Option<CatalogSnapshot>>,
    fail_seek: bool,
}

impl RecordingService {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Queue edit from some other client.
    fn edit_queue(&self, entries: Vec<QueueEntry>) {
        *self.queue.lock().unwrap() = entries;
        *self.queue_version.lock().unwrap() += 1;
    }
}

impl PlaybackService for RecordingService {
    fn current_song(&self) -> ServiceResult<Option<CurrentSong>> {
        self.record("current_song");
        Ok(None)
    }

    fn album_art(&self) -> ServiceResult<Option<PathBuf>> {
        self.record("album_art");
        Ok(None)
    }

    fn status(&self) -> ServiceResult<ModeFlags> {
        self.record("status");
        Ok(ModeFlags::default())
    }

    fn playback_state(&self) -> ServiceResult<TransportState> {
        self.record("playback_state");
        Ok(TransportState::Paused)
    }

    fn position(&self) -> ServiceResult<Position> {
        self.record("position");
        Ok(Position::default())
    }

    fn queue_version(&self) -> ServiceResult<u32> {
        self.record("queue_version");
        Ok(*self.queue_version.lock().unwrap())
    }

    fn snapshot(&self) -> ServiceResult<PollSnapshot> {
        self.record("snapshot");
        Ok(PollSnapshot {
            queue_version: *self.queue_version.lock().unwrap(),
            ..Default::default()
        })
    }

    fn set_position(&self, fraction: f64) -> ServiceResult<()> {
        self.record(format!("set_position({:.2})", fraction));
        if self.fail_seek {
            Err(ServiceError::NoSongLoaded)
        } else {
            Ok(())
        }
    }

    fn toggle_playback(&self) -> ServiceResult<TransportState> {
        self.record("toggle_playback");
        Ok(TransportState::Playing)
    }

    fn next(&self) -> ServiceResult<()> {
        self.record("next");
        Ok(())
    }

    fn previous(&self) -> ServiceResult<()> {
        self.record("previous");
        Ok(())
    }

    fn toggle_mode(&self, mode: PlaybackMode) -> ServiceResult<()> {
        self.record(format!("toggle_mode({})", mode));
        Ok(())
    }

    fn queue(&self) -> ServiceResult<Vec<QueueEntry>> {
        self.record("queue");
        Ok(self.queue.lock().unwrap().clone())
    }

    fn play_at(&self, position: u32) -> ServiceResult<()> {
        self.record(format!("play_at({})", position));
        Ok(())
    }

    fn delete_at(&self, position: u32) -> ServiceResult<()> {
        self.record(format!("delete_at({})", position));
        Ok(())
    }

    fn clear_queue(&self) -> ServiceResult<()> {
        self.record("clear_queue");
        Ok(())
    }

    fn enqueue(&self, uris: &[String]) -> ServiceResult<()> {
        self.record(format!("enqueue({})", uris.join(",")));
        Ok(())
    }

    fn load_catalog(&self) -> ServiceResult<Option<CatalogSnapshot>> {
        self.record("load_catalog");
        Ok(self.cached.lock().unwrap().clone())
    }

    fn rebuild_catalog(&self) -> ServiceResult<Option<CatalogSnapshot>> {
        self.record("rebuild_catalog");
        Ok(self.rebuilt.lock().unwrap().clone())
    }
}

struct Harness {
    app: App,
    dispatcher: Dispatcher,
    rx: mpsc::Receiver<AppEvent>,
    service: Arc<RecordingService>,
}

impl Harness {
    fn new(service: RecordingService) -> Self {
        let service = Arc::new(service);
        let (tx, rx) = mpsc::channel(100);
        let timings = Timings::default();
        let dispatcher = Dispatcher::new(service.clone(), tx, timings);
        let mut app = App::new(Theme::default(), KeyConfig::default(), timings);
        app.progress_area = Some(Rect::new(0, 0, 101, 1));
        Self {
            app,
            dispatcher,
            rx,
            service,
        }
    }

    fn send(&mut self, event: AppEvent) {
        apply_event(&mut self.app, &self.dispatcher, event);
    }

    fn key(&mut self, code: KeyCode) {
        self.send(AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))));
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16) {
        self.send(AppEvent::Input(Event::Mouse(MouseEvent {
            kind,
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })));
    }

    fn poll(&mut self, elapsed: f64, total: f64) {
        let queue_version = *self.service.queue_version.lock().unwrap();
        self.send(AppEvent::Poll(PollSnapshot {
            song: Some(CurrentSong {
                uri: "a/1.flac".into(),
                title: "One".into(),
                artist: "A".into(),
                album: "Alpha".into(),
            }),
            transport: TransportState::Playing,
            modes: ModeFlags::default(),
            position: Position { elapsed, total },
            queue_version,
        }));
    }

    /// Apply events until the channel stays quiet for a moment.
    async fn drain(&mut self) {
        while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(5), self.rx.recv()).await {
            self.send(event);
        }
    }
}

fn entry(position: u32, is_active: bool) -> QueueEntry {
    QueueEntry {
        position,
        uri: format!("q/{}.flac", position),
        title: format!("Track {}", position),
        artist: "Artist".into(),
        duration_seconds: 180,
        is_active,
    }
}

fn library(songs_in_second_album: usize) -> CatalogSnapshot {
    CatalogSnapshot {
        artists: vec![WireArtist {
            name: "Cocteau Twins".into(),
            albums: vec![
                WireAlbum {
                    name: "Treasure".into(),
                    year: Some(1984),
                    songs: vec![
                        WireSong::new("ct/t/01.flac".into(), "Ivo".into(), 232),
                        WireSong::new("ct/t/02.flac".into(), "Lorelei".into(), 223),
                    ],
                },
                WireAlbum {
                    name: "Heaven or Las Vegas".into(),
                    year: Some(1990),
                    songs: (0..songs_in_second_album)
                        .map(|i| WireSong::new(format!("ct/h/{:02}.flac", i), format!("Song {}", i), 200))
                        .collect(),
                },
            ],
        }],
    }
}

#[test]
fn test_app_initialization() {
    let app = App::new(Theme::default(), KeyConfig::default(), Timings::default());
    assert!(app.is_running);
    assert_eq!(app.panel, Panel::Queue);
    assert!(app.queue.is_empty());
    assert!(app.catalog.is_empty());
    assert_eq!(app.seek.elapsed_label(), "0:00");
}

#[tokio::test(start_paused = true)]
async fn drag_commit_sends_exactly_one_seek() {
    let mut h = Harness::new(RecordingService::default());
    h.poll(10.0, 200.0);

    h.mouse(MouseEventKind::Down(MouseButton::Left), 20);
    h.mouse(MouseEventKind::Drag(MouseButton::Left), 40);
    h.mouse(MouseEventKind::Drag(MouseButton::Left), 25);
    assert_eq!(h.app.seek.phase(), SeekPhase::Dragging);
    h.mouse(MouseEventKind::Up(MouseButton::Left), 25);
    h.drain().await;

    assert_eq!(h.service.count("set_position"), 1);
    assert!(h.service.calls().contains(&"set_position(0.25)".to_string()));
    assert_eq!(h.app.seek.phase(), SeekPhase::Committing);

    // Settle delay returns control to the poller
    tokio::time::advance(Duration::from_millis(150)).await;
    h.drain().await;
    assert_eq!(h.app.seek.phase(), SeekPhase::Idle);
    assert_eq!(h.service.count("set_position"), 1);
}

#[tokio::test(start_paused = true)]
async fn polls_during_drag_leave_display_alone() {
    let mut h = Harness::new(RecordingService::default());
    h.poll(30.0, 120.0);
    let before = (h.app.seek.bar_percent(), h.app.seek.total_label().to_string());

    h.mouse(MouseEventKind::Down(MouseButton::Left), 80);
    for elapsed in [31.0, 32.0, 33.0] {
        h.poll(elapsed, 120.0);
        assert_eq!(h.app.seek.bar_percent(), before.0);
        assert_eq!(h.app.seek.total_label(), before.1);
        assert_eq!(h.app.seek.elapsed_label(), "1:36");
    }

    h.mouse(MouseEventKind::Up(MouseButton::Left), 80);
    // Late poll inside the settle window is discarded too
    h.poll(34.0, 120.0);
    assert_eq!(h.app.seek.bar_percent(), before.0);

    h.drain().await;
    tokio::time::advance(Duration::from_millis(150)).await;
    h.drain().await;
    h.poll(96.0, 120.0);
    assert_eq!(h.app.seek.bar_percent(), 80.0);
    assert_eq!(h.app.seek.elapsed_label(), "1:36");
}

#[tokio::test(start_paused = true)]
async fn failed_seek_still_settles_and_keeps_optimistic_label() {
    let mut h = Harness::new(RecordingService {
        fail_seek: true,
        ..Default::default()
    });
    h.poll(0.0, 100.0);

    h.mouse(MouseEventKind::Down(MouseButton::Left), 50);
    h.mouse(MouseEventKind::Up(MouseButton::Left), 50);
    h.drain().await;
    tokio::time::advance(Duration::from_millis(150)).await;
    h.drain().await;

    assert_eq!(h.app.seek.phase(), SeekPhase::Idle);
    assert_eq!(h.app.seek.elapsed_label(), "0:50");
    assert_eq!(h.service.count("set_position"), 1);

    h.poll(1.0, 100.0);
    assert_eq!(h.app.seek.elapsed_label(), "0:01");
}

#[tokio::test(start_paused = true)]
async fn keyboard_seek_commits_once_keys_stop() {
    let mut h = Harness::new(RecordingService::default());
    h.poll(50.0, 100.0);

    h.key(KeyCode::Char('l'));
    h.key(KeyCode::Char('l'));
    h.send(AppEvent::Tick);
    h.drain().await;
    assert_eq!(h.service.count("set_position"), 0);

    tokio::time::advance(Duration::from_millis(600)).await;
    h.send(AppEvent::Tick);
    h.drain().await;
    assert_eq!(h.service.calls().iter().filter(|c| *c == "set_position(0.60)").count(), 1);
}

#[tokio::test(start_paused = true)]
async fn forward_seek_right_after_commit_keeps_going_forward() {
    let mut h = Harness::new(RecordingService::default());
    h.poll(50.0, 100.0);

    h.key(KeyCode::Char('l'));
    h.key(KeyCode::Char('l'));
    tokio::time::advance(Duration::from_millis(600)).await;
    h.send(AppEvent::Tick);
    h.drain().await;
    assert_eq!(h.service.count("set_position(0.60)"), 1);

    tokio::time::advance(Duration::from_millis(50)).await;
    h.key(KeyCode::Char('l'));
    tokio::time::advance(Duration::from_millis(600)).await;
    h.send(AppEvent::Tick);
    h.drain().await;
    assert_eq!(h.service.count("set_position(0.65)"), 1);
    assert_eq!(h.service.count("set_position"), 2);
}

#[tokio::test(start_paused = true)]
async fn mouse_drag_after_key_seek_commits_once_on_release() {
    let mut h = Harness::new(RecordingService::default());
    h.poll(50.0, 100.0);

    h.key(KeyCode::Char('l'));
    h.mouse(MouseEventKind::Down(MouseButton::Left), 90);
    tokio::time::advance(Duration::from_millis(600)).await;
    h.send(AppEvent::Tick);
    h.drain().await;
    assert_eq!(h.service.count("set_position"), 0);
    assert_eq!(h.app.seek.phase(), SeekPhase::Dragging);

    h.mouse(MouseEventKind::Drag(MouseButton::Left), 70);
    h.mouse(MouseEventKind::Up(MouseButton::Left), 70);
    h.send(AppEvent::Tick);
    h.drain().await;
    assert_eq!(h.service.count("set_position"), 1);
    assert_eq!(h.service.count("set_position(0.70)"), 1);
}

#[tokio::test(start_paused = true)]
async fn feedback_clears_without_waiting_for_the_command() {
    let mut h = Harness::new(RecordingService::default());
    h.key(KeyCode::Char('n'));
    assert!(h.app.feedback.is_lit(Control::Next));

    // Completion is never applied; the timer alone clears the highlight
    tokio::time::advance(Duration::from_millis(600)).await;
    h.send(AppEvent::Tick);
    assert!(!h.app.feedback.is_lit(Control::Next));
}

#[tokio::test(start_paused = true)]
async fn mutating_commands_refresh_the_queue() {
    let service = RecordingService::default();
    *service.queue.lock().unwrap() = vec![entry(0, false), entry(1, true), entry(2, false)];
    let mut h = Harness::new(service);
    h.dispatcher.refresh_queue();
    h.drain().await;

    h.key(KeyCode::Char('j'));
    h.key(KeyCode::Char('d'));
    h.drain().await;
    let calls = h.service.calls();
    let delete = calls.iter().position(|c| c == "delete_at(1)").unwrap();
    let refresh = calls.iter().rposition(|c| c == "queue").unwrap();
    assert!(delete < refresh);
    assert_eq!(h.service.count("queue"), 2);
    assert_eq!(h.app.queue.active().map(|e| e.position), Some(1));

    h.key(KeyCode::Char('c'));
    h.drain().await;
    assert_eq!(h.service.count("clear_queue"), 1);
    assert_eq!(h.service.count("queue"), 3);
}

#[tokio::test(start_paused = true)]
async fn play_at_does_not_refresh_by_itself() {
    let service = RecordingService::default();
    *service.queue.lock().unwrap() = vec![entry(0, true), entry(1, false)];
    let mut h = Harness::new(service);
    h.dispatcher.refresh_queue();
    h.drain().await;

    h.key(KeyCode::Down);
    h.key(KeyCode::Enter);
    h.drain().await;
    assert_eq!(h.service.count("play_at(1)"), 1);
    assert_eq!(h.service.count("queue"), 1);
}

#[tokio::test(start_paused = true)]
async fn song_change_refreshes_queue_and_art() {
    let mut h = Harness::new(RecordingService::default());
    h.poll(1.0, 10.0);
    h.drain().await;
    assert_eq!(h.service.count("queue"), 1);
    assert_eq!(h.service.count("album_art"), 1);

    // Same song again: nothing to refresh
    h.poll(2.0, 10.0);
    h.drain().await;
    assert_eq!(h.service.count("queue"), 1);
}

#[tokio::test(start_paused = true)]
async fn remote_queue_edit_is_picked_up_by_polling() {
    let service = RecordingService::default();
    *service.queue.lock().unwrap() = vec![entry(0, true)];
    let mut h = Harness::new(service);
    h.poll(1.0, 180.0);
    h.drain().await;
    assert_eq!(h.app.queue.len(), 1);

    h.service
        .edit_queue(vec![entry(0, true), entry(1, false), entry(2, false)]);
    for elapsed in 2..42 {
        h.poll(elapsed as f64, 180.0);
    }
    h.drain().await;
    assert_eq!(h.app.queue.len(), 3);
    // One refresh for the song, one for the edit
    assert_eq!(h.service.count("queue"), 2);
    assert_eq!(h.service.count("queue_version"), 0);
}

#[tokio::test(start_paused = true)]
async fn mode_toggle_requests_a_status_poll() {
    let mut h = Harness::new(RecordingService::default());
    h.key(KeyCode::Char('y'));
    h.drain().await;
    assert_eq!(h.service.count("toggle_mode(single)"), 1);
    assert_eq!(h.service.count("snapshot"), 1);
    assert_eq!(h.service.count("status"), 0);
    assert_eq!(h.service.count("queue"), 0);
}

#[tokio::test(start_paused = true)]
async fn catalog_load_falls_back_to_rebuild() {
    let service = RecordingService::default();
    *service.rebuilt.lock().unwrap() = Some(library(1));
    let mut h = Harness::new(service);

    h.dispatcher.load_catalog();
    h.drain().await;
    assert_eq!(h.service.calls(), vec!["load_catalog", "rebuild_catalog"]);
    assert_eq!(h.app.catalog.artists().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn absent_catalog_is_a_load_failure_without_retry() {
    let mut h = Harness::new(RecordingService::default());
    h.app.catalog_loading = true;
    h.dispatcher.load_catalog();
    h.drain().await;

    assert!(h.app.catalog.is_empty());
    assert!(!h.app.catalog_loading);
    assert_eq!(h.service.count("rebuild_catalog"), 1);
}

#[tokio::test(start_paused = true)]
async fn reload_keeps_expanded_nodes() {
    let service = RecordingService::default();
    *service.cached.lock().unwrap() = Some(library(1));
    let mut h = Harness::new(service);
    h.dispatcher.load_catalog();
    h.drain().await;

    // Expand the artist, then the second album
    h.key(KeyCode::Tab);
    h.key(KeyCode::Enter);
    h.key(KeyCode::Down);
    h.key(KeyCode::Down);
    h.key(KeyCode::Enter);
    assert_eq!(h.app.library_rows().len(), 4);

    *h.service.rebuilt.lock().unwrap() = Some(library(3));
    h.key(KeyCode::Char('r'));
    h.drain().await;

    let rows = h.app.library_rows();
    assert_eq!(rows.len(), 6);
    let album = &h.app.catalog.artists()[0].albums[1];
    assert!(h.app.expansion.is_expanded(&album.key));
}

#[tokio::test(start_paused = true)]
async fn enqueue_artist_sends_urls_in_tree_order() {
    let service = RecordingService::default();
    *service.cached.lock().unwrap() = Some(library(2));
    let mut h = Harness::new(service);
    h.dispatcher.load_catalog();
    h.drain().await;

    h.key(KeyCode::Tab);
    h.key(KeyCode::Char('a'));
    h.drain().await;

    assert_eq!(
        h.service.count("enqueue(ct/t/01.flac,ct/t/02.flac,ct/h/00.flac,ct/h/01.flac)"),
        1
    );
    assert!(h.app.feedback.is_lit(Control::Enqueue));
    assert_eq!(h.service.count("queue"), 1);
}

#[test]
fn render_scrolls_to_active_entry_once() {
    let mut app = App::new(Theme::default(), KeyConfig::default(), Timings::default());
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

    app.queue.replace((0..40).map(|p| entry(p, p == 30)).collect());
    terminal.draw(|f| mpd_mirror::ui::ui(f, &mut app)).unwrap();
    assert_eq!(app.queue.cursor, 30);
    assert!(app.progress_area.is_some());

    // User moves away; another frame must not yank the cursor back
    app.queue.move_cursor(-10);
    terminal.draw(|f| mpd_mirror::ui::ui(f, &mut app)).unwrap();
    assert_eq!(app.queue.cursor, 20);

    app.queue.replace((0..40).map(|p| entry(p, false)).collect());
    terminal.draw(|f| mpd_mirror::ui::ui(f, &mut app)).unwrap();
    assert_eq!(app.queue.cursor, 20);
    assert!(!app.queue.scroll_pending());
}
