pub mod catalog;
pub mod expansion;
pub mod feedback;
pub mod playback;
pub mod queue;
pub mod seek;

use super::config::Timings;
use super::events::RefreshTrigger;
use super::keys::KeyConfig;
use super::poller::PollSnapshot;
use crate::ui::theme::Theme;
use catalog::{CatalogRow, CatalogTree};
use expansion::ExpansionState;
use feedback::FeedbackState;
use playback::{NowPlaying, PlaybackStatus};
use queue::QueueModel;
use ratatui::layout::Rect;
use seek::SeekController;

/// Focused panel 🎛️
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Queue,
    Library,
}

impl Panel {
    pub fn toggle(self) -> Self {
        match self {
            Panel::Queue => Panel::Library,
            Panel::Library => Panel::Queue,
        }
    }
}

/// The one owning context for a view session. Everything the renderer and
/// the dispatcher need is reached through here.
pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub timings: Timings,
    pub is_running: bool,

    pub now_playing: NowPlaying,
    pub status: PlaybackStatus,
    pub seek: SeekController,
    pub queue: QueueModel,

    pub catalog: CatalogTree,
    pub expansion: ExpansionState,
    pub library_selected: usize,
    pub catalog_loading: bool,

    pub panel: Panel,
    pub feedback: FeedbackState,
    /// Last poll failed; the view is stale.
    pub connection_error: Option<String>,

    /// Server queue version from the last applied poll.
    pub queue_version: Option<u32>,

    /// Progress bar from the last frame, for mouse hit tests.
    pub progress_area: Option<Rect>,
    pub mouse_seeking: bool,
}

impl App {
    pub fn new(theme: Theme, keys: KeyConfig, timings: Timings) -> Self {
        Self {
            theme,
            keys,
            timings,
            is_running: true,
            now_playing: NowPlaying::default(),
            status: PlaybackStatus::default(),
            seek: SeekController::new(),
            queue: QueueModel::default(),
            catalog: CatalogTree::default(),
            expansion: ExpansionState::default(),
            library_selected: 0,
            catalog_loading: false,
            panel: Panel::default(),
            feedback: FeedbackState::default(),
            connection_error: None,
            queue_version: None,
            progress_area: None,
            mouse_seeking: false,
        }
    }

    /// Apply a status poll and name the refresh it calls for. A new song
    /// covers the queue too; otherwise a bumped queue version refreshes the
    /// queue alone.
    pub fn apply_poll(&mut self, snapshot: PollSnapshot) -> Option<RefreshTrigger> {
        self.connection_error = None;
        let song_changed = self.now_playing.update_song(snapshot.song);
        self.status
            .apply(snapshot.transport, snapshot.modes, snapshot.position);
        self.seek
            .on_remote_position_update(snapshot.position.elapsed, snapshot.position.total);

        let previous = self.queue_version.replace(snapshot.queue_version);
        let queue_changed = previous.is_some_and(|v| v != snapshot.queue_version);
        if song_changed {
            Some(RefreshTrigger::SongChanged)
        } else if queue_changed {
            tracing::debug!(version = snapshot.queue_version, "queue edited remotely");
            Some(RefreshTrigger::QueueChanged)
        } else {
            None
        }
    }

    /// Swap in a rebuilt tree; expansion is keyed by identity and kept.
    pub fn install_catalog(&mut self, tree: CatalogTree) {
        self.catalog = tree;
        self.catalog_loading = false;
        self.clamp_library_cursor();
    }

    pub fn library_rows(&self) -> Vec<CatalogRow<'_>> {
        self.catalog.visible_rows(&self.expansion)
    }

    pub fn selected_row(&self) -> Option<CatalogRow<'_>> {
        self.library_rows().get(self.library_selected).copied()
    }

    pub fn move_library_cursor(&mut self, delta: isize) {
        let len = self.library_rows().len();
        if len == 0 {
            self.library_selected = 0;
            return;
        }
        self.library_selected = self.library_selected.saturating_add_signed(delta).min(len - 1);
    }

    pub fn clamp_library_cursor(&mut self) {
        let len = self.library_rows().len();
        self.library_selected = self.library_selected.min(len.saturating_sub(1));
    }

    /// Fraction along the progress bar for a terminal column, if the column
    /// lies on the bar.
    pub fn progress_fraction_at(&self, column: u16, row: u16) -> Option<f64> {
        let area = self.progress_area?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| Self::fraction_on(area, column))
    }

    /// Like [`Self::progress_fraction_at`] but clamps columns off either end,
    /// for drags that leave the bar.
    pub fn progress_fraction_clamped(&self, column: u16) -> Option<f64> {
        self.progress_area.map(|area| Self::fraction_on(area, column))
    }

    fn fraction_on(area: Rect, column: u16) -> f64 {
        if area.width <= 1 {
            return 0.0;
        }
        let offset = column.saturating_sub(area.x).min(area.width - 1);
        offset as f64 / (area.width - 1) as f64
    }
}
