use crate::error::ViewError;
use crate::player::QueueEntry;

/// Remote-owned play queue 📜
#[derive(Debug, Clone, Default)]
pub struct QueueModel {
    entries: Vec<QueueEntry>,
    active: Option<usize>,
    scroll_request: bool,
    pub cursor: usize,
}

impl QueueModel {
    /// Swap in a freshly fetched queue. The first active entry wins; any
    /// further active flags are cleared and reported.
    pub fn replace(&mut self, mut entries: Vec<QueueEntry>) {
        let mut active = None;
        let mut extra = 0usize;
        for (idx, entry) in entries.iter_mut().enumerate() {
            if !entry.is_active {
                continue;
            }
            if active.is_none() {
                active = Some(idx);
            } else {
                entry.is_active = false;
                extra += 1;
            }
        }
        if extra > 0 {
            ViewError::MalformedState(format!(
                "queue reported {} active entries, keeping the first",
                extra + 1
            ))
            .log();
        }

        self.entries = entries;
        self.active = active;
        self.scroll_request = active.is_some();
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&QueueEntry> {
        self.active.and_then(|idx| self.entries.get(idx))
    }

    /// A non-empty queue with nothing active while the server is playing.
    pub fn lacks_active(&self, playing: bool) -> bool {
        playing && self.active.is_none() && !self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&QueueEntry> {
        self.entries.get(self.cursor)
    }

    pub fn scroll_pending(&self) -> bool {
        self.scroll_request
    }

    /// Consumed by the renderer: yields the active index once per refresh
    /// and moves the cursor onto it.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        if !std::mem::take(&mut self.scroll_request) {
            return None;
        }
        let idx = self.active?;
        self.cursor = idx;
        Some(idx)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.entries.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.entries.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }
}
