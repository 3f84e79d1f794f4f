pub mod catalog_cache;
pub mod mpd;
pub mod traits;
pub mod wire;

pub use self::mpd::MpdService;
pub use traits::{
    CurrentSong, ModeFlags, PlaybackMode, PlaybackService, PollSnapshot, Position, QueueEntry,
    ServiceResult, TransportState,
};
pub use wire::CatalogSnapshot;
