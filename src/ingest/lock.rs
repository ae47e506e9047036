use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Video ids with a processing run in flight. At most one run per video.
#[derive(Debug, Default)]
pub struct ProcessingLocks {
    active: Mutex<HashSet<String>>,
}

/// Releases the video's slot when dropped.
#[derive(Debug)]
pub struct ProcessingGuard<'a> {
    locks: &'a ProcessingLocks,
    video_id: String,
}

impl ProcessingLocks {
    /// `None` when another run already holds `video_id`.
    pub fn try_acquire(&self, video_id: &str) -> Option<ProcessingGuard<'_>> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(video_id.to_string()) {
            return None;
        }
        Some(ProcessingGuard {
            locks: self,
            video_id: video_id.to_string(),
        })
    }

    pub fn is_locked(&self, video_id: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(video_id)
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.locks
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.video_id);
    }
}
