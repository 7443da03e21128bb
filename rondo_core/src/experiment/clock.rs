use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared handle over the experiment's progress counters.
///
/// `frame` counts environment steps taken by live agents across the whole
/// run, `episode` counts completed episodes; neither is ever rewound. The
/// driver holds the only ticking side; clones of the handle (e.g. inside
/// metrics writers) observe the live values.
#[derive(Debug, Clone, Default)]
pub struct ProgressClock{
    frames: Arc<AtomicU64>,
    episodes: Arc<AtomicU64>,
}

impl ProgressClock{
    pub fn new() -> Self{
        Self::default()
    }

    pub fn frame(&self) -> u64{
        self.frames.load(Ordering::Relaxed)
    }

    pub fn episode(&self) -> u64{
        self.episodes.load(Ordering::Relaxed)
    }

    pub(crate) fn tick_frame(&self) -> u64{
        self.frames.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn tick_episode(&self) -> u64{
        self.episodes.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Step marker attached to a recorded metric. `Frame` and `Episode` are
/// resolved against the live counters at the moment the metric is written,
/// not when the marker is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepMarker{
    Frame,
    Episode,
    At(u64),
}

impl StepMarker{
    pub fn resolve(self, clock: &ProgressClock) -> u64{
        match self{
            StepMarker::Frame => clock.frame(),
            StepMarker::Episode => clock.episode(),
            StepMarker::At(step) => step,
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn markers_resolve_against_live_counters(){
        let clock = ProgressClock::new();
        let handle = clock.clone();
        let marker = StepMarker::Frame;
        clock.tick_frame();
        clock.tick_frame();
        clock.tick_episode();
        assert_eq!(marker.resolve(&handle), 2);
        assert_eq!(StepMarker::Episode.resolve(&handle), 1);
        assert_eq!(StepMarker::At(42).resolve(&handle), 42);
    }
}
