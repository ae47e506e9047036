//! Channel registration and per-video processing: the sequential chains of
//! metadata, transcript and classification calls behind the write endpoints.

pub mod channels;
pub mod language;
pub mod lock;
pub mod videos;

pub use channels::{parse_published_at, RegisteredChannel};
pub use language::{KeywordLanguagePolicy, LanguagePolicy, LanguageRule};
pub use lock::ProcessingLocks;
pub use videos::{AnalyzeOutcome, ProcessOutcome};

use crate::classifier::ClassifierClient;
use crate::metadata::MetadataClient;

pub const DEFAULT_INITIAL_VIDEOS: u32 = 10;

/// Everything the workflow needs from the outside world, built once at
/// startup and shared by all workers.
pub struct Ingestor {
    metadata: MetadataClient,
    classifier: ClassifierClient,
    language: Box<dyn LanguagePolicy>,
    locks: ProcessingLocks,
    initial_videos: u32,
}

impl Ingestor {
    pub fn new(metadata: MetadataClient, classifier: ClassifierClient) -> Self {
        Self {
            metadata,
            classifier,
            language: Box::new(KeywordLanguagePolicy::default()),
            locks: ProcessingLocks::default(),
            initial_videos: DEFAULT_INITIAL_VIDEOS,
        }
    }

    pub fn with_language_policy(mut self, policy: Box<dyn LanguagePolicy>) -> Self {
        self.language = policy;
        self
    }

    /// How many recent uploads to import when a channel is registered.
    pub fn with_initial_videos(mut self, count: u32) -> Self {
        self.initial_videos = count;
        self
    }
}
