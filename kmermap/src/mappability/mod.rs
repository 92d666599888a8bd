//! Per-position k-mer mappability over an indexed sequence collection.

pub mod compute;
pub mod locations;
pub mod params;
pub mod progress;
pub mod pseudo;
pub mod scheme;
pub mod score;
pub mod search;
pub mod segment;

pub use compute::{MappabilityComputer, SegmentResult};
pub use locations::{LocationMap, LocationRecorder, Position, Strand, StrandHits};
pub use params::{OutputKind, SearchParams, MAX_ERRORS};
pub use progress::Progress;
pub use pseudo::PseudoGroupMapper;
pub use score::{MappabilityVector, Score};
pub use segment::{Segment, SequenceSegmenter};
