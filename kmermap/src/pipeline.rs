//! Run driver: walks the segments of an index and hands each scored segment
//! to a sink before moving on to the next one.

use anyhow::Result;
use std::time::Instant;

use crate::error::MappabilityError;
use crate::index::{DirectoryEntry, GenomeIndex};
use crate::mappability::{
    LocationMap, MappabilityComputer, MappabilityVector, OutputKind, Progress, PseudoGroupMapper, SearchParams,
    Segment, SequenceSegmenter,
};

/// Everything a consumer gets for one segment.
#[derive(Debug)]
pub struct SegmentOutput<'a> {
    pub segment: &'a Segment,
    pub scores: &'a MappabilityVector,
    pub locations: Option<&'a LocationMap>,
    pub params: &'a SearchParams,
    /// Full sequence directory, for decoding ordinals in location reports.
    pub directory: &'a [DirectoryEntry],
}

/// Receives scored segments in index order.
pub trait SegmentSink {
    fn consume(&mut self, output: SegmentOutput<'_>) -> Result<()>;
}

/// Collects everything in memory. Handy for tests and library callers.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub segments: Vec<(Segment, MappabilityVector, Option<LocationMap>)>,
}

impl SegmentSink for CollectSink {
    fn consume(&mut self, output: SegmentOutput<'_>) -> Result<()> {
        self.segments
            .push((output.segment.clone(), output.scores.clone(), output.locations.cloned()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub params: SearchParams,
    pub kind: OutputKind,
    /// Keep every hit per query (detailed reports).
    pub record_locations: bool,
    /// Draw a progress bar per segment on stderr.
    pub progress: bool,
}

impl RunConfig {
    pub fn new(params: SearchParams) -> Self {
        Self { params, kind: OutputKind::default(), record_locations: false, progress: false }
    }
}

/// Computes every segment of `index` and feeds the results to `sink`.
/// Returns the number of segments processed.
///
/// Configuration and index consistency are checked for all segments before
/// the first one is searched.
pub fn run(index: &GenomeIndex, config: &RunConfig, sink: &mut dyn SegmentSink) -> Result<usize> {
    config.params.validate()?;
    if index.directory.is_empty() {
        return Err(MappabilityError::EmptyDirectory.into());
    }

    let groups = PseudoGroupMapper::build(&index.directory, config.params.exclude_pseudo);
    let computer = MappabilityComputer::new(&index.bi, config.params.clone(), &groups, config.record_locations)?;

    let segments: Vec<Segment> = SequenceSegmenter::new(&index.directory).collect();
    for segment in &segments {
        segment.check(&index.bi)?;
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.params.threads)
        .build()
        .map_err(MappabilityError::from)?;
    log::info!(
        "Computing {} segment(s) with k={}, errors={}, overlap={}, threads={}",
        segments.len(),
        config.params.k,
        config.params.errors,
        config.params.overlap,
        config.params.threads
    );

    for (i, segment) in segments.iter().enumerate() {
        let t0 = Instant::now();
        log::info!("[{}/{}] {} ({} bp)", i + 1, segments.len(), segment.source_file, segment.len());
        let progress = Progress::new(config.progress, computer.num_batches(segment), &segment.source_file);
        let (scores, locations) = pool.install(|| computer.compute_vector(segment, config.kind, &progress))?;
        progress.finish();
        log::info!("[{}/{}] computed in {:.2}s", i + 1, segments.len(), t0.elapsed().as_secs_f64());

        sink.consume(SegmentOutput {
            segment,
            scores: &scores,
            locations: locations.as_ref(),
            params: &config.params,
            directory: &index.directory,
        })?;
    }
    Ok(segments.len())
}
