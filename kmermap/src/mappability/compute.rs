//! 单个 segment 的批量近似 k-mer 计数。
//!
//! 每个批次共享区段只搜索一次，再向批次内各窗口两侧扩展；
//! 开启反向互补时对 span 的反向互补做同样的搜索，结果按命中位置取并集。

use std::ops::Range;

use rayon::prelude::*;

use super::locations::{LocationMap, LocationRecorder, Position, Strand, StrandHits};
use super::params::{OutputKind, SearchParams};
use super::progress::Progress;
use super::pseudo::PseudoGroupMapper;
use super::scheme::SearchScheme;
use super::score::{MappabilityVector, Score};
use super::search::ApproxSearcher;
use super::segment::Segment;
use crate::error::MappabilityError;
use crate::index::{BiIndex, BiState};
use crate::util::dna;

/// Scores of one segment plus, when requested, every hit of every query.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentResult<T> {
    pub scores: Vec<T>,
    pub locations: Option<LocationMap>,
}

/// Batched approximate k-mer counting over one segment at a time.
///
/// Consecutive window starts are grouped into batches of `overlap + 1`; the
/// part of the segment shared by every window of a batch is searched once and
/// the resulting states are extended into each window. Batches run in
/// parallel on the current rayon pool and write disjoint slices of the score
/// vector.
pub struct MappabilityComputer<'a> {
    index: &'a BiIndex,
    params: SearchParams,
    scheme: SearchScheme,
    groups: &'a PseudoGroupMapper,
    record_locations: bool,
}

/// Per-batch output: hit lists of the batch's queries, in query order.
type BatchHits = Vec<(Position, StrandHits)>;

impl<'a> MappabilityComputer<'a> {
    pub fn new(
        index: &'a BiIndex,
        params: SearchParams,
        groups: &'a PseudoGroupMapper,
        record_locations: bool,
    ) -> Result<Self, MappabilityError> {
        params.validate()?;
        let scheme = SearchScheme::pigeonhole(params.errors);
        Ok(Self { index, params, scheme, groups, record_locations })
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Hit positions are enumerated whenever a report needs them or hits
    /// have to be collapsed per source file.
    fn needs_positions(&self) -> bool {
        self.record_locations || self.params.exclude_pseudo
    }

    /// Number of batches `compute` will run for `segment`.
    pub fn num_batches(&self, segment: &Segment) -> usize {
        let k = self.params.k;
        segment
            .chrom_lengths
            .iter()
            .filter(|&&len| len as usize >= k)
            .map(|&len| (len as usize - k + 1).div_ceil(self.params.batch_size()))
            .sum()
    }

    pub fn compute<T: Score>(&self, segment: &Segment, progress: &Progress) -> Result<SegmentResult<T>, MappabilityError> {
        segment.check(self.index)?;

        let k = self.params.k;
        let batch_size = self.params.batch_size();
        let searcher = ApproxSearcher::new(self.index, &self.scheme, self.params.shared_len());
        let mut scores = vec![T::default(); segment.len() as usize];
        let mut recorder = LocationRecorder::new(self.record_locations);

        for (seq, start, len) in segment.chromosomes() {
            if len < k {
                continue;
            }
            let text = self.index.sequence(seq);
            let valid = len - k + 1;
            let hits: Vec<BatchHits> = scores[start..start + valid]
                .par_chunks_mut(batch_size)
                .enumerate()
                .map(|(b, out)| {
                    let first = b * batch_size;
                    let hits = self.run_batch(&searcher, seq, text, first, out);
                    progress.tick();
                    hits
                })
                .collect();
            for (query, strand_hits) in hits.into_iter().flatten() {
                for hit in strand_hits.forward {
                    recorder.record(query, hit, Strand::Forward);
                }
                for hit in strand_hits.reverse {
                    recorder.record(query, hit, Strand::Reverse);
                }
            }
        }

        let locations = recorder.is_enabled().then(|| recorder.finish());
        Ok(SegmentResult { scores, locations })
    }

    /// Computes the scores of a segment in the precision chosen at run time.
    pub fn compute_vector(
        &self,
        segment: &Segment,
        kind: OutputKind,
        progress: &Progress,
    ) -> Result<(MappabilityVector, Option<LocationMap>), MappabilityError> {
        Ok(match kind {
            OutputKind::Mappability => {
                let r = self.compute::<f32>(segment, progress)?;
                (r.scores.into(), r.locations)
            }
            OutputKind::FrequencySmall => {
                let r = self.compute::<u8>(segment, progress)?;
                (r.scores.into(), r.locations)
            }
            OutputKind::FrequencyLarge => {
                let r = self.compute::<u16>(segment, progress)?;
                (r.scores.into(), r.locations)
            }
        })
    }

    /// Scores windows `first .. first + out.len()` of sequence `seq`.
    ///
    /// 正向窗口 i 为 `span[i..i+k]`；反向互补 span 中对应窗口为
    /// `[l-i-k, l-i)`，共享区段 `[l-k, l-overlap)`。
    fn run_batch<T: Score>(
        &self,
        searcher: &ApproxSearcher<'_>,
        seq: usize,
        text: &[u8],
        first: usize,
        out: &mut [T],
    ) -> BatchHits {
        let k = self.params.k;
        let overlap = self.params.overlap;
        let m = out.len();
        let span = &text[first..first + m - 1 + k];
        let windows: Vec<Range<usize>> = (0..m).map(|i| i..i + k).collect();
        let forward = searcher.batch(span, overlap..k, &windows);

        let reverse = if self.params.reverse_complement {
            let rc_span = dna::revcomp_codes(span);
            let l = span.len();
            let rc_windows: Vec<Range<usize>> = (0..m).map(|i| l - i - k..l - i).collect();
            searcher.batch(&rc_span, l - k..l - overlap, &rc_windows)
        } else {
            vec![Vec::new(); m]
        };

        let mut batch_hits = BatchHits::new();
        for (i, (fwd, rev)) in forward.iter().zip(&reverse).enumerate() {
            let query = Position::new(seq as u64, (first + i) as u64);
            let count = if self.needs_positions() {
                let hits = self.locate(fwd, rev);
                let count = self.count_hits(&hits);
                if self.record_locations {
                    batch_hits.push((query, hits));
                }
                count
            } else {
                count_states(fwd, rev)
            };
            out[i] = T::from_count(count);
        }
        batch_hits
    }

    /// 定位两条链的全部命中，各自升序。
    fn locate(&self, fwd: &[BiState], rev: &[BiState]) -> StrandHits {
        let collect = |states: &[BiState]| {
            let mut v: Vec<Position> = states.iter().flat_map(|s| self.index.locate(s)).collect();
            v.sort_unstable();
            v
        };
        StrandHits { forward: collect(fwd), reverse: collect(rev) }
    }

    /// Size of the union of both strands' hits, or the number of distinct
    /// source files among them when hits are collapsed per file.
    fn count_hits(&self, hits: &StrandHits) -> u64 {
        let mut union: Vec<Position> = Vec::with_capacity(hits.total());
        union.extend_from_slice(&hits.forward);
        union.extend_from_slice(&hits.reverse);
        union.sort_unstable();
        union.dedup();
        if !self.params.exclude_pseudo {
            return union.len() as u64;
        }
        // sorted by sequence, so group ids come out non-decreasing
        let mut groups: Vec<u64> = union.iter().map(|p| self.groups.group_of(p.seq)).collect();
        groups.dedup();
        groups.len() as u64
    }
}

/// Counts occurrences straight from the index intervals. States of one strand
/// denote distinct strings; a string reached from both strands has the same
/// interval on both and is counted once.
fn count_states(fwd: &[BiState], rev: &[BiState]) -> u64 {
    let mut seen: Vec<(usize, usize)> = fwd.iter().chain(rev).map(|s| (s.lo, s.size)).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.iter().map(|&(_, size)| size as u64).sum()
}
