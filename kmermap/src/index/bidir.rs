use serde::{Deserialize, Serialize};

use super::fm::FmIndex;
use super::sa;
use crate::util::dna;

/// A location in the indexed collection: sequence ordinal plus offset inside
/// that sequence. Always 64-bit wide regardless of genome size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub seq: u64,
    pub offset: u64,
}

impl Position {
    pub fn new(seq: u64, offset: u64) -> Self {
        Self { seq, offset }
    }
}

/// 双向搜索状态：正向索引区间 [lo, lo+size) 与反向索引区间 [lo_rev, lo_rev+size)
/// 描述同一个模式串。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiState {
    pub lo: usize,
    pub lo_rev: usize,
    pub size: usize,
}

/// 双向 FM 索引。
///
/// 正向文本为 `s0 $ s1 $ ... s(n-1) $`，反向文本为
/// `rev(s(n-1)) $ ... rev(s0) $`，两者互为循环反转，因此正向 BWT 中某字符的
/// 前驱恰好是反向文本中对应位置的后继，可在一侧做 LF 步的同时同步另一侧区间。
/// 模式串中不出现分隔符，匹配不会跨越序列边界。
#[derive(Debug, Serialize, Deserialize)]
pub struct BiIndex {
    fwd: FmIndex,
    rev: FmIndex,
    /// 正向文本的完整 SA，用于定位
    sa: Vec<u64>,
    text: Vec<u8>,
    starts: Vec<u64>,
    lengths: Vec<u64>,
}

impl BiIndex {
    /// 从已编码的序列构建（编码值 1..=5，不含分隔符）。
    pub fn build(sequences: &[Vec<u8>], block: usize) -> Self {
        let total: usize = sequences.iter().map(|s| s.len() + 1).sum();
        let mut text = Vec::with_capacity(total);
        let mut starts = Vec::with_capacity(sequences.len());
        let mut lengths = Vec::with_capacity(sequences.len());
        for s in sequences {
            starts.push(text.len() as u64);
            lengths.push(s.len() as u64);
            text.extend_from_slice(s);
            text.push(0);
        }

        let mut reversed = Vec::with_capacity(total);
        for s in sequences.iter().rev() {
            reversed.extend(s.iter().rev());
            reversed.push(0);
        }

        let sigma = dna::SIGMA as u8;
        let sa_fwd = sa::build_sa(&text);
        let fwd = FmIndex::build(&text, &sa_fwd, sigma, block);
        let sa_rev = sa::build_sa(&reversed);
        let rev = FmIndex::build(&reversed, &sa_rev, sigma, block);

        Self { fwd, rev, sa: sa_fwd, text, starts, lengths }
    }

    /// 索引文本长度（含分隔符）。
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn num_sequences(&self) -> usize {
        self.starts.len()
    }

    pub fn sequence_len(&self, seq: usize) -> u64 {
        self.lengths[seq]
    }

    /// Encoded text of one sequence, without its separator.
    pub fn sequence(&self, seq: usize) -> &[u8] {
        let start = self.starts[seq] as usize;
        &self.text[start..start + self.lengths[seq] as usize]
    }

    /// 空模式串对应的状态（覆盖全部后缀）。
    pub fn root(&self) -> BiState {
        BiState { lo: 0, lo_rev: 0, size: self.len() }
    }

    /// 在模式串左侧追加字符 c。
    #[inline]
    pub fn extend_left(&self, s: &BiState, c: u8) -> Option<BiState> {
        let hi = s.lo + s.size;
        let (nl, nr) = self.fwd.rank_range(c, s.lo, hi);
        if nl >= nr {
            return None;
        }
        let lo_rev = s.lo_rev + self.fwd.count_smaller(c, s.lo, hi);
        Some(BiState { lo: nl, lo_rev, size: nr - nl })
    }

    /// 在模式串右侧追加字符 c。
    #[inline]
    pub fn extend_right(&self, s: &BiState, c: u8) -> Option<BiState> {
        let hi_rev = s.lo_rev + s.size;
        let (nl, nr) = self.rev.rank_range(c, s.lo_rev, hi_rev);
        if nl >= nr {
            return None;
        }
        let lo = s.lo + self.rev.count_smaller(c, s.lo_rev, hi_rev);
        Some(BiState { lo, lo_rev: nl, size: nr - nl })
    }

    /// Exact count of an encoded pattern (used by tests and benches).
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.fwd.backward_search(pattern).map_or(0, |(l, r)| r - l)
    }

    /// 枚举状态对应的全部文本位置，分解为 (序列号, 序列内偏移)。
    pub fn locate(&self, s: &BiState) -> impl Iterator<Item = Position> + '_ {
        self.sa[s.lo..s.lo + s.size].iter().filter_map(move |&p| self.map_text_pos(p))
    }

    /// 将文本位置映射到 (序列号, 偏移)。落在分隔符上时返回 None。
    pub fn map_text_pos(&self, pos: u64) -> Option<Position> {
        let idx = self.starts.partition_point(|&s| s <= pos).checked_sub(1)?;
        let offset = pos - self.starts[idx];
        (offset < self.lengths[idx]).then(|| Position::new(idx as u64, offset))
    }
}
