//! 双向索引上的 Hamming 距离回溯搜索。
//!
//! 一个批次内各窗口共享的区段按鸽巢 [`SearchScheme`] 只搜索一次；
//! 找到的每个近似出现再用剩余错配预算扩展到批次内的每个窗口。

use std::ops::Range;

use super::scheme::{block_bounds, SearchScheme};
use crate::index::{BiIndex, BiState};
use crate::util::dna::BASES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Left,
    Right,
}

/// 编译后搜索的单个字符步。
#[derive(Debug, Clone, Copy)]
struct CharStep {
    pos: usize,
    dir: Dir,
    max_errors: u8,
    min_block_errors: u8,
    block_start: bool,
    block_end: bool,
}

/// An approximate occurrence of the shared region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub state: BiState,
    pub errors: u8,
}

/// Searches patterns of one fixed length with up to `errors` mismatches.
pub struct ApproxSearcher<'a> {
    index: &'a BiIndex,
    errors: u8,
    pattern_len: usize,
    plans: Vec<Vec<CharStep>>,
}

impl<'a> ApproxSearcher<'a> {
    /// `pattern_len` must be at least the number of blocks of `scheme`.
    pub fn new(index: &'a BiIndex, scheme: &SearchScheme, pattern_len: usize) -> Self {
        debug_assert!(pattern_len >= scheme.min_len());
        let bounds = block_bounds(pattern_len, scheme.parts);
        let plans = scheme
            .searches
            .iter()
            .map(|search| {
                let anchor = search.anchor();
                let mut plan = Vec::with_capacity(pattern_len);
                for step in &search.steps {
                    let range = bounds[step.block].clone();
                    let dir = if step.block >= anchor { Dir::Right } else { Dir::Left };
                    let positions: Vec<usize> = match dir {
                        Dir::Right => range.collect(),
                        Dir::Left => range.rev().collect(),
                    };
                    let last = positions.len().saturating_sub(1);
                    plan.extend(positions.into_iter().enumerate().map(|(j, pos)| CharStep {
                        pos,
                        dir,
                        max_errors: step.max_errors,
                        min_block_errors: step.min_block_errors,
                        block_start: j == 0,
                        block_end: j == last,
                    }));
                }
                plan
            })
            .collect();

        Self { index, errors: scheme.errors, pattern_len, plans }
    }

    #[inline]
    fn step(&self, s: &BiState, dir: Dir, c: u8) -> Option<BiState> {
        match dir {
            Dir::Left => self.index.extend_left(s, c),
            Dir::Right => self.index.extend_right(s, c),
        }
    }

    /// All distinct strings within the error budget of `pattern`, each with
    /// its number of mismatches.
    pub fn search(&self, pattern: &[u8]) -> Vec<Hit> {
        debug_assert_eq!(pattern.len(), self.pattern_len);
        let mut hits = Vec::new();
        for plan in &self.plans {
            self.descend(pattern, plan, 0, self.index.root(), 0, 0, &mut hits);
        }
        hits
    }

    fn descend(
        &self,
        pattern: &[u8],
        plan: &[CharStep],
        i: usize,
        state: BiState,
        errors: u8,
        block_errors: u8,
        hits: &mut Vec<Hit>,
    ) {
        let Some(step) = plan.get(i) else {
            hits.push(Hit { state, errors });
            return;
        };
        let block_errors = if step.block_start { 0 } else { block_errors };
        let want = pattern[step.pos];
        for &c in &BASES {
            let miss = u8::from(c != want);
            let e = errors + miss;
            if e > step.max_errors {
                continue;
            }
            let be = block_errors + miss;
            if step.block_end && be < step.min_block_errors {
                continue;
            }
            if let Some(next) = self.step(&state, step.dir, c) {
                self.descend(pattern, plan, i + 1, next, e, be, hits);
            }
        }
    }

    /// 先向右按序追加 `right`，再向左由近及远前插 `left`，最多再允许
    /// `budget` 个错配。
    pub fn extend(&self, state: BiState, budget: u8, left: &[u8], right: &[u8], out: &mut Vec<BiState>) {
        self.extend_from(state, 0, budget, left, right, out);
    }

    fn extend_from(&self, state: BiState, i: usize, budget: u8, left: &[u8], right: &[u8], out: &mut Vec<BiState>) {
        let total = left.len() + right.len();
        let at = |j: usize| {
            if j < right.len() {
                (Dir::Right, right[j])
            } else {
                (Dir::Left, left[left.len() - 1 - (j - right.len())])
            }
        };

        if budget == 0 {
            let mut s = state;
            for j in i..total {
                let (dir, c) = at(j);
                match self.step(&s, dir, c) {
                    Some(next) => s = next,
                    None => return,
                }
            }
            out.push(s);
            return;
        }
        if i == total {
            out.push(state);
            return;
        }

        let (dir, want) = at(i);
        for &c in &BASES {
            let cost = u8::from(c != want);
            if let Some(next) = self.step(&state, dir, c) {
                self.extend_from(next, i + 1, budget - cost, left, right, out);
            }
        }
    }

    /// Searches a batch of windows sharing `span[shared]`. Each window range
    /// must contain `shared`. Returns, per window, the states of all distinct
    /// matching strings.
    pub fn batch(&self, span: &[u8], shared: Range<usize>, windows: &[Range<usize>]) -> Vec<Vec<BiState>> {
        let hits = self.search(&span[shared.clone()]);
        let mut per_window = vec![Vec::new(); windows.len()];
        for hit in &hits {
            let budget = self.errors - hit.errors;
            for (w, out) in windows.iter().zip(per_window.iter_mut()) {
                debug_assert!(w.start <= shared.start && shared.end <= w.end);
                self.extend(hit.state, budget, &span[w.start..shared.start], &span[shared.end..w.end], out);
            }
        }
        per_window
    }
}
