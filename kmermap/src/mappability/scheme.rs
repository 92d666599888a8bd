//! 鸽巢搜索方案（pigeonhole search schemes）。
//!
//! 最多 `e` 个错配的模式被切成 `e + 2` 块，因此至少两块无错配。取第一个
//! 无错配块 `a`：它左侧每块至少一个错配，故 `a <= e`，右侧各块合计至多
//! `e - a` 个错配。
//!
//! 搜索 `S_a` 先精确匹配块 `a`，向右依次走完其余块（累计预算 `e - a`），
//! 再向左走 `a-1 .. 0`，每块至少一个错配。任一错配分布只被其第一个无错配块
//! 对应的搜索接受，所以同一近似出现不会被报告两次。

use std::ops::Range;

/// Splits `len` characters into `parts` contiguous blocks. When `len` does
/// not divide evenly, the earlier blocks are one character longer.
pub fn block_bounds(len: usize, parts: usize) -> Vec<Range<usize>> {
    let base = len / parts;
    let extra = len % parts;
    let mut start = 0;
    (0..parts)
        .map(|b| {
            let end = start + base + usize::from(b < extra);
            let r = start..end;
            start = end;
            r
        })
        .collect()
}

/// 搜索中的一块：块号、走完该块后的累计错配上限、块内最少错配数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub block: usize,
    pub max_errors: u8,
    pub min_block_errors: u8,
}

/// 按访问顺序排列的块。第一块为锚点，之后每块都与已覆盖区间相邻。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub steps: Vec<Step>,
}

impl Search {
    /// Whether the search enumerates matches with `dist[b]` errors in block `b`.
    pub fn admits(&self, dist: &[u8]) -> bool {
        let mut total = 0u8;
        self.steps.iter().all(|s| {
            total += dist[s.block];
            dist[s.block] >= s.min_block_errors && total <= s.max_errors
        })
    }

    /// Block the search starts from.
    pub fn anchor(&self) -> usize {
        self.steps[0].block
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchScheme {
    pub errors: u8,
    pub parts: usize,
    pub searches: Vec<Search>,
}

impl SearchScheme {
    /// Scheme for up to `errors` mismatches. Without errors it degenerates
    /// to a single exact block.
    pub fn pigeonhole(errors: u8) -> Self {
        if errors == 0 {
            let exact = Step { block: 0, max_errors: 0, min_block_errors: 0 };
            return Self { errors, parts: 1, searches: vec![Search { steps: vec![exact] }] };
        }

        let parts = usize::from(errors) + 2;
        let searches = (0..=errors)
            .map(|a| {
                let anchor = usize::from(a);
                let mut steps = vec![Step { block: anchor, max_errors: 0, min_block_errors: 0 }];
                steps.extend((anchor + 1..parts).map(|block| Step {
                    block,
                    max_errors: errors - a,
                    min_block_errors: 0,
                }));
                steps.extend((0..anchor).rev().map(|block| Step {
                    block,
                    max_errors: errors,
                    min_block_errors: 1,
                }));
                Search { steps }
            })
            .collect();

        Self { errors, parts, searches }
    }

    /// Smallest pattern length the scheme can be applied to.
    pub fn min_len(&self) -> usize {
        self.parts
    }
}
