use serde::{Deserialize, Serialize};

use super::sa;

/// 单向 FM 索引：
/// - 支持任意有限字母表，字母以 [0..sigma) 进行编码（0 预留为分隔符 $）。
/// - 采用定长分块的 Occ 采样（块内顺扫补偿）。
/// - 不保存 SA；定位由双向索引持有的正向 SA 完成。
#[derive(Debug, Serialize, Deserialize)]
pub struct FmIndex {
    pub sigma: u8,
    pub block: u32,
    /// C[i] = 文本中字母 < i 的累计数量
    pub c: Vec<u64>,
    /// BWT 序列
    pub bwt: Vec<u8>,
    /// Occ 采样（按块存储，行优先展平）：occ_samples[block_id * sigma + c]
    pub occ_samples: Vec<u64>,
}

impl FmIndex {
    /// 由文本与其后缀数组构建。
    pub fn build(text: &[u8], sa_arr: &[u64], sigma: u8, block: usize) -> Self {
        let bwt = sa::build_bwt(text, sa_arr);
        Self::from_bwt(bwt, sigma, block)
    }

    pub fn from_bwt(bwt: Vec<u8>, sigma: u8, block: usize) -> Self {
        let n = bwt.len();
        let sigma_us = sigma as usize;
        let block = block.max(1);

        let mut freq = vec![0u64; sigma_us];
        for &ch in &bwt {
            let ci = ch as usize;
            if ci < sigma_us { freq[ci] += 1; }
        }
        let mut c = vec![0u64; sigma_us];
        let mut acc = 0u64;
        for (slot, &f) in c.iter_mut().zip(&freq) {
            *slot = acc;
            acc += f;
        }

        let num_blocks = n.div_ceil(block);
        let mut occ_samples = vec![0u64; num_blocks * sigma_us];
        let mut running = vec![0u64; sigma_us];
        for bi in 0..num_blocks {
            occ_samples[bi * sigma_us..(bi + 1) * sigma_us].copy_from_slice(&running);
            let start = bi * block;
            let end = ((bi + 1) * block).min(n);
            for &ch in &bwt[start..end] {
                let ci = ch as usize;
                if ci < sigma_us { running[ci] += 1; }
            }
        }

        Self { sigma, block: block as u32, c, bwt, occ_samples }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    /// 返回 BWT[0..pos) 中 c 的出现次数
    #[inline]
    pub fn occ(&self, c: u8, pos: usize) -> usize {
        if pos == 0 { return 0; }
        let sigma_us = self.sigma as usize;
        let block = self.block as usize;
        let bi = (pos - 1) / block;
        let base = self.occ_samples[bi * sigma_us + c as usize] as usize;
        let start = bi * block;
        base + self.bwt[start..pos].iter().filter(|&&ch| ch == c).count()
    }

    /// 在区间 [l, r) 上向左扩展字符 c 后的新区间
    #[inline]
    pub fn rank_range(&self, c: u8, l: usize, r: usize) -> (usize, usize) {
        let c0 = self.c[c as usize] as usize;
        (c0 + self.occ(c, l), c0 + self.occ(c, r))
    }

    /// 区间 [l, r) 内 BWT 字符严格小于 c 的个数（双向索引同步另一侧区间时使用）。
    #[inline]
    pub fn count_smaller(&self, c: u8, l: usize, r: usize) -> usize {
        (0..c).map(|a| self.occ(a, r) - self.occ(a, l)).sum()
    }

    /// 反向搜索精确匹配，pat 已经是编码后的字母表（不应包含 0）
    pub fn backward_search(&self, pat: &[u8]) -> Option<(usize, usize)> {
        if self.bwt.is_empty() { return None; }
        let mut l = 0usize;
        let mut r = self.bwt.len();
        for &a in pat.iter().rev() {
            let (nl, nr) = self.rank_range(a, l, r);
            if nl >= nr { return None; }
            l = nl;
            r = nr;
        }
        Some((l, r))
    }
}
