/// 构建后缀数组（倍增法，每轮按 (rank[i], rank[i+k]) 排序）。
/// 输入为数值化文本（0:$,1:A,2:C,3:G,4:T,5:N），允许多个 0 作为序列分隔符；
/// 分隔符之间不做区分，比较会继续向后进行，越过文本末尾的后缀视为更小。
pub fn build_sa(text: &[u8]) -> Vec<u64> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = text.iter().map(|&b| i64::from(b)).collect();
    let mut next: Vec<i64> = vec![0; n];

    let mut k = 1usize;
    loop {
        let key = |i: usize, rank: &[i64]| (rank[i], if i + k < n { rank[i + k] } else { -1 });
        sa.sort_unstable_by_key(|&i| key(i, &rank));

        next[sa[0]] = 0;
        for w in 1..n {
            let bump = i64::from(key(sa[w], &rank) != key(sa[w - 1], &rank));
            next[sa[w]] = next[sa[w - 1]] + bump;
        }
        std::mem::swap(&mut rank, &mut next);

        if rank[sa[n - 1]] as usize == n - 1 || k >= n {
            break;
        }
        k <<= 1;
    }

    sa.into_iter().map(|x| x as u64).collect()
}

/// 根据后缀数组构建 BWT（循环定义：SA[i] == 0 时取文本最后一个字符）。
pub fn build_bwt(text: &[u8], sa: &[u64]) -> Vec<u8> {
    let n = text.len();
    sa.iter()
        .map(|&p| {
            let i = p as usize;
            if i == 0 { text[n - 1] } else { text[i - 1] }
        })
        .collect()
}
