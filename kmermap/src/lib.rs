//! # kmermap
//!
//! 基于双向 FM 索引的 k-mer 可比对性（mappability）与频数计算。
//!
//! 对输入序列集合中每个位置起始的长度为 k 的窗口，统计它在整个集合中
//! 允许至多 E 个错配（E ≤ 4）时出现的次数：
//!
//! - **mappability**：`1 / 次数`（f32），1.0 表示唯一
//! - **frequency**：次数本身，按 8 位或 16 位饱和存储
//!
//! 搜索将共享区域切分为 `E + 2` 个块（鸽巢原理），并把相邻 `overlap + 1`
//! 个窗口合并为一批，只对公共部分回溯一次，再逐窗口向两侧扩展。
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use kmermap::index::GenomeIndex;
//! use kmermap::io::fasta::FastaRecord;
//! use kmermap::mappability::SearchParams;
//! use kmermap::pipeline::{self, CollectSink, RunConfig};
//!
//! let records = vec![FastaRecord { name: "chr1".into(), seq: b"ACGTACGTTGCA".to_vec() }];
//! let index = GenomeIndex::build(&[("ref.fa".to_string(), records)], 64).unwrap();
//!
//! let config = RunConfig::new(SearchParams::new(4, 1));
//! let mut sink = CollectSink::default();
//! pipeline::run(&index, &config, &mut sink).unwrap();
//! let (_, scores, _) = &sink.segments[0];
//! println!("{:?}", scores.as_mappability());
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA 文件解析
//! - [`index`] — 索引构建（后缀数组、FM 索引、双向 FM 索引、序列目录）
//! - [`mappability`] — 搜索方案、批量近似搜索、计分与位置记录
//! - [`output`] — raw / txt / wig / bed / csv 输出
//! - [`pipeline`] — 按源文件逐段计算并交给输出端
//! - [`util`] — DNA 编码 / 解码 / 反向互补等工具函数

pub mod error;
pub mod index;
pub mod io;
pub mod mappability;
pub mod output;
pub mod pipeline;
pub mod util;

pub use error::MappabilityError;
