//! `model`：模型能力抽象，以及保证候选有序的排序适配器。

use std::{fmt, sync::Arc};

use crate::candidate::Candidate;

/// 模型抽象：grid 不关心候选来自文件/内存/网络。
///
/// 约定：
/// - `key_array` 是连续的读音键（例如 `["gao1","ke1","ji4"]`），如何拼成查询键由实现决定
/// - `candidates_for` 的返回顺序任意，可以为空
/// - 从 grid 的角度看，查询是同步且无副作用的
pub trait LanguageModel: Send + Sync {
    /// 该读音键序列是否有候选。
    fn has_candidates(&self, key_array: &[String]) -> bool;

    /// 该读音键序列的全部候选（无序）。
    fn candidates_for(&self, key_array: &[String]) -> Vec<Candidate>;
}

/// 按分数降序排列候选。
///
/// `sort_by` 是稳定排序：同分候选保持模型给出的原始相对顺序。
pub(crate) fn rank_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// 排序适配器：包一层任意 `LanguageModel`，保证 `candidates_for` 按分数降序输出。
///
/// 内部是 `Arc`，克隆只复制引用（`Grid` 的副本共享同一个模型）。
#[derive(Clone)]
pub struct RankedModel {
    inner: Arc<dyn LanguageModel>,
}

impl RankedModel {
    pub fn new(inner: Arc<dyn LanguageModel>) -> Self {
        Self { inner }
    }
}

impl LanguageModel for RankedModel {
    fn has_candidates(&self, key_array: &[String]) -> bool {
        self.inner.has_candidates(key_array)
    }

    fn candidates_for(&self, key_array: &[String]) -> Vec<Candidate> {
        let mut candidates = self.inner.candidates_for(key_array);
        rank_candidates(&mut candidates);
        candidates
    }
}

impl fmt::Debug for RankedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedModel").finish_non_exhaustive()
    }
}
