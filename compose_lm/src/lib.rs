//! `compose_lm`：内存版模型，`compose_core::model::LanguageModel` 的参考实现。
//!
//! 不解析词典文件；调用方用 `insert` 逐条灌数据。

use std::collections::BTreeMap;

use compose_core::{candidate::Candidate, model::LanguageModel};
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    score: f64,
}

/// 内存模型：`拼接后的读音键 -> [候选]`。
///
/// 查询时用 `separator` 把 `key_array` 拼成键（例如 `["gao1","ke1"]` + `""` → `gao1ke1`）。
/// 内部有读写锁，`Arc<MemoryModel>` 交给 grid 之后仍可以 `insert`/`trim`，
/// 之后调用 `Grid::update(true)` 即可同步。
#[derive(Debug, Default)]
pub struct MemoryModel {
    separator: String,
    map: RwLock<BTreeMap<String, Vec<Entry>>>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            map: RwLock::default(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// 追加一条候选；同一键下保持插入顺序（排序交给 `RankedModel`）。
    pub fn insert(&self, key: &str, value: &str, score: f64) {
        self.map.write().entry(key.to_owned()).or_default().push(Entry {
            value: value.to_owned(),
            score,
        });
    }

    /// 删掉某键下值为 `value` 的候选；键下没有候选时连键一起删。返回是否删掉了东西。
    pub fn trim(&self, key: &str, value: &str) -> bool {
        let mut map = self.map.write();
        let Some(entries) = map.get_mut(key) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.value != value);
        let trimmed = entries.len() != before;
        if entries.is_empty() {
            map.remove(key);
        }
        if trimmed {
            debug!(key, value, "已删除候选");
        }
        trimmed
    }

    /// 删掉整个键。
    pub fn remove(&self, key: &str) -> bool {
        self.map.write().remove(key).is_some()
    }

    /// 键的数量。
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    fn join(&self, key_array: &[String]) -> String {
        key_array.join(&self.separator)
    }
}

impl LanguageModel for MemoryModel {
    fn has_candidates(&self, key_array: &[String]) -> bool {
        let key = self.join(key_array);
        !key.is_empty() && self.map.read().contains_key(&key)
    }

    fn candidates_for(&self, key_array: &[String]) -> Vec<Candidate> {
        let key = self.join(key_array);
        self.map
            .read()
            .get(&key)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| Candidate::new(e.value.clone(), e.score))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn sample() -> MemoryModel {
        let model = MemoryModel::with_separator("-");
        model.insert("yi1", "一", -2.08);
        model.insert("yi1", "衣", -4.0);
        model.insert("yi1-yi1", "一一", -4.38);
        model
    }

    #[test]
    fn joins_keys_with_separator() {
        let model = sample();
        assert_eq!(model.separator(), "-");
        assert!(model.has_candidates(&keys(&["yi1", "yi1"])));
        assert!(!model.has_candidates(&keys(&["yi1yi1"])));
        assert!(!model.has_candidates(&[]));
        let values: Vec<String> = model
            .candidates_for(&keys(&["yi1"]))
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, ["一", "衣"]);
    }

    #[test]
    fn trim_removes_value_then_key() {
        let model = sample();
        assert_eq!(model.len(), 2);
        assert!(!model.trim("yi1", "二"));
        assert!(model.trim("yi1", "衣"));
        assert_eq!(model.candidates_for(&keys(&["yi1"])).len(), 1);
        assert!(model.trim("yi1", "一"));
        assert!(!model.has_candidates(&keys(&["yi1"])));
        assert_eq!(model.len(), 1);
        assert!(model.remove("yi1-yi1"));
        assert!(model.is_empty());
    }

    #[test]
    fn unknown_key_yields_nothing() {
        let model = MemoryModel::new();
        assert!(model.candidates_for(&keys(&["nope"])).is_empty());
    }
}
