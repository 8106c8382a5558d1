//! `unit`：覆盖连续 N 个读音键的候选单元。
//!
//! 约定：
//! - `key_array.len()` 就是单元的跨度（span length），至少为 1
//! - `candidates` 非空，按分数降序（稳定排序）
//! - 生效候选：未覆写时是第一个候选；覆写时是 `current` 指向的候选

use crate::{candidate::Candidate, model::rank_candidates};

/// 单元的覆写状态。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Override {
    /// 未覆写：取最高分候选
    #[default]
    None,
    /// 只按候选值覆写
    Literal(String),
    /// 按读音键 + 候选值覆写（读音键必须与单元一致）
    Specified { key_array: Vec<String>, value: String },
}

impl Override {
    /// 被钉住的候选值；未覆写时为 `None`。
    pub fn value(&self) -> Option<&str> {
        match self {
            Override::None => None,
            Override::Literal(value) | Override::Specified { value, .. } => Some(value),
        }
    }
}

/// 候选单元（grid 中的节点）。
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    key_array: Vec<String>,
    candidates: Vec<Candidate>,
    /// 生效候选在 `candidates` 里的下标
    current: usize,
    overridden: Override,
}

impl Unit {
    /// 构造单元；读音键为空或没有候选时不创建。
    pub fn new(key_array: Vec<String>, mut candidates: Vec<Candidate>) -> Option<Self> {
        if key_array.is_empty() || candidates.is_empty() {
            return None;
        }
        rank_candidates(&mut candidates);
        Some(Self {
            key_array,
            candidates,
            current: 0,
            overridden: Override::None,
        })
    }

    pub fn key_array(&self) -> &[String] {
        &self.key_array
    }

    pub fn span_length(&self) -> usize {
        self.key_array.len()
    }

    /// 用分隔符拼接读音键，例如 `a;b;c`。
    pub fn joined_key(&self, separator: &str) -> String {
        self.key_array.join(separator)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// 当前生效的候选。
    pub fn current(&self) -> &Candidate {
        &self.candidates[self.current]
    }

    pub fn value(&self) -> &str {
        &self.current().value
    }

    pub fn score(&self) -> f64 {
        self.current().score
    }

    pub fn override_state(&self) -> &Override {
        &self.overridden
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden != Override::None
    }

    pub fn has_candidate(&self, value: &str) -> bool {
        self.index_of(value).is_some()
    }

    /// 按值覆写；找不到该值时返回 false，状态不变。
    pub fn set_override_literal(&mut self, value: &str) -> bool {
        let Some(index) = self.index_of(value) else {
            return false;
        };
        self.current = index;
        self.overridden = Override::Literal(value.to_owned());
        true
    }

    /// 按读音键 + 值覆写；读音键与本单元不一致或找不到该值时返回 false。
    pub fn set_override_specified(&mut self, key_array: &[String], value: &str) -> bool {
        if self.key_array != key_array {
            return false;
        }
        let Some(index) = self.index_of(value) else {
            return false;
        };
        self.current = index;
        self.overridden = Override::Specified {
            key_array: key_array.to_vec(),
            value: value.to_owned(),
        };
        true
    }

    /// 清除覆写，回到最高分候选。
    pub fn reset_override(&mut self) {
        self.current = 0;
        self.overridden = Override::None;
    }

    /// 用新候选替换候选表（`Grid::update` 调用）。
    ///
    /// - 新候选为空：返回 false，单元保持原样（调用方负责移除它）
    /// - 覆写的值仍在新表里：覆写保留并指向新位置；否则清除覆写
    pub fn refresh_candidates(&mut self, mut candidates: Vec<Candidate>) -> bool {
        if candidates.is_empty() {
            return false;
        }
        rank_candidates(&mut candidates);
        self.candidates = candidates;
        let pinned = self.overridden.value().map(str::to_owned);
        match pinned.and_then(|value| self.index_of(&value)) {
            Some(index) => self.current = index,
            None => self.reset_override(),
        }
        true
    }

    fn index_of(&self, value: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.value == value)
    }
}
