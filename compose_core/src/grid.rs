//! `Grid`：读音键序列 + 每个位置的单元槽 + 光标。
//!
//! 约定：
//! - `spans.len() == keys.len()` 始终成立
//! - `spans[p]` 里跨度为 `n` 的单元，其读音键恰好是 `keys[p..p + n]`
//! - 插入/删除只重建光标附近的窗口（宽度由 `max_span_length` 决定），
//!   长串输入时每次按键的代价与总长度无关
//!
//! 克隆（`Clone`）就是“硬拷贝”：键、槽、光标都深拷贝，模型引用共享。
//! 需要试探性地改动时，先克隆再改。

use std::{ops::Range, sync::Arc};

use tracing::debug;

use crate::{
    config::{ConfigError, GridConfig, check_separator},
    model::{LanguageModel, RankedModel},
    span::SpanSlot,
    unit::Unit,
    walker::{WalkResult, Walker, pins_reachable},
};

/// 编辑方向（相对光标）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 朝向输入串末尾（光标之后）
    Front,
    /// 朝向输入串开头（光标之前）
    Rear,
}

/// 组字网格。
#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) keys: Vec<String>,
    pub(crate) spans: Vec<SpanSlot>,
    pub(crate) cursor: usize,
    pub(crate) separator: String,
    pub(crate) max_span_length: usize,
    pub(crate) model: RankedModel,
    /// 最近一次 `walk` 的结果；任何改动都会清空
    pub(crate) walked: Option<WalkResult>,
}

impl Grid {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self::build(model, GridConfig::default())
    }

    /// 按配置创建；配置先经过 `GridConfig::validate`。
    pub fn with_config(model: Arc<dyn LanguageModel>, config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(model, config))
    }

    fn build(model: Arc<dyn LanguageModel>, config: GridConfig) -> Self {
        Self {
            keys: Vec::new(),
            spans: Vec::new(),
            cursor: 0,
            separator: config.separator,
            max_span_length: config.max_span_length,
            model: RankedModel::new(model),
            walked: None,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn spans(&self) -> &[SpanSlot] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 移动光标；超出 `[0, len]` 时夹到边界。
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.keys.len());
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// 只影响 `joined_key` 的展示，不触发重建。含换行符时拒绝，原分隔符不变。
    pub fn set_separator(&mut self, separator: impl Into<String>) -> Result<(), ConfigError> {
        let separator = separator.into();
        check_separator(&separator)?;
        self.separator = separator;
        Ok(())
    }

    pub fn max_span_length(&self) -> usize {
        self.max_span_length
    }

    pub fn model(&self) -> &RankedModel {
        &self.model
    }

    /// `position` 处跨度为 `length` 的单元。
    pub fn unit_at(&self, position: usize, length: usize) -> Option<&Unit> {
        self.spans.get(position)?.get(length)
    }

    /// 在光标处插入一个读音键，光标后移一位。
    ///
    /// 空键、或模型对该单键没有候选时拒绝（返回 false，不做任何改动）。
    pub fn insert_key(&mut self, key: &str) -> bool {
        if key.is_empty() {
            debug!("拒绝插入空读音键");
            return false;
        }
        let key_array = [key.to_owned()];
        if !self.model.has_candidates(&key_array) {
            debug!(key, "读音键没有候选，拒绝插入");
            return false;
        }
        let [key] = key_array;
        self.keys.insert(self.cursor, key);
        self.spans.insert(self.cursor, SpanSlot::default());
        self.drop_wrecked_units(self.cursor);
        self.cursor += 1;
        self.update(false);
        true
    }

    /// 删除一个读音键。
    ///
    /// - `Rear`：删光标前的键（退格），光标前移；光标在 0 时失败
    /// - `Front`：删光标处的键，光标不动；光标在末尾时失败
    pub fn drop_key(&mut self, direction: Direction) -> bool {
        let index = match direction {
            Direction::Rear if self.cursor == 0 => None,
            Direction::Rear => Some(self.cursor - 1),
            Direction::Front if self.cursor == self.keys.len() => None,
            Direction::Front => Some(self.cursor),
        };
        let Some(index) = index else {
            debug!(?direction, cursor = self.cursor, "光标已在边界，无法删除");
            return false;
        };
        self.keys.remove(index);
        self.spans.remove(index);
        self.cursor = index;
        self.drop_wrecked_units(index);
        self.update(false);
        true
    }

    /// 向模型重新取数。
    ///
    /// - `update_existing = false`：只补齐光标窗口内缺失的单元
    /// - `update_existing = true`：刷新整个 grid 的现有单元（候选没了的单元被移除），并补齐缺失单元
    ///
    /// 剪掉单元后若覆写再也无法同时留在完整路径上，清除全部覆写。
    ///
    /// 不改变 `keys` 与 `cursor`。
    pub fn update(&mut self, update_existing: bool) {
        let positions = if update_existing {
            0..self.keys.len()
        } else {
            self.regeneration_window()
        };
        let (mut added, mut refreshed, mut pruned) = (0usize, 0usize, 0usize);
        for position in positions {
            let longest = self.max_span_length.min(self.keys.len() - position);
            for length in 1..=longest {
                let key_array = &self.keys[position..position + length];
                if let Some(unit) = self.spans[position].get_mut(length) {
                    if !update_existing {
                        continue;
                    }
                    if unit.refresh_candidates(self.model.candidates_for(key_array)) {
                        refreshed += 1;
                    } else {
                        self.spans[position].remove(length);
                        pruned += 1;
                    }
                    continue;
                }
                if !self.model.has_candidates(key_array) {
                    continue;
                }
                let candidates = self.model.candidates_for(key_array);
                if let Some(unit) = Unit::new(key_array.to_vec(), candidates) {
                    self.spans[position].put(unit);
                    added += 1;
                }
            }
        }
        if pruned > 0 && !pins_reachable(self) {
            self.reset_all_overrides();
        }
        self.walked = None;
        debug!(update_existing, added, refreshed, pruned, "grid 已更新");
    }

    fn reset_all_overrides(&mut self) {
        for (position, slot) in self.spans.iter_mut().enumerate() {
            for unit in slot.units_mut().filter(|u| u.is_overridden()) {
                debug!(position, span = unit.span_length(), value = unit.value(), "覆写已不在任何完整路径上，重置");
                unit.reset_override();
            }
        }
    }

    /// 清空键、槽、光标。
    pub fn clear(&mut self) {
        self.keys.clear();
        self.spans.clear();
        self.cursor = 0;
        self.walked = None;
    }

    /// 运行 walker 并缓存结果（供 `jump_cursor_by_span` 使用）。
    pub fn walk(&mut self) -> WalkResult {
        let result = Walker::walk(self);
        self.walked = Some(result.clone());
        result
    }

    /// 最近一次缓存的 walk 结果。
    pub fn walked(&self) -> Option<&WalkResult> {
        self.walked.as_ref()
    }

    /// 需要补齐单元的位置窗口：`[cursor - max_span, cursor + max_span) ∩ [0, len)`。
    fn regeneration_window(&self) -> Range<usize> {
        let lower = self.cursor.saturating_sub(self.max_span_length);
        let upper = (self.cursor + self.max_span_length).min(self.keys.len());
        lower..upper.max(lower)
    }

    /// `location` 处发生插入/删除后，丢掉跨过它的旧单元（它们的读音键已失效）。
    fn drop_wrecked_units(&mut self, location: usize) {
        let begin = location.saturating_sub(self.max_span_length - 1);
        for position in begin..location {
            self.spans[position].drop_units_of_or_beyond(location - position + 1);
        }
    }
}
