//! `navigation`：候选查询、覆写与按单元跳光标。
//!
//! 位置约定：`location` 是键之间的缝隙编号，取值 `[0, len]`；
//! 单元 `(p, n)` 覆盖键 `[p, p + n)`，起点是 `p`，终点是 `p + n`。

use tracing::debug;

use crate::{
    candidate::CandidateEntry,
    grid::{Direction, Grid},
    unit::Unit,
};

/// 候选查询的过滤方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchFilter {
    /// 覆盖 `location` 处读音键的全部单元（`location` 夹到最后一个键）
    #[default]
    All,
    /// 起点等于 `location` 的单元
    BeginAt,
    /// 终点等于 `location` 的单元
    EndAt,
}

impl Grid {
    /// 查询候选：按单元跨度降序，同一单元内按分数降序。
    ///
    /// `BeginAt(len)` 与 `EndAt(0)` 恒为空。
    pub fn fetch_candidates_at(&self, location: usize, filter: FetchFilter) -> Vec<CandidateEntry> {
        if self.keys.is_empty() || location > self.keys.len() {
            return Vec::new();
        }
        let anchors = match filter {
            FetchFilter::All => self.anchors_covering(location.min(self.keys.len() - 1)),
            FetchFilter::BeginAt => self.anchors_beginning_at(location),
            FetchFilter::EndAt => self.anchors_ending_at(location),
        };
        collect_entries(anchors)
    }

    /// 旧版查询：`EndAt` 的 `location` 指最后一个被覆盖的键（而不是终点缝隙）。
    ///
    /// 对所有 `l >= 1`：`fetch_candidates_deprecated_at(l - 1, EndAt) == fetch_candidates_at(l, EndAt)`；
    /// 其它过滤方式与新版一致。
    #[deprecated(note = "EndAt 的位置偏移了一位，请改用 `fetch_candidates_at`")]
    pub fn fetch_candidates_deprecated_at(&self, location: usize, filter: FetchFilter) -> Vec<CandidateEntry> {
        match filter {
            FetchFilter::EndAt => {
                if location >= self.keys.len() {
                    return Vec::new();
                }
                collect_entries(self.anchors_ending_at(location + 1))
            }
            _ => self.fetch_candidates_at(location, filter),
        }
    }

    /// 按值覆写 `location` 处的候选；成功后清除与之重叠的其它覆写。
    pub fn override_candidate_literal(&mut self, value: &str, location: usize) -> bool {
        self.override_with(None, value, location)
    }

    /// 按读音键 + 值覆写 `location` 处的候选；成功后清除与之重叠的其它覆写。
    pub fn override_candidate(&mut self, key_array: &[String], value: &str, location: usize) -> bool {
        self.override_with(Some(key_array), value, location)
    }

    /// 以最近一次 walk 的单元边界为锚点移动光标。
    ///
    /// 已在该方向的最后一个边界时返回 false，光标不动。
    pub fn jump_cursor_by_span(&mut self, direction: Direction) -> bool {
        let at_edge = match direction {
            Direction::Front => self.cursor == self.keys.len(),
            Direction::Rear => self.cursor == 0,
        };
        if at_edge {
            return false;
        }
        if self.walked.is_none() {
            self.walk();
        }
        let Some(walked) = &self.walked else {
            return false;
        };
        let boundaries = walked.boundaries();
        let target = match direction {
            Direction::Front => boundaries.iter().copied().find(|&b| b > self.cursor),
            Direction::Rear => boundaries.iter().rev().copied().find(|&b| b < self.cursor),
        };
        let Some(target) = target else {
            return false;
        };
        self.cursor = target;
        true
    }

    fn override_with(&mut self, key_array: Option<&[String]>, value: &str, location: usize) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        let location = location.min(self.keys.len() - 1);
        // 先找起点在 location 的单元，再找更早开始、但仍覆盖 location 的单元。
        let target = self
            .anchors_covering(location)
            .into_iter()
            .find(|(_, unit)| key_array.is_none_or(|keys| unit.key_array() == keys) && unit.has_candidate(value))
            .map(|(position, unit)| (position, unit.span_length()));
        let Some((position, length)) = target else {
            debug!(value, location, "没有可覆写的候选");
            return false;
        };
        let Some(unit) = self.spans[position].get_mut(length) else {
            return false;
        };
        let applied = match key_array {
            Some(keys) => unit.set_override_specified(keys, value),
            None => unit.set_override_literal(value),
        };
        if !applied {
            return false;
        }
        self.reset_overlapping_overrides(position, length);
        self.walked = None;
        true
    }

    /// 清除与 `[position, position + length)` 重叠的其它覆写。
    fn reset_overlapping_overrides(&mut self, position: usize, length: usize) {
        let end = position + length;
        let begin = position.saturating_sub(self.max_span_length - 1);
        for start in begin..end.min(self.spans.len()) {
            for unit in self.spans[start].units_mut() {
                let span = unit.span_length();
                if (start, span) == (position, length) || !unit.is_overridden() {
                    continue;
                }
                if start < end && position < start + span {
                    debug!(start, span, value = unit.value(), "覆写区间重叠，重置旧覆写");
                    unit.reset_override();
                }
            }
        }
    }

    /// 覆盖 `location` 处键的单元：先是起点在 `location` 的（跨度升序），
    /// 再是更早开始的（起点升序、跨度升序）。
    fn anchors_covering(&self, location: usize) -> Vec<(usize, &Unit)> {
        let mut anchors = self.anchors_beginning_at(location);
        let begin = location.saturating_sub(self.max_span_length - 1);
        for position in begin..location {
            anchors.extend(
                self.spans[position]
                    .units()
                    .filter(|unit| position + unit.span_length() > location)
                    .map(|unit| (position, unit)),
            );
        }
        anchors
    }

    fn anchors_beginning_at(&self, location: usize) -> Vec<(usize, &Unit)> {
        match self.spans.get(location) {
            Some(slot) => slot.units().map(|unit| (location, unit)).collect(),
            None => Vec::new(),
        }
    }

    fn anchors_ending_at(&self, location: usize) -> Vec<(usize, &Unit)> {
        if location == 0 || location > self.spans.len() {
            return Vec::new();
        }
        let begin = location.saturating_sub(self.max_span_length);
        (begin..location)
            .filter_map(|position| Some((position, self.spans[position].get(location - position)?)))
            .collect()
    }
}

/// 跨度降序（稳定排序，保留锚点顺序），展开每个单元的候选。
fn collect_entries(mut anchors: Vec<(usize, &Unit)>) -> Vec<CandidateEntry> {
    anchors.sort_by(|a, b| b.1.span_length().cmp(&a.1.span_length()));
    anchors
        .into_iter()
        .flat_map(|(_, unit)| {
            unit.candidates().iter().map(move |c| CandidateEntry {
                key_array: unit.key_array().to_vec(),
                value: c.value.clone(),
                score: c.score,
            })
        })
        .collect()
}
