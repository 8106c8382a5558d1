//! `span`：某个位置上的单元容器（跨度 → 单元）。

use std::collections::BTreeMap;

use crate::unit::Unit;

/// 位置槽：以该位置开头的全部单元，每个跨度最多一个。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanSlot {
    units: BTreeMap<usize, Unit>,
}

impl SpanSlot {
    /// 放入单元（同跨度的旧单元被替换）。
    pub fn put(&mut self, unit: Unit) {
        self.units.insert(unit.span_length(), unit);
    }

    pub fn get(&self, length: usize) -> Option<&Unit> {
        self.units.get(&length)
    }

    pub(crate) fn get_mut(&mut self, length: usize) -> Option<&mut Unit> {
        self.units.get_mut(&length)
    }

    pub fn remove(&mut self, length: usize) -> Option<Unit> {
        self.units.remove(&length)
    }

    /// 已有单元的最大跨度；空槽为 0。
    pub fn max_length(&self) -> usize {
        self.units.keys().next_back().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    /// 按跨度升序遍历。
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub(crate) fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut()
    }

    /// 丢弃跨度 >= `length` 的单元。
    pub(crate) fn drop_units_of_or_beyond(&mut self, length: usize) {
        self.units.split_off(&length);
    }
}
