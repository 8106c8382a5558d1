//! `walker`：在 grid 上求总分最高的分段路径。
//!
//! 把 grid 看成一张隐式 DAG：节点是 `(位置, 跨度)` 上的单元，外加 BOS/EOS 两个哨兵；
//! 单元 A（覆盖 `[p, p + lenA)`）连向所有起点为 `p + lenA` 的单元，进入单元的边权就是它的生效分数。
//! 边只朝前走，所以按位置升序松弛一遍就是最短路（取负分）的解，代价 `O(len × max_span)`。
//!
//! 平分时的约定：位置升序、同位置内跨度升序松弛，只有**严格更高**的分数才替换已有前驱。
//!
//! 被覆写的单元是硬约束：与它重叠的其它单元不参与松弛，路径必然经过它。

use tracing::{trace, warn};

use crate::{grid::Grid, unit::Unit};

/// 一次 walk 的结果：按位置排列、恰好铺满 `[0, len)` 的单元序列。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkResult {
    units: Vec<Unit>,
    total_score: f64,
}

impl WalkResult {
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// 每个单元的生效候选值。
    pub fn values(&self) -> Vec<&str> {
        self.units.iter().map(Unit::value).collect()
    }

    /// 每个单元的读音键（用 `separator` 拼接）。
    pub fn joined_keys(&self, separator: &str) -> Vec<String> {
        self.units.iter().map(|u| u.joined_key(separator)).collect()
    }

    /// 单元之间的边界位置，含 0 与总长度。
    pub fn boundaries(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.units.len() + 1);
        let mut position = 0;
        out.push(position);
        for unit in &self.units {
            position += unit.span_length();
            out.push(position);
        }
        out
    }

}

impl<'a> IntoIterator for &'a WalkResult {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

/// 无状态的最优路径算法。
pub struct Walker;

impl Walker {
    /// 求最优分段；不修改 grid。
    ///
    /// 覆写约束下走不通时退回无约束求解；仍走不通（例如 `update` 删掉了某个单字单元）返回空结果。
    pub fn walk(grid: &Grid) -> WalkResult {
        if grid.is_empty() {
            return WalkResult::default();
        }
        let pins = pinned_cover(grid);
        if let Some(result) = relax(grid, Some(&pins)) {
            return result;
        }
        if pins.iter().any(Option::is_some) {
            warn!("覆写约束下没有完整路径，忽略覆写重新求解");
            if let Some(result) = relax(grid, None) {
                return result;
            }
        }
        warn!(len = grid.len(), "grid 中存在空洞，无法铺满");
        WalkResult::default()
    }
}

/// 当前的覆写能否同时留在一条完整路径上。
pub(crate) fn pins_reachable(grid: &Grid) -> bool {
    grid.is_empty() || relax(grid, Some(&pinned_cover(grid))).is_some()
}

/// 每个位置被哪个覆写单元 `(起点, 跨度)` 覆盖。
fn pinned_cover(grid: &Grid) -> Vec<Option<(usize, usize)>> {
    let mut cover = vec![None; grid.len()];
    for (position, slot) in grid.spans().iter().enumerate() {
        for unit in slot.units().filter(|u| u.is_overridden()) {
            let length = unit.span_length();
            for covered in &mut cover[position..position + length] {
                *covered = Some((position, length));
            }
        }
    }
    cover
}

fn eligible(pins: Option<&[Option<(usize, usize)>]>, position: usize, length: usize) -> bool {
    let Some(pins) = pins else {
        return true;
    };
    pins[position..position + length]
        .iter()
        .all(|pin| pin.is_none_or(|pin| pin == (position, length)))
}

fn relax(grid: &Grid, pins: Option<&[Option<(usize, usize)>]>) -> Option<WalkResult> {
    let n = grid.len();
    let mut best: Vec<Option<f64>> = vec![None; n + 1];
    let mut prev: Vec<Option<(usize, usize)>> = vec![None; n + 1];
    best[0] = Some(0.0);
    let mut visited = 0usize;

    for position in 0..n {
        let Some(base) = best[position] else { continue };
        for unit in grid.spans()[position].units() {
            let length = unit.span_length();
            if !eligible(pins, position, length) {
                continue;
            }
            visited += 1;
            let end = position + length;
            let score = base + unit.score();
            if best[end].is_none_or(|known| score > known) {
                best[end] = Some(score);
                prev[end] = Some((position, length));
            }
        }
    }

    let total_score = best[n]?;

    // 回溯
    let mut units = Vec::new();
    let mut cur = n;
    while cur > 0 {
        let (position, length) = prev[cur]?;
        units.push(grid.unit_at(position, length)?.clone());
        cur = position;
    }
    units.reverse();
    trace!(visited, path = units.len(), total_score, "walk 完成");
    Some(WalkResult { units, total_score })
}
