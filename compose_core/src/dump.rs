//! `dump`：把 grid 输出成 Graphviz DOT 文本。
//!
//! 输出是稳定契约（测试直接比对字节）：位置升序、同位置内跨度升序；
//! 每个单元先写节点，再写指向所有“紧接其后”单元的边，与当前选择无关。

use crate::grid::Grid;

impl Grid {
    pub fn dump_graph(&self) -> String {
        let mut out = String::from("digraph {\ngraph [ rankdir=LR ];\nBOS;\n");
        for (position, slot) in self.spans.iter().enumerate() {
            for unit in slot.units() {
                let value = unit.value();
                if position == 0 {
                    out.push_str(&format!("BOS -> {value};\n"));
                }
                out.push_str(&format!("{value};\n"));
                let next = position + unit.span_length();
                if let Some(successors) = self.spans.get(next) {
                    for successor in successors.units() {
                        out.push_str(&format!("{value} -> {};\n", successor.value()));
                    }
                }
                if next == self.spans.len() {
                    out.push_str(&format!("{value} -> EOS;\n"));
                }
            }
        }
        out.push_str("EOS;\n}\n");
        out
    }
}
