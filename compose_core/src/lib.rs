//! `compose_core`：读音组字的纯逻辑层，不做任何 I/O。
//!
//! 分层（由下到上）：
//! - `candidate`：候选（值 + 分数）
//! - `model`：模型能力抽象 + 排序适配器
//! - `unit` / `span`：候选单元与位置槽
//! - `grid`：读音键序列、增量重建、光标
//! - `walker`：最优分段路径
//! - `navigation` / `dump`：候选查询、覆写、跳光标、DOT 输出
//!
//! 日志走 `tracing`，库本身不安装 subscriber。
pub mod candidate;
pub mod config;
pub mod dump;
pub mod grid;
pub mod model;
pub mod navigation;
pub mod span;
pub mod unit;
pub mod walker;
