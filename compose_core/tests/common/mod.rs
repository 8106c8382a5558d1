#![allow(dead_code)]

use std::sync::Arc;

use compose_core::{
    candidate::Candidate,
    config::GridConfig,
    grid::Grid,
    model::LanguageModel,
};
use compose_lm::MemoryModel;

pub const STRESS_DATA: &str = "
yi1 一 -2.08170692
yi1-yi1 一一 -4.38468400
";

pub const EMOJI_DATA: &str = "
gao1 高 -2.9396
re4 熱 -3.6024
gao1re4 高熱 -6.526
huo3 火 -3.6966
huo3 🔥 -8
yan4 焰 -5.4466
huo3yan4 火焰 -5.6231
huo3yan4 🔥 -8
wei2 危 -3.9832
xian3 險 -3.7810
wei2xian3 危險 -4.2623
mi4feng1 蜜蜂 -3.6231
mi4 蜜 -4.6231
feng1 蜂 -4.6231
feng1 🐝 -11
mi4feng1 🐝 -11
";

/// 词频取自 libTaBE（BSD），少数条目为补充。
pub const SAMPLE_DATA: &str = "
# key value score
ni3 你 -6.000000
zhe4 這 -6.000000
yang4 樣 -6.000000
si1 絲 -9.495858
si1 思 -9.006414
si1 私 -99.000000
si1 斯 -8.091803
si1 司 -99.000000
si1 嘶 -13.513987
si1 撕 -12.259095
gao1 高 -7.171551
ke1 顆 -10.574273
ke1 棵 -11.504072
ke1 刻 -10.450457
ke1 科 -7.171052
ke1 柯 -99.000000
gao1 膏 -11.928720
gao1 篙 -13.624335
gao1 糕 -12.390804
de5 的 -3.516024
di2 的 -3.516024
di4 的 -3.516024
zhong1 中 -5.809297
de5 得 -7.427179
gong1 共 -8.381971
gong1 供 -8.501463
ji4 既 -99.000000
jin1 今 -8.034095
gong1 紅 -8.858181
ji4 際 -7.608341
ji4 季 -99.000000
jin1 金 -7.290109
ji4 騎 -10.939895
zhong1 終 -99.000000
ji4 記 -99.000000
ji4 寄 -99.000000
jin1 斤 -99.000000
ji4 繼 -9.715317
ji4 計 -7.926683
ji4 暨 -8.373022
zhong1 鐘 -9.877580
jin1 禁 -10.711079
gong1 公 -7.877973
gong1 工 -7.822167
gong1 攻 -99.000000
gong1 功 -99.000000
gong1 宮 -99.000000
zhong1 鍾 -9.685671
ji4 繫 -10.425662
gong1 弓 -99.000000
gong1 恭 -99.000000
ji4 劑 -8.888722
ji4 祭 -10.204425
jin1 浸 -11.378321
zhong1 盅 -99.000000
ji4 忌 -99.000000
ji4 技 -8.450826
jin1 筋 -11.074890
gong1 躬 -99.000000
ji4 冀 -12.045357
zhong1 忠 -99.000000
ji4 妓 -99.000000
ji4 濟 -9.517568
ji4 薊 -12.021587
jin1 巾 -99.000000
jin1 襟 -12.784206
nian2 年 -6.086515
jiang3 講 -9.164384
jiang3 獎 -8.690941
jiang3 蔣 -10.127828
nian2 黏 -11.336864
nian2 粘 -11.285740
jiang3 槳 -12.492933
gong1si1 公司 -6.299461
ke1ji4 科技 -6.736613
ji4gong1 濟公 -13.336653
jiang3jin1 獎金 -10.344678
nian2zhong1 年終 -11.668947
nian2zhong1 年中 -11.373044
gao1ke1ji4 高科技 -9.842421
zhe4yang4 這樣 -6.000000
ni3zhe4 你這 -9.000000
ke1ke1 顆顆 -8.000000
jiao4 教 -3.676169
jiao4 較 -3.24869962
jiao4yu4 教育 -3.32220565
yu4 育 -3.30192952
";

pub const LITCHI_DATA: &str = "
nai3ji1 荔枝 -4.73
nai3ji1 奶積 -9.399
nai3 乃 -5.262
nai3 奶 -5.296
nai3 迺 -6.824
ji1 雞 -5.244
ji1 幾 -5.258
ji1 奇 -5.267
ji1 機 -5.271
ji1 擊 -5.319
ji1 積 -5.367
";

/// 解析 `key value score` 形式的测试数据；`#` 开头为注释，缺分数时记 0。
pub fn model_from(data: &str, separator: &str, swap_key_value: bool) -> Arc<MemoryModel> {
    let model = MemoryModel::with_separator(separator);
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut columns = line.split_whitespace();
        let (Some(col0), Some(col1)) = (columns.next(), columns.next()) else {
            continue;
        };
        let score = columns.next().and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0);
        let (key, value) = if swap_key_value { (col1, col0) } else { (col0, col1) };
        model.insert(key, value, score);
    }
    Arc::new(model)
}

pub fn sample_model() -> Arc<MemoryModel> {
    model_from(SAMPLE_DATA, "", false)
}

/// 任意非空读音键都有唯一候选：值是拼接后的键，分数 -1。
pub struct EchoModel;

impl LanguageModel for EchoModel {
    fn has_candidates(&self, key_array: &[String]) -> bool {
        !key_array.concat().is_empty()
    }

    fn candidates_for(&self, key_array: &[String]) -> Vec<Candidate> {
        vec![Candidate::new(key_array.concat(), -1.0)]
    }
}

/// 只认 `foo`。
pub struct FooModel;

impl LanguageModel for FooModel {
    fn has_candidates(&self, key_array: &[String]) -> bool {
        key_array.concat() == "foo"
    }

    fn candidates_for(&self, key_array: &[String]) -> Vec<Candidate> {
        if key_array.concat() == "foo" {
            vec![Candidate::new("foo", -1.0)]
        } else {
            Vec::new()
        }
    }
}

pub fn echo_grid(separator: &str) -> Grid {
    Grid::with_config(Arc::new(EchoModel), GridConfig::default().with_separator(separator)).expect("config")
}

pub fn grid_with_keys(model: Arc<dyn LanguageModel>, readings: &str) -> Grid {
    let mut grid = Grid::new(model);
    for key in readings.split_whitespace() {
        assert!(grid.insert_key(key), "插入 {key} 失败");
    }
    grid
}

pub fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// `spans[position]` 里跨度为 `length` 的单元的拼接键。
pub fn joined_key_at(grid: &Grid, position: usize, length: usize) -> Option<String> {
    grid.unit_at(position, length).map(|u| u.joined_key(grid.separator()))
}
