/// 候选：模型给出的一个文本值与它的分数。
///
/// 注意：`score` 类似对数似然，**越大越靠前**，通常 ≤ 0，不设上下界。
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// 候选文本（上屏文本）
    pub value: String,
    /// 分数，由模型决定
    pub score: f64,
}

impl Candidate {
    pub fn new(value: impl Into<String>, score: f64) -> Self {
        Self {
            value: value.into(),
            score,
        }
    }
}

/// `Grid::fetch_candidates_at` 的结果项：候选 + 所在单元的读音键。
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEntry {
    /// 候选所在单元覆盖的读音键（长度即单元跨度）
    pub key_array: Vec<String>,
    pub value: String,
    pub score: f64,
}

impl CandidateEntry {
    pub fn span_length(&self) -> usize {
        self.key_array.len()
    }
}
