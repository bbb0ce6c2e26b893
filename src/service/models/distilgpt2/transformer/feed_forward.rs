use candle_core::{Result, Tensor};
use candle_nn::VarBuilder;

use super::Conv1D;

/// GPT-2 MLP：扩展到 4 倍隐层宽度，GELU 激活后投影回来
pub struct PositionWiseFeedForward {
    c_fc: Conv1D,
    c_proj: Conv1D,
}

impl PositionWiseFeedForward {
    pub fn new(hidden_size: usize, intermediate_size: usize, vb: VarBuilder) -> Result<Self> {
        let c_fc = Conv1D::load(hidden_size, intermediate_size, vb.pp("c_fc"))?;
        let c_proj = Conv1D::load(intermediate_size, hidden_size, vb.pp("c_proj"))?;
        Ok(Self { c_fc, c_proj })
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let hidden = self.c_fc.forward(x)?;
        let hidden = hidden.gelu()?;
        self.c_proj.forward(&hidden)
    }
}
