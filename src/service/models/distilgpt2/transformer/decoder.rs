use candle_core::{Module, Result, Tensor};
use candle_nn::{layer_norm, LayerNorm, VarBuilder};

use super::attention::CausalSelfAttention;
use super::feed_forward::PositionWiseFeedForward;
use crate::service::models::distilgpt2::config::ModelConfig;

/// 单个 pre-norm decoder 块：LayerNorm → 注意力 → 残差，LayerNorm → MLP → 残差
pub struct DecoderBlock {
    ln_1: LayerNorm,
    attention: CausalSelfAttention,
    ln_2: LayerNorm,
    feed_forward: PositionWiseFeedForward,
}

impl DecoderBlock {
    pub fn new(config: &ModelConfig, vb: VarBuilder) -> Result<Self> {
        let ln_1 = layer_norm(config.n_embd, config.layer_norm_epsilon, vb.pp("ln_1"))?;
        let attention = CausalSelfAttention::new(config.n_embd, config.n_head, vb.pp("attn"))?;
        let ln_2 = layer_norm(config.n_embd, config.layer_norm_epsilon, vb.pp("ln_2"))?;
        let feed_forward =
            PositionWiseFeedForward::new(config.n_embd, 4 * config.n_embd, vb.pp("mlp"))?;

        Ok(Self { ln_1, attention, ln_2, feed_forward })
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let attended = self.attention.forward(&self.ln_1.forward(x)?)?;
        let x = (x + attended)?;
        let fed = self.feed_forward.forward(&self.ln_2.forward(&x)?)?;
        x + fed
    }
}
