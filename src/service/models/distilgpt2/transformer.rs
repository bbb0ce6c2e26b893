pub mod attention;
pub mod decoder;
pub mod feed_forward;

use candle_core::{Device, Module, Result, Tensor};
use candle_nn::{embedding, layer_norm, Embedding, LayerNorm, Linear, VarBuilder};

use self::decoder::DecoderBlock;
use super::config::ModelConfig;

/// HF GPT-2 checkpoint 中的投影权重按 Conv1D 布局存储（输入维在前）
pub struct Conv1D {
    weight: Tensor,
    bias: Tensor,
}

impl Conv1D {
    pub fn load(in_dim: usize, out_dim: usize, vb: VarBuilder) -> Result<Self> {
        let weight = vb.get((in_dim, out_dim), "weight")?;
        let bias = vb.get(out_dim, "bias")?;
        Ok(Self { weight, bias })
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        x.broadcast_matmul(&self.weight)?.broadcast_add(&self.bias)
    }
}

/// GPT-2 前向计算图
///
/// 词嵌入与 LM head 共享权重；各 DecoderBlock 为 pre-norm 结构。
pub struct Gpt2Transformer {
    wte: Embedding,
    wpe: Embedding,
    blocks: Vec<DecoderBlock>,
    ln_f: LayerNorm,
    lm_head: Linear,
    device: Device,
}

impl Gpt2Transformer {
    pub fn new(config: &ModelConfig, vb: VarBuilder) -> Result<Self> {
        let wte = embedding(config.vocab_size, config.n_embd, vb.pp("wte"))?;
        let wpe = embedding(config.n_positions, config.n_embd, vb.pp("wpe"))?;

        let mut blocks = Vec::with_capacity(config.n_layer);
        for i in 0..config.n_layer {
            blocks.push(DecoderBlock::new(config, vb.pp(format!("h.{}", i)))?);
        }

        let ln_f = layer_norm(config.n_embd, config.layer_norm_epsilon, vb.pp("ln_f"))?;
        // 权重绑定：LM head 复用词嵌入矩阵
        let lm_head = Linear::new(wte.embeddings().clone(), None);
        let device = vb.device().clone();

        Ok(Self { wte, wpe, blocks, ln_f, lm_head, device })
    }

    /// 输入 (batch, seq) 的 token id，输出 (batch, seq, vocab) 的 logits
    pub fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        let (_batch, seq_len) = input_ids.dims2()?;

        let token_embeddings = self.wte.forward(input_ids)?;
        let positions = Tensor::arange(0u32, seq_len as u32, &self.device)?;
        let position_embeddings = self.wpe.forward(&positions)?;
        let mut hidden = token_embeddings.broadcast_add(&position_embeddings)?;

        for block in &self.blocks {
            hidden = block.forward(&hidden)?;
        }

        let hidden = self.ln_f.forward(&hidden)?;
        self.lm_head.forward(&hidden)
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}
