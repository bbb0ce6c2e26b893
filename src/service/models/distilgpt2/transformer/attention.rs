use candle_core::{Device, Result, Tensor};
use candle_nn::ops::softmax;
use candle_nn::VarBuilder;

use super::Conv1D;

/// 因果掩码：位置 i 只能注意到不晚于 i 的位置
pub fn causal_mask(seq_len: usize, device: &Device) -> Result<Tensor> {
    let values: Vec<f32> = (0..seq_len)
        .flat_map(|i| (0..seq_len).map(move |j| if j > i { f32::NEG_INFINITY } else { 0.0 }))
        .collect();
    Tensor::from_vec(values, (seq_len, seq_len), device)
}

/// GPT-2 多头因果自注意力
///
/// Q、K、V 由单个 c_attn 投影一次算出，再按头拆分。
pub struct CausalSelfAttention {
    c_attn: Conv1D,
    c_proj: Conv1D,
    num_heads: usize,
    head_dim: usize,
}

impl CausalSelfAttention {
    pub fn new(hidden_size: usize, num_heads: usize, vb: VarBuilder) -> Result<Self> {
        if num_heads == 0 || hidden_size % num_heads != 0 {
            candle_core::bail!(
                "hidden_size {} is not divisible by num_heads {}",
                hidden_size,
                num_heads
            );
        }
        let head_dim = hidden_size / num_heads;
        let c_attn = Conv1D::load(hidden_size, 3 * hidden_size, vb.pp("c_attn"))?;
        let c_proj = Conv1D::load(hidden_size, hidden_size, vb.pp("c_proj"))?;

        Ok(Self { c_attn, c_proj, num_heads, head_dim })
    }

    /// 输入输出均为 (batch, seq, hidden)
    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, hidden) = x.dims3()?;

        let qkv = self.c_attn.forward(x)?;
        let query = qkv.narrow(2, 0, hidden)?.contiguous()?;
        let key = qkv.narrow(2, hidden, hidden)?.contiguous()?;
        let value = qkv.narrow(2, 2 * hidden, hidden)?.contiguous()?;

        // (batch, heads, seq, head_dim)
        let query = query
            .reshape((batch, seq_len, self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()?;
        let key = key
            .reshape((batch, seq_len, self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()?;
        let value = value
            .reshape((batch, seq_len, self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()?;

        // 注意力分数: Q * K^T / sqrt(d_k)
        let scores = query.matmul(&key.transpose(2, 3)?.contiguous()?)?;
        let scores = (scores / (self.head_dim as f64).sqrt())?;

        let mask = causal_mask(seq_len, x.device())?;
        let scores = scores.broadcast_add(&mask)?;
        let weights = softmax(&scores, candle_core::D::Minus1)?;

        let context = weights.matmul(&value)?;
        let context =
            context.transpose(1, 2)?.contiguous()?.reshape((batch, seq_len, hidden))?;

        self.c_proj.forward(&context)
    }
}
