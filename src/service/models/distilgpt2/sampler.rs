use crate::error::AppError;
use rand::{thread_rng, Rng};
use rust_i18n::t;
use std::cmp::Ordering;
use std::collections::HashSet;

/// 温度缩放 + top-p 截断 + 重复惩罚的采样器
///
/// 参数在构造时一次性校验，非法值（含 NaN/无穷）拒绝。
pub struct LogitsSampler {
    temperature: f32,
    top_p: f32,
    repetition_penalty: f32,
}

impl LogitsSampler {
    pub fn new(temperature: f32, top_p: f32, repetition_penalty: f32) -> Result<Self, AppError> {
        if !temperature.is_finite() || temperature <= 0.0 || temperature > 2.0 {
            return Err(AppError::InvalidParameter(
                t!("errors.validation.temperature_range").to_string(),
            ));
        }
        if !top_p.is_finite() || top_p <= 0.0 || top_p > 1.0 {
            return Err(AppError::InvalidParameter(
                t!("errors.validation.top_p_range").to_string(),
            ));
        }
        if !repetition_penalty.is_finite() || repetition_penalty < 1.0 {
            return Err(AppError::InvalidParameter(
                t!("errors.validation.repetition_penalty_range").to_string(),
            ));
        }
        Ok(Self { temperature, top_p, repetition_penalty })
    }

    /// 对已生成过的 token 压低 logit（正值除以惩罚系数，负值乘以惩罚系数）
    pub fn penalize_repeats(&self, logits: &mut [f32], history: &[u32]) {
        if self.repetition_penalty == 1.0 {
            return;
        }
        let seen: HashSet<u32> = history.iter().copied().collect();
        for token in seen {
            if let Some(logit) = logits.get_mut(token as usize) {
                if *logit > 0.0 {
                    *logit /= self.repetition_penalty;
                } else {
                    *logit *= self.repetition_penalty;
                }
            }
        }
    }

    /// 温度缩放后的 softmax 概率分布
    pub fn probabilities(&self, logits: &[f32]) -> Vec<f32> {
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> =
            logits.iter().map(|&l| ((l - max) / self.temperature).exp()).collect();
        let sum: f32 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }

    /// 从 top-p 核中按概率抽取一个 token
    pub fn sample(&self, logits: &[f32]) -> Result<u32, AppError> {
        if logits.is_empty() {
            return Err(AppError::InvalidParameter("empty logits".to_string()));
        }

        let probs = self.probabilities(logits);

        // 按概率降序取最小的累积质量不低于 top_p 的前缀
        let mut indices: Vec<usize> = (0..probs.len()).collect();
        indices.sort_unstable_by(|&a, &b| {
            probs[b].partial_cmp(&probs[a]).unwrap_or(Ordering::Equal)
        });
        let mut nucleus = Vec::new();
        let mut mass = 0.0f32;
        for &i in &indices {
            nucleus.push(i);
            mass += probs[i];
            if mass >= self.top_p {
                break;
            }
        }

        let mut rng = thread_rng();
        let threshold: f32 = rng.gen::<f32>() * mass;
        let mut cumulative = 0.0f32;
        for &i in &nucleus {
            cumulative += probs[i];
            if cumulative >= threshold {
                return Ok(i as u32);
            }
        }

        // 累积和受浮点误差影响可能略小于 threshold
        nucleus
            .last()
            .map(|&i| i as u32)
            .ok_or_else(|| AppError::Generic("empty sampling nucleus".to_string()))
    }
}
