use ai_content_service::service::models::distilgpt2::sampler::LogitsSampler;
use approx::assert_relative_eq;

#[test]
fn test_parameter_validation() {
    // 无效温度值
    assert!(LogitsSampler::new(-1.0, 0.9, 1.2).is_err());
    assert!(LogitsSampler::new(0.0, 0.9, 1.2).is_err());
    assert!(LogitsSampler::new(2.5, 0.9, 1.2).is_err());
    assert!(LogitsSampler::new(f32::NAN, 0.9, 1.2).is_err());
    assert!(LogitsSampler::new(f32::INFINITY, 0.9, 1.2).is_err());

    // 无效top_p值
    assert!(LogitsSampler::new(0.7, 0.0, 1.2).is_err());
    assert!(LogitsSampler::new(0.7, 1.5, 1.2).is_err());
    assert!(LogitsSampler::new(0.7, f32::NAN, 1.2).is_err());

    // 无效重复惩罚值
    assert!(LogitsSampler::new(0.7, 0.9, 0.5).is_err());
    assert!(LogitsSampler::new(0.7, 0.9, f32::NAN).is_err());

    // 边界值本身合法
    assert!(LogitsSampler::new(2.0, 1.0, 1.0).is_ok());
    assert!(LogitsSampler::new(0.0001, 0.9, 1.2).is_ok());
}

#[test]
fn test_probability_distribution() {
    let sampler = LogitsSampler::new(1.0, 1.0, 1.0).unwrap();
    let logits = vec![1.0f32, 2.0, 3.0];

    let probs = sampler.probabilities(&logits);

    // 理论 softmax 概率
    let exp: Vec<f32> = logits.iter().map(|&l| l.exp()).collect();
    let sum: f32 = exp.iter().sum();
    for (actual, expected) in probs.iter().zip(exp.iter().map(|e| e / sum)) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-5);
    }

    let total: f32 = probs.iter().sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-5);
}

#[test]
fn test_low_temperature_sharpens_distribution() {
    let logits = vec![1.0f32, 2.0, 3.0];

    let cold = LogitsSampler::new(0.1, 1.0, 1.0).unwrap().probabilities(&logits);
    let warm = LogitsSampler::new(2.0, 1.0, 1.0).unwrap().probabilities(&logits);

    // 低温下最大 logit 的概率质量应该更集中
    assert!(cold[2] > warm[2]);
    assert!(cold[2] > 0.99);
}

#[test]
fn test_nucleus_excludes_low_probability_tokens() {
    // token 2 占绝对质量，top_p=0.5 时核内只剩它
    let sampler = LogitsSampler::new(1.0, 0.5, 1.0).unwrap();
    let logits = vec![0.0f32, 0.0, 10.0];

    for _ in 0..50 {
        assert_eq!(sampler.sample(&logits).unwrap(), 2);
    }
}

#[test]
fn test_repetition_penalty_arithmetic() {
    let sampler = LogitsSampler::new(1.0, 1.0, 2.0).unwrap();
    let mut logits = vec![2.0f32, -2.0, 1.0];

    // 历史中的重复 token 只惩罚一次
    sampler.penalize_repeats(&mut logits, &[0, 1, 1]);

    assert_relative_eq!(logits[0], 1.0, epsilon = 1e-6);
    assert_relative_eq!(logits[1], -4.0, epsilon = 1e-6);
    assert_relative_eq!(logits[2], 1.0, epsilon = 1e-6);
}

#[test]
fn test_neutral_repetition_penalty_is_noop() {
    let sampler = LogitsSampler::new(1.0, 1.0, 1.0).unwrap();
    let mut logits = vec![2.0f32, -2.0];

    sampler.penalize_repeats(&mut logits, &[0, 1]);

    assert_eq!(logits, vec![2.0, -2.0]);
}

#[test]
fn test_sample_rejects_empty_logits() {
    let sampler = LogitsSampler::new(0.7, 0.9, 1.2).unwrap();
    assert!(sampler.sample(&[]).is_err());
}

#[test]
fn test_history_token_out_of_vocab_is_ignored() {
    let sampler = LogitsSampler::new(1.0, 1.0, 2.0).unwrap();
    let mut logits = vec![1.0f32, 1.0];

    sampler.penalize_repeats(&mut logits, &[7]);

    assert_eq!(logits, vec![1.0, 1.0]);
}
