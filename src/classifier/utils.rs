/// Converts raw logits into a probability distribution.
///
/// The maximum logit is subtracted before exponentiation so large
/// magnitudes cannot overflow to infinity.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_sum: f32 = logits.iter().map(|&x| (x - max_logit).exp()).sum();
    logits
        .iter()
        .map(|&x| (x - max_logit).exp() / exp_sum)
        .collect()
}

/// Index of the largest value. Ties resolve to the lowest index.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &value) in values.iter().enumerate() {
        let replace = match best {
            Some((_, current)) => value > current,
            None => true,
        };
        if replace {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}
