//! Extractive question-answering pipeline trait and span selection

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Answer extracted from a context passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    /// Answer text, a substring of the context
    pub answer: String,
    /// Model confidence in `[0, 1]`
    pub score: f32,
    /// Byte offset of the answer start in the context
    pub start: usize,
    /// Byte offset one past the answer end in the context
    pub end: usize,
}

/// Trait for local extractive QA inference
///
/// Implementations run synchronously; callers move them onto a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait QaPipeline: Send + Sync {
    /// Find the answer to `question` inside `context`
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer>;

    /// Device the pipeline runs on, for logging
    fn device(&self) -> &str;
}

/// Best answer span in token positions, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

/// Softmax over the positions where `mask` is set; other positions get 0.
fn masked_softmax(logits: &[f32], mask: &[bool]) -> Vec<f32> {
    let max = logits
        .iter()
        .zip(mask)
        .filter(|&(_, &m)| m)
        .map(|(&l, _)| l)
        .fold(f32::NEG_INFINITY, f32::max);

    if max == f32::NEG_INFINITY {
        return vec![0.0; logits.len()];
    }

    let exps: Vec<f32> = logits
        .iter()
        .zip(mask)
        .map(|(&l, &m)| if m { (l - max).exp() } else { 0.0 })
        .collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

/// Pick the span maximizing `p(start) * p(end)` with `start <= end < start + max_answer_len`.
///
/// Only positions flagged in `context_mask` are candidates. Returns `None` when
/// the mask is empty or the inputs disagree in length.
pub fn best_span(
    start_logits: &[f32],
    end_logits: &[f32],
    context_mask: &[bool],
    max_answer_len: usize,
) -> Option<TokenSpan> {
    let len = context_mask.len();
    if start_logits.len() != len || end_logits.len() != len || max_answer_len == 0 {
        return None;
    }

    let p_start = masked_softmax(start_logits, context_mask);
    let p_end = masked_softmax(end_logits, context_mask);

    let mut best: Option<TokenSpan> = None;
    for start in (0..len).filter(|&i| context_mask[i]) {
        let limit = (start + max_answer_len).min(len);
        for end in (start..limit).filter(|&j| context_mask[j]) {
            let score = p_start[start] * p_end[end];
            if best.map_or(true, |b| score > b.score) {
                best = Some(TokenSpan { start, end, score });
            }
        }
    }

    best
}
