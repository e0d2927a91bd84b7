// src/quality/mod.rs
//! Signal-quality classification boundary
//!
//! The classifier itself is external: the core produces a feature vector and
//! consumes a probability distribution over the three quality classes. The
//! submit path is fire-and-forget so the frame loop never blocks on
//! inference; results are applied in arrival order and the most recently
//! received one wins regardless of which vector it was computed from,
//! accepting slight staleness over blocking.

use crate::error::PpgError;
use crate::processing::features::FeatureVector;
use async_trait::async_trait;
use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Signal-quality classes predicted by the external model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityClass {
    /// Unusable signal.
    Bad,
    /// Usable but noisy signal.
    Acceptable,
    /// Clean signal.
    Excellent,
}

/// Class order the model's output probabilities follow.
pub const QUALITY_CLASSES: [QualityClass; 3] = [
    QualityClass::Bad,
    QualityClass::Acceptable,
    QualityClass::Excellent,
];

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityClass::Bad => write!(f, "bad"),
            QualityClass::Acceptable => write!(f, "acceptable"),
            QualityClass::Excellent => write!(f, "excellent"),
        }
    }
}

/// Probability distribution over the quality classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    /// Probabilities ordered as [`QUALITY_CLASSES`].
    pub probabilities: [f32; 3],
}

impl ClassProbabilities {
    /// Highest-probability class and its probability scaled to [0, 100].
    /// Ties resolve to the first class in [`QUALITY_CLASSES`] order.
    pub fn top_class(&self) -> (QualityClass, f32) {
        let mut best = 0;
        for i in 1..self.probabilities.len() {
            if self.probabilities[i] > self.probabilities[best] {
                best = i;
            }
        }
        (QUALITY_CLASSES[best], self.probabilities[best] * 100.0)
    }
}

/// Latest signal-quality output.
///
/// `class` stays `None` until the first classification result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalQuality {
    /// Predicted class, if any result has arrived yet.
    pub class: Option<QualityClass>,
    /// Probability of the predicted class in [0, 100].
    pub confidence: f32,
}

/// External signal-quality model.
///
/// The core stays agnostic to the inference technology behind this trait;
/// it only submits feature vectors and consumes class probabilities.
#[async_trait]
pub trait QualityModel: Send + Sync {
    /// Predict class probabilities for one feature vector.
    async fn predict(&self, features: &FeatureVector) -> Result<ClassProbabilities, PpgError>;
}

/// Submits feature vectors to the model and tracks the latest result.
pub struct QualityAssessor {
    model: Arc<dyn QualityModel>,
    result_tx: Sender<Result<ClassProbabilities, PpgError>>,
    result_rx: Receiver<Result<ClassProbabilities, PpgError>>,
    latest: Arc<RwLock<SignalQuality>>,
}

impl QualityAssessor {
    /// Assessor over the given model, starting with no quality output.
    pub fn new(model: Arc<dyn QualityModel>) -> Self {
        let (result_tx, result_rx) = unbounded();
        Self {
            model,
            result_tx,
            result_rx,
            latest: Arc::new(RwLock::new(SignalQuality::default())),
        }
    }

    /// Submit a feature vector for classification without blocking.
    ///
    /// The prediction runs as a spawned task, so this must be called from
    /// within a tokio runtime. The outcome becomes visible on the next
    /// [`poll`](Self::poll).
    pub fn submit(&self, features: FeatureVector) {
        let model = Arc::clone(&self.model);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let outcome = model.predict(&features).await;
            let _ = tx.send(outcome);
        });
    }

    /// Apply every result received since the last call, most recent last,
    /// and return the current quality.
    ///
    /// A failed prediction is logged and the previous output is retained,
    /// stale but valid.
    pub fn poll(&self) -> SignalQuality {
        let mut latest = self.latest.write();
        for outcome in self.result_rx.try_iter() {
            match outcome {
                Ok(probabilities) => {
                    let (class, confidence) = probabilities.top_class();
                    *latest = SignalQuality {
                        class: Some(class),
                        confidence,
                    };
                }
                Err(error) => {
                    tracing::warn!(%error, "quality prediction failed, keeping previous result");
                }
            }
        }
        *latest
    }

    /// Latest quality without draining pending results.
    pub fn latest(&self) -> SignalQuality {
        *self.latest.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_class_picks_argmax() {
        let probabilities = ClassProbabilities {
            probabilities: [0.1, 0.2, 0.7],
        };
        let (class, confidence) = probabilities.top_class();
        assert_eq!(class, QualityClass::Excellent);
        assert!((confidence - 70.0).abs() < 1e-4);
    }

    #[test]
    fn top_class_ties_resolve_to_first() {
        let probabilities = ClassProbabilities {
            probabilities: [0.4, 0.4, 0.2],
        };
        assert_eq!(probabilities.top_class().0, QualityClass::Bad);
    }

    #[test]
    fn class_display_matches_labels() {
        assert_eq!(QualityClass::Bad.to_string(), "bad");
        assert_eq!(QualityClass::Acceptable.to_string(), "acceptable");
        assert_eq!(QualityClass::Excellent.to_string(), "excellent");
    }

    #[test]
    fn quality_starts_undetermined() {
        let quality = SignalQuality::default();
        assert_eq!(quality.class, None);
        assert_eq!(quality.confidence, 0.0);
    }
}
