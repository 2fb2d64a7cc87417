mod lexical;
#[cfg(feature = "cross-encoder")]
mod cross_encoder;

pub use lexical::LexicalOverlapScorer;
#[cfg(feature = "cross-encoder")]
pub use cross_encoder::CrossEncoderScorer;

use std::sync::Arc;

use hybrid_core::config::RerankConfig;
use hybrid_core::traits::IRelevanceScorer;
use tracing::{info, warn};

/// Create the configured scorer. The cross-encoder falls back to lexical
/// overlap when the feature is disabled or the model fails to load.
pub fn create_scorer(config: &RerankConfig) -> Arc<dyn IRelevanceScorer> {
    match config.scorer.as_str() {
        "lexical" => {
            info!(scorer = "lexical", "using lexical overlap scorer");
            Arc::new(LexicalOverlapScorer::new())
        }
        "cross_encoder" => cross_encoder_or_fallback(config),
        other => {
            warn!(scorer = other, "unknown scorer, using lexical overlap");
            Arc::new(LexicalOverlapScorer::new())
        }
    }
}

#[cfg(feature = "cross-encoder")]
fn cross_encoder_or_fallback(config: &RerankConfig) -> Arc<dyn IRelevanceScorer> {
    match CrossEncoderScorer::new(config.batch_size) {
        Ok(scorer) => Arc::new(scorer),
        Err(e) => {
            warn!(error = %e, "cross-encoder unavailable, using lexical overlap");
            Arc::new(LexicalOverlapScorer::new())
        }
    }
}

#[cfg(not(feature = "cross-encoder"))]
fn cross_encoder_or_fallback(_config: &RerankConfig) -> Arc<dyn IRelevanceScorer> {
    warn!("built without the cross-encoder feature, using lexical overlap");
    Arc::new(LexicalOverlapScorer::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_lexical() {
        assert_eq!(create_scorer(&RerankConfig::default()).name(), "lexical");
    }

    #[test]
    fn unknown_scorer_falls_back() {
        let config = RerankConfig {
            scorer: "bogus".into(),
            ..RerankConfig::default()
        };
        assert_eq!(create_scorer(&config).name(), "lexical");
    }

    #[cfg(not(feature = "cross-encoder"))]
    #[test]
    fn cross_encoder_without_feature_falls_back() {
        let config = RerankConfig {
            scorer: "cross_encoder".into(),
            ..RerankConfig::default()
        };
        assert_eq!(create_scorer(&config).name(), "lexical");
    }
}
