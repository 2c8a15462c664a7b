use std::sync::Arc;

use crate::constants::SERVICE_VERSION;
use crate::evaluation::AnswerEvaluator;
use crate::ranking::RankingEngine;
use crate::ratelimit::SlidingWindowLimiter;
use crate::scoring::AnswerScorer;

#[derive(Clone)]
pub struct HandlerState {
    pub evaluator: Arc<AnswerEvaluator>,

    pub ranking: RankingEngine,

    pub limiter: Arc<SlidingWindowLimiter>,

    pub service_name: Arc<str>,

    pub version: &'static str,
}

impl HandlerState {
    /// Wires the evaluator and ranking engine around one shared scorer.
    pub fn new(
        scorer: Arc<dyn AnswerScorer>,
        limiter: Arc<SlidingWindowLimiter>,
        service_name: impl Into<Arc<str>>,
    ) -> Self {
        let evaluator = Arc::new(AnswerEvaluator::new(scorer));
        Self {
            ranking: RankingEngine::new(Arc::clone(&evaluator)),
            evaluator,
            limiter,
            service_name: service_name.into(),
            version: SERVICE_VERSION,
        }
    }
}
