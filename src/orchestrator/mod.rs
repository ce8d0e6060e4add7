//! Drives a benchmark: generate with every candidate, judge each output,
//! rank the results.

mod classify;
mod fallback;
mod retry;

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{ChatBackend, HttpBackend};
use crate::config::{BenchConfig, BenchSettings};
use crate::error::BenchError;
use crate::invoker::ModelInvoker;
use crate::judge::normalize_text;
use crate::result::BenchmarkResult;

pub use classify::{
    classify_backend_error, provider_prefix, BillingClassifier, BillingRule, ErrorClass,
    ErrorClassifier,
};
pub use fallback::{FallbackScorer, HashFallback};
pub use retry::RetryPolicy;

/// Runs candidate models one after another against a single judge.
///
/// Per-model failures never abort a run: a failed generation becomes a
/// zero-scored entry explaining the failure, and a failed judgement falls back
/// to the configured [`FallbackScorer`]. Only input validation errors escape
/// [`BenchmarkOrchestrator::run`].
pub struct BenchmarkOrchestrator {
    invoker: ModelInvoker,
    default_judge: String,
    retry: RetryPolicy,
    fallback: Box<dyn FallbackScorer>,
    classifier: Box<dyn ErrorClassifier>,
}

impl BenchmarkOrchestrator {
    /// Creates an orchestrator around an invoker, judging with `default_judge`
    /// unless a run names another judge.
    pub fn new(invoker: ModelInvoker, default_judge: impl Into<String>) -> Self {
        Self {
            invoker,
            default_judge: default_judge.into(),
            retry: RetryPolicy::default(),
            fallback: Box::new(HashFallback),
            classifier: Box::new(BillingClassifier::default()),
        }
    }

    /// Builds the HTTP backend and orchestrator from process configuration.
    ///
    /// Fails with [`BenchError::Configuration`] when the backend endpoint or
    /// credential is missing.
    pub fn from_config(config: &BenchConfig) -> Result<Self, BenchError> {
        let settings = config.backend_settings()?;
        let backend = HttpBackend::new(&settings)?;
        Ok(Self::with_backend(Arc::new(backend), &config.bench))
    }

    /// Builds an orchestrator over any backend using benchmark settings.
    pub fn with_backend(backend: Arc<dyn ChatBackend>, settings: &BenchSettings) -> Self {
        let invoker = ModelInvoker::new(backend)
            .temperature(settings.generation_temperature)
            .deadline(settings.call_timeout_seconds.map(Duration::from_secs));
        Self::new(invoker, settings.judge_model.clone()).retry(settings.retry.clone())
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Replaces the scorer used when judging fails.
    pub fn fallback<F>(mut self, scorer: F) -> Self
    where
        F: FallbackScorer + 'static,
    {
        self.fallback = Box::new(scorer);
        self
    }

    /// Replaces the provider-specific error classifier.
    pub fn classifier<C>(mut self, classifier: C) -> Self
    where
        C: ErrorClassifier + 'static,
    {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn default_judge(&self) -> &str {
        &self.default_judge
    }

    /// Benchmarks `models` on `prompt` with the default judge.
    pub async fn run_benchmark<S: AsRef<str>>(
        &self,
        models: &[S],
        prompt: &str,
    ) -> Result<Vec<BenchmarkResult>, BenchError> {
        self.run(prompt, models, None).await
    }

    /// Benchmarks every candidate in `models` on `prompt`.
    ///
    /// Candidates are processed strictly in sequence. The returned list holds
    /// exactly one entry per candidate, sorted by total score descending; ties
    /// keep the candidate order.
    pub async fn run<S: AsRef<str>>(
        &self,
        prompt: &str,
        models: &[S],
        judge_model: Option<&str>,
    ) -> Result<Vec<BenchmarkResult>, BenchError> {
        let judge = judge_model.unwrap_or(&self.default_judge);
        validate(prompt, models, judge)?;

        log::info!(
            "benchmarking {} model(s) with judge {}",
            models.len(),
            judge
        );

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(self.run_one(model.as_ref(), prompt, judge).await);
        }

        results.sort_by(|a, b| b.total().cmp(&a.total()));
        Ok(results)
    }

    async fn run_one(&self, model: &str, prompt: &str, judge: &str) -> BenchmarkResult {
        let generation = match self
            .retry
            .run(model, || self.invoker.generate(model, prompt))
            .await
        {
            Ok(generation) => generation,
            Err(err) => {
                log::warn!("generation failed for {model}: {err}");
                return BenchmarkResult::failed(model, self.failure_message(model, &err));
            }
        };

        let judged = self
            .retry
            .run(judge, || self.invoker.judge(judge, prompt, &generation.output))
            .await
            .and_then(|raw| normalize_text(&raw));

        match judged {
            Ok(scores) => {
                log::debug!("{model} scored {} by {judge}", scores.total());
                BenchmarkResult::judged(generation, scores)
            }
            Err(err) => {
                log::warn!("judging {model} with {judge} failed, using fallback scores: {err}");
                let scores = self.fallback.score(model, prompt);
                BenchmarkResult::fallback(generation, scores)
            }
        }
    }

    fn failure_message(&self, model: &str, err: &BenchError) -> String {
        match self
            .classifier
            .classify(provider_prefix(model), &err.to_string())
        {
            ErrorClass::Billing { provider } => format!(
                "{model} was not run: the {provider} account used by the backend has \
                 insufficient credits or a billing problem. Add credits or deselect this model."
            ),
            ErrorClass::Other => format!("Generation failed for {model}: {err}"),
        }
    }
}

fn validate<S: AsRef<str>>(prompt: &str, models: &[S], judge: &str) -> Result<(), BenchError> {
    if prompt.trim().is_empty() {
        return Err(BenchError::Validation("Prompt is empty".to_string()));
    }
    if models.is_empty() {
        return Err(BenchError::Validation(
            "At least one candidate model is required".to_string(),
        ));
    }
    if models.iter().any(|m| m.as_ref().trim().is_empty()) {
        return Err(BenchError::Validation(
            "Candidate model identifiers must not be empty".to_string(),
        ));
    }
    if judge.trim().is_empty() {
        return Err(BenchError::Validation("Judge model is empty".to_string()));
    }
    Ok(())
}
