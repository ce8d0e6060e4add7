/// Coarse classification of a backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// The provider refused the request over credits or billing.
    Billing { provider: String },
    /// Anything else.
    Other,
}

/// Recognises provider-specific failures from error text.
///
/// This is a narrow keyword heuristic for user-facing messages, not a general
/// error taxonomy.
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, provider: &str, error_text: &str) -> ErrorClass;
}

/// Keywords that mark a billing failure for one provider namespace.
#[derive(Debug, Clone)]
pub struct BillingRule {
    /// Provider prefix of the model identifier, e.g. `anthropic` in
    /// `anthropic/claude-3.5-sonnet`.
    pub provider: String,
    /// Lower-case substrings searched for in the error text.
    pub keywords: Vec<String>,
}

impl BillingRule {
    pub fn new(provider: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            provider: provider.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Keyword-based billing detection.
#[derive(Debug, Clone)]
pub struct BillingClassifier {
    rules: Vec<BillingRule>,
}

impl BillingClassifier {
    pub fn new(rules: Vec<BillingRule>) -> Self {
        Self { rules }
    }

    /// Adds a rule for another provider.
    pub fn rule(mut self, rule: BillingRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl Default for BillingClassifier {
    fn default() -> Self {
        Self::new(vec![
            BillingRule::new(
                "anthropic",
                &["credit balance", "billing", "insufficient credit"],
            ),
            BillingRule::new(
                "openrouter",
                &["insufficient credits", "payment required", "(402)"],
            ),
        ])
    }
}

impl ErrorClassifier for BillingClassifier {
    fn classify(&self, provider: &str, error_text: &str) -> ErrorClass {
        let text = error_text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.provider.eq_ignore_ascii_case(provider))
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|rule| ErrorClass::Billing {
                provider: rule.provider.clone(),
            })
            .unwrap_or(ErrorClass::Other)
    }
}

/// Classifies with the built-in billing rules.
pub fn classify_backend_error(provider: &str, error_text: &str) -> ErrorClass {
    BillingClassifier::default().classify(provider, error_text)
}

/// Provider namespace of a `provider/model-name` identifier.
pub fn provider_prefix(model: &str) -> &str {
    model.split_once('/').map(|(provider, _)| provider).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("anthropic", "Backend error (400): Your credit balance is too low", true)]
    #[case("anthropic", "BILLING issue on account", true)]
    #[case("anthropic", "Backend error (500): overloaded", false)]
    #[case("openai", "Your credit balance is too low", false)]
    #[case("openrouter", "Backend error (402): {\"error\":{}}", true)]
    #[case("", "credit balance", false)]
    fn billing_is_scoped_to_provider(
        #[case] provider: &str,
        #[case] text: &str,
        #[case] billing: bool,
    ) {
        let class = classify_backend_error(provider, text);
        assert_eq!(matches!(class, ErrorClass::Billing { .. }), billing);
    }

    #[test]
    fn custom_rules_can_be_added() {
        let classifier =
            BillingClassifier::default().rule(BillingRule::new("groq", &["Quota Exceeded"]));
        assert_eq!(
            classifier.classify("groq", "quota exceeded for org"),
            ErrorClass::Billing {
                provider: "groq".into()
            }
        );
    }

    #[test]
    fn provider_prefix_splits_on_first_slash() {
        assert_eq!(provider_prefix("anthropic/claude-3.5-sonnet"), "anthropic");
        assert_eq!(provider_prefix("openrouter/meta/llama"), "openrouter");
        assert_eq!(provider_prefix("gpt-4o"), "");
    }
}
