use crate::score::ScoreSet;

/// Produces scores for a result whose judge call failed.
pub trait FallbackScorer: Send + Sync {
    fn score(&self, model: &str, prompt: &str) -> ScoreSet;
}

impl<F> FallbackScorer for F
where
    F: Fn(&str, &str) -> ScoreSet + Send + Sync,
{
    fn score(&self, model: &str, prompt: &str) -> ScoreSet {
        self(model, prompt)
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic pseudo-scores in `[4, 9]` per dimension, seeded by a stable
/// hash of the model identifier and prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashFallback;

impl HashFallback {
    fn seed(model: &str, prompt: &str) -> u64 {
        model
            .bytes()
            .chain(std::iter::once(0u8))
            .chain(prompt.bytes())
            .fold(FNV_OFFSET, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            })
    }
}

impl FallbackScorer for HashFallback {
    fn score(&self, model: &str, prompt: &str) -> ScoreSet {
        let seed = Self::seed(model, prompt);
        let pick = |shift: u32| 4 + ((seed >> shift) & 0xff) as u8 % 6;
        ScoreSet::new(pick(0), pick(8), pick(16), pick(24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Dimension;

    #[test]
    fn hash_fallback_is_stable() {
        let a = HashFallback.score("openai/gpt-4o-mini", "Write about rain.");
        let b = HashFallback.score("openai/gpt-4o-mini", "Write about rain.");
        assert_eq!(a, b);
    }

    #[test]
    fn hash_fallback_stays_in_range() {
        for model in ["a", "b", "openai/gpt-4.1-mini", "anthropic/claude-3.5-sonnet"] {
            let scores = HashFallback.score(model, "prompt");
            for dimension in Dimension::ALL {
                assert!((4..=9).contains(&scores.get(dimension)));
            }
        }
    }

    #[test]
    fn model_and_prompt_boundary_matters() {
        assert_ne!(HashFallback::seed("ab", "c"), HashFallback::seed("a", "bc"));
    }

    #[test]
    fn closures_are_scorers() {
        let zero = |_: &str, _: &str| ScoreSet::zero();
        assert_eq!(zero.score("m", "p"), ScoreSet::zero());
    }
}
