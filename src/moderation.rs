//! Moderation gate over a lexicon-based polarity scorer
//!
//! This is a heuristic proxy for abuse detection, not a content-safety
//! classifier. The gate flags text whose polarity falls below a fixed
//! negativity threshold; false positives and negatives are expected. The
//! scorer is deterministic, so the flag is monotone in polarity by
//! construction.

/// Words contributing positive polarity.
const POSITIVE_MARKERS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic",
    "helpful", "thanks", "thank", "love", "nice", "awesome", "perfect",
    "brilliant", "appreciate", "pleased", "happy", "glad", "kind",
];

/// Words contributing negative polarity.
const NEGATIVE_MARKERS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "useless", "worthless",
    "stupid", "idiot", "idiotic", "dumb", "hate", "hated", "garbage",
    "trash", "pathetic", "disgusting", "moron", "moronic", "loser",
    "shut", "damn", "hell", "crap", "sucks", "suck", "worst",
];

/// Emphasis cues that amplify whichever direction the text already leans.
const BOOSTERS: &[&str] = &["very", "really", "so", "extremely", "totally", "absolutely"];

/// Polarity scorer plus blocking threshold.
#[derive(Debug, Clone)]
pub struct ModerationGate {
    threshold: f32,
}

impl ModerationGate {
    /// Create a gate blocking text with polarity below `threshold`
    /// (design value: -0.5 on a [-1, 1] scale).
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Compute a polarity score in [-1, 1] for `text`.
    ///
    /// Single pass over the lowercased words: the balance of positive vs
    /// negative lexicon hits sets the direction, boosters and exclamation
    /// marks push the magnitude toward the extremes.
    pub fn polarity(&self, text: &str) -> f32 {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        let positive = words.iter().filter(|w| POSITIVE_MARKERS.contains(w)).count();
        let negative = words.iter().filter(|w| NEGATIVE_MARKERS.contains(w)).count();

        if positive + negative == 0 {
            return 0.0;
        }

        let base = (positive as f32 - negative as f32) / (positive as f32 + negative as f32);

        let boosters = words.iter().filter(|w| BOOSTERS.contains(w)).count();
        let exclamations = text.chars().filter(|c| *c == '!').count();
        let emphasis = 1.0 + ((boosters + exclamations) as f32 * 0.1).min(0.5);

        (base * emphasis).clamp(-1.0, 1.0)
    }

    /// True when the polarity of `text` falls below the negativity threshold.
    pub fn is_abusive(&self, text: &str) -> bool {
        self.polarity(text) < self.threshold
    }
}

impl Default for ModerationGate {
    fn default() -> Self {
        Self::new(-0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_scores_zero() {
        let gate = ModerationGate::default();
        assert_eq!(gate.polarity("What is the capital of France?"), 0.0);
        assert!(!gate.is_abusive("What is the capital of France?"));
    }

    #[test]
    fn hostile_text_is_flagged() {
        let gate = ModerationGate::default();
        assert!(gate.is_abusive("you are a stupid useless idiot"));
    }

    #[test]
    fn positive_text_is_never_flagged() {
        let gate = ModerationGate::default();
        assert!(gate.polarity("thanks, this was really helpful and great!") > 0.0);
        assert!(!gate.is_abusive("thanks, this was really helpful and great!"));
    }

    #[test]
    fn flag_is_monotone_in_polarity() {
        let gate = ModerationGate::default();

        let milder = "dumb stupid bad garbage but a nice try";
        let harsher = "you stupid worthless pathetic idiot, I hate this garbage!";
        let p1 = gate.polarity(harsher);
        let p2 = gate.polarity(milder);
        assert!(p1 < p2);
        assert!(p2 < -0.5);

        // Both below the threshold must be flagged; anything above never is.
        assert!(gate.is_abusive(harsher));
        assert!(gate.is_abusive(milder));
        assert!(!gate.is_abusive("this is a good day"));
    }

    #[test]
    fn scorer_is_deterministic() {
        let gate = ModerationGate::default();
        let text = "this terrible garbage really sucks!";
        assert_eq!(gate.polarity(text), gate.polarity(text));
    }

    #[test]
    fn mixed_text_balances_out() {
        let gate = ModerationGate::default();
        let p = gate.polarity("good answer but a terrible interface");
        assert!(p > -0.5 && p < 0.5);
    }
}
