//! Counterparty extraction from transaction narrations.
//!
//! An ordered chain of strategies is tried until one produces a usable
//! name; each strategy carries a fixed confidence so callers can rank
//! how much to trust the result. Results are cached per narration
//! prefix because statements repeat the same narration shapes hundreds
//! of times.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::transaction::Source;

use super::patterns::{
    AMOUNT_SHAPED, BUSINESS_SUFFIX, DOCUMENT_NOISE_WORDS, DOCUMENT_SKIP_WORDS,
    FALLBACK_SKIP_WORDS, KNOWN_MERCHANTS, NON_NAME_CHARS, PREPOSITIONAL_PARTY,
    STRUCTURED_PARTY, UPI_HANDLE,
};

/// Confidence for a known-merchant brand match.
pub const CONFIDENCE_MERCHANT: f64 = 0.95;
/// Confidence for a UPI virtual-payment-address handle.
pub const CONFIDENCE_UPI_HANDLE: f64 = 0.85;
/// Confidence for a structured transfer reference (`UPI/CR/<ref>/<name>`).
pub const CONFIDENCE_STRUCTURED: f64 = 0.85;
/// Confidence for a `TO/FROM/BY <name>` match.
pub const CONFIDENCE_PREPOSITIONAL: f64 = 0.70;
/// Confidence when only generic narration tokens are left.
pub const CONFIDENCE_FALLBACK: f64 = 0.40;
/// Confidence when no strategy produced a name.
pub const CONFIDENCE_NONE: f64 = 0.10;

/// Cache keys are the first 80 characters of the narration.
pub const CACHE_KEY_LEN: usize = 80;

/// Cleaned names shorter than this are rejected as noise.
pub const MIN_PARTY_LEN: usize = 2;

type PartyResult = (Option<String>, f64);

/// Counterparty extractor with a per-instance result cache.
///
/// The cache serializes check-then-insert under one lock so that
/// concurrent callers sharing an instance observe a single canonical
/// result per distinct narration.
pub struct PartyExtractor {
    source: Source,
    cache: Mutex<HashMap<String, PartyResult>>,
}

impl PartyExtractor {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Extract `(party, confidence)` from a normalized narration.
    ///
    /// Strategies run in fixed order, first hit wins. An empty narration
    /// yields `(None, 0.0)` and is never cached.
    pub fn extract(&self, narration: &str) -> PartyResult {
        if narration.is_empty() {
            return (None, 0.0);
        }

        let key: String = narration.chars().take(CACHE_KEY_LEN).collect();

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = cache.get(&key) {
            return hit.clone();
        }

        let result = self.run_strategies(narration);
        cache.insert(key, result.clone());
        result
    }

    /// Drop all cached results.
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn run_strategies(&self, narration: &str) -> PartyResult {
        let strategies: [fn(&Self, &str) -> Option<(String, f64)>; 5] = [
            Self::known_merchant,
            Self::upi_handle,
            Self::structured_reference,
            Self::prepositional,
            Self::fallback_tokens,
        ];

        for strategy in strategies {
            if let Some((party, confidence)) = strategy(self, narration) {
                return (Some(party), confidence);
            }
        }

        (None, CONFIDENCE_NONE)
    }

    /// Word-boundary match against the fixed brand table; yields the
    /// canonical brand name, not the matched text.
    fn known_merchant(&self, narration: &str) -> Option<(String, f64)> {
        for (pattern, brand) in KNOWN_MERCHANTS.iter() {
            if pattern.is_match(narration) {
                return Some((brand.to_string(), CONFIDENCE_MERCHANT));
            }
        }
        None
    }

    fn upi_handle(&self, narration: &str) -> Option<(String, f64)> {
        UPI_HANDLE
            .captures(narration)
            .map(|caps| (caps[1].to_string(), CONFIDENCE_UPI_HANDLE))
    }

    /// Structured `UPI/CR/...`-style references only occur in free-text
    /// statements; tabular narrations skip this strategy.
    fn structured_reference(&self, narration: &str) -> Option<(String, f64)> {
        if self.source != Source::Pdf {
            return None;
        }

        for pattern in STRUCTURED_PARTY.iter() {
            if let Some(caps) = pattern.captures(narration) {
                if let Some(party) = self.clean(&caps[1]) {
                    return Some((party, CONFIDENCE_STRUCTURED));
                }
            }
        }
        None
    }

    fn prepositional(&self, narration: &str) -> Option<(String, f64)> {
        let caps = PREPOSITIONAL_PARTY.captures(narration)?;
        let party = self.clean(&caps[1])?;
        Some((party, CONFIDENCE_PREPOSITIONAL))
    }

    /// Last resort: join the first few meaningful narration tokens.
    fn fallback_tokens(&self, narration: &str) -> Option<(String, f64)> {
        let take = match self.source {
            Source::Excel => 3,
            Source::Pdf => 4,
        };

        let tokens: Vec<&str> = narration
            .split_whitespace()
            .map(|w| w.trim_matches(|c| matches!(c, '.' | ',' | '-' | '/')))
            .filter(|w| self.is_usable_token(w))
            .take(take)
            .collect();

        if tokens.is_empty() {
            return None;
        }

        let party = self.clean(&tokens.join(" "))?;
        Some((party, CONFIDENCE_FALLBACK))
    }

    fn is_usable_token(&self, token: &str) -> bool {
        if token.chars().count() <= 3 {
            return false;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if AMOUNT_SHAPED.is_match(token) {
            return false;
        }
        if FALLBACK_SKIP_WORDS.contains(&token) {
            return false;
        }
        if self.source == Source::Pdf && DOCUMENT_SKIP_WORDS.contains(&token) {
            return false;
        }
        true
    }

    /// Clean a captured name and enforce the minimum usable length.
    /// Free-text captures are additionally scrubbed of transaction-code
    /// and branch-location words that leak into the name position.
    fn clean(&self, raw: &str) -> Option<String> {
        let without_digits: String = raw.chars().filter(|c| !c.is_ascii_digit()).collect();

        let scrubbed = if self.source == Source::Pdf {
            DOCUMENT_NOISE_WORDS
                .replace_all(&without_digits, " ")
                .into_owned()
        } else {
            without_digits
        };

        let cleaned = clean_party_name(&scrubbed);
        if cleaned.chars().count() >= MIN_PARTY_LEN {
            Some(cleaned)
        } else {
            None
        }
    }
}

/// Clean an extracted party name: drop digits, configured business
/// suffixes and leftover punctuation, then collapse whitespace.
pub fn clean_party_name(name: &str) -> String {
    let without_digits: String = name.chars().filter(|c| !c.is_ascii_digit()).collect();
    let without_suffix = BUSINESS_SUFFIX.replace_all(&without_digits, " ");
    let without_punct = NON_NAME_CHARS.replace_all(&without_suffix, " ");
    without_punct.split_whitespace().collect::<Vec<_>>().join(" ")
}
