//! Translation resolver

use std::collections::HashMap;
use std::sync::Arc;

use super::TranslationCache;
use crate::api::TranslationProvider;
use crate::error::TranslationError;
use crate::models::{Language, TranslationKey, TranslationPayload, Verse};

/// Where a resolved payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSource {
    /// Plain translation authored with the verse
    Builtin,
    /// Three-part payload authored with the verse
    Authored,
    /// Earlier provider result from this session
    Cache,
    /// Fresh provider result
    Provider,
}

impl TranslationSource {
    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Builtin => "Authored translation",
            Self::Authored => "Authored commentary",
            Self::Cache | Self::Provider => "Translation by AI",
        }
    }
}

/// A payload ready to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTranslation {
    /// Verse and language this payload belongs to
    pub key: TranslationKey,
    /// The payload
    pub payload: Arc<TranslationPayload>,
    /// How it was obtained
    pub source: TranslationSource,
    /// Whether a person reviewed the translation in this language
    pub human_verified: bool,
}

/// Discard token handed out with every provider request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    key: TranslationKey,
    seq: u64,
}

impl Ticket {
    /// The verse/language pair this ticket was issued for
    pub const fn key(&self) -> &TranslationKey {
        &self.key
    }
}

/// Work for the translation provider
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Token to hand back with the outcome
    pub ticket: Ticket,
    /// Verse source text, lines joined with newlines
    pub source_text: String,
    /// Target language
    pub language: Language,
}

/// Outcome of starting a resolution
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Resolved synchronously
    Ready(ResolvedTranslation),
    /// The caller must send this request to the provider
    Dispatch(TranslationRequest),
    /// A request for this pair is already outstanding
    Waiting(TranslationKey),
}

/// Outcome of feeding a provider result back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The result is for the active pair and is now displayed
    Applied(ResolvedTranslation),
    /// The active pair failed; nothing was cached
    Failed(TranslationError),
    /// The result is for a pair that is no longer active
    Stale,
}

/// What the translation area should show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TranslationState {
    /// Nothing requested
    #[default]
    Idle,
    /// Waiting for the provider
    Translating(TranslationKey),
    /// Payload available
    Ready(ResolvedTranslation),
    /// The last attempt failed
    Failed {
        /// Pair that failed
        key: TranslationKey,
        /// Message for the user
        reason: String,
    },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: u64,
    human_verified: bool,
}

/// Resolves translations for the active (verse, language) pair
#[derive(Debug, Default)]
pub struct TranslationResolver {
    cache: TranslationCache,
    active: Option<TranslationKey>,
    in_flight: HashMap<TranslationKey, InFlight>,
    state: TranslationState,
    next_seq: u64,
}

impl TranslationResolver {
    /// Create a resolver with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display state
    pub const fn state(&self) -> &TranslationState {
        &self.state
    }

    /// The session cache
    pub const fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// The pair whose result would be displayed
    pub const fn active(&self) -> Option<&TranslationKey> {
        self.active.as_ref()
    }

    /// Whether a provider request for this pair is outstanding
    pub fn is_in_flight(&self, key: &TranslationKey) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Forget the displayed translation (the verse changed)
    ///
    /// Outstanding requests stay tracked so their results can still be
    /// cached, but none of them will be displayed unless its pair is
    /// resolved again.
    pub fn invalidate(&mut self) {
        self.active = None;
        self.state = TranslationState::Idle;
    }

    /// Clear a failure message
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, TranslationState::Failed { .. }) {
            self.state = TranslationState::Idle;
        }
    }

    /// Make (verse, language) the active pair and resolve it as far as
    /// possible without the provider
    pub fn resolve(&mut self, verse: &Verse, language: &Language) -> Resolution {
        let key = TranslationKey::new(&verse.id, &language.code);
        let human_verified = verse.is_human_verified(&language.code);
        self.active = Some(key.clone());

        if let Some(text) = verse.builtin_translation(&language.code) {
            tracing::debug!("Built-in translation for {key}");
            let payload = Arc::new(TranslationPayload::from_purport(text));
            return self.ready(key, payload, TranslationSource::Builtin, human_verified);
        }

        if let Some(authored) = verse
            .authored_payload(&language.code)
            .filter(|p| p.is_valid())
        {
            tracing::debug!("Authored payload for {key}");
            let payload = Arc::new(authored.clone().normalized());
            return self.ready(key, payload, TranslationSource::Authored, human_verified);
        }

        if let Some(payload) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {key}");
            return self.ready(key, payload, TranslationSource::Cache, human_verified);
        }

        self.state = TranslationState::Translating(key.clone());

        if self.in_flight.contains_key(&key) {
            tracing::debug!("Request for {key} already outstanding");
            return Resolution::Waiting(key);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(
            key.clone(),
            InFlight {
                seq,
                human_verified,
            },
        );
        tracing::debug!("Dispatching translation request #{seq} for {key}");

        Resolution::Dispatch(TranslationRequest {
            ticket: Ticket { key, seq },
            source_text: verse.source_text(),
            language: language.clone(),
        })
    }

    /// Feed a provider outcome back
    ///
    /// Successful payloads are cached under the ticket's own key, even when
    /// stale. Only a result for the active pair changes what is displayed.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<TranslationPayload, TranslationError>,
    ) -> Completion {
        let Some(pending) = self
            .in_flight
            .get(&ticket.key)
            .copied()
            .filter(|p| p.seq == ticket.seq)
        else {
            tracing::debug!("Ignoring unknown ticket #{} for {}", ticket.seq, ticket.key);
            return Completion::Stale;
        };
        self.in_flight.remove(&ticket.key);

        let is_active = self.active.as_ref() == Some(&ticket.key);
        let outcome = outcome.and_then(|payload| {
            let payload = payload.normalized();
            if payload.is_valid() {
                Ok(payload)
            } else {
                Err(TranslationError::Incomplete)
            }
        });

        match outcome {
            Ok(payload) => {
                let payload = Arc::new(payload);
                self.cache.insert(ticket.key.clone(), Arc::clone(&payload));

                if !is_active {
                    tracing::debug!("Discarding stale translation for {}", ticket.key);
                    return Completion::Stale;
                }

                let resolved = ResolvedTranslation {
                    key: ticket.key,
                    payload,
                    source: TranslationSource::Provider,
                    human_verified: pending.human_verified,
                };
                self.state = TranslationState::Ready(resolved.clone());
                Completion::Applied(resolved)
            }
            Err(e) => {
                tracing::warn!("Translation for {} failed: {}", ticket.key, e);
                if !is_active {
                    return Completion::Stale;
                }
                self.state = TranslationState::Failed {
                    key: ticket.key,
                    reason: e.to_string(),
                };
                Completion::Failed(e)
            }
        }
    }

    /// Resolve end to end, calling the provider if needed
    pub async fn resolve_with<P: TranslationProvider>(
        &mut self,
        provider: &P,
        verse: &Verse,
        language: &Language,
    ) -> Result<ResolvedTranslation, TranslationError> {
        let request = match self.resolve(verse, language) {
            Resolution::Ready(resolved) => return Ok(resolved),
            Resolution::Waiting(_) => return Err(TranslationError::InFlight),
            Resolution::Dispatch(request) => request,
        };

        let outcome = provider
            .translate(
                &request.source_text,
                &request.language.code,
                &request.language.name,
            )
            .await;

        match self.complete(request.ticket, outcome) {
            Completion::Applied(resolved) => Ok(resolved),
            Completion::Failed(e) => Err(e),
            Completion::Stale => Err(TranslationError::Superseded),
        }
    }

    fn ready(
        &mut self,
        key: TranslationKey,
        payload: Arc<TranslationPayload>,
        source: TranslationSource,
        human_verified: bool,
    ) -> Resolution {
        let resolved = ResolvedTranslation {
            key,
            payload,
            source,
            human_verified,
        };
        self.state = TranslationState::Ready(resolved.clone());
        Resolution::Ready(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, ScriptedProvider};

    fn french() -> Language {
        Language::new("fr", "French")
    }

    fn dispatch(resolution: Resolution) -> TranslationRequest {
        match resolution {
            Resolution::Dispatch(request) => request,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_builtin_never_calls_provider() {
        let verse = testing::verse_with_builtin();
        let provider = ScriptedProvider::answering(TranslationPayload::from_purport("ignored"));
        let mut resolver = TranslationResolver::new();

        let english = Language::new("en", "English");
        let resolved = resolver
            .resolve_with(&provider, &verse, &english)
            .await
            .unwrap();
        assert_eq!(resolved.payload.purport.as_deref(), Some("Truth is one."));
        assert_eq!(resolved.source, TranslationSource::Builtin);
        assert!(resolved.human_verified);
        assert_eq!(provider.calls(), 0);
        assert!(resolver.cache().is_empty());

        // Still built-in after the pair lands in the cache some other way
        resolver.cache.insert(
            TranslationKey::new(&verse.id, "en"),
            Arc::new(TranslationPayload::from_purport("cached")),
        );
        let again = resolver
            .resolve_with(&provider, &verse, &english)
            .await
            .unwrap();
        assert_eq!(again.source, TranslationSource::Builtin);
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_blank_builtin_falls_through() {
        let english = Language::new("en", "English");
        let mut resolver = TranslationResolver::new();

        let authored = Verse::new("v9", &["ekam sat"])
            .with_translation("en", "   ")
            .with_payload("en", TranslationPayload::from_purport("Truth is one."));
        match resolver.resolve(&authored, &english) {
            Resolution::Ready(resolved) => {
                assert_eq!(resolved.source, TranslationSource::Authored);
                assert!(resolved.payload.is_valid());
            }
            other => panic!("expected the authored payload, got {other:?}"),
        }

        let bare = Verse::new("v10", &["ekam sat"]).with_translation("en", "");
        assert!(matches!(
            resolver.resolve(&bare, &english),
            Resolution::Dispatch(_)
        ));
        assert_eq!(resolver.state(), &TranslationState::Translating(TranslationKey::new("v10", "en")));
    }

    #[tokio::test]
    async fn test_provider_result_is_cached() {
        let verse = testing::verse_without_builtin();
        let provider =
            ScriptedProvider::answering(TranslationPayload::from_purport("La vérité est une."));
        let mut resolver = TranslationResolver::new();

        let first = resolver
            .resolve_with(&provider, &verse, &french())
            .await
            .unwrap();
        assert_eq!(first.source, TranslationSource::Provider);
        assert_eq!(first.payload.purport.as_deref(), Some("La vérité est une."));

        let second = resolver
            .resolve_with(&provider, &verse, &french())
            .await
            .unwrap();
        assert_eq!(second.source, TranslationSource::Cache);
        assert!(Arc::ptr_eq(&first.payload, &second.payload));
        assert_eq!(provider.calls(), 1);
        assert_eq!(
            provider.last_request(),
            Some((verse.source_text(), "fr".to_string(), "French".to_string()))
        );
    }

    #[test]
    fn test_authored_payload_before_cache() {
        let verse = testing::verse_without_builtin().with_payload(
            "de",
            TranslationPayload {
                gloss: Some("satyam: Wahrheit".to_string()),
                phrase_analysis: Some("Die Wahrheit ist eins".to_string()),
                purport: None,
            },
        );
        let mut resolver = TranslationResolver::new();
        let Resolution::Ready(resolved) = resolver.resolve(&verse, &Language::new("de", "German"))
        else {
            panic!("expected authored payload");
        };
        assert_eq!(resolved.source, TranslationSource::Authored);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_one_outstanding_request_per_pair() {
        let verse = testing::verse_without_builtin();
        let mut resolver = TranslationResolver::new();

        let request = dispatch(resolver.resolve(&verse, &french()));
        assert!(matches!(resolver.resolve(&verse, &french()), Resolution::Waiting(_)));
        assert_eq!(
            resolver.state(),
            &TranslationState::Translating(request.ticket.key().clone())
        );

        let outcome = Ok(TranslationPayload::from_purport("La vérité est une."));
        assert!(matches!(
            resolver.complete(request.ticket, outcome),
            Completion::Applied(_)
        ));
        assert!(!resolver.is_in_flight(&TranslationKey::new(&verse.id, "fr")));
    }

    #[test]
    fn test_stale_result_is_not_rendered_for_new_verse() {
        let verse_a = testing::verse_without_builtin();
        let verse_b = Verse::new("v3", &["ekam sat"]);
        let mut resolver = TranslationResolver::new();

        let request_a = dispatch(resolver.resolve(&verse_a, &french()));
        resolver.invalidate();
        let request_b = dispatch(resolver.resolve(&verse_b, &french()));

        let late = Ok(TranslationPayload::from_purport("pour A"));
        assert_eq!(resolver.complete(request_a.ticket, late), Completion::Stale);

        // Still waiting on B, and B's cache slot is untouched
        assert_eq!(
            resolver.state(),
            &TranslationState::Translating(request_b.ticket.key().clone())
        );
        assert!(!resolver.cache().contains(request_b.ticket.key()));
        assert!(resolver.cache().contains(&TranslationKey::new(&verse_a.id, "fr")));

        let Completion::Applied(resolved) =
            resolver.complete(request_b.ticket, Ok(TranslationPayload::from_purport("pour B")))
        else {
            panic!("expected B to be applied");
        };
        assert_eq!(resolved.payload.purport.as_deref(), Some("pour B"));
    }

    #[test]
    fn test_language_change_discards_old_language() {
        let verse = testing::verse_without_builtin();
        let mut resolver = TranslationResolver::new();

        let request_fr = dispatch(resolver.resolve(&verse, &french()));
        let _request_de = dispatch(resolver.resolve(&verse, &Language::new("de", "German")));

        let outcome = Ok(TranslationPayload::from_purport("français"));
        assert_eq!(resolver.complete(request_fr.ticket, outcome), Completion::Stale);
        assert!(matches!(resolver.state(), TranslationState::Translating(k) if k.language_code == "de"));
    }

    #[test]
    fn test_failure_is_not_cached_and_can_be_retried() {
        let verse = testing::verse_without_builtin();
        let mut resolver = TranslationResolver::new();

        let request = dispatch(resolver.resolve(&verse, &french()));
        let failure = Err(TranslationError::Provider("quota exceeded".to_string()));
        assert!(matches!(
            resolver.complete(request.ticket, failure),
            Completion::Failed(TranslationError::Provider(_))
        ));
        assert!(matches!(resolver.state(), TranslationState::Failed { .. }));
        assert!(resolver.cache().is_empty());

        resolver.dismiss_error();
        assert_eq!(resolver.state(), &TranslationState::Idle);

        // Re-selecting the language issues a fresh request
        let retry = dispatch(resolver.resolve(&verse, &french()));
        assert_eq!(retry.ticket.key(), &TranslationKey::new(&verse.id, "fr"));
    }

    #[test]
    fn test_incomplete_payload_is_rejected() {
        let verse = testing::verse_without_builtin();
        let mut resolver = TranslationResolver::new();

        let request = dispatch(resolver.resolve(&verse, &french()));
        let gloss_only = Ok(TranslationPayload {
            gloss: Some("ekam: un".to_string()),
            ..TranslationPayload::default()
        });
        assert_eq!(
            resolver.complete(request.ticket, gloss_only),
            Completion::Failed(TranslationError::Incomplete)
        );
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_through_resolve_with() {
        let verse = testing::verse_without_builtin();
        let provider = ScriptedProvider::failing("network down");
        let mut resolver = TranslationResolver::new();

        let err = resolver
            .resolve_with(&provider, &verse, &french())
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::Provider("network down".to_string()));

        let _ = resolver.resolve_with(&provider, &verse, &french()).await;
        assert_eq!(provider.calls(), 2);
    }
}
