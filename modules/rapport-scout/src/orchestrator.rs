// Scrape orchestrator: walks a kind's provider chain until one yields a record.
//
// Attempts are strictly sequential. The first provider with a non-empty result
// set wins and nothing is merged across providers. When every provider misses,
// `acquire` degrades to a profile built from the URL alone.

use std::future::Future;

use tracing::{info, warn};

use rapport_common::{profile_handle, Profile, ProfileKind};

use crate::error::ScrapeError;
use crate::normalizer::{collect_tweets, normalize};
use crate::poller::RunPoller;
use crate::providers::{ProviderRegistry, ProviderSpec};

/// Why one item in a `try_in_order` chain did not produce a value.
#[derive(Debug)]
pub enum Miss<E> {
    /// The attempt succeeded but had nothing to offer.
    Empty,
    Failed(E),
}

/// Run `attempt` over `items` in order and return the first `Some`.
///
/// `Ok(None)` and `Err` both move on to the next item. If nothing hits, the
/// misses come back in attempt order.
pub async fn try_in_order<S, T, E, F, Fut>(
    items: impl IntoIterator<Item = S>,
    mut attempt: F,
) -> Result<T, Vec<Miss<E>>>
where
    F: FnMut(S) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let mut misses = Vec::new();
    for item in items {
        match attempt(item).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => misses.push(Miss::Empty),
            Err(e) => misses.push(Miss::Failed(e)),
        }
    }
    Err(misses)
}

#[derive(Clone)]
pub struct ScrapeOrchestrator {
    poller: RunPoller,
    registry: ProviderRegistry,
}

impl ScrapeOrchestrator {
    pub fn new(poller: RunPoller) -> Self {
        Self::with_registry(poller, ProviderRegistry::default())
    }

    pub fn with_registry(poller: RunPoller, registry: ProviderRegistry) -> Self {
        Self { poller, registry }
    }

    /// Acquire a profile for `url`. Never fails: provider exhaustion yields a
    /// degraded profile named after the URL's handle.
    pub async fn acquire(&self, url: &str, kind: ProfileKind) -> Profile {
        match self.scrape(url, kind).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(url, %kind, error = %e, "Returning degraded profile");
                degraded_profile(url, kind)
            }
        }
    }

    /// Like `acquire`, but surfaces `ScrapeExhausted` instead of degrading.
    pub async fn scrape(&self, url: &str, kind: ProfileKind) -> Result<Profile, ScrapeError> {
        let providers = self.registry.providers(kind);
        info!(url, %kind, providers = providers.len(), "Scraping profile");

        try_in_order(providers.iter().copied(), |spec| self.attempt(spec, url, kind))
            .await
            .map_err(|misses| ScrapeError::ScrapeExhausted {
                kind,
                attempts: misses.len(),
            })
    }

    async fn attempt(
        &self,
        spec: ProviderSpec,
        url: &str,
        kind: ProfileKind,
    ) -> Result<Option<Profile>, ScrapeError> {
        let result = self.try_provider(spec, url, kind).await;
        match &result {
            Ok(Some(_)) => info!(identity = spec.identity, "Provider returned a profile"),
            Ok(None) => info!(identity = spec.identity, "Provider returned no records, falling back"),
            Err(e) => warn!(identity = spec.identity, error = %e, "Provider failed, falling back"),
        }
        result
    }

    async fn try_provider(
        &self,
        spec: ProviderSpec,
        url: &str,
        kind: ProfileKind,
    ) -> Result<Option<Profile>, ScrapeError> {
        let input = (spec.build_input)(url)?;
        let records = self.poller.run(spec.identity, &input).await?;
        let Some(first) = records.first() else {
            return Ok(None);
        };

        let mut profile = normalize(first);
        if kind == ProfileKind::TwitterLike {
            profile.tweets = collect_tweets(&records);
            // Tweet-only records carry no author; the handle stands in.
            if profile.name.is_empty() {
                profile.name = profile_handle(url, kind).unwrap_or_default();
            }
        }
        Ok(Some(profile))
    }
}

/// Best-effort profile from the URL itself: the handle as the name.
pub fn degraded_profile(url: &str, kind: ProfileKind) -> Profile {
    Profile {
        name: profile_handle(url, kind).unwrap_or_default(),
        ..Default::default()
    }
}
