//! Fetching anime details from the AniDB HTTP API.

use crate::error::{ErrorKind, Result};
use crate::settings::HttpSettings;
use exn::{OptionExt, ResultExt};
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::io::Read;
use std::num::NonZeroU32;
use tracing::instrument;

/// Replies are a few kilobytes; anything past this is not an anime record.
const MAX_PAYLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Source of raw `<anime>` replies, keyed by anime ID.
pub trait Fetcher {
    /// Fetch the raw reply for one anime.
    fn fetch(&self, id: &str) -> Result<Vec<u8>>;
}

/// [`Fetcher`] backed by the AniDB HTTP API.
///
/// Blocking, and rate-limited: consecutive requests start at least
/// [`HttpSettings::cooldown_secs`] apart, the first one goes out immediately.
pub struct HttpFetcher {
    settings: HttpSettings,
    agent: ureq::Agent,
    clock: DefaultClock,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}
impl HttpFetcher {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        settings.validate()?;
        let agent = ureq::AgentBuilder::new()
            .timeout(settings.timeout())
            .user_agent(concat!("anicat/", env!("CARGO_PKG_VERSION")))
            .build();
        let quota = Quota::with_period(settings.cooldown())
            .ok_or_raise(|| ErrorKind::Settings("cooldown must be non-zero".to_string()))?
            .allow_burst(NonZeroU32::MIN);
        let clock = DefaultClock::default();
        let limiter = RateLimiter::direct_with_clock(quota, clock.clone());
        Ok(Self { settings, agent, clock, limiter })
    }

    /// Block until the limiter lets the next request through.
    fn throttle(&self) {
        while let Err(not_until) = self.limiter.check() {
            let wait = not_until.wait_time_from(self.clock.now());
            tracing::debug!(wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX), "Waiting out API cooldown");
            std::thread::sleep(wait);
        }
    }
}
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, id: &str) -> Result<Vec<u8>> {
        self.throttle();
        let response = self
            .agent
            .get(&self.settings.endpoint)
            .query("request", "anime")
            .query("client", &self.settings.client)
            .query("clientver", &self.settings.client_version.to_string())
            .query("protover", &self.settings.protocol_version.to_string())
            .query("aid", id)
            .call()
            .or_raise(|| ErrorKind::Network(id.to_string()))?;
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_PAYLOAD_BYTES)
            .read_to_end(&mut body)
            .or_raise(|| ErrorKind::Network(id.to_string()))?;
        tracing::debug!(size = body.len(), "Fetched anime details");
        Ok(body)
    }
}
