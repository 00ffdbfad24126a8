use crate::cache::{CacheBackend, RegionCache};
use crate::error::Result;
use crate::lookup::AreaLookup;
use crate::types::AreaOrigin;
use tracing::{debug, info};

/// Cache-first region resolution on top of an [`AreaLookup`].
pub struct AreaResolver<L: AreaLookup> {
    lookup: L,
    lookups: usize,
    cache_hits: usize,
}

impl<L: AreaLookup> AreaResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            lookups: 0,
            cache_hits: 0,
        }
    }

    /// Returns the cached origin, or looks the region up once and writes the
    /// result through to `cache` before returning it.
    pub async fn resolve<B: CacheBackend>(
        &mut self,
        area_name: &str,
        cache: &mut RegionCache<B>,
    ) -> Result<AreaOrigin> {
        if let Some(origin) = cache.get(area_name) {
            debug!("Cache hit for region '{}'", area_name);
            self.cache_hits += 1;
            return Ok(origin);
        }

        info!("Looking up region '{}'", area_name);
        self.lookups += 1;
        let origin = self.lookup.lookup(area_name).await?;
        cache.insert(area_name, origin)?;

        Ok(origin)
    }

    pub fn lookups(&self) -> usize {
        self.lookups
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }
}
