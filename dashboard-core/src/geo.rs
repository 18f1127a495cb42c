use std::sync::Arc;

use crate::{Location, provider::Geocoder};

/// Turns a place name into a `Location`, or nothing.
///
/// Every failure collapses to `None` so the caller keeps its last good
/// location: no match, blank input, and transport or service errors alike.
/// Errors are logged, never raised.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl GeoResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, query: &str) -> Option<Location> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        match self.geocoder.search(query).await {
            Ok(Some(location)) => {
                tracing::info!(
                    query,
                    name = %location.display_name,
                    lat = location.latitude,
                    lon = location.longitude,
                    "location resolved"
                );
                Some(location)
            }
            Ok(None) => {
                tracing::info!(query, "no location matched");
                None
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "location search error");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeocodeError;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct ScriptedGeocoder {
        reply: Option<Result<Option<Location>, GeocodeError>>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Geocoder for ScriptedGeocoder {
        async fn search(&self, query: &str) -> Result<Option<Location>, GeocodeError> {
            self.queries.lock().push(query.to_string());
            self.reply.clone().unwrap_or(Ok(None))
        }
    }

    fn resolver(reply: Result<Option<Location>, GeocodeError>) -> (GeoResolver, Arc<ScriptedGeocoder>) {
        let geocoder = Arc::new(ScriptedGeocoder { reply: Some(reply), ..Default::default() });
        (GeoResolver::new(geocoder.clone()), geocoder)
    }

    #[tokio::test]
    async fn match_is_returned() {
        let paris = Location::new(48.85, 2.35, "Paris");
        let (resolver, _) = resolver(Ok(Some(paris.clone())));
        assert_eq!(resolver.resolve("Paris").await, Some(paris));
    }

    #[tokio::test]
    async fn service_error_is_swallowed() {
        let (resolver, _) = resolver(Err(GeocodeError::Transport("connection refused".into())));
        assert_eq!(resolver.resolve("Paris").await, None);
    }

    #[tokio::test]
    async fn blank_query_skips_the_service() {
        let (resolver, geocoder) = resolver(Ok(None));
        assert_eq!(resolver.resolve("   ").await, None);
        assert!(geocoder.queries.lock().is_empty());
    }

    #[tokio::test]
    async fn query_is_trimmed() {
        let (resolver, geocoder) = resolver(Ok(None));
        resolver.resolve("  Oslo ").await;
        assert_eq!(geocoder.queries.lock().as_slice(), ["Oslo".to_string()]);
    }
}
