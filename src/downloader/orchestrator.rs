// Extractor: validate -> fetch -> locate payload -> decode -> project

use scraper::Html;
use serde_json::Value;

use super::errors::ExtractError;
use super::fetcher::HttpFetcher;
use super::locators::default_locators;
use super::models::{NetworkConfig, VideoRecord};
use super::traits::{PageFetcher, PayloadLocator};
use super::utils::validate_share_link;

pub struct VideoExtractor {
    fetcher: Box<dyn PageFetcher>,
    locators: Vec<Box<dyn PayloadLocator>>,
}

impl VideoExtractor {
    /// Extractor with the HTTP fetcher and both known page conventions
    pub fn new(config: &NetworkConfig) -> Result<Self, ExtractError> {
        Ok(Self::with_fetcher(Box::new(HttpFetcher::new(config)?)))
    }

    pub fn with_fetcher(fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            locators: default_locators(),
        }
    }

    /// Replace the locator list. Locators are tried in the given order.
    pub fn with_locators(mut self, locators: Vec<Box<dyn PayloadLocator>>) -> Self {
        self.locators = locators;
        self
    }

    /// Resolve a share link into a video record.
    ///
    /// Performs exactly one request. Links that do not look like TikTok
    /// share links are rejected before any I/O.
    pub async fn get_video(&self, url: &str) -> Result<VideoRecord, ExtractError> {
        validate_share_link(url)?;

        tracing::debug!(url = %url, fetcher = self.fetcher.name(), "Fetching share link");
        let page = self.fetcher.fetch(url).await?;

        let record = self.parse_page(&page)?;
        tracing::info!(url = %url, id = ?record.id, "Extracted video data");
        Ok(record)
    }

    /// Pull the video record out of an already fetched page
    pub fn parse_page(&self, page: &str) -> Result<VideoRecord, ExtractError> {
        let document = Html::parse_document(page);

        let (locator, payload) = self
            .locators
            .iter()
            .find_map(|locator| locator.locate(&document).map(|payload| (locator, payload)))
            .ok_or_else(|| ExtractError::Extraction("could not find props".to_string()))?;

        tracing::debug!(locator = locator.name(), bytes = payload.len(), "Found embedded payload");

        let root: Value = serde_json::from_str(&payload)?;
        let video_data = root
            .pointer(locator.video_data_pointer())
            .filter(|data| data.as_object().is_some_and(|fields| !fields.is_empty()))
            .ok_or_else(|| {
                ExtractError::Extraction("returned video data is empty".to_string())
            })?;

        let record = VideoRecord::from_video_data(video_data);
        if record.is_empty() {
            return Err(ExtractError::Extraction(
                "video data has no recognised fields".to_string(),
            ));
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SHARE_LINK: &str = "https://vm.tiktok.com/ZMabc123/";

    /// Serves a fixed response and counts calls
    struct FixtureFetcher {
        response: Result<String, ExtractError>,
        calls: Arc<AtomicUsize>,
    }

    impl FixtureFetcher {
        fn page(html: &str) -> (Self, Arc<AtomicUsize>) {
            Self::respond(Ok(html.to_string()))
        }

        fn respond(response: Result<String, ExtractError>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    response,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl PageFetcher for FixtureFetcher {
        fn name(&self) -> &'static str {
            "fixture"
        }

        async fn fetch(&self, _url: &str) -> Result<String, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    /// Never matches, only records that it was consulted
    struct SpyLocator {
        calls: Arc<AtomicUsize>,
    }

    impl PayloadLocator for SpyLocator {
        fn name(&self) -> &'static str {
            "spy"
        }

        fn locate(&self, _document: &Html) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }

        fn video_data_pointer(&self) -> &'static str {
            ""
        }
    }

    fn legacy_page(payload: &str) -> String {
        format!(
            "<html><head><script>var analytics = {{}};</script></head><body>\
             <script>window.__INIT_PROPS__ = {}</script></body></html>",
            payload
        )
    }

    fn next_data_page(payload: &str) -> String {
        format!(
            "<html><body><div id=\"__next\"></div>\
             <script id=\"__NEXT_DATA__\" type=\"application/json\">{}</script></body></html>",
            payload
        )
    }

    fn extractor_for(html: &str) -> VideoExtractor {
        let (fetcher, _) = FixtureFetcher::page(html);
        VideoExtractor::with_fetcher(Box::new(fetcher))
    }

    #[tokio::test]
    async fn test_invalid_link_makes_no_request() {
        for url in ["https://youtube.com/watch?v=1", "not a link", "http://vm.tiktok.com/x"] {
            let (fetcher, calls) = FixtureFetcher::page("<html></html>");
            let extractor = VideoExtractor::with_fetcher(Box::new(fetcher));

            let result = extractor.get_video(url).await;

            assert_eq!(result, Err(ExtractError::InvalidLink(url.to_string())));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_legacy_convention() {
        let page = legacy_page(r#"{"/v/:id":{"videoData":{"id":"123","diggCount":5}}}"#);
        let (fetcher, calls) = FixtureFetcher::page(&page);
        let extractor = VideoExtractor::with_fetcher(Box::new(fetcher));

        let record = extractor.get_video(SHARE_LINK).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"id": "123", "diggCount": 5})
        );
    }

    #[tokio::test]
    async fn test_next_data_convention() {
        let page = next_data_page(r#"{"props":{"pageProps":{"videoData":{"id":"456"}}}}"#);
        let record = extractor_for(&page).get_video(SHARE_LINK).await.unwrap();

        assert_eq!(
            record,
            VideoRecord {
                id: Some("456".to_string()),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_both_conventions_prefer_next_data() {
        let page = format!(
            "<html><body>\
             <script>window.__INIT_PROPS__ = {{\"/v/:id\":{{\"videoData\":{{\"id\":\"legacy\"}}}}}}</script>\
             <script id=\"__NEXT_DATA__\">{{\"props\":{{\"pageProps\":{{\"videoData\":{{\"id\":\"next\"}}}}}}}}</script>\
             </body></html>"
        );
        let record = extractor_for(&page).get_video(SHARE_LINK).await.unwrap();
        assert_eq!(record.id.as_deref(), Some("next"));
    }

    #[tokio::test]
    async fn test_no_marker_is_extraction_error() {
        let page = "<html><body><script>console.log('nothing here')</script></body></html>";
        let result = extractor_for(page).get_video(SHARE_LINK).await;
        assert!(matches!(result, Err(ExtractError::Extraction(_))));
    }

    #[tokio::test]
    async fn test_empty_video_data_is_extraction_error() {
        let legacy = legacy_page(r#"{"/v/:id":{"videoData":{}}}"#);
        let next = next_data_page(r#"{"props":{"pageProps":{"videoData":{}}}}"#);

        for page in [legacy, next] {
            let result = extractor_for(&page).get_video(SHARE_LINK).await;
            assert_eq!(
                result,
                Err(ExtractError::Extraction("returned video data is empty".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_missing_video_data_is_extraction_error() {
        let page = next_data_page(r#"{"props":{"pageProps":{"statusCode":10216}}}"#);
        let result = extractor_for(&page).get_video(SHARE_LINK).await;
        assert!(matches!(result, Err(ExtractError::Extraction(_))));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_not_suppressed() {
        // A broken newer payload must not silently fall back to the legacy one
        let page = format!(
            "<html><body>\
             <script id=\"__NEXT_DATA__\">{{\"props\": </script>\
             <script>window.__INIT_PROPS__ = {{\"/v/:id\":{{\"videoData\":{{\"id\":\"1\"}}}}}}</script>\
             </body></html>"
        );
        let result = extractor_for(&page).get_video(SHARE_LINK).await;
        match result {
            Err(ExtractError::Extraction(msg)) => assert!(msg.contains("malformed")),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retrieval_error_skips_parsing() {
        let (fetcher, calls) =
            FixtureFetcher::respond(Err(ExtractError::Retrieval("HTTP 503 Service Unavailable".to_string())));
        let locator_calls = Arc::new(AtomicUsize::new(0));
        let locators: Vec<Box<dyn PayloadLocator>> = vec![Box::new(SpyLocator {
            calls: locator_calls.clone(),
        })];
        let extractor = VideoExtractor::with_fetcher(Box::new(fetcher)).with_locators(locators);

        let result = extractor.get_video(SHARE_LINK).await;

        assert_eq!(
            result,
            Err(ExtractError::Retrieval("HTTP 503 Service Unavailable".to_string()))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(locator_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let page = legacy_page(
            r#"{"/v/:id":{"videoData":{"itemInfos":{"id":"789","text":"hi","diggCount":"10"}}}}"#,
        );
        let (fetcher, calls) = FixtureFetcher::page(&page);
        let extractor = VideoExtractor::with_fetcher(Box::new(fetcher));

        let first = extractor.get_video(SHARE_LINK).await.unwrap();
        let second = extractor.get_video(SHARE_LINK).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.digg_count, Some(10));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_extractor_rejects_before_fetching() {
        let extractor = VideoExtractor::new(&NetworkConfig::default()).unwrap();
        let result = extractor.get_video("https://evil.example/vm.tiktok.com").await;
        assert!(matches!(result, Err(ExtractError::InvalidLink(_))));
    }

    #[test]
    fn test_unrecognised_fields_are_extraction_error() {
        let page = next_data_page(r#"{"props":{"pageProps":{"videoData":{"foo":1}}}}"#);
        let result = extractor_for(&page).parse_page(&page);
        assert!(matches!(result, Err(ExtractError::Extraction(_))));
    }
}
