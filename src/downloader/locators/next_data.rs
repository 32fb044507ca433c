// Locator for the Next.js __NEXT_DATA__ hydration script

use scraper::{Html, Selector};

use crate::downloader::traits::PayloadLocator;

const ELEMENT_ID: &str = "__NEXT_DATA__";

/// Next.js hydration data: `<script id="__NEXT_DATA__">{...}</script>`
pub struct NextDataLocator;

impl PayloadLocator for NextDataLocator {
    fn name(&self) -> &'static str {
        "next_data"
    }

    fn locate(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("script").ok()?;
        document
            .select(&selector)
            .find(|script| script.value().id() == Some(ELEMENT_ID))
            .map(|script| script.text().collect::<String>())
    }

    fn video_data_pointer(&self) -> &'static str {
        "/props/pageProps/videoData"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_script_by_id() {
        let page = Html::parse_document(
            r#"<html><head>
            <script>var x = 1;</script>
            <script id="__NEXT_DATA__" type="application/json">{"props":{}}</script>
            </head></html>"#,
        );
        assert_eq!(NextDataLocator.locate(&page).as_deref(), Some(r#"{"props":{}}"#));
    }

    #[test]
    fn test_absent_marker() {
        let page = Html::parse_document("<html><script>window.foo = 1</script></html>");
        assert_eq!(NextDataLocator.locate(&page), None);
    }
}
