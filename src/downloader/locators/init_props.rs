// Locator for the legacy window.__INIT_PROPS__ global

use scraper::{Html, Selector};

use crate::downloader::traits::PayloadLocator;

const GLOBAL_PREFIX: &str = "window.__INIT_PROPS__";

/// Legacy global assignment: `<script>window.__INIT_PROPS__ = {...}</script>`
pub struct InitPropsLocator;

impl InitPropsLocator {
    /// Strip the assignment around the JSON object
    fn strip_assignment(text: &str) -> Option<&str> {
        let rest = text.trim_start().strip_prefix(GLOBAL_PREFIX)?;
        let rest = rest.trim_start().strip_prefix('=')?;
        let rest = rest.trim();
        Some(rest.strip_suffix(';').unwrap_or(rest).trim_end())
    }
}

impl PayloadLocator for InitPropsLocator {
    fn name(&self) -> &'static str {
        "init_props"
    }

    fn locate(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("script").ok()?;
        document.select(&selector).find_map(|script| {
            let text: String = script.text().collect();
            if !text.trim_start().starts_with(GLOBAL_PREFIX) {
                return None;
            }
            Self::strip_assignment(&text).map(str::to_string)
        })
    }

    // "/v/:id" is a single key; `/` is escaped as `~1` in JSON pointers
    fn video_data_pointer(&self) -> &'static str {
        "/~1v~1:id/videoData"
    }
}
