// Common data models for the extractor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default user agent sent to TikTok
pub const DEFAULT_USER_AGENT: &str = "@tiktokurlbot/0.1";

/// Video fields recovered from a TikTok page
///
/// Every field is optional: which ones are present depends on the page
/// layout TikTok served. A record produced by the extractor always has at
/// least one field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Direct URL of the playable video file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Caption the uploader wrote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Upload time as unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digg_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_count: Option<u64>,
}

impl VideoRecord {
    /// Build a record from a projected `videoData` object.
    ///
    /// Accepts both the flat layout and TikTok's nested one, where item
    /// fields live under `itemInfos` and author/music under their own keys.
    pub fn from_video_data(data: &Value) -> Self {
        let item = data.get("itemInfos").unwrap_or(data);

        Self {
            id: first_string(item, &["/id"]),
            video_url: first_string(item, &["/video/urls/0", "/video/playAddr", "/src", "/playAddr"]),
            text: first_string(item, &["/text", "/desc"]),
            author: first_string(
                data,
                &["/authorInfos/uniqueId", "/author/uniqueId", "/author"],
            ),
            music: first_string(data, &["/musicInfos/musicName", "/music/title"]),
            cover_url: first_string(item, &["/covers/0", "/video/cover"]),
            create_time: first_number(item, &["/createTime"])
                .and_then(|n| i64::try_from(n).ok()),
            digg_count: first_number(item, &["/diggCount", "/stats/diggCount"]),
            comment_count: first_number(item, &["/commentCount", "/stats/commentCount"]),
            play_count: first_number(item, &["/playCount", "/stats/playCount"]),
            share_count: first_number(item, &["/shareCount", "/stats/shareCount"]),
        }
    }

    /// True when no field was recovered
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn first_string(root: &Value, pointers: &[&str]) -> Option<String> {
    pointers.iter().find_map(|p| match root.pointer(p)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn first_number(root: &Value, pointers: &[&str]) -> Option<u64> {
    pointers.iter().find_map(|p| match root.pointer(p)? {
        Value::Number(n) => n.as_u64(),
        // TikTok serialises some counters as strings
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Network configuration for the page fetcher
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Timeout in seconds
    pub timeout: Option<u32>,

    /// Value of the `user-agent` header
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: Option<u32>) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
