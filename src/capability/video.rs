//! YouTube metadata and caption providers.

use crate::error::{GranskeError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Metadata for a single video.
#[derive(Debug, Clone, Default)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

/// Trait for video metadata/caption providers.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Fetch video metadata by id.
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata>;

    /// Fetch the caption text for a video. An empty string means no
    /// transcript is available in any supported language.
    async fn fetch_captions(&self, video_id: &str) -> Result<String>;
}

/// Extract a video id from a YouTube URL.
///
/// Supports `...watch?v=ID` and `youtu.be/ID` short links. Returns `None`
/// for anything else.
pub fn extract_video_id(url: &str) -> Option<String> {
    static PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        regex::Regex::new(r"(?:[?&]v=|youtu\.be/)([A-Za-z0-9_-]+)").expect("Invalid regex")
    });

    pattern
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// YouTube Data API v3 client with caption fetching via the timedtext
/// endpoint.
pub struct YoutubeDataApi {
    client: reqwest::Client,
    api_key: Option<String>,
    /// Caption languages to try, in order.
    languages: Vec<String>,
}

impl YoutubeDataApi {
    /// Create a client from the `YOUTUBE_API_KEY` environment variable.
    ///
    /// A missing key is not an error here: metadata degrades to a
    /// placeholder and the failure is surfaced in the capability result.
    pub fn from_env() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: std::env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty()),
            languages: vec!["ko".to_string(), "en".to_string()],
        }
    }
}

fn count_field(stats: &Value, key: &str) -> u64 {
    stats[key].as_str().and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[async_trait]
impl VideoProvider for YoutubeDataApi {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let Some(api_key) = &self.api_key else {
            // Degraded metadata rather than a hard failure.
            return Ok(VideoMetadata {
                title: format!("Video {} (metadata unavailable: YOUTUBE_API_KEY not set)", video_id),
                ..VideoMetadata::default()
            });
        };

        let url = format!(
            "https://www.googleapis.com/youtube/v3/videos?part=snippet,statistics&id={}&key={}",
            video_id, api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GranskeError::VideoSource(format!(
                "YouTube Data API returned status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let item = body["items"]
            .get(0)
            .ok_or_else(|| GranskeError::VideoSource(format!("video {} not found", video_id)))?;
        let snippet = &item["snippet"];
        let stats = &item["statistics"];

        Ok(VideoMetadata {
            title: snippet["title"].as_str().unwrap_or("Unknown Title").to_string(),
            channel: snippet["channelTitle"].as_str().unwrap_or("").to_string(),
            published_at: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
            view_count: count_field(stats, "viewCount"),
            like_count: count_field(stats, "likeCount"),
            comment_count: count_field(stats, "commentCount"),
        })
    }

    async fn fetch_captions(&self, video_id: &str) -> Result<String> {
        for lang in &self.languages {
            let url = format!(
                "https://www.youtube.com/api/timedtext?v={}&lang={}&fmt=json3",
                video_id, lang
            );
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                continue;
            }
            let text = response.text().await?;
            if text.trim().is_empty() {
                continue;
            }
            let Ok(body) = serde_json::from_str::<Value>(&text) else {
                continue;
            };
            let lines: Vec<String> = body["events"]
                .as_array()
                .map(|events| {
                    events
                        .iter()
                        .filter_map(|event| event["segs"].as_array())
                        .map(|segs| {
                            segs.iter()
                                .filter_map(|seg| seg["utf8"].as_str())
                                .collect::<String>()
                        })
                        .filter(|line| !line.trim().is_empty())
                        .collect()
                })
                .unwrap_or_default();

            let transcript = lines.join("\n");
            if !transcript.trim().is_empty() {
                return Ok(transcript);
            }
        }
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123&t=42s"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_short_link() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/abc123?si=xyz"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_invalid() {
        assert_eq!(extract_video_id("https://example.com/video"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
