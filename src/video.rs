use serde::Deserialize;

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, Deserialize)]
pub struct TrailerVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideosResponse {
    pub results: Vec<TrailerVideo>,
}

/// First official YouTube trailer in response order.
pub fn select_trailer(videos: &[TrailerVideo]) -> Option<&TrailerVideo> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer" && v.official)
}

pub fn youtube_url(key: &str) -> String {
    format!("{}{}", YOUTUBE_WATCH_URL, key)
}
