// Proxy
//
// Intent: a substitute for another object that controls access to it, for
// example to cache results or check permissions.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ProxyConfig;
use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Subject {
    fn request(&self) -> Vec<String>;
}

pub struct RealSubject;

impl Subject for RealSubject {
    fn request(&self) -> Vec<String> {
        vec!["RealSubject: Handling Request.".to_string()]
    }
}

pub struct Proxy<'a> {
    real_subject: &'a RealSubject,
}

impl<'a> Proxy<'a> {
    pub fn new(real_subject: &'a RealSubject) -> Self {
        Self { real_subject }
    }

    fn check_access(&self) -> (bool, String) {
        (
            true,
            "Proxy: Checking access prior to firing a real request.".to_string(),
        )
    }

    fn log_access(&self) -> String {
        "Proxy: Logging the time of request.".to_string()
    }
}

impl Subject for Proxy<'_> {
    fn request(&self) -> Vec<String> {
        let (allowed, check) = self.check_access();
        let mut lines = vec![check];
        if allowed {
            lines.extend(self.real_subject.request());
            lines.push(self.log_access());
        }
        lines
    }
}

pub fn client_code(subject: &dyn Subject) -> Vec<String> {
    subject.request()
}

pub fn conceptual_demo() -> Transcript {
    let real_subject = RealSubject;
    let mut out = Transcript::new();

    out.line("Client: Executing the client code with a real subject:");
    out.lines(client_code(&real_subject));
    out.blank();

    out.line("Client: Executing the same client code with a proxy:");
    out.lines(client_code(&Proxy::new(&real_subject)));
    out
}

// ============================================================================
// Real-world example: caching a slow video service
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    #[error("no video with id '{0}'")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Video {
    fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

pub trait YouTubeLib {
    fn list_videos(&mut self) -> Vec<Video>;
    fn video_info(&mut self, id: &str) -> Result<Video, VideoError>;
    fn download_video(&mut self, id: &str) -> Result<String, VideoError>;
}

/// The slow remote service. Every call counts as a network request.
#[derive(Debug, Clone)]
pub struct ThirdPartyYouTube {
    videos: Vec<Video>,
    requests: usize,
}

impl ThirdPartyYouTube {
    pub fn new() -> Self {
        Self {
            videos: vec![
                Video::new("videoId", "Funny cats", "Cats falling off sofas"),
                Video::new("dancesvid", "Dancing video", "Please like and subscribe"),
                Video::new("catzzzzzzzzz", "Cat compilation", "More cats"),
            ],
            requests: 0,
        }
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    fn connect(&mut self, what: &str) {
        self.requests += 1;
        debug!(what, requests = self.requests, "connecting to youtube");
    }

    fn find(&self, id: &str) -> Result<Video, VideoError> {
        self.videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| VideoError::NotFound(id.to_string()))
    }
}

impl Default for ThirdPartyYouTube {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeLib for ThirdPartyYouTube {
    fn list_videos(&mut self) -> Vec<Video> {
        self.connect("list");
        self.videos.clone()
    }

    fn video_info(&mut self, id: &str) -> Result<Video, VideoError> {
        self.connect("info");
        self.find(id)
    }

    fn download_video(&mut self, id: &str) -> Result<String, VideoError> {
        self.connect("download");
        let video = self.find(id)?;
        Ok(format!("Downloaded '{}'", video.title))
    }
}

/// Same interface as the service, but only forwards on a cache miss. With
/// `need_reset` every call goes through.
pub struct CachedYouTube<S> {
    service: S,
    list_cache: Option<Vec<Video>>,
    info_cache: HashMap<String, Video>,
    downloaded: HashSet<String>,
    need_reset: bool,
}

impl<S: YouTubeLib> CachedYouTube<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            list_cache: None,
            info_cache: HashMap::new(),
            downloaded: HashSet::new(),
            need_reset: false,
        }
    }

    pub fn with_need_reset(mut self, need_reset: bool) -> Self {
        self.need_reset = need_reset;
        self
    }

    pub fn reset(&mut self) {
        info!("clearing video caches");
        self.list_cache = None;
        self.info_cache.clear();
        self.downloaded.clear();
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

impl<S: YouTubeLib> YouTubeLib for CachedYouTube<S> {
    fn list_videos(&mut self) -> Vec<Video> {
        match &self.list_cache {
            Some(list) if !self.need_reset => {
                debug!("video list cache hit");
                list.clone()
            }
            _ => {
                debug!("video list cache miss");
                let list = self.service.list_videos();
                self.list_cache = Some(list.clone());
                list
            }
        }
    }

    fn video_info(&mut self, id: &str) -> Result<Video, VideoError> {
        if !self.need_reset {
            if let Some(video) = self.info_cache.get(id) {
                debug!(id, "video info cache hit");
                return Ok(video.clone());
            }
        }
        debug!(id, "video info cache miss");
        let video = self.service.video_info(id)?;
        self.info_cache.insert(id.to_string(), video.clone());
        Ok(video)
    }

    fn download_video(&mut self, id: &str) -> Result<String, VideoError> {
        if !self.need_reset && self.downloaded.contains(id) {
            debug!(id, "download already exists");
            return Ok(format!("'{}' is already downloaded", id));
        }
        let result = self.service.download_video(id)?;
        self.downloaded.insert(id.to_string());
        Ok(result)
    }
}

pub struct YouTubeManager<S> {
    service: S,
}

impl<S: YouTubeLib> YouTubeManager<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn render_video_page(&mut self, id: &str) -> Result<String, VideoError> {
        let video = self.service.video_info(id)?;
        Ok(format!("Video page: {} ({})", video.title, video.description))
    }

    pub fn render_list_panel(&mut self) -> Vec<String> {
        self.service
            .list_videos()
            .into_iter()
            .map(|v| format!("  - {}: {}", v.id, v.title))
            .collect()
    }

    pub fn react_on_user_input(&mut self) -> Result<Vec<String>, VideoError> {
        let mut lines = vec![self.render_video_page("videoId")?];
        lines.push("Video list:".to_string());
        lines.extend(self.render_list_panel());
        Ok(lines)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }
}

pub fn real_world_demo(config: &ProxyConfig) -> Result<Transcript, VideoError> {
    let proxy = CachedYouTube::new(ThirdPartyYouTube::new()).with_need_reset(config.need_reset);
    let mut manager = YouTubeManager::new(proxy);

    let mut out = Transcript::new();
    out.lines(manager.react_on_user_input()?);
    out.lines(manager.react_on_user_input()?);
    out.line(manager.service_mut().download_video("catzzzzzzzzz")?);
    out.line(manager.service_mut().download_video("catzzzzzzzzz")?);
    out.line(format!(
        "Requests that reached the service: {}",
        manager.service().service().requests()
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_wraps_real_request() {
        let real = RealSubject;
        let lines = client_code(&Proxy::new(&real));
        assert_eq!(
            lines,
            vec![
                "Proxy: Checking access prior to firing a real request.",
                "RealSubject: Handling Request.",
                "Proxy: Logging the time of request.",
            ]
        );
    }

    #[test]
    fn test_cache_forwards_only_on_miss() {
        let mut proxy = CachedYouTube::new(ThirdPartyYouTube::new());
        proxy.list_videos();
        proxy.list_videos();
        proxy.video_info("videoId").unwrap();
        proxy.video_info("videoId").unwrap();
        proxy.download_video("videoId").unwrap();
        proxy.download_video("videoId").unwrap();

        assert_eq!(proxy.service().requests(), 3);
    }

    #[test]
    fn test_need_reset_forwards_every_call() {
        let mut proxy = CachedYouTube::new(ThirdPartyYouTube::new()).with_need_reset(true);
        proxy.list_videos();
        proxy.list_videos();
        proxy.video_info("videoId").unwrap();
        proxy.video_info("videoId").unwrap();
        assert_eq!(proxy.service().requests(), 4);
    }

    #[test]
    fn test_reset_clears_caches() {
        let mut proxy = CachedYouTube::new(ThirdPartyYouTube::new());
        proxy.list_videos();
        proxy.reset();
        proxy.list_videos();
        assert_eq!(proxy.service().requests(), 2);
    }

    #[test]
    fn test_unknown_video_is_not_cached() {
        let mut proxy = CachedYouTube::new(ThirdPartyYouTube::new());
        let err = proxy.video_info("nope").unwrap_err();
        assert_eq!(err, VideoError::NotFound("nope".to_string()));
        assert!(proxy.video_info("nope").is_err());
        assert_eq!(proxy.service().requests(), 2);
    }

    #[test]
    fn test_manager_through_proxy() {
        let mut manager = YouTubeManager::new(CachedYouTube::new(ThirdPartyYouTube::new()));
        let lines = manager.react_on_user_input().unwrap();
        assert_eq!(lines[0], "Video page: Funny cats (Cats falling off sofas)");
        manager.react_on_user_input().unwrap();
        assert_eq!(manager.service().service().requests(), 2);
    }

    #[test]
    fn test_real_world_demo_counts_requests() {
        let out = real_world_demo(&ProxyConfig::default()).unwrap();
        assert!(out.contains("Requests that reached the service: 3"));
        assert!(out.contains("'catzzzzzzzzz' is already downloaded"));
    }
}
