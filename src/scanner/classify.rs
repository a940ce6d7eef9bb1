use crate::model::{ScanResult, SizeStatus, VideoDescriptor, VideoId, FALLBACK_FILE_NAME};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "mov", "avi", "flv"];

// Only a trailing `.ext` right before `?`, `#` or the end counts. Types that
// show up only in a query value or a Content-Type header are not detected.
fn extension_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.([a-z0-9]+)(?:[?#]|$)").expect("valid regex"))
}

fn is_video_extension(ext: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// Turns raw candidate URLs into the deduplicated, typed list of videos.
///
/// Candidates are resolved against `base`, normalized, and kept in first-seen
/// order. Malformed candidates are dropped without error. The output depends
/// only on the inputs, so classifying the same page twice gives equal results.
pub fn classify<S: AsRef<str>>(candidates: &[S], base: &Url, generation: u64) -> ScanResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut videos = Vec::new();

    for raw in candidates {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            continue;
        }

        let Some(normalized) = normalize(raw, base) else {
            debug!(candidate = raw, "skipping malformed candidate");
            continue;
        };

        if seen.contains(normalized.as_str()) {
            continue;
        }

        let Some(extension) = extract_extension(normalized.as_str()) else {
            continue;
        };
        if !is_video_extension(&extension) {
            continue;
        }

        seen.insert(normalized.to_string());
        videos.push(VideoDescriptor {
            id: VideoId::new(generation, videos.len()),
            file_name: derive_file_name(&normalized),
            url: normalized.into(),
            extension,
            size: SizeStatus::Loading,
        });
    }

    ScanResult {
        generation,
        page_url: base.to_string(),
        videos,
    }
}

fn normalize(raw: &str, base: &Url) -> Option<Url> {
    let absolute = base.join(raw).ok()?;
    if !matches!(absolute.scheme(), "http" | "https") {
        return None;
    }
    Url::parse(absolute.as_str()).ok()
}

/// Lowercased extension of the first `.ext` that ends the path part, if any.
pub fn extract_extension(url: &str) -> Option<String> {
    extension_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Text after the last `/` of the whole URL, cut at the first `?` and then `#`.
/// A `/` inside the query therefore moves the name into the query value.
fn derive_file_name(url: &Url) -> String {
    let full = url.as_str();
    let tail = full.rsplit_once('/').map_or(full, |(_, tail)| tail);
    let name = tail.split('?').next().unwrap_or_default();
    let name = name.split('#').next().unwrap_or_default();
    if name.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://x.com/a/").unwrap()
    }

    #[test]
    fn test_classify_resolves_relative_urls() {
        let input = ["/a/video.mp4", "https://x.com/b/video.mp4", "video.mp4?x=1#y"];
        let result = classify(&input, &base(), 1);

        let urls: Vec<&str> = result.videos.iter().map(|v| v.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://x.com/a/video.mp4",
                "https://x.com/b/video.mp4",
                "https://x.com/a/video.mp4?x=1#y",
            ]
        );
        for video in &result.videos {
            assert_eq!(video.extension, "mp4");
            assert_eq!(video.file_name, "video.mp4");
        }
    }

    #[test]
    fn test_classify_dedupes_on_normalized_url() {
        let input = [
            "clip.webm",
            "/a/clip.webm",
            "https://X.COM/a/./clip.webm",
            "https://x.com:443/a/clip.webm",
        ];
        let result = classify(&input, &base(), 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.videos[0].url, "https://x.com/a/clip.webm");
    }

    #[test]
    fn test_classify_extension_case_insensitive() {
        let input = ["/MOVIE.MP4", "/trailer.Mkv"];
        let result = classify(&input, &base(), 1);
        let exts: Vec<&str> = result.videos.iter().map(|v| v.extension.as_str()).collect();
        assert_eq!(exts, vec!["mp4", "mkv"]);
        assert_eq!(result.videos[0].file_name, "MOVIE.MP4");
    }

    #[test]
    fn test_classify_rejects_non_video_extensions() {
        let input = ["/a.mp4x", "/b.jpg", "/c.html", "/d", "/e.mp3"];
        let result = classify(&input, &base(), 1);
        assert!(result.is_empty());
    }

    #[test]
    fn test_classify_skips_malformed_and_empty() {
        let input = ["", "   ", "http://[::1", "https://exa mple.com/v.mp4", "/ok.avi"];
        let result = classify(&input, &base(), 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.videos[0].extension, "avi");
    }

    #[test]
    fn test_classify_ignores_non_http_schemes() {
        let input = ["javascript:play('a.mp4')", "mailto:me@x.mp4", "data:video/mp4,abc.mp4"];
        let result = classify(&input, &base(), 1);
        assert!(result.is_empty());
    }

    #[test]
    fn test_classify_query_only_extension() {
        let input = ["https://x.com/watch?file=video.mp4&t=3"];
        let result = classify(&input, &base(), 1);
        assert!(result.is_empty());

        let at_end = ["https://x.com/get?file=video.flv"];
        let result = classify(&at_end, &base(), 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.videos[0].file_name, "get");
    }

    #[test]
    fn test_classify_file_name_placeholder() {
        let input = ["https://x.com/videos/.mov"];
        let result = classify(&input, &base(), 1);
        assert_eq!(result.videos[0].file_name, ".mov");

        let trailing = ["https://x.com/stream/#part.webm"];
        let result = classify(&trailing, &base(), 1);
        assert_eq!(result.videos[0].file_name, FALLBACK_FILE_NAME);
    }

    #[test]
    fn test_classify_file_name_after_last_slash_in_query() {
        let input = ["https://x.com/dl?path=/media/clip.mp4"];
        let result = classify(&input, &base(), 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.videos[0].file_name, "clip.mp4");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let input = ["/x.mp4", "y.mkv", "/x.mp4", "z.webm#t=10", "bad.txt"];
        let first = classify(&input, &base(), 4);
        let second = classify(&input, &base(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_assigns_sequential_ids() {
        let input = ["/1.mp4", "/skip.png", "/2.mov", "/3.flv"];
        let result = classify(&input, &base(), 9);
        let ids: Vec<String> = result.videos.iter().map(|v| v.id.to_string()).collect();
        assert_eq!(ids, vec!["video-9-0", "video-9-1", "video-9-2"]);
    }

    #[test]
    fn test_extract_extension_first_terminal_match() {
        assert_eq!(extract_extension("https://x.com/v.mp4?name=a.mkv"), Some("mp4".into()));
        assert_eq!(extract_extension("https://x.com/v.MOV#t=1"), Some("mov".into()));
        assert_eq!(extract_extension("https://x.com/dir/"), None);
    }
}
