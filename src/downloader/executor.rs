use crate::error::VidError;
use crate::model::{DownloadReceipt, DownloadRequest, FALLBACK_FILE_NAME};
use crate::plugin::DownloadExecutor;
use crate::safety::{contained_path, safe_file_name};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Streams each request body to `<root>/<folder>/<filename>`. One attempt per
/// request, and existing files are never overwritten.
pub struct HttpDownloadExecutor {
    client: reqwest::Client,
    root: PathBuf,
}

impl HttpDownloadExecutor {
    pub fn new(client: reqwest::Client, root: PathBuf) -> Self {
        Self { client, root }
    }

    async fn fetch_to_file(&self, request: &DownloadRequest) -> Result<DownloadReceipt, String> {
        let dir = contained_path(&self.root, request.destination_folder.as_deref());
        let file_name =
            safe_file_name(&request.filename).unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());

        let mut response = self
            .client
            .get(&request.url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| format!("cannot create {}: {}", dir.display(), e))?;
        let (path, mut file) = create_unique(&dir, &file_name)
            .await
            .map_err(|e| format!("cannot create file in {}: {}", dir.display(), e))?;

        let mut bytes: u64 = 0;
        let streamed: Result<(), String> = async {
            while let Some(chunk) = response.chunk().await.map_err(|e| e.to_string())? {
                file.write_all(&chunk).await.map_err(|e| e.to_string())?;
                bytes += chunk.len() as u64;
            }
            file.flush().await.map_err(|e| e.to_string())
        }
        .await;

        if let Err(message) = streamed {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(message);
        }

        Ok(DownloadReceipt { path, bytes })
    }
}

#[async_trait]
impl DownloadExecutor for HttpDownloadExecutor {
    async fn submit(&self, request: &DownloadRequest) -> Result<DownloadReceipt, VidError> {
        debug!(url = %request.url, file = %request.filename, "download starting");
        self.fetch_to_file(request)
            .await
            .map_err(|message| VidError::Download {
                url: request.url.clone(),
                message,
            })
    }
}

/// `name`, `name (1)`, `name (2)`, ... with the suffix before the extension.
pub fn numbered_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &file_name[..dot], n, &file_name[dot..]),
        _ => format!("{} ({})", file_name, n),
    }
}

async fn create_unique(dir: &Path, file_name: &str) -> std::io::Result<(PathBuf, File)> {
    for n in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(numbered_name(file_name, n));
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("too many files named {}", file_name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(url: String, filename: &str, folder: Option<&str>) -> DownloadRequest {
        DownloadRequest {
            url,
            filename: filename.to_string(),
            destination_folder: folder.map(str::to_string),
        }
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("clip.mp4", 0), "clip.mp4");
        assert_eq!(numbered_name("clip.mp4", 2), "clip (2).mp4");
        assert_eq!(numbered_name("download", 1), "download (1)");
        assert_eq!(numbered_name(".hidden", 1), ".hidden (1)");
    }

    #[tokio::test]
    async fn test_submit_writes_into_folder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 2048]))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let executor = HttpDownloadExecutor::new(reqwest::Client::new(), dir.path().to_path_buf());
        let url = format!("{}/v/clip.mp4", server.uri());

        let receipt = executor
            .submit(&request(url, "clip.mp4", Some("movies")))
            .await
            .unwrap();

        assert_eq!(receipt.bytes, 2048);
        assert_eq!(receipt.path, dir.path().join("movies").join("clip.mp4"));
        assert_eq!(std::fs::read(&receipt.path).unwrap().len(), 2048);
    }

    #[tokio::test]
    async fn test_submit_never_overwrites() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("new"))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp4"), "old").unwrap();
        let executor = HttpDownloadExecutor::new(reqwest::Client::new(), dir.path().to_path_buf());

        let receipt = executor
            .submit(&request(format!("{}/clip.mp4", server.uri()), "clip.mp4", None))
            .await
            .unwrap();

        assert_eq!(receipt.path, dir.path().join("clip (1).mp4"));
        assert_eq!(std::fs::read_to_string(dir.path().join("clip.mp4")).unwrap(), "old");
    }

    #[tokio::test]
    async fn test_submit_http_error_is_download_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let executor = HttpDownloadExecutor::new(reqwest::Client::new(), dir.path().to_path_buf());
        let url = format!("{}/locked.mp4", server.uri());

        let err = executor
            .submit(&request(url.clone(), "locked.mp4", None))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            VidError::Download {
                url,
                message: "HTTP 403".into()
            }
        );
        assert!(!dir.path().join("locked.mp4").exists());
    }

    #[tokio::test]
    async fn test_submit_keeps_folder_inside_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x"))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let executor = HttpDownloadExecutor::new(reqwest::Client::new(), dir.path().to_path_buf());

        let receipt = executor
            .submit(&request(format!("{}/a.mp4", server.uri()), "../a.mp4", Some("../up")))
            .await
            .unwrap();

        assert!(receipt.path.starts_with(dir.path()));
        assert_eq!(receipt.path, dir.path().join("up").join(".._a.mp4"));
    }
}
