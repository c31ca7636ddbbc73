//! Extraction backend that writes files instead of downloading them

#![allow(dead_code)]

use async_trait::async_trait;
use std::fs::File;
use std::sync::Mutex;

use fetchbot::download::error::DownloadError;
use fetchbot::download::fetcher::{ExtractRequest, Extracted, MediaFetcher};

pub struct FakeFetcher {
    bytes: u64,
    title: Option<String>,
    failure: Option<DownloadError>,
    requests: Mutex<Vec<ExtractRequest>>,
}

impl FakeFetcher {
    /// Produces a sparse file of `bytes` bytes.
    pub fn producing(bytes: u64, title: Option<&str>) -> Self {
        Self {
            bytes,
            title: title.map(str::to_string),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every extraction after leaving a partial file behind.
    pub fn failing(err: DownloadError) -> Self {
        Self {
            bytes: 0,
            title: None,
            failure: Some(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ExtractRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for FakeFetcher {
    async fn extract(&self, request: &ExtractRequest) -> Result<Extracted, DownloadError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(err) = &self.failure {
            std::fs::write(request.output_dir.join(format!("{}.mp4.part", request.request_id)), b"partial").unwrap();
            return Err(err.clone());
        }

        let ext = if request.options.extract_audio { "mp3" } else { "mp4" };
        let path = request.output_dir.join(format!("{}.{}", request.request_id, ext));
        File::create(&path).unwrap().set_len(self.bytes).unwrap();
        Ok(Extracted {
            path,
            title: self.title.clone(),
        })
    }
}
