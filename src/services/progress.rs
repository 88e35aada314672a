use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::Body;
use std::sync::{Arc, Mutex};

/// Called with the fraction of the upload transmitted so far, in `0.0..=1.0`.
pub type ProgressCallback = Arc<dyn Fn(f32) + Send + Sync>;

pub const CHUNK_SIZE: usize = 16 * 1024;

/// Reports upload progress, never going backwards.
pub struct ProgressTracker {
    total: u64,
    last: Mutex<f32>,
    callback: ProgressCallback,
}

impl ProgressTracker {
    pub fn new(total: u64, callback: ProgressCallback) -> Self {
        Self {
            total,
            last: Mutex::new(0.0),
            callback,
        }
    }

    pub fn report(&self, sent: u64) {
        let fraction = if self.total == 0 {
            1.0
        } else {
            (sent as f64 / self.total as f64).clamp(0.0, 1.0) as f32
        };
        self.emit(fraction);
    }

    /// Report completion unless 1.0 was already reported.
    pub fn finish(&self) {
        self.emit(1.0);
    }

    fn emit(&self, fraction: f32) {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if fraction < *last || (fraction == *last && *last > 0.0) {
            return;
        }
        *last = fraction;
        (self.callback)(fraction);
    }
}

/// Wrap a payload into a chunked request body that reports each chunk as it is handed
/// to the connection.
pub fn progress_body(data: Vec<u8>, tracker: Arc<ProgressTracker>) -> Body {
    let data = Bytes::from(data);
    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(CHUNK_SIZE)
        .map(|start| data.slice(start..(start + CHUNK_SIZE).min(data.len())))
        .collect();

    let mut sent = 0u64;
    let stream = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        tracker.report(sent);
        Ok::<Bytes, std::io::Error>(chunk)
    });

    Body::wrap_stream(stream)
}
