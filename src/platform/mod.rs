use std::{
    io::Cursor,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{error, info, warn};

/// Side effects the panel triggers on the host: playing a preview clip and
/// handing a link to the browser. Both are fire-and-forget.
pub trait Platform: Send + Sync {
    fn play_preview(&self, url: &str);
    fn open_external(&self, url: &str);
    /// Silences whatever preview is playing or still downloading.
    fn stop(&self);
}

/// Browser via `open`, previews via `rodio` on the default output device.
pub struct SystemPlatform {
    http: reqwest::Client,
    // Bumped on every new preview; a playing clip stops once it sees a newer value.
    generation: Arc<AtomicU64>,
}

impl SystemPlatform {
    pub fn new(http: reqwest::Client) -> Self {
        SystemPlatform {
            http,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Drop for SystemPlatform {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Platform for SystemPlatform {
    fn play_preview(&self, url: &str) {
        let url = url.to_string();
        let http = self.http.clone();
        let generation = self.generation.clone();
        let ticket = generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::spawn(async move {
            info!("Starting preview: {url}");
            let bytes = match fetch_audio(&http, &url).await {
                Ok(b) => b,
                Err(e) => {
                    error!("Preview download failed: {e:#}");
                    return;
                }
            };

            // rodio is blocking and its output stream is not Send
            let played = tokio::task::spawn_blocking(move || {
                play_blocking(bytes, &generation, ticket)
            })
            .await;

            match played {
                Ok(Ok(())) => info!("Preview finished"),
                Ok(Err(e)) => error!("Preview playback error: {e:#}"),
                Err(e) => error!("Preview task join error: {e}"),
            }
        });
    }

    fn open_external(&self, url: &str) {
        if url.is_empty() {
            warn!("No external link to open");
            return;
        }
        if let Err(e) = open::that(url) {
            warn!("Could not open browser: {e}");
        }
    }

    fn stop(&self) {
        // No ticket matches the bumped value, so the polling loop exits
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

async fn fetch_audio(http: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let resp = http.get(url).send().await.context("request failed")?;
    if !resp.status().is_success() {
        return Err(anyhow!("HTTP {}", resp.status()));
    }
    Ok(resp.bytes().await.context("reading body")?.to_vec())
}

fn play_blocking(bytes: Vec<u8>, generation: &AtomicU64, ticket: u64) -> Result<()> {
    let (_stream, handle) = OutputStream::try_default().context("no audio output")?;
    let sink = Sink::try_new(&handle).context("creating sink")?;
    let source = Decoder::new(Cursor::new(bytes)).context("decoding preview")?;
    sink.append(source);

    while !sink.empty() {
        if generation.load(Ordering::SeqCst) != ticket {
            sink.stop();
            break;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    Ok(())
}
