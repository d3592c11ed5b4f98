//! Upload lifecycle controller.
//!
//! One controller drives the whole widget. Each acquired file runs through
//! reset → local preview → submission → result rendering (or failure):
//!
//! ```text
//! Idle ──acquire──▶ Previewing ──▶ Submitting ──▶ Displaying
//!   ▲                                   │
//!   │                                   └───────▶ Failed
//!   └──────────────── reset (from any phase) ◀──────┘
//! ```
//!
//! Methods take `&self` and never hold a borrow across an `.await`, so the
//! shell can keep the controller in an `Rc` and start a new acquisition while
//! an earlier submission is still in flight. Nothing cancels the earlier
//! request; its result is rendered when it arrives.

use std::cell::Cell;
use std::convert::Infallible;
use std::time::Duration;

use futures::future::{self, Either};
use web_time::Instant;

use crate::config::UploadConfig;
use crate::constants::text;
use crate::error::UploadError;
use crate::host::{SelectedFile, UploadBackend, UploadView};
use crate::media::MediaKind;
use crate::notice::{NoticeFactory, Severity};
use crate::object_url::ObjectUrlSlot;
use crate::progress::ProgressSimulator;
use crate::response::{AnalysisResult, UploadResponse};
use crate::summary::ResultSummary;

#[cfg(test)]
mod tests;

/// Lifecycle phase of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No file, or the last file was rejected
    #[default]
    Idle,
    /// Local preview is being produced
    Previewing,
    /// Request in flight
    Submitting,
    /// Result rendered
    Displaying,
    /// Server or transport failure reported
    Failed,
}

/// Coordinates preview, upload and result rendering for one file at a time.
pub struct UploadController<V, B> {
    config: UploadConfig,
    view: V,
    backend: B,
    phase: Cell<Phase>,
    /// Object URL backing the video preview
    preview_url: ObjectUrlSlot,
    notices: NoticeFactory,
}

impl<V, B> UploadController<V, B>
where
    V: UploadView,
    B: UploadBackend,
{
    pub fn new(config: UploadConfig, view: V, backend: B) -> Self {
        let notices = NoticeFactory::new(Duration::from_millis(config.notification_ttl_ms));
        Self {
            config,
            view,
            backend,
            phase: Cell::new(Phase::Idle),
            preview_url: ObjectUrlSlot::new(),
            notices,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether an object URL is currently held for the video preview.
    pub fn holds_preview_url(&self) -> bool {
        self.preview_url.is_held()
    }

    /// Run the full lifecycle for the first of `files`.
    ///
    /// An empty selection does nothing. Any previous session is reset first.
    pub async fn acquire_file<I>(&self, files: I)
    where
        I: IntoIterator<Item = B::File>,
    {
        let Some(file) = files.into_iter().next() else {
            log::debug!("📂 Empty selection ignored");
            return;
        };

        self.reset();

        let name = file.name();
        let mime = file.mime_type();
        let kind = match MediaKind::require(&mime, &name) {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("📂 {}", e);
                self.notify(text::UNSUPPORTED_INPUT, Severity::Error);
                return;
            }
        };

        log::info!(
            "📂 Selected '{}' ({}, {} bytes) as {}",
            name,
            mime,
            file.size(),
            kind.name()
        );

        self.render_local_preview(&file, kind).await;

        match kind {
            MediaKind::Image => self.submit(&file).await,
            MediaKind::Video => {
                futures::join!(self.autoplay_preview(), self.submit(&file));
            }
        }
    }

    /// Return the widget to its initial state.
    ///
    /// Idempotent. Releases the held object URL, if any.
    pub fn reset(&self) {
        self.view.clear_file_input();

        self.view.set_image_preview(None);
        self.view.set_video_preview(None);
        if let Some(url) = self.preview_url.take() {
            log::debug!("Revoking preview URL {}", url.as_str());
            self.backend.revoke_object_url(url);
        }

        self.view.clear_result_media();

        self.view.set_drop_zone_visible(true);
        self.view.set_preview_area_visible(false);
        self.view.set_result_area_visible(false);

        self.view.set_progress_visible(false);
        self.view.set_progress(0);

        self.view.render_metadata(&[]);
        self.view.render_detections(&[]);

        self.phase.set(Phase::Idle);
    }

    /// Show the file locally before any network traffic.
    ///
    /// Failures only produce a notice; the upload goes ahead regardless.
    pub async fn render_local_preview(&self, file: &B::File, kind: MediaKind) {
        self.phase.set(Phase::Previewing);

        match kind {
            MediaKind::Image => match self.backend.read_data_url(file).await {
                Ok(data_url) => {
                    self.view.set_image_preview(Some(&data_url));
                    self.show_preview_area();
                }
                Err(e) => {
                    log::warn!("Image preview failed: {}", e);
                    self.notify(text::IMAGE_PREVIEW_FAILED, Severity::Warning);
                }
            },
            MediaKind::Video => match self.backend.create_object_url(file) {
                Ok(url) => {
                    let src = url.as_str().to_string();
                    if let Some(previous) = self.preview_url.replace(url) {
                        self.backend.revoke_object_url(previous);
                    }
                    self.view.set_video_preview(Some(&src));
                    self.show_preview_area();
                }
                Err(e) => {
                    log::warn!("Video preview failed: {}", e);
                    self.notify(text::VIDEO_FORMAT_WARNING, Severity::Warning);
                }
            },
        }
    }

    fn show_preview_area(&self) {
        self.view.set_preview_area_visible(true);
        self.view.set_drop_zone_visible(false);
    }

    async fn autoplay_preview(&self) {
        if !self.preview_url.is_held() {
            return;
        }
        if let Err(e) = self.backend.play_video_preview().await {
            log::info!("Video preview playback failed: {}", e);
            self.notify(text::AUTOPLAY_FAILED, Severity::Info);
        }
    }

    /// The video preview element reported a decode error.
    pub fn on_preview_error(&self) {
        if !self.preview_url.is_held() {
            log::debug!("Preview error without an active video preview ignored");
            return;
        }
        log::warn!("Browser cannot decode the video preview");
        self.notify(text::VIDEO_FORMAT_WARNING, Severity::Warning);
    }

    /// Dragged content entered the drop zone.
    pub fn drag_enter(&self) {
        self.view.set_drop_zone_highlight(true);
    }

    /// Dragged content left the drop zone or was dropped.
    pub fn drag_leave(&self) {
        self.view.set_drop_zone_highlight(false);
    }

    /// Upload the file and render whatever comes back.
    ///
    /// The drop zone's loading indicator is cleared on every path.
    pub async fn submit(&self, file: &B::File) {
        self.phase.set(Phase::Submitting);
        self.view.set_progress(0);
        self.view.set_progress_visible(true);
        self.view.set_drop_zone_loading(true);

        let url = self.config.upload_url();
        let started = Instant::now();
        log::info!("⬆️ Uploading '{}' to {}", file.name(), url);

        let mut progress = ProgressSimulator::new(&self.config.progress);
        let body = {
            let request = self
                .backend
                .post_file(&url, &self.config.upload_field, file);
            let ticker = self.simulate_progress(&mut progress);
            futures::pin_mut!(request, ticker);
            match future::select(request, ticker).await {
                Either::Left((body, _)) => body,
                Either::Right((never, _)) => match never {},
            }
        };

        let result = body
            .and_then(|body| UploadResponse::from_json(&body))
            .and_then(UploadResponse::into_result);

        let fade_out = match result {
            Ok(analysis) => {
                log::info!(
                    "✅ {} analysis received after {:?}",
                    analysis.kind().name(),
                    started.elapsed()
                );
                self.view.set_progress(progress.complete());
                self.show_result(&analysis);
                true
            }
            Err(UploadError::ServerRejected { message }) => {
                log::error!("Server rejected upload: {}", message);
                self.view.set_progress(progress.complete());
                let message = if message.is_empty() {
                    text::UNKNOWN_SERVER_ERROR.to_string()
                } else {
                    message
                };
                self.notify(
                    format!("{}{}", text::SERVER_ERROR_PREFIX, message),
                    Severity::Error,
                );
                self.phase.set(Phase::Failed);
                true
            }
            Err(e) => {
                log::error!("Upload failed after {:?}: {}", started.elapsed(), e);
                self.view.set_progress_visible(false);
                self.notify(text::UPLOAD_FAILED, Severity::Error);
                self.phase.set(Phase::Failed);
                false
            }
        };

        self.view.set_drop_zone_loading(false);

        if fade_out {
            self.backend
                .sleep(Duration::from_millis(self.config.progress.fade_out_ms))
                .await;
            self.view.set_progress_visible(false);
        }
    }

    /// Advance the progress bar on every tick. Never finishes; the caller
    /// drops it once the response is in.
    async fn simulate_progress(&self, progress: &mut ProgressSimulator) -> Infallible {
        let tick = Duration::from_millis(self.config.progress.tick_ms);
        loop {
            self.backend.sleep(tick).await;
            if let Some(value) = progress.advance() {
                log::trace!("Upload progress {}%", value);
                self.view.set_progress(value);
            }
        }
    }

    fn show_result(&self, analysis: &AnalysisResult) {
        if let Some(path) = analysis.media_path() {
            let src = self.config.media_url(path);
            self.view.set_result_source(analysis.kind(), &src);
        }
        self.render_results(analysis);
        self.phase.set(Phase::Displaying);
    }

    /// Fill the summary tables and reveal the result area.
    pub fn render_results(&self, result: &AnalysisResult) {
        let summary = ResultSummary::from_result(result);

        self.view.render_metadata(&summary.metadata);
        self.view.reveal_result_media(result.kind());
        self.view.render_detections(&summary.detections);
        self.view.set_result_area_visible(true);
    }

    /// Show a notice. Returns its id.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let notice = self.notices.create(message, severity);
        log::debug!("Notice #{} ({:?}): {}", notice.id, severity, notice.message);
        self.view.show_notice(&notice);
        notice.id
    }
}
