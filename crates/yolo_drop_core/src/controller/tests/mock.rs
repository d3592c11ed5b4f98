//! Recording view and scripted backend.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::UploadConfig;
use crate::controller::UploadController;
use crate::error::UploadError;
use crate::host::{SelectedFile, UploadBackend, UploadView};
use crate::media::MediaKind;
use crate::notice::{Notice, Severity};
use crate::object_url::ObjectUrl;
use crate::summary::{DetectionRow, MetadataRow};

pub type TestController = UploadController<MockView, MockBackend>;

pub fn controller(backend: MockBackend) -> TestController {
    UploadController::new(UploadConfig::default(), MockView::default(), backend)
}

/// File as the browser would hand it over.
#[derive(Debug, Clone)]
pub struct MockFile {
    pub name: String,
    pub mime: String,
}

impl MockFile {
    pub fn new(name: &str, mime: &str) -> Self {
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
        }
    }
}

impl SelectedFile for MockFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn size(&self) -> u64 {
        1024
    }
}

/// Current state of the fake page.
#[derive(Debug, Default)]
pub struct PageState {
    pub drop_zone_visible: bool,
    pub drop_zone_loading: bool,
    pub drop_zone_highlight: bool,
    pub file_input_clears: usize,
    pub preview_area_visible: bool,
    pub image_preview: Option<String>,
    pub video_preview: Option<String>,
    /// Number of times a video source was assigned
    pub video_preview_assignments: usize,
    pub progress_visible: bool,
    /// Every value written to the bar, in order
    pub progress_history: Vec<u8>,
    pub result_image: Option<String>,
    pub result_video: Option<String>,
    pub revealed_media: Option<MediaKind>,
    pub result_area_visible: bool,
    /// Number of times the result area was made visible
    pub result_area_reveals: usize,
    pub metadata: Vec<MetadataRow>,
    pub detections: Vec<DetectionRow>,
    pub notices: Vec<Notice>,
}

impl PageState {
    pub fn progress(&self) -> u8 {
        self.progress_history.last().copied().unwrap_or(0)
    }

    pub fn notices_with(&self, severity: Severity) -> Vec<&Notice> {
        self.notices
            .iter()
            .filter(|notice| notice.severity == severity)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MockView {
    pub page: RefCell<PageState>,
}

impl MockView {
    pub fn page(&self) -> std::cell::Ref<'_, PageState> {
        self.page.borrow()
    }
}

impl UploadView for MockView {
    fn set_drop_zone_visible(&self, visible: bool) {
        self.page.borrow_mut().drop_zone_visible = visible;
    }

    fn set_drop_zone_loading(&self, loading: bool) {
        self.page.borrow_mut().drop_zone_loading = loading;
    }

    fn set_drop_zone_highlight(&self, highlighted: bool) {
        self.page.borrow_mut().drop_zone_highlight = highlighted;
    }

    fn clear_file_input(&self) {
        self.page.borrow_mut().file_input_clears += 1;
    }

    fn set_preview_area_visible(&self, visible: bool) {
        self.page.borrow_mut().preview_area_visible = visible;
    }

    fn set_image_preview(&self, src: Option<&str>) {
        self.page.borrow_mut().image_preview = src.map(str::to_string);
    }

    fn set_video_preview(&self, src: Option<&str>) {
        let mut page = self.page.borrow_mut();
        if src.is_some() {
            page.video_preview_assignments += 1;
        }
        page.video_preview = src.map(str::to_string);
    }

    fn set_progress_visible(&self, visible: bool) {
        self.page.borrow_mut().progress_visible = visible;
    }

    fn set_progress(&self, percent: u8) {
        self.page.borrow_mut().progress_history.push(percent);
    }

    fn set_result_source(&self, kind: MediaKind, src: &str) {
        let mut page = self.page.borrow_mut();
        match kind {
            MediaKind::Image => page.result_image = Some(src.to_string()),
            MediaKind::Video => page.result_video = Some(src.to_string()),
        }
    }

    fn reveal_result_media(&self, kind: MediaKind) {
        self.page.borrow_mut().revealed_media = Some(kind);
    }

    fn clear_result_media(&self) {
        let mut page = self.page.borrow_mut();
        page.result_image = None;
        page.result_video = None;
        page.revealed_media = None;
    }

    fn set_result_area_visible(&self, visible: bool) {
        let mut page = self.page.borrow_mut();
        page.result_area_visible = visible;
        if visible {
            page.result_area_reveals += 1;
        }
    }

    fn render_metadata(&self, rows: &[MetadataRow]) {
        self.page.borrow_mut().metadata = rows.to_vec();
    }

    fn render_detections(&self, rows: &[DetectionRow]) {
        self.page.borrow_mut().detections = rows.to_vec();
    }

    fn show_notice(&self, notice: &Notice) {
        self.page.borrow_mut().notices.push(notice.clone());
    }
}

/// Backend whose answers are set up front.
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Body returned by the upload, or a transport error message
    pub response: RefCell<Option<Result<String, String>>>,
    /// Times the request yields before completing, lets the progress ticker run
    pub request_polls: Cell<usize>,
    pub read_fails: Cell<bool>,
    pub play_fails: Cell<bool>,

    pub reads: Cell<usize>,
    pub plays: Cell<usize>,
    pub created_urls: RefCell<Vec<String>>,
    pub revoked_urls: RefCell<Vec<String>>,
    pub posts: RefCell<Vec<(String, String, String)>>,
    pub sleeps: RefCell<Vec<Duration>>,
}

impl MockBackend {
    pub fn responding(body: &str) -> Self {
        let backend = Self::default();
        *backend.response.borrow_mut() = Some(Ok(body.to_string()));
        backend
    }

    pub fn failing(message: &str) -> Self {
        let backend = Self::default();
        *backend.response.borrow_mut() = Some(Err(message.to_string()));
        backend
    }

    pub fn with_request_polls(self, polls: usize) -> Self {
        self.request_polls.set(polls);
        self
    }
}

#[async_trait(?Send)]
impl UploadBackend for MockBackend {
    type File = MockFile;

    async fn read_data_url(&self, file: &MockFile) -> Result<String, UploadError> {
        self.reads.set(self.reads.get() + 1);
        YieldOnce::default().await;
        if self.read_fails.get() {
            return Err(UploadError::preview("read aborted"));
        }
        Ok(format!("data:{};base64,AAAA", file.mime))
    }

    fn create_object_url(&self, file: &MockFile) -> Result<ObjectUrl, UploadError> {
        let mut created = self.created_urls.borrow_mut();
        let url = format!("blob:mock/{}/{}", created.len(), file.name);
        created.push(url.clone());
        Ok(ObjectUrl::new(url))
    }

    fn revoke_object_url(&self, url: ObjectUrl) {
        self.revoked_urls.borrow_mut().push(url.into_inner());
    }

    async fn play_video_preview(&self) -> Result<(), UploadError> {
        self.plays.set(self.plays.get() + 1);
        if self.play_fails.get() {
            return Err(UploadError::preview("NotAllowedError"));
        }
        Ok(())
    }

    async fn post_file(
        &self,
        url: &str,
        field: &str,
        file: &MockFile,
    ) -> Result<String, UploadError> {
        self.posts
            .borrow_mut()
            .push((url.to_string(), field.to_string(), file.name.clone()));

        for _ in 0..self.request_polls.get() {
            YieldOnce::default().await;
        }

        match self.response.borrow().clone() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(UploadError::transport(message)),
            None => Err(UploadError::transport("no response scripted")),
        }
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        YieldOnce::default().await;
    }
}

/// Returns `Pending` exactly once.
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub const IMAGE_RESPONSE: &str = r#"{
    "success": true, "type": "image",
    "analysis": {
        "dimensions": "640x480", "format": "JPEG", "mode": "RGB",
        "mean_values": [120.4, 130.9, 110.2],
        "detections": [{"class": "cat"}, {"class": "cat"}, {"class": "dog"}],
        "result_image": "out.jpg"
    }
}"#;

pub const VIDEO_RESPONSE: &str = r#"{
    "success": true, "type": "video",
    "analysis": {
        "width": 640, "height": 360, "total_frames": 300, "fps": 30,
        "detections": [],
        "output_video": "web_output.mp4"
    }
}"#;
