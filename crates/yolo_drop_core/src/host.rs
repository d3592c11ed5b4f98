//! Seams between the controller and the page.
//!
//! [`UploadView`] covers the synchronous DOM writes, [`UploadBackend`] the
//! asynchronous browser services. The wasm shell implements both over
//! `web-sys`; tests implement them with recording mocks.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::UploadError;
use crate::media::MediaKind;
use crate::notice::Notice;
use crate::object_url::ObjectUrl;
use crate::summary::{DetectionRow, MetadataRow};

/// A file handed over by the file picker or a drop.
pub trait SelectedFile {
    /// File name including extension
    fn name(&self) -> String;
    /// Reported MIME type, empty when the browser does not know it
    fn mime_type(&self) -> String;
    /// Size in bytes
    fn size(&self) -> u64;
}

/// The widget's DOM surface.
///
/// All methods take `&self`; implementations only touch visibility classes,
/// `src` attributes and the content of the two summary containers.
pub trait UploadView {
    /// Show or hide the drop zone.
    fn set_drop_zone_visible(&self, visible: bool);
    /// Toggle the drop zone's busy indicator.
    fn set_drop_zone_loading(&self, loading: bool);
    /// Toggle the drag-over highlight.
    fn set_drop_zone_highlight(&self, highlighted: bool);
    /// Clear the file input so the same file can be picked again.
    fn clear_file_input(&self);

    /// Show or hide the preview area.
    fn set_preview_area_visible(&self, visible: bool);
    /// Assign and show the image preview, or clear and hide it with `None`.
    fn set_image_preview(&self, src: Option<&str>);
    /// Assign and show the video preview with controls, or clear and hide it.
    fn set_video_preview(&self, src: Option<&str>);

    /// Show or hide the progress bar container.
    fn set_progress_visible(&self, visible: bool);
    /// Set the progress bar width in percent.
    fn set_progress(&self, percent: u8);

    /// Assign the source of the annotated media element of `kind`.
    fn set_result_source(&self, kind: MediaKind, src: &str);
    /// Show the result element of `kind` and hide the other one.
    fn reveal_result_media(&self, kind: MediaKind);
    /// Clear the sources of both result elements and hide them.
    fn clear_result_media(&self);
    /// Show or hide the whole result area.
    fn set_result_area_visible(&self, visible: bool);

    /// Replace the metadata table rows.
    fn render_metadata(&self, rows: &[MetadataRow]);
    /// Replace the detection list entries.
    fn render_detections(&self, rows: &[DetectionRow]);

    /// Append a notice; the view removes it after `notice.ttl`.
    fn show_notice(&self, notice: &Notice);
}

/// Asynchronous browser services used during one upload.
#[async_trait(?Send)]
pub trait UploadBackend {
    type File: SelectedFile;

    /// Read the file into a `data:` URL.
    async fn read_data_url(&self, file: &Self::File) -> Result<String, UploadError>;

    /// Create an object URL for the file.
    fn create_object_url(&self, file: &Self::File) -> Result<ObjectUrl, UploadError>;

    /// Release an object URL. Consumes the handle.
    fn revoke_object_url(&self, url: ObjectUrl);

    /// Try to start playback of the video preview.
    async fn play_video_preview(&self) -> Result<(), UploadError>;

    /// Post `file` as multipart field `field` and return the response body.
    async fn post_file(
        &self,
        url: &str,
        field: &str,
        file: &Self::File,
    ) -> Result<String, UploadError>;

    /// Resolve after `duration`.
    async fn sleep(&self, duration: Duration);
}
