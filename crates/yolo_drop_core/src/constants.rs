//! Global constants for the upload widget

/// Detection API used when the page does not override it
pub const DEFAULT_API_BASE_URL: &str = "https://my-yolo-app.onrender.com";

/// Endpoint receiving the multipart upload, relative to the base URL
pub const UPLOAD_PATH: &str = "upload";

/// Directory the API serves annotated media from, relative to the base URL
pub const MEDIA_PATH: &str = "uploads";

/// Multipart field name carrying the file
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Interval between simulated progress steps
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 500;

/// Percentage added on every simulated progress step
pub const DEFAULT_PROGRESS_STEP: u8 = 5;

/// Simulated progress never passes this value before the response arrives
pub const DEFAULT_PROGRESS_CAP: u8 = 90;

/// Delay between forcing the bar to 100% and hiding it
pub const DEFAULT_PROGRESS_FADE_MS: u64 = 500;

/// How long a notice stays on the page
pub const DEFAULT_NOTICE_TTL_MS: u64 = 5000;

/// Filename suffix treated as video even when the browser reports no video MIME type
pub const VIDEO_SUFFIX_FALLBACK: &str = ".avi";

/// User-facing texts
pub mod text {
    pub const UNSUPPORTED_INPUT: &str = "請上傳圖片或支援的影片格式！";
    pub const VIDEO_FORMAT_WARNING: &str = "此影片格式可能不被您的瀏覽器支援，但系統仍會處理並轉換格式";
    pub const AUTOPLAY_FAILED: &str = "影片預覽可能無法播放，但不影響處理結果";
    pub const IMAGE_PREVIEW_FAILED: &str = "圖片預覽失敗，但不影響處理結果";
    pub const UPLOAD_FAILED: &str = "上傳過程中發生錯誤";
    pub const SERVER_ERROR_PREFIX: &str = "錯誤：";
    pub const UNKNOWN_SERVER_ERROR: &str = "未知錯誤";
    pub const NO_DETECTIONS: &str = "未檢測到物件";
    pub const DETECTION_COUNT_SUFFIX: &str = "次檢測";
    pub const SECONDS_SUFFIX: &str = "秒";
    pub const NOT_AVAILABLE: &str = "-";
    pub const REUPLOAD: &str = "重新上傳";

    pub const IMAGE_DIMENSIONS: &str = "圖片尺寸";
    pub const IMAGE_FORMAT: &str = "檔案格式";
    pub const IMAGE_MODE: &str = "色彩模式";
    pub const IMAGE_MEAN: &str = "平均色彩值";

    pub const VIDEO_DIMENSIONS: &str = "影片尺寸";
    pub const VIDEO_FRAMES: &str = "總幀數";
    pub const VIDEO_FPS: &str = "幀率";
    pub const VIDEO_PROCESSING_TIME: &str = "處理時間";
}
