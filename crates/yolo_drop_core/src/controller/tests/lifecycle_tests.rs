//! Acquisition, preview and reset.

use pollster::block_on;

use super::mock::{controller, MockBackend, MockFile, IMAGE_RESPONSE, VIDEO_RESPONSE};
use crate::controller::Phase;
use crate::notice::Severity;

#[test]
fn test_empty_selection_is_noop() {
    let ctrl = controller(MockBackend::responding(IMAGE_RESPONSE));
    block_on(ctrl.acquire_file(Vec::new()));

    let page = ctrl.view().page();
    assert_eq!(page.file_input_clears, 0, "reset must not run");
    assert!(page.notices.is_empty());
    assert!(ctrl.backend().posts.borrow().is_empty());
    assert_eq!(ctrl.phase(), Phase::Idle);
}

#[test]
fn test_only_first_file_is_used() {
    let ctrl = controller(MockBackend::responding(IMAGE_RESPONSE));
    block_on(ctrl.acquire_file(vec![
        MockFile::new("first.png", "image/png"),
        MockFile::new("second.png", "image/png"),
    ]));

    let posts = ctrl.backend().posts.borrow();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].2, "first.png");
}

#[test]
fn test_image_never_touches_video_path() {
    for mime in ["image/jpeg", "image/png", "image/gif", "image/webp", "image/svg+xml"] {
        let ctrl = controller(MockBackend::responding(IMAGE_RESPONSE));
        let file = MockFile::new("photo", mime);

        block_on(ctrl.render_local_preview(&file, crate::media::MediaKind::Image));
        assert_eq!(ctrl.phase(), Phase::Previewing);

        block_on(ctrl.acquire_file(vec![file]));

        let backend = ctrl.backend();
        assert!(backend.created_urls.borrow().is_empty(), "{mime}");
        assert_eq!(backend.plays.get(), 0, "{mime}");
        assert_eq!(ctrl.view().page().video_preview_assignments, 0, "{mime}");
        assert!(!ctrl.holds_preview_url());
    }
}

#[test]
fn test_image_preview_shown_before_upload() {
    let ctrl = controller(MockBackend::responding(IMAGE_RESPONSE));
    block_on(ctrl.acquire_file(vec![MockFile::new("cat.jpg", "image/jpeg")]));

    let page = ctrl.view().page();
    assert_eq!(
        page.image_preview.as_deref(),
        Some("data:image/jpeg;base64,AAAA")
    );
    assert!(page.preview_area_visible);
    assert!(!page.drop_zone_visible);
    assert_eq!(ctrl.backend().reads.get(), 1);
}

#[test]
fn test_avi_selects_video_path_regardless_of_mime() {
    for mime in ["", "application/octet-stream", "video/x-msvideo", "image/png"] {
        let ctrl = controller(MockBackend::responding(VIDEO_RESPONSE));
        block_on(ctrl.acquire_file(vec![MockFile::new("Clip.AVI", mime)]));

        let backend = ctrl.backend();
        assert_eq!(backend.created_urls.borrow().len(), 1, "mime {mime:?}");
        assert_eq!(backend.reads.get(), 0, "mime {mime:?}");
        assert_eq!(backend.plays.get(), 1);
        assert_eq!(ctrl.view().page().video_preview_assignments, 1);
    }
}

#[test]
fn test_unsupported_file_aborts_before_network() {
    let ctrl = controller(MockBackend::responding(IMAGE_RESPONSE));
    block_on(ctrl.acquire_file(vec![MockFile::new("report.pdf", "application/pdf")]));

    let page = ctrl.view().page();
    let errors = page.notices_with(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "請上傳圖片或支援的影片格式！");
    assert!(ctrl.backend().posts.borrow().is_empty());
    assert!(!page.progress_visible);
    assert!(page.drop_zone_visible);
    assert_eq!(ctrl.phase(), Phase::Idle);
}

#[test]
fn test_image_read_failure_still_uploads() {
    let backend = MockBackend::responding(IMAGE_RESPONSE);
    backend.read_fails.set(true);
    let ctrl = controller(backend);

    block_on(ctrl.acquire_file(vec![MockFile::new("cat.jpg", "image/jpeg")]));

    let page = ctrl.view().page();
    assert_eq!(page.notices_with(Severity::Warning).len(), 1);
    assert!(page.image_preview.is_none());
    assert_eq!(ctrl.backend().posts.borrow().len(), 1);
    assert_eq!(ctrl.phase(), Phase::Displaying);
}

#[test]
fn test_autoplay_failure_is_informational() {
    let backend = MockBackend::responding(VIDEO_RESPONSE);
    backend.play_fails.set(true);
    let ctrl = controller(backend);

    block_on(ctrl.acquire_file(vec![MockFile::new("clip.mp4", "video/mp4")]));

    let page = ctrl.view().page();
    let infos = page.notices_with(Severity::Info);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].message, "影片預覽可能無法播放，但不影響處理結果");
    assert!(page.notices_with(Severity::Error).is_empty());
    assert_eq!(ctrl.phase(), Phase::Displaying);
}

#[test]
fn test_preview_error_only_with_active_video() {
    let ctrl = controller(MockBackend::responding(VIDEO_RESPONSE));
    ctrl.on_preview_error();
    assert!(ctrl.view().page().notices.is_empty());

    block_on(ctrl.acquire_file(vec![MockFile::new("clip.mov", "video/quicktime")]));
    ctrl.on_preview_error();

    let page = ctrl.view().page();
    assert_eq!(page.notices_with(Severity::Warning).len(), 1);
}

#[test]
fn test_reset_twice_revokes_once() {
    let ctrl = controller(MockBackend::responding(VIDEO_RESPONSE));
    block_on(ctrl.acquire_file(vec![MockFile::new("clip.mp4", "video/mp4")]));
    assert!(ctrl.holds_preview_url());

    ctrl.reset();
    ctrl.reset();

    let backend = ctrl.backend();
    assert_eq!(backend.created_urls.borrow().len(), 1);
    assert_eq!(
        *backend.revoked_urls.borrow(),
        *backend.created_urls.borrow()
    );
    assert!(!ctrl.holds_preview_url());

    let page = ctrl.view().page();
    assert!(page.drop_zone_visible);
    assert!(!page.preview_area_visible);
    assert!(!page.result_area_visible);
    assert!(!page.progress_visible);
    assert_eq!(page.progress(), 0);
    assert!(page.image_preview.is_none());
    assert!(page.video_preview.is_none());
    assert!(page.result_video.is_none());
    assert!(page.metadata.is_empty());
    assert!(page.detections.is_empty());
    assert_eq!(ctrl.phase(), Phase::Idle);
}

#[test]
fn test_reset_without_session_is_safe() {
    let ctrl = controller(MockBackend::default());
    ctrl.reset();

    assert!(ctrl.backend().revoked_urls.borrow().is_empty());
    assert!(ctrl.view().page().drop_zone_visible);
    assert_eq!(ctrl.phase(), Phase::Idle);
}

#[test]
fn test_new_video_releases_previous_url() {
    let ctrl = controller(MockBackend::responding(VIDEO_RESPONSE));
    block_on(ctrl.acquire_file(vec![MockFile::new("a.mp4", "video/mp4")]));
    block_on(ctrl.acquire_file(vec![MockFile::new("b.mp4", "video/mp4")]));

    let backend = ctrl.backend();
    let created = backend.created_urls.borrow();
    let revoked = backend.revoked_urls.borrow();
    assert_eq!(created.len(), 2);
    assert_eq!(*revoked, [created[0].clone()]);
    assert_eq!(
        ctrl.view().page().video_preview.as_deref(),
        Some(created[1].as_str())
    );
}

#[test]
fn test_image_after_video_releases_url() {
    let ctrl = controller(MockBackend::responding(IMAGE_RESPONSE));
    block_on(ctrl.acquire_file(vec![MockFile::new("a.mp4", "video/mp4")]));
    block_on(ctrl.acquire_file(vec![MockFile::new("b.png", "image/png")]));

    assert_eq!(ctrl.backend().revoked_urls.borrow().len(), 1);
    assert!(!ctrl.holds_preview_url());
}

#[test]
fn test_second_file_during_upload_does_not_cancel_first() {
    let backend = MockBackend::responding(IMAGE_RESPONSE).with_request_polls(6);
    let ctrl = controller(backend);

    block_on(async {
        futures::join!(
            ctrl.acquire_file(vec![MockFile::new("a.mp4", "video/mp4")]),
            ctrl.acquire_file(vec![MockFile::new("b.png", "image/png")]),
        );
    });

    let backend = ctrl.backend();
    let names: Vec<_> = backend.posts.borrow().iter().map(|post| post.2.clone()).collect();
    assert_eq!(names, ["a.mp4", "b.png"]);
    assert_eq!(*backend.created_urls.borrow(), ["blob:mock/0/a.mp4"]);
    assert_eq!(*backend.revoked_urls.borrow(), ["blob:mock/0/a.mp4"]);
    assert!(!ctrl.holds_preview_url());

    let page = ctrl.view().page();
    // both completions are rendered
    assert_eq!(page.result_area_reveals, 2);
    assert!(page.result_area_visible);
    assert_eq!(page.image_preview.as_deref(), Some("data:image/png;base64,AAAA"));
    assert!(page.video_preview.is_none());
    assert!(!page.drop_zone_loading);
    assert!(!page.progress_visible);
    assert!(page.notices.is_empty());
    assert_eq!(ctrl.phase(), Phase::Displaying);
}

#[test]
fn test_drag_highlight() {
    let ctrl = controller(MockBackend::default());
    ctrl.drag_enter();
    assert!(ctrl.view().page().drop_zone_highlight);
    ctrl.drag_leave();
    assert!(!ctrl.view().page().drop_zone_highlight);
}
