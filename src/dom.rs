//! DOM side of the widget (WASM only).
//!
//! `DomView` looks up every element it touches once, at startup, and
//! implements [`UploadView`] on top of those handles. It only toggles
//! visibility classes, assigns `src` attributes and rebuilds the content of
//! the two summary containers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlVideoElement,
};

use yolo_drop_core::constants::text;
use yolo_drop_core::{
    ConfigError, DetectionRow, MediaKind, MetadataRow, Notice, UploadConfig, UploadView,
};

use crate::error::DomError;

/// Bootstrap utility class hiding an element
const HIDDEN_CLASS: &str = "d-none";
/// Drop zone class while an upload is running
const LOADING_CLASS: &str = "loading";
/// Inner drop zone class while something is dragged over it
const DRAGOVER_CLASS: &str = "dragover";

/// Id of the optional `<script type="application/json">` configuration block
const CONFIG_ELEMENT_ID: &str = "uploadConfig";

fn js_error(value: JsValue) -> DomError {
    DomError::Js(format!("{:?}", value))
}

fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::missing(format!("#{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| DomError::wrong_type(format!("#{}", id), expected))
}

fn element_by_selector<T: JsCast>(
    root: &Element,
    selector: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    root.query_selector(selector)
        .map_err(js_error)?
        .ok_or_else(|| DomError::missing(selector))?
        .dyn_into::<T>()
        .map_err(|_| DomError::wrong_type(selector, expected))
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        log::warn!("Failed to toggle class '{}': {:?}", class, e);
    }
}

fn set_hidden(element: &Element, hidden: bool) {
    toggle_class(element, HIDDEN_CLASS, hidden);
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("Failed to set style {}={}: {:?}", property, value, e);
    }
}

/// Read the page's configuration block.
///
/// Returns the defaults when the page has none.
pub fn read_page_config(document: &Document) -> Result<UploadConfig, ConfigError> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    {
        Some(json) if !json.trim().is_empty() => UploadConfig::from_json(&json),
        _ => Ok(UploadConfig::default()),
    }
}

/// Handles to every element the widget reads or writes.
pub struct DomView {
    document: Document,
    drop_zone: HtmlElement,
    /// Highlighted while dragging; the outer drop zone when the page has no inner one
    drop_target: Element,
    file_input: HtmlInputElement,
    image_preview: HtmlImageElement,
    video_preview: HtmlVideoElement,
    preview_area: HtmlElement,
    result_area: HtmlElement,
    result_image: HtmlImageElement,
    result_video: HtmlVideoElement,
    progress_container: HtmlElement,
    progress_bar: HtmlElement,
    metadata_table: Element,
    detections_list: Element,
}

impl DomView {
    /// Look up all widget elements. Fails on the first missing one.
    pub fn from_document(document: &Document) -> Result<Self, DomError> {
        let body: Element = document.body().ok_or(DomError::NoDocument)?.into();

        let drop_zone: HtmlElement = element_by_id(document, "dropZone", "HTMLElement")?;
        let drop_target = drop_zone
            .query_selector(".drop-zone")
            .map_err(js_error)?
            .unwrap_or_else(|| drop_zone.clone().into());

        Ok(Self {
            document: document.clone(),
            drop_target,
            file_input: element_by_id(document, "imageInput", "HTMLInputElement")?,
            image_preview: element_by_id(document, "imagePreview", "HTMLImageElement")?,
            video_preview: element_by_id(document, "videoPreview", "HTMLVideoElement")?,
            preview_area: element_by_id(document, "previewArea", "HTMLElement")?,
            result_area: element_by_id(document, "resultArea", "HTMLElement")?,
            result_image: element_by_id(document, "resultImage", "HTMLImageElement")?,
            result_video: element_by_id(document, "resultVideo", "HTMLVideoElement")?,
            progress_container: element_by_selector(
                &body,
                ".progress-bar-container",
                "HTMLElement",
            )?,
            progress_bar: element_by_selector(&body, ".progress-bar", "HTMLElement")?,
            metadata_table: element_by_id(document, "basicInfoTable", "Element")?,
            detections_list: element_by_id(document, "detectionsList", "Element")?,
            drop_zone,
        })
    }

    pub fn drop_zone(&self) -> &HtmlElement {
        &self.drop_zone
    }

    pub fn file_input(&self) -> &HtmlInputElement {
        &self.file_input
    }

    pub fn video_preview(&self) -> &HtmlVideoElement {
        &self.video_preview
    }

    /// Append the "re-upload" button to the preview area and return it.
    pub fn append_reupload_button(&self) -> Result<HtmlElement, DomError> {
        let button: HtmlElement = self
            .document
            .create_element("button")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| DomError::wrong_type("button", "HTMLElement"))?;
        button.set_class_name("btn-reupload");

        let icon = self.icon("fas fa-upload me-2")?;
        button.append_child(&icon).map_err(js_error)?;
        button
            .append_with_str_1(text::REUPLOAD)
            .map_err(js_error)?;

        self.preview_area.append_child(&button).map_err(js_error)?;
        Ok(button)
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, DomError> {
        let element = self.document.create_element(tag).map_err(js_error)?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn icon(&self, class: &str) -> Result<Element, DomError> {
        self.create("i", class)
    }

    fn metadata_row(&self, row: &MetadataRow) -> Result<Element, DomError> {
        let tr = self.create("tr", "")?;

        let label_cell = self.create("td", "")?;
        let strong = self.create("strong", "")?;
        strong.set_text_content(Some(row.label));
        label_cell.append_child(&strong).map_err(js_error)?;

        let value_cell = self.create("td", "")?;
        value_cell.set_text_content(Some(&row.value));

        tr.append_with_node_2(&label_cell, &value_cell)
            .map_err(js_error)?;
        Ok(tr)
    }

    fn detection_item(&self, row: &DetectionRow) -> Result<Element, DomError> {
        let item = self.create("div", "detection-item")?;

        let label = self.create("div", "")?;
        let icon_class = match row {
            DetectionRow::Class { .. } => "fas fa-tag me-2",
            DetectionRow::NoDetections => "fas fa-info-circle me-2",
        };
        label.append_child(&self.icon(icon_class)?).map_err(js_error)?;
        label.append_with_str_1(row.label()).map_err(js_error)?;
        item.append_child(&label).map_err(js_error)?;

        if let Some(badge_text) = row.badge() {
            let badge = self.create("span", "confidence-badge")?;
            badge.set_text_content(Some(&badge_text));
            item.append_child(&badge).map_err(js_error)?;
        }
        Ok(item)
    }

    fn notice_element(&self, notice: &Notice) -> Result<Element, DomError> {
        let element = self.create(
            "div",
            &format!("notification {}", notice.severity.css_class()),
        )?;
        let icon = self.icon(&format!("fas fa-{} me-2", notice.severity.icon()))?;
        element.append_child(&icon).map_err(js_error)?;
        element
            .append_with_str_1(&notice.message)
            .map_err(js_error)?;
        Ok(element)
    }

    fn try_show_notice(&self, notice: &Notice) -> Result<(), DomError> {
        let element = self.notice_element(notice)?;
        let body = self.document.body().ok_or(DomError::NoDocument)?;
        body.append_child(&element).map_err(js_error)?;

        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let remove = Closure::once_into_js(move || element.remove());
        let ttl_ms = i32::try_from(notice.ttl.as_millis()).unwrap_or(i32::MAX);
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), ttl_ms)
            .map_err(js_error)?;
        Ok(())
    }

    fn replace_children<T>(
        &self,
        container: &Element,
        rows: &[T],
        build: impl Fn(&T) -> Result<Element, DomError>,
    ) {
        container.set_inner_html("");
        for row in rows {
            let appended =
                build(row).and_then(|element| container.append_child(&element).map_err(js_error));
            if let Err(e) = appended {
                log::warn!("Failed to render row: {}", e);
            }
        }
    }
}

impl UploadView for DomView {
    fn set_drop_zone_visible(&self, visible: bool) {
        set_hidden(&self.drop_zone, !visible);
    }

    fn set_drop_zone_loading(&self, loading: bool) {
        toggle_class(&self.drop_zone, LOADING_CLASS, loading);
    }

    fn set_drop_zone_highlight(&self, highlighted: bool) {
        toggle_class(&self.drop_target, DRAGOVER_CLASS, highlighted);
    }

    fn clear_file_input(&self) {
        self.file_input.set_value("");
    }

    fn set_preview_area_visible(&self, visible: bool) {
        set_hidden(&self.preview_area, !visible);
    }

    fn set_image_preview(&self, src: Option<&str>) {
        self.image_preview.set_src(src.unwrap_or_default());
        set_hidden(&self.image_preview, src.is_none());
    }

    fn set_video_preview(&self, src: Option<&str>) {
        match src {
            Some(src) => {
                self.video_preview.set_src(src);
                self.video_preview.set_controls(true);
                self.video_preview.set_muted(false);
                set_hidden(&self.video_preview, false);
            }
            None => {
                self.video_preview.set_src("");
                set_hidden(&self.video_preview, true);
            }
        }
    }

    fn set_progress_visible(&self, visible: bool) {
        set_style(
            &self.progress_container,
            "display",
            if visible { "block" } else { "none" },
        );
    }

    fn set_progress(&self, percent: u8) {
        set_style(&self.progress_bar, "width", &format!("{}%", percent));
    }

    fn set_result_source(&self, kind: MediaKind, src: &str) {
        match kind {
            MediaKind::Image => self.result_image.set_src(src),
            MediaKind::Video => self.result_video.set_src(src),
        }
    }

    fn reveal_result_media(&self, kind: MediaKind) {
        set_hidden(&self.result_image, kind != MediaKind::Image);
        set_hidden(&self.result_video, kind != MediaKind::Video);
    }

    fn clear_result_media(&self) {
        self.result_image.set_src("");
        self.result_video.set_src("");
        set_hidden(&self.result_image, true);
        set_hidden(&self.result_video, true);
    }

    fn set_result_area_visible(&self, visible: bool) {
        set_hidden(&self.result_area, !visible);
    }

    fn render_metadata(&self, rows: &[MetadataRow]) {
        self.replace_children(&self.metadata_table, rows, |row| self.metadata_row(row));
    }

    fn render_detections(&self, rows: &[DetectionRow]) {
        self.replace_children(&self.detections_list, rows, |row| self.detection_item(row));
    }

    fn show_notice(&self, notice: &Notice) {
        if let Err(e) = self.try_show_notice(notice) {
            log::error!("Failed to show notice '{}': {}", notice.message, e);
        }
    }
}
