//! Browser services for the upload lifecycle (WASM only).
//!
//! Callback-style browser APIs (`FileReader`, `setTimeout`) are wrapped in
//! `js_sys::Promise`s and awaited through `wasm_bindgen_futures::JsFuture`.

use std::time::Duration;

use async_trait::async_trait;
use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, FormData, HtmlVideoElement, Request, RequestInit, Response, Url, Window};

use yolo_drop_core::{ObjectUrl, SelectedFile, UploadBackend, UploadError};

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// A file from the picker or a drop.
#[derive(Debug, Clone)]
pub struct WebFile(pub File);

impl SelectedFile for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

/// Collect the files of a `FileList`, in order.
pub fn files_of(list: Option<web_sys::FileList>) -> Vec<WebFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(WebFile)
        .collect()
}

/// `UploadBackend` over the browser's window APIs.
pub struct WebBackend {
    window: Window,
    video_preview: HtmlVideoElement,
}

impl WebBackend {
    pub fn new(window: Window, video_preview: HtmlVideoElement) -> Self {
        Self {
            window,
            video_preview,
        }
    }
}

#[async_trait(?Send)]
impl UploadBackend for WebBackend {
    type File = WebFile;

    async fn read_data_url(&self, file: &WebFile) -> Result<String, UploadError> {
        let reader = FileReader::new().map_err(|e| UploadError::preview(describe(&e)))?;

        let loaded = Promise::new(&mut |resolve, reject| {
            reader.set_onload(Some(&resolve));
            reader.set_onerror(Some(&reject));
        });
        reader
            .read_as_data_url(&file.0)
            .map_err(|e| UploadError::preview(describe(&e)))?;

        let outcome = JsFuture::from(loaded).await;
        reader.set_onload(None);
        reader.set_onerror(None);
        outcome.map_err(|_| {
            let reason = reader
                .error()
                .map(|error| error.message())
                .unwrap_or_else(|| "read failed".to_string());
            UploadError::preview(reason)
        })?;

        reader
            .result()
            .map_err(|e| UploadError::preview(describe(&e)))?
            .as_string()
            .ok_or_else(|| UploadError::preview("reader produced no data URL"))
    }

    fn create_object_url(&self, file: &WebFile) -> Result<ObjectUrl, UploadError> {
        Url::create_object_url_with_blob(&file.0)
            .map(ObjectUrl::new)
            .map_err(|e| UploadError::preview(describe(&e)))
    }

    fn revoke_object_url(&self, url: ObjectUrl) {
        if let Err(e) = Url::revoke_object_url(&url.into_inner()) {
            log::warn!("Failed to revoke object URL: {}", describe(&e));
        }
    }

    async fn play_video_preview(&self) -> Result<(), UploadError> {
        let playing = self
            .video_preview
            .play()
            .map_err(|e| UploadError::preview(describe(&e)))?;
        JsFuture::from(playing)
            .await
            .map(|_| ())
            .map_err(|e| UploadError::preview(describe(&e)))
    }

    async fn post_file(
        &self,
        url: &str,
        field: &str,
        file: &WebFile,
    ) -> Result<String, UploadError> {
        let transport = |e: JsValue| UploadError::transport(describe(&e));

        let form = FormData::new().map_err(transport)?;
        form.append_with_blob_and_filename(field, &file.0, &file.0.name())
            .map_err(transport)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;

        let response: Response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(|_| UploadError::transport("fetch did not return a Response"))?;
        log::debug!("Upload response status {}", response.status());

        JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .ok_or_else(|| UploadError::transport("response body is not text"))
    }

    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let elapsed = Promise::new(&mut |resolve, _reject| {
            if let Err(e) = self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            {
                log::error!("setTimeout failed: {}", describe(&e));
            }
        });
        // resolve is never rejected
        let _ = JsFuture::from(elapsed).await;
    }
}
