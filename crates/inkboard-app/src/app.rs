//! Session state: canvas, gestures, renderer and the remote collaborators.

use crate::config::AppConfig;
use crate::error::AppResult;
use inkboard_core::{
    AnswerLength, AnswerRequest, AnswerService, Bounds, BoxFuture, Canvas, CanvasCommands,
    GestureMachine, ItemId, PointerEvent, RecognitionRequest, RecognitionService, ServiceError,
    ServiceResult,
};
use inkboard_render::{
    FontBook, RenderContext, Renderer, SkiaRenderer, encode_png, export_region_png,
};
use kurbo::Size;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tiny_skia::Pixmap;

/// How long a notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short message for the user that hides itself after [`NOTICE_DURATION`].
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: now + NOTICE_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A recognition call that has been started but not yet resolved.
#[derive(Debug, Clone)]
pub struct PendingRecognition {
    request: RecognitionRequest,
    image: Vec<u8>,
}

impl PendingRecognition {
    pub fn request(&self) -> &RecognitionRequest {
        &self.request
    }

    /// PNG of the captured region.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Issue the call on `service`.
    pub fn send<'a>(&self, service: &'a dyn RecognitionService) -> BoxFuture<'a, ServiceResult<String>> {
        service.recognize(self.image.clone(), self.request.region.world_bounds)
    }
}

/// An answer call that has been started but not yet resolved.
#[derive(Debug, Clone)]
pub struct PendingAnswer {
    request: AnswerRequest,
    image: Vec<u8>,
}

impl PendingAnswer {
    pub fn request(&self) -> &AnswerRequest {
        &self.request
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn send<'a>(&self, service: &'a dyn AnswerService) -> BoxFuture<'a, ServiceResult<String>> {
        service.answer(
            self.image.clone(),
            self.request.region.world_bounds,
            self.request.length,
        )
    }
}

/// Collaborator used when no service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableService;

impl RecognitionService for UnavailableService {
    fn recognize(&self, _image: Vec<u8>, _region: Bounds) -> BoxFuture<'_, ServiceResult<String>> {
        Box::pin(async { Err(ServiceError::Unavailable) })
    }
}

impl AnswerService for UnavailableService {
    fn answer(
        &self,
        _image: Vec<u8>,
        _region: Bounds,
        _length: AnswerLength,
    ) -> BoxFuture<'_, ServiceResult<String>> {
        Box::pin(async { Err(ServiceError::Unavailable) })
    }
}

/// One interactive board session.
///
/// Collaborator calls run in two halves (`start_*` and `finish_*`) so the host can keep
/// feeding pointer events while a call is in flight; only the session's `loading` flag
/// reflects the pending call.
pub struct Session {
    canvas: Canvas,
    gestures: GestureMachine,
    renderer: SkiaRenderer,
    recognizer: Rc<dyn RecognitionService>,
    answerer: Rc<dyn AnswerService>,
    viewport_size: Size,
    pixel_ratio: f64,
    export_scale: f64,
    loading: bool,
    notice: Option<Notice>,
    answer: Option<String>,
}

impl Session {
    pub fn new(
        config: &AppConfig,
        fonts: FontBook,
        recognizer: Rc<dyn RecognitionService>,
        answerer: Rc<dyn AnswerService>,
    ) -> AppResult<Self> {
        let mut canvas = Canvas::new(config.canvas.clone(), config.tools.clone());
        canvas.set_viewport_size(config.width, config.height);
        let renderer = SkiaRenderer::new(
            (config.width * config.pixel_ratio).ceil() as u32,
            (config.height * config.pixel_ratio).ceil() as u32,
        )?
        .with_fonts(fonts);

        Ok(Self {
            canvas,
            gestures: GestureMachine::new(),
            renderer,
            recognizer,
            answerer,
            viewport_size: Size::new(config.width, config.height),
            pixel_ratio: config.pixel_ratio,
            export_scale: config.export_scale,
            loading: false,
            notice: None,
            answer: None,
        })
    }

    /// Session without remote collaborators.
    pub fn offline(config: &AppConfig, fonts: FontBook) -> AppResult<Self> {
        Self::new(
            config,
            fonts,
            Rc::new(UnavailableService),
            Rc::new(UnavailableService),
        )
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// History and page commands for toolbars and shortcuts.
    pub fn commands(&mut self) -> &mut dyn CanvasCommands {
        &mut self.canvas
    }

    pub fn gestures(&self) -> &GestureMachine {
        &self.gestures
    }

    /// Feed one pointer event through the gesture machine.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        self.gestures.handle(&mut self.canvas, event)
    }

    /// Reset the board and drop any gesture in progress.
    pub fn reset(&mut self) {
        self.gestures.reset();
        self.canvas.request_reset();
        self.answer = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current notice, unless it has expired by `now`.
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop an expired notice.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// The last answer received.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn recognizer(&self) -> Rc<dyn RecognitionService> {
        Rc::clone(&self.recognizer)
    }

    pub fn answerer(&self) -> Rc<dyn AnswerService> {
        Rc::clone(&self.answerer)
    }

    fn show(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice::new(kind, message, Instant::now()));
    }

    /// Capture the current page for recognition and mark the session as loading.
    pub fn start_recognition(&mut self) -> Option<PendingRecognition> {
        if self.loading {
            log::warn!("A collaborator call is already pending");
            return None;
        }
        let request = match self.canvas.request_recognition() {
            Ok(request) => request,
            Err(e) => {
                self.show(NoticeKind::Info, e.to_string());
                return None;
            }
        };
        let image = match export_region_png(&request.region, self.export_scale, self.renderer.fonts()) {
            Ok(image) => image,
            Err(e) => {
                self.show(NoticeKind::Error, format!("Export failed: {e}"));
                return None;
            }
        };
        self.loading = true;
        Some(PendingRecognition { request, image })
    }

    /// Apply a recognition result. Failures leave the page untouched.
    pub fn finish_recognition(
        &mut self,
        pending: PendingRecognition,
        result: ServiceResult<String>,
    ) -> Option<ItemId> {
        self.loading = false;
        match result {
            Ok(text) => {
                let id = self.canvas.apply_recognition(&pending.request, &text);
                if id.is_none() {
                    self.show(NoticeKind::Info, "Nothing was recognized");
                }
                id
            }
            Err(e) => {
                log::warn!("Recognition failed: {e}");
                self.show(NoticeKind::Error, format!("Recognition failed: {e}"));
                None
            }
        }
    }

    /// Recognize the current page and insert the result.
    pub async fn recognize(&mut self) -> Option<ItemId> {
        let pending = self.start_recognition()?;
        let service = self.recognizer();
        let result = pending.send(&*service).await;
        self.finish_recognition(pending, result)
    }

    /// Capture the live selection for an answer and mark the session as loading.
    pub fn start_answer(&mut self, length: AnswerLength) -> Option<PendingAnswer> {
        if self.loading {
            log::warn!("A collaborator call is already pending");
            return None;
        }
        let request = match self.canvas.request_answer(length) {
            Ok(request) => request,
            Err(e) => {
                self.show(NoticeKind::Info, e.to_string());
                return None;
            }
        };
        let image = match export_region_png(&request.region, self.export_scale, self.renderer.fonts()) {
            Ok(image) => image,
            Err(e) => {
                self.show(NoticeKind::Error, format!("Export failed: {e}"));
                return None;
            }
        };
        self.loading = true;
        Some(PendingAnswer { request, image })
    }

    /// Store an answer. The page is never modified.
    pub fn finish_answer(&mut self, _pending: PendingAnswer, result: ServiceResult<String>) -> Option<&str> {
        self.loading = false;
        match result {
            Ok(text) => {
                self.answer = Some(text);
                self.answer.as_deref()
            }
            Err(e) => {
                log::warn!("Answer failed: {e}");
                self.show(NoticeKind::Error, format!("Answer failed: {e}"));
                None
            }
        }
    }

    /// Ask about the live selection.
    pub async fn ask(&mut self, length: AnswerLength) -> Option<String> {
        let pending = self.start_answer(length)?;
        let service = self.answerer();
        let result = pending.send(&*service).await;
        self.finish_answer(pending, result).map(str::to_owned)
    }

    /// PNG of the live selection, as it would be sent to the answer collaborator.
    pub fn selection_png(&self) -> AppResult<Option<Vec<u8>>> {
        let Ok(request) = self.canvas.request_answer(AnswerLength::default()) else {
            return Ok(None);
        };
        let png = export_region_png(&request.region, self.export_scale, self.renderer.fonts())?;
        Ok(Some(png))
    }

    /// Draw the current frame, including any gesture in progress.
    pub fn render(&mut self) -> AppResult<&Pixmap> {
        let preview = self.gestures.preview(&self.canvas);
        let ctx = RenderContext::new(&self.canvas, &preview, self.viewport_size)
            .with_scale_factor(self.pixel_ratio);
        self.renderer.build_scene(&ctx);
        self.renderer.render()?;
        Ok(self.renderer.pixmap())
    }

    /// Draw the current frame and encode it as PNG.
    pub fn frame_png(&mut self) -> AppResult<Vec<u8>> {
        let pixmap = self.render()?;
        Ok(encode_png(pixmap)?)
    }
}
