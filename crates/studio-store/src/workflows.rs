//! Async flows that call the image service on behalf of a session.
//!
//! Each flow follows the same contract: mark the session as loading, call the
//! service, then either record the result or store a user-facing error
//! message. Loading is cleared on every exit path, including when the flow's
//! future is dropped mid-call.
//!
//! Nothing fences stale responses: if two flows overlap, whichever finishes
//! last decides `current_image` and `error`.

use std::future::Future;

use chrono::Utc;
use tracing::{info, warn};

use studio_service::{
    EditRequest, EditedImage, EnhanceRequest, EnhancedImage, GenerateRequest, ImageAnalysis,
    ImageService, ServiceError, StyleRequest, StyledImage,
};
use studio_shared::constants::{DEFAULT_EDIT_TYPE, UPLOADED_ID_PREFIX};
use studio_shared::ids::timestamped_id;
use studio_shared::presets::find_preset;
use studio_shared::{GenerationSettings, ImageDraft, ImageKind, ImageRecord};

use crate::store::SessionHandle;

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a description for your image";
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate image. Please try again.";
pub const ENHANCE_FAILED_MESSAGE: &str = "Failed to enhance image";
pub const MODIFY_FAILED_MESSAGE: &str = "Failed to modify image";
pub const STYLE_FAILED_MESSAGE: &str = "Failed to apply style";
pub const ANALYZE_FAILED_MESSAGE: &str = "Failed to analyze image";

/// Sets `is_loading` on creation and clears it on drop.
struct LoadingGuard<'a> {
    session: &'a SessionHandle,
}

impl<'a> LoadingGuard<'a> {
    fn start(session: &'a SessionHandle) -> Self {
        session.with(|s| s.set_loading(true));
        Self { session }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.session.with(|s| s.set_loading(false));
    }
}

/// Generate an image from `prompt`, make it current and auto-save it to the
/// gallery.
pub async fn generate(
    session: &SessionHandle,
    service: &dyn ImageService,
    prompt: &str,
    settings: GenerationSettings,
) -> Option<ImageRecord> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        session.with(|s| s.set_error(EMPTY_PROMPT_MESSAGE));
        return None;
    }

    session.with(|s| s.clear_error());
    let _loading = LoadingGuard::start(session);

    let request = GenerateRequest {
        prompt: prompt.to_string(),
        model: settings.model.clone(),
        aspect_ratio: settings.aspect_ratio.clone(),
    };

    match service.generate(request).await {
        Ok(result) => {
            let draft = ImageDraft::new(result.url)
                .with_prompt(prompt)
                .with_settings(settings);
            let image = session.with(|s| {
                let image = s.add_generated_image(draft);
                s.add_to_gallery(image.clone());
                image
            });
            info!(id = %image.id, model = %result.model, "Image generated");
            Some(image)
        }
        Err(e) => {
            warn!(error = %e, "Image generation failed");
            session.with(|s| s.set_error(GENERATE_FAILED_MESSAGE));
            None
        }
    }
}

/// Shared body of the flows that replace the current image with a
/// service-transformed version of it.
///
/// The pre-edit image and filters go to the undo history only once the
/// service succeeds.
async fn transform_current<T, Fut>(
    session: &SessionHandle,
    failure_message: &str,
    call: impl FnOnce(String) -> Fut,
    update: impl FnOnce(ImageRecord, T) -> ImageRecord,
) -> Option<ImageRecord>
where
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let (current, snapshot) = session.with(|s| {
        let current = s.state().current_image.clone()?;
        Some((current, s.history_snapshot()))
    })?;

    let _loading = LoadingGuard::start(session);

    match call(current.url.clone()).await {
        Ok(output) => {
            let updated = update(current, output);
            session.with(|s| {
                s.add_to_history(snapshot);
                s.set_current_image(Some(updated.clone()));
                s.add_to_gallery(updated.clone());
            });
            info!(id = %updated.id, url = %updated.url, "Current image updated");
            Some(updated)
        }
        Err(e) => {
            warn!(error = %e, "Image transformation failed");
            session.with(|s| s.set_error(failure_message));
            None
        }
    }
}

/// Enhance the current image (`upscale`, `denoise`, ...). No-op without a
/// current image.
pub async fn enhance_current(
    session: &SessionHandle,
    service: &dyn ImageService,
    enhancement_type: &str,
) -> Option<ImageRecord> {
    transform_current(
        session,
        ENHANCE_FAILED_MESSAGE,
        |image_url| {
            service.enhance(EnhanceRequest {
                image_url,
                enhancement_type: enhancement_type.to_string(),
            })
        },
        |mut image: ImageRecord, enhanced: EnhancedImage| {
            image.url = enhanced.url;
            image.enhancement = Some(enhanced.enhancement_type);
            image
        },
    )
    .await
}

/// Apply a free-text AI modification to the current image. No-op without a
/// current image or with a blank prompt.
pub async fn modify_current(
    session: &SessionHandle,
    service: &dyn ImageService,
    prompt: &str,
) -> Option<ImageRecord> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }

    transform_current(
        session,
        MODIFY_FAILED_MESSAGE,
        |image_url| {
            service.edit(EditRequest {
                image_url,
                prompt: prompt.to_string(),
                edit_type: DEFAULT_EDIT_TYPE.to_string(),
            })
        },
        |mut image: ImageRecord, edited: EditedImage| {
            image.url = edited.url;
            image.edit_prompt = Some(edited.edit_prompt);
            image
        },
    )
    .await
}

pub async fn style_current(
    session: &SessionHandle,
    service: &dyn ImageService,
    style_name: &str,
) -> Option<ImageRecord> {
    let style_name = style_name.trim();
    if style_name.is_empty() {
        return None;
    }

    transform_current(
        session,
        STYLE_FAILED_MESSAGE,
        |image_url| {
            service.style_transfer(StyleRequest {
                image_url,
                style_name: style_name.to_string(),
            })
        },
        |mut image: ImageRecord, styled: StyledImage| {
            image.url = styled.url;
            image.style_applied = Some(styled.style_applied);
            image
        },
    )
    .await
}

/// Analyze the current image. Session state only changes through the
/// loading flag and, on failure, the error message.
pub async fn analyze_current(
    session: &SessionHandle,
    service: &dyn ImageService,
) -> Option<ImageAnalysis> {
    let url = session.with(|s| s.state().current_image.as_ref().map(|i| i.url.clone()))?;
    let _loading = LoadingGuard::start(session);

    match service.analyze(&url).await {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            warn!(error = %e, "Image analysis failed");
            session.with(|s| s.set_error(ANALYZE_FAILED_MESSAGE));
            None
        }
    }
}

/// Apply every adjustment of the named preset. Returns `false` for an
/// unknown preset.
pub fn apply_preset(session: &SessionHandle, key: &str) -> bool {
    let Some(preset) = find_preset(key) else {
        warn!(preset = %key, "Unknown filter preset");
        return false;
    };

    session.with(|s| {
        let snapshot = s.history_snapshot();
        s.add_to_history(snapshot);
        for (name, value) in preset.filters {
            s.apply_filter(*name, *value);
        }
    });
    info!(preset = %preset.key, "Filter preset applied");
    true
}

/// Remove every active filter.
pub fn reset_filters(session: &SessionHandle) {
    session.with(|s| {
        let names: Vec<String> = s.state().active_filters.keys().cloned().collect();
        if names.is_empty() {
            return;
        }
        let snapshot = s.history_snapshot();
        s.add_to_history(snapshot);
        for name in &names {
            s.remove_filter(name);
        }
    });
}

/// Save the current image together with the active filters.
pub fn save_current_to_gallery(session: &SessionHandle) -> Option<ImageRecord> {
    session.with(|s| {
        let current = s.state().current_image.clone()?;
        let mut draft = ImageDraft::from(current);
        draft.filters = Some(s.state().active_filters.clone());
        draft.edited_at = Some(Utc::now());
        Some(s.add_to_gallery(draft))
    })
}

/// Make a user-provided image current. Uploads are not saved to the gallery
/// until the user asks for it.
pub fn upload(session: &SessionHandle, name: &str, url: &str) -> ImageRecord {
    let image = ImageDraft::new(url).with_name(name).into_record(
        timestamped_id(UPLOADED_ID_PREFIX),
        ImageKind::Uploaded,
        Utc::now(),
    );
    session.with(|s| s.set_current_image(Some(image.clone())));
    info!(id = %image.id, name = %name, "Image uploaded");
    image
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use studio_service::{GeneratedImage, MockConfig, MockImageService};
    use studio_shared::FilterValue;

    use super::*;

    fn failing() -> MockImageService {
        MockImageService::new(MockConfig {
            simulate_latency: false,
            failure_rate: 1.0,
        })
    }

    /// Checks the session is marked loading while the call is in flight.
    struct LoadingProbe {
        session: SessionHandle,
        inner: MockImageService,
    }

    impl LoadingProbe {
        fn assert_loading(&self) {
            assert!(self.session.snapshot().is_loading);
        }
    }

    #[async_trait]
    impl ImageService for LoadingProbe {
        async fn generate(&self, req: GenerateRequest) -> Result<GeneratedImage, ServiceError> {
            self.assert_loading();
            self.inner.generate(req).await
        }

        async fn edit(&self, req: EditRequest) -> Result<EditedImage, ServiceError> {
            self.assert_loading();
            self.inner.edit(req).await
        }

        async fn enhance(&self, req: EnhanceRequest) -> Result<EnhancedImage, ServiceError> {
            self.assert_loading();
            self.inner.enhance(req).await
        }

        async fn style_transfer(&self, req: StyleRequest) -> Result<StyledImage, ServiceError> {
            self.assert_loading();
            self.inner.style_transfer(req).await
        }

        async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis, ServiceError> {
            self.assert_loading();
            self.inner.analyze(image_url).await
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let session = SessionHandle::new();
        let probe = LoadingProbe {
            session: session.clone(),
            inner: MockImageService::instant(),
        };

        let image = generate(&session, &probe, "  a banana  ", GenerationSettings::default())
            .await
            .unwrap();

        let state = session.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.current_image.as_ref(), Some(&image));
        assert_eq!(state.generated_images.len(), 1);
        assert_eq!(state.gallery.len(), 1);
        assert_eq!(state.gallery[0].id, image.id);
        assert_eq!(image.prompt.as_deref(), Some("a banana"));
        assert_eq!(image.model.as_deref(), Some("flux-pro/ultra"));
        assert_eq!(image.kind, ImageKind::Generated);
    }

    #[tokio::test]
    async fn test_generate_blank_prompt() {
        let session = SessionHandle::new();
        let out = generate(
            &session,
            &MockImageService::instant(),
            "   ",
            GenerationSettings::default(),
        )
        .await;
        assert!(out.is_none());
        let state = session.snapshot();
        assert_eq!(state.error.as_deref(), Some(EMPTY_PROMPT_MESSAGE));
        assert!(state.generated_images.is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_sets_error() {
        let session = SessionHandle::new();
        session.with(|s| s.set_error("stale"));

        let out = generate(&session, &failing(), "a banana", GenerationSettings::default()).await;
        assert!(out.is_none());

        let state = session.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(GENERATE_FAILED_MESSAGE));
        assert!(state.current_image.is_none());
    }

    #[tokio::test]
    async fn test_transform_without_current_image_is_noop() {
        let session = SessionHandle::new();
        let service = MockImageService::instant();
        let before = session.snapshot();

        assert!(enhance_current(&session, &service, "upscale").await.is_none());
        assert!(modify_current(&session, &service, "add a hat").await.is_none());
        assert!(style_current(&session, &service, "monet").await.is_none());
        assert!(analyze_current(&session, &service).await.is_none());
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn test_enhance_then_undo() {
        let session = SessionHandle::new();
        let service = MockImageService::instant();
        let original = upload(&session, "photo.png", "data:image/png;base64,AAAA");
        apply_preset(&session, "vintage");
        let filters_before = session.snapshot().active_filters;

        let enhanced = enhance_current(&session, &service, "upscale").await.unwrap();
        assert_eq!(enhanced.id, original.id);
        assert_ne!(enhanced.url, original.url);
        assert_eq!(enhanced.enhancement.as_deref(), Some("upscale"));

        let state = session.snapshot();
        assert_eq!(state.current_image.as_ref().map(|i| &i.url), Some(&enhanced.url));
        assert_eq!(state.gallery.len(), 1);
        assert!(!state.is_loading);

        session.with(|s| s.undo_last_action());
        let state = session.snapshot();
        assert_eq!(state.current_image, Some(original));
        assert_eq!(state.active_filters, filters_before);
    }

    #[tokio::test]
    async fn test_modify_and_style_metadata() {
        let session = SessionHandle::new();
        let service = LoadingProbe {
            session: session.clone(),
            inner: MockImageService::instant(),
        };
        upload(&session, "photo.png", "u");

        let modified = modify_current(&session, &service, "add a hat").await.unwrap();
        assert_eq!(modified.edit_prompt.as_deref(), Some("add a hat"));

        let styled = style_current(&session, &service, "ab").await.unwrap();
        assert_eq!(styled.style_applied.as_deref(), Some("ab"));
        assert_eq!(styled.url, "https://picsum.photos/seed/195/800/450");
        assert_eq!(styled.edit_prompt.as_deref(), Some("add a hat"));

        let state = session.snapshot();
        assert_eq!(state.edit_history.len(), 2);
        assert_eq!(state.gallery.len(), 1);
    }

    #[tokio::test]
    async fn test_modify_blank_prompt_is_noop() {
        let session = SessionHandle::new();
        upload(&session, "photo.png", "u");
        let before = session.snapshot();
        assert!(modify_current(&session, &MockImageService::instant(), " ")
            .await
            .is_none());
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn test_analyze_leaves_image_alone() {
        let session = SessionHandle::new();
        let image = upload(&session, "photo.png", "u");
        let analysis = analyze_current(&session, &MockImageService::instant())
            .await
            .unwrap();
        assert_eq!(analysis.objects.len(), 4);

        let state = session.snapshot();
        assert_eq!(state.current_image, Some(image));
        assert!(state.edit_history.is_empty());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_loading_cleared_when_flow_dropped() {
        let session = SessionHandle::new();
        let service = MockImageService::new(MockConfig {
            simulate_latency: true,
            failure_rate: 0.0,
        });

        let flow = generate(&session, &service, "slow", GenerationSettings::default());
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(10), flow).await;
        assert!(timed_out.is_err());

        let state = session.snapshot();
        assert!(!state.is_loading);
        assert!(state.generated_images.is_empty());
    }

    #[test]
    fn test_apply_preset() {
        let session = SessionHandle::new();
        assert!(apply_preset(&session, "blackwhite"));
        let state = session.snapshot();
        assert_eq!(state.active_filters["saturation"], FilterValue::Number(0.0));
        assert_eq!(state.active_filters["contrast"], FilterValue::Number(115.0));
        assert_eq!(state.edit_history.len(), 1);

        assert!(!apply_preset(&session, "sparkle"));
        assert_eq!(session.snapshot().edit_history.len(), 1);
    }

    #[test]
    fn test_presets_accumulate() {
        let session = SessionHandle::new();
        apply_preset(&session, "cool");
        apply_preset(&session, "warm");
        let filters = session.snapshot().active_filters;
        // warm overwrites temperature and tint, keeps cool's saturation
        assert_eq!(filters["temperature"], FilterValue::Number(200.0));
        assert_eq!(filters["saturation"], FilterValue::Number(110.0));
        assert_eq!(filters.len(), 4);
    }

    #[test]
    fn test_reset_filters() {
        let session = SessionHandle::new();
        reset_filters(&session);
        assert!(session.snapshot().edit_history.is_empty());

        apply_preset(&session, "dramatic");
        reset_filters(&session);
        let state = session.snapshot();
        assert!(state.active_filters.is_empty());

        session.with(|s| s.undo_last_action());
        assert_eq!(session.snapshot().active_filters.len(), 4);
    }

    #[test]
    fn test_save_current_snapshots_filters() {
        let session = SessionHandle::new();
        assert!(save_current_to_gallery(&session).is_none());

        let image = upload(&session, "photo.png", "u");
        apply_preset(&session, "cyberpunk");
        let saved = save_current_to_gallery(&session).unwrap();

        assert_eq!(saved.id, image.id);
        assert_eq!(saved.kind, ImageKind::Uploaded);
        assert_eq!(saved.filters.as_ref().map(|f| f.len()), Some(4));
        assert!(saved.edited_at.is_some());
        assert!(saved.saved_at.is_some());
        assert_eq!(session.snapshot().gallery, vec![saved]);
    }

    #[test]
    fn test_upload_not_saved() {
        let session = SessionHandle::new();
        session.with(|s| s.set_error("old"));
        let image = upload(&session, "photo.png", "u");
        assert!(image.id.starts_with("uploaded_"));
        assert_eq!(image.name.as_deref(), Some("photo.png"));

        let state = session.snapshot();
        assert!(state.gallery.is_empty());
        assert_eq!(state.error, None);
    }
}
