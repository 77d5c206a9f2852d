//! End-to-end runs of the library API against a scripted enhancer.
use std::fs;
use std::sync::Mutex;

use pixelenhance::{
    DataUri, Enhancer, Error, OutputTarget, Resolution, Result, UiState, UploadedImage, Workflow,
    api,
};

/// Returns queued replies in order and records what it was asked for.
struct ScriptedEnhancer {
    replies: Mutex<Vec<Result<DataUri>>>,
    seen: Mutex<Vec<(String, Resolution)>>,
}

impl ScriptedEnhancer {
    fn new(mut replies: Vec<Result<DataUri>>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Enhancer for ScriptedEnhancer {
    fn enhance(&self, image: &DataUri, resolution: Resolution) -> Result<DataUri> {
        self.seen
            .lock()
            .unwrap()
            .push((image.mime_type().to_string(), resolution));
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(Error::NoImageData { detail: None }))
    }
}

#[test]
fn cat_photo_enhances_and_saves_under_derived_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cat.jpg");
    fs::write(&input, b"\xFF\xD8\xFFlow quality").unwrap();

    let enhancer = ScriptedEnhancer::new(vec![Ok(DataUri::encode("image/png", b"crisp pixels"))]);
    let out_dir = dir.path().join("out");
    let written = api::enhance_file_to_path(
        &enhancer,
        &input,
        Resolution::P1080,
        &OutputTarget::Directory(out_dir.clone()),
    )
    .unwrap();

    assert_eq!(written, out_dir.join("cat-enhanced-1080p.jpg"));
    assert_eq!(fs::read(&written).unwrap(), b"crisp pixels");
    assert_eq!(
        enhancer.seen.lock().unwrap().as_slice(),
        &[("image/jpeg".to_string(), Resolution::P1080)]
    );
}

#[test]
fn explicit_output_path_wins_over_download_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan");
    fs::write(&input, b"raw").unwrap();

    let enhancer = ScriptedEnhancer::new(vec![Ok(DataUri::encode("image/png", b"done"))]);
    let target = dir.path().join("result.png");
    let written =
        api::enhance_file_to_path(&enhancer, &input, Resolution::P144, &OutputTarget::File(target.clone()))
            .unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read(&target).unwrap(), b"done");
}

#[test]
fn every_tier_label_lands_in_the_download_name() {
    let image = UploadedImage::from_bytes("holiday.photo.webp", "image/webp", b"webp");
    for tier in Resolution::ALL {
        let enhancer = ScriptedEnhancer::new(vec![Ok(DataUri::encode("image/png", b"x"))]);
        let result = api::enhance_image(&enhancer, &image, tier).unwrap();
        assert_eq!(
            result.download_name,
            format!("holiday.photo-enhanced-{}.webp", tier.label())
        );
    }
}

#[test]
fn failed_enhancement_can_be_retried_without_reupload() {
    let enhancer = ScriptedEnhancer::new(vec![
        Err(Error::Service {
            status: 429,
            message: "Resource exhausted".to_string(),
        }),
        Ok(DataUri::encode("image/png", b"second try")),
    ]);
    let mut workflow = Workflow::new();
    workflow
        .accept_upload(UploadedImage::from_bytes("dog.png", "image/png", b"png"))
        .unwrap();

    let request = workflow.begin_enhancement(Resolution::P720).unwrap();
    let outcome = enhancer.enhance(&request.image, request.resolution);
    assert!(workflow.complete_enhancement(request.ticket, outcome));
    let message = workflow.error().unwrap().to_string();
    assert!(message.starts_with("Failed to enhance image: "), "{message}");
    assert!(message.contains("Resource exhausted"), "{message}");
    assert!(matches!(workflow.state(), UiState::Errored { .. }));

    let request = workflow.begin_enhancement(Resolution::P2160).unwrap();
    let outcome = enhancer.enhance(&request.image, request.resolution);
    assert!(workflow.complete_enhancement(request.ticket, outcome));
    assert!(workflow.error().is_none());

    let dir = tempfile::tempdir().unwrap();
    let saved = api::save_enhanced_in(workflow.result().unwrap(), dir.path()).unwrap();
    assert_eq!(saved.file_name().unwrap(), "dog-enhanced-2160p.png");
    assert_eq!(fs::read(saved).unwrap(), b"second try");
}

#[test]
fn unreadable_upload_reports_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");
    assert!(matches!(api::load_image(&missing), Err(Error::ReadFailed { .. })));
}
