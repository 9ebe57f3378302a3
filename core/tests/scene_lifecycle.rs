use popcorn_saga_core::{
    Completion, GenerationError, ImageRef, MemoryStore, SceneController, SceneOptions,
    StorageReport, GALLERY_MAX,
};

fn build_scene() -> SceneController<MemoryStore> {
    SceneController::new(MemoryStore::new(), SceneOptions::default())
}

fn succeed(scene: &mut SceneController<MemoryStore>, image: &str) -> Completion {
    let ticket = scene.begin_generation().expect("no request in flight");
    scene.complete_generation(ticket.token, Ok(ImageRef::from(image)))
}

fn fail(scene: &mut SceneController<MemoryStore>, err: GenerationError) -> Completion {
    let ticket = scene.begin_generation().expect("no request in flight");
    scene.complete_generation(ticket.token, Err(err))
}

fn gallery(scene: &SceneController<MemoryStore>) -> Vec<&str> {
    scene
        .state()
        .gallery
        .entries()
        .iter()
        .map(ImageRef::as_str)
        .collect()
}

fn current(scene: &SceneController<MemoryStore>) -> Option<&str> {
    scene.state().current_image.as_ref().map(ImageRef::as_str)
}

#[test]
fn successive_generations_build_gallery_most_recent_first() {
    let mut scene = build_scene();

    let completion = succeed(&mut scene, "img-1");
    assert_eq!(
        completion,
        Completion::Succeeded {
            image: "img-1".into(),
            persisted: StorageReport::Saved,
        }
    );
    assert_eq!(gallery(&scene), vec!["img-1"]);
    assert_eq!(current(&scene), Some("img-1"));

    succeed(&mut scene, "img-2");
    assert_eq!(gallery(&scene), vec!["img-2", "img-1"]);
    assert_eq!(current(&scene), Some("img-2"));

    succeed(&mut scene, "img-1");
    assert_eq!(gallery(&scene), vec!["img-1", "img-2"]);
    assert_eq!(current(&scene), Some("img-1"));
    assert!(!scene.state().loading);
}

#[test]
fn seven_distinct_generations_evict_oldest() {
    let mut scene = build_scene();
    for idx in 1..=7 {
        succeed(&mut scene, &format!("img-{idx}"));
    }
    assert_eq!(scene.state().gallery.len(), GALLERY_MAX);
    assert_eq!(
        gallery(&scene),
        vec!["img-7", "img-6", "img-5", "img-4", "img-3", "img-2"]
    );
}

#[test]
fn gallery_never_exceeds_cap_or_repeats() {
    let mut scene = build_scene();
    let pattern = [1, 2, 3, 1, 4, 5, 6, 7, 2, 8, 8, 3, 9, 1];
    for idx in pattern {
        succeed(&mut scene, &format!("img-{idx}"));
        let entries = gallery(&scene);
        assert!(entries.len() <= GALLERY_MAX);
        for (pos, entry) in entries.iter().enumerate() {
            assert!(!entries[pos + 1..].contains(entry), "duplicate {entry}");
        }
        assert_eq!(entries[0], format!("img-{idx}"));
    }
}

#[test]
fn structured_rejection_sets_prefixed_error_and_keeps_state() {
    let mut scene = build_scene();
    succeed(&mut scene, "img-1");

    let completion = fail(&mut scene, GenerationError::message("quota exceeded"));
    assert_eq!(
        completion,
        Completion::Failed(GenerationError::Message("quota exceeded".to_string()))
    );
    assert_eq!(
        scene.state().error.as_deref(),
        Some("An error occurred: quota exceeded")
    );
    assert_eq!(gallery(&scene), vec!["img-1"]);
    assert_eq!(current(&scene), Some("img-1"));
    assert!(!scene.state().loading);
}

#[test]
fn unknown_rejection_uses_fallback_message() {
    let mut scene = build_scene();
    fail(&mut scene, GenerationError::Unknown);
    assert_eq!(
        scene.state().error.as_deref(),
        Some("An unknown error occurred.")
    );
    assert!(scene.state().gallery.is_empty());
    assert_eq!(current(&scene), None);
}

#[test]
fn failure_does_not_touch_storage() {
    let mut scene = build_scene();
    fail(&mut scene, GenerationError::Unknown);
    assert!(!scene
        .store()
        .contains_key(popcorn_saga_core::GALLERY_STORAGE_KEY));
}

#[test]
fn clear_gallery_resets_everything() {
    let mut scene = build_scene();
    succeed(&mut scene, "img-1");
    succeed(&mut scene, "img-2");
    scene.clear_gallery();
    assert!(scene.state().gallery.is_empty());
    assert_eq!(current(&scene), None);
    assert!(!scene
        .store()
        .contains_key(popcorn_saga_core::GALLERY_STORAGE_KEY));

    scene.clear_gallery();
    assert!(scene.state().gallery.is_empty());
}

#[test]
fn select_image_changes_only_current() {
    let mut scene = build_scene();
    succeed(&mut scene, "img-1");
    succeed(&mut scene, "img-2");
    scene.select_image("img-1".into());
    assert_eq!(current(&scene), Some("img-1"));
    assert_eq!(gallery(&scene), vec!["img-2", "img-1"]);
}

#[test]
fn write_failure_still_applies_result() {
    let mut scene = SceneController::new(MemoryStore::read_only(), SceneOptions::default());
    let ticket = scene.begin_generation().unwrap();
    let completion = scene.complete_generation(ticket.token, Ok("img-1".into()));
    assert!(matches!(
        completion,
        Completion::Succeeded {
            persisted: StorageReport::Failed(_),
            ..
        }
    ));
    assert_eq!(scene.state().current_image, Some("img-1".into()));
    assert_eq!(scene.state().gallery.len(), 1);
    assert!(!scene.state().loading);
}
