use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use popcorn_saga_core::StorageReport;
use popcorn_saga_core::{
    generate_scene, Character, Completion, GalleryLoad, ImageGenerator, ImageRef, KeyValueStore,
    SceneController, SceneOptions, SceneState,
};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;
pub(crate) type SharedStore = Rc<dyn KeyValueStore>;

/// Shared owner of the scene state. Components hold an `Rc<AppCore>` and
/// re-render from [`AppCore::snapshot`] when notified.
pub(crate) struct AppCore {
    scene: RefCell<SceneController<SharedStore>>,
    generator: Rc<dyn ImageGenerator>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl AppCore {
    pub(crate) fn new(
        store: SharedStore,
        generator: Rc<dyn ImageGenerator>,
        options: SceneOptions,
        character: Character,
    ) -> Rc<Self> {
        let mut scene = SceneController::new(store, options);
        let load = scene.restore();
        log_gallery_load(&load);
        scene.set_character(character);
        Rc::new(Self {
            scene: RefCell::new(scene),
            generator,
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn snapshot(&self) -> SceneState {
        self.scene.borrow().state().clone()
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn set_character(&self, character: Character) {
        self.scene.borrow_mut().set_character(character);
        self.notify();
    }

    pub(crate) fn select_image(&self, image: ImageRef) {
        self.scene.borrow_mut().select_image(image);
        self.notify();
    }

    pub(crate) fn clear_gallery(&self) {
        self.scene.borrow_mut().clear_gallery();
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::log!("gallery: cleared");
        }
        self.notify();
    }

    /// Fire-and-forget generation for UI callbacks.
    pub(crate) fn request_generation(self: &Rc<Self>) {
        let core = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            core.generate().await;
        });
    }

    pub(crate) async fn generate(&self) -> Option<Completion> {
        let completion =
            generate_scene(&self.scene, self.generator.as_ref(), || self.notify()).await;
        match completion.as_ref() {
            Some(completion) => log_completion(completion),
            None => {
                #[cfg(target_arch = "wasm32")]
                {
                    gloo::console::log!("generate: ignored while loading");
                }
            }
        }
        completion
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

fn log_gallery_load(load: &GalleryLoad) {
    #[cfg(target_arch = "wasm32")]
    {
        match load {
            GalleryLoad::Empty => gloo::console::log!("gallery: empty"),
            GalleryLoad::Restored(gallery) => {
                gloo::console::log!("gallery: restored", gallery.len() as u32)
            }
            GalleryLoad::Discarded(corrupt) => {
                gloo::console::warn!("gallery: discarded stored value", corrupt.to_string())
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = load;
    }
}

fn log_completion(completion: &Completion) {
    #[cfg(target_arch = "wasm32")]
    {
        match completion {
            Completion::Succeeded {
                persisted: StorageReport::Saved,
                ..
            } => gloo::console::log!("generate: succeeded"),
            Completion::Succeeded {
                persisted: StorageReport::Failed(err),
                ..
            } => gloo::console::warn!("gallery: storage set failed", err.to_string()),
            Completion::Failed(err) => gloo::console::warn!("generate: failed", err.to_string()),
            Completion::Stale(token) => {
                gloo::console::log!("generate: stale result dropped", token.get() as f64)
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = completion;
    }
}
