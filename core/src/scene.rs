//! Generation lifecycle and gallery bookkeeping for one browser session.
//!
//! The controller is the single logical actor: every transition happens in
//! response to a user action or to the resolution of the one outstanding
//! generation call.

use std::cell::RefCell;

use crate::storage::{self, GalleryLoad, KeyValueStore};
use crate::{Character, Gallery, GenerationError, ImageGenerator, ImageRef, StorageError};

/// Identifies one generation request. Tokens increase monotonically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationTicket {
    pub token: RequestToken,
    pub character: Character,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneOptions {
    /// Drop the displayed image as soon as a request starts.
    pub clear_image_on_start: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneState {
    pub loading: bool,
    pub current_image: Option<ImageRef>,
    pub error: Option<String>,
    pub selected: Character,
    pub gallery: Gallery,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageReport {
    Saved,
    Failed(StorageError),
}

impl From<Result<(), StorageError>> for StorageReport {
    fn from(result: Result<(), StorageError>) -> Self {
        match result {
            Ok(()) => StorageReport::Saved,
            Err(err) => StorageReport::Failed(err),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Succeeded {
        image: ImageRef,
        persisted: StorageReport,
    },
    Failed(GenerationError),
    /// The result did not belong to the request in flight and was dropped.
    Stale(RequestToken),
}

pub struct SceneController<S> {
    store: S,
    options: SceneOptions,
    state: SceneState,
    in_flight: Option<GenerationTicket>,
    next_token: u64,
}

impl<S: KeyValueStore> SceneController<S> {
    pub fn new(store: S, options: SceneOptions) -> Self {
        Self {
            store,
            options,
            state: SceneState::default(),
            in_flight: None,
            next_token: 1,
        }
    }

    /// Reads the persisted gallery. Meant to run once at startup; the most
    /// recent entry becomes the displayed image.
    pub fn restore(&mut self) -> GalleryLoad {
        let load = storage::load_gallery(&self.store);
        self.state.gallery = load.clone().into_gallery();
        if let Some(latest) = self.state.gallery.latest() {
            self.state.current_image = Some(latest.clone());
        }
        load
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn options(&self) -> SceneOptions {
        self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn in_flight(&self) -> Option<GenerationTicket> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Starts a request for the selected character. Returns `None` while
    /// another request is pending.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let token = RequestToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        let ticket = GenerationTicket {
            token,
            character: self.state.selected,
        };
        self.state.error = None;
        self.state.loading = true;
        if self.options.clear_image_on_start {
            self.state.current_image = None;
        }
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    pub fn complete_generation(
        &mut self,
        token: RequestToken,
        result: Result<ImageRef, GenerationError>,
    ) -> Completion {
        match self.in_flight {
            Some(ticket) if ticket.token == token => {}
            _ => return Completion::Stale(token),
        }
        self.in_flight = None;
        self.state.loading = false;
        match result {
            Ok(image) => {
                self.state.current_image = Some(image.clone());
                self.state.gallery.push(image.clone());
                let persisted = storage::save_gallery(&self.store, &self.state.gallery).into();
                Completion::Succeeded { image, persisted }
            }
            Err(err) => {
                self.state.error = Some(err.user_message());
                Completion::Failed(err)
            }
        }
    }

    pub fn set_character(&mut self, character: Character) {
        self.state.selected = character;
    }

    pub fn select_image(&mut self, image: ImageRef) {
        self.state.current_image = Some(image);
    }

    pub fn clear_gallery(&mut self) {
        self.state.gallery.clear();
        self.state.current_image = None;
        storage::clear_gallery(&self.store);
    }
}

/// Runs one generation end to end. `notify` is called after the request
/// starts and again after its result is applied. Returns `None` when a
/// request was already pending.
pub async fn generate_scene<S, G, F>(
    controller: &RefCell<SceneController<S>>,
    generator: &G,
    notify: F,
) -> Option<Completion>
where
    S: KeyValueStore,
    G: ImageGenerator + ?Sized,
    F: Fn(),
{
    let ticket = controller.borrow_mut().begin_generation()?;
    notify();
    let result = generator.generate(ticket.character).await;
    let completion = controller
        .borrow_mut()
        .complete_generation(ticket.token, result);
    notify();
    Some(completion)
}
