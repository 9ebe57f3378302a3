pub mod character;
pub mod error;
pub mod gallery;
pub mod generator;
pub mod image_ref;
pub mod scene;
pub mod storage;

pub use character::{Character, CharacterError, CHARACTERS};
pub use error::{CorruptState, GenerationError, StorageError};
pub use gallery::{push_image, Gallery, GALLERY_MAX};
pub use generator::{ImageGenerator, LocalBoxFuture};
pub use image_ref::ImageRef;
pub use scene::{
    generate_scene, Completion, GenerationTicket, RequestToken, SceneController, SceneOptions,
    SceneState, StorageReport,
};
pub use storage::{
    clear_gallery, load_gallery, save_gallery, GalleryLoad, KeyValueStore, MemoryStore,
    GALLERY_STORAGE_KEY,
};
