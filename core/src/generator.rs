pub use futures_util::future::LocalBoxFuture;

use crate::{Character, GenerationError, ImageRef};

/// The external image service. Futures are not `Send`: generation runs on
/// the browser's single thread.
pub trait ImageGenerator {
    fn generate(&self, character: Character)
        -> LocalBoxFuture<'_, Result<ImageRef, GenerationError>>;
}
