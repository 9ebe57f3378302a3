mod app_core;
mod app_router;
mod browser_store;
mod gemini;
mod yew_app;

use std::rc::Rc;

use crate::app_core::AppCore;
use crate::browser_store::BrowserStore;
use crate::gemini::GeminiGenerator;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    let config = app_router::load_init_config();
    #[cfg(target_arch = "wasm32")]
    {
        if config.generator.api_key.is_none() {
            gloo::console::warn!("config: no API key compiled in, generation will fail");
        }
        gloo::console::log!(
            "boot: model",
            config.generator.model.clone(),
            "character",
            config.character.slug()
        );
    }
    let core = AppCore::new(
        Rc::new(BrowserStore),
        Rc::new(GeminiGenerator::new(config.generator)),
        config.scene,
        config.character,
    );
    yew_app::run(core);
}
