use std::rc::Rc;

use popcorn_saga_core::{Character, ImageRef, CHARACTERS};
use yew::prelude::*;

use crate::app_core::AppCore;

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<AppCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

#[function_component(Header)]
fn header() -> Html {
    html! {
        <header class="header">
            <h1 class="title">{ "Heroic Popcorn Saga" }</h1>
            <p class="subtitle">{ "AI-Powered Scene Generator" }</p>
        </header>
    }
}

#[function_component(LoadingSpinner)]
fn loading_spinner() -> Html {
    html! {
        <div class="spinner-overlay">
            <svg class="spinner" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                <circle class="spinner-track" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                <path class="spinner-head" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path>
            </svg>
            <p class="spinner-label">{ "Crafting cinematic brilliance..." }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ImageDisplayProps {
    image: Option<ImageRef>,
    loading: bool,
    character: Character,
}

#[function_component(ImageDisplay)]
fn image_display(props: &ImageDisplayProps) -> Html {
    let placeholder = if props.image.is_none() && !props.loading {
        html! {
            <div class="placeholder">
                <h2>{ "Your Scene Awaits" }</h2>
                <p>{ "Click the button below to generate the epic moment." }</p>
            </div>
        }
    } else {
        html! {}
    };
    let image = match props.image.as_ref() {
        Some(image) => {
            let alt = format!("Generated game scene of a heroic {}", props.character.label());
            html! {
                <img
                    key={image.as_str().to_string()}
                    class="scene-image"
                    src={image.as_str().to_string()}
                    {alt}
                />
            }
        }
        None => html! {},
    };
    html! {
        <div class="stage">
            if props.loading {
                <LoadingSpinner />
            }
            {placeholder}
            {image}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ErrorBannerProps {
    message: String,
}

#[function_component(ErrorBanner)]
fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="error-banner" role="alert">
            <p><strong>{ "Generation Failed" }</strong></p>
            <p class="error-detail">{ props.message.clone() }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CharacterPickerProps {
    selected: Character,
    on_select: Callback<Character>,
}

#[function_component(CharacterPicker)]
fn character_picker(props: &CharacterPickerProps) -> Html {
    let options = CHARACTERS.iter().copied().map(|character| {
        let checked = character == props.selected;
        let onchange = {
            let on_select = props.on_select.clone();
            Callback::from(move |_: Event| on_select.emit(character))
        };
        html! {
            <label
                key={character.slug()}
                class={classes!("character-option", checked.then_some("selected"))}
            >
                <input
                    type="radio"
                    name="character"
                    value={character.slug()}
                    {checked}
                    {onchange}
                />
                <span class="character-badge">{ character.badge() }</span>
                <span class="character-label">{ character.label() }</span>
            </label>
        }
    });
    html! {
        <fieldset class="character-picker">
            <legend>{ "Choose your hero" }</legend>
            { for options }
        </fieldset>
    }
}

#[derive(Properties, PartialEq)]
struct GenerateButtonProps {
    disabled: bool,
    on_click: Callback<MouseEvent>,
}

#[function_component(GenerateButton)]
fn generate_button(props: &GenerateButtonProps) -> Html {
    let label = if props.disabled {
        "Generating..."
    } else {
        "Generate Scene"
    };
    html! {
        <button
            class="generate-button"
            type="button"
            disabled={props.disabled}
            onclick={props.on_click.clone()}
        >
            <svg class="generate-icon" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                <path
                    stroke-linecap="round"
                    stroke-linejoin="round"
                    stroke-width="2"
                    d="M9.663 17h4.673M12 3v1m6.364 1.636l-.707.707M21 12h-1M4 12H3m3.343-5.657l-.707-.707m2.828 9.9a5 5 0 117.072 0l-.548.547A3.374 3.374 0 0014 18.469V19a2 2 0 11-4 0v-.531c0-.895-.356-1.754-.988-2.386l-.548-.547z"
                />
            </svg>
            <span>{ label }</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct GalleryProps {
    entries: Vec<ImageRef>,
    current: Option<ImageRef>,
    on_select: Callback<ImageRef>,
    on_clear: Callback<MouseEvent>,
}

#[function_component(Gallery)]
fn gallery(props: &GalleryProps) -> Html {
    if props.entries.is_empty() {
        return html! {};
    }
    let thumbs = props.entries.iter().enumerate().map(|(idx, image)| {
        let active = props.current.as_ref() == Some(image);
        let onclick = {
            let on_select = props.on_select.clone();
            let image = image.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(image.clone()))
        };
        let title = format!("Scene {}", idx + 1);
        html! {
            <li key={idx}>
                <button
                    type="button"
                    class={classes!("thumb", active.then_some("active"))}
                    aria-pressed={active.to_string()}
                    title={title.clone()}
                    {onclick}
                >
                    <img src={image.as_str().to_string()} alt={title} />
                </button>
            </li>
        }
    });
    html! {
        <section class="gallery">
            <div class="gallery-header">
                <h2>{ "Recent Scenes" }</h2>
                <button type="button" class="gallery-clear" onclick={props.on_clear.clone()}>
                    { "Clear" }
                </button>
            </div>
            <ul class="gallery-grid">
                { for thumbs }
            </ul>
        </section>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="footer">
            <p>{ "Powered by Google Gemini API. Concept Art Generator." }</p>
        </footer>
    }
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let scene = use_state(|| app_core.snapshot());
    {
        let app_core = app_core.clone();
        let scene = scene.clone();
        use_effect_with((), move |_| {
            let app_core_for_cb = app_core.clone();
            let subscription = app_core.subscribe(Rc::new(move || {
                scene.set(app_core_for_cb.snapshot());
            }));
            move || drop(subscription)
        });
    }

    let on_generate = {
        let app_core = app_core.clone();
        Callback::from(move |_: MouseEvent| {
            app_core.request_generation();
        })
    };
    let on_character = {
        let app_core = app_core.clone();
        Callback::from(move |character: Character| {
            app_core.set_character(character);
        })
    };
    let on_select_image = {
        let app_core = app_core.clone();
        Callback::from(move |image: ImageRef| {
            app_core.select_image(image);
        })
    };
    let on_clear = {
        let app_core = app_core.clone();
        Callback::from(move |_: MouseEvent| {
            app_core.clear_gallery();
        })
    };

    let error_banner = match scene.error.as_ref() {
        Some(message) => html! { <ErrorBanner message={message.clone()} /> },
        None => html! {},
    };

    html! {
        <div class="app">
            <main class="content">
                <Header />
                <CharacterPicker selected={scene.selected} on_select={on_character} />
                <ImageDisplay
                    image={scene.current_image.clone()}
                    loading={scene.loading}
                    character={scene.selected}
                />
                {error_banner}
                <GenerateButton disabled={scene.loading} on_click={on_generate} />
                <Gallery
                    entries={scene.gallery.entries().to_vec()}
                    current={scene.current_image.clone()}
                    on_select={on_select_image}
                    {on_clear}
                />
            </main>
            <Footer />
        </div>
    }
}

pub(crate) fn run(core: Rc<AppCore>) {
    yew::Renderer::<App>::with_props(AppProps { core }).render();
}
