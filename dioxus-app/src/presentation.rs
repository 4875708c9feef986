use dioxus::prelude::*;
use portfolio_core::presentation::{Presentation, Theme};
use std::rc::Rc;

use crate::sounds::{SoundBoard, WebAudioNotifier};

/// Installs the presentation signal and the sound board for everything below.
pub fn use_presentation_provider() -> Signal<Presentation> {
    let presentation = use_context_provider(|| Signal::new(Presentation::default()));
    use_context_provider(|| SoundBoard(Rc::new(WebAudioNotifier::new(presentation))));

    use_effect(move || {
        let theme = presentation.read().theme;
        mirror_theme(theme);
    });

    presentation
}

pub fn use_presentation() -> Signal<Presentation> {
    use_context::<Signal<Presentation>>()
}

fn mirror_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        use portfolio_core::presentation::THEME_ATTRIBUTE;
        if let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _theme = theme;
}
