use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Date, Math};

use crate::app_core::{AppCore, AppSubscription};
use crate::config::{AppConfig, REFRESH_BUTTON_ID};
use crate::dom_view::{DomView, ViewError};
use crate::input::{install_listeners, InputContext};
use crate::platform::detect_platform;
use crate::word_source::load_words;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StartError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Everything that has to outlive `start`.
struct App {
    _core: Rc<AppCore>,
    _input: Rc<InputContext>,
    _render: AppSubscription,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub(crate) fn start() -> Result<(), StartError> {
    let config = AppConfig::from_location();
    let window = web_sys::window().ok_or(StartError::NoWindow)?;
    let document = window.document().ok_or(StartError::NoDocument)?;
    let platform = detect_platform(config.force_touch);
    let view = Rc::new(DomView::attach(&document, platform)?);
    let seed = config.seed.unwrap_or_else(entropy_seed);
    let core = AppCore::new(platform, &view.pool_ids(), seed);

    let render = {
        let view = Rc::clone(&view);
        let source = Rc::downgrade(&core);
        core.subscribe(Rc::new(move || {
            if let Some(core) = source.upgrade() {
                view.render(&core.snapshot());
            }
        }))
    };
    view.render(&core.snapshot());

    let input = InputContext::new(Rc::clone(&core), Rc::clone(&view), document.clone());
    let refresh_button = document.get_element_by_id(REFRESH_BUTTON_ID);
    if refresh_button.is_none() {
        gloo::console::warn!(format!("#{REFRESH_BUTTON_ID} not found; refresh is disabled"));
    }
    let listeners = install_listeners(&input, refresh_button.as_ref());

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _core: Rc::clone(&core),
            _input: input,
            _render: render,
            _listeners: listeners,
        });
    });

    wasm_bindgen_futures::spawn_local(async move {
        match load_words(&config.words_url).await {
            Ok(words) => {
                if let Err(err) = core.set_words(words) {
                    gloo::console::error!(format!("Could not lay out the word list: {err}"));
                }
            }
            Err(err) => {
                gloo::console::error!(format!("Could not load the word list: {err}"));
                core.set_load_failed(err.to_string());
            }
        }
    });
    Ok(())
}

fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn entropy_seed() -> u64 {
    let random = (Math::random() * u32::MAX as f64) as u64;
    let now = Date::now() as u64;
    splitmix64((random << 32) ^ now)
}

#[cfg(test)]
mod tests {
    use super::splitmix64;

    #[test]
    fn splitmix_spreads_neighbouring_inputs() {
        let a = splitmix64(1);
        let b = splitmix64(2);
        assert_ne!(a, b);
        assert_ne!(a, 1);
        assert_eq!(splitmix64(1), a);
    }
}
