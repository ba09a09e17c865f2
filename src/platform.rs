use fridge_poetry_core::Platform;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Touch capability, probed once at start-up unless the config forces it.
pub(crate) fn detect_platform(force_touch: Option<bool>) -> Platform {
    if let Some(is_touch) = force_touch {
        return Platform { is_touch };
    }
    let Some(window) = web_sys::window() else {
        return Platform::POINTER;
    };
    let has_touch_events =
        Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    let touch_points = window.navigator().max_touch_points();
    Platform {
        is_touch: has_touch_events || touch_points > 0,
    }
}
