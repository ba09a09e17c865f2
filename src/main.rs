mod app;
mod app_core;
mod config;
mod dom_view;
mod input;
mod platform;
mod word_source;

fn main() {
    if let Err(err) = app::start() {
        gloo::console::error!(format!("fridge poetry failed to start: {err}"));
    }
}
