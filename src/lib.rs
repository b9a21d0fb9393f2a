/// Review Monitor Options - settings page for the review monitor extension
/// Built with Rust + WASM + Yew

pub mod controller;
pub mod instance;
pub mod storage;
pub mod validation;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
