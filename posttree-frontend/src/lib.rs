pub mod app;
pub mod logger;
pub mod panel;

pub mod path {
    pub const PATH_HOME: &str = "/";
    pub const PATH_FEED: &str = "/feed";
    pub const PATH_MYTREE: &str = "/mytree";
    pub const PATH_SETTINGS: &str = "/settings";
    pub const PATH_IMG_FALLBACK: &str = "/fail.png";
}

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use app::App;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    logger::simple_web_logger_init();
    tracing::debug!("mounting posttree");
    leptos::mount::mount_to_body(|| view! { <App /> });
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use app::App;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    logger::simple_web_logger_init();
    leptos::mount::hydrate_body(|| view! { <App /> });
}
