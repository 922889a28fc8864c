use festival_ui::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting festival UI");
    mount_to_body(App);
}
