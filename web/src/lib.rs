use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug, Default, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    options: game::VaultProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let parsed = Args::try_parse_from(location_hash.split(['#', '&']));
    let args = parsed.as_ref().cloned().unwrap_or_default();
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {err}"));
        }
    }
    if let Err(err) = parsed {
        log::warn!("Ignoring options from location hash: {}", err);
    }
    log::debug!("options: {:?}", args.options);

    let Some(root) = document().get_element_by_id("vault") else {
        log::error!("Could not find id=\"vault\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<game::VaultView>::with_root_and_props(root, args.options).render();
}
