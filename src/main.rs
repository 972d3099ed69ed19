//! Tennis Splash entry point
//!
//! On the web this boots the splash and page embellishments. Natively it
//! plays the splash headlessly and prints a JSON report.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    tennis_splash::platform::boot();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tennis Splash (native) starting...");
    log::info!("Native mode is a headless replay - run with `trunk serve` for the web version");

    // Optional seed argument for reproducible runs
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);

    let report = tennis_splash::sim::clock::run_headless(seed, 1000.0, 800.0);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
