//! portfolio-fx - interactive effects for a static portfolio page
//!
//! Compiled to WebAssembly and loaded next to the page markup:
//! - Header state and offset-aware smooth scrolling for in-page links
//! - Scroll-triggered reveals and active navigation highlighting
//! - Pointer tilt on project cards
//! - Typing cursor, scroll-to-top button and keyboard/skip-link accessibility
//! - Debounced scroll work, page timing on local hosts
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init from 'portfolio-fx';
//! await init(); // effects install themselves once the DOM is ready
//! ```
//!
//! Built without the `autostart` feature, the page chooses its own options:
//!
//! ```javascript
//! import init, { init_with_config } from 'portfolio-fx';
//! await init();
//! init_with_config({ thresholds: { scroll_top_visible: 800 } });
//! ```
//!
//! Everything except the browser host runs natively too; see
//! [`host::HeadlessPage`] for driving the effects without a browser.

pub mod bootstrap;
pub mod config;
pub mod controllers;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;

pub use bootstrap::{boot, Effects, Page};
pub use config::FxConfig;
pub use error::{PortfolioFxError, Result};

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::bootstrap::{boot, Page};
    use crate::config::FxConfig;
    use crate::error::Result;
    use crate::host::WebHost;
    use crate::logging;

    thread_local! {
        static PAGE: RefCell<Option<Page<WebHost>>> = const { RefCell::new(None) };
    }

    /// Boot the page once per module instance.
    pub(crate) fn run(config: FxConfig) -> Result<()> {
        console_error_panic_hook::set_once();
        logging::init(config.log_level.into());

        PAGE.with(|slot| {
            if slot.borrow().is_some() {
                log::warn!("page effects already initialized; ignoring new configuration");
                return Ok(());
            }
            let host = Rc::new(WebHost::new()?);
            let page = boot(&host, config)?;
            *slot.borrow_mut() = Some(page);
            Ok(())
        })
    }
}

/// Module start hook: boot with the default configuration.
#[cfg(all(target_arch = "wasm32", feature = "autostart"))]
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    entry::run(FxConfig::default()).map_err(Into::into)
}

/// Boot the page effects with options decoded from a plain JS object.
///
/// Missing fields take their defaults. Only the first initialization takes
/// effect.
///
/// # Errors
/// Returns an error if the options are malformed or no document exists.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_with_config(options: JsValue) -> std::result::Result<(), JsValue> {
    let config = FxConfig::from_js(options)?;
    entry::run(config)?;
    Ok(())
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
