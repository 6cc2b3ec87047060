//! Installs every page effect once the document is ready.
//!
//! Controllers run in a fixed order: navigation, reveal, cards, typing
//! cursor, scroll-to-top, active section, accessibility. A controller that
//! fails to install is logged and skipped; the rest still run.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::FxConfig;
use crate::controllers::{
    Accessibility, ActiveSection, CardTilt, Navigation, PageTiming, PerfLog, RevealOnScroll,
    ScrollTopButton, TypingCursor,
};
use crate::error::Result;
use crate::host::{is_loopback, EventKind, Host, Target};

/// Handles for every installed controller. `None` marks a controller whose
/// installation failed.
pub struct Effects<E> {
    pub navigation: Option<Navigation>,
    pub reveal: Option<RevealOnScroll>,
    pub cards: Option<CardTilt>,
    pub typing_cursor: Option<TypingCursor>,
    pub scroll_top: Option<ScrollTopButton<E>>,
    pub active_section: Option<ActiveSection>,
    pub accessibility: Option<Accessibility<E>>,
}

fn attempt<T>(name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("{name}: {e}");
            None
        }
    }
}

impl<E: Clone + 'static> Effects<E> {
    /// Install all controllers in order.
    pub fn install<H>(host: &Rc<H>, config: &FxConfig) -> Self
    where
        H: Host<Element = E> + 'static,
    {
        let effects = Self {
            navigation: attempt("navigation", Navigation::install(host, config)),
            reveal: attempt("reveal", RevealOnScroll::install(host, config)),
            cards: attempt("cards", CardTilt::install(host, config)),
            typing_cursor: attempt("typing cursor", TypingCursor::install(host, config)),
            scroll_top: attempt("scroll-to-top", ScrollTopButton::install(host, config)),
            active_section: attempt("active section", ActiveSection::install(host, config)),
            accessibility: attempt("accessibility", Accessibility::install(host, config)),
        };
        log::info!("page effects installed");
        effects
    }
}

/// A booted page: the host, its effects (once ready) and the optional
/// performance logger.
pub struct Page<H: Host> {
    host: Rc<H>,
    effects: Rc<RefCell<Option<Effects<H::Element>>>>,
    perf: Option<Rc<PerfLog>>,
}

impl<H: Host + 'static> Page<H> {
    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// True once the controllers have been installed.
    pub fn is_ready(&self) -> bool {
        self.effects.borrow().is_some()
    }

    pub fn effects(&self) -> Ref<'_, Option<Effects<H::Element>>> {
        self.effects.borrow()
    }

    /// Timing record, present only when performance logging is enabled.
    pub fn timing(&self) -> Option<PageTiming> {
        self.perf.as_ref().map(|p| p.timing())
    }
}

fn install_once<H: Host + 'static>(
    host: &Rc<H>,
    config: &FxConfig,
    slot: &RefCell<Option<Effects<H::Element>>>,
    perf: Option<&PerfLog>,
) {
    if slot.borrow().is_some() {
        return;
    }
    if let Some(perf) = perf {
        perf.mark_dom_ready(host.now_ms());
    }
    let effects = Effects::install(host, config);
    *slot.borrow_mut() = Some(effects);
}

/// Boot all page effects on `host`.
///
/// Runs immediately when the document has finished parsing, otherwise on
/// `DOMContentLoaded`. Performance logging is added only on loopback hosts.
///
/// # Errors
/// Returns [`InvalidConfig`](crate::error::PortfolioFxError::InvalidConfig) if `config` fails
/// [`FxConfig::validate`]; nothing is installed in that case.
pub fn boot<H: Host + 'static>(host: &Rc<H>, config: FxConfig) -> Result<Page<H>> {
    config.validate()?;
    let effects = Rc::new(RefCell::new(None));

    let hostname = host.hostname();
    let perf = if is_loopback(&hostname) {
        Some(Rc::new(PerfLog::install(host)))
    } else {
        None
    };

    if host.is_loading() {
        let weak = Rc::downgrade(host);
        let slot = Rc::clone(&effects);
        let perf = perf.clone();
        host.listen(
            Target::Document,
            EventKind::DomContentLoaded,
            Box::new(move |_| {
                if let Some(host) = weak.upgrade() {
                    install_once(&host, &config, &slot, perf.as_deref());
                }
            }),
        );
    } else {
        install_once(host, &config, &effects, perf.as_deref());
    }

    Ok(Page {
        host: Rc::clone(host),
        effects,
        perf,
    })
}
