//! Skip link and keyboard activation for navigation links.

use std::rc::Rc;

use crate::config::FxConfig;
use crate::error::{PortfolioFxError, Result};
use crate::host::{EventKind, Host, Target};

pub const SKIP_LINK_TEXT: &str = "Skip to main content";

/// Handle for the installed accessibility augmentations.
pub struct Accessibility<E> {
    skip_link: E,
    keyboard_links: usize,
}

impl<E: Clone + 'static> Accessibility<E> {
    /// Insert the skip link as the body's first child and make every nav
    /// link activate on Enter.
    ///
    /// # Errors
    /// Fails if the page has no body or the skip link cannot be created.
    pub fn install<H>(host: &Rc<H>, config: &FxConfig) -> Result<Self>
    where
        H: Host<Element = E> + 'static,
    {
        let body = host
            .body()
            .ok_or_else(|| PortfolioFxError::Dom("document has no body".to_string()))?;
        let skip_link = host.create_element("a")?;
        host.set_attribute(&skip_link, "href", &config.skip_link_target)?;
        host.add_class(&skip_link, &config.classes.skip_link);
        host.set_text(&skip_link, SKIP_LINK_TEXT);
        host.prepend_child(&body, &skip_link)?;

        let links = host.query_all(&config.selectors.nav_links);
        for link in &links {
            let weak = Rc::downgrade(host);
            let activated = link.clone();
            host.listen(
                Target::Element(link),
                EventKind::KeyDown,
                Box::new(move |event| {
                    if event.key() != Some("Enter") {
                        return;
                    }
                    event.prevent_default();
                    if let Some(host) = weak.upgrade() {
                        host.click(&activated);
                    }
                }),
            );
        }

        Ok(Self {
            skip_link,
            keyboard_links: links.len(),
        })
    }

    pub fn skip_link(&self) -> &E {
        &self.skip_link
    }

    /// Number of nav links that respond to Enter.
    pub fn keyboard_links(&self) -> usize {
        self.keyboard_links
    }
}
