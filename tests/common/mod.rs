//! Shared page fixture for the integration tests.
//!
//! Builds the stock portfolio layout on a [`HeadlessPage`] with a
//! 1280x800 viewport:
//!
//! | element            | top  | height |
//! |--------------------|------|--------|
//! | header             | 0    | 80     |
//! | section#hero       | 0    | 600    |
//! | section#about      | 600  | 600    |
//! | section#projects   | 1200 | 800    |
//! | section#contact    | 2000 | 600    |
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

use std::rc::Rc;

use portfolio_fx::host::{Dom, HeadlessPage, NodeId};

pub const HEADER_HEIGHT: f64 = 80.0;

pub struct Portfolio {
    pub page: Rc<HeadlessPage>,
    pub header: NodeId,
    pub logo: NodeId,
    /// `#hero`, `#about`, `#projects`, `#contact` in that order.
    pub nav_links: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub code: NodeId,
    pub highlights: Vec<NodeId>,
    pub skills: Vec<NodeId>,
    pub cards: Vec<NodeId>,
    pub contacts: Vec<NodeId>,
}

/// The stock page, already parsed, on a non-local host.
pub fn portfolio() -> Portfolio {
    build(HeadlessPage::new())
}

/// The stock page built on a caller-configured document.
pub fn build(page: HeadlessPage) -> Portfolio {
    let page = page.with_viewport(1280.0, 800.0);
    let body = page.body_node();

    let header = page.element(body, "header").at(0.0, HEADER_HEIGHT).build();
    let logo = page
        .element(header, "a")
        .class("logo")
        .attr("href", "#")
        .text("Portfolio")
        .build();
    let nav = page.element(header, "ul").class("nav-links").build();
    let nav_links = ["hero", "about", "projects", "contact"]
        .iter()
        .map(|id| {
            let item = page.element(nav, "li").build();
            page.element(item, "a")
                .attr("href", &format!("#{id}"))
                .text(id)
                .build()
        })
        .collect();

    let hero = page.element(body, "section").id("hero").at(0.0, 600.0).build();
    let code = page
        .element(hero, "div")
        .class("code-content")
        .at(200.0, 300.0)
        .text("fn main() {}")
        .build();

    let about = page.element(body, "section").id("about").at(600.0, 600.0).build();
    let highlights = [650.0, 750.0, 850.0]
        .iter()
        .map(|top| page.element(about, "div").class("highlight-item").at(*top, 80.0).build())
        .collect();
    let skills = [950.0, 1050.0]
        .iter()
        .map(|top| page.element(about, "div").class("skill-category").at(*top, 100.0).build())
        .collect();

    let projects = page
        .element(body, "section")
        .id("projects")
        .at(1200.0, 800.0)
        .build();
    let cards = [(1250.0, 100.0), (1250.0, 450.0), (1550.0, 100.0)]
        .iter()
        .map(|(top, left)| {
            page.element(projects, "article")
                .class("project-card")
                .layout(*top, *left, 300.0, 250.0)
                .build()
        })
        .collect();

    let contact = page
        .element(body, "section")
        .id("contact")
        .at(2000.0, 600.0)
        .build();
    let contacts = [
        (2050.0, "mailto:me@example.com"),
        (2100.0, "https://github.com/example"),
    ]
    .iter()
    .map(|(top, href)| {
        page.element(contact, "a")
            .class("contact-link")
            .attr("href", href)
            .at(*top, 40.0)
            .build()
    })
    .collect();

    Portfolio {
        page: Rc::new(page),
        header,
        logo,
        nav_links,
        sections: vec![hero, about, projects, contact],
        code,
        highlights,
        skills,
        cards,
        contacts,
    }
}

impl Portfolio {
    /// Scroll like a user and let every debounce window elapse.
    pub fn scroll_and_settle(&self, y: f64) {
        self.page.user_scroll(y);
        self.page.advance(200.0);
    }

    pub fn active_nav_links(&self) -> Vec<NodeId> {
        self.nav_links
            .iter()
            .copied()
            .filter(|l| self.page.has_class(l, "active"))
            .collect()
    }

    pub fn revealed(&self) -> usize {
        self.page.query_all(".reveal.active").len()
    }
}
