//! Minimal CSS selector matching for the headless page.
//!
//! Supports what the portfolio effects query with:
//! - type, `#id`, `.class` and `*` simple selectors, compounded (`a.nav-link`)
//! - attribute selectors `[attr]`, `[attr=v]`, `[attr^=v]`, `[attr$=v]`,
//!   `[attr*=v]` with optional quotes
//! - descendant (` `) and child (`>`) combinators
//! - comma-separated selector lists

/// Read-only view of one element for matching purposes.
pub trait SelectorTarget: Sized {
    fn local_name(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn parent(&self) -> Option<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

impl AttrMatch {
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(v) => value == v,
            AttrOp::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            AttrOp::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            AttrOp::Contains(v) => !v.is_empty() && value.contains(v.as_str()),
        }
    }
}

/// A run of simple selectors with no combinator between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches<T: SelectorTarget>(&self, el: &T) -> bool {
        if let Some(tag) = &self.tag {
            if !el.local_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c))
            && self.attrs.iter().all(|a| a.matches(el.attr(&a.name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// One selector of a list: compounds joined left-to-right by combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    head: Compound,
    rest: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches<T: SelectorTarget>(&self, el: &T) -> bool {
        let mut parts: Vec<&Compound> = Vec::with_capacity(self.rest.len() + 1);
        let mut combinators: Vec<Combinator> = Vec::with_capacity(self.rest.len());
        parts.push(&self.head);
        for (combinator, compound) in &self.rest {
            combinators.push(*combinator);
            parts.push(compound);
        }
        match_right_to_left(&parts, &combinators, el)
    }
}

/// Match `parts` against `el` and its ancestors, rightmost compound first.
fn match_right_to_left<T: SelectorTarget>(
    parts: &[&Compound],
    combinators: &[Combinator],
    el: &T,
) -> bool {
    let Some((last, earlier)) = parts.split_last() else {
        return true;
    };
    if !last.matches(el) {
        return false;
    }
    let Some((combinator, earlier_combinators)) = combinators.split_last() else {
        return earlier.is_empty();
    };
    match combinator {
        Combinator::Child => el
            .parent()
            .is_some_and(|p| match_right_to_left(earlier, earlier_combinators, &p)),
        Combinator::Descendant => {
            let mut ancestor = el.parent();
            while let Some(a) = ancestor {
                if match_right_to_left(earlier, earlier_combinators, &a) {
                    return true;
                }
                ancestor = a.parent();
            }
            false
        }
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(Vec<Complex>);

impl SelectorList {
    /// True if any selector in the list matches `el`.
    pub fn matches<T: SelectorTarget>(&self, el: &T) -> bool {
        self.0.iter().any(|c| c.matches(el))
    }
}

/// Parse a selector list. Returns `None` for anything outside the supported
/// grammar, the way `querySelectorAll` rejects a malformed selector.
pub fn parse(selector: &str) -> Option<SelectorList> {
    let mut list = Vec::new();
    for part in selector.split(',') {
        list.push(parse_complex(part.trim())?);
    }
    if list.is_empty() {
        return None;
    }
    Some(SelectorList(list))
}

fn parse_complex(input: &str) -> Option<Complex> {
    let mut chars = input.chars().peekable();
    let mut compounds: Vec<Compound> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut current = Compound::default();
    let mut pending: Option<Combinator> = None;

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' | '>' => {
                let mut combinator = Combinator::Descendant;
                while let Some(&c) = chars.peek() {
                    match c {
                        '>' => {
                            if combinator == Combinator::Child {
                                return None;
                            }
                            combinator = Combinator::Child;
                        }
                        c if c.is_whitespace() => {}
                        _ => break,
                    }
                    chars.next();
                }
                if current.is_empty() {
                    return None;
                }
                compounds.push(std::mem::take(&mut current));
                pending = Some(combinator);
            }
            '#' => {
                chars.next();
                current.id = Some(read_ident(&mut chars)?);
            }
            '.' => {
                chars.next();
                current.classes.push(read_ident(&mut chars)?);
            }
            '[' => {
                chars.next();
                current.attrs.push(read_attr(&mut chars)?);
            }
            '*' => {
                chars.next();
                if !current.is_empty() {
                    return None;
                }
                // Placeholder so the compound counts as non-empty; dropped by
                // `normalize_universal` once parsing is done.
                current.tag = Some("*".to_string());
            }
            c if is_ident_char(c) => {
                if current.tag.is_some() || !current.is_empty() {
                    return None;
                }
                current.tag = Some(read_ident(&mut chars)?.to_ascii_lowercase());
            }
            _ => return None,
        }
        if let Some(combinator) = pending.take() {
            if chars.peek().is_none() {
                return None;
            }
            combinators.push(combinator);
        }
    }

    if current.is_empty() {
        return None;
    }
    compounds.push(current);

    let mut compounds = compounds.into_iter();
    let mut head = compounds.next()?;
    normalize_universal(&mut head);
    let rest = combinators
        .into_iter()
        .zip(compounds)
        .map(|(c, mut compound)| {
            normalize_universal(&mut compound);
            (c, compound)
        })
        .collect();
    Some(Complex { head, rest })
}

fn normalize_universal(compound: &mut Compound) {
    if compound.tag.as_deref() == Some("*") {
        compound.tag = None;
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    if ident.is_empty() {
        None
    } else {
        Some(ident)
    }
}

fn read_attr(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<AttrMatch> {
    skip_ws(chars);
    let name = read_ident(chars)?.to_ascii_lowercase();
    skip_ws(chars);
    let op_char = match chars.next()? {
        ']' => {
            return Some(AttrMatch {
                name,
                op: AttrOp::Exists,
            })
        }
        '=' => None,
        c @ ('^' | '$' | '*') => {
            if chars.next()? != '=' {
                return None;
            }
            Some(c)
        }
        _ => return None,
    };
    skip_ws(chars);
    let value = read_attr_value(chars)?;
    skip_ws(chars);
    if chars.next()? != ']' {
        return None;
    }
    let op = match op_char {
        None => AttrOp::Equals(value),
        Some('^') => AttrOp::Prefix(value),
        Some('$') => AttrOp::Suffix(value),
        Some(_) => AttrOp::Contains(value),
    };
    Some(AttrMatch { name, op })
}

fn read_attr_value(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    match chars.peek().copied()? {
        quote @ ('"' | '\'') => {
            chars.next();
            let mut value = String::new();
            loop {
                let c = chars.next()?;
                if c == quote {
                    return Some(value);
                }
                value.push(c);
            }
        }
        _ => {
            let mut value = String::new();
            while let Some(&c) = chars.peek() {
                if c == ']' || c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        }
    }
}

fn skip_ws(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
