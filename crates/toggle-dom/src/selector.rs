//! Selector parsing and matching
//!
//! Supports selector lists, compound selectors (type, universal, id,
//! class, attribute) and the descendant and child combinators.

use crate::{DomError, DomTree, NodeId};

/// Comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compound selectors joined by combinators, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    pub combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector(pub Vec<SelectorComponent>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(value)) = (&self.matcher, value) else {
            // [attr] only checks existence
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected.as_str()),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected.as_str());
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected.as_str());
                val == expected || val.starts_with(&format!("{expected}-"))
            }
            // Empty needles never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected.as_str()))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected.as_str()))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected.as_str()))
            }
        }
    }
}

impl SelectorList {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let mut parser = Parser::new(input);
        let mut list = vec![parser.complex()?];
        loop {
            parser.skip_whitespace();
            match parser.peek() {
                None => break,
                Some(',') => {
                    parser.bump();
                    list.push(parser.complex()?);
                }
                Some(c) => return Err(parser.error(format!("unexpected '{c}'"))),
            }
        }
        Ok(Self(list))
    }

    /// Check if the node matches any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.0.iter().any(|complex| complex.matches(tree, node))
    }
}

impl ComplexSelector {
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, node, n - 1),
        }
    }

    // Right-to-left: `idx` is the compound that `node` must satisfy
    fn matches_at(&self, tree: &DomTree, node: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(tree, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => tree
                .parent_element(node)
                .is_some_and(|parent| self.matches_at(tree, parent, idx - 1)),
            Combinator::Descendant => {
                let mut ancestor = tree.parent_element(node);
                while let Some(id) = ancestor {
                    if self.matches_at(tree, id, idx - 1) {
                        return true;
                    }
                    ancestor = tree.parent_element(id);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.element(node) else {
            return false;
        };
        self.0.iter().all(|component| match component {
            SelectorComponent::Universal => true,
            SelectorComponent::Type(tag) => element.tag_name() == tag.as_str(),
            SelectorComponent::Id(id) => element.id() == Some(id.as_str()),
            SelectorComponent::Class(class) => element.classes().contains(class),
            SelectorComponent::Attribute(attr) => attr.matches(element.get_attr(&attr.name)),
        })
    }
}

type MakeMatcher = fn(String) -> AttributeMatcher;

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Skip whitespace, returns whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::InvalidSelector {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn complex(&mut self) -> Result<ComplexSelector, DomError> {
        self.skip_whitespace();
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected '{c}'"))),
            };
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<CompoundSelector, DomError> {
        let mut components = Vec::new();

        while let Some(c) = self.peek() {
            let component = match c {
                '*' if components.is_empty() => {
                    self.bump();
                    SelectorComponent::Universal
                }
                '#' => {
                    self.bump();
                    SelectorComponent::Id(self.ident()?)
                }
                '.' => {
                    self.bump();
                    SelectorComponent::Class(self.ident()?)
                }
                '[' => {
                    self.bump();
                    SelectorComponent::Attribute(self.attribute()?)
                }
                c if is_ident_char(c) && components.is_empty() => {
                    SelectorComponent::Type(self.ident()?.to_ascii_lowercase())
                }
                _ => break,
            };
            components.push(component);
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found '{c}'")),
                None => self.error("expected a selector"),
            });
        }
        Ok(CompoundSelector(components))
    }

    fn ident(&mut self) -> Result<String, DomError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an identifier"));
        }
        let ident: String = self.chars[start..self.pos].iter().collect();
        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error(format!("identifier '{ident}' starts with a digit")));
        }
        Ok(ident)
    }

    // Called after '['
    fn attribute(&mut self) -> Result<AttributeSelector, DomError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let matcher: Option<MakeMatcher> = match self.peek() {
            Some(']') => None,
            Some('=') => Some(AttributeMatcher::Exact as MakeMatcher),
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                self.bump();
                if self.peek() != Some('=') {
                    return Err(self.error(format!("expected '=' after '{op}'")));
                }
                Some(match op {
                    '~' => AttributeMatcher::Contains as MakeMatcher,
                    '|' => AttributeMatcher::DashMatch as MakeMatcher,
                    '^' => AttributeMatcher::Prefix as MakeMatcher,
                    '$' => AttributeMatcher::Suffix as MakeMatcher,
                    _ => AttributeMatcher::Substring as MakeMatcher,
                })
            }
            Some(c) => return Err(self.error(format!("unexpected '{c}' in attribute selector"))),
            None => return Err(self.error("unterminated attribute selector")),
        };

        let mut selector = AttributeSelector {
            name,
            matcher: None,
            case_insensitive: false,
        };

        if let Some(make) = matcher {
            // consume '='
            self.bump();
            self.skip_whitespace();
            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.bump();
                    self.quoted(quote)?
                }
                _ => self.ident()?,
            };
            selector.matcher = Some(make(value));

            self.skip_whitespace();
            match self.peek() {
                Some('i' | 'I') => {
                    self.bump();
                    selector.case_insensitive = true;
                }
                Some('s' | 'S') => {
                    self.bump();
                }
                _ => {}
            }
            self.skip_whitespace();
        }

        match self.bump() {
            Some(']') => Ok(selector),
            _ => Err(self.error("unterminated attribute selector")),
        }
    }

    // Called after the opening quote
    fn quoted(&mut self, quote: char) -> Result<String, DomError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => break,
            }
        }
        Err(self.error("unterminated string"))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str, case_insensitive: bool) -> SelectorComponent {
        SelectorComponent::Attribute(AttributeSelector {
            name: name.to_string(),
            matcher: Some(AttributeMatcher::Exact(value.to_string())),
            case_insensitive,
        })
    }

    #[test]
    fn test_parse_attribute_presence() {
        let list = SelectorList::parse("[data-toggle]").unwrap();
        assert_eq!(list.0.len(), 1);
        assert_eq!(
            list.0[0].compounds[0].0[0],
            SelectorComponent::Attribute(AttributeSelector {
                name: "data-toggle".to_string(),
                matcher: None,
                case_insensitive: false,
            })
        );
    }

    #[test]
    fn test_parse_quoted_values() {
        let list = SelectorList::parse(r#"[data-toggle="  "]"#).unwrap();
        assert_eq!(list.0[0].compounds[0].0[0], attr("data-toggle", "  ", false));

        let list = SelectorList::parse("[type='Text' i]").unwrap();
        assert_eq!(list.0[0].compounds[0].0[0], attr("type", "Text", true));
    }

    #[test]
    fn test_parse_compound_and_combinators() {
        let list = SelectorList::parse("nav > ul li.item#first, .sidebar").unwrap();
        assert_eq!(list.0.len(), 2);

        let first = &list.0[0];
        assert_eq!(first.compounds.len(), 3);
        assert_eq!(first.combinators, vec![Combinator::Child, Combinator::Descendant]);
        assert_eq!(
            first.compounds[2].0,
            vec![
                SelectorComponent::Type("li".to_string()),
                SelectorComponent::Class("item".to_string()),
                SelectorComponent::Id("first".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", ".", "#", "[data-x", "div >", "a,", "[x~y]", "[x=\"open]", ".1abc", "!"] {
            assert!(
                matches!(SelectorList::parse(bad), Err(DomError::InvalidSelector { .. })),
                "expected parse error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_attribute_matchers() {
        let sel = |matcher| AttributeSelector {
            name: "x".to_string(),
            matcher: Some(matcher),
            case_insensitive: false,
        };

        assert!(sel(AttributeMatcher::Contains("b".into())).matches(Some("a b c")));
        assert!(sel(AttributeMatcher::DashMatch("en".into())).matches(Some("en-US")));
        assert!(sel(AttributeMatcher::Prefix("nav".into())).matches(Some("nav-open")));
        assert!(sel(AttributeMatcher::Suffix("open".into())).matches(Some("nav-open")));
        assert!(sel(AttributeMatcher::Substring("v-o".into())).matches(Some("nav-open")));
        assert!(!sel(AttributeMatcher::Prefix(String::new())).matches(Some("anything")));
        assert!(!sel(AttributeMatcher::Exact("a".into())).matches(None));
    }

    #[test]
    fn test_case_insensitive_exact() {
        let selector = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("TEXT".to_string())),
            case_insensitive: true,
        };
        assert!(selector.matches(Some("text")));
    }
}
