//! Parser and evaluator for RFC 4515 search filters.
//!
//! Covers what the processors emit: `&`, `|`, `!`, equality, presence and
//! substring assertions with `\XX` escapes. Matching is case-insensitive.

use thiserror::Error;

use crate::domain::search::SearchEntry;

/// Errors that can occur while parsing a filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("Empty filter")]
    Empty,

    #[error("Unexpected end of filter")]
    UnexpectedEnd,

    #[error("Unexpected character '{found}' at position {position}")]
    Unexpected { found: char, position: usize },

    #[error("Invalid escape sequence at position {0}")]
    InvalidEscape(usize),

    #[error("Unsupported match operator at position {0}")]
    UnsupportedOperator(usize),

    #[error("Trailing characters after filter at position {0}")]
    Trailing(usize),
}

/// Parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LdapFilter {
    And(Vec<LdapFilter>),
    Or(Vec<LdapFilter>),
    Not(Box<LdapFilter>),
    Present(String),
    Equal {
        attribute: String,
        value: String,
    },
    Substring {
        attribute: String,
        initial: Option<String>,
        any: Vec<String>,
        last: Option<String>,
    },
}

impl LdapFilter {
    /// Parses a complete filter string.
    pub fn parse(input: &str) -> Result<Self, FilterParseError> {
        if input.trim().is_empty() {
            return Err(FilterParseError::Empty);
        }
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
        };
        let filter = parser.filter()?;
        if parser.pos != parser.chars.len() {
            return Err(FilterParseError::Trailing(parser.pos));
        }
        Ok(filter)
    }

    /// Evaluates the filter against `entry`.
    pub fn matches(&self, entry: &SearchEntry) -> bool {
        match self {
            LdapFilter::And(items) => items.iter().all(|f| f.matches(entry)),
            LdapFilter::Or(items) => items.iter().any(|f| f.matches(entry)),
            LdapFilter::Not(inner) => !inner.matches(entry),
            LdapFilter::Present(attribute) => entry.has_attribute(attribute),
            LdapFilter::Equal { attribute, value } => {
                let wanted = value.to_lowercase();
                entry
                    .values(attribute)
                    .iter()
                    .any(|v| v.to_lowercase() == wanted)
            }
            LdapFilter::Substring {
                attribute,
                initial,
                any,
                last,
            } => entry
                .values(attribute)
                .iter()
                .any(|v| substring_matches(&v.to_lowercase(), initial, any, last)),
        }
    }
}

fn substring_matches(
    value: &str,
    initial: &Option<String>,
    any: &[String],
    last: &Option<String>,
) -> bool {
    let mut rest = value;

    if let Some(initial) = initial {
        let initial = initial.to_lowercase();
        match rest.strip_prefix(initial.as_str()) {
            Some(r) => rest = r,
            None => return false,
        }
    }

    for part in any {
        let part = part.to_lowercase();
        match rest.find(part.as_str()) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }

    match last {
        Some(last) => rest.ends_with(last.to_lowercase().as_str()),
        None => true,
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expect(&mut self, wanted: char) -> Result<(), FilterParseError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(FilterParseError::Unexpected {
                found,
                position: self.pos,
            }),
            None => Err(FilterParseError::UnexpectedEnd),
        }
    }

    fn filter(&mut self) -> Result<LdapFilter, FilterParseError> {
        self.expect('(')?;
        let filter = match self.peek() {
            Some('&') => {
                self.pos += 1;
                LdapFilter::And(self.filter_list()?)
            }
            Some('|') => {
                self.pos += 1;
                LdapFilter::Or(self.filter_list()?)
            }
            Some('!') => {
                self.pos += 1;
                LdapFilter::Not(Box::new(self.filter()?))
            }
            Some(_) => self.item()?,
            None => return Err(FilterParseError::UnexpectedEnd),
        };
        self.expect(')')?;
        Ok(filter)
    }

    fn filter_list(&mut self) -> Result<Vec<LdapFilter>, FilterParseError> {
        let mut items = Vec::new();
        while self.peek() == Some('(') {
            items.push(self.filter()?);
        }
        Ok(items)
    }

    fn item(&mut self) -> Result<LdapFilter, FilterParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '=' || c == '(' || c == ')' {
                break;
            }
            self.pos += 1;
        }
        let attribute: String = self.chars[start..self.pos].iter().collect();
        if attribute.is_empty() {
            return match self.peek() {
                Some(found) => Err(FilterParseError::Unexpected {
                    found,
                    position: self.pos,
                }),
                None => Err(FilterParseError::UnexpectedEnd),
            };
        }
        if attribute.ends_with(&['>', '<', '~', ':'][..]) {
            return Err(FilterParseError::UnsupportedOperator(self.pos - 1));
        }
        self.expect('=')?;

        let mut segments = self.value_segments()?;
        if segments.len() == 1 {
            return Ok(LdapFilter::Equal {
                attribute,
                value: segments.remove(0),
            });
        }
        if segments.len() == 2 && segments.iter().all(String::is_empty) {
            return Ok(LdapFilter::Present(attribute));
        }

        let last = segments.pop().filter(|s| !s.is_empty());
        let initial = Some(segments.remove(0)).filter(|s| !s.is_empty());
        let any = segments.into_iter().filter(|s| !s.is_empty()).collect();
        Ok(LdapFilter::Substring {
            attribute,
            initial,
            any,
            last,
        })
    }

    /// Reads an assertion value, split on unescaped `*`.
    fn value_segments(&mut self) -> Result<Vec<String>, FilterParseError> {
        let mut segments = Vec::new();
        let mut current: Vec<u8> = Vec::new();

        loop {
            match self.peek() {
                None => return Err(FilterParseError::UnexpectedEnd),
                Some(')') => break,
                Some('(') => {
                    return Err(FilterParseError::Unexpected {
                        found: '(',
                        position: self.pos,
                    })
                }
                Some('*') => {
                    segments.push(String::from_utf8_lossy(&current).into_owned());
                    current.clear();
                    self.pos += 1;
                }
                Some('\\') => {
                    let at = self.pos;
                    let hex: String = self.chars.get(at + 1..at + 3).unwrap_or(&[]).iter().collect();
                    if hex.len() != 2 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                        return Err(FilterParseError::InvalidEscape(at));
                    }
                    let byte = u8::from_str_radix(&hex, 16)
                        .map_err(|_| FilterParseError::InvalidEscape(at))?;
                    current.push(byte);
                    self.pos += 3;
                }
                Some(c) => {
                    let mut buf = [0u8; 4];
                    current.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    self.pos += 1;
                }
            }
        }

        segments.push(String::from_utf8_lossy(&current).into_owned());
        Ok(segments)
    }
}
