// LDAP-style record filters used by the bundled store adapters.
//
// Supported forms:
// - Equality: (attr=value)
// - Presence: (attr=*)
// - Conjunction, disjunction, negation: (&(..)(..)), (|(..)(..)), (!(..))
//
// A backslash takes the next character literally. Substring matches (an
// unescaped `*` anywhere but as the whole value) and ordering operators are
// not supported and are rejected as syntax errors.

use crate::record::ConfigurationRecord;
use cm_core::error::{CmError, Result};
use std::fmt;

/// Parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Equals { attribute: String, value: String },
    Present { attribute: String },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    /// Parse a filter string. Errors carry the offending filter text.
    ///
    /// ```
    /// # use cm_admin::filter::Filter;
    /// let filter = Filter::parse("(&(service.factoryPid=db)(_alias_pid=pool1))").unwrap();
    /// assert_eq!(filter.to_string(), "(&(service.factoryPid=db)(_alias_pid=pool1))");
    /// ```
    pub fn parse(text: &str) -> Result<Filter> {
        let mut parser = Parser {
            chars: text.chars().collect(),
            pos: 0,
        };
        parser.skip_whitespace();
        let filter = parser
            .filter()
            .map_err(|reason| CmError::filter_syntax(text, reason))?;
        parser.skip_whitespace();
        if parser.pos < parser.chars.len() {
            return Err(CmError::filter_syntax(
                text,
                format!("unexpected trailing input at position {}", parser.pos),
            ));
        }
        Ok(filter)
    }

    pub fn matches(&self, record: &ConfigurationRecord) -> bool {
        match self {
            Filter::Equals { attribute, value } => record.attribute(attribute) == Some(value.as_str()),
            Filter::Present { attribute } => record.attribute(attribute).is_some(),
            Filter::And(filters) => filters.iter().all(|f| f.matches(record)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(record)),
            Filter::Not(filter) => !filter.matches(record),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Equals { attribute, value } => {
                write!(f, "({attribute}=")?;
                for c in value.chars() {
                    if matches!(c, '(' | ')' | '\\' | '*') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, ")")
            }
            Filter::Present { attribute } => write!(f, "({attribute}=*)"),
            Filter::And(filters) => {
                write!(f, "(&")?;
                for filter in filters {
                    write!(f, "{filter}")?;
                }
                write!(f, ")")
            }
            Filter::Or(filters) => {
                write!(f, "(|")?;
                for filter in filters {
                    write!(f, "{filter}")?;
                }
                write!(f, ")")
            }
            Filter::Not(filter) => write!(f, "(!{filter})"),
        }
    }
}

/// Applies an optional filter string to a set of records, preserving order.
pub fn select<'a, I>(records: I, filter: Option<&str>) -> Result<Vec<ConfigurationRecord>>
where
    I: IntoIterator<Item = &'a ConfigurationRecord>,
{
    let filter = filter.map(Filter::parse).transpose()?;
    Ok(records
        .into_iter()
        .filter(|record| filter.as_ref().map_or(true, |f| f.matches(record)))
        .cloned()
        .collect())
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> std::result::Result<(), String> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(format!(
                "expected '{expected}' at position {}, found '{c}'",
                self.pos
            )),
            None => Err(format!("expected '{expected}' at end of input")),
        }
    }

    fn filter(&mut self) -> std::result::Result<Filter, String> {
        self.expect('(')?;
        self.skip_whitespace();
        let filter = match self.peek() {
            Some('&') => {
                self.pos += 1;
                Filter::And(self.filter_list()?)
            }
            Some('|') => {
                self.pos += 1;
                Filter::Or(self.filter_list()?)
            }
            Some('!') => {
                self.pos += 1;
                self.skip_whitespace();
                Filter::Not(Box::new(self.filter()?))
            }
            Some(_) => self.item()?,
            None => return Err("unexpected end of input".to_string()),
        };
        self.skip_whitespace();
        self.expect(')')?;
        Ok(filter)
    }

    fn filter_list(&mut self) -> std::result::Result<Vec<Filter>, String> {
        let mut filters = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('(') => filters.push(self.filter()?),
                _ => break,
            }
        }
        if filters.is_empty() {
            return Err(format!("empty filter list at position {}", self.pos));
        }
        Ok(filters)
    }

    fn item(&mut self) -> std::result::Result<Filter, String> {
        let start = self.pos;
        let mut attribute = String::new();
        loop {
            match self.peek() {
                Some('=') => break,
                Some(c @ ('<' | '>' | '~')) => {
                    return Err(format!(
                        "unsupported operator '{c}' at position {}",
                        self.pos
                    ))
                }
                Some('(' | ')') | None => {
                    return Err(format!("missing '=' in filter item at position {start}"))
                }
                Some(c) => {
                    attribute.push(c);
                    self.pos += 1;
                }
            }
        }
        let attribute = attribute.trim().to_string();
        if attribute.is_empty() {
            return Err(format!("missing attribute name at position {start}"));
        }
        self.pos += 1;

        let mut value = String::new();
        let mut escaped_wildcard = false;
        let mut wildcard_at = None;
        loop {
            match self.peek() {
                Some(')') => break,
                Some('(') => {
                    return Err(format!("unescaped '(' in value at position {}", self.pos))
                }
                Some('\\') => {
                    self.pos += 1;
                    let c = self
                        .peek()
                        .ok_or_else(|| "dangling escape at end of input".to_string())?;
                    escaped_wildcard |= c == '*';
                    value.push(c);
                    self.pos += 1;
                }
                Some(c) => {
                    if c == '*' && wildcard_at.is_none() {
                        wildcard_at = Some(self.pos);
                    }
                    value.push(c);
                    self.pos += 1;
                }
                None => return Err("unterminated filter item".to_string()),
            }
        }

        if value == "*" && !escaped_wildcard {
            return Ok(Filter::Present { attribute });
        }
        if let Some(pos) = wildcard_at {
            return Err(format!("substring match is not supported at position {pos}"));
        }
        Ok(Filter::Equals { attribute, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: &str, factory: Option<&str>, props: &[(&str, &str)]) -> ConfigurationRecord {
        let mut record = match factory {
            Some(factory) => ConfigurationRecord::factory_instance(pid, factory),
            None => ConfigurationRecord::singleton(pid),
        };
        for (k, v) in props {
            record.properties.insert(k.to_string(), v.to_string());
        }
        record
    }

    #[test]
    fn test_parse_equality() {
        let filter = Filter::parse("(service.pid=myservice)").unwrap();
        assert_eq!(
            filter,
            Filter::Equals {
                attribute: "service.pid".into(),
                value: "myservice".into()
            }
        );
    }

    #[test]
    fn test_parse_nested() {
        let filter = Filter::parse(" (|(a=1)(!(b=*))) ").unwrap();
        assert_eq!(filter.to_string(), "(|(a=1)(!(b=*)))");
    }

    #[test]
    fn test_value_keeps_spaces_and_escapes() {
        let filter = Filter::parse(r"(name=a \(b\) c)").unwrap();
        assert_eq!(
            filter,
            Filter::Equals {
                attribute: "name".into(),
                value: "a (b) c".into()
            }
        );
        let filter = Filter::parse(r"(name=\*)").unwrap();
        assert!(matches!(filter, Filter::Equals { .. }));
    }

    #[test]
    fn test_syntax_errors() {
        for bad in [
            "",
            "service.pid=x",
            "(service.pid=x",
            "(=x)",
            "(a=b))",
            "(a=(b))",
            "(&)",
            "(a>=1)",
            "(a~=1)",
            "(noequals)",
            r"(a=b\",
            "(a=x*)",
            "(a=*x)",
            "(a=x*y)",
            "(a=**)",
        ] {
            let err = Filter::parse(bad).unwrap_err();
            assert!(
                matches!(err, CmError::FilterSyntax { .. }),
                "expected syntax error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_escaped_wildcard_is_literal() {
        let filter = Filter::parse(r"(name=x\*)").unwrap();
        assert_eq!(
            filter,
            Filter::Equals {
                attribute: "name".into(),
                value: "x*".into()
            }
        );
        assert_eq!(filter.to_string(), r"(name=x\*)");
        assert_eq!(Filter::parse(&filter.to_string()).unwrap(), filter);
    }

    #[test]
    fn test_matches_alias_conjunction() {
        let filter = Filter::parse("(&(service.factoryPid=db)(_alias_pid=pool1))").unwrap();
        assert!(filter.matches(&record("db.1", Some("db"), &[("_alias_pid", "pool1")])));
        assert!(!filter.matches(&record("db.2", Some("db"), &[("_alias_pid", "pool2")])));
        assert!(!filter.matches(&record("web.1", Some("web"), &[("_alias_pid", "pool1")])));
        assert!(!filter.matches(&record("pool1", None, &[])));
    }

    #[test]
    fn test_presence_and_negation() {
        let present = Filter::parse("(service.factoryPid=*)").unwrap();
        let absent = Filter::parse("(!(service.factoryPid=*))").unwrap();
        let factory = record("db.1", Some("db"), &[]);
        let singleton = record("myservice", None, &[]);

        assert!(present.matches(&factory));
        assert!(!present.matches(&singleton));
        assert!(absent.matches(&singleton));
    }

    #[test]
    fn test_select_without_filter_returns_everything_in_order() {
        let records = vec![record("b", None, &[]), record("a", None, &[])];
        let selected = select(&records, None).unwrap();
        let pids: Vec<_> = selected.iter().map(|r| r.pid.as_str()).collect();
        assert_eq!(pids, ["b", "a"]);
    }
}
