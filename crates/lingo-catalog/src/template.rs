#![forbid(unsafe_code)]

//! ICU-style message templates.
//!
//! Supported syntax:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `{name}` | interpolate an argument |
//! | `{n, number}` / `{n, number, percent}` | formatted number (style or named preset) |
//! | `{d, date, short}` / `{d, time}` | formatted date or time |
//! | `{n, plural, =0 {none} one {# item} other {# items}}` | cardinal plural, `#` is the count |
//! | `{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}` | ordinal plural |
//! | `{g, select, female {she} other {they}}` | keyword select |
//! | `<b>text</b>`, `<br/>` | rich-text tag rendered by a caller-supplied function |
//! | `''`, `'{literal}'` | apostrophe quoting |
//!
//! Plural and select blocks must carry an `other` arm.

use crate::error::TemplateError;
use crate::plural::PluralCategory;

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// One piece of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    /// `{name}`
    Argument(String),
    /// `{name, number[, style]}`
    Number { arg: String, style: Option<String> },
    /// `{name, date[, style]}`
    Date { arg: String, style: Option<String> },
    /// `{name, time[, style]}`
    Time { arg: String, style: Option<String> },
    /// `{name, plural, ...}` or `{name, selectordinal, ...}`
    Plural {
        arg: String,
        ordinal: bool,
        offset: i64,
        arms: Vec<PluralArm>,
    },
    /// `{name, select, ...}`
    Select { arg: String, arms: Vec<SelectArm> },
    /// `#` inside a plural arm.
    Pound,
    /// `<name>children</name>` or `<name/>`
    Tag { name: String, children: Vec<Segment> },
}

/// An arm of a plural block.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralArm {
    pub selector: PluralSelector,
    pub body: Vec<Segment>,
}

/// How a plural arm is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluralSelector {
    /// `=N`, matched against the value before the offset is applied.
    Exact(f64),
    Category(PluralCategory),
}

/// An arm of a select block.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectArm {
    pub key: String,
    pub body: Vec<Segment>,
}

impl Template {
    /// Parse template source.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parser = Parser {
            chars: source.chars().collect(),
            pos: 0,
        };
        let segments = parser.segments(false, &Close::End)?;
        Ok(Self { segments })
    }

    /// The top-level segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template is plain text with no placeholders or tags.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Text(_)))
    }

    /// Names of all arguments and tags referenced anywhere, deduplicated,
    /// in order of first appearance.
    pub fn argument_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_names(&self.segments, &mut names);
        names
    }
}

fn push_name<'a>(name: &'a str, names: &mut Vec<&'a str>) {
    if !names.contains(&name) {
        names.push(name);
    }
}

fn collect_names<'a>(segments: &'a [Segment], names: &mut Vec<&'a str>) {
    for segment in segments {
        match segment {
            Segment::Text(_) | Segment::Pound => {}
            Segment::Argument(arg)
            | Segment::Number { arg, .. }
            | Segment::Date { arg, .. }
            | Segment::Time { arg, .. } => push_name(arg, names),
            Segment::Plural { arg, arms, .. } => {
                push_name(arg, names);
                for arm in arms {
                    collect_names(&arm.body, names);
                }
            }
            Segment::Select { arg, arms } => {
                push_name(arg, names);
                for arm in arms {
                    collect_names(&arm.body, names);
                }
            }
            Segment::Tag { name, children } => {
                push_name(name, names);
                collect_names(children, names);
            }
        }
    }
}

enum Close {
    End,
    Brace,
    Tag(String),
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Byte offset in the source of the character at `pos`.
    fn byte_offset(&self, pos: usize) -> usize {
        self.chars.iter().take(pos).map(|c| c.len_utf8()).sum()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TemplateError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else if self.peek().is_none() {
            Err(TemplateError::Unterminated {
                what: "placeholder",
            })
        } else {
            Err(TemplateError::Expected {
                expected,
                pos: self.byte_offset(self.pos),
            })
        }
    }

    fn word(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, ',' | '{' | '}'))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn segments(&mut self, in_plural: bool, close: &Close) -> Result<Vec<Segment>, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();

        loop {
            let Some(c) = self.peek() else {
                return match close {
                    Close::End => {
                        flush(&mut text, &mut segments);
                        Ok(segments)
                    }
                    Close::Brace => Err(TemplateError::Unterminated { what: "arm" }),
                    Close::Tag(_) => Err(TemplateError::Unterminated { what: "tag" }),
                };
            };

            match c {
                '}' => {
                    if let Close::Brace = close {
                        flush(&mut text, &mut segments);
                        return Ok(segments);
                    }
                    return Err(TemplateError::UnexpectedBrace {
                        pos: self.byte_offset(self.pos),
                    });
                }
                '{' => {
                    flush(&mut text, &mut segments);
                    self.pos += 1;
                    segments.push(self.placeholder(in_plural)?);
                }
                '<' if self.peek_at(1) == Some('/') => {
                    let name = self.closing_tag()?;
                    return match close {
                        Close::Tag(open) if *open == name => {
                            flush(&mut text, &mut segments);
                            Ok(segments)
                        }
                        Close::Tag(open) => Err(TemplateError::MismatchedTag {
                            expected: open.clone(),
                            found: name,
                        }),
                        _ => Err(TemplateError::MismatchedTag {
                            expected: String::new(),
                            found: name,
                        }),
                    };
                }
                '<' if self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic()) => {
                    flush(&mut text, &mut segments);
                    segments.push(self.tag(in_plural)?);
                }
                '#' if in_plural => {
                    flush(&mut text, &mut segments);
                    self.pos += 1;
                    segments.push(Segment::Pound);
                }
                '\'' => self.quoted(in_plural, &mut text),
                _ => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn quoted(&mut self, in_plural: bool, text: &mut String) {
        match self.peek_at(1) {
            Some('\'') => {
                text.push('\'');
                self.pos += 2;
            }
            Some(c) if matches!(c, '{' | '}' | '<') || (c == '#' && in_plural) => {
                self.pos += 1;
                while let Some(c) = self.peek() {
                    if c == '\'' {
                        if self.peek_at(1) == Some('\'') {
                            text.push('\'');
                            self.pos += 2;
                            continue;
                        }
                        self.pos += 1;
                        return;
                    }
                    text.push(c);
                    self.pos += 1;
                }
            }
            _ => {
                text.push('\'');
                self.pos += 1;
            }
        }
    }

    fn placeholder(&mut self, in_plural: bool) -> Result<Segment, TemplateError> {
        self.skip_ws();
        let start = self.pos;
        let arg = self.word();
        if arg.is_empty() {
            return Err(TemplateError::EmptyArgument {
                pos: self.byte_offset(start),
            });
        }
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Segment::Argument(arg));
        }
        self.expect(',')?;
        self.skip_ws();
        let kind_pos = self.pos;
        let kind = self.word();
        self.skip_ws();

        match kind.as_str() {
            "number" | "date" | "time" => {
                let style = self.style()?;
                Ok(match kind.as_str() {
                    "number" => Segment::Number { arg, style },
                    "date" => Segment::Date { arg, style },
                    _ => Segment::Time { arg, style },
                })
            }
            "plural" | "selectordinal" => {
                self.expect(',')?;
                let (offset, arms) = self.plural_arms(&arg)?;
                Ok(Segment::Plural {
                    arg,
                    ordinal: kind == "selectordinal",
                    offset,
                    arms,
                })
            }
            "select" => {
                self.expect(',')?;
                let arms = self.select_arms(&arg, in_plural)?;
                Ok(Segment::Select { arg, arms })
            }
            _ => Err(TemplateError::UnknownArgumentType {
                kind,
                pos: self.byte_offset(kind_pos),
            }),
        }
    }

    fn style(&mut self) -> Result<Option<String>, TemplateError> {
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(None);
        }
        self.expect(',')?;
        let start = self.pos;
        while self.peek().is_some_and(|c| c != '}') {
            self.pos += 1;
        }
        let style: String = self.chars[start..self.pos].iter().collect();
        self.expect('}')?;
        let style = style.trim();
        Ok((!style.is_empty()).then(|| style.to_owned()))
    }

    fn plural_arms(&mut self, arg: &str) -> Result<(i64, Vec<PluralArm>), TemplateError> {
        let mut offset = 0;
        let mut arms = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(TemplateError::Unterminated { what: "plural" }),
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }
            let selector = self.word();
            if let Some(value) = selector.strip_prefix("offset:") {
                offset = value
                    .parse()
                    .map_err(|_| TemplateError::InvalidSelector {
                        selector: selector.clone(),
                    })?;
                continue;
            }
            let parsed = if let Some(exact) = selector.strip_prefix('=') {
                exact
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(PluralSelector::Exact)
            } else {
                PluralCategory::from_keyword(&selector).map(PluralSelector::Category)
            };
            let selector = parsed.ok_or(TemplateError::InvalidSelector { selector })?;
            self.skip_ws();
            self.expect('{')?;
            let body = self.segments(true, &Close::Brace)?;
            self.expect('}')?;
            arms.push(PluralArm { selector, body });
        }
        let has_other = arms
            .iter()
            .any(|arm| arm.selector == PluralSelector::Category(PluralCategory::Other));
        if !has_other {
            return Err(TemplateError::MissingOther { arg: arg.to_owned() });
        }
        Ok((offset, arms))
    }

    fn select_arms(&mut self, arg: &str, in_plural: bool) -> Result<Vec<SelectArm>, TemplateError> {
        let mut arms = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(TemplateError::Unterminated { what: "select" }),
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }
            let key = self.word();
            if key.is_empty() {
                return Err(TemplateError::InvalidSelector { selector: key });
            }
            self.skip_ws();
            self.expect('{')?;
            let body = self.segments(in_plural, &Close::Brace)?;
            self.expect('}')?;
            arms.push(SelectArm { key, body });
        }
        if !arms.iter().any(|arm| arm.key == "other") {
            return Err(TemplateError::MissingOther { arg: arg.to_owned() });
        }
        Ok(arms)
    }

    fn tag_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn tag(&mut self, in_plural: bool) -> Result<Segment, TemplateError> {
        self.pos += 1; // '<'
        let name = self.tag_name();
        self.skip_ws();
        if self.peek() == Some('/') {
            self.pos += 1;
            self.expect_tag_end('>')?;
            return Ok(Segment::Tag {
                name,
                children: Vec::new(),
            });
        }
        self.expect_tag_end('>')?;
        let children = self.segments(in_plural, &Close::Tag(name.clone()))?;
        Ok(Segment::Tag { name, children })
    }

    fn closing_tag(&mut self) -> Result<String, TemplateError> {
        self.pos += 2; // "</"
        let name = self.tag_name();
        self.skip_ws();
        self.expect_tag_end('>')?;
        Ok(name)
    }

    fn expect_tag_end(&mut self, expected: char) -> Result<(), TemplateError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            None => Err(TemplateError::Unterminated { what: "tag" }),
            Some(_) => Err(TemplateError::Expected {
                expected,
                pos: self.byte_offset(self.pos),
            }),
        }
    }
}

fn flush(text: &mut String, segments: &mut Vec<Segment>) {
    if !text.is_empty() {
        segments.push(Segment::Text(std::mem::take(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Segment {
        Segment::Text(s.into())
    }

    #[test]
    fn plain_text_is_literal() {
        let template = Template::parse("Hello world").unwrap();
        assert!(template.is_literal());
        assert_eq!(template.segments(), &[text("Hello world")]);
        assert!(Template::parse("").unwrap().segments().is_empty());
    }

    #[test]
    fn simple_argument() {
        let template = Template::parse("Hello, { name }!").unwrap();
        assert_eq!(
            template.segments(),
            &[text("Hello, "), Segment::Argument("name".into()), text("!")]
        );
    }

    #[test]
    fn typed_arguments_with_styles() {
        let template = Template::parse("{n, number, percent} on {d, date, short} at {d, time}")
            .unwrap();
        assert_eq!(
            template.segments()[0],
            Segment::Number {
                arg: "n".into(),
                style: Some("percent".into())
            }
        );
        assert_eq!(
            template.segments()[2],
            Segment::Date {
                arg: "d".into(),
                style: Some("short".into())
            }
        );
        assert_eq!(
            template.segments()[4],
            Segment::Time {
                arg: "d".into(),
                style: None
            }
        );
        assert_eq!(template.argument_names(), vec!["n", "d"]);
    }

    #[test]
    fn plural_with_exact_offset_and_pound() {
        let template =
            Template::parse("{count, plural, offset:1 =0 {none} one {# item} other {# items}}")
                .unwrap();
        let Segment::Plural {
            arg,
            ordinal,
            offset,
            arms,
        } = &template.segments()[0]
        else {
            panic!("expected plural");
        };
        assert_eq!(arg, "count");
        assert!(!ordinal);
        assert_eq!(*offset, 1);
        assert_eq!(arms.len(), 3);
        assert_eq!(arms[0].selector, PluralSelector::Exact(0.0));
        assert_eq!(arms[1].body, vec![Segment::Pound, text(" item")]);
    }

    #[test]
    fn pound_outside_plural_is_text() {
        let template = Template::parse("Item #1").unwrap();
        assert_eq!(template.segments(), &[text("Item #1")]);
    }

    #[test]
    fn select_requires_other() {
        assert!(Template::parse("{g, select, female {she} other {they}}").is_ok());
        assert_eq!(
            Template::parse("{g, select, female {she}}"),
            Err(TemplateError::MissingOther { arg: "g".into() })
        );
        assert_eq!(
            Template::parse("{n, plural, one {x}}"),
            Err(TemplateError::MissingOther { arg: "n".into() })
        );
    }

    #[test]
    fn nested_select_inside_plural_keeps_pound() {
        let template = Template::parse(
            "{n, plural, other {{g, select, female {# for her} other {# for them}}}}",
        )
        .unwrap();
        let Segment::Plural { arms, .. } = &template.segments()[0] else {
            panic!("expected plural");
        };
        let Segment::Select { arms: inner, .. } = &arms[0].body[0] else {
            panic!("expected select");
        };
        assert_eq!(inner[0].body[0], Segment::Pound);
    }

    #[test]
    fn tags_nest_and_self_close() {
        let template = Template::parse("Read <link>the <b>docs</b></link><br/>").unwrap();
        assert_eq!(
            template.segments(),
            &[
                text("Read "),
                Segment::Tag {
                    name: "link".into(),
                    children: vec![
                        text("the "),
                        Segment::Tag {
                            name: "b".into(),
                            children: vec![text("docs")]
                        }
                    ]
                },
                Segment::Tag {
                    name: "br".into(),
                    children: vec![]
                }
            ]
        );
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let template = Template::parse("a < b").unwrap();
        assert_eq!(template.segments(), &[text("a < b")]);
    }

    #[test]
    fn apostrophe_quoting() {
        let template = Template::parse("It''s '{literal}' and don't").unwrap();
        assert_eq!(template.segments(), &[text("It's {literal} and don't")]);
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            Template::parse("oops }"),
            Err(TemplateError::UnexpectedBrace { pos: 5 })
        );
        let source = "Grüße, {} ";
        let Err(TemplateError::EmptyArgument { pos }) = Template::parse(source) else {
            panic!("expected an empty-argument error");
        };
        assert_eq!(pos, 10);
        assert_eq!(&source[pos..], "} ");
        assert_eq!(
            Template::parse("Ä }"),
            Err(TemplateError::UnexpectedBrace { pos: 3 })
        );
        assert!(matches!(
            Template::parse("Hello {name"),
            Err(TemplateError::Unterminated { .. })
        ));
        assert!(matches!(
            Template::parse("{}"),
            Err(TemplateError::EmptyArgument { .. })
        ));
        assert!(matches!(
            Template::parse("{n, money}"),
            Err(TemplateError::UnknownArgumentType { .. })
        ));
        assert!(matches!(
            Template::parse("<b>bold</i>"),
            Err(TemplateError::MismatchedTag { .. })
        ));
        assert!(matches!(
            Template::parse("{n, plural, lots {x} other {y}}"),
            Err(TemplateError::InvalidSelector { .. })
        ));
    }
}
