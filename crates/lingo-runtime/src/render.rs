#![forbid(unsafe_code)]

//! Evaluates parsed templates against values.

use chrono::{DateTime, Utc};
use lingo_catalog::{
    Locale, OrdinalRule, PluralCategory, PluralRule, PluralSelector, Segment, Template,
};
use lingo_format::{
    DateTimeFormatOptions, DateTimeStyle, Formats, NumberFormatOptions, TimeZone,
    format_date_time, format_number,
};

use crate::error::{IntlError, IntlErrorCode};
use crate::values::{Layered, Value};

/// Everything a template needs from its scope.
pub(crate) struct RenderContext<'a> {
    pub locale: &'a Locale,
    pub time_zone: Option<TimeZone>,
    pub formats: &'a Formats,
    pub values: Layered<'a>,
    /// Called before a date is formatted without an explicit zone.
    pub missing_time_zone: &'a dyn Fn(),
}

/// Render `template`, or describe the first failure.
pub(crate) fn render(template: &Template, ctx: &RenderContext<'_>) -> Result<String, IntlError> {
    let mut out = String::new();
    render_segments(template.segments(), ctx, None, &mut out)?;
    Ok(out)
}

fn render_segments(
    segments: &[Segment],
    ctx: &RenderContext<'_>,
    pound: Option<f64>,
    out: &mut String,
) -> Result<(), IntlError> {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Argument(name) => {
                let value = lookup(ctx, name)?;
                out.push_str(&display(value, ctx)?);
            }
            Segment::Number { arg, style } => {
                let number = numeric(lookup(ctx, arg)?, arg)?;
                let options = number_options(style.as_deref(), ctx.formats)?;
                out.push_str(&number_text(number, &options, ctx)?);
            }
            Segment::Date { arg, style } => {
                let options = date_options(style.as_deref(), ctx.formats, DateKind::Date)?;
                out.push_str(&date_text(lookup(ctx, arg)?, arg, &options, ctx)?);
            }
            Segment::Time { arg, style } => {
                let options = date_options(style.as_deref(), ctx.formats, DateKind::Time)?;
                out.push_str(&date_text(lookup(ctx, arg)?, arg, &options, ctx)?);
            }
            Segment::Plural {
                arg,
                ordinal,
                offset,
                arms,
            } => {
                let value = numeric(lookup(ctx, arg)?, arg)?;
                let shifted = value - *offset as f64;
                let category = if *ordinal {
                    OrdinalRule::for_locale(ctx.locale.as_str()).categorize(shifted.trunc() as i64)
                } else {
                    PluralRule::for_locale(ctx.locale.as_str()).categorize_f64(shifted)
                };
                let exact = arms
                    .iter()
                    .find(|arm| matches!(arm.selector, PluralSelector::Exact(n) if n == value));
                let by_category = || {
                    arms.iter()
                        .find(|arm| arm.selector == PluralSelector::Category(category))
                };
                let other = || {
                    arms.iter().find(|arm| {
                        arm.selector == PluralSelector::Category(PluralCategory::Other)
                    })
                };
                if let Some(arm) = exact.or_else(by_category).or_else(other) {
                    render_segments(&arm.body, ctx, Some(shifted), out)?;
                }
            }
            Segment::Select { arg, arms } => {
                let key = lookup(ctx, arg)?.select_key();
                let arm = arms
                    .iter()
                    .find(|arm| arm.key == key)
                    .or_else(|| arms.iter().find(|arm| arm.key == "other"));
                if let Some(arm) = arm {
                    render_segments(&arm.body, ctx, pound, out)?;
                }
            }
            Segment::Pound => match pound {
                Some(count) => {
                    out.push_str(&number_text(count, &NumberFormatOptions::default(), ctx)?)
                }
                None => out.push('#'),
            },
            Segment::Tag { name, children } => {
                let mut inner = String::new();
                render_segments(children, ctx, pound, &mut inner)?;
                match ctx.values.get(name) {
                    Some(Value::Rich(render_tag)) => out.push_str(&render_tag(&inner)),
                    Some(_) => {
                        return Err(IntlError::new(
                            IntlErrorCode::FormattingError,
                            format!("value for tag `{name}` is not a function"),
                        ));
                    }
                    None => {
                        return Err(IntlError::new(
                            IntlErrorCode::FormattingError,
                            format!("no function provided for tag `{name}`"),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

fn lookup<'a>(ctx: &RenderContext<'a>, name: &str) -> Result<&'a Value, IntlError> {
    ctx.values.get(name).ok_or_else(|| {
        IntlError::new(
            IntlErrorCode::FormattingError,
            format!("the intl string context variable `{name}` was not provided"),
        )
    })
}

fn numeric(value: &Value, name: &str) -> Result<f64, IntlError> {
    value.as_f64().ok_or_else(|| {
        IntlError::new(
            IntlErrorCode::FormattingError,
            format!("value for `{name}` is not a number"),
        )
    })
}

fn display(value: &Value, ctx: &RenderContext<'_>) -> Result<String, IntlError> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Number(n) => number_text(*n, &NumberFormatOptions::default(), ctx),
        Value::Int(n) => number_text(*n as f64, &NumberFormatOptions::default(), ctx),
        Value::Date(d) => zoned_date_text(*d, &DateTimeFormatOptions::default(), ctx),
        Value::Rich(_) => Err(IntlError::new(
            IntlErrorCode::FormattingError,
            "a tag function cannot be interpolated as text",
        )),
    }
}

fn number_text(
    value: f64,
    options: &NumberFormatOptions,
    ctx: &RenderContext<'_>,
) -> Result<String, IntlError> {
    format_number(value, options, ctx.locale).map_err(|e| IntlError::from_format(&e))
}

fn date_text(
    value: &Value,
    name: &str,
    options: &DateTimeFormatOptions,
    ctx: &RenderContext<'_>,
) -> Result<String, IntlError> {
    let Value::Date(instant) = value else {
        return Err(IntlError::new(
            IntlErrorCode::FormattingError,
            format!("value for `{name}` is not a date"),
        ));
    };
    zoned_date_text(*instant, options, ctx)
}

fn zoned_date_text(
    instant: DateTime<Utc>,
    options: &DateTimeFormatOptions,
    ctx: &RenderContext<'_>,
) -> Result<String, IntlError> {
    if options.time_zone.is_none() {
        (ctx.missing_time_zone)();
    }
    format_date_time(instant, options, ctx.locale, ctx.time_zone)
        .map_err(|e| IntlError::from_format(&e))
}

fn number_options(style: Option<&str>, formats: &Formats) -> Result<NumberFormatOptions, IntlError> {
    match style {
        None => Ok(NumberFormatOptions::default()),
        Some(name) => {
            if let Some(preset) = formats.number.get(name) {
                return Ok(preset.clone());
            }
            match name {
                "integer" => Ok(NumberFormatOptions::integer()),
                "percent" => Ok(NumberFormatOptions::percent()),
                _ => Err(missing_format("number", name)),
            }
        }
    }
}

#[derive(Clone, Copy)]
enum DateKind {
    Date,
    Time,
}

fn date_options(
    style: Option<&str>,
    formats: &Formats,
    kind: DateKind,
) -> Result<DateTimeFormatOptions, IntlError> {
    let Some(name) = style else {
        return Ok(match kind {
            DateKind::Date => DateTimeFormatOptions::default(),
            DateKind::Time => DateTimeFormatOptions::time(DateTimeStyle::Medium),
        });
    };
    if let Some(preset) = formats.date_time.get(name) {
        return Ok(preset.clone());
    }
    match (DateTimeStyle::from_name(name), kind) {
        (Some(style), DateKind::Date) => Ok(DateTimeFormatOptions::date(style)),
        (Some(style), DateKind::Time) => Ok(DateTimeFormatOptions::time(style)),
        (None, DateKind::Date) => Err(missing_format("date", name)),
        (None, DateKind::Time) => Err(missing_format("time", name)),
    }
}

fn missing_format(kind: &str, name: &str) -> IntlError {
    IntlError::new(
        IntlErrorCode::MissingFormat,
        format!("missing {kind} format `{name}`"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Values;
    use chrono::TimeZone as _;
    use lingo_format::NumericWidth;

    fn run(source: &str, tag: &str, values: &Values, formats: &Formats) -> Result<String, IntlError> {
        let locale = Locale::parse(tag).unwrap();
        let defaults = Values::new();
        let ctx = RenderContext {
            locale: &locale,
            time_zone: None,
            formats,
            values: Layered {
                call_site: values,
                defaults: &defaults,
            },
            missing_time_zone: &|| {},
        };
        render(&Template::parse(source).unwrap(), &ctx)
    }

    fn en(source: &str, values: &Values) -> String {
        run(source, "en", values, &Formats::default()).unwrap()
    }

    #[test]
    fn interpolates_arguments() {
        let values = Values::new().with("name", "Ada").with("n", 1234);
        assert_eq!(en("Hello, {name}!", &values), "Hello, Ada!");
        assert_eq!(en("{n} points", &values), "1,234 points");
    }

    #[test]
    fn plural_with_exact_and_pound() {
        let source = "{count, plural, =0 {no items} one {# item} other {# items}}";
        assert_eq!(en(source, &Values::new().with("count", 0)), "no items");
        assert_eq!(en(source, &Values::new().with("count", 1)), "1 item");
        assert_eq!(en(source, &Values::new().with("count", 1500)), "1,500 items");
    }

    #[test]
    fn plural_offset() {
        let source = "{n, plural, offset:1 =0 {nobody} =1 {you} one {you and # other} other {you and # others}}";
        assert_eq!(en(source, &Values::new().with("n", 1)), "you");
        assert_eq!(en(source, &Values::new().with("n", 2)), "you and 1 other");
        assert_eq!(en(source, &Values::new().with("n", 4)), "you and 3 others");
    }

    #[test]
    fn plural_uses_locale_rule() {
        let source = "{n, plural, one {# fichier} other {# fichiers}}";
        let values = Values::new().with("n", 0);
        assert_eq!(
            run(source, "fr", &values, &Formats::default()).unwrap(),
            "0 fichier"
        );
    }

    #[test]
    fn selectordinal() {
        let source = "{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}";
        assert_eq!(en(source, &Values::new().with("n", 1)), "1st");
        assert_eq!(en(source, &Values::new().with("n", 22)), "22nd");
        assert_eq!(en(source, &Values::new().with("n", 13)), "13th");
    }

    #[test]
    fn select_falls_back_to_other() {
        let source = "{g, select, female {she} male {he} other {they}}";
        assert_eq!(en(source, &Values::new().with("g", "female")), "she");
        assert_eq!(en(source, &Values::new().with("g", "robot")), "they");
    }

    #[test]
    fn rich_tags() {
        let values = Values::new()
            .with("name", "Ada")
            .with_rich("b", |inner| format!("**{inner}**"));
        assert_eq!(en("Hi <b>{name}</b>", &values), "Hi **Ada**");

        let err = run("Hi <i>there</i>", "en", &Values::new(), &Formats::default()).unwrap_err();
        assert_eq!(err.code, IntlErrorCode::FormattingError);
    }

    #[test]
    fn dates_and_named_formats() {
        let instant = chrono::Utc.with_ymd_and_hms(2020, 11, 20, 10, 36, 1).unwrap();
        let values = Values::new().with("d", instant);
        assert_eq!(en("{d, date, long}", &values), "November 20, 2020");
        assert_eq!(en("{d, time, short}", &values), "10:36 AM");

        let formats = Formats::default().with_date_time(
            "yearOnly",
            DateTimeFormatOptions {
                year: Some(NumericWidth::Numeric),
                ..Default::default()
            },
        );
        assert_eq!(run("{d, date, yearOnly}", "en", &values, &formats).unwrap(), "2020");

        let err = run("{d, date, nope}", "en", &values, &Formats::default()).unwrap_err();
        assert_eq!(err.code, IntlErrorCode::MissingFormat);
    }

    #[test]
    fn number_styles() {
        let values = Values::new().with("p", 0.25);
        assert_eq!(en("{p, number, percent}", &values), "25%");
        let formats = Formats::default().with_number("precise", NumberFormatOptions {
            maximum_fraction_digits: Some(5),
            ..Default::default()
        });
        let values = Values::new().with("x", 1.23456789);
        assert_eq!(run("{x, number, precise}", "en", &values, &formats).unwrap(), "1.23457");
    }

    #[test]
    fn missing_argument_is_a_formatting_error() {
        let err = run("Hello {name}", "en", &Values::new(), &Formats::default()).unwrap_err();
        assert_eq!(err.code, IntlErrorCode::FormattingError);
    }
}
