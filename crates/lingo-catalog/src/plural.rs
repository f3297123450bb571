#![forbid(unsafe_code)]

//! CLDR-style plural categories and built-in rules.
//!
//! Rules operate on absolute values; `-3` and `3` always share a category.
//! Languages without a built-in rule use [`PluralRule::English`].

/// A plural category as defined by CLDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// The CLDR keyword (`zero`, `one`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parse a CLDR keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Cardinal plural rule for a language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// one: n = 1; other. Also German, Dutch, Spanish, Italian, ...
    English,
    /// one: n ∈ {0, 1}; other.
    French,
    /// one/few/many by last digits. Also Ukrainian, Belarusian.
    Russian,
    /// one: n = 1; few/many by last digits.
    Polish,
    /// zero, one, two, few, many, other.
    Arabic,
    /// No plural distinction. Japanese, Chinese, Korean, ...
    CJK,
}

impl PluralRule {
    /// Pick the rule for a locale tag. Never fails; unknown languages
    /// use English.
    pub fn for_locale(locale: &str) -> Self {
        match primary_language(locale).as_str() {
            "fr" | "pt" => Self::French,
            "ru" | "uk" | "be" => Self::Russian,
            "pl" => Self::Polish,
            "ar" => Self::Arabic,
            "ja" | "zh" | "ko" | "th" | "vi" | "id" | "ms" => Self::CJK,
            _ => Self::English,
        }
    }

    /// Categorize an integer count.
    pub fn categorize(self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        match self {
            Self::English => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::French => {
                if n <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::Russian => {
                let (m10, m100) = (n % 10, n % 100);
                if m10 == 1 && m100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Polish => {
                let (m10, m100) = (n % 10, n % 100);
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Arabic => {
                let m100 = n % 100;
                match n {
                    0 => PluralCategory::Zero,
                    1 => PluralCategory::One,
                    2 => PluralCategory::Two,
                    _ if (3..=10).contains(&m100) => PluralCategory::Few,
                    _ if (11..=99).contains(&m100) => PluralCategory::Many,
                    _ => PluralCategory::Other,
                }
            }
            Self::CJK => PluralCategory::Other,
        }
    }

    /// Categorize a possibly fractional value.
    ///
    /// Whole numbers defer to [`categorize`](Self::categorize). Fractions are
    /// `other` except under the French rule, where `0 ≤ |n| < 2` is `one`.
    pub fn categorize_f64(self, value: f64) -> PluralCategory {
        if !value.is_finite() {
            return PluralCategory::Other;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            return self.categorize(value as i64);
        }
        match self {
            Self::French if value.abs() < 2.0 => PluralCategory::One,
            _ => PluralCategory::Other,
        }
    }
}

/// Ordinal plural rule (`1st`, `2nd`, `3rd`, `4th`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalRule {
    /// one: 1, 21, 31...; two: 2, 22...; few: 3, 23...; other.
    English,
    /// Only `other`.
    Uniform,
}

impl OrdinalRule {
    /// Pick the ordinal rule for a locale tag.
    pub fn for_locale(locale: &str) -> Self {
        match primary_language(locale).as_str() {
            "en" => Self::English,
            _ => Self::Uniform,
        }
    }

    /// Categorize an ordinal position.
    pub fn categorize(self, position: i64) -> PluralCategory {
        let n = position.unsigned_abs();
        match self {
            Self::English => {
                let (m10, m100) = (n % 10, n % 100);
                match (m10, m100) {
                    (1, m) if m != 11 => PluralCategory::One,
                    (2, m) if m != 12 => PluralCategory::Two,
                    (3, m) if m != 13 => PluralCategory::Few,
                    _ => PluralCategory::Other,
                }
            }
            Self::Uniform => PluralCategory::Other,
        }
    }
}

fn primary_language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_rule() {
        let rule = PluralRule::English;
        assert_eq!(rule.categorize(0), PluralCategory::Other);
        assert_eq!(rule.categorize(1), PluralCategory::One);
        assert_eq!(rule.categorize(2), PluralCategory::Other);
        assert_eq!(rule.categorize_f64(1.5), PluralCategory::Other);
    }

    #[test]
    fn russian_rule() {
        let rule = PluralRule::Russian;
        assert_eq!(rule.categorize(1), PluralCategory::One);
        assert_eq!(rule.categorize(21), PluralCategory::One);
        assert_eq!(rule.categorize(11), PluralCategory::Many);
        assert_eq!(rule.categorize(3), PluralCategory::Few);
        assert_eq!(rule.categorize(13), PluralCategory::Many);
        assert_eq!(rule.categorize(25), PluralCategory::Many);
    }

    #[test]
    fn polish_rule() {
        let rule = PluralRule::Polish;
        assert_eq!(rule.categorize(1), PluralCategory::One);
        assert_eq!(rule.categorize(21), PluralCategory::Many);
        assert_eq!(rule.categorize(22), PluralCategory::Few);
    }

    #[test]
    fn arabic_rule() {
        let rule = PluralRule::Arabic;
        assert_eq!(rule.categorize(0), PluralCategory::Zero);
        assert_eq!(rule.categorize(2), PluralCategory::Two);
        assert_eq!(rule.categorize(105), PluralCategory::Few);
        assert_eq!(rule.categorize(111), PluralCategory::Many);
        assert_eq!(rule.categorize(100), PluralCategory::Other);
    }

    #[test]
    fn french_fractions() {
        assert_eq!(PluralRule::French.categorize_f64(1.5), PluralCategory::One);
        assert_eq!(PluralRule::French.categorize_f64(2.5), PluralCategory::Other);
    }

    #[test]
    fn locale_lookup() {
        assert_eq!(PluralRule::for_locale("ru-RU"), PluralRule::Russian);
        assert_eq!(PluralRule::for_locale("ja"), PluralRule::CJK);
        assert_eq!(PluralRule::for_locale("de_AT"), PluralRule::English);
        assert_eq!(PluralRule::for_locale(""), PluralRule::English);
    }

    #[test]
    fn english_ordinals() {
        let rule = OrdinalRule::English;
        assert_eq!(rule.categorize(1), PluralCategory::One);
        assert_eq!(rule.categorize(11), PluralCategory::Other);
        assert_eq!(rule.categorize(22), PluralCategory::Two);
        assert_eq!(rule.categorize(113), PluralCategory::Other);
        assert_eq!(rule.categorize(103), PluralCategory::Few);
        assert_eq!(OrdinalRule::for_locale("fr").categorize(1), PluralCategory::Other);
    }
}
