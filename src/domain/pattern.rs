//! Date pattern language.
//!
//! A pattern is literal text with `{x}` placeholders, where `x` is one of
//! `y m d h i s a`. A placeholder may repeat its letter (`{yyyy}`); the
//! last letter inside the braces picks the field. Anything else, including
//! braces that do not form a placeholder, is copied verbatim.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Pattern used when none is supplied.
pub const DEFAULT_PATTERN: &str = "{y}-{m}-{d} {h}:{i}:{s}";

/// Weekday glyphs, Sunday first.
pub const WEEKDAY_GLYPHS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Calendar field bound to a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `{y}` full year
    Year,
    /// `{m}` month, 1-based
    Month,
    /// `{d}` day of month
    Day,
    /// `{h}` hour, 24h clock
    Hour,
    /// `{i}` minute
    Minute,
    /// `{s}` second
    Second,
    /// `{a}` weekday glyph
    Weekday,
}

impl Field {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'y' => Some(Field::Year),
            'm' => Some(Field::Month),
            'd' => Some(Field::Day),
            'h' => Some(Field::Hour),
            'i' => Some(Field::Minute),
            's' => Some(Field::Second),
            'a' => Some(Field::Weekday),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed date pattern.
///
/// # Example
/// ```
/// use base_common::domain::pattern::Pattern;
/// use chrono::{TimeZone, Utc};
///
/// let pattern = Pattern::parse("{y}/{m}/{d} 周{a}");
/// let date = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
/// assert_eq!(pattern.render(Some(&date)), "2024/03/05 周二");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern. Parsing never fails; unrecognized text is literal.
    pub fn parse(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match placeholder(after) {
                Some((field, consumed)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                    rest = &after[consumed..];
                }
                None => {
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Fields referenced by this pattern, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(*field),
            Segment::Literal(_) => None,
        })
    }

    /// Render the pattern for `date`.
    ///
    /// `None` stands for an invalid date: numeric fields render as `0` and
    /// the weekday renders empty.
    pub fn render<Tz: TimeZone>(&self, date: Option<&DateTime<Tz>>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => match date {
                    Some(date) => push_field(&mut out, *field, date),
                    None if *field == Field::Weekday => {}
                    None => out.push('0'),
                },
            }
        }
        out
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::parse(DEFAULT_PATTERN)
    }
}

/// Match `letters}` at the start of `text`, returning the field of the last
/// letter and the number of bytes consumed including the closing brace.
fn placeholder(text: &str) -> Option<(Field, usize)> {
    let mut last = None;
    for (index, c) in text.char_indices() {
        if c == '}' {
            return last.map(|field| (field, index + 1));
        }
        last = Some(Field::from_letter(c)?);
    }
    None
}

fn push_field<Tz: TimeZone>(out: &mut String, field: Field, date: &DateTime<Tz>) {
    let value = match field {
        Field::Weekday => {
            let index = date.weekday().num_days_from_sunday() as usize;
            out.push_str(WEEKDAY_GLYPHS[index]);
            return;
        }
        Field::Year => i64::from(date.year()),
        Field::Month => i64::from(date.month()),
        Field::Day => i64::from(date.day()),
        Field::Hour => i64::from(date.hour()),
        Field::Minute => i64::from(date.minute()),
        Field::Second => i64::from(date.second()),
    };

    if value < 10 {
        out.push('0');
    }
    out.push_str(&value.to_string());
}
