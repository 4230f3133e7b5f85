//! Traditional Chinese monetary numerals.
//!
//! Renders an amount as the uppercase ("financial") numeral text used on
//! receipts and cheques, e.g. `1005.3` becomes `壹仟零伍元叁角`.
//!
//! Rendering works on glyph tokens rather than raw characters so that the
//! zero-collapsing rules treat compound group units such as `万亿` as a
//! single unit.

/// Digit glyphs, indexed by digit value.
pub const DIGITS: [&str; 10] = ["零", "壹", "贰", "叁", "肆", "伍", "陆", "柒", "捌", "玖"];

/// Sub-unit glyphs for tenths (jiao) and hundredths (fen).
pub const SUB_UNITS: [&str; 2] = ["角", "分"];

/// Position units within a 4-digit group: ones, tens, hundreds, thousands.
pub const POSITION_UNITS: [&str; 4] = ["", "拾", "佰", "仟"];

/// Base currency unit.
pub const CURRENCY_UNIT: &str = "元";

/// Prefix marking a negative (owed) amount.
pub const DEBT_MARKER: &str = "欠";

/// Suffix used when there are no sub-units.
pub const EXACT_MARKER: &str = "整";

const ZERO: &str = "零";

/// Absorbs binary representation error when truncating hundredths.
const CENT_EPSILON: f64 = 1e-6;

/// Largest hundredths value; the epsilon must never carry into the units.
const MAX_CENTS: f64 = 99.0;

/// Error returned by [`try_to_text`] for amounts that cannot be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountError {
    /// Amount is NaN or infinite
    NonFinite(f64),
}

impl std::fmt::Display for AmountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountError::NonFinite(value) => {
                write!(f, "amount must be finite, got {}", value)
            }
        }
    }
}

impl std::error::Error for AmountError {}

/// Render `amount` as monetary numeral text.
///
/// Negative amounts are prefixed with [`DEBT_MARKER`]. Fractional digits
/// beyond hundredths are truncated. There is no error path: non-finite
/// input still produces a string, so callers that need to reject it should
/// use [`try_to_text`].
///
/// # Example
/// ```
/// use base_common::to_text;
///
/// assert_eq!(to_text(0.0), "零元整");
/// assert_eq!(to_text(100000.0), "壹拾万元整");
/// assert_eq!(to_text(-5.0), "欠伍元整");
/// assert_eq!(to_text(10.01), "壹拾元壹分");
/// ```
pub fn to_text(amount: f64) -> String {
    let head = if amount < 0.0 { DEBT_MARKER } else { "" };
    let amount = amount.abs();

    let mut tokens = integral_tokens(amount.trunc() as u64);
    tokens.extend(sub_unit_tokens(amount));

    collapse_zero_before_currency(&mut tokens);
    let mut tokens = collapse_zero_runs(tokens);
    if tokens == [EXACT_MARKER] {
        tokens = vec![ZERO, CURRENCY_UNIT, EXACT_MARKER];
    }

    let mut text = String::from(head);
    text.extend(tokens);
    text
}

/// Render `amount`, rejecting NaN and infinities.
pub fn try_to_text(amount: f64) -> Result<String, AmountError> {
    if !amount.is_finite() {
        return Err(AmountError::NonFinite(amount));
    }
    Ok(to_text(amount))
}

/// Jiao and fen glyphs from the fractional part; zero sub-units are silent.
fn sub_unit_tokens(amount: f64) -> Vec<&'static str> {
    let cents = (amount.fract() * 100.0 + CENT_EPSILON)
        .floor()
        .min(MAX_CENTS) as u64;
    let digits = [(cents / 10) % 10, cents % 10];

    let mut tokens = Vec::with_capacity(4);
    for (digit, unit) in digits.into_iter().zip(SUB_UNITS) {
        if digit != 0 {
            tokens.push(DIGITS[digit as usize]);
            tokens.push(unit);
        }
    }
    if tokens.is_empty() {
        tokens.push(EXACT_MARKER);
    }
    tokens
}

/// Integral part, most significant group first, each group followed by its
/// group unit. Empty when the integral part is zero.
fn integral_tokens(mut n: u64) -> Vec<&'static str> {
    let mut groups: Vec<Vec<&'static str>> = Vec::new();
    let mut index = 0;

    while n > 0 {
        let mut digits = Vec::with_capacity(POSITION_UNITS.len());
        while digits.len() < POSITION_UNITS.len() && n > 0 {
            digits.push((n % 10) as usize);
            n /= 10;
        }

        let mut group = group_tokens(&digits);
        group.push(group_unit(index));
        groups.push(group);
        index += 1;
    }

    groups.into_iter().rev().flatten().collect()
}

/// One 4-digit group. `digits` is least significant first. Trailing zero
/// positions are dropped; an all-zero group renders as a single zero.
fn group_tokens(digits: &[usize]) -> Vec<&'static str> {
    let trailing_zeros = digits.iter().take_while(|&&d| d == 0).count();
    if trailing_zeros == digits.len() {
        return vec![ZERO];
    }

    let mut tokens = Vec::with_capacity(digits.len() * 2);
    for position in (trailing_zeros..digits.len()).rev() {
        tokens.push(DIGITS[digits[position]]);
        let unit = POSITION_UNITS[position];
        if !unit.is_empty() {
            tokens.push(unit);
        }
    }
    tokens
}

/// Group unit for the `index`-th group from the right.
///
/// Past 亿 the cycle repeats: 万亿 is 10^12, 亿亿 is 10^16. A `u64` never
/// needs more than five groups.
fn group_unit(index: usize) -> &'static str {
    const GROUP_UNITS: [&str; 6] = [CURRENCY_UNIT, "万", "亿", "万亿", "亿亿", "万亿亿"];
    GROUP_UNITS[index.min(GROUP_UNITS.len() - 1)]
}

/// Collapse `(零 X)* 零 元` to `元` at its single possible site.
fn collapse_zero_before_currency(tokens: &mut Vec<&'static str>) {
    let Some(unit_at) = tokens.iter().position(|&t| t == CURRENCY_UNIT) else {
        return;
    };
    if unit_at == 0 || tokens[unit_at - 1] != ZERO {
        return;
    }

    let mut start = unit_at - 1;
    while start >= 2 && tokens[start - 2] == ZERO {
        start -= 2;
    }
    tokens.drain(start..unit_at);
}

/// Collapse every run of `(零 X)+` to a single `零`.
fn collapse_zero_runs(tokens: Vec<&'static str>) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == ZERO && i + 1 < tokens.len() {
            while i + 1 < tokens.len() && tokens[i] == ZERO {
                i += 2;
            }
            out.push(ZERO);
        } else {
            out.push(tokens[i]);
            i += 1;
        }
    }
    out
}
