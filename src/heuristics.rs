//! Text heuristics applied to raw search hits
//!
//! All of these are deliberately naive: a title whose product name contains a
//! hyphen is cut short by [`normalize`], and any 2-6 digit token (a year, a
//! model number) can be picked up by [`extract_price`].

use regex::Regex;
use std::sync::OnceLock;

/// Characters that end the product-name part of a result title
const NAME_SEPARATORS: [char; 3] = ['|', '-', ':'];

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{2,6})").expect("valid price regex"))
}

/// Leading segment of `title` before the first `|`, `-` or `:`, trimmed
pub fn normalize(title: &str) -> String {
    title
        .split(NAME_SEPARATORS)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn is_decimal_digit(c: char) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\d$").expect("valid digit regex"))
        .is_match(c.encode_utf8(&mut [0; 4]))
}

/// Value of a decimal digit from any script (`'7'`, `'۷'`, `'७'`).
///
/// Unicode lays decimal digits out in contiguous runs of ten starting at
/// zero, so the value is the distance from the start of the run, mod 10.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut zero = c as u32;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        zero -= 1;
    }
    Some((c as u32 - zero) % 10)
}

/// First run of 2 to 6 digits in `text`, after dropping thousands separators.
///
/// Digits from any script count, so Urdu pages quoting `۴۵۰۰۰` yield 45000.
pub fn extract_price(text: &str) -> Option<u32> {
    let cleaned = text.replace(',', "");
    let digits = price_pattern().captures(&cleaned)?.get(1)?;
    digits
        .as_str()
        .chars()
        .try_fold(0u32, |acc, c| Some(acc * 10 + decimal_value(c)?))
}

/// First `max_chars` characters of `content`
pub fn truncate_snippet(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// `"{title}: {snippet}"` line shown for a search hit
pub fn format_snippet(title: &str, content: &str, max_chars: usize) -> String {
    format!("{title}: {}", truncate_snippet(content, max_chars))
}

/// Integer mean of the non-zero prices, or `None` when there are none
pub fn average_price<I>(prices: I) -> Option<u64>
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = prices
        .into_iter()
        .filter(|&price| price > 0)
        .fold((0u64, 0u64), |(sum, count), price| {
            (sum + u64::from(price), count + 1)
        });

    (count > 0).then(|| sum / count)
}

/// Render `value` with comma thousands separators, e.g. `45000` -> `45,000`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
