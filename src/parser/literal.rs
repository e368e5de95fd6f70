use std::iter::Peekable;
use std::str::Chars;

use crate::matcher::RegexpFlags;

/// Decodes a quoted string lexeme (quotes included) into its value.
///
/// Single-quoted strings only know `\\` and `\'`. Double-quoted strings understand the usual
/// control escapes, control/meta character names and octal/hex/unicode escapes. Byte escapes
/// above 0x7f map to the Latin-1 code point of the same value.
pub(crate) fn unquote_string(lexeme: &str) -> String {
    let quote = lexeme.chars().next().unwrap_or('"');
    let body = lexeme
        .get(1..lexeme.len().saturating_sub(1))
        .unwrap_or_default();

    if quote == '\'' {
        unescape_single(body)
    } else {
        unescape_double(body)
    }
}

fn unescape_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some(next) if next == '\\' || next == '\'' => {
                out.push(next);
                chars.next();
            }
            _ => out.push('\\'),
        }
    }

    out
}

fn unescape_double(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            'a' => out.push('\x07'),
            'e' => out.push('\x1b'),
            'b' => out.push('\x08'),
            's' => out.push(' '),
            '\n' => {}
            '0'..='7' => {
                let mut value = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(byte_char(value));
            }
            'x' => match take_digits(&mut chars, 16, 2) {
                Some(value) => out.push(byte_char(value)),
                None => out.push('x'),
            },
            'u' => out.push(unicode_escape(&mut chars)),
            'c' => out.push(control_char(chars.next())),
            'C' if chars.peek() == Some(&'-') => {
                chars.next();
                out.push(control_char(chars.next()));
            }
            'M' if chars.peek() == Some(&'-') => {
                chars.next();
                let base = match chars.next() {
                    Some('\\') => match chars.next() {
                        Some('c') => control_char(chars.next()) as u32,
                        Some(other) => other as u32,
                        None => 0,
                    },
                    Some(other) => other as u32,
                    None => 0,
                };
                out.push(byte_char((base & 0xff) | 0x80));
            }
            other => out.push(other),
        }
    }

    out
}

fn take_digits(chars: &mut Peekable<Chars<'_>>, radix: u32, max: usize) -> Option<u32> {
    let mut value = None;
    for _ in 0..max {
        match chars.peek().and_then(|c| c.to_digit(radix)) {
            Some(digit) => {
                value = Some(value.unwrap_or(0) * radix + digit);
                chars.next();
            }
            None => break,
        }
    }
    value
}

fn unicode_escape(chars: &mut Peekable<Chars<'_>>) -> char {
    let code = if chars.peek() == Some(&'{') {
        chars.next();
        let value = take_digits(chars, 16, 6);
        if chars.peek() == Some(&'}') {
            chars.next();
        }
        value
    } else {
        take_digits(chars, 16, 4)
    };

    match code {
        Some(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        None => 'u',
    }
}

fn control_char(ch: Option<char>) -> char {
    match ch {
        Some('?') => '\x7f',
        Some(ch) if ch.is_ascii() => char::from(ch as u8 & 0x9f),
        Some(ch) => ch,
        None => '\0',
    }
}

fn byte_char(value: u32) -> char {
    char::from((value & 0xff) as u8)
}

/// Value of an integer lexeme: optional sign, optional `0b`/`0o`/`0d`/`0x` radix prefix (a bare
/// leading zero means octal) and `_` digit separators. `None` when it does not fit in an `i64`.
pub(crate) fn parse_integer(lexeme: &str) -> Option<i64> {
    let (negative, unsigned) = match lexeme.as_bytes().first() {
        Some(b'-') => (true, &lexeme[1..]),
        Some(b'+') => (false, &lexeme[1..]),
        _ => (false, lexeme),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0b" | "0B") => (2, &unsigned[2..]),
        Some("0o" | "0O") => (8, &unsigned[2..]),
        Some("0d" | "0D") => (10, &unsigned[2..]),
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..]),
        _ => (10, unsigned),
    };

    let digits: String = digits.chars().filter(|ch| *ch != '_').collect();
    let magnitude = i128::from_str_radix(&digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// Splits a `/body/flags` lexeme into its regular-expression source and flags.
pub(crate) fn split_regexp(lexeme: &str) -> (String, RegexpFlags) {
    let close = lexeme.rfind('/').unwrap_or(lexeme.len());
    let body = lexeme.get(1..close).unwrap_or_default();
    let flags = lexeme
        .get(close + 1..)
        .unwrap_or_default()
        .chars()
        .fold(RegexpFlags::empty(), |flags, ch| {
            flags | RegexpFlags::from_char(ch).unwrap_or(RegexpFlags::empty())
        });

    (body.replace("\\/", "/"), flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quoted_strings_keep_unknown_escapes() {
        assert_eq!(unquote_string(r"'abc'"), "abc");
        assert_eq!(unquote_string(r"'a\'b'"), "a'b");
        assert_eq!(unquote_string(r"'a\\b'"), r"a\b");
        assert_eq!(unquote_string(r"'a\nb'"), r"a\nb");
    }

    #[test]
    fn double_quoted_strings_decode_control_escapes() {
        assert_eq!(unquote_string(r#""a\nb""#), "a\nb");
        assert_eq!(unquote_string(r#""\t\r\f\v\a\e\b\s""#), "\t\r\x0c\x0b\x07\x1b\x08 ");
        assert_eq!(unquote_string(r#""\"\\""#), "\"\\");
        assert_eq!(unquote_string(r#""\q""#), "q");
    }

    #[test]
    fn double_quoted_strings_decode_numeric_escapes() {
        assert_eq!(unquote_string(r#""\101\1012""#), "AA2");
        assert_eq!(unquote_string(r#""\0""#), "\0");
        assert_eq!(unquote_string(r#""\x41\x4a""#), "AJ");
        assert_eq!(unquote_string(r#""A\u{1F600}""#), "A\u{1F600}");
        assert_eq!(unquote_string(r#""\xe9""#), "\u{e9}");
    }

    #[test]
    fn double_quoted_strings_decode_control_names() {
        assert_eq!(unquote_string(r#""\ca\C-a\c?""#), "\x01\x01\x7f");
        assert_eq!(unquote_string(r#""\M-a""#), "\u{e1}");
        assert_eq!(unquote_string(r#""\M-\ca""#), "\u{81}");
    }

    #[test]
    fn parses_integer_radixes() {
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("+42"), Some(42));
        assert_eq!(parse_integer("-42"), Some(-42));
        assert_eq!(parse_integer("1_000_000"), Some(1_000_000));
        assert_eq!(parse_integer("0b1010"), Some(10));
        assert_eq!(parse_integer("0o17"), Some(15));
        assert_eq!(parse_integer("017"), Some(15));
        assert_eq!(parse_integer("0_17"), Some(15));
        assert_eq!(parse_integer("0d19"), Some(19));
        assert_eq!(parse_integer("0xff_ff"), Some(0xffff));
        assert_eq!(parse_integer("-0x10"), Some(-16));
        assert_eq!(parse_integer("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_integer("9223372036854775808"), None);
    }

    #[test]
    fn splits_regexp_body_and_flags() {
        let (source, flags) = split_regexp(r"/a\/b/im");
        assert_eq!(source, "a/b");
        assert_eq!(flags, RegexpFlags::IGNORE_CASE | RegexpFlags::MULTILINE);

        let (source, flags) = split_regexp("/^foo$/");
        assert_eq!(source, "^foo$");
        assert!(flags.is_empty());
    }
}
