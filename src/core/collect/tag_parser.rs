//! Doc-comment tag grammar.
//!
//! A comment carries any number of `@name` or `@name(arg, arg, ...)` tokens.
//! Names are letters, underscores and dots. Arguments are a flat comma list,
//! each token is trimmed of leading spaces and typed by the first rule that
//! accepts the whole token: `i64`, `f32`, `true`/`false`, `@TypeName`, string.
//! Floats may also be written in hex (`0x10`, `0x1.8p3`).

use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::{Tag, TagArgument, Tags, TypeReference};

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([a-zA-Z_.]+)(\([^)]*\))?").unwrap());

/// Parse every tag in `comment`. Text that does not match the grammar is ignored.
pub fn parse_tags(comment: &str) -> Tags {
    let mut tags = Tags::new();

    for captures in TAG_REGEX.captures_iter(comment) {
        let Some(name) = captures.get(1).map(|m| m.as_str()) else {
            continue;
        };

        let arguments = captures
            .get(2)
            .map(|m| parse_arguments(m.as_str()))
            .unwrap_or_default();

        tags.insert(Tag::with_arguments(name, arguments));
    }

    tags
}

fn parse_arguments(raw: &str) -> Vec<TagArgument> {
    let inner: String = raw.chars().filter(|c| *c != '(' && *c != ')').collect();

    inner
        .split(',')
        .map(|token| token.trim_start_matches(' '))
        .filter(|token| !token.is_empty())
        .map(parse_argument)
        .collect()
}

fn parse_argument(token: &str) -> TagArgument {
    if let Ok(value) = token.parse::<i64>() {
        return TagArgument::I64(value);
    }

    if let Some(value) = token.parse::<f32>().ok().or_else(|| parse_hex_float(token)) {
        return TagArgument::Float(value);
    }

    match token {
        "true" => return TagArgument::Bool(true),
        "false" => return TagArgument::Bool(false),
        _ => {}
    }

    if let Some(type_name) = token.strip_prefix('@') {
        return TagArgument::TypeRef(TypeReference::new(type_name));
    }

    TagArgument::String(token.to_string())
}

/// `[+-]0x<hex>[.<hex>][p[+-]<dec>]`, the whole token.
fn parse_hex_float(token: &str) -> Option<f32> {
    let (negative, rest) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let rest = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))?;

    let (mantissa, exponent) = match rest.find(['p', 'P']) {
        Some(index) => (&rest[..index], rest[index + 1..].parse::<i32>().ok()?),
        None => (rest, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut value = 0f64;
    for c in whole.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in fraction.chars() {
        value += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }

    let value = value * 2f64.powi(exponent);
    let value = if negative { -value } else { value };
    Some(value as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ============================================================
    // Tag names
    // ============================================================

    #[test]
    fn test_parse_simple_tags() {
        let tags = parse_tags(
            r#"/**
             * @runtime
             * @serialize(Test)
             * @make_fun(1,2,17.2,TestValue)
             **/"#,
        );

        assert_eq!(tags.len(), 3);
        assert!(tags.is_runtime());
        assert!(!tags.get("runtime").unwrap().has_arguments());
        assert_eq!(
            tags.get("serialize").unwrap().arguments,
            vec![TagArgument::String("Test".into())]
        );
        assert_eq!(
            tags.get("make_fun").unwrap().arguments,
            vec![
                TagArgument::I64(1),
                TagArgument::I64(2),
                TagArgument::Float(17.2),
                TagArgument::String("TestValue".into()),
            ]
        );
    }

    #[test]
    fn test_dotted_names() {
        let tags = parse_tags("@script.bind(true)");
        assert_eq!(
            tags.get("script.bind").unwrap().arguments,
            vec![TagArgument::Bool(true)]
        );
    }

    #[test]
    fn test_last_tag_wins() {
        let tags = parse_tags("@a(1) @a(2)");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("a").unwrap().arguments, vec![TagArgument::I64(2)]);
    }

    #[test]
    fn test_no_tags() {
        assert!(parse_tags("plain comment, no markers").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_email_like_text_is_a_tag() {
        let tags = parse_tags("contact: someone@example.com");
        assert!(tags.has("example.com"));
    }

    // ============================================================
    // Argument inference
    // ============================================================

    #[test]
    fn test_type_reference_argument() {
        let tags = parse_tags("@owner(@Foo::Bar)");
        let argument = tags.get("owner").unwrap().argument(0).unwrap();

        let reference = argument.as_type_ref().unwrap();
        assert_eq!(reference.name(), "Foo::Bar");
        assert!(!reference.is_resolved());
    }

    #[test]
    fn test_leading_spaces_trimmed_empty_dropped() {
        let tags = parse_tags("@list(  a,, ,b)");
        assert_eq!(
            tags.get("list").unwrap().arguments,
            vec![TagArgument::String("a".into()), TagArgument::String("b".into())]
        );
    }

    #[test]
    fn test_trailing_spaces_kept() {
        let tags = parse_tags("@x(1 )");
        assert_eq!(
            tags.get("x").unwrap().arguments,
            vec![TagArgument::String("1 ".into())]
        );
    }

    #[test]
    fn test_negative_and_bool_arguments() {
        let tags = parse_tags("@range(-5, 0.5, false)");
        assert_eq!(
            tags.get("range").unwrap().arguments,
            vec![
                TagArgument::I64(-5),
                TagArgument::Float(0.5),
                TagArgument::Bool(false),
            ]
        );
    }

    #[test]
    fn test_hex_float_arguments() {
        let tags = parse_tags("@scale(0x10, 0x1p3, -0x1.8, 0X.8p1, 0x, 0xg)");
        assert_eq!(
            tags.get("scale").unwrap().arguments,
            vec![
                TagArgument::Float(16.0),
                TagArgument::Float(8.0),
                TagArgument::Float(-1.5),
                TagArgument::Float(1.0),
                TagArgument::String("0x".into()),
                TagArgument::String("0xg".into()),
            ]
        );
    }

    #[test]
    fn test_nested_parens_are_not_supported() {
        // The argument list stops at the first `)`.
        let tags = parse_tags("@call(f(1), 2)");
        assert_eq!(
            tags.get("call").unwrap().arguments,
            vec![TagArgument::String("f1".into())]
        );
    }

    #[test]
    fn test_empty_argument_list() {
        let tags = parse_tags("@flag()");
        assert!(tags.has("flag"));
        assert!(!tags.get("flag").unwrap().has_arguments());
    }
}
