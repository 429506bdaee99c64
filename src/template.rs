//! Subject/body template rendering.
//!
//! Templates use the literal tags `{phone}` and `{otp}`. Substitution runs
//! in two passes: a named-placeholder pass over a fixed name set, then a
//! literal tag replacement, so a tag survives neither. No general-purpose
//! template evaluation happens here.

/// Literal tag for the destination phone number.
pub const PHONE_TAG: &str = "{phone}";
/// Literal tag for the one-time code or notification text.
pub const MSG_TAG: &str = "{otp}";

/// Render `template`, substituting every `{phone}` and `{otp}` occurrence.
pub fn render(template: &str, phone: &str, otp: &str) -> String {
    let pass = format_named(template, &[("phone", phone), ("otp", otp)]);
    pass.replace(PHONE_TAG, phone).replace(MSG_TAG, otp)
}

/// Substitute `{name}` placeholders from a fixed name/value set.
///
/// Unknown placeholders and unbalanced braces are left untouched.
fn format_named(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('}') {
            Some(close) => {
                let name = &tail[1..close];
                match values.iter().find(|(n, _)| *n == name) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&tail[..=close]),
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
