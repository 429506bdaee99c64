//! Phone number utilities
//!
//! Rewriting via the gateway's `REGEXP` option, plus the masking and
//! validation helpers shared by all providers.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::{keys, SmsGatewayConfig};

// REGEXP option wrapper: /search/replace/
static MANGLE_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new("^/(.*)/(.*)/$").unwrap());

/// Rewrite a phone number with the gateway's `REGEXP` option.
///
/// The option value has the form `/search/replace/`, e.g. `/[^0-9+]//` to
/// strip everything but digits and the leading plus. A missing option
/// leaves the number unchanged; a malformed or invalid expression is
/// logged and also leaves it unchanged.
pub fn mangle_phone(phone: &str, config: &SmsGatewayConfig) -> String {
    let Some(expr) = config.option(keys::REGEXP) else {
        return phone.to_string();
    };
    let Some(parts) = MANGLE_EXPR.captures(expr) else {
        warn!(expr = %expr, "REGEXP option is not of the form /search/replace/");
        return phone.to_string();
    };
    let (search, replace) = (&parts[1], &parts[2]);
    match Regex::new(search) {
        Ok(re) => {
            let mangled = re.replace_all(phone, replace).into_owned();
            debug!(
                phone = %mask_phone_number(phone),
                mangled = %mask_phone_number(&mangled),
                "rewrote phone number"
            );
            mangled
        }
        Err(err) => {
            warn!(error = %err, "invalid REGEXP search pattern, phone number left unchanged");
            phone.to_string()
        }
    }
}

/// Mask a phone number for logging, keeping only the last four characters.
pub fn mask_phone_number(phone: &str) -> String {
    if phone.len() <= 4 {
        return "*".repeat(phone.len());
    }

    let visible = 4;
    let masked = phone.len() - visible;
    let last = &phone[phone.len() - visible..];

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked - 1), last)
    } else {
        format!("{}{}", "*".repeat(masked), last)
    }
}

/// E.164 shape check: leading `+`, 10 to 15 digits.
///
/// The SNPP provider itself does not require E.164 input (pager targets
/// are gateway-defined); this is for providers and callers that do.
pub fn is_valid_phone_number(phone: &str) -> bool {
    if !phone.starts_with('+') {
        return false;
    }

    let digits = &phone[1..];
    if digits.len() < 10 || digits.len() > 15 {
        return false;
    }

    digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_regexp(expr: &str) -> SmsGatewayConfig {
        SmsGatewayConfig::new().with_option(keys::REGEXP, expr)
    }

    #[test]
    fn no_regexp_leaves_phone_unchanged() {
        let config = SmsGatewayConfig::new();
        assert_eq!(mangle_phone("+1 (555) 123", &config), "+1 (555) 123");
    }

    #[test]
    fn strips_formatting_characters() {
        let config = config_with_regexp("/[^0-9+]//");
        assert_eq!(mangle_phone("+1 (555) 123", &config), "+1555123");
    }

    #[test]
    fn rewrites_country_prefix() {
        let config = config_with_regexp(r"/^\+49/0049/");
        assert_eq!(mangle_phone("+491234567", &config), "00491234567");
    }

    #[test]
    fn malformed_wrapper_is_ignored() {
        let config = config_with_regexp("strip");
        assert_eq!(mangle_phone("+1555", &config), "+1555");
    }

    #[test]
    fn invalid_search_pattern_is_ignored() {
        let config = config_with_regexp("/[//");
        assert_eq!(mangle_phone("+1555", &config), "+1555");
    }

    #[test]
    fn masks_phone_numbers() {
        assert_eq!(mask_phone_number("+1234567890"), "+******7890");
        assert_eq!(mask_phone_number("1234567890"), "******7890");
        assert_eq!(mask_phone_number("123"), "***");
        assert_eq!(mask_phone_number("1234"), "****");
    }

    #[test]
    fn validates_e164_shape() {
        assert!(is_valid_phone_number("+1234567890"));
        assert!(is_valid_phone_number("+123456789012345"));

        assert!(!is_valid_phone_number("1234567890")); // No plus
        assert!(!is_valid_phone_number("+123")); // Too short
        assert!(!is_valid_phone_number("+1234567890123456")); // Too long
        assert!(!is_valid_phone_number("+123abc4567")); // Contains letters
        assert!(!is_valid_phone_number("+")); // Only plus sign
    }
}
