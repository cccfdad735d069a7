//! Breakpoint Parser
//!
//! Band designations such as "q13", "p11.2" or "q?21", alone, concatenated
//! ("q13q33") or in semicolon-separated groups ("q34;q11.2").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::ast::{Arm, Breakpoint};
use crate::parser::error::SyntaxError;

/// One band designation anchored at the start of the remaining text
static BAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z])(\?)?(\d{1,3})(?:\.(\d+))?(\?)?").expect("band pattern compiles")
});

/// Parse exactly one band designation
pub fn parse_single(token: &str, fragment: &str) -> Result<Breakpoint, SyntaxError> {
    let mut run = parse_run(token, fragment)?;
    if run.len() != 1 {
        return Err(invalid(token, fragment));
    }
    Ok(run.remove(0))
}

/// Parse one or more concatenated band designations ("q13q33")
pub fn parse_run(text: &str, fragment: &str) -> Result<Vec<Breakpoint>, SyntaxError> {
    let mut breakpoints = Vec::new();
    let mut rest = text.trim();

    if rest.is_empty() {
        return Err(invalid(text, fragment));
    }

    while !rest.is_empty() {
        let caps = BAND_RE.captures(rest).ok_or_else(|| invalid(rest, fragment))?;
        let whole = caps.get(0).map_or("", |m| m.as_str());

        let arm_letter = caps[1].chars().next().unwrap_or_default();
        let arm = Arm::from_char(arm_letter).ok_or_else(|| invalid(whole, fragment))?;
        let (region, band) = split_digits(&caps[3]);

        breakpoints.push(Breakpoint {
            arm,
            region,
            band,
            subband: caps.get(4).map(|m| m.as_str().to_string()),
            uncertain: caps.get(2).is_some() || caps.get(5).is_some(),
        });

        rest = &rest[whole.len()..];
    }

    Ok(breakpoints)
}

/// Parse a ";"-separated group, one run per chromosome ("q34;q11.2")
pub fn parse_groups(text: &str, fragment: &str) -> Result<Vec<Vec<Breakpoint>>, SyntaxError> {
    text.split(';')
        .map(|segment| parse_run(segment, fragment))
        .collect()
}

/// Split a band digit run: first digit is the region, the rest the band
fn split_digits(digits: &str) -> (u8, u8) {
    let mut chars = digits.chars();
    let region = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .unwrap_or_default() as u8;
    let band = chars.as_str().parse::<u8>().unwrap_or_default();
    (region, band)
}

fn invalid(token: &str, fragment: &str) -> SyntaxError {
    SyntaxError::InvalidBreakpoint {
        token: token.to_string(),
        fragment: fragment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_band() {
        let bp = parse_single("q13", "del(5)(q13)").unwrap();
        assert_eq!(bp.arm, Arm::Q);
        assert_eq!(bp.region, 1);
        assert_eq!(bp.band, 3);
        assert_eq!(bp.subband, None);
        assert!(!bp.uncertain);
    }

    #[test]
    fn test_single_digit_is_region() {
        let bp = parse_single("p3", "add(1)(p3)").unwrap();
        assert_eq!(bp.region, 3);
        assert_eq!(bp.band, 0);
    }

    #[test]
    fn test_subband() {
        let bp = parse_single("p11.2", "del(7)(p11.2)").unwrap();
        assert_eq!(bp.arm, Arm::P);
        assert_eq!(bp.region, 1);
        assert_eq!(bp.band, 1);
        assert_eq!(bp.subband.as_deref(), Some("2"));
    }

    #[test]
    fn test_uncertain_band() {
        let bp = parse_single("q?21", "del(1)(q?21)").unwrap();
        assert!(bp.uncertain);
        assert_eq!(bp.region, 2);
        assert_eq!(bp.band, 1);
    }

    #[test]
    fn test_concatenated_run() {
        let run = parse_run("q13q33", "del(5)(q13q33)").unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run[1].region, 3);
        assert_eq!(run[1].band, 3);
    }

    #[test]
    fn test_run_with_subbands() {
        let run = parse_run("p11.2q13", "inv(2)(p11.2q13)").unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run[0].subband.as_deref(), Some("2"));
        assert_eq!(run[1].arm, Arm::Q);
    }

    #[test]
    fn test_groups() {
        let groups = parse_groups("q34;q11.2", "t(9;22)(q34;q11.2)").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1][0].subband.as_deref(), Some("2"));
    }

    #[test]
    fn test_invalid_arm() {
        let err = parse_single("x13", "del(5)(x13)").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidBreakpoint { .. }));
    }

    #[test]
    fn test_dangling_arm() {
        assert!(parse_run("q13q", "del(5)(q13q)").is_err());
        assert!(parse_run("q", "del(5)(q)").is_err());
        assert!(parse_run("13q", "del(5)(13q)").is_err());
        assert!(parse_run("", "del(5)()").is_err());
    }
}
