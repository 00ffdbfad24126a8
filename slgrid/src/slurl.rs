//! Parsing of map-viewer location URLs (`http://maps.<host>/<namespace>/<REGION>/<X>/<Y>/<Z>`).

use crate::error::{GridError, Result};
use crate::types::LocationReference;
use regex::Regex;
use std::sync::LazyLock;

pub const CANONICAL_SCHEME: &str = "secondlife";

static SLURL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://maps\.[^/\s]+/[^/\s]+/([^/]+)/(\d+)/(\d+)/(\d+)$")
        .expect("Invalid SLURL regex")
});

pub fn parse(input: &str) -> Result<LocationReference> {
    let trimmed = input.trim();
    let invalid = || GridError::Format(format!("Invalid location URL: {trimmed}"));

    let caps = SLURL_REGEX.captures(trimmed).ok_or_else(invalid)?;

    let area_name = urlencoding::decode(&caps[1])
        .map_err(|_| invalid())?
        .into_owned();

    let offset = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());
    let (offset_x, offset_y, offset_z) = (offset(2)?, offset(3)?, offset(4)?);

    let canonical_url = canonical_url(&area_name, offset_x, offset_y, offset_z);

    Ok(LocationReference {
        area_name,
        offset_x,
        offset_y,
        offset_z,
        canonical_url,
    })
}

/// Percent-encodes every byte outside `A-Z a-z 0-9 - _ . ~`, slashes included.
pub fn encode_area(area_name: &str) -> String {
    urlencoding::encode(area_name).into_owned()
}

pub fn canonical_url(area_name: &str, x: u32, y: u32, z: u32) -> String {
    format!("{CANONICAL_SCHEME}://{}/{x}/{y}/{z}", encode_area(area_name))
}

impl LocationReference {
    pub const fn offset(&self) -> [u32; 3] {
        [self.offset_x, self.offset_y, self.offset_z]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_url() {
        let loc = parse("http://maps.secondlife.com/secondlife/Nautilus/128/64/22").unwrap();
        assert_eq!(loc.area_name, "Nautilus");
        assert_eq!(loc.offset(), [128, 64, 22]);
        assert_eq!(loc.canonical_url, "secondlife://Nautilus/128/64/22");
    }

    #[test]
    fn test_parse_decodes_region_name() {
        let loc = parse("http://maps.example.com/secondlife/My%20Region/10/20/0").unwrap();
        assert_eq!(loc.area_name, "My Region");
        assert_eq!(loc.canonical_url, "secondlife://My%20Region/10/20/0");
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        let loc = parse("  \thttps://maps.secondlife.com/secondlife/Bay/1/2/3 \r\n").unwrap();
        assert_eq!(loc.area_name, "Bay");
        assert_eq!(loc.offset(), [1, 2, 3]);
    }

    #[test]
    fn test_parse_scheme_and_host_case_insensitive() {
        let loc = parse("HTTPS://MAPS.SecondLife.com/secondlife/Bay/1/2/3").unwrap();
        assert_eq!(loc.area_name, "Bay");
    }

    #[test]
    fn test_parse_unicode_region() {
        let loc =
            parse("http://maps.secondlife.com/secondlife/K%C3%B6ln%20S%C3%BCd/5/6/7").unwrap();
        assert_eq!(loc.area_name, "Köln Süd");
        assert_eq!(loc.canonical_url, "secondlife://K%C3%B6ln%20S%C3%BCd/5/6/7");
    }

    #[test]
    fn test_parse_reencodes_reserved_characters() {
        let loc = parse("http://maps.secondlife.com/secondlife/Rock+Roll%26Co/1/1/1").unwrap();
        assert_eq!(loc.area_name, "Rock+Roll&Co");
        assert_eq!(loc.canonical_url, "secondlife://Rock%2BRoll%26Co/1/1/1");
    }

    #[test]
    fn test_parse_rejects_malformed_urls() {
        let bad = [
            "",
            "not a url",
            "ftp://maps.secondlife.com/secondlife/Bay/1/2/3",
            "http://secondlife.com/secondlife/Bay/1/2/3",
            "http://maps.secondlife.com/secondlife/Bay/1/2",
            "http://maps.secondlife.com/secondlife/Bay/1/2/3/4",
            "http://maps.secondlife.com/secondlife/Bay/-1/2/3",
            "http://maps.secondlife.com/secondlife/Bay/1.5/2/3",
            "http://maps.secondlife.com/secondlife/Bay/99999999999/2/3",
            "http://maps.secondlife.com/secondlife/%FF/1/2/3",
        ];

        for url in bad {
            let err = parse(url).unwrap_err();
            assert!(matches!(err, GridError::Format(_)), "accepted {url:?}");
        }
    }

    #[test]
    fn test_parse_error_carries_input() {
        let err = parse("http://maps.secondlife.com/oops").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Format error: Invalid location URL: http://maps.secondlife.com/oops"
        );
    }

    #[test]
    fn test_canonical_form_is_stable() {
        for name in ["My Region", "Rock+Roll&Co", "a/b", "Köln Süd", "100%", "plain"] {
            let once = encode_area(name);
            let decoded = urlencoding::decode(&once).unwrap();
            assert_eq!(decoded, name);
            assert_eq!(encode_area(&decoded), once);
        }
    }

    #[test]
    fn test_canonical_url_round_trips_through_parse() {
        let first = parse("http://maps.secondlife.com/secondlife/Rock%20%26%20Roll/9/8/7").unwrap();
        let area_segment = encode_area(&first.area_name);
        let again = parse(&format!(
            "http://maps.secondlife.com/secondlife/{area_segment}/9/8/7"
        ))
        .unwrap();
        assert_eq!(again, first);
    }
}
