//! Content negotiation on the `Accept` header

use ldesim_codec::MediaType;

/// Pick the representation to serve
///
/// `offered` is in server preference order. Each offered type gets the quality
/// of the most specific media range that matches it; the highest quality wins
/// and ties go to the earlier offer. A missing or blank `Accept` takes the
/// first offer. Returns `None` when nothing offered is acceptable.
pub fn negotiate(accept: Option<&str>, offered: &[MediaType]) -> Option<MediaType> {
    let ranges = match accept.map(str::trim) {
        None | Some("") => return offered.first().copied(),
        Some(accept) => parse_accept(accept),
    };

    let mut best: Option<(MediaType, u16)> = None;
    for media_type in offered {
        let Some(quality) = quality_of(media_type.as_str(), &ranges) else {
            continue;
        };
        if quality == 0 {
            continue;
        }
        if best.map_or(true, |(_, current)| quality > current) {
            best = Some((*media_type, quality));
        }
    }

    best.map(|(media_type, _)| media_type)
}

/// A media range with its quality in thousandths
#[derive(Debug, PartialEq, Eq)]
struct MediaRange {
    main: String,
    sub: String,
    quality: u16,
}

impl MediaRange {
    /// 2 for an exact type, 1 for `type/*`, 0 for `*/*`; `None` if no match
    fn specificity(&self, main: &str, sub: &str) -> Option<u8> {
        match (self.main.as_str(), self.sub.as_str()) {
            ("*", "*") => Some(0),
            (range_main, "*") if range_main.eq_ignore_ascii_case(main) => Some(1),
            (range_main, range_sub)
                if range_main.eq_ignore_ascii_case(main) && range_sub.eq_ignore_ascii_case(sub) =>
            {
                Some(2)
            }
            _ => None,
        }
    }
}

fn parse_accept(accept: &str) -> Vec<MediaRange> {
    accept.split(',').filter_map(parse_range).collect()
}

fn parse_range(range: &str) -> Option<MediaRange> {
    let mut parts = range.split(';');
    let (main, sub) = parts.next()?.trim().split_once('/')?;

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .map_or(1000, |(_, value)| parse_quality(value.trim()));

    Some(MediaRange {
        main: main.trim().to_ascii_lowercase(),
        sub: sub.trim().to_ascii_lowercase(),
        quality,
    })
}

/// Parse a q-value (`0` to `1` with at most three decimals) into thousandths
///
/// Malformed values count as zero.
fn parse_quality(value: &str) -> u16 {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    let thousandths = format!("{:0<3}", fraction).parse::<u16>().unwrap_or(0);

    match whole {
        "1" if thousandths == 0 => 1000,
        "0" | "" => thousandths,
        _ => 0,
    }
}

fn quality_of(media_type: &str, ranges: &[MediaRange]) -> Option<u16> {
    let (main, sub) = media_type.split_once('/')?;
    ranges
        .iter()
        .filter_map(|range| range.specificity(main, sub).map(|rank| (rank, range.quality)))
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, quality)| quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MediaType; 4] = MediaType::PREFERENCE;

    #[test]
    fn test_missing_accept_takes_first_offer() {
        assert_eq!(negotiate(None, &ALL), Some(MediaType::Turtle));
        assert_eq!(negotiate(Some("  "), &ALL), Some(MediaType::Turtle));
        assert_eq!(negotiate(None, &[]), None);
    }

    #[test]
    fn test_wildcard_takes_first_offer() {
        assert_eq!(negotiate(Some("*/*"), &ALL), Some(MediaType::Turtle));
        assert_eq!(
            negotiate(Some("application/*"), &ALL),
            Some(MediaType::NTriples)
        );
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(
            negotiate(Some("application/ld+json"), &ALL),
            Some(MediaType::JsonLd)
        );
        assert_eq!(
            negotiate(Some("application/n-quads"), &ALL),
            Some(MediaType::NQuads)
        );
    }

    #[test]
    fn test_quality_values_rank_offers() {
        let accept = "text/turtle;q=0.5, application/ld+json, */*;q=0.1";

        assert_eq!(negotiate(Some(accept), &ALL), Some(MediaType::JsonLd));
    }

    #[test]
    fn test_specific_range_overrides_wildcard() {
        let accept = "*/*, text/turtle;q=0";

        assert_eq!(negotiate(Some(accept), &ALL), Some(MediaType::NTriples));
    }

    #[test]
    fn test_nothing_acceptable() {
        assert_eq!(negotiate(Some("text/html"), &ALL), None);
        assert_eq!(
            negotiate(Some("text/turtle"), &[MediaType::JsonLd]),
            None
        );
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality("1"), 1000);
        assert_eq!(parse_quality("1.0"), 1000);
        assert_eq!(parse_quality("0.8"), 800);
        assert_eq!(parse_quality("0.125"), 125);
        assert_eq!(parse_quality("0"), 0);
        assert_eq!(parse_quality("1.5"), 0);
        assert_eq!(parse_quality("high"), 0);
    }
}
