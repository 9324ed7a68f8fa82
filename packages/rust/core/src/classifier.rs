//! Administrative-name classifier.
//!
//! Decomposes a full registry name such as `서울특별시 강남구 역삼동` into
//! region / district / locality names and decides which level the name
//! terminates at. Rules are checked in order against the last token's
//! suffix; the first match wins.

use regiontree_shared::Classification;

/// 리: sub-locality unit, finer than the tracked hierarchy.
pub const VILLAGE_SUFFIX: char = '리';

/// Region whose districts are its towns and neighborhoods directly.
pub const AUTONOMOUS_CITY: &str = "세종특별자치시";

/// 시 / 도
pub const REGION_SUFFIXES: &[char] = &['시', '도'];

/// 시 / 군 / 구
pub const DISTRICT_SUFFIXES: &[char] = &['시', '군', '구'];

/// 읍 / 면 / 동 / 가
pub const LOCALITY_SUFFIXES: &[char] = &['읍', '면', '동', '가'];

/// Classify a whitespace-separated hierarchical name.
///
/// Never fails: names that fit no rule come back excluded
/// ([`Classification::is_excluded`]) and callers drop them.
pub fn classify(full_name: &str) -> Classification {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    let (Some(&first), Some(&last)) = (tokens.first(), tokens.last()) else {
        return Classification::excluded();
    };

    if last.ends_with(VILLAGE_SUFFIX) {
        return Classification::excluded();
    }

    if first == AUTONOMOUS_CITY {
        return if ends_with_any(last, LOCALITY_SUFFIXES) {
            Classification::district(Some(first.to_string()), last)
        } else {
            Classification::region(first)
        };
    }

    if ends_with_any(last, REGION_SUFFIXES) {
        // Region names may span several tokens.
        return Classification::region(tokens.join(" "));
    }

    if ends_with_any(last, DISTRICT_SUFFIXES) {
        return Classification::district(Some(first.to_string()), tokens.join(" "));
    }

    if ends_with_any(last, LOCALITY_SUFFIXES) {
        return match tokens.as_slice() {
            [_] => Classification::locality(None, None, last),
            [district, _] => Classification::locality(None, Some(district.to_string()), last),
            [region, middle @ .., _] => Classification::locality(
                Some(region.to_string()),
                Some(middle.join(" ")),
                last,
            ),
            [] => Classification::excluded(),
        };
    }

    Classification::excluded()
}

fn ends_with_any(token: &str, suffixes: &[char]) -> bool {
    token.ends_with(suffixes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use regiontree_shared::TerminalLevel;

    fn names(c: &Classification) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            c.region.as_deref(),
            c.district.as_deref(),
            c.locality.as_deref(),
        )
    }

    #[test]
    fn village_names_are_excluded() {
        for name in [
            "경기도 가평군 설악면 신천리",
            "세종특별자치시 조치원읍 번암리",
            "충청북도 청주시 상당구 낭성면 관정리",
            "신천리",
        ] {
            let c = classify(name);
            assert!(c.is_excluded(), "{name} should be excluded");
            assert_eq!(names(&c), (None, None, None));
        }
    }

    #[test]
    fn autonomous_city_locality_is_a_district() {
        let c = classify("세종특별자치시 조치원읍");
        assert_eq!(c.terminal, Some(TerminalLevel::District));
        assert_eq!(names(&c), (Some("세종특별자치시"), Some("조치원읍"), None));

        let c = classify("세종특별자치시 한솔동");
        assert_eq!(c.terminal, Some(TerminalLevel::District));
        assert_eq!(c.district.as_deref(), Some("한솔동"));
    }

    #[test]
    fn bare_autonomous_city_is_a_region() {
        let c = classify("세종특별자치시");
        assert_eq!(c.terminal, Some(TerminalLevel::Region));
        assert_eq!(names(&c), (Some("세종특별자치시"), None, None));
    }

    #[test]
    fn single_token_region() {
        for name in ["서울특별시", "경기도", "강원특별자치도"] {
            let c = classify(name);
            assert_eq!(c.terminal, Some(TerminalLevel::Region));
            assert_eq!(names(&c), (Some(name), None, None));
        }
    }

    #[test]
    fn region_suffix_wins_over_district_suffix() {
        // 시 is both a region and a district suffix; the region rule is checked first.
        let c = classify("경기도 수원시");
        assert_eq!(c.terminal, Some(TerminalLevel::Region));
        assert_eq!(c.region.as_deref(), Some("경기도 수원시"));
        assert!(c.district.is_none());
    }

    #[test]
    fn district_name_echoes_full_name() {
        let c = classify("서울특별시 종로구");
        assert_eq!(c.terminal, Some(TerminalLevel::District));
        assert_eq!(names(&c), (Some("서울특별시"), Some("서울특별시 종로구"), None));

        let c = classify("경기도 가평군");
        assert_eq!(c.district.as_deref(), Some("경기도 가평군"));
    }

    #[test]
    fn bare_district_token() {
        let c = classify("종로구");
        assert_eq!(c.terminal, Some(TerminalLevel::District));
        assert_eq!(names(&c), (Some("종로구"), Some("종로구"), None));
    }

    #[test]
    fn three_token_locality() {
        let c = classify("서울특별시 종로구 청운동");
        assert_eq!(c.terminal, Some(TerminalLevel::Locality));
        assert_eq!(names(&c), (Some("서울특별시"), Some("종로구"), Some("청운동")));
    }

    #[test]
    fn middle_tokens_form_the_district() {
        let c = classify("경기도 수원시 장안구 파장동");
        assert_eq!(c.terminal, Some(TerminalLevel::Locality));
        assert_eq!(
            names(&c),
            (Some("경기도"), Some("수원시 장안구"), Some("파장동"))
        );
    }

    #[test]
    fn block_suffix_is_a_locality() {
        let c = classify("서울특별시 종로구 종로1가");
        assert_eq!(c.terminal, Some(TerminalLevel::Locality));
        assert_eq!(c.locality.as_deref(), Some("종로1가"));
    }

    #[test]
    fn short_locality_names_degrade() {
        let c = classify("종로구 청운동");
        assert_eq!(c.terminal, Some(TerminalLevel::Locality));
        assert_eq!(names(&c), (None, Some("종로구"), Some("청운동")));

        let c = classify("청운동");
        assert_eq!(c.terminal, Some(TerminalLevel::Locality));
        assert_eq!(names(&c), (None, None, None));
    }

    #[test]
    fn unrecognised_suffix_is_excluded() {
        assert!(classify("서울특별시 종로구 세종로 1번지").is_excluded());
        assert!(classify("출장소").is_excluded());
    }

    #[test]
    fn blank_name_is_excluded() {
        assert!(classify("").is_excluded());
        assert!(classify("   ").is_excluded());
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        assert_eq!(
            classify("  서울특별시   종로구 청운동 "),
            classify("서울특별시 종로구 청운동")
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let name = "부산광역시 해운대구 우동";
        assert_eq!(classify(name), classify(name));
    }
}
