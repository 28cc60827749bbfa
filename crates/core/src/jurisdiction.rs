//! Gyeonggi-do jurisdictions served by the merchant registry.
//!
//! The registry is queried by the Korean district name (`SIGUN_NM`). The list
//! is closed: anything outside it is rejected before a request is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the 31 cities and counties of Gyeonggi-do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Jurisdiction {
    #[serde(rename = "가평군")]
    Gapyeong,
    #[serde(rename = "고양시")]
    Goyang,
    #[serde(rename = "과천시")]
    Gwacheon,
    #[serde(rename = "광명시")]
    Gwangmyeong,
    #[serde(rename = "광주시")]
    Gwangju,
    #[serde(rename = "구리시")]
    Guri,
    #[serde(rename = "군포시")]
    Gunpo,
    #[serde(rename = "김포시")]
    Gimpo,
    #[serde(rename = "남양주시")]
    Namyangju,
    #[serde(rename = "동두천시")]
    Dongducheon,
    #[serde(rename = "부천시")]
    Bucheon,
    #[serde(rename = "성남시")]
    Seongnam,
    #[serde(rename = "수원시")]
    Suwon,
    #[serde(rename = "시흥시")]
    Siheung,
    #[serde(rename = "안산시")]
    Ansan,
    #[serde(rename = "안성시")]
    Anseong,
    #[serde(rename = "안양시")]
    Anyang,
    #[serde(rename = "양주시")]
    Yangju,
    #[serde(rename = "양평군")]
    Yangpyeong,
    #[serde(rename = "여주시")]
    Yeoju,
    #[serde(rename = "연천군")]
    Yeoncheon,
    #[serde(rename = "오산시")]
    Osan,
    #[serde(rename = "용인시")]
    Yongin,
    #[serde(rename = "의왕시")]
    Uiwang,
    #[serde(rename = "의정부시")]
    Uijeongbu,
    #[serde(rename = "이천시")]
    Icheon,
    #[serde(rename = "파주시")]
    Paju,
    #[serde(rename = "평택시")]
    Pyeongtaek,
    #[serde(rename = "포천시")]
    Pocheon,
    #[serde(rename = "하남시")]
    Hanam,
    #[serde(rename = "화성시")]
    Hwaseong,
}

impl Jurisdiction {
    /// Every jurisdiction, in the order the dashboard lists them.
    pub const ALL: [Jurisdiction; 31] = [
        Jurisdiction::Gapyeong,
        Jurisdiction::Goyang,
        Jurisdiction::Gwacheon,
        Jurisdiction::Gwangmyeong,
        Jurisdiction::Gwangju,
        Jurisdiction::Guri,
        Jurisdiction::Gunpo,
        Jurisdiction::Gimpo,
        Jurisdiction::Namyangju,
        Jurisdiction::Dongducheon,
        Jurisdiction::Bucheon,
        Jurisdiction::Seongnam,
        Jurisdiction::Suwon,
        Jurisdiction::Siheung,
        Jurisdiction::Ansan,
        Jurisdiction::Anseong,
        Jurisdiction::Anyang,
        Jurisdiction::Yangju,
        Jurisdiction::Yangpyeong,
        Jurisdiction::Yeoju,
        Jurisdiction::Yeoncheon,
        Jurisdiction::Osan,
        Jurisdiction::Yongin,
        Jurisdiction::Uiwang,
        Jurisdiction::Uijeongbu,
        Jurisdiction::Icheon,
        Jurisdiction::Paju,
        Jurisdiction::Pyeongtaek,
        Jurisdiction::Pocheon,
        Jurisdiction::Hanam,
        Jurisdiction::Hwaseong,
    ];

    /// Korean district name, as sent in the `SIGUN_NM` query parameter.
    pub fn name(self) -> &'static str {
        match self {
            Jurisdiction::Gapyeong => "가평군",
            Jurisdiction::Goyang => "고양시",
            Jurisdiction::Gwacheon => "과천시",
            Jurisdiction::Gwangmyeong => "광명시",
            Jurisdiction::Gwangju => "광주시",
            Jurisdiction::Guri => "구리시",
            Jurisdiction::Gunpo => "군포시",
            Jurisdiction::Gimpo => "김포시",
            Jurisdiction::Namyangju => "남양주시",
            Jurisdiction::Dongducheon => "동두천시",
            Jurisdiction::Bucheon => "부천시",
            Jurisdiction::Seongnam => "성남시",
            Jurisdiction::Suwon => "수원시",
            Jurisdiction::Siheung => "시흥시",
            Jurisdiction::Ansan => "안산시",
            Jurisdiction::Anseong => "안성시",
            Jurisdiction::Anyang => "안양시",
            Jurisdiction::Yangju => "양주시",
            Jurisdiction::Yangpyeong => "양평군",
            Jurisdiction::Yeoju => "여주시",
            Jurisdiction::Yeoncheon => "연천군",
            Jurisdiction::Osan => "오산시",
            Jurisdiction::Yongin => "용인시",
            Jurisdiction::Uiwang => "의왕시",
            Jurisdiction::Uijeongbu => "의정부시",
            Jurisdiction::Icheon => "이천시",
            Jurisdiction::Paju => "파주시",
            Jurisdiction::Pyeongtaek => "평택시",
            Jurisdiction::Pocheon => "포천시",
            Jurisdiction::Hanam => "하남시",
            Jurisdiction::Hwaseong => "화성시",
        }
    }

    /// Lowercase romanized name, accepted as an alternative spelling on input.
    pub fn slug(self) -> &'static str {
        match self {
            Jurisdiction::Gapyeong => "gapyeong",
            Jurisdiction::Goyang => "goyang",
            Jurisdiction::Gwacheon => "gwacheon",
            Jurisdiction::Gwangmyeong => "gwangmyeong",
            Jurisdiction::Gwangju => "gwangju",
            Jurisdiction::Guri => "guri",
            Jurisdiction::Gunpo => "gunpo",
            Jurisdiction::Gimpo => "gimpo",
            Jurisdiction::Namyangju => "namyangju",
            Jurisdiction::Dongducheon => "dongducheon",
            Jurisdiction::Bucheon => "bucheon",
            Jurisdiction::Seongnam => "seongnam",
            Jurisdiction::Suwon => "suwon",
            Jurisdiction::Siheung => "siheung",
            Jurisdiction::Ansan => "ansan",
            Jurisdiction::Anseong => "anseong",
            Jurisdiction::Anyang => "anyang",
            Jurisdiction::Yangju => "yangju",
            Jurisdiction::Yangpyeong => "yangpyeong",
            Jurisdiction::Yeoju => "yeoju",
            Jurisdiction::Yeoncheon => "yeoncheon",
            Jurisdiction::Osan => "osan",
            Jurisdiction::Yongin => "yongin",
            Jurisdiction::Uiwang => "uiwang",
            Jurisdiction::Uijeongbu => "uijeongbu",
            Jurisdiction::Icheon => "icheon",
            Jurisdiction::Paju => "paju",
            Jurisdiction::Pyeongtaek => "pyeongtaek",
            Jurisdiction::Pocheon => "pocheon",
            Jurisdiction::Hanam => "hanam",
            Jurisdiction::Hwaseong => "hwaseong",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Jurisdiction {
    type Err = Error;

    /// Parse a Korean district name (`수원시`) or a romanized slug (`suwon`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(Error::InvalidInput("jurisdiction cannot be empty".into()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|j| j.name() == input || j.slug().eq_ignore_ascii_case(input))
            .ok_or_else(|| Error::UnknownJurisdiction(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_names_unique() {
        let names: HashSet<_> = Jurisdiction::ALL.iter().map(|j| j.name()).collect();
        let slugs: HashSet<_> = Jurisdiction::ALL.iter().map(|j| j.slug()).collect();
        assert_eq!(names.len(), 31);
        assert_eq!(slugs.len(), 31);
    }

    #[test]
    fn test_parse_korean_name() {
        assert_eq!("수원시".parse::<Jurisdiction>().unwrap(), Jurisdiction::Suwon);
        assert_eq!(" 가평군 ".parse::<Jurisdiction>().unwrap(), Jurisdiction::Gapyeong);
    }

    #[test]
    fn test_parse_slug_case_insensitive() {
        assert_eq!("uijeongbu".parse::<Jurisdiction>().unwrap(), Jurisdiction::Uijeongbu);
        assert_eq!("Hwaseong".parse::<Jurisdiction>().unwrap(), Jurisdiction::Hwaseong);
    }

    #[test]
    fn test_parse_unknown() {
        let result = "서울시".parse::<Jurisdiction>();
        assert!(matches!(result, Err(Error::UnknownJurisdiction(name)) if name == "서울시"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!("  ".parse::<Jurisdiction>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_serde_uses_korean_name() {
        let json = serde_json::to_string(&Jurisdiction::Suwon).unwrap();
        assert_eq!(json, "\"수원시\"");

        let parsed: Jurisdiction = serde_json::from_str("\"하남시\"").unwrap();
        assert_eq!(parsed, Jurisdiction::Hanam);
    }

    #[test]
    fn test_display_matches_name() {
        for j in Jurisdiction::ALL {
            assert_eq!(j.to_string(), j.name());
        }
    }
}
