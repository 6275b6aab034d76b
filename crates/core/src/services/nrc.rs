//! National Registration Card numbers.
//!
//! An NRC number reads `{code}/{township}({citizenship}){number}`, for example
//! `12/LaMaNa(N)123456`: a numeric state/region code, the romanised township abbreviation,
//! a citizenship class and exactly six digits.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Citizenship class inside the parentheses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Citizenship {
    /// `N`: citizen.
    #[serde(rename = "N")]
    Citizen,
    /// `F`: foreigner.
    #[serde(rename = "F")]
    Foreigner,
    /// `P`: provisional.
    #[serde(rename = "P")]
    Provisional,
    /// `TH`: religious (thathana).
    #[serde(rename = "TH")]
    Religious,
    /// `S`: temporary (sa).
    #[serde(rename = "S")]
    Temporary,
}

impl Citizenship {
    pub const ALL: [Citizenship; 5] = [
        Citizenship::Citizen,
        Citizenship::Foreigner,
        Citizenship::Provisional,
        Citizenship::Religious,
        Citizenship::Temporary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Citizenship::Citizen => "N",
            Citizenship::Foreigner => "F",
            Citizenship::Provisional => "P",
            Citizenship::Religious => "TH",
            Citizenship::Temporary => "S",
        }
    }
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown citizenship class {0:?}")]
pub struct UnknownCitizenship(pub String);

impl FromStr for Citizenship {
    type Err = UnknownCitizenship;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Citizenship::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCitizenship(s.to_string()))
    }
}

/// The four parts of an NRC number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NrcComponents {
    pub code: String,
    pub name_en: String,
    pub citizenship: Citizenship,
    pub number: String,
}

static NRC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)/([A-Za-z]+)\((N|F|P|TH|S)\)(\d{6})$").expect("NRC pattern compiles")
});

/// Splits a full NRC number into its components. Anything that does not match the full
/// grammar yields `None`, including surrounding whitespace.
pub fn parse_nrc(value: &str) -> Option<NrcComponents> {
    let caps = NRC_PATTERN.captures(value)?;
    Some(NrcComponents {
        code: caps[1].to_string(),
        name_en: caps[2].to_string(),
        citizenship: caps[3].parse().ok()?,
        number: caps[4].to_string(),
    })
}

/// Formats components back into the canonical string.
pub fn build_nrc(components: &NrcComponents) -> String {
    format!(
        "{}/{}({}){}",
        components.code, components.name_en, components.citizenship, components.number
    )
}

pub fn is_valid_nrc_format(value: &str) -> bool {
    NRC_PATTERN.is_match(value)
}

/// State and region codes, 1 (Kachin) to 14 (Ayeyarwady).
pub fn nrc_codes() -> Vec<u8> {
    (1..=14).collect()
}

/// Township abbreviations registered under `code`. Unknown codes have none.
pub fn nrc_names(code: u8) -> &'static [&'static str] {
    match code {
        1 => &["BaMaNa", "MaKaNa", "WaMaNa", "PaTaAh"],
        2 => &["LaKaNa", "DaMaSa", "BaLaKha"],
        3 => &["BaAaNa", "KaKaYa", "MaWaTa"],
        4 => &["HaKhaNa", "PhaLaNa", "TaTaNa"],
        5 => &["SaKaNa", "MaYaNa", "KaLaNa", "ShaBaNa"],
        6 => &["DaWaNa", "MaAaNa", "KaThaNa"],
        7 => &["PaKhaNa", "TaNgaNa", "PaMaNa", "NyaLaPa"],
        8 => &["MaKwaNa", "PaKhaKa", "MaBaNa"],
        9 => &["AhMaYa", "ChaAaTa", "MaHaMa", "PaBaNa", "PyaOoLa"],
        10 => &["MaLaMa", "ThaHtaNa", "MaDaNa"],
        11 => &["SaTaNa", "MaAuNa", "KaPhaNa"],
        12 => &["AhLaNa", "BaHaNa", "DaGaNa", "KaMaYa", "LaMaNa", "MaGaDa"],
        13 => &["TaKaNa", "LaShaNa", "KaTaNa", "NyaYaNa"],
        14 => &["PaThaNa", "HaThaTa", "MaAhNa", "KaLaNa"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_citizenship_class() {
        for class in Citizenship::ALL {
            let value = format!("12/LaMaNa({class})123456");
            let parsed = parse_nrc(&value).expect("valid");
            assert_eq!(parsed.citizenship, class);
            assert_eq!(parsed.code, "12");
            assert_eq!(parsed.name_en, "LaMaNa");
            assert_eq!(parsed.number, "123456");
        }
    }

    fn components(code: &str, name: &str, citizenship: Citizenship, number: &str) -> NrcComponents {
        NrcComponents {
            code: code.into(),
            name_en: name.into(),
            citizenship,
            number: number.into(),
        }
    }

    #[test]
    fn build_then_parse_round_trips() {
        let table = [
            (components("9", "MaHaMa", Citizenship::Religious, "004512"), "9/MaHaMa(TH)004512"),
            (components("1", "BaMaNa", Citizenship::Citizen, "000001"), "1/BaMaNa(N)000001"),
            (components("12", "LaMaNa", Citizenship::Foreigner, "123456"), "12/LaMaNa(F)123456"),
            (components("14", "pathana", Citizenship::Provisional, "900000"), "14/pathana(P)900000"),
            (components("007", "KALANA", Citizenship::Temporary, "010203"), "007/KALANA(S)010203"),
            (components("123", "x", Citizenship::Citizen, "999999"), "123/x(N)999999"),
        ];
        for (parts, expected) in table {
            let built = build_nrc(&parts);
            assert_eq!(built, expected);
            assert!(is_valid_nrc_format(&built), "{built} should be valid");
            assert_eq!(parse_nrc(&built), Some(parts));
        }
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        for value in [
            " 12/LaMaNa(N)123456",
            "12/LaMaNa(N)123456 ",
            "12/LaMaNa(N)123456\n",
            " 12/LaMaNa(N)123456\n",
            "\t12/LaMaNa(N)123456",
        ] {
            assert!(!is_valid_nrc_format(value), "{value:?} should be rejected");
            assert_eq!(parse_nrc(value), None, "{value:?} should not parse");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for value in [
            "",
            "12/LaMaNa(N)12345",
            "12/LaMaNa(N)1234567",
            "12/LaMaNa(X)123456",
            "12/LaMaNa(T)123456",
            "LaMaNa(N)123456",
            "12/LaMa Na(N)123456",
            "12-LaMaNa(N)123456",
            "12/(N)123456",
            "12/LaMaNa(N)12345a",
        ] {
            assert!(!is_valid_nrc_format(value), "{value} should be rejected");
            assert_eq!(parse_nrc(value), None, "{value} should not parse");
        }
    }

    #[test]
    fn lookup_tables_cover_all_codes() {
        let codes = nrc_codes();
        assert_eq!(codes.first(), Some(&1));
        assert_eq!(codes.last(), Some(&14));
        assert!(codes.iter().all(|c| !nrc_names(*c).is_empty()));
        assert!(nrc_names(12).contains(&"LaMaNa"));
        assert!(nrc_names(15).is_empty());
    }

    #[test]
    fn citizenship_parses_from_wire_code() {
        assert_eq!("TH".parse::<Citizenship>(), Ok(Citizenship::Religious));
        assert!("t".parse::<Citizenship>().is_err());
    }
}
