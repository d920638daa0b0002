use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ReferenceLayout;
use crate::errors::BinPlotError;

/// Canadian provinces and territories.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Province {
    NL,
    PE,
    NS,
    NB,
    QC,
    ON,
    MB,
    SK,
    AB,
    BC,
    YT,
    NT,
    NU,
}

impl Province {
    pub const ALL: [Province; 13] = [
        Province::NL,
        Province::PE,
        Province::NS,
        Province::NB,
        Province::QC,
        Province::ON,
        Province::MB,
        Province::SK,
        Province::AB,
        Province::BC,
        Province::YT,
        Province::NT,
        Province::NU,
    ];

    /// Two letter postal abbreviation, also the region id in the federal layout.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Province::NL => "NL",
            Province::PE => "PE",
            Province::NS => "NS",
            Province::NB => "NB",
            Province::QC => "QC",
            Province::ON => "ON",
            Province::MB => "MB",
            Province::SK => "SK",
            Province::AB => "AB",
            Province::BC => "BC",
            Province::YT => "YT",
            Province::NT => "NT",
            Province::NU => "NU",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Province::NL => "Newfoundland and Labrador",
            Province::PE => "Prince Edward Island",
            Province::NS => "Nova Scotia",
            Province::NB => "New Brunswick",
            Province::QC => "Quebec",
            Province::ON => "Ontario",
            Province::MB => "Manitoba",
            Province::SK => "Saskatchewan",
            Province::AB => "Alberta",
            Province::BC => "British Columbia",
            Province::YT => "Yukon",
            Province::NT => "Northwest Territories",
            Province::NU => "Nunavut",
        }
    }

    pub fn french_name(&self) -> &'static str {
        match self {
            Province::NL => "Terre-Neuve-et-Labrador",
            Province::PE => "Île-du-Prince-Édouard",
            Province::NS => "Nouvelle-Écosse",
            Province::NB => "Nouveau-Brunswick",
            Province::QC => "Québec",
            Province::ON => "Ontario",
            Province::MB => "Manitoba",
            Province::SK => "Saskatchewan",
            Province::AB => "Alberta",
            Province::BC => "Colombie-Britannique",
            Province::YT => "Yukon",
            Province::NT => "Territoires du Nord-Ouest",
            Province::NU => "Nunavut",
        }
    }

    /// Statistics Canada province code, the leading two digits of a federal riding code.
    pub fn sgc_code(&self) -> u32 {
        match self {
            Province::NL => 10,
            Province::PE => 11,
            Province::NS => 12,
            Province::NB => 13,
            Province::QC => 24,
            Province::ON => 35,
            Province::MB => 46,
            Province::SK => 47,
            Province::AB => 48,
            Province::BC => 59,
            Province::YT => 60,
            Province::NT => 61,
            Province::NU => 62,
        }
    }

    /// Case-insensitive lookup by abbreviation, English or French name.
    pub fn parse(name: &str) -> Option<Province> {
        let name = name.trim().to_lowercase();
        Province::ALL.into_iter().find(|p| {
            p.abbreviation().to_lowercase() == name
                || p.english_name().to_lowercase() == name
                || p.french_name().to_lowercase() == name
        })
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Province {
    type Err = BinPlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::parse(s).ok_or_else(|| BinPlotError::UnsupportedScope {
            provincial: false,
            region: Some(s.to_string()),
        })
    }
}

/// Which reference layout a bin plot draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every federal riding.
    Federal,
    /// Federal ridings of a single province.
    FederalProvince(Province),
    /// Provincial ridings. Only Quebec has a layout.
    Provincial(Province),
}

impl Scope {
    /// Maps the `provincial`/`region` pair of a bin plot call onto a scope.
    pub fn resolve(provincial: bool, region: Option<&str>) -> Result<Scope, BinPlotError> {
        let unsupported = || BinPlotError::UnsupportedScope {
            provincial,
            region: region.map(|r| r.to_string()),
        };
        match (provincial, region) {
            (false, None) => Ok(Scope::Federal),
            (false, Some(name)) => Province::parse(name)
                .map(Scope::FederalProvince)
                .ok_or_else(unsupported),
            (true, Some(name)) => match Province::parse(name) {
                Some(Province::QC) => Ok(Scope::Provincial(Province::QC)),
                _ => Err(unsupported()),
            },
            (true, None) => Err(unsupported()),
        }
    }

    pub fn reference(&self) -> Result<&'static ReferenceLayout, BinPlotError> {
        match self {
            Scope::Federal | Scope::FederalProvince(_) => ReferenceLayout::federal(),
            Scope::Provincial(Province::QC) => ReferenceLayout::quebec(),
            Scope::Provincial(province) => Err(BinPlotError::UnsupportedScope {
                provincial: true,
                region: Some(province.to_string()),
            }),
        }
    }

    /// Region id the reference layout is narrowed to, if any.
    pub fn region_filter(&self) -> Option<&'static str> {
        match self {
            Scope::FederalProvince(province) => Some(province.abbreviation()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_province() {
        assert_eq!(Province::parse("qc"), Some(Province::QC));
        assert_eq!(Province::parse("Québec"), Some(Province::QC));
        assert_eq!(Province::parse("QUEBEC"), Some(Province::QC));
        assert_eq!(Province::parse("British Columbia"), Some(Province::BC));
        assert_eq!(Province::parse("Colombie-Britannique"), Some(Province::BC));
        assert_eq!(Province::parse("Cascadia"), None);
        assert!("Atlantis".parse::<Province>().is_err());
    }

    #[test]
    fn test_resolve_scope() {
        assert_eq!(Scope::resolve(false, None).unwrap(), Scope::Federal);
        assert_eq!(
            Scope::resolve(false, Some("ON")).unwrap(),
            Scope::FederalProvince(Province::ON)
        );
        assert_eq!(
            Scope::resolve(true, Some("Quebec")).unwrap(),
            Scope::Provincial(Province::QC)
        );
    }

    #[test]
    fn test_unsupported_scope() {
        for (provincial, region) in [(true, Some("ON")), (true, None), (false, Some("Gondor"))] {
            match Scope::resolve(provincial, region) {
                Err(BinPlotError::UnsupportedScope {
                    provincial: p,
                    region: r,
                }) => {
                    assert_eq!(p, provincial);
                    assert_eq!(r.as_deref(), region);
                }
                other => panic!("Expected unsupported scope, got {:?}", other),
            }
        }
        assert!(Scope::Provincial(Province::AB).reference().is_err());
    }

    #[test]
    fn test_region_filter() {
        assert_eq!(Scope::FederalProvince(Province::NS).region_filter(), Some("NS"));
        assert_eq!(Scope::Federal.region_filter(), None);
        assert_eq!(Scope::Provincial(Province::QC).region_filter(), None);
    }
}
