//! Rank parsing and ordering for ranked-ladder strings.
//!
//! Converts strings like `"Diamond II 45LP"` into a [`RankRecord`] whose
//! [`Ord`] implementation recovers ladder order: a greater record ranks better.
//!
//! # Ladder conventions
//!
//! - Apex tiers have no divisions: Challenger, Grandmaster, Master
//! - Every other tier has four divisions, I (best) through IV
//! - League points break ties inside a single division, higher is better
//! - A tier always dominates league points: Diamond IV 0LP beats Platinum I 99LP

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::FormatError;

/// A ladder tier, declared best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Challenger,
    Grandmaster,
    Master,
    DiamondI,
    DiamondII,
    DiamondIII,
    DiamondIV,
    PlatinumI,
    PlatinumII,
    PlatinumIII,
    PlatinumIV,
    GoldI,
    GoldII,
    GoldIII,
    GoldIV,
    SilverI,
    SilverII,
    SilverIII,
    SilverIV,
    BronzeI,
    BronzeII,
    BronzeIII,
    BronzeIV,
    IronI,
    IronII,
    IronIII,
    IronIV,
}

impl Tier {
    /// Every tier, best first. `ALL[i].index() == i`.
    pub const ALL: [Tier; 27] = [
        Tier::Challenger,
        Tier::Grandmaster,
        Tier::Master,
        Tier::DiamondI,
        Tier::DiamondII,
        Tier::DiamondIII,
        Tier::DiamondIV,
        Tier::PlatinumI,
        Tier::PlatinumII,
        Tier::PlatinumIII,
        Tier::PlatinumIV,
        Tier::GoldI,
        Tier::GoldII,
        Tier::GoldIII,
        Tier::GoldIV,
        Tier::SilverI,
        Tier::SilverII,
        Tier::SilverIII,
        Tier::SilverIV,
        Tier::BronzeI,
        Tier::BronzeII,
        Tier::BronzeIII,
        Tier::BronzeIV,
        Tier::IronI,
        Tier::IronII,
        Tier::IronIII,
        Tier::IronIV,
    ];

    /// Position in the ladder. 0 is Challenger, 26 is Iron IV.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name as it appears on profile pages.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Challenger => "Challenger",
            Tier::Grandmaster => "Grandmaster",
            Tier::Master => "Master",
            Tier::DiamondI => "Diamond I",
            Tier::DiamondII => "Diamond II",
            Tier::DiamondIII => "Diamond III",
            Tier::DiamondIV => "Diamond IV",
            Tier::PlatinumI => "Platinum I",
            Tier::PlatinumII => "Platinum II",
            Tier::PlatinumIII => "Platinum III",
            Tier::PlatinumIV => "Platinum IV",
            Tier::GoldI => "Gold I",
            Tier::GoldII => "Gold II",
            Tier::GoldIII => "Gold III",
            Tier::GoldIV => "Gold IV",
            Tier::SilverI => "Silver I",
            Tier::SilverII => "Silver II",
            Tier::SilverIII => "Silver III",
            Tier::SilverIV => "Silver IV",
            Tier::BronzeI => "Bronze I",
            Tier::BronzeII => "Bronze II",
            Tier::BronzeIII => "Bronze III",
            Tier::BronzeIV => "Bronze IV",
            Tier::IronI => "Iron I",
            Tier::IronII => "Iron II",
            Tier::IronIII => "Iron III",
            Tier::IronIV => "Iron IV",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Tier> {
        Tier::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A parsed `"<tier> <lp>LP"` string.
///
/// Ordering ignores `raw`: two records with the same tier and league points
/// compare equal even if their source text differed in whitespace.
#[derive(Debug, Clone, Serialize)]
pub struct RankRecord {
    pub tier: Tier,
    pub league_points: u32,
    /// The text as extracted from the page, trimmed.
    pub raw: String,
}

impl RankRecord {
    /// Parse a rank-with-LP string such as `"Gold I 50LP"`.
    ///
    /// Tier words may be separated by any run of whitespace. Unknown tiers are
    /// rejected rather than mapped to a default.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let raw = s.trim();
        let syntax = || FormatError::RankSyntax(s.to_string());

        let body = raw.strip_suffix("LP").ok_or_else(syntax)?;
        let (tier_words, digits) = body.rsplit_once(char::is_whitespace).ok_or_else(syntax)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(syntax());
        }
        let league_points: u32 = digits
            .parse()
            .map_err(|_| FormatError::LeaguePoints(digits.to_string()))?;

        if tier_words.trim().is_empty()
            || !tier_words
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        {
            return Err(syntax());
        }
        let tier_name = tier_words.split_whitespace().collect::<Vec<_>>().join(" ");
        let tier = Tier::from_name(&tier_name).ok_or(FormatError::UnknownTier(tier_name))?;

        Ok(Self {
            tier,
            league_points,
            raw: raw.to_string(),
        })
    }
}

impl FromStr for RankRecord {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RankRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}LP", self.tier, self.league_points)
    }
}

impl Ord for RankRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower tier index is the better tier.
        other
            .tier
            .index()
            .cmp(&self.tier.index())
            .then(self.league_points.cmp(&other.league_points))
    }
}

impl PartialOrd for RankRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankRecord {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(s: &str) -> RankRecord {
        RankRecord::parse(s).unwrap()
    }

    /// Helper: assert a list of inputs is strictly best-first.
    fn assert_best_first(inputs: &[&str]) {
        let records: Vec<RankRecord> = inputs.iter().map(|s| rank(s)).collect();
        for i in 1..records.len() {
            assert!(
                records[i - 1] > records[i],
                "Expected {:?} to rank above {:?}",
                inputs[i - 1],
                inputs[i],
            );
        }
    }

    #[test]
    fn table_indices_match_declaration_order() {
        for (i, tier) in Tier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i, "{tier} out of place");
            assert_eq!(Tier::from_name(tier.name()), Some(*tier));
        }
    }

    #[test]
    fn more_lp_wins_within_tier() {
        assert!(rank("Gold I 50LP") > rank("Gold I 10LP"));
        assert!(rank("Gold I 10LP") < rank("Gold I 50LP"));
    }

    #[test]
    fn tier_dominates_lp() {
        assert!(rank("Diamond IV 0LP") > rank("Platinum I 99LP"));
    }

    #[test]
    fn full_ladder_sequence() {
        assert_best_first(&[
            "Challenger 1200LP",
            "Challenger 900LP",
            "Grandmaster 700LP",
            "Master 0LP",
            "Diamond I 99LP",
            "Diamond II 50LP",
            "Diamond III 20LP",
            "Diamond IV 0LP",
            "Platinum I 99LP",
            "Gold IV 75LP",
            "Silver II 12LP",
            "Bronze III 3LP",
            "Iron I 100LP",
            "Iron IV 0LP",
        ]);
    }

    #[test]
    fn antisymmetric_over_tier_table() {
        let records: Vec<RankRecord> = Tier::ALL
            .iter()
            .flat_map(|t| [0u32, 37, 99].map(|lp| rank(&format!("{} {lp}LP", t.name()))))
            .collect();
        for a in &records {
            for b in &records {
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a} vs {b}");
                let expected = b
                    .tier
                    .index()
                    .cmp(&a.tier.index())
                    .then(a.league_points.cmp(&b.league_points));
                assert_eq!(a.cmp(b), expected, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn equal_tier_and_lp_compare_equal() {
        assert_eq!(
            rank("Master 300LP").cmp(&rank("  Master 300LP ")),
            Ordering::Equal
        );
    }

    #[test]
    fn unknown_tier_rejected() {
        assert!(matches!(
            RankRecord::parse("Unknown 10LP"),
            Err(FormatError::UnknownTier(t)) if t == "Unknown"
        ));
    }

    #[test]
    fn tier_lookup_is_case_sensitive() {
        assert!(matches!(
            RankRecord::parse("gold I 10LP"),
            Err(FormatError::UnknownTier(_))
        ));
    }

    #[test]
    fn malformed_strings_rejected() {
        for s in [
            "",
            "Gold I",
            "Gold I 10",
            "Gold I LP",
            "10LP",
            "Gold I -5LP",
            "Gold1 10LP",
            "Gold I 10 LP",
        ] {
            assert!(RankRecord::parse(s).is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn lp_overflow_rejected() {
        assert!(matches!(
            RankRecord::parse("Gold I 99999999999LP"),
            Err(FormatError::LeaguePoints(_))
        ));
    }

    #[test]
    fn internal_whitespace_collapsed() {
        let r = rank("  Diamond   II\t45LP\n");
        assert_eq!(r.tier, Tier::DiamondII);
        assert_eq!(r.league_points, 45);
        assert_eq!(r.raw, "Diamond   II\t45LP");
        assert_eq!(r.to_string(), "Diamond II 45LP");
    }

    #[test]
    fn serializes_tier_by_name() {
        let json = serde_json::to_value(rank("Platinum III 12LP")).unwrap();
        assert_eq!(json["tier"], "Platinum III");
        assert_eq!(json["league_points"], 12);
    }
}
