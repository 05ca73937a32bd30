//! Keyword parser for recognized effect text.
//!
//! Effect text arrives as newline-separated lines from the recognition layer
//! ("Speed +10", "Energy -15", "Status: hot_topic"). Each line is classified
//! into exactly one [`EffectLine`] by substring matching, then folded into an
//! [`EffectRecord`]. Unrecognized lines are ignored on purpose: screens carry
//! plenty of text that is not an effect. Lines that look like an effect but
//! carry a malformed number fail with a [`ParseError`], which
//! [`parse_block`] logs and drops without aborting the rest of the block.

use tracing::warn;
use turfline_kb::{EffectRecord, Stat, StatusKind, StatusTag};

/// A single classified effect line.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectLine {
    Energy(f32),
    SkillPoints(f32),
    LastTrainedStat(f32),
    HealNegativeStatus,
    Bond(f32),
    Status(String),
    StatDelta(Stat, f32),
}

/// An effect-shaped line whose numeric payload could not be extracted.
#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("effect line {line:?} is missing its numeric token")]
    MissingToken {
        #[error(not(source))]
        line: String,
    },
    #[display("effect line {line:?} has a malformed number {token:?}")]
    BadNumber {
        #[error(not(source))]
        line: String,
        #[error(not(source))]
        token: String,
    },
}

fn numeric_token(line: &str, token: &str) -> Result<f32, ParseError> {
    let value: i32 = token.parse().map_err(|_| ParseError::BadNumber {
        line: line.to_owned(),
        token: token.to_owned(),
    })?;
    #[expect(clippy::cast_precision_loss, reason = "effect deltas are small")]
    let value = value as f32;
    Ok(value)
}

fn nth_token(line: &str, index: usize) -> Result<f32, ParseError> {
    let token = line
        .split_whitespace()
        .nth(index)
        .ok_or_else(|| ParseError::MissingToken {
            line: line.to_owned(),
        })?;
    numeric_token(line, token)
}

fn last_token(line: &str) -> Result<f32, ParseError> {
    let token = line
        .split_whitespace()
        .next_back()
        .ok_or_else(|| ParseError::MissingToken {
            line: line.to_owned(),
        })?;
    numeric_token(line, token)
}

const STAT_KEYWORDS: [(&str, Stat); 5] = [
    ("Speed", Stat::Spd),
    ("Stamina", Stat::Sta),
    ("Power", Stat::Pwr),
    ("Guts", Stat::Guts),
    ("Wisdom", Stat::Wit),
];

/// Classifies one recognized line.
///
/// Returns `Ok(None)` for lines that are not effects at all. Keyword matching
/// is case-sensitive except for bond lines, which recognition frequently
/// lowercases. The checks run in a fixed order so that "Heal negative status"
/// is claimed before the generic `Status:` rule sees it.
pub fn classify_line(line: &str) -> Result<Option<EffectLine>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.contains("Energy") {
        return nth_token(line, 1).map(|v| Some(EffectLine::Energy(v)));
    }
    if line.contains("Skill points") {
        return nth_token(line, 2).map(|v| Some(EffectLine::SkillPoints(v)));
    }
    if line.contains("Last trained stat") {
        return last_token(line).map(|v| Some(EffectLine::LastTrainedStat(v)));
    }
    if line.contains("Heal negative status") {
        return Ok(Some(EffectLine::HealNegativeStatus));
    }
    if line.to_lowercase().contains("bond") {
        return last_token(line).map(|v| Some(EffectLine::Bond(v)));
    }
    if let Some(tag) = line.strip_prefix("Status:") {
        return Ok(Some(EffectLine::Status(tag.trim().to_owned())));
    }
    for (keyword, stat) in STAT_KEYWORDS {
        if line.contains(keyword) {
            return nth_token(line, 1).map(|v| Some(EffectLine::StatDelta(stat, v)));
        }
    }
    Ok(None)
}

/// Parses a block of effect lines into one record.
///
/// Bad lines are logged and dropped; parsing never fails as a whole.
/// Repeated lines for the same numeric effect accumulate, so a block that
/// grants a stat twice is worth both grants; a repeated status line replaces
/// the earlier tag. A heal
/// line sets the heal flag and, only when no explicit status tag is present,
/// the `heal_negative` status — an explicit tag on another line is kept and
/// both contribute to the score.
#[must_use]
pub fn parse_block<'a>(lines: impl IntoIterator<Item = &'a str>) -> EffectRecord {
    let mut record = EffectRecord::default();
    for line in lines {
        let effect = match classify_line(line) {
            Ok(Some(effect)) => effect,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, "dropping malformed effect line");
                continue;
            }
        };
        match effect {
            EffectLine::Energy(v) => *record.energy.get_or_insert(0.0) += v,
            EffectLine::SkillPoints(v) => *record.skill_points.get_or_insert(0.0) += v,
            EffectLine::LastTrainedStat(v) => *record.last_trained_stat.get_or_insert(0.0) += v,
            EffectLine::Bond(v) => *record.bond.get_or_insert(0.0) += v,
            EffectLine::StatDelta(stat, v) => *record.stats[stat].get_or_insert(0.0) += v,
            EffectLine::Status(tag) => record.status = Some(StatusTag::from_raw(&tag)),
            EffectLine::HealNegativeStatus => {
                record.heal_status = Some(1.0);
                if record.status.is_none() {
                    record.status = Some(StatusKind::HealNegative.into());
                }
            }
        }
    }
    record
}

/// Convenience wrapper for a whole newline-separated text block.
#[must_use]
pub fn parse_text(text: &str) -> EffectRecord {
    parse_block(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_stat_and_scalar_lines() {
        assert_eq!(
            classify_line("Speed +10").unwrap(),
            Some(EffectLine::StatDelta(Stat::Spd, 10.0))
        );
        assert_eq!(
            classify_line("Energy -15").unwrap(),
            Some(EffectLine::Energy(-15.0))
        );
        assert_eq!(
            classify_line("Skill points +30").unwrap(),
            Some(EffectLine::SkillPoints(30.0))
        );
        assert_eq!(
            classify_line("Last trained stat +5").unwrap(),
            Some(EffectLine::LastTrainedStat(5.0))
        );
    }

    #[test]
    fn test_bond_matches_case_insensitively() {
        assert_eq!(
            classify_line("Kitasan Black bond +5").unwrap(),
            Some(EffectLine::Bond(5.0))
        );
        assert_eq!(
            classify_line("Bond +4").unwrap(),
            Some(EffectLine::Bond(4.0))
        );
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            classify_line("Status: hot_topic").unwrap(),
            Some(EffectLine::Status("hot_topic".to_owned()))
        );
        assert_eq!(
            classify_line("Heal negative status").unwrap(),
            Some(EffectLine::HealNegativeStatus)
        );
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        assert_eq!(classify_line("Tazuna: let's take a break").unwrap(), None);
        assert_eq!(classify_line("").unwrap(), None);
    }

    #[test]
    fn test_malformed_numbers_fail() {
        assert!(matches!(
            classify_line("Speed +1O"),
            Err(ParseError::BadNumber { .. })
        ));
        assert!(matches!(
            classify_line("Energy"),
            Err(ParseError::MissingToken { .. })
        ));
    }

    #[test]
    fn test_parse_block_folds_lines_and_drops_bad_ones() {
        let record = parse_text("Speed +10\nPower +5\nEnergy -1O\nSkill points +30\nsome flavor text");
        assert_eq!(record.stats.spd, Some(10.0));
        assert_eq!(record.stats.pwr, Some(5.0));
        assert_eq!(record.energy, None, "malformed energy line must be dropped");
        assert_eq!(record.skill_points, Some(30.0));
    }

    #[test]
    fn test_heal_sets_flag_and_default_status() {
        let record = parse_text("Heal negative status");
        assert_eq!(record.heal_status, Some(1.0));
        assert_eq!(record.status.as_ref().and_then(StatusTag::known), Some(StatusKind::HealNegative));
    }

    #[test]
    fn test_heal_does_not_displace_explicit_status() {
        let record = parse_text("Status: good_mood\nHeal negative status");
        assert_eq!(record.heal_status, Some(1.0));
        assert_eq!(
            record.status.as_ref().and_then(StatusTag::known),
            Some(StatusKind::GoodMood)
        );
    }

    #[test]
    fn test_status_lines_classify_into_the_record() {
        let record = parse_text("Status: practice_perfect");
        assert_eq!(
            record.status.as_ref().and_then(StatusTag::known),
            Some(StatusKind::PracticePerfect)
        );

        let record = parse_text("Status: sparkling");
        assert_eq!(
            record.status,
            Some(StatusTag::Other("sparkling".to_owned())),
            "unrecognized status names must be kept verbatim"
        );
    }

    #[test]
    fn test_duplicate_stat_lines_accumulate() {
        let record = parse_text("Speed +10\nSpeed +5");
        assert_eq!(record.stats.spd, Some(15.0));
    }
}
