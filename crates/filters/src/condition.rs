//! Correction-code and trade-condition screening.
//!
//! Classifies each tick as admissible or not from its correction code and its
//! trade-condition string, returning index-aligned masks without touching the
//! records themselves.

use taq_core::{Mask, TradeRecord, CLEAN_CORRECTION};
use tracing::warn;

/// Condition characters that leave a tick admissible.
const CHAR_ALLOWED: &[char] = &[
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'H', 'I', 'K', 'M', 'N', 'O', 'Q', 'R', 'S', 'V', 'W', 'Y',
    '1', '4', '5', '6', '7', '8', '9',
];

/// Condition characters that mark a tick inadmissible.
const CHAR_FORBIDDEN: &[char] = &['G', 'L', 'P', 'T', 'U', 'X', 'Z'];

/// Classification of one blank-stripped condition string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionClass {
    /// Every character is in the allowed set; an empty string qualifies.
    Allowed,
    /// At least one forbidden character, all characters recognized.
    Forbidden,
    /// At least one character outside the recognized set.
    Unseen,
}

/// Masks produced by the condition filter, aligned to the input records.
#[derive(Debug, Clone, Default)]
pub struct ConditionMasks {
    /// True iff the correction code marks the trade as standing.
    pub correction_ok: Mask,
    /// True iff the condition string classifies as allowed.
    pub condition_ok: Mask,
    /// Indices of ticks whose condition held an unrecognized character.
    /// Diagnostic only; such ticks are already inadmissible.
    pub unseen_rows: Vec<usize>,
}

/// Classify a condition string against the three character classes.
///
/// Unseen dominates forbidden: any unrecognized character makes the whole
/// string unseen regardless of what else is present. Blanks are separators
/// and are ignored, so an all-blank or empty string is allowed.
pub fn classify_condition(condition: &str) -> ConditionClass {
    let mut saw_forbidden = false;
    for ch in condition.chars().filter(|c| !c.is_whitespace()) {
        if CHAR_ALLOWED.contains(&ch) {
            continue;
        }
        if CHAR_FORBIDDEN.contains(&ch) {
            saw_forbidden = true;
        } else {
            return ConditionClass::Unseen;
        }
    }
    if saw_forbidden {
        ConditionClass::Forbidden
    } else {
        ConditionClass::Allowed
    }
}

/// Compute the correction-code and condition masks for a record collection.
///
/// Pure and total: a malformed correction code simply fails the equality test
/// (inadmissible), and every condition string lands in exactly one class.
pub fn filter_conditions(records: &[TradeRecord]) -> ConditionMasks {
    let mut masks = ConditionMasks {
        correction_ok: Vec::with_capacity(records.len()),
        condition_ok: Vec::with_capacity(records.len()),
        unseen_rows: Vec::new(),
    };

    for (row, record) in records.iter().enumerate() {
        masks
            .correction_ok
            .push(record.correction_code == CLEAN_CORRECTION);

        let class = classify_condition(&record.condition);
        if class == ConditionClass::Unseen {
            masks.unseen_rows.push(row);
        }
        masks.condition_ok.push(class == ConditionClass::Allowed);
    }

    if !masks.unseen_rows.is_empty() {
        warn!(
            rows = ?masks.unseen_rows,
            "ticks with unrecognized condition characters"
        );
    }

    masks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn make_record(correction_code: &str, condition: &str) -> TradeRecord {
        TradeRecord {
            symbol: "AAPL".to_string(),
            date: NaiveDate::from_ymd_opt(2019, 3, 28).unwrap(),
            time: NaiveTime::from_hms_opt(9, 40, 0).unwrap(),
            price: 100.0,
            size: 10,
            correction_code: correction_code.to_string(),
            condition: condition.to_string(),
            suffix: None,
        }
    }

    #[test]
    fn test_allowed_only_is_admissible() {
        assert_eq!(classify_condition("@"), ConditionClass::Allowed);
        assert_eq!(classify_condition("@ F I"), ConditionClass::Allowed);
        assert_eq!(classify_condition("149"), ConditionClass::Allowed);
    }

    #[test]
    fn test_empty_condition_is_admissible() {
        assert_eq!(classify_condition(""), ConditionClass::Allowed);
        assert_eq!(classify_condition("   "), ConditionClass::Allowed);
    }

    #[test]
    fn test_forbidden_character() {
        assert_eq!(classify_condition("T"), ConditionClass::Forbidden);
        assert_eq!(classify_condition("@ T"), ConditionClass::Forbidden);
        assert_eq!(classify_condition("Z I"), ConditionClass::Forbidden);
    }

    #[test]
    fn test_unseen_dominates() {
        assert_eq!(classify_condition("j"), ConditionClass::Unseen);
        // Unseen wins even with forbidden and allowed characters present.
        assert_eq!(classify_condition("T j"), ConditionClass::Unseen);
        assert_eq!(classify_condition("@ j T"), ConditionClass::Unseen);
    }

    #[test]
    fn test_totality_over_arbitrary_strings() {
        // Never panics, always lands in exactly one class.
        for condition in ["", " ", "@", "T", "j", "@T j1", "\t\n", "ZZZ", "~!?"] {
            let _ = classify_condition(condition);
        }
    }

    #[test]
    fn test_correction_mask() {
        let records = vec![
            make_record("00", "@"),
            make_record("01", "@"),
            make_record("0", "@"),   // malformed: fails closed
            make_record("000", "@"), // malformed: fails closed
        ];
        let masks = filter_conditions(&records);
        assert_eq!(masks.correction_ok, vec![true, false, false, false]);
        assert_eq!(masks.condition_ok, vec![true, true, true, true]);
    }

    #[test]
    fn test_unseen_rows_reported() {
        let records = vec![
            make_record("00", "@"),
            make_record("00", "j"),
            make_record("00", "T"),
            make_record("00", "x y"),
        ];
        let masks = filter_conditions(&records);
        assert_eq!(masks.condition_ok, vec![true, false, false, false]);
        assert_eq!(masks.unseen_rows, vec![1, 3]);
    }

    #[test]
    fn test_empty_input() {
        let masks = filter_conditions(&[]);
        assert!(masks.correction_ok.is_empty());
        assert!(masks.condition_ok.is_empty());
        assert!(masks.unseen_rows.is_empty());
    }
}
