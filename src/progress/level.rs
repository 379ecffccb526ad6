//! Conversion of progress statuses and scores to chart levels.
//!
//! | Level | Status                 | Score range      |
//! |-------|------------------------|------------------|
//! | 4     | target_achieved        | `target_achieved`|
//! | 3     | substantial_progress   | [2.5, 5]         |
//! | 2     | moderate_progress      | [0, 2.5)         |
//! | 1     | limited_progress       | [-2.5, 0)        |
//! | 0     | deterioration          | [-5, -2.5)       |

use anyhow::{Result, bail};

use super::types::{ProgressStatus, Score};

/// Chart level of a status, from 0 (deterioration) to 4 (target achieved).
pub fn status_level(status: ProgressStatus) -> u8 {
    match status {
        ProgressStatus::Deterioration => 0,
        ProgressStatus::LimitedProgress => 1,
        ProgressStatus::ModerateProgress => 2,
        ProgressStatus::SubstantialProgress => 3,
        ProgressStatus::TargetAchieved => 4,
    }
}

/// Status shown at a chart level.
pub fn level_status(level: u8) -> Option<ProgressStatus> {
    ProgressStatus::ALL.get(usize::from(level)).copied()
}

/// Buckets a score into a chart level.
///
/// # Errors
///
/// Returns an error for numbers outside [-5, 5] (including NaN) and for any
/// label other than `target_achieved`.
pub fn score_level(score: &Score) -> Result<u8> {
    match score {
        Score::Label(label) if label == ProgressStatus::TargetAchieved.key() => Ok(4),
        Score::Label(label) => bail!("unrecognised score label '{label}'"),
        Score::Value(s) => match *s {
            s if (2.5..=5.0).contains(&s) => Ok(3),
            s if (0.0..2.5).contains(&s) => Ok(2),
            s if (-2.5..0.0).contains(&s) => Ok(1),
            s if (-5.0..-2.5).contains(&s) => Ok(0),
            s => bail!("score {s} is outside the range [-5, 5]"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(s: f64) -> u8 {
        score_level(&Score::Value(s)).unwrap()
    }

    #[test]
    fn test_status_levels() {
        let levels: Vec<_> = ProgressStatus::ALL.into_iter().map(status_level).collect();
        assert_eq!(levels, [0, 1, 2, 3, 4]);
        for status in ProgressStatus::ALL {
            assert_eq!(level_status(status_level(status)), Some(status));
        }
        assert_eq!(level_status(5), None);
    }

    #[test]
    fn test_score_boundaries() {
        assert_eq!(level(5.0), 3);
        assert_eq!(level(2.5), 3);
        assert_eq!(level(2.49), 2);
        assert_eq!(level(0.0), 2);
        assert_eq!(level(-0.01), 1);
        assert_eq!(level(-2.5), 1);
        assert_eq!(level(-2.51), 0);
        assert_eq!(level(-5.0), 0);
    }

    #[test]
    fn test_score_target_achieved_label() {
        assert_eq!(
            score_level(&Score::Label("target_achieved".to_string())).unwrap(),
            4
        );
    }

    #[test]
    fn test_score_out_of_range() {
        assert!(score_level(&Score::Value(5.01)).is_err());
        assert!(score_level(&Score::Value(-5.5)).is_err());
        assert!(score_level(&Score::Value(f64::NAN)).is_err());
    }

    #[test]
    fn test_score_unknown_label() {
        let err = score_level(&Score::Label("n/a".to_string())).unwrap_err();
        assert!(err.to_string().contains("n/a"));
    }
}
