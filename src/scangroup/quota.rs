use crate::errors::ConsoleError;
use crate::models::Subscription;

/// Maximum number of scan groups a tier may hold, if it is limited at all.
pub fn group_limit(tier: Subscription) -> Option<usize> {
    match tier {
        Subscription::MonthlySmall => Some(1),
        Subscription::MonthlyMedium => Some(3),
        _ => None,
    }
}

/// Decide whether an org on `tier` holding `existing` groups may create one more.
///
/// The count is supplied by the caller and may already be stale; this is a
/// best-effort check, not an atomic reservation.
pub fn check_quota(tier: Subscription, existing: usize) -> Result<(), ConsoleError> {
    match tier {
        Subscription::MonthlySmall if existing != 0 => Err(ConsoleError::QuotaExceeded(
            "this pricing plan only allows one scan group".into(),
        )),
        Subscription::MonthlyMedium if existing >= 3 => Err(ConsoleError::QuotaExceeded(
            "this pricing plan only allows three scan groups".into(),
        )),
        _ => Ok(()),
    }
}

pub fn check_delete(tier: Subscription) -> Result<(), ConsoleError> {
    if tier == Subscription::MonthlySmall {
        return Err(ConsoleError::QuotaExceeded(
            "this pricing plan does not allow for deleting scan groups".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_tier_boundary() {
        assert!(check_quota(Subscription::MonthlySmall, 0).is_ok());
        let err = check_quota(Subscription::MonthlySmall, 1).unwrap_err();
        assert_eq!(err.to_string(), "this pricing plan only allows one scan group");
    }

    #[test]
    fn test_medium_tier_boundary() {
        assert!(check_quota(Subscription::MonthlyMedium, 2).is_ok());
        let err = check_quota(Subscription::MonthlyMedium, 3).unwrap_err();
        assert_eq!(err.to_string(), "this pricing plan only allows three scan groups");
    }

    #[test]
    fn test_other_tiers_unlimited() {
        assert!(check_quota(Subscription::Enterprise, 500).is_ok());
        assert!(check_quota(Subscription::Other(42), 500).is_ok());
        assert_eq!(group_limit(Subscription::Enterprise), None);
    }

    #[test]
    fn test_small_tier_cannot_delete() {
        assert!(matches!(check_delete(Subscription::MonthlySmall), Err(ConsoleError::QuotaExceeded(_))));
        assert!(check_delete(Subscription::MonthlyMedium).is_ok());
    }
}
