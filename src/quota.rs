// ABOUTME: Deployment quota policy over the persisted usage history.
// ABOUTME: Pure decision logic; recording happens only after a successful attempt.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const FREE_LIFETIME_LIMIT: usize = 3;
pub const FREE_COOLDOWN_DAYS: i64 = 7;
pub const PRO_WINDOW_LIMIT: usize = 50;
pub const PRO_WINDOW_DAYS: i64 = 30;

/// Subscription plan governing the quota policy.
///
/// Anything other than `free` or `pro` parses to `Unrecognized`, which
/// denies every deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Unrecognized,
}

impl Plan {
    /// Parse a plan value. Never fails; unknown values fail closed.
    pub fn parse(value: &str) -> Plan {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Plan::Free,
            "pro" => Plan::Pro,
            _ => Plan::Unrecognized,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
            Plan::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Why a deployment was denied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaDenial {
    #[error(
        "free plan allows at most {} lifetime deployments and {used} were already made",
        FREE_LIFETIME_LIMIT
    )]
    LifetimeLimitReached { used: usize },

    #[error(
        "free plan requires {} days between deployments; next allowed after {}",
        FREE_COOLDOWN_DAYS,
        .until.format("%Y-%m-%d %H:%M UTC")
    )]
    CooldownActive { until: DateTime<Utc> },

    #[error(
        "pro plan allows at most {} deployments in {} days ({used} used); window opens {}",
        PRO_WINDOW_LIMIT,
        PRO_WINDOW_DAYS,
        .resets.format("%Y-%m-%d %H:%M UTC")
    )]
    WindowLimitReached { used: usize, resets: DateTime<Utc> },

    #[error("subscription plan not recognized; set plan to free or pro")]
    PlanUnrecognized,
}

/// Ordered record of past deployment times, as milliseconds since the epoch.
///
/// Persisted as a bare JSON array. Append-only: the gate reads it, and the
/// only writer is the usage store after a deployment reaches its terminal
/// success state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageHistory(Vec<i64>);

impl UsageHistory {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_millis(millis: Vec<i64>) -> Self {
        Self(millis)
    }

    pub fn from_timestamps(timestamps: &[DateTime<Utc>]) -> Self {
        Self(timestamps.iter().map(|t| t.timestamp_millis()).collect())
    }

    pub fn record(&mut self, at: DateTime<Utc>) {
        self.0.push(at.timestamp_millis());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_millis(&self) -> &[i64] {
        &self.0
    }

    /// The most recent recorded deployment, if any.
    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.0
            .iter()
            .copied()
            .max()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Number of deployments strictly after the cutoff.
    pub fn count_since(&self, cutoff: DateTime<Utc>) -> usize {
        let cutoff = cutoff.timestamp_millis();
        self.0.iter().filter(|&&ms| ms > cutoff).count()
    }

    /// Oldest deployment strictly after the cutoff, if any.
    pub fn oldest_since(&self, cutoff: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let cutoff = cutoff.timestamp_millis();
        self.0
            .iter()
            .copied()
            .filter(|&ms| ms > cutoff)
            .min()
            .and_then(DateTime::from_timestamp_millis)
    }
}

/// Decide whether a new deployment may start.
///
/// Free: at most 3 lifetime deployments, and at least 7 days since the most
/// recent one. Pro: at most 50 deployments inside the trailing 30-day window
/// (timestamps strictly after now minus 30 days). Unrecognized plans deny.
///
/// Pure: never touches the history. The caller records usage only after the
/// attempt succeeds.
pub fn check(plan: Plan, history: &UsageHistory, now: DateTime<Utc>) -> Result<(), QuotaDenial> {
    match plan {
        Plan::Free => {
            if history.len() >= FREE_LIFETIME_LIMIT {
                return Err(QuotaDenial::LifetimeLimitReached {
                    used: history.len(),
                });
            }
            if let Some(last) = history.last() {
                let cooldown = Duration::days(FREE_COOLDOWN_DAYS);
                if now - last < cooldown {
                    return Err(QuotaDenial::CooldownActive {
                        until: last + cooldown,
                    });
                }
            }
            Ok(())
        }
        Plan::Pro => {
            let cutoff = now - Duration::days(PRO_WINDOW_DAYS);
            let used = history.count_since(cutoff);
            if used >= PRO_WINDOW_LIMIT {
                let resets = history
                    .oldest_since(cutoff)
                    .map(|oldest| oldest + Duration::days(PRO_WINDOW_DAYS))
                    .unwrap_or(now);
                return Err(QuotaDenial::WindowLimitReached { used, resets });
            }
            Ok(())
        }
        Plan::Unrecognized => Err(QuotaDenial::PlanUnrecognized),
    }
}

/// Deployments still available under the plan, for status display.
pub fn remaining(plan: Plan, history: &UsageHistory, now: DateTime<Utc>) -> Option<usize> {
    match plan {
        Plan::Free => Some(FREE_LIFETIME_LIMIT.saturating_sub(history.len())),
        Plan::Pro => {
            let cutoff = now - Duration::days(PRO_WINDOW_DAYS);
            Some(PRO_WINDOW_LIMIT.saturating_sub(history.count_since(cutoff)))
        }
        Plan::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn parse_is_case_insensitive_and_fails_closed() {
        assert_eq!(Plan::parse("free"), Plan::Free);
        assert_eq!(Plan::parse(" PRO "), Plan::Pro);
        assert_eq!(Plan::parse("enterprise"), Plan::Unrecognized);
        assert_eq!(Plan::parse(""), Plan::Unrecognized);
    }

    #[test]
    fn free_allows_first_deployment() {
        let history = UsageHistory::new();
        assert!(check(Plan::Free, &history, Utc::now()).is_ok());
    }

    #[test]
    fn free_denies_at_lifetime_limit_regardless_of_age() {
        let history = UsageHistory::from_millis(vec![0, 1, 2]);
        let denial = check(Plan::Free, &history, at(1_000_000_000_000)).unwrap_err();
        assert!(matches!(
            denial,
            QuotaDenial::LifetimeLimitReached { used: 3 }
        ));
    }

    #[test]
    fn free_cooldown_boundary_is_seven_days() {
        let now = at(1_000_000_000_000);
        let seven_days = Duration::days(7);

        let just_inside = UsageHistory::from_timestamps(&[now - seven_days + Duration::seconds(1)]);
        assert!(check(Plan::Free, &just_inside, now).is_err());

        let exactly_seven = UsageHistory::from_timestamps(&[now - seven_days]);
        assert!(check(Plan::Free, &exactly_seven, now).is_ok());
    }

    #[test]
    fn pro_window_counts_strictly_after_cutoff() {
        let now = at(1_000_000_000_000);
        let cutoff = now - Duration::days(30);

        // 49 inside the window plus one sitting exactly on the cutoff,
        // which must not count.
        let mut stamps: Vec<DateTime<Utc>> =
            (0..49).map(|i| now - Duration::hours(i + 1)).collect();
        stamps.push(cutoff);
        let history = UsageHistory::from_timestamps(&stamps);
        assert!(check(Plan::Pro, &history, now).is_ok());

        // One more inside the window tips it over.
        stamps.push(now - Duration::minutes(5));
        let history = UsageHistory::from_timestamps(&stamps);
        let denial = check(Plan::Pro, &history, now).unwrap_err();
        assert!(matches!(
            denial,
            QuotaDenial::WindowLimitReached { used: 50, .. }
        ));
    }

    #[test]
    fn unrecognized_plan_denies() {
        let history = UsageHistory::new();
        assert!(matches!(
            check(Plan::Unrecognized, &history, Utc::now()),
            Err(QuotaDenial::PlanUnrecognized)
        ));
    }

    #[test]
    fn remaining_tracks_plan_allowance() {
        let now = Utc::now();
        let history = UsageHistory::from_timestamps(&[now - Duration::days(10)]);
        assert_eq!(remaining(Plan::Free, &history, now), Some(2));
        assert_eq!(remaining(Plan::Pro, &history, now), Some(49));
        assert_eq!(remaining(Plan::Unrecognized, &history, now), None);
    }
}
