use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::HashSet;

use crate::config::{DashboardConfig, SchemaVariant};
use crate::models::{CanonicalUser, DashboardStats};

/// Interpreta o timestamp de login. Aceita RFC 3339, data-hora sem
/// fuso (assumida UTC) e data pura.
pub fn parse_login_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Login ausente ou ilegível nunca é recente. Timestamps no futuro
/// contam como recentes (diferença negativa).
pub fn is_login_recent(last_login: Option<&str>, days: i64, now: DateTime<Utc>) -> bool {
    let value = match last_login {
        Some(v) => v,
        None => return false,
    };
    let date = match parse_login_date(value) {
        Some(d) => d,
        None => return false,
    };
    let diff_days = (now - date).num_seconds() as f64 / 86_400.0;
    diff_days <= days as f64
}

/// Predicado de status do card: janela de login na variante Store,
/// flag isActive na variante Role.
pub fn user_status_active(user: &CanonicalUser, config: &DashboardConfig, now: DateTime<Utc>) -> bool {
    match config.variant {
        SchemaVariant::Store => {
            is_login_recent(user.last_login.as_deref(), config.status_recent_days, now)
        }
        SchemaVariant::Role => user.is_active.unwrap_or(false),
    }
}

/// Calcula os quatro contadores do topo do dashboard em uma passada
/// por slot. `now` vem de fora para manter a função pura.
pub fn aggregate_users(
    users: &[CanonicalUser],
    config: &DashboardConfig,
    now: DateTime<Utc>,
) -> DashboardStats {
    let total = users.len();

    let recent_or_active = match config.variant {
        SchemaVariant::Store => users
            .iter()
            .filter(|u| is_login_recent(u.last_login.as_deref(), config.recent_login_days, now))
            .count(),
        SchemaVariant::Role => users.iter().filter(|u| u.is_active.unwrap_or(false)).count(),
    };

    let group_count = match config.variant {
        SchemaVariant::Store => users
            .iter()
            .map(|u| u.group_label.as_str())
            .collect::<HashSet<_>>()
            .len(),
        SchemaVariant::Role => users
            .iter()
            .filter(|u| u.group_label == config.tracked_role)
            .count(),
    };

    let flag_count = match config.variant {
        SchemaVariant::Store => users.iter().filter(|u| !u.phone.is_empty()).count(),
        SchemaVariant::Role => users.iter().filter(|u| u.two_fa_verified_at.is_some()).count(),
    };

    DashboardStats {
        total,
        recent_or_active,
        group_count,
        flag_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::path::PathBuf;

    use crate::config::UsersSource;

    fn store_config() -> DashboardConfig {
        DashboardConfig {
            variant: SchemaVariant::Store,
            source: UsersSource::File(PathBuf::from("./data/users.json")),
            recent_login_days: 1,
            status_recent_days: 7,
            tracked_role: "admin".to_string(),
        }
    }

    fn role_config() -> DashboardConfig {
        DashboardConfig {
            variant: SchemaVariant::Role,
            ..store_config()
        }
    }

    fn user(id: &str) -> CanonicalUser {
        CanonicalUser {
            id: id.to_string(),
            name: "Usuário".to_string(),
            email: "user@example.com".to_string(),
            phone: String::new(),
            group_label: "Loja Centro".to_string(),
            last_login: None,
            is_active: None,
            two_fa_verified_at: None,
        }
    }

    #[test]
    fn test_empty_list_yields_zeroed_stats() {
        let now = Utc::now();
        let stats = aggregate_users(&[], &store_config(), now);
        assert_eq!(stats, DashboardStats::empty());
    }

    #[test]
    fn test_two_day_old_login_within_seven_days_but_not_one() {
        let now = Utc::now();
        let two_days_ago = (now - Duration::days(2)).to_rfc3339();
        assert!(is_login_recent(Some(&two_days_ago), 7, now));
        assert!(!is_login_recent(Some(&two_days_ago), 1, now));
    }

    #[test]
    fn test_missing_or_invalid_login_is_never_recent() {
        let now = Utc::now();
        assert!(!is_login_recent(None, 7, now));
        assert!(!is_login_recent(Some("data-invalida"), 7, now));
    }

    #[test]
    fn test_future_login_counts_as_recent() {
        let now = Utc::now();
        let tomorrow = (now + Duration::days(1)).to_rfc3339();
        assert!(is_login_recent(Some(&tomorrow), 1, now));
    }

    #[test]
    fn test_store_variant_counts_distinct_stores_and_phones() {
        let now = Utc::now();
        let mut a = user("a");
        a.phone = "+55 11 99999-0001".to_string();
        a.last_login = Some((now - Duration::hours(2)).to_rfc3339());
        let mut b = user("b");
        b.group_label = "Loja Norte".to_string();
        let c = user("c"); // mesma loja de `a`

        let stats = aggregate_users(&[a, b, c], &store_config(), now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent_or_active, 1);
        assert_eq!(stats.group_count, 2);
        assert_eq!(stats.flag_count, 1);
    }

    #[test]
    fn test_role_variant_counts_active_tracked_and_verified() {
        let now = Utc::now();
        let mut a = user("a");
        a.group_label = "admin".to_string();
        a.is_active = Some(true);
        a.two_fa_verified_at = Some("2026-08-27T18:20:00Z".to_string());
        let mut b = user("b");
        b.group_label = "operador".to_string();
        b.is_active = Some(false);
        let mut c = user("c");
        c.group_label = "admin".to_string();
        c.is_active = Some(true);

        let stats = aggregate_users(&[a, b, c], &role_config(), now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent_or_active, 2);
        assert_eq!(stats.group_count, 2);
        assert_eq!(stats.flag_count, 1);
    }

    #[test]
    fn test_status_predicate_follows_variant() {
        let now = Utc::now();
        let mut u = user("a");
        u.last_login = Some((now - Duration::days(2)).to_rfc3339());
        u.is_active = Some(false);

        assert!(user_status_active(&u, &store_config(), now));
        assert!(!user_status_active(&u, &role_config(), now));
    }
}
