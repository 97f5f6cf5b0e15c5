use std::env;
use std::fmt;
use std::path::PathBuf;

/// Variante de schema do users.json. Lojas agrupam por storeName e
/// medem atividade pelo lastLogin; perfis agrupam por role e usam o
/// flag isActive. A escolha é resolvida uma única vez no startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Store,
    Role,
}

/// Origem do users.json: arquivo local ou URL remota.
#[derive(Debug, Clone)]
pub enum UsersSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for UsersSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsersSource::File(path) => write!(f, "{}", path.display()),
            UsersSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub variant: SchemaVariant,
    pub source: UsersSource,
    /// Janela (em dias) do contador "logins recentes" nas estatísticas.
    pub recent_login_days: i64,
    /// Janela (em dias) do indicador de status no card do usuário.
    pub status_recent_days: i64,
    /// Role contabilizada no slot de agrupamento na variante Role.
    pub tracked_role: String,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let variant = match env::var("DASHBOARD_VARIANT")
            .unwrap_or_else(|_| "store".to_string())
            .to_lowercase()
            .as_str()
        {
            "role" => SchemaVariant::Role,
            _ => SchemaVariant::Store,
        };

        let source_raw =
            env::var("USERS_SOURCE").unwrap_or_else(|_| "./data/users.json".to_string());
        let source = if source_raw.starts_with("http://") || source_raw.starts_with("https://") {
            UsersSource::Url(source_raw)
        } else {
            UsersSource::File(PathBuf::from(source_raw))
        };

        DashboardConfig {
            variant,
            source,
            recent_login_days: env_days("RECENT_LOGIN_DAYS", 1),
            status_recent_days: env_days("STATUS_RECENT_DAYS", 7),
            tracked_role: env::var("TRACKED_ROLE").unwrap_or_else(|_| "admin".to_string()),
        }
    }
}

fn env_days(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}
