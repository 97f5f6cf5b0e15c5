use uuid::Uuid;

use crate::config::SchemaVariant;
use crate::models::{CanonicalUser, RawUserRecord};

// Placeholders exibidos quando o registro cru não traz o campo
pub const FALLBACK_NAME: &str = "Usuário sem nome";
pub const FALLBACK_EMAIL: &str = "Não informado";
pub const FALLBACK_STORE: &str = "Loja não informada";
pub const FALLBACK_ROLE: &str = "Função não informada";

/// Gera um identificador temporário para registros sem id.
/// Sessões diferentes podem colidir; dentro de uma sessão a chance
/// de colisão é desprezível.
pub fn generate_temp_id() -> String {
    Uuid::new_v4().to_string()
}

/// Mapeia um registro cru para o formato canônico. Nunca falha:
/// todo campo ausente recebe um fallback definido. A resolução é
/// sempre primeiro-campo-presente-vence (userId antes de id,
/// userName antes de name, lastLogin antes de createdAt).
pub fn normalize_user(raw: &RawUserRecord, variant: SchemaVariant) -> CanonicalUser {
    let group_label = match variant {
        SchemaVariant::Store => {
            non_blank(&raw.store_name).unwrap_or_else(|| FALLBACK_STORE.to_string())
        }
        SchemaVariant::Role => {
            non_blank(&raw.role).unwrap_or_else(|| FALLBACK_ROLE.to_string())
        }
    };

    CanonicalUser {
        id: non_blank(&raw.user_id)
            .or_else(|| non_blank(&raw.id))
            .unwrap_or_else(generate_temp_id),
        name: non_blank(&raw.user_name)
            .or_else(|| non_blank(&raw.name))
            .unwrap_or_else(|| FALLBACK_NAME.to_string()),
        email: non_blank(&raw.email).unwrap_or_else(|| FALLBACK_EMAIL.to_string()),
        phone: non_blank(&raw.phone).unwrap_or_default(),
        group_label,
        last_login: non_blank(&raw.last_login).or_else(|| non_blank(&raw.created_at)),
        is_active: raw.is_active,
        two_fa_verified_at: non_blank(&raw.last_2fa_verified_at),
    }
}

// Strings em branco contam como ausentes
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
