use serde::{Deserialize, Serialize};

/// Registro cru vindo do users.json - nenhum campo é garantido.
/// Duas grafias convivem para o mesmo conceito (userId/id,
/// userName/name, lastLogin/createdAt); campos desconhecidos são
/// ignorados.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RawUserRecord {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "storeName")]
    pub store_name: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "lastLogin")]
    pub last_login: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    #[serde(rename = "last2FAVerifiedAt")]
    pub last_2fa_verified_at: Option<String>,
}

/// Usuário canônico após a normalização. Imutável depois de criado;
/// id, name, email e group_label nunca ficam vazios.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct CanonicalUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Vazio quando o registro não trouxe telefone - a string vazia
    /// decide se o botão de copiar é renderizado.
    pub phone: String,
    pub group_label: String,
    /// ISO-8601 ou None (nunca acessou).
    pub last_login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_fa_verified_at: Option<String>,
}
