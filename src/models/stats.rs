use serde::{Deserialize, Serialize};

/// Contadores exibidos nos quatro slots fixos do topo do dashboard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct DashboardStats {
    pub total: usize,
    /// Logins dentro da janela configurada (variante Store) ou
    /// usuários com isActive = true (variante Role).
    pub recent_or_active: usize,
    /// Lojas distintas (Store) ou usuários com a role rastreada (Role).
    pub group_count: usize,
    /// Telefones preenchidos (Store) ou 2FA verificado (Role).
    pub flag_count: usize,
}

impl DashboardStats {
    pub fn empty() -> Self {
        DashboardStats {
            total: 0,
            recent_or_active: 0,
            group_count: 0,
            flag_count: 0,
        }
    }
}
