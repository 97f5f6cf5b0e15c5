use std::fmt;

/// Só existem dois tipos de erro no pipeline do dashboard:
/// falha de carga (terminal para a visão de dados) e falha de
/// clipboard (terminal para uma única interação).
#[derive(Debug)]
pub enum DashboardError {
    LoadFailure(String),
    ClipboardFailure(String),
}

impl DashboardError {
    /// Mensagem exibida ao usuário (painel de erro ou alert).
    pub fn message(&self) -> &str {
        match self {
            DashboardError::LoadFailure(msg) => msg,
            DashboardError::ClipboardFailure(msg) => msg,
        }
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::LoadFailure(msg) => write!(f, "Load failure: {}", msg),
            DashboardError::ClipboardFailure(msg) => write!(f, "Clipboard failure: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {}
