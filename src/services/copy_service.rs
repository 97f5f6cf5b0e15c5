use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use crate::utils::DashboardError;

/// Duração do feedback visual de cópia antes de reverter o botão.
pub const FEEDBACK_RESET_MS: u64 = 2000;
pub const COPY_ERROR_ALERT: &str = "Erro ao copiar número. Tente novamente.";

/// Capacidade de escrita no clipboard da plataforma. O serviço pode
/// recusar a escrita (permissões, contexto inseguro).
#[async_trait]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Estado visual do botão de copiar durante a interação.
pub trait CopyButton {
    fn show_success(&mut self);
    fn restore(&mut self);
    fn alert(&mut self, message: &str);
}

/// Copia o telefone para o clipboard. Sucesso: mostra o estado de
/// sucesso, espera a janela de feedback e reverte. Falha: loga,
/// dispara o alert e encerra só esta interação - sem retry.
pub async fn copy_phone(
    clipboard: &dyn Clipboard,
    button: &mut dyn CopyButton,
    phone: &str,
) -> Result<(), DashboardError> {
    match clipboard.write_text(phone).await {
        Ok(()) => {
            button.show_success();
            sleep(Duration::from_millis(FEEDBACK_RESET_MS)).await;
            button.restore();
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Erro ao copiar: {}", e);
            button.alert(COPY_ERROR_ALERT);
            Err(DashboardError::ClipboardFailure(e))
        }
    }
}
