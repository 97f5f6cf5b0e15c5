use chrono::{DateTime, Utc};

use crate::config::{DashboardConfig, SchemaVariant};
use crate::models::{CanonicalUser, DashboardStats};
use crate::services::aggregator_service::{parse_login_date, user_status_active};
use crate::utils::DashboardError;

pub const NO_RESULTS_TEXT: &str = "Nenhum usuário encontrado";
pub const NEVER_LOGGED_IN: &str = "Nunca acessou";
pub const DATE_FALLBACK: &str = "Não informado";
pub const PHONE_FALLBACK: &str = "Não informado";
pub const INITIALS_FALLBACK: &str = "NA";

/// Neutraliza os caracteres com significado em HTML. Todo texto
/// vindo do users.json passa por aqui antes de entrar na página.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Primeira letra de até duas palavras do nome, em maiúsculas.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        INITIALS_FALLBACK.to_string()
    } else {
        letters
    }
}

/// Data no formato pt-BR (dd/mm/aaaa hh:mm). Timestamps ilegíveis
/// caem no placeholder, nunca em erro.
pub fn format_login_date(value: &str) -> String {
    match parse_login_date(value) {
        Some(date) => date.format("%d/%m/%Y %H:%M").to_string(),
        None => DATE_FALLBACK.to_string(),
    }
}

fn group_line_prefix(variant: SchemaVariant) -> &'static str {
    match variant {
        SchemaVariant::Store => "Loja",
        SchemaVariant::Role => "Função",
    }
}

fn status_labels(variant: SchemaVariant) -> (&'static str, &'static str) {
    match variant {
        SchemaVariant::Store => ("Login recente", "Sem acesso recente"),
        SchemaVariant::Role => ("Ativo", "Inativo"),
    }
}

// O rótulo do slot de agrupamento acompanha a role rastreada na
// variante Role, que é configurável
fn stat_labels(config: &DashboardConfig) -> (&'static str, String, &'static str) {
    match config.variant {
        SchemaVariant::Store => ("Logins recentes", "Lojas".to_string(), "Com telefone"),
        SchemaVariant::Role => (
            "Ativos",
            format!("Função: {}", config.tracked_role),
            "2FA verificado",
        ),
    }
}

/// Um card por usuário, na ordem da lista. O botão de copiar só
/// existe quando há telefone.
pub fn render_user_card(
    user: &CanonicalUser,
    config: &DashboardConfig,
    now: DateTime<Utc>,
) -> String {
    let avatar = escape_html(&initials(&user.name));
    let phone_display = if user.phone.is_empty() {
        PHONE_FALLBACK.to_string()
    } else {
        user.phone.clone()
    };
    let last_login = match &user.last_login {
        Some(value) => format_login_date(value),
        None => NEVER_LOGGED_IN.to_string(),
    };
    let active = user_status_active(user, config, now);
    let (active_text, inactive_text) = status_labels(config.variant);
    let status_class = if active { "active" } else { "inactive" };
    let status_text = if active { active_text } else { inactive_text };

    let copy_button = if user.phone.is_empty() {
        String::new()
    } else {
        format!(
            concat!(
                r#"<button class="copy-phone-btn" data-phone="{phone}" title="Copiar número">"#,
                r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
                r#"<rect x="9" y="9" width="13" height="13" rx="2" ry="2"></rect>"#,
                r#"<path d="M5 15H4a2 2 0 01-2-2V4a2 2 0 012-2h9a2 2 0 012 2v1"></path>"#,
                r#"</svg></button>"#
            ),
            phone = escape_html(&user.phone)
        )
    };

    format!(
        concat!(
            r#"<div class="user-card">"#,
            r#"<div class="user-header">"#,
            r#"<div class="user-avatar">{avatar}</div>"#,
            r#"<div class="user-info">"#,
            r#"<div class="user-name">{name}</div>"#,
            r#"<span class="user-store">{group}</span>"#,
            r#"</div></div>"#,
            r#"<div class="user-details">"#,
            r#"<div class="user-detail">{email}</div>"#,
            r#"<div class="user-detail user-detail-phone"><span>{phone}</span>{copy_button}</div>"#,
            r#"<div class="user-detail">{group_prefix}: {group}</div>"#,
            r#"<div class="user-detail">Último login: {last_login}</div>"#,
            r#"<div class="user-detail">ID: <code class="user-id">{id}</code></div>"#,
            r#"</div>"#,
            r#"<div class="user-status">"#,
            r#"<div class="status-indicator {status_class}"></div>"#,
            r#"<span class="status-text">{status_text}</span>"#,
            r#"</div></div>"#
        ),
        avatar = avatar,
        name = escape_html(&user.name),
        group = escape_html(&user.group_label),
        group_prefix = group_line_prefix(config.variant),
        email = escape_html(&user.email),
        phone = escape_html(&phone_display),
        copy_button = copy_button,
        last_login = escape_html(&last_login),
        id = escape_html(&user.id),
        status_class = status_class,
        status_text = status_text,
    )
}

/// Lista vazia vira o bloco de "sem resultados" no lugar dos cards.
pub fn render_users(users: &[CanonicalUser], config: &DashboardConfig, now: DateTime<Utc>) -> String {
    if users.is_empty() {
        return format!(r#"<div class="no-results"><p>{}</p></div>"#, NO_RESULTS_TEXT);
    }
    users
        .iter()
        .map(|user| render_user_card(user, config, now))
        .collect()
}

/// Os quatro slots fixos de contadores do topo da página.
pub fn render_stats(stats: &DashboardStats, config: &DashboardConfig) -> String {
    let (recent_label, group_label, flag_label) = stat_labels(config);
    format!(
        concat!(
            r#"<div class="stats">"#,
            r#"<div class="stat-card"><span class="stat-value" id="totalUsers">{total}</span><span class="stat-label">Total de usuários</span></div>"#,
            r#"<div class="stat-card"><span class="stat-value" id="activeUsers">{recent}</span><span class="stat-label">{recent_label}</span></div>"#,
            r#"<div class="stat-card"><span class="stat-value" id="adminUsers">{groups}</span><span class="stat-label">{group_label}</span></div>"#,
            r#"<div class="stat-card"><span class="stat-value" id="verifiedUsers">{flags}</span><span class="stat-label">{flag_label}</span></div>"#,
            r#"</div>"#
        ),
        total = stats.total,
        recent = stats.recent_or_active,
        recent_label = recent_label,
        groups = stats.group_count,
        group_label = escape_html(&group_label),
        flags = stats.flag_count,
        flag_label = flag_label,
    )
}

// Casca da página: estilos mínimos e os elementos de id fixo que o
// renderizador preenche
const PAGE_HEAD: &str = concat!(
    "<!DOCTYPE html>\n",
    r#"<html lang="pt-BR"><head><meta charset="utf-8">"#,
    r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
    "<title>Painel de Usuários</title>",
    "<style>",
    ":root{--danger:#dc2626;--success:#16a34a;}",
    "body{font-family:sans-serif;margin:0;padding:20px;background:#f3f4f6;}",
    ".stats{display:flex;gap:12px;flex-wrap:wrap;margin-bottom:20px;}",
    ".stat-card{background:#fff;border-radius:8px;padding:16px;min-width:140px;display:flex;flex-direction:column;}",
    ".stat-value{font-size:1.6rem;font-weight:bold;}",
    ".stat-label{color:#6b7280;font-size:0.85rem;}",
    ".users-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:12px;}",
    ".user-card{background:#fff;border-radius:8px;padding:16px;}",
    ".user-header{display:flex;gap:10px;align-items:center;margin-bottom:10px;}",
    ".user-avatar{width:40px;height:40px;border-radius:50%;background:#2563eb;color:#fff;display:flex;align-items:center;justify-content:center;font-weight:bold;}",
    ".user-name{font-weight:bold;}",
    ".user-store{color:#6b7280;font-size:0.85rem;}",
    ".user-detail{margin:4px 0;font-size:0.9rem;display:flex;align-items:center;gap:6px;}",
    ".copy-phone-btn{border:none;background:#e5e7eb;border-radius:4px;padding:4px;cursor:pointer;}",
    ".copy-phone-btn.copied{background:var(--success);color:#fff;}",
    ".user-status{display:flex;align-items:center;gap:6px;margin-top:10px;}",
    ".status-indicator{width:10px;height:10px;border-radius:50%;}",
    ".status-indicator.active{background:var(--success);}",
    ".status-indicator.inactive{background:#9ca3af;}",
    ".no-results{text-align:center;color:#6b7280;padding:40px;}",
    ".load-error{text-align:center;color:var(--danger);padding:40px;}",
    "#loading{display:flex;justify-content:center;}",
    "</style></head><body>"
);

// Um único listener delegado cuida de todos os botões de copiar:
// escreve o data-phone no clipboard, mostra o check por 2 s e
// reverte; rejeição vira alert
const PAGE_SCRIPT: &str = concat!(
    "<script>",
    "document.addEventListener('click',function(e){",
    "var btn=e.target.closest('.copy-phone-btn');",
    "if(!btn)return;",
    "var phone=btn.getAttribute('data-phone');",
    "if(!phone)return;",
    "navigator.clipboard.writeText(phone).then(function(){",
    "var original=btn.innerHTML;",
    "btn.innerHTML='<svg width=\"16\" height=\"16\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><path d=\"M20 6L9 17l-5-5\"></path></svg>';",
    "btn.classList.add('copied');",
    "setTimeout(function(){btn.innerHTML=original;btn.classList.remove('copied');},2000);",
    "},function(err){",
    "console.error('Erro ao copiar:',err);",
    "alert('Erro ao copiar número. Tente novamente.');",
    "});",
    "});",
    "</script>"
);

const PAGE_FOOT: &str = "</body></html>";

/// Documento completo do dashboard, já com contadores e cards
/// preenchidos. O indicador de carregamento fica oculto porque a
/// renderização acontece no servidor.
pub fn render_page(
    users: &[CanonicalUser],
    stats: &DashboardStats,
    config: &DashboardConfig,
    now: DateTime<Utc>,
) -> String {
    let mut html = String::new();
    html.push_str(PAGE_HEAD);
    html.push_str(&render_stats(stats, config));
    html.push_str(r#"<div id="loading" style="display:none"></div>"#);
    html.push_str(r#"<div id="usersContainer" class="users-grid">"#);
    html.push_str(&render_users(users, config, now));
    html.push_str("</div>");
    html.push_str(PAGE_SCRIPT);
    html.push_str(PAGE_FOOT);
    html
}

/// Página de falha de carga: o painel de erro toma o lugar do
/// indicador de carregamento; nenhum card é renderizado.
pub fn render_error_page(error: &DashboardError) -> String {
    let mut html = String::new();
    html.push_str(PAGE_HEAD);
    html.push_str(&format!(
        concat!(
            r#"<div id="loading"><div class="load-error">"#,
            "<p>❌ Erro ao carregar dados</p>",
            "<p>{}</p>",
            "<p>Verifique se o arquivo users.json está no mesmo diretório</p>",
            "</div></div>"
        ),
        escape_html(error.message())
    ));
    html.push_str(PAGE_FOOT);
    html
}
