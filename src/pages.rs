use serde::Serialize;

use crate::app::AppShell;
use crate::assistant::QUICK_REPLIES;
use crate::connection::ping_quality;
use crate::premium::plans::{plans, FREE_FEATURES, PREMIUM_BENEFITS};
use crate::search::QUICK_SEARCH_ITEMS;

/// Bottom-navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Servers,
    Chat,
    Premium,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Servers, Page::Chat, Page::Premium];

    /// Unknown tags land on the home page
    pub fn from_tag(tag: &str) -> Page {
        match tag.to_lowercase().as_str() {
            "servers" => Page::Servers,
            "chat" => Page::Chat,
            "premium" => Page::Premium,
            _ => Page::Home,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Servers => "servers",
            Page::Chat => "chat",
            Page::Premium => "premium",
        }
    }

    /// View model for this page
    pub fn render(&self, shell: &AppShell) -> serde_json::Value {
        let body = match self {
            Page::Home => home(shell),
            Page::Servers => servers(shell, ""),
            Page::Chat => chat(shell),
            Page::Premium => premium(shell),
        };
        serde_json::json!({
            "page": self.tag(),
            "navigation": Page::ALL.iter().map(|p| serde_json::json!({
                "tag": p.tag(),
                "active": p == self,
            })).collect::<Vec<_>>(),
            "body": body,
        })
    }
}

pub fn home(shell: &AppShell) -> serde_json::Value {
    let status = shell.connection.status();
    let label = if status.is_connected() { "Connected" } else { "Disconnected" };
    serde_json::json!({
        "title": "SecureVPN",
        "status_label": label,
        "ping_quality": ping_quality(status.server.ping),
        "connection": status,
    })
}

/// Server browser, optionally narrowed by the search box text
pub fn servers(shell: &AppShell, filter: &str) -> serde_json::Value {
    let connected_id = shell.connection.status().server.id;
    let fastest = shell.catalog.find_fastest();
    let list: Vec<serde_json::Value> = shell
        .catalog
        .filter_by_text(filter.trim())
        .into_iter()
        .map(|s| {
            serde_json::json!({
                "server": s,
                "is_connected": s.id == connected_id,
            })
        })
        .collect();

    serde_json::json!({
        "count": list.len(),
        "servers": list,
        "best_server": fastest.map(|s| serde_json::json!({
            "id": s.id,
            "label": format!("Best Server ({}ms)", s.ping),
        })),
        "quick_search": QUICK_SEARCH_ITEMS,
    })
}

pub fn chat(shell: &AppShell) -> serde_json::Value {
    serde_json::json!({
        "title": "VPN Assistant",
        "messages": shell.assistant.messages(),
        "typing": shell.assistant.is_typing(),
        "quick_replies": QUICK_REPLIES,
    })
}

pub fn premium(shell: &AppShell) -> serde_json::Value {
    let center = &shell.premium;
    serde_json::json!({
        "plan": center.plan(),
        "plans": plans(),
        "free_features": FREE_FEATURES,
        "benefits": PREMIUM_BENEFITS,
        "processing": center.is_processing(),
        "payments": {
            "provider": center.payment_provider(),
            "enabled": center.payments_enabled(),
        },
        "banner": {
            "unit_id": center.banner.unit_id,
            "size": center.banner.size,
            "loaded": center.banner.is_loaded(),
        },
    })
}
