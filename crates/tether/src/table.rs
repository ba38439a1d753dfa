use serde::Serialize;

use tether_core::SyncState;
use tether_core::views::{self, Connectivity};

/// One service line of the replay table.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRow {
    pub server: String,
    pub service_id: String,
    pub protocol: String,
    pub endpoint: String,
    pub status: String,
    pub favorite: bool,
}

impl ServiceRow {
    pub fn collect(state: &SyncState) -> Vec<ServiceRow> {
        let directory = state.directory();
        directory
            .servers()
            .flat_map(|server| {
                server.services.iter().map(move |service| (server, service))
            })
            .map(|(server, service)| {
                let status = match views::connectivity(state, service.id) {
                    Connectivity::Tunneled(tunnel) => format!("tunnel :{}", tunnel.local_port),
                    Connectivity::Connected => "connected".to_string(),
                    Connectivity::Disconnected => "-".to_string(),
                };
                ServiceRow {
                    server: server.name.clone(),
                    service_id: service.id.to_string(),
                    protocol: service.protocol.to_string(),
                    endpoint: format!("{}:{}", service.host, service.port),
                    status,
                    favorite: views::is_favorite(state, service.id),
                }
            })
            .collect()
    }
}

pub struct TableFormatter {
    server_width: usize,
    protocol_width: usize,
    endpoint_width: usize,
    status_width: usize,
}

impl TableFormatter {
    pub fn new(rows: &[ServiceRow]) -> Self {
        let server_width = rows
            .iter()
            .map(|r| r.server.len())
            .max()
            .unwrap_or(16)
            .clamp(6, 40);
        let endpoint_width = rows
            .iter()
            .map(|r| r.endpoint.len())
            .max()
            .unwrap_or(16)
            .clamp(8, 50);

        Self {
            server_width,
            protocol_width: 8,
            endpoint_width,
            status_width: 14,
        }
    }

    pub fn print_table(&self, rows: &[ServiceRow]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!(
            "│ {} │ {} │ {} │ {} │ ★ │",
            pad("Server", self.server_width),
            pad("Protocol", self.protocol_width),
            pad("Endpoint", self.endpoint_width),
            pad("Status", self.status_width),
        );
        println!("{}", self.border('├', '┼', '┤'));
        for row in rows {
            println!(
                "│ {} │ {} │ {} │ {} │ {} │",
                pad(&truncate(&row.server, self.server_width), self.server_width),
                pad(&row.protocol, self.protocol_width),
                pad(&truncate(&row.endpoint, self.endpoint_width), self.endpoint_width),
                pad(&row.status, self.status_width),
                if row.favorite { "★" } else { " " },
            );
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let widths = [
            self.server_width,
            self.protocol_width,
            self.endpoint_width,
            self.status_width,
            1,
        ];
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(&middle.to_string()))
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
