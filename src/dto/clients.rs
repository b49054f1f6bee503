use serde::Serialize;

use crate::controller::ListState;
use crate::domain::client::Client;
use crate::dto::{ListView, MISSING_VALUE, format_timestamp};
use crate::services::clients::NO_CLIENTS_IN_BRANCH;

#[derive(Debug, Clone, Serialize)]
pub struct ClientRow {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub branch: String,
    pub created_at: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            phone: client.phone.clone(),
            branch: if client.branch_name.is_empty() {
                MISSING_VALUE.to_string()
            } else {
                client.branch_name.clone()
            },
            created_at: format_timestamp(&client.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub selected: bool,
}

/// Data required to render the clients page.
#[derive(Serialize)]
pub struct ClientsPageData {
    pub filters: Vec<FilterOption>,
    pub clients: ListView<ClientRow>,
}

impl ClientsPageData {
    pub fn new(options: &[String], selected: &str, state: &ListState<Client>) -> Self {
        Self {
            filters: options
                .iter()
                .map(|value| FilterOption {
                    value: value.clone(),
                    selected: value == selected,
                })
                .collect(),
            clients: ListView::from_state(state, NO_CLIENTS_IN_BRANCH, |c| ClientRow::from(c)),
        }
    }
}
