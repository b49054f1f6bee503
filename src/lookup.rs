//! Read-through resolution of secondary entities (employee id to name).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::api::ApiTransport;
use crate::services::ServiceResult;
use crate::services::employees::{employee_names, list_all_employees};

/// Placeholder rendered for ids the directory does not know.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Name for `id`, or [`UNKNOWN_NAME`] when the directory has no entry.
pub fn display_name(names: &HashMap<i32, String>, id: i32) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

#[async_trait]
pub trait NameSource: Send + Sync {
    async fn load_names(&self) -> ServiceResult<HashMap<i32, String>>;
}

/// Employee directory fetched from `/employee/employees/`.
pub struct EmployeeNames {
    api: Arc<dyn ApiTransport>,
}

impl EmployeeNames {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NameSource for EmployeeNames {
    async fn load_names(&self) -> ServiceResult<HashMap<i32, String>> {
        let employees = list_all_employees(self.api.as_ref()).await?;
        Ok(employee_names(&employees))
    }
}

/// Names loaded at most once for the lifetime of the lookup (one page mount).
pub struct NameLookup<S: NameSource> {
    source: S,
    names: OnceCell<HashMap<i32, String>>,
}

impl<S: NameSource> NameLookup<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            names: OnceCell::new(),
        }
    }

    /// Loaded names; a failed load leaves every id unresolved.
    pub async fn names(&self) -> &HashMap<i32, String> {
        self.names
            .get_or_init(|| async {
                self.source.load_names().await.unwrap_or_else(|err| {
                    log::warn!("Failed to load name directory: {err}");
                    HashMap::new()
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::api::ApiError;
    use crate::services::ServiceError;

    struct Directory {
        fail: bool,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl NameSource for Directory {
        async fn load_names(&self) -> ServiceResult<HashMap<i32, String>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ServiceError::Api(ApiError::ServerError {
                    status: 502,
                    message: None,
                }));
            }
            Ok(HashMap::from([(4, "Aziz Karimov".to_string())]))
        }
    }

    #[tokio::test]
    async fn loads_once_and_falls_back_to_placeholder() {
        let lookup = NameLookup::new(Directory {
            fail: false,
            loads: AtomicUsize::new(0),
        });

        assert_eq!(display_name(lookup.names().await, 4), "Aziz Karimov");
        assert_eq!(display_name(lookup.names().await, 5), UNKNOWN_NAME);
        assert_eq!(lookup.source.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_directory_resolves_everything_as_unknown() {
        let lookup = NameLookup::new(Directory {
            fail: true,
            loads: AtomicUsize::new(0),
        });

        assert_eq!(display_name(lookup.names().await, 4), UNKNOWN_NAME);
        assert!(lookup.names().await.is_empty());
    }
}
