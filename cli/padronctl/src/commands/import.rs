//! Bulk import of companies and workers.
//!
//! Every record goes through the same registry rules as an interactive
//! create, against a fresh in-memory store. Rejected records are reported and
//! skipped; they do not stop the batch.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use padron_id::{Clock, KeyGenerator};
use padron_registry::{
    Company, CompanyRequest, MemoryStore, Registry, RegistryError, WorkerRequest,
};
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tracing::{info, warn};

use crate::error::CliError;
use crate::output::{display_option, print_output, print_success};

use super::CommandContext;

/// Attempts per company when its key collides with one created in the same
/// millisecond.
const KEY_ATTEMPTS: usize = 3;

/// Load companies and workers from a JSON file.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Path to the JSON batch.
    file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Batch {
    #[serde(default)]
    companies: Vec<ImportCompany>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportCompany {
    #[serde(flatten)]
    request: CompanyRequest,
    #[serde(default)]
    workers: Vec<ImportWorker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportWorker {
    #[serde(default)]
    rut: String,
    #[serde(default)]
    names: String,
    #[serde(default)]
    first_surname: String,
    #[serde(default)]
    second_surname: String,
}

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct ImportRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,

    #[tabled(rename = "RUT")]
    rut: String,

    #[tabled(rename = "Status")]
    status: &'static str,

    #[tabled(rename = "ID", display = "display_option")]
    id: Option<String>,

    #[tabled(rename = "Message", display = "display_option")]
    message: Option<String>,
}

impl ImportRow {
    fn created(kind: &'static str, rut: String, id: String) -> Self {
        Self {
            kind,
            rut,
            status: "created",
            id: Some(id),
            message: None,
        }
    }

    fn rejected(kind: &'static str, rut: String, err: &RegistryError) -> Self {
        Self {
            kind,
            rut,
            status: "rejected",
            id: None,
            message: Some(err.public_message()),
        }
    }

    fn skipped(rut: String) -> Self {
        Self {
            kind: "worker",
            rut,
            status: "skipped",
            id: None,
            message: Some("company was not created".to_string()),
        }
    }

    fn is_rejected(&self) -> bool {
        self.status != "created"
    }
}

impl ImportCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        let raw = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let batch: Batch = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.file.display()))?;

        let registry = Registry::new(
            MemoryStore::new(),
            KeyGenerator::new(ctx.config.key_clock),
        );
        let rows = import(&registry, batch).await;

        print_output(&rows, ctx.format);

        let rejected = rows.iter().filter(|r| r.is_rejected()).count();
        if rejected > 0 {
            return Err(CliError::ImportRejected {
                rejected,
                total: rows.len(),
            }
            .into());
        }
        print_success(&format!("Imported {} records", rows.len()));
        Ok(())
    }
}

async fn import<C: Clock>(registry: &Registry<MemoryStore, C>, batch: Batch) -> Vec<ImportRow> {
    let mut rows = Vec::new();

    for entry in batch.companies {
        let rut = entry.request.rut.clone();
        let company = match create_company(registry, entry.request).await {
            Ok(company) => {
                rows.push(ImportRow::created("company", rut, company.id.to_string()));
                company
            }
            Err(err) => {
                warn!(rut = %rut, error = %err, "Company rejected");
                rows.push(ImportRow::rejected("company", rut, &err));
                rows.extend(entry.workers.into_iter().map(|w| ImportRow::skipped(w.rut)));
                continue;
            }
        };

        for worker in entry.workers {
            let rut = worker.rut.clone();
            let request = WorkerRequest {
                rut: worker.rut,
                names: worker.names,
                first_surname: worker.first_surname,
                second_surname: worker.second_surname,
                company_id: company.id.to_string(),
            };
            match registry.create_worker(request).await {
                Ok(created) => rows.push(ImportRow::created("worker", rut, created.id.to_string())),
                Err(err) => {
                    warn!(rut = %rut, error = %err, "Worker rejected");
                    rows.push(ImportRow::rejected("worker", rut, &err));
                }
            }
        }
    }

    info!(records = rows.len(), "Import finished");
    rows
}

/// Creates a company, waiting out same-millisecond key collisions.
async fn create_company<C: Clock>(
    registry: &Registry<MemoryStore, C>,
    request: CompanyRequest,
) -> Result<Company, RegistryError> {
    let mut attempt = 1;
    loop {
        match registry.create_company(request.clone()).await {
            Err(RegistryError::KeyCollision(key)) if attempt < KEY_ATTEMPTS => {
                warn!(key = %key, attempt, "Company key collision, retrying");
                tokio::time::sleep(Duration::from_millis(1)).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use padron_id::{FixedClock, SystemClock};

    fn batch(json: &str) -> Batch {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_import_reports_each_record() {
        let registry = Registry::new(MemoryStore::new(), KeyGenerator::new(SystemClock::Utc));
        let rows = import(
            &registry,
            batch(
                r#"{"companies": [
                    {"rut": "1-9", "companyName": "previred", "workers": [
                        {"rut": "2-7", "names": "Sebastian Amadiel", "firstSurname": "Manzano", "secondSurname": "Manzano"},
                        {"rut": "2-7", "names": "Sebastian Amadiel", "firstSurname": "Manzano", "secondSurname": "Manzano"}
                    ]},
                    {"rut": "19", "companyName": "broken rut", "workers": [
                        {"rut": "6-K", "names": "Sebastian Amadiel", "firstSurname": "Manzano", "secondSurname": "Manzano"}
                    ]}
                ]}"#,
            ),
        )
        .await;

        let statuses: Vec<_> = rows.iter().map(|r| (r.kind, r.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("company", "created"),
                ("worker", "created"),
                ("worker", "rejected"),
                ("company", "rejected"),
                ("worker", "skipped"),
            ]
        );
        assert_eq!(rows[2].message.as_deref(), Some("Duplicated Element"));
        assert_eq!(registry.store().company_count().await, 1);
        assert_eq!(registry.store().worker_count().await, 1);
    }

    #[tokio::test]
    async fn test_key_collision_gives_up_on_frozen_clock() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_milli_opt(22, 33, 44, 422)
            .unwrap();
        let registry = Registry::new(MemoryStore::new(), KeyGenerator::new(FixedClock(at)));
        let rows = import(
            &registry,
            batch(
                r#"{"companies": [
                    {"rut": "1-9", "companyName": "previred"},
                    {"rut": "2-7", "companyName": "prestige corp"}
                ]}"#,
            ),
        )
        .await;

        assert_eq!(rows[0].id.as_deref(), Some("pre20240110223344422"));
        assert_eq!(rows[1].status, "rejected");
        assert_eq!(rows[1].message.as_deref(), Some("Internal Server Error"));
    }
}
