//! Link creation, lookup, listing and deletion.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::entities::{LinkRecord, NewLink};
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, sanitize_custom_code};
use crate::utils::url_validator::validate_target_url;

/// Input for [`LinkService::create_link`].
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub target_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub custom_code: Option<String>,
    pub domain: Option<String>,
}

/// Service for managing link records.
///
/// Uniqueness of codes is check-then-set: two concurrent creations of the
/// same custom code can both pass the check, and the later `put` wins.
pub struct LinkService<S: LinkStore + ?Sized> {
    store: Arc<S>,
    domains: Vec<String>,
}

impl<S: LinkStore + ?Sized> LinkService<S> {
    /// Creates a link service issuing short URLs under `domains`.
    ///
    /// The first domain is the default.
    pub fn new(store: Arc<S>, domains: Vec<String>) -> Self {
        Self { store, domains }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Creates and stores a new link record with a zero visit count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `target_url` is not an absolute HTTP(S) URL
    /// - the custom code is empty after sanitizing or reserved
    /// - `domain` is not one of the configured domains
    ///
    /// Returns [`AppError::Conflict`] if the custom code already exists and
    /// [`AppError::Internal`] if no free code could be generated.
    pub async fn create_link(&self, input: CreateLink) -> Result<LinkRecord, AppError> {
        let target_url = validate_target_url(&input.target_url).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
        })?;

        let domain = self.resolve_domain(input.domain.as_deref())?;

        let code = match input.custom_code.as_deref() {
            Some(custom) => {
                let code = sanitize_custom_code(custom)?;

                if self.store.get(&code).await?.is_some() {
                    return Err(AppError::conflict(
                        "Short code already exists",
                        json!({ "code": code }),
                    ));
                }

                code
            }
            None => self.generate_unique_code().await?,
        };

        let record = LinkRecord::new(
            NewLink {
                code: code.clone(),
                target_url,
                title: input.title,
                description: input.description,
                image_url: input.image_url,
                domain: Some(domain),
            },
            Utc::now(),
        );

        self.store.put(&code, &record).await?;
        info!(code = %code, "Link created");

        Ok(record)
    }

    /// Retrieves one link record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `code`.
    pub async fn get_link(&self, code: &str) -> Result<LinkRecord, AppError> {
        self.store
            .get(&code.to_ascii_lowercase())
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Lists records whose code starts with `prefix`, newest first.
    pub async fn list_links(&self, prefix: &str) -> Result<Vec<LinkRecord>, AppError> {
        let mut records: Vec<LinkRecord> = self
            .store
            .list_by_prefix(&prefix.to_ascii_lowercase())
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .collect();

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });

        Ok(records)
    }

    /// Deletes a link record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `code`.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.store.delete(&code.to_ascii_lowercase()).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        info!(code = %code, "Link deleted");
        Ok(())
    }

    /// Public short URL of a record, `https://{code}.{domain}`.
    ///
    /// Records without a stored domain use the default domain.
    pub fn short_url(&self, record: &LinkRecord) -> String {
        let domain = record
            .domain
            .as_deref()
            .or_else(|| self.domains.first().map(String::as_str))
            .unwrap_or("localhost");

        format!("https://{}.{}", record.code, domain.trim_end_matches('/'))
    }

    fn resolve_domain(&self, requested: Option<&str>) -> Result<String, AppError> {
        match requested.map(str::trim).filter(|d| !d.is_empty()) {
            Some(requested) => self
                .domains
                .iter()
                .find(|d| d.eq_ignore_ascii_case(requested))
                .cloned()
                .ok_or_else(|| {
                    AppError::bad_request(
                        "Domain is not configured",
                        json!({ "domain": requested, "available": self.domains }),
                    )
                }),
            None => self.domains.first().cloned().ok_or_else(|| {
                AppError::internal("No serving domain configured", json!({}))
            }),
        }
    }

    /// Generates a code not yet present in the store.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if self.store.get(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
