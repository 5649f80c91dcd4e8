//! Implements the `FinanceApi` trait against a live server using `reqwest`.

use crate::api::wire::{
    self, Envelope, LoginRequest, LoginResponse, RegisterRequest, TransactionPayload,
    TransactionRecord,
};
use crate::api::{FinanceApi, TransactionBatch};
use crate::error::ApiError;
use crate::model::{Credentials, MonthRef, Registration, Transaction, TransactionDraft};
use crate::{Config, Result};
use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::trace;

/// Implements the `FinanceApi` trait over HTTP. Every request carries the
/// bearer token when one was given, and fails after the configured timeout.
pub(super) struct HttpApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpApi {
    pub(super) fn new(config: &Config, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .context("Failed to build the HTTP client")?;
        Ok(Self {
            base_url: config.api_url().as_str().trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized.into());
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            }
            .into());
        }
        Ok(response)
    }
}

/// The server reports errors as `{"message": "..."}`; anything else is passed
/// through as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait::async_trait]
impl FinanceApi for HttpApi {
    async fn list_transactions(&mut self, filter: Option<MonthRef>) -> Result<TransactionBatch> {
        trace!("list_transactions {filter:?}");
        let mut request = self.request(Method::GET, "/transactions");
        if let Some(selected) = filter {
            request = request.query(&[
                ("month", selected.month.to_string()),
                ("year", selected.year.to_string()),
            ]);
        }
        let response = self.send(request).await?;
        let envelope: Envelope<Vec<Value>> = response
            .json()
            .await
            .context("Failed to parse the transaction list")?;
        let (transactions, rejected) = wire::decode_records(envelope.data);
        Ok(TransactionBatch {
            transactions,
            rejected,
        })
    }

    async fn get_transaction(&mut self, id: u64) -> Result<Transaction> {
        trace!("get_transaction {id}");
        let request = self.request(Method::GET, &format!("/transactions/{id}"));
        let response = self.send(request).await?;
        let envelope: Envelope<TransactionRecord> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse transaction {id}"))?;
        Ok(envelope.data.into_transaction()?)
    }

    async fn create_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction> {
        trace!("create_transaction");
        let request = self.request(Method::POST, "/transactions").json(&Envelope {
            data: TransactionPayload::from(draft),
        });
        let response = self.send(request).await?;
        let envelope: Envelope<TransactionRecord> = response
            .json()
            .await
            .context("Failed to parse the created transaction")?;
        Ok(envelope.data.into_transaction()?)
    }

    async fn update_transaction(
        &mut self,
        id: u64,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        trace!("update_transaction {id}");
        let request = self
            .request(Method::PUT, &format!("/transactions/{id}"))
            .json(&Envelope {
                data: TransactionPayload::from(draft),
            });
        let response = self.send(request).await?;
        let envelope: Envelope<TransactionRecord> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse the updated transaction {id}"))?;
        Ok(envelope.data.into_transaction()?)
    }

    async fn delete_transaction(&mut self, id: u64) -> Result<()> {
        trace!("delete_transaction {id}");
        let request = self.request(Method::DELETE, &format!("/transactions/{id}"));
        self.send(request).await?;
        Ok(())
    }

    async fn login(&mut self, credentials: &Credentials) -> Result<String> {
        trace!("login as {}", credentials.email);
        let request = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest::from(credentials));
        let response = self.send(request).await?;
        let login: LoginResponse = response
            .json()
            .await
            .context("Failed to parse the login response")?;
        Ok(login.token)
    }

    async fn register(&mut self, registration: &Registration) -> Result<()> {
        trace!("register {}", registration.email);
        let request = self
            .request(Method::POST, "/users")
            .json(&RegisterRequest::from(registration));
        self.send(request).await?;
        Ok(())
    }
}
