use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Account, Dealer, NewAccount, NewDealer, NewTransaction, Transaction};

const UA: &str = concat!("timberbook/", env!("CARGO_PKG_VERSION"));

/// Request options for [`ApiClient::fetch_json`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
        }
    }
}

impl FetchOptions {
    pub fn post<T: Serialize>(body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            body: Some(serde_json::to_value(body)?),
        })
    }
}

/// Thin JSON client for the ledger service. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(UA)
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Absolute URL for an endpoint path such as `/accounts`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base)
    }

    /// Issue exactly one request. Non-2xx statuses become [`Error::Http`],
    /// bodies that are not the expected JSON become [`Error::Parse`].
    pub fn fetch_json<T: DeserializeOwned>(&self, url: &str, opts: FetchOptions) -> Result<T> {
        debug!(method = %opts.method, url, "request");
        let mut req = self.http.request(opts.method.clone(), url);
        if let Some(body) = &opts.body {
            req = req.json(body);
        }
        let resp = req.send().inspect_err(|e| warn!(url, error = %e, "transport failure"))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(method = %opts.method, url, status = status.as_u16(), "request failed");
            return Err(Error::Http(status.as_u16()));
        }
        let text = resp.text()?;
        debug!(url, status = status.as_u16(), bytes = text.len(), "response");
        serde_json::from_str(&text).map_err(|e| {
            warn!(url, error = %e, "unparseable response");
            Error::from(e)
        })
    }

    pub fn accounts(&self) -> Result<Vec<Account>> {
        self.fetch_json(&self.url("/accounts"), FetchOptions::default())
    }

    pub fn create_account(&self, account: &NewAccount) -> Result<serde_json::Value> {
        self.fetch_json(&self.url("/accounts"), FetchOptions::post(account)?)
    }

    pub fn dealers(&self) -> Result<Vec<Dealer>> {
        self.fetch_json(&self.url("/dealers"), FetchOptions::default())
    }

    pub fn create_dealer(&self, dealer: &NewDealer) -> Result<serde_json::Value> {
        self.fetch_json(&self.url("/dealers"), FetchOptions::post(dealer)?)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.fetch_json(&self.url("/transactions"), FetchOptions::default())
    }

    pub fn create_transaction(&self, tx: &NewTransaction) -> Result<serde_json::Value> {
        self.fetch_json(&self.url("/transactions"), FetchOptions::post(tx)?)
    }
}
