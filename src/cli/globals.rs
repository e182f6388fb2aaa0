use crate::{
    APP_USER_AGENT,
    mediconnect::{FileStore, FormController, SupabaseClient},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc, time::Duration};
use url::Url;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub supabase_url: Option<Url>,
    pub supabase_key: Option<SecretString>,
    pub storage_dir: PathBuf,
    pub timeout: Duration,
    pub whatsapp_phone: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            storage_dir: storage_dir.into(),
            timeout: Duration::from_secs(10),
            whatsapp_phone: "225XXXXXXXXX".to_string(),
        }
    }

    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.storage_dir)
    }

    /// # Errors
    /// Returns an error if the Supabase URL or key is missing or unusable.
    pub fn backend(&self) -> Result<SupabaseClient> {
        let url = self
            .supabase_url
            .as_ref()
            .context("missing required argument: --supabase-url")?;
        let key = self
            .supabase_key
            .clone()
            .context("missing required argument: --supabase-key")?;

        SupabaseClient::new(url.as_str(), key, APP_USER_AGENT, self.timeout)
            .context("failed to configure the Supabase client")
    }

    /// # Errors
    /// Returns an error if the backend cannot be configured.
    pub fn controller(&self) -> Result<FormController> {
        Ok(FormController::new(
            Arc::new(self.backend()?),
            Arc::new(self.store()),
        ))
    }
}
