//! NutriSpend Core - Business logic for food expense tracking
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Expense, ReminderPreferences, Notification, etc.)
//! - **ports**: Trait definitions for external dependencies (ExpenseStore, KeyValueStore, Notifier, ...)
//! - **services**: Business logic orchestration (expenses, reminders, summary, ...)
//! - **adapters**: Concrete implementations (DuckDB, PostgREST, Gemini, clocks)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use adapters::clock::SystemClock;
use adapters::duckdb::DuckDbKeyValueStore;
use adapters::gemini::GeminiExtractor;
use adapters::local::LocalExpenseStore;
use adapters::postgrest::RemoteExpenseStore;
use config::{Backend, Config};
use ports::{Clock, ExpenseExtractor, ExpenseStore, KeyValueStore, Notifier};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{
    Expense, ExpenseCategory, NewExpense, Notification, NotificationPermission,
    ReminderPreferences, ReminderTime, Theme,
};

/// Database file holding preferences and the local expense collection
pub const DB_FILENAME: &str = "nutrispend.duckdb";

/// Main context for NutriSpend operations
///
/// Holds the configuration, the backend chosen for this run, and all
/// services wired to it.
pub struct NutriSpendContext {
    pub config: Config,
    pub backend: Backend,
    pub clock: Arc<dyn Clock>,
    pub expense_service: Arc<ExpenseService>,
    pub preference_service: Arc<PreferenceService>,
    pub reminder_service: Arc<ReminderService>,
    pub summary_service: SummaryService,
    pub smart_add_service: SmartAddService,
    pub status_service: StatusService,
    db_path: Option<PathBuf>,
}

impl NutriSpendContext {
    /// Create a context over the data directory
    pub fn new(data_dir: &Path, notifier: Arc<dyn Notifier>) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let config = Config::load(data_dir)?;

        let db_path = data_dir.join(DB_FILENAME);
        let kv = DuckDbKeyValueStore::new(&db_path)
            .with_context(|| format!("Failed to open {}", db_path.display()))?;
        kv.ensure_schema()?;

        let mut context = Self::from_parts(config, Arc::new(kv), notifier, Arc::new(SystemClock))?;
        context.db_path = Some(db_path);
        Ok(context)
    }

    /// Wire services from already-built parts
    ///
    /// The backend is selected here, once, from `config`.
    pub fn from_parts(
        config: Config,
        kv: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let backend = Backend::select(&config);
        let store: Arc<dyn ExpenseStore> = match &backend {
            Backend::Remote(settings) => Arc::new(RemoteExpenseStore::new(settings)?),
            Backend::Local => Arc::new(LocalExpenseStore::new(kv.clone(), clock.clone())),
        };
        info!(backend = backend.label(), "Expense backend selected");

        let extractor: Arc<dyn ExpenseExtractor> = Arc::new(GeminiExtractor::new(&config.extraction)?);

        let expense_service = Arc::new(ExpenseService::new(store.clone()));
        let preference_service = Arc::new(PreferenceService::new(kv));
        let reminder_service = Arc::new(ReminderService::new(
            preference_service.clone(),
            notifier,
            clock.clone(),
        ));
        let summary_service = SummaryService::new(store, clock.clone());
        let smart_add_service =
            SmartAddService::new(extractor.clone(), expense_service.clone(), clock.clone());
        let status_service = StatusService::new(
            backend.clone(),
            expense_service.clone(),
            preference_service.clone(),
            extractor,
        );

        Ok(Self {
            config,
            backend,
            clock,
            expense_service,
            preference_service,
            reminder_service,
            summary_service,
            smart_add_service,
            status_service,
            db_path: None,
        })
    }

    /// Path of the local database, if the context opened one
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}
