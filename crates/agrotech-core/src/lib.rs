//! AgroTech Core Library
//!
//! Local-first farm management core: herd, pasture, sanitary and milk
//! production records kept on the device, plus the statistics the dashboard
//! shows.
//!
//! # Architecture
//!
//! ```text
//!   Host UI (Swift / Kotlin via UniFFI)
//!                  │
//!            AgroTechCore ──────────────► InsightService (optional)
//!                  │
//!          FarmState<Database>
//!          │                 │
//!    lifecycle (upsert/     stats (pure, recomputed
//!    remove + cascades)     on every call)
//!          │
//!    RecordStore ── one JSON value per collection ── SQLite
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite key-value table backing the store
//! - [`store`]: [`RecordStore`] trait, collection keys, in-memory backend
//! - [`models`]: Domain types (Animal, Lot, Paddock, VaccineRecord, etc.)
//! - [`lifecycle`]: Create-or-update and delete over a collection
//! - [`farm`]: Application state container
//! - [`stats`]: Derived statistics
//! - [`query`]: Filters and pagination for list views
//! - [`session`]: Local login shim
//! - [`config`]: TOML + environment configuration

pub mod config;
pub mod dates;
pub mod db;
pub mod farm;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod query;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Database;
pub use farm::{FarmError, FarmRecord, FarmState, Removal};
pub use lifecycle::{Record, UpsertOutcome};
pub use models::{
    Animal, BirthRecord, HealthRecord, Lot, MilkProductionRecord, Paddock, Property, User,
    VaccineRecord,
};
pub use session::{LoginRequest, Session};
pub use store::{CollectionKey, InMemoryStore, RecordStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use agrotech_insight::{InsightError, InsightResult, InsightService};
use config::InsightConfig;
use query::{AnimalFilter, HealthFilter, LotFilter, VaccineFilter, DEFAULT_PAGE_SIZE};
use stats::{DistributionBy, OccupancyLevel, TrendPeriod};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AgroTechError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Insight error: {0}")]
    InsightError(String),
}

impl From<db::DbError> for AgroTechError {
    fn from(e: db::DbError) -> Self {
        AgroTechError::StorageError(e.to_string())
    }
}

impl From<store::StoreError> for AgroTechError {
    fn from(e: store::StoreError) -> Self {
        AgroTechError::StorageError(e.to_string())
    }
}

impl From<FarmError> for AgroTechError {
    fn from(e: FarmError) -> Self {
        match e {
            FarmError::NotFound(what) => AgroTechError::NotFound(what),
            FarmError::Store(e) => e.into(),
        }
    }
}

impl From<session::SessionError> for AgroTechError {
    fn from(e: session::SessionError) -> Self {
        match e {
            session::SessionError::Store(e) => e.into(),
            other => AgroTechError::InvalidInput(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for AgroTechError {
    fn from(e: config::ConfigError) -> Self {
        AgroTechError::ConfigError(e.to_string())
    }
}

impl From<InsightError> for AgroTechError {
    fn from(e: InsightError) -> Self {
        AgroTechError::InsightError(e.to_string())
    }
}

impl From<serde_json::Error> for AgroTechError {
    fn from(e: serde_json::Error) -> Self {
        AgroTechError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AgroTechError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AgroTechError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a farm database at the given path.
///
/// Insight settings and the log filter come from the environment
/// (`AGROTECH_API_KEY`, `AGROTECH_LOG`).
#[uniffi::export]
pub fn open_farm(path: String) -> Result<Arc<AgroTechCore>, AgroTechError> {
    let config = AppConfig::load(None)?;
    logging::init_tracing(&config.log_filter);
    let db = Database::open(&path)?;
    AgroTechCore::open(db, &config)
}

/// Open the farm described by a TOML config file.
#[uniffi::export]
pub fn open_farm_with_config(config_path: String) -> Result<Arc<AgroTechCore>, AgroTechError> {
    let config = AppConfig::load(Some(std::path::Path::new(&config_path)))?;
    logging::init_tracing(&config.log_filter);
    let db = Database::open(&config.database_path)?;
    AgroTechCore::open(db, &config)
}

/// Create an in-memory farm (for testing). Seeds are loaded, nothing persists.
#[uniffi::export]
pub fn open_farm_in_memory() -> Result<Arc<AgroTechCore>, AgroTechError> {
    let config = AppConfig {
        login_delay_ms: 0,
        ..AppConfig::default()
    };
    let db = Database::open_in_memory()?;
    AgroTechCore::open(db, &config)
}

/// Install the tracing subscriber. Returns `false` if one was already set.
#[uniffi::export]
pub fn init_logging(filter: String) -> bool {
    logging::init_tracing(&filter)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe farm state wrapper for FFI.
#[derive(uniffi::Object)]
pub struct AgroTechCore {
    farm: Arc<Mutex<FarmState<Database>>>,
    session: Session,
    insight: Option<InsightService>,
}

impl AgroTechCore {
    fn open(db: Database, config: &AppConfig) -> Result<Arc<Self>, AgroTechError> {
        let farm = FarmState::load(db)?;
        let insight = insight_service(&config.insight)
            .map_err(|e| info!(reason = %e, "AI insights disabled"))
            .ok();
        let core = Self::from_parts(farm, Session::new(config.login_delay()), insight);
        Ok(Arc::new(core))
    }

    /// Assemble a core from already-built parts.
    pub fn from_parts(
        farm: FarmState<Database>,
        session: Session,
        insight: Option<InsightService>,
    ) -> Self {
        Self {
            farm: Arc::new(Mutex::new(farm)),
            session,
            insight,
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(feature = "gemini")]
fn insight_service(config: &InsightConfig) -> InsightResult<InsightService> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|_| config.enabled())
        .ok_or_else(|| InsightError::Unavailable("no API key configured".into()))?;
    let backend =
        agrotech_insight::gemini::GeminiBackend::new(api_key, &config.model, &config.endpoint)?;
    info!(model = %config.model, "insight backend ready");
    Ok(InsightService::new(Box::new(backend)))
}

#[cfg(not(feature = "gemini"))]
fn insight_service(config: &InsightConfig) -> InsightResult<InsightService> {
    if config.enabled() {
        tracing::warn!("insight API key set but the gemini feature is not compiled in");
    }
    Err(InsightError::Unavailable(
        "built without the gemini feature".into(),
    ))
}

fn list_json<T: FarmRecord>(farm: &FarmState<Database>) -> Result<String, AgroTechError> {
    Ok(serde_json::to_string(farm.records::<T>())?)
}

fn upsert_json<T: FarmRecord>(
    farm: &mut FarmState<Database>,
    json: &str,
) -> Result<String, AgroTechError> {
    let record: T =
        serde_json::from_str(json).map_err(|e| AgroTechError::InvalidInput(e.to_string()))?;
    Ok(farm.upsert(record)?.id().to_string())
}

/// An empty string means "no filter".
fn parse_filter<F: DeserializeOwned + Default>(json: &str) -> Result<F, AgroTechError> {
    if json.trim().is_empty() {
        return Ok(F::default());
    }
    serde_json::from_str(json).map_err(|e| AgroTechError::InvalidInput(e.to_string()))
}

fn page_json<T: Serialize + Clone>(items: &[T], page: u32) -> Result<FfiRecordPage, AgroTechError> {
    let page = query::paginate(items, page as usize, DEFAULT_PAGE_SIZE);
    Ok(FfiRecordPage {
        items_json: serde_json::to_string(&page.items)?,
        page: page.page as u32,
        total_pages: page.total_pages as u32,
        total_items: page.total_items as u32,
        first_item: page.first_item as u32,
        last_item: page.last_item as u32,
    })
}

fn parse_day(value: &str) -> Result<NaiveDate, AgroTechError> {
    dates::parse_date(value).ok_or_else(|| AgroTechError::InvalidInput(format!("bad date: {value}")))
}

fn delete<T: FarmRecord>(
    farm: &mut FarmState<Database>,
    id: &str,
    confirmed: bool,
) -> Result<FfiRemoval, AgroTechError> {
    Ok(farm.remove::<T, _>(id, |_| confirmed)?.into())
}

#[uniffi::export]
impl AgroTechCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// All records of a kind, as a JSON array.
    pub fn list_records(&self, kind: RecordKind) -> Result<String, AgroTechError> {
        let farm = self.farm.lock()?;
        match kind {
            RecordKind::Animal => list_json::<Animal>(&farm),
            RecordKind::Paddock => list_json::<Paddock>(&farm),
            RecordKind::Lot => list_json::<Lot>(&farm),
            RecordKind::Vaccine => list_json::<VaccineRecord>(&farm),
            RecordKind::Health => list_json::<HealthRecord>(&farm),
            RecordKind::Milk => list_json::<MilkProductionRecord>(&farm),
            RecordKind::Birth => list_json::<BirthRecord>(&farm),
        }
    }

    /// Create or update a record from JSON. Returns the record ID.
    pub fn upsert_record(&self, kind: RecordKind, json: String) -> Result<String, AgroTechError> {
        let mut farm = self.farm.lock()?;
        match kind {
            RecordKind::Animal => upsert_json::<Animal>(&mut farm, &json),
            RecordKind::Paddock => upsert_json::<Paddock>(&mut farm, &json),
            RecordKind::Lot => upsert_json::<Lot>(&mut farm, &json),
            RecordKind::Vaccine => upsert_json::<VaccineRecord>(&mut farm, &json),
            RecordKind::Health => upsert_json::<HealthRecord>(&mut farm, &json),
            RecordKind::Milk => upsert_json::<MilkProductionRecord>(&mut farm, &json),
            RecordKind::Birth => upsert_json::<BirthRecord>(&mut farm, &json),
        }
    }

    /// Delete a record. `confirmed` is the operator's answer to the prompt.
    pub fn delete_record(
        &self,
        kind: RecordKind,
        id: String,
        confirmed: bool,
    ) -> Result<FfiRemoval, AgroTechError> {
        let mut farm = self.farm.lock()?;
        match kind {
            RecordKind::Animal => delete::<Animal>(&mut farm, &id, confirmed),
            RecordKind::Paddock => delete::<Paddock>(&mut farm, &id, confirmed),
            RecordKind::Lot => delete::<Lot>(&mut farm, &id, confirmed),
            RecordKind::Vaccine => delete::<VaccineRecord>(&mut farm, &id, confirmed),
            RecordKind::Health => delete::<HealthRecord>(&mut farm, &id, confirmed),
            RecordKind::Milk => delete::<MilkProductionRecord>(&mut farm, &id, confirmed),
            RecordKind::Birth => delete::<BirthRecord>(&mut farm, &id, confirmed),
        }
    }

    /// Append a weighing to an animal.
    pub fn record_weighing(
        &self,
        animal_id: String,
        date: String,
        weight: f64,
    ) -> Result<(), AgroTechError> {
        let mut farm = self.farm.lock()?;
        farm.record_weighing(&animal_id, &date, weight)?;
        Ok(())
    }

    /// Re-read every collection from storage.
    pub fn reload(&self) -> Result<(), AgroTechError> {
        let mut farm = self.farm.lock()?;
        farm.reload()?;
        Ok(())
    }

    // =========================================================================
    // Property
    // =========================================================================

    pub fn get_property(&self) -> Result<FfiProperty, AgroTechError> {
        let farm = self.farm.lock()?;
        Ok(farm.property().clone().into())
    }

    pub fn update_property(&self, property: FfiProperty) -> Result<(), AgroTechError> {
        let mut farm = self.farm.lock()?;
        farm.update_property(property.into())?;
        Ok(())
    }

    // =========================================================================
    // List Views
    // =========================================================================

    /// One page of a list view. `filter_json` is the filter for `kind`
    /// (animal, health, vaccine and lot lists have one); other kinds are only
    /// paged.
    pub fn list_page(
        &self,
        kind: RecordKind,
        filter_json: String,
        page: u32,
    ) -> Result<FfiRecordPage, AgroTechError> {
        let farm = self.farm.lock()?;
        match kind {
            RecordKind::Animal => {
                let filter: AnimalFilter = parse_filter(&filter_json)?;
                page_json(&filter.apply(farm.animals()), page)
            }
            RecordKind::Health => {
                let filter: HealthFilter = parse_filter(&filter_json)?;
                page_json(&filter.apply(farm.health_records()), page)
            }
            RecordKind::Lot => {
                let filter: LotFilter = parse_filter(&filter_json)?;
                page_json(&filter.apply(farm.lots()), page)
            }
            RecordKind::Vaccine => {
                let filter: VaccineFilter = parse_filter(&filter_json)?;
                let today = Self::today();
                let rows: Vec<&VaccineRecord> = farm
                    .vaccines()
                    .iter()
                    .filter(|v| filter.matches(v, stats::schedule_status(v, today)))
                    .collect();
                page_json(&rows, page)
            }
            RecordKind::Paddock => page_json(farm.paddocks(), page),
            RecordKind::Milk => page_json(farm.milk_records(), page),
            RecordKind::Birth => page_json(farm.birth_records(), page),
        }
    }

    /// Sorted distinct values for a filter dropdown.
    pub fn filter_options(&self, field: FfiFilterField) -> Result<Vec<String>, AgroTechError> {
        let farm = self.farm.lock()?;
        let values = match field {
            FfiFilterField::Breed => query::distinct(farm.animals().iter().map(|a| a.breed.as_str())),
            FfiFilterField::Lot => query::distinct(farm.lots().iter().map(|l| l.name.as_str())),
            FfiFilterField::Paddock => {
                query::distinct(farm.paddocks().iter().map(|p| p.name.as_str()))
            }
            FfiFilterField::VaccineName => {
                query::distinct(farm.vaccines().iter().map(|v| v.name.as_str()))
            }
        };
        Ok(values)
    }

    /// Days left in a paddock's rest period; `None` unless it is resting.
    pub fn paddock_rest_days(&self, paddock_id: String) -> Result<Option<i64>, AgroTechError> {
        let farm = self.farm.lock()?;
        let paddock = farm
            .find::<Paddock>(&paddock_id)
            .ok_or_else(|| AgroTechError::NotFound(format!("paddock {paddock_id}")))?;
        Ok(paddock.rest_days_remaining(Self::today()))
    }

    /// Weight gained over an animal's weighing history.
    pub fn animal_weight_gain(&self, animal_id: String) -> Result<Option<f64>, AgroTechError> {
        let farm = self.farm.lock()?;
        let animal = farm
            .find::<Animal>(&animal_id)
            .ok_or_else(|| AgroTechError::NotFound(format!("animal {animal_id}")))?;
        Ok(animal.weight_gain())
    }

    /// Milk records dated within `start..=end` (ISO dates), as a JSON array.
    pub fn milk_records_between(&self, start: String, end: String) -> Result<String, AgroTechError> {
        let (start, end) = (parse_day(&start)?, parse_day(&end)?);
        let farm = self.farm.lock()?;
        let records = stats::filter_by_date_range(farm.milk_records(), start, end);
        Ok(serde_json::to_string(&records)?)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in (or register). Blocks for the configured delay; the farm lock
    /// is only taken afterwards to save the user.
    pub fn login(&self, request: FfiLoginRequest) -> Result<FfiUser, AgroTechError> {
        let user = self.session.authenticate(request.into())?;
        let farm = self.farm.lock()?;
        self.session.start(farm.store(), &user)?;
        Ok(user.into())
    }

    pub fn logout(&self) -> Result<(), AgroTechError> {
        let farm = self.farm.lock()?;
        self.session.logout(farm.store())?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<FfiUser>, AgroTechError> {
        let farm = self.farm.lock()?;
        let user = self.session.current_user(farm.store())?;
        Ok(user.map(|u| u.into()))
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    pub fn dashboard_summary(&self) -> Result<FfiDashboardSummary, AgroTechError> {
        let farm = self.farm.lock()?;
        Ok(farm.dashboard_summary().into())
    }

    /// Daily milk totals in calendar order.
    pub fn production_trend(
        &self,
        period: FfiTrendPeriod,
    ) -> Result<Vec<FfiTrendPoint>, AgroTechError> {
        let farm = self.farm.lock()?;
        let points = stats::production_trend(farm.milk_records(), period.into());
        Ok(points.into_iter().map(|p| p.into()).collect())
    }

    pub fn production_summary(&self) -> Result<FfiProductionSummary, AgroTechError> {
        let farm = self.farm.lock()?;
        Ok(stats::production_summary(farm.milk_records(), Self::today()).into())
    }

    /// Animal count per lot or paddock.
    pub fn distribution(
        &self,
        by: FfiDistributionBy,
    ) -> Result<Vec<FfiDistributionSlice>, AgroTechError> {
        let farm = self.farm.lock()?;
        let slices = stats::distribution(farm.animals(), farm.lots(), farm.paddocks(), by.into());
        Ok(slices.into_iter().map(|s| s.into()).collect())
    }

    pub fn vaccine_coverage(&self) -> Result<Vec<FfiVaccineCoverage>, AgroTechError> {
        let farm = self.farm.lock()?;
        let rows = stats::vaccine_coverage(farm.vaccines(), farm.animals().len());
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub fn vaccine_schedule(&self) -> Result<FfiScheduleCounts, AgroTechError> {
        let farm = self.farm.lock()?;
        let today = Self::today();
        let counts = stats::schedule_counts(farm.vaccines(), today);
        Ok(FfiScheduleCounts {
            on_schedule: counts.on_schedule as u32,
            due_soon: counts.due_soon as u32,
            overdue: counts.overdue as u32,
            upcoming: stats::upcoming_count(farm.vaccines(), today) as u32,
        })
    }

    pub fn lot_occupancy(&self) -> Result<Vec<FfiLotOccupancy>, AgroTechError> {
        let farm = self.farm.lock()?;
        let rows = stats::all_lot_occupancy(farm.lots(), farm.animals());
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Headcount of a paddock, derived from animal assignments.
    pub fn paddock_headcount(&self, paddock_id: String) -> Result<u32, AgroTechError> {
        let farm = self.farm.lock()?;
        farm.paddock_headcount(&paddock_id)
            .map(|n| n as u32)
            .ok_or_else(|| AgroTechError::NotFound(format!("paddock {paddock_id}")))
    }

    /// Summed cost of every health record.
    pub fn total_health_cost(&self) -> Result<f64, AgroTechError> {
        let farm = self.farm.lock()?;
        Ok(stats::total_health_cost(farm.health_records()))
    }

    // =========================================================================
    // Insight
    // =========================================================================

    /// Generate herd insights. `None` when the feature is not configured.
    ///
    /// Backend failures come back as the fixed fallback message; a second call
    /// while one is pending is an error.
    pub fn generate_insight(&self) -> Result<Option<String>, AgroTechError> {
        let Some(service) = &self.insight else {
            return Ok(None);
        };

        // Release the farm lock before the network call.
        let snapshot = self.farm.lock()?.herd_snapshot();
        let insight = service.request(&snapshot)?;
        Ok(Some(insight.text().to_string()))
    }

    pub fn insight_available(&self) -> bool {
        self.insight.is_some()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// Record collections addressable through the generic CRUD calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum RecordKind {
    Animal,
    Paddock,
    Lot,
    Vaccine,
    Health,
    Milk,
    Birth,
}

/// One page of a list view; `items_json` is a JSON array of records.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecordPage {
    pub items_json: String,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub first_item: u32,
    pub last_item: u32,
}

/// Fields offered as filter dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiFilterField {
    Breed,
    Lot,
    Paddock,
    VaccineName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiRemoval {
    Removed,
    Declined,
    NotFound,
}

impl From<Removal> for FfiRemoval {
    fn from(removal: Removal) -> Self {
        match removal {
            Removal::Removed => FfiRemoval::Removed,
            Removal::Declined => FfiRemoval::Declined,
            Removal::NotFound => FfiRemoval::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiActivityKind {
    Dairy,
    Beef,
    Mixed,
}

impl From<models::ActivityKind> for FfiActivityKind {
    fn from(kind: models::ActivityKind) -> Self {
        match kind {
            models::ActivityKind::Dairy => FfiActivityKind::Dairy,
            models::ActivityKind::Beef => FfiActivityKind::Beef,
            models::ActivityKind::Mixed => FfiActivityKind::Mixed,
        }
    }
}

impl From<FfiActivityKind> for models::ActivityKind {
    fn from(kind: FfiActivityKind) -> Self {
        match kind {
            FfiActivityKind::Dairy => models::ActivityKind::Dairy,
            FfiActivityKind::Beef => models::ActivityKind::Beef,
            FfiActivityKind::Mixed => models::ActivityKind::Mixed,
        }
    }
}

/// FFI-safe property.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProperty {
    pub name: String,
    pub owner: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub total_area: f64,
    pub registration_number: String,
    pub activity: FfiActivityKind,
    pub founded_year: String,
}

impl From<Property> for FfiProperty {
    fn from(p: Property) -> Self {
        Self {
            name: p.name,
            owner: p.owner,
            address: p.address,
            city: p.city,
            state: p.state,
            total_area: p.total_area,
            registration_number: p.registration_number,
            activity: p.activity.into(),
            founded_year: p.founded_year,
        }
    }
}

impl From<FfiProperty> for Property {
    fn from(p: FfiProperty) -> Self {
        Property {
            name: p.name,
            owner: p.owner,
            address: p.address,
            city: p.city,
            state: p.state,
            total_area: p.total_area,
            registration_number: p.registration_number,
            activity: p.activity.into(),
            founded_year: p.founded_year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiUserRole {
    Manager,
    Employee,
}

impl From<models::UserRole> for FfiUserRole {
    fn from(role: models::UserRole) -> Self {
        match role {
            models::UserRole::Manager => FfiUserRole::Manager,
            models::UserRole::Employee => FfiUserRole::Employee,
        }
    }
}

impl From<FfiUserRole> for models::UserRole {
    fn from(role: FfiUserRole) -> Self {
        match role {
            FfiUserRole::Manager => models::UserRole::Manager,
            FfiUserRole::Employee => models::UserRole::Employee,
        }
    }
}

/// FFI-safe session user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub role: FfiUserRole,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        Self {
            initials: user.initials(),
            id: user.id,
            name: user.name,
            role: user.role.into(),
            email: user.email,
            phone: user.phone,
        }
    }
}

/// FFI-safe login form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLoginRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: FfiUserRole,
    pub registering: bool,
}

impl From<FfiLoginRequest> for LoginRequest {
    fn from(r: FfiLoginRequest) -> Self {
        LoginRequest {
            email: r.email,
            password: r.password,
            name: r.name,
            role: r.role.into(),
            registering: r.registering,
        }
    }
}

/// FFI-safe dashboard headline figures.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardSummary {
    pub total_animals: u32,
    pub total_lots: u32,
    pub active_lots: u32,
    pub total_paddocks: u32,
    pub active_paddocks: u32,
    pub weekly_milk_liters: f64,
    pub under_treatment: u32,
}

impl From<stats::DashboardSummary> for FfiDashboardSummary {
    fn from(s: stats::DashboardSummary) -> Self {
        Self {
            total_animals: s.total_animals as u32,
            total_lots: s.total_lots as u32,
            active_lots: s.active_lots as u32,
            total_paddocks: s.total_paddocks as u32,
            active_paddocks: s.active_paddocks as u32,
            weekly_milk_liters: s.weekly_milk_liters,
            under_treatment: s.under_treatment as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiTrendPeriod {
    Weekly,
    Monthly,
}

impl From<FfiTrendPeriod> for TrendPeriod {
    fn from(period: FfiTrendPeriod) -> Self {
        match period {
            FfiTrendPeriod::Weekly => TrendPeriod::Weekly,
            FfiTrendPeriod::Monthly => TrendPeriod::Monthly,
        }
    }
}

/// FFI-safe trend point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTrendPoint {
    /// ISO date
    pub date: String,
    /// `dd/mm`
    pub label: String,
    pub liters: f64,
}

impl From<stats::TrendPoint> for FfiTrendPoint {
    fn from(p: stats::TrendPoint) -> Self {
        Self {
            date: p.date.format("%Y-%m-%d").to_string(),
            label: p.label,
            liters: p.liters,
        }
    }
}

/// FFI-safe production figures.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProductionSummary {
    pub current_month_total: f64,
    pub weekly_total: f64,
    pub average_fat_pct: f64,
    pub record_count: u32,
}

impl From<stats::ProductionSummary> for FfiProductionSummary {
    fn from(s: stats::ProductionSummary) -> Self {
        Self {
            current_month_total: s.current_month_total,
            weekly_total: s.weekly_total,
            average_fat_pct: s.average_fat_pct,
            record_count: s.record_count as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiDistributionBy {
    Lot,
    Paddock,
}

impl From<FfiDistributionBy> for DistributionBy {
    fn from(by: FfiDistributionBy) -> Self {
        match by {
            FfiDistributionBy::Lot => DistributionBy::Lot,
            FfiDistributionBy::Paddock => DistributionBy::Paddock,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDistributionSlice {
    pub name: String,
    pub count: u32,
}

impl From<stats::DistributionSlice> for FfiDistributionSlice {
    fn from(s: stats::DistributionSlice) -> Self {
        Self {
            name: s.name,
            count: s.count as u32,
        }
    }
}

/// FFI-safe vaccine coverage row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVaccineCoverage {
    pub name: String,
    pub applications: u32,
    /// ISO date of the most recent application
    pub last_applied: Option<String>,
    pub coverage_pct: u32,
}

impl From<stats::VaccineCoverage> for FfiVaccineCoverage {
    fn from(c: stats::VaccineCoverage) -> Self {
        Self {
            name: c.name,
            applications: c.applications as u32,
            last_applied: c.last_applied.map(|d| d.format("%Y-%m-%d").to_string()),
            coverage_pct: c.coverage_pct,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScheduleCounts {
    pub on_schedule: u32,
    pub due_soon: u32,
    pub overdue: u32,
    /// Next doses due within the coming week
    pub upcoming: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiOccupancyLevel {
    Normal,
    Warning,
    Critical,
}

impl From<OccupancyLevel> for FfiOccupancyLevel {
    fn from(level: OccupancyLevel) -> Self {
        match level {
            OccupancyLevel::Normal => FfiOccupancyLevel::Normal,
            OccupancyLevel::Warning => FfiOccupancyLevel::Warning,
            OccupancyLevel::Critical => FfiOccupancyLevel::Critical,
        }
    }
}

/// FFI-safe lot occupancy.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLotOccupancy {
    pub lot_id: String,
    pub lot_name: String,
    pub animal_count: u32,
    pub capacity: u32,
    pub percent: f64,
    pub level: FfiOccupancyLevel,
    pub near_capacity: bool,
    pub over_capacity: bool,
}

impl From<stats::LotOccupancy> for FfiLotOccupancy {
    fn from(o: stats::LotOccupancy) -> Self {
        Self {
            near_capacity: o.near_capacity(),
            over_capacity: o.over_capacity(),
            lot_id: o.lot_id,
            lot_name: o.lot_name,
            animal_count: o.animal_count as u32,
            capacity: o.capacity,
            percent: o.percent,
            level: o.level.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrotech_insight::{StaticBackend, FALLBACK_MESSAGE};

    fn core_with(insight: Option<InsightService>) -> AgroTechCore {
        let farm = FarmState::load(Database::open_in_memory().unwrap()).unwrap();
        AgroTechCore::from_parts(farm, Session::new(std::time::Duration::ZERO), insight)
    }

    #[test]
    fn test_open_in_memory() {
        let core = open_farm_in_memory().unwrap();
        let summary = core.dashboard_summary().unwrap();
        assert_eq!(summary.total_animals, 3);
        assert_eq!(summary.total_lots, 2);
        assert_eq!(summary.active_paddocks, 1);
    }

    #[test]
    fn test_record_crud_via_json() {
        let core = core_with(None);
        let id = core
            .upsert_record(RecordKind::Lot, r#"{"name":"Recria","capacity":40}"#.into())
            .unwrap();

        let lots: Vec<Lot> =
            serde_json::from_str(&core.list_records(RecordKind::Lot).unwrap()).unwrap();
        assert_eq!(lots.len(), 3);
        assert_eq!(lots[2].id, id);

        let removal = core.delete_record(RecordKind::Lot, id.clone(), false).unwrap();
        assert_eq!(removal, FfiRemoval::Declined);
        let removal = core.delete_record(RecordKind::Lot, id, true).unwrap();
        assert_eq!(removal, FfiRemoval::Removed);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let core = core_with(None);
        let result = core.upsert_record(RecordKind::Animal, "not json".into());
        assert!(matches!(result, Err(AgroTechError::InvalidInput(_))));
    }

    #[test]
    fn test_login_roundtrip() {
        let core = core_with(None);
        let user = core
            .login(FfiLoginRequest {
                email: "ana@fazenda.com".into(),
                password: "x".into(),
                name: String::new(),
                role: FfiUserRole::Manager,
                registering: false,
            })
            .unwrap();
        assert_eq!(user.name, "Visitante Agro");
        assert_eq!(user.initials, "VI");
        assert!(core.current_user().unwrap().is_some());

        core.logout().unwrap();
        assert!(core.current_user().unwrap().is_none());
    }

    #[test]
    fn test_missing_credentials_is_invalid_input() {
        let core = core_with(None);
        let result = core.login(FfiLoginRequest {
            email: String::new(),
            password: String::new(),
            name: String::new(),
            role: FfiUserRole::Employee,
            registering: false,
        });
        assert!(matches!(result, Err(AgroTechError::InvalidInput(_))));
    }

    #[test]
    fn test_insight_disabled() {
        let core = core_with(None);
        assert!(!core.insight_available());
        assert_eq!(core.generate_insight().unwrap(), None);
    }

    #[test]
    fn test_insight_generated_and_fallback() {
        let core = core_with(Some(InsightService::new(Box::new(StaticBackend::answering(
            "1. Rotacione os piquetes.",
        )))));
        assert_eq!(
            core.generate_insight().unwrap().as_deref(),
            Some("1. Rotacione os piquetes.")
        );

        let core = core_with(Some(InsightService::new(Box::new(StaticBackend::failing(
            "timeout",
        )))));
        assert_eq!(core.generate_insight().unwrap().as_deref(), Some(FALLBACK_MESSAGE));
    }

    #[test]
    fn test_property_update() {
        let core = core_with(None);
        let mut property = core.get_property().unwrap();
        assert_eq!(property.activity, FfiActivityKind::Mixed);
        property.activity = FfiActivityKind::Dairy;
        core.update_property(property).unwrap();
        assert_eq!(core.get_property().unwrap().activity, FfiActivityKind::Dairy);
    }

    #[test]
    fn test_occupancy_and_headcount() {
        let core = core_with(None);
        let rows = core.lot_occupancy().unwrap();
        assert_eq!(rows[0].animal_count, 2);
        assert_eq!(rows[0].level, FfiOccupancyLevel::Normal);
        assert_eq!(core.paddock_headcount("1".into()).unwrap(), 2);
        assert!(matches!(
            core.paddock_headcount("nope".into()),
            Err(AgroTechError::NotFound(_))
        ));
    }

    fn login_request(email: &str) -> FfiLoginRequest {
        FfiLoginRequest {
            email: email.into(),
            password: "x".into(),
            name: String::new(),
            role: FfiUserRole::Manager,
            registering: false,
        }
    }

    #[test]
    fn test_login_delay_does_not_block_other_calls() {
        use std::time::{Duration, Instant};

        let farm = FarmState::load(Database::open_in_memory().unwrap()).unwrap();
        let core = Arc::new(AgroTechCore::from_parts(
            farm,
            Session::new(Duration::from_millis(400)),
            None,
        ));

        let login = {
            let core = Arc::clone(&core);
            std::thread::spawn(move || core.login(login_request("ana@fazenda.com")))
        };
        std::thread::sleep(Duration::from_millis(50));

        let started = Instant::now();
        assert_eq!(core.dashboard_summary().unwrap().total_animals, 3);
        assert!(started.elapsed() < Duration::from_millis(200));

        assert!(login.join().unwrap().is_ok());
        assert!(core.current_user().unwrap().is_some());
    }

    #[test]
    fn test_open_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("farm.db");
        let config_path = dir.path().join("agrotech.toml");
        std::fs::write(
            &config_path,
            format!(
                "database_path = \"{}\"\nlogin_delay_ms = 0\nlog_filter = \"agrotech_core=debug\"\n",
                db_path.display()
            ),
        )
        .unwrap();

        let core = open_farm_with_config(config_path.display().to_string()).unwrap();
        assert_eq!(core.dashboard_summary().unwrap().total_animals, 3);
        assert!(db_path.exists());
    }

    #[test]
    fn test_insight_service_reports_why_unavailable() {
        let result = insight_service(&InsightConfig::default());
        assert!(matches!(result, Err(InsightError::Unavailable(_))));
    }

    #[test]
    fn test_list_page_filters_and_pages() {
        let core = core_with(None);

        let page = core
            .list_page(RecordKind::Animal, r#"{"lot":"Engorda 01"}"#.into(), 1)
            .unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!((page.first_item, page.last_item), (1, 2));
        let animals: Vec<Animal> = serde_json::from_str(&page.items_json).unwrap();
        assert!(animals.iter().all(|a| a.lot == "Engorda 01"));

        let all = core.list_page(RecordKind::Paddock, String::new(), 1).unwrap();
        assert_eq!(all.total_items, 3);
        assert_eq!(all.total_pages, 1);

        let past_end = core.list_page(RecordKind::Lot, String::new(), 5).unwrap();
        assert_eq!(past_end.items_json, "[]");

        assert!(matches!(
            core.list_page(RecordKind::Health, "{".into(), 1),
            Err(AgroTechError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_page_vaccine_status() {
        let core = core_with(None);
        core.upsert_record(
            RecordKind::Vaccine,
            r#"{"name":"Aftosa","applied_on":"2020-01-01","next_dose":"2020-06-01"}"#.into(),
        )
        .unwrap();

        let overdue = core
            .list_page(RecordKind::Vaccine, r#"{"status":"overdue"}"#.into(), 1)
            .unwrap();
        assert_eq!(overdue.total_items, 1);
        let on_schedule = core
            .list_page(RecordKind::Vaccine, r#"{"status":"on_schedule"}"#.into(), 1)
            .unwrap();
        assert_eq!(on_schedule.total_items, 0);
    }

    #[test]
    fn test_filter_options() {
        let core = core_with(None);
        assert_eq!(
            core.filter_options(FfiFilterField::Breed).unwrap(),
            vec!["Holandês", "Nelore"]
        );
        assert_eq!(
            core.filter_options(FfiFilterField::Lot).unwrap(),
            vec!["Engorda 01", "Leite 01"]
        );
        assert!(core.filter_options(FfiFilterField::VaccineName).unwrap().is_empty());
    }

    #[test]
    fn test_paddock_rest_and_weight_gain() {
        let core = core_with(None);
        assert_eq!(core.paddock_rest_days("1".into()).unwrap(), None);
        assert!(core.paddock_rest_days("2".into()).unwrap().is_some());
        assert!(matches!(
            core.paddock_rest_days("nope".into()),
            Err(AgroTechError::NotFound(_))
        ));

        assert_eq!(core.animal_weight_gain("1".into()).unwrap(), Some(40.0));
        assert!(matches!(
            core.animal_weight_gain("nope".into()),
            Err(AgroTechError::NotFound(_))
        ));
    }

    #[test]
    fn test_milk_records_between() {
        let core = core_with(None);
        for date in ["2024-04-30", "2024-05-01", "2024-05-31", "2024-06-01"] {
            core.upsert_record(RecordKind::Milk, format!(r#"{{"date":"{date}","liters":10}}"#))
                .unwrap();
        }

        let json = core
            .milk_records_between("2024-05-01".into(), "2024-05-31".into())
            .unwrap();
        let records: Vec<MilkProductionRecord> = serde_json::from_str(&json).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-05-01", "2024-05-31"]);

        assert!(matches!(
            core.milk_records_between("soon".into(), "2024-05-31".into()),
            Err(AgroTechError::InvalidInput(_))
        ));
    }
}
