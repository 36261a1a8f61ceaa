//! Editing session over a tariff draft
//!
//! The session owns the draft (exactly one writer context) and the submit
//! guard. Field edits go through [`EditorSession::draft_mut`]; the session
//! itself only adds the store-facing lifecycle: hydrate on open, revalidate
//! on demand, single-flight create-or-update on submit.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use tariff_core::models::{ServerInfo, TariffDraft, TariffRecord};
use tariff_core::payload::TariffPayload;
use tariff_core::traits::TariffStore;
use tariff_core::validation::{validate, Verdict};
use tariff_core::{AppError, AppResult};

/// One tariff editing session against a store.
pub struct EditorSession<S> {
    store: Arc<S>,
    draft: TariffDraft,
    servers: Vec<ServerInfo>,
    in_flight: bool,
    completed: bool,
}

impl<S: TariffStore> EditorSession<S> {
    /// Start a create flow with a blank draft; billing mode is unset until
    /// the user picks one.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            draft: TariffDraft::new(),
            servers: Vec::new(),
            in_flight: false,
            completed: false,
        }
    }

    /// Start an edit flow: always refetches the record (never a cached copy)
    /// and hydrates the draft from it.
    #[instrument(skip(store))]
    pub async fn open(store: Arc<S>, id: i64) -> AppResult<Self> {
        debug!(id, "fetching tariff for editing");
        let record = store.fetch_tariff(id).await?;

        let mut session = Self::new(store);
        session.draft.hydrate(&record);
        Ok(session)
    }

    /// Refetch the persisted record and overwrite the draft with it.
    /// Last fetch wins: any local edits made in the meantime are discarded.
    #[instrument(skip(self))]
    pub async fn reload(&mut self) -> AppResult<()> {
        let id = self.draft.identity.ok_or_else(|| {
            AppError::InvalidInput("cannot reload a draft that was never persisted".to_string())
        })?;

        let record = self.store.fetch_tariff(id).await?;
        self.draft.hydrate(&record);
        Ok(())
    }

    /// Fetch the server catalog. Selection state on the draft is untouched;
    /// squads that vanished from the catalog stay selected.
    pub async fn load_servers(&mut self) -> AppResult<&[ServerInfo]> {
        self.servers = self.store.available_servers().await?;
        Ok(&self.servers)
    }

    pub fn servers(&self) -> &[ServerInfo] {
        &self.servers
    }

    pub fn draft(&self) -> &TariffDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TariffDraft {
        &mut self.draft
    }

    /// Recompute the validation verdict for the current draft state.
    pub fn verdict(&self) -> Verdict {
        validate(&self.draft)
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the submit control should be enabled: the draft validates and
    /// no submission is outstanding or already accepted.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.completed && self.verdict().is_valid()
    }

    /// Normalize the draft and send it to the store, dispatching create vs
    /// update on whether the draft was loaded from an existing record.
    ///
    /// On failure the draft is preserved unmodified so the user can correct
    /// and resubmit; there is no automatic retry. On success the session is
    /// complete and refuses further submissions.
    #[instrument(skip(self), fields(tariff_id = ?self.draft.identity))]
    pub async fn submit(&mut self) -> AppResult<TariffRecord> {
        if self.in_flight {
            return Err(AppError::Conflict(
                "a submission is already in flight".to_string(),
            ));
        }
        if self.completed {
            return Err(AppError::Conflict(
                "editing session is already complete".to_string(),
            ));
        }

        let verdict = self.verdict();
        if !verdict.is_valid() {
            warn!(errors = %verdict.summary(), "submit blocked by validation");
            return Err(AppError::Validation(verdict.summary()));
        }

        let payload = TariffPayload::from_draft(&self.draft)?;

        self.in_flight = true;
        let result = match self.draft.identity {
            Some(id) => {
                debug!(id, "updating tariff");
                self.store.update_tariff(id, &payload).await
            }
            None => {
                debug!("creating tariff");
                self.store.create_tariff(&payload).await
            }
        };
        self.in_flight = false;

        match result {
            Ok(record) => {
                self.completed = true;
                info!(id = record.id, "tariff saved");
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "tariff submission failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use tariff_core::models::{TariffMode, TrafficResetMode};
    use tariff_core::payload::BillingTerms;
    use tariff_core::validation::{Field, Reason};

    struct MockStore {
        servers: Vec<ServerInfo>,
        tariffs: Mutex<HashMap<i64, TariffRecord>>,
        next_id: AtomicI64,
        fail_next_write: Mutex<Option<AppError>>,
        hang_writes: AtomicBool,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                servers: Vec::new(),
                tariffs: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
                fail_next_write: Mutex::new(None),
                hang_writes: AtomicBool::new(false),
            }
        }

        fn with_record(record: TariffRecord) -> Self {
            let store = Self::new();
            store.tariffs.lock().unwrap().insert(record.id, record);
            store
        }

        fn fail_next_write(&self, err: AppError) {
            *self.fail_next_write.lock().unwrap() = Some(err);
        }

        fn record_from_payload(id: i64, payload: &TariffPayload) -> TariffRecord {
            let (daily_price_minor, period_prices) = match &payload.terms {
                BillingTerms::Daily {
                    daily_price_minor,
                    period_prices,
                }
                | BillingTerms::Period {
                    daily_price_minor,
                    period_prices,
                    ..
                } => (*daily_price_minor, period_prices.clone()),
            };

            let mut record = TariffRecord {
                id,
                name: payload.name.clone(),
                description: payload.description.clone(),
                is_daily: payload.is_daily,
                traffic_limit_gb: Some(payload.traffic_limit_gb),
                device_limit: Some(payload.device_limit),
                device_price_minor: payload.device_price_minor,
                max_device_limit: payload.max_device_limit,
                tier_level: Some(payload.tier_level),
                period_prices,
                allowed_squads: payload.allowed_squads.clone(),
                daily_price_minor: Some(daily_price_minor),
                traffic_topup_enabled: payload.traffic_topup_enabled,
                max_topup_traffic_gb: Some(payload.max_topup_traffic_gb),
                traffic_topup_packages: payload.traffic_topup_packages.clone(),
                traffic_reset_mode: payload.traffic_reset_mode,
                custom_days_enabled: false,
                price_per_day_minor: None,
                min_days: None,
                max_days: None,
                custom_traffic_enabled: false,
                price_per_gb_minor: None,
                min_traffic_gb: None,
                max_traffic_gb: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };

            if let BillingTerms::Period {
                custom_days_enabled,
                price_per_day_minor,
                min_days,
                max_days,
                custom_traffic_enabled,
                price_per_gb_minor,
                min_traffic_gb,
                max_traffic_gb,
                ..
            } = &payload.terms
            {
                record.custom_days_enabled = *custom_days_enabled;
                record.price_per_day_minor = Some(*price_per_day_minor);
                record.min_days = Some(*min_days);
                record.max_days = Some(*max_days);
                record.custom_traffic_enabled = *custom_traffic_enabled;
                record.price_per_gb_minor = Some(*price_per_gb_minor);
                record.min_traffic_gb = Some(*min_traffic_gb);
                record.max_traffic_gb = Some(*max_traffic_gb);
            }

            record
        }

        async fn write_gate(&self) -> AppResult<()> {
            if self.hang_writes.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if let Some(err) = self.fail_next_write.lock().unwrap().take() {
                return Err(err);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TariffStore for MockStore {
        async fn available_servers(&self) -> AppResult<Vec<ServerInfo>> {
            Ok(self.servers.clone())
        }

        async fn fetch_tariff(&self, id: i64) -> AppResult<TariffRecord> {
            self.tariffs
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("tariff {} not found", id)))
        }

        async fn list_tariffs(&self) -> AppResult<Vec<TariffRecord>> {
            Ok(self.tariffs.lock().unwrap().values().cloned().collect())
        }

        async fn create_tariff(&self, payload: &TariffPayload) -> AppResult<TariffRecord> {
            self.write_gate().await?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let record = Self::record_from_payload(id, payload);
            self.tariffs.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }

        async fn update_tariff(&self, id: i64, payload: &TariffPayload) -> AppResult<TariffRecord> {
            self.write_gate().await?;
            if !self.tariffs.lock().unwrap().contains_key(&id) {
                return Err(AppError::NotFound(format!("tariff {} not found", id)));
            }
            let record = Self::record_from_payload(id, payload);
            self.tariffs.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }
    }

    fn daily_record(id: i64) -> TariffRecord {
        TariffRecord {
            id,
            name: "DayPass".to_string(),
            description: Some("per-day billing".to_string()),
            is_daily: true,
            traffic_limit_gb: Some(50),
            device_limit: Some(2),
            device_price_minor: None,
            max_device_limit: None,
            tier_level: Some(3),
            period_prices: Vec::new(),
            allowed_squads: vec![Uuid::new_v4()],
            daily_price_minor: Some(150),
            traffic_topup_enabled: false,
            max_topup_traffic_gb: Some(0),
            traffic_topup_packages: Default::default(),
            traffic_reset_mode: TrafficResetMode::Day,
            custom_days_enabled: false,
            price_per_day_minor: None,
            min_days: None,
            max_days: None,
            custom_traffic_enabled: false,
            price_per_gb_minor: None,
            min_traffic_gb: None,
            max_traffic_gb: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_period_tariff_end_to_end() {
        let store = Arc::new(MockStore::new());
        let mut session = EditorSession::new(store.clone());

        {
            let draft = session.draft_mut();
            draft.set_mode(TariffMode::Period).unwrap();
            draft.set_name("Basic");
            draft.set_device_limit(Some(1));
            draft.set_tier_level(Some(1));
            draft.period_prices.add(30, 300_00);
        }

        assert!(session.can_submit());
        let record = session.submit().await.unwrap();

        assert!(!record.is_daily);
        assert_eq!(record.period_prices.len(), 1);
        assert_eq!(record.period_prices[0].days, 30);
        assert_eq!(record.period_prices[0].price_minor, 30000);
        assert_eq!(record.daily_price_minor, Some(0));
        assert!(session.is_completed());
    }

    #[tokio::test]
    async fn test_daily_tariff_requires_positive_price() {
        let store = Arc::new(MockStore::new());
        let mut session = EditorSession::new(store);

        {
            let draft = session.draft_mut();
            draft.set_mode(TariffMode::Daily).unwrap();
            draft.set_name("DayPass");
        }

        assert!(!session.can_submit());
        assert_eq!(
            session.verdict().reason_for(Field::DailyPrice),
            Some(Reason::MustBePositive)
        );

        session.draft_mut().set_daily_price_minor(Some(150));
        assert!(session.can_submit());

        let record = session.submit().await.unwrap();
        assert!(record.is_daily);
        assert_eq!(record.daily_price_minor, Some(150));
        assert!(record.period_prices.is_empty());
    }

    #[tokio::test]
    async fn test_submit_blocked_when_invalid() {
        let store = Arc::new(MockStore::new());
        let mut session = EditorSession::new(store);

        let result = session.submit().await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_draft_for_resubmission() {
        let store = Arc::new(MockStore::new());
        store.fail_next_write(AppError::Transport("connection reset".to_string()));

        let mut session = EditorSession::new(store);
        {
            let draft = session.draft_mut();
            draft.set_mode(TariffMode::Daily).unwrap();
            draft.set_name("DayPass");
            draft.set_daily_price_minor(Some(150));
        }

        let before = session.draft().clone();
        let err = session.submit().await.unwrap_err();
        assert!(err.is_transport());

        // Draft untouched, session still open; a plain resubmit succeeds.
        assert_eq!(session.draft(), &before);
        assert!(!session.is_completed());
        assert!(session.can_submit());
        assert!(session.submit().await.is_ok());
    }

    #[tokio::test]
    async fn test_edit_flow_updates_in_place() {
        let store = Arc::new(MockStore::with_record(daily_record(42)));
        let mut session = EditorSession::open(store.clone(), 42).await.unwrap();

        assert_eq!(session.draft().identity, Some(42));
        assert_eq!(session.draft().mode, Some(TariffMode::Daily));

        session.draft_mut().set_name("DayPass v2");
        let record = session.submit().await.unwrap();

        assert_eq!(record.id, 42);
        assert_eq!(record.name, "DayPass v2");
        assert_eq!(store.tariffs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_discards_local_edits() {
        let store = Arc::new(MockStore::with_record(daily_record(42)));
        let mut session = EditorSession::open(store, 42).await.unwrap();

        session.draft_mut().set_name("scratch edits");
        session.reload().await.unwrap();

        assert_eq!(session.draft().name, "DayPass");
    }

    #[tokio::test]
    async fn test_open_missing_tariff_fails() {
        let store = Arc::new(MockStore::new());
        let result = EditorSession::open(store, 9).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_completed_session_refuses_resubmission() {
        let store = Arc::new(MockStore::new());
        let mut session = EditorSession::new(store);
        {
            let draft = session.draft_mut();
            draft.set_mode(TariffMode::Daily).unwrap();
            draft.set_name("DayPass");
            draft.set_daily_price_minor(Some(150));
        }

        session.submit().await.unwrap();
        assert!(!session.can_submit());
        assert!(matches!(
            session.submit().await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_single_flight_guard_stays_engaged() {
        let store = Arc::new(MockStore::new());
        store.hang_writes.store(true, Ordering::SeqCst);

        let mut session = EditorSession::new(store);
        {
            let draft = session.draft_mut();
            draft.set_mode(TariffMode::Daily).unwrap();
            draft.set_name("DayPass");
            draft.set_daily_price_minor(Some(150));
        }

        let mut task = tokio_test::task::spawn(session.submit());
        assert!(task.poll().is_pending());
        drop(task);

        // The request may still be outstanding; the guard keeps the submit
        // control disabled rather than risking a duplicate.
        assert!(session.is_submitting());
        assert!(!session.can_submit());
        assert!(matches!(
            session.submit().await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_hydrate_to_payload() {
        let record = daily_record(42);
        let store = Arc::new(MockStore::with_record(record.clone()));
        let session = EditorSession::open(store, 42).await.unwrap();

        let payload = TariffPayload::from_draft(session.draft()).unwrap();
        assert_eq!(payload.name, record.name);
        assert_eq!(payload.is_daily, record.is_daily);
        assert_eq!(payload.allowed_squads, record.allowed_squads);
        assert_eq!(payload.traffic_reset_mode, record.traffic_reset_mode);
        match payload.terms {
            BillingTerms::Daily {
                daily_price_minor,
                ref period_prices,
            } => {
                assert_eq!(daily_price_minor, 150);
                assert!(period_prices.is_empty());
            }
            _ => panic!("expected daily terms"),
        }
    }

    #[tokio::test]
    async fn test_server_catalog_does_not_touch_selection() {
        let squad = Uuid::new_v4();
        let mut store = MockStore::new();
        store.servers = vec![ServerInfo {
            id: 1,
            squad_uuid: Uuid::new_v4(),
            display_name: "eu-west".to_string(),
            country_code: Some("NL".to_string()),
        }];

        let mut session = EditorSession::new(Arc::new(store));
        session.draft_mut().toggle_server(squad);

        session.load_servers().await.unwrap();
        assert_eq!(session.servers().len(), 1);
        // Stale selection survives a catalog refresh.
        assert!(session.draft().allowed_squads.contains(&squad));
    }
}
