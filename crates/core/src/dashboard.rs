use log::{debug, info};

use crate::api::credentials::Credential;
use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::chart::{ChartSeries, Timeframe};
use crate::models::currency::{CryptoNetwork, DisplayCurrency, FundingCurrency, Language};
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;
use crate::models::user::User;
use crate::services::aggregator::TransactionAggregator;
use crate::services::currency_service::CurrencyService;
use crate::services::ledger_service::LedgerService;

/// Depositor-side dashboard state.
///
/// Holds the signed-in user, their ledger, the selected timeframe and the most
/// recently computed chart. Nothing recomputes implicitly: the chart is rebuilt
/// when data is (re)loaded and when the timeframe changes, and at no other time.
#[must_use]
pub struct UserDashboard {
    api: Box<dyn FundApi>,
    credential: Credential,
    settings: Settings,
    user: User,
    ledger: Ledger,
    timeframe: Timeframe,
    chart: ChartSeries,
    aggregator: TransactionAggregator,
    ledger_service: LedgerService,
    currency_service: CurrencyService,
}

impl std::fmt::Debug for UserDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDashboard")
            .field("user", &self.user.id)
            .field("transactions", &self.ledger.len())
            .field("timeframe", &self.timeframe)
            .field("settings", &self.settings)
            .finish()
    }
}

impl UserDashboard {
    /// Fetch the signed-in user and their transactions, then compute the chart.
    pub async fn load(
        api: Box<dyn FundApi>,
        credential: Credential,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let user = api.current_user(&credential).await?;
        info!("loaded dashboard for user {}", user.id);

        let mut dashboard = Self {
            api,
            credential,
            settings,
            user,
            ledger: Ledger::new(),
            timeframe: Timeframe::default(),
            chart: ChartSeries::empty(),
            aggregator: TransactionAggregator::new(),
            ledger_service: LedgerService::new(),
            currency_service: CurrencyService::new(),
        };
        dashboard.refresh().await?;
        Ok(dashboard)
    }

    /// Re-fetch transactions and rebuild the chart.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let listing = self
            .api
            .list_transactions(&self.credential, &self.user.id)
            .await?;
        debug!("fetched {} transactions for {}", listing.len(), self.user.id);
        self.ledger = Ledger::from_newest_first(listing);
        self.recompute();
        Ok(())
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Select a timeframe and rebuild the chart for it.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> &ChartSeries {
        self.timeframe = timeframe;
        self.recompute();
        &self.chart
    }

    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// The most recently computed chart.
    #[must_use]
    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    // ── Balance display ─────────────────────────────────────────────

    /// Switch language; Arabic also switches the balance to TND.
    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
        self.settings.display_currency = DisplayCurrency::for_language(language);
    }

    pub fn set_display_currency(&mut self, currency: DisplayCurrency) {
        self.settings.display_currency = currency;
    }

    /// Portfolio balance in the display currency.
    #[must_use]
    pub fn display_balance(&self) -> f64 {
        self.currency_service
            .to_display(self.user.portfolio, self.settings.display_currency)
    }

    /// Portfolio balance rendered for display, e.g. `"3,070.00 TND"`.
    #[must_use]
    pub fn formatted_balance(&self) -> String {
        self.currency_service
            .format_balance(self.user.portfolio, self.settings.display_currency)
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Unfiltered transaction history, newest first, pending entries included.
    #[must_use]
    pub fn history(&self) -> Vec<&Transaction> {
        self.ledger.newest_first().collect()
    }

    /// `true` until the user has uploaded a profile picture.
    #[must_use]
    pub fn needs_profile_picture(&self) -> bool {
        !self.user.has_profile_picture()
    }

    /// Absolute URL of the user's profile picture, if any.
    #[must_use]
    pub fn profile_picture_url(&self) -> Option<String> {
        self.user.profile_picture_url(self.settings.base_url())
    }

    // ── Requests ────────────────────────────────────────────────────

    /// Submit a pending deposit request, then refresh the ledger.
    pub async fn submit_deposit(
        &mut self,
        amount_input: &str,
        currency: Option<FundingCurrency>,
        network: Option<CryptoNetwork>,
    ) -> Result<(), CoreError> {
        let request =
            self.ledger_service
                .deposit_request(&self.user.id, amount_input, currency, network)?;
        self.api
            .create_transaction(&self.credential, &request)
            .await?;
        info!(
            "deposit request of {} {} submitted for {}",
            request.amount, request.currency, self.user.id
        );
        self.refresh().await
    }

    /// Submit a pending withdrawal request, then refresh the ledger.
    pub async fn submit_withdrawal(
        &mut self,
        amount_input: &str,
        currency: Option<FundingCurrency>,
        network: Option<CryptoNetwork>,
        payout_details: &str,
    ) -> Result<(), CoreError> {
        let request = self.ledger_service.withdrawal_request(
            &self.user.id,
            amount_input,
            currency,
            network,
            payout_details,
        )?;
        self.api
            .create_transaction(&self.credential, &request)
            .await?;
        info!(
            "withdrawal request of {} {} submitted for {}",
            request.amount, request.currency, self.user.id
        );
        self.refresh().await
    }

    /// Upload a profile picture and record its new path. Returns the server message.
    pub async fn upload_profile_picture(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::ValidationError("Select a picture to upload".into()));
        }
        let response = self
            .api
            .upload_profile_picture(&self.credential, file_name, bytes)
            .await?;
        self.user.profile_pic = Some(response.profile_pic);
        Ok(response.message)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn recompute(&mut self) {
        self.chart = self
            .aggregator
            .aggregate(self.ledger.as_slice(), self.timeframe);
    }
}
