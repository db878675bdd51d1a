// TUI application state
//
// This module manages the state of the admin console: the active screen,
// one paginated list per resource, the selection handoff that ties the
// restaurant-scoped screens to a chosen restaurant, and the session
// verdict folded from API responses. All mutation happens here; the key
// handler and the views stay thin.

use super::components::Toast;
use super::modal::Modal;
use super::theme::{Theme, ThemeKind};
use crate::api::models::{
    DashboardCounts, Granularity, Report, Reservation, ReservationBucket, Restaurant,
    RestaurantDetail, Review, SortOrder, User,
};
use crate::api::ApiError;
use crate::config::Config;
use crate::logging::LogRing;
use crate::session::Session;
use crate::state::{ListScreen, Pagination, SelectionHandoff};
use crate::worker::{ApiCommand, ApiOutcome};
use std::time::Instant;
use tokio::sync::mpsc;

/// Screens the console can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminView {
    #[default]
    Dashboard,
    Users,
    Restaurants,
    Reservations,
    Reviews,
    Reports,
}

impl AdminView {
    /// Get the next view in cycle
    pub fn next(self) -> Self {
        match self {
            AdminView::Dashboard => AdminView::Users,
            AdminView::Users => AdminView::Restaurants,
            AdminView::Restaurants => AdminView::Reservations,
            AdminView::Reservations => AdminView::Reviews,
            AdminView::Reviews => AdminView::Reports,
            AdminView::Reports => AdminView::Dashboard,
        }
    }

    /// Get the previous view in cycle
    pub fn prev(self) -> Self {
        match self {
            AdminView::Dashboard => AdminView::Reports,
            AdminView::Users => AdminView::Dashboard,
            AdminView::Restaurants => AdminView::Users,
            AdminView::Reservations => AdminView::Restaurants,
            AdminView::Reviews => AdminView::Reservations,
            AdminView::Reports => AdminView::Reviews,
        }
    }

    /// Get display name for the title and status bars
    pub fn name(&self) -> &'static str {
        match self {
            AdminView::Dashboard => "Dashboard",
            AdminView::Users => "Members",
            AdminView::Restaurants => "Restaurants",
            AdminView::Reservations => "Reservations",
            AdminView::Reviews => "Reviews",
            AdminView::Reports => "Reports",
        }
    }

    /// Screens that only make sense with a restaurant picked on the
    /// Restaurants screen
    pub fn is_dependent(&self) -> bool {
        matches!(
            self,
            AdminView::Reservations | AdminView::Reviews | AdminView::Reports
        )
    }
}

/// Page moves a key press can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
    PrevGroup,
    NextGroup,
}

/// Dashboard counters and the reservation trend chart
#[derive(Default)]
pub struct DashboardState {
    pub counts: Option<DashboardCounts>,
    pub counts_loading: bool,
    pub series: Vec<ReservationBucket>,
    pub series_loading: bool,
    pub granularity: Granularity,
}

/// Spinner animation frames shown while a fetch is in flight
const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main application state for the TUI
pub struct App {
    /// Current screen being displayed
    pub view: AdminView,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Resolved color theme
    pub theme: Theme,

    /// Which theme is active, for cycling
    pub theme_kind: ThemeKind,

    /// Effective configuration
    pub config: Config,

    /// Admin session and its validation state
    pub session: Session,

    /// Log buffer for the system logs panel
    pub log_buffer: LogRing,

    /// Whether the logs panel is visible
    pub show_logs: bool,

    /// Transient notification, if any
    pub toast: Option<Toast>,

    /// Active modal dialog, if any
    pub modal: Option<Modal>,

    /// Restaurant picked on the Restaurants screen, consumed by the
    /// reservation, review and report screens
    pub handoff: SelectionHandoff,

    /// Members screen
    pub users: ListScreen<User>,
    /// Active member search keyword, empty for no filter
    pub users_keyword: String,

    /// Restaurants screen
    pub restaurants: ListScreen<Restaurant>,
    /// Active restaurant name filter, empty for no filter
    pub restaurants_keyword: String,

    /// Reservations screen, scoped to the handoff restaurant
    pub reservations: ListScreen<Reservation>,

    /// Reviews screen, scoped to the handoff restaurant
    pub reviews: ListScreen<Review>,
    /// Review sort direction by creation date
    pub review_order: SortOrder,

    /// Reports screen, scoped to the handoff restaurant
    pub reports: ListScreen<Report>,

    /// Detail record for the handoff restaurant, fetched lazily
    pub detail: Option<RestaurantDetail>,

    /// Dashboard counters and chart
    pub dashboard: DashboardState,

    /// Search input buffer; `Some` while the search line is open
    pub search: Option<String>,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    command_tx: mpsc::Sender<ApiCommand>,
    spinner_frame: usize,
}

impl App {
    pub fn with_config(
        log_buffer: LogRing,
        config: Config,
        session: Session,
        command_tx: mpsc::Sender<ApiCommand>,
    ) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        Self {
            view: AdminView::default(),
            should_quit: false,
            theme: theme_kind.theme(),
            theme_kind,
            config,
            session,
            log_buffer,
            show_logs: false,
            toast: None,
            modal: None,
            handoff: SelectionHandoff::new(),
            users: ListScreen::new(),
            users_keyword: String::new(),
            restaurants: ListScreen::new(),
            restaurants_keyword: String::new(),
            reservations: ListScreen::new(),
            reviews: ListScreen::new(),
            review_order: SortOrder::default(),
            reports: ListScreen::new(),
            detail: None,
            dashboard: DashboardState::default(),
            search: None,
            start_time: Instant::now(),
            command_tx,
            spinner_frame: 0,
        }
    }

    /// Hand a command to the API worker. The channel is large enough that a
    /// full buffer means the worker is gone, not busy.
    pub fn send(&mut self, command: ApiCommand) {
        if let Err(e) = self.command_tx.try_send(command) {
            tracing::error!("API worker unreachable: {}", e);
            self.show_toast(Toast::error("✗ API worker unreachable"));
        }
    }

    // ─── View switching ──────────────────────────────────────────────────

    /// Switch to a specific view and refresh it. Leaving the dependent
    /// screens for a standalone one drops the restaurant selection and the
    /// rows that belonged to it.
    pub fn set_view(&mut self, view: AdminView) {
        if view == self.view {
            return;
        }
        self.search = None;
        if !view.is_dependent() && self.handoff.get().is_some() {
            self.handoff.clear();
            self.detail = None;
            self.reservations.clear_rows();
            self.reviews.clear_rows();
            self.reports.clear_rows();
        }
        self.view = view;
        self.refresh_view();
    }

    pub fn next_view(&mut self) {
        self.set_view(self.view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.view.prev());
    }

    /// Re-fetch whatever the current screen shows. The dependent screens
    /// only fetch once a restaurant has been picked.
    pub fn refresh_view(&mut self) {
        match self.view {
            AdminView::Dashboard => self.fetch_dashboard(),
            AdminView::Users => self.fetch_users(),
            AdminView::Restaurants => self.fetch_restaurants(),
            AdminView::Reservations => {
                self.fetch_reservations();
                self.fetch_detail_if_missing();
            }
            AdminView::Reviews => {
                self.fetch_reviews();
                self.fetch_detail_if_missing();
            }
            AdminView::Reports => {
                self.fetch_reports();
                self.fetch_detail_if_missing();
            }
        }
    }

    /// Take the highlighted restaurant into the handoff and jump to its
    /// reservations. Rows scoped to the previous pick are dropped first.
    pub fn select_restaurant(&mut self) {
        let Some(restaurant) = self.restaurants.selected().cloned() else {
            return;
        };
        self.handoff.select(restaurant);
        self.detail = None;
        self.reservations.clear_rows();
        self.reviews.clear_rows();
        self.reports.clear_rows();
        self.set_view(AdminView::Reservations);
    }

    pub fn selected_restaurant_name(&self) -> Option<&str> {
        self.handoff.get().map(|r| r.name.as_str())
    }

    // ─── Fetches ─────────────────────────────────────────────────────────

    pub fn fetch_users(&mut self) {
        let seq = self.users.begin_fetch();
        let command = ApiCommand::FetchUsers {
            page: self.users.pagination.current_page(),
            page_size: self.config.page_size,
            keyword: self.users_keyword.clone(),
            seq,
        };
        self.send(command);
    }

    pub fn fetch_restaurants(&mut self) {
        let seq = self.restaurants.begin_fetch();
        let command = ApiCommand::FetchRestaurants {
            page: self.restaurants.pagination.current_page(),
            page_size: self.config.page_size,
            keyword: self.restaurants_keyword.clone(),
            seq,
        };
        self.send(command);
    }

    pub fn fetch_reservations(&mut self) {
        let Some(restaurant_id) = self.handoff.id() else {
            return;
        };
        let seq = self.reservations.begin_fetch();
        let command = ApiCommand::FetchReservations {
            restaurant_id,
            page: self.reservations.pagination.current_page(),
            page_size: self.config.page_size,
            seq,
        };
        self.send(command);
    }

    pub fn fetch_reviews(&mut self) {
        let Some(restaurant_id) = self.handoff.id() else {
            return;
        };
        let seq = self.reviews.begin_fetch();
        let command = ApiCommand::FetchReviews {
            restaurant_id,
            page: self.reviews.pagination.current_page(),
            page_size: self.config.page_size,
            order: self.review_order,
            seq,
        };
        self.send(command);
    }

    pub fn fetch_reports(&mut self) {
        let Some(restaurant_id) = self.handoff.id() else {
            return;
        };
        let seq = self.reports.begin_fetch();
        let command = ApiCommand::FetchReports {
            restaurant_id,
            page: self.reports.pagination.current_page(),
            page_size: self.config.page_size,
            seq,
        };
        self.send(command);
    }

    pub fn fetch_dashboard(&mut self) {
        self.dashboard.counts_loading = true;
        self.dashboard.series_loading = true;
        self.send(ApiCommand::FetchDashboard);
        let granularity = self.dashboard.granularity;
        self.send(ApiCommand::FetchSeries { granularity });
    }

    fn fetch_detail_if_missing(&mut self) {
        if self.detail.is_some() {
            return;
        }
        let Some(restaurant_id) = self.handoff.id() else {
            return;
        };
        self.send(ApiCommand::FetchRestaurantDetail { restaurant_id });
    }

    /// Cycle the dashboard chart between daily, weekly and monthly
    pub fn cycle_granularity(&mut self) {
        self.dashboard.granularity = self.dashboard.granularity.next();
        self.dashboard.series_loading = true;
        let granularity = self.dashboard.granularity;
        self.send(ApiCommand::FetchSeries { granularity });
    }

    /// Flip the review sort direction and fetch page 1 in the new order
    pub fn toggle_review_order(&mut self) {
        self.review_order = self.review_order.toggled();
        self.reviews.pagination.reset_to_first_page();
        self.fetch_reviews();
    }

    // ─── Cursor and page navigation ──────────────────────────────────────

    pub fn cursor_up(&mut self) {
        match self.view {
            AdminView::Users => self.users.cursor_up(),
            AdminView::Restaurants => self.restaurants.cursor_up(),
            AdminView::Reservations => self.reservations.cursor_up(),
            AdminView::Reviews => self.reviews.cursor_up(),
            AdminView::Reports => self.reports.cursor_up(),
            AdminView::Dashboard => {}
        }
    }

    pub fn cursor_down(&mut self) {
        match self.view {
            AdminView::Users => self.users.cursor_down(),
            AdminView::Restaurants => self.restaurants.cursor_down(),
            AdminView::Reservations => self.reservations.cursor_down(),
            AdminView::Reviews => self.reviews.cursor_down(),
            AdminView::Reports => self.reports.cursor_down(),
            AdminView::Dashboard => {}
        }
    }

    /// Move within or across page groups on the current screen. Rejected
    /// moves (past either edge) change nothing and fetch nothing.
    pub fn navigate_page(&mut self, nav: PageNav) {
        let moved = match self.view {
            AdminView::Users => apply_nav(&mut self.users.pagination, nav),
            AdminView::Restaurants => apply_nav(&mut self.restaurants.pagination, nav),
            AdminView::Reservations => apply_nav(&mut self.reservations.pagination, nav),
            AdminView::Reviews => apply_nav(&mut self.reviews.pagination, nav),
            AdminView::Reports => apply_nav(&mut self.reports.pagination, nav),
            AdminView::Dashboard => false,
        };
        if moved {
            match self.view {
                AdminView::Users => self.fetch_users(),
                AdminView::Restaurants => self.fetch_restaurants(),
                AdminView::Reservations => self.fetch_reservations(),
                AdminView::Reviews => self.fetch_reviews(),
                AdminView::Reports => self.fetch_reports(),
                AdminView::Dashboard => {}
            }
        }
    }

    // ─── Search ──────────────────────────────────────────────────────────

    /// Open the search line on screens that support a keyword filter,
    /// prefilled with the active keyword
    pub fn open_search(&mut self) {
        match self.view {
            AdminView::Users => self.search = Some(self.users_keyword.clone()),
            AdminView::Restaurants => self.search = Some(self.restaurants_keyword.clone()),
            _ => {}
        }
    }

    pub fn cancel_search(&mut self) {
        self.search = None;
    }

    /// Commit the search buffer as the active keyword and fetch page 1
    pub fn submit_search(&mut self) {
        let Some(buffer) = self.search.take() else {
            return;
        };
        let keyword = buffer.trim().to_string();
        match self.view {
            AdminView::Users => {
                self.users_keyword = keyword;
                self.users.pagination.reset_to_first_page();
                self.fetch_users();
            }
            AdminView::Restaurants => {
                self.restaurants_keyword = keyword;
                self.restaurants.pagination.reset_to_first_page();
                self.fetch_restaurants();
            }
            _ => {}
        }
    }

    // ─── Outcome application ─────────────────────────────────────────────

    /// Fold one worker answer into the state. Fetch outcomes are dropped
    /// when their stamp is stale; mutation outcomes settle the modal.
    pub fn apply_outcome(&mut self, outcome: ApiOutcome) {
        match outcome {
            ApiOutcome::Users { seq, result } => {
                self.observe_session(&result);
                match result {
                    Ok(page) => {
                        if !self.users.apply_page(seq, page, self.config.page_size) {
                            tracing::debug!("Discarded stale members page (seq {})", seq);
                        }
                    }
                    Err(e) => {
                        if self.users.apply_failure(seq) {
                            tracing::error!("Members fetch failed: {}", e);
                            self.show_toast(Toast::error("✗ Failed to load members"));
                        }
                    }
                }
            }
            ApiOutcome::Restaurants { seq, result } => {
                self.observe_session(&result);
                match result {
                    Ok(page) => {
                        if !self.restaurants.apply_page(seq, page, self.config.page_size) {
                            tracing::debug!("Discarded stale restaurants page (seq {})", seq);
                        }
                    }
                    Err(e) => {
                        if self.restaurants.apply_failure(seq) {
                            tracing::error!("Restaurants fetch failed: {}", e);
                            self.show_toast(Toast::error("✗ Failed to load restaurants"));
                        }
                    }
                }
            }
            ApiOutcome::Reservations { seq, result } => {
                self.observe_session(&result);
                match result {
                    Ok(page) => {
                        if !self.reservations.apply_page(seq, page, self.config.page_size) {
                            tracing::debug!("Discarded stale reservations page (seq {})", seq);
                        }
                    }
                    Err(e) => {
                        if self.reservations.apply_failure(seq) {
                            tracing::error!("Reservations fetch failed: {}", e);
                            self.show_toast(Toast::error("✗ Failed to load reservations"));
                        }
                    }
                }
            }
            ApiOutcome::Reviews { seq, result } => {
                self.observe_session(&result);
                match result {
                    Ok(page) => {
                        if !self.reviews.apply_page(seq, page, self.config.page_size) {
                            tracing::debug!("Discarded stale reviews page (seq {})", seq);
                        }
                    }
                    Err(e) => {
                        if self.reviews.apply_failure(seq) {
                            tracing::error!("Reviews fetch failed: {}", e);
                            self.show_toast(Toast::error("✗ Failed to load reviews"));
                        }
                    }
                }
            }
            ApiOutcome::Reports { seq, result } => {
                self.observe_session(&result);
                match result {
                    Ok(page) => {
                        if !self.reports.apply_page(seq, page, self.config.page_size) {
                            tracing::debug!("Discarded stale reports page (seq {})", seq);
                        }
                    }
                    Err(e) => {
                        if self.reports.apply_failure(seq) {
                            tracing::error!("Reports fetch failed: {}", e);
                            self.show_toast(Toast::error("✗ Failed to load reports"));
                        }
                    }
                }
            }
            ApiOutcome::RestaurantDetail { result } => {
                self.observe_session(&result);
                match result {
                    Ok(detail) => self.detail = Some(detail),
                    Err(e) => tracing::error!("Restaurant detail fetch failed: {}", e),
                }
            }
            ApiOutcome::Dashboard { result } => {
                self.observe_session(&result);
                self.dashboard.counts_loading = false;
                match result {
                    Ok(counts) => self.dashboard.counts = Some(counts),
                    Err(e) => {
                        tracing::error!("Dashboard counts fetch failed: {}", e);
                        self.show_toast(Toast::error("✗ Failed to load dashboard"));
                    }
                }
            }
            ApiOutcome::Series {
                granularity,
                result,
            } => {
                self.observe_session(&result);
                // a quick granularity cycle can leave an older series in flight
                if granularity != self.dashboard.granularity {
                    tracing::debug!("Discarded stale {} series", granularity.label());
                    return;
                }
                self.dashboard.series_loading = false;
                match result {
                    Ok(buckets) => self.dashboard.series = buckets,
                    Err(e) => {
                        tracing::error!("Reservation series fetch failed: {}", e);
                        self.show_toast(Toast::error("✗ Failed to load reservation chart"));
                    }
                }
            }
            ApiOutcome::UserUpdated { user_name, result } => {
                self.observe_session(&result);
                match result {
                    Ok(()) => {
                        self.modal = None;
                        self.show_toast(Toast::info(format!("✓ Member {} updated", user_name)));
                        self.fetch_users();
                    }
                    Err(e) => {
                        tracing::error!("Member update failed: {}", e);
                        self.fail_modal_save(e);
                    }
                }
            }
            ApiOutcome::ReservationUpdated {
                reservation_id,
                result,
            } => {
                self.observe_session(&result);
                match result {
                    Ok(()) => {
                        self.modal = None;
                        self.show_toast(Toast::info(format!(
                            "✓ Reservation #{} updated",
                            reservation_id
                        )));
                        self.fetch_reservations();
                    }
                    Err(e) => {
                        tracing::error!("Reservation update failed: {}", e);
                        self.fail_modal_save(e);
                    }
                }
            }
            ApiOutcome::RestaurantCreated { result } => {
                self.observe_session(&result);
                match result {
                    Ok(()) => {
                        self.modal = None;
                        self.show_toast(Toast::info("✓ Restaurant registered"));
                        self.fetch_restaurants();
                    }
                    Err(e) => {
                        tracing::error!("Restaurant registration failed: {}", e);
                        self.fail_modal_save(e);
                    }
                }
            }
            ApiOutcome::UserDeleted { user_name, result } => {
                self.observe_session(&result);
                match result {
                    Ok(()) => {
                        self.modal = None;
                        if let Some(index) = self
                            .users
                            .rows
                            .iter()
                            .position(|u| u.user_name == user_name)
                        {
                            self.users.remove_row(index);
                        }
                        self.show_toast(Toast::info(format!("✓ Member {} removed", user_name)));
                    }
                    Err(e) => {
                        tracing::error!("Member delete failed: {}", e);
                        self.fail_modal_save(e);
                    }
                }
            }
            ApiOutcome::ReservationDeleted {
                reservation_id,
                result,
            } => {
                self.observe_session(&result);
                match result {
                    Ok(()) => {
                        self.show_toast(Toast::info(format!(
                            "✓ Reservation #{} deleted",
                            reservation_id
                        )));
                        self.fetch_reservations();
                    }
                    Err(e) => {
                        tracing::error!("Reservation delete failed: {}", e);
                        self.show_toast(Toast::error("✗ Failed to delete reservation"));
                    }
                }
            }
            ApiOutcome::ReviewDeleted { review_id, result } => {
                self.observe_session(&result);
                match result {
                    Ok(()) => {
                        if let Some(index) = self
                            .reviews
                            .rows
                            .iter()
                            .position(|r| r.review_id == review_id)
                        {
                            self.reviews.remove_row(index);
                        }
                        self.show_toast(Toast::info("✓ Review deleted"));
                    }
                    Err(e) => {
                        tracing::error!("Review delete failed: {}", e);
                        self.show_toast(Toast::error("✗ Failed to delete review"));
                    }
                }
            }
        }
    }

    /// Fold an API result into the session verdict. Only a definite HTTP
    /// status moves the state; transport errors say nothing about the token.
    fn observe_session<T>(&mut self, result: &Result<T, ApiError>) {
        let was_rejected = self.session.is_rejected();
        match result {
            Ok(_) => self.session.observe_status(200),
            Err(e) => {
                if let Some(status) = e.status() {
                    self.session.observe_status(status);
                }
            }
        }
        if !was_rejected && self.session.is_rejected() {
            tracing::warn!("Session rejected by the backend");
            self.show_toast(Toast::error("✗ Session rejected, log in again"));
        }
    }

    /// Route a failed save back into the open dialog, or fall back to a
    /// toast when the dialog is already gone
    fn fail_modal_save(&mut self, error: ApiError) {
        match &mut self.modal {
            Some(modal) => modal.fail_save(error.to_string()),
            None => self.show_toast(Toast::error("✗ Save failed")),
        }
    }

    // ─── Ambient UI state ────────────────────────────────────────────────

    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn clear_expired_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn toggle_theme(&mut self) {
        self.theme_kind = match self.theme_kind {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        };
        self.theme = self.theme_kind.theme();
    }

    /// Advance the spinner; called on every tick of the event loop
    pub fn tick_animation(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Whether the current screen has a fetch in flight, for the title bar
    pub fn current_view_loading(&self) -> bool {
        match self.view {
            AdminView::Dashboard => {
                self.dashboard.counts_loading || self.dashboard.series_loading
            }
            AdminView::Users => self.users.loading,
            AdminView::Restaurants => self.restaurants.loading,
            AdminView::Reservations => self.reservations.loading,
            AdminView::Reviews => self.reviews.loading,
            AdminView::Reports => self.reports.loading,
        }
    }

    /// Pagination of the current screen, for the status and page bars
    pub fn active_pagination(&self) -> Option<&Pagination> {
        match self.view {
            AdminView::Dashboard => None,
            AdminView::Users => Some(&self.users.pagination),
            AdminView::Restaurants => Some(&self.restaurants.pagination),
            AdminView::Reservations => Some(&self.reservations.pagination),
            AdminView::Reviews => Some(&self.reviews.pagination),
            AdminView::Reports => Some(&self.reports.pagination),
        }
    }

    /// Row count of the current screen, for the status bar
    pub fn active_row_count(&self) -> Option<usize> {
        match self.view {
            AdminView::Dashboard => None,
            AdminView::Users => Some(self.users.rows.len()),
            AdminView::Restaurants => Some(self.restaurants.rows.len()),
            AdminView::Reservations => Some(self.reservations.rows.len()),
            AdminView::Reviews => Some(self.reviews.rows.len()),
            AdminView::Reports => Some(self.reports.rows.len()),
        }
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let elapsed = self.start_time.elapsed();
        let seconds = elapsed.as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

fn apply_nav(pagination: &mut Pagination, nav: PageNav) -> bool {
    match nav {
        PageNav::Prev => pagination.set_current_page(pagination.current_page().saturating_sub(1)),
        PageNav::Next => pagination.set_current_page(pagination.current_page() + 1),
        PageNav::PrevGroup => pagination.prev_group(),
        PageNav::NextGroup => pagination.next_group(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::UserType;
    use crate::api::Page;

    fn test_app() -> (App, mpsc::Receiver<ApiCommand>) {
        let (tx, rx) = mpsc::channel(32);
        let app = App::with_config(
            LogRing::new(),
            Config::default(),
            Session::new("jwt".to_string()),
            tx,
        );
        (app, rx)
    }

    fn user(name: &str) -> User {
        User {
            user_name: name.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            user_type: UserType::Customer,
        }
    }

    fn restaurant(id: u64, name: &str) -> Restaurant {
        Restaurant {
            restaurant_id: id,
            name: name.to_string(),
            description: String::new(),
            phone: String::new(),
            food_type: "한식".to_string(),
            total_seats: 20,
            parking_available: false,
            city: String::new(),
            district: String::new(),
            neighborhood: String::new(),
            road_addr: String::new(),
            jibun_addr: String::new(),
            detail_addr: String::new(),
        }
    }

    #[test]
    fn test_search_fetches_first_page_with_keyword() {
        let (mut app, mut rx) = test_app();

        // put the members screen on page 3 of a long listing
        let seq = app.users.begin_fetch();
        app.users.apply_page(
            seq,
            Page {
                items: vec![user("a")],
                total: 100,
            },
            8,
        );
        assert!(app.users.pagination.set_current_page(3));

        app.view = AdminView::Users;
        app.search = Some("kim".to_string());
        app.submit_search();

        assert_eq!(app.users_keyword, "kim");
        assert_eq!(app.users.pagination.current_page(), 1);
        assert!(app.users.loading);
        assert!(app.search.is_none());

        match rx.try_recv() {
            Ok(ApiCommand::FetchUsers { page, keyword, .. }) => {
                assert_eq!(page, 1);
                assert_eq!(keyword, "kim");
            }
            other => panic!("expected FetchUsers, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_users_outcome_is_discarded() {
        let (mut app, mut rx) = test_app();
        app.view = AdminView::Users;

        app.fetch_users();
        app.fetch_users();
        let (first, second) = match (rx.try_recv(), rx.try_recv()) {
            (
                Ok(ApiCommand::FetchUsers { seq: a, .. }),
                Ok(ApiCommand::FetchUsers { seq: b, .. }),
            ) => (a, b),
            other => panic!("expected two FetchUsers, got {:?}", other),
        };

        // the second answer lands first
        app.apply_outcome(ApiOutcome::Users {
            seq: second,
            result: Ok(Page {
                items: vec![user("new")],
                total: 1,
            }),
        });
        // then the slow first one, which must be ignored
        app.apply_outcome(ApiOutcome::Users {
            seq: first,
            result: Ok(Page {
                items: vec![user("old")],
                total: 1,
            }),
        });

        assert_eq!(app.users.rows.len(), 1);
        assert_eq!(app.users.rows[0].user_name, "new");
    }

    #[test]
    fn test_failed_save_keeps_modal_open_with_error() {
        let (mut app, _rx) = test_app();
        app.modal = Some(Modal::edit_user(user("alice")));
        if let Some(m) = app.modal.as_mut() {
            m.mark_saving();
        }

        app.apply_outcome(ApiOutcome::UserUpdated {
            user_name: "alice".to_string(),
            result: Err(ApiError::from_status(500, "boom")),
        });

        match &app.modal {
            Some(Modal::EditUser(draft)) => {
                assert!(!draft.saving);
                assert_eq!(draft.error.as_deref(), Some("HTTP 500: boom"));
            }
            _ => panic!("modal should stay open after a failed save"),
        }
    }

    #[test]
    fn test_user_delete_removes_exact_row_and_closes_modal() {
        let (mut app, _rx) = test_app();
        let seq = app.users.begin_fetch();
        app.users.apply_page(
            seq,
            Page {
                items: vec![user("a"), user("b"), user("c")],
                total: 3,
            },
            8,
        );
        app.modal = Some(Modal::edit_user(user("b")));

        app.apply_outcome(ApiOutcome::UserDeleted {
            user_name: "b".to_string(),
            result: Ok(()),
        });

        assert!(app.modal.is_none());
        assert_eq!(app.users.rows.len(), 2);
        assert!(app.users.rows.iter().all(|u| u.user_name != "b"));
    }

    #[test]
    fn test_leaving_dependent_views_clears_handoff() {
        let (mut app, _rx) = test_app();
        app.view = AdminView::Restaurants;
        app.handoff.select(restaurant(5, "Gangnam Grill"));

        // dependent to dependent keeps the selection
        app.set_view(AdminView::Reservations);
        app.set_view(AdminView::Reviews);
        assert_eq!(app.handoff.id(), Some(5));

        // back to a standalone screen drops it and the scoped rows
        let seq = app.reservations.begin_fetch();
        app.reservations.apply_page(
            seq,
            Page {
                items: vec![],
                total: 0,
            },
            8,
        );
        app.set_view(AdminView::Users);
        assert!(app.handoff.id().is_none());
        assert!(app.detail.is_none());
        assert!(app.reservations.rows.is_empty());
    }

    #[test]
    fn test_unauthorized_response_rejects_session() {
        let (mut app, mut rx) = test_app();
        app.view = AdminView::Users;
        app.fetch_users();
        let seq = match rx.try_recv() {
            Ok(ApiCommand::FetchUsers { seq, .. }) => seq,
            other => panic!("expected FetchUsers, got {:?}", other),
        };

        app.apply_outcome(ApiOutcome::Users {
            seq,
            result: Err(ApiError::from_status(401, "expired")),
        });

        assert!(app.session.is_rejected());
        assert!(app.toast.is_some());
        // rows survive the failure, only the verdict changes
        assert!(!app.users.loading);
    }

    #[test]
    fn test_stale_series_granularity_is_discarded() {
        let (mut app, _rx) = test_app();
        app.cycle_granularity(); // Daily -> Weekly

        app.apply_outcome(ApiOutcome::Series {
            granularity: Granularity::Daily,
            result: Ok(vec![ReservationBucket {
                label: "05-21".to_string(),
                count: 4,
            }]),
        });
        assert!(app.dashboard.series.is_empty());
        assert!(app.dashboard.series_loading);

        app.apply_outcome(ApiOutcome::Series {
            granularity: Granularity::Weekly,
            result: Ok(vec![ReservationBucket {
                label: "May w3".to_string(),
                count: 9,
            }]),
        });
        assert_eq!(app.dashboard.series.len(), 1);
        assert!(!app.dashboard.series_loading);
    }

    #[test]
    fn test_selecting_restaurant_jumps_to_reservations() {
        let (mut app, mut rx) = test_app();
        app.view = AdminView::Restaurants;
        let seq = app.restaurants.begin_fetch();
        app.restaurants.apply_page(
            seq,
            Page {
                items: vec![restaurant(1, "A"), restaurant(2, "B")],
                total: 2,
            },
            8,
        );
        app.restaurants.cursor = 1;

        app.select_restaurant();

        assert_eq!(app.view, AdminView::Reservations);
        assert_eq!(app.handoff.id(), Some(2));
        assert!(app.reservations.loading);

        // a reservations fetch and a detail fetch go out
        let mut saw_reservations = false;
        let mut saw_detail = false;
        while let Ok(command) = rx.try_recv() {
            match command {
                ApiCommand::FetchReservations { restaurant_id, .. } => {
                    assert_eq!(restaurant_id, 2);
                    saw_reservations = true;
                }
                ApiCommand::FetchRestaurantDetail { restaurant_id } => {
                    assert_eq!(restaurant_id, 2);
                    saw_detail = true;
                }
                _ => {}
            }
        }
        assert!(saw_reservations);
        assert!(saw_detail);
    }

    #[test]
    fn test_dependent_fetch_without_selection_is_a_no_op() {
        let (mut app, mut rx) = test_app();
        app.fetch_reservations();
        assert!(!app.reservations.loading);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_page_nav_past_edge_fetches_nothing() {
        let (mut app, mut rx) = test_app();
        app.view = AdminView::Users;
        let seq = app.users.begin_fetch();
        app.users.apply_page(
            seq,
            Page {
                items: vec![user("a")],
                total: 16,
            },
            8,
        );

        app.navigate_page(PageNav::Prev);
        assert!(rx.try_recv().is_err());
        assert_eq!(app.users.pagination.current_page(), 1);

        app.navigate_page(PageNav::Next);
        assert_eq!(app.users.pagination.current_page(), 2);
        assert!(matches!(rx.try_recv(), Ok(ApiCommand::FetchUsers { page: 2, .. })));

        app.navigate_page(PageNav::Next);
        assert_eq!(app.users.pagination.current_page(), 2);
        assert!(rx.try_recv().is_err());
    }
}
