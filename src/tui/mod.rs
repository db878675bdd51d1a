// Terminal lifecycle and the event loop
//
// Raw-mode and alternate-screen setup wrap a tokio::select! loop that
// multiplexes keyboard input, a redraw tick and API worker outcomes.
// Key dispatch is layered: modal, then the search prompt, then global
// keys, then whatever the active view binds.

pub mod app;
pub mod components;
pub mod modal;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::logging::LogRing;
use crate::session::{Session, SessionStatus};
use crate::worker::{ApiCommand, ApiOutcome};
use anyhow::{Context, Result};
use app::{AdminView, App, PageNav};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Take over the terminal, drive the event loop, put everything back.
pub async fn run_tui(
    mut outcome_rx: mpsc::Receiver<ApiOutcome>,
    command_tx: mpsc::Sender<ApiCommand>,
    log_buffer: LogRing,
    config: Config,
    session: Session,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create the terminal")?;

    let mut app = App::with_config(log_buffer, config, session, command_tx);

    // Kick off the first fetch; the response also settles the session status
    app.refresh_view();

    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;

    // Undo the takeover before surfacing any loop error
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave the alternate screen")?;
    terminal.show_cursor().context("Failed to restore the cursor")?;

    result
}

/// One iteration per wakeup: draw, then wait on input, the redraw tick
/// or a worker outcome, whichever lands first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::Receiver<ApiOutcome>,
) -> Result<()> {
    // Spinner frames advance on this cadence
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw the frame")?;

        tokio::select! {
            // Crossterm input, polled with a short timeout so this arm
            // never parks the loop
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(outcome) = outcome_rx.recv() => {
                app.apply_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered key dispatch: modal, search prompt, global, then the view
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // An open dialog swallows everything
    if handle_modal_input(app, &key_event) {
        return;
    }

    // The search prompt captures typing while open
    if handle_search_input(app, &key_event) {
        return;
    }

    // Global keys work on every screen
    if handle_global_keys(app, &key_event) {
        return;
    }

    handle_view_keys(app, &key_event);
}

/// Handle modal input - returns true if the modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => {
            app.modal = None;
        }
        ModalAction::SaveUser(user) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.mark_saving();
            }
            app.send(ApiCommand::UpdateUser { user });
        }
        ModalAction::DeleteUser(user_name) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.mark_saving();
            }
            app.send(ApiCommand::DeleteUser { user_name });
        }
        ModalAction::SaveReservation(reservation) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.mark_saving();
            }
            app.send(ApiCommand::UpdateReservation { reservation });
        }
        ModalAction::SubmitRestaurant(restaurant) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.mark_saving();
            }
            app.send(ApiCommand::CreateRestaurant { restaurant });
        }
        // Confirmed review deletes close immediately; the row disappears when
        // the worker reports success
        ModalAction::DeleteReview(review_id) => {
            app.modal = None;
            app.send(ApiCommand::DeleteReview { review_id });
        }
    }
    true
}

/// Handle typing while the search prompt is open
fn handle_search_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.search.is_none() {
        return false;
    }

    match key_event.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => {
            if let Some(buffer) = app.search.as_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = app.search.as_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
    true
}

/// Handle global keys - returns true if the key was consumed
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('?') => {
            app.modal = Some(Modal::help());
            true
        }
        // Screen switching - Tab cycles, digits and F-keys jump
        KeyCode::Tab => {
            app.next_view();
            true
        }
        KeyCode::BackTab => {
            app.prev_view();
            true
        }
        KeyCode::F(n @ 1..=6) => {
            app.set_view(view_for_index(n as usize));
            true
        }
        KeyCode::Char(c @ '1'..='6') => {
            app.set_view(view_for_index(c as usize - '0' as usize));
            true
        }
        // Refresh; also the retry path when the session was rejected
        KeyCode::Char('r') => {
            app.refresh_view();
            true
        }
        KeyCode::Char('L') => {
            app.toggle_logs();
            true
        }
        KeyCode::Char('T') => {
            app.toggle_theme();
            true
        }
        _ => false,
    }
}

fn view_for_index(n: usize) -> AdminView {
    match n {
        1 => AdminView::Dashboard,
        2 => AdminView::Users,
        3 => AdminView::Restaurants,
        4 => AdminView::Reservations,
        5 => AdminView::Reviews,
        _ => AdminView::Reports,
    }
}

/// Handle view-specific keys
fn handle_view_keys(app: &mut App, key_event: &KeyEvent) {
    // The content area is hidden until the session resolves; its keys
    // stay inert for the same stretch
    if app.session.status() != SessionStatus::Valid {
        return;
    }

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Left | KeyCode::Char('h') => app.navigate_page(PageNav::Prev),
        KeyCode::Right | KeyCode::Char('l') => app.navigate_page(PageNav::Next),
        KeyCode::Char('[') => app.navigate_page(PageNav::PrevGroup),
        KeyCode::Char(']') => app.navigate_page(PageNav::NextGroup),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Enter => match app.view {
            AdminView::Users => {
                if let Some(user) = app.users.selected() {
                    app.modal = Some(Modal::edit_user(user.clone()));
                }
            }
            AdminView::Restaurants => app.select_restaurant(),
            AdminView::Reservations => {
                if let Some(reservation) = app.reservations.selected() {
                    app.modal = Some(Modal::edit_reservation(reservation.clone()));
                }
            }
            _ => {}
        },
        KeyCode::Char('a') => {
            if app.view == AdminView::Restaurants {
                app.modal = Some(Modal::add_restaurant());
            }
        }
        KeyCode::Char('x') => match app.view {
            // Reservation deletes skip the confirm dialog; the platform keeps
            // a cancellation trail on the backend side
            AdminView::Reservations => {
                if let Some(reservation) = app.reservations.selected() {
                    let reservation_id = reservation.reservation_id;
                    app.send(ApiCommand::DeleteReservation { reservation_id });
                }
            }
            AdminView::Reviews => {
                if let Some(review) = app.reviews.selected() {
                    app.modal = Some(Modal::confirm_delete_review(review.review_id));
                }
            }
            _ => {}
        },
        KeyCode::Char('s') => {
            if app.view == AdminView::Reviews {
                app.toggle_review_order();
            }
        }
        KeyCode::Char('g') => {
            if app.view == AdminView::Dashboard {
                app.cycle_granularity();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Restaurant, User, UserType};
    use crate::api::page::Page;
    use crate::session::Session;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_restaurant(id: u64, name: &str) -> Restaurant {
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

    fn validated_app() -> (App, mpsc::Receiver<ApiCommand>) {
        let (mut app, rx) = test_app();
        app.session.observe_status(200);
        (app, rx)
    }

    fn sample_user() -> User {
        User {
            user_name: "mkim".to_string(),
            name: "Minji Kim".to_string(),
            email: "mkim@example.com".to_string(),
            user_type: UserType::Customer,
        }
    }

    #[test]
    fn test_q_quits() {
        let (mut app, _rx) = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_question_mark_toggles_help() {
        let (mut app, _rx) = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('?')));
        assert!(matches!(app.modal, Some(Modal::Help)));
        // Second press routes through the modal layer and closes it
        handle_key_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_digits_jump_between_screens() {
        let (mut app, _rx) = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.view, AdminView::Users);
        handle_key_event(&mut app, press(KeyCode::F(3)));
        assert_eq!(app.view, AdminView::Restaurants);
        handle_key_event(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.view, AdminView::Dashboard);
    }

    #[test]
    fn test_view_keys_are_inert_until_session_resolves() {
        let (mut app, mut rx) = test_app();
        app.set_view(AdminView::Users);
        while rx.try_recv().is_ok() {}

        // Still pending: Enter must not open an edit dialog
        let seq = app.users.begin_fetch();
        app.users.apply_page(
            seq,
            Page {
                items: vec![sample_user()],
                total: 1,
            },
            8,
        );
        handle_key_event(&mut app, press(KeyCode::Enter));
        assert!(app.modal.is_none());

        app.session.observe_status(200);
        handle_key_event(&mut app, press(KeyCode::Enter));
        assert!(matches!(app.modal, Some(Modal::EditUser(_))));
    }

    #[test]
    fn test_search_prompt_captures_digits() {
        let (mut app, mut rx) = validated_app();
        app.set_view(AdminView::Users);
        while rx.try_recv().is_ok() {}

        handle_key_event(&mut app, press(KeyCode::Char('/')));
        handle_key_event(&mut app, press(KeyCode::Char('5')));
        handle_key_event(&mut app, press(KeyCode::Char('b')));

        // '5' went into the buffer instead of switching screens
        assert_eq!(app.view, AdminView::Users);
        assert_eq!(app.search.as_deref(), Some("5b"));

        handle_key_event(&mut app, press(KeyCode::Esc));
        assert!(app.search.is_none());
    }

    #[test]
    fn test_delete_key_on_reviews_asks_first() {
        let (mut app, mut rx) = validated_app();
        app.handoff.select(sample_restaurant(7, "강남불백집"));
        app.set_view(AdminView::Reviews);
        while rx.try_recv().is_ok() {}

        let seq = app.reviews.begin_fetch();
        app.reviews.apply_page(
            seq,
            Page {
                items: vec![crate::api::models::Review {
                    review_id: 91,
                    user_id: 4,
                    user_name: Some("mkim".to_string()),
                    rating: 4.0,
                    review_content: "fine".to_string(),
                    created_at: chrono::Utc::now().naive_utc(),
                }],
                total: 1,
            },
            8,
        );

        handle_key_event(&mut app, press(KeyCode::Char('x')));
        assert!(matches!(
            app.modal,
            Some(Modal::ConfirmDeleteReview { review_id: 91 })
        ));
        // Nothing was sent yet
        assert!(rx.try_recv().is_err());

        // Confirming fires the delete and closes the dialog
        handle_key_event(&mut app, press(KeyCode::Char('y')));
        assert!(app.modal.is_none());
        assert!(matches!(
            rx.try_recv(),
            Ok(ApiCommand::DeleteReview { review_id: 91 })
        ));
    }

    #[test]
    fn test_modal_blocks_screen_switching() {
        let (mut app, _rx) = validated_app();
        app.modal = Some(Modal::edit_user(sample_user()));
        handle_key_event(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.view, AdminView::Dashboard);
        assert!(app.modal.is_some());
    }
}
