// Modal dialogs for the console
//
// Self-contained overlays that handle their own input and return actions;
// the app just holds Option<Modal> and executes whatever comes back. Each
// edit dialog works on a draft copied from the listed row, so cancelling
// never disturbs the table. While a save is in flight the draft absorbs
// all input; a failed save keeps the dialog open with the draft intact and
// the server's complaint on the error line.

use crate::api::models::{
    NewRestaurant, Reservation, ReservationStatus, User, UserType, FOOD_TYPES,
};
use chrono::NaiveDateTime;
use crossterm::event::KeyCode;
use regex::Regex;
use std::sync::OnceLock;

/// Reservation times are edited in the same shape the backend stores them,
/// minus the seconds
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const PHONE_PATTERN: &str = r"^[0-9]{3}-[0-9]{4}-[0-9]{4}$";

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
}

/// Actions returned by modal input handling
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Input consumed, nothing for the app to do
    None,
    /// Close the modal
    Close,
    /// PUT the edited member
    SaveUser(User),
    /// DELETE the member with this user_name
    DeleteUser(String),
    /// PUT the edited reservation
    SaveReservation(Reservation),
    /// DELETE the confirmed review
    DeleteReview(u64),
    /// POST the completed registration form
    SubmitRestaurant(NewRestaurant),
}

/// Available modal types
pub enum Modal {
    /// Keyboard shortcut reference
    Help,
    /// Member role editor with a delete shortcut
    EditUser(UserDraft),
    /// Reservation editor: status, time, party size, request note
    EditReservation(ReservationDraft),
    /// Delete confirmation for one review
    ConfirmDeleteReview { review_id: u64 },
    /// Restaurant registration form
    AddRestaurant(RestaurantForm),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn edit_user(user: User) -> Self {
        Modal::EditUser(UserDraft::new(user))
    }

    pub fn edit_reservation(reservation: Reservation) -> Self {
        Modal::EditReservation(ReservationDraft::new(reservation))
    }

    pub fn confirm_delete_review(review_id: u64) -> Self {
        Modal::ConfirmDeleteReview { review_id }
    }

    pub fn add_restaurant() -> Self {
        Modal::AddRestaurant(RestaurantForm::new())
    }

    /// Handle keyboard input, return the action for the app to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::EditUser(draft) => draft.handle_input(key),
            Modal::EditReservation(draft) => draft.handle_input(key),
            Modal::ConfirmDeleteReview { review_id } => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    ModalAction::DeleteReview(*review_id)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::AddRestaurant(form) => form.handle_input(key),
        }
    }

    /// Flag the draft as submitted; called by the app right after it
    /// dispatches the save command
    pub fn mark_saving(&mut self) {
        match self {
            Modal::EditUser(draft) => draft.saving = true,
            Modal::EditReservation(draft) => draft.saving = true,
            Modal::AddRestaurant(form) => form.saving = true,
            _ => {}
        }
    }

    /// Reopen the draft for editing after the server rejected the save
    pub fn fail_save(&mut self, message: String) {
        match self {
            Modal::EditUser(draft) => {
                draft.saving = false;
                draft.error = Some(message);
            }
            Modal::EditReservation(draft) => {
                draft.saving = false;
                draft.error = Some(message);
            }
            Modal::AddRestaurant(form) => {
                form.saving = false;
                form.confirming = false;
                form.error = Some(message);
            }
            _ => {}
        }
    }
}

// ─── Member edit ─────────────────────────────────────────────────────────

pub struct UserDraft {
    /// Working copy; the role is edited in place
    pub user: User,
    pub error: Option<String>,
    pub saving: bool,
}

impl UserDraft {
    fn new(user: User) -> Self {
        Self {
            user,
            error: None,
            saving: false,
        }
    }

    fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        if self.saving {
            return ModalAction::None;
        }
        match key {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Right | KeyCode::Char(' ') => {
                self.user.user_type = self.user.user_type.next();
                ModalAction::None
            }
            KeyCode::Left => {
                self.user.user_type = self.user.user_type.prev();
                ModalAction::None
            }
            KeyCode::Enter => ModalAction::SaveUser(self.user.clone()),
            KeyCode::Char('d') => ModalAction::DeleteUser(self.user.user_name.clone()),
            _ => ModalAction::None,
        }
    }
}

// ─── Reservation edit ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationField {
    Status,
    Time,
    People,
    Request,
}

impl ReservationField {
    fn next(self) -> Self {
        match self {
            ReservationField::Status => ReservationField::Time,
            ReservationField::Time => ReservationField::People,
            ReservationField::People => ReservationField::Request,
            ReservationField::Request => ReservationField::Status,
        }
    }

    fn prev(self) -> Self {
        match self {
            ReservationField::Status => ReservationField::Request,
            ReservationField::Time => ReservationField::Status,
            ReservationField::People => ReservationField::Time,
            ReservationField::Request => ReservationField::People,
        }
    }
}

pub struct ReservationDraft {
    /// Original row, kept whole so the update can PUT the full entity
    pub reservation: Reservation,
    pub status: ReservationStatus,
    pub time_input: String,
    pub people_input: String,
    pub request_input: String,
    pub field: ReservationField,
    pub error: Option<String>,
    pub saving: bool,
}

impl ReservationDraft {
    fn new(reservation: Reservation) -> Self {
        Self {
            status: reservation.status,
            time_input: reservation.reservation_time.format(TIME_FORMAT).to_string(),
            people_input: reservation.number_of_people.to_string(),
            request_input: reservation.request.clone(),
            reservation,
            field: ReservationField::Status,
            error: None,
            saving: false,
        }
    }

    fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        if self.saving {
            return ModalAction::None;
        }
        match key {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Tab | KeyCode::Down => {
                self.field = self.field.next();
                ModalAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.field.prev();
                ModalAction::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Left if self.field == ReservationField::Status => {
                self.status = self.status.prev();
                ModalAction::None
            }
            KeyCode::Right if self.field == ReservationField::Status => {
                self.status = self.status.next();
                ModalAction::None
            }
            KeyCode::Char(' ') if self.field == ReservationField::Status => {
                self.status = self.status.next();
                ModalAction::None
            }
            KeyCode::Char(c) => {
                match self.field {
                    ReservationField::Time => {
                        if c.is_ascii_digit() || c == '-' || c == ':' || c == 'T' {
                            self.time_input.push(c);
                        }
                    }
                    ReservationField::People => {
                        if c.is_ascii_digit() {
                            self.people_input.push(c);
                        }
                    }
                    ReservationField::Request => self.request_input.push(c),
                    ReservationField::Status => {}
                }
                ModalAction::None
            }
            KeyCode::Backspace => {
                match self.field {
                    ReservationField::Time => {
                        self.time_input.pop();
                    }
                    ReservationField::People => {
                        self.people_input.pop();
                    }
                    ReservationField::Request => {
                        self.request_input.pop();
                    }
                    ReservationField::Status => {}
                }
                ModalAction::None
            }
            _ => ModalAction::None,
        }
    }

    /// Validate the inputs; bad values stay in the dialog with an error
    /// line instead of going to the server
    fn submit(&mut self) -> ModalAction {
        let time = match NaiveDateTime::parse_from_str(&self.time_input, TIME_FORMAT) {
            Ok(t) => t,
            Err(_) => {
                self.error = Some("time must look like 2024-05-21T18:00".to_string());
                return ModalAction::None;
            }
        };
        let people = match self.people_input.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                self.error = Some("party size must be a positive number".to_string());
                return ModalAction::None;
            }
        };

        self.error = None;
        let mut updated = self.reservation.clone();
        updated.status = self.status;
        updated.reservation_time = time;
        updated.number_of_people = people;
        updated.request = self.request_input.clone();
        ModalAction::SaveReservation(updated)
    }
}

// ─── Restaurant registration ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Phone,
    FoodType,
    Seats,
    Parking,
    City,
    District,
    Neighborhood,
    RoadAddr,
    JibunAddr,
    DetailAddr,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Name,
        FormField::Description,
        FormField::Phone,
        FormField::FoodType,
        FormField::Seats,
        FormField::Parking,
        FormField::City,
        FormField::District,
        FormField::Neighborhood,
        FormField::RoadAddr,
        FormField::JibunAddr,
        FormField::DetailAddr,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::Phone => "Phone",
            FormField::FoodType => "Food type",
            FormField::Seats => "Total seats",
            FormField::Parking => "Parking",
            FormField::City => "City",
            FormField::District => "District",
            FormField::Neighborhood => "Neighborhood",
            FormField::RoadAddr => "Road address",
            FormField::JibunAddr => "Jibun address",
            FormField::DetailAddr => "Address detail",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct RestaurantForm {
    pub name: String,
    pub description: String,
    pub phone: String,
    /// Index into FOOD_TYPES
    pub food_type: usize,
    pub seats_input: String,
    pub parking: bool,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
    pub road_addr: String,
    pub jibun_addr: String,
    pub detail_addr: String,
    pub field: FormField,
    /// Live phone format complaint, shown next to the field
    pub phone_error: Option<String>,
    pub error: Option<String>,
    /// Waiting for the y/n answer before the POST goes out
    pub confirming: bool,
    pub saving: bool,
}

impl RestaurantForm {
    fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            phone: String::new(),
            food_type: 0,
            seats_input: String::new(),
            parking: false,
            city: String::new(),
            district: String::new(),
            neighborhood: String::new(),
            road_addr: String::new(),
            jibun_addr: String::new(),
            detail_addr: String::new(),
            field: FormField::Name,
            phone_error: None,
            error: None,
            confirming: false,
            saving: false,
        }
    }

    pub fn phone_is_valid(&self) -> bool {
        phone_regex().is_match(&self.phone)
    }

    fn revalidate_phone(&mut self) {
        if self.phone.is_empty() || self.phone_is_valid() {
            self.phone_error = None;
        } else {
            self.phone_error = Some("format: 010-1234-5678".to_string());
        }
    }

    fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        if self.saving {
            return ModalAction::None;
        }
        if self.confirming {
            return match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    ModalAction::SubmitRestaurant(self.payload())
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirming = false;
                    ModalAction::None
                }
                _ => ModalAction::None,
            };
        }

        match key {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Tab | KeyCode::Down => {
                self.field = self.field.next();
                ModalAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.field.prev();
                ModalAction::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if matches!(self.field, FormField::FoodType | FormField::Parking) =>
            {
                match self.field {
                    FormField::FoodType => {
                        self.food_type = if key == KeyCode::Left {
                            (self.food_type + FOOD_TYPES.len() - 1) % FOOD_TYPES.len()
                        } else {
                            (self.food_type + 1) % FOOD_TYPES.len()
                        };
                    }
                    FormField::Parking => self.parking = !self.parking,
                    _ => {}
                }
                ModalAction::None
            }
            KeyCode::Char(c) => {
                let field = self.field;
                if let Some(input) = self.focused_input() {
                    let accept = match field {
                        FormField::Seats => c.is_ascii_digit(),
                        FormField::Phone => c.is_ascii_digit() || c == '-',
                        _ => true,
                    };
                    if accept {
                        input.push(c);
                    }
                }
                if self.field == FormField::Phone {
                    self.revalidate_phone();
                }
                ModalAction::None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                if self.field == FormField::Phone {
                    self.revalidate_phone();
                }
                ModalAction::None
            }
            _ => ModalAction::None,
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::Phone => Some(&mut self.phone),
            FormField::Seats => Some(&mut self.seats_input),
            FormField::City => Some(&mut self.city),
            FormField::District => Some(&mut self.district),
            FormField::Neighborhood => Some(&mut self.neighborhood),
            FormField::RoadAddr => Some(&mut self.road_addr),
            FormField::JibunAddr => Some(&mut self.jibun_addr),
            FormField::DetailAddr => Some(&mut self.detail_addr),
            FormField::FoodType | FormField::Parking => None,
        }
    }

    /// An invalid phone blocks submission outright; the other checks are
    /// minimal presence checks
    fn submit(&mut self) -> ModalAction {
        if self.name.trim().is_empty() {
            self.error = Some("name is required".to_string());
            return ModalAction::None;
        }
        if !self.phone_is_valid() {
            self.revalidate_phone();
            if self.phone_error.is_none() {
                self.phone_error = Some("format: 010-1234-5678".to_string());
            }
            self.error = Some("fix the phone number before registering".to_string());
            return ModalAction::None;
        }
        self.error = None;
        self.confirming = true;
        ModalAction::None
    }

    fn payload(&self) -> NewRestaurant {
        NewRestaurant {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            phone: self.phone.clone(),
            food_type: FOOD_TYPES[self.food_type % FOOD_TYPES.len()].to_string(),
            total_seats: self.seats_input.parse().unwrap_or(0),
            parking_available: self.parking,
            city: self.city.clone(),
            district: self.district.clone(),
            neighborhood: self.neighborhood.clone(),
            road_addr: self.road_addr.clone(),
            jibun_addr: self.jibun_addr.clone(),
            detail_addr: self.detail_addr.clone(),
        }
    }

    pub fn food_type_label(&self) -> &'static str {
        FOOD_TYPES[self.food_type % FOOD_TYPES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ReservationUser;

    fn sample_user() -> User {
        User {
            user_name: "alice01".into(),
            name: "Alice".into(),
            email: "a@b.c".into(),
            user_type: UserType::Customer,
        }
    }

    fn sample_reservation() -> Reservation {
        Reservation {
            reservation_id: 7,
            user: Some(ReservationUser {
                email: "g@x.y".into(),
                name: "Guest".into(),
                phone: "010-1234-5678".into(),
            }),
            reservation_time: NaiveDateTime::parse_from_str("2024-05-21T18:00", TIME_FORMAT)
                .unwrap(),
            number_of_people: 2,
            status: ReservationStatus::Pending,
            request: "quiet table".into(),
        }
    }

    fn type_str(modal: &mut Modal, text: &str) {
        for c in text.chars() {
            modal.handle_input(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_user_draft_cycles_role_and_saves_full_entity() {
        let mut modal = Modal::edit_user(sample_user());
        modal.handle_input(KeyCode::Right);

        match modal.handle_input(KeyCode::Enter) {
            ModalAction::SaveUser(user) => {
                assert_eq!(user.user_type, UserType::Admin);
                assert_eq!(user.user_name, "alice01");
                assert_eq!(user.email, "a@b.c");
            }
            other => panic!("expected SaveUser, got {:?}", other),
        }
    }

    #[test]
    fn test_user_draft_delete_carries_user_name() {
        let mut modal = Modal::edit_user(sample_user());
        match modal.handle_input(KeyCode::Char('d')) {
            ModalAction::DeleteUser(name) => assert_eq!(name, "alice01"),
            other => panic!("expected DeleteUser, got {:?}", other),
        }
    }

    #[test]
    fn test_saving_draft_absorbs_input() {
        let mut modal = Modal::edit_user(sample_user());
        modal.mark_saving();
        assert!(matches!(
            modal.handle_input(KeyCode::Esc),
            ModalAction::None
        ));
        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::None
        ));
    }

    #[test]
    fn test_failed_save_keeps_draft_and_shows_error() {
        let mut modal = Modal::edit_user(sample_user());
        modal.handle_input(KeyCode::Right);
        modal.mark_saving();
        modal.fail_save("HTTP 500: boom".to_string());

        match &modal {
            Modal::EditUser(draft) => {
                assert!(!draft.saving);
                assert_eq!(draft.error.as_deref(), Some("HTTP 500: boom"));
                assert_eq!(draft.user.user_type, UserType::Admin);
            }
            _ => panic!("modal variant changed"),
        }
        // editable again
        assert!(matches!(
            modal.handle_input(KeyCode::Esc),
            ModalAction::Close
        ));
    }

    #[test]
    fn test_reservation_bad_time_stays_in_dialog() {
        let mut modal = Modal::edit_reservation(sample_reservation());
        // move to the time field and mangle it
        modal.handle_input(KeyCode::Tab);
        for _ in 0..16 {
            modal.handle_input(KeyCode::Backspace);
        }
        type_str(&mut modal, "2024-13-99");

        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::None
        ));
        match &modal {
            Modal::EditReservation(draft) => assert!(draft.error.is_some()),
            _ => panic!("modal variant changed"),
        }
    }

    #[test]
    fn test_reservation_save_builds_full_entity() {
        let mut modal = Modal::edit_reservation(sample_reservation());
        modal.handle_input(KeyCode::Right); // Pending -> Reserving
        modal.handle_input(KeyCode::Right); // Reserving -> Confirmed

        match modal.handle_input(KeyCode::Enter) {
            ModalAction::SaveReservation(r) => {
                assert_eq!(r.status, ReservationStatus::Confirmed);
                assert_eq!(r.reservation_id, 7);
                assert_eq!(r.number_of_people, 2);
                assert!(r.user.is_some());
            }
            other => panic!("expected SaveReservation, got {:?}", other),
        }
    }

    #[test]
    fn test_review_confirm_yes_and_no() {
        let mut modal = Modal::confirm_delete_review(42);
        assert!(matches!(
            modal.handle_input(KeyCode::Char('y')),
            ModalAction::DeleteReview(42)
        ));

        let mut modal = Modal::confirm_delete_review(42);
        assert!(matches!(
            modal.handle_input(KeyCode::Char('n')),
            ModalAction::Close
        ));
    }

    #[test]
    fn test_form_invalid_phone_blocks_submission() {
        let mut modal = Modal::add_restaurant();
        type_str(&mut modal, "Gangnam Grill");
        // jump to the phone field
        modal.handle_input(KeyCode::Tab);
        modal.handle_input(KeyCode::Tab);
        type_str(&mut modal, "010-123-456");

        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::None
        ));
        match &modal {
            Modal::AddRestaurant(form) => {
                assert!(form.phone_error.is_some());
                assert!(form.error.is_some());
                assert!(!form.confirming);
            }
            _ => panic!("modal variant changed"),
        }
    }

    #[test]
    fn test_form_submits_after_confirmation() {
        let mut modal = Modal::add_restaurant();
        type_str(&mut modal, "Gangnam Grill");
        modal.handle_input(KeyCode::Tab);
        modal.handle_input(KeyCode::Tab);
        type_str(&mut modal, "010-1234-5678");

        // Enter opens the confirmation, y fires the POST
        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::None
        ));
        match modal.handle_input(KeyCode::Char('y')) {
            ModalAction::SubmitRestaurant(payload) => {
                assert_eq!(payload.name, "Gangnam Grill");
                assert_eq!(payload.phone, "010-1234-5678");
                assert_eq!(payload.food_type, "한식");
            }
            other => panic!("expected SubmitRestaurant, got {:?}", other),
        }
    }

    #[test]
    fn test_form_confirmation_can_be_declined() {
        let mut modal = Modal::add_restaurant();
        type_str(&mut modal, "A");
        modal.handle_input(KeyCode::Tab);
        modal.handle_input(KeyCode::Tab);
        type_str(&mut modal, "010-1234-5678");
        modal.handle_input(KeyCode::Enter);

        assert!(matches!(
            modal.handle_input(KeyCode::Char('n')),
            ModalAction::None
        ));
        match &modal {
            Modal::AddRestaurant(form) => assert!(!form.confirming),
            _ => panic!("modal variant changed"),
        }
    }

    #[test]
    fn test_phone_digits_only_filter() {
        let mut modal = Modal::add_restaurant();
        modal.handle_input(KeyCode::Tab);
        modal.handle_input(KeyCode::Tab);
        type_str(&mut modal, "01o-1234-5678x");
        match &modal {
            Modal::AddRestaurant(form) => assert_eq!(form.phone, "01-1234-5678"),
            _ => panic!("modal variant changed"),
        }
    }
}
