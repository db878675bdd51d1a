// Wire models for the reservation platform's admin API
//
// The backend is a Spring service: entity fields arrive in camelCase,
// timestamps are LocalDateTime strings without a timezone, and enums are
// uppercase words. Derived Serialize impls produce exactly the shapes the
// update endpoints expect, so edited entities can be PUT back whole.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Platform account roles, cycled through in the member edit dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Admin,
    Owner,
    Customer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::Owner => "OWNER",
            UserType::Customer => "CUSTOMER",
        }
    }

    /// Next role in the pick list
    pub fn next(self) -> Self {
        match self {
            UserType::Admin => UserType::Owner,
            UserType::Owner => UserType::Customer,
            UserType::Customer => UserType::Admin,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            UserType::Admin => UserType::Customer,
            UserType::Owner => UserType::Admin,
            UserType::Customer => UserType::Owner,
        }
    }
}

/// A member account. `user_name` doubles as the identifier in the
/// membership update and delete paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub user_type: UserType,
}

/// A restaurant row as the list and detail endpoints return it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub restaurant_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub food_type: String,
    #[serde(default)]
    pub total_seats: u32,
    #[serde(default)]
    pub parking_available: bool,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub road_addr: String,
    #[serde(default)]
    pub jibun_addr: String,
    #[serde(default)]
    pub detail_addr: String,
}

/// Payload for registering a new restaurant. No id: the backend assigns one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub food_type: String,
    pub total_seats: u32,
    pub parking_available: bool,
    pub city: String,
    pub district: String,
    pub neighborhood: String,
    pub road_addr: String,
    pub jibun_addr: String,
    pub detail_addr: String,
}

/// Food categories the platform recognizes, in registration-form order
pub const FOOD_TYPES: [&str; 8] = [
    "한식",
    "일식",
    "양식",
    "중식",
    "디저트",
    "고기",
    "비건",
    "해산물",
];

/// Reservation lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Pending,
    Reserving,
    Confirmed,
    Complete,
    CancelRequest,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending payment",
            ReservationStatus::Reserving => "reserving",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Complete => "visit complete",
            ReservationStatus::CancelRequest => "cancel requested",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no-show",
        }
    }

    /// Next state in the edit dialog's pick list
    pub fn next(self) -> Self {
        match self {
            ReservationStatus::Pending => ReservationStatus::Reserving,
            ReservationStatus::Reserving => ReservationStatus::Confirmed,
            ReservationStatus::Confirmed => ReservationStatus::Complete,
            ReservationStatus::Complete => ReservationStatus::CancelRequest,
            ReservationStatus::CancelRequest => ReservationStatus::Cancelled,
            ReservationStatus::Cancelled => ReservationStatus::NoShow,
            ReservationStatus::NoShow => ReservationStatus::Pending,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ReservationStatus::Pending => ReservationStatus::NoShow,
            ReservationStatus::Reserving => ReservationStatus::Pending,
            ReservationStatus::Confirmed => ReservationStatus::Reserving,
            ReservationStatus::Complete => ReservationStatus::Confirmed,
            ReservationStatus::CancelRequest => ReservationStatus::Complete,
            ReservationStatus::Cancelled => ReservationStatus::CancelRequest,
            ReservationStatus::NoShow => ReservationStatus::Cancelled,
        }
    }
}

/// The guest a reservation belongs to. Detached accounts leave it null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// A reservation row. Serialized whole for the manager update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: u64,
    #[serde(default)]
    pub user: Option<ReservationUser>,
    pub reservation_time: NaiveDateTime,
    pub number_of_people: u32,
    pub status: ReservationStatus,
    #[serde(default)]
    pub request: String,
}

/// A review as the per-restaurant review endpoint returns it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub rating: f64,
    pub review_content: String,
    pub created_at: NaiveDateTime,
}

/// A review report. The report controller mixes naming conventions, so
/// fields are renamed individually rather than with a container rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    #[serde(rename = "reportId")]
    pub report_id: u64,
    pub user_name: String,
    pub review_content: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Sort direction for the review list, by creation date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Value of the `order` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Detail payload for a single restaurant
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    #[serde(default)]
    pub restaurant_img: Vec<RestaurantImage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantImage {
    pub image_url: String,
}

/// Entity counts for the dashboard header cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardCounts {
    pub restaurants: u64,
    pub reservations: u64,
    pub reviews: u64,
    pub users: u64,
}

/// Time bucketing for the reservation volume chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Path segment under /api/admin/ serving this series
    pub fn as_path(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Granularity::Daily => Granularity::Weekly,
            Granularity::Weekly => Granularity::Monthly,
            Granularity::Monthly => Granularity::Daily,
        }
    }
}

/// One bar of the reservation volume chart, with a display-ready label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationBucket {
    pub label: String,
    pub count: u64,
}

/// Daily series element: `{"date": "2024-05-21", "count": 3}`
#[derive(Debug, Deserialize)]
pub(crate) struct DailyBucket {
    pub date: String,
    pub count: u64,
}

impl From<DailyBucket> for ReservationBucket {
    fn from(raw: DailyBucket) -> Self {
        // "2024-05-21" displays as "05-21"
        let label = match raw.date.get(5..) {
            Some(md) if !md.is_empty() => md.to_string(),
            _ => raw.date.clone(),
        };
        ReservationBucket {
            label,
            count: raw.count,
        }
    }
}

/// Weekly series element: `{"week": "202421", "count": 7}` where the key is
/// a year followed by a week-of-year number
#[derive(Debug, Deserialize)]
pub(crate) struct WeeklyBucket {
    pub week: String,
    pub count: u64,
}

impl From<WeeklyBucket> for ReservationBucket {
    fn from(raw: WeeklyBucket) -> Self {
        let label = weekly_label(&raw.week).unwrap_or_else(|| raw.week.clone());
        ReservationBucket {
            label,
            count: raw.count,
        }
    }
}

/// "202421" becomes "May w3": week 21 of 2024 starts around May 20, which
/// falls in the third week of May
fn weekly_label(week_key: &str) -> Option<String> {
    let year: i32 = week_key.get(..4)?.parse().ok()?;
    let week: u32 = week_key.get(4..)?.parse().ok()?;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?
        .checked_add_signed(chrono::Duration::days((week.saturating_sub(1) as i64) * 7))?;
    let week_of_month = (start.day() + 6) / 7;
    Some(format!("{} w{}", start.format("%b"), week_of_month))
}

/// Monthly series element: `{"month": "2024-05", "count": 31}`
#[derive(Debug, Deserialize)]
pub(crate) struct MonthlyBucket {
    pub month: String,
    pub count: u64,
}

impl From<MonthlyBucket> for ReservationBucket {
    fn from(raw: MonthlyBucket) -> Self {
        let label = monthly_label(&raw.month).unwrap_or_else(|| raw.month.clone());
        ReservationBucket {
            label,
            count: raw.count,
        }
    }
}

/// "2024-05" becomes "May"
fn monthly_label(month_key: &str) -> Option<String> {
    let month: u32 = month_key.split('-').nth(1)?.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(2000, month, 1)?;
    Some(date.format("%b").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decodes_camel_case() {
        let user: User = serde_json::from_str(
            r#"{"userName": "alice01", "name": "Alice", "email": "a@b.c", "userType": "OWNER"}"#,
        )
        .unwrap();
        assert_eq!(user.user_name, "alice01");
        assert_eq!(user.user_type, UserType::Owner);
    }

    #[test]
    fn test_user_type_cycle_covers_all_roles() {
        let start = UserType::Admin;
        assert_eq!(start.next(), UserType::Owner);
        assert_eq!(start.next().next(), UserType::Customer);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_reservation_status_wire_names() {
        let decoded: ReservationStatus = serde_json::from_str(r#""CANCELREQUEST""#).unwrap();
        assert_eq!(decoded, ReservationStatus::CancelRequest);
        assert_eq!(
            serde_json::to_string(&ReservationStatus::NoShow).unwrap(),
            r#""NOSHOW""#
        );
    }

    #[test]
    fn test_reservation_decodes_spring_datetime() {
        let json = r#"{
            "reservationId": 12,
            "user": {"email": "g@x.y", "name": "Guest", "phone": "010-1234-5678"},
            "reservationTime": "2024-05-21T18:00:00",
            "numberOfPeople": 4,
            "status": "CONFIRMED",
            "request": "window seat"
        }"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.reservation_id, 12);
        assert_eq!(r.reservation_time.to_string(), "2024-05-21 18:00:00");
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_reservation_tolerates_null_user() {
        let json = r#"{
            "reservationId": 3,
            "user": null,
            "reservationTime": "2024-06-01T12:30:00",
            "numberOfPeople": 2,
            "status": "PENDING"
        }"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert!(r.user.is_none());
        assert_eq!(r.request, "");
    }

    #[test]
    fn test_report_mixed_field_names() {
        let json = r#"{
            "reportId": 9,
            "user_name": "bob",
            "review_content": "spam",
            "reason": "abuse",
            "status": "처리중",
            "created_at": "2024-06-02T09:00:00"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.report_id, 9);
        assert_eq!(report.user_name, "bob");
        assert_eq!(report.status, "처리중");
    }

    #[test]
    fn test_restaurant_detail_decode() {
        let json = r#"{
            "restaurant": {"restaurantId": 5, "name": "강남불백집", "phone": "02-111-2222"},
            "restaurantImg": [{"imageUrl": "http://cdn/img1.jpg"}]
        }"#;
        let detail: RestaurantDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.restaurant.restaurant_id, 5);
        assert_eq!(detail.restaurant_img[0].image_url, "http://cdn/img1.jpg");
    }

    #[test]
    fn test_new_restaurant_serializes_camel_case() {
        let payload = NewRestaurant {
            name: "Test".into(),
            food_type: FOOD_TYPES[0].into(),
            parking_available: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""foodType":"한식""#));
        assert!(json.contains(r#""parkingAvailable":true"#));
        assert!(json.contains(r#""roadAddr":"""#));
    }

    #[test]
    fn test_daily_bucket_label() {
        let bucket: ReservationBucket = DailyBucket {
            date: "2024-05-21".into(),
            count: 3,
        }
        .into();
        assert_eq!(bucket.label, "05-21");
        assert_eq!(bucket.count, 3);
    }

    #[test]
    fn test_weekly_bucket_label() {
        // Week 21 of 2024 starts on May 20, the third week of May
        let bucket: ReservationBucket = WeeklyBucket {
            week: "202421".into(),
            count: 7,
        }
        .into();
        assert_eq!(bucket.label, "May w3");
    }

    #[test]
    fn test_weekly_bucket_bad_key_falls_back() {
        let bucket: ReservationBucket = WeeklyBucket {
            week: "??".into(),
            count: 1,
        }
        .into();
        assert_eq!(bucket.label, "??");
    }

    #[test]
    fn test_monthly_bucket_label() {
        let bucket: ReservationBucket = MonthlyBucket {
            month: "2024-05".into(),
            count: 31,
        }
        .into();
        assert_eq!(bucket.label, "May");
    }

    #[test]
    fn test_granularity_cycle() {
        assert_eq!(Granularity::Daily.next(), Granularity::Weekly);
        assert_eq!(Granularity::Monthly.next(), Granularity::Daily);
        assert_eq!(Granularity::Weekly.as_path(), "weekly");
    }
}
