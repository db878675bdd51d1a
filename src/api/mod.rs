// HTTP client for the reservation platform's admin API
//
// One `ApiClient` is shared by the whole app. Every request carries the
// operator's bearer token; every response body is read as text first so a
// failed decode can be told apart from a transport error and the raw body
// can travel with status errors.

pub mod error;
pub mod models;
pub mod page;

pub use error::ApiError;
pub use page::Page;

use models::{
    DailyBucket, DashboardCounts, Granularity, MonthlyBucket, NewRestaurant, Report, Reservation,
    ReservationBucket, Restaurant, RestaurantDetail, Review, SortOrder, User, WeeklyBucket,
};
use page::RawPage;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request timeout. Admin endpoints answer quickly; anything slower is
/// treated as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        tracing::debug!("API client ready for {}", base_url);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON document with bearer auth
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Read the body as text, then decode. Keeps the raw body available for
    /// status errors and distinguishes decode failures from transport ones.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Check a mutation response, discarding any success body
    async fn check(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(())
    }

    pub async fn list_users(
        &self,
        page: u32,
        size: u32,
        keyword: &str,
    ) -> Result<Page<User>, ApiError> {
        let raw: RawPage<User> = self
            .get_json(
                "/api/admin/membership",
                &[
                    ("keyword", keyword.to_string()),
                    ("page", page.to_string()),
                    ("size", size.to_string()),
                ],
            )
            .await?;
        Ok(raw.normalize(size))
    }

    /// The restaurant search parameter is `name`, unlike membership's
    /// `keyword`
    pub async fn list_restaurants(
        &self,
        page: u32,
        size: u32,
        keyword: &str,
    ) -> Result<Page<Restaurant>, ApiError> {
        let raw: RawPage<Restaurant> = self
            .get_json(
                "/api/restaurants",
                &[
                    ("name", keyword.to_string()),
                    ("page", page.to_string()),
                    ("size", size.to_string()),
                ],
            )
            .await?;
        Ok(raw.normalize(size))
    }

    pub async fn list_reservations(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Reservation>, ApiError> {
        let path = format!("/api/reservations/manager/{}", restaurant_id);
        let raw: RawPage<Reservation> = self
            .get_json(
                &path,
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;
        Ok(raw.normalize(size))
    }

    pub async fn list_reviews(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
        order: SortOrder,
    ) -> Result<Page<Review>, ApiError> {
        let path = format!("/api/restaurants/{}/reviews", restaurant_id);
        let raw: RawPage<Review> = self
            .get_json(
                &path,
                &[
                    ("page", page.to_string()),
                    ("size", size.to_string()),
                    ("order", order.as_param().to_string()),
                ],
            )
            .await?;
        Ok(raw.normalize(size))
    }

    pub async fn list_reports(
        &self,
        restaurant_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Report>, ApiError> {
        let path = format!("/api/reports/{}", restaurant_id);
        let raw: RawPage<Report> = self
            .get_json(
                &path,
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;
        Ok(raw.normalize(size))
    }

    pub async fn restaurant_detail(
        &self,
        restaurant_id: u64,
    ) -> Result<RestaurantDetail, ApiError> {
        let path = format!("/api/restaurants/{}", restaurant_id);
        self.get_json(&path, &[]).await
    }

    /// Replace a member whole. The membership endpoints key on `user_name`.
    pub async fn update_user(&self, user: &User) -> Result<(), ApiError> {
        let path = format!("/api/admin/membership/{}", user.user_name);
        let response = self
            .http
            .put(self.url(&path))
            .bearer_auth(&self.token)
            .json(user)
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn update_reservation(&self, reservation: &Reservation) -> Result<(), ApiError> {
        let path = format!("/api/reservations/manager/{}", reservation.reservation_id);
        let response = self
            .http
            .put(self.url(&path))
            .bearer_auth(&self.token)
            .json(reservation)
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn create_restaurant(&self, restaurant: &NewRestaurant) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/restaurants"))
            .bearer_auth(&self.token)
            .json(restaurant)
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn delete_user(&self, user_name: &str) -> Result<(), ApiError> {
        let path = format!("/api/admin/membership/{}", user_name);
        self.delete(&path).await
    }

    pub async fn delete_reservation(&self, reservation_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/reservations/manager/{}", reservation_id);
        self.delete(&path).await
    }

    pub async fn delete_review(&self, review_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/reviews/{}", review_id);
        self.delete(&path).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check(response).await
    }

    pub async fn dashboard_counts(&self) -> Result<DashboardCounts, ApiError> {
        self.get_json("/api/admin/dashboard", &[]).await
    }

    /// Reservation volume series for the dashboard chart. Each granularity
    /// has its own raw element shape; all are normalized to labeled buckets.
    pub async fn reservation_series(
        &self,
        granularity: Granularity,
    ) -> Result<Vec<ReservationBucket>, ApiError> {
        let path = format!("/api/admin/{}", granularity.as_path());
        let buckets = match granularity {
            Granularity::Daily => {
                let raw: Vec<DailyBucket> = self.get_json(&path, &[]).await?;
                raw.into_iter().map(Into::into).collect()
            }
            Granularity::Weekly => {
                let raw: Vec<WeeklyBucket> = self.get_json(&path, &[]).await?;
                raw.into_iter().map(Into::into).collect()
            }
            Granularity::Monthly => {
                let raw: Vec<MonthlyBucket> = self.get_json(&path, &[]).await?;
                raw.into_iter().map(Into::into).collect()
            }
        };
        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/", "tok").unwrap();
        assert_eq!(
            client.url("/api/admin/dashboard"),
            "http://localhost:8080/api/admin/dashboard"
        );
    }
}
