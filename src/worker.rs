// Background API worker
//
// The render loop never blocks on HTTP. Screens push commands into a
// channel; the worker runs each one in its own task and sends the outcome
// back tagged with the stamp the screen attached. Because every command
// gets its own task, overlapping requests genuinely race, and it is the
// sequence stamps that decide which answer wins.

use crate::api::models::{
    DashboardCounts, Granularity, NewRestaurant, Report, Reservation, ReservationBucket,
    Restaurant, RestaurantDetail, Review, SortOrder, User,
};
use crate::api::{ApiClient, ApiError, Page};
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 64;

/// Requests the UI can make of the backend
#[derive(Debug)]
pub enum ApiCommand {
    FetchUsers {
        page: u32,
        page_size: u32,
        keyword: String,
        seq: u64,
    },
    FetchRestaurants {
        page: u32,
        page_size: u32,
        keyword: String,
        seq: u64,
    },
    FetchReservations {
        restaurant_id: u64,
        page: u32,
        page_size: u32,
        seq: u64,
    },
    FetchReviews {
        restaurant_id: u64,
        page: u32,
        page_size: u32,
        order: SortOrder,
        seq: u64,
    },
    FetchReports {
        restaurant_id: u64,
        page: u32,
        page_size: u32,
        seq: u64,
    },
    FetchRestaurantDetail {
        restaurant_id: u64,
    },
    FetchDashboard,
    FetchSeries {
        granularity: Granularity,
    },
    UpdateUser {
        user: User,
    },
    UpdateReservation {
        reservation: Reservation,
    },
    CreateRestaurant {
        restaurant: NewRestaurant,
    },
    DeleteUser {
        user_name: String,
    },
    DeleteReservation {
        reservation_id: u64,
    },
    DeleteReview {
        review_id: u64,
    },
}

/// Answers flowing back to the UI. Fetch outcomes carry the stamp of the
/// command that produced them; mutation outcomes carry the entity key so
/// the screen can update the right row.
#[derive(Debug)]
pub enum ApiOutcome {
    Users {
        seq: u64,
        result: Result<Page<User>, ApiError>,
    },
    Restaurants {
        seq: u64,
        result: Result<Page<Restaurant>, ApiError>,
    },
    Reservations {
        seq: u64,
        result: Result<Page<Reservation>, ApiError>,
    },
    Reviews {
        seq: u64,
        result: Result<Page<Review>, ApiError>,
    },
    Reports {
        seq: u64,
        result: Result<Page<Report>, ApiError>,
    },
    RestaurantDetail {
        result: Result<RestaurantDetail, ApiError>,
    },
    Dashboard {
        result: Result<DashboardCounts, ApiError>,
    },
    Series {
        granularity: Granularity,
        result: Result<Vec<ReservationBucket>, ApiError>,
    },
    UserUpdated {
        user_name: String,
        result: Result<(), ApiError>,
    },
    ReservationUpdated {
        reservation_id: u64,
        result: Result<(), ApiError>,
    },
    RestaurantCreated {
        result: Result<(), ApiError>,
    },
    UserDeleted {
        user_name: String,
        result: Result<(), ApiError>,
    },
    ReservationDeleted {
        reservation_id: u64,
        result: Result<(), ApiError>,
    },
    ReviewDeleted {
        review_id: u64,
        result: Result<(), ApiError>,
    },
}

/// Start the worker. Returns the command sender for the UI and the outcome
/// receiver the render loop selects on.
pub fn spawn(client: ApiClient) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiOutcome>) {
    let (command_tx, mut command_rx) = mpsc::channel::<ApiCommand>(CHANNEL_CAPACITY);
    let (outcome_tx, outcome_rx) = mpsc::channel::<ApiOutcome>(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            let client = client.clone();
            let tx = outcome_tx.clone();
            tokio::spawn(async move {
                let outcome = run_command(&client, command).await;
                if tx.send(outcome).await.is_err() {
                    tracing::debug!("outcome dropped, UI receiver is gone");
                }
            });
        }
        tracing::debug!("API worker stopped, command channel closed");
    });

    (command_tx, outcome_rx)
}

async fn run_command(client: &ApiClient, command: ApiCommand) -> ApiOutcome {
    match command {
        ApiCommand::FetchUsers {
            page,
            page_size,
            keyword,
            seq,
        } => {
            tracing::debug!("fetch users page {} seq {}", page, seq);
            let result = client.list_users(page, page_size, &keyword).await;
            ApiOutcome::Users { seq, result }
        }
        ApiCommand::FetchRestaurants {
            page,
            page_size,
            keyword,
            seq,
        } => {
            tracing::debug!("fetch restaurants page {} seq {}", page, seq);
            let result = client.list_restaurants(page, page_size, &keyword).await;
            ApiOutcome::Restaurants { seq, result }
        }
        ApiCommand::FetchReservations {
            restaurant_id,
            page,
            page_size,
            seq,
        } => {
            tracing::debug!(
                "fetch reservations for restaurant {} page {} seq {}",
                restaurant_id,
                page,
                seq
            );
            let result = client.list_reservations(restaurant_id, page, page_size).await;
            ApiOutcome::Reservations { seq, result }
        }
        ApiCommand::FetchReviews {
            restaurant_id,
            page,
            page_size,
            order,
            seq,
        } => {
            tracing::debug!(
                "fetch reviews for restaurant {} page {} order {} seq {}",
                restaurant_id,
                page,
                order.as_param(),
                seq
            );
            let result = client
                .list_reviews(restaurant_id, page, page_size, order)
                .await;
            ApiOutcome::Reviews { seq, result }
        }
        ApiCommand::FetchReports {
            restaurant_id,
            page,
            page_size,
            seq,
        } => {
            tracing::debug!(
                "fetch reports for restaurant {} page {} seq {}",
                restaurant_id,
                page,
                seq
            );
            let result = client.list_reports(restaurant_id, page, page_size).await;
            ApiOutcome::Reports { seq, result }
        }
        ApiCommand::FetchRestaurantDetail { restaurant_id } => {
            let result = client.restaurant_detail(restaurant_id).await;
            ApiOutcome::RestaurantDetail { result }
        }
        ApiCommand::FetchDashboard => {
            let result = client.dashboard_counts().await;
            ApiOutcome::Dashboard { result }
        }
        ApiCommand::FetchSeries { granularity } => {
            let result = client.reservation_series(granularity).await;
            ApiOutcome::Series {
                granularity,
                result,
            }
        }
        ApiCommand::UpdateUser { user } => {
            let user_name = user.user_name.clone();
            let result = client.update_user(&user).await;
            ApiOutcome::UserUpdated { user_name, result }
        }
        ApiCommand::UpdateReservation { reservation } => {
            let reservation_id = reservation.reservation_id;
            let result = client.update_reservation(&reservation).await;
            ApiOutcome::ReservationUpdated {
                reservation_id,
                result,
            }
        }
        ApiCommand::CreateRestaurant { restaurant } => {
            let result = client.create_restaurant(&restaurant).await;
            ApiOutcome::RestaurantCreated { result }
        }
        ApiCommand::DeleteUser { user_name } => {
            let result = client.delete_user(&user_name).await;
            ApiOutcome::UserDeleted { user_name, result }
        }
        ApiCommand::DeleteReservation { reservation_id } => {
            let result = client.delete_reservation(reservation_id).await;
            ApiOutcome::ReservationDeleted {
                reservation_id,
                result,
            }
        }
        ApiCommand::DeleteReview { review_id } => {
            let result = client.delete_review(review_id).await;
            ApiOutcome::ReviewDeleted { review_id, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_worker_shuts_down_when_commands_close() {
        let client = ApiClient::new("http://localhost:9", "tok").unwrap();
        let (command_tx, mut outcome_rx) = spawn(client);

        drop(command_tx);
        assert!(outcome_rx.recv().await.is_none());
    }
}
