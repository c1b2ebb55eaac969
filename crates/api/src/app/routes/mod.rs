use axum::Router;

pub mod auth;
pub mod expenses;
pub mod inventory;
pub mod reports;
pub mod sales;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/inventory", inventory::router())
        .nest("/sales", sales::router())
        .nest("/expenses", expenses::router())
        .nest("/reports", reports::router())
}
