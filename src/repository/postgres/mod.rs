//! PostgreSQL storage implementations

mod bookings;
mod comments;
mod items;
mod requests;
mod users;

pub use bookings::PgBookingsRepository;
pub use comments::PgCommentsRepository;
pub use items::PgItemsRepository;
pub use requests::PgRequestsRepository;
pub use users::PgUsersRepository;
