pub mod not_found;
pub mod user;
pub mod viewer;

pub use not_found::NotFoundPage;
pub use user::UserPage;
pub use viewer::ViewerPage;
