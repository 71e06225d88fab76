mod session;
mod source;

pub use session::TokenSession;
pub use source::DashboardSource;
pub use source::FixtureSource;
pub use source::LiveSource;
pub use source::current_book;
pub use source::recent_posts;
pub use source::shoe_rotation;
