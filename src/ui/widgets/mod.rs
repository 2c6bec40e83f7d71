pub mod avatar;
pub mod review_list;
pub mod status;

pub use self::review_list::render_review_list;
pub use self::status::render_status_line;
