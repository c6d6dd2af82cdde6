pub mod delete;
pub mod education;
pub mod experience;
pub mod me;
pub mod upsert;
pub mod utils;

// Re-export handler functions for use in routing
pub use delete::delete as profile_delete;
pub use education::delete as education_delete;
pub use education::put as education_put;
pub use experience::delete as experience_delete;
pub use experience::put as experience_put;
pub use me::get as me_get;
pub use upsert::post as profile_post;
