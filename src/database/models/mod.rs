pub mod profile;
pub mod user;

pub use profile::{Education, Experience, Profile, ProfileFields, ProfileOwner, Skills, Social};
pub use user::{User, UserSummary};
