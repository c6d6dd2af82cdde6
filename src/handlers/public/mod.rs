// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Read-only views over all profiles plus the GitHub repository lookup.

pub mod github;
pub mod profile;

pub use github::repos as github_repos;
pub use profile::{by_user as profile_by_user, list as profile_list};
