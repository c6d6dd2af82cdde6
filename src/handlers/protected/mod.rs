// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here receives the caller as `Extension<AuthUser>`, injected by
// the auth middleware, and only ever touches the caller's own profile.

pub mod profile;
