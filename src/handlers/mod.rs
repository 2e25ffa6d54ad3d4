// Handler modules, grouped by surface:
// public content API, login, and the guarded admin page.
pub mod admin;
pub mod auth;
pub mod portfolio;
