//! Client-side credential submission workflows: field validation,
//! CAPTCHA-gated submission, and post-authentication session bootstrap.

pub mod api;
pub mod cli;
pub mod form;
pub mod session;
