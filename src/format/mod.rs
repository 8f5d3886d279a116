//! Response formatters.
//!
//! All three consume the same [`LocationResult`](crate::location::LocationResult):
//! - `json.rs`: `application/json`
//! - `text.rs`: RouterOS `do {:return {...}}` grammar, `text/plain`
//! - `html.rs`: dashboard page, `text/html`

pub mod html;
pub mod json;
pub mod text;
