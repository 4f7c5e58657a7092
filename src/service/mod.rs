//! Resource handlers: presence validation, store access, and response shaping, independent of HTTP.

mod company;
mod invoice;
pub mod validation;
pub use company::CompanyService;
pub use invoice::InvoiceService;
pub use validation::{body_to_map, Body};
