//! Session domain module.
//!
//! Navigation state for one signed-in client: which screen is showing and
//! the contact form that gates the move from result to payment.

mod contact;
mod screen;

pub use contact::{ContactDetails, ContactForm, ContactFormErrors};
pub use screen::Screen;
