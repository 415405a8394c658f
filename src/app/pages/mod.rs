//! Per-page view models. Each page owns the records it fetched; nothing is
//! shared between pages.

pub mod appointment;
pub mod blog;
pub mod blog_post;
pub mod contact;
pub mod home;
pub mod services;

pub use appointment::AppointmentPage;
pub use blog::BlogPage;
pub use blog_post::{BlogPostPage, DetailState, LoadTicket};
pub use contact::{ContactForm, FormError, NewsletterSignup};
pub use home::HomePage;
pub use services::ServicesPage;
