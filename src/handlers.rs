pub mod admin;
pub mod attendants;
pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod notes;
pub mod payments;
pub mod reminders;
pub mod reports;
pub mod tripeiros;
