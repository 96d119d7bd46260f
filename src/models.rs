pub mod admin;
pub mod attendant;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod expense;
pub mod note;
pub mod payment;
pub mod reminder;
pub mod report;
pub mod tenancy;
pub mod tripeiro;
