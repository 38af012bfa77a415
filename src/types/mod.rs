//! Type definitions for loan applications and decisions

pub mod application;
pub mod decision;

pub use application::{Education, InvalidAmount, PropertyArea, RawApplication};
pub use decision::{DecisionStatus, LoanDecision};
