//! Core Kernel - Foundational types shared by the claims console
//!
//! This crate provides the building blocks used across the workspace:
//! - Money types with precise decimal arithmetic
//! - Business identifiers (claim, policy, reference and payment codes)
//! - Console timestamps, policy periods and SLA windows
//! - Port error types for injected data providers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{
    PolicyPeriod, BreachWindow, TemporalError, CONSOLE_TIMEZONE,
    format_console_timestamp, parse_console_timestamp,
    format_console_date, parse_console_date, console_today,
};
pub use identifiers::{ClaimNumber, PolicyNumber, ReferenceId, PaymentReference, IdentifierError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
