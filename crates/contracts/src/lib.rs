//! Types shared by the backend and the frontend: aggregates with their
//! create DTOs, order statuses, report rows, and the client-side cart.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod projections;
pub mod shared;
pub mod system;
pub mod usecases;
