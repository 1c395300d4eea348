//! # Yard Check-In Core
//!
//! Dock/appointment assignment and conflict-detection logic for a warehouse yard:
//! drivers check in with load details, CSR staff assign docks and appointment times,
//! and a daily log tracks load lifecycle state.
//!
//! The crate is built around three components:
//!
//! * [`occupancy`] — derives every dock's status (available / in-use / double-booked /
//!   blocked) as a pure projection over the active load records and the block-list.
//! * [`assignment`] — the decision table consulted synchronously before any
//!   state-changing write: blocked docks reject outright, occupied docks require an
//!   explicit double-booking confirmation.
//! * [`scheduling`] — on-time classification and detention minutes, computed in the
//!   yard's civil timezone with DST-correct conversion.
//!
//! Persistence, notification, and authorization are external collaborators behind the
//! narrow interfaces in [`repositories`], [`notification`], and
//! [`models::CallerIdentity`]. The [`services::AssignmentService`] wires them together
//! around the pure core.

pub mod assignment;
pub mod config;
pub mod errors;
pub mod models;
pub mod notification;
pub mod occupancy;
pub mod repositories;
pub mod scheduling;
pub mod services;
pub mod utils;

pub use assignment::{ApprovedAssignment, AssignmentRequest, AssignmentValidator};
pub use errors::{CheckInError, CheckInResult};
pub use models::{
    AppointmentTime, DockOccupancy, DockStatus, LoadRecord, LoadStatus, OccupantSummary,
    YardOccupancy,
};
pub use occupancy::OccupancyResolver;
pub use scheduling::{AdherenceCalculator, AppointmentAdherence, Detention};
pub use services::AssignmentService;
