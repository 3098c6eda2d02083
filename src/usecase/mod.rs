//! UseCase layer.
//!
//! Thin orchestration between the UI handlers and the domain ports.
//! Handlers construct a use case per request; state lives behind the
//! `Arc<dyn ...>` ports, never here.

pub mod admit_connection;
pub mod broadcast_notification;
pub mod error;
pub mod track_visitor;

pub use admit_connection::AdmitConnectionUseCase;
pub use broadcast_notification::BroadcastNotificationUseCase;
pub use error::{BroadcastError, TrackError};
pub use track_visitor::{VisitorContext, VisitorTrackingUseCase};
