//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PredictionQuery, ScanCommand, SignupCommand};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub signup: Arc<dyn SignupCommand>,
    pub login: Arc<dyn LoginService>,
    pub scans: Arc<dyn ScanCommand>,
    pub predictions: Arc<dyn PredictionQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupCommand>,
    pub login: Arc<dyn LoginService>,
    pub scans: Arc<dyn ScanCommand>,
    pub predictions: Arc<dyn PredictionQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            signup,
            login,
            scans,
            predictions,
        } = ports;
        Self {
            signup,
            login,
            scans,
            predictions,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
