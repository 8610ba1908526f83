//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockLoginService, MockPredictionQuery, MockScanCommand, MockSignupCommand,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// JSON extractor configuration with the production error handler and a
/// small body limit.
pub fn json_config() -> web::JsonConfig {
    super::json_config(64 * 1024)
}

/// Builds an [`HttpState`] from mocks. Ports left unset get a mock with no
/// expectations, so any call to them fails the test.
#[derive(Default)]
pub struct HttpStateBuilder {
    signup: Option<MockSignupCommand>,
    login: Option<MockLoginService>,
    scans: Option<MockScanCommand>,
    predictions: Option<MockPredictionQuery>,
}

impl HttpStateBuilder {
    pub fn signup(mut self, mock: MockSignupCommand) -> Self {
        self.signup = Some(mock);
        self
    }

    pub fn login(mut self, mock: MockLoginService) -> Self {
        self.login = Some(mock);
        self
    }

    pub fn scans(mut self, mock: MockScanCommand) -> Self {
        self.scans = Some(mock);
        self
    }

    pub fn predictions(mut self, mock: MockPredictionQuery) -> Self {
        self.predictions = Some(mock);
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            signup: Arc::new(self.signup.unwrap_or_default()),
            login: Arc::new(self.login.unwrap_or_default()),
            scans: Arc::new(self.scans.unwrap_or_default()),
            predictions: Arc::new(self.predictions.unwrap_or_default()),
        })
    }
}
