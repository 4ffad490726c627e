//! Upstream request gate.
//!
//! Every request may be denied before it reaches a route. The policy deciding
//! *whether* to deny lives behind [`RequestGate`]; this module only turns a
//! decision into the matching HTTP response.

use std::sync::Arc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{Error, HttpRequest, HttpResponse, web};
use serde_json::json;

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    RateLimit,
    Bot,
    SpoofedBot,
    Policy,
}

impl DenyReason {
    pub fn status(self) -> StatusCode {
        match self {
            DenyReason::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            DenyReason::Bot | DenyReason::SpoofedBot | DenyReason::Policy => StatusCode::FORBIDDEN,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DenyReason::RateLimit => "Too Many Requests",
            DenyReason::Bot => "Bot access denied",
            DenyReason::SpoofedBot => "Spoofed bot detected",
            DenyReason::Policy => "Forbidden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny(DenyReason),
}

/// Opaque allow/deny policy consulted before every request.
pub trait RequestGate: Send + Sync {
    fn check(&self, req: &HttpRequest) -> GateDecision;
}

/// Gate that lets everything through.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl RequestGate for AllowAll {
    fn check(&self, _req: &HttpRequest) -> GateDecision {
        GateDecision::Allow
    }
}

/// Wraps a gate so it can be registered with `App::app_data`.
pub fn gate_data(gate: Arc<dyn RequestGate>) -> web::Data<dyn RequestGate> {
    web::Data::from(gate)
}

/// `from_fn` middleware consulting the registered [`RequestGate`].
///
/// Requests pass through untouched when no gate is registered.
pub async fn request_gate<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: MessageBody + 'static,
{
    let decision = req
        .app_data::<web::Data<dyn RequestGate>>()
        .map_or(GateDecision::Allow, |gate| gate.check(req.request()));

    match decision {
        GateDecision::Allow => Ok(next.call(req).await?.map_into_boxed_body()),
        GateDecision::Deny(reason) => {
            log::warn!(
                "Denied {} {}: {}",
                req.method(),
                req.path(),
                reason.message()
            );
            let response =
                HttpResponse::build(reason.status()).json(json!({ "error": reason.message() }));
            Ok(req.into_response(response))
        }
    }
}
