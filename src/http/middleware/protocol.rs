//! Protocol resolution middleware.
//! Attaches a [`RequestProtocol`] to every request.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::config::SharedTrust;
use crate::http::request::RequestProtocol;
use crate::net::TransportSecurity;

pub async fn protocol_middleware(
    State(trust): State<SharedTrust>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. This hop's encryption state, recorded by the listener.
    let transport = TransportSecurity::from_extensions(req.extensions());

    // 2. Resolve with the trust setting in effect for this request.
    let resolver = trust.resolver();
    let (protocol, source) = resolver.resolve_with_source(transport.is_encrypted(), req.headers());
    let protocol = RequestProtocol::new(protocol);

    tracing::debug!(
        protocol = %protocol,
        source = %source,
        transport = %transport,
        trust_proxy = resolver.trust_proxy(),
        "Resolved request protocol"
    );

    // 3. Attach context
    req.extensions_mut().insert(protocol);
    next.run(req).await
}
