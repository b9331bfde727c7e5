use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use std::{convert::Infallible, net::SocketAddr, time::Duration};

const USER: &str = r#"{"id": 1, "name": "ann", "roles": ["admin", "dev"], "score": 4.5}"#;
const USER_XML: &str =
    r#"<user id="1"><name>ann</name><roles><role>admin</role><role>dev</role></roles></user>"#;

/// Serves a handful of fixed routes on a free local port until the runtime stops.
pub async fn start() -> SocketAddr {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));

    let server = Server::bind(&addr).serve(make_service_fn(|_| async {
        Ok::<_, Infallible>(service_fn(handle_request))
    }));
    let local_addr = server.local_addr();

    tokio::spawn(async move {
        if let Err(e) = server.await {
            eprintln!("Stub server error: {}", e);
        }
    });

    local_addr
}

async fn handle_request(request: Request<Body>) -> Result<Response<Body>, Infallible> {
    let response = match (request.method().as_str(), request.uri().path()) {
        ("GET", "/users/1") => Response::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .header("X-Test", "abc")
            .body(Body::from(USER)),
        ("GET", "/users/1.xml") => Response::builder()
            .status(200)
            .header("Content-Type", "application/xml")
            .body(Body::from(USER_XML)),
        ("POST", "/users") => {
            let is_json = request
                .headers()
                .get("content-type")
                .map(|value| value.as_bytes() == b"application/json")
                .unwrap_or(false);
            let body = body::to_bytes(request.into_body())
                .await
                .unwrap_or_default();

            Response::builder()
                .status(if is_json { 201 } else { 415 })
                .header("Content-Type", "application/json")
                .body(Body::from(body))
        }
        ("GET", "/slow") => {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Response::builder().status(200).body(Body::from("done"))
        }
        _ => Response::builder().status(404).body(Body::empty()),
    };

    Ok(response.unwrap_or_else(|_| Response::new(Body::empty())))
}
