// The MIT License (MIT)
// Copyright (c) 2023 IBP.network
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::api::helpers::respond_json;
use crate::errors::ApiError;
use crate::event::Envelope;
use crate::relay::{Relay, Status};
use actix_web::{web, web::Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Response {
    pub status: Status,
}

/// Handler to receive new SNS events
pub async fn post_event(
    envelope: web::Json<Envelope>,
    relay: web::Data<Relay>,
) -> Result<Json<Response>, ApiError> {
    let status = relay.relay(&envelope).await?;
    respond_json(Response { status })
}

#[cfg(test)]
mod tests {
    use crate::api::routes::routes;
    use crate::relay::tests::{test_config, FakeLookup, SAMPLE_EVENT};
    use crate::relay::Relay;
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn relay_with(fail: bool) -> (MockServer, Relay) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let lookup = Arc::new(FakeLookup {
            fail,
            ..Default::default()
        });
        let relay = Relay::new(&test_config(&server.uri()), lookup);
        (server, relay)
    }

    #[actix_web::test]
    async fn it_delivers_a_posted_event() {
        let (_server, relay) = relay_with(false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(relay))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/events")
            .insert_header(("content-type", "application/json"))
            .set_payload(SAMPLE_EVENT)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "delivered" }));
    }

    #[actix_web::test]
    async fn it_skips_an_unrecognized_event() {
        let (_server, relay) = relay_with(false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(relay))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/events")
            .set_json(json!({ "Records": [{ "Sns": { "Message": "hello" } }] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "skipped" }));
    }

    #[actix_web::test]
    async fn it_answers_bad_gateway_when_the_lookup_fails() {
        let (_server, relay) = relay_with(true).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(relay))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/events")
            .insert_header(("content-type", "application/json"))
            .set_payload(SAMPLE_EVENT)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "errors": ["environment prod not found for application myapp"] })
        );
    }

    #[actix_web::test]
    async fn it_answers_health() {
        let (_server, relay) = relay_with(false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(relay))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
