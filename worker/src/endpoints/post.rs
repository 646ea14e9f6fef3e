use actix_web::{post, web, HttpResponse, Responder};

use crate::app::AppState;

/// Run one pricing update `/invocations`. The request body is ignored.
#[post("/invocations")]
pub async fn invoke(state: web::Data<AppState>) -> impl Responder {
    match state.run_invocation().await {
        Ok(report) if report.is_success() => HttpResponse::Ok().body("ok"),
        Ok(report) => {
            let errors: Vec<String> = report.failed.iter().map(|err| err.to_string()).collect();
            HttpResponse::InternalServerError().body(errors.join("\n"))
        }
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}
