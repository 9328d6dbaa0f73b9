use actix_web::{http::header, web, HttpResponse};

use crate::{
    models::CheckInStatus,
    state::AppState,
    templates::{render, AdminCheckInsTemplate, CheckInView},
};

const QUEUE_PATH: &str = "/admin/check-ins";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(QUEUE_PATH)
            .service(web::resource("").route(web::get().to(list_check_ins)))
            .service(web::resource("/start/{id}").route(web::get().to(start_check_in)))
            .service(web::resource("/complete/{id}").route(web::get().to(complete_check_in)))
            .service(web::resource("/delete/{id}").route(web::get().to(delete_check_in))),
    );
}

async fn list_check_ins(state: web::Data<AppState>) -> HttpResponse {
    let check_ins = match state.checkins.list().await {
        Ok(check_ins) => check_ins,
        Err(err) => {
            log::error!("Error fetching check-ins: {err}");
            return HttpResponse::InternalServerError().body("Error fetching check-ins");
        }
    };

    let waiting = check_ins
        .iter()
        .filter(|check_in| check_in.status == CheckInStatus::Pending)
        .count();

    render(AdminCheckInsTemplate {
        check_ins: check_ins.into_iter().map(CheckInView::from).collect(),
        waiting,
    })
}

async fn start_check_in(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.checkins.start(&id).await {
        Ok(()) => back_to_queue(),
        Err(err) => {
            log::error!("Error starting check-in {id}: {err}");
            HttpResponse::InternalServerError().body("Error updating check-in status")
        }
    }
}

async fn complete_check_in(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.checkins.complete(&id).await {
        Ok(()) => back_to_queue(),
        Err(err) => {
            log::error!("Error completing check-in {id}: {err}");
            HttpResponse::InternalServerError().body("Error updating check-in status")
        }
    }
}

async fn delete_check_in(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.checkins.remove(&id).await {
        Ok(()) => back_to_queue(),
        Err(err) => {
            log::error!("Error deleting check-in {id}: {err}");
            HttpResponse::InternalServerError().body("Error deleting check-in")
        }
    }
}

fn back_to_queue() -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, QUEUE_PATH))
        .finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};

    use super::*;
    use crate::{
        models::{CheckIn, CheckInSubmission},
        service::CheckInService,
        store::{testing::FailingStore, CheckInStore, MemoryStore},
    };

    fn app_state(store: Arc<dyn CheckInStore>) -> web::Data<AppState> {
        web::Data::new(AppState::new(CheckInService::new(store)))
    }

    async fn seed(state: &web::Data<AppState>, client: &str) -> CheckIn {
        state
            .checkins
            .create(CheckInSubmission {
                barber_name: Some("Xavier".to_string()),
                client_name: Some(client.to_string()),
                client_number: Some("555-0142".to_string()),
                haircut_type: Some("Scissor Cut".to_string()),
            })
            .await
            .unwrap()
    }

    fn assert_redirects_to_queue(resp: &actix_web::dev::ServiceResponse) {
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/admin/check-ins"
        );
    }

    #[actix_web::test]
    async fn queue_page_lists_check_ins() {
        let state = app_state(Arc::new(MemoryStore::new()));
        let created = seed(&state, "Noor").await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/admin/check-ins").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Noor"));
        assert!(html.contains("1 waiting"));
        assert!(html.contains(&format!("/admin/check-ins/start/{}", created.id)));
    }

    #[actix_web::test]
    async fn status_links_advance_the_lifecycle() {
        let state = app_state(Arc::new(MemoryStore::new()));
        let created = seed(&state, "Sam").await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/admin/check-ins/start/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_redirects_to_queue(&resp);

        let started = state.checkins.list().await.unwrap().remove(0);
        assert_eq!(started.status, CheckInStatus::InProgress);
        assert!(started.service_start_time.is_some());

        let req = test::TestRequest::get()
            .uri(&format!("/admin/check-ins/complete/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_redirects_to_queue(&resp);

        let completed = state.checkins.list().await.unwrap().remove(0);
        assert_eq!(completed.status, CheckInStatus::Completed);
        assert_eq!(completed.service_start_time, started.service_start_time);

        let req = test::TestRequest::get()
            .uri(&format!("/admin/check-ins/delete/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_redirects_to_queue(&resp);
        assert!(state.checkins.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn unknown_ids_still_redirect() {
        let state = app_state(Arc::new(MemoryStore::new()));
        let created = seed(&state, "Sam").await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        for action in ["start", "complete", "delete"] {
            let req = test::TestRequest::get()
                .uri(&format!("/admin/check-ins/{action}/does-not-exist"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_redirects_to_queue(&resp);
        }

        assert_eq!(state.checkins.list().await.unwrap(), vec![created]);
    }

    #[actix_web::test]
    async fn store_failures_return_plain_text_errors() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(Arc::new(FailingStore)))
                .configure(configure),
        )
        .await;

        let cases = [
            ("/admin/check-ins", "Error fetching check-ins"),
            ("/admin/check-ins/start/abc", "Error updating check-in status"),
            ("/admin/check-ins/complete/abc", "Error updating check-in status"),
            ("/admin/check-ins/delete/abc", "Error deleting check-in"),
        ];
        for (uri, message) in cases {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(test::read_body(resp).await, message);
        }
    }
}
