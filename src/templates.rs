use actix_web::{http::header, HttpResponse};
use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::{BarberOption, CheckIn, CheckInStatus};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub barbers: Vec<BarberOption>,
    pub haircuts: Vec<&'static str>,
}

#[derive(Template)]
#[template(path = "admin_check_ins.html")]
pub struct AdminCheckInsTemplate {
    pub check_ins: Vec<CheckInView>,
    pub waiting: usize,
}

#[derive(Clone, Debug)]
pub struct CheckInView {
    pub id: String,
    pub barber_name: String,
    pub client_name: String,
    pub client_number: String,
    pub haircut_type: String,
    pub check_in_time: String,
    pub status: &'static str,
    pub service_start_time: String,
    pub has_started: bool,
    pub can_start: bool,
    pub can_complete: bool,
}

impl From<CheckIn> for CheckInView {
    fn from(check_in: CheckIn) -> Self {
        Self {
            id: check_in.id,
            barber_name: check_in.barber_name,
            client_name: check_in.client_name,
            client_number: check_in.client_number,
            haircut_type: check_in.haircut_type,
            check_in_time: display_time(check_in.check_in_time),
            status: check_in.status.as_str(),
            service_start_time: check_in
                .service_start_time
                .map(display_time)
                .unwrap_or_default(),
            has_started: check_in.service_start_time.is_some(),
            can_start: check_in.status == CheckInStatus::Pending,
            can_complete: check_in.status == CheckInStatus::InProgress,
        }
    }
}

fn display_time(value: DateTime<Utc>) -> String {
    value.format(TIME_FORMAT).to_string()
}

pub fn render<T: Template>(template: T) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .body(body),
        Err(err) => {
            log::error!("Template render error: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
