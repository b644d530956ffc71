use erased_serde::Serialize as EraSerialize;
use log::info;
use rocket::response::Responder;
use rocket::response::content::RawJson;
use serde::Serialize;

/// Outcome of an API request
#[derive(Serialize)]
pub enum Status {
    Ok,
    Error(String),
}

/// Envelope of every `/api` response, `{ "status": ..., "data": ... }`
#[derive(Serialize)]
pub struct JsonStatus {
    status: Status,
    data: Box<dyn EraSerialize + Send + 'static>,
}

impl From<JsonStatus> for RawJson<String> {
    fn from(status: JsonStatus) -> Self {
        match serde_json::to_string(&status) {
            Ok(body) => RawJson(body),
            Err(e) => RawJson(format!(
                r#"{{"status":{{"Error":"{}"}},"data":[]}}"#,
                e.to_string().replace('"', "'")
            )),
        }
    }
}

pub type JsonResult = Result<JsonStatus, JsonStatus>;

impl JsonStatus {
    pub fn new(status: Status, data: impl EraSerialize + Send + 'static) -> Self {
        JsonStatus {
            status,
            data: Box::new(data),
        }
    }

    pub fn new_empty(status: Status) -> Self {
        JsonStatus::new(status, Vec::<String>::new())
    }

    pub fn error<T: ToString>(message: T) -> Self {
        info!("Error while running request: {}", message.to_string());
        JsonStatus::new_empty(Status::Error(message.to_string()))
    }

    pub fn ok() -> Self {
        JsonStatus::new_empty(Status::Ok)
    }

    pub fn data(data: impl EraSerialize + Send + 'static) -> Self {
        JsonStatus::new(Status::Ok, data)
    }
}

impl<'r> Responder<'r, 'static> for JsonStatus {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        RawJson::<String>::from(self).respond_to(request)
    }
}
