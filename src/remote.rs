//! Typed client for the registration backend
//!
//! Every call is one request/response round trip with a fixed timeout and no
//! retry. Failures come back as [`ApiError`] so the view layer can show a
//! notice instead of crashing.

use crate::manage::schema::{Attachment, RunnerForm};
use crate::model;
use crate::schema;
use crate::{BadGatewayf, BadRequestf};
use actix_web::HttpResponse;
use log::{error, info, warn};
use reqwest::multipart;
use std::time::Duration;

/// Backend the production front end talks to
pub const DEFAULT_BASE_URL: &str = "https://rwtf-udon-backend.vercel.app";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum ApiError {
    /// transport level trouble, including timeouts and unreadable bodies
    Network { message: String },
    /// the backend answered with a non success status
    Remote { status: u16, message: String },
}

impl ApiError {
    pub fn to_response(&self) -> HttpResponse {
        return match self {
            ApiError::Network { message } => {
                BadGatewayf!("ไม่สามารถเชื่อมต่อระบบลงทะเบียนได้ ({})", message)
            }
            ApiError::Remote { status, message } => {
                if *status >= 500 {
                    BadGatewayf!("ระบบลงทะเบียนขัดข้อง ({}: {})", status, message)
                } else {
                    BadRequestf!("ระบบลงทะเบียนปฏิเสธคำขอ ({})", message)
                }
            }
        };
    }
}

pub struct RunnerApi {
    client: reqwest::Client,
    base_url: String,
}

impl RunnerApi {
    pub fn new(base_url: &str) -> RunnerApi {
        return RunnerApi {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        };
    }

    /**
     * Pull the whole runner collection.
     *
     * Rows are normalized into [`schema::Runner`] here, at the store
     * boundary. Rows without an id are dropped with a warning.
     */
    pub async fn fetch_runners(&self) -> Result<Vec<schema::Runner>, ApiError> {
        let response = match self
            .client
            .get(format!("{}/runners", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("fetching the runner list failed: {}", e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(response2rejection(status.as_u16(), response).await);
        }

        let envelope: model::RunnersEnvelope = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                error!("the runner list body was not readable: {}", e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        let mut runners: Vec<schema::Runner> = Vec::new();
        for raw in envelope.data.unwrap_or_default() {
            match model::runner_model2schema(raw) {
                Some(r) => runners.push(r),
                None => warn!("dropping a runner row without an id"),
            }
        }

        info!("fetched {} runners", runners.len());
        return Ok(runners);
    }

    /// Create a runner. The backend echoes the stored record on success.
    pub async fn register_runner(
        &self,
        form: &RunnerForm,
        file: Option<&Attachment>,
    ) -> Result<Option<schema::Runner>, ApiError> {
        let mut parts = runner_form2multipart(form);
        if let Some(f) = file {
            parts = parts.part("file", attachment2part(f));
        }

        let response = match self
            .client
            .post(format!("{}/register-runner", self.base_url))
            .multipart(parts)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("registering a runner failed: {}", e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(response2rejection(status.as_u16(), response).await);
        }

        // the record was stored either way, an unreadable echo only costs
        // the confirmation details
        let envelope: model::RegisterEnvelope = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                warn!("the register confirmation was not readable: {}", e);
                return Ok(None);
            }
        };
        return Ok(envelope.data.and_then(model::runner_model2schema));
    }

    pub async fn update_runner(
        &self,
        id: &str,
        form: &RunnerForm,
        file: Option<&Attachment>,
    ) -> Result<(), ApiError> {
        let mut parts = runner_form2multipart(form);
        if let Some(f) = file {
            parts = parts.part("file", attachment2part(f));
        }

        let response = match self
            .client
            .put(format!("{}/runner/{}", self.base_url, id))
            .multipart(parts)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("updating runner {} failed: {}", id, e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(response2rejection(status.as_u16(), response).await);
        }
        return Ok(());
    }

    pub async fn delete_runner(&self, id: &str) -> Result<(), ApiError> {
        let response = match self
            .client
            .delete(format!("{}/runner/{}", self.base_url, id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("deleting runner {} failed: {}", id, e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(response2rejection(status.as_u16(), response).await);
        }
        return Ok(());
    }

    /// Upload a picture on its own and get back the stored url
    pub async fn upload_image(&self, file: &Attachment) -> Result<String, ApiError> {
        let parts = multipart::Form::new().part("file", attachment2part(file));

        let response = match self
            .client
            .post(format!("{}/upload-image", self.base_url))
            .multipart(parts)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("uploading an image failed: {}", e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(response2rejection(status.as_u16(), response).await);
        }

        let envelope: model::UploadEnvelope = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                error!("the upload confirmation was not readable: {}", e);
                return Err(ApiError::Network {
                    message: e.to_string(),
                });
            }
        };

        return match envelope.url {
            Some(u) => Ok(u),
            None => Err(ApiError::Remote {
                status: status.as_u16(),
                message: "the upload confirmation carried no url".to_string(),
            }),
        };
    }
}

/// every field goes over the wire as text, booleans as their tokens
fn runner_form2multipart(form: &RunnerForm) -> multipart::Form {
    let age = match form.age {
        Some(a) => a.to_string(),
        None => "".to_string(),
    };

    return multipart::Form::new()
        .text("full_name", form.full_name.clone())
        .text("phone", form.phone.clone())
        .text("citizen_id", form.citizen_id.clone())
        .text("age", age)
        .text("gender", form.gender.clone())
        .text("distance", form.distance.clone())
        .text("shirt_size", form.shirt_size.clone())
        .text("bib", form.bib.clone())
        .text("reward", form.reward.clone())
        .text("vip", schema::flag_text(form.vip))
        .text("shirt_status", schema::flag_text(form.shirt_status))
        .text(
            "registration_status",
            schema::flag_text(form.registration_status),
        )
        .text("health_package", schema::flag_text(form.health_package))
        .text("hospital", form.hospital.clone())
        .text("medical_condition", form.medical_condition.clone())
        .text("medications", form.medications.clone())
        .text("note", form.note.clone());
}

fn attachment2part(file: &Attachment) -> multipart::Part {
    return multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
}

async fn response2rejection(status: u16, response: reqwest::Response) -> ApiError {
    let message = match response.text().await {
        Ok(body) => match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(v) => v["message"].as_str().unwrap_or(&body).to_string(),
            Err(_) => body,
        },
        Err(_) => "".to_string(),
    };
    error!("the backend answered {}: {}", status, message);
    return ApiError::Remote { status, message };
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App};

    fn roster_json() -> serde_json::Value {
        serde_json::json!({
            "data": [
                {
                    "_id": "a1",
                    "full_name": "Somchai Jones",
                    "phone": "0812345678",
                    "gender": "ชาย",
                    "distance": "5.1",
                    "shirt_size": "M",
                    "vip": true,
                    "shirt_status": false,
                    "bib": "A101"
                },
                {
                    "_id": "a2",
                    "full_name": "สุดา ใจดี",
                    "phone": "0899999999",
                    "gender": "หญิง",
                    "distance": "10.5",
                    "shirt_size": "S",
                    "vip": "false",
                    "age": "31"
                },
                {"full_name": "No Id Row"}
            ]
        })
    }

    #[actix_rt::test]
    async fn fetch_normalizes_rows_and_drops_idless_ones() {
        let srv = actix_test::start(|| {
            App::new().route(
                "/runners",
                web::get().to(|| async { HttpResponse::Ok().json(roster_json()) }),
            )
        });

        let api = RunnerApi::new(&srv.url(""));
        let runners = api.fetch_runners().await.unwrap();

        assert_eq!(runners.len(), 2);
        assert_eq!(runners[0].id, "a1");
        assert!(runners[0].vip);
        assert_eq!(runners[1].age, Some(31));
        assert!(!runners[1].vip);
        assert_eq!(runners[1].bib, "");
    }

    #[actix_rt::test]
    async fn non_success_status_is_a_remote_rejection() {
        let srv = actix_test::start(|| {
            App::new().route(
                "/runners",
                web::get().to(|| async {
                    HttpResponse::InternalServerError()
                        .json(serde_json::json!({"message": "boom"}))
                }),
            )
        });

        let api = RunnerApi::new(&srv.url(""));
        match api.fetch_runners().await {
            Err(ApiError::Remote { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected a remote rejection, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn unreachable_backend_is_a_network_failure() {
        // nothing listens on the discard port
        let api = RunnerApi::new("http://127.0.0.1:9");
        match api.fetch_runners().await {
            Err(ApiError::Network { .. }) => (),
            other => panic!("expected a network failure, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn upload_image_returns_the_stored_url() {
        let srv = actix_test::start(|| {
            App::new().route(
                "/upload-image",
                web::post().to(|| async {
                    HttpResponse::Ok().json(serde_json::json!({"url": "https://cdn.example/p.jpg"}))
                }),
            )
        });

        let api = RunnerApi::new(&srv.url(""));
        let file = Attachment {
            file_name: "p.jpg".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(
            api.upload_image(&file).await.unwrap(),
            "https://cdn.example/p.jpg"
        );
    }
}
