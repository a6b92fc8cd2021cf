pub mod schema;

use crate::manage::schema::{Attachment, MutationOutcome, RunnerForm, MAX_ATTACHMENT_BYTES};
use crate::remote::{ApiError, RunnerApi};
use crate::schema::Runner;
use crate::BadRequest;
use crate::RunnerStore;
use actix_web::HttpResponse;
use log::{info, warn};

#[derive(Debug)]
pub enum ManageError {
    Validation { message: String },
    Remote { source: ApiError },
}

impl From<ApiError> for ManageError {
    fn from(source: ApiError) -> ManageError {
        return ManageError::Remote { source };
    }
}

impl ManageError {
    pub fn to_response(&self) -> HttpResponse {
        return match self {
            ManageError::Validation { message } => BadRequest!(message),
            ManageError::Remote { source } => source.to_response(),
        };
    }
}

fn check_attachment(file: &Option<&Attachment>) -> Result<(), ManageError> {
    if let Some(attachment) = file {
        if attachment.size() > MAX_ATTACHMENT_BYTES {
            return Err(ManageError::Validation {
                message: "ไฟล์ใหญ่เกิน 5MB กรุณาเลือกไฟล์ขนาดเล็กกว่า".to_string(),
            });
        }
    }
    return Ok(());
}

// the remote write already happened, the store keeps the last successful read
async fn refresh_after_mutation(api: &RunnerApi, store: &mut RunnerStore) {
    if let Err(e) = store.refresh(api).await {
        warn!("refresh after mutation failed: {:?}", e);
    }
}

pub async fn register(
    api: &RunnerApi,
    store: &mut RunnerStore,
    form: &RunnerForm,
    file: Option<&Attachment>,
    consent: bool,
) -> Result<MutationOutcome, ManageError> {
    // the size gate fires at file selection, before the yes/no dialog
    check_attachment(&file)?;
    if !consent {
        info!("registration dismissed before dispatch");
        return Ok(MutationOutcome::Cancelled);
    }

    let echo = api.register_runner(form, file).await?;
    info!("registered runner {}", form.full_name);

    refresh_after_mutation(api, store).await;
    return Ok(MutationOutcome::Registered {
        image_url: echo.and_then(|r| r.image_url),
    });
}

pub async fn update(
    api: &RunnerApi,
    store: &mut RunnerStore,
    id: &str,
    form: &RunnerForm,
    file: Option<&Attachment>,
    consent: bool,
) -> Result<MutationOutcome, ManageError> {
    check_attachment(&file)?;
    if !consent {
        info!("edit of {} dismissed before dispatch", id);
        return Ok(MutationOutcome::Cancelled);
    }

    api.update_runner(id, form, file).await?;
    info!("updated runner {}", id);

    refresh_after_mutation(api, store).await;
    return Ok(MutationOutcome::Updated);
}

/**
 * Delete one record after the caller passes both gates.
 *
 * The caller re-types the record's bib number. An empty entry means the
 * dialog was dismissed, a wrong entry is a validation failure, and both
 * leave the remote collection untouched. The yes/no gate comes after the
 * bib check, so `consent` only matters once the bib matched.
 */
pub async fn delete(
    api: &RunnerApi,
    store: &mut RunnerStore,
    runner: &Runner,
    entered_bib: &str,
    consent: bool,
) -> Result<MutationOutcome, ManageError> {
    if entered_bib.trim() == "" {
        info!("delete of {} dismissed at the bib prompt", runner.id);
        return Ok(MutationOutcome::Cancelled);
    }
    if entered_bib != runner.bib {
        return Err(ManageError::Validation {
            message: "เลข BIB ไม่ตรง ไม่สามารถลบข้อมูลได้".to_string(),
        });
    }
    if !consent {
        info!("delete of {} dismissed before dispatch", runner.id);
        return Ok(MutationOutcome::Cancelled);
    }

    api.delete_runner(&runner.id).await?;
    info!("deleted runner {}", runner.id);

    refresh_after_mutation(api, store).await;
    return Ok(MutationOutcome::Deleted);
}

/// standalone upload, the hosted url comes back for the form to keep
pub async fn upload_image(api: &RunnerApi, file: &Attachment) -> Result<String, ManageError> {
    check_attachment(&Some(file))?;
    let url = api.upload_image(file).await?;
    info!("uploaded image {} to {}", file.file_name, url);
    return Ok(url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn form() -> RunnerForm {
        RunnerForm {
            full_name: "สมชาย ใจดี".to_string(),
            phone: "0812345678".to_string(),
            citizen_id: "1103700000001".to_string(),
            age: Some(28),
            gender: "ชาย".to_string(),
            distance: "10.5".to_string(),
            shirt_size: "M".to_string(),
            vip: true,
            ..RunnerForm::default()
        }
    }

    fn runner_with_bib(bib: &str) -> Runner {
        Runner {
            id: "r1".to_string(),
            full_name: "สมชาย ใจดี".to_string(),
            phone: "0812345678".to_string(),
            citizen_id: "1103700000001".to_string(),
            age: Some(28),
            gender: "ชาย".to_string(),
            distance: "10.5".to_string(),
            shirt_size: "M".to_string(),
            bib: bib.to_string(),
            reward: "".to_string(),
            vip: false,
            shirt_status: false,
            registration_status: true,
            health_package: false,
            hospital: "".to_string(),
            medical_condition: "".to_string(),
            medications: "".to_string(),
            note: "".to_string(),
            image_url: None,
        }
    }

    /// nothing listens on the discard port, any request would error out
    fn dead_api() -> RunnerApi {
        RunnerApi::new("http://127.0.0.1:9")
    }

    fn field_value(body: &str, field: &str) -> Option<String> {
        let marker = format!("name=\"{}\"", field);
        let start = body.find(&marker)? + marker.len();
        let rest = &body[start..];
        let value_start = rest.find("\r\n\r\n")? + 4;
        let value_end = rest[value_start..].find("\r\n")? + value_start;
        Some(rest[value_start..value_end].to_string())
    }

    #[actix_rt::test]
    async fn register_sends_text_fields_and_the_file_last() {
        let captured = web::Data::new(Mutex::new(Vec::<u8>::new()));
        let captured_in = captured.clone();
        let srv = actix_test::start(move || {
            let captured_in = captured_in.clone();
            App::new().app_data(captured_in).route(
                "/register-runner",
                web::post().to(
                    |data: web::Data<Mutex<Vec<u8>>>, body: web::Bytes| async move {
                        *data.lock().unwrap() = body.to_vec();
                        HttpResponse::Ok().json(json!({"data": {"_id": "r9"}}))
                    },
                ),
            )
        });

        let api = RunnerApi::new(&srv.url(""));
        let mut store = RunnerStore::new();
        let file = Attachment::new("slip.png", vec![1, 2, 3]);

        let outcome = register(&api, &mut store, &form(), Some(&file), true)
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Registered { image_url: None });

        let body = String::from_utf8_lossy(&captured.lock().unwrap()).to_string();
        assert_eq!(field_value(&body, "vip").unwrap(), "true");
        assert_eq!(field_value(&body, "shirt_status").unwrap(), "false");
        assert_eq!(field_value(&body, "distance").unwrap(), "10.5");
        assert_eq!(field_value(&body, "age").unwrap(), "28");
        assert!(body.contains("filename=\"slip.png\""));
        assert!(body.find("name=\"note\"").unwrap() < body.find("name=\"file\"").unwrap());
    }

    #[actix_rt::test]
    async fn declined_consent_never_reaches_the_backend() {
        let api = dead_api();
        let mut store = RunnerStore::new();

        let outcome = register(&api, &mut store, &form(), None, false)
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Cancelled);

        let outcome = update(&api, &mut store, "r1", &form(), None, false)
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Cancelled);
    }

    #[actix_rt::test]
    async fn oversized_attachment_is_rejected_locally() {
        let api = dead_api();
        let mut store = RunnerStore::new();
        let file = Attachment::new("big.jpg", vec![0u8; MAX_ATTACHMENT_BYTES + 1]);

        let result = register(&api, &mut store, &form(), Some(&file), true).await;
        match result {
            Err(ManageError::Validation { message }) => {
                assert_eq!(message, "ไฟล์ใหญ่เกิน 5MB กรุณาเลือกไฟล์ขนาดเล็กกว่า")
            }
            other => panic!("expected a validation failure, got {:?}", other),
        }

        assert!(upload_image(&api, &file).await.is_err());
    }

    #[actix_rt::test]
    async fn delete_gates_run_before_any_remote_call() {
        let api = dead_api();
        let runner = runner_with_bib("A102");
        let mut store = RunnerStore::from_runners(vec![runner_with_bib("A102")]);

        // dismissed prompt
        let outcome = delete(&api, &mut store, &runner, "  ", true).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Cancelled);

        // wrong bib
        let result = delete(&api, &mut store, &runner, "A101", true).await;
        match result {
            Err(ManageError::Validation { message }) => {
                assert_eq!(message, "เลข BIB ไม่ตรง ไม่สามารถลบข้อมูลได้")
            }
            other => panic!("expected a validation failure, got {:?}", other),
        }

        // matching bib but declined yes/no
        let outcome = delete(&api, &mut store, &runner, "A102", false)
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Cancelled);

        assert_eq!(store.runners().len(), 1);
    }

    #[actix_rt::test]
    async fn successful_delete_refetches_the_collection() {
        let fetches = web::Data::new(AtomicUsize::new(0));
        let fetches_in = fetches.clone();
        let srv = actix_test::start(move || {
            let fetches_in = fetches_in.clone();
            App::new()
                .app_data(fetches_in)
                .route(
                    "/runner/{id}",
                    web::delete().to(|| async { HttpResponse::Ok().json(json!({"message": "deleted"})) }),
                )
                .route(
                    "/runners",
                    web::get().to(|data: web::Data<AtomicUsize>| async move {
                        data.fetch_add(1, Ordering::SeqCst);
                        HttpResponse::Ok().json(json!({"data": [
                            {"_id": "r2", "full_name": "คนที่เหลือ", "bib": "A103"}
                        ]}))
                    }),
                )
        });

        let api = RunnerApi::new(&srv.url(""));
        let runner = runner_with_bib("A102");
        let mut store = RunnerStore::from_runners(vec![runner_with_bib("A102")]);

        let outcome = delete(&api, &mut store, &runner, "A102", true).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Deleted);

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.runners().len(), 1);
        assert_eq!(store.runners()[0].id, "r2");
    }

    #[actix_rt::test]
    async fn update_dispatches_a_put_and_refetches() {
        let srv = actix_test::start(|| {
            App::new()
                .route(
                    "/runner/{id}",
                    web::put().to(|| async { HttpResponse::Ok().json(json!({"message": "updated"})) }),
                )
                .route(
                    "/runners",
                    web::get().to(|| async {
                        HttpResponse::Ok().json(json!({"data": [
                            {"_id": "r1", "full_name": "สมชาย ใจดี", "shirt_size": "L"}
                        ]}))
                    }),
                )
        });

        let api = RunnerApi::new(&srv.url(""));
        let mut store = RunnerStore::new();
        let mut edited = form();
        edited.shirt_size = "L".to_string();

        let outcome = update(&api, &mut store, "r1", &edited, None, true)
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Updated);
        assert_eq!(store.runners()[0].shirt_size, "L");
    }
}
