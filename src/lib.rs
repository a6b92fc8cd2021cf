pub mod auth;
pub mod dashboard;
pub mod export;
pub mod http_res;
pub mod manage;
mod model;
pub mod remote;
pub mod schema;
pub mod search;

use crate::auth::AdminGate;
use crate::remote::{ApiError, RunnerApi};

// the one handle a view keeps, everything else hangs off it
pub struct RegistryCon {
    pub api: RunnerApi,
    pub gate: AdminGate,
}

impl RegistryCon {
    pub fn new(base_url: &str, admin_secret: &str) -> RegistryCon {
        return RegistryCon {
            api: RunnerApi::new(base_url),
            gate: AdminGate::new(admin_secret),
        };
    }

    /// wired to the live backend with the shipped gate password
    pub fn production() -> RegistryCon {
        return RegistryCon::new(remote::DEFAULT_BASE_URL, auth::DEFAULT_ADMIN_SECRET);
    }
}

/**
 * The in-memory copy of the remote runner collection.
 *
 * A view fills it once on mount and again after every mutation. It never
 * gets patched in place, so whatever it holds is the last read that
 * succeeded.
 */
pub struct RunnerStore {
    runners: Vec<schema::Runner>,
}

impl RunnerStore {
    pub fn new() -> RunnerStore {
        return RunnerStore { runners: vec![] };
    }

    pub fn from_runners(runners: Vec<schema::Runner>) -> RunnerStore {
        return RunnerStore { runners };
    }

    /// replace the contents with a fresh read, or keep them when the read fails
    pub async fn refresh(&mut self, api: &RunnerApi) -> Result<(), ApiError> {
        self.runners = api.fetch_runners().await?;
        return Ok(());
    }

    pub fn runners(&self) -> &[schema::Runner] {
        return &self.runners;
    }

    pub fn get(&self, id: &str) -> Option<&schema::Runner> {
        return self.runners.iter().find(|r| r.id == id);
    }

    pub fn len(&self) -> usize {
        return self.runners.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.runners.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse};
    use serde_json::json;
    use time_test::time_test;

    fn roster_server() -> actix_test::TestServer {
        actix_test::start(|| {
            App::new().route(
                "/runners",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({"data": [
                        {"_id": "r1", "full_name": "สมชาย ใจดี", "bib": "A101"},
                        {"_id": "r2", "full_name": "สมหญิง แข็งแรง", "bib": "A102"}
                    ]}))
                }),
            )
        })
    }

    #[actix_rt::test]
    async fn refresh_replaces_the_collection() {
        let srv = roster_server();
        let api = RunnerApi::new(&srv.url(""));

        time_test!();
        let mut store = RunnerStore::new();
        assert!(store.is_empty());

        store.refresh(&api).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("r1").unwrap().bib, "A101");
        assert!(store.get("r9").is_none());
    }

    #[actix_rt::test]
    async fn failed_refresh_keeps_the_last_successful_read() {
        let api = RunnerApi::new("http://127.0.0.1:9");
        let srv = roster_server();

        let mut store = RunnerStore::new();
        store
            .refresh(&RunnerApi::new(&srv.url("")))
            .await
            .unwrap();
        assert_eq!(store.len(), 2);

        assert!(store.refresh(&api).await.is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("r2").unwrap().full_name, "สมหญิง แข็งแรง");
    }

    #[actix_rt::test]
    async fn con_wires_gate_and_api_together() {
        let srv = roster_server();
        let con = RegistryCon::new(&srv.url(""), "1234");

        let session = con.gate.login("1234").unwrap();
        assert!(!session.api_key.is_empty());

        let mut store = RunnerStore::new();
        store.refresh(&con.api).await.unwrap();
        assert_eq!(store.len(), 2);
    }
}
