//! Here is all we need to gate the admin area
//!
//! A view calls [`AdminGate::login`] with the entered password and keeps the
//! returned api key. Every admin action then goes through
//! [`AdminGate::get_user`] with the key in the Authorization header, which
//! also refreshes the session so it only dies when nobody uses it.

use crate::{BadRequest, Forbidden, InternalServer, NotFound, Unauthorized};
use actix_web::{HttpRequest, HttpResponse};
use log::info;
use rand::prelude::*;
use sha256::digest;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// The production front end ships with this gate password
pub const DEFAULT_ADMIN_SECRET: &str = "1234";

/// Seconds a session may sit unused before it is thrown out
const SESSION_IDLE_SECS: i64 = 36000;

/**
 * An authenticated admin. Holding one means the password check passed and
 * the session was still fresh.
 */
#[derive(Debug)]
pub struct AdminSession {
    pub api_key: String,
}

pub struct AdminGate {
    secret: String,
    sessions: Mutex<HashMap<String, i64>>,
}

impl AdminGate {
    pub fn new(secret: &str) -> AdminGate {
        return AdminGate {
            secret: secret.to_string(),
            sessions: Mutex::new(HashMap::new()),
        };
    }

    /**
     * Trade the entered password for a fresh session key
     */
    pub fn login(&self, password: &str) -> Result<AdminSession, HttpResponse> {
        if password != self.secret {
            return Err(Unauthorized!("รหัสไม่ถูกต้อง"));
        }

        let current_timestamp: i64 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        let api_key = format!("RWTF_{}", gen_api_key());

        let mut sessions = match self.sessions.lock() {
            Ok(s) => s,
            Err(_) => return Err(InternalServer!("The session table is gone")),
        };
        sessions.insert(api_key.clone(), current_timestamp);

        info!("opened admin session");
        return Ok(AdminSession { api_key });
    }

    /**
     * Check the session behind the request. While doing this the validity of
     * the session is checked and its refresh time reset
     */
    pub fn get_user(&self, req: &HttpRequest) -> Result<AdminSession, HttpResponse> {
        let api_key = req2key(req)?;

        // get Current time
        // this is used to check if the Session is valid and update it to the new number
        let current_timestamp: i64 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        let mut sessions = match self.sessions.lock() {
            Ok(s) => s,
            Err(_) => return Err(InternalServer!("The session table is gone")),
        };

        let last_refresh = match sessions.get(&api_key) {
            Some(t) => *t,
            None => return Err(NotFound!("The api_key was not found")),
        };

        if current_timestamp - last_refresh > SESSION_IDLE_SECS {
            sessions.remove(&api_key);
            return Err(Forbidden!("Sorry, key was not refreshed"));
        }

        // reset last_refresh
        sessions.insert(api_key.clone(), current_timestamp);

        return Ok(AdminSession { api_key });
    }

    pub fn logout(&self, api_key: &str) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(api_key);
            info!("closed admin session");
        }
    }
}

fn req2key(req: &HttpRequest) -> Result<String, HttpResponse> {
    // check if apikey exists
    let api_key_opt = req.headers().get(actix_web::http::header::AUTHORIZATION);
    if api_key_opt.is_none() {
        return Err(Unauthorized!("No api_key was supplied"));
    }

    // turn the HeaderValue into a string
    return match api_key_opt.unwrap().to_str() {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Err(BadRequest!("There were non-ascii characters in the api key")),
    };
}

/// generate a random hash
fn gen_api_key() -> String {
    let mut rng = rand::thread_rng();
    let mut buf: [u8; 64] = [0; 64];
    rand::RngCore::fill_bytes(&mut rng, &mut buf);
    let tmp: String = buf.into_iter().map(|v| format!("{:x}", v)).collect();
    digest(tmp)
}
