//! Bib lookup for participants and the roster quick filter
pub mod search_schema;

use self::search_schema::{DisplayLang, SearchHit, SearchMatches};
use crate::schema::{Runner, BIB_PENDING, BIB_PENDING_EN};
use crate::{BadRequest, NotFound};
use actix_web::HttpResponse;

/**
 * Find the first runner whose name or citizen id contains the query.
 *
 * Scans in store order. Names match case insensitively, citizen ids as
 * typed. Blank queries never start a scan.
 */
pub fn find_one(runners: &[Runner], query: &str) -> SearchHit {
    if query.trim().is_empty() {
        return SearchHit::NoQuery;
    }

    let lowered = query.to_lowercase();
    for runner in runners {
        if runner.full_name.to_lowercase().contains(&lowered) || runner.citizen_id.contains(query) {
            return SearchHit::Found(runner.clone());
        }
    }
    return SearchHit::NotFound;
}

/// Same scan as [`find_one`] but name only, collecting every match in store order
pub fn find_all(runners: &[Runner], query: &str) -> SearchMatches {
    if query.trim().is_empty() {
        return SearchMatches::NoQuery;
    }

    let lowered = query.to_lowercase();
    let hits: Vec<Runner> = runners
        .iter()
        .filter(|r| r.full_name.to_lowercase().contains(&lowered))
        .cloned()
        .collect();

    return if hits.is_empty() {
        SearchMatches::NotFound
    } else {
        SearchMatches::Found(hits)
    };
}

/// Narrow the management roster by name or phone. Blank text keeps every row.
pub fn filter_roster(runners: &[Runner], text: &str) -> Vec<Runner> {
    let lowered = text.to_lowercase();
    return runners
        .iter()
        .filter(|r| r.full_name.to_lowercase().contains(&lowered) || r.phone.contains(text))
        .cloned()
        .collect();
}

/// Bib value for display. The pending placeholder has an english form.
pub fn display_bib(bib: &str, lang: DisplayLang) -> String {
    if lang == DisplayLang::En && bib == BIB_PENDING {
        return BIB_PENDING_EN.to_string();
    }
    return bib.to_string();
}

impl SearchHit {
    /// Response a handler can pass straight through for a bib lookup
    pub fn to_response(&self) -> HttpResponse {
        return match self {
            SearchHit::Found(runner) => HttpResponse::Ok().json(runner),
            SearchHit::NotFound => NotFound!("ไม่พบข้อมูลนักวิ่ง"),
            SearchHit::NoQuery => BadRequest!("กรุณากรอกชื่อหรือเลขบัตรประชาชน"),
        };
    }
}

impl SearchMatches {
    pub fn to_response(&self) -> HttpResponse {
        return match self {
            SearchMatches::Found(runners) => HttpResponse::Ok().json(runners),
            SearchMatches::NotFound => NotFound!("ไม่พบข้อมูลนักวิ่ง"),
            SearchMatches::NoQuery => BadRequest!("กรุณากรอกชื่อหรือเลขบัตรประชาชน"),
        };
    }
}
