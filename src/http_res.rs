//! Just a few helper macros for the Http Responses a consumer hands back

/**
 * Returns a HttpResponse with the right message attached
 *
 * Use it like this:
 * ```ignore
 *  BadRequest!("Hey this is the message")
 * ```
 *
 * Possible are:
 * - Unauthorized
 * - NotFound
 * - Forbidden
 * - BadRequest
 * - InternalServer
 * - BadGateway
 *
 * Each one also has a format variant:
 * ```ignore
 *  BadGatewayf!("the backend answered {}", status)
 * ```
 */
#[macro_use]
pub mod res {
    #[macro_export]
    macro_rules! Unauthorized {
        ($message:expr) => {
            HttpResponse::Unauthorized().json(serde_json::json!({"message": $message}))
        };
    }
    #[macro_export]
    macro_rules! NotFound{
        ($message:expr) => {
            HttpResponse::NotFound().json(serde_json::json!({"message": $message}))
        };
    }
    #[macro_export]
    macro_rules! Forbidden {
        ($message:expr) => {
            HttpResponse::Forbidden().json(serde_json::json!({"message": $message}))
        };
    }
    #[macro_export]
    macro_rules! BadRequest{
        ($message:expr) => {
            HttpResponse::BadRequest().json(serde_json::json!({"message": $message}))
        };
    }
    #[macro_export]
    macro_rules! InternalServer{
        ($message:expr) => {
            HttpResponse::InternalServerError().json(serde_json::json!({"message": $message}))
        };
    }
    #[macro_export]
    macro_rules! BadGateway {
        ($message:expr) => {
            HttpResponse::BadGateway().json(serde_json::json!({"message": $message}))
        };
    }
    #[macro_export]
    macro_rules! Unauthorizedf {
        ($($arg:tt)*) => {
            HttpResponse::Unauthorized().json(serde_json::json!({"message": format!($($arg)*)}))
        };
    }
    #[macro_export]
    macro_rules! NotFoundf {
        ($($arg:tt)*) => {
            HttpResponse::NotFound().json(serde_json::json!({"message": format!($($arg)*)}))
        };
    }
    #[macro_export]
    macro_rules! Forbiddenf {
        ($($arg:tt)*) => {
            HttpResponse::Forbidden().json(serde_json::json!({"message": format!($($arg)*)}))
        };
    }
    #[macro_export]
    macro_rules! BadRequestf {
        ($($arg:tt)*) => {
            HttpResponse::BadRequest().json(serde_json::json!({"message": format!($($arg)*)}))
        };
    }
    #[macro_export]
    macro_rules! InternalServerf {
        ($($arg:tt)*) => {
            HttpResponse::InternalServerError().json(serde_json::json!({"message": format!($($arg)*)}))
        };
    }
    #[macro_export]
    macro_rules! BadGatewayf {
        ($($arg:tt)*) => {
            HttpResponse::BadGateway().json(serde_json::json!({"message": format!($($arg)*)}))
        };
    }
}
