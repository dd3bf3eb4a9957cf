use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CreateUserDoc {
    pub name: String,
    pub surname: String,
    pub email: String,
    /// International format, leading `+`.
    pub phone: String,
}

#[derive(ToSchema)]
pub struct CreateClassDoc {
    pub studio: String,
    pub class_name: String,
    /// RFC 3339 timestamp.
    pub start_date: String,
    /// RFC 3339 timestamp, not before `start_date`.
    pub end_date: String,
    pub capacity: i64,
}

#[derive(ToSchema)]
pub struct CreateBookingDoc {
    pub class: String,
    pub user: String,
    /// RFC 3339 timestamp.
    pub date: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::classes::create,
        crate::routes::classes::list,
        crate::routes::bookings::create,
        crate::routes::bookings::list,
        crate::routes::bookings::get_by_path,
        crate::routes::bookings::get_by_query,
    ),
    components(
        schemas(
            HealthResponse,
            CreateUserDoc,
            CreateClassDoc,
            CreateBookingDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "classes"),
        (name = "bookings")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_entity_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/users", "/classes", "/bookings", "/bookings/{id}", "/booking", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
