use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct GreetingDoc { pub hello: String }

/// Stored person; unset fields are omitted.
#[derive(ToSchema)]
pub struct PersonDoc {
    pub id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
}

/// Any subset of fields. Numbers and booleans are stored as text; `null` clears a field.
#[derive(ToSchema)]
pub struct PersonInputDoc {
    pub name: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::hello,
        crate::routes::people::list,
        crate::routes::people::create,
        crate::routes::people::get,
        crate::routes::people::update,
        crate::routes::people::delete,
    ),
    components(
        schemas(
            GreetingDoc,
            PersonDoc,
            PersonInputDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "people")
    )
)]
pub struct ApiDoc;
