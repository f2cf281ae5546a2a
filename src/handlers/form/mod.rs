//! HTML pages and form endpoints.

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::{
    dto::{NoteIdQuery, SaveNoteForm, UpdateNoteForm},
    error::NoteError,
    models::Note,
    service::{NoteService, parse_note_id, require},
};

pub const LISTING_PATH: &str = "/all_notes";

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        html_escape(title),
        body
    ))
}

fn error_response(action: &str, e: &NoteError) -> Response {
    let status = e.status_code();
    if status.is_server_error() {
        tracing::error!("failed to {}: {}", action, e);
    } else {
        tracing::warn!("rejected request to {}: {}", action, e);
    }
    (status, format!("Failed to {action}: {e}")).into_response()
}

fn note_form(action: &str, note: Option<&Note>) -> String {
    let (title, content, hidden) = note.map_or_else(
        || (String::new(), String::new(), String::new()),
        |note| {
            (
                html_escape(&note.title),
                html_escape(&note.content),
                format!(r#"<input type="hidden" name="noteId" value="{}">"#, note.id),
            )
        },
    );

    format!(
        r#"<form action="{action}" method="post">
{hidden}
<label>Title <input type="text" name="title" value="{title}" required></label><br>
<label>Content <textarea name="content" rows="8" required>{content}</textarea></label><br>
<button type="submit">Save</button>
</form>"#
    )
}

#[debug_handler]
pub async fn index() -> Response {
    page(
        "Add note",
        &format!(
            "<h1>Add a note</h1>\n{}\n<p><a href=\"{LISTING_PATH}\">View all notes...</a></p>",
            note_form("/save_note", None)
        ),
    )
    .into_response()
}

#[debug_handler]
pub async fn save_note(
    State(service): State<Arc<NoteService>>,
    Form(form): Form<SaveNoteForm>,
) -> Response {
    let result = async move {
        let title = require("title", form.title)?;
        let content = require("content", form.content)?;
        service.create_note(title, content).await
    }
    .await;

    match result {
        Ok(_) => page(
            "Note saved",
            &format!(
                "<h1 style='text-align:center;'>Note is added successfully!</h1>\n\
                 <h1 style='text-align:center;'><a href='{LISTING_PATH}'>View all notes...</a></h1>"
            ),
        )
        .into_response(),
        Err(e) => error_response("create note", &e),
    }
}

#[debug_handler]
pub async fn edit_note(
    State(service): State<Arc<NoteService>>,
    Query(query): Query<NoteIdQuery>,
) -> Response {
    let result = async move {
        let id = parse_note_id("note_id", query.note_id.as_deref())?;
        service.get_note(id).await
    }
    .await;

    match result {
        Ok(note) => page(
            "Edit note",
            &format!(
                "<h1>Edit note</h1>\n{}",
                note_form("/update_note", Some(&note))
            ),
        )
        .into_response(),
        Err(e) => error_response("load note", &e),
    }
}

#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Form(form): Form<UpdateNoteForm>,
) -> Response {
    let result = async move {
        let title = require("title", form.title)?;
        let content = require("content", form.content)?;
        let id = parse_note_id("noteId", form.note_id.as_deref())?;
        service.update_note(id, title, content).await
    }
    .await;

    match result {
        Ok(_) => Redirect::to(LISTING_PATH).into_response(),
        Err(e) => error_response("update note", &e),
    }
}

#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Query(query): Query<NoteIdQuery>,
) -> Response {
    let result = async move {
        let id = parse_note_id("note_id", query.note_id.as_deref())?;
        service.delete_note(id).await
    }
    .await;

    match result {
        Ok(()) => Redirect::to(LISTING_PATH).into_response(),
        Err(e) => error_response("delete note", &e),
    }
}

#[debug_handler]
pub async fn all_notes(State(service): State<Arc<NoteService>>) -> Response {
    let notes = match service.list_notes().await {
        Ok(notes) => notes,
        Err(e) => return error_response("list notes", &e),
    };

    let body = if notes.is_empty() {
        "<p>No notes available.</p>".to_string()
    } else {
        let rows = notes
            .iter()
            .map(|note| {
                format!(
                    "<tr><td>{id}</td><td>{title}</td><td>{content}</td><td>{date}</td>\
                     <td><a href=\"/edit_note?note_id={id}\">Edit</a> \
                     <a href=\"/delete_note?note_id={id}\">Delete</a></td></tr>",
                    id = note.id,
                    title = html_escape(&note.title),
                    content = html_escape(&note.content),
                    date = note.added_date.format("%Y-%m-%d %H:%M:%S"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "<table>\n<tr><th>Id</th><th>Title</th><th>Content</th><th>Added</th><th></th></tr>\n{rows}\n</table>"
        )
    };

    (
        StatusCode::OK,
        page(
            "All notes",
            &format!("<h1>All notes</h1>\n{body}\n<p><a href=\"/\">Add a note</a></p>"),
        ),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use std::sync::Arc;

    use super::html_escape;
    use crate::{
        handlers::router,
        repository::{FailingRepository, MemoryRepository},
        service::NoteService,
    };

    fn app() -> (Router, Arc<NoteService>) {
        let service = Arc::new(NoteService::new(Arc::new(MemoryRepository::new())));
        (router(service.clone()), service)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("location header")
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[tokio::test]
    async fn save_note_returns_confirmation_with_listing_link() {
        let (app, service) = app();

        let response = app
            .oneshot(form_post("/save_note", "title=Groceries&content=Milk%2C+eggs"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Note is added successfully!"));
        assert!(body.contains("href='/all_notes'"));

        let note = service.get_note(1).await.expect("note should be stored");
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Milk, eggs");
    }

    #[tokio::test]
    async fn save_note_without_title_is_bad_request() {
        let (app, service) = app();

        let response = app
            .oneshot(form_post("/save_note", "content=orphan"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("'title'"));
        assert!(service.list_notes().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_note_redirects_to_listing() {
        let (app, service) = app();
        let note = service
            .create_note("Groceries".to_string(), "Milk, eggs".to_string())
            .await
            .expect("create");

        let response = app
            .oneshot(form_post(
                "/update_note",
                &format!(
                    "title=Groceries&content=Milk%2C+eggs%2C+bread&noteId=+{}+",
                    note.id
                ),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/all_notes");

        let updated = service.get_note(note.id).await.expect("note");
        assert_eq!(updated.content, "Milk, eggs, bread");
        assert!(updated.added_date >= note.added_date);
    }

    // The form handlers used to swallow these failures silently; they now
    // answer with an explicit status instead.

    #[tokio::test]
    async fn update_with_non_numeric_id_is_bad_request() {
        let (app, _) = app();

        let response = app
            .oneshot(form_post("/update_note", "title=a&content=b&noteId=abc"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("'noteId'"));
    }

    #[tokio::test]
    async fn update_of_unknown_note_is_not_found() {
        let (app, _) = app();

        let response = app
            .oneshot(form_post("/update_note", "title=a&content=b&noteId=999"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_note_redirects_and_removes() {
        let (app, service) = app();
        let note = service
            .create_note("a".to_string(), "b".to_string())
            .await
            .expect("create");

        let response = app
            .oneshot(get(&format!("/delete_note?note_id={}", note.id)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/all_notes");
        assert!(service.get_note(note.id).await.is_err());
    }

    #[tokio::test]
    async fn delete_of_unknown_note_is_not_found_and_store_unchanged() {
        let (app, service) = app();
        service
            .create_note("keep".to_string(), "me".to_string())
            .await
            .expect("create");

        let response = app
            .oneshot(get("/delete_note?note_id=999"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(service.list_notes().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_without_id_is_bad_request() {
        let (app, _) = app();

        let response = app.oneshot(get("/delete_note")).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("'note_id'"));
    }

    #[tokio::test]
    async fn listing_escapes_note_text() {
        let (app, service) = app();
        service
            .create_note("<script>".to_string(), "a & b".to_string())
            .await
            .expect("create");

        let response = app.oneshot(get("/all_notes")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("a &amp; b"));
        assert!(body.contains("/edit_note?note_id=1"));
        assert!(body.contains("/delete_note?note_id=1"));
    }

    #[tokio::test]
    async fn edit_page_prefills_the_form() {
        let (app, service) = app();
        service
            .create_note("Title".to_string(), "Body".to_string())
            .await
            .expect("create");

        let response = app
            .oneshot(get("/edit_note?note_id=1"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"name="noteId" value="1""#));
        assert!(body.contains(r#"value="Title""#));
        assert!(body.contains(">Body</textarea>"));
    }

    #[tokio::test]
    async fn storage_failures_answer_500_with_a_body() {
        let app = router(Arc::new(NoteService::new(Arc::new(FailingRepository))));

        let cases = [
            (
                form_post("/save_note", "title=a&content=b"),
                "Failed to create note",
            ),
            (
                form_post("/update_note", "title=a&content=b&noteId=1"),
                "Failed to update note",
            ),
            (get("/delete_note?note_id=1"), "Failed to delete note"),
            (get("/all_notes"), "Failed to list notes"),
            (get("/edit_note?note_id=1"), "Failed to load note"),
        ];

        for (request, expected) in cases {
            let uri = request.uri().to_string();
            let response = app.clone().oneshot(request).await.expect("response");

            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "unexpected status for {uri}"
            );
            let body = body_text(response).await;
            assert!(body.contains(expected), "unexpected body for {uri}: {body}");
            assert!(body.contains("storage error"), "unexpected body for {uri}: {body}");
        }
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_touching_the_store() {
        let app = router(Arc::new(NoteService::new(Arc::new(FailingRepository))));

        let response = app
            .oneshot(form_post("/update_note", "title=a&content=b&noteId=x"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
