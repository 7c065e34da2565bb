//! HTTP handlers for the web shell
//!
//! Each handler reopens the store from the backing file, performs one store
//! operation, and redirects back to the home page with an optional `msg`
//! query parameter for the alert banner.

use super::render;
use super::WebState;
use crate::core::export::render_csv;
use crate::core::models::{Student, StudentUpdate};
use crate::core::stats;
use crate::core::store::{RecordStore, StoreError};
use axum::extract::{Form, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

const PAGE_TITLE: &str = "Student Management System";

/// Query parameters accepted by the home page
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    msg: String,
}

/// Form fields for `POST /add`
#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    degree: String,
}

/// Form fields for `POST /edit/{id}`
#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    degree: String,
}

/// Redirect to the home page with an alert message
fn redirect_msg(msg: &str) -> Redirect {
    Redirect::to(&format!("/?msg={}", msg.replace(' ', "+")))
}

fn open_store(state: &WebState) -> Result<RecordStore, StoreError> {
    RecordStore::open(&state.data_file)
}

/// Interpret a raw form age: digit strings parse, everything else is 0
/// ("unspecified"). Range checking is left to the store.
fn coerce_form_age(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

/// `GET /`: roster table, search, stats, and the add form
pub async fn home(State(state): State<Arc<WebState>>, Query(query): Query<HomeQuery>) -> Html<String> {
    let store = match open_store(&state) {
        Ok(store) => store,
        Err(e) => {
            logger::error!("Failed to open roster for the web shell: {e}");
            return Html(render::render_layout(
                PAGE_TITLE,
                "",
                "Could not read the roster",
            ));
        }
    };

    let needle = query.q.trim().to_lowercase();
    let filtered: Vec<Student> = if needle.is_empty() {
        store.students().to_vec()
    } else {
        store
            .students()
            .iter()
            .filter(|s| {
                s.id.to_lowercase().contains(&needle)
                    || s.name.to_lowercase().contains(&needle)
                    || s.degree.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    };

    let stats = stats::compute(&filtered);
    let content = render::home_content(&filtered, &stats, query.q.trim());
    Html(render::render_layout(PAGE_TITLE, &content, query.msg.trim()))
}

/// `POST /add`: create a record and bounce back home
pub async fn add(State(state): State<Arc<WebState>>, Form(form): Form<AddForm>) -> Redirect {
    let mut store = match open_store(&state) {
        Ok(store) => store,
        Err(_) => return redirect_msg("Could not read the roster"),
    };

    if form.id.trim().is_empty() || form.name.trim().is_empty() {
        return redirect_msg("ID and Name are required");
    }

    let age = coerce_form_age(&form.age);
    match store.add(&form.id, &form.name, age, &form.degree) {
        Ok(()) => Redirect::to("/"),
        Err(StoreError::DuplicateId(_)) => {
            redirect_msg("Student ID already exists. Use a unique ID")
        }
        Err(StoreError::InvalidInput(_)) => redirect_msg("ID and Name are required"),
        Err(e) => {
            logger::error!("Add failed in the web shell: {e}");
            redirect_msg("Could not save the roster")
        }
    }
}

/// `GET /edit/{id}`: edit form for one record
pub async fn edit_form(
    State(state): State<Arc<WebState>>,
    Path(sid): Path<String>,
) -> Result<Html<String>, Redirect> {
    let store = open_store(&state).map_err(|_| redirect_msg("Could not read the roster"))?;

    store.find_by_id(&sid).map_or_else(
        || Err(redirect_msg("Student not found")),
        |student| {
            Ok(Html(render::render_layout(
                "Edit Student",
                &render::edit_content(student),
                "",
            )))
        },
    )
}

/// `POST /edit/{id}`: apply a partial update; blank fields keep their
/// current values
pub async fn edit_save(
    State(state): State<Arc<WebState>>,
    Path(sid): Path<String>,
    Form(form): Form<EditForm>,
) -> Redirect {
    let mut store = match open_store(&state) {
        Ok(store) => store,
        Err(_) => return redirect_msg("Could not read the roster"),
    };

    let mut input = StudentUpdate::default();
    if !form.name.trim().is_empty() {
        input.name = Some(form.name.trim().to_string());
    }
    let age_raw = form.age.trim();
    if !age_raw.is_empty() && age_raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(age) = age_raw.parse() {
            input.age = Some(age);
        }
    }
    if !form.degree.trim().is_empty() {
        input.degree = Some(form.degree.trim().to_string());
    }

    match store.update(&sid, &input) {
        Ok(outcome) if outcome.age_rejected => {
            redirect_msg("Invalid age. Keeping previous value")
        }
        Ok(_) => Redirect::to("/"),
        Err(StoreError::NotFound(_)) => redirect_msg("Student not found"),
        Err(e) => {
            logger::error!("Update failed in the web shell: {e}");
            redirect_msg("Could not save the roster")
        }
    }
}

/// `GET /delete/{id}`: remove a record
pub async fn delete(State(state): State<Arc<WebState>>, Path(sid): Path<String>) -> Redirect {
    let mut store = match open_store(&state) {
        Ok(store) => store,
        Err(_) => return redirect_msg("Could not read the roster"),
    };

    match store.remove(&sid) {
        Ok(_) => Redirect::to("/"),
        Err(StoreError::NotFound(_)) => redirect_msg("Student not found"),
        Err(e) => {
            logger::error!("Delete failed in the web shell: {e}");
            redirect_msg("Could not save the roster")
        }
    }
}

/// `GET /export.csv`: download the roster as a CSV attachment
pub async fn export_csv(State(state): State<Arc<WebState>>) -> Response {
    let store = match open_store(&state) {
        Ok(store) => store,
        Err(_) => return redirect_msg("Could not read the roster").into_response(),
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=students_export.csv",
            ),
        ],
        render_csv(store.students()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::coerce_form_age;

    #[test]
    fn test_coerce_form_age() {
        assert_eq!(coerce_form_age(""), 0);
        assert_eq!(coerce_form_age(" 18 "), 18);
        assert_eq!(coerce_form_age("abc"), 0);
        assert_eq!(coerce_form_age("-1"), 0);
    }
}
